//=========================================================================
// Core Systems
//
// Toolkit-independent building blocks of the frontend.
//
// Components:
// - `native`:   resolve a core by logical path and bind its entry points
// - `graphics`: frame buffer, sprite and drawing routines
// - `dispatch`: event-driven state updates and redraw scheduling
//
// Notes:
// Everything here runs on a single thread. The platform layer feeds
// events in and supplies the surface frames are presented to.
//
//=========================================================================

pub mod dispatch;
pub mod graphics;
pub mod native;
