//=========================================================================
// Graphics
//
// Software frame-buffer pipeline: pixel storage, the sprite overlay, and
// the drawing routines that compose them into a presentable frame.
//
//=========================================================================

//=== Submodules ==========================================================
mod color;
mod frame_buffer;
pub mod renderer;
mod sprite;

//=== Public API ==========================================================
pub use color::Color;
pub use frame_buffer::{Frame, FrameBuffer, PixelFormat, BYTES_PER_PIXEL};
pub use renderer::{draw_background, draw_sprite, redraw, PresentationSurface};
pub use sprite::{Direction, Sprite};
