//=========================================================================
// Surface Events
//=========================================================================
//
// Engine-side representation of what the display surface reports.
// Toolkit types never cross into the dispatcher; the platform layer maps
// them to these first.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use crate::core::graphics::Direction;

//=== Key =================================================================

/// Symbolic key carried by a key-down event.
///
/// Only the four arrows have an effect; everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Other,
}

impl Key {
    pub fn direction(self) -> Option<Direction> {
        match self {
            Key::Left => Some(Direction::Left),
            Key::Right => Some(Direction::Right),
            Key::Up => Some(Direction::Up),
            Key::Down => Some(Direction::Down),
            Key::Other => None,
        }
    }
}

//=== SurfaceEvent ========================================================

/// Events the dispatcher reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// Drawable area changed; the new size is queried from the surface.
    Resize,

    /// Surface contents were lost and must be drawn again.
    Expose,

    /// A key was pressed.
    KeyDown(Key),
}

//=========================================================================
// Unit Tests
//=========================================================================
