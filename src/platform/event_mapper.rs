//=========================================================================
// Platform Event Mapper
//
// Converts Winit window events to engine-level `SurfaceEvent`s, keeping
// toolkit types out of the dispatcher.
//
// Notes:
// - `Resized` becomes `Resize` (size is re-queried from the surface)
// - `RedrawRequested` is Winit's expose notification
// - Pressed keys become `KeyDown`; releases are ignored
// - Key repeats are delivered like fresh presses
//
//=========================================================================

use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

use crate::core::dispatch::{Key, SurfaceEvent};

//=== Key Conversion ======================================================

impl From<PhysicalKey> for Key {
    fn from(key: PhysicalKey) -> Self {
        match key {
            PhysicalKey::Code(WinitKeyCode::ArrowLeft) => Key::Left,
            PhysicalKey::Code(WinitKeyCode::ArrowRight) => Key::Right,
            PhysicalKey::Code(WinitKeyCode::ArrowUp) => Key::Up,
            PhysicalKey::Code(WinitKeyCode::ArrowDown) => Key::Down,
            _ => Key::Other,
        }
    }
}

//=== Full Event Conversion ===============================================

/// Maps a window event, or returns `None` for events the dispatcher does
/// not handle.
pub(crate) fn surface_event(event: &WindowEvent) -> Option<SurfaceEvent> {
    match event {
        WindowEvent::Resized(_) | WindowEvent::ScaleFactorChanged { .. } => Some(SurfaceEvent::Resize),

        WindowEvent::RedrawRequested => Some(SurfaceEvent::Expose),

        WindowEvent::KeyboardInput { event, .. } => match event.state {
            ElementState::Pressed => Some(SurfaceEvent::KeyDown(Key::from(event.physical_key))),
            ElementState::Released => None,
        },

        _ => None,
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalSize;
    use winit::keyboard::NativeKeyCode;

    #[test]
    fn arrow_keys_map_to_directions() {
        assert_eq!(Key::from(PhysicalKey::Code(WinitKeyCode::ArrowLeft)), Key::Left);
        assert_eq!(Key::from(PhysicalKey::Code(WinitKeyCode::ArrowRight)), Key::Right);
        assert_eq!(Key::from(PhysicalKey::Code(WinitKeyCode::ArrowUp)), Key::Up);
        assert_eq!(Key::from(PhysicalKey::Code(WinitKeyCode::ArrowDown)), Key::Down);
    }

    #[test]
    fn other_keys_map_to_other() {
        assert_eq!(Key::from(PhysicalKey::Code(WinitKeyCode::KeyW)), Key::Other);
        assert_eq!(Key::from(PhysicalKey::Code(WinitKeyCode::Space)), Key::Other);
        assert_eq!(
            Key::from(PhysicalKey::Unidentified(NativeKeyCode::Unidentified)),
            Key::Other
        );
    }

    #[test]
    fn resize_and_redraw_events_map() {
        assert_eq!(
            surface_event(&WindowEvent::Resized(PhysicalSize::new(320, 240))),
            Some(SurfaceEvent::Resize)
        );
        assert_eq!(surface_event(&WindowEvent::RedrawRequested), Some(SurfaceEvent::Expose));
    }

    #[test]
    fn unrelated_events_are_dropped() {
        assert_eq!(surface_event(&WindowEvent::CloseRequested), None);
        assert_eq!(surface_event(&WindowEvent::Focused(true)), None);
    }
}
