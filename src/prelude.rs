//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use retroframe::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Frontend
pub use crate::{Frontend, FrontendBuilder, StartupError};

// Native core
pub use crate::core::native::{LibretroCore, ModuleResolver, NativeCore, PlatformId};

// Graphics
pub use crate::core::graphics::{Color, FrameBuffer, PresentationSurface, Sprite};

// Events
pub use crate::core::dispatch::{AppState, EventDispatcher, Key, SurfaceEvent};
