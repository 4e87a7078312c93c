//=========================================================================
// Retroframe — Library Root
//
// This crate defines the public API surface of Retroframe.
//
// Responsibilities:
// - Expose the frontend entry point (`Frontend`, `FrontendBuilder`)
// - Expose the native-core loader and the software frame-buffer pipeline
//   for direct use and testing
// - Keep the windowing integration (`platform`) hidden from end users
//
// Typical usage:
// ```no_run
// use retroframe::FrontendBuilder;
//
// fn main() {
//     let _ = FrontendBuilder::new()
//         .with_core("cores/gambatte_libretro")
//         .build()
//         .run();
// }
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the native loader, the renderer and the event
// dispatcher. None of it depends on a windowing toolkit.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `platform` contains the Winit/softbuffer integration (window, event
// loop, presentation) and is kept private.
//
// `frontend` wires the startup chain and the platform together.
//
mod frontend;
mod platform;

//--- Public Exports ------------------------------------------------------

pub use frontend::{check_api_version, load_core, Frontend, FrontendBuilder, StartupError, DEFAULT_CORE};
pub use platform::PlatformError;
