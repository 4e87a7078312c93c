//=========================================================================
// Native Core Subsystem
//=========================================================================
//
// Locates a core by logical path and binds its entry points.
//
// Pipeline (runs once at startup):
//   logical path ─► ModuleResolver ─► ModulePath
//                ─► NativeModuleLoader ─► NativeModuleHandle
//                ─► LibretroCore (NativeCore)
//
// Components:
// - `platform_id`: host OS families and their library suffixes
// - `resolver`: logical path → existing library file
// - `loader`: dynamic loading and typed entry-point binding
// - `libretro`: the `NativeCore` capability over the libretro ABI
// - `error`: resolve/load error types
//
//=========================================================================

//=== Module Declarations =================================================

mod error;
mod libretro;
mod loader;
mod platform_id;
mod resolver;

//=== Public API ==========================================================

pub use error::{LoadError, ResolveError, Signature};
pub use libretro::{LibretroCore, NativeCore, RETRO_API_VERSION};
pub use loader::{
    BoundEntryPoint, EntryPointDescriptor, EntryPointSignature, NativeModuleHandle,
    NativeModuleLoader, NativeType, TypeTag,
};
pub use platform_id::PlatformId;
pub use resolver::{ModulePath, ModuleResolver};
