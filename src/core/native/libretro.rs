//=========================================================================
// Libretro Core Binding
//=========================================================================
//
// Capability view of a loaded core. Only the API-version query is bound
// for now; further entry points slot in as extra `BoundEntryPoint`s.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::ffi::c_uint;
use std::path::Path;

//=== External Dependencies ===============================================

use log::debug;

//=== Internal Dependencies ===============================================

use super::error::LoadError;
use super::loader::{BoundEntryPoint, EntryPointDescriptor, NativeModuleHandle, NativeModuleLoader};
use super::resolver::ModulePath;

//=== Constants ===========================================================

/// API version every conformant core reports.
pub const RETRO_API_VERSION: u32 = 1;

const API_VERSION_SYMBOL: &str = "retro_api_version";

/// `unsigned retro_api_version(void)`
type ApiVersionFn = unsafe extern "C" fn() -> c_uint;

//=== NativeCore ==========================================================

/// Operations a loaded core exposes to the frontend.
pub trait NativeCore {
    /// Queries the core's API version.
    ///
    /// Blocks the calling thread for the duration of the foreign call.
    fn api_version(&self) -> u32;
}

//=== LibretroCore ========================================================

/// A core loaded through the libretro C ABI.
#[derive(Debug)]
pub struct LibretroCore {
    handle: NativeModuleHandle,
    api_version: BoundEntryPoint<ApiVersionFn>,
}

impl LibretroCore {
    /// Entry points a libretro core must export.
    pub fn descriptors() -> Vec<EntryPointDescriptor> {
        vec![EntryPointDescriptor::of::<ApiVersionFn>(API_VERSION_SYMBOL)]
    }

    /// Opens the core at `path` and binds its entry points.
    ///
    /// # Safety
    ///
    /// The library's initialisation routines run on load, and the binary
    /// must really implement the libretro ABI: its `retro_api_version`
    /// must have the signature `unsigned (void)`. Anything else makes
    /// [`NativeCore::api_version`] undefined behaviour.
    pub unsafe fn load(path: &ModulePath) -> Result<Self, LoadError> {
        let handle = unsafe { NativeModuleLoader::load(path, Self::descriptors()) }?;
        Self::from_handle(handle)
    }

    /// Binds the libretro entry points of an already opened module.
    ///
    /// The handle must have been loaded with (at least) [`Self::descriptors`].
    pub fn from_handle(handle: NativeModuleHandle) -> Result<Self, LoadError> {
        let api_version = handle.bind::<ApiVersionFn>(API_VERSION_SYMBOL)?;
        debug!(target: "native", "Bound {} from {}", api_version.name(), handle.path().display());

        Ok(Self { handle, api_version })
    }

    pub fn path(&self) -> &Path {
        self.handle.path()
    }
}

impl NativeCore for LibretroCore {
    fn api_version(&self) -> u32 {
        // SAFETY: declared as `unsigned (void)`, which is the libretro ABI
        // the caller of `load` vouched for.
        unsafe { self.api_version.call() }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::native::TypeTag;

    #[test]
    fn declares_api_version_entry_point() {
        let descriptors = LibretroCore::descriptors();
        assert_eq!(descriptors.len(), 1);
        assert_eq!(descriptors[0].name, "retro_api_version");
        assert_eq!(descriptors[0].return_type, TypeTag::U32);
        assert!(descriptors[0].param_types.is_empty());
    }

    #[test]
    fn native_core_is_object_safe() {
        struct Fake;
        impl NativeCore for Fake {
            fn api_version(&self) -> u32 {
                RETRO_API_VERSION
            }
        }

        let core: Box<dyn NativeCore> = Box::new(Fake);
        assert_eq!(core.api_version(), 1);
    }
}
