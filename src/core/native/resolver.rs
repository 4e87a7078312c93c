//=========================================================================
// Module Resolver
//=========================================================================
//
// Maps a logical, extension-less core path to a concrete library file.
//
//   "cores/gambatte_libretro" + linux  →  <base>/cores/gambatte_libretro.so
//
// The only filesystem interaction is an existence check.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::ffi::OsString;
use std::path::{Path, PathBuf};

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::error::ResolveError;
use super::platform_id::PlatformId;

//=== ModulePath ==========================================================

/// Absolute path to a native library that existed when it was resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModulePath(PathBuf);

impl ModulePath {
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for ModulePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

//=== ModuleResolver ======================================================

/// Resolves logical core paths against a base directory for one platform.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    base_dir: PathBuf,
    platform: PlatformId,
}

impl ModuleResolver {
    //--- Construction -----------------------------------------------------

    /// Resolver rooted at `base_dir` for the platform this binary targets.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            platform: PlatformId::current(),
        }
    }

    /// Resolver rooted at the directory holding the running executable.
    ///
    /// Falls back to the current directory if the executable location
    /// cannot be determined.
    pub fn from_executable_dir() -> Self {
        let base_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| {
                warn!(target: "native", "Executable directory unknown, using current directory");
                PathBuf::from(".")
            });
        Self::new(base_dir)
    }

    /// Overrides the target platform (mostly useful for tests and tooling).
    pub fn with_platform(mut self, platform: PlatformId) -> Self {
        self.platform = platform;
        self
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn platform(&self) -> PlatformId {
        self.platform
    }

    //--- Resolution -------------------------------------------------------

    /// Builds the platform-specific path for `logical` without touching the
    /// filesystem.
    ///
    /// The suffix is appended textually, so `core.v2` becomes `core.v2.so`
    /// rather than having its "extension" replaced.
    ///
    /// # Errors
    ///
    /// [`ResolveError::UnsupportedPlatform`] if the platform has no suffix.
    pub fn candidate(&self, logical: impl AsRef<Path>) -> Result<PathBuf, ResolveError> {
        let suffix = self.platform.library_suffix()?;

        let mut file: OsString = logical.as_ref().as_os_str().to_owned();
        file.push(suffix);

        let joined = self.base_dir.join(file);
        Ok(std::path::absolute(&joined).unwrap_or(joined))
    }

    /// Resolves `logical` to an existing library file.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::UnsupportedPlatform`] before any filesystem access
    /// - [`ResolveError::ModuleNotFound`] carrying the attempted path
    pub fn resolve(&self, logical: impl AsRef<Path>) -> Result<ModulePath, ResolveError> {
        let path = self.candidate(logical)?;

        if !path.exists() {
            debug!(target: "native", "No core at {}", path.display());
            return Err(ResolveError::ModuleNotFound { path });
        }

        debug!(target: "native", "Resolved core: {}", path.display());
        Ok(ModulePath(path))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
