//=========================================================================
// Retroframe Frontend
//
// Main entry point and coordinator.
//
// Architecture:
// ```text
//     FrontendBuilder ──build()──> Frontend ──run()──> [Runtime]
//         │                           │
//         ├─ with_title()             ├─ resolve + load core (once)
//         ├─ with_initial_size()      ├─ validate API version
//         ├─ with_core()              └─ run platform event loop
//         ├─ with_core_dir()             (blocks until window closes)
//         └─ with_sprite()
// ```
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::path::{Path, PathBuf};

use log::{error, info};

//=== Internal Dependencies ===============================================

use crate::core::graphics::Sprite;
use crate::core::native::{
    LibretroCore, LoadError, ModuleResolver, NativeCore, ResolveError, RETRO_API_VERSION,
};
use crate::platform::{Platform, PlatformError, WindowConfig};

//=== Constants ===========================================================

/// Logical path of the core loaded when none is configured explicitly,
/// relative to the executable's directory.
pub const DEFAULT_CORE: &str = "cores/gambatte_libretro";

//=== StartupError ========================================================

/// Fatal errors that abort startup. None of them are retried.
#[derive(Debug)]
pub enum StartupError {
    Resolve(ResolveError),
    Load(LoadError),

    /// The core answered the version query with an unexpected value.
    ApiVersionMismatch { expected: u32, found: u32 },

    Platform(PlatformError),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolve(e) => write!(f, "Core resolution failed: {}", e),
            Self::Load(e) => write!(f, "Core loading failed: {}", e),
            Self::ApiVersionMismatch { expected, found } => write!(
                f,
                "Core reports API version {}, expected {}",
                found, expected
            ),
            Self::Platform(e) => write!(f, "Platform error: {}", e),
        }
    }
}

impl std::error::Error for StartupError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Resolve(e) => Some(e),
            Self::Load(e) => Some(e),
            Self::Platform(e) => Some(e),
            Self::ApiVersionMismatch { .. } => None,
        }
    }
}

impl From<ResolveError> for StartupError {
    fn from(e: ResolveError) -> Self {
        Self::Resolve(e)
    }
}

impl From<LoadError> for StartupError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

impl From<PlatformError> for StartupError {
    fn from(e: PlatformError) -> Self {
        Self::Platform(e)
    }
}

//=== Core Startup ========================================================

/// Checks that a core speaks the expected API version.
///
/// Performs one blocking foreign call.
pub fn check_api_version(core: &dyn NativeCore) -> Result<u32, StartupError> {
    let found = core.api_version();
    if found != RETRO_API_VERSION {
        return Err(StartupError::ApiVersionMismatch {
            expected: RETRO_API_VERSION,
            found,
        });
    }
    Ok(found)
}

/// Resolves, loads and validates the core at `logical`.
///
/// # Safety
///
/// The library found at the resolved path is loaded and called. It must be
/// a trusted core implementing the libretro C ABI; see
/// [`LibretroCore::load`].
pub unsafe fn load_core(resolver: &ModuleResolver, logical: &Path) -> Result<LibretroCore, StartupError> {
    let path = resolver.resolve(logical)?;
    let core = unsafe { LibretroCore::load(&path) }?;
    let version = check_api_version(&core)?;

    info!(
        target: "frontend",
        "Core {} ready (API version {})",
        core.path().display(),
        version
    );
    Ok(core)
}

//=== FrontendBuilder =====================================================

/// Builder for configuring and constructing a [`Frontend`].
///
/// # Default Values
///
/// - **Title**: `"Retroframe"`
/// - **Initial size**: 640×480 logical pixels
/// - **Core**: none
/// - **Core directory**: the executable's directory
/// - **Sprite**: [`Sprite::default`]
///
/// # Examples
///
/// ```no_run
/// use retroframe::FrontendBuilder;
///
/// let result = FrontendBuilder::new()
///     .with_title("Retroframe")
///     .with_initial_size(800, 600)
///     .with_core("cores/gambatte_libretro")
///     .build()
///     .run();
///
/// if let Err(e) = result {
///     eprintln!("{}", e);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct FrontendBuilder {
    title: String,
    width: u32,
    height: u32,
    core: Option<PathBuf>,
    core_dir: Option<PathBuf>,
    sprite: Sprite,
}

impl FrontendBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Retroframe".to_string(),
            width: 640,
            height: 480,
            core: None,
            core_dir: None,
            sprite: Sprite::default(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the window's initial inner size in logical pixels.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn with_initial_size(mut self, width: u32, height: u32) -> Self {
        assert!(width > 0 && height > 0, "Window size must be positive, got {}x{}", width, height);
        self.width = width;
        self.height = height;
        self
    }

    /// Logical, extension-less path of the core to load at startup.
    ///
    /// The library at that location is executed in-process and must be a
    /// trusted libretro core.
    pub fn with_core(mut self, logical: impl Into<PathBuf>) -> Self {
        self.core = Some(logical.into());
        self
    }

    /// Directory the core path is resolved against.
    pub fn with_core_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.core_dir = Some(dir.into());
        self
    }

    pub fn with_sprite(mut self, sprite: Sprite) -> Self {
        self.sprite = sprite;
        self
    }

    pub fn build(self) -> Frontend {
        info!(
            target: "frontend",
            "Building frontend ({}x{}, core: {})",
            self.width,
            self.height,
            self.core
                .as_ref()
                .map(|core| core.display().to_string())
                .unwrap_or_else(|| "none".to_string())
        );

        let resolver = match self.core_dir {
            Some(dir) => ModuleResolver::new(dir),
            None => ModuleResolver::from_executable_dir(),
        };

        Frontend {
            window: WindowConfig {
                title: self.title,
                width: self.width,
                height: self.height,
            },
            resolver,
            core: self.core,
            sprite: self.sprite,
        }
    }
}

impl Default for FrontendBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Frontend ============================================================

/// Configured frontend, ready to run.
#[derive(Debug)]
pub struct Frontend {
    window: WindowConfig,
    resolver: ModuleResolver,
    core: Option<PathBuf>,
    sprite: Sprite,
}

impl Frontend {
    /// Loads the configured core, then blocks in the window event loop
    /// until the window is closed.
    ///
    /// # Lifecycle
    ///
    /// 1. Resolve, load and validate the core (if one is configured)
    /// 2. Run the platform event loop (blocks here)
    /// 3. Unload the core once the loop has exited
    ///
    /// # Errors
    ///
    /// Every [`StartupError`] is fatal. Core errors are reported before any
    /// window is opened.
    pub fn run(self) -> Result<(), StartupError> {
        info!(target: "frontend", "Starting frontend");

        //--- 1. Core --------------------------------------------------------
        let core = match &self.core {
            Some(logical) => {
                // SAFETY: `with_core` designates a trusted libretro core.
                let core = unsafe { load_core(&self.resolver, logical) }.map_err(|e| {
                    error!(target: "frontend", "{}", e);
                    e
                })?;
                Some(core)
            }
            None => {
                info!(target: "frontend", "No core configured");
                None
            }
        };

        //--- 2. Platform ----------------------------------------------------
        let platform = Platform::new(self.window, self.sprite);
        platform.run()?;

        //--- 3. Cleanup -----------------------------------------------------
        drop(core);
        info!(target: "frontend", "Frontend shutdown complete");
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
