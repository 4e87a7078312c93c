//=========================================================================
// Native Module Errors
//=========================================================================
//
// Failures raised while locating and opening a native core. All of them
// are fatal at startup; nothing here is retried.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;
use std::path::PathBuf;

//=== Internal Dependencies ===============================================

use super::loader::TypeTag;
use super::platform_id::PlatformId;

//=== ResolveError ========================================================

/// Errors produced by [`ModuleResolver`](super::ModuleResolver).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The platform has no native-library suffix. Raised before any
    /// filesystem access.
    UnsupportedPlatform(PlatformId),

    /// No file exists at the resolved location.
    ModuleNotFound { path: PathBuf },
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedPlatform(id) => write!(f, "Unsupported platform: {}", id),
            Self::ModuleNotFound { path } => write!(f, "Core not found at {}", path.display()),
        }
    }
}

impl std::error::Error for ResolveError {}

//=== LoadError ===========================================================

/// Errors produced while opening a module or binding its entry points.
#[derive(Debug)]
pub enum LoadError {
    /// The binary could not be opened (corrupt, wrong architecture, ...).
    Open {
        path: PathBuf,
        source: libloading::Error,
    },

    /// A declared symbol is not exported by the module.
    MissingSymbol {
        name: String,
        source: libloading::Error,
    },

    /// `bind` was asked for a name that was never declared at load time.
    Undeclared { name: String },

    /// The requested function type does not agree with the declared
    /// descriptor.
    DescriptorMismatch {
        name: String,
        declared: Signature,
        requested: Signature,
    },
}

/// Return and parameter tags, used for mismatch reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    pub return_type: TypeTag,
    pub param_types: Vec<TypeTag>,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "fn(")?;
        for (i, tag) in self.param_types.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", tag)?;
        }
        write!(f, ") -> {}", self.return_type)
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Failed to open core {}: {}", path.display(), source)
            }
            Self::MissingSymbol { name, source } => {
                write!(f, "Symbol '{}' not found: {}", name, source)
            }
            Self::Undeclared { name } => {
                write!(f, "Entry point '{}' was not declared when loading", name)
            }
            Self::DescriptorMismatch { name, declared, requested } => write!(
                f,
                "Entry point '{}' declared as {} but bound as {}",
                name, declared, requested
            ),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. } | Self::MissingSymbol { source, .. } => Some(source),
            Self::Undeclared { .. } | Self::DescriptorMismatch { .. } => None,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_carries_path() {
        let err = ResolveError::ModuleNotFound {
            path: PathBuf::from("/cores/missing.so"),
        };
        assert!(err.to_string().contains("/cores/missing.so"));
    }

    #[test]
    fn unsupported_message_names_platform() {
        let err = ResolveError::UnsupportedPlatform(PlatformId::Haiku);
        assert_eq!(err.to_string(), "Unsupported platform: haiku");
    }

    #[test]
    fn mismatch_message_shows_both_signatures() {
        let err = LoadError::DescriptorMismatch {
            name: "retro_api_version".to_string(),
            declared: Signature {
                return_type: TypeTag::U32,
                param_types: vec![],
            },
            requested: Signature {
                return_type: TypeTag::I64,
                param_types: vec![TypeTag::Pointer, TypeTag::U8],
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("fn() -> u32"), "{}", msg);
        assert!(msg.contains("fn(pointer, u8) -> i64"), "{}", msg);
    }

    #[test]
    fn errors_implement_error_trait() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<ResolveError>();
        assert_error::<LoadError>();
    }
}
