//=========================================================================
// Platform Identifier
//=========================================================================
//
// Closed set of host OS families and the native-library suffix each one
// uses. Only three families can host a core; every other variant resolves
// to `ResolveError::UnsupportedPlatform`, including `Other`, which stands
// for any target without a variant of its own.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::fmt;

//=== Internal Dependencies ===============================================

use super::error::ResolveError;

//=== PlatformId ==========================================================

/// Host operating-system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformId {
    Win32,
    Darwin,
    Linux,
    FreeBsd,
    OpenBsd,
    NetBsd,
    Android,
    Aix,
    SunOs,
    Haiku,
    Other,
}

impl PlatformId {
    /// Every known platform, in declaration order.
    pub const ALL: [PlatformId; 11] = [
        PlatformId::Win32,
        PlatformId::Darwin,
        PlatformId::Linux,
        PlatformId::FreeBsd,
        PlatformId::OpenBsd,
        PlatformId::NetBsd,
        PlatformId::Android,
        PlatformId::Aix,
        PlatformId::SunOs,
        PlatformId::Haiku,
        PlatformId::Other,
    ];

    //--- Detection --------------------------------------------------------

    /// Returns the platform this binary was compiled for.
    ///
    /// Targets without a dedicated variant are reported as `Other`.
    pub const fn current() -> Self {
        if cfg!(target_os = "linux") {
            PlatformId::Linux
        } else if cfg!(target_os = "windows") {
            PlatformId::Win32
        } else if cfg!(any(target_os = "macos", target_os = "ios")) {
            PlatformId::Darwin
        } else if cfg!(target_os = "android") {
            PlatformId::Android
        } else if cfg!(target_os = "freebsd") {
            PlatformId::FreeBsd
        } else if cfg!(target_os = "openbsd") {
            PlatformId::OpenBsd
        } else if cfg!(target_os = "netbsd") {
            PlatformId::NetBsd
        } else if cfg!(target_os = "aix") {
            PlatformId::Aix
        } else if cfg!(any(target_os = "solaris", target_os = "illumos")) {
            PlatformId::SunOs
        } else if cfg!(target_os = "haiku") {
            PlatformId::Haiku
        } else {
            PlatformId::Other
        }
    }

    //--- Library Suffix ---------------------------------------------------

    /// Native-library file suffix for this platform, dot included.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::UnsupportedPlatform`] for every platform
    /// that has no entry in the suffix table.
    pub fn library_suffix(self) -> Result<&'static str, ResolveError> {
        match self {
            PlatformId::Win32 => Ok(".dll"),
            PlatformId::Darwin => Ok(".dylib"),
            PlatformId::Linux => Ok(".so"),
            PlatformId::FreeBsd
            | PlatformId::OpenBsd
            | PlatformId::NetBsd
            | PlatformId::Android
            | PlatformId::Aix
            | PlatformId::SunOs
            | PlatformId::Haiku
            | PlatformId::Other => Err(ResolveError::UnsupportedPlatform(self)),
        }
    }

    /// Lowercase identifier, e.g. `"win32"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            PlatformId::Win32 => "win32",
            PlatformId::Darwin => "darwin",
            PlatformId::Linux => "linux",
            PlatformId::FreeBsd => "freebsd",
            PlatformId::OpenBsd => "openbsd",
            PlatformId::NetBsd => "netbsd",
            PlatformId::Android => "android",
            PlatformId::Aix => "aix",
            PlatformId::SunOs => "sunos",
            PlatformId::Haiku => "haiku",
            PlatformId::Other => "other",
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl fmt::Display for PlatformId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn supported_platforms_have_suffixes() {
        assert_eq!(PlatformId::Win32.library_suffix().unwrap(), ".dll");
        assert_eq!(PlatformId::Darwin.library_suffix().unwrap(), ".dylib");
        assert_eq!(PlatformId::Linux.library_suffix().unwrap(), ".so");
    }

    #[test]
    fn other_platforms_are_unsupported() {
        for id in PlatformId::ALL {
            if matches!(id, PlatformId::Win32 | PlatformId::Darwin | PlatformId::Linux) {
                continue;
            }
            match id.library_suffix() {
                Err(ResolveError::UnsupportedPlatform(reported)) => assert_eq!(reported, id),
                other => panic!("Expected UnsupportedPlatform for {}, got {:?}", id, other),
            }
        }
    }

    #[test]
    fn unlisted_targets_are_unsupported() {
        assert_eq!(
            PlatformId::Other.library_suffix(),
            Err(ResolveError::UnsupportedPlatform(PlatformId::Other))
        );
        assert_eq!(PlatformId::Other.to_string(), "other");
    }

    #[test]
    fn current_platform_is_listed() {
        assert!(PlatformId::ALL.contains(&PlatformId::current()));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn current_platform_on_linux() {
        assert_eq!(PlatformId::current(), PlatformId::Linux);
    }
}
