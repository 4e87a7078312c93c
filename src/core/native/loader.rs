//=========================================================================
// Native Module Loader
//=========================================================================
//
// Opens a resolved core as a dynamic library and binds declared entry
// points into typed callables.
//
// Architecture:
// ```text
//  ModulePath + [EntryPointDescriptor]
//        │
//        ▼  NativeModuleLoader::load (dlopen + symbol check)
//  NativeModuleHandle ──bind::<F>(name)──> BoundEntryPoint<F> ──call()──> R
// ```
//
// The native signature is described twice: once as tags in the
// descriptor, once as the Rust function-pointer type `F`. `bind` checks
// the two agree. Nothing can check either of them against the real
// symbol, so a wrong declaration is undefined behaviour at call time.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::collections::HashMap;
use std::ffi::c_void;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

//=== External Dependencies ===============================================

use libloading::Library;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::error::{LoadError, Signature};
use super::resolver::ModulePath;

//=== TypeTag =============================================================

/// Primitive type of a native parameter or return value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Void,
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    I64,
    U64,
    ISize,
    USize,
    F32,
    F64,
    Pointer,
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeTag::Void => "void",
            TypeTag::I8 => "i8",
            TypeTag::U8 => "u8",
            TypeTag::I16 => "i16",
            TypeTag::U16 => "u16",
            TypeTag::I32 => "i32",
            TypeTag::U32 => "u32",
            TypeTag::I64 => "i64",
            TypeTag::U64 => "u64",
            TypeTag::ISize => "isize",
            TypeTag::USize => "usize",
            TypeTag::F32 => "f32",
            TypeTag::F64 => "f64",
            TypeTag::Pointer => "pointer",
        };
        f.write_str(name)
    }
}

//=== NativeType ==========================================================

/// Rust types that may cross the foreign-call boundary by value.
pub trait NativeType: Copy {
    const TAG: TypeTag;
}

macro_rules! native_type {
    ($($ty:ty => $tag:ident),* $(,)?) => {
        $(impl NativeType for $ty {
            const TAG: TypeTag = TypeTag::$tag;
        })*
    };
}

native_type! {
    () => Void,
    i8 => I8, u8 => U8,
    i16 => I16, u16 => U16,
    i32 => I32, u32 => U32,
    i64 => I64, u64 => U64,
    isize => ISize, usize => USize,
    f32 => F32, f64 => F64,
}

impl<T> NativeType for *const T {
    const TAG: TypeTag = TypeTag::Pointer;
}

impl<T> NativeType for *mut T {
    const TAG: TypeTag = TypeTag::Pointer;
}

//=== EntryPointSignature =================================================

/// An `unsafe extern "C" fn` type whose tags can be derived statically.
///
/// Implemented for functions of up to six [`NativeType`] parameters.
pub trait EntryPointSignature: Copy {
    fn return_type() -> TypeTag;
    fn param_types() -> Vec<TypeTag>;

    fn signature() -> Signature {
        Signature {
            return_type: Self::return_type(),
            param_types: Self::param_types(),
        }
    }
}

//=== EntryPointDescriptor ================================================

/// Declared ABI contract of one exported symbol.
///
/// The tags must match the symbol's true native signature. The loader
/// cannot verify this: a mismatch makes every call through the bound entry
/// point undefined behaviour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryPointDescriptor {
    pub name: String,
    pub return_type: TypeTag,
    pub param_types: Vec<TypeTag>,
}

impl EntryPointDescriptor {
    pub fn new(name: impl Into<String>, return_type: TypeTag, param_types: Vec<TypeTag>) -> Self {
        Self {
            name: name.into(),
            return_type,
            param_types,
        }
    }

    /// Derives the tags from a function-pointer type.
    ///
    /// ```
    /// use retroframe::core::native::{EntryPointDescriptor, TypeTag};
    ///
    /// let d = EntryPointDescriptor::of::<unsafe extern "C" fn(u32) -> i32>("f");
    /// assert_eq!(d.return_type, TypeTag::I32);
    /// assert_eq!(d.param_types, vec![TypeTag::U32]);
    /// ```
    pub fn of<F: EntryPointSignature>(name: impl Into<String>) -> Self {
        Self::new(name, F::return_type(), F::param_types())
    }

    pub fn signature(&self) -> Signature {
        Signature {
            return_type: self.return_type,
            param_types: self.param_types.clone(),
        }
    }
}

//=== NativeModuleLoader ==================================================

/// Opens native modules and validates their declared entry points.
pub struct NativeModuleLoader;

impl NativeModuleLoader {
    /// Opens `path` and checks that every descriptor names an exported
    /// symbol.
    ///
    /// # Safety
    ///
    /// Opening a library runs its initialisation routines, which may do
    /// anything. The caller must trust the binary at `path`.
    ///
    /// # Errors
    ///
    /// - [`LoadError::Open`] if the binary cannot be opened
    /// - [`LoadError::MissingSymbol`] for the first absent symbol
    pub unsafe fn load<I>(path: &ModulePath, descriptors: I) -> Result<NativeModuleHandle, LoadError>
    where
        I: IntoIterator<Item = EntryPointDescriptor>,
    {
        let path = path.as_path().to_path_buf();
        debug!(target: "native", "Opening core {}", path.display());

        let library = unsafe { Library::new(&path) }.map_err(|source| LoadError::Open {
            path: path.clone(),
            source,
        })?;

        let mut entry_points = HashMap::new();
        for descriptor in descriptors {
            // Existence only; the symbol is never dereferenced here.
            unsafe { library.get::<*mut c_void>(descriptor.name.as_bytes()) }.map_err(
                |source| LoadError::MissingSymbol {
                    name: descriptor.name.clone(),
                    source,
                },
            )?;

            debug!(
                target: "native",
                "Declared entry point {}: {}",
                descriptor.name,
                descriptor.signature()
            );
            entry_points.insert(descriptor.name.clone(), descriptor);
        }

        info!(
            target: "native",
            "Loaded core {} ({} entry points)",
            path.display(),
            entry_points.len()
        );

        Ok(NativeModuleHandle {
            path,
            library: Arc::new(library),
            entry_points,
        })
    }
}

//=== NativeModuleHandle ==================================================

/// An opened native module plus its declared entry points.
///
/// The library stays loaded while the handle or any [`BoundEntryPoint`]
/// obtained from it is alive.
pub struct NativeModuleHandle {
    path: PathBuf,
    library: Arc<Library>,
    entry_points: HashMap<String, EntryPointDescriptor>,
}

impl NativeModuleHandle {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn descriptor(&self, name: &str) -> Option<&EntryPointDescriptor> {
        self.entry_points.get(name)
    }

    pub fn entry_points(&self) -> impl Iterator<Item = &EntryPointDescriptor> {
        self.entry_points.values()
    }

    /// Binds a declared entry point as a callable of type `F`.
    ///
    /// # Errors
    ///
    /// - [`LoadError::Undeclared`] if `name` was not passed to `load`
    /// - [`LoadError::DescriptorMismatch`] if `F` disagrees with the
    ///   declared tags
    /// - [`LoadError::MissingSymbol`] if the lookup fails
    pub fn bind<F: EntryPointSignature>(&self, name: &str) -> Result<BoundEntryPoint<F>, LoadError> {
        let descriptor = self.descriptor(name).ok_or_else(|| LoadError::Undeclared {
            name: name.to_string(),
        })?;

        let declared = descriptor.signature();
        let requested = F::signature();
        if declared != requested {
            return Err(LoadError::DescriptorMismatch {
                name: name.to_string(),
                declared,
                requested,
            });
        }

        // Obtaining the pointer is harmless; calling it is what the
        // descriptor has to vouch for.
        let func = unsafe { self.library.get::<F>(name.as_bytes()) }
            .map(|symbol| *symbol)
            .map_err(|source| LoadError::MissingSymbol {
                name: name.to_string(),
                source,
            })?;

        Ok(BoundEntryPoint {
            name: name.to_string(),
            func,
            _library: Arc::clone(&self.library),
        })
    }
}

impl fmt::Debug for NativeModuleHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeModuleHandle")
            .field("path", &self.path)
            .field("entry_points", &self.entry_points.keys().collect::<Vec<_>>())
            .finish()
    }
}

//=== BoundEntryPoint =====================================================

/// A resolved symbol of function type `F`.
///
/// Calls are synchronous and block the calling thread until the native
/// code returns. There is no timeout and no way to cancel: a slow or hung
/// core stalls the event loop for as long as it runs.
pub struct BoundEntryPoint<F> {
    name: String,
    func: F,
    _library: Arc<Library>,
}

impl<F> BoundEntryPoint<F> {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl<F> fmt::Debug for BoundEntryPoint<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundEntryPoint").field("name", &self.name).finish()
    }
}

macro_rules! entry_point_arity {
    ($($arg:ident: $param:ident),*) => {
        impl<R: NativeType, $($param: NativeType),*> EntryPointSignature
            for unsafe extern "C" fn($($param),*) -> R
        {
            fn return_type() -> TypeTag {
                R::TAG
            }

            fn param_types() -> Vec<TypeTag> {
                vec![$(<$param as NativeType>::TAG),*]
            }
        }

        impl<R: NativeType, $($param: NativeType),*> BoundEntryPoint<unsafe extern "C" fn($($param),*) -> R> {
            /// Invokes the native function.
            ///
            /// # Safety
            ///
            /// The descriptor this entry point was declared with must match
            /// the symbol's real native signature exactly. Any mismatch in
            /// return type, parameter count or parameter types is undefined
            /// behaviour. The usual contracts of the native function itself
            /// (pointer validity, threading rules) also apply.
            pub unsafe fn call(&self, $($arg: $param),*) -> R {
                unsafe { (self.func)($($arg),*) }
            }
        }
    };
}

entry_point_arity!();
entry_point_arity!(a: A);
entry_point_arity!(a: A, b: B);
entry_point_arity!(a: A, b: B, c: C);
entry_point_arity!(a: A, b: B, c: C, d: D);
entry_point_arity!(a: A, b: B, c: C, d: D, e: E);
entry_point_arity!(a: A, b: B, c: C, d: D, e: E, f: G);

//=========================================================================
// Unit Tests
//=========================================================================
