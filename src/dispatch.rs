//! Compile-time backend table
//!
//! Each element type's [`Element::Kernels`](crate::element::Element::Kernels)
//! names one of the aliases below. Which backend an alias resolves to is
//! decided by `cfg` on the build's target features, once, for the whole
//! build; there is no run-time detection and no per-call branch.
//!
//! Priority for `f32`/`f64`:
//!
//! **x86_64**:
//! 1. AVX-512 (if `avx512f` is enabled)
//! 2. AVX2 (if `avx2` and `fma` are enabled)
//! 3. SSE2 (baseline for x86_64)
//!
//! **AArch64**: NEON (if `neon` is enabled)
//!
//! **WASM**: SIMD128 (if `simd128` is enabled)
//!
//! **Other platforms**: Scalar
//!
//! 32-bit integers follow the same order, with AVX2 requiring only `avx2`.
//! The remaining integer widths always use the scalar kernels, which LLVM
//! vectorizes on its own for fixed lane counts.
//!
//! The `cfg` predicates of each table are mutually exclusive. If two could
//! hold at once the alias is defined twice and the build fails, which is the
//! only acceptable outcome of an ambiguous binding.
//!
//! The `scalar-only` feature pins every type to [`ScalarBackend`].

use core::fmt;

use crate::backends::scalar::ScalarBackend;
use crate::backends::LaneKernels;
use crate::element::Element;
use crate::Backend;

#[cfg(all(not(feature = "scalar-only"), target_arch = "x86_64"))]
#[allow(unused_imports)]
use crate::backends::sse2::Sse2Backend;

#[cfg(all(
    not(feature = "scalar-only"),
    target_arch = "x86_64",
    not(target_feature = "avx512f"),
    target_feature = "avx2"
))]
use crate::backends::avx2::Avx2Backend;

#[cfg(all(
    not(feature = "scalar-only"),
    target_arch = "x86_64",
    target_feature = "avx512f"
))]
use crate::backends::avx512::Avx512Backend;

#[cfg(all(
    not(feature = "scalar-only"),
    target_arch = "aarch64",
    target_feature = "neon"
))]
use crate::backends::neon::NeonBackend;

#[cfg(all(
    not(feature = "scalar-only"),
    target_arch = "wasm32",
    target_feature = "simd128"
))]
use crate::backends::wasm::WasmBackend;

/// Kernels for element types no hardware backend specializes
pub type ScalarKernels = ScalarBackend;

macro_rules! float_table {
    ($($(#[$meta:meta])* $name:ident;)*) => {$(
        $(#[$meta])*
        #[cfg(all(
            not(feature = "scalar-only"),
            target_arch = "x86_64",
            target_feature = "avx512f"
        ))]
        pub type $name = Avx512Backend;

        $(#[$meta])*
        #[cfg(all(
            not(feature = "scalar-only"),
            target_arch = "x86_64",
            not(target_feature = "avx512f"),
            target_feature = "avx2",
            target_feature = "fma"
        ))]
        pub type $name = Avx2Backend;

        $(#[$meta])*
        #[cfg(all(
            not(feature = "scalar-only"),
            target_arch = "x86_64",
            not(target_feature = "avx512f"),
            not(all(target_feature = "avx2", target_feature = "fma"))
        ))]
        pub type $name = Sse2Backend;

        $(#[$meta])*
        #[cfg(all(
            not(feature = "scalar-only"),
            target_arch = "aarch64",
            target_feature = "neon"
        ))]
        pub type $name = NeonBackend;

        $(#[$meta])*
        #[cfg(all(
            not(feature = "scalar-only"),
            target_arch = "wasm32",
            target_feature = "simd128"
        ))]
        pub type $name = WasmBackend;

        $(#[$meta])*
        #[cfg(any(
            feature = "scalar-only",
            not(any(
                target_arch = "x86_64",
                all(target_arch = "aarch64", target_feature = "neon"),
                all(target_arch = "wasm32", target_feature = "simd128")
            ))
        ))]
        pub type $name = ScalarBackend;
    )*};
}

macro_rules! int32_table {
    ($($(#[$meta:meta])* $name:ident;)*) => {$(
        $(#[$meta])*
        #[cfg(all(
            not(feature = "scalar-only"),
            target_arch = "x86_64",
            target_feature = "avx512f"
        ))]
        pub type $name = Avx512Backend;

        $(#[$meta])*
        #[cfg(all(
            not(feature = "scalar-only"),
            target_arch = "x86_64",
            not(target_feature = "avx512f"),
            target_feature = "avx2"
        ))]
        pub type $name = Avx2Backend;

        $(#[$meta])*
        #[cfg(all(
            not(feature = "scalar-only"),
            target_arch = "x86_64",
            not(target_feature = "avx512f"),
            not(target_feature = "avx2")
        ))]
        pub type $name = Sse2Backend;

        $(#[$meta])*
        #[cfg(all(
            not(feature = "scalar-only"),
            target_arch = "aarch64",
            target_feature = "neon"
        ))]
        pub type $name = NeonBackend;

        $(#[$meta])*
        #[cfg(all(
            not(feature = "scalar-only"),
            target_arch = "wasm32",
            target_feature = "simd128"
        ))]
        pub type $name = WasmBackend;

        $(#[$meta])*
        #[cfg(any(
            feature = "scalar-only",
            not(any(
                target_arch = "x86_64",
                all(target_arch = "aarch64", target_feature = "neon"),
                all(target_arch = "wasm32", target_feature = "simd128")
            ))
        ))]
        pub type $name = ScalarBackend;
    )*};
}

float_table! {
    /// Kernels bound to `f32` lanes
    F32Kernels;
    /// Kernels bound to `f64` lanes
    F64Kernels;
}

int32_table! {
    /// Kernels bound to `i32` lanes
    I32Kernels;
    /// Kernels bound to `u32` lanes
    U32Kernels;
}

/// Backend the build binds `f32` lanes to: the widest one in use.
pub const ACTIVE_BACKEND: Backend = <F32Kernels as LaneKernels<f32>>::BACKEND;

/// Backend the build binds element type `T` to.
///
/// # Examples
///
/// ```
/// use lanewise::{dispatch, Backend};
///
/// assert_eq!(dispatch::backend_for::<u8>(), Backend::Scalar);
/// ```
pub const fn backend_for<T: Element>() -> Backend {
    <T::Kernels as LaneKernels<T>>::BACKEND
}

/// The build's complete element-type to backend table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendReport {
    /// `(element type name, bound backend)` for every supported type
    pub bindings: [(&'static str, Backend); 10],
}

impl BackendReport {
    /// Report for the current build.
    pub const fn current() -> Self {
        Self {
            bindings: [
                ("u8", backend_for::<u8>()),
                ("u16", backend_for::<u16>()),
                ("u32", backend_for::<u32>()),
                ("u64", backend_for::<u64>()),
                ("i8", backend_for::<i8>()),
                ("i16", backend_for::<i16>()),
                ("i32", backend_for::<i32>()),
                ("i64", backend_for::<i64>()),
                ("f32", backend_for::<f32>()),
                ("f64", backend_for::<f64>()),
            ],
        }
    }

    /// Backend bound to the named element type, if it is supported.
    pub fn get(&self, element: &str) -> Option<Backend> {
        self.bindings
            .iter()
            .find(|(name, _)| *name == element)
            .map(|&(_, backend)| backend)
    }

    /// Emit one `info` event per binding.
    #[cfg(feature = "tracing")]
    pub fn log(&self) {
        for (element, backend) in self.bindings {
            tracing::info!(element, backend = %backend, "lane kernels bound");
        }
    }
}

impl Default for BackendReport {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for BackendReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (element, backend)) in self.bindings.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{element:>3}: {backend}")?;
        }
        Ok(())
    }
}
