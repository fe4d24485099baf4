//! Lanewise: Portable Explicit Vectorization
//!
//! **Lanewise** provides one lane-vector algebra, [`Vector<T, N>`] plus
//! [`Mask<N>`], that every build binds to exactly one kernel set:
//!
//! 1. **Scalar** - portable reference lanes, available everywhere
//! 2. **x86_64** - SSE2 / AVX2 / AVX-512
//! 3. **AArch64** - NEON
//! 4. **WebAssembly** - SIMD128
//!
//! # Design Principles
//!
//! - **Write once, bind at build time**: the backend is chosen by `cfg` from
//!   the enabled target features, never by run-time detection
//! - **Scalar is the oracle**: every backend reproduces the scalar lanes; the
//!   only permitted divergence is float reduction grouping and FMA rounding
//! - **Masks keep lanes**: a masked operation leaves unselected lanes exactly
//!   as they were
//! - **Zero unsafe in the public slice API**: `unsafe` is isolated in backends
//!   and the raw-pointer memory entry points
//!
//! # Quick Start
//!
//! ```rust
//! use lanewise::{F32x4, Mask};
//!
//! let v = F32x4::from_array([1.0, 2.0, 3.0, 4.0]);
//! let mask = Mask::from_array([true, false, true, false]);
//!
//! assert_eq!(v.add_masked(mask, 10.0_f32).to_array(), [11.0, 2.0, 13.0, 4.0]);
//! assert_eq!(v.hadd(), 10.0);
//! assert_eq!(v.hmax(), 4.0);
//! assert_eq!(v.imax(), 3);
//! ```
//!
//! # Cargo features
//!
//! - `scalar-only`: bind every element type to the scalar kernels
//! - `tracing`: spans on the checked slice entry points and
//!   [`BackendReport::log`](dispatch::BackendReport)

use core::fmt;

pub mod backends;
pub mod convert;
pub mod dispatch;
pub mod element;
pub mod error;
pub mod mask;
pub mod vector;

mod arith;
mod compare;
mod memory;
mod reduce;

pub use convert::{Degrade, Halves, Promote, SameWidth, SameWidthFloat};
pub use dispatch::BackendReport;
pub use element::{Element, FloatElement, IntElement};
pub use error::{LaneError, Result};
pub use mask::Mask;
pub use vector::Vector;

/// Backend execution target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backend {
    /// Scalar fallback (no SIMD)
    Scalar,
    /// SSE2 (x86_64 baseline)
    SSE2,
    /// AVX2 (256-bit with FMA)
    AVX2,
    /// AVX-512 (512-bit)
    AVX512,
    /// ARM NEON
    NEON,
    /// WebAssembly SIMD128
    WasmSIMD,
}

impl Backend {
    /// Backend this build binds `f32` lanes to
    ///
    /// Resolved at compile time; calling it costs nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::Backend;
    ///
    /// println!("Using backend: {}", Backend::active());
    /// ```
    pub const fn active() -> Self {
        dispatch::ACTIVE_BACKEND
    }

    /// Width of one hardware register in bits (`0` for scalar lanes)
    pub const fn register_bits(self) -> usize {
        match self {
            Backend::Scalar => 0,
            Backend::SSE2 | Backend::NEON | Backend::WasmSIMD => 128,
            Backend::AVX2 => 256,
            Backend::AVX512 => 512,
        }
    }

    /// Short display name
    pub const fn name(self) -> &'static str {
        match self {
            Backend::Scalar => "Scalar",
            Backend::SSE2 => "SSE2",
            Backend::AVX2 => "AVX2",
            Backend::AVX512 => "AVX-512",
            Backend::NEON => "NEON",
            Backend::WasmSIMD => "WASM SIMD128",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Index vector carrying element offsets for gather/scatter
pub type IndexVector<const N: usize> = Vector<u32, N>;

macro_rules! width_aliases {
    ($($bits:literal => $($alias:ident = $t:ty, $n:literal);+;)*) => {$($(
        #[doc = concat!("`", stringify!($n), "` lanes of `", stringify!($t), "` (", stringify!($bits), "-bit)")]
        pub type $alias = Vector<$t, $n>;
    )+)*};
}

width_aliases! {
    128 => U8x16 = u8, 16; I8x16 = i8, 16; U16x8 = u16, 8; I16x8 = i16, 8;
           U32x4 = u32, 4; I32x4 = i32, 4; U64x2 = u64, 2; I64x2 = i64, 2;
           F32x4 = f32, 4; F64x2 = f64, 2;
    256 => U8x32 = u8, 32; I8x32 = i8, 32; U16x16 = u16, 16; I16x16 = i16, 16;
           U32x8 = u32, 8; I32x8 = i32, 8; U64x4 = u64, 4; I64x4 = i64, 4;
           F32x8 = f32, 8; F64x4 = f64, 4;
    512 => U8x64 = u8, 64; I8x64 = i8, 64; U16x32 = u16, 32; I16x32 = i16, 32;
           U32x16 = u32, 16; I32x16 = i32, 16; U64x8 = u64, 8; I64x8 = i64, 8;
           F32x16 = f32, 16; F64x8 = f64, 8;
}
