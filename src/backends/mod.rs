//! Backend kernel sets for the different SIMD instruction sets
//!
//! A backend is a zero-sized type implementing [`LaneKernels<T>`] for the
//! element types it accelerates. Every kernel method has a default that runs
//! the scalar reference loop, so a backend only overrides what its
//! instruction set does faster. That default is also the universal fallback
//! for any (type, backend) pair a hardware backend leaves alone.
//!
//! # Safety
//!
//! All `unsafe` code is isolated within backend implementations. The public
//! vector API remains safe: [`crate::dispatch`] only binds a hardware backend
//! when the build enables its instruction set.
//!
//! # Backends
//!
//! - `scalar`: Portable reference implementation (no SIMD)
//! - `sse2`: x86_64 baseline SIMD (128-bit)
//! - `avx2`: x86_64 advanced SIMD (256-bit with FMA)
//! - `avx512`: x86_64 maximum SIMD (512-bit), compiled only with `avx512f`
//! - `neon`: AArch64 SIMD (128-bit)
//! - `wasm`: WebAssembly SIMD128, compiled only with `simd128`

/// Two-operand register kernel: whole registers, then the scalar tail.
///
/// Expands to an `unsafe fn $name(a, b, result)` for use inside a
/// `LaneKernels` impl.
#[allow(unused_macros)]
macro_rules! binary_kernel {
    ($feature:literal, $name:ident, $t:ty, $lanes:expr, $load:ident, $store:ident, $op:ident) => {
        #[target_feature(enable = $feature)]
        unsafe fn $name(a: &[$t], b: &[$t], result: &mut [$t]) {
            let len = a.len();
            let mut i = 0;

            while i + $lanes <= len {
                let va = $load(a.as_ptr().add(i) as *const _);
                let vb = $load(b.as_ptr().add(i) as *const _);
                $store(result.as_mut_ptr().add(i) as *mut _, $op(va, vb));
                i += $lanes;
            }

            $crate::backends::scalar::$name(&a[i..], &b[i..], &mut result[i..]);
        }
    };
}

/// Three-operand `mul_add` register kernel; the tail lanes run unfused.
#[allow(unused_macros)]
macro_rules! mul_add_kernel {
    ($feature:literal, $t:ty, $lanes:expr, $load:ident, $store:ident, |$va:ident, $vb:ident, $vc:ident| $body:expr) => {
        #[target_feature(enable = $feature)]
        unsafe fn mul_add(a: &[$t], b: &[$t], c: &[$t], result: &mut [$t]) {
            let len = a.len();
            let mut i = 0;

            while i + $lanes <= len {
                let $va = $load(a.as_ptr().add(i) as *const _);
                let $vb = $load(b.as_ptr().add(i) as *const _);
                let $vc = $load(c.as_ptr().add(i) as *const _);
                $store(result.as_mut_ptr().add(i) as *mut _, $body);
                i += $lanes;
            }

            $crate::backends::scalar::mul_add(&a[i..], &b[i..], &c[i..], &mut result[i..]);
        }
    };
}

pub mod scalar;

#[cfg(target_arch = "x86_64")]
pub mod sse2;

#[cfg(target_arch = "x86_64")]
pub mod avx2;

#[cfg(all(target_arch = "x86_64", target_feature = "avx512f"))]
pub mod avx512;

#[cfg(target_arch = "aarch64")]
pub mod neon;

#[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
pub mod wasm;

use crate::element::Element;
use crate::Backend;

/// Kernel set every backend provides for an element type `T`
///
/// Kernels work on equal-length slices and handle any length: hardware
/// backends process whole registers and finish the tail with the scalar
/// loop. A vector of `N` lanes calls them with `N`-element slices.
///
/// # Safety
///
/// Implementations may use SIMD intrinsics. Callers must ensure:
/// - The backend's instruction set is available on the running CPU
/// - `a`, `b` and `c` have the same length
/// - `result` has length >= `a.len()`
pub trait LaneKernels<T: Element> {
    /// Backend this kernel set belongs to.
    const BACKEND: Backend;

    /// Element-wise addition: a[i] + b[i]
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    #[inline(always)]
    unsafe fn add(a: &[T], b: &[T], result: &mut [T]) {
        scalar::add(a, b, result);
    }

    /// Element-wise subtraction: a[i] - b[i]
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    #[inline(always)]
    unsafe fn sub(a: &[T], b: &[T], result: &mut [T]) {
        scalar::sub(a, b, result);
    }

    /// Element-wise multiplication: a[i] * b[i]
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    #[inline(always)]
    unsafe fn mul(a: &[T], b: &[T], result: &mut [T]) {
        scalar::mul(a, b, result);
    }

    /// Element-wise division: a[i] / b[i]
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    #[inline(always)]
    unsafe fn div(a: &[T], b: &[T], result: &mut [T]) {
        scalar::div(a, b, result);
    }

    /// Element-wise minimum with the `a < b ? a : b` rule
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    #[inline(always)]
    unsafe fn min(a: &[T], b: &[T], result: &mut [T]) {
        scalar::min(a, b, result);
    }

    /// Element-wise maximum with the `a > b ? a : b` rule
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    #[inline(always)]
    unsafe fn max(a: &[T], b: &[T], result: &mut [T]) {
        scalar::max(a, b, result);
    }

    /// Multiply-add: a[i] * b[i] + c[i]
    ///
    /// Float backends may fuse this into a single rounding.
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    #[inline(always)]
    unsafe fn mul_add(a: &[T], b: &[T], c: &[T], result: &mut [T]) {
        scalar::mul_add(a, b, c, result);
    }

    /// Sum reduction with a fixed, length-determined grouping
    ///
    /// # Safety
    ///
    /// See the trait-level contract.
    #[inline(always)]
    unsafe fn sum(a: &[T]) -> T {
        scalar::sum(a)
    }
}
