//! WebAssembly SIMD128 backend implementation
//!
//! This backend uses WebAssembly SIMD128 intrinsics for 128-bit SIMD operations.
//! SIMD128 is supported in modern browsers and wasm runtimes; the module is
//! only compiled when the build enables `simd128`.
//!
//! SIMD128 has no FMA and its `min`/`max` propagate NaN, so `mul_add` is
//! unfused and float `min`/`max` keep the scalar rule.

use std::arch::wasm32::*;

use super::{scalar, LaneKernels};
use crate::Backend;

/// WebAssembly SIMD128 backend (128-bit SIMD)
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmBackend;

// SAFETY: loop bounds ensure `i + LANES <= len` before `.add(i)`; v128
// loads and stores accept any alignment.

impl LaneKernels<f32> for WasmBackend {
    const BACKEND: Backend = Backend::WasmSIMD;

    binary_kernel!("simd128", add, f32, 4, v128_load, v128_store, f32x4_add);
    binary_kernel!("simd128", sub, f32, 4, v128_load, v128_store, f32x4_sub);
    binary_kernel!("simd128", mul, f32, 4, v128_load, v128_store, f32x4_mul);
    binary_kernel!("simd128", div, f32, 4, v128_load, v128_store, f32x4_div);
    mul_add_kernel!("simd128", f32, 4, v128_load, v128_store, |a, b, c| f32x4_add(f32x4_mul(a, b), c));

    #[target_feature(enable = "simd128")]
    unsafe fn sum(a: &[f32]) -> f32 {
        let len = a.len();
        let mut i = 0;
        let mut acc = f32x4_splat(0.0);

        while i + 4 <= len {
            acc = f32x4_add(acc, v128_load(a.as_ptr().add(i) as *const v128));
            i += 4;
        }

        let mut result = (f32x4_extract_lane::<0>(acc) + f32x4_extract_lane::<1>(acc))
            + (f32x4_extract_lane::<2>(acc) + f32x4_extract_lane::<3>(acc));

        for &x in &a[i..] {
            result += x;
        }

        result
    }
}

impl LaneKernels<f64> for WasmBackend {
    const BACKEND: Backend = Backend::WasmSIMD;

    binary_kernel!("simd128", add, f64, 2, v128_load, v128_store, f64x2_add);
    binary_kernel!("simd128", sub, f64, 2, v128_load, v128_store, f64x2_sub);
    binary_kernel!("simd128", mul, f64, 2, v128_load, v128_store, f64x2_mul);
    binary_kernel!("simd128", div, f64, 2, v128_load, v128_store, f64x2_div);
    mul_add_kernel!("simd128", f64, 2, v128_load, v128_store, |a, b, c| f64x2_add(f64x2_mul(a, b), c));

    #[target_feature(enable = "simd128")]
    unsafe fn sum(a: &[f64]) -> f64 {
        let len = a.len();
        let mut i = 0;
        let mut acc = f64x2_splat(0.0);

        while i + 2 <= len {
            acc = f64x2_add(acc, v128_load(a.as_ptr().add(i) as *const v128));
            i += 2;
        }

        let mut result = f64x2_extract_lane::<0>(acc) + f64x2_extract_lane::<1>(acc);
        for &x in &a[i..] {
            result += x;
        }
        result
    }
}

macro_rules! impl_int32_kernels {
    ($($t:ty => $min:ident, $max:ident);* $(;)?) => {$(
        impl LaneKernels<$t> for WasmBackend {
            const BACKEND: Backend = Backend::WasmSIMD;

            binary_kernel!("simd128", add, $t, 4, v128_load, v128_store, i32x4_add);
            binary_kernel!("simd128", sub, $t, 4, v128_load, v128_store, i32x4_sub);
            binary_kernel!("simd128", mul, $t, 4, v128_load, v128_store, i32x4_mul);
            binary_kernel!("simd128", min, $t, 4, v128_load, v128_store, $min);
            binary_kernel!("simd128", max, $t, 4, v128_load, v128_store, $max);
        }
    )*};
}

impl_int32_kernels!(
    i32 => i32x4_min, i32x4_max;
    u32 => u32x4_min, u32x4_max;
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wasm_add() {
        let a = [1.0f32, 2.0, 3.0, 4.0, 5.0];
        let b = [5.0f32, 4.0, 3.0, 2.0, 1.0];
        let mut result = [0.0f32; 5];

        unsafe {
            <WasmBackend as LaneKernels<f32>>::add(&a, &b, &mut result);
        }

        assert_eq!(result, [6.0; 5]);
    }

    #[test]
    fn test_wasm_mul_add_matches_scalar() {
        let a = [0.1f64, 0.2, 0.3];
        let b = [3.0f64, 3.0, 3.0];
        let c = [1.0f64, -1.0, 0.5];
        let mut simd = [0.0f64; 3];
        let mut reference = [0.0f64; 3];

        unsafe {
            <WasmBackend as LaneKernels<f64>>::mul_add(&a, &b, &c, &mut simd);
        }
        scalar::mul_add(&a, &b, &c, &mut reference);
        assert_eq!(simd, reference);
    }

    #[test]
    fn test_wasm_sum() {
        let a = [1.0f32, 2.0, 3.0, 4.0, 5.0];
        let result = unsafe { <WasmBackend as LaneKernels<f32>>::sum(&a) };
        assert_eq!(result, 15.0);
    }

    #[test]
    fn test_wasm_u32_min_is_unsigned() {
        let a = [u32::MAX, 0, 5, 9];
        let b = [1u32, 1, 5, 2];
        let mut result = [0u32; 4];

        unsafe {
            <WasmBackend as LaneKernels<u32>>::min(&a, &b, &mut result);
        }

        assert_eq!(result, [1, 0, 5, 2]);
    }
}
