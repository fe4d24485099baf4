//! AVX-512 backend implementation (x86_64 advanced SIMD)
//!
//! This backend uses AVX-512F intrinsics for 512-bit SIMD operations.
//! AVX-512 is available on Intel Skylake-X/Sapphire Rapids (2017+) and AMD Zen 4 (2022+) CPUs.
//!
//! The module is only compiled when the build itself enables `avx512f`, so
//! every kernel here may assume the extension.
//!
//! # Performance
//!
//! 16 lanes of `f32`/`i32`/`u32` or 8 lanes of `f64` per register.

use std::arch::x86_64::*;

use super::{scalar, LaneKernels};
use crate::Backend;

/// AVX-512 backend (512-bit SIMD for x86_64)
#[derive(Debug, Clone, Copy, Default)]
pub struct Avx512Backend;

// SAFETY: loop bounds ensure `i + LANES <= len` before `.add(i)`, and only
// unaligned loads/stores (`loadu`/`storeu`) are used.

impl LaneKernels<f32> for Avx512Backend {
    const BACKEND: Backend = Backend::AVX512;

    binary_kernel!("avx512f", add, f32, 16, _mm512_loadu_ps, _mm512_storeu_ps, _mm512_add_ps);
    binary_kernel!("avx512f", sub, f32, 16, _mm512_loadu_ps, _mm512_storeu_ps, _mm512_sub_ps);
    binary_kernel!("avx512f", mul, f32, 16, _mm512_loadu_ps, _mm512_storeu_ps, _mm512_mul_ps);
    binary_kernel!("avx512f", div, f32, 16, _mm512_loadu_ps, _mm512_storeu_ps, _mm512_div_ps);
    binary_kernel!("avx512f", min, f32, 16, _mm512_loadu_ps, _mm512_storeu_ps, _mm512_min_ps);
    binary_kernel!("avx512f", max, f32, 16, _mm512_loadu_ps, _mm512_storeu_ps, _mm512_max_ps);
    mul_add_kernel!("avx512f", f32, 16, _mm512_loadu_ps, _mm512_storeu_ps, |a, b, c| _mm512_fmadd_ps(a, b, c));

    #[target_feature(enable = "avx512f")]
    unsafe fn sum(a: &[f32]) -> f32 {
        let len = a.len();
        let mut i = 0;
        let mut acc = _mm512_setzero_ps();

        while i + 16 <= len {
            acc = _mm512_add_ps(acc, _mm512_loadu_ps(a.as_ptr().add(i)));
            i += 16;
        }

        let mut result = _mm512_reduce_add_ps(acc);
        for &x in &a[i..] {
            result += x;
        }
        result
    }
}

impl LaneKernels<f64> for Avx512Backend {
    const BACKEND: Backend = Backend::AVX512;

    binary_kernel!("avx512f", add, f64, 8, _mm512_loadu_pd, _mm512_storeu_pd, _mm512_add_pd);
    binary_kernel!("avx512f", sub, f64, 8, _mm512_loadu_pd, _mm512_storeu_pd, _mm512_sub_pd);
    binary_kernel!("avx512f", mul, f64, 8, _mm512_loadu_pd, _mm512_storeu_pd, _mm512_mul_pd);
    binary_kernel!("avx512f", div, f64, 8, _mm512_loadu_pd, _mm512_storeu_pd, _mm512_div_pd);
    binary_kernel!("avx512f", min, f64, 8, _mm512_loadu_pd, _mm512_storeu_pd, _mm512_min_pd);
    binary_kernel!("avx512f", max, f64, 8, _mm512_loadu_pd, _mm512_storeu_pd, _mm512_max_pd);
    mul_add_kernel!("avx512f", f64, 8, _mm512_loadu_pd, _mm512_storeu_pd, |a, b, c| _mm512_fmadd_pd(a, b, c));

    #[target_feature(enable = "avx512f")]
    unsafe fn sum(a: &[f64]) -> f64 {
        let len = a.len();
        let mut i = 0;
        let mut acc = _mm512_setzero_pd();

        while i + 8 <= len {
            acc = _mm512_add_pd(acc, _mm512_loadu_pd(a.as_ptr().add(i)));
            i += 8;
        }

        let mut result = _mm512_reduce_add_pd(acc);
        for &x in &a[i..] {
            result += x;
        }
        result
    }
}

macro_rules! impl_epi32_kernels {
    ($($t:ty => $min:ident, $max:ident);* $(;)?) => {$(
        impl LaneKernels<$t> for Avx512Backend {
            const BACKEND: Backend = Backend::AVX512;

            binary_kernel!("avx512f", add, $t, 16, _mm512_loadu_si512, _mm512_storeu_si512, _mm512_add_epi32);
            binary_kernel!("avx512f", sub, $t, 16, _mm512_loadu_si512, _mm512_storeu_si512, _mm512_sub_epi32);
            binary_kernel!("avx512f", mul, $t, 16, _mm512_loadu_si512, _mm512_storeu_si512, _mm512_mullo_epi32);
            binary_kernel!("avx512f", min, $t, 16, _mm512_loadu_si512, _mm512_storeu_si512, $min);
            binary_kernel!("avx512f", max, $t, 16, _mm512_loadu_si512, _mm512_storeu_si512, $max);

            unsafe fn sum(a: &[$t]) -> $t {
                scalar::sum(a)
            }
        }
    )*};
}

impl_epi32_kernels!(
    i32 => _mm512_min_epi32, _mm512_max_epi32;
    u32 => _mm512_min_epu32, _mm512_max_epu32;
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avx512_add_remainder_correctness() {
        for len in [1usize, 15, 16, 17, 33] {
            let a: Vec<f32> = (0..len).map(|i| i as f32).collect();
            let b: Vec<f32> = (0..len).map(|i| (len - i) as f32 * 0.5).collect();
            let mut simd = vec![0.0; len];
            let mut reference = vec![0.0; len];

            unsafe {
                <Avx512Backend as LaneKernels<f32>>::add(&a, &b, &mut simd);
            }
            scalar::add(&a, &b, &mut reference);
            assert_eq!(simd, reference, "len {len}");
        }
    }

    #[test]
    fn test_avx512_min_max_special_values() {
        let a = [f64::NAN, 1.0, -0.0, f64::INFINITY, 2.0, -1.0, 3.0, 4.0];
        let b = [1.0, f64::NAN, 0.0, 5.0, 2.0, -2.0, f64::NEG_INFINITY, 4.5];
        let mut simd = [0.0f64; 8];
        let mut reference = [0.0f64; 8];

        unsafe {
            <Avx512Backend as LaneKernels<f64>>::max(&a, &b, &mut simd);
        }
        scalar::max(&a, &b, &mut reference);

        for (s, r) in simd.iter().zip(&reference) {
            assert_eq!(s.to_bits(), r.to_bits());
        }
    }

    #[test]
    fn test_avx512_sum() {
        let a: Vec<f32> = (1..=20).map(|i| i as f32).collect();
        let result = unsafe { <Avx512Backend as LaneKernels<f32>>::sum(&a) };
        assert_eq!(result, 210.0);
    }

    #[test]
    fn test_avx512_epu32_min() {
        let a: Vec<u32> = (0..16).map(|i| if i % 2 == 0 { u32::MAX } else { i }).collect();
        let b = vec![7u32; 16];
        let mut simd = vec![0u32; 16];
        let mut reference = vec![0u32; 16];

        unsafe {
            <Avx512Backend as LaneKernels<u32>>::min(&a, &b, &mut simd);
        }
        scalar::min(&a, &b, &mut reference);
        assert_eq!(simd, reference);
    }
}
