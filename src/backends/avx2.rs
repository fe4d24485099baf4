//! AVX2 backend implementation (x86_64 advanced SIMD)
//!
//! This backend uses AVX2 intrinsics for 256-bit SIMD operations with FMA.
//! AVX2 is available on Intel Haswell (2013+) and AMD Excavator (2015+) CPUs.
//!
//! # Performance
//!
//! 8 lanes of `f32`/`i32`/`u32` or 4 lanes of `f64` per register. `mul_add`
//! is fused (`vfmadd`), so full-register lanes round once; tail lanes take
//! the unfused scalar path.
//!
//! # Safety
//!
//! All AVX2 intrinsics are marked `unsafe` by Rust. This module is only bound
//! by [`crate::dispatch`] when the build enables `avx2` (and `fma` for floats).

use std::arch::x86_64::*;

use super::{scalar, LaneKernels};
use crate::Backend;

/// AVX2 backend (256-bit SIMD for x86_64)
#[derive(Debug, Clone, Copy, Default)]
pub struct Avx2Backend;

// SAFETY (all kernels below): loop bounds ensure `i + LANES <= len` before
// `.add(i)` and only unaligned loads/stores are used.

impl LaneKernels<f32> for Avx2Backend {
    const BACKEND: Backend = Backend::AVX2;

    binary_kernel!("avx2,fma", add, f32, 8, _mm256_loadu_ps, _mm256_storeu_ps, _mm256_add_ps);
    binary_kernel!("avx2,fma", sub, f32, 8, _mm256_loadu_ps, _mm256_storeu_ps, _mm256_sub_ps);
    binary_kernel!("avx2,fma", mul, f32, 8, _mm256_loadu_ps, _mm256_storeu_ps, _mm256_mul_ps);
    binary_kernel!("avx2,fma", div, f32, 8, _mm256_loadu_ps, _mm256_storeu_ps, _mm256_div_ps);
    binary_kernel!("avx2,fma", min, f32, 8, _mm256_loadu_ps, _mm256_storeu_ps, _mm256_min_ps);
    binary_kernel!("avx2,fma", max, f32, 8, _mm256_loadu_ps, _mm256_storeu_ps, _mm256_max_ps);
    mul_add_kernel!("avx2,fma", f32, 8, _mm256_loadu_ps, _mm256_storeu_ps, |a, b, c| _mm256_fmadd_ps(a, b, c));

    #[target_feature(enable = "avx2,fma")]
    unsafe fn sum(a: &[f32]) -> f32 {
        let len = a.len();
        let mut i = 0;

        let mut acc = _mm256_setzero_ps();

        while i + 8 <= len {
            let va = _mm256_loadu_ps(a.as_ptr().add(i));
            acc = _mm256_add_ps(acc, va);
            i += 8;
        }

        // Fixed tree: fold the high 128 bits onto the low, then two hadds
        let low = _mm256_castps256_ps128(acc);
        let high = _mm256_extractf128_ps(acc, 1);
        let sum4 = _mm_add_ps(low, high);
        let sum2 = _mm_hadd_ps(sum4, sum4);
        let sum1 = _mm_hadd_ps(sum2, sum2);

        let mut result = _mm_cvtss_f32(sum1);

        for &x in &a[i..] {
            result += x;
        }

        result
    }
}

impl LaneKernels<f64> for Avx2Backend {
    const BACKEND: Backend = Backend::AVX2;

    binary_kernel!("avx2,fma", add, f64, 4, _mm256_loadu_pd, _mm256_storeu_pd, _mm256_add_pd);
    binary_kernel!("avx2,fma", sub, f64, 4, _mm256_loadu_pd, _mm256_storeu_pd, _mm256_sub_pd);
    binary_kernel!("avx2,fma", mul, f64, 4, _mm256_loadu_pd, _mm256_storeu_pd, _mm256_mul_pd);
    binary_kernel!("avx2,fma", div, f64, 4, _mm256_loadu_pd, _mm256_storeu_pd, _mm256_div_pd);
    binary_kernel!("avx2,fma", min, f64, 4, _mm256_loadu_pd, _mm256_storeu_pd, _mm256_min_pd);
    binary_kernel!("avx2,fma", max, f64, 4, _mm256_loadu_pd, _mm256_storeu_pd, _mm256_max_pd);
    mul_add_kernel!("avx2,fma", f64, 4, _mm256_loadu_pd, _mm256_storeu_pd, |a, b, c| _mm256_fmadd_pd(a, b, c));

    #[target_feature(enable = "avx2,fma")]
    unsafe fn sum(a: &[f64]) -> f64 {
        let len = a.len();
        let mut i = 0;

        let mut acc = _mm256_setzero_pd();

        while i + 4 <= len {
            acc = _mm256_add_pd(acc, _mm256_loadu_pd(a.as_ptr().add(i)));
            i += 4;
        }

        let low = _mm256_castpd256_pd128(acc);
        let high = _mm256_extractf128_pd(acc, 1);
        let sum2 = _mm_add_pd(low, high);
        let sum1 = _mm_add_sd(sum2, _mm_unpackhi_pd(sum2, sum2));

        let mut result = _mm_cvtsd_f64(sum1);

        for &x in &a[i..] {
            result += x;
        }

        result
    }
}

macro_rules! impl_epi32_kernels {
    ($($t:ty => $min:ident, $max:ident);* $(;)?) => {$(
        impl LaneKernels<$t> for Avx2Backend {
            const BACKEND: Backend = Backend::AVX2;

            binary_kernel!("avx2", add, $t, 8, _mm256_loadu_si256, _mm256_storeu_si256, _mm256_add_epi32);
            binary_kernel!("avx2", sub, $t, 8, _mm256_loadu_si256, _mm256_storeu_si256, _mm256_sub_epi32);
            binary_kernel!("avx2", mul, $t, 8, _mm256_loadu_si256, _mm256_storeu_si256, _mm256_mullo_epi32);
            binary_kernel!("avx2", min, $t, 8, _mm256_loadu_si256, _mm256_storeu_si256, $min);
            binary_kernel!("avx2", max, $t, 8, _mm256_loadu_si256, _mm256_storeu_si256, $max);

            // Wrapping integer sums do not depend on grouping.
            #[target_feature(enable = "avx2")]
            unsafe fn sum(a: &[$t]) -> $t {
                let len = a.len();
                let mut i = 0;
                let mut acc = _mm256_setzero_si256();

                while i + 8 <= len {
                    acc = _mm256_add_epi32(acc, _mm256_loadu_si256(a.as_ptr().add(i) as *const _));
                    i += 8;
                }

                let mut lanes = [0 as $t; 8];
                _mm256_storeu_si256(lanes.as_mut_ptr() as *mut _, acc);
                scalar::sum(&lanes).wrapping_add(scalar::sum(&a[i..]))
            }
        }
    )*};
}

impl_epi32_kernels!(
    i32 => _mm256_min_epi32, _mm256_max_epi32;
    u32 => _mm256_min_epu32, _mm256_max_epu32;
);
