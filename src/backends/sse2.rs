//! SSE2 backend implementation (x86_64 baseline SIMD)
//!
//! This backend uses SSE2 intrinsics for 128-bit SIMD operations.
//! SSE2 is available on all x86_64 CPUs as a baseline requirement.
//!
//! SSE2 has no FMA, so `mul_add` rounds exactly like the scalar loop.
//!
//! Covers `f32` (4 lanes per register), `f64` (2 lanes) and the 32-bit
//! integers (add/sub only; SSE2 has no 32-bit low multiply or min/max).
//!
//! # Safety
//!
//! All SSE2 intrinsics are marked `unsafe` by Rust. This module carefully isolates
//! all unsafe code and verifies correctness against the scalar backend.

use std::arch::x86_64::*;

use super::{scalar, LaneKernels};
use crate::Backend;

/// SSE2 backend (128-bit SIMD for x86_64)
#[derive(Debug, Clone, Copy, Default)]
pub struct Sse2Backend;

// SAFETY (all kernels below): loop bounds ensure `i + LANES <= len` before
// `.add(i)`, every pointer comes from a slice with enough backing storage,
// and only unaligned loads/stores are used.

/// Sum with one accumulator register, folded lane 0 upwards, then the tail.
macro_rules! sum_kernel {
    ($t:ty, $lanes:expr, $zero:ident, $load:ident, $store:ident, $add:ident) => {
        #[target_feature(enable = "sse2")]
        unsafe fn sum(a: &[$t]) -> $t {
            let len = a.len();
            let mut i = 0;
            let mut acc = $zero();

            while i + $lanes <= len {
                acc = $add(acc, $load(a.as_ptr().add(i)));
                i += $lanes;
            }

            let mut lanes = [0.0 as $t; $lanes];
            $store(lanes.as_mut_ptr(), acc);
            let mut total = scalar::sum(&lanes);
            for &x in &a[i..] {
                total += x;
            }
            total
        }
    };
}

impl LaneKernels<f32> for Sse2Backend {
    const BACKEND: Backend = Backend::SSE2;

    binary_kernel!("sse2", add, f32, 4, _mm_loadu_ps, _mm_storeu_ps, _mm_add_ps);
    binary_kernel!("sse2", sub, f32, 4, _mm_loadu_ps, _mm_storeu_ps, _mm_sub_ps);
    binary_kernel!("sse2", mul, f32, 4, _mm_loadu_ps, _mm_storeu_ps, _mm_mul_ps);
    binary_kernel!("sse2", div, f32, 4, _mm_loadu_ps, _mm_storeu_ps, _mm_div_ps);
    binary_kernel!("sse2", min, f32, 4, _mm_loadu_ps, _mm_storeu_ps, _mm_min_ps);
    binary_kernel!("sse2", max, f32, 4, _mm_loadu_ps, _mm_storeu_ps, _mm_max_ps);
    mul_add_kernel!("sse2", f32, 4, _mm_loadu_ps, _mm_storeu_ps, |a, b, c| _mm_add_ps(_mm_mul_ps(a, b), c));
    sum_kernel!(f32, 4, _mm_setzero_ps, _mm_loadu_ps, _mm_storeu_ps, _mm_add_ps);
}

impl LaneKernels<f64> for Sse2Backend {
    const BACKEND: Backend = Backend::SSE2;

    binary_kernel!("sse2", add, f64, 2, _mm_loadu_pd, _mm_storeu_pd, _mm_add_pd);
    binary_kernel!("sse2", sub, f64, 2, _mm_loadu_pd, _mm_storeu_pd, _mm_sub_pd);
    binary_kernel!("sse2", mul, f64, 2, _mm_loadu_pd, _mm_storeu_pd, _mm_mul_pd);
    binary_kernel!("sse2", div, f64, 2, _mm_loadu_pd, _mm_storeu_pd, _mm_div_pd);
    binary_kernel!("sse2", min, f64, 2, _mm_loadu_pd, _mm_storeu_pd, _mm_min_pd);
    binary_kernel!("sse2", max, f64, 2, _mm_loadu_pd, _mm_storeu_pd, _mm_max_pd);
    mul_add_kernel!("sse2", f64, 2, _mm_loadu_pd, _mm_storeu_pd, |a, b, c| _mm_add_pd(_mm_mul_pd(a, b), c));
    sum_kernel!(f64, 2, _mm_setzero_pd, _mm_loadu_pd, _mm_storeu_pd, _mm_add_pd);
}

macro_rules! impl_epi32_kernels {
    ($($t:ty),*) => {$(
        impl LaneKernels<$t> for Sse2Backend {
            const BACKEND: Backend = Backend::SSE2;

            binary_kernel!("sse2", add, $t, 4, _mm_loadu_si128, _mm_storeu_si128, _mm_add_epi32);
            binary_kernel!("sse2", sub, $t, 4, _mm_loadu_si128, _mm_storeu_si128, _mm_sub_epi32);
        }
    )*};
}

impl_epi32_kernels!(i32, u32);
