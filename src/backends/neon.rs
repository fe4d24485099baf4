//! ARM NEON backend implementation (AArch64 128-bit SIMD)
//!
//! This backend uses ARM NEON intrinsics for 128-bit SIMD operations.
//! NEON is part of every ARMv8/AArch64 CPU.
//!
//! # Performance
//!
//! 4 lanes of `f32`/`i32`/`u32` or 2 lanes of `f64` per register, similar to
//! SSE2 on x86_64 but with native FMA (`vfmaq`).
//!
//! Float `min`/`max` stay on the scalar rule: `vminq`/`vmaxq` propagate NaN
//! from either side, which would diverge from the reference lanes.

use std::arch::aarch64::*;

use super::{scalar, LaneKernels};
use crate::Backend;

/// ARM NEON backend (128-bit SIMD)
#[derive(Debug, Clone, Copy, Default)]
pub struct NeonBackend;

// SAFETY: loop bounds ensure `i + LANES <= len` before `.add(i)`; NEON loads
// and stores have no alignment requirement.

impl LaneKernels<f32> for NeonBackend {
    const BACKEND: Backend = Backend::NEON;

    binary_kernel!("neon", add, f32, 4, vld1q_f32, vst1q_f32, vaddq_f32);
    binary_kernel!("neon", sub, f32, 4, vld1q_f32, vst1q_f32, vsubq_f32);
    binary_kernel!("neon", mul, f32, 4, vld1q_f32, vst1q_f32, vmulq_f32);
    binary_kernel!("neon", div, f32, 4, vld1q_f32, vst1q_f32, vdivq_f32);
    mul_add_kernel!("neon", f32, 4, vld1q_f32, vst1q_f32, |a, b, c| vfmaq_f32(c, a, b));

    #[target_feature(enable = "neon")]
    unsafe fn sum(a: &[f32]) -> f32 {
        let len = a.len();
        let mut i = 0;

        let mut acc = vdupq_n_f32(0.0);

        while i + 4 <= len {
            acc = vaddq_f32(acc, vld1q_f32(a.as_ptr().add(i)));
            i += 4;
        }

        // Pairwise: (l0 + l1) + (l2 + l3)
        let sum2 = vpadd_f32(vget_low_f32(acc), vget_high_f32(acc));
        let sum1 = vpadd_f32(sum2, sum2);

        let mut result = vget_lane_f32(sum1, 0);

        for &x in &a[i..] {
            result += x;
        }

        result
    }
}

impl LaneKernels<f64> for NeonBackend {
    const BACKEND: Backend = Backend::NEON;

    binary_kernel!("neon", add, f64, 2, vld1q_f64, vst1q_f64, vaddq_f64);
    binary_kernel!("neon", sub, f64, 2, vld1q_f64, vst1q_f64, vsubq_f64);
    binary_kernel!("neon", mul, f64, 2, vld1q_f64, vst1q_f64, vmulq_f64);
    binary_kernel!("neon", div, f64, 2, vld1q_f64, vst1q_f64, vdivq_f64);
    mul_add_kernel!("neon", f64, 2, vld1q_f64, vst1q_f64, |a, b, c| vfmaq_f64(c, a, b));

    #[target_feature(enable = "neon")]
    unsafe fn sum(a: &[f64]) -> f64 {
        let len = a.len();
        let mut i = 0;
        let mut acc = vdupq_n_f64(0.0);

        while i + 2 <= len {
            acc = vaddq_f64(acc, vld1q_f64(a.as_ptr().add(i)));
            i += 2;
        }

        let mut result = vaddvq_f64(acc);
        for &x in &a[i..] {
            result += x;
        }
        result
    }
}

macro_rules! impl_int32_kernels {
    ($($t:ty => $ld:ident, $st:ident, $add:ident, $sub:ident, $mul:ident, $min:ident, $max:ident);* $(;)?) => {$(
        impl LaneKernels<$t> for NeonBackend {
            const BACKEND: Backend = Backend::NEON;

            binary_kernel!("neon", add, $t, 4, $ld, $st, $add);
            binary_kernel!("neon", sub, $t, 4, $ld, $st, $sub);
            binary_kernel!("neon", mul, $t, 4, $ld, $st, $mul);
            binary_kernel!("neon", min, $t, 4, $ld, $st, $min);
            binary_kernel!("neon", max, $t, 4, $ld, $st, $max);
        }
    )*};
}

impl_int32_kernels!(
    i32 => vld1q_s32, vst1q_s32, vaddq_s32, vsubq_s32, vmulq_s32, vminq_s32, vmaxq_s32;
    u32 => vld1q_u32, vst1q_u32, vaddq_u32, vsubq_u32, vmulq_u32, vminq_u32, vmaxq_u32;
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neon_add() {
        let a = [1.0f32, 2.0, 3.0, 4.0, 5.0];
        let b = [5.0f32, 4.0, 3.0, 2.0, 1.0];
        let mut result = [0.0f32; 5];

        unsafe {
            <NeonBackend as LaneKernels<f32>>::add(&a, &b, &mut result);
        }

        assert_eq!(result, [6.0; 5]);
    }

    #[test]
    fn test_neon_div_matches_scalar() {
        let a = [1.0f64, -1.0, 0.0];
        let b = [0.0f64, 3.0, 0.0];
        let mut simd = [0.0f64; 3];
        let mut reference = [0.0f64; 3];

        unsafe {
            <NeonBackend as LaneKernels<f64>>::div(&a, &b, &mut simd);
        }
        scalar::div(&a, &b, &mut reference);

        for (s, r) in simd.iter().zip(&reference) {
            assert_eq!(s.to_bits(), r.to_bits());
        }
    }

    #[test]
    fn test_neon_min_keeps_scalar_nan_rule() {
        let a = [f32::NAN, 1.0, 2.0, 3.0];
        let b = [1.0f32, f32::NAN, 1.0, 4.0];
        let mut result = [0.0f32; 4];

        unsafe {
            <NeonBackend as LaneKernels<f32>>::min(&a, &b, &mut result);
        }

        assert_eq!(result[0], 1.0);
        assert!(result[1].is_nan());
        assert_eq!(&result[2..], &[1.0, 3.0]);
    }

    #[test]
    fn test_neon_sum() {
        let a = [1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
        let result = unsafe { <NeonBackend as LaneKernels<f32>>::sum(&a) };
        assert_eq!(result, 21.0);
    }

    #[test]
    fn test_neon_int_mul_wraps() {
        let a = [i32::MAX, 3, -4, 7, 2];
        let b = [2i32, 3, 5, -1, 2];
        let mut simd = [0i32; 5];
        let mut reference = [0i32; 5];

        unsafe {
            <NeonBackend as LaneKernels<i32>>::mul(&a, &b, &mut simd);
        }
        scalar::mul(&a, &b, &mut reference);
        assert_eq!(simd, reference);
    }
}
