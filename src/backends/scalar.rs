//! Scalar (non-SIMD) backend implementation
//!
//! This is the portable baseline that works on all platforms and the
//! reference every hardware backend is tested against. The free functions
//! here are the lane loops; [`ScalarBackend`] is the kernel set built from
//! them, and the hardware backends call them for their tails.
//!
//! # Performance
//!
//! This backend provides the correctness reference, not acceleration.
//! LLVM still auto-vectorizes many of these loops for fixed `N`.

use super::LaneKernels;
use crate::element::Element;
use crate::Backend;

/// Scalar backend (portable, no SIMD)
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarBackend;

impl<T: Element> LaneKernels<T> for ScalarBackend {
    const BACKEND: Backend = Backend::Scalar;
}

/// Element-wise addition: a[i] + b[i]
#[inline(always)]
pub fn add<T: Element>(a: &[T], b: &[T], result: &mut [T]) {
    for ((r, &x), &y) in result.iter_mut().zip(a).zip(b) {
        *r = x.lane_add(y);
    }
}

/// Element-wise subtraction: a[i] - b[i]
#[inline(always)]
pub fn sub<T: Element>(a: &[T], b: &[T], result: &mut [T]) {
    for ((r, &x), &y) in result.iter_mut().zip(a).zip(b) {
        *r = x.lane_sub(y);
    }
}

/// Element-wise multiplication: a[i] * b[i]
#[inline(always)]
pub fn mul<T: Element>(a: &[T], b: &[T], result: &mut [T]) {
    for ((r, &x), &y) in result.iter_mut().zip(a).zip(b) {
        *r = x.lane_mul(y);
    }
}

/// Element-wise division: a[i] / b[i]
#[inline(always)]
pub fn div<T: Element>(a: &[T], b: &[T], result: &mut [T]) {
    for ((r, &x), &y) in result.iter_mut().zip(a).zip(b) {
        *r = x.lane_div(y);
    }
}

/// Element-wise minimum
#[inline(always)]
pub fn min<T: Element>(a: &[T], b: &[T], result: &mut [T]) {
    for ((r, &x), &y) in result.iter_mut().zip(a).zip(b) {
        *r = x.lane_min(y);
    }
}

/// Element-wise maximum
#[inline(always)]
pub fn max<T: Element>(a: &[T], b: &[T], result: &mut [T]) {
    for ((r, &x), &y) in result.iter_mut().zip(a).zip(b) {
        *r = x.lane_max(y);
    }
}

/// Unfused multiply-add: a[i] * b[i] + c[i]
#[inline(always)]
pub fn mul_add<T: Element>(a: &[T], b: &[T], c: &[T], result: &mut [T]) {
    for (((r, &x), &y), &z) in result.iter_mut().zip(a).zip(b).zip(c) {
        *r = x.lane_mul_add(y, z);
    }
}

/// Sum reduction, strictly left to right starting from zero
#[inline(always)]
pub fn sum<T: Element>(a: &[T]) -> T {
    a.iter().fold(T::ZERO, |acc, &x| acc.lane_add(x))
}
