//! Fixed-width lane vector
//!
//! [`Vector<T, N>`] owns exactly `N` lanes of element type `T`. The operation
//! catalogue is spread over the crate by concern (arithmetic, comparison,
//! reduction, memory, conversion); this module holds the type itself, its
//! construction forms, lane access, `blend`, and the bridge into the bound
//! kernel set.

use core::ops::{Index, IndexMut};

use crate::backends::LaneKernels;
use crate::dispatch;
use crate::element::Element;
use crate::error::{LaneError, Result};
use crate::mask::Mask;
use crate::Backend;

/// `N` lanes of `T` with value semantics
///
/// Operations return a new vector; `assign_*` forms update the receiver in
/// place and return it for chaining. Masked forms (`*_masked`) only touch
/// selected lanes, every other lane keeps its original value.
///
/// # Examples
///
/// ```
/// use lanewise::Vector;
///
/// let a = Vector::from_array([1.0f32, 2.0, 3.0]);
/// let b = Vector::splat(4.0f32);
///
/// assert_eq!((a + b).to_array(), [5.0, 6.0, 7.0]);
/// assert_eq!(a.len(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Vector<T: Element, const N: usize> {
    pub(crate) lanes: [T; N],
}

impl<T: Element, const N: usize> Vector<T, N> {
    /// Number of lanes
    pub const LANES: usize = N;

    /// Alignment in bytes required by the aligned load/store forms
    ///
    /// The vector's byte size when that is a power of two (capped at 64, a
    /// cache line), otherwise the element's own alignment.
    pub const ALIGNMENT: usize = {
        let bytes = core::mem::size_of::<T>() * N;
        if bytes.is_power_of_two() {
            if bytes > 64 {
                64
            } else {
                bytes
            }
        } else {
            core::mem::align_of::<T>()
        }
    };

    /// All lanes zero
    #[inline]
    pub const fn zero() -> Self {
        Self {
            lanes: [T::ZERO; N],
        }
    }

    /// Broadcast `value` into every lane
    #[inline]
    pub const fn splat(value: T) -> Self {
        Self { lanes: [value; N] }
    }

    /// Vector from explicit lanes, lane 0 first
    #[inline]
    pub const fn from_array(lanes: [T; N]) -> Self {
        Self { lanes }
    }

    /// Vector whose lane `i` is `f(i)`
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::Vector;
    ///
    /// let ramp = Vector::<u16, 4>::from_fn(|i| i as u16 * 10);
    /// assert_eq!(ramp.to_array(), [0, 10, 20, 30]);
    /// ```
    #[inline]
    pub fn from_fn(f: impl FnMut(usize) -> T) -> Self {
        Self {
            lanes: core::array::from_fn(f),
        }
    }

    /// Copy of the lanes as an array
    #[inline]
    pub const fn to_array(self) -> [T; N] {
        self.lanes
    }

    /// Lanes as an array reference
    #[inline]
    pub const fn as_array(&self) -> &[T; N] {
        &self.lanes
    }

    /// Lanes as a mutable array reference
    #[inline]
    pub fn as_mut_array(&mut self) -> &mut [T; N] {
        &mut self.lanes
    }

    /// Lanes as a slice
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.lanes
    }

    /// Always `N`
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// True only for zero-lane vectors
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Lane `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[inline]
    pub fn extract(&self, index: usize) -> T {
        self.lanes[index]
    }

    /// Checked [`extract`](Self::extract)
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::LaneOutOfRange`] if `index >= N`.
    pub fn try_extract(&self, index: usize) -> Result<T> {
        self.lanes
            .get(index)
            .copied()
            .ok_or(LaneError::LaneOutOfRange { index, lanes: N })
    }

    /// Overwrite lane `index` with `value`
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[inline]
    pub fn insert(&mut self, index: usize, value: T) -> &mut Self {
        self.lanes[index] = value;
        self
    }

    /// Checked [`insert`](Self::insert)
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::LaneOutOfRange`] if `index >= N`.
    pub fn try_insert(&mut self, index: usize, value: T) -> Result<&mut Self> {
        let lane = self
            .lanes
            .get_mut(index)
            .ok_or(LaneError::LaneOutOfRange { index, lanes: N })?;
        *lane = value;
        Ok(self)
    }

    /// Lane-wise merge: `other` where `mask` is set, `self` elsewhere
    ///
    /// Every masked operation is this merge applied to the unmasked result.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::{Mask, Vector};
    ///
    /// let base = Vector::from_array([1i32, 2, 3, 4]);
    /// let mask = Mask::from_array([false, true, false, true]);
    /// assert_eq!(base.blend(mask, Vector::splat(0)).to_array(), [1, 0, 3, 0]);
    /// ```
    #[inline]
    pub fn blend(self, mask: Mask<N>, other: impl Into<Self>) -> Self {
        let other = other.into();
        let mask = mask.to_array();
        Self::from_fn(|i| if mask[i] { other.lanes[i] } else { self.lanes[i] })
    }

    /// In-place [`blend`](Self::blend)
    #[inline]
    pub fn assign_blend(&mut self, mask: Mask<N>, other: impl Into<Self>) -> &mut Self {
        *self = self.blend(mask, other);
        self
    }

    /// Backend the build binds this element type to
    #[inline]
    pub const fn backend() -> Backend {
        dispatch::backend_for::<T>()
    }

    /// Lanes as an iterator, lane 0 first
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.lanes.iter().copied()
    }

    #[inline(always)]
    pub(crate) fn map(self, mut f: impl FnMut(T) -> T) -> Self {
        Self::from_fn(|i| f(self.lanes[i]))
    }

    #[inline(always)]
    pub(crate) fn zip_map(self, rhs: Self, mut f: impl FnMut(T, T) -> T) -> Self {
        Self::from_fn(|i| f(self.lanes[i], rhs.lanes[i]))
    }

    #[inline(always)]
    pub(crate) fn kernel_binary(self, rhs: Self, kernel: unsafe fn(&[T], &[T], &mut [T])) -> Self {
        let mut out = Self::zero();
        // SAFETY: `T::Kernels` only names a backend whose instruction set the
        // build enables (see `dispatch`), and all slices hold exactly N lanes.
        unsafe { kernel(&self.lanes, &rhs.lanes, &mut out.lanes) };
        out
    }

    #[inline(always)]
    pub(crate) fn kernel_mul_add(self, b: Self, c: Self) -> Self {
        let mut out = Self::zero();
        // SAFETY: as in `kernel_binary`.
        unsafe { <T::Kernels as LaneKernels<T>>::mul_add(&self.lanes, &b.lanes, &c.lanes, &mut out.lanes) };
        out
    }

    #[inline(always)]
    pub(crate) fn kernel_sum(self) -> T {
        // SAFETY: as in `kernel_binary`.
        unsafe { <T::Kernels as LaneKernels<T>>::sum(&self.lanes) }
    }
}

impl<T: Element, const N: usize> Default for Vector<T, N> {
    /// All lanes zero
    fn default() -> Self {
        Self::zero()
    }
}

impl<T: Element, const N: usize> From<T> for Vector<T, N> {
    fn from(value: T) -> Self {
        Self::splat(value)
    }
}

impl<T: Element, const N: usize> From<[T; N]> for Vector<T, N> {
    fn from(lanes: [T; N]) -> Self {
        Self::from_array(lanes)
    }
}

impl<T: Element, const N: usize> From<Vector<T, N>> for [T; N] {
    fn from(v: Vector<T, N>) -> Self {
        v.lanes
    }
}

impl<T: Element, const N: usize> Index<usize> for Vector<T, N> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.lanes[index]
    }
}

impl<T: Element, const N: usize> IndexMut<usize> for Vector<T, N> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.lanes[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_construction_forms() {
        assert_eq!(Vector::<i32, 3>::zero().to_array(), [0, 0, 0]);
        assert_eq!(Vector::<u8, 2>::splat(7).to_array(), [7, 7]);
        assert_eq!(Vector::<f64, 2>::from(1.5).to_array(), [1.5, 1.5]);
        assert_eq!(Vector::from([1u64, 2]).as_slice(), &[1, 2]);
        assert_eq!(Vector::<i8, 4>::default(), Vector::zero());
    }

    #[test]
    fn test_len_is_lane_count() {
        let v = Vector::<f32, 8>::zero();
        assert_eq!(v.len(), 8);
        assert!(!v.is_empty());
        assert!(Vector::<f32, 0>::zero().is_empty());
    }

    #[test]
    fn test_alignment() {
        assert_eq!(Vector::<f32, 4>::ALIGNMENT, 16);
        assert_eq!(Vector::<f32, 8>::ALIGNMENT, 32);
        assert_eq!(Vector::<f64, 16>::ALIGNMENT, 64);
        assert_eq!(Vector::<f32, 3>::ALIGNMENT, 4);
        assert_eq!(Vector::<u8, 0>::ALIGNMENT, 1);
    }

    #[test]
    fn test_extract_insert() {
        let mut v = Vector::from_array([10i16, 20, 30]);
        assert_eq!(v.extract(1), 20);
        v.insert(1, -5).insert(2, 0);
        assert_eq!(v.to_array(), [10, -5, 0]);
        assert_eq!(v[0], 10);
        v[0] = 1;
        assert_eq!(v.try_extract(0), Ok(1));
    }

    #[test]
    fn test_checked_lane_access() {
        let mut v = Vector::<u32, 4>::zero();
        assert_eq!(
            v.try_extract(4),
            Err(LaneError::LaneOutOfRange { index: 4, lanes: 4 })
        );
        assert!(v.try_insert(7, 1).is_err());
        assert!(v.try_insert(3, 1).is_ok());
        assert_eq!(v.to_array(), [0, 0, 0, 1]);
    }

    #[test]
    #[should_panic]
    fn test_extract_out_of_range_panics() {
        let v = Vector::<u8, 2>::zero();
        let _ = v.extract(2);
    }

    #[test]
    fn test_blend_takes_other_where_set() {
        let base = Vector::from_array([1.0f32, 2.0, 3.0, 4.0]);
        let mask = Mask::from_array([true, false, false, true]);
        let out = base.blend(mask, 0.0f32);
        assert_eq!(out.to_array(), [0.0, 2.0, 3.0, 0.0]);

        let mut v = base;
        v.assign_blend(Mask::FALSE, 9.0f32);
        assert_eq!(v, base);
    }

    #[test]
    fn test_backend_binding_is_per_type() {
        assert_eq!(Vector::<u8, 16>::backend(), Backend::Scalar);
        assert_eq!(Vector::<f32, 4>::backend(), Backend::active());
    }

    #[test]
    fn test_iter() {
        let v = Vector::from_array([3u8, 1, 2]);
        assert_eq!(v.iter().max(), Some(3));
        let back: [u8; 3] = v.into();
        assert_eq!(back, [3, 1, 2]);
    }
}
