//! Loads, stores, gathers and scatters
//!
//! Three tiers per operation:
//! - slice forms panic on a short slice or out-of-range offset (Rust bounds
//!   checks),
//! - `try_*` forms validate first and return [`LaneError`],
//! - `unsafe` pointer forms check nothing.
//!
//! Loads always copy into the vector's own storage. Masked forms touch
//! memory only at selected lanes; unselected lanes of a masked load keep the
//! receiver's value. Scatter writes lanes in ascending order, so with
//! duplicate offsets the highest lane wins.

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::element::Element;
use crate::error::{LaneError, Result};
use crate::mask::Mask;
use crate::vector::Vector;
use crate::IndexVector;

impl<T: Element, const N: usize> Vector<T, N> {
    /// Copy the first `N` elements of `slice`
    ///
    /// # Panics
    ///
    /// Panics if `slice.len() < N`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::F32x4;
    ///
    /// let data = [1.0f32, 2.0, 3.0, 4.0, 5.0];
    /// assert_eq!(F32x4::load(&data[1..]).to_array(), [2.0, 3.0, 4.0, 5.0]);
    /// ```
    #[inline]
    pub fn load(slice: &[T]) -> Self {
        let head = &slice[..N];
        Self::from_fn(|i| head[i])
    }

    /// Checked [`load`](Self::load)
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SliceTooShort`] if `slice.len() < N`.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all, fields(lanes = N, len = slice.len())))]
    pub fn try_load(slice: &[T]) -> Result<Self> {
        check_len::<N>(slice.len())?;
        Ok(Self::load(slice))
    }

    /// [`load`](Self::load) from memory aligned to [`ALIGNMENT`](Self::ALIGNMENT)
    ///
    /// Misalignment is only caught by a debug assertion.
    ///
    /// # Panics
    ///
    /// Panics if `slice.len() < N`.
    #[inline]
    pub fn load_aligned(slice: &[T]) -> Self {
        debug_assert!(
            is_aligned(slice.as_ptr(), Self::ALIGNMENT),
            "load_aligned on a misaligned slice"
        );
        Self::load(slice)
    }

    /// Checked [`load_aligned`](Self::load_aligned)
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SliceTooShort`] if `slice.len() < N` and
    /// [`LaneError::Misaligned`] if the slice start is not aligned.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all, fields(lanes = N, len = slice.len())))]
    pub fn try_load_aligned(slice: &[T]) -> Result<Self> {
        check_len::<N>(slice.len())?;
        check_aligned(slice.as_ptr(), Self::ALIGNMENT)?;
        Ok(Self::load(slice))
    }

    /// Read `N` elements from `ptr`, any alignment
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `N` consecutive `T`.
    #[inline]
    pub unsafe fn load_ptr(ptr: *const T) -> Self {
        Self::from_array(ptr.cast::<[T; N]>().read_unaligned())
    }

    /// Read `N` elements from `ptr` aligned to [`ALIGNMENT`](Self::ALIGNMENT)
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for reads of `N` consecutive `T` and aligned to
    /// `Self::ALIGNMENT`.
    #[inline]
    pub unsafe fn load_aligned_ptr(ptr: *const T) -> Self {
        debug_assert!(is_aligned(ptr, Self::ALIGNMENT));
        Self::from_array(ptr.cast::<[T; N]>().read())
    }

    /// Load `slice[i]` into the selected lanes; the rest keep `self`
    ///
    /// Only selected offsets are read, so `slice` may be shorter than `N`.
    ///
    /// # Panics
    ///
    /// Panics if a selected lane's offset is past the end of `slice`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::{I32x4, Mask};
    ///
    /// let tail = [7, 8];
    /// let v = I32x4::splat(-1).load_masked(Mask::from_array([true, true, false, false]), &tail);
    /// assert_eq!(v.to_array(), [7, 8, -1, -1]);
    /// ```
    #[inline]
    pub fn load_masked(self, mask: Mask<N>, slice: &[T]) -> Self {
        let mut out = self;
        for i in mask.iter_set() {
            out.lanes[i] = slice[i];
        }
        out
    }

    /// Copy the lanes into the first `N` elements of `slice`
    ///
    /// # Panics
    ///
    /// Panics if `slice.len() < N`.
    #[inline]
    pub fn store(self, slice: &mut [T]) {
        slice[..N].copy_from_slice(&self.lanes);
    }

    /// Checked [`store`](Self::store)
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SliceTooShort`] if `slice.len() < N`.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all, fields(lanes = N, len = slice.len())))]
    pub fn try_store(self, slice: &mut [T]) -> Result<()> {
        check_len::<N>(slice.len())?;
        self.store(slice);
        Ok(())
    }

    /// [`store`](Self::store) to memory aligned to [`ALIGNMENT`](Self::ALIGNMENT)
    ///
    /// # Panics
    ///
    /// Panics if `slice.len() < N`.
    #[inline]
    pub fn store_aligned(self, slice: &mut [T]) {
        debug_assert!(
            is_aligned(slice.as_ptr(), Self::ALIGNMENT),
            "store_aligned on a misaligned slice"
        );
        self.store(slice);
    }

    /// Checked [`store_aligned`](Self::store_aligned)
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::SliceTooShort`] or [`LaneError::Misaligned`].
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all, fields(lanes = N, len = slice.len())))]
    pub fn try_store_aligned(self, slice: &mut [T]) -> Result<()> {
        check_len::<N>(slice.len())?;
        check_aligned(slice.as_ptr(), Self::ALIGNMENT)?;
        self.store(slice);
        Ok(())
    }

    /// Write the lanes to `ptr`, any alignment
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `N` consecutive `T`.
    #[inline]
    pub unsafe fn store_ptr(self, ptr: *mut T) {
        ptr.cast::<[T; N]>().write_unaligned(self.lanes);
    }

    /// Write the lanes to `ptr` aligned to [`ALIGNMENT`](Self::ALIGNMENT)
    ///
    /// # Safety
    ///
    /// `ptr` must be valid for writes of `N` consecutive `T` and aligned to
    /// `Self::ALIGNMENT`.
    #[inline]
    pub unsafe fn store_aligned_ptr(self, ptr: *mut T) {
        debug_assert!(is_aligned(ptr, Self::ALIGNMENT));
        ptr.cast::<[T; N]>().write(self.lanes);
    }

    /// Store the selected lanes to `slice[i]`; other elements are untouched
    ///
    /// # Panics
    ///
    /// Panics if a selected lane's offset is past the end of `slice`.
    #[inline]
    pub fn store_masked(self, mask: Mask<N>, slice: &mut [T]) {
        for i in mask.iter_set() {
            slice[i] = self.lanes[i];
        }
    }

    /// Lane `i` reads `base[index[i]]`
    ///
    /// # Panics
    ///
    /// Panics if an offset is past the end of `base`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::Vector;
    ///
    /// let table = [10u16, 20, 30, 40, 50];
    /// let v = Vector::<u16, 3>::gather(&table, [4u32, 0, 4]);
    /// assert_eq!(v.to_array(), [50, 10, 50]);
    /// ```
    #[inline]
    pub fn gather(base: &[T], index: impl Into<IndexVector<N>>) -> Self {
        let index = index.into();
        Self::from_fn(|i| base[index.lanes[i] as usize])
    }

    /// Checked [`gather`](Self::gather)
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfBounds`] naming the first offending lane.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all, fields(lanes = N, len = base.len())))]
    pub fn try_gather(base: &[T], index: impl Into<IndexVector<N>>) -> Result<Self> {
        let index = index.into();
        check_offsets(Mask::TRUE, &index, base.len())?;
        Ok(Self::gather(base, index))
    }

    /// [`gather`](Self::gather) into the selected lanes; the rest keep `self`
    ///
    /// Offsets of unselected lanes are never read.
    ///
    /// # Panics
    ///
    /// Panics if a selected offset is past the end of `base`.
    #[inline]
    pub fn gather_masked(self, mask: Mask<N>, base: &[T], index: impl Into<IndexVector<N>>) -> Self {
        let index = index.into();
        let mut out = self;
        for i in mask.iter_set() {
            out.lanes[i] = base[index.lanes[i] as usize];
        }
        out
    }

    /// Checked [`gather_masked`](Self::gather_masked)
    ///
    /// Only selected offsets are validated; unselected lanes may hold any value.
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfBounds`] naming the first offending
    /// selected lane.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all, fields(lanes = N, len = base.len())))]
    pub fn try_gather_masked(self, mask: Mask<N>, base: &[T], index: impl Into<IndexVector<N>>) -> Result<Self> {
        let index = index.into();
        check_offsets(mask, &index, base.len())?;
        Ok(self.gather_masked(mask, base, index))
    }

    /// Unchecked [`gather`](Self::gather) from a raw base pointer
    ///
    /// # Safety
    ///
    /// `base.add(index[i])` must be valid for reads of one `T` for every lane.
    #[inline]
    pub unsafe fn gather_ptr(base: *const T, index: impl Into<IndexVector<N>>) -> Self {
        let index = index.into();
        Self::from_fn(|i| base.add(index.lanes[i] as usize).read())
    }

    /// Unchecked [`gather_masked`](Self::gather_masked) from a raw base pointer
    ///
    /// Selected lanes are read in ascending order; no address is formed for an
    /// unselected lane.
    ///
    /// # Safety
    ///
    /// `base.add(index[i])` must be valid for reads of one `T` for every
    /// selected lane `i`.
    #[inline]
    pub unsafe fn gather_masked_ptr(self, mask: Mask<N>, base: *const T, index: impl Into<IndexVector<N>>) -> Self {
        let index = index.into();
        let mut out = self;
        for i in mask.iter_set() {
            out.lanes[i] = base.add(index.lanes[i] as usize).read();
        }
        out
    }

    /// Lane `i` writes `base[index[i]]`; ascending lane order
    ///
    /// # Panics
    ///
    /// Panics if an offset is past the end of `base`. Lanes before the
    /// offending one have already been written.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::Vector;
    ///
    /// let mut out = [0i8; 4];
    /// Vector::from_array([1i8, 2, 3]).scatter(&mut out, [3u32, 0, 3]);
    /// assert_eq!(out, [2, 0, 0, 3]);
    /// ```
    #[inline]
    pub fn scatter(self, base: &mut [T], index: impl Into<IndexVector<N>>) {
        let index = index.into();
        for (lane, &offset) in self.lanes.iter().zip(&index.lanes) {
            base[offset as usize] = *lane;
        }
    }

    /// Checked [`scatter`](Self::scatter): validates every lane before writing any
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfBounds`] naming the first offending
    /// lane; `base` is left untouched.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all, fields(lanes = N, len = base.len())))]
    pub fn try_scatter(self, base: &mut [T], index: impl Into<IndexVector<N>>) -> Result<()> {
        let index = index.into();
        check_offsets(Mask::TRUE, &index, base.len())?;
        self.scatter(base, index);
        Ok(())
    }

    /// [`scatter`](Self::scatter) of the selected lanes only
    ///
    /// # Panics
    ///
    /// Panics if a selected offset is past the end of `base`.
    #[inline]
    pub fn scatter_masked(self, mask: Mask<N>, base: &mut [T], index: impl Into<IndexVector<N>>) {
        let index = index.into();
        for i in mask.iter_set() {
            base[index.lanes[i] as usize] = self.lanes[i];
        }
    }

    /// Checked [`scatter_masked`](Self::scatter_masked): validates every
    /// selected lane before writing any
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::IndexOutOfBounds`] naming the first offending
    /// selected lane; `base` is left untouched.
    #[cfg_attr(feature = "tracing", instrument(level = "trace", skip_all, fields(lanes = N, len = base.len())))]
    pub fn try_scatter_masked(self, mask: Mask<N>, base: &mut [T], index: impl Into<IndexVector<N>>) -> Result<()> {
        let index = index.into();
        check_offsets(mask, &index, base.len())?;
        self.scatter_masked(mask, base, index);
        Ok(())
    }

    /// Unchecked [`scatter`](Self::scatter) to a raw base pointer
    ///
    /// # Safety
    ///
    /// `base.add(index[i])` must be valid for writes of one `T` for every lane.
    #[inline]
    pub unsafe fn scatter_ptr(self, base: *mut T, index: impl Into<IndexVector<N>>) {
        let index = index.into();
        for i in 0..N {
            base.add(index.lanes[i] as usize).write(self.lanes[i]);
        }
    }

    /// Unchecked [`scatter_masked`](Self::scatter_masked) to a raw base pointer
    ///
    /// Selected lanes are written in ascending order, so the highest selected
    /// lane wins on a duplicate offset. No address is formed for an
    /// unselected lane.
    ///
    /// # Safety
    ///
    /// `base.add(index[i])` must be valid for writes of one `T` for every
    /// selected lane `i`.
    #[inline]
    pub unsafe fn scatter_masked_ptr(self, mask: Mask<N>, base: *mut T, index: impl Into<IndexVector<N>>) {
        let index = index.into();
        for i in mask.iter_set() {
            base.add(index.lanes[i] as usize).write(self.lanes[i]);
        }
    }
}

#[inline]
fn is_aligned<T>(ptr: *const T, alignment: usize) -> bool {
    (ptr as usize) % alignment == 0
}

fn check_len<const N: usize>(actual: usize) -> Result<()> {
    if actual < N {
        return Err(LaneError::SliceTooShort {
            expected: N,
            actual,
        });
    }
    Ok(())
}

fn check_aligned<T>(ptr: *const T, alignment: usize) -> Result<()> {
    if !is_aligned(ptr, alignment) {
        return Err(LaneError::Misaligned {
            address: ptr as usize,
            alignment,
        });
    }
    Ok(())
}

fn check_offsets<const N: usize>(mask: Mask<N>, index: &IndexVector<N>, len: usize) -> Result<()> {
    match mask
        .iter_set()
        .find(|&lane| index.lanes[lane] as usize >= len)
    {
        Some(lane) => Err(LaneError::IndexOutOfBounds {
            lane,
            index: index.lanes[lane] as usize,
            len,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{F32x4, F64x2, I32x4, U8x16};

    /// 64-byte aligned scratch buffer
    #[repr(C, align(64))]
    struct Aligned([f32; 32]);

    #[test]
    fn test_load_store_any_address() {
        let data: Vec<f32> = (0..9).map(|i| i as f32).collect();
        for start in 0..5 {
            let v = F32x4::load(&data[start..]);
            assert_eq!(v.to_array(), [0.0, 1.0, 2.0, 3.0].map(|x| x + start as f32));

            let mut out = vec![-1.0f32; 6];
            v.store(&mut out[1..]);
            assert_eq!(&out[1..5], v.as_slice());
            assert_eq!(out[0], -1.0);
            assert_eq!(out[5], -1.0);
        }
    }

    #[test]
    fn test_load_copies() {
        let mut data = [1i32, 2, 3, 4];
        let v = I32x4::load(&data);
        data[0] = 99;
        assert_eq!(v.extract(0), 1);
    }

    #[test]
    fn test_checked_load_store() {
        let short = [1.0f64];
        assert_eq!(
            F64x2::try_load(&short),
            Err(LaneError::SliceTooShort {
                expected: 2,
                actual: 1
            })
        );
        let mut out = [0.0f64; 1];
        assert!(F64x2::splat(1.0).try_store(&mut out).is_err());
        assert_eq!(out, [0.0]);

        assert_eq!(F64x2::try_load(&[1.0, 2.0, 3.0]).map(|v| v.to_array()), Ok([1.0, 2.0]));
    }

    #[test]
    #[should_panic]
    fn test_load_short_slice_panics() {
        let _ = I32x4::load(&[1, 2, 3]);
    }

    #[test]
    fn test_aligned_forms() {
        let mut buf = Aligned([0.0; 32]);
        for (i, x) in buf.0.iter_mut().enumerate() {
            *x = i as f32;
        }

        let v = F32x4::load_aligned(&buf.0[4..]);
        assert_eq!(v.to_array(), [4.0, 5.0, 6.0, 7.0]);
        assert!(F32x4::try_load_aligned(&buf.0[8..]).is_ok());

        match F32x4::try_load_aligned(&buf.0[1..]) {
            Err(LaneError::Misaligned { alignment, .. }) => assert_eq!(alignment, 16),
            other => panic!("expected misaligned error, got {other:?}"),
        }

        F32x4::splat(-1.0).store_aligned(&mut buf.0[12..]);
        assert_eq!(&buf.0[12..16], &[-1.0; 4]);
        assert!(F32x4::zero().try_store_aligned(&mut buf.0[2..]).is_err());
    }

    #[test]
    fn test_pointer_forms() {
        let buf = Aligned([3.0; 32]);
        let data = [1u8, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16, 17];
        let mut out = [0u8; 17];

        unsafe {
            let v = U8x16::load_ptr(data.as_ptr().add(1));
            assert_eq!(v.extract(0), 2);
            v.store_ptr(out.as_mut_ptr().add(1));

            let a = F32x4::load_aligned_ptr(buf.0.as_ptr());
            assert_eq!(a, F32x4::splat(3.0));
        }
        assert_eq!(&out[1..], &data[1..]);
        assert_eq!(out[0], 0);
    }

    #[test]
    fn test_masked_load_keeps_previous_lanes() {
        let v = I32x4::from_array([-1, -2, -3, -4]);
        let mask = Mask::from_array([false, true, false, true]);
        assert_eq!(v.load_masked(mask, &[10, 20, 30, 40]).to_array(), [-1, 20, -3, 40]);
        assert_eq!(v.load_masked(Mask::FALSE, &[]), v);
    }

    #[test]
    fn test_masked_store_touches_selected_only() {
        let mut out = [0i32; 4];
        I32x4::from_array([1, 2, 3, 4]).store_masked(Mask::from_array([true, false, false, true]), &mut out);
        assert_eq!(out, [1, 0, 0, 4]);
    }

    #[test]
    fn test_gather() {
        let base = [0.5f32, 1.5, 2.5, 3.5, 4.5];
        let v = F32x4::gather(&base, [4u32, 3, 0, 0]);
        assert_eq!(v.to_array(), [4.5, 3.5, 0.5, 0.5]);

        let masked = F32x4::splat(-1.0).gather_masked(
            Mask::from_array([true, false, true, false]),
            &base,
            [1u32, 99, 2, 99],
        );
        assert_eq!(masked.to_array(), [1.5, -1.0, 2.5, -1.0]);

        let raw = unsafe { F32x4::gather_ptr(base.as_ptr(), [0u32, 1, 2, 3]) };
        assert_eq!(raw, F32x4::load(&base));
    }

    #[test]
    fn test_try_gather_reports_first_bad_lane() {
        let base = [1i32, 2, 3];
        assert_eq!(
            I32x4::try_gather(&base, [0u32, 5, 2, 7]),
            Err(LaneError::IndexOutOfBounds {
                lane: 1,
                index: 5,
                len: 3
            })
        );
        assert_eq!(
            I32x4::try_gather(&base, [2u32, 1, 0, 0]).map(|v| v.to_array()),
            Ok([3, 2, 1, 1])
        );
    }

    #[test]
    fn test_scatter_duplicates_highest_lane_wins() {
        let mut out = [0i32; 4];
        I32x4::from_array([1, 2, 3, 4]).scatter(&mut out, [2u32, 2, 0, 2]);
        assert_eq!(out, [3, 0, 4, 0]);
    }

    #[test]
    fn test_try_scatter_writes_nothing_on_error() {
        let mut out = [0i32; 4];
        let err = I32x4::from_array([1, 2, 3, 4]).try_scatter(&mut out, [0u32, 1, 2, 4]);
        assert_eq!(
            err,
            Err(LaneError::IndexOutOfBounds {
                lane: 3,
                index: 4,
                len: 4
            })
        );
        assert_eq!(out, [0; 4]);
    }

    #[test]
    fn test_scatter_masked_and_ptr() {
        let mut out = [0u8; 8];
        let v = Vector::<u8, 4>::from_array([9, 8, 7, 6]);
        v.scatter_masked(Mask::from_array([true, false, true, false]), &mut out, [7u32, 100, 1, 100]);
        assert_eq!(out, [0, 7, 0, 0, 0, 0, 0, 9]);

        unsafe { v.scatter_ptr(out.as_mut_ptr(), [0u32, 2, 4, 6]) };
        assert_eq!(out, [9, 7, 8, 0, 7, 0, 6, 9]);
    }

    #[test]
    fn test_masked_ptr_forms_skip_unselected_offsets() {
        let base = [10i32, 20, 30, 40];
        let mask = Mask::from_array([false, true, false, true]);
        // Unselected offsets are far outside `base`; they must never be formed.
        let index = [u32::MAX, 2, u32::MAX, 0];

        let v = unsafe { I32x4::splat(-1).gather_masked_ptr(mask, base.as_ptr(), index) };
        assert_eq!(v.to_array(), [-1, 30, -1, 10]);

        let mut out = [7i32; 4];
        unsafe { I32x4::from_array([1, 2, 3, 4]).scatter_masked_ptr(mask, out.as_mut_ptr(), index) };
        assert_eq!(out, [4, 7, 2, 7]);

        let none = Mask::FALSE;
        unsafe { I32x4::splat(0).scatter_masked_ptr(none, out.as_mut_ptr(), [u32::MAX; 4]) };
        assert_eq!(out, [4, 7, 2, 7]);
    }

    #[test]
    fn test_scatter_masked_ptr_ascending_order() {
        let mut out = [0u8; 2];
        let mask = Mask::from_array([true, true, false, true]);
        let v = Vector::<u8, 4>::from_array([1, 2, 3, 4]);
        unsafe { v.scatter_masked_ptr(mask, out.as_mut_ptr(), [1u32, 1, 1, 0]) };
        assert_eq!(out, [4, 2]);
    }

    #[test]
    fn test_try_gather_masked_checks_selected_only() {
        let base = [1.0f32, 2.0, 3.0];
        let mask = Mask::from_array([true, false, true, false]);

        let v = F32x4::zero().try_gather_masked(mask, &base, [2u32, 50, 0, 99]);
        assert_eq!(v.map(|v| v.to_array()), Ok([3.0, 0.0, 1.0, 0.0]));

        assert_eq!(
            F32x4::zero().try_gather_masked(mask, &base, [0u32, 50, 3, 99]),
            Err(LaneError::IndexOutOfBounds {
                lane: 2,
                index: 3,
                len: 3
            })
        );
    }

    #[test]
    fn test_try_scatter_masked_checks_selected_only() {
        let mut out = [0u32; 3];
        let v = Vector::<u32, 4>::from_array([5, 6, 7, 8]);
        let mask = Mask::from_array([false, true, false, true]);

        assert_eq!(v.try_scatter_masked(mask, &mut out, [99u32, 0, 99, 2]), Ok(()));
        assert_eq!(out, [6, 0, 8]);

        let err = v.try_scatter_masked(mask, &mut out, [0u32, 1, 0, 3]);
        assert_eq!(
            err,
            Err(LaneError::IndexOutOfBounds {
                lane: 3,
                index: 3,
                len: 3
            })
        );
        assert_eq!(out, [6, 0, 8]);
    }
}
