//! Lane masks
//!
//! A [`Mask<N>`] holds one predicate per lane of a same-width vector. It is
//! produced by comparisons and consumed by every masked operation; the lane
//! count is part of the type, so pairing a mask with a vector of another
//! width does not compile.

use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use crate::element::Element;
use crate::error::{LaneError, Result};
use crate::vector::Vector;

/// One boolean per lane
///
/// # Examples
///
/// ```
/// use lanewise::Mask;
///
/// let m = Mask::from_array([true, false, true, false]);
/// assert_eq!(m.count(), 2);
/// assert_eq!(m.first_set(), Some(0));
/// assert!((m | !m).all());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Mask<const N: usize> {
    lanes: [bool; N],
}

impl<const N: usize> Mask<N> {
    /// Number of lanes
    pub const LANES: usize = N;

    /// Every lane selected
    pub const TRUE: Self = Self { lanes: [true; N] };

    /// No lane selected
    pub const FALSE: Self = Self { lanes: [false; N] };

    /// Same predicate in every lane
    #[inline]
    pub const fn splat(value: bool) -> Self {
        Self { lanes: [value; N] }
    }

    /// Mask from explicit lane predicates, lane 0 first
    #[inline]
    pub const fn from_array(lanes: [bool; N]) -> Self {
        Self { lanes }
    }

    /// Mask whose lane `i` is `f(i)`
    #[inline]
    pub fn from_fn(f: impl FnMut(usize) -> bool) -> Self {
        Self {
            lanes: core::array::from_fn(f),
        }
    }

    /// Lane predicates as an array
    #[inline]
    pub const fn to_array(self) -> [bool; N] {
        self.lanes
    }

    /// Lane predicates as a slice
    #[inline]
    pub fn as_slice(&self) -> &[bool] {
        &self.lanes
    }

    /// Always `N`
    #[inline]
    pub const fn len(&self) -> usize {
        N
    }

    /// True only for the zero-lane mask
    #[inline]
    pub const fn is_empty(&self) -> bool {
        N == 0
    }

    /// Predicate of lane `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[inline]
    pub fn test(&self, index: usize) -> bool {
        self.lanes[index]
    }

    /// Checked [`test`](Self::test)
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::LaneOutOfRange`] if `index >= N`.
    pub fn try_test(&self, index: usize) -> Result<bool> {
        self.lanes
            .get(index)
            .copied()
            .ok_or(LaneError::LaneOutOfRange { index, lanes: N })
    }

    /// Set the predicate of lane `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= N`.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) -> &mut Self {
        self.lanes[index] = value;
        self
    }

    /// Checked [`set`](Self::set)
    ///
    /// # Errors
    ///
    /// Returns [`LaneError::LaneOutOfRange`] if `index >= N`.
    pub fn try_set(&mut self, index: usize, value: bool) -> Result<&mut Self> {
        let lane = self
            .lanes
            .get_mut(index)
            .ok_or(LaneError::LaneOutOfRange { index, lanes: N })?;
        *lane = value;
        Ok(self)
    }

    /// Number of selected lanes
    #[inline]
    pub fn count(&self) -> usize {
        self.lanes.iter().filter(|&&b| b).count()
    }

    /// Horizontal AND: every lane selected (true for `N == 0`)
    #[inline]
    pub fn all(&self) -> bool {
        self.lanes.iter().all(|&b| b)
    }

    /// Horizontal OR: at least one lane selected
    #[inline]
    pub fn any(&self) -> bool {
        self.lanes.iter().any(|&b| b)
    }

    /// No lane selected
    #[inline]
    pub fn none(&self) -> bool {
        !self.any()
    }

    /// Horizontal XOR: odd number of selected lanes
    #[inline]
    pub fn parity(&self) -> bool {
        self.lanes.iter().fold(false, |acc, &b| acc ^ b)
    }

    /// Lowest selected lane index
    #[inline]
    pub fn first_set(&self) -> Option<usize> {
        self.lanes.iter().position(|&b| b)
    }

    /// Lane predicates, lane 0 first
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.lanes.iter().copied()
    }

    /// Indices of the selected lanes, ascending
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        self.lanes
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| b.then_some(i))
    }

    /// `if_true` where selected, `if_false` elsewhere
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::{Mask, Vector};
    ///
    /// let m = Mask::from_array([true, false]);
    /// let picked = m.select(Vector::splat(1u8), Vector::splat(2u8));
    /// assert_eq!(picked.to_array(), [1, 2]);
    /// ```
    #[inline]
    pub fn select<T: Element>(self, if_true: Vector<T, N>, if_false: Vector<T, N>) -> Vector<T, N> {
        if_false.blend(self, if_true)
    }

    /// Lanes selected in `self` but not in `other`
    #[inline]
    pub fn and_not(self, other: Self) -> Self {
        self & !other
    }

    /// Apply `f` lane by lane.
    #[inline]
    pub(crate) fn zip_with(self, other: Self, mut f: impl FnMut(bool, bool) -> bool) -> Self {
        Self::from_fn(|i| f(self.lanes[i], other.lanes[i]))
    }
}

impl<const N: usize> Default for Mask<N> {
    /// All lanes clear
    fn default() -> Self {
        Self::FALSE
    }
}

impl<const N: usize> From<[bool; N]> for Mask<N> {
    fn from(lanes: [bool; N]) -> Self {
        Self::from_array(lanes)
    }
}

impl<const N: usize> From<Mask<N>> for [bool; N] {
    fn from(mask: Mask<N>) -> Self {
        mask.lanes
    }
}

impl<const N: usize> From<bool> for Mask<N> {
    fn from(value: bool) -> Self {
        Self::splat(value)
    }
}

macro_rules! impl_mask_logic {
    ($($trait:ident::$method:ident, $assign:ident::$assign_method:ident, $op:tt;)*) => {$(
        impl<const N: usize> $trait for Mask<N> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: Self) -> Self {
                self.zip_with(rhs, |a, b| a $op b)
            }
        }

        impl<const N: usize> $assign for Mask<N> {
            #[inline]
            fn $assign_method(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }
    )*};
}

impl_mask_logic! {
    BitAnd::bitand, BitAndAssign::bitand_assign, &;
    BitOr::bitor, BitOrAssign::bitor_assign, |;
    BitXor::bitxor, BitXorAssign::bitxor_assign, ^;
}

impl<const N: usize> Not for Mask<N> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::from_fn(|i| !self.lanes[i])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert!(Mask::<4>::TRUE.all());
        assert!(Mask::<4>::FALSE.none());
        assert_eq!(Mask::<3>::default(), Mask::FALSE);
        assert_eq!(Mask::<2>::splat(true), Mask::TRUE);
    }

    #[test]
    fn test_horizontal_logic() {
        let m = Mask::from_array([true, false, true, true]);
        assert_eq!(m.count(), 3);
        assert!(m.any());
        assert!(!m.all());
        assert!(!m.none());
        assert!(m.parity());
        assert!(!Mask::from_array([true, true]).parity());
    }

    #[test]
    fn test_zero_lane_mask() {
        let m = Mask::<0>::default();
        assert!(m.all());
        assert!(!m.any());
        assert!(m.is_empty());
        assert_eq!(m.first_set(), None);
    }

    #[test]
    fn test_first_set_and_iter_set() {
        let m = Mask::from_array([false, false, true, false, true]);
        assert_eq!(m.first_set(), Some(2));
        assert_eq!(m.iter_set().collect::<Vec<_>>(), vec![2, 4]);
        assert_eq!(Mask::<5>::FALSE.first_set(), None);
    }

    #[test]
    fn test_logic_operators() {
        let a = Mask::from_array([true, true, false, false]);
        let b = Mask::from_array([true, false, true, false]);

        assert_eq!((a & b).to_array(), [true, false, false, false]);
        assert_eq!((a | b).to_array(), [true, true, true, false]);
        assert_eq!((a ^ b).to_array(), [false, true, true, false]);
        assert_eq!((!a).to_array(), [false, false, true, true]);
        assert_eq!(a.and_not(b).to_array(), [false, true, false, false]);

        let mut c = a;
        c &= b;
        c |= Mask::from_array([false, false, false, true]);
        c ^= Mask::TRUE;
        assert_eq!(c.to_array(), [false, true, true, false]);
    }

    #[test]
    fn test_test_and_set() {
        let mut m = Mask::<4>::FALSE;
        m.set(1, true).set(3, true);
        assert!(m.test(1));
        assert!(!m.test(2));
        assert_eq!(m.try_test(3), Ok(true));
        assert_eq!(
            m.try_test(4),
            Err(LaneError::LaneOutOfRange { index: 4, lanes: 4 })
        );
        assert!(m.try_set(9, true).is_err());
        assert_eq!(m.count(), 2);
    }

    #[test]
    fn test_select() {
        let m = Mask::from_array([true, false, false, true]);
        let a = Vector::from_array([1i32, 2, 3, 4]);
        let b = Vector::from_array([-1i32, -2, -3, -4]);
        assert_eq!(m.select(a, b).to_array(), [1, -2, -3, 4]);
    }

    #[test]
    fn test_conversions() {
        let m: Mask<3> = [true, false, true].into();
        let back: [bool; 3] = m.into();
        assert_eq!(back, [true, false, true]);
        assert_eq!(Mask::<2>::from(true), Mask::TRUE);
    }
}
