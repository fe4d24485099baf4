//! Lane-wise comparisons producing masks
//!
//! Comparisons use the element's `PartialEq`/`PartialOrd`, so every ordered
//! comparison against a NaN lane is false and `cmp_ne` against NaN is true.

use crate::element::{Element, FloatElement};
use crate::mask::Mask;
use crate::vector::Vector;

macro_rules! comparisons {
    ($($(#[$doc:meta])* $name:ident, $masked:ident, $op:tt;)*) => {$(
        $(#[$doc])*
        #[inline]
        pub fn $name(self, rhs: impl Into<Self>) -> Mask<N> {
            let rhs = rhs.into();
            Mask::from_fn(|i| self.lanes[i] $op rhs.lanes[i])
        }

        #[doc = concat!("[`", stringify!($name), "`](Self::", stringify!($name), ") with unselected lanes reported `false`")]
        #[inline]
        pub fn $masked(self, mask: Mask<N>, rhs: impl Into<Self>) -> Mask<N> {
            mask & self.$name(rhs)
        }
    )*};
}

impl<T: Element, const N: usize> Vector<T, N> {
    comparisons! {
        /// Lane-wise `self == rhs`
        cmp_eq, cmp_eq_masked, ==;
        /// Lane-wise `self != rhs`
        cmp_ne, cmp_ne_masked, !=;
        /// Lane-wise `self > rhs`
        cmp_gt, cmp_gt_masked, >;
        /// Lane-wise `self < rhs`
        cmp_lt, cmp_lt_masked, <;
        /// Lane-wise `self >= rhs`
        cmp_ge, cmp_ge_masked, >=;
        /// Lane-wise `self <= rhs`
        cmp_le, cmp_le_masked, <=;
    }

    /// Every lane equals the matching `rhs` lane
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::Vector;
    ///
    /// let v = Vector::from_array([3u8, 3, 3]);
    /// assert!(v.all_eq(3u8));
    /// assert!(!v.all_eq([3u8, 3, 4]));
    /// ```
    #[inline]
    pub fn all_eq(self, rhs: impl Into<Self>) -> bool {
        self.cmp_eq(rhs).all()
    }

    /// [`all_eq`](Self::all_eq) over the selected lanes only (true when none are)
    #[inline]
    pub fn all_eq_masked(self, mask: Mask<N>, rhs: impl Into<Self>) -> bool {
        (self.cmp_eq(rhs) | !mask).all()
    }

    /// No two lanes compare equal
    ///
    /// Uses `==`, so NaN lanes count as distinct and `0.0`/`-0.0` as equal.
    ///
    /// Pairwise scan: quadratic in `N`, the one lane operation that is not
    /// linear. At the 64-lane register width that is at most 2016 compares.
    pub fn is_unique(&self) -> bool {
        for i in 0..N {
            for j in (i + 1)..N {
                if self.lanes[i] == self.lanes[j] {
                    return false;
                }
            }
        }
        true
    }
}

impl<T: FloatElement, const N: usize> Vector<T, N> {
    /// Lanes holding NaN
    #[inline]
    pub fn is_nan(self) -> Mask<N> {
        Mask::from_fn(|i| self.lanes[i].is_nan())
    }

    /// Lanes holding `±inf`
    #[inline]
    pub fn is_infinite(self) -> Mask<N> {
        Mask::from_fn(|i| self.lanes[i].is_infinite())
    }

    /// Lanes that are neither NaN nor infinite
    #[inline]
    pub fn is_finite(self) -> Mask<N> {
        Mask::from_fn(|i| self.lanes[i].is_finite())
    }
}
