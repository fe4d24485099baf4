//! Horizontal reductions
//!
//! Masked reductions substitute the operation's identity for unselected
//! lanes: `0` for sum/OR/XOR, `1` for product, all-ones for AND, `T::MIN` when
//! reducing for a maximum and `T::MAX` for a minimum.
//!
//! `hadd` runs on the bound kernel set, whose grouping is fixed per backend
//! and lane count. Every other reduction folds lane 0 upwards on all backends.

use crate::element::{Element, IntElement};
use crate::mask::Mask;
use crate::vector::Vector;

impl<T: Element, const N: usize> Vector<T, N> {
    /// Sum of all lanes (wrapping for integers)
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::F32x4;
    ///
    /// assert_eq!(F32x4::from_array([1.0, 2.0, 3.0, 4.0]).hadd(), 10.0);
    /// ```
    #[inline]
    pub fn hadd(self) -> T {
        self.kernel_sum()
    }

    /// Sum of the selected lanes; `0` when none are selected
    #[inline]
    pub fn hadd_masked(self, mask: Mask<N>) -> T {
        Self::zero().blend(mask, self).hadd()
    }

    /// Product of all lanes (wrapping for integers)
    #[inline]
    pub fn hmul(self) -> T {
        self.lanes.iter().fold(T::ONE, |acc, &x| acc.lane_mul(x))
    }

    /// Product of the selected lanes; `1` when none are selected
    #[inline]
    pub fn hmul_masked(self, mask: Mask<N>) -> T {
        Self::splat(T::ONE).blend(mask, self).hmul()
    }

    /// Smallest lane; NaN lanes are skipped
    ///
    /// Returns `T::MAX` (`+inf` for floats) if no lane qualifies.
    #[inline]
    pub fn hmin(self) -> T {
        self.hmin_masked(Mask::TRUE)
    }

    /// Smallest selected lane; `T::MAX` when none are selected
    #[inline]
    pub fn hmin_masked(self, mask: Mask<N>) -> T {
        self.imin_masked(mask)
            .map_or(T::MAX, |i| self.lanes[i])
    }

    /// Largest lane; NaN lanes are skipped
    ///
    /// Returns `T::MIN` (`-inf` for floats) if no lane qualifies.
    #[inline]
    pub fn hmax(self) -> T {
        self.hmax_masked(Mask::TRUE)
    }

    /// Largest selected lane; `T::MIN` when none are selected
    #[inline]
    pub fn hmax_masked(self, mask: Mask<N>) -> T {
        self.imax_masked(mask)
            .map_or(T::MIN, |i| self.lanes[i])
    }

    /// Index of the smallest lane, lowest index on ties
    ///
    /// NaN lanes are skipped; `0` if no lane qualifies.
    #[inline]
    pub fn imin(self) -> usize {
        self.imin_masked(Mask::TRUE).unwrap_or(0)
    }

    /// Index of the smallest selected lane, lowest index on ties
    ///
    /// `None` when no selected lane is comparable.
    #[inline]
    pub fn imin_masked(self, mask: Mask<N>) -> Option<usize> {
        self.position_by(mask, |x, best| x < best)
    }

    /// Index of the largest lane, lowest index on ties
    ///
    /// NaN lanes are skipped; `0` if no lane qualifies.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::I32x4;
    ///
    /// assert_eq!(I32x4::from_array([2, 9, 1, 9]).imax(), 1);
    /// ```
    #[inline]
    pub fn imax(self) -> usize {
        self.imax_masked(Mask::TRUE).unwrap_or(0)
    }

    /// Index of the largest selected lane, lowest index on ties
    ///
    /// `None` when no selected lane is comparable.
    #[inline]
    pub fn imax_masked(self, mask: Mask<N>) -> Option<usize> {
        self.position_by(mask, |x, best| x > best)
    }

    // Strict `better` keeps the earliest lane on ties.
    fn position_by(&self, mask: Mask<N>, better: impl Fn(T, T) -> bool) -> Option<usize> {
        let mut best: Option<usize> = None;
        for i in mask.iter_set() {
            let x = self.lanes[i];
            // Unordered with itself: NaN
            if x.partial_cmp(&x).is_none() {
                continue;
            }
            match best {
                Some(b) if !better(x, self.lanes[b]) => {}
                _ => best = Some(i),
            }
        }
        best
    }
}

impl<T: IntElement, const N: usize> Vector<T, N> {
    /// Bitwise AND of all lanes
    #[inline]
    pub fn hand(self) -> T {
        self.lanes.iter().fold(T::ALL_ONES, |acc, &x| acc & x)
    }

    /// Bitwise AND of the selected lanes; all-ones when none are selected
    #[inline]
    pub fn hand_masked(self, mask: Mask<N>) -> T {
        Self::splat(T::ALL_ONES).blend(mask, self).hand()
    }

    /// Bitwise OR of all lanes
    #[inline]
    pub fn hor(self) -> T {
        self.lanes.iter().fold(T::ZERO, |acc, &x| acc | x)
    }

    /// Bitwise OR of the selected lanes; `0` when none are selected
    #[inline]
    pub fn hor_masked(self, mask: Mask<N>) -> T {
        Self::zero().blend(mask, self).hor()
    }

    /// Bitwise XOR of all lanes
    #[inline]
    pub fn hxor(self) -> T {
        self.lanes.iter().fold(T::ZERO, |acc, &x| acc ^ x)
    }

    /// Bitwise XOR of the selected lanes; `0` when none are selected
    #[inline]
    pub fn hxor_masked(self, mask: Mask<N>) -> T {
        Self::zero().blend(mask, self).hxor()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_integer_hadd_matches_wrapping_sum(a in prop::array::uniform16(any::<i32>())) {
            let expected = a.iter().fold(0i32, |acc, &x| acc.wrapping_add(x));
            prop_assert_eq!(Vector::from_array(a).hadd(), expected);
        }

        #[test]
        fn test_imax_points_at_first_maximum(a in prop::array::uniform8(0u8..4)) {
            let v = Vector::from_array(a);
            let idx = v.imax();
            prop_assert_eq!(v[idx], v.hmax());
            prop_assert!(a[..idx].iter().all(|&x| x < a[idx]));
        }
    }
}
