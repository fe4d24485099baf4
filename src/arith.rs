//! Lane-wise arithmetic, fused forms and integer bit operations
//!
//! Every operation comes as `op`, `op_masked`, `assign_op` and
//! `assign_op_masked`. Binary operands take `impl Into<Vector<T, N>>`, so a
//! scalar broadcasts and one name covers both operand forms.

use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Shl, ShlAssign, Shr, ShrAssign, Sub, SubAssign,
};

use num_traits::Float;

use crate::backends::LaneKernels;
use crate::element::{Element, FloatElement, IntElement};
use crate::mask::Mask;
use crate::vector::Vector;
use crate::IndexVector;

/// Masked and assign forms of an operation taking `self` plus `$args`.
macro_rules! predicated {
    ($($op:ident, $masked:ident, $assign:ident, $assign_masked:ident ($($arg:ident: $ty:ty),*);)*) => {$(
        #[doc = concat!("[`", stringify!($op), "`](Self::", stringify!($op), ") on the lanes selected by `mask`; other lanes keep `self`.")]
        #[inline]
        pub fn $masked(self, mask: Mask<N>, $($arg: $ty),*) -> Self {
            self.blend(mask, self.$op($($arg),*))
        }

        predicated!(@assign $op, $masked, $assign, $assign_masked ($($arg: $ty),*));
    )*};
    (@assign $op:ident, $masked:ident, $assign:ident, $assign_masked:ident ($($arg:ident: $ty:ty),*)) => {
        #[doc = concat!("In-place [`", stringify!($op), "`](Self::", stringify!($op), ").")]
        #[inline]
        pub fn $assign(&mut self, $($arg: $ty),*) -> &mut Self {
            *self = self.$op($($arg),*);
            self
        }

        #[doc = concat!("In-place [`", stringify!($masked), "`](Self::", stringify!($masked), ").")]
        #[inline]
        pub fn $assign_masked(&mut self, mask: Mask<N>, $($arg: $ty),*) -> &mut Self {
            *self = self.$masked(mask, $($arg),*);
            self
        }
    };
}

impl<T: Element, const N: usize> Vector<T, N> {
    /// Lane-wise `self + rhs` (wrapping for integers)
    #[inline]
    pub fn add(self, rhs: impl Into<Self>) -> Self {
        self.kernel_binary(rhs.into(), <T::Kernels as LaneKernels<T>>::add)
    }

    /// Lane-wise `self - rhs` (wrapping for integers)
    #[inline]
    pub fn sub(self, rhs: impl Into<Self>) -> Self {
        self.kernel_binary(rhs.into(), <T::Kernels as LaneKernels<T>>::sub)
    }

    /// Reverse subtraction: lane-wise `rhs - self`
    #[inline]
    pub fn sub_from(self, rhs: impl Into<Self>) -> Self {
        let minuend: Self = rhs.into();
        minuend.sub(self)
    }

    /// Lane-wise `self * rhs` (wrapping for integers)
    #[inline]
    pub fn mul(self, rhs: impl Into<Self>) -> Self {
        self.kernel_binary(rhs.into(), <T::Kernels as LaneKernels<T>>::mul)
    }

    /// Lane-wise `self / rhs`
    ///
    /// Floats follow IEEE-754 (`x / 0` is `±inf` or NaN).
    ///
    /// # Panics
    ///
    /// Integer lanes panic on a zero divisor, like scalar integer division.
    #[inline]
    pub fn div(self, rhs: impl Into<Self>) -> Self {
        self.kernel_binary(rhs.into(), <T::Kernels as LaneKernels<T>>::div)
    }

    /// [`div`](Self::div) on the lanes selected by `mask`; other lanes keep `self`.
    ///
    /// Unselected lanes are never divided, so a zero divisor there is harmless.
    #[inline]
    pub fn div_masked(self, mask: Mask<N>, rhs: impl Into<Self>) -> Self {
        let divisor = Self::splat(T::ONE).blend(mask, rhs);
        self.blend(mask, self.div(divisor))
    }

    /// Lane-wise minimum, `if self < rhs { self } else { rhs }`
    ///
    /// A NaN in either lane yields the `rhs` lane.
    #[inline]
    pub fn min(self, rhs: impl Into<Self>) -> Self {
        self.kernel_binary(rhs.into(), <T::Kernels as LaneKernels<T>>::min)
    }

    /// Lane-wise maximum, `if self > rhs { self } else { rhs }`
    ///
    /// A NaN in either lane yields the `rhs` lane.
    #[inline]
    pub fn max(self, rhs: impl Into<Self>) -> Self {
        self.kernel_binary(rhs.into(), <T::Kernels as LaneKernels<T>>::max)
    }

    /// Lane-wise addition clamped to `[T::MIN, T::MAX]`
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::U8x16;
    ///
    /// let v = U8x16::splat(250);
    /// assert_eq!(v.saturating_add(10u8).extract(0), 255);
    /// assert_eq!(v.add(10u8).extract(0), 4);
    /// ```
    #[inline]
    pub fn saturating_add(self, rhs: impl Into<Self>) -> Self {
        self.zip_map(rhs.into(), T::lane_saturating_add)
    }

    /// Lane-wise subtraction clamped to `[T::MIN, T::MAX]`
    #[inline]
    pub fn saturating_sub(self, rhs: impl Into<Self>) -> Self {
        self.zip_map(rhs.into(), T::lane_saturating_sub)
    }

    /// Lane-wise negation (two's complement wrap for integers)
    #[inline]
    pub fn neg(self) -> Self {
        self.map(T::lane_neg)
    }

    /// Lane-wise absolute value (`MIN` stays `MIN` for signed integers)
    #[inline]
    pub fn abs(self) -> Self {
        self.map(T::lane_abs)
    }

    /// `self * b + c`
    ///
    /// Float backends with FMA compute this with a single rounding.
    #[inline]
    pub fn mul_add(self, b: impl Into<Self>, c: impl Into<Self>) -> Self {
        self.kernel_mul_add(b.into(), c.into())
    }

    /// `self * b - c`
    #[inline]
    pub fn mul_sub(self, b: impl Into<Self>, c: impl Into<Self>) -> Self {
        let c: Self = c.into();
        self.kernel_mul_add(b.into(), c.neg())
    }

    /// `(self + b) * c`
    #[inline]
    pub fn add_mul(self, b: impl Into<Self>, c: impl Into<Self>) -> Self {
        self.add(b).mul(c)
    }

    /// `(self - b) * c`
    #[inline]
    pub fn sub_mul(self, b: impl Into<Self>, c: impl Into<Self>) -> Self {
        self.sub(b).mul(c)
    }

    predicated! {
        add, add_masked, assign_add, assign_add_masked (rhs: impl Into<Self>);
        sub, sub_masked, assign_sub, assign_sub_masked (rhs: impl Into<Self>);
        sub_from, sub_from_masked, assign_sub_from, assign_sub_from_masked (rhs: impl Into<Self>);
        mul, mul_masked, assign_mul, assign_mul_masked (rhs: impl Into<Self>);
        min, min_masked, assign_min, assign_min_masked (rhs: impl Into<Self>);
        max, max_masked, assign_max, assign_max_masked (rhs: impl Into<Self>);
        saturating_add, saturating_add_masked, assign_saturating_add, assign_saturating_add_masked (rhs: impl Into<Self>);
        saturating_sub, saturating_sub_masked, assign_saturating_sub, assign_saturating_sub_masked (rhs: impl Into<Self>);
        neg, neg_masked, assign_neg, assign_neg_masked ();
        abs, abs_masked, assign_abs, assign_abs_masked ();
        mul_add, mul_add_masked, assign_mul_add, assign_mul_add_masked (b: impl Into<Self>, c: impl Into<Self>);
        mul_sub, mul_sub_masked, assign_mul_sub, assign_mul_sub_masked (b: impl Into<Self>, c: impl Into<Self>);
        add_mul, add_mul_masked, assign_add_mul, assign_add_mul_masked (b: impl Into<Self>, c: impl Into<Self>);
        sub_mul, sub_mul_masked, assign_sub_mul, assign_sub_mul_masked (b: impl Into<Self>, c: impl Into<Self>);
    }

    predicated!(@assign div, div_masked, assign_div, assign_div_masked (rhs: impl Into<Self>));

    /// `++v`: add one to every lane, return the new value
    #[inline]
    pub fn pre_inc(&mut self) -> Self {
        *self.assign_add(T::ONE)
    }

    /// `v++`: add one to every lane, return the old value
    #[inline]
    pub fn post_inc(&mut self) -> Self {
        let old = *self;
        self.assign_add(T::ONE);
        old
    }

    /// `--v`: subtract one from every lane, return the new value
    #[inline]
    pub fn pre_dec(&mut self) -> Self {
        *self.assign_sub(T::ONE)
    }

    /// `v--`: subtract one from every lane, return the old value
    #[inline]
    pub fn post_dec(&mut self) -> Self {
        let old = *self;
        self.assign_sub(T::ONE);
        old
    }

    /// [`pre_inc`](Self::pre_inc) on the selected lanes only
    #[inline]
    pub fn pre_inc_masked(&mut self, mask: Mask<N>) -> Self {
        *self.assign_add_masked(mask, T::ONE)
    }

    /// [`post_inc`](Self::post_inc) on the selected lanes only
    #[inline]
    pub fn post_inc_masked(&mut self, mask: Mask<N>) -> Self {
        let old = *self;
        self.assign_add_masked(mask, T::ONE);
        old
    }

    /// [`pre_dec`](Self::pre_dec) on the selected lanes only
    #[inline]
    pub fn pre_dec_masked(&mut self, mask: Mask<N>) -> Self {
        *self.assign_sub_masked(mask, T::ONE)
    }

    /// [`post_dec`](Self::post_dec) on the selected lanes only
    #[inline]
    pub fn post_dec_masked(&mut self, mask: Mask<N>) -> Self {
        let old = *self;
        self.assign_sub_masked(mask, T::ONE);
        old
    }
}

impl<T: FloatElement, const N: usize> Vector<T, N> {
    /// Lane-wise `1 / self`
    #[inline]
    pub fn recip(self) -> Self {
        Self::splat(T::ONE).div(self)
    }

    /// Lane-wise square root (NaN for negative lanes)
    #[inline]
    pub fn sqrt(self) -> Self {
        self.map(Float::sqrt)
    }

    /// Round to nearest, ties away from zero
    #[inline]
    pub fn round(self) -> Self {
        self.map(Float::round)
    }

    /// Round toward zero
    #[inline]
    pub fn trunc(self) -> Self {
        self.map(Float::trunc)
    }

    /// Round toward negative infinity
    #[inline]
    pub fn floor(self) -> Self {
        self.map(Float::floor)
    }

    /// Round toward positive infinity
    #[inline]
    pub fn ceil(self) -> Self {
        self.map(Float::ceil)
    }

    predicated! {
        recip, recip_masked, assign_recip, assign_recip_masked ();
        sqrt, sqrt_masked, assign_sqrt, assign_sqrt_masked ();
        round, round_masked, assign_round, assign_round_masked ();
        trunc, trunc_masked, assign_trunc, assign_trunc_masked ();
        floor, floor_masked, assign_floor, assign_floor_masked ();
        ceil, ceil_masked, assign_ceil, assign_ceil_masked ();
    }
}

impl<T: IntElement, const N: usize> Vector<T, N> {
    /// Lane-wise bitwise AND
    #[inline]
    pub fn bitand(self, rhs: impl Into<Self>) -> Self {
        self.zip_map(rhs.into(), |a, b| a & b)
    }

    /// Lane-wise bitwise OR
    #[inline]
    pub fn bitor(self, rhs: impl Into<Self>) -> Self {
        self.zip_map(rhs.into(), |a, b| a | b)
    }

    /// Lane-wise bitwise XOR
    #[inline]
    pub fn bitxor(self, rhs: impl Into<Self>) -> Self {
        self.zip_map(rhs.into(), |a, b| a ^ b)
    }

    /// Lane-wise bitwise NOT
    #[inline]
    pub fn not(self) -> Self {
        self.map(|x| !x)
    }

    /// Shift every lane left by `count % BITS`
    #[inline]
    pub fn shl(self, count: u32) -> Self {
        self.map(|x| x.wrapping_shl(count))
    }

    /// Shift every lane right by `count % BITS` (arithmetic for signed lanes)
    #[inline]
    pub fn shr(self, count: u32) -> Self {
        self.map(|x| x.wrapping_shr(count))
    }

    /// Rotate lane `i` left by `counts[i] % BITS`
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::Vector;
    ///
    /// let v = Vector::from_array([0x81u8, 0x01]);
    /// assert_eq!(v.rotate_left([1u32, 9]).to_array(), [0x03, 0x02]);
    /// ```
    #[inline]
    pub fn rotate_left(self, counts: impl Into<IndexVector<N>>) -> Self {
        let counts = counts.into();
        Self::from_fn(|i| self.lanes[i].rotate_left(counts.lanes[i] % T::BITS))
    }

    /// Rotate lane `i` right by `counts[i] % BITS`
    #[inline]
    pub fn rotate_right(self, counts: impl Into<IndexVector<N>>) -> Self {
        let counts = counts.into();
        Self::from_fn(|i| self.lanes[i].rotate_right(counts.lanes[i] % T::BITS))
    }

    predicated! {
        bitand, bitand_masked, assign_bitand, assign_bitand_masked (rhs: impl Into<Self>);
        bitor, bitor_masked, assign_bitor, assign_bitor_masked (rhs: impl Into<Self>);
        bitxor, bitxor_masked, assign_bitxor, assign_bitxor_masked (rhs: impl Into<Self>);
        not, not_masked, assign_not, assign_not_masked ();
        shl, shl_masked, assign_shl, assign_shl_masked (count: u32);
        shr, shr_masked, assign_shr, assign_shr_masked (count: u32);
        rotate_left, rotate_left_masked, assign_rotate_left, assign_rotate_left_masked (counts: impl Into<IndexVector<N>>);
        rotate_right, rotate_right_masked, assign_rotate_right, assign_rotate_right_masked (counts: impl Into<IndexVector<N>>);
    }
}

macro_rules! impl_binary_operators {
    ($bound:ident: $($trait:ident::$method:ident, $assign_trait:ident::$assign_method:ident => $op:ident;)*) => {$(
        impl<T: $bound, const N: usize, R: Into<Vector<T, N>>> $trait<R> for Vector<T, N> {
            type Output = Self;

            #[inline]
            fn $method(self, rhs: R) -> Self {
                Vector::$op(self, rhs)
            }
        }

        impl<T: $bound, const N: usize, R: Into<Vector<T, N>>> $assign_trait<R> for Vector<T, N> {
            #[inline]
            fn $assign_method(&mut self, rhs: R) {
                *self = Vector::$op(*self, rhs);
            }
        }
    )*};
}

impl_binary_operators! {
    Element:
    Add::add, AddAssign::add_assign => add;
    Sub::sub, SubAssign::sub_assign => sub;
    Mul::mul, MulAssign::mul_assign => mul;
    Div::div, DivAssign::div_assign => div;
}

impl_binary_operators! {
    IntElement:
    BitAnd::bitand, BitAndAssign::bitand_assign => bitand;
    BitOr::bitor, BitOrAssign::bitor_assign => bitor;
    BitXor::bitxor, BitXorAssign::bitxor_assign => bitxor;
}

impl<T: Element, const N: usize> Neg for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Vector::neg(self)
    }
}

impl<T: IntElement, const N: usize> Not for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Vector::not(self)
    }
}

impl<T: IntElement, const N: usize> Shl<u32> for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn shl(self, count: u32) -> Self {
        Vector::shl(self, count)
    }
}

impl<T: IntElement, const N: usize> Shr<u32> for Vector<T, N> {
    type Output = Self;

    #[inline]
    fn shr(self, count: u32) -> Self {
        Vector::shr(self, count)
    }
}

impl<T: IntElement, const N: usize> ShlAssign<u32> for Vector<T, N> {
    #[inline]
    fn shl_assign(&mut self, count: u32) {
        self.assign_shl(count);
    }
}

impl<T: IntElement, const N: usize> ShrAssign<u32> for Vector<T, N> {
    #[inline]
    fn shr_assign(&mut self, count: u32) {
        self.assign_shr(count);
    }
}
