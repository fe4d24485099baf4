//! Scalar element types a lane vector can carry
//!
//! Every supported scalar implements [`Element`], which fixes two things:
//! the per-lane arithmetic rules (the reference semantics every backend
//! reproduces) and `Kernels`, the kernel set the build binds that type to.
//!
//! Integer lanes wrap on overflow, matching what the hardware lanes do.
//! Integer division by zero panics, which is Rust's native scalar behaviour.
//! Float lanes follow IEEE-754 unchanged.

use core::fmt::Debug;

use num_traits::{Float, PrimInt, WrappingShl, WrappingShr};

use crate::backends::LaneKernels;
use crate::dispatch;

mod sealed {
    pub trait Sealed {}
}

/// A scalar type usable as a vector lane.
///
/// Sealed: implemented for `u8 u16 u32 u64 i8 i16 i32 i64 f32 f64`.
pub trait Element:
    sealed::Sealed + Copy + Debug + Default + PartialEq + PartialOrd + Send + Sync + 'static
{
    /// Kernel set this build binds the type to (see [`crate::dispatch`]).
    type Kernels: LaneKernels<Self>;

    /// Additive identity.
    const ZERO: Self;
    /// Multiplicative identity.
    const ONE: Self;
    /// Smallest representable value (`-inf` for floats).
    ///
    /// Neutral element when reducing for a maximum.
    const MIN: Self;
    /// Largest representable value (`+inf` for floats).
    ///
    /// Neutral element when reducing for a minimum.
    const MAX: Self;

    /// Lane addition (wrapping for integers).
    fn lane_add(self, rhs: Self) -> Self;
    /// Lane subtraction (wrapping for integers).
    fn lane_sub(self, rhs: Self) -> Self;
    /// Lane multiplication (wrapping for integers).
    fn lane_mul(self, rhs: Self) -> Self;
    /// Lane division.
    ///
    /// # Panics
    ///
    /// Integer lanes panic on a zero divisor.
    fn lane_div(self, rhs: Self) -> Self;
    /// Lane negation (two's complement for integers).
    fn lane_neg(self) -> Self;
    /// Lane absolute value (`MIN` maps to itself for signed integers).
    fn lane_abs(self) -> Self;
    /// Addition clamped to `[MIN, MAX]`.
    fn lane_saturating_add(self, rhs: Self) -> Self;
    /// Subtraction clamped to `[MIN, MAX]`.
    fn lane_saturating_sub(self, rhs: Self) -> Self;

    /// `self < rhs ? self : rhs`, so a NaN on either side yields `rhs`.
    #[inline(always)]
    fn lane_min(self, rhs: Self) -> Self {
        if self < rhs {
            self
        } else {
            rhs
        }
    }

    /// `self > rhs ? self : rhs`, so a NaN on either side yields `rhs`.
    #[inline(always)]
    fn lane_max(self, rhs: Self) -> Self {
        if self > rhs {
            self
        } else {
            rhs
        }
    }

    /// Unfused `self * b + c`.
    #[inline(always)]
    fn lane_mul_add(self, b: Self, c: Self) -> Self {
        self.lane_mul(b).lane_add(c)
    }
}

/// Integer lanes: bitwise logic, shifts and rotates.
pub trait IntElement: Element + Eq + Ord + core::hash::Hash + PrimInt + WrappingShl + WrappingShr {
    /// Width of the type in bits.
    const BITS: u32;
    /// Every bit set; identity of a horizontal AND.
    const ALL_ONES: Self;
}

/// Floating-point lanes.
pub trait FloatElement: Element + Float {
    /// Unsigned integer of the same width, carrying the raw bit pattern.
    type Bits: IntElement;

    /// Raw IEEE-754 bit pattern.
    fn to_bits_lane(self) -> Self::Bits;
    /// Float from a raw IEEE-754 bit pattern.
    fn from_bits_lane(bits: Self::Bits) -> Self;
}

macro_rules! impl_int_element {
    (@common $t:ty) => {
        impl sealed::Sealed for $t {}

        impl IntElement for $t {
            const BITS: u32 = <$t>::BITS;
            const ALL_ONES: Self = !0;
        }
    };
    (@arith $t:ty, $kernels:ty, |$x:ident| $abs:expr) => {
        impl Element for $t {
            type Kernels = $kernels;

            const ZERO: Self = 0;
            const ONE: Self = 1;
            const MIN: Self = <$t>::MIN;
            const MAX: Self = <$t>::MAX;

            #[inline(always)]
            fn lane_add(self, rhs: Self) -> Self {
                self.wrapping_add(rhs)
            }
            #[inline(always)]
            fn lane_sub(self, rhs: Self) -> Self {
                self.wrapping_sub(rhs)
            }
            #[inline(always)]
            fn lane_mul(self, rhs: Self) -> Self {
                self.wrapping_mul(rhs)
            }
            #[inline(always)]
            fn lane_div(self, rhs: Self) -> Self {
                self.wrapping_div(rhs)
            }
            #[inline(always)]
            fn lane_neg(self) -> Self {
                self.wrapping_neg()
            }
            #[inline(always)]
            fn lane_abs(self) -> Self {
                let $x = self;
                $abs
            }
            #[inline(always)]
            fn lane_saturating_add(self, rhs: Self) -> Self {
                self.saturating_add(rhs)
            }
            #[inline(always)]
            fn lane_saturating_sub(self, rhs: Self) -> Self {
                self.saturating_sub(rhs)
            }
        }
    };
    (signed: $($t:ty => $kernels:ty),* $(,)?) => {$(
        impl_int_element!(@common $t);
        impl_int_element!(@arith $t, $kernels, |x| x.wrapping_abs());
    )*};
    (unsigned: $($t:ty => $kernels:ty),* $(,)?) => {$(
        impl_int_element!(@common $t);
        impl_int_element!(@arith $t, $kernels, |x| x);
    )*};
}

macro_rules! impl_float_element {
    ($($t:ty, $bits:ty => $kernels:ty);* $(;)?) => {$(
        impl sealed::Sealed for $t {}

        impl Element for $t {
            type Kernels = $kernels;

            const ZERO: Self = 0.0;
            const ONE: Self = 1.0;
            const MIN: Self = <$t>::NEG_INFINITY;
            const MAX: Self = <$t>::INFINITY;

            #[inline(always)]
            fn lane_add(self, rhs: Self) -> Self {
                self + rhs
            }
            #[inline(always)]
            fn lane_sub(self, rhs: Self) -> Self {
                self - rhs
            }
            #[inline(always)]
            fn lane_mul(self, rhs: Self) -> Self {
                self * rhs
            }
            #[inline(always)]
            fn lane_div(self, rhs: Self) -> Self {
                self / rhs
            }
            #[inline(always)]
            fn lane_neg(self) -> Self {
                -self
            }
            #[inline(always)]
            fn lane_abs(self) -> Self {
                <$t>::abs(self)
            }
            // Floats already saturate to +-inf.
            #[inline(always)]
            fn lane_saturating_add(self, rhs: Self) -> Self {
                self + rhs
            }
            #[inline(always)]
            fn lane_saturating_sub(self, rhs: Self) -> Self {
                self - rhs
            }
        }

        impl FloatElement for $t {
            type Bits = $bits;

            #[inline(always)]
            fn to_bits_lane(self) -> $bits {
                <$t>::to_bits(self)
            }
            #[inline(always)]
            fn from_bits_lane(bits: $bits) -> Self {
                <$t>::from_bits(bits)
            }
        }
    )*};
}

impl_int_element!(unsigned:
    u8 => dispatch::ScalarKernels,
    u16 => dispatch::ScalarKernels,
    u32 => dispatch::U32Kernels,
    u64 => dispatch::ScalarKernels,
);

impl_int_element!(signed:
    i8 => dispatch::ScalarKernels,
    i16 => dispatch::ScalarKernels,
    i32 => dispatch::I32Kernels,
    i64 => dispatch::ScalarKernels,
);

impl_float_element!(
    f32, u32 => dispatch::F32Kernels;
    f64, u64 => dispatch::F64Kernels;
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_arithmetic_wraps() {
        assert_eq!(u8::MAX.lane_add(1), 0);
        assert_eq!(0u8.lane_sub(1), u8::MAX);
        assert_eq!(i32::MAX.lane_add(1), i32::MIN);
        assert_eq!(i16::MIN.lane_neg(), i16::MIN);
        assert_eq!(200u8.lane_mul(2), 144);
    }

    #[test]
    fn test_saturating_clamps_to_range() {
        assert_eq!(250u8.lane_saturating_add(10), u8::MAX);
        assert_eq!(5u8.lane_saturating_sub(10), 0);
        assert_eq!(i8::MIN.lane_saturating_sub(1), i8::MIN);
        assert_eq!(i8::MAX.lane_saturating_add(1), i8::MAX);
    }

    #[test]
    fn test_abs_per_signedness() {
        assert_eq!((-5i32).lane_abs(), 5);
        assert_eq!(i32::MIN.lane_abs(), i32::MIN);
        assert_eq!(7u32.lane_abs(), 7);
        assert_eq!((-2.5f64).lane_abs(), 2.5);
    }

    #[test]
    fn test_float_bounds_are_infinities() {
        assert_eq!(<f32 as Element>::MIN, f32::NEG_INFINITY);
        assert_eq!(<f64 as Element>::MAX, f64::INFINITY);
    }

    #[test]
    fn test_min_max_nan_rule() {
        // A NaN on either side selects the right-hand operand.
        assert_eq!(f32::NAN.lane_min(1.0), 1.0);
        assert!(1.0f32.lane_min(f32::NAN).is_nan());
        assert_eq!(f32::NAN.lane_max(1.0), 1.0);
        assert!(1.0f32.lane_max(f32::NAN).is_nan());
    }

    #[test]
    fn test_float_division_by_zero_is_ieee() {
        assert_eq!(1.0f32.lane_div(0.0), f32::INFINITY);
        assert!(0.0f64.lane_div(0.0).is_nan());
    }

    #[test]
    #[should_panic]
    fn test_integer_division_by_zero_panics() {
        let zero = std::hint::black_box(0i32);
        let _ = 1i32.lane_div(zero);
    }

    #[test]
    fn test_bits_round_trip() {
        let x = -1.5f32;
        assert_eq!(f32::from_bits_lane(x.to_bits_lane()), x);
        assert_eq!(1.0f64.to_bits_lane(), 0x3FF0_0000_0000_0000);
    }

    #[test]
    fn test_all_ones() {
        assert_eq!(<u16 as IntElement>::ALL_ONES, u16::MAX);
        assert_eq!(<i32 as IntElement>::ALL_ONES, -1);
    }
}
