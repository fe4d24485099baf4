//! Conversion bridge
//!
//! - [`Promote`] / [`Degrade`]: one step wider or narrower within the same
//!   family (unsigned, signed, float), lane count fixed.
//! - [`SameWidth`] / [`SameWidthFloat`]: the integer and float types sharing a
//!   scalar's bit width, used by `to_int`, `to_uint` and `to_float`.
//! - [`Halves`] and the inherent `join`/`split_*` forms: split a vector or
//!   mask of any even width into its low and high halves and join them again.
//!
//! Every numeric conversion is Rust's `as`: integer narrowing keeps the low
//! bits, float to integer truncates toward zero and saturates (NaN becomes
//! `0`), and float narrowing rounds to nearest.

use num_traits::AsPrimitive;

use crate::element::{Element, FloatElement, IntElement};
use crate::mask::Mask;
use crate::vector::Vector;

/// Scalars with a wider type of the same family
pub trait Promote: Element {
    /// Next wider type (`u8` to `u16`, `f32` to `f64`, ...)
    type Wide: Element;

    /// Lossless lane widening.
    fn promote_lane(self) -> Self::Wide;
}

/// Scalars with a narrower type of the same family
pub trait Degrade: Element {
    /// Next narrower type (`u16` to `u8`, `f64` to `f32`, ...)
    type Narrow: Element;

    /// Lane narrowing with `as` semantics.
    fn degrade_lane(self) -> Self::Narrow;
}

/// Signed and unsigned integers of the same bit width
pub trait SameWidth: Element {
    /// Signed integer of the same width
    type Int: IntElement;
    /// Unsigned integer of the same width
    type Uint: IntElement;

    /// `self as Self::Int`
    fn to_int_lane(self) -> Self::Int;
    /// `self as Self::Uint`
    fn to_uint_lane(self) -> Self::Uint;
}

/// Scalars whose width matches a float type (32 and 64 bits)
pub trait SameWidthFloat: SameWidth {
    /// Float of the same width
    type Float: FloatElement;

    /// `self as Self::Float`
    fn to_float_lane(self) -> Self::Float;
}

macro_rules! impl_promote {
    ($($narrow:ty => $wide:ty),* $(,)?) => {$(
        impl Promote for $narrow {
            type Wide = $wide;

            #[inline(always)]
            fn promote_lane(self) -> $wide {
                self as $wide
            }
        }

        impl Degrade for $wide {
            type Narrow = $narrow;

            #[inline(always)]
            fn degrade_lane(self) -> $narrow {
                self as $narrow
            }
        }
    )*};
}

impl_promote!(
    u8 => u16, u16 => u32, u32 => u64,
    i8 => i16, i16 => i32, i32 => i64,
    f32 => f64,
);

macro_rules! impl_same_width {
    ($($t:ty => $int:ty, $uint:ty $(, $float:ty)?);* $(;)?) => {$(
        impl SameWidth for $t {
            type Int = $int;
            type Uint = $uint;

            #[inline(always)]
            fn to_int_lane(self) -> $int {
                self as $int
            }
            #[inline(always)]
            fn to_uint_lane(self) -> $uint {
                self as $uint
            }
        }

        $(
            impl SameWidthFloat for $t {
                type Float = $float;

                #[inline(always)]
                fn to_float_lane(self) -> $float {
                    self as $float
                }
            }
        )?
    )*};
}

impl_same_width! {
    u8 => i8, u8;
    i8 => i8, u8;
    u16 => i16, u16;
    i16 => i16, u16;
    u32 => i32, u32, f32;
    i32 => i32, u32, f32;
    f32 => i32, u32, f32;
    u64 => i64, u64, f64;
    i64 => i64, u64, f64;
    f64 => i64, u64, f64;
}

impl<T: Element, const N: usize> Vector<T, N> {
    /// Numeric `as` conversion of every lane to `U`
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::F32x4;
    ///
    /// let v = F32x4::from_array([1.9, -1.9, 300.0, f32::NAN]);
    /// assert_eq!(v.cast::<u8>().to_array(), [1, 0, 255, 0]);
    /// ```
    #[inline]
    pub fn cast<U: Element>(self) -> Vector<U, N>
    where
        T: AsPrimitive<U>,
    {
        Vector::from_fn(|i| self.lanes[i].as_())
    }
}

impl<T: Promote, const N: usize> Vector<T, N> {
    /// Widen every lane to `T::Wide`; never loses information
    #[inline]
    pub fn promote(self) -> Vector<T::Wide, N> {
        Vector::from_fn(|i| self.lanes[i].promote_lane())
    }
}

impl<T: Degrade, const N: usize> Vector<T, N> {
    /// Narrow every lane to `T::Narrow`
    ///
    /// Integers keep their low bits; `f64` rounds to the nearest `f32`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::Vector;
    ///
    /// let v = Vector::from_array([1u16, 256, 511]);
    /// assert_eq!(v.degrade().to_array(), [1u8, 0, 255]);
    /// ```
    #[inline]
    pub fn degrade(self) -> Vector<T::Narrow, N> {
        Vector::from_fn(|i| self.lanes[i].degrade_lane())
    }
}

impl<T: SameWidth, const N: usize> Vector<T, N> {
    /// Convert to the signed integer type of the same width
    #[inline]
    pub fn to_int(self) -> Vector<T::Int, N> {
        Vector::from_fn(|i| self.lanes[i].to_int_lane())
    }

    /// Convert to the unsigned integer type of the same width
    #[inline]
    pub fn to_uint(self) -> Vector<T::Uint, N> {
        Vector::from_fn(|i| self.lanes[i].to_uint_lane())
    }
}

impl<T: SameWidthFloat, const N: usize> Vector<T, N> {
    /// Convert to the float type of the same width
    #[inline]
    pub fn to_float(self) -> Vector<T::Float, N> {
        Vector::from_fn(|i| self.lanes[i].to_float_lane())
    }
}

impl<T: FloatElement, const N: usize> Vector<T, N> {
    /// Raw IEEE-754 bit pattern of every lane
    #[inline]
    pub fn to_bits(self) -> Vector<T::Bits, N> {
        Vector::from_fn(|i| self.lanes[i].to_bits_lane())
    }

    /// Float vector from raw IEEE-754 bit patterns
    #[inline]
    pub fn from_bits(bits: Vector<T::Bits, N>) -> Self {
        Self::from_fn(|i| T::from_bits_lane(bits.lanes[i]))
    }
}

/// Compile-time proof that `H` is exactly half of `N`
struct HalfOf<const N: usize, const H: usize>;

impl<const N: usize, const H: usize> HalfOf<N, H> {
    const CHECK: () = assert!(2 * H == N, "half width must be exactly N / 2");
}

impl<T: Element, const N: usize> Vector<T, N> {
    /// Join `lo` (lanes `0..H`) and `hi` (lanes `H..N`); any even `N`
    ///
    /// `H` must equal `N / 2`; any other width fails to build.
    ///
    /// # Examples
    ///
    /// ```
    /// use lanewise::Vector;
    ///
    /// let v = Vector::<u8, 6>::join::<3>(Vector::splat(1), Vector::splat(2));
    /// assert_eq!(v.to_array(), [1, 1, 1, 2, 2, 2]);
    /// assert_eq!(v.split_hi::<3>().to_array(), [2, 2, 2]);
    /// ```
    ///
    /// ```compile_fail
    /// use lanewise::Vector;
    ///
    /// let _ = Vector::<f32, 6>::zero().split_lo::<2>();
    /// ```
    #[inline]
    pub fn join<const H: usize>(lo: Vector<T, H>, hi: Vector<T, H>) -> Self {
        let () = HalfOf::<N, H>::CHECK;
        Self::from_fn(|i| if i < H { lo.lanes[i] } else { hi.lanes[i - H] })
    }

    /// Lanes `0..H` where `H == N / 2`
    #[inline]
    pub fn split_lo<const H: usize>(self) -> Vector<T, H> {
        let () = HalfOf::<N, H>::CHECK;
        Vector::from_fn(|i| self.lanes[i])
    }

    /// Lanes `H..N` where `H == N / 2`
    #[inline]
    pub fn split_hi<const H: usize>(self) -> Vector<T, H> {
        let () = HalfOf::<N, H>::CHECK;
        Vector::from_fn(|i| self.lanes[i + H])
    }

    /// `(split_lo, split_hi)`
    #[inline]
    pub fn split<const H: usize>(self) -> (Vector<T, H>, Vector<T, H>) {
        (self.split_lo(), self.split_hi())
    }

    /// Replace lanes `0..H`, keep the high half
    #[inline]
    pub fn join_lo<const H: usize>(self, lo: Vector<T, H>) -> Self {
        Self::join(lo, self.split_hi())
    }

    /// Replace lanes `H..N`, keep the low half
    #[inline]
    pub fn join_hi<const H: usize>(self, hi: Vector<T, H>) -> Self {
        Self::join(self.split_lo(), hi)
    }
}

impl<const N: usize> Mask<N> {
    /// Join `lo` (lanes `0..H`) and `hi` (lanes `H..N`); any even `N`
    #[inline]
    pub fn join<const H: usize>(lo: Mask<H>, hi: Mask<H>) -> Self {
        let () = HalfOf::<N, H>::CHECK;
        Self::from_fn(|i| if i < H { lo.test(i) } else { hi.test(i - H) })
    }

    /// Lanes `0..H` where `H == N / 2`
    #[inline]
    pub fn split_lo<const H: usize>(self) -> Mask<H> {
        let () = HalfOf::<N, H>::CHECK;
        Mask::from_fn(|i| self.test(i))
    }

    /// Lanes `H..N` where `H == N / 2`
    #[inline]
    pub fn split_hi<const H: usize>(self) -> Mask<H> {
        let () = HalfOf::<N, H>::CHECK;
        Mask::from_fn(|i| self.test(i + H))
    }

    /// `(split_lo, split_hi)`
    #[inline]
    pub fn split<const H: usize>(self) -> (Mask<H>, Mask<H>) {
        (self.split_lo(), self.split_hi())
    }
}

/// Split into and join from two half-width values
///
/// Lane `i` of the low half is lane `i` of the whole; lane `i` of the high
/// half is lane `i + N/2`. For every `v`:
/// `Self::pack(v.unpack_lo(), v.unpack_hi()) == v`.
///
/// Implemented for the register-shaped widths (2 to 64 lanes), where the
/// half type is inferred. Other even widths use the inherent
/// `join`/`split_lo`/`split_hi` forms with an explicit half width.
///
/// # Examples
///
/// ```
/// use lanewise::{F32x4, F32x8, Halves};
///
/// let lo = F32x4::splat(1.0);
/// let hi = F32x4::splat(2.0);
/// let v = F32x8::pack(lo, hi);
/// assert_eq!(v.unpack_hi(), hi);
/// assert_eq!(v.pack_lo(hi).unpack(), (hi, hi));
/// ```
pub trait Halves: Copy {
    /// Half-width counterpart
    type Half: Copy;

    /// Join `lo` (lanes `0..N/2`) and `hi` (lanes `N/2..N`)
    fn pack(lo: Self::Half, hi: Self::Half) -> Self;

    /// Low half lanes
    fn unpack_lo(self) -> Self::Half;

    /// High half lanes
    fn unpack_hi(self) -> Self::Half;

    /// Replace the low half, keep the high half
    #[inline]
    fn pack_lo(self, lo: Self::Half) -> Self {
        Self::pack(lo, self.unpack_hi())
    }

    /// Replace the high half, keep the low half
    #[inline]
    fn pack_hi(self, hi: Self::Half) -> Self {
        Self::pack(self.unpack_lo(), hi)
    }

    /// `(unpack_lo, unpack_hi)`
    #[inline]
    fn unpack(self) -> (Self::Half, Self::Half) {
        (self.unpack_lo(), self.unpack_hi())
    }
}

macro_rules! impl_halves {
    ($($n:literal => $h:literal),* $(,)?) => {$(
        impl<T: Element> Halves for Vector<T, $n> {
            type Half = Vector<T, $h>;

            #[inline]
            fn pack(lo: Self::Half, hi: Self::Half) -> Self {
                Self::join(lo, hi)
            }
            #[inline]
            fn unpack_lo(self) -> Self::Half {
                self.split_lo()
            }
            #[inline]
            fn unpack_hi(self) -> Self::Half {
                self.split_hi()
            }
        }

        impl Halves for Mask<$n> {
            type Half = Mask<$h>;

            #[inline]
            fn pack(lo: Self::Half, hi: Self::Half) -> Self {
                Self::join(lo, hi)
            }
            #[inline]
            fn unpack_lo(self) -> Self::Half {
                self.split_lo()
            }
            #[inline]
            fn unpack_hi(self) -> Self::Half {
                self.split_hi()
            }
        }
    )*};
}

impl_halves!(2 => 1, 4 => 2, 8 => 4, 16 => 8, 32 => 16, 64 => 32);
