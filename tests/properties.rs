//! Property-based laws of the lane algebra
//!
//! - masked operations leave unselected lanes bit-identical
//! - masked reductions over an empty mask yield the identity element
//! - pack/unpack and promote/degrade round trips
//! - lowest-index tie-break for imin/imax

use lanewise::{Halves, Mask, Vector};
use proptest::prelude::*;

const PROPTEST_CASES: u32 = 100;

fn bits_of(v: Vector<f32, 8>) -> [u32; 8] {
    v.to_bits().to_array()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(PROPTEST_CASES))]

    /// Every masked float op keeps unselected lanes bit-identical
    #[test]
    fn masked_float_ops_keep_unselected_lanes(
        a in prop::array::uniform8(any::<f32>()),
        b in prop::array::uniform8(any::<f32>()),
        m in prop::array::uniform8(any::<bool>()),
    ) {
        let v = Vector::from_array(a);
        let w = Vector::from_array(b);
        let mask = Mask::from_array(m);

        let results = [
            v.add_masked(mask, w),
            v.sub_masked(mask, w),
            v.sub_from_masked(mask, w),
            v.mul_masked(mask, w),
            v.div_masked(mask, w),
            v.min_masked(mask, w),
            v.max_masked(mask, w),
            v.neg_masked(mask),
            v.abs_masked(mask),
            v.sqrt_masked(mask),
            v.recip_masked(mask),
            v.floor_masked(mask),
            v.mul_add_masked(mask, w, v),
            v.sub_mul_masked(mask, w, 2.0f32),
        ];

        let before = bits_of(v);
        for r in results {
            let after = bits_of(r);
            for i in 0..8 {
                if !m[i] {
                    prop_assert_eq!(after[i], before[i]);
                }
            }
        }
    }

    /// Integer masked ops, including division by zero in unselected lanes
    #[test]
    fn masked_integer_ops_keep_unselected_lanes(
        a in prop::array::uniform8(any::<i32>()),
        b in prop::array::uniform8(any::<i32>()),
        m in prop::array::uniform8(any::<bool>()),
        count in 0u32..40,
    ) {
        let v = Vector::from_array(a);
        let w = Vector::from_array(b);
        let mask = Mask::from_array(m);

        // Only selected divisors need to be non-zero.
        let safe = w.blend(mask & w.cmp_eq(0i32), 1i32);

        let results = [
            v.add_masked(mask, w),
            v.mul_masked(mask, w),
            v.div_masked(mask, safe),
            v.saturating_sub_masked(mask, w),
            v.bitxor_masked(mask, w),
            v.not_masked(mask),
            v.shl_masked(mask, count),
            v.rotate_right_masked(mask, count),
        ];

        for r in results {
            for i in 0..8 {
                if !m[i] {
                    prop_assert_eq!(r[i], a[i]);
                }
            }
        }

        let mut inc = v;
        inc.pre_inc_masked(mask);
        prop_assert_eq!(inc, v.blend(mask, v + 1i32));
    }

    /// Masked loads keep the receiver; masked stores leave memory alone
    #[test]
    fn masked_memory_keeps_unselected(
        a in prop::array::uniform16(any::<u16>()),
        mem in prop::array::uniform16(any::<u16>()),
        m in prop::array::uniform16(any::<bool>()),
    ) {
        let v = Vector::from_array(a);
        let mask = Mask::from_array(m);

        let loaded = v.load_masked(mask, &mem);
        let mut stored = mem;
        v.store_masked(mask, &mut stored);

        for i in 0..16 {
            prop_assert_eq!(loaded[i], if m[i] { mem[i] } else { a[i] });
            prop_assert_eq!(stored[i], if m[i] { a[i] } else { mem[i] });
        }
    }

    /// Empty-mask reductions return the identity element
    #[test]
    fn empty_mask_reductions_are_identities(
        a in prop::array::uniform8(any::<u64>()),
        f in prop::array::uniform4(any::<f64>()),
    ) {
        let v = Vector::from_array(a);
        let none = Mask::<8>::FALSE;
        prop_assert_eq!(v.hadd_masked(none), 0);
        prop_assert_eq!(v.hmul_masked(none), 1);
        prop_assert_eq!(v.hand_masked(none), u64::MAX);
        prop_assert_eq!(v.hor_masked(none), 0);
        prop_assert_eq!(v.hxor_masked(none), 0);
        prop_assert_eq!(v.hmin_masked(none), u64::MAX);
        prop_assert_eq!(v.hmax_masked(none), u64::MIN);

        let w = Vector::from_array(f);
        let none = Mask::<4>::FALSE;
        prop_assert_eq!(w.hadd_masked(none), 0.0);
        prop_assert_eq!(w.hmul_masked(none), 1.0);
        prop_assert_eq!(w.hmin_masked(none), f64::INFINITY);
        prop_assert_eq!(w.hmax_masked(none), f64::NEG_INFINITY);
    }

    /// Full-mask reductions equal the unmasked ones
    #[test]
    fn full_mask_reductions_match_unmasked(a in prop::array::uniform16(any::<i8>())) {
        let v = Vector::from_array(a);
        prop_assert_eq!(v.hadd_masked(Mask::TRUE), v.hadd());
        prop_assert_eq!(v.hmul_masked(Mask::TRUE), v.hmul());
        prop_assert_eq!(v.hand_masked(Mask::TRUE), v.hand());
        prop_assert_eq!(v.imin_masked(Mask::TRUE), Some(v.imin()));
    }

    #[test]
    fn pack_unpack_round_trip(a in prop::array::uniform32(any::<u8>())) {
        let v = Vector::from_array(a);
        prop_assert_eq!(Vector::<u8, 32>::pack(v.unpack_lo(), v.unpack_hi()), v);

        let (lo, hi) = v.unpack();
        prop_assert_eq!(v.pack_lo(lo).pack_hi(hi), v);
    }

    /// Integer-valued floats survive promote then degrade
    #[test]
    fn promote_degrade_round_trip(a in prop::array::uniform8(-16_777_216i32..16_777_216)) {
        let v = Vector::from_array(a).to_float();
        prop_assert_eq!(v.promote().degrade(), v);

        let bytes = Vector::from_array(a).cast::<i8>();
        prop_assert_eq!(bytes.promote().degrade(), bytes);
    }

    /// imax/imin point at the lowest index holding the extreme value
    #[test]
    fn tie_break_lowest_index(a in prop::array::uniform8(0i32..3)) {
        let v = Vector::from_array(a);
        let hi = v.hmax();
        let lo = v.hmin();
        prop_assert_eq!(v.imax(), a.iter().position(|&x| x == hi).unwrap_or(0));
        prop_assert_eq!(v.imin(), a.iter().position(|&x| x == lo).unwrap_or(0));
        prop_assert_eq!(v.imax(), v.imax());
    }

    #[test]
    fn blend_select_duality(
        a in prop::array::uniform4(any::<i64>()),
        b in prop::array::uniform4(any::<i64>()),
        m in prop::array::uniform4(any::<bool>()),
    ) {
        let v = Vector::from_array(a);
        let w = Vector::from_array(b);
        let mask = Mask::from_array(m);
        prop_assert_eq!(v.blend(mask, w), mask.select(w, v));
        prop_assert_eq!(v.blend(mask, w).blend(!mask, v), v.blend(mask, w).blend(mask, w));
        prop_assert_eq!(v.blend(Mask::TRUE, w), w);
        prop_assert_eq!(v.blend(Mask::FALSE, w), v);
    }

    #[test]
    fn mask_algebra(a in prop::array::uniform16(any::<bool>()), b in prop::array::uniform16(any::<bool>())) {
        let x = Mask::from_array(a);
        let y = Mask::from_array(b);
        prop_assert_eq!(!(x & y), !x | !y);
        prop_assert_eq!(x.and_not(y), x & !y);
        prop_assert_eq!((x ^ y).count(), (x | y).count() - (x & y).count());
        prop_assert_eq!(x.parity(), x.count() % 2 == 1);
        prop_assert_eq!(x.any(), !x.none());
    }
}
