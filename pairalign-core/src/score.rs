//! Numeric score types usable as matrix cells: plain integers and simd vectors of integers.

use std::fmt::Debug;
use std::ops::{Add, BitAnd, Sub};
use wide::{i16x16, i32x8, CmpEq, CmpGt};

/// A score value a dynamic-programming cell can hold.
///
/// For simd vectors every operation acts lane-wise.
pub trait Score: Copy + Default + Debug + Add<Output = Self> + Sub<Output = Self> {
    /// Lowest value of the underlying scalar, broadcast to every lane.
    fn lowest() -> Self;

    /// Half of [`Score::lowest`]: a minus-infinity that survives adding gap costs
    /// without wrapping.
    fn neg_infinity() -> Self;

    fn from_i32(value: i32) -> Self;

    /// Lane-wise maximum.
    fn max_score(self, other: Self) -> Self;
}

macro_rules! impl_scalar_score {
    ($($t:ty),*) => {$(
        impl Score for $t {
            #[inline]
            fn lowest() -> Self {
                <$t>::MIN
            }

            #[inline]
            fn neg_infinity() -> Self {
                <$t>::MIN / 2
            }

            #[inline]
            fn from_i32(value: i32) -> Self {
                value as $t
            }

            #[inline]
            fn max_score(self, other: Self) -> Self {
                Ord::max(self, other)
            }
        }
    )*};
}

impl_scalar_score!(i8, i16, i32, i64);

/// A simd vector of integer scores, one lane per alignment computed in lockstep.
pub trait SimdScore: Score + BitAnd<Output = Self> {
    type Scalar: Copy + Default + Debug + PartialOrd + Into<i64>;

    const LANES: usize;

    fn splat(value: Self::Scalar) -> Self;

    /// Builds a vector from `lanes`; missing trailing lanes are filled with `fill`.
    fn from_lanes(lanes: &[Self::Scalar], fill: Self::Scalar) -> Self;

    fn lane(self, index: usize) -> Self::Scalar;

    /// Converts an `i64` to the scalar type, `None` if it does not fit.
    fn scalar_from_i64(value: i64) -> Option<Self::Scalar>;

    /// All-ones lanes where `self == other`, zero lanes elsewhere.
    fn lanes_eq(self, other: Self) -> Self;

    /// All-ones lanes where `self > other`, zero lanes elsewhere.
    fn lanes_gt(self, other: Self) -> Self;

    /// Treating `self` as a mask, picks `if_true` on set lanes and `if_false` elsewhere.
    fn select(self, if_true: Self, if_false: Self) -> Self;

    /// Lane-wise exclusive or.
    fn xor(self, other: Self) -> Self;
}

macro_rules! impl_simd_score {
    ($v:ty, $s:ty, $lanes:expr) => {
        impl Score for $v {
            #[inline]
            fn lowest() -> Self {
                <$v>::splat(<$s>::MIN)
            }

            #[inline]
            fn neg_infinity() -> Self {
                <$v>::splat(<$s>::MIN / 2)
            }

            #[inline]
            fn from_i32(value: i32) -> Self {
                <$v>::splat(value as $s)
            }

            #[inline]
            fn max_score(self, other: Self) -> Self {
                self.max(other)
            }
        }

        impl SimdScore for $v {
            type Scalar = $s;

            const LANES: usize = $lanes;

            #[inline]
            fn splat(value: $s) -> Self {
                <$v>::splat(value)
            }

            fn from_lanes(lanes: &[$s], fill: $s) -> Self {
                debug_assert!(lanes.len() <= $lanes);
                let mut arr = [fill; $lanes];
                for (slot, &value) in arr.iter_mut().zip(lanes) {
                    *slot = value;
                }
                <$v>::from(arr)
            }

            #[inline]
            fn lane(self, index: usize) -> $s {
                self.to_array()[index]
            }

            fn scalar_from_i64(value: i64) -> Option<$s> {
                <$s>::try_from(value).ok()
            }

            #[inline]
            fn lanes_eq(self, other: Self) -> Self {
                self.cmp_eq(other)
            }

            #[inline]
            fn lanes_gt(self, other: Self) -> Self {
                self.cmp_gt(other)
            }

            #[inline]
            fn select(self, if_true: Self, if_false: Self) -> Self {
                self.blend(if_true, if_false)
            }

            #[inline]
            fn xor(self, other: Self) -> Self {
                self ^ other
            }
        }
    };
}

impl_simd_score!(i32x8, i32, 8);
impl_simd_score!(i16x16, i16, 16);
