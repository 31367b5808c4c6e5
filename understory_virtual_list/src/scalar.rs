// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scalar abstraction for extents, offsets, and scroll positions.

use core::fmt::Debug;
use core::ops::{Add, Div, Mul, Sub};

/// A floating-point scalar used for extents and offsets.
///
/// Implemented for `f32` and `f64`. Values are expected to be finite; NaNs are
/// a caller error and are caught by debug assertions where extents enter the
/// crate.
pub trait Scalar:
    Copy
    + Debug
    + PartialEq
    + PartialOrd
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
{
    /// The additive identity.
    fn zero() -> Self;

    /// Converts an index or count into this scalar type.
    fn from_usize(value: usize) -> Self;

    /// Returns `true` if the value is neither infinite nor NaN.
    fn is_finite(self) -> bool;

    /// Returns `true` if the sign bit is set (including `-0.0`).
    fn is_sign_negative(self) -> bool;

    /// Rounds toward negative infinity and converts to `isize`.
    ///
    /// Out-of-range values saturate.
    fn floor_to_isize(self) -> isize;

    /// Returns the larger of `self` and `other`.
    #[must_use]
    fn max(self, other: Self) -> Self {
        if other > self { other } else { self }
    }

    /// Returns the smaller of `self` and `other`.
    #[must_use]
    fn min(self, other: Self) -> Self {
        if other < self { other } else { self }
    }
}

macro_rules! impl_scalar {
    ($ty:ty) => {
        impl Scalar for $ty {
            fn zero() -> Self {
                0.0
            }

            #[allow(
                clippy::cast_precision_loss,
                reason = "Item counts beyond the mantissa are far outside any scrollable extent"
            )]
            fn from_usize(value: usize) -> Self {
                value as Self
            }

            fn is_finite(self) -> bool {
                <$ty>::is_finite(self)
            }

            fn is_sign_negative(self) -> bool {
                <$ty>::is_sign_negative(self)
            }

            #[allow(
                clippy::cast_possible_truncation,
                reason = "Float to int casts saturate; callers clamp the result"
            )]
            fn floor_to_isize(self) -> isize {
                let truncated = self as isize;
                // `as` truncates toward zero; step down for negative fractions.
                if (truncated as Self) > self {
                    truncated.saturating_sub(1)
                } else {
                    truncated
                }
            }
        }
    };
}

impl_scalar!(f32);
impl_scalar!(f64);

#[cfg(test)]
mod tests {
    use super::Scalar;

    #[test]
    fn floor_rounds_toward_negative_infinity() {
        assert_eq!(2.7_f32.floor_to_isize(), 2);
        assert_eq!(2.0_f64.floor_to_isize(), 2);
        assert_eq!((-0.5_f64).floor_to_isize(), -1);
        assert_eq!((-2.0_f32).floor_to_isize(), -2);
    }

    #[test]
    fn max_and_min_pick_expected_side() {
        assert_eq!(Scalar::max(3.0_f32, 5.0), 5.0);
        assert_eq!(Scalar::min(3.0_f64, 5.0), 3.0);
        assert_eq!(<f64 as Scalar>::from_usize(40), 40.0);
    }
}
