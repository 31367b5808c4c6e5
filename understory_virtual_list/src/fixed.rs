// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A simple extent model with uniform per-item extent.

use crate::{ExtentModel, Scalar};

/// An [`ExtentModel`] where all items share the same extent.
///
/// Every query is O(1), so this is the right choice for long strips of
/// fixed-height rows: no per-item table is ever materialized.
#[derive(Debug, Clone, Copy)]
pub struct FixedExtentModel<S: Scalar> {
    len: usize,
    extent: S,
}

impl<S: Scalar> FixedExtentModel<S> {
    /// Creates a model of `len` items, each `extent` long.
    ///
    /// Negative extents become zero.
    #[must_use]
    pub fn new(len: usize, extent: S) -> Self {
        Self {
            len,
            extent: non_negative(extent),
        }
    }

    /// Changes the item count.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
    }

    /// Changes the extent shared by every item.
    pub fn set_extent(&mut self, extent: S) {
        debug_assert!(
            extent.is_finite(),
            "item extent must be finite, got {extent:?}"
        );
        self.extent = non_negative(extent);
    }

    /// Returns the uniform extent for all items.
    #[must_use]
    pub const fn extent(&self) -> S {
        self.extent
    }
}

fn non_negative<S: Scalar>(extent: S) -> S {
    if extent.is_sign_negative() {
        S::zero()
    } else {
        extent
    }
}

impl<S: Scalar> ExtentModel for FixedExtentModel<S> {
    type Scalar = S;

    fn len(&self) -> usize {
        self.len
    }

    fn total_extent(&self) -> S {
        self.extent * S::from_usize(self.len)
    }

    fn extent_of(&self, index: usize) -> S {
        if index < self.len {
            self.extent
        } else {
            S::zero()
        }
    }

    fn offset_of(&self, index: usize) -> S {
        S::from_usize(index.min(self.len)) * self.extent
    }

    fn index_at_offset(&self, offset: S) -> usize {
        if self.len == 0 || offset < S::zero() {
            return 0;
        }
        if self.extent <= S::zero() {
            // Every item starts at zero.
            return self.len - 1;
        }
        let ratio = offset / self.extent;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Index is clamped to bounds immediately after the cast"
        )]
        let i = ratio.floor_to_isize();
        i.clamp(0, self.len as isize - 1) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::{ExtentModel, FixedExtentModel};

    #[test]
    fn basic_offsets_and_indices() {
        let model = FixedExtentModel::new(5, 10.0);
        assert_eq!(model.total_extent(), 50.0);
        assert_eq!(model.offset_of(0), 0.0);
        assert_eq!(model.offset_of(3), 30.0);
        assert_eq!(model.index_at_offset(0.0), 0);
        assert_eq!(model.index_at_offset(9.9), 0);
        assert_eq!(model.index_at_offset(10.0), 1);
        assert_eq!(model.index_at_offset(49.9), 4);
        assert_eq!(model.index_at_offset(100.0), 4);
    }

    #[test]
    fn negative_extents_are_clamped_to_zero() {
        let mut model = FixedExtentModel::new(3, -5.0);
        // Constructor clamps finite negatives to 0.
        assert_eq!(model.extent(), 0.0);

        model.set_extent(-10.0);
        assert_eq!(model.extent(), 0.0);
    }

    #[test]
    fn zero_extent_anchors_on_last_item() {
        let model = FixedExtentModel::new(4, 0.0_f64);
        assert_eq!(model.total_extent(), 0.0);
        assert_eq!(model.index_at_offset(0.0), 3);
        assert_eq!(model.index_at_offset(-1.0), 0);
    }

    #[test]
    fn out_of_range_indices_are_empty() {
        let model = FixedExtentModel::new(2, 10.0_f32);
        assert_eq!(model.extent_of(2), 0.0);
        assert_eq!(model.offset_of(7), 20.0);
    }
}
