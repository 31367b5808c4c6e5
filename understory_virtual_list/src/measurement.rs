// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An [`ExtentModel`] backed by a fully resolved prefix-offset table.

use alloc::vec::Vec;

use crate::{ExtentModel, Scalar};

/// An [`ExtentModel`] backed by per-item sizes and their prefix offsets.
///
/// The table is always either empty or fully resolved: it is built in one pass
/// from a count and a size function, and any change to either goes through
/// [`MeasurementTable::rebuild`] (or [`MeasurementTable::sync`]) rather than
/// patching individual entries. Building costs O(count); every query afterwards
/// is O(1), except [`ExtentModel::index_at_offset`] which is a binary search.
///
/// Each build remembers the revision key it was built for, so hosts can hand
/// in a cheap stamp (for example a counter bumped whenever column widths change)
/// instead of a freshly allocated description of every size.
#[derive(Clone, Default, Debug)]
pub struct MeasurementTable<S: Scalar> {
    sizes: Vec<S>,
    offsets: Vec<S>,
    total: S,
    key: Option<u64>,
}

impl<S: Scalar> MeasurementTable<S> {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sizes: Vec::new(),
            offsets: Vec::new(),
            total: S::zero(),
            key: None,
        }
    }

    /// Builds a table for `count` items, asking `size_of` for each index once.
    #[must_use]
    pub fn build(count: usize, size_of: impl FnMut(usize) -> S) -> Self {
        let mut table = Self::new();
        table.rebuild(count, size_of);
        table
    }

    /// Discards the current table and resolves `count` items from `size_of`.
    ///
    /// Sizes must be finite; debug builds assert this. Finite negative sizes
    /// are clamped to zero.
    pub fn rebuild(&mut self, count: usize, mut size_of: impl FnMut(usize) -> S) {
        self.sizes.clear();
        self.offsets.clear();
        self.sizes.reserve(count);
        self.offsets.reserve(count);
        self.key = None;

        let mut pos = S::zero();
        for index in 0..count {
            let mut size = size_of(index);
            debug_assert!(
                size.is_finite(),
                "MeasurementTable sizes must be finite; got {size:?} at index {index}"
            );
            if size.is_sign_negative() {
                size = S::zero();
            }
            self.offsets.push(pos);
            self.sizes.push(size);
            pos = pos + size;
        }
        self.total = pos;
        log::trace!("rebuilt measurement table: {count} items, total {pos:?}");
    }

    /// Rebuilds the table only if `count` or `key` differ from the last build.
    ///
    /// Returns `true` if a rebuild happened.
    pub fn sync(&mut self, count: usize, key: u64, size_of: impl FnMut(usize) -> S) -> bool {
        if self.key == Some(key) && self.sizes.len() == count {
            return false;
        }
        self.rebuild(count, size_of);
        self.key = Some(key);
        true
    }

    /// The revision key of the last [`MeasurementTable::sync`], if any.
    ///
    /// A plain [`MeasurementTable::rebuild`] clears the key.
    #[must_use]
    pub const fn key(&self) -> Option<u64> {
        self.key
    }

    /// Start offsets, one per item.
    #[must_use]
    pub fn offsets(&self) -> &[S] {
        &self.offsets
    }

    /// Resolved sizes, one per item.
    #[must_use]
    pub fn sizes(&self) -> &[S] {
        &self.sizes
    }

    /// Sum of all sizes.
    #[must_use]
    pub const fn total_size(&self) -> S {
        self.total
    }
}

impl<S: Scalar> ExtentModel for MeasurementTable<S> {
    type Scalar = S;

    fn len(&self) -> usize {
        self.sizes.len()
    }

    fn total_extent(&self) -> S {
        self.total
    }

    fn extent_of(&self, index: usize) -> S {
        self.sizes.get(index).copied().unwrap_or_else(S::zero)
    }

    fn offset_of(&self, index: usize) -> S {
        self.offsets.get(index).copied().unwrap_or(self.total)
    }

    fn index_at_offset(&self, offset: S) -> usize {
        // First index whose start lies beyond `offset`; the anchor is the one before it.
        self.offsets
            .partition_point(|&start| start <= offset)
            .saturating_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{ExtentModel, MeasurementTable};

    #[test]
    fn offsets_are_prefix_sums_of_sizes() {
        let sizes = [10.0_f32, 20.0, 0.0, 30.0, 5.5];
        let table = MeasurementTable::build(sizes.len(), |i| sizes[i]);

        assert_eq!(table.len(), 5);
        assert_eq!(table.offsets(), &[0.0, 10.0, 30.0, 30.0, 60.0]);
        assert_eq!(table.sizes(), &sizes);
        for i in 0..sizes.len() - 1 {
            assert_eq!(table.offsets()[i + 1] - table.offsets()[i], table.sizes()[i]);
        }
        assert_eq!(table.total_size(), sizes.iter().sum::<f32>());
        assert_eq!(table.total_extent(), 65.5);
    }

    #[test]
    fn empty_table_has_zero_extent() {
        let table = MeasurementTable::<f64>::build(0, |_| 40.0);
        assert!(table.is_empty());
        assert_eq!(table.total_size(), 0.0);
        assert_eq!(table.index_at_offset(100.0), 0);
    }

    #[test]
    fn anchor_lookup_takes_greatest_start_at_or_before_offset() {
        // Offsets [0, 10, 25, 25, 40]: index 2 is zero-sized.
        let sizes = [10.0_f64, 15.0, 0.0, 15.0, 10.0];
        let table = MeasurementTable::build(sizes.len(), |i| sizes[i]);
        assert_eq!(table.offsets(), &[0.0, 10.0, 25.0, 25.0, 40.0]);

        assert_eq!(table.index_at_offset(25.0), 3);
        assert_eq!(table.index_at_offset(0.0), 0);
        assert_eq!(table.index_at_offset(9.9), 0);
        assert_eq!(table.index_at_offset(10.0), 1);
        assert_eq!(table.index_at_offset(39.0), 3);
        assert_eq!(table.index_at_offset(1_000.0), 4);
        assert_eq!(table.index_at_offset(-5.0), 0);
    }

    #[test]
    fn negative_sizes_are_clamped_to_zero() {
        let table = MeasurementTable::build(2, |i| if i == 0 { -5.0_f32 } else { 5.0 });
        assert_eq!(table.extent_of(0), 0.0);
        assert_eq!(table.offset_of(1), 0.0);
        assert_eq!(table.total_size(), 5.0);
    }

    #[test]
    fn sync_rebuilds_only_on_new_key_or_count() {
        let mut widths = vec![100.0_f64, 150.0, 80.0];
        let mut table = MeasurementTable::new();
        let mut calls = 0;

        assert!(table.sync(widths.len(), 1, |i| {
            calls += 1;
            widths[i]
        }));
        assert_eq!(calls, 3);

        // Same key and count: the size source is not consulted again.
        assert!(!table.sync(widths.len(), 1, |i| {
            calls += 1;
            widths[i]
        }));
        assert_eq!(calls, 3);

        widths[1] = 200.0;
        assert!(table.sync(widths.len(), 2, |i| widths[i]));
        assert_eq!(table.total_size(), 380.0);
        assert_eq!(table.key(), Some(2));

        widths.push(20.0);
        assert!(table.sync(widths.len(), 2, |i| widths[i]));
        assert_eq!(table.total_size(), 400.0);

        let offsets: Vec<f64> = table.offsets().to_vec();
        assert_eq!(offsets, vec![0.0, 100.0, 300.0, 380.0]);
    }
}
