// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A small controller that owns an [`ExtentModel`], scroll state, and viewport size.

use core::iter::FusedIterator;
use core::ops::Range;

use crate::{
    Axis, ExtentModel, FixedExtentModel, MeasurementTable, Scalar, ScrollViewport, VisibleStrip,
    compute_visible_strip,
};

/// Overscan used by [`Virtualizer::with_default_overscan`], in items.
pub const DEFAULT_OVERSCAN: usize = 5;

/// Alignment mode when scrolling a specific index into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlign {
    /// Align the start (top/leading edge) of the item with the viewport.
    #[default]
    Start,
    /// Center the item within the viewport.
    Center,
    /// Align the end (bottom/trailing edge) of the item with the viewport.
    End,
    /// Move just enough to make the item fully visible, preferring the
    /// smallest change from the current scroll offset.
    Nearest,
}

/// One realized item of a strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VirtualItem<S: Scalar> {
    /// Index of the item in the full strip.
    pub index: usize,
    /// Offset of the item's leading edge.
    pub start: S,
    /// Extent of the item along the strip.
    pub size: S,
    /// Offset of the item's trailing edge (`start + size`).
    pub end: S,
}

/// Iterator over the [`VirtualItem`]s of one visible strip.
///
/// Produced by [`Virtualizer::virtual_items`]. Each call produces a fresh
/// iterator, so hosts may walk the window as often as they like.
#[derive(Debug, Clone)]
pub struct VirtualItems<'a, M: ExtentModel> {
    model: &'a M,
    indices: Range<usize>,
}

impl<M: ExtentModel> VirtualItems<'_, M> {
    fn item(&self, index: usize) -> VirtualItem<M::Scalar> {
        let start = self.model.offset_of(index);
        let size = self.model.extent_of(index);
        VirtualItem {
            index,
            start,
            size,
            end: start + size,
        }
    }
}

impl<M: ExtentModel> Iterator for VirtualItems<'_, M> {
    type Item = VirtualItem<M::Scalar>;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.indices.next()?;
        Some(self.item(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.indices.size_hint()
    }
}

impl<M: ExtentModel> DoubleEndedIterator for VirtualItems<'_, M> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let index = self.indices.next_back()?;
        Some(self.item(index))
    }
}

impl<M: ExtentModel> ExactSizeIterator for VirtualItems<'_, M> {}

impl<M: ExtentModel> FusedIterator for VirtualItems<'_, M> {}

/// Controller for one virtualized axis over a dense index strip.
///
/// This type:
/// - stores scroll offset, viewport extent, and overscan for one [`Axis`],
/// - owns an [`ExtentModel`],
/// - caches the last computed [`VisibleStrip`] and drops it whenever any input changes,
/// - exposes the realized window as [`VirtualItem`]s and index-aligned scrolling.
///
/// Scroll and resize notifications from the host are fed in through
/// [`Virtualizer::on_scroll`] and [`Virtualizer::on_resize`]. A row axis and a
/// column axis are two independent instances; they never share state.
#[derive(Debug)]
pub struct Virtualizer<M: ExtentModel> {
    model: M,
    axis: Axis,
    scroll_offset: M::Scalar,
    viewport_extent: M::Scalar,
    overscan: usize,

    dirty: bool,
    last_strip: VisibleStrip<M::Scalar>,
}

impl<M: ExtentModel> Virtualizer<M> {
    /// Creates a new [`Virtualizer`] over `model`, scrolling along `axis`,
    /// realizing `overscan` extra items on each side of the viewport.
    ///
    /// The viewport starts unmeasured (extent zero) at scroll offset zero.
    #[must_use]
    pub fn new(model: M, axis: Axis, overscan: usize) -> Self {
        Self {
            model,
            axis,
            scroll_offset: M::Scalar::zero(),
            viewport_extent: M::Scalar::zero(),
            overscan,
            dirty: true,
            last_strip: VisibleStrip::empty(),
        }
    }

    /// Creates a new [`Virtualizer`] with [`DEFAULT_OVERSCAN`].
    #[must_use]
    pub fn with_default_overscan(model: M, axis: Axis) -> Self {
        Self::new(model, axis, DEFAULT_OVERSCAN)
    }

    /// Returns a shared reference to the underlying model.
    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns a mutable reference to the underlying model, marking the cached strip dirty.
    pub fn model_mut(&mut self) -> &mut M {
        self.dirty = true;
        &mut self.model
    }

    /// The axis this virtualizer scrolls along.
    #[must_use]
    pub const fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns the current scroll offset.
    #[must_use]
    pub const fn scroll_offset(&self) -> M::Scalar {
        self.scroll_offset
    }

    /// Handles a scroll notification from the host viewport.
    pub fn on_scroll(&mut self, offset: M::Scalar) {
        let offset = offset.max(M::Scalar::zero());
        if offset != self.scroll_offset {
            self.scroll_offset = offset;
            self.dirty = true;
        }
    }

    /// Adjusts the scroll offset by `delta`.
    pub fn scroll_by(&mut self, delta: M::Scalar) {
        self.on_scroll(self.scroll_offset + delta);
    }

    /// Returns the current viewport extent.
    #[must_use]
    pub const fn viewport_extent(&self) -> M::Scalar {
        self.viewport_extent
    }

    /// Handles a resize notification from the host viewport.
    pub fn on_resize(&mut self, extent: M::Scalar) {
        let extent = extent.max(M::Scalar::zero());
        if extent != self.viewport_extent {
            self.viewport_extent = extent;
            self.dirty = true;
        }
    }

    /// Reads both scroll offset and viewport extent for this axis from `viewport`.
    ///
    /// Hosts typically call this once when the scroll element is attached, so the
    /// first real frame does not wait for a resize notification.
    pub fn observe(&mut self, viewport: &dyn ScrollViewport<M::Scalar>) {
        self.on_resize(viewport.viewport_extent(self.axis));
        self.on_scroll(viewport.scroll_offset(self.axis));
    }

    /// Returns the number of items realized on each side of the viewport.
    #[must_use]
    pub const fn overscan(&self) -> usize {
        self.overscan
    }

    /// Sets the number of items realized on each side of the viewport.
    pub fn set_overscan(&mut self, overscan: usize) {
        if overscan != self.overscan {
            self.overscan = overscan;
            self.dirty = true;
        }
    }

    /// Total extent of the strip, for sizing the scroll container's content box.
    #[must_use]
    pub fn total_size(&self) -> M::Scalar {
        self.model.total_extent()
    }

    /// Computes or returns the cached visible strip.
    #[must_use]
    pub fn visible_strip(&mut self) -> VisibleStrip<M::Scalar> {
        if self.dirty {
            self.last_strip = compute_visible_strip(
                &self.model,
                self.scroll_offset,
                self.viewport_extent,
                self.overscan,
            );
            self.dirty = false;
            log::trace!(
                "{:?} strip recomputed: {:?} (visible {:?}) of {}",
                self.axis,
                self.last_strip.indices(),
                self.last_strip.visible_indices(),
                self.model.len()
            );
        }
        self.last_strip
    }

    /// The realized window as [`VirtualItem`]s, including overscan.
    pub fn virtual_items(&mut self) -> VirtualItems<'_, M> {
        let strip = self.visible_strip();
        VirtualItems {
            model: &self.model,
            indices: strip.indices(),
        }
    }

    /// Returns the first index intersecting the viewport, if any.
    #[must_use]
    pub fn first_visible_index(&mut self) -> Option<usize> {
        let strip = self.visible_strip();
        if strip.is_empty() {
            None
        } else {
            Some(strip.visible_start)
        }
    }

    /// Returns the last index intersecting the viewport, if any.
    #[must_use]
    pub fn last_visible_index(&mut self) -> Option<usize> {
        let strip = self.visible_strip();
        if strip.is_empty() {
            None
        } else {
            Some(strip.visible_end - 1)
        }
    }

    /// Returns `true` if the given index is fully visible within the viewport.
    #[must_use]
    pub fn is_index_fully_visible(&self, index: usize) -> bool {
        if index >= self.model.len() {
            return false;
        }
        let item_start = self.model.offset_of(index);
        let item_end = item_start + self.model.extent_of(index);
        let view_start = self.scroll_offset;
        let view_end = self.scroll_offset + self.viewport_extent;
        item_start >= view_start && item_end <= view_end
    }

    /// Returns `true` if the given index overlaps the viewport at all.
    #[must_use]
    pub fn is_index_partially_visible(&self, index: usize) -> bool {
        if index >= self.model.len() {
            return false;
        }
        let item_start = self.model.offset_of(index);
        let item_end = item_start + self.model.extent_of(index);
        let view_start = self.scroll_offset;
        let view_end = self.scroll_offset + self.viewport_extent;
        item_end > view_start && item_start < view_end
    }

    /// Clamps the current scroll offset so that the viewport stays within the content extent.
    ///
    /// This is useful for hosts that want to hard-cap scrolling at the start/end of content.
    pub fn clamp_scroll_to_content(&mut self) {
        let content = self.total_size();
        let max_offset = if content > self.viewport_extent {
            content - self.viewport_extent
        } else {
            M::Scalar::zero()
        };
        if self.scroll_offset > max_offset {
            self.on_scroll(max_offset);
        }
    }

    /// Scrolls the host viewport so that item `index` starts at the leading edge.
    ///
    /// The index is clamped into `0..len`. Returns the applied offset, or `None`
    /// without touching anything if no viewport is currently available.
    pub fn scroll_to_index(
        &mut self,
        index: usize,
        viewport: Option<&mut dyn ScrollViewport<M::Scalar>>,
    ) -> Option<M::Scalar> {
        self.scroll_to_index_aligned(index, ScrollAlign::Start, viewport)
    }

    /// Scrolls the host viewport so that item `index` is brought into view using `align`.
    ///
    /// - [`ScrollAlign::Start`] aligns the start of the item with the start of the viewport.
    /// - [`ScrollAlign::End`] aligns the end of the item with the end of the viewport.
    /// - [`ScrollAlign::Center`] centers the item within the viewport.
    /// - [`ScrollAlign::Nearest`] moves just enough to make the item fully visible, preferring
    ///   the smallest change from the current scroll offset.
    ///
    /// The new offset is written to `viewport` and recorded locally, so the next
    /// [`Virtualizer::visible_strip`] already reflects it even before the host
    /// reports the scroll back.
    pub fn scroll_to_index_aligned(
        &mut self,
        index: usize,
        align: ScrollAlign,
        viewport: Option<&mut dyn ScrollViewport<M::Scalar>>,
    ) -> Option<M::Scalar> {
        let viewport = viewport?;
        let new_offset = self.offset_for_index(index, align);
        viewport.set_scroll_offset(self.axis, new_offset);
        self.on_scroll(new_offset);
        Some(new_offset)
    }

    fn offset_for_index(&self, index: usize, align: ScrollAlign) -> M::Scalar {
        let zero = M::Scalar::zero();
        let len = self.model.len();
        if len == 0 {
            return zero;
        }
        let idx = index.min(len - 1);
        let item_start = self.model.offset_of(idx);
        let item_end = item_start + self.model.extent_of(idx);
        let viewport = self.viewport_extent;

        match align {
            ScrollAlign::Start => item_start,
            ScrollAlign::End => (item_end - viewport).max(zero),
            ScrollAlign::Center => {
                let half = M::Scalar::from_usize(2);
                ((item_start + item_end) / half - viewport / half).max(zero)
            }
            ScrollAlign::Nearest => {
                let current = self.scroll_offset;
                // If the item is already fully visible, keep the current offset.
                if item_start >= current && item_end <= current + viewport {
                    current
                } else if item_start < current {
                    item_start
                } else {
                    (item_end - viewport).max(zero)
                }
            }
        }
    }
}

impl<S: Scalar> Virtualizer<MeasurementTable<S>> {
    /// Brings the measurement table in line with `count` and the size revision `key`.
    ///
    /// The table (and the cached strip) is rebuilt only when `count` or `key`
    /// changed since the last sync. Returns `true` if a rebuild happened.
    pub fn sync_sizes(&mut self, count: usize, key: u64, size_of: impl FnMut(usize) -> S) -> bool {
        let rebuilt = self.model.sync(count, key, size_of);
        if rebuilt {
            self.dirty = true;
        }
        rebuilt
    }

    /// Unconditionally rebuilds the measurement table.
    pub fn set_sizes(&mut self, count: usize, size_of: impl FnMut(usize) -> S) {
        self.model.rebuild(count, size_of);
        self.dirty = true;
    }
}

impl<S: Scalar> Virtualizer<FixedExtentModel<S>> {
    /// Updates the item count of a uniformly sized strip.
    pub fn set_count(&mut self, count: usize) {
        if count != self.model.len() {
            self.model.set_len(count);
            self.dirty = true;
        }
    }

    /// Updates the uniform item extent.
    pub fn set_item_extent(&mut self, extent: S) {
        if extent != self.model.extent() {
            self.model.set_extent(extent);
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{ScrollAlign, VirtualItem, Virtualizer};
    use crate::{Axis, FixedExtentModel, MeasurementTable, ScrollViewport};

    #[derive(Debug, Default)]
    struct FakeViewport {
        top: f64,
        left: f64,
        width: f64,
        height: f64,
    }

    impl ScrollViewport<f64> for FakeViewport {
        fn scroll_offset(&self, axis: Axis) -> f64 {
            match axis {
                Axis::Vertical => self.top,
                Axis::Horizontal => self.left,
            }
        }

        fn viewport_extent(&self, axis: Axis) -> f64 {
            match axis {
                Axis::Vertical => self.height,
                Axis::Horizontal => self.width,
            }
        }

        fn set_scroll_offset(&mut self, axis: Axis, offset: f64) {
            match axis {
                Axis::Vertical => self.top = offset,
                Axis::Horizontal => self.left = offset,
            }
        }
    }

    #[test]
    fn visible_strip_tracks_scroll_and_viewport() {
        let model = FixedExtentModel::new(100, 10.0_f32);
        let mut list = Virtualizer::new(model, Axis::Vertical, 0);
        list.on_resize(50.0);

        // At top: items 0..5.
        let strip = list.visible_strip();
        assert_eq!(strip.indices(), 0..5);

        // Scroll down by 10 units: items 1..6.
        list.scroll_by(10.0);
        let strip = list.visible_strip();
        assert_eq!(strip.indices(), 1..6);
        assert_eq!(list.first_visible_index(), Some(1));
        assert_eq!(list.last_visible_index(), Some(5));
    }

    #[test]
    fn fifty_thousand_fixed_rows_stay_bounded() {
        let model = FixedExtentModel::new(50_000, 40.0_f64);
        let mut rows = Virtualizer::new(model, Axis::Vertical, 10);
        rows.on_resize(700.0);

        let strip = rows.visible_strip();
        assert_eq!(strip.visible_indices(), 0..18);
        assert_eq!(strip.indices(), 0..28);
        assert_eq!(rows.total_size(), 2_000_000.0);

        rows.on_scroll(1_999_000.0);
        let strip = rows.visible_strip();
        assert!(strip.end <= 50_000);
        assert_eq!(strip.end, 50_000);
        assert!(strip.start < strip.visible_start);
    }

    #[test]
    fn virtual_items_describe_the_realized_window() {
        let sizes = [30.0_f64, 10.0, 20.0, 40.0, 25.0];
        let table = MeasurementTable::build(sizes.len(), |i| sizes[i]);
        let mut columns = Virtualizer::new(table, Axis::Horizontal, 1);
        columns.on_resize(25.0);
        columns.on_scroll(35.0);

        let items: Vec<_> = columns.virtual_items().collect();
        assert_eq!(
            items,
            [
                VirtualItem { index: 0, start: 0.0, size: 30.0, end: 30.0 },
                VirtualItem { index: 1, start: 30.0, size: 10.0, end: 40.0 },
                VirtualItem { index: 2, start: 40.0, size: 20.0, end: 60.0 },
                VirtualItem { index: 3, start: 60.0, size: 40.0, end: 100.0 },
            ]
        );

        // Restartable: a second walk yields the same window.
        assert_eq!(columns.virtual_items().count(), 4);
    }

    #[test]
    fn scroll_to_index_moves_viewport_and_window() {
        let model = FixedExtentModel::new(1_000, 40.0_f64);
        let mut rows = Virtualizer::new(model, Axis::Vertical, 3);
        let mut viewport = FakeViewport {
            height: 400.0,
            ..FakeViewport::default()
        };
        rows.observe(&viewport);

        assert_eq!(rows.scroll_to_index(250, Some(&mut viewport)), Some(10_000.0));
        assert_eq!(viewport.top, 10_000.0);
        assert!(rows.visible_strip().visible_indices().contains(&250));

        // Out-of-range indices clamp to the last item.
        assert_eq!(rows.scroll_to_index(5_000, Some(&mut viewport)), Some(39_960.0));
        assert!(rows.visible_strip().visible_indices().contains(&999));
    }

    #[test]
    fn scroll_to_index_without_viewport_is_a_no_op() {
        let model = FixedExtentModel::new(10, 10.0_f64);
        let mut rows = Virtualizer::new(model, Axis::Vertical, 0);
        rows.on_resize(30.0);
        assert_eq!(rows.scroll_to_index(5, None), None);
        assert_eq!(rows.scroll_offset(), 0.0);
    }

    #[test]
    fn scroll_to_index_alignment_behaves_as_expected() {
        let model = FixedExtentModel::new(10, 10.0_f64);
        let mut list = Virtualizer::new(model, Axis::Vertical, 0);
        let mut viewport = FakeViewport {
            height: 30.0,
            ..FakeViewport::default()
        };
        list.observe(&viewport);

        // Start alignment: item 3 at top → offset 30.
        list.scroll_to_index_aligned(3, ScrollAlign::Start, Some(&mut viewport));
        assert_eq!(list.scroll_offset(), 30.0);

        // End alignment: item 3 end at viewport end → offset 10.
        list.scroll_to_index_aligned(3, ScrollAlign::End, Some(&mut viewport));
        assert_eq!(list.scroll_offset(), 10.0);

        // Center alignment: item 3 centered in viewport → offset 20.
        list.scroll_to_index_aligned(3, ScrollAlign::Center, Some(&mut viewport));
        assert_eq!(list.scroll_offset(), 20.0);

        // Nearest alignment: if already fully visible, should not move.
        list.scroll_to_index_aligned(3, ScrollAlign::Nearest, Some(&mut viewport));
        assert_eq!(list.scroll_offset(), 20.0);
        assert_eq!(viewport.top, 20.0);
    }

    #[test]
    fn horizontal_axis_reads_and_writes_left() {
        let table = MeasurementTable::build(20, |_| 100.0_f64);
        let mut columns = Virtualizer::new(table, Axis::Horizontal, 0);
        let mut viewport = FakeViewport {
            width: 250.0,
            height: 999.0,
            left: 150.0,
            ..FakeViewport::default()
        };
        columns.observe(&viewport);
        assert_eq!(columns.viewport_extent(), 250.0);
        assert_eq!(columns.visible_strip().visible_indices(), 1..4);

        columns.scroll_to_index(7, Some(&mut viewport));
        assert_eq!(viewport.left, 700.0);
        assert_eq!(viewport.top, 0.0);
    }

    #[test]
    fn size_changes_invalidate_the_cached_strip() {
        let mut widths = [100.0_f64, 100.0, 100.0, 100.0];
        let mut columns = Virtualizer::new(MeasurementTable::new(), Axis::Horizontal, 0);
        columns.on_resize(250.0);
        assert!(columns.sync_sizes(widths.len(), 1, |i| widths[i]));
        assert_eq!(columns.visible_strip().visible_indices(), 0..3);

        widths[0] = 300.0;
        // Same key: sizes are considered unchanged.
        assert!(!columns.sync_sizes(widths.len(), 1, |i| widths[i]));
        assert_eq!(columns.total_size(), 400.0);

        assert!(columns.sync_sizes(widths.len(), 2, |i| widths[i]));
        assert_eq!(columns.total_size(), 600.0);
        assert_eq!(columns.visible_strip().visible_indices(), 0..1);
    }

    #[test]
    fn count_changes_invalidate_fixed_strips() {
        let mut rows = Virtualizer::new(FixedExtentModel::new(2, 10.0_f32), Axis::Vertical, 0);
        rows.on_resize(100.0);
        assert_eq!(rows.visible_strip().indices(), 0..2);
        rows.set_count(20);
        assert_eq!(rows.visible_strip().indices(), 0..10);
        rows.set_count(0);
        assert!(rows.visible_strip().is_empty());
        assert!(rows.virtual_items().next().is_none());
    }

    #[test]
    fn visibility_queries_and_clamping() {
        // 10 items * 10, viewport = 30 → three items visible at a time.
        let model = FixedExtentModel::new(10, 10.0_f32);
        let mut list = Virtualizer::new(model, Axis::Vertical, 0);
        list.on_resize(30.0);

        assert!(list.is_index_fully_visible(0));
        assert!(list.is_index_fully_visible(2));
        assert!(!list.is_index_fully_visible(3));
        assert!(list.is_index_partially_visible(2));
        assert!(!list.is_index_partially_visible(5));

        // Scroll down by 5: item 0 still partially visible, item 3 partially visible.
        list.scroll_by(5.0);
        assert!(list.is_index_partially_visible(0));
        assert!(list.is_index_partially_visible(3));

        // Clamp scroll so viewport stays within content: max offset = 100 - 30.
        list.on_scroll(500.0);
        list.clamp_scroll_to_content();
        assert_eq!(list.scroll_offset(), 70.0);
    }
}
