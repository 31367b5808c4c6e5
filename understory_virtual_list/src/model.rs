// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core extent model trait and the visible range resolver.

use core::ops::Range;

use crate::Scalar;

/// Result of a visibility query over a 1D strip.
///
/// Both index ranges are half-open. `start..end` is what a host should
/// realize; `visible_start..visible_end` is the window that actually
/// intersects the viewport, before overscan padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleStrip<S: Scalar> {
    /// First realized index (inclusive), including overscan.
    pub start: usize,
    /// One past the last realized index (exclusive), including overscan.
    pub end: usize,
    /// First index intersecting the viewport (the anchor).
    pub visible_start: usize,
    /// One past the last index intersecting the viewport.
    pub visible_end: usize,

    /// Total extent of items before `start`.
    pub before_extent: S,
    /// Total extent of items after `end`.
    pub after_extent: S,
    /// Total extent of the entire strip (all items `0..len`).
    pub content_extent: S,
}

impl<S: Scalar> VisibleStrip<S> {
    /// A strip with no realized items and zero extents.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            start: 0,
            end: 0,
            visible_start: 0,
            visible_end: 0,
            before_extent: S::zero(),
            after_extent: S::zero(),
            content_extent: S::zero(),
        }
    }

    /// Returns `true` if there are no realized items.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Number of realized items.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Realized indices, including overscan.
    #[must_use]
    pub const fn indices(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Indices intersecting the viewport, without overscan.
    #[must_use]
    pub const fn visible_indices(&self) -> Range<usize> {
        self.visible_start..self.visible_end
    }
}

/// A 1D model over a dense strip of items, indexed `0..len`.
///
/// All extents and offsets are in the same coordinate space as your scroll offset
/// and viewport extent (typically logical pixels).
///
/// Implementations are expected to be fully resolved: every query is a read.
/// Anything that changes sizes must go through the implementation's own rebuild
/// path so that no query ever observes a partially patched table.
pub trait ExtentModel {
    /// Scalar type used for extents and offsets.
    type Scalar: Scalar;

    /// Number of items in this strip.
    fn len(&self) -> usize;

    /// Returns `true` if there are no items in this strip.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total extent of the entire strip.
    fn total_extent(&self) -> Self::Scalar;

    /// Size of a single item. Out-of-range indices report zero.
    fn extent_of(&self, index: usize) -> Self::Scalar;

    /// Offset of the start of the given item from the start of the strip.
    ///
    /// Implementations must guarantee that:
    /// - if `len() > 0`, `offset_of(0) == 0`,
    /// - for all valid `i`, `offset_of(i + 1) == offset_of(i) + extent_of(i)`.
    fn offset_of(&self, index: usize) -> Self::Scalar;

    /// Returns the greatest index `i` with `offset_of(i) <= offset`.
    ///
    /// When no offset is at or before `offset` (or the strip is empty) this
    /// returns `0`. Zero-sized items share their start offset with the next
    /// item, so ties resolve to the later index.
    fn index_at_offset(&self, offset: Self::Scalar) -> usize;
}

/// Compute the visible slice of a strip, given scroll position, viewport size, and overscan.
///
/// - `scroll_offset`: leading edge of the viewport in strip coordinates (`>= 0`).
/// - `viewport_extent`: size of the viewport in strip coordinates (`>= 0`).
/// - `overscan`: number of extra items to realize on *each* side of the
///   visible window to hide pop-in during fast scrolling.
///
/// The anchor is found with [`ExtentModel::index_at_offset`]; the window then
/// grows forward from the anchor until the viewport is covered or the strip
/// ends. The cost is independent of the total item count.
///
/// A viewport that has not been measured yet (`viewport_extent == 0`) still
/// yields the anchor plus its overscan window.
pub fn compute_visible_strip<M>(
    model: &M,
    scroll_offset: M::Scalar,
    viewport_extent: M::Scalar,
    overscan: usize,
) -> VisibleStrip<M::Scalar>
where
    M: ExtentModel,
{
    type S<M> = <M as ExtentModel>::Scalar;
    let len = model.len();
    if len == 0 {
        return VisibleStrip::empty();
    }

    let content_extent = model.total_extent().max(S::<M>::zero());
    let scroll_offset = scroll_offset.max(S::<M>::zero());
    let viewport_extent = viewport_extent.max(S::<M>::zero());
    let viewport_end = scroll_offset + viewport_extent;

    let anchor = model.index_at_offset(scroll_offset).min(len - 1);

    // Walk forwards until an item reaches the trailing edge of the viewport.
    let mut last = anchor;
    while last + 1 < len && model.offset_of(last) + model.extent_of(last) < viewport_end {
        last += 1;
    }

    let start = anchor.saturating_sub(overscan);
    let end = last.saturating_add(1).saturating_add(overscan).min(len);

    let before_extent = model.offset_of(start);
    let end_start = if end < len {
        model.offset_of(end)
    } else {
        content_extent
    };
    let after_extent = (content_extent - end_start).max(S::<M>::zero());

    VisibleStrip {
        start,
        end,
        visible_start: anchor,
        visible_end: last + 1,
        before_extent,
        after_extent,
        content_extent,
    }
}
