// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-side scroll container a [`Virtualizer`](crate::Virtualizer) observes and drives.

use crate::Scalar;

/// Scroll direction of a strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Axis {
    /// Items stack top to bottom (rows).
    #[default]
    Vertical,
    /// Items stack left to right (columns).
    Horizontal,
}

/// A scrollable host element, such as a native scroll view or a canvas region.
///
/// The virtualizer reads scroll position and viewport size from it when asked
/// to [`observe`](crate::Virtualizer::observe), and writes scroll position when
/// [`scroll_to_index`](crate::Virtualizer::scroll_to_index) is called. One element
/// usually scrolls on both axes, so every method takes the [`Axis`].
pub trait ScrollViewport<S: Scalar> {
    /// Current scroll position along `axis`.
    fn scroll_offset(&self, axis: Axis) -> S;

    /// Current visible size along `axis`.
    fn viewport_extent(&self, axis: Axis) -> S;

    /// Moves the scroll position along `axis`.
    fn set_scroll_offset(&mut self, axis: Axis, offset: S);
}
