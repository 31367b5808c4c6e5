// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_virtual_list --heading-base-level=0

//! Understory Virtual List: core 1D virtualization primitives.
//!
//! This crate provides a small, renderer-agnostic core for virtualizing a dense strip
//! of items indexed `0..len`, so a host only realizes the slice that is currently
//! visible (plus a little padding). It backs both the row axis and the column axis
//! of a grid; each axis is an independent instance.
//!
//! The core concepts are:
//!
//! - [`Scalar`]: a small abstraction over `f32`/`f64` used for extents, offsets,
//!   and scroll positions.
//! - [`ExtentModel`]: a trait describing a 1D strip of items with per-item extents,
//!   start offsets, and an anchor lookup (greatest start at or before an offset).
//! - [`MeasurementTable`]: an [`ExtentModel`] built in one pass from a count and a
//!   size function, holding prefix offsets and sizes, keyed by a size revision.
//! - [`FixedExtentModel`]: an O(1) [`ExtentModel`] for uniformly sized items.
//! - [`compute_visible_strip`]: the range resolver. Binary search for the anchor,
//!   a forward scan to cover the viewport, then item-count overscan on both ends.
//! - [`Virtualizer`]: a controller that owns a model, scroll offset, viewport
//!   extent, and overscan for one [`Axis`], recomputes the [`VisibleStrip`] whenever
//!   one of those inputs changes, and yields [`VirtualItem`]s and index-based scrolling
//!   through a host [`ScrollViewport`].
//!
//! This crate deliberately does **not** know about widgets, display trees, or any
//! particular UI framework. Host frameworks are responsible for:
//!
//! - Forwarding scroll and resize notifications ([`Virtualizer::on_scroll`],
//!   [`Virtualizer::on_resize`]).
//! - Sizing the scroll container's content box from [`Virtualizer::total_size`].
//! - Positioning a view for each [`VirtualItem`] at its `start` offset.
//!
//! ## Minimal example
//!
//! A fixed-height list of 50,000 rows:
//!
//! ```rust
//! use understory_virtual_list::{Axis, FixedExtentModel, Virtualizer};
//!
//! // 50,000 items, each 40 logical pixels tall, with 10 items of overscan.
//! let model = FixedExtentModel::new(50_000, 40.0_f64);
//! let mut rows = Virtualizer::new(model, Axis::Vertical, 10);
//! rows.on_resize(700.0);
//!
//! let strip = rows.visible_strip();
//! assert_eq!(strip.visible_indices(), 0..18);
//! assert_eq!(strip.indices(), 0..28);
//!
//! for item in rows.virtual_items() {
//!     // Place a row view at `item.start`, `item.size` tall.
//!     assert_eq!(item.end, item.start + item.size);
//! }
//! ```
//!
//! ## Variable sizes
//!
//! For non-uniform item sizes, use [`MeasurementTable`]. Rather than patching
//! individual entries, hand the virtualizer the whole size source together with a
//! revision key; the table is rebuilt only when the count or the key changes:
//!
//! ```rust
//! use understory_virtual_list::{Axis, MeasurementTable, Virtualizer};
//!
//! let widths = [120.0_f64, 80.0, 200.0, 60.0];
//! let mut columns = Virtualizer::new(MeasurementTable::new(), Axis::Horizontal, 1);
//! columns.on_resize(150.0);
//! columns.sync_sizes(widths.len(), 1, |i| widths[i]);
//!
//! assert_eq!(columns.total_size(), 460.0);
//! assert_eq!(columns.visible_strip().visible_indices(), 0..2);
//! ```
//!
//! All extents and offsets live in a caller-chosen 1D coordinate space
//! (typically logical pixels) and are expected to be finite and non-negative.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod fixed;
mod measurement;
mod model;
mod scalar;
mod viewport;
mod virtualizer;

pub use fixed::FixedExtentModel;
pub use measurement::MeasurementTable;
pub use model::{ExtentModel, VisibleStrip, compute_visible_strip};
pub use scalar::Scalar;
pub use viewport::{Axis, ScrollViewport};
pub use virtualizer::{
    DEFAULT_OVERSCAN, ScrollAlign, VirtualItem, VirtualItems, Virtualizer,
};
