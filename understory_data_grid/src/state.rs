// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The undoable grid snapshot.

use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::{Column, ColumnId, GridRow, SortRule};

/// Dependency stamps of a [`GridState`].
///
/// Every mutation of a part draws a fresh stamp from the grid's counter, and
/// stamps travel with the snapshot through undo. Derived caches (the sorted
/// order, the column measurement table) compare stamps instead of contents.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Revisions {
    /// Stamp of the column list: order, widths, pinning, visibility.
    pub layout: u64,
    /// Stamp of the set of visible columns. Bumped together with `layout`.
    pub visibility: u64,
    /// Stamp of the sort configuration.
    pub sort: u64,
    /// Stamp of the row data.
    pub data: u64,
}

/// Everything undo can restore: columns, sort rules, and row data.
///
/// Row data sits behind an [`Arc`], so snapshots that do not touch the data
/// share it instead of copying every row.
#[derive(Clone, Debug)]
pub struct GridState<R: GridRow> {
    pub(crate) columns: Vec<Column<R::Field>>,
    pub(crate) sort_config: Vec<SortRule>,
    pub(crate) data: Arc<Vec<R>>,
    pub(crate) revisions: Revisions,
}

impl<R: GridRow> GridState<R> {
    /// All columns in display order, hidden ones included.
    #[must_use]
    pub fn columns(&self) -> &[Column<R::Field>] {
        &self.columns
    }

    /// Active sort rules, highest priority first.
    #[must_use]
    pub fn sort_config(&self) -> &[SortRule] {
        &self.sort_config
    }

    /// Rows in their original (unsorted) order.
    #[must_use]
    pub fn data(&self) -> &[R] {
        &self.data
    }

    /// Dependency stamps of this snapshot.
    #[must_use]
    pub const fn revisions(&self) -> Revisions {
        self.revisions
    }

    /// The column with `id`, if any.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&Column<R::Field>> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub(crate) fn column_index(&self, id: &ColumnId) -> Option<usize> {
        self.columns.iter().position(|c| &c.id == id)
    }
}
