// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.

use crate::ColumnId;

/// A grid operation that was refused. The grid state is unchanged when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// No column has this id.
    #[error("unknown column `{0}`")]
    UnknownColumn(ColumnId),
    /// Two columns passed to the grid share an id.
    #[error("duplicate column id `{0}`")]
    DuplicateColumn(ColumnId),
    /// The column does not have [`ColumnFlags::SORTABLE`](crate::ColumnFlags::SORTABLE).
    #[error("column `{0}` is not sortable")]
    NotSortable(ColumnId),
    /// The column does not have [`ColumnFlags::RESIZABLE`](crate::ColumnFlags::RESIZABLE).
    #[error("column `{0}` is not resizable")]
    NotResizable(ColumnId),
    /// The column does not have [`ColumnFlags::EDITABLE`](crate::ColumnFlags::EDITABLE).
    #[error("column `{0}` is not editable")]
    NotEditable(ColumnId),
    /// A sorted row index past the end of the data.
    #[error("row {index} is out of range for {len} rows")]
    RowOutOfRange {
        /// The requested index.
        index: usize,
        /// The number of rows.
        len: usize,
    },
    /// An edit commit is in flight; the edit buffer is locked until it resolves.
    #[error("an edit is being committed")]
    CommitInFlight,
    /// The operation needs an open edit and there is none.
    #[error("no cell is being edited")]
    NoActiveEdit,
}

/// Why an edit commit did not apply. Kept on the edit buffer so the host can show it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum EditError {
    /// The edit handler rejected the value.
    #[error("Validation failed")]
    Rejected,
    /// The edit handler returned an error.
    #[error("Save failed")]
    Failed,
}
