// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell editing: the edit buffer, commit tickets, and the host's edit handler.
//!
//! An edit moves through `Idle → Editing → Committing → (Idle | Failed)`. The
//! commit is split in two so the grid never holds a borrow across the host's
//! asynchronous validation: [`DataGrid::begin_commit`](crate::DataGrid::begin_commit)
//! locks the buffer and hands out a [`CommitTicket`], and
//! [`DataGrid::finish_commit`](crate::DataGrid::finish_commit) applies the
//! resolution only if that ticket still names the live buffer.

use core::convert::Infallible;
use core::fmt::{self, Debug};
use core::future;

use crate::{ColumnId, EditError, GridRow};

/// Host collaborator that validates and persists one edited cell.
///
/// Resolving to `Ok(true)` accepts the value, `Ok(false)` rejects it, and
/// `Err(_)` reports a failure to save. The grid applies the value only on
/// `Ok(true)`.
pub trait EditHandler<R: GridRow> {
    /// Failure reported by [`EditHandler::commit`]. It is logged, then mapped to
    /// [`EditError::Failed`].
    type Error: Debug;

    /// Validates and persists `value` for the cell at `row_id` / `column_id`.
    fn commit(
        &self,
        row_id: &R::Id,
        column_id: &ColumnId,
        value: Option<&R::Value>,
    ) -> impl Future<Output = Result<bool, Self::Error>>;
}

/// An [`EditHandler`] that accepts every value immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AcceptAll;

impl<R: GridRow> EditHandler<R> for AcceptAll {
    type Error = Infallible;

    fn commit(
        &self,
        _row_id: &R::Id,
        _column_id: &ColumnId,
        _value: Option<&R::Value>,
    ) -> impl Future<Output = Result<bool, Infallible>> {
        future::ready(Ok(true))
    }
}

/// Phase of an open edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditPhase {
    /// The value can be changed.
    Editing,
    /// A commit is in flight; the value is locked.
    Committing,
    /// The last commit did not apply; the value can be changed and committed again.
    Failed(EditError),
}

/// The cell being edited and its pending value.
pub struct EditBuffer<R: GridRow> {
    pub(crate) row_id: R::Id,
    pub(crate) column_id: ColumnId,
    pub(crate) field: R::Field,
    pub(crate) value: Option<R::Value>,
    pub(crate) phase: EditPhase,
    pub(crate) generation: u64,
}

impl<R: GridRow> EditBuffer<R> {
    /// Id of the row being edited.
    #[must_use]
    pub fn row_id(&self) -> &R::Id {
        &self.row_id
    }

    /// Column being edited.
    #[must_use]
    pub fn column_id(&self) -> &ColumnId {
        &self.column_id
    }

    /// Pending value.
    #[must_use]
    pub fn value(&self) -> Option<&R::Value> {
        self.value.as_ref()
    }

    /// Current phase.
    #[must_use]
    pub const fn phase(&self) -> EditPhase {
        self.phase
    }

    /// Returns `true` while a commit is in flight.
    #[must_use]
    pub fn is_committing(&self) -> bool {
        self.phase == EditPhase::Committing
    }

    /// Error of the last failed commit, if the buffer is in that phase.
    #[must_use]
    pub const fn error(&self) -> Option<EditError> {
        match self.phase {
            EditPhase::Failed(error) => Some(error),
            _ => None,
        }
    }
}

impl<R: GridRow> Debug for EditBuffer<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditBuffer")
            .field("row_id", &self.row_id)
            .field("column_id", &self.column_id)
            .field("field", &self.field)
            .field("value", &self.value)
            .field("phase", &self.phase)
            .field("generation", &self.generation)
            .finish()
    }
}

/// A snapshot of the edit buffer taken when its commit started.
///
/// Hand the ticket back to [`DataGrid::finish_commit`](crate::DataGrid::finish_commit)
/// together with the handler's result. A ticket whose edit was cancelled,
/// abandoned, or replaced in the meantime is stale and applies nothing.
pub struct CommitTicket<R: GridRow> {
    pub(crate) row_id: R::Id,
    pub(crate) column_id: ColumnId,
    pub(crate) value: Option<R::Value>,
    pub(crate) generation: u64,
}

impl<R: GridRow> CommitTicket<R> {
    /// Id of the row being committed.
    #[must_use]
    pub fn row_id(&self) -> &R::Id {
        &self.row_id
    }

    /// Column being committed.
    #[must_use]
    pub fn column_id(&self) -> &ColumnId {
        &self.column_id
    }

    /// Value being committed.
    #[must_use]
    pub fn value(&self) -> Option<&R::Value> {
        self.value.as_ref()
    }
}

impl<R: GridRow> Clone for CommitTicket<R> {
    fn clone(&self) -> Self {
        Self {
            row_id: self.row_id.clone(),
            column_id: self.column_id.clone(),
            value: self.value.clone(),
            generation: self.generation,
        }
    }
}

impl<R: GridRow> Debug for CommitTicket<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommitTicket")
            .field("row_id", &self.row_id)
            .field("column_id", &self.column_id)
            .field("value", &self.value)
            .field("generation", &self.generation)
            .finish()
    }
}

/// What [`DataGrid::finish_commit`](crate::DataGrid::finish_commit) did with a resolution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    /// The value was written to the row and the edit closed.
    Applied,
    /// The value was not written; the edit stays open with this error.
    Failed(EditError),
    /// The ticket was stale; nothing changed.
    Discarded,
}
