// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focused cell, arrow navigation, and keyboard input.

use crate::{CommitTicket, GridRow};

/// A cell in view coordinates: a sorted row index and a logical visible column
/// index (left-pinned columns first, then center, then right-pinned).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CellPosition {
    /// Index into the sorted rows.
    pub row: usize,
    /// Logical index among the visible columns.
    pub column: usize,
}

impl CellPosition {
    /// Creates a position.
    #[must_use]
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Moves one cell in `direction`, staying inside a `rows` × `columns` grid.
    ///
    /// Returns `None` if the grid has no cells.
    #[must_use]
    pub fn step(self, direction: Direction, rows: usize, columns: usize) -> Option<Self> {
        if rows == 0 || columns == 0 {
            return None;
        }
        let row = self.row.min(rows - 1);
        let column = self.column.min(columns - 1);
        let (row, column) = match direction {
            Direction::Up => (row.saturating_sub(1), column),
            Direction::Down => ((row + 1).min(rows - 1), column),
            Direction::Left => (row, column.saturating_sub(1)),
            Direction::Right => (row, (column + 1).min(columns - 1)),
        };
        Some(Self { row, column })
    }
}

/// Arrow direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Previous row.
    Up,
    /// Next row.
    Down,
    /// Previous column.
    Left,
    /// Next column.
    Right,
}

/// A key the grid responds to, already decoded by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GridKey {
    /// An arrow key.
    Arrow(Direction),
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// The platform undo chord (Ctrl+Z / Cmd+Z).
    Undo,
}

/// Result of [`DataGrid::handle_key`](crate::DataGrid::handle_key).
#[derive(Debug)]
pub enum KeyResponse<R: GridRow> {
    /// The key meant nothing in the current state.
    Ignored,
    /// The key was consumed.
    Handled,
    /// Enter started a commit. Run the edit handler, then pass the ticket to
    /// [`DataGrid::finish_commit`](crate::DataGrid::finish_commit).
    CommitRequested(CommitTicket<R>),
}

impl<R: GridRow> KeyResponse<R> {
    /// Returns `true` unless the key was ignored.
    #[must_use]
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

#[cfg(test)]
mod tests {
    use super::{CellPosition, Direction};

    #[test]
    fn steps_clamp_to_the_grid() {
        let origin = CellPosition::new(0, 0);
        assert_eq!(origin.step(Direction::Up, 5, 3), Some(origin));
        assert_eq!(origin.step(Direction::Left, 5, 3), Some(origin));
        assert_eq!(origin.step(Direction::Down, 5, 3), Some(CellPosition::new(1, 0)));
        assert_eq!(origin.step(Direction::Right, 5, 3), Some(CellPosition::new(0, 1)));

        let corner = CellPosition::new(4, 2);
        assert_eq!(corner.step(Direction::Down, 5, 3), Some(corner));
        assert_eq!(corner.step(Direction::Right, 5, 3), Some(corner));
    }

    #[test]
    fn stale_positions_are_pulled_back_inside() {
        // The grid shrank under a focused cell.
        let far = CellPosition::new(40, 9);
        assert_eq!(far.step(Direction::Left, 5, 3), Some(CellPosition::new(4, 1)));
    }

    #[test]
    fn empty_grid_has_nowhere_to_go() {
        assert_eq!(CellPosition::default().step(Direction::Down, 0, 3), None);
        assert_eq!(CellPosition::default().step(Direction::Down, 3, 0), None);
    }
}
