// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_data_grid --heading-base-level=0

//! Understory Data Grid: a headless controller for large, editable tables.
//!
//! [`DataGrid`] composes the other Understory pieces into the state machine
//! behind a spreadsheet-like view. It does no rendering; a host draws whatever
//! the grid says is realized and feeds user input back in.
//!
//! - Rows are any type implementing [`GridRow`]: a stable id, cells read by a
//!   field key, and a copy-with-one-field-replaced operation.
//! - [`Column`]s carry a width, optional bounds, [`ColumnFlags`] (sortable,
//!   resizable, editable, hidden), and an optional [`Pin`] to either edge.
//! - Sorting is a list of [`SortRule`]s applied as a stable multi-key sort.
//!   Empty cells always sort last.
//! - The row axis is a fixed-height [`Virtualizer`](understory_virtual_list::Virtualizer);
//!   the column axis virtualizes the unpinned columns through a measurement
//!   table keyed by a layout stamp, so it is rebuilt only when columns change.
//! - Every mutation lands in an [`understory_history::History`] of
//!   [`GridState`] snapshots, which [`DataGrid::undo`] walks back.
//! - Cell edits go through an [`EditHandler`] that may validate asynchronously.
//!   A commit is split into [`DataGrid::begin_commit`] and
//!   [`DataGrid::finish_commit`], and a [`CommitTicket`] that no longer matches
//!   the open edit is discarded.
//!
//! ## Example
//!
//! ```rust
//! use understory_data_grid::{
//!     AcceptAll, Column, ColumnId, CommitOutcome, DataGrid, GridOptions, GridRow,
//! };
//! use understory_virtual_list::Axis;
//!
//! #[derive(Clone, Debug)]
//! struct Person {
//!     id: u32,
//!     name: String,
//!     age: i64,
//! }
//!
//! #[derive(Clone, Debug, PartialEq, PartialOrd)]
//! enum Cell {
//!     Text(String),
//!     Number(i64),
//! }
//!
//! #[derive(Clone, Copy, Debug)]
//! enum Field {
//!     Name,
//!     Age,
//! }
//!
//! impl GridRow for Person {
//!     type Id = u32;
//!     type Field = Field;
//!     type Value = Cell;
//!
//!     fn id(&self) -> u32 {
//!         self.id
//!     }
//!
//!     fn get(&self, field: &Field) -> Option<Cell> {
//!         Some(match field {
//!             Field::Name => Cell::Text(self.name.clone()),
//!             Field::Age => Cell::Number(self.age),
//!         })
//!     }
//!
//!     fn with(&self, field: &Field, value: Option<Cell>) -> Self {
//!         let mut next = self.clone();
//!         match (field, value) {
//!             (Field::Name, Some(Cell::Text(name))) => next.name = name,
//!             (Field::Age, Some(Cell::Number(age))) => next.age = age,
//!             _ => {}
//!         }
//!         next
//!     }
//! }
//!
//! let people: Vec<Person> = (0..50_000)
//!     .map(|id| Person { id, name: format!("Person {id}"), age: i64::from(id % 90) })
//!     .collect();
//! let columns = vec![
//!     Column::new("name", "Name", Field::Name, 200.0).sortable().editable(),
//!     Column::new("age", "Age", Field::Age, 80.0).sortable(),
//! ];
//! let mut grid = DataGrid::new(columns, people, GridOptions::default()).unwrap();
//! grid.on_resize(Axis::Vertical, 700.0);
//!
//! // Only a window of rows is realized, however many there are.
//! assert_eq!(grid.visible_rows().count(), 28);
//!
//! // Sort by age, descending.
//! let age = ColumnId::from("age");
//! grid.toggle_sort(&age).unwrap();
//! grid.toggle_sort(&age).unwrap();
//! assert_eq!(grid.sorted_row(0).map(|p| p.age), Some(89));
//!
//! // Rename the first visible person.
//! grid.begin_edit(0, &ColumnId::from("name")).unwrap();
//! grid.set_edit_value(Some(Cell::Text("Ada".into()))).unwrap();
//! let outcome = futures::executor::block_on(grid.commit_edit(&AcceptAll));
//! assert_eq!(outcome, Some(CommitOutcome::Applied));
//! assert_eq!(grid.sorted_row(0).map(|p| p.name.as_str()), Some("Ada"));
//!
//! // Undo the rename, then both sort toggles.
//! assert!(grid.undo());
//! assert!(grid.undo());
//! assert!(grid.undo());
//! assert_eq!(grid.sorted_row(0).map(|p| p.id), Some(0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod column;
mod edit;
mod error;
mod grid;
mod navigation;
mod options;
mod row;
mod sort;
mod state;

#[cfg(test)]
mod testing;

pub use column::{Column, ColumnFlags, ColumnId, Pin, PinnedColumns};
pub use edit::{AcceptAll, CommitOutcome, CommitTicket, EditBuffer, EditHandler, EditPhase};
pub use error::{EditError, GridError};
pub use grid::DataGrid;
pub use navigation::{CellPosition, Direction, GridKey, KeyResponse};
pub use options::GridOptions;
pub use row::GridRow;
pub use sort::{SortDirection, SortRule, sorted_order, toggle_sort};
pub use state::{GridState, Revisions};
