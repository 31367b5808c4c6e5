// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column definitions, flags, and the pinned partition.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

/// Identifier of a column. Unique within a grid and immutable.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColumnId(Arc<str>);

impl ColumnId {
    /// Creates an identifier from any string.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ColumnId {
    fn from(id: String) -> Self {
        Self(Arc::from(id))
    }
}

bitflags::bitflags! {
    /// Column capabilities and visibility.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ColumnFlags: u8 {
        /// Clicking the header toggles sorting on this column.
        const SORTABLE  = 0b0000_0001;
        /// The column width can be changed by the user.
        const RESIZABLE = 0b0000_0010;
        /// Cells of this column can be edited.
        const EDITABLE  = 0b0000_0100;
        /// The column is hidden from the view (it keeps its place and width).
        const HIDDEN    = 0b0000_1000;
    }
}

impl Default for ColumnFlags {
    fn default() -> Self {
        Self::RESIZABLE
    }
}

/// Edge a column is pinned to, outside the horizontally scrolling region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Pin {
    /// Fixed to the leading edge.
    Left,
    /// Fixed to the trailing edge.
    Right,
}

/// One column of the grid.
///
/// `F` is the row's field key ([`GridRow::Field`](crate::GridRow::Field)).
#[derive(Clone, Debug, PartialEq)]
pub struct Column<F> {
    /// Unique, immutable identifier.
    pub id: ColumnId,
    /// Header text.
    pub title: String,
    /// Field of each row displayed in this column.
    pub field: F,
    /// Current width, in the same units as the column axis.
    pub width: f64,
    /// Smallest width a resize may produce. `None` uses the grid default.
    pub min_width: Option<f64>,
    /// Largest width a resize may produce.
    pub max_width: Option<f64>,
    /// Capabilities and visibility.
    pub flags: ColumnFlags,
    /// Pinned edge, if any.
    pub pinned: Option<Pin>,
}

impl<F> Column<F> {
    /// Creates a resizable, unpinned, visible column.
    #[must_use]
    pub fn new(id: impl Into<ColumnId>, title: impl Into<String>, field: F, width: f64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            field,
            width,
            min_width: None,
            max_width: None,
            flags: ColumnFlags::default(),
            pinned: None,
        }
    }

    /// Marks the column sortable.
    #[must_use]
    pub fn sortable(mut self) -> Self {
        self.flags.insert(ColumnFlags::SORTABLE);
        self
    }

    /// Marks the column editable.
    #[must_use]
    pub fn editable(mut self) -> Self {
        self.flags.insert(ColumnFlags::EDITABLE);
        self
    }

    /// Makes the column width fixed.
    #[must_use]
    pub fn fixed_width(mut self) -> Self {
        self.flags.remove(ColumnFlags::RESIZABLE);
        self
    }

    /// Starts the column hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.flags.insert(ColumnFlags::HIDDEN);
        self
    }

    /// Pins the column to `pin`.
    #[must_use]
    pub fn pinned(mut self, pin: Pin) -> Self {
        self.pinned = Some(pin);
        self
    }

    /// Sets the smallest width a resize may produce.
    #[must_use]
    pub fn with_min_width(mut self, min_width: f64) -> Self {
        self.min_width = Some(min_width);
        self
    }

    /// Sets the largest width a resize may produce.
    #[must_use]
    pub fn with_max_width(mut self, max_width: f64) -> Self {
        self.max_width = Some(max_width);
        self
    }

    /// Returns `true` unless the column is hidden.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        !self.flags.contains(ColumnFlags::HIDDEN)
    }

    /// Returns `true` if the column can be sorted on.
    #[must_use]
    pub fn is_sortable(&self) -> bool {
        self.flags.contains(ColumnFlags::SORTABLE)
    }

    /// Returns `true` if the column can be resized.
    #[must_use]
    pub fn is_resizable(&self) -> bool {
        self.flags.contains(ColumnFlags::RESIZABLE)
    }

    /// Returns `true` if the column's cells can be edited.
    #[must_use]
    pub fn is_editable(&self) -> bool {
        self.flags.contains(ColumnFlags::EDITABLE)
    }

    /// Clamps a requested width to this column's bounds.
    ///
    /// `default_min` applies when the column declares no minimum. A maximum
    /// below the minimum loses to the minimum.
    #[must_use]
    pub fn clamp_width(&self, width: f64, default_min: f64) -> f64 {
        let min = self.min_width.unwrap_or(default_min);
        let width = match self.max_width {
            Some(max) if width > max => max,
            _ => width,
        };
        if width < min { min } else { width }
    }
}

/// Visible columns split by pinning, each group in original relative order.
#[derive(Debug)]
pub struct PinnedColumns<'a, F> {
    /// Columns pinned to the leading edge.
    pub left: Vec<&'a Column<F>>,
    /// Unpinned columns; these are the items of the column virtualizer.
    pub center: Vec<&'a Column<F>>,
    /// Columns pinned to the trailing edge.
    pub right: Vec<&'a Column<F>>,
}

impl<'a, F> PinnedColumns<'a, F> {
    /// Partitions the visible columns of `columns`. Hidden columns are dropped.
    #[must_use]
    pub fn partition(columns: &'a [Column<F>]) -> Self {
        let mut left = Vec::new();
        let mut center = Vec::new();
        let mut right = Vec::new();
        for column in columns.iter().filter(|c| c.is_visible()) {
            match column.pinned {
                Some(Pin::Left) => left.push(column),
                Some(Pin::Right) => right.push(column),
                None => center.push(column),
            }
        }
        Self {
            left,
            center,
            right,
        }
    }

    /// Total number of visible columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.left.len() + self.center.len() + self.right.len()
    }

    /// Returns `true` if no column is visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The column at a logical index: left columns first, then center, then right.
    #[must_use]
    pub fn get(&self, logical: usize) -> Option<&'a Column<F>> {
        self.iter().nth(logical)
    }

    /// All visible columns in logical order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Column<F>> + '_ {
        self.left
            .iter()
            .chain(&self.center)
            .chain(&self.right)
            .copied()
    }

    /// Logical index of the center column at `center_index`.
    #[must_use]
    pub fn logical_index_of_center(&self, center_index: usize) -> usize {
        self.left.len() + center_index
    }

    /// Combined width of the left-pinned columns.
    #[must_use]
    pub fn left_width(&self) -> f64 {
        self.left.iter().map(|c| c.width).sum()
    }

    /// Combined width of the right-pinned columns.
    #[must_use]
    pub fn right_width(&self) -> f64 {
        self.right.iter().map(|c| c.width).sum()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{Column, ColumnFlags, ColumnId, Pin, PinnedColumns};

    fn ids<'a, F>(columns: &[&'a Column<F>]) -> Vec<&'a str> {
        columns.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn partition_keeps_relative_order_and_drops_hidden() {
        let columns = vec![
            Column::new("a", "A", (), 10.0),
            Column::new("b", "B", (), 20.0).pinned(Pin::Right),
            Column::new("c", "C", (), 30.0).pinned(Pin::Left),
            Column::new("d", "D", (), 40.0).hidden(),
            Column::new("e", "E", (), 50.0),
            Column::new("f", "F", (), 60.0).pinned(Pin::Left),
            Column::new("g", "G", (), 70.0).pinned(Pin::Right),
        ];
        let pinned = PinnedColumns::partition(&columns);

        assert_eq!(ids(&pinned.left), ["c", "f"]);
        assert_eq!(ids(&pinned.center), ["a", "e"]);
        assert_eq!(ids(&pinned.right), ["b", "g"]);
        assert_eq!(pinned.len(), 6);
        assert_eq!(pinned.left_width(), 90.0);
        assert_eq!(pinned.right_width(), 90.0);

        let logical: Vec<&str> = pinned.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(logical, ["c", "f", "a", "e", "b", "g"]);
        assert_eq!(pinned.get(3).map(|c| c.id.as_str()), Some("e"));
        assert_eq!(pinned.logical_index_of_center(1), 3);
        assert!(pinned.get(6).is_none());
    }

    #[test]
    fn builder_sets_flags() {
        let column = Column::new("name", "Name", (), 100.0).sortable().editable();
        assert!(column.is_sortable());
        assert!(column.is_editable());
        assert!(column.is_resizable());
        assert!(column.is_visible());

        let fixed = Column::new("id", "ID", (), 50.0).fixed_width();
        assert_eq!(fixed.flags, ColumnFlags::empty());
    }

    #[test]
    fn clamp_width_honours_bounds() {
        let column = Column::new("a", "A", (), 100.0);
        assert_eq!(column.clamp_width(10.0, 50.0), 50.0);
        assert_eq!(column.clamp_width(500.0, 50.0), 500.0);

        let bounded = Column::new("b", "B", (), 100.0)
            .with_min_width(80.0)
            .with_max_width(200.0);
        assert_eq!(bounded.clamp_width(10.0, 50.0), 80.0);
        assert_eq!(bounded.clamp_width(150.0, 50.0), 150.0);
        assert_eq!(bounded.clamp_width(900.0, 50.0), 200.0);
    }

    #[test]
    fn column_ids_compare_by_content() {
        assert_eq!(ColumnId::from("age"), ColumnId::new(alloc::string::String::from("age")));
        assert_eq!(alloc::format!("{}", ColumnId::from("age")), "age");
    }
}
