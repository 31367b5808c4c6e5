// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Grid configuration.

/// Tunables of a [`DataGrid`](crate::DataGrid).
///
/// All extents are in the host's logical units (usually pixels).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridOptions {
    /// Height of every row.
    pub row_height: f64,
    /// Rows realized beyond each edge of the viewport.
    pub row_overscan: usize,
    /// Center columns realized beyond each edge of the viewport.
    pub column_overscan: usize,
    /// Minimum width for columns that declare none.
    pub default_min_width: f64,
    /// Number of undo snapshots kept.
    pub history_depth: usize,
}

impl GridOptions {
    /// Default row height.
    pub const DEFAULT_ROW_HEIGHT: f64 = 40.0;
    /// Default row overscan.
    pub const DEFAULT_ROW_OVERSCAN: usize = 10;
    /// Default column overscan.
    pub const DEFAULT_COLUMN_OVERSCAN: usize = 3;
    /// Default minimum column width.
    pub const DEFAULT_MIN_WIDTH: f64 = 50.0;
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            row_height: Self::DEFAULT_ROW_HEIGHT,
            row_overscan: Self::DEFAULT_ROW_OVERSCAN,
            column_overscan: Self::DEFAULT_COLUMN_OVERSCAN,
            default_min_width: Self::DEFAULT_MIN_WIDTH,
            history_depth: understory_history::DEFAULT_CAPACITY,
        }
    }
}
