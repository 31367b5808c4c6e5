// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The row abstraction the grid is generic over.

use core::fmt::Debug;
use core::hash::Hash;

/// A record displayed as one grid row.
///
/// Rows are identified by [`GridRow::id`], never by position, and cells are read
/// and written through a field key. This keeps the grid generic over an opaque
/// value type: hosts with plain structs can use a field enum, hosts with
/// map-like records can use a string key.
///
/// The grid does not check that an edited value suits the field's type; that is
/// the business of the host's [`EditHandler`](crate::EditHandler).
pub trait GridRow: Clone {
    /// Stable, unique row identity.
    type Id: Clone + Eq + Hash + Debug;
    /// Key naming one cell of a row. Each [`Column`](crate::Column) holds one.
    type Field: Clone + Debug;
    /// Cell value. Ordering is used for sorting; incomparable pairs sort as equal.
    type Value: Clone + PartialOrd + Debug;

    /// The row's identity.
    fn id(&self) -> Self::Id;

    /// Reads the value of `field`, or `None` if the cell is empty.
    fn get(&self, field: &Self::Field) -> Option<Self::Value>;

    /// Returns a copy of this row with `field` replaced by `value` (`None` clears it).
    ///
    /// The copy must keep the same [`GridRow::id`] and leave every other field untouched.
    #[must_use]
    fn with(&self, field: &Self::Field, value: Option<Self::Value>) -> Self;
}
