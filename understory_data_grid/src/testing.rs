// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Row and column fixtures shared by the unit tests.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::{Column, GridRow};

/// A map-like record keyed by field name.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Record {
    pub(crate) id: u32,
    pub(crate) cells: BTreeMap<&'static str, i64>,
}

impl GridRow for Record {
    type Id = u32;
    type Field = &'static str;
    type Value = i64;

    fn id(&self) -> u32 {
        self.id
    }

    fn get(&self, field: &&'static str) -> Option<i64> {
        self.cells.get(field).copied()
    }

    fn with(&self, field: &&'static str, value: Option<i64>) -> Self {
        let mut next = self.clone();
        match value {
            Some(value) => next.cells.insert(*field, value),
            None => next.cells.remove(field),
        };
        next
    }
}

pub(crate) fn rec(id: u32, cells: &[(&'static str, i64)]) -> Record {
    Record {
        id,
        cells: cells.iter().copied().collect(),
    }
}

/// Two sortable, editable columns `a` and `b`, 100 wide, reading fields of the same name.
pub(crate) fn columns_ab() -> Vec<Column<&'static str>> {
    alloc::vec![
        Column::new("a", "A", "a", 100.0).sortable().editable(),
        Column::new("b", "B", "b", 100.0).sortable().editable(),
    ]
}
