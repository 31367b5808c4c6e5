// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Multi-key sorting of rows.

use alloc::vec::Vec;
use core::cmp::Ordering;

use hashbrown::HashMap;
use smallvec::SmallVec;

use crate::{Column, ColumnId, GridRow};

/// Sort direction of one rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SortDirection {
    /// Smallest values first.
    Ascending,
    /// Largest values first.
    Descending,
}

/// One key of a multi-key sort. Earlier rules take priority.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SortRule {
    /// Column whose field is compared.
    pub column_id: ColumnId,
    /// Order of the comparison.
    pub direction: SortDirection,
}

impl SortRule {
    /// Creates an ascending rule.
    #[must_use]
    pub fn ascending(column_id: impl Into<ColumnId>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Ascending,
        }
    }

    /// Creates a descending rule.
    #[must_use]
    pub fn descending(column_id: impl Into<ColumnId>) -> Self {
        Self {
            column_id: column_id.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Advances the sort state of `column_id` one step: none → ascending → descending → none.
///
/// A rule that stays active moves to the end of the list, so the most recently
/// toggled column becomes the lowest priority key.
#[must_use]
pub fn toggle_sort(rules: &[SortRule], column_id: &ColumnId) -> Vec<SortRule> {
    let mut next = Vec::with_capacity(rules.len() + 1);
    let mut previous = None;
    for rule in rules {
        if &rule.column_id == column_id {
            previous = Some(rule.direction);
        } else {
            next.push(rule.clone());
        }
    }
    let direction = match previous {
        None => Some(SortDirection::Ascending),
        Some(SortDirection::Ascending) => Some(SortDirection::Descending),
        Some(SortDirection::Descending) => None,
    };
    if let Some(direction) = direction {
        next.push(SortRule {
            column_id: column_id.clone(),
            direction,
        });
    }
    next
}

/// Computes the display order of `rows` under `rules`.
///
/// Returns indices into `rows`. The sort is stable: rows that compare equal on
/// every rule keep their original relative order. Rules naming a hidden or
/// unknown column are skipped. Empty cells sort after every value regardless of
/// direction, and values that do not compare (such as NaN) count as equal.
#[must_use]
pub fn sorted_order<R: GridRow>(
    rows: &[R],
    rules: &[SortRule],
    columns: &[Column<R::Field>],
) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rows.len()).collect();

    let visible: HashMap<&ColumnId, &Column<R::Field>> = columns
        .iter()
        .filter(|c| c.is_visible())
        .map(|c| (&c.id, c))
        .collect();
    let keys: SmallVec<[(&R::Field, SortDirection); 4]> = rules
        .iter()
        .filter_map(|rule| {
            visible
                .get(&rule.column_id)
                .map(|column| (&column.field, rule.direction))
        })
        .collect();
    if keys.is_empty() {
        return order;
    }

    // Read every key once up front rather than on each comparison.
    let values: Vec<SmallVec<[Option<R::Value>; 4]>> = rows
        .iter()
        .map(|row| keys.iter().map(|(field, _)| row.get(field)).collect())
        .collect();

    order.sort_by(|&a, &b| {
        keys.iter()
            .zip(values[a].iter().zip(&values[b]))
            .map(|((_, direction), (a, b))| compare_cells(a.as_ref(), b.as_ref(), *direction))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });
    order
}

fn compare_cells<V: PartialOrd>(a: Option<&V>, b: Option<&V>, direction: SortDirection) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => {
            let ordering = a.partial_cmp(b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{SortDirection, SortRule, sorted_order, toggle_sort};
    use crate::testing::{Record, columns_ab, rec};
    use crate::{Column, ColumnId};

    fn ids(rows: &[Record], order: &[usize]) -> Vec<u32> {
        order.iter().map(|&i| rows[i].id).collect()
    }

    #[test]
    fn multi_key_sort_applies_rules_in_priority_order() {
        let rows = vec![
            rec(1, &[("a", 2), ("b", 1)]),
            rec(2, &[("a", 1), ("b", 1)]),
            rec(3, &[("a", 1), ("b", 0)]),
        ];
        let rules = [SortRule::ascending("a"), SortRule::ascending("b")];
        let order = sorted_order(&rows, &rules, &columns_ab());
        assert_eq!(ids(&rows, &order), [3, 2, 1]);
    }

    #[test]
    fn descending_reverses_only_its_own_key() {
        let rows = vec![
            rec(1, &[("a", 2), ("b", 1)]),
            rec(2, &[("a", 1), ("b", 1)]),
            rec(3, &[("a", 1), ("b", 0)]),
        ];
        let rules = [SortRule::ascending("a"), SortRule::descending("b")];
        let order = sorted_order(&rows, &rules, &columns_ab());
        assert_eq!(ids(&rows, &order), [2, 3, 1]);
    }

    #[test]
    fn empty_cells_sort_last_in_both_directions() {
        let rows = vec![rec(1, &[]), rec(2, &[("a", 5)]), rec(3, &[("a", 7)])];
        let asc = sorted_order(&rows, &[SortRule::ascending("a")], &columns_ab());
        assert_eq!(ids(&rows, &asc), [2, 3, 1]);
        let desc = sorted_order(&rows, &[SortRule::descending("a")], &columns_ab());
        assert_eq!(ids(&rows, &desc), [3, 2, 1]);
    }

    #[test]
    fn equal_rows_keep_their_original_order() {
        let rows = vec![
            rec(4, &[("a", 1)]),
            rec(2, &[("a", 0)]),
            rec(9, &[("a", 1)]),
            rec(1, &[("a", 1)]),
        ];
        let order = sorted_order(&rows, &[SortRule::ascending("a")], &columns_ab());
        assert_eq!(ids(&rows, &order), [2, 4, 9, 1]);
    }

    #[test]
    fn rules_on_hidden_or_unknown_columns_are_skipped() {
        let rows = vec![rec(1, &[("a", 2), ("b", 0)]), rec(2, &[("a", 1), ("b", 1)])];
        let mut columns = columns_ab();
        columns[0] = columns[0].clone().hidden();
        let rules = [
            SortRule::ascending("missing"),
            SortRule::ascending("a"),
            SortRule::descending("b"),
        ];
        let order = sorted_order(&rows, &rules, &columns);
        assert_eq!(ids(&rows, &order), [2, 1]);

        let none: [Column<&str>; 0] = [];
        assert_eq!(sorted_order(&rows, &rules, &none), vec![0, 1]);
    }

    #[test]
    fn toggle_cycles_and_moves_rule_to_the_end() {
        let a = ColumnId::from("a");
        let b = ColumnId::from("b");

        let rules = toggle_sort(&[], &a);
        assert_eq!(rules, [SortRule::ascending("a")]);
        let rules = toggle_sort(&rules, &b);
        assert_eq!(rules, [SortRule::ascending("a"), SortRule::ascending("b")]);
        let rules = toggle_sort(&rules, &a);
        assert_eq!(rules, [SortRule::ascending("b"), SortRule::descending("a")]);
        let rules = toggle_sort(&rules, &a);
        assert_eq!(rules, [SortRule::ascending("b")]);
        assert_eq!(rules[0].direction, SortDirection::Ascending);
    }
}
