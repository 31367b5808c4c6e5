// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_history --heading-base-level=0

//! Understory History: a bounded, linear undo history over one state slot.
//!
//! [`History`] owns a single `current` value of any type together with a stack of
//! earlier values. Every mutation goes through [`History::set`] (replace) or
//! [`History::update`] (read-modify-write), which first saves the value being
//! replaced, so [`History::undo`] always restores the exact state that preceded
//! the most recent mutation.
//!
//! The stack has a fixed capacity (50 by default). Saving into a full stack evicts
//! the oldest snapshot first, in O(1), so once saturated the undo depth stays at
//! the capacity for the lifetime of the history.
//!
//! There is deliberately no redo: a value restored by [`History::undo`] is simply
//! the new `current`, and the next mutation is recorded like any other.
//!
//! ## Example
//!
//! ```rust
//! use understory_history::History;
//!
//! let mut counter = History::new(0_u32);
//! counter.set(5);
//! counter.update(|n| n + 1);
//! assert_eq!(*counter.current(), 6);
//!
//! assert!(counter.undo());
//! assert_eq!(*counter.current(), 5);
//! assert!(counter.undo());
//! assert_eq!(*counter.current(), 0);
//!
//! // Nothing left: undo is a silent no-op.
//! assert!(!counter.can_undo());
//! assert!(!counter.undo());
//! ```
//!
//! Snapshots are whole values, so large states should share their bulky parts
//! (for example behind an `Arc`) and only replace what a mutation touches.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::collections::VecDeque;

/// Number of snapshots kept by [`History::new`].
pub const DEFAULT_CAPACITY: usize = 50;

/// A state value plus a bounded stack of the values it replaced.
///
/// `History` is a single-writer structure: all mutation requires `&mut self`, so
/// every [`History::update`] observes the most recently installed value.
#[derive(Clone, Debug)]
pub struct History<T> {
    current: T,
    undo_stack: VecDeque<T>,
    capacity: usize,
}

impl<T> History<T> {
    /// Creates a history holding `initial`, keeping up to [`DEFAULT_CAPACITY`] snapshots.
    #[must_use]
    pub fn new(initial: T) -> Self {
        Self::with_capacity(initial, DEFAULT_CAPACITY)
    }

    /// Creates a history holding `initial`, keeping up to `capacity` snapshots.
    ///
    /// A capacity of zero records nothing, so [`History::can_undo`] is always `false`.
    #[must_use]
    pub fn with_capacity(initial: T, capacity: usize) -> Self {
        Self {
            current: initial,
            undo_stack: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// The current value.
    #[must_use]
    pub const fn current(&self) -> &T {
        &self.current
    }

    /// Consumes the history and returns the current value.
    #[must_use]
    pub fn into_current(self) -> T {
        self.current
    }

    /// Returns `true` if at least one snapshot can be restored.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Number of snapshots that can currently be restored.
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Maximum number of snapshots kept.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Replaces the current value, saving the old one for [`History::undo`].
    pub fn set(&mut self, value: T) {
        let previous = core::mem::replace(&mut self.current, value);
        self.record(previous);
    }

    /// Replaces the current value with `f(current)`, saving the old one for [`History::undo`].
    pub fn update(&mut self, f: impl FnOnce(&T) -> T) {
        let next = f(&self.current);
        self.set(next);
    }

    /// Restores the most recently saved value.
    ///
    /// Returns `false` (and changes nothing) when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo_stack.pop_back() {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    fn record(&mut self, snapshot: T) {
        if self.capacity == 0 {
            return;
        }
        if self.undo_stack.len() == self.capacity {
            self.undo_stack.pop_front();
            log::debug!(
                "undo history full ({} snapshots); evicted the oldest",
                self.capacity
            );
        }
        self.undo_stack.push_back(snapshot);
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;
    use alloc::vec::Vec;

    use super::{DEFAULT_CAPACITY, History};

    #[test]
    fn undo_restores_the_state_before_each_mutation() {
        let mut history = History::new(vec!['a']);
        history.update(|v| {
            let mut v = v.clone();
            v.push('b');
            v
        });
        history.set(vec!['z']);
        assert_eq!(history.undo_depth(), 2);

        assert!(history.undo());
        assert_eq!(history.current(), &vec!['a', 'b']);
        assert!(history.undo());
        assert_eq!(history.current(), &vec!['a']);
        assert!(!history.can_undo());
    }

    #[test]
    fn empty_undo_is_a_silent_no_op() {
        let mut history = History::new(7_i32);
        assert!(!history.can_undo());
        assert!(!history.undo());
        assert_eq!(*history.current(), 7);
    }

    #[test]
    fn saturated_history_evicts_the_initial_state() {
        let mut history = History::new(0_usize);
        for step in 1..=DEFAULT_CAPACITY + 1 {
            history.set(step);
        }
        assert_eq!(history.undo_depth(), DEFAULT_CAPACITY);

        let mut undone = 0;
        while history.undo() {
            undone += 1;
        }
        assert_eq!(undone, DEFAULT_CAPACITY);
        // The initial value was evicted; the first `set` is as far back as we can go.
        assert_eq!(*history.current(), 1);
    }

    #[test]
    fn depth_stays_capped_once_saturated() {
        let mut history = History::with_capacity(0_u8, 3);
        for step in 1..=10 {
            history.set(step);
            assert!(history.undo_depth() <= 3);
        }
        history.undo();
        history.set(42);
        assert_eq!(history.undo_depth(), 3);

        let mut seen = Vec::new();
        while history.undo() {
            seen.push(*history.current());
        }
        assert_eq!(seen, [9, 8, 7]);
    }

    #[test]
    fn mutation_after_undo_is_recorded_like_any_other() {
        let mut history = History::new("a");
        history.set("b");
        history.undo();
        history.set("c");
        assert_eq!(history.undo_depth(), 1);
        history.undo();
        assert_eq!(*history.current(), "a");
    }

    #[test]
    fn zero_capacity_never_records() {
        let mut history = History::with_capacity(1_i32, 0);
        history.set(2);
        history.update(|n| n * 10);
        assert_eq!(*history.current(), 20);
        assert!(!history.can_undo());
        assert_eq!(history.capacity(), 0);
        assert_eq!(history.into_current(), 20);
    }
}
