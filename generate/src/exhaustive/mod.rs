// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This module contains the generator of the Cartesian product of a [ColumnSet].
//!
//! The columns are enumerated depth-first in declaration order, so the last column varies fastest.
//! Every time a column gets a value, the constraints registered on that column are checked against the prefix.
//! A value that violates them is skipped together with all the combinations of the columns after it.

use columns::ColumnSet;
use common::{is_assigned, UNASSIGNED};
use row::Row;
use tracing::trace;

/// Lazily enumerates all rows of a [ColumnSet] that satisfy its constraints.
///
/// The iterator keeps one cursor per column and a depth.
/// Columns before the depth are assigned, columns after it are [UNASSIGNED].
pub struct ExhaustiveIterator<'s, V> {
    set: &'s ColumnSet<V>,
    levels: Vec<usize>,
    cursor: Vec<usize>,
    depth: usize,
    done: bool,
}

impl<'s, V> ExhaustiveIterator<'s, V> {
    /// Create a new iterator positioned before the first row.
    pub fn new(set: &'s ColumnSet<V>) -> Self {
        Self {
            set,
            levels: set.levels(),
            cursor: vec![UNASSIGNED; set.len()],
            depth: 0,
            done: false,
        }
    }

    /// Get the selection indices of the next row.
    ///
    /// A set without any columns has exactly one row, which is empty.
    pub fn next_selection(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }

        if self.cursor.is_empty() {
            self.done = true;
            return Some(vec![]);
        }

        loop {
            let depth = self.depth;
            let next = if is_assigned(self.cursor[depth]) { self.cursor[depth] + 1 } else { 0 };

            if next >= self.levels[depth] {
                self.cursor[depth] = UNASSIGNED;
                if depth == 0 {
                    self.done = true;
                    return None;
                }
                self.depth -= 1;
                continue;
            }

            self.cursor[depth] = next;
            if !self.set.check_selection(depth, &self.cursor) {
                trace!(column = depth, value = next, "Rejected by constraint");
                continue;
            }

            if depth + 1 == self.cursor.len() {
                return Some(self.cursor.clone());
            }
            self.depth += 1;
        }
    }
}

impl<'s, V> Iterator for ExhaustiveIterator<'s, V> {
    type Item = Row<'s, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_selection().map(|selection| Row::from_selection(self.set, selection))
    }
}
