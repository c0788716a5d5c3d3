// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate provides the [Row], a (partial) assignment of values to the columns of a [ColumnSet].
//!
//! A row stores one selection index per column. The index refers to a value of the column,
//! or is [UNASSIGNED] if the column does not have a value yet.
//! The values are only resolved when [Row::values] is called, and only once.
//!
//! # Example
//! ```
//! use columns::ColumnSet;
//! use row::Row;
//!
//! let set = ColumnSet::new(vec!["a".into(), "b".into()], vec![vec![1, 2], vec![3, 4]]).unwrap();
//! let row = Row::new(&set).with_value(1, 0).with_value(0, 1);
//!
//! assert!(row.is_complete());
//! assert_eq!(row.values(), &[&2, &3]);
//! assert_eq!(row.to_string(), "[1, 0]");
//! ```

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::cell::OnceCell;
use std::fmt::{Debug, Display, Formatter};

use columns::ColumnSet;
pub use common::UNASSIGNED;
use common::{is_assigned, DONT_CARE_TEXT};

/// A fixed-length selection of value indices, one for each column of a [ColumnSet].
pub struct Row<'s, V> {
    set: &'s ColumnSet<V>,
    selection: Vec<usize>,
    values: OnceCell<Vec<&'s V>>,
}

impl<'s, V> Row<'s, V> {
    /// Create a row with all columns unassigned.
    pub fn new(set: &'s ColumnSet<V>) -> Self {
        Self::from_selection(set, vec![UNASSIGNED; set.len()])
    }

    /// Create a row from the given selection indices.
    ///
    /// The selection should contain an entry for every column of the set.
    pub fn from_selection(set: &'s ColumnSet<V>, selection: Vec<usize>) -> Self {
        debug_assert_eq!(selection.len(), set.len());
        Self { set, selection, values: OnceCell::new() }
    }

    /// Return a copy of this row with `column` set to the value index `value`.
    pub fn with_value(&self, value: usize, column: usize) -> Self {
        let mut selection = self.selection.clone();
        selection[column] = value;
        Self::from_selection(self.set, selection)
    }

    /// The [ColumnSet] this row selects values from.
    pub fn set(&self) -> &'s ColumnSet<V> {
        self.set
    }

    /// The selection index of each column. Unassigned columns are [UNASSIGNED].
    pub fn selection(&self) -> &[usize] {
        &self.selection
    }

    /// Consume the row and return its selection indices.
    pub fn into_selection(self) -> Vec<usize> {
        self.selection
    }

    /// The selection index of the given column, if it is assigned.
    pub fn get(&self, column: usize) -> Option<usize> {
        self.selection.get(column).copied().filter(|&s| is_assigned(s))
    }

    /// The number of columns of the row.
    pub fn len(&self) -> usize {
        self.selection.len()
    }

    /// Returns true if the row has no columns.
    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Returns true if every column is assigned.
    pub fn is_complete(&self) -> bool {
        self.selection.iter().all(|&s| is_assigned(s))
    }

    /// The values of the row in column order.
    ///
    /// The values are resolved on the first call and cached afterwards.
    /// For a partial row only the values up to the first unassigned column are returned.
    pub fn values(&self) -> &[&'s V] {
        self.values.get_or_init(|| self.set.resolve(&self.selection))
    }
}

impl<'s, V: Clone> Row<'s, V> {
    /// Resolve the values of the row into owned values.
    pub fn to_values(&self) -> Vec<V> {
        self.values().iter().map(|&v| v.clone()).collect()
    }
}

impl<'s, V> Clone for Row<'s, V> {
    fn clone(&self) -> Self {
        Self { set: self.set, selection: self.selection.clone(), values: self.values.clone() }
    }
}

impl<'s, V> PartialEq for Row<'s, V> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.set, other.set) && self.selection == other.selection
    }
}

impl<'s, V> Eq for Row<'s, V> {}

impl<'s, V> Display for Row<'s, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("[")?;
        for (index, &selection) in self.selection.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            if is_assigned(selection) {
                write!(f, "{}", selection)?;
            } else {
                f.write_str(DONT_CARE_TEXT)?;
            }
        }
        f.write_str("]")
    }
}

impl<'s, V: Debug> Debug for Row<'s, V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Row")
            .field("selection", &self.selection)
            .field("values", &self.values())
            .finish()
    }
}
