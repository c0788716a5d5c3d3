// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate provides the [ColumnSet], the input of every generator.
//! It also provides the [ConstraintRegistry] and the tools necessary to parse column definitions from text.
//!
//! # Column Set
//! A [ColumnSet] is an ordered list of named [Column]s, each with an ordered, non-empty list of candidate values.
//! The position of a column in the set is its index throughout the generators.
//! The set is immutable once constructed, apart from registering constraints in builder-style.
//!
//! # Constraints
//! A constraint is a [Predicate] over a prefix of a row.
//! It is registered against the column with the highest index it reads,
//! so it is only evaluated once all the columns it reads are assigned.
//! A predicate returning an error is treated as returning false.
//!
//! # Example
//! ```
//! use columns::ColumnSet;
//!
//! let set = ColumnSet::new(
//!     vec!["a".into(), "b".into()],
//!     vec![vec![1, 2, 3], vec![4, 5]],
//! ).expect("Both columns have values")
//!     .with_constraint("b", |row: &[&i32]| *row[0] + *row[1] != 6)
//!     .expect("Column b exists");
//!
//! assert_eq!(set.levels(), vec![3, 2]);
//! assert!(set.has_constraints());
//!
//! let parsed = columns::parse("
//!     p1: v0, v1, v2;
//!     p2: v0, v1;
//!
//!     $assert p1=v0 => p2=v1;
//! ").expect("Parsing error occurred");
//! assert_eq!(parsed.count_constraints(), 1);
//! ```

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::collections::HashMap;
use std::fmt::{Debug, Formatter};

use thiserror::Error;

pub use constraints::{Conjunction, ConstraintRegistry, Predicate, PredicateError};

mod constraints;
mod expr;
mod parser;

/// Error returned when a [ColumnSet] can not be constructed or extended.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColumnSetError {
    /// The number of names differs from the number of value lists.
    #[error("expected as many value lists as column names, got {names} names and {values} value lists")]
    CountMismatch {
        /// The number of column names provided.
        names: usize,
        /// The number of value lists provided.
        values: usize,
    },

    /// A column was provided without any candidate values.
    #[error("column {0} has no candidate values")]
    EmptyColumn(String),

    /// A constraint refers to a column that is not in the set.
    #[error("unknown column {0}")]
    UnknownColumn(String),

    /// A constraint was registered over no columns at all.
    #[error("a constraint should read at least one column")]
    EmptyConstraint,

    /// The textual definition could not be parsed.
    #[error("parsing error: {0}")]
    Parse(String),
}

/// A single named column with its candidate values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Column<V> {
    name: String,
    values: Vec<V>,
}

impl<V> Column<V> {
    /// Create a new column. Returns an error if no values are provided.
    pub fn new(name: impl Into<String>, values: Vec<V>) -> Result<Self, ColumnSetError> {
        let name = name.into();
        if values.is_empty() {
            return Err(ColumnSetError::EmptyColumn(name));
        }
        Ok(Self { name, values })
    }

    /// The name of the column.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The candidate values of the column in declaration order.
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// The number of candidate values. Never zero.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<V: Debug> Debug for Column<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:?}", self.name, self.values)
    }
}

/// The ordered set of columns for which rows are generated, together with its constraints.
pub struct ColumnSet<V> {
    columns: Vec<Column<V>>,
    constraints: ConstraintRegistry<V>,
}

impl<V> ColumnSet<V> {
    /// Create a new [ColumnSet] from the names and the candidate values of the columns.
    ///
    /// Both lists should have the same length and every column should have at least one value.
    pub fn new(names: Vec<String>, values: Vec<Vec<V>>) -> Result<Self, ColumnSetError> {
        if names.len() != values.len() {
            return Err(ColumnSetError::CountMismatch { names: names.len(), values: values.len() });
        }

        let columns = names
            .into_iter()
            .zip(values)
            .map(|(name, values)| Column::new(name, values))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self::from_columns(columns))
    }

    /// Create a new [ColumnSet] from already validated columns.
    pub fn from_columns(columns: Vec<Column<V>>) -> Self {
        let constraints = ConstraintRegistry::new(columns.len());
        Self { columns, constraints }
    }

    /// The number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if the set has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// All the columns in order.
    pub fn columns(&self) -> &[Column<V>] {
        &self.columns
    }

    /// Get the column at the given index.
    pub fn column(&self, index: usize) -> Option<&Column<V>> {
        self.columns.get(index)
    }

    /// The names of the columns in order.
    pub fn names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// The number of candidate values of each column.
    pub fn levels(&self) -> Vec<usize> {
        self.columns.iter().map(Column::len).collect()
    }

    /// Look up the index of the column with the given name.
    ///
    /// If names are not unique the first match is returned.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get the value with index `value` of column `column`.
    pub fn value(&self, column: usize, value: usize) -> Option<&V> {
        self.columns.get(column).and_then(|c| c.values.get(value))
    }

    /// Resolve a prefix of a selection into the values it refers to.
    ///
    /// Stops at the first unassigned or invalid index.
    pub fn resolve(&self, selection: &[usize]) -> Vec<&V> {
        selection
            .iter()
            .zip(self.columns.iter())
            .map_while(|(&index, column)| column.values.get(index))
            .collect()
    }

    /// The registered constraints.
    pub fn constraints(&self) -> &ConstraintRegistry<V> {
        &self.constraints
    }

    /// Returns true if any constraint is registered.
    pub fn has_constraints(&self) -> bool {
        self.constraints.has_constraints()
    }

    /// Returns the number of registered constraints.
    pub fn count_constraints(&self) -> usize {
        self.constraints.count()
    }

    /// Check the constraints registered on `column` against the given values of the columns `0..=column`.
    pub fn check(&self, column: usize, prefix: &[&V]) -> bool {
        self.constraints.check(column, prefix)
    }

    /// Check the constraints registered on `column` against the selection indices of the columns `0..=column`.
    ///
    /// The values are only resolved if the column has any constraints.
    /// A selection with an unassigned column in `0..=column` is rejected without calling any predicate.
    pub fn check_selection(&self, column: usize, selection: &[usize]) -> bool {
        if !self.constraints.is_constrained(column) {
            return true;
        }
        let prefix = self.resolve(&selection[..=column]);
        prefix.len() > column && self.constraints.check(column, &prefix)
    }

    /// Check every constraint against a complete selection.
    pub fn check_all(&self, selection: &[usize]) -> bool {
        (0..self.len()).all(|column| self.check_selection(column, selection))
    }

    fn require_index(&self, name: &str) -> Result<usize, ColumnSetError> {
        self.index_of(name).ok_or_else(|| ColumnSetError::UnknownColumn(name.to_string()))
    }
}

impl<V: 'static> ColumnSet<V> {
    /// Register a [Predicate] on the column with the given name.
    ///
    /// The predicate receives the values of all columns up to and including the named column.
    pub fn with_predicate<P: Predicate<V> + 'static>(mut self, name: &str, predicate: P) -> Result<Self, ColumnSetError> {
        let index = self.require_index(name)?;
        self.constraints.register(index, Box::new(predicate));
        Ok(self)
    }

    /// Register a constraint on the column with the given name.
    ///
    /// Multiple constraints on the same column are combined using a logical and.
    pub fn with_constraint<F>(self, name: &str, constraint: F) -> Result<Self, ColumnSetError>
        where F: Fn(&[&V]) -> bool + Send + Sync + 'static
    {
        self.with_predicate(name, constraints::Infallible(constraint))
    }

    /// Register a constraint that may fail on the column with the given name.
    ///
    /// A failure is treated as a violated constraint.
    pub fn with_fallible_constraint<F>(self, name: &str, constraint: F) -> Result<Self, ColumnSetError>
        where F: Fn(&[&V]) -> Result<bool, PredicateError> + Send + Sync + 'static
    {
        self.with_predicate(name, constraints::Fallible(constraint))
    }

    /// Register a constraint over the named subset of columns.
    ///
    /// The constraint receives only the values of the named columns, in the order they are named.
    /// It is evaluated as soon as the last of these columns is assigned.
    pub fn with_constraint_on<F>(mut self, names: &[&str], constraint: F) -> Result<Self, ColumnSetError>
        where F: Fn(&[&V]) -> bool + Send + Sync + 'static
    {
        let indices = names.iter().map(|name| self.require_index(name)).collect::<Result<Vec<_>, _>>()?;
        let target = match indices.iter().max() {
            Some(&target) => target,
            None => return Err(ColumnSetError::EmptyConstraint),
        };
        self.constraints.register(target, Box::new(constraints::Projected { indices, constraint }));
        Ok(self)
    }
}

impl<V: Debug> Debug for ColumnSet<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnSet")
            .field("columns", &self.columns)
            .field("constraints", &self.constraints.count())
            .finish()
    }
}

fn get_column_to_id<V>(columns: &[Column<V>]) -> HashMap<String, usize> {
    let mut result = HashMap::with_capacity(columns.len());
    for (id, column) in columns.iter().enumerate() {
        result.entry(column.name.clone()).or_insert(id);
    }
    result
}

fn get_value_to_id(columns: &[Column<String>]) -> Vec<HashMap<String, usize>> {
    let mut result = Vec::with_capacity(columns.len());
    for column in columns.iter() {
        let mut sub_map = HashMap::with_capacity(column.values.len());
        for (id, value) in column.values.iter().enumerate() {
            sub_map.entry(value.clone()).or_insert(id);
        }
        result.push(sub_map);
    }
    result
}

/// Parse the given `str` and return the [ColumnSet] with its `$assert` constraints.
pub fn parse(text: &str) -> Result<ColumnSet<String>, ColumnSetError> {
    let (text, columns) = parser::parameters::parse(text)?;
    let assertions = parser::constraints::parse(text)?;

    let mut set = ColumnSet::from_columns(columns);
    let column_to_id = get_column_to_id(&set.columns);
    let value_to_id = get_value_to_id(&set.columns);

    for mut assertion in assertions {
        let target = assertion.bind(&column_to_id, &value_to_id)?;
        set.constraints.register(target, Box::new(expr::Assertion::new(assertion)));
    }

    Ok(set)
}

/// Parse the given `str` and return the [ColumnSet] without any constraints.
///
/// The `$assert` lines are still checked for syntax errors.
pub fn parse_unconstrained(text: &str) -> Result<ColumnSet<String>, ColumnSetError> {
    let (text, columns) = parser::parameters::parse(text)?;
    parser::constraints::parse(text)?;
    Ok(ColumnSet::from_columns(columns))
}

#[cfg(test)]
mod lib_test;
