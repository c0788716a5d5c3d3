// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use std::fmt::{Debug, Formatter};

use thiserror::Error;
use tracing::debug;

/// Error returned by a [Predicate] that could not be evaluated.
///
/// The generators treat such an error as a violated constraint.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("predicate failed: {message}")]
pub struct PredicateError {
    message: String,
}

impl PredicateError {
    /// Create a new error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The message describing the failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A constraint over the values of a row.
///
/// The provided row contains the values of all the columns up to and including the column the predicate is registered on.
pub trait Predicate<V>: Send + Sync {
    /// Returns whether the given row prefix satisfies the predicate.
    fn test(&self, row: &[&V]) -> Result<bool, PredicateError>;
}

/// Wraps a closure which can not fail.
pub(crate) struct Infallible<F>(pub(crate) F);

impl<V, F> Predicate<V> for Infallible<F> where F: Fn(&[&V]) -> bool + Send + Sync {
    #[inline]
    fn test(&self, row: &[&V]) -> Result<bool, PredicateError> {
        Ok((self.0)(row))
    }
}

/// Wraps a closure which reports its own failures.
pub(crate) struct Fallible<F>(pub(crate) F);

impl<V, F> Predicate<V> for Fallible<F> where F: Fn(&[&V]) -> Result<bool, PredicateError> + Send + Sync {
    #[inline]
    fn test(&self, row: &[&V]) -> Result<bool, PredicateError> {
        (self.0)(row)
    }
}

/// Wraps a closure which only reads some of the columns.
///
/// The values of the columns at `indices` are passed to the closure in the order of `indices`.
pub(crate) struct Projected<F> {
    pub(crate) indices: Vec<usize>,
    pub(crate) constraint: F,
}

impl<V, F> Predicate<V> for Projected<F> where F: Fn(&[&V]) -> bool + Send + Sync {
    fn test(&self, row: &[&V]) -> Result<bool, PredicateError> {
        let mut projection = Vec::with_capacity(self.indices.len());
        for &index in self.indices.iter() {
            match row.get(index) {
                Some(&value) => projection.push(value),
                None => return Err(PredicateError::new(format!("column {} is not assigned", index))),
            }
        }
        Ok((self.constraint)(projection.as_slice()))
    }
}

/// The combination of all the predicates registered on one column.
///
/// All the predicates have to hold. The first failure is reported.
pub struct Conjunction<'r, V> {
    predicates: &'r [Box<dyn Predicate<V>>],
}

impl<'r, V> Conjunction<'r, V> {
    /// The number of predicates combined.
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Returns true if no predicates are combined, which never happens for a conjunction returned by the registry.
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl<'r, V> Predicate<V> for Conjunction<'r, V> {
    fn test(&self, row: &[&V]) -> Result<bool, PredicateError> {
        for predicate in self.predicates.iter() {
            if !predicate.test(row)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// The predicates of a [crate::ColumnSet], indexed by the column they are registered on.
pub struct ConstraintRegistry<V> {
    predicates: Vec<Vec<Box<dyn Predicate<V>>>>,
}

impl<V> ConstraintRegistry<V> {
    /// Create an empty registry for the given number of columns.
    pub fn new(columns: usize) -> Self {
        let mut predicates = Vec::with_capacity(columns);
        predicates.resize_with(columns, Vec::new);
        Self { predicates }
    }

    /// Register a predicate on the given column.
    ///
    /// # Panics
    /// If the column is out of range.
    pub fn register(&mut self, column: usize, predicate: Box<dyn Predicate<V>>) {
        assert!(column < self.predicates.len(), "column {} is out of range", column);
        self.predicates[column].push(predicate);
    }

    /// Get the combination of all predicates on the given column, if there are any.
    pub fn predicate_for(&self, column: usize) -> Option<Conjunction<'_, V>> {
        match self.predicates.get(column) {
            Some(predicates) if !predicates.is_empty() => Some(Conjunction { predicates }),
            _ => None,
        }
    }

    /// Returns true if any predicate is registered on the given column.
    pub fn is_constrained(&self, column: usize) -> bool {
        self.predicates.get(column).map_or(false, |p| !p.is_empty())
    }

    /// Check the predicates registered on `column` for the given prefix.
    ///
    /// A predicate returning an error rejects the prefix.
    pub fn check(&self, column: usize, prefix: &[&V]) -> bool {
        match self.predicate_for(column) {
            None => true,
            Some(conjunction) => match conjunction.test(prefix) {
                Ok(valid) => valid,
                Err(e) => {
                    debug!(column = column, "Exception while checking constraint: {}", e);
                    false
                }
            },
        }
    }

    /// Returns true if any predicate is registered.
    pub fn has_constraints(&self) -> bool {
        self.predicates.iter().any(|p| !p.is_empty())
    }

    /// The total number of registered predicates.
    pub fn count(&self) -> usize {
        self.predicates.iter().map(Vec::len).sum()
    }
}

impl<V> Debug for ConstraintRegistry<V> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.predicates.iter().map(Vec::len)).finish()
    }
}
