// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use std::collections::HashMap;
use std::fmt::{Debug, Error, Formatter};

use common::UNASSIGNED;

use crate::{ColumnSetError, Predicate, PredicateError};

#[derive(Copy, Clone, PartialEq, Eq)]
pub(crate) enum BOp {
    And,
    Or,
    Implies,
}

impl std::fmt::Debug for BOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        f.write_str(match self {
            BOp::And => " && ",
            BOp::Or => " || ",
            BOp::Implies => " => ",
        })
    }
}

pub(crate) trait Expr: Debug + Send + Sync {
    fn fmt_no_parenthesis(&self, f: &mut Formatter<'_>) -> Result<(), Error>;

    /// Resolve the column names of the expression into indices.
    /// Returns the highest column index the expression reads.
    fn bind(&mut self, column_to_id: &HashMap<String, usize>, value_to_id: &[HashMap<String, usize>]) -> Result<usize, ColumnSetError>;

    fn evaluate(&self, row: &[&String]) -> Result<bool, PredicateError>;
}

pub(crate) struct Not {
    pub(crate) sub: Box<dyn Expr>,
}

impl Expr for Not {
    fn fmt_no_parenthesis(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.write_str("!(")
            .and_then(|_| self.sub.fmt_no_parenthesis(f))
            .and_then(|_| f.write_str(")"))
    }

    fn bind(&mut self, column_to_id: &HashMap<String, usize>, value_to_id: &[HashMap<String, usize>]) -> Result<usize, ColumnSetError> {
        self.sub.bind(column_to_id, value_to_id)
    }

    fn evaluate(&self, row: &[&String]) -> Result<bool, PredicateError> {
        self.sub.evaluate(row).map(|b| !b)
    }
}

impl Debug for Not {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.fmt_no_parenthesis(f)
    }
}

pub(crate) struct BinOp {
    pub(crate) left: Box<dyn Expr>,
    pub(crate) op: BOp,
    pub(crate) right: Box<dyn Expr>,
}

impl Expr for BinOp {
    fn fmt_no_parenthesis(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.left.fmt(f)
            .and_then(|_| self.op.fmt(f))
            .and_then(|_| self.right.fmt(f))
    }

    fn bind(&mut self, column_to_id: &HashMap<String, usize>, value_to_id: &[HashMap<String, usize>]) -> Result<usize, ColumnSetError> {
        let left = self.left.bind(column_to_id, value_to_id)?;
        let right = self.right.bind(column_to_id, value_to_id)?;
        Ok(left.max(right))
    }

    fn evaluate(&self, row: &[&String]) -> Result<bool, PredicateError> {
        let left = self.left.evaluate(row)?;
        Ok(match self.op {
            BOp::And => left && self.right.evaluate(row)?,
            BOp::Or => left || self.right.evaluate(row)?,
            BOp::Implies => !left || self.right.evaluate(row)?,
        })
    }
}

impl Debug for BinOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.write_str("(")
            .and_then(|_| self.fmt_no_parenthesis(f))
            .and_then(|_| f.write_str(")"))
    }
}

pub(crate) struct Eq {
    pub(crate) parameter: String,
    pub(crate) value: String,
    pub(crate) column: usize,
}

impl Eq {
    pub(crate) fn new(parameter: &str, value: &str) -> Self {
        Self { parameter: parameter.to_string(), value: value.to_string(), column: UNASSIGNED }
    }
}

impl Expr for Eq {
    fn fmt_no_parenthesis(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.fmt(f)
    }

    fn bind(&mut self, column_to_id: &HashMap<String, usize>, value_to_id: &[HashMap<String, usize>]) -> Result<usize, ColumnSetError> {
        let column = *column_to_id.get(&self.parameter)
            .ok_or_else(|| ColumnSetError::Parse(format!("unknown column {}", self.parameter)))?;
        if !value_to_id[column].contains_key(&self.value) {
            return Err(ColumnSetError::Parse(format!("unknown value {} for column {}", self.value, self.parameter)));
        }
        self.column = column;
        Ok(column)
    }

    fn evaluate(&self, row: &[&String]) -> Result<bool, PredicateError> {
        match row.get(self.column) {
            Some(&value) => Ok(*value == self.value),
            None => Err(PredicateError::new(format!("column {} is not assigned", self.parameter))),
        }
    }
}

impl Debug for Eq {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        f.write_str(&self.parameter)
            .and_then(|_| f.write_str("="))
            .and_then(|_| f.write_str(&self.value))
    }
}

/// A parsed `$assert` line, bound to the columns of a set.
pub(crate) struct Assertion {
    expr: Box<dyn Expr>,
}

impl Assertion {
    pub(crate) fn new(expr: Box<dyn Expr>) -> Self {
        Self { expr }
    }
}

impl Predicate<String> for Assertion {
    fn test(&self, row: &[&String]) -> Result<bool, PredicateError> {
        self.expr.evaluate(row)
    }
}

impl Debug for Assertion {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        self.expr.fmt_no_parenthesis(f)
    }
}
