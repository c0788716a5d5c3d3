// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate contains the generators of rows for a [ColumnSet].
//!
//! There are two generators:
//!   * [ExhaustiveIterator]: every row satisfying the constraints.
//!   * [GeneratorState]: a set of rows covering every reachable pair of values.
//!
//! Both generators are lazy, single-threaded and finite.
//! A fresh iterator starts from the beginning.
//!
//! # Example
//! ```
//! use columns::ColumnSet;
//! use generate::ColumnSetExt;
//!
//! let set = ColumnSet::new(
//!     vec!["a".into(), "b".into(), "c".into()],
//!     vec![vec![1, 2, 3], vec![1, 2, 3], vec![1, 2, 3]],
//! ).unwrap();
//!
//! assert_eq!(set.iterator().count(), 27);
//! assert_eq!(set.pairwise_iterator().count(), 9);
//! ```

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use cm::{CoverageMap, Interaction};
use columns::ColumnSet;
use row::Row;
use thiserror::Error;
use tracing::warn;

pub use exhaustive::ExhaustiveIterator;
pub use pairwise::{build, GeneratorState};

pub mod exhaustive;
pub mod pairwise;

/// Adds the generators to a [ColumnSet].
pub trait ColumnSetExt<V> {
    /// Iterate over every row satisfying the constraints.
    fn iterator<'s>(&'s self) -> ExhaustiveIterator<'s, V> where V: 's;

    /// Iterate over a set of rows covering every reachable pair.
    ///
    /// Falls back to [ColumnSetExt::iterator] if there are at most two columns.
    fn pairwise_iterator<'s>(&'s self) -> Box<dyn Iterator<Item = Row<'s, V>> + 's> where V: 's;
}

impl<V> ColumnSetExt<V> for ColumnSet<V> {
    fn iterator<'s>(&'s self) -> ExhaustiveIterator<'s, V> where V: 's {
        ExhaustiveIterator::new(self)
    }

    fn pairwise_iterator<'s>(&'s self) -> Box<dyn Iterator<Item = Row<'s, V>> + 's> where V: 's {
        if self.len() <= 2 {
            Box::new(self.iterator())
        } else {
            Box::new(build(self))
        }
    }
}

/// Error returned when parsing an unknown [Strategy].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown strategy {0}, expected exhaustive or pairwise")]
pub struct UnknownStrategy(pub String);

/// The generator to use.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Every row satisfying the constraints.
    Exhaustive,
    /// Every reachable pair is covered.
    #[default]
    Pairwise,
}

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "exhaustive" | "e" => Ok(Strategy::Exhaustive),
            "pairwise" | "p" => Ok(Strategy::Pairwise),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Strategy::Exhaustive => "exhaustive",
            Strategy::Pairwise => "pairwise",
        })
    }
}

/// Generate the rows for the given set using the given [Strategy].
pub fn generate<'s, V>(set: &'s ColumnSet<V>, strategy: Strategy) -> Box<dyn Iterator<Item = Row<'s, V>> + 's> where V: 's {
    match strategy {
        Strategy::Exhaustive => Box::new(set.iterator()),
        Strategy::Pairwise => set.pairwise_iterator(),
    }
}

/// The result of [check_coverage].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CoverageReport {
    /// The number of rows checked.
    pub rows: usize,
    /// The indices of the rows that are incomplete, out of range or violate a constraint.
    pub invalid_rows: Vec<usize>,
    /// The indices of the rows that are equal to an earlier row.
    pub duplicate_rows: Vec<usize>,
    /// The number of pairs that are part of at least one valid row.
    pub reachable: usize,
    /// The reachable pairs not covered by any of the rows.
    pub missing: Vec<Interaction>,
}

impl CoverageReport {
    /// Returns true if all rows are valid and distinct and all reachable pairs are covered.
    pub fn is_valid(&self) -> bool {
        self.invalid_rows.is_empty() && self.duplicate_rows.is_empty() && self.missing.is_empty()
    }
}

/// Check the given rows against the set.
///
/// The reachable pairs are found by enumerating all the rows satisfying the constraints.
pub fn check_coverage<V, I>(set: &ColumnSet<V>, rows: I) -> CoverageReport
    where
        I: IntoIterator,
        I::Item: AsRef<[usize]>,
{
    let levels = set.levels();
    let mut report = CoverageReport::default();
    let mut covered = CoverageMap::new(levels.clone());
    let mut seen = HashSet::new();

    for (index, row) in rows.into_iter().enumerate() {
        let selection = row.as_ref();
        report.rows += 1;

        let in_range = selection.len() == levels.len() && selection.iter().zip(levels.iter()).all(|(&s, &l)| s < l);
        if !in_range || !set.check_all(selection) {
            warn!(row = index, "Invalid row {:?}", selection);
            report.invalid_rows.push(index);
            continue;
        }

        if !seen.insert(selection.to_vec()) {
            report.duplicate_rows.push(index);
        }
        covered.select_row(selection);
    }

    let mut reachable = CoverageMap::new(levels);
    let mut exhaustive = ExhaustiveIterator::new(set);
    while let Some(selection) = exhaustive.next_selection() {
        reachable.select_row(&selection);
    }
    report.reachable = reachable.pairs().iter().map(|p| p.num_selected()).sum();
    report.missing = covered.missing(&reachable);
    report
}
