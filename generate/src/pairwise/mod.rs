// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This module contains the greedy pairwise generator.
//!
//! # Unconstrained
//! The columns are ordered by global density and each column gets the value with the highest local density.
//! If that row does not cover any new pair, it is rebuilt starting from the first uncovered pair.
//!
//! # Constrained
//! All rows satisfying the constraints are covered once and the coverage is inverted,
//! so only the reachable pairs are left to cover.
//! Each row is then built from left to right, trying the values of a column in order of local density.
//! Values violating the constraints are skipped, as are values for the last column that would not cover anything new.
//! If no value remains the generator backtracks to the previous column and skips one more of its values.

use cm::CoverageMap;
use columns::ColumnSet;
use common::{is_assigned, sub_time_it, UNASSIGNED};
use row::Row;
use tracing::{debug, info, trace};

use crate::exhaustive::ExhaustiveIterator;

/// The state of a pairwise generation session, ready to iterate.
///
/// Create it using [build].
pub struct GeneratorState<'s, V> {
    set: &'s ColumnSet<V>,
    coverage: CoverageMap,
    constrained: bool,
    done: bool,
}

/// Prepare the pairwise generation for the given set.
///
/// If the set has constraints, all the rows satisfying them are enumerated to find the reachable pairs.
/// Constraints that reject no row at all are ignored from then on.
/// A set with fewer than two columns has no pairs, so no rows are generated.
/// Use [crate::ColumnSetExt::pairwise_iterator] to fall back to the exhaustive generator for such sets.
pub fn build<V>(set: &ColumnSet<V>) -> GeneratorState<'_, V> {
    let levels = set.levels();
    let mut coverage = CoverageMap::new(levels.clone());
    let mut constrained = set.has_constraints();

    if constrained {
        let mut exhaustive = ExhaustiveIterator::new(set);
        let valid = sub_time_it!({
            let mut valid = 0;
            while let Some(selection) = exhaustive.next_selection() {
                coverage.select_row(&selection);
                valid += 1;
            }
            valid
        }, "High-water mark");

        let total = levels.iter().try_fold(1usize, |total, &level| total.checked_mul(level));
        if total == Some(valid) {
            info!("The constraints reject none of the {} rows", valid);
            coverage = CoverageMap::new(levels);
            constrained = false;
        } else {
            coverage.set_as_high_water_mark();
            info!("{} valid rows reach {} pairs", valid, coverage.uncovered());
        }
    }

    GeneratorState { set, coverage, constrained, done: false }
}

impl<'s, V> GeneratorState<'s, V> {
    /// The [ColumnSet] the rows are generated for.
    pub fn set(&self) -> &'s ColumnSet<V> {
        self.set
    }

    /// The current coverage.
    pub fn coverage(&self) -> &CoverageMap {
        &self.coverage
    }

    /// Returns true if the constrained algorithm is used.
    pub fn is_constrained(&self) -> bool {
        self.constrained
    }

    /// Get the selection indices of the next row and mark its pairs as covered.
    pub fn next_selection(&mut self) -> Option<Vec<usize>> {
        if self.done {
            return None;
        }

        let selection = if self.constrained { self.next_constrained() } else { self.next_unconstrained() };

        match selection {
            Some(selection) => {
                let covered = self.coverage.select_row(&selection);
                debug!(row = ?selection, covered, uncovered = self.coverage.uncovered(), "Generated row");
                Some(selection)
            }
            None => {
                self.done = true;
                None
            }
        }
    }

    fn next_unconstrained(&self) -> Option<Vec<usize>> {
        if self.coverage.is_complete() {
            return None;
        }

        let order = self.coverage.column_order();
        let mut selection = vec![UNASSIGNED; self.set.len()];
        self.fill(&order, &mut selection);

        if !self.coverage.covers_new(&selection) {
            let (first, a, second, b) = self.coverage.first_uncovered()?;
            trace!(first, a, second, b, "Greedy row is redundant, starting from the first uncovered pair");
            selection.fill(UNASSIGNED);
            selection[first] = a;
            selection[second] = b;
            self.fill(&order, &mut selection);
        }

        Some(selection)
    }

    fn fill(&self, order: &[usize], selection: &mut [usize]) {
        for &column in order.iter() {
            if !is_assigned(selection[column]) {
                selection[column] = self.coverage.select_given(column, selection);
            }
        }
    }

    fn next_constrained(&self) -> Option<Vec<usize>> {
        if self.coverage.is_complete() {
            return None;
        }

        let last = self.set.len() - 1;
        let mut selection = vec![UNASSIGNED; self.set.len()];
        let mut skip = vec![0; self.set.len()];
        let mut column = 0;

        loop {
            let mut chosen = None;
            let mut seen = 0;
            for value in self.coverage.ranked(column, &selection) {
                selection[column] = value;
                if !self.set.check_selection(column, &selection) {
                    continue;
                }
                if column == last && !self.coverage.covers_new(&selection) {
                    continue;
                }
                if seen == skip[column] {
                    chosen = Some(value);
                    break;
                }
                seen += 1;
            }

            match chosen {
                Some(value) => {
                    selection[column] = value;
                    if column == last {
                        return Some(selection);
                    }
                    column += 1;
                }
                None => {
                    selection[column] = UNASSIGNED;
                    skip[column] = 0;
                    if column == 0 {
                        return None;
                    }
                    column -= 1;
                    skip[column] += 1;
                    selection[column] = UNASSIGNED;
                    trace!(column, skip = skip[column], "Backtracking");
                }
            }
        }
    }
}

impl<'s, V> Iterator for GeneratorState<'s, V> {
    type Item = Row<'s, V>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_selection().map(|selection| Row::from_selection(self.set, selection))
    }
}
