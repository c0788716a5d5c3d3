// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This module provides the [CoverageMap] used by the pairwise generator.
//!
//! For every unordered pair of columns `(i, j)` with `i < j` there is a [SinglePairState],
//! which records which value combinations have been emitted.
//! For every column there is a [PairWiseState], which combines all the pairs the column is part of
//! to calculate the density of the column and of its values.
//!
//! # Density
//! The global density of a column is the sum of the uncovered fraction of each of its pairs.
//! The local density of a value `v` of column `c` is the sum over the pairs of `c`:
//!   * if the other column is assigned `w` and `(v, w)` is not covered: `1 + novelty(v)`,
//!   * if the other column is unassigned: `novelty(v)`,
//!   * otherwise nothing,
//!
//! where `novelty(v)` is the fraction of the other column's values not yet covered together with `v`.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::cmp::Ordering;

use common::{is_assigned, pair_count};

pub use single::SinglePairState;

mod single;

#[cfg(test)]
mod test_map;

/// This the type of the elements of the bit matrices.
pub type BitArray = u64;

/// The mask used to get the index of the specific bit in the array.
pub const BIT_MASK_U: usize = std::mem::size_of::<BitArray>() * 8 - 1;
/// The number of bits to shift to get the index of the element in the array.
pub const BIT_SHIFT: usize = BIT_MASK_U.count_ones() as usize;

/// A pair that is not covered: `(first column, first value, second column, second value)`.
pub type Interaction = (usize, usize, usize, usize);

/// The view of a single column on the [SinglePairState]s it is part of.
#[derive(Debug, Clone)]
pub struct PairWiseState {
    column: usize,
    len: usize,
    pairs: Vec<usize>,
}

impl PairWiseState {
    fn new(column: usize, levels: &[usize]) -> Self {
        let pairs = (0..levels.len())
            .filter(|&other| other != column)
            .map(|other| pair_index(levels.len(), column.min(other), column.max(other)))
            .collect();
        Self { column, len: levels[column], pairs }
    }

    /// The column of this state.
    pub fn column(&self) -> usize {
        self.column
    }

    /// The indices of the pair states involving this column, ordered by the other column.
    pub fn pairs(&self) -> &[usize] {
        &self.pairs
    }

    /// The sum of the uncovered fractions of all pairs of this column.
    pub fn global_density(&self, states: &[SinglePairState]) -> f64 {
        self.pairs.iter().map(|&p| states[p].global_density()).sum()
    }

    /// The density of `value` given the values already chosen in `selection`.
    pub fn local_density(&self, states: &[SinglePairState], value: usize, selection: &[usize]) -> f64 {
        let mut density = 0.0;
        for &p in self.pairs.iter() {
            let state = &states[p];
            let other = selection[state.other(self.column)];
            if is_assigned(other) {
                if !state.is_selected_for(self.column, value, other) {
                    density += 1.0 + state.density_of(self.column, value);
                }
            } else {
                density += state.density_of(self.column, value);
            }
        }
        density
    }

    /// Get the value with the highest local density. Ties are won by the lowest value.
    pub fn select_given(&self, states: &[SinglePairState], selection: &[usize]) -> usize {
        let mut high_value = 0;
        let mut high_score = f64::NEG_INFINITY;
        for value in 0..self.len {
            let score = self.local_density(states, value, selection);
            if score > high_score {
                high_score = score;
                high_value = value;
            }
        }
        high_value
    }

    /// All the values of the column, ordered by descending local density. Ties keep their value order.
    pub fn ranked(&self, states: &[SinglePairState], selection: &[usize]) -> Vec<usize> {
        let mut scores: Vec<(usize, f64)> = (0..self.len)
            .map(|value| (value, self.local_density(states, value, selection)))
            .collect();
        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        scores.into_iter().map(|(value, _)| value).collect()
    }
}

/// Calculate the position of the pair `(first, second)` in the list of all pairs of `columns` columns.
#[inline]
pub fn pair_index(columns: usize, first: usize, second: usize) -> usize {
    debug_assert!(first < second && second < columns);
    first * columns - first * (first + 1) / 2 + (second - first - 1)
}

/// The coverage of all pairs of columns.
///
/// # Examples
/// ```
/// use cm::CoverageMap;
///
/// let mut coverage_map = CoverageMap::new(vec![2, 2, 2]);
/// assert_eq!(coverage_map.uncovered(), 12);
///
/// assert_eq!(coverage_map.select_row(&[0, 0, 0]), 3);
/// assert!(!coverage_map.covers_new(&[0, 0, 0]));
/// assert!(coverage_map.covers_new(&[0, 0, 1]));
/// assert_eq!(coverage_map.first_uncovered(), Some((0, 0, 1, 1)));
/// ```
#[derive(Debug, Clone)]
pub struct CoverageMap {
    levels: Vec<usize>,
    pairs: Vec<SinglePairState>,
    columns: Vec<PairWiseState>,
}

impl CoverageMap {
    /// Create a new [CoverageMap] for columns with the given number of values.
    pub fn new(levels: Vec<usize>) -> Self {
        let mut pairs = Vec::with_capacity(pair_count(levels.len()));
        for first in 0..levels.len() {
            for second in first + 1..levels.len() {
                pairs.push(SinglePairState::new(first, levels[first], second, levels[second]));
            }
        }
        let columns = (0..levels.len()).map(|column| PairWiseState::new(column, &levels)).collect();
        Self { levels, pairs, columns }
    }

    /// The number of values of each column.
    pub fn levels(&self) -> &[usize] {
        &self.levels
    }

    /// All the pair states, ordered by first and then second column.
    pub fn pairs(&self) -> &[SinglePairState] {
        &self.pairs
    }

    /// The pair state of the columns `first < second`.
    pub fn pair(&self, first: usize, second: usize) -> &SinglePairState {
        &self.pairs[pair_index(self.levels.len(), first, second)]
    }

    /// The state of the given column.
    pub fn column(&self, column: usize) -> &PairWiseState {
        &self.columns[column]
    }

    /// Mark all the pairs of the given selection as covered. Unassigned columns are skipped.
    ///
    /// Returns the number of newly covered pairs.
    pub fn select_row(&mut self, selection: &[usize]) -> usize {
        self.pairs.iter_mut().map(|state| state.select_row(selection)).filter(|&new| new).count()
    }

    /// Returns true iff all pairs are covered.
    pub fn is_complete(&self) -> bool {
        self.pairs.iter().all(SinglePairState::is_complete)
    }

    /// Returns true if the selection contains at least one uncovered pair.
    pub fn covers_new(&self, selection: &[usize]) -> bool {
        self.pairs.iter().any(|state| state.is_new(selection))
    }

    /// The number of pairs left to cover.
    pub fn uncovered(&self) -> usize {
        self.pairs.iter().map(SinglePairState::uncovered).sum()
    }

    /// Get the first uncovered pair, searching the pair states in order.
    pub fn first_uncovered(&self) -> Option<Interaction> {
        self.pairs.iter().find_map(|state| {
            state.first_uncovered().map(|(a, b)| (state.first(), a, state.second(), b))
        })
    }

    /// Invert the coverage of every pair state.
    ///
    /// Use after covering all reachable rows: unreachable pairs are then covered, and the reachable pairs are left to cover.
    pub fn set_as_high_water_mark(&mut self) {
        self.pairs.iter_mut().for_each(SinglePairState::set_as_high_water_mark);
    }

    /// All the pairs covered by `other` that are not covered by this map.
    ///
    /// Both maps should be created for the same levels.
    pub fn missing(&self, other: &CoverageMap) -> Vec<Interaction> {
        debug_assert_eq!(self.levels, other.levels, "The coverage maps should have the same levels");
        let mut result = vec![];
        for (mine, theirs) in self.pairs.iter().zip(other.pairs.iter()) {
            for a in 0..mine.first_len() {
                for b in 0..mine.second_len() {
                    if theirs.is_selected(a, b) && !mine.is_selected(a, b) {
                        result.push((mine.first(), a, mine.second(), b));
                    }
                }
            }
        }
        result
    }

    /// The global density of the given column.
    pub fn global_density(&self, column: usize) -> f64 {
        self.columns[column].global_density(&self.pairs)
    }

    /// The local density of `value` of `column` given the current selection.
    pub fn local_density(&self, column: usize, value: usize, selection: &[usize]) -> f64 {
        self.columns[column].local_density(&self.pairs, value, selection)
    }

    /// Get the value of `column` with the highest local density.
    pub fn select_given(&self, column: usize, selection: &[usize]) -> usize {
        self.columns[column].select_given(&self.pairs, selection)
    }

    /// All the values of `column`, ranked by local density.
    pub fn ranked(&self, column: usize, selection: &[usize]) -> Vec<usize> {
        self.columns[column].ranked(&self.pairs, selection)
    }

    /// All the columns, ordered by descending global density. Ties keep their column order.
    pub fn column_order(&self) -> Vec<usize> {
        let mut densities: Vec<(usize, f64)> = (0..self.levels.len())
            .map(|column| (column, self.global_density(column)))
            .collect();
        densities.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        densities.into_iter().map(|(column, _)| column).collect()
    }
}
