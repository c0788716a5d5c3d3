// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use common::is_assigned;

use crate::{BitArray, BIT_MASK_U, BIT_SHIFT};

/// The coverage of the value combinations of two columns `first < second`.
///
/// The combination `(a, b)` is stored at bit `a * second_len + b`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinglePairState {
    first: usize,
    second: usize,
    first_len: usize,
    second_len: usize,
    map: Vec<BitArray>,
    num_selected: usize,
    count_first: Vec<usize>,
    count_second: Vec<usize>,
}

impl SinglePairState {
    /// Create a state without any covered combinations.
    pub fn new(first: usize, first_len: usize, second: usize, second_len: usize) -> Self {
        debug_assert!(first < second);
        let total = first_len * second_len;
        Self {
            first,
            second,
            first_len,
            second_len,
            map: vec![0; (total + BIT_MASK_U) >> BIT_SHIFT],
            num_selected: 0,
            count_first: vec![0; first_len],
            count_second: vec![0; second_len],
        }
    }

    /// The first (lowest) column.
    pub fn first(&self) -> usize {
        self.first
    }

    /// The second (highest) column.
    pub fn second(&self) -> usize {
        self.second
    }

    /// The number of values of the first column.
    pub fn first_len(&self) -> usize {
        self.first_len
    }

    /// The number of values of the second column.
    pub fn second_len(&self) -> usize {
        self.second_len
    }

    /// The number of value combinations.
    pub fn total(&self) -> usize {
        self.first_len * self.second_len
    }

    /// The number of covered combinations.
    pub fn num_selected(&self) -> usize {
        self.num_selected
    }

    /// The number of combinations left to cover.
    pub fn uncovered(&self) -> usize {
        self.total() - self.num_selected
    }

    /// Get the column on the other side of the pair.
    #[inline]
    pub fn other(&self, column: usize) -> usize {
        if column == self.first { self.second } else { self.first }
    }

    #[inline]
    fn index(&self, a: usize, b: usize) -> usize {
        debug_assert!(a < self.first_len && b < self.second_len);
        a * self.second_len + b
    }

    #[inline]
    fn get(&self, index: usize) -> bool {
        (self.map[index >> BIT_SHIFT] >> (index & BIT_MASK_U)) & 1 == 1
    }

    /// Returns true if the combination `(a, b)` is covered.
    pub fn is_selected(&self, a: usize, b: usize) -> bool {
        self.get(self.index(a, b))
    }

    /// Returns true if `value` of `column` is covered together with `other_value` of the other column.
    #[inline]
    pub fn is_selected_for(&self, column: usize, value: usize, other_value: usize) -> bool {
        if column == self.first {
            self.is_selected(value, other_value)
        } else {
            self.is_selected(other_value, value)
        }
    }

    /// Cover the combination `(a, b)`. Returns true if it was not covered before.
    pub fn select(&mut self, a: usize, b: usize) -> bool {
        let index = self.index(a, b);
        if self.get(index) {
            return false;
        }
        self.map[index >> BIT_SHIFT] |= (1 as BitArray) << (index & BIT_MASK_U);
        self.num_selected += 1;
        self.count_first[a] += 1;
        self.count_second[b] += 1;
        true
    }

    /// Cover the combination of the given selection, if both columns are assigned.
    pub fn select_row(&mut self, selection: &[usize]) -> bool {
        let (a, b) = (selection[self.first], selection[self.second]);
        is_assigned(a) && is_assigned(b) && self.select(a, b)
    }

    /// Returns true if both columns are assigned in the selection and their combination is not covered.
    pub fn is_new(&self, selection: &[usize]) -> bool {
        let (a, b) = (selection[self.first], selection[self.second]);
        is_assigned(a) && is_assigned(b) && !self.is_selected(a, b)
    }

    /// Returns true if all combinations are covered.
    pub fn is_complete(&self) -> bool {
        self.num_selected >= self.total()
    }

    /// The fraction of combinations left to cover.
    pub fn global_density(&self) -> f64 {
        1.0 - self.num_selected as f64 / self.total() as f64
    }

    /// The fraction of the other column's values not yet covered together with `value` of `column`.
    pub fn density_of(&self, column: usize, value: usize) -> f64 {
        if column == self.first {
            1.0 - self.count_first[value] as f64 / self.second_len as f64
        } else {
            1.0 - self.count_second[value] as f64 / self.first_len as f64
        }
    }

    /// Get the first uncovered combination in index order.
    pub fn first_uncovered(&self) -> Option<(usize, usize)> {
        let (word_index, &word) = self.map.iter().enumerate().find(|&(_, &word)| word != BitArray::MAX)?;
        let index = (word_index << BIT_SHIFT) + (!word).trailing_zeros() as usize;
        if index < self.total() {
            Some((index / self.second_len, index % self.second_len))
        } else {
            None
        }
    }

    /// Invert the coverage. The covered combinations become the ones left to cover.
    pub fn set_as_high_water_mark(&mut self) {
        let total = self.total();
        self.num_selected = total - self.num_selected;
        for count in self.count_first.iter_mut() {
            *count = self.second_len - *count;
        }
        for count in self.count_second.iter_mut() {
            *count = self.first_len - *count;
        }
        for word in self.map.iter_mut() {
            *word = !*word;
        }
        let used = total & BIT_MASK_U;
        if used != 0 {
            if let Some(last) = self.map.last_mut() {
                *last &= ((1 as BitArray) << used) - 1;
            }
        }
    }
}
