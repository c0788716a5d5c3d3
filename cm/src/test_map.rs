// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use common::UNASSIGNED;
use lazy_static::lazy_static;

use super::*;

const U: usize = UNASSIGNED;

lazy_static! {
    static ref TWO_COLUMNS: CoverageMap = CoverageMap::new(vec![2, 3]);
    static ref LEVELS: Vec<usize> = vec![4, 3, 3, 2, 2];
}

fn two_columns(selected: &[(usize, usize)]) -> CoverageMap {
    let mut coverage_map = TWO_COLUMNS.clone();
    for &(a, b) in selected {
        coverage_map.select_row(&[a, b]);
    }
    coverage_map
}

#[test]
fn test_initial_state() {
    let coverage_map = two_columns(&[]);
    assert!(!coverage_map.is_complete());
    assert_eq!(coverage_map.uncovered(), 6);
    assert_eq!(coverage_map.first_uncovered(), Some((0, 0, 1, 0)));
}

#[test]
fn test_final_state() {
    let coverage_map = two_columns(&[(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    assert!(coverage_map.is_complete());
    assert_eq!(coverage_map.uncovered(), 0);
    assert_eq!(coverage_map.first_uncovered(), None);
}

#[test]
fn test_first_selection() {
    let coverage_map = two_columns(&[]);
    assert_eq!(coverage_map.select_given(0, &[U, U]), 0);
    assert_eq!(coverage_map.select_given(1, &[0, U]), 0);
}

#[test]
fn test_second_selection() {
    let coverage_map = two_columns(&[(0, 0)]);
    assert!(!coverage_map.is_complete());
    assert_eq!(coverage_map.select_given(0, &[U, U]), 1);
    assert_eq!(coverage_map.select_given(1, &[1, U]), 1);
}

#[test]
fn test_third_selection() {
    let coverage_map = two_columns(&[(0, 0), (1, 1)]);
    assert!(!coverage_map.is_complete());
    assert_eq!(coverage_map.select_given(0, &[U, U]), 0);
    assert_eq!(coverage_map.select_given(1, &[0, U]), 2);
}

#[test]
fn test_final_selection() {
    let coverage_map = two_columns(&[(0, 0), (1, 1), (0, 1), (0, 2), (1, 0)]);
    assert!(!coverage_map.is_complete());
    assert_eq!(coverage_map.select_given(0, &[U, U]), 1);
    assert_eq!(coverage_map.select_given(1, &[1, U]), 2);
    assert_eq!(coverage_map.first_uncovered(), Some((0, 1, 1, 2)));
}

#[test]
fn test_densities() {
    let coverage_map = two_columns(&[(0, 0)]);
    assert_eq!(coverage_map.global_density(0), 1.0 - 1.0 / 6.0);
    assert_eq!(coverage_map.local_density(0, 0, &[U, U]), 1.0 - 1.0 / 3.0);
    assert_eq!(coverage_map.local_density(1, 0, &[1, U]), 1.5);
    assert_eq!(coverage_map.local_density(1, 0, &[0, U]), 0.0);
    assert_eq!(coverage_map.ranked(1, &[0, U]), vec![1, 2, 0]);
}

#[test]
fn test_pair_index() {
    let columns = LEVELS.len();
    let mut expected = 0;
    for first in 0..columns {
        for second in first + 1..columns {
            assert_eq!(pair_index(columns, first, second), expected);
            expected += 1;
        }
    }
    assert_eq!(expected, common::pair_count(columns));
}

#[test]
fn test_pair_states() {
    let coverage_map = CoverageMap::new(LEVELS.clone());
    assert_eq!(coverage_map.pairs().len(), 10);
    assert_eq!(coverage_map.uncovered(), 12 + 12 + 8 + 8 + 9 + 6 + 6 + 6 + 6 + 4);

    let state = coverage_map.pair(1, 3);
    assert_eq!((state.first(), state.second()), (1, 3));
    assert_eq!(state.total(), 6);
    assert_eq!(state.other(3), 1);

    let column = coverage_map.column(2);
    assert_eq!(column.pairs().len(), 4);
    for &p in column.pairs() {
        let state = &coverage_map.pairs()[p];
        assert!(state.first() == 2 || state.second() == 2);
    }
}

#[test]
fn test_select_row() {
    let mut coverage_map = CoverageMap::new(LEVELS.clone());
    let uncovered = coverage_map.uncovered();

    assert_eq!(coverage_map.select_row(&[0, 0, 0, 0, 0]), 10);
    assert_eq!(coverage_map.select_row(&[0, 0, 0, 0, 1]), 4);
    assert_eq!(coverage_map.select_row(&[0, 0, 0, 0, 1]), 0);
    assert_eq!(coverage_map.select_row(&[1, U, U, U, 1]), 1);
    assert_eq!(coverage_map.uncovered(), uncovered - 15);

    assert!(!coverage_map.covers_new(&[0, 0, 0, 0, 0]));
    assert!(!coverage_map.covers_new(&[1, U, U, U, 1]));
    assert!(coverage_map.covers_new(&[1, U, U, U, 0]));
}

#[test]
fn test_column_order() {
    let mut coverage_map = CoverageMap::new(vec![2, 2, 2]);
    assert_eq!(coverage_map.column_order(), vec![0, 1, 2]);

    coverage_map.select_row(&[0, 0, U]);
    coverage_map.select_row(&[1, 1, U]);
    assert_eq!(coverage_map.column_order(), vec![2, 0, 1]);
}

#[test]
fn test_high_water_mark() {
    let mut coverage_map = CoverageMap::new(vec![3, 2, 2]);
    coverage_map.select_row(&[0, 0, 0]);
    coverage_map.select_row(&[1, 1, 1]);
    let reachable = coverage_map.clone();

    coverage_map.set_as_high_water_mark();
    assert_eq!(coverage_map.uncovered(), 6);
    assert!(!coverage_map.covers_new(&[2, 0, 1]));
    assert!(coverage_map.covers_new(&[0, 0, 1]));
    assert_eq!(coverage_map.first_uncovered(), Some((0, 0, 1, 0)));
    assert_eq!(coverage_map.pair(0, 1).density_of(0, 2), 0.0);
    assert_eq!(coverage_map.pair(0, 1).density_of(0, 0), 0.5);

    coverage_map.select_row(&[0, 0, 0]);
    coverage_map.select_row(&[1, 1, 1]);
    assert!(coverage_map.is_complete());
    assert_eq!(coverage_map.first_uncovered(), None);

    let fresh = CoverageMap::new(vec![3, 2, 2]);
    assert_eq!(fresh.missing(&reachable).len(), 6);
    assert!(reachable.missing(&reachable).is_empty());
}

#[test]
fn test_high_water_mark_word_boundary() {
    let mut coverage_map = CoverageMap::new(vec![8, 8, 2]);
    coverage_map.select_row(&[7, 7, 1]);
    coverage_map.set_as_high_water_mark();
    assert_eq!(coverage_map.pair(0, 1).uncovered(), 1);
    assert_eq!(coverage_map.pair(0, 1).first_uncovered(), Some((7, 7)));
    assert_eq!(coverage_map.pair(0, 2).first_uncovered(), Some((7, 1)));
}

#[test]
fn test_large_pair() {
    let mut coverage_map = CoverageMap::new(vec![13, 11]);
    for a in 0..13 {
        for b in 0..11 {
            if (a, b) != (12, 10) {
                coverage_map.select_row(&[a, b]);
            }
        }
    }
    assert!(!coverage_map.is_complete());
    assert_eq!(coverage_map.first_uncovered(), Some((0, 12, 1, 10)));
    coverage_map.select_row(&[12, 10]);
    assert!(coverage_map.is_complete());
}
