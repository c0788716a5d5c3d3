// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use crate::{parse, parse_unconstrained, ColumnSet, ColumnSetError, PredicateError};

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_empty() {
    match parse("") {
        Ok(_) => panic!("No result should be provided."),
        Err(_) => {}
    }
}

#[test]
fn test_empty_line() {
    match parse(";") {
        Ok(_) => panic!("No result should be provided."),
        Err(_) => {}
    }
}

#[test]
fn test_single_entry() {
    match parse("p1: v1;") {
        Ok(set) => {
            assert_eq!(set.levels(), vec![1]);
            assert_eq!(set.names(), vec!["p1"]);
            assert_eq!(set.columns()[0].values(), strings(&["v1"]).as_slice());
            assert!(!set.has_constraints());
        }
        Err(e) => panic!("Result for a simple line should not fail: {:?}", e),
    }
}

#[test]
fn test_incorrect_values() {
    match parse("p1: v1 a;") {
        Ok(_) => panic!("No result should be provided."),
        Err(_) => {}
    }
}

#[test]
fn test_multiple_keep_order() {
    match parse("p1 : v1, 3;\n p2 : v2, 4, true;") {
        Ok(set) => {
            assert_eq!(set.levels(), vec![2, 3]);
            assert_eq!(set.names(), vec!["p1", "p2"]);
            assert_eq!(set.columns()[1].values(), strings(&["v2", "4", "true"]).as_slice());
        }
        Err(e) => panic!("Result for a simple line should not fail: {:?}", e),
    }
}

#[test]
fn test_assertions() {
    let set = parse("
        p1: a, b, c;
        p2: a, b;
        p3: x, y;

        $assert p1=a => p2=b;
        $assert !(p3=x && p1=c);
    ").unwrap();

    assert_eq!(set.count_constraints(), 2);
    assert!(!set.constraints().is_constrained(0));
    assert!(set.constraints().is_constrained(1));
    assert!(set.constraints().is_constrained(2));

    let (a, b, c, x, y) = ("a".to_string(), "b".to_string(), "c".to_string(), "x".to_string(), "y".to_string());
    assert!(set.check(1, &[&a, &b]));
    assert!(!set.check(1, &[&a, &a]));
    assert!(set.check(1, &[&c, &a]));
    assert!(!set.check(2, &[&c, &a, &x]));
    assert!(set.check(2, &[&c, &a, &y]));
}

#[test]
fn test_assertion_unknown_names() {
    assert!(matches!(parse("p1: a, b;\n$assert p2=a;"), Err(ColumnSetError::Parse(_))));
    assert!(matches!(parse("p1: a, b;\n$assert p1=c;"), Err(ColumnSetError::Parse(_))));
}

#[test]
fn test_parse_unconstrained() {
    let set = parse_unconstrained("p1: a, b;\np2: c;\n$assert p1=a;").unwrap();
    assert_eq!(set.len(), 2);
    assert!(!set.has_constraints());
    assert!(parse_unconstrained("p1: a, b;\n$assert p1=a").is_err());
}

#[test]
fn test_new_errors() {
    assert_eq!(
        ColumnSet::<i32>::new(vec!["a".into(), "b".into()], vec![vec![1]]).unwrap_err(),
        ColumnSetError::CountMismatch { names: 2, values: 1 },
    );
    assert_eq!(
        ColumnSet::<i32>::new(vec!["a".into()], vec![vec![]]).unwrap_err(),
        ColumnSetError::EmptyColumn("a".into()),
    );
}

#[test]
fn test_empty_set() {
    let set = ColumnSet::<i32>::new(vec![], vec![]).unwrap();
    assert!(set.is_empty());
    assert_eq!(set.levels(), Vec::<usize>::new());
    assert!(!set.has_constraints());
}

#[test]
fn test_accessors() {
    let set = ColumnSet::new(strings(&["a", "b"]), vec![vec![1, 2, 3], vec![4, 5]]).unwrap();
    assert_eq!(set.len(), 2);
    assert_eq!(set.index_of("b"), Some(1));
    assert_eq!(set.index_of("c"), None);
    assert_eq!(set.value(0, 2), Some(&3));
    assert_eq!(set.value(1, 2), None);
    assert_eq!(set.column(1).map(|c| c.name()), Some("b"));
    assert_eq!(set.resolve(&[2, 0]), vec![&3, &4]);
    assert_eq!(set.resolve(&[1, common::UNASSIGNED]), vec![&2]);
}

#[test]
fn test_constraint_unknown_column() {
    let result = ColumnSet::new(strings(&["a"]), vec![vec![1]]).unwrap()
        .with_constraint("b", |_: &[&i32]| true);
    assert_eq!(result.unwrap_err(), ColumnSetError::UnknownColumn("b".into()));
}

#[test]
fn test_constraint_registration() {
    let set = ColumnSet::new(strings(&["a", "b", "c"]), vec![vec![1, 2], vec![1, 2], vec![1, 2]]).unwrap()
        .with_constraint("b", |row: &[&i32]| row[0] != row[1]).unwrap()
        .with_fallible_constraint("c", |row: &[&i32]| match row.get(2) {
            Some(&&v) => Ok(v == 2),
            None => Err(PredicateError::new("too short")),
        }).unwrap();

    assert_eq!(set.count_constraints(), 2);
    assert!(set.check(0, &[&1]));
    assert!(set.check(1, &[&1, &2]));
    assert!(!set.check(1, &[&2, &2]));
    assert!(set.check(2, &[&1, &2, &2]));
    assert!(!set.check(2, &[&1, &2, &1]));
    assert!(!set.check(2, &[&1, &2]));

    assert!(set.check_selection(0, &[1, 1, 1]));
    assert!(set.check_selection(1, &[0, 1, common::UNASSIGNED]));
    assert!(!set.check_selection(1, &[1, 1, common::UNASSIGNED]));
    assert!(!set.check_selection(2, &[0, 1, common::UNASSIGNED]));
    assert!(set.check_all(&[0, 1, 1]));
    assert!(!set.check_all(&[0, 1, 0]));
}

#[test]
fn test_constraint_on_subset() {
    let set = ColumnSet::new(strings(&["a", "b", "c"]), vec![vec![1, 2], vec![1, 2], vec![1, 2]]).unwrap()
        .with_constraint_on(&["c", "a"], |row: &[&i32]| *row[0] > *row[1]).unwrap();

    assert!(!set.constraints().is_constrained(0));
    assert!(!set.constraints().is_constrained(1));
    assert!(set.constraints().is_constrained(2));
    assert!(set.check(2, &[&1, &1, &2]));
    assert!(!set.check(2, &[&2, &1, &2]));

    let result = ColumnSet::new(strings(&["a"]), vec![vec![1]]).unwrap()
        .with_constraint_on(&[], |_: &[&i32]| true);
    assert_eq!(result.unwrap_err(), ColumnSetError::EmptyConstraint);
}
