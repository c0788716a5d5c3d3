// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use std::fs::{remove_file, write};

use super::*;

fn settings(args: &[&str]) -> Result<Settings, String> {
    validate_args(&get_app("", "").get_matches_from(args))
}

#[test]
fn test_defaults() {
    assert_eq!(
        settings(&["exe", "input.txt"]),
        Ok(Settings {
            input: PathBuf::from("input.txt"),
            output: PathBuf::from("result.txt"),
            strategy: Strategy::Pairwise,
            constraints: true,
            verbosity: 0,
        })
    );
}

#[test]
fn test_validate_args() {
    let result = settings(&["exe", "input.txt", "-o", "out.txt", "-m", "exhaustive", "-n", "-vv"]).unwrap();
    assert_eq!(result.output, PathBuf::from("out.txt"));
    assert_eq!(result.strategy, Strategy::Exhaustive);
    assert!(!result.constraints);
    assert_eq!(result.verbosity, 2);

    assert_eq!(settings(&["exe", "input.txt", "--mode", "p"]).unwrap().strategy, Strategy::Pairwise);
    assert!(settings(&["exe", "input.txt", "-m", "random"]).is_err());
    assert!(settings(&["exe", "result.txt"]).is_err());
    assert!(settings(&["exe", "input.txt", "--output", "input.txt"]).is_err());
}

#[test]
fn test_check_app() {
    let matches = get_check_app("", "").get_matches_from(&["exe", "input.txt", "result.txt", "-v"]);
    assert_eq!(matches.value_of(INPUT_FILE_ARG), Some("input.txt"));
    assert_eq!(matches.value_of(RESULT_FILE_ARG), Some("result.txt"));
    assert_eq!(matches.occurrences_of(VERBOSE_ARG), 1);
}

#[test]
fn test_strip_app_name() {
    assert_eq!(strip_app_name("src/bin/allpairs.rs"), "allpairs");
    assert_eq!(strip_app_name("check-rows.rs"), "check-rows");
    assert_eq!(strip_app_name("allpairs"), "allpairs");
}

#[test]
fn test_load_set() {
    let path = std::env::temp_dir().join(format!("allpairs-cli-{}.txt", std::process::id()));
    write(&path, "p1: v1, v2;\np2: a, b;\n$assert p1=v1 => p2=a;\n").unwrap();

    let constrained = load_set(&path, true);
    let unconstrained = load_set(&path, false);
    remove_file(&path).unwrap();

    let constrained = constrained.unwrap();
    assert_eq!(constrained.names(), vec!["p1", "p2"]);
    assert_eq!(constrained.count_constraints(), 1);
    assert!(!unconstrained.unwrap().has_constraints());

    assert!(load_set(&path, true).is_err());
}
