// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate contains a binary which checks whether a result file covers every reachable pair.
//!
//! The reachable pairs are found by enumerating every valid row, so only use this for small definitions or be ready to wait.

use std::fs::File;
use std::io::BufReader;

use allpairs::cli::{crate_version, parse_check_arguments};
use allpairs::common::time_it;
use allpairs::generate::check_coverage;
use allpairs::writer::read_rows;
use tracing::{error, info};

/// Converts an [std::io::Error] to a [String].
fn ioe<V>(result: std::io::Result<V>) -> Result<V, String> {
    result.map_err(|e| e.to_string())
}

/// Check the result file given on the command line.
fn main() -> Result<(), String> {
    let (set, result_path) = time_it!(parse_check_arguments(file!(), crate_version!()), "Parsing")?;
    let rows = read_rows(&set, BufReader::new(ioe(File::open(result_path))?))?;
    let report = time_it!(check_coverage(&set, &rows), "Checking");

    for &index in report.invalid_rows.iter() {
        error!("Invalid row {}: {:?}", index, rows[index]);
    }
    for &index in report.duplicate_rows.iter() {
        error!("Duplicate row {}: {:?}", index, rows[index]);
    }
    for &(first, first_value, second, second_value) in report.missing.iter() {
        error!(
            "Pair not covered: {}={}, {}={}",
            set.names()[first], set.value(first, first_value).map_or("?", String::as_str),
            set.names()[second], set.value(second, second_value).map_or("?", String::as_str),
        );
    }

    if report.is_valid() {
        info!("{} rows cover all {} reachable pairs", report.rows, report.reachable);
        Ok(())
    } else {
        Err(format!(
            "{} invalid rows, {} duplicate rows, {} of {} reachable pairs not covered",
            report.invalid_rows.len(), report.duplicate_rows.len(), report.missing.len(), report.reachable
        ))
    }
}
