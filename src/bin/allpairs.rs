// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate contains a binary writing the rows generated for a definition file.

use allpairs::cli::{crate_version, parse_arguments};
use allpairs::common::time_it;
use allpairs::generate::generate;
use allpairs::writer::write_result;
use tracing::info;

/// Generate the rows for the given command line arguments.
fn main() -> Result<(), String> {
    let (set, settings) = time_it!(parse_arguments(file!(), crate_version!()), "Parsing")?;
    info!(
        "{} columns, {} constraints, {} strategy",
        set.len(), set.count_constraints(), settings.strategy
    );

    let rows: Vec<_> = time_it!(generate(&set, settings.strategy).collect(), "Generation");
    time_it!(
        write_result(&set, &rows, settings.output).map_err(|e| e.to_string()),
        "Writing"
    )
}
