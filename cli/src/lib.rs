// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This crate provides a basic cli for the allpairs binaries.

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::fs::read_to_string;
use std::path::{Path, PathBuf};

pub use clap::crate_version;
use clap::{App, Arg, ArgMatches};
use columns::{parse, parse_unconstrained, ColumnSet};
use generate::Strategy;
use tracing_subscriber::EnvFilter;

const INPUT_FILE_ARG: &str = "input_file";
const OUTPUT_FILE_ARG: &str = "output_file";
const RESULT_FILE_ARG: &str = "result_file";
const MODE_ARG: &str = "mode";
const NO_CONSTRAINTS_ARG: &str = "no-constraints";
const VERBOSE_ARG: &str = "verbose";
const BIN_PREFIX: &str = "src/bin/";
const RUST_EXT: &str = ".rs";

/// The settings of a generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// The file with the definition of the columns.
    pub input: PathBuf,
    /// The file to write the rows to.
    pub output: PathBuf,
    /// The generator to use.
    pub strategy: Strategy,
    /// Whether the `$assert` lines are used.
    pub constraints: bool,
    /// The number of times `-v` was given.
    pub verbosity: u64,
}

fn input_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(INPUT_FILE_ARG)
        .required(true)
        .help("Set the input file with the definition of the columns.")
}

fn verbose_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name(VERBOSE_ARG)
        .short("v")
        .multiple(true)
        .help("Log more. Use twice to log every rejected candidate.")
}

fn get_app<'a, 'b>(app_name: &'a str, version: &'a str) -> App<'a, 'b>
where
    'a: 'b,
{
    App::new(app_name)
        .version(version)
        .arg(input_arg())
        .arg(
            Arg::with_name(OUTPUT_FILE_ARG)
                .short("o")
                .long("output")
                .required(false)
                .default_value("result.txt")
                .help("Set the output file."),
        )
        .arg(
            Arg::with_name(MODE_ARG)
                .short("m")
                .long("mode")
                .takes_value(true)
                .default_value("pairwise")
                .help("Set the generator: exhaustive or pairwise."),
        )
        .arg(
            Arg::with_name(NO_CONSTRAINTS_ARG)
                .short("n")
                .long("no-constraints")
                .help("Do not use the constraints in the provided file."),
        )
        .arg(verbose_arg())
}

fn get_check_app<'a, 'b>(app_name: &'a str, version: &'a str) -> App<'a, 'b>
where
    'a: 'b,
{
    App::new(app_name)
        .version(version)
        .arg(input_arg())
        .arg(
            Arg::with_name(RESULT_FILE_ARG)
                .required(true)
                .help("Set the file with the generated rows."),
        )
        .arg(verbose_arg())
}

fn validate_args(matches: &ArgMatches) -> Result<Settings, String> {
    let input = PathBuf::from(
        matches
            .value_of(INPUT_FILE_ARG)
            .ok_or("The input file should be provided")?,
    );

    let output = PathBuf::from(
        matches
            .value_of(OUTPUT_FILE_ARG)
            .ok_or("The output file should be provided")?,
    );

    if input == output {
        return Err("Input and output should not be the same!".to_string());
    }

    let strategy = matches
        .value_of(MODE_ARG)
        .ok_or("The mode should be provided")?
        .parse::<Strategy>()
        .map_err(|e| e.to_string())?;

    Ok(Settings {
        input,
        output,
        strategy,
        constraints: !matches.is_present(NO_CONSTRAINTS_ARG),
        verbosity: matches.occurrences_of(VERBOSE_ARG),
    })
}

fn strip_app_name(mut app_name: &str) -> &str {
    if let Some(stripped) = app_name.strip_suffix(RUST_EXT) {
        app_name = stripped;
    }
    app_name.strip_prefix(BIN_PREFIX).unwrap_or(app_name)
}

/// Read the column definitions from the given file.
///
/// The `$assert` lines are ignored if `constraints` is false.
pub fn load_set(path: &Path, constraints: bool) -> Result<ColumnSet<String>, String> {
    let contents = read_to_string(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    let set = if constraints {
        parse(contents.as_str())
    } else {
        parse_unconstrained(contents.as_str())
    };
    set.map_err(|e| e.to_string())
}

/// Install the global logger.
///
/// The level is `info`, `debug` or `trace` for a verbosity of 0, 1 or more. `RUST_LOG` takes precedence.
pub fn init_logging(verbosity: u64) -> Result<(), String> {
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .map_err(|e| e.to_string())
}

/// Parse the commandline arguments of the generator, install the logger, and return the [ColumnSet] and the [Settings].
pub fn parse_arguments(app_name: &str, version: &str) -> Result<(ColumnSet<String>, Settings), String> {
    let version = format!("v{}", version);
    let matches = get_app(strip_app_name(app_name), version.as_str()).get_matches();

    let settings = validate_args(&matches)?;
    init_logging(settings.verbosity)?;
    let set = load_set(&settings.input, settings.constraints)?;
    Ok((set, settings))
}

/// Parse the commandline arguments of the checker, install the logger, and return the [ColumnSet] and the path of the result file.
pub fn parse_check_arguments(app_name: &str, version: &str) -> Result<(ColumnSet<String>, PathBuf), String> {
    let version = format!("v{}", version);
    let matches = get_check_app(strip_app_name(app_name), version.as_str()).get_matches();

    init_logging(matches.occurrences_of(VERBOSE_ARG))?;
    let input = matches.value_of(INPUT_FILE_ARG).ok_or("The input file should be provided")?;
    let result = matches.value_of(RESULT_FILE_ARG).ok_or("The result file should be provided")?;
    let set = load_set(Path::new(input), true)?;
    Ok((set, PathBuf::from(result)))
}

#[cfg(test)]
mod test_lib;
