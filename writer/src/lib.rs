// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

//! This module contains the methods for writing the generated [Row]s to a file, and for reading them back.
//!
//! The file starts with a few lines starting with `#`, followed by the column names and one line per row:
//! ```text
//! # Number of columns: 3
//! # Number of rows: 9
//! p1,p2,p3
//! v1,a,x
//! ```
//! An unassigned column is written as [DONT_CARE_TEXT].

#![deny(missing_docs, rustdoc::missing_crate_level_docs, future_incompatible)]

use std::collections::HashMap;
use std::fmt::Display;
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use std::path::PathBuf;

use columns::ColumnSet;
use common::{DONT_CARE_TEXT, UNASSIGNED};
use row::Row;
use tracing::info;

const DONT_CARE_TEXT_BYTES: &[u8] = DONT_CARE_TEXT.as_bytes();

fn write_value<W: Write, V: Display>(
    file: &mut W,
    set: &ColumnSet<V>,
    column: usize,
    value: usize,
) -> std::io::Result<()> {
    match set.value(column, value) {
        Some(value) => write!(file, "{}", value),
        None => file.write_all(DONT_CARE_TEXT_BYTES),
    }
}

fn write_headers<W: Write, V>(set: &ColumnSet<V>, row_count: usize, file: &mut W) -> std::io::Result<()> {
    file.write_all(format!("# Number of columns: {}\n", set.len()).as_ref())?;
    file.write_all(format!("# Number of rows: {}\n", row_count).as_ref())?;
    file.write_all(set.names().join(",").as_bytes())?;
    file.write_all(b"\n")
}

fn write_selection<W: Write, V: Display>(set: &ColumnSet<V>, selection: &[usize], file: &mut W) -> std::io::Result<()> {
    for (column, &value) in selection.iter().enumerate() {
        if column > 0 {
            file.write_all(b",")?;
        }
        write_value(file, set, column, value)?;
    }
    file.write_all(b"\n")
}

/// Write the rows to the given writer, preceded by the headers.
pub fn write_rows<'s, W, V, I>(set: &ColumnSet<V>, row_count: usize, rows: I, file: &mut W) -> std::io::Result<()>
    where
        W: Write,
        V: Display + 's,
        I: Iterator<Item = Row<'s, V>>,
{
    write_headers(set, row_count, file)?;
    for row in rows {
        write_selection(set, row.selection(), file)?;
    }
    Ok(())
}

/// Write the given [Row]s to the given filename.
pub fn write_result<V: Display>(set: &ColumnSet<V>, rows: &[Row<'_, V>], filename: PathBuf) -> std::io::Result<()> {
    info!("The resulting suite has {} rows", rows.len());
    let mut writer = BufWriter::new(File::create(filename)?);
    write_headers(set, rows.len(), &mut writer)?;
    for row in rows {
        write_selection(set, row.selection(), &mut writer)?;
    }
    writer.flush()
}

/// Write the provided [Iterator] to a file.
///
/// The number of rows is needed up front for the headers.
pub fn write_result_iterable<'s, V, I>(set: &ColumnSet<V>, row_count: usize, rows: I, filename: PathBuf) -> std::io::Result<()>
    where
        V: Display + 's,
        I: Iterator<Item = Row<'s, V>>,
{
    info!("The resulting suite has {} rows", row_count);
    let mut writer = BufWriter::new(File::create(filename)?);
    write_rows(set, row_count, rows, &mut writer)?;
    writer.flush()
}

/// Read the selections written by [write_rows] back.
///
/// The column names should be the same as the names of the set, in the same order.
/// [DONT_CARE_TEXT] is read as [UNASSIGNED].
pub fn read_rows<V: Display, R: BufRead>(set: &ColumnSet<V>, reader: R) -> Result<Vec<Vec<usize>>, String> {
    let mut lines = reader.lines().enumerate().skip_while(|(_, l)| match l {
        Ok(l) => l.starts_with('#'),
        Err(_) => false,
    });

    let names_line = lines.next().ok_or("No column names line?")?.1.map_err(|e| e.to_string())?;
    let expected = set.names().join(",");
    if names_line != expected {
        return Err(format!("Columns incorrect:\n{}\n{}", names_line, expected));
    }

    let value_to_id: Vec<HashMap<String, usize>> = set.columns().iter().map(|column| {
        let mut sub_map = HashMap::with_capacity(column.len());
        for (id, value) in column.values().iter().enumerate() {
            sub_map.entry(value.to_string()).or_insert(id);
        }
        sub_map
    }).collect();

    let mut result = vec![];
    for (line_number, line) in lines {
        let line = line.map_err(|e| e.to_string())?;
        if line.is_empty() && !set.is_empty() {
            continue;
        }

        let values: Vec<&str> = if set.is_empty() { vec![] } else { line.split(',').collect() };
        if values.len() != set.len() {
            return Err(format!("Expected {} values on line {}: {}", set.len(), line_number + 1, line));
        }

        let mut selection = Vec::with_capacity(values.len());
        for (column, value) in values.into_iter().enumerate() {
            if value == DONT_CARE_TEXT {
                selection.push(UNASSIGNED);
            } else {
                match value_to_id[column].get(value) {
                    Some(&id) => selection.push(id),
                    None => return Err(format!("Unknown value {} on line {}: {}", value, line_number + 1, line)),
                }
            }
        }
        result.push(selection);
    }
    Ok(result)
}
