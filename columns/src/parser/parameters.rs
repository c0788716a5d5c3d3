// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use nom::bytes::complete::tag;
use nom::multi::{many1, separated_list1};
use nom::IResult;

use crate::{Column, ColumnSetError};

use super::{e2s, read_value};

fn parse_values(text: &str) -> IResult<&str, Vec<&str>> {
    separated_list1(tag(","), read_value)(text)
}

fn parse_parameter(text: &str) -> IResult<&str, (&str, Vec<&str>)> {
    let (text, parameter) = read_value(text)?;
    let (text, _) = tag(":")(text)?;
    let (text, values) = parse_values(text)?;
    let (text, _) = tag(";")(text)?;
    Ok((text, (parameter, values)))
}

/// Parse the column lines at the start of the text.
/// Returns the remaining text together with the columns.
pub(crate) fn parse(text: &str) -> Result<(&str, Vec<Column<String>>), ColumnSetError> {
    let (rest, parameters) = many1(parse_parameter)(text).map_err(e2s)?;
    let columns = parameters
        .into_iter()
        .map(|(name, values)| Column::new(name, values.into_iter().map(String::from).collect()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((rest, columns))
}
