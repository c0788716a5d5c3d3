// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use std::fmt::Debug;

use nom::bytes::complete::take_while1;
use nom::character::complete::multispace0;
use nom::sequence::delimited;
use nom::IResult;

use crate::ColumnSetError;

pub(crate) mod parameters;
pub(crate) mod constraints;

fn e2s<T: Debug>(e: T) -> ColumnSetError {
    ColumnSetError::Parse(format!("{:?}", e))
}

fn is_value_char(input: char) -> bool {
    matches!(input, 'a'..='z' | 'A'..='Z' | '0'..='9' | '-' | '_')
}

fn read_value(input: &str) -> IResult<&str, &str> {
    delimited(multispace0, take_while1(is_value_char), multispace0)(input)
}
