// Copyright 2021 A Veenstra.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0> or the
// MIT license <LICENSE-MIT or https://opensource.org/licenses/MIT>, at your option. This file may not be copied,
// modified, or distributed except according to those terms.

use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{multispace0, multispace1};
use nom::combinator::{eof, map, opt, value};
use nom::multi::many0;
use nom::sequence::{delimited, preceded, terminated, tuple};
use nom::IResult;

use crate::expr;
use crate::ColumnSetError;

use super::{e2s, read_value};

fn not(text: &str) -> IResult<&str, Box<dyn expr::Expr>> {
    let (text, sub) = preceded(tag("!"), atom)(text)?;
    Ok((text, Box::new(expr::Not { sub })))
}

fn eq(text: &str) -> IResult<&str, Box<dyn expr::Expr>> {
    let (text, parameter) = read_value(text)?;
    let (text, _) = tag("=")(text)?;
    let (text, value) = read_value(text)?;
    Ok((text, Box::new(expr::Eq::new(parameter, value))))
}

fn par(text: &str) -> IResult<&str, Box<dyn expr::Expr>> {
    delimited(tag("("), parse_expr, tag(")"))(text)
}

fn atom(text: &str) -> IResult<&str, Box<dyn expr::Expr>> {
    delimited(multispace0, alt((not, par, eq)), multispace0)(text)
}

fn bin_op(text: &str) -> IResult<&str, expr::BOp> {
    alt((
        value(expr::BOp::And, tag("&&")),
        value(expr::BOp::Or, tag("||")),
        value(expr::BOp::Implies, tag("=>")),
    ))(text)
}

/// Binary operators are right-associative and share the same precedence.
fn parse_expr(text: &str) -> IResult<&str, Box<dyn expr::Expr>> {
    let (text, left) = atom(text)?;
    match opt(bin_op)(text)? {
        (text, Some(op)) => {
            let (text, right) = parse_expr(text)?;
            Ok((text, Box::new(expr::BinOp { left, op, right })))
        }
        (text, None) => Ok((text, left)),
    }
}

fn parse_constraint(text: &str) -> IResult<&str, Box<dyn expr::Expr>> {
    map(
        tuple((multispace0, tag("$assert"), multispace1, terminated(parse_expr, tag(";")))),
        |(_, _, _, result)| result,
    )(text)
}

/// Parse the `$assert` lines until the end of the text.
pub(crate) fn parse(text: &str) -> Result<Vec<Box<dyn expr::Expr>>, ColumnSetError> {
    let (text, constraints) = many0(parse_constraint)(text).map_err(e2s)?;
    preceded(multispace0, eof)(text).map_err(|e: nom::Err<nom::error::Error<&str>>| e2s(e))?;
    Ok(constraints)
}
