//! nom parsers for the few textual style values a document may carry:
//! lengths with units, margin shorthands and border shorthands.

use crate::border::{Border, BorderStyle};
use crate::dimension::Margins;
use folio_types::Color;
use nom::branch::alt;
use nom::bytes::complete::{tag_no_case, take_while1};
use nom::character::complete::{space0, space1};
use nom::combinator::{all_consuming, map, map_res, opt, value};
use nom::multi::separated_list1;
use nom::number::complete::float;
use nom::sequence::{delimited, pair, preceded};
use nom::{IResult, Parser};
use thiserror::Error;

/// Errors that can occur during style parsing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleParseError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Invalid value for '{property}': {value}")]
    InvalidValue { property: String, value: String },
}

fn unit(input: &str) -> IResult<&str, f32> {
    alt((
        value(1.0, tag_no_case("pt")),
        // px is treated as pt
        value(1.0, tag_no_case("px")),
        value(72.0, tag_no_case("in")),
        value(28.35, tag_no_case("cm")),
        value(2.835, tag_no_case("mm")),
    ))
    .parse(input)
}

/// Parses a length with an optional unit (e.g. `12`, `12pt`, `1in`, `2.5cm`).
/// Unitless values are points.
pub fn length(input: &str) -> IResult<&str, f32> {
    map(pair(float, opt(unit)), |(amount, factor)| {
        amount * factor.unwrap_or(1.0)
    })
    .parse(input)
}

/// Parses a margin shorthand of 1, 2 or 4 lengths.
pub fn margins(input: &str) -> IResult<&str, Margins> {
    map_res(separated_list1(space1, length), |parts: Vec<f32>| {
        match parts.as_slice() {
            [all] => Ok(Margins::all(*all)),
            [vertical, horizontal] => Ok(Margins {
                top: *vertical,
                right: *horizontal,
                bottom: *vertical,
                left: *horizontal,
            }),
            [top, right, bottom, left] => Ok(Margins {
                top: *top,
                right: *right,
                bottom: *bottom,
                left: *left,
            }),
            _ => Err(StyleParseError::Parse(format!(
                "expected 1, 2 or 4 margin values, got {}",
                parts.len()
            ))),
        }
    })
    .parse(input)
}

pub fn border_style(input: &str) -> IResult<&str, BorderStyle> {
    alt((
        value(BorderStyle::Solid, tag_no_case("solid")),
        value(BorderStyle::Dashed, tag_no_case("dashed")),
        value(BorderStyle::Dotted, tag_no_case("dotted")),
        value(BorderStyle::None, tag_no_case("none")),
    ))
    .parse(input)
}

fn color(input: &str) -> IResult<&str, Color> {
    map_res(take_while1(|c: char| !c.is_whitespace()), Color::parse).parse(input)
}

/// Parses a border shorthand such as `0.5pt`, `1pt solid` or `2pt dashed #336699`.
pub fn border(input: &str) -> IResult<&str, Border> {
    let (input, width) = length(input)?;
    let (input, style) = opt(preceded(space1, border_style)).parse(input)?;
    let (input, color) = opt(preceded(space1, color)).parse(input)?;
    Ok((
        input,
        Border {
            width,
            style: style.unwrap_or_default(),
            color: color.unwrap_or_default(),
        },
    ))
}

/// Runs `parser` over the whole of `input`, ignoring surrounding whitespace.
pub fn run_parser<T>(
    parser: fn(&str) -> IResult<&str, T>,
    input: &str,
) -> Result<T, StyleParseError> {
    all_consuming(delimited(space0, parser, space0))
        .parse(input)
        .map(|(_, parsed)| parsed)
        .map_err(|e| StyleParseError::Parse(format!("'{}': {}", input, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_convert_units_to_points() {
        assert_eq!(run_parser(length, "12"), Ok(12.0));
        assert_eq!(run_parser(length, " 1in "), Ok(72.0));
        assert_eq!(run_parser(length, "2cm"), Ok(56.7));
        assert!(run_parser(length, "12 apples").is_err());
    }

    #[test]
    fn margin_shorthands() {
        assert_eq!(run_parser(margins, "10pt"), Ok(Margins::all(10.0)));
        let vh = run_parser(margins, "10 20").unwrap();
        assert_eq!((vh.top, vh.right, vh.bottom, vh.left), (10.0, 20.0, 10.0, 20.0));
        assert!(run_parser(margins, "1 2 3").is_err());
    }

    #[test]
    fn border_shorthands() {
        let b = run_parser(border, "2pt dashed #ff0000").unwrap();
        assert_eq!(b.width, 2.0);
        assert_eq!(b.style, BorderStyle::Dashed);
        assert_eq!(b.color, Color::RED);

        let thin = run_parser(border, "0.5pt").unwrap();
        assert_eq!(thin.style, BorderStyle::Solid);
        assert_eq!(thin.color, Color::BLACK);
    }
}
