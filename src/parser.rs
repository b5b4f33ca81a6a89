//! Parsers for filter value text.
//!
//! The editor stores every filter value as free text. These nom parsers pick
//! apart the three shapes that carry structure: `IN` lists, parameter
//! references and function names.

use crate::ast::SqlFunction;
use nom::{
    branch::alt,
    bytes::complete::{is_not, tag, tag_no_case, take_while, take_while_m_n},
    character::complete::{char, multispace0},
    combinator::{all_consuming, map, opt, recognize, value},
    multi::{many0, separated_list0},
    sequence::{delimited, pair, preceded, terminated, tuple},
    IResult,
};

/// Parse a single-quoted literal, keeping the quotes. `''` escapes a quote.
fn quoted(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        char('\''),
        many0(alt((is_not("'"), tag("''")))),
        char('\''),
    ))(input)
}

/// Parse a bare list item: everything up to the next comma.
fn bare(input: &str) -> IResult<&str, &str> {
    map(opt(is_not(",")), |s: Option<&str>| s.unwrap_or("").trim())(input)
}

fn list_item(input: &str) -> IResult<&str, &str> {
    delimited(
        multispace0,
        alt((terminated(quoted, multispace0), bare)),
        multispace0,
    )(input)
}

/// Split an `IN` list: `a, 'b,c', 3` yields `a`, `'b,c'`, `3`.
///
/// Empty items are dropped. Unbalanced quotes fall back to a plain comma split.
pub fn parse_list(input: &str) -> Vec<String> {
    let parsed: IResult<&str, Vec<&str>> =
        all_consuming(separated_list0(char(','), list_item))(input);
    let items: Vec<&str> = match parsed {
        Ok((_, items)) => items,
        Err(_) => input.split(',').map(str::trim).collect(),
    };
    items
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// `[A-Za-z_][A-Za-z0-9_]*`
fn ident(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while_m_n(1, 1, |c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

/// Parse a parameter reference: `name`, `{{name}}`, `{{ name }}` or `:name`.
pub fn parse_param_ref(input: &str) -> Option<&str> {
    let braced = delimited(
        pair(tag("{{"), multispace0),
        ident,
        pair(multispace0, tag("}}")),
    );
    let colon = preceded(char(':'), ident);
    let parsed: IResult<&str, &str> = all_consuming(delimited(
        multispace0,
        alt((braced, colon, ident)),
        multispace0,
    ))(input);
    parsed.ok().map(|(_, name)| name)
}

/// Parse a function name, case-insensitively, with or without `()`.
pub fn parse_function(input: &str) -> Option<SqlFunction> {
    let name = alt((
        value(SqlFunction::CurrentUser, tag_no_case("current_user")),
        value(SqlFunction::Today, tag_no_case("today")),
        value(SqlFunction::Now, tag_no_case("now")),
    ));
    let parens = opt(tuple((multispace0, char('('), multispace0, char(')'))));
    let parsed: IResult<&str, SqlFunction> = all_consuming(delimited(
        multispace0,
        terminated(name, parens),
        multispace0,
    ))(input);
    parsed.ok().map(|(_, f)| f)
}
