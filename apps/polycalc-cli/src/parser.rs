//! Grammar for the line-oriented protocol: polynomial literals and commands.
//!
//! Grounded on `logicaffeine_kernel::interface::error::{ParseError,
//! InterfaceError}` for the manual `Display`/`Error`/`From` error style (no
//! `thiserror`), and on the command-token shape described in §6 of the
//! requirements document.

use std::fmt;

use polycalc_kernel::poly::Monomial;
use polycalc_kernel::Poly;

/// Every error this module can report maps onto one line of the protocol's
/// fixed error vocabulary; the exact sub-reason is kept for `Display`/tests
/// but the command loop only cares which of these five it got.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Literal grammar violated: bad character, missing delimiter,
    /// out-of-range integer or exponent, negative exponent, trailing
    /// garbage, or an empty digit run.
    WrongPoly(PolyReason),
    /// Unrecognized command name, or a no-argument command followed by
    /// anything at all.
    WrongCommand,
    /// `DEG_BY`'s argument is missing, non-numeric, negative, or out of
    /// `u32` range, or was separated by something other than one space.
    DegByWrongVariable,
    /// `AT`'s argument is missing, non-numeric, or out of `i64` range, or
    /// was separated by something other than one space.
    AtWrongValue,
    /// `COMPOSE`'s argument is missing, non-numeric, negative, or out of
    /// `u32` range, or was separated by something other than one space.
    ComposeWrongParameter,
}

/// Sub-reason for a [`ParseError::WrongPoly`], kept for diagnostics/tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolyReason {
    UnexpectedEnd,
    UnexpectedChar(char),
    ExpectedChar(char),
    EmptyDigits,
    IntegerOutOfRange,
    ExponentOutOfRange,
    NegativeExponent,
    TrailingGarbage,
}

impl fmt::Display for ParseError {
    /// Renders exactly the protocol's fixed error vocabulary (§6) — the
    /// sub-reason in [`PolyReason`] is diagnostic detail for tests only and
    /// deliberately never reaches stderr.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::WrongPoly(_) => write!(f, "WRONG POLY"),
            ParseError::WrongCommand => write!(f, "WRONG COMMAND"),
            ParseError::DegByWrongVariable => write!(f, "DEG BY WRONG VARIABLE"),
            ParseError::AtWrongValue => write!(f, "AT WRONG VALUE"),
            ParseError::ComposeWrongParameter => write!(f, "COMPOSE WRONG PARAMETER"),
        }
    }
}

impl std::error::Error for ParseError {}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    /// Blank line or a `#`-prefixed comment: silently ignored.
    Blank,
    /// A polynomial literal to push onto the stack.
    Push(Poly),
    /// A command to dispatch against the stack.
    Command(Command),
}

/// A parsed command, already argument-validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Zero,
    IsCoeff,
    IsZero,
    Clone,
    Add,
    Mul,
    Neg,
    Sub,
    IsEq,
    Deg,
    Print,
    Pop,
    DegBy(u32),
    At(i64),
    Compose(u32),
}

/// Parses one already-trimmed-of-newline input line.
pub fn parse_line(line: &str) -> Result<Line, ParseError> {
    if line.is_empty() || line.starts_with('#') {
        return Ok(Line::Blank);
    }
    let first = line.as_bytes()[0];
    if first == b'(' || first == b'-' || first.is_ascii_digit() {
        return parse_poly_literal(line).map(Line::Push);
    }
    parse_command(line).map(Line::Command)
}

// ---------------------------------------------------------------------
// Polynomial literal grammar
// ---------------------------------------------------------------------

fn parse_poly_literal(line: &str) -> Result<Poly, ParseError> {
    let bytes = line.as_bytes();
    let mut pos = 0usize;
    let poly = parse_poly(bytes, &mut pos)?;
    if pos != bytes.len() {
        return Err(ParseError::WrongPoly(PolyReason::TrailingGarbage));
    }
    Ok(poly)
}

fn parse_poly(bytes: &[u8], pos: &mut usize) -> Result<Poly, ParseError> {
    match bytes.get(*pos) {
        Some(b'(') => parse_monomial_sum(bytes, pos),
        Some(b'-') | Some(b'0'..=b'9') => {
            let n = parse_signed_int(bytes, pos)?;
            Ok(Poly::from_scalar(n))
        }
        Some(&c) => Err(ParseError::WrongPoly(PolyReason::UnexpectedChar(c as char))),
        None => Err(ParseError::WrongPoly(PolyReason::UnexpectedEnd)),
    }
}

fn parse_monomial_sum(bytes: &[u8], pos: &mut usize) -> Result<Poly, ParseError> {
    let mut monos = Vec::new();
    monos.push(parse_monomial(bytes, pos)?);
    while bytes.get(*pos) == Some(&b'+') {
        *pos += 1;
        monos.push(parse_monomial(bytes, pos)?);
    }
    Ok(Poly::from_monomials(monos))
}

fn parse_monomial(bytes: &[u8], pos: &mut usize) -> Result<Monomial, ParseError> {
    expect(bytes, pos, b'(')?;
    let coeff = parse_poly(bytes, pos)?;
    expect(bytes, pos, b',')?;
    let exp = parse_exponent(bytes, pos)?;
    expect(bytes, pos, b')')?;
    Ok(Monomial::new(coeff, exp))
}

fn expect(bytes: &[u8], pos: &mut usize, c: u8) -> Result<(), ParseError> {
    match bytes.get(*pos) {
        Some(&b) if b == c => {
            *pos += 1;
            Ok(())
        }
        Some(_) | None => Err(ParseError::WrongPoly(PolyReason::ExpectedChar(c as char))),
    }
}

/// A signed integer, bounded to `i64`. Out-of-range is a parse error, not a
/// wraparound — wraparound is an *arithmetic* behavior, not a parsing one.
fn parse_signed_int(bytes: &[u8], pos: &mut usize) -> Result<i64, ParseError> {
    let start = *pos;
    let negative = bytes.get(*pos) == Some(&b'-');
    if negative {
        *pos += 1;
    }
    let digits_start = *pos;
    while matches!(bytes.get(*pos), Some(b'0'..=b'9')) {
        *pos += 1;
    }
    if *pos == digits_start {
        *pos = start;
        return Err(ParseError::WrongPoly(PolyReason::EmptyDigits));
    }
    let text = std::str::from_utf8(&bytes[start..*pos]).expect("ascii digits are valid utf8");
    text.parse::<i64>()
        .map_err(|_| ParseError::WrongPoly(PolyReason::IntegerOutOfRange))
}

/// A non-negative exponent fitting a signed 32-bit integer (grammar forbids
/// a leading `-` entirely — that is "negative exponent", a distinct error
/// from "doesn't fit").
fn parse_exponent(bytes: &[u8], pos: &mut usize) -> Result<u32, ParseError> {
    if bytes.get(*pos) == Some(&b'-') {
        return Err(ParseError::WrongPoly(PolyReason::NegativeExponent));
    }
    let digits_start = *pos;
    while matches!(bytes.get(*pos), Some(b'0'..=b'9')) {
        *pos += 1;
    }
    if *pos == digits_start {
        return Err(ParseError::WrongPoly(PolyReason::EmptyDigits));
    }
    let text = std::str::from_utf8(&bytes[digits_start..*pos]).expect("ascii digits");
    let value: i64 = text
        .parse()
        .map_err(|_| ParseError::WrongPoly(PolyReason::ExponentOutOfRange))?;
    if value > i32::MAX as i64 {
        return Err(ParseError::WrongPoly(PolyReason::ExponentOutOfRange));
    }
    Ok(value as u32)
}

// ---------------------------------------------------------------------
// Command grammar
// ---------------------------------------------------------------------

/// Splits `line` at the first whitespace byte of any kind, returning the
/// head token, the separator byte (if any), and the rest of the line.
fn split_first_whitespace(line: &str) -> (&str, Option<u8>, &str) {
    let bytes = line.as_bytes();
    match bytes.iter().position(|b| b.is_ascii_whitespace()) {
        Some(i) => (&line[..i], Some(bytes[i]), &line[i + 1..]),
        None => (line, None, ""),
    }
}

fn parse_command(line: &str) -> Result<Command, ParseError> {
    let (name, sep, rest) = split_first_whitespace(line);
    match name {
        "ZERO" => no_arg(sep, Command::Zero),
        "IS_COEFF" => no_arg(sep, Command::IsCoeff),
        "IS_ZERO" => no_arg(sep, Command::IsZero),
        "CLONE" => no_arg(sep, Command::Clone),
        "ADD" => no_arg(sep, Command::Add),
        "MUL" => no_arg(sep, Command::Mul),
        "NEG" => no_arg(sep, Command::Neg),
        "SUB" => no_arg(sep, Command::Sub),
        "IS_EQ" => no_arg(sep, Command::IsEq),
        "DEG" => no_arg(sep, Command::Deg),
        "PRINT" => no_arg(sep, Command::Print),
        "POP" => no_arg(sep, Command::Pop),
        "DEG_BY" => parse_u32_arg(sep, rest, ParseError::DegByWrongVariable).map(Command::DegBy),
        "AT" => parse_i64_arg(sep, rest, ParseError::AtWrongValue).map(Command::At),
        "COMPOSE" => {
            parse_u32_arg(sep, rest, ParseError::ComposeWrongParameter).map(Command::Compose)
        }
        _ => Err(ParseError::WrongCommand),
    }
}

/// A no-argument command must be the entire line; anything trailing — a
/// space-separated argument or a non-space whitespace byte pulled into the
/// split — means this token sequence isn't a valid invocation of it, and
/// there is no dedicated parameter-error code for these commands.
fn no_arg(sep: Option<u8>, cmd: Command) -> Result<Command, ParseError> {
    match sep {
        None => Ok(cmd),
        Some(_) => Err(ParseError::WrongCommand),
    }
}

/// A command name followed by whitespace other than a plain space (0x20) is
/// classified as *that command's* parameter error, not `WRONG COMMAND` — the
/// name was still recognized.
fn parse_u32_arg(sep: Option<u8>, rest: &str, err: ParseError) -> Result<u32, ParseError> {
    let rest = require_space_separated(sep, rest, &err)?;
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err);
    }
    rest.parse::<u32>().map_err(|_| err)
}

fn parse_i64_arg(sep: Option<u8>, rest: &str, err: ParseError) -> Result<i64, ParseError> {
    let rest = require_space_separated(sep, rest, &err)?;
    if rest.is_empty() {
        return Err(err);
    }
    let digits = rest.strip_prefix('-').unwrap_or(rest);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(err);
    }
    rest.parse::<i64>().map_err(|_| err)
}

fn require_space_separated<'a>(
    sep: Option<u8>,
    rest: &'a str,
    err: &ParseError,
) -> Result<&'a str, ParseError> {
    match sep {
        Some(b' ') => Ok(rest),
        _ => Err(err.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(c: i64) -> Poly {
        Poly::Scalar(c)
    }

    #[test]
    fn parses_bare_integer() {
        assert_eq!(parse_line("42").unwrap(), Line::Push(s(42)));
        assert_eq!(parse_line("-7").unwrap(), Line::Push(s(-7)));
    }

    #[test]
    fn parses_monomial_sum() {
        let p = parse_poly_literal("(1,2)+(1,0)").unwrap();
        assert_eq!(p.to_string(), "(1,0)+(1,2)");
    }

    #[test]
    fn parses_nested_monomial() {
        let p = parse_poly_literal("((1,2),3)+((1,0),1)").unwrap();
        assert_eq!(p.degree(), 5);
    }

    #[test]
    fn rejects_trailing_garbage() {
        assert!(matches!(
            parse_poly_literal("42x"),
            Err(ParseError::WrongPoly(PolyReason::TrailingGarbage))
        ));
    }

    #[test]
    fn rejects_negative_exponent() {
        assert!(matches!(
            parse_poly_literal("(1,-2)"),
            Err(ParseError::WrongPoly(PolyReason::NegativeExponent))
        ));
    }

    #[test]
    fn rejects_whitespace_inside_literal() {
        assert!(matches!(
            parse_poly_literal("(1, 2)"),
            Err(ParseError::WrongPoly(_))
        ));
    }

    #[test]
    fn unknown_command_is_wrong_command() {
        assert_eq!(parse_command("FOO"), Err(ParseError::WrongCommand));
    }

    #[test]
    fn no_arg_command_with_trailing_text_is_wrong_command() {
        assert_eq!(parse_command("ADD 1"), Err(ParseError::WrongCommand));
    }

    #[test]
    fn deg_by_negative_is_deg_by_wrong_variable() {
        assert_eq!(
            parse_command("DEG_BY -1"),
            Err(ParseError::DegByWrongVariable)
        );
    }

    #[test]
    fn deg_by_tab_separator_is_still_deg_by_error_not_wrong_command() {
        assert_eq!(
            parse_command("DEG_BY\t1"),
            Err(ParseError::DegByWrongVariable)
        );
    }

    #[test]
    fn at_accepts_signed_argument() {
        assert_eq!(parse_command("AT -5"), Ok(Command::At(-5)));
        assert_eq!(parse_command("AT 5"), Ok(Command::At(5)));
    }

    #[test]
    fn compose_accepts_unsigned_argument() {
        assert_eq!(parse_command("COMPOSE 3"), Ok(Command::Compose(3)));
    }

    #[test]
    fn blank_and_comment_lines_are_blank() {
        assert_eq!(parse_line("").unwrap(), Line::Blank);
        assert_eq!(parse_line("# a comment").unwrap(), Line::Blank);
    }
}
