//! Literal recognizers used inside expression regions.
//!
//! These only know enough host-language lexical structure to tell whether a
//! close delimiter is real: they recognize a whole literal so the scanner
//! can step over it without inspecting its bytes.

use nom::branch::alt;
use nom::bytes::complete::{escaped, is_not, tag, take_until, take_while};
use nom::character::complete::{anychar, char, none_of};
use nom::combinator::{opt, recognize};
use nom::sequence::{delimited, preceded};
use nom::Parser;

use crate::result::ScanResult;

/// Recognize a double-quoted string literal, honoring `\"` and `\\` (any
/// backslash escape passes through).
pub(crate) fn string_literal(input: &str) -> ScanResult<&str, &str> {
    recognize(delimited(
        char('"'),
        opt(escaped(is_not("\\\""), '\\', anychar)),
        char('"'),
    ))
    .parse(input)
}

/// Recognize a character literal: an escape or a single char between quotes.
///
/// Fails on lifetimes and stray quotes, which are ordinary content.
pub(crate) fn char_literal(input: &str) -> ScanResult<&str, &str> {
    recognize(delimited(
        char('\''),
        alt((preceded(char('\\'), anychar), none_of("'\\"))),
        char('\''),
    ))
    .parse(input)
}

/// Recognize a line comment up to (not including) the line ending.
pub(crate) fn line_comment(input: &str) -> ScanResult<&str, &str> {
    recognize(preceded(
        tag("//"),
        take_while(|c| c != '\n' && c != '\r'),
    ))
    .parse(input)
}

/// Recognize a complete block comment. Fails if `*/` never follows.
pub(crate) fn block_comment(input: &str) -> ScanResult<&str, &str> {
    recognize((tag("/*"), take_until("*/"), tag("*/"))).parse(input)
}
