//! Numeric word literal parser.

use nom::IResult;
use nom::character::complete::anychar;
use nom::combinator::map_opt;
use nom::multi::fold_many0;
use crate::model::WordModel;
use crate::address::Address;
use crate::error::{ParseError, ParseErrorKind, ParseResult};

type Input<'a> = &'a str;

/// Matches a single digit of the given radix and returns its value.
fn digit<'a>(radix: u32) -> impl FnMut(Input<'a>) -> IResult<Input<'a>, u32> {
    map_opt(anychar, move |c: char| c.to_digit(radix))
}

/// Accumulates digits left to right: `acc * radix + digit`, wrapping at the word width.
fn digits<'a, M: WordModel>(radix: u32) -> impl FnMut(Input<'a>) -> IResult<Input<'a>, Address<M>> {
    fold_many0(digit(radix), Address::zero, move |acc: Address<M>, digit| acc.times(radix).plus(digit))
}

/// Parses the whole input as an unsigned number of the given radix.
pub(crate) fn parse_address<M: WordModel>(input: &str, radix: u32) -> ParseResult<Address<M>> {
    assert!((2..=36).contains(&radix), "Address: unsupported radix {}", radix);
    let rest = match digits::<M>(radix)(input) {
        Ok(("", address)) => return Ok(address),
        Ok((rest, _)) => rest,
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => e.input,
        Err(nom::Err::Incomplete(_)) => "",
    };
    let position = input.len() - rest.len();
    match rest.chars().next() {
        Some(c) => Err(ParseError::new(ParseErrorKind::InvalidDigit(c), position)),
        None => Err(ParseError::new(ParseErrorKind::InvalidDigit('\0'), position)),
    }
}

