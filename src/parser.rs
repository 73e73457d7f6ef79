//! Deserialize data from the wire protocol.
use nom::{IResult, bytes::complete::take, number::complete::be_u32};
use nombytes::NomBytes;

use crate::types::Vote;

/// Parse the 4-byte big-endian length prefix of an input frame.
pub fn parse_payload_length(s: NomBytes) -> IResult<NomBytes, u32> {
    be_u32(s)
}

/// Parse a vote payload: 1 letter byte followed by a big-endian u32 count.
///
/// Length validation is the codec's job; this parser only consumes the five
/// bytes of the fixed layout and leaves anything after them as remaining
/// input.
pub fn parse_vote(s: NomBytes) -> IResult<NomBytes, Vote> {
    let (s, letter) = take(1usize)(s)?;
    let (s, count) = be_u32(s)?;
    Ok((s, Vote::new(letter.into_bytes()[0], count)))
}
