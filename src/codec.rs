//! Length-prefixed frame codec for the vote protocol.
//!
//! This is the full boundary contract the delivery runtime drives:
//!
//! 1. read [`FrameCodec::header_length`] bytes from the stream,
//! 2. ask [`FrameCodec::payload_length`] how many payload bytes follow,
//! 3. hand exactly that many bytes to [`FrameCodec::decode`],
//! 4. after the partition update, render the result with
//!    [`FrameCodec::encode`].
//!
//! The codec is stateless; all multi-byte integers are big-endian.
//!
//! # Wire Format
//!
//! Input frame:
//! ```text
//! [payload length: u32] [letter: 1 byte] [vote count: u32]
//! ```
//!
//! Output frame:
//! ```text
//! [length field: u32 = 9] [letter: 1 byte] [running total: u64]
//! ```
//!
//! The output length field is a fixed protocol literal, not a computed
//! size — see `constants::SNAPSHOT_BODY_LENGTH`.

use bytes::{Buf, Bytes, BytesMut};
use nombytes::NomBytes;

use crate::constants::{FRAME_HEADER_LENGTH, SNAPSHOT_BODY_LENGTH, VOTE_PAYLOAD_LENGTH};
use crate::encode::ToByte;
use crate::error::{Error, Result};
use crate::parser::parse_vote;
use crate::types::{Vote, VotesSnapshot};

/// Stateless codec for vote frames and snapshot frames.
pub struct FrameCodec;

impl FrameCodec {
    /// Number of bytes reserved for the payload-length prefix.
    pub const fn header_length() -> usize {
        FRAME_HEADER_LENGTH
    }

    /// Decode the payload length from a frame header.
    ///
    /// The caller must read exactly this many additional bytes as the
    /// payload before calling [`FrameCodec::decode`].
    pub fn payload_length(header: &[u8]) -> Result<u32> {
        if header.len() != FRAME_HEADER_LENGTH {
            return Err(Error::MalformedFrame {
                expected: FRAME_HEADER_LENGTH,
                actual: header.len(),
            });
        }
        Ok((&header[..]).get_u32())
    }

    /// Decode a vote payload.
    ///
    /// The payload must be exactly 5 bytes: 1 ASCII letter byte followed by
    /// a big-endian u32 vote count. Any other length is malformed input.
    pub fn decode(payload: Bytes) -> Result<Vote> {
        let actual = payload.len();
        if actual != VOTE_PAYLOAD_LENGTH {
            return Err(Error::MalformedFrame {
                expected: VOTE_PAYLOAD_LENGTH,
                actual,
            });
        }

        match parse_vote(NomBytes::new(payload)) {
            Ok((_, vote)) => Ok(vote),
            Err(_) => Err(Error::MalformedFrame {
                expected: VOTE_PAYLOAD_LENGTH,
                actual,
            }),
        }
    }

    /// Encode a snapshot into an output frame.
    ///
    /// Fails with [`Error::Encoding`] if the snapshot letter is not a
    /// single ASCII byte; no partial frame is emitted in that case.
    pub fn encode(snapshot: &VotesSnapshot) -> Result<Bytes> {
        if !snapshot.letter.is_ascii() {
            return Err(Error::Encoding(format!(
                "letter 0x{:02x} is not a single ASCII byte",
                snapshot.letter
            )));
        }

        let mut buffer =
            BytesMut::with_capacity(FRAME_HEADER_LENGTH + SNAPSHOT_BODY_LENGTH as usize);
        SNAPSHOT_BODY_LENGTH.encode(&mut buffer)?;
        snapshot.encode(&mut buffer)?;

        tracing::trace!(
            letter = %(snapshot.letter as char),
            total = snapshot.total,
            "Encoded snapshot frame"
        );

        Ok(buffer.freeze())
    }
}
