//! Wire protocol integration tests.
//!
//! These tests verify the framing contract at the byte level, ensuring
//! compatibility with the upstream vote producer and the downstream
//! snapshot consumer.
//!
//! # Wire Protocol Structure
//!
//! Input frame:
//! ```text
//! [payload length: u32 = 5] [letter: 1 byte] [vote count: u32]
//! ```
//!
//! Output frame:
//! ```text
//! [length field: u32 = 9] [letter: 1 byte] [running total: u64]
//! ```
//!
//! All integers are big-endian.
//!
//! # Running Tests
//!
//! ```sh
//! cargo test --test wire_protocol_tests
//! ```

use alphabet::prelude::*;
use bytes::{BufMut, Bytes, BytesMut};

// ============================================================================
// Test Helpers
// ============================================================================

/// Build a complete input frame for one vote.
fn frame_vote(letter: u8, count: u32) -> BytesMut {
    let mut buf = BytesMut::with_capacity(9);
    buf.put_u32(5);
    buf.put_u8(letter);
    buf.put_u32(count);
    buf
}

/// Build the expected output frame for a snapshot.
fn expected_snapshot_frame(letter: u8, total: u64) -> BytesMut {
    let mut buf = BytesMut::with_capacity(13);
    buf.put_u32(9);
    buf.put_u8(letter);
    buf.put_u64(total);
    buf
}

// ============================================================================
// Header Tests
// ============================================================================

#[test]
fn test_header_length_constant() {
    assert_eq!(FrameCodec::header_length(), 4);
}

#[test]
fn test_payload_length_from_header_bytes() {
    let frame = frame_vote(b'a', 5);
    let length = FrameCodec::payload_length(&frame[..4]).unwrap();
    assert_eq!(length, 5);
}

#[test]
fn test_payload_length_rejects_partial_header() {
    assert!(FrameCodec::payload_length(&[0x00]).is_err());
    assert!(FrameCodec::payload_length(&[0x00, 0x00, 0x00, 0x05, 0x00]).is_err());
}

// ============================================================================
// Decode Tests
// ============================================================================

#[test]
fn test_decode_vote_payload() {
    let frame = frame_vote(b'q', 1234);
    let vote = FrameCodec::decode(frame.freeze().slice(4..)).unwrap();
    assert_eq!(vote, Vote::new(b'q', 1234));
}

#[test]
fn test_decode_preserves_letter_and_count_exactly() {
    // Framing round-trip: payload-bytes-of(v) decodes back to v
    for (letter, count) in [(b'a', 0u32), (b'm', 1), (b'z', u32::MAX)] {
        let frame = frame_vote(letter, count);
        let vote = FrameCodec::decode(frame.freeze().slice(4..)).unwrap();
        assert_eq!(vote.letter, letter);
        assert_eq!(vote.count, count);
    }
}

#[test]
fn test_decode_rejects_wrong_payload_sizes() {
    for size in [0usize, 1, 4, 6, 64] {
        let payload = Bytes::from(vec![0u8; size]);
        let err = FrameCodec::decode(payload).unwrap_err();
        assert_eq!(
            err,
            Error::MalformedFrame {
                expected: 5,
                actual: size
            }
        );
    }
}

// ============================================================================
// Encode Tests
// ============================================================================

#[test]
fn test_encode_snapshot_layout() {
    let frame = FrameCodec::encode(&VotesSnapshot::new(b'a', 5)).unwrap();
    assert_eq!(frame.as_ref(), expected_snapshot_frame(b'a', 5).as_ref());
}

#[test]
fn test_encode_is_idempotent() {
    let snapshot = VotesSnapshot::new(b'w', 987_654_321);
    assert_eq!(
        FrameCodec::encode(&snapshot).unwrap(),
        FrameCodec::encode(&snapshot).unwrap()
    );
}

#[test]
fn test_encode_length_field_is_always_nine() {
    for total in [0u64, 1, u64::from(u32::MAX), u64::MAX] {
        let frame = FrameCodec::encode(&VotesSnapshot::new(b'c', total)).unwrap();
        assert_eq!(&frame[..4], &[0x00, 0x00, 0x00, 0x09]);
        assert_eq!(frame.len(), 13);
    }
}

#[test]
fn test_encode_rejects_non_ascii_letter_without_partial_frame() {
    let result = FrameCodec::encode(&VotesSnapshot::new(0x80, 1));
    assert!(matches!(result, Err(Error::Encoding(_))));
}

// ============================================================================
// End-to-End Scenarios
// ============================================================================

#[test]
fn test_first_vote_scenario() {
    // 00 00 00 05 61 00 00 00 05 -> 00 00 00 09 61 00 00 00 00 00 00 00 05
    let pipeline = Pipeline::default();
    let input = [0x00, 0x00, 0x00, 0x05, 0x61, 0x00, 0x00, 0x00, 0x05];
    let output = pipeline.process_frame(&input).unwrap();
    assert_eq!(
        output.as_ref(),
        &[0x00, 0x00, 0x00, 0x09, 0x61, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05]
    );
}

#[test]
fn test_same_partition_accumulates_scenario() {
    let pipeline = Pipeline::default();
    pipeline.process_frame(&frame_vote(b'a', 5)).unwrap();
    let output = pipeline.process_frame(&frame_vote(b'a', 3)).unwrap();
    assert_eq!(output.as_ref(), expected_snapshot_frame(b'a', 8).as_ref());
}

#[test]
fn test_cross_partition_scenario() {
    let pipeline = Pipeline::default();
    pipeline.process_frame(&frame_vote(b'a', 5)).unwrap();
    pipeline.process_frame(&frame_vote(b'a', 3)).unwrap();

    let output = pipeline.process_frame(&frame_vote(b'b', 2)).unwrap();
    assert_eq!(output.as_ref(), expected_snapshot_frame(b'b', 2).as_ref());

    // Partition a still reports 8
    let a = PartitionKey::new(b'a').unwrap();
    assert_eq!(pipeline.store().snapshot(a).unwrap().total, 8);
}

#[test]
fn test_declared_length_must_match_payload() {
    let pipeline = Pipeline::default();

    // Declares 5 payload bytes but carries 4
    let mut frame = BytesMut::new();
    frame.put_u32(5);
    frame.put_slice(&[0x61, 0x00, 0x00, 0x00]);

    let err = pipeline.process_frame(&frame).unwrap_err();
    assert_eq!(
        err,
        Error::MalformedFrame {
            expected: 5,
            actual: 4
        }
    );
}
