//! Centralized protocol and configuration constants.
//!
//! This module consolidates the wire-format sizes and runtime limits used
//! throughout the alphabet pipeline. Having them in one place makes it
//! easier to:
//!
//! - Understand the framing contract
//! - Update values consistently
//! - Document the rationale for each constant
//!
//! # Categories
//!
//! - **Wire Format Constants**: frame header and payload sizes
//! - **Partitioning Constants**: the fixed key universe size
//! - **Runtime Constants**: connection and frame size limits

// =============================================================================
// Wire Format Constants
// =============================================================================

/// Size of the length prefix on every input frame (bytes).
///
/// The prefix is a big-endian unsigned 32-bit integer declaring how many
/// payload bytes follow it.
pub const FRAME_HEADER_LENGTH: usize = 4;

/// Exact payload size of a vote message (bytes).
///
/// A vote payload consists of:
/// - letter (1 byte, ASCII)
/// - vote count (4 bytes, u32 big-endian)
///
/// Total: 5 bytes. Any other payload length is malformed.
pub const VOTE_PAYLOAD_LENGTH: usize = 5;

/// Value written into the length field of every output frame.
///
/// The downstream consumer expects the literal 9, declaring the size of the
/// fields that follow: 1-byte letter + 8-byte big-endian running total.
/// This is a trusted protocol constant, written as-is rather than computed
/// from the encoded body.
pub const SNAPSHOT_BODY_LENGTH: u32 = 9;

// =============================================================================
// Partitioning Constants
// =============================================================================

/// Number of slots in the partition key universe.
///
/// One partition per lowercase ASCII letter, indexed by `letter - b'a'`.
/// The universe is fixed at pipeline construction and never rediscovered
/// at runtime.
pub const PARTITION_COUNT: usize = 26;

// =============================================================================
// Runtime Constants
// =============================================================================

/// Default maximum accepted frame payload size (64 KiB).
///
/// A vote payload is only 5 bytes; this bound exists so a corrupt or
/// malicious length prefix cannot make the server allocate an arbitrarily
/// large buffer. Can be overridden via `PipelineConfig.max_frame_size`.
pub const DEFAULT_MAX_FRAME_SIZE: usize = 64 * 1024;

/// Default timeout for reading a complete frame from a client (30 seconds).
///
/// If a frame isn't completely received within this window, the connection
/// is closed. Prevents slow clients from pinning connection tasks forever.
pub const DEFAULT_FRAME_READ_TIMEOUT_SECS: u64 = 30;

// =============================================================================
// Tests
// =============================================================================
