//! Per-partition aggregate state.
//!
//! One `TotalVotes` exists per partition key, created at store construction
//! and mutated in place for the lifetime of the process. The running total
//! only ever grows (updates are purely additive) and the letter field
//! always reflects the most recently applied vote.
//!
//! `TotalVotes` is deliberately not `Sync`-safe on its own: it must never
//! see two concurrent updates. Serializing access is the store's job — all
//! external access goes through [`TotalVotes::update`], which returns an
//! immutable snapshot copy rather than exposing the mutable fields.

use crate::error::{Error, Result};
use crate::types::{PartitionKey, Vote, VotesSnapshot};

/// Serialized size of one aggregate: letter byte + big-endian u64 total.
const CHECKPOINT_LENGTH: usize = 9;

/// Running vote total for a single partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalVotes {
    letter: u8,
    total: u64,
}

impl TotalVotes {
    /// Create a fresh aggregate for the given partition key.
    ///
    /// The total starts at zero and the letter starts as the partition's
    /// own key, so a snapshot taken before any vote arrives still reports
    /// a real letter rather than a sentinel.
    pub fn new(key: PartitionKey) -> Self {
        TotalVotes {
            letter: key.as_byte(),
            total: 0,
        }
    }

    /// Apply a vote and return the post-update snapshot.
    ///
    /// Total for any well-formed vote; the count is widened to u64 before
    /// adding, so the sum cannot wrap for bounded inputs.
    pub fn update(&mut self, vote: &Vote) -> VotesSnapshot {
        self.letter = vote.letter;
        self.total += u64::from(vote.count);
        self.snapshot()
    }

    /// Read-only copy of the current aggregate.
    pub fn snapshot(&self) -> VotesSnapshot {
        VotesSnapshot::new(self.letter, self.total)
    }

    pub fn letter(&self) -> u8 {
        self.letter
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    /// Serialize to the fixed-width checkpoint layout.
    pub fn to_bytes(&self) -> [u8; CHECKPOINT_LENGTH] {
        let mut bytes = [0u8; CHECKPOINT_LENGTH];
        bytes[0] = self.letter;
        bytes[1..].copy_from_slice(&self.total.to_be_bytes());
        bytes
    }

    /// Restore an aggregate from its checkpoint bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != CHECKPOINT_LENGTH {
            return Err(Error::MalformedFrame {
                expected: CHECKPOINT_LENGTH,
                actual: bytes.len(),
            });
        }
        let mut total_bytes = [0u8; 8];
        total_bytes.copy_from_slice(&bytes[1..]);
        Ok(TotalVotes {
            letter: bytes[0],
            total: u64::from_be_bytes(total_bytes),
        })
    }
}
