//! Partition store: owner of the key→state mapping.
//!
//! The store holds one [`TotalVotes`] per slot in a fixed 26-entry table
//! indexed by `letter - b'a'`, each behind its own mutex. That yields the
//! scheduling contract the pipeline is built around:
//!
//! - routing and dispatch may run on any thread/worker,
//! - at most one update is in flight per partition at a time,
//! - updates to *different* partitions proceed in parallel — there is no
//!   global lock, and no cross-partition read or aggregate exists.
//!
//! States are created eagerly at construction from the injected key
//! universe; a key outside that universe is rejected, never lazily
//! admitted.

use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::constants::PARTITION_COUNT;
use crate::error::{Error, Result};
use crate::router::KeyUniverse;
use crate::state::TotalVotes;
use crate::types::{PartitionKey, Vote, VotesSnapshot};

/// Owns the fixed set of partitions and their aggregate states.
pub struct PartitionStore {
    universe: KeyUniverse,
    states: [Mutex<TotalVotes>; PARTITION_COUNT],
}

impl PartitionStore {
    /// Create a store with one zeroed aggregate per slot.
    ///
    /// The full 26-slot table is always allocated (it is tiny); the
    /// universe decides which slots `dispatch` will actually admit.
    pub fn new(universe: KeyUniverse) -> Self {
        let states: [Mutex<TotalVotes>; PARTITION_COUNT] =
            std::array::from_fn(|index| Mutex::new(TotalVotes::new(PartitionKey::from_index(index))));
        PartitionStore { universe, states }
    }

    /// Apply a vote to the partition owned by `key` and return the
    /// post-update snapshot.
    ///
    /// Fails with [`Error::UnknownPartition`] if `key` is outside the
    /// universe this store was configured with.
    pub fn dispatch(&self, key: PartitionKey, vote: &Vote) -> Result<VotesSnapshot> {
        if !self.universe.contains(key) {
            return Err(Error::UnknownPartition(key.as_char()));
        }

        // update() cannot panic mid-mutation, so a poisoned lock still
        // holds a consistent aggregate; recover it rather than abort.
        let mut state = self.states[key.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let snapshot = state.update(vote);

        debug!(
            key = %key,
            count = vote.count,
            total = snapshot.total,
            "Applied vote"
        );

        Ok(snapshot)
    }

    /// Read the current aggregate of one partition without updating it.
    pub fn snapshot(&self, key: PartitionKey) -> Result<VotesSnapshot> {
        if !self.universe.contains(key) {
            return Err(Error::UnknownPartition(key.as_char()));
        }
        let state = self.states[key.index()]
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Ok(state.snapshot())
    }

    pub fn universe(&self) -> &KeyUniverse {
        &self.universe
    }
}

impl std::fmt::Debug for PartitionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PartitionStore")
            .field("universe", &self.universe)
            .finish_non_exhaustive()
    }
}
