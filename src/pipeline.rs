//! The assembled pipeline: decode → partition → dispatch → encode.
//!
//! [`Pipeline`] wires the stateless frame codec, the deterministic router
//! and the partition store into the single bytes-in/bytes-out operation the
//! delivery runtime drives for every incoming message. Processing is
//! synchronous and CPU-only; nothing in here blocks or suspends on I/O.

use bytes::Bytes;
use tracing::debug;

use crate::codec::FrameCodec;
use crate::error::{Error, Result};
use crate::router::{KeyUniverse, Router};
use crate::store::PartitionStore;

/// A partitioned letter-vote pipeline over a fixed key universe.
#[derive(Debug)]
pub struct Pipeline {
    router: Router,
    store: PartitionStore,
}

impl Pipeline {
    /// Build a pipeline; router and store share the injected universe.
    pub fn new(universe: KeyUniverse) -> Self {
        Pipeline {
            router: Router::new(universe.clone()),
            store: PartitionStore::new(universe),
        }
    }

    /// Process one decoded-frame payload and return the encoded snapshot
    /// frame for the partition it landed on.
    pub fn process_payload(&self, payload: Bytes) -> Result<Bytes> {
        let vote = FrameCodec::decode(payload)?;
        let key = self.router.partition(&vote)?;
        let snapshot = self.store.dispatch(key, &vote)?;

        debug!(
            vote = %vote,
            key = %key,
            total = snapshot.total,
            "Processed vote"
        );

        FrameCodec::encode(&snapshot)
    }

    /// Process one complete input frame (length prefix included).
    ///
    /// The declared payload length must match the bytes actually present;
    /// a frame that declares more than it carries is malformed.
    pub fn process_frame(&self, frame: &[u8]) -> Result<Bytes> {
        if frame.len() < FrameCodec::header_length() {
            return Err(Error::MissingData(format!(
                "frame header needs {} bytes, got {}",
                FrameCodec::header_length(),
                frame.len()
            )));
        }

        let (header, payload) = frame.split_at(FrameCodec::header_length());
        let declared = FrameCodec::payload_length(header)? as usize;
        if payload.len() != declared {
            return Err(Error::MalformedFrame {
                expected: declared,
                actual: payload.len(),
            });
        }

        self.process_payload(Bytes::copy_from_slice(payload))
    }

    /// The store behind this pipeline, for read-only inspection.
    pub fn store(&self) -> &PartitionStore {
        &self.store
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}

impl Default for Pipeline {
    /// A pipeline over the full 26-letter universe.
    fn default() -> Self {
        Pipeline::new(KeyUniverse::lowercase())
    }
}
