//! # Alphabet
//! Partitioned letter-vote stream processing pipeline.
//!
//! This crate ingests length-framed binary messages, each carrying a single
//! vote for a letter, routes every message deterministically to one of 26
//! independent per-letter partitions, accumulates running totals inside
//! each partition, and re-encodes the updated aggregate into a binary
//! output frame for every incoming message.
//!
//! # Goals
//! - Exact framing: fixed 4-byte header, big-endian lengths and integers
//! - Deterministic routing: a pure function of the vote's letter
//! - Safe concurrency: parallel across partitions, strictly sequential
//!   within one partition
//!
//! ## Processing a frame
//!
//! ```rust
//! use alphabet::prelude::*;
//!
//! let pipeline = Pipeline::default();
//!
//! // length=5, letter='a', count=5
//! let output = pipeline
//!     .process_frame(&[0x00, 0x00, 0x00, 0x05, 0x61, 0x00, 0x00, 0x00, 0x05])
//!     .unwrap();
//!
//! // length field 9, letter 'a', running total 5
//! assert_eq!(
//!     output.as_ref(),
//!     &[0x00, 0x00, 0x00, 0x09, 0x61, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x05]
//! );
//! ```
//!
//! ## Running the delivery runtime
//!
//! The [`server::PipelineServer`] feeds the pipeline from TCP clients and
//! writes each snapshot frame back:
//!
//! ```rust,no_run
//! use alphabet::config::PipelineConfig;
//! use alphabet::server::PipelineServer;
//! use alphabet::telemetry::{LogFormat, init_logging};
//!
//! #[tokio::main]
//! async fn main() -> alphabet::error::Result<()> {
//!     init_logging(LogFormat::from_env()).expect("Failed to init logging");
//!
//!     let config = PipelineConfig::from_env();
//!     let server = PipelineServer::bind(&config).await?;
//!     server.run().await
//! }
//! ```

#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod constants;
mod encode;
pub mod error;
mod parser;
pub mod pipeline;
pub mod router;
pub mod server;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod types;

pub mod prelude {
    //! Main exports of the pipeline surface.
    pub use crate::codec::FrameCodec;
    pub use crate::error::{Error, Result};
    pub use crate::pipeline::Pipeline;
    pub use crate::router::{KeyUniverse, Router};
    pub use crate::store::PartitionStore;
    pub use crate::types::{PartitionKey, Vote, VotesSnapshot};

    pub use bytes;
}
