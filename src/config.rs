//! Pipeline configuration.
//!
//! The partition key universe is injected configuration: the pipeline never
//! computes or rediscovers it at runtime. Defaults cover the standard
//! deployment (all 26 lowercase letters); environment variables override
//! individual fields for operational tuning.
//!
//! # Environment Variables
//!
//! - `ALPHABET_PARTITION_KEYS`: the letters to partition on (default: `a`..`z`)
//! - `ALPHABET_MAX_FRAME_SIZE`: maximum accepted payload size in bytes
//! - `ALPHABET_BIND_ADDR`: listen address for the delivery runtime
//! - `ALPHABET_FRAME_READ_TIMEOUT_SECS`: per-frame read timeout

use crate::constants::{
    DEFAULT_FRAME_READ_TIMEOUT_SECS, DEFAULT_MAX_FRAME_SIZE, VOTE_PAYLOAD_LENGTH,
};
use crate::error::{Error, Result};
use crate::router::KeyUniverse;

/// Configuration for a pipeline and its delivery runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Letters making up the partition key universe.
    pub partition_keys: Vec<char>,

    /// Maximum accepted frame payload size in bytes.
    ///
    /// Bounds what a corrupt length prefix can make the server allocate.
    pub max_frame_size: usize,

    /// Address the delivery runtime listens on.
    pub bind_addr: String,

    /// Seconds allowed for reading one complete frame from a client.
    pub frame_read_timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            partition_keys: ('a'..='z').collect(),
            max_frame_size: DEFAULT_MAX_FRAME_SIZE,
            bind_addr: "127.0.0.1:7000".to_string(),
            frame_read_timeout_secs: DEFAULT_FRAME_READ_TIMEOUT_SECS,
        }
    }
}

impl PipelineConfig {
    /// Create configuration from environment variables, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let partition_keys = std::env::var("ALPHABET_PARTITION_KEYS")
            .map(|s| s.chars().collect())
            .unwrap_or(defaults.partition_keys);

        let max_frame_size = std::env::var("ALPHABET_MAX_FRAME_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.max_frame_size);

        let bind_addr = std::env::var("ALPHABET_BIND_ADDR").unwrap_or(defaults.bind_addr);

        let frame_read_timeout_secs = std::env::var("ALPHABET_FRAME_READ_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.frame_read_timeout_secs);

        Self {
            partition_keys,
            max_frame_size,
            bind_addr,
            frame_read_timeout_secs,
        }
    }

    /// Check the configuration for internal consistency.
    ///
    /// Returns every problem found rather than stopping at the first.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.partition_keys.is_empty() {
            errors.push("partition_keys must not be empty".to_string());
        }
        for letter in &self.partition_keys {
            if !letter.is_ascii_lowercase() {
                errors.push(format!(
                    "partition key '{}' is not a lowercase ASCII letter",
                    letter
                ));
            }
        }

        if self.max_frame_size < VOTE_PAYLOAD_LENGTH {
            errors.push(format!(
                "max_frame_size {} cannot carry a {}-byte vote payload",
                self.max_frame_size, VOTE_PAYLOAD_LENGTH
            ));
        }

        if self.frame_read_timeout_secs == 0 {
            errors.push("frame_read_timeout_secs must be at least 1".to_string());
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }

    /// Build the injected key universe from the configured letters.
    pub fn key_universe(&self) -> Result<KeyUniverse> {
        if let Err(errors) = self.validate() {
            return Err(Error::Config(errors.join("; ")));
        }
        KeyUniverse::from_letters(self.partition_keys.iter().copied())
    }
}
