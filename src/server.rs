//! Message delivery runtime.
//!
//! A minimal TCP runtime that drives the pipeline's boundary contract for
//! every connected client: read the 4-byte header, ask the codec for the
//! payload length, read exactly that many bytes, run
//! decode → partition → dispatch → encode, and write the resulting
//! snapshot frame back to the client.
//!
//! # Error Policy
//!
//! Frame-content errors (malformed payload, invalid key, unknown
//! partition, encoding failure) are fatal to the offending message only:
//! they are logged at warn and the stream continues. Stream-integrity
//! errors (closed connection, oversized declared length, I/O failure,
//! read timeout) terminate the connection. Nothing is retried — that is
//! the upstream producer's decision.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::time::timeout;
use tracing::{debug, error, info, warn};

use crate::codec::FrameCodec;
use crate::config::PipelineConfig;
use crate::constants::FRAME_HEADER_LENGTH;
use crate::error::{Error, Result};
use crate::pipeline::Pipeline;

/// TCP server feeding a shared [`Pipeline`].
pub struct PipelineServer {
    listener: TcpListener,
    pipeline: Arc<Pipeline>,
    max_frame_size: usize,
    frame_read_timeout: Duration,
}

impl PipelineServer {
    /// Bind the listen address and build the pipeline from configuration.
    pub async fn bind(config: &PipelineConfig) -> Result<Self> {
        let universe = config.key_universe()?;
        let partitions = universe.len();
        let pipeline = Arc::new(Pipeline::new(universe));
        let listener = TcpListener::bind(&config.bind_addr).await?;

        info!(
            addr = %config.bind_addr,
            partitions,
            max_frame_size = config.max_frame_size,
            "Pipeline server listening"
        );

        Ok(Self {
            listener,
            pipeline,
            max_frame_size: config.max_frame_size,
            frame_read_timeout: Duration::from_secs(config.frame_read_timeout_secs),
        })
    }

    /// The address the server actually bound (useful with port 0).
    pub fn local_addr(&self) -> Result<SocketAddr> {
        self.listener.local_addr().map_err(Error::from)
    }

    /// Shared handle to the pipeline behind this server.
    pub fn pipeline(&self) -> Arc<Pipeline> {
        Arc::clone(&self.pipeline)
    }

    /// Accept connections forever, one task per client.
    pub async fn run(self) -> Result<()> {
        loop {
            let (stream, addr) = self.listener.accept().await?;
            debug!(client = %addr, "Accepted connection");

            let mut connection = Connection {
                stream,
                addr,
                pipeline: Arc::clone(&self.pipeline),
                max_frame_size: self.max_frame_size,
                frame_read_timeout: self.frame_read_timeout,
            };

            tokio::spawn(async move {
                if let Err(e) = connection.handle_frames().await {
                    error!(client = %addr, error = %e, "Connection terminated");
                }
            });
        }
    }
}

/// One client connection streaming vote frames.
struct Connection {
    stream: TcpStream,
    addr: SocketAddr,
    pipeline: Arc<Pipeline>,
    max_frame_size: usize,
    frame_read_timeout: Duration,
}

impl Connection {
    /// Process frames from this connection until it closes.
    async fn handle_frames(&mut self) -> Result<()> {
        loop {
            let read_result = match timeout(self.frame_read_timeout, self.read_frame()).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        client = %self.addr,
                        timeout_secs = self.frame_read_timeout.as_secs(),
                        "Frame read timeout - closing connection"
                    );
                    return Err(Error::MissingData("Frame read timeout".to_owned()));
                }
            };

            match read_result {
                Ok(payload) => match self.pipeline.process_payload(payload) {
                    Ok(snapshot_frame) => self.write_frame(&snapshot_frame).await?,
                    Err(e) if e.is_message_level() => {
                        // Fatal to this message only; the stream goes on
                        warn!(client = %self.addr, error = %e, "Dropping message");
                    }
                    Err(e) => return Err(e),
                },
                Err(Error::MissingData(_)) => {
                    debug!("Client {} disconnected", self.addr);
                    return Ok(());
                }
                Err(e) => {
                    error!("Error reading frame from {}: {:?}", self.addr, e);
                    return Err(e);
                }
            }
        }
    }

    /// Read a single frame payload from the connection.
    async fn read_frame(&mut self) -> Result<Bytes> {
        let mut header = [0u8; FRAME_HEADER_LENGTH];
        if let Err(e) = self.stream.read_exact(&mut header).await {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                return Err(Error::MissingData("Connection closed".to_owned()));
            }
            return Err(Error::IoError(e.kind()));
        }

        let size = FrameCodec::payload_length(&header)? as usize;
        if size > self.max_frame_size {
            return Err(Error::MissingData(format!(
                "Frame size {} exceeds maximum allowed size {}",
                size, self.max_frame_size
            )));
        }

        let mut payload = vec![0u8; size];
        if let Err(e) = self.stream.read_exact(&mut payload).await {
            if e.kind() == io::ErrorKind::UnexpectedEof {
                return Err(Error::MissingData("Connection closed mid-frame".to_owned()));
            }
            return Err(Error::IoError(e.kind()));
        }

        Ok(Bytes::from(payload))
    }

    /// Write an encoded snapshot frame back to the client.
    async fn write_frame(&mut self, frame: &[u8]) -> Result<()> {
        self.stream
            .write_all(frame)
            .await
            .map_err(|e| Error::IoError(e.kind()))?;
        self.stream
            .flush()
            .await
            .map_err(|e| Error::IoError(e.kind()))?;

        tracing::trace!("Wrote {} bytes to {}", frame.len(), self.addr);
        Ok(())
    }
}
