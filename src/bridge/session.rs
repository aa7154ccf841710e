// In: src/bridge/session.rs

//! The stateful compression facade.
//!
//! A `Compressor` is an explicit session object: it owns its configuration
//! and accumulation buffer, accepts input incrementally via `feed`, and
//! produces one stream when consumed by `finish`. It exists for callers that
//! receive data in pieces; the codec contract itself stays whole-buffer, so
//! `finish` is where the actual encode happens.

use crate::config::PadatConfig;
use crate::error::PadatError;
use crate::pipeline::encoder;

/// An accumulating compression session.
pub struct Compressor {
    config: PadatConfig,
    buffer: Vec<u8>,
}

impl Compressor {
    pub fn new(config: PadatConfig) -> Self {
        Self {
            config,
            buffer: Vec::new(),
        }
    }

    /// Appends a chunk of input to the session.
    pub fn feed(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Total bytes fed so far.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }

    /// Encodes everything fed so far and consumes the session. The working
    /// buffer is released on return, on success and on error alike.
    pub fn finish(self) -> Result<Vec<u8>, PadatError> {
        encoder::encode_stream(&self.buffer, &self.config)
    }
}
