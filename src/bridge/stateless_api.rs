// In: src/bridge/stateless_api.rs

use crate::config::PadatConfig;
use crate::error::PadatError;
use crate::pipeline::{decoder, encoder};

/// Compresses a byte slice into a self-describing padat stream using the
/// default configuration (quality 11, 22-bit window, generic mode, trailing
/// checksum).
pub fn encode(data: &[u8]) -> Result<Vec<u8>, PadatError> {
    encode_with_config(data, &PadatConfig::default())
}

/// Compresses a byte slice with an explicit configuration.
///
/// The input is never mutated; the returned buffer is the only side effect.
/// Identical `(data, config)` pairs produce byte-identical streams.
pub fn encode_with_config(data: &[u8], config: &PadatConfig) -> Result<Vec<u8>, PadatError> {
    encoder::encode_stream(data, config)
}

/// Decompresses a padat stream back into the original bytes.
///
/// All parameters travel inside the stream itself; corrupt or foreign input
/// is rejected with a typed `PadatError`, never silently mis-decoded.
pub fn decode(data: &[u8]) -> Result<Vec<u8>, PadatError> {
    decoder::decode_stream(data)
}
