// In: src/error.rs

//! This module defines the single, unified error type for the entire padat library.
//! It uses the `thiserror` crate to provide ergonomic, context-aware error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PadatError {
    // =========================================================================
    // === Encode-Side Errors
    // =========================================================================
    /// Policy rejection: the input is shorter than the configured minimum.
    /// Recoverable: the caller may store the data raw instead.
    #[error("Input of {len} bytes is below the configured minimum of {min} bytes")]
    InputTooSmall { len: usize, min: usize },

    /// An internal invariant was violated while encoding. This is a bug.
    #[error("Encoder invariant violation: {0}")]
    Encode(String),

    // =========================================================================
    // === Decode-Side Errors (corrupt or foreign input; reject, never guess)
    // =========================================================================
    /// The stream is structurally malformed (bad magic, version, reserved
    /// field, or a declared size that contradicts the buffer).
    #[error("Malformed stream: {0}")]
    Decode(String),

    /// A serialized prefix-code table violates the prefix-code invariants,
    /// or a decoded bit pattern matches no code in the table.
    #[error("Invalid prefix-code table: {0}")]
    InvalidTable(String),

    /// A copy token references data before the start of the output or
    /// farther back than the declared window allows.
    #[error("Back-reference distance {dist} exceeds available history {available}")]
    InvalidBackReference { dist: u32, available: u64 },

    /// The bit stream ended in the middle of a symbol or declared field.
    #[error("Stream truncated: ran out of bits mid-decode")]
    TruncatedStream,

    /// The trailing integrity check did not match the reconstructed output.
    #[error("Checksum mismatch: stream declares {expected:#010x}, output hashes to {actual:#010x}")]
    ChecksumMismatch { expected: u32, actual: u32 },

    // =========================================================================
    // === External Error Wrappers
    // =========================================================================
    /// An error from the Serde JSON library, during config deserialization.
    #[error("Serde JSON error: {0}")]
    SerdeJson(#[from] serde_json::Error),
}
