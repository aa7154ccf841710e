// In: src/bridge/mod.rs

// ====================================================================================
// ARCHITECTURAL OVERVIEW: The Bridge Layer
// ====================================================================================
//
// The `bridge` is the sole public-facing API of the padat library. It provides a
// stable, byte-oriented interface that completely encapsulates the pure `pipeline`
// engine. It is the authoritative boundary between the outside world and the
// internal codec logic.
//
// Data Flow (Compression):
//
//   1. [Stateful Facade (Compressor)]      -> Accumulates caller chunks via `feed`
//         |
//         `-> on `finish` ->
//
//   2. [Stateless API (encode_with_config)] -> Receives `&[u8]` + `&PadatConfig`
//         |
//         `-> Calls the pure engine (`pipeline::encoder::encode_stream`)
//
//   3. [Pipeline Engine] -> Returns `Result<Vec<u8>>` (a self-describing stream)
//
//
// Data Flow (Decompression):
//
//   1. [Stateless API (decode)] -> Receives `&[u8]` (a serialized stream)
//         |
//         `-> Calls the pure engine (`pipeline::decoder::decode_stream`)
//
//   2. [Pipeline Engine] -> Returns `Result<Vec<u8>>` (the original bytes)
//
// ====================================================================================
pub mod format;
pub mod session;
pub mod stateless_api;

// --- High-Level Stateful API ---
pub use session::Compressor;

// --- Low-Level Stateless API ---
pub use stateless_api::{decode, encode, encode_with_config};
