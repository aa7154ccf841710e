//! This file is the root of the `padat_codec` Rust crate.
//!
//! Its responsibilities are strictly limited to:
//! 1.  Declaring all the top-level modules of the library (`bridge`,
//!     `kernels`, `pipeline`, ...) so the Rust compiler knows they exist.
//! 2.  Re-exporting the public API surface: the stateless `encode`/`decode`
//!     entry points, the session facade, and the configuration types.

//==================================================================================
// 0. Constants
//==================================================================================
/// The crate version, automatically set from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//==================================================================================
// 1. Module Declarations
//==================================================================================
pub mod bridge;
pub mod config;
pub mod kernels;

mod error;
mod pipeline;

//==================================================================================
// 2. Public API Surface
//==================================================================================
pub use bridge::{decode, encode, encode_with_config, Compressor};
pub use config::{Mode, PadatConfig, Quality, Window};
pub use error::PadatError;

/// Turns on verbose planner/encoder logging for ad-hoc diagnostics. Safe to
/// call more than once; later calls are no-ops.
pub fn enable_verbose_logging() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Debug)
        .try_init();
}
