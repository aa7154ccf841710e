// In: src/config.rs

//! The single source of truth for all padat codec configuration.
//!
//! This module defines the unified `PadatConfig` struct, which is designed to be
//! created once at the application boundary (e.g., from a user's JSON file or
//! a CLI layer) and then passed by reference into `encode_with_config`.
//!
//! This approach centralizes all settings and keeps the knob surface of the
//! `Planner` and the encoder pipeline in one place.

use serde::{Deserialize, Serialize};

use crate::error::PadatError;

//==================================================================================
// I. Core Parameter Types
//==================================================================================

/// The compression effort level, `0..=11`. Higher values spend more CPU time
/// on match search and context modeling in exchange for smaller output.
///
/// Constructors clamp out-of-range values instead of failing; quality never
/// affects correctness, only the size/speed trade-off.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(from = "u8", into = "u8")]
pub struct Quality(u8);

impl From<u8> for Quality {
    fn from(level: u8) -> Self {
        Quality::new(level)
    }
}

impl From<Quality> for u8 {
    fn from(quality: Quality) -> u8 {
        quality.0
    }
}

impl Quality {
    pub const MIN: Quality = Quality(0);
    pub const MAX: Quality = Quality(11);

    /// Creates a quality level, clamping into `[MIN, MAX]`.
    pub fn new(level: u8) -> Self {
        Quality(level.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn level(self) -> u8 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Quality::MAX
    }
}

/// The sliding-window size as a base-2 exponent, `10..=24` bits.
///
/// The maximum back-reference distance is `2^window`, which also bounds the
/// memory used by the match finder's chain index. Constructors clamp.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(from = "u8", into = "u8")]
pub struct Window(u8);

impl From<u8> for Window {
    fn from(bits: u8) -> Self {
        Window::new(bits)
    }
}

impl From<Window> for u8 {
    fn from(window: Window) -> u8 {
        window.0
    }
}

impl Window {
    pub const MIN: Window = Window(10);
    pub const MAX: Window = Window(24);

    /// Creates a window exponent, clamping into `[MIN, MAX]`.
    pub fn new(bits: u8) -> Self {
        Window(bits.clamp(Self::MIN.0, Self::MAX.0))
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    /// The maximum back-reference distance this window permits.
    pub fn max_distance(self) -> u32 {
        1u32 << self.0
    }
}

impl Default for Window {
    fn default() -> Self {
        Window(22)
    }
}

/// A hint describing the expected input class. Selects the literal context
/// function used by the block modeler; recorded in the stream header so the
/// decoder mirrors the routing. Never affects correctness.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// UTF-8-ish prose and source code.
    Text,
    /// Binary tables with short signed deltas (fonts, interleaved structs).
    Font,
    /// **Default:** no assumption about the input.
    #[default]
    Generic,
}

impl Mode {
    /// Stable wire id for the header's mode field.
    pub(crate) fn to_wire(self) -> u8 {
        match self {
            Mode::Generic => 0,
            Mode::Text => 1,
            Mode::Font => 2,
        }
    }

    pub(crate) fn from_wire(raw: u8) -> Result<Self, PadatError> {
        match raw {
            0 => Ok(Mode::Generic),
            1 => Ok(Mode::Text),
            2 => Ok(Mode::Font),
            other => Err(PadatError::Decode(format!(
                "Unknown mode id in stream header: {other}"
            ))),
        }
    }
}

//==================================================================================
// II. The Unified PadatConfig
//==================================================================================

/// The single, unified configuration for one encode call.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "snake_case")]
pub struct PadatConfig {
    /// The effort level guiding the match finder and block modeler.
    #[serde(default)]
    pub quality: Quality,

    /// The sliding-window exponent.
    #[serde(default)]
    pub window: Window,

    /// The input-class hint for literal context modeling.
    #[serde(default)]
    pub mode: Mode,

    /// If true, a CRC-32 of the input is appended to the stream and verified
    /// on decode.
    #[serde(default = "default_true")]
    pub checksum: bool,

    /// Policy threshold: inputs shorter than this (but non-empty) are
    /// rejected with `InputTooSmall`. `None` disables the check, which is
    /// the default; tiny inputs round-trip, they just don't shrink.
    /// Empty input is always accepted and never consults this field.
    #[serde(default)]
    pub min_input_size: Option<usize>,
}

impl Default for PadatConfig {
    fn default() -> Self {
        Self {
            quality: Quality::default(),
            window: Window::default(),
            mode: Mode::default(),
            checksum: true,
            min_input_size: None,
        }
    }
}

impl PadatConfig {
    /// Deserializes a config from its JSON representation, the format the
    /// application boundary hands us.
    pub fn from_json(json: &str) -> Result<Self, PadatError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

//==================================================================================
// III. Unit Tests
//==================================================================================
