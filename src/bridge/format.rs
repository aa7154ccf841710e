// In: src/bridge/format.rs

//! Defines the on-wire structure of a padat stream.
//! This is the single source of truth for the container layout and the
//! block-level framing constants. Everything after the byte-oriented header
//! is bit-oriented and owned by the pipeline.
//!
//! Layout (multi-byte fields little-endian):
//!
//! ```text
//! magic "PADT" | version u16 | flags u8 | window_bits u8 |
//! uncompressed_len varint | bit-coded blocks ... | crc32 u32 (if flagged)
//! ```

use std::io::Cursor;

use crate::config::{Mode, Window};
use crate::error::PadatError;
use crate::kernels::varint;

//==================================================================================
// I. Format Constants
//==================================================================================

/// The magic number identifying a padat stream.
pub const STREAM_MAGIC: &[u8; 4] = b"PADT";
/// The current version of the stream format.
pub const STREAM_FORMAT_VERSION: u16 = 1;

/// Flag bit: a CRC-32 of the original input trails the stream.
pub const FLAG_CHECKSUM: u8 = 0b0000_0001;
/// The mode id occupies these flag bits.
const MODE_SHIFT: u8 = 1;
const MODE_MASK: u8 = 0b0000_0110;
/// Any other flag bit is reserved and must be zero.
const KNOWN_FLAGS: u8 = FLAG_CHECKSUM | MODE_MASK;

/// Block kind ids (2-bit field after each block's `is_last` bit).
pub const BLOCK_STORED: u32 = 0;
pub const BLOCK_COMPRESSED: u32 = 1;

/// Fixed-size portion of the header: magic, version, flags, window bits.
const FIXED_HEADER_SIZE: usize = 8;

//==================================================================================
// II. Stream Header
//==================================================================================

/// The parsed byte-oriented header that prefixes every stream. Carries
/// everything decode needs before the first bit is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHeader {
    pub mode: Mode,
    pub window: Window,
    pub checksum: bool,
    pub uncompressed_len: u64,
}

impl StreamHeader {
    /// Serializes the header onto `out`.
    pub fn write(&self, out: &mut Vec<u8>) -> Result<(), PadatError> {
        out.extend_from_slice(STREAM_MAGIC);
        out.extend_from_slice(&STREAM_FORMAT_VERSION.to_le_bytes());

        let mut flags = self.mode.to_wire() << MODE_SHIFT;
        if self.checksum {
            flags |= FLAG_CHECKSUM;
        }
        out.push(flags);
        out.push(self.window.bits());

        varint::encode_one(self.uncompressed_len, out)
    }

    /// Parses and validates a header, returning it with its byte size so the
    /// caller knows where the bit payload starts.
    pub fn read(bytes: &[u8]) -> Result<(StreamHeader, usize), PadatError> {
        if bytes.len() < FIXED_HEADER_SIZE + 1 {
            return Err(PadatError::TruncatedStream);
        }

        if bytes[..4] != *STREAM_MAGIC {
            return Err(PadatError::Decode("Bad magic number".to_string()));
        }

        let version = u16::from_le_bytes([bytes[4], bytes[5]]);
        if version != STREAM_FORMAT_VERSION {
            return Err(PadatError::Decode(format!(
                "Unsupported stream version: expected {STREAM_FORMAT_VERSION}, got {version}"
            )));
        }

        let flags = bytes[6];
        if flags & !KNOWN_FLAGS != 0 {
            return Err(PadatError::Decode(format!(
                "Reserved flag bits set: {flags:#010b}"
            )));
        }
        let checksum = flags & FLAG_CHECKSUM != 0;
        let mode = Mode::from_wire((flags & MODE_MASK) >> MODE_SHIFT)?;

        let window_bits = bytes[7];
        if window_bits < Window::MIN.bits() || window_bits > Window::MAX.bits() {
            return Err(PadatError::Decode(format!(
                "Window exponent {window_bits} outside [{}, {}]",
                Window::MIN.bits(),
                Window::MAX.bits()
            )));
        }
        let window = Window::new(window_bits);

        let mut cursor = Cursor::new(&bytes[FIXED_HEADER_SIZE..]);
        let uncompressed_len = varint::decode_one::<u64>(&mut cursor)?;
        let header_size = FIXED_HEADER_SIZE + cursor.position() as usize;

        Ok((
            StreamHeader {
                mode,
                window,
                checksum,
                uncompressed_len,
            },
            header_size,
        ))
    }
}

//==================================================================================
// III. Unit Tests
//==================================================================================
