//! The top-level decode orchestrator.
//!
//! Decode runs the state machine `Header -> (BlockTableRebuild <-> TokenDecode)*
//! -> Done`, rebuilding the per-block entropy tables from their serialized
//! code lengths, replaying the token stream against the growing output, and
//! finally verifying the trailing checksum when the header carries one. Any
//! structural contradiction aborts with a typed error; partial output is
//! never returned.

use crate::error::PadatError;
use crate::kernels::bitio::BitReader;
use crate::kernels::crc32::crc32;
use crate::kernels::prefix::{read_code_lengths, PrefixDecoder};
use crate::bridge::format::{StreamHeader, BLOCK_COMPRESSED, BLOCK_STORED};
use crate::pipeline::modeler::{self, NUM_LITERAL_CONTEXTS};
use crate::pipeline::models::{
    dist_alphabet_size, distance_symbol_extra_bits, length_symbol_extra_bits, symbol_to_distance,
    symbol_to_length, END_OF_BLOCK, LIT_ALPHABET,
};

/// Cap on the speculative pre-allocation from the declared length, so a
/// forged header cannot demand gigabytes up front. The buffer still grows to
/// whatever the stream actually reconstructs.
const MAX_PREALLOC: usize = 16 * 1024 * 1024;

/// Decompresses a padat stream back into the original bytes.
pub fn decode_stream(bytes: &[u8]) -> Result<Vec<u8>, PadatError> {
    let (header, header_size) = StreamHeader::read(bytes)?;
    if header.uncompressed_len > usize::MAX as u64 {
        return Err(PadatError::Decode(format!(
            "Declared length {} exceeds addressable memory",
            header.uncompressed_len
        )));
    }
    let expected_len = header.uncompressed_len as usize;

    let mut reader = BitReader::new(&bytes[header_size..]);
    let mut output: Vec<u8> = Vec::with_capacity(expected_len.min(MAX_PREALLOC));

    if expected_len > 0 {
        loop {
            let is_last = reader.read_bit()?;
            let kind = reader.read_bits(2)?;
            match kind {
                BLOCK_STORED => decode_stored_block(&mut reader, &mut output, expected_len)?,
                BLOCK_COMPRESSED => {
                    decode_compressed_block(&mut reader, &mut output, expected_len, &header)?
                }
                other => {
                    return Err(PadatError::Decode(format!(
                        "Reserved block kind {other}"
                    )));
                }
            }

            if is_last {
                break;
            }
            if output.len() >= expected_len {
                return Err(PadatError::Decode(
                    "Stream continues past its declared length".to_string(),
                ));
            }
        }

        if output.len() != expected_len {
            return Err(PadatError::Decode(format!(
                "Stream declares {} bytes but reconstructs {}",
                expected_len,
                output.len()
            )));
        }
    }

    if header.checksum {
        reader.align_to_byte();
        let mut crc_buf = [0u8; 4];
        reader.read_bytes(&mut crc_buf)?;
        let expected = u32::from_le_bytes(crc_buf);
        let actual = crc32(&output);
        if expected != actual {
            return Err(PadatError::ChecksumMismatch { expected, actual });
        }
    }

    Ok(output)
}

/// A stored block: byte-aligned length-prefixed raw bytes.
fn decode_stored_block(
    reader: &mut BitReader,
    output: &mut Vec<u8>,
    expected_len: usize,
) -> Result<(), PadatError> {
    reader.align_to_byte();
    let len = reader.read_bits(32)? as usize;
    if output.len() + len > expected_len {
        return Err(PadatError::Decode(
            "Stored block overflows the declared length".to_string(),
        ));
    }
    // Check against the bytes actually present before allocating.
    if len > reader.remaining_bytes() {
        return Err(PadatError::TruncatedStream);
    }
    let start = output.len();
    output.resize(start + len, 0);
    reader.read_bytes(&mut output[start..])
}

/// A compressed block: rebuild its tables, then replay tokens until the
/// end-of-block symbol.
fn decode_compressed_block(
    reader: &mut BitReader,
    output: &mut Vec<u8>,
    expected_len: usize,
    header: &StreamHeader,
) -> Result<(), PadatError> {
    let mut lit_decoders = Vec::with_capacity(NUM_LITERAL_CONTEXTS);
    for _ in 0..NUM_LITERAL_CONTEXTS {
        let lengths = read_code_lengths(reader, LIT_ALPHABET)?;
        lit_decoders.push(PrefixDecoder::from_lengths(&lengths)?);
    }
    let dist_lengths = read_code_lengths(reader, dist_alphabet_size(header.window.bits()))?;
    let dist_decoder = PrefixDecoder::from_lengths(&dist_lengths)?;

    let max_distance = header.window.max_distance() as u64;

    loop {
        let ctx = modeler::context_at(output, output.len(), header.mode);
        let symbol = lit_decoders[ctx].read_symbol(reader)?;

        if symbol < END_OF_BLOCK {
            if output.len() >= expected_len {
                return Err(PadatError::Decode(
                    "Literal overflows the declared length".to_string(),
                ));
            }
            output.push(symbol as u8);
        } else if symbol == END_OF_BLOCK {
            return Ok(());
        } else {
            let len_extra_bits = length_symbol_extra_bits(symbol);
            let len_extra = if len_extra_bits > 0 {
                reader.read_bits(len_extra_bits)? as u16
            } else {
                0
            };
            let len = symbol_to_length(symbol, len_extra) as usize;

            let dist_symbol = dist_decoder.read_symbol(reader)?;
            let dist_extra_bits = distance_symbol_extra_bits(dist_symbol);
            let dist_extra = if dist_extra_bits > 0 {
                reader.read_bits(dist_extra_bits)?
            } else {
                0
            };
            let dist = symbol_to_distance(dist_symbol, dist_extra);

            if dist as u64 > output.len() as u64 || dist as u64 > max_distance {
                return Err(PadatError::InvalidBackReference {
                    dist,
                    available: output.len() as u64,
                });
            }
            if output.len() + len > expected_len {
                return Err(PadatError::Decode(
                    "Copy overflows the declared length".to_string(),
                ));
            }

            // Byte-at-a-time so overlapping copies (dist < len) correctly
            // re-read bytes this same copy just produced.
            let start = output.len() - dist as usize;
            for i in 0..len {
                let byte = output[start + i];
                output.push(byte);
            }
        }
    }
}
