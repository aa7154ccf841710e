//! This module contains the pure, stateless kernels for LEB128
//! (Little-Endian Base 128) variable-length integer encoding and decoding.
//!
//! The container header stores its length fields this way, so tiny streams
//! pay one byte of length overhead instead of eight. It is fully panic-free.

use num_traits::{PrimInt, Unsigned};
use std::io::Cursor;

use crate::error::PadatError;

//==================================================================================
// 1. Public API for Single-Value Operations
//==================================================================================

/// Encodes a single unsigned integer into a LEB128 byte sequence, appending
/// to the buffer.
pub fn encode_one<T>(value: T, buffer: &mut Vec<u8>) -> Result<(), PadatError>
where
    T: PrimInt + Unsigned,
{
    let zero = T::zero();
    let seven_bit_mask = T::from(0x7F)
        .ok_or_else(|| PadatError::Encode("Failed to create 7-bit mask for type".to_string()))?;
    let continuation_bit = T::from(0x80)
        .ok_or_else(|| PadatError::Encode("Failed to create continuation bit for type".to_string()))?;

    let mut current = value;
    loop {
        let mut byte = current & seven_bit_mask;
        current = current >> 7;
        if current != zero {
            byte = byte | continuation_bit;
        }

        let byte_u8 = byte
            .to_u8()
            .ok_or_else(|| PadatError::Encode("Failed to convert generic integer to u8".to_string()))?;
        buffer.push(byte_u8);

        if current == zero {
            break;
        }
    }
    Ok(())
}

/// Decodes a single unsigned integer from a LEB128 byte stream cursor.
pub fn decode_one<T>(cursor: &mut Cursor<&[u8]>) -> Result<T, PadatError>
where
    T: PrimInt + Unsigned,
{
    let mut result = T::zero();
    let mut shift = 0;
    let total_bits = std::mem::size_of::<T>() * 8;

    loop {
        let pos = cursor.position() as usize;
        let byte = *cursor
            .get_ref()
            .get(pos)
            .ok_or(PadatError::TruncatedStream)?;
        cursor.set_position((pos + 1) as u64);

        let payload = T::from(byte & 0x7F)
            .ok_or_else(|| PadatError::Decode("Failed to widen 7-bit payload".to_string()))?;

        // Adding these 7 bits must not exceed the type's capacity.
        if shift >= total_bits {
            return Err(PadatError::Decode(
                "Integer overflow during varint decoding".to_string(),
            ));
        }

        result = result | (payload << shift);

        if byte & 0x80 == 0 {
            // The final byte may still set bits out of bounds when the bit
            // count is not a multiple of 7.
            if shift + 7 > total_bits && (byte >> (total_bits - shift)) > 0 {
                return Err(PadatError::Decode(
                    "Integer overflow during varint decoding".to_string(),
                ));
            }
            return Ok(result);
        }

        shift += 7;
    }
}

//==================================================================================
// 2. Unit Tests
//==================================================================================
