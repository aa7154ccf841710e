//! The top-level encode orchestrator.
//!
//! This function acts as a pure coordinator: it delegates parsing to the
//! planner, partitioning and statistics to the modeler, table construction
//! to the prefix kernel, and emission to the bit writer. Each block is
//! priced exactly in both renditions (entropy-coded and stored) and the
//! smaller one is written, so pathological inputs never expand past the
//! raw-bytes fallback plus framing.

use crate::config::PadatConfig;
use crate::error::PadatError;
use crate::kernels::bitio::BitWriter;
use crate::kernels::crc32::crc32;
use crate::kernels::matchfind::Token;
use crate::kernels::prefix::{build_code_lengths, write_code_lengths, PrefixEncoder, MAX_CODE_LEN};
use crate::bridge::format::{StreamHeader, BLOCK_COMPRESSED, BLOCK_STORED};
use crate::pipeline::modeler::{self, BlockPlan};
use crate::pipeline::models::{
    dist_alphabet_size, distance_to_symbol, length_to_symbol, END_OF_BLOCK,
};
use crate::pipeline::planner;

/// Inputs past this size would overflow the match finder's 32-bit positions.
const MAX_INPUT_SIZE: u64 = u32::MAX as u64;

/// Compresses `data` into a self-describing padat stream.
pub fn encode_stream(data: &[u8], config: &PadatConfig) -> Result<Vec<u8>, PadatError> {
    if data.len() as u64 >= MAX_INPUT_SIZE {
        return Err(PadatError::Encode(format!(
            "Input of {} bytes exceeds the 4 GiB single-call limit",
            data.len()
        )));
    }
    if let Some(min) = config.min_input_size {
        // Policy gate only; empty input always passes through (it has its
        // own minimal-stream rendition below).
        if !data.is_empty() && data.len() < min {
            return Err(PadatError::InputTooSmall {
                len: data.len(),
                min,
            });
        }
    }

    let header = StreamHeader {
        mode: config.mode,
        window: config.window,
        checksum: config.checksum,
        uncompressed_len: data.len() as u64,
    };
    let mut header_bytes = Vec::with_capacity(16);
    header.write(&mut header_bytes)?;

    if data.is_empty() {
        let mut out = header_bytes;
        if config.checksum {
            out.extend_from_slice(&crc32(data).to_le_bytes());
        }
        return Ok(out);
    }

    let params = planner::plan_search(config);
    let tokens = planner::tokenize(data, config, &params);
    let dist_symbols = dist_alphabet_size(config.window.bits());
    let blocks = modeler::plan_blocks(
        &tokens,
        data,
        config.mode,
        params.tokens_per_block,
        dist_symbols,
    );

    let mut writer = BitWriter::with_capacity(data.len() / 2 + 64);
    writer.write_bytes(&header_bytes);

    let last = blocks.len() - 1;
    for (i, block) in blocks.iter().enumerate() {
        write_block(&mut writer, data, &tokens, block, config, i == last)?;
    }

    let mut out = writer.finish();
    if config.checksum {
        out.extend_from_slice(&crc32(data).to_le_bytes());
    }
    log::debug!(
        "encoder: {} bytes -> {} bytes across {} block(s)",
        data.len(),
        out.len(),
        blocks.len()
    );
    Ok(out)
}

/// Writes one block, choosing the cheaper of the entropy-coded and stored
/// renditions.
fn write_block(
    writer: &mut BitWriter,
    data: &[u8],
    tokens: &[Token],
    block: &BlockPlan,
    config: &PadatConfig,
    is_last: bool,
) -> Result<(), PadatError> {
    let lit_lengths: Vec<Vec<u8>> = block
        .lit_freqs
        .iter()
        .map(|freqs| build_code_lengths(freqs, MAX_CODE_LEN))
        .collect();
    let dist_lengths = build_code_lengths(&block.dist_freqs, MAX_CODE_LEN);

    // Exact bit price of the compressed rendition: serialized tables plus
    // symbol costs plus the raw extra bits the modeler already tallied.
    let mut table_bits = 0u64;
    for lengths in lit_lengths.iter().chain(std::iter::once(&dist_lengths)) {
        let mut scratch = BitWriter::with_capacity(64);
        write_code_lengths(&mut scratch, lengths)?;
        table_bits += scratch.bit_len();
    }
    let mut symbol_bits = 0u64;
    for (freqs, lengths) in block.lit_freqs.iter().zip(&lit_lengths) {
        for (sym, &freq) in freqs.iter().enumerate() {
            symbol_bits += freq as u64 * lengths[sym] as u64;
        }
    }
    for (sym, &freq) in block.dist_freqs.iter().enumerate() {
        symbol_bits += freq as u64 * dist_lengths[sym] as u64;
    }
    let compressed_bits = table_bits + symbol_bits + block.extra_bits;

    let stored_len = block.byte_range.len();
    // Worst-case alignment pad plus the 32-bit length field.
    let stored_bits = 7 + 32 + 8 * stored_len as u64;

    writer.write_bit(is_last);

    if stored_bits < compressed_bits {
        writer.write_bits(BLOCK_STORED, 2);
        writer.align_to_byte();
        writer.write_bits(stored_len as u32, 32);
        writer.write_bytes(&data[block.byte_range.clone()]);
        return Ok(());
    }

    writer.write_bits(BLOCK_COMPRESSED, 2);
    for lengths in &lit_lengths {
        write_code_lengths(writer, lengths)?;
    }
    write_code_lengths(writer, &dist_lengths)?;

    let lit_encoders: Vec<PrefixEncoder> = lit_lengths
        .iter()
        .map(|lengths| PrefixEncoder::from_lengths(lengths))
        .collect();
    let dist_encoder = PrefixEncoder::from_lengths(&dist_lengths);

    let mut pos = block.byte_range.start;
    for token in &tokens[block.token_range.clone()] {
        let ctx = modeler::context_at(data, pos, config.mode);
        match *token {
            Token::Literal(byte) => {
                lit_encoders[ctx].write_symbol(writer, byte as usize)?;
                pos += 1;
            }
            Token::Copy { len, dist } => {
                let (len_sym, len_extra_bits, len_extra) = length_to_symbol(len);
                lit_encoders[ctx].write_symbol(writer, len_sym as usize)?;
                if len_extra_bits > 0 {
                    writer.write_bits(len_extra as u32, len_extra_bits);
                }

                let (dist_sym, dist_extra_bits, dist_extra) = distance_to_symbol(dist);
                dist_encoder.write_symbol(writer, dist_sym as usize)?;
                if dist_extra_bits > 0 {
                    writer.write_bits(dist_extra, dist_extra_bits);
                }
                pos += len as usize;
            }
        }
    }

    let eob_ctx = modeler::context_at(data, pos, config.mode);
    lit_encoders[eob_ctx].write_symbol(writer, END_OF_BLOCK as usize)?;

    debug_assert_eq!(pos, block.byte_range.end, "block byte accounting drifted");
    Ok(())
}
