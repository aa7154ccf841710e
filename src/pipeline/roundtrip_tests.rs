use crate::config::{Mode, PadatConfig, Quality, Window};
use crate::error::PadatError;
use crate::kernels::bitio::BitWriter;
use crate::bridge::format::{StreamHeader, BLOCK_STORED};
use crate::pipeline::decoder::decode_stream;
use crate::pipeline::encoder::encode_stream;

// Test Helpers

/// The authoritative round-trip assertion: encode, decode, compare.
fn assert_roundtrip(data: &[u8], config: &PadatConfig) -> Vec<u8> {
    let encoded = encode_stream(data, config).expect("encode failed during test");
    let decoded = decode_stream(&encoded).expect("decode failed during test");
    assert_eq!(
        decoded, data,
        "round-trip mismatch for {} input bytes",
        data.len()
    );
    encoded
}

fn config_with(quality: u8, window: u8, mode: Mode) -> PadatConfig {
    PadatConfig {
        quality: Quality::new(quality),
        window: Window::new(window),
        mode,
        ..Default::default()
    }
}

/// A mixed corpus: prose, structure, runs, and a binary ramp.
fn mixed_corpus(len: usize) -> Vec<u8> {
    let mut data = Vec::with_capacity(len);
    while data.len() < len {
        data.extend_from_slice(b"{\"sensor\":\"padat-07\",\"reading\":");
        data.extend_from_slice(&(data.len() as u32).to_le_bytes());
        data.extend_from_slice(b"}\n");
        data.extend(std::iter::repeat_n(0u8, 13));
        data.push((data.len() % 251) as u8);
    }
    data.truncate(len);
    data
}

//==============================================================================
// Round-Trip Coverage
//==============================================================================

#[test]
fn test_roundtrip_across_all_qualities() {
    let data = mixed_corpus(2048);
    for q in 0..=11 {
        assert_roundtrip(&data, &config_with(q, 22, Mode::Generic));
    }
}

#[test]
fn test_roundtrip_across_modes_and_windows() {
    let data = mixed_corpus(4096);
    for mode in [Mode::Generic, Mode::Text, Mode::Font] {
        for window in [10u8, 16, 24] {
            assert_roundtrip(&data, &config_with(6, window, mode));
        }
    }
}

#[test]
fn test_roundtrip_long_runs_overlapping_copies() {
    let mut data = vec![0xABu8; 5000];
    data.extend_from_slice(b"tail");
    assert_roundtrip(&data, &PadatConfig::default());
}

#[test]
fn test_roundtrip_small_window_long_repetitive_input() {
    let mut data = Vec::new();
    for i in 0u32..4000 {
        data.extend_from_slice(b"block payload ");
        data.extend_from_slice(&i.to_le_bytes());
    }
    // 1 KiB window against ~70 KiB of input forces window-limited matching.
    assert_roundtrip(&data, &config_with(7, 10, Mode::Generic));
}

#[test]
fn test_roundtrip_spans_multiple_blocks() {
    // Enough tokens at quality 6 (16 Ki tokens per block) for several blocks.
    let data = mixed_corpus(400_000);
    let encoded = assert_roundtrip(&data, &config_with(6, 22, Mode::Generic));
    assert!(encoded.len() < data.len());
}

#[test]
fn test_compressed_output_is_smaller_on_text() {
    let mut data = Vec::new();
    for _ in 0..50 {
        data.extend_from_slice(
            b"the compression ratio on repetitive english text must be well under one. ",
        );
    }
    let encoded = assert_roundtrip(&data, &PadatConfig::default());
    assert!(encoded.len() < data.len() / 2);
}

//==============================================================================
// Structural Rejection
//==============================================================================

#[test]
fn test_decoder_rejects_reserved_block_kind() {
    let header = StreamHeader {
        mode: Mode::Generic,
        window: Window::default(),
        checksum: false,
        uncompressed_len: 10,
    };
    let mut bytes = Vec::new();
    header.write(&mut bytes).unwrap();

    let mut writer = BitWriter::new();
    writer.write_bit(true); // is_last
    writer.write_bits(3, 2); // reserved kind
    bytes.extend_from_slice(&writer.finish());

    assert!(matches!(
        decode_stream(&bytes),
        Err(PadatError::Decode(_))
    ));
}

#[test]
fn test_decoder_rejects_declared_length_mismatch() {
    // A stored block carrying 2 bytes against a header declaring 4.
    let header = StreamHeader {
        mode: Mode::Generic,
        window: Window::default(),
        checksum: false,
        uncompressed_len: 4,
    };
    let mut bytes = Vec::new();
    header.write(&mut bytes).unwrap();

    let mut writer = BitWriter::new();
    writer.write_bit(true);
    writer.write_bits(BLOCK_STORED, 2);
    writer.align_to_byte();
    writer.write_bits(2, 32);
    writer.write_bytes(&[7, 7]);
    bytes.extend_from_slice(&writer.finish());

    assert!(matches!(
        decode_stream(&bytes),
        Err(PadatError::Decode(_))
    ));
}

#[test]
fn test_decoder_rejects_stored_block_overflowing_declared_length() {
    let header = StreamHeader {
        mode: Mode::Generic,
        window: Window::default(),
        checksum: false,
        uncompressed_len: 1,
    };
    let mut bytes = Vec::new();
    header.write(&mut bytes).unwrap();

    let mut writer = BitWriter::new();
    writer.write_bit(true);
    writer.write_bits(BLOCK_STORED, 2);
    writer.align_to_byte();
    writer.write_bits(3, 32);
    writer.write_bytes(&[1, 2, 3]);
    bytes.extend_from_slice(&writer.finish());

    assert!(matches!(
        decode_stream(&bytes),
        Err(PadatError::Decode(_))
    ));
}

#[test]
fn test_truncation_mid_payload_is_rejected() {
    let data = mixed_corpus(10_000);
    let encoded = encode_stream(&data, &PadatConfig::default()).unwrap();
    let truncated = &encoded[..encoded.len() / 2];
    assert!(decode_stream(truncated).is_err());
}

#[test]
fn test_checksum_trailer_flip_reports_mismatch() {
    let data = mixed_corpus(512);
    let mut encoded = encode_stream(&data, &PadatConfig::default()).unwrap();
    // The trailing four bytes are the CRC; flip one bit there.
    let last = encoded.len() - 1;
    encoded[last] ^= 0x01;
    assert!(matches!(
        decode_stream(&encoded),
        Err(PadatError::ChecksumMismatch { .. })
    ));
}

#[test]
fn test_decode_without_checksum_flag_skips_verification() {
    let data = mixed_corpus(512);
    let config = PadatConfig {
        checksum: false,
        ..Default::default()
    };
    let encoded = assert_roundtrip(&data, &config);
    // No CRC trailer: stream is 4 bytes leaner than the checksummed one.
    let checksummed = encode_stream(&data, &PadatConfig::default()).unwrap();
    assert_eq!(encoded.len() + 4, checksummed.len());
}
