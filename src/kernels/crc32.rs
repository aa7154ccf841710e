//! This module contains the pure, stateless kernel for the CRC-32/ISO-HDLC
//! checksum (polynomial 0x04C11DB7, reflected) used as the stream's trailing
//! integrity check.

/// Byte-at-a-time lookup table, built once at first use.
static CRC_TABLE: std::sync::LazyLock<[u32; 256]> = std::sync::LazyLock::new(|| {
    let mut table = [0u32; 256];
    for (i, entry) in table.iter_mut().enumerate() {
        let mut crc = i as u32;
        for _ in 0..8 {
            crc = if (crc & 1) != 0 {
                (crc >> 1) ^ 0xEDB8_8320
            } else {
                crc >> 1
            };
        }
        *entry = crc;
    }
    table
});

/// Computes the CRC-32 of `data` in one call.
#[inline]
pub fn crc32(data: &[u8]) -> u32 {
    let table = &*CRC_TABLE;
    let mut crc = 0xFFFF_FFFFu32;
    for &byte in data {
        let index = ((crc ^ byte as u32) & 0xFF) as usize;
        crc = (crc >> 8) ^ table[index];
    }
    crc ^ 0xFFFF_FFFF
}
