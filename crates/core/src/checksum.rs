//! CRC-32 (reflected polynomial `0xEDB88320`) used to derive identifier codes.
//!
//! The table is built at compile time so codes are stable across builds and
//! match every standard CRC-32 implementation.

const POLYNOMIAL: u32 = 0xEDB8_8320;

/// Precomputed lookup table, one entry per byte value.
pub static CRC_TABLE: [u32; 256] = make_table();

const fn make_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    let mut n = 0;
    while n < 256 {
        let mut c = n as u32;
        let mut k = 0;
        while k < 8 {
            c = if c & 1 != 0 {
                POLYNOMIAL ^ (c >> 1)
            } else {
                c >> 1
            };
            k += 1;
        }
        table[n] = c;
        n += 1;
    }
    table
}

/// Computes the CRC-32 of `bytes`.
pub fn checksum(bytes: &[u8]) -> u32 {
    let mut running = u32::MAX;
    for &byte in bytes {
        running = (running >> 8) ^ CRC_TABLE[((running ^ u32::from(byte)) & 0xFF) as usize];
    }
    running ^ u32::MAX
}

/// Computes the CRC-32 of the UTF-8 bytes of `text`.
pub fn checksum_str(text: &str) -> u32 {
    checksum(text.as_bytes())
}

#[cfg(test)]
#[path = "tests/checksum_tests.rs"]
mod tests;
