//! Format constants for the persisted collection blob.
//!
//! The raw payload is `magic | version | entry count | entries`, every
//! integer little-endian. Bump [`SAVE_FORMAT_VERSION`] when the entry layout
//! changes; readers reject blobs newer than the version they were built with.

/// Current format version for save blobs.
pub const SAVE_FORMAT_VERSION: u16 = 1;

/// Magic tag at the head of every raw payload, written as four unprefixed bytes.
pub const SAVE_MAGIC: &str = "PLMV";

/// Hard limit imposed by the `u16` entry count field.
pub const MAX_SAVE_ENTRIES: usize = u16::MAX as usize;

/// Capacity hint for the raw payload writer. Not a limit.
pub const WRITER_CAPACITY_HINT: usize = 128;

/// Checksum code that never maps to an identifier.
pub const SENTINEL_CODE: u32 = 0;

/// Storage slot holding the current blob.
pub const SAVE_DATA_KEY: &str = "saveData";

/// Storage slot holding the pre-blob `{identifier: count}` JSON mapping.
pub const LEGACY_COUNT_KEY: &str = "count";
