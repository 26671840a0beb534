//! Collection counting with tiered multipliers.
//!
//! Duplicate collectibles are counted per identifier. Counts map to tiers
//! and bonus multipliers through [`ProgressionConfig`], and the whole
//! collection persists as a compact, versioned, zlib-compressed base64 blob
//! (see [`codec`]) keyed by CRC-32 codes of the identifiers.

mod binary;
mod checksum;
pub mod codec;
mod error;
mod host;
mod identifier;
mod manager;
mod migration;
mod progression;
mod settings;
mod storage;
mod store;
mod version;

pub use binary::{SaveReader, SaveWriter};
pub use checksum::{checksum, checksum_str, CRC_TABLE};
pub use codec::{decode, decode_payload, encode, encode_payload, pack, unpack, DecodeOutcome};
pub use error::{DecodeError, MigrationError, PileError, PileResult, StorageError};
pub use host::{
    Catalog, KeyValueStore, LogNotifier, Notification, NotificationStyle, Notifier,
    StatAggregator, StaticCatalog,
};
pub use identifier::IdentifierCodec;
pub use manager::{LoadReport, PileManager};
pub use migration::{migrate_legacy_counts, LegacyMigration, SkipReason, SkippedEntry};
pub use progression::{Breakpoint, ProgressionConfig, TierProgress};
pub use settings::{PileSettings, SettingsError};
pub use storage::{DirectoryStorage, MemoryStorage};
pub use store::CollectionStore;
pub use version::{
    LEGACY_COUNT_KEY, MAX_SAVE_ENTRIES, SAVE_DATA_KEY, SAVE_FORMAT_VERSION, SAVE_MAGIC,
    SENTINEL_CODE, WRITER_CAPACITY_HINT,
};
