use miette::Diagnostic;
use thiserror::Error;

pub type PileResult<T> = Result<T, PileError>;

/// Reasons a save blob could not be (fully) decoded.
///
/// None of these escape [`crate::decode`] as a panic; they are reported on
/// the [`crate::DecodeOutcome`] next to whatever was recovered.
#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed save blob: {0}")]
    #[diagnostic(code("pile.malformed_blob"))]
    MalformedBlob(String),
    #[error("invalid save magic {found:?}")]
    #[diagnostic(code("pile.bad_magic"))]
    BadMagic { found: String },
    #[error("save version {found} is newer than supported version {supported}")]
    #[diagnostic(
        code("pile.unsupported_version"),
        help("the save was written by a newer build; update before loading it")
    )]
    UnsupportedVersion { found: u16, supported: u16 },
    #[error("buffer underrun: needed {needed} bytes at offset {offset}, {remaining} remaining")]
    #[diagnostic(code("pile.buffer_underrun"))]
    BufferUnderrun {
        offset: usize,
        needed: usize,
        remaining: usize,
    },
}

/// Reasons the legacy `{identifier: count}` mapping could not be read.
#[derive(Clone, Debug, Error, Diagnostic, PartialEq, Eq)]
pub enum MigrationError {
    #[error("legacy count mapping is not valid JSON: {0}")]
    #[diagnostic(code("pile.legacy_parse"))]
    Parse(String),
    #[error("legacy count mapping must be a JSON object")]
    #[diagnostic(
        code("pile.legacy_not_object"),
        help("the mapping is left in storage untouched")
    )]
    NotAnObject,
}

/// Failures reported by a [`crate::KeyValueStore`] adapter.
#[derive(Debug, Error, Diagnostic)]
pub enum StorageError {
    #[error("storage quota exceeded: {needed} bytes needed, limit is {limit}")]
    #[diagnostic(code("pile.storage_quota"))]
    QuotaExceeded { needed: usize, limit: usize },
    #[error("invalid storage key '{0}'")]
    #[diagnostic(
        code("pile.storage_key"),
        help("keys may only contain ASCII letters, digits, '_' and '-'")
    )]
    InvalidKey(String),
    #[error("storage io error: {0}")]
    #[diagnostic(code("pile.storage_io"))]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error, Diagnostic)]
pub enum PileError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Storage(#[from] StorageError),
    #[error("collection has {0} entries, the save format holds at most 65535")]
    #[diagnostic(code("pile.too_many_entries"))]
    TooManyEntries(usize),
    #[error("identifier '{0}' is not in the catalog")]
    #[diagnostic(code("pile.unknown_identifier"))]
    UnknownIdentifier(String),
    #[error("compression error: {0}")]
    #[diagnostic(code("pile.compression"))]
    Compression(String),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Migration(#[from] MigrationError),
    #[error("stored save uses format version {found}; refusing to overwrite it")]
    #[diagnostic(
        code("pile.newer_save_protected"),
        help("the save was written by a newer build; update before playing on")
    )]
    NewerSaveProtected { found: u16 },
    #[error("invalid value {value} for setting '{name}': {reason}")]
    #[diagnostic(code("pile.invalid_setting"))]
    InvalidSetting {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}
