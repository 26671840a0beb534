//! Save blob encoding: raw payload -> zlib -> base64, and back.
//!
//! Raw payload layout (little-endian):
//!
//! | offset | field       | type                              |
//! |--------|-------------|-----------------------------------|
//! | 0      | magic       | 4 bytes, `"PLMV"`                 |
//! | 4      | version     | u16                               |
//! | 6      | entry count | u16                               |
//! | 8..    | entries     | count x (u32 code, u32 count)     |
//!
//! Decoding never panics and never fails outright: it returns a
//! [`DecodeOutcome`] carrying the recovered store and the first error hit.

use std::io::{Read, Write};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use tracing::{debug, error, warn};

use crate::binary::{SaveReader, SaveWriter};
use crate::error::{DecodeError, PileError, PileResult};
use crate::identifier::IdentifierCodec;
use crate::store::CollectionStore;
use crate::version::{MAX_SAVE_ENTRIES, SAVE_FORMAT_VERSION, SAVE_MAGIC, SENTINEL_CODE};

/// Result of decoding a blob.
///
/// `error` is `None` when the whole payload was read. When it is set,
/// `store` holds what was recovered before the failure: nothing for a
/// malformed blob, bad magic or a newer version, the entries read so far
/// for a truncated payload.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DecodeOutcome {
    pub store: CollectionStore,
    /// Codes that did not resolve against the current catalog.
    pub skipped_codes: Vec<u32>,
    pub error: Option<DecodeError>,
}

impl DecodeOutcome {
    fn failed(error: DecodeError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Encodes `store` into a text-safe blob.
pub fn encode(store: &CollectionStore, identifiers: &IdentifierCodec) -> PileResult<String> {
    let raw = encode_payload(store, identifiers)?;
    pack(&raw)
}

/// Decodes a blob produced by [`encode`].
pub fn decode(blob: &str, identifiers: &IdentifierCodec) -> DecodeOutcome {
    match unpack(blob) {
        Ok(raw) => decode_payload(&raw, identifiers),
        Err(err) => {
            error!(error = %err, "failed to unpack save blob");
            DecodeOutcome::failed(err)
        }
    }
}

/// Writes the raw, uncompressed payload.
///
/// Identifiers missing from `identifiers` are written with the sentinel code
/// and will not come back on decode.
pub fn encode_payload(
    store: &CollectionStore,
    identifiers: &IdentifierCodec,
) -> PileResult<Vec<u8>> {
    if store.len() > MAX_SAVE_ENTRIES {
        return Err(PileError::TooManyEntries(store.len()));
    }
    let entry_count = store.len() as u16;

    let mut writer = SaveWriter::new();
    writer.write_string(SAVE_MAGIC);
    writer.write_u16(SAVE_FORMAT_VERSION);
    writer.write_u16(entry_count);
    for (identifier, count) in store.iter() {
        let code = identifiers.to_code(identifier).unwrap_or_else(|_| {
            warn!(identifier, "identifier not in catalog, writing sentinel code");
            SENTINEL_CODE
        });
        writer.write_u32(code);
        writer.write_u32(count);
    }
    Ok(writer.into_bytes())
}

/// Reads a raw payload, resolving codes against `identifiers`.
pub fn decode_payload(raw: &[u8], identifiers: &IdentifierCodec) -> DecodeOutcome {
    let mut outcome = DecodeOutcome::default();
    if let Err(err) = read_entries(raw, identifiers, &mut outcome) {
        match &err {
            DecodeError::BadMagic { found } => {
                warn!(found = %found, "invalid save magic, ignoring blob");
            }
            DecodeError::UnsupportedVersion { found, supported } => {
                error!(found, supported, "save version is newer than this build supports");
            }
            _ => {
                error!(
                    error = %err,
                    recovered = outcome.store.len(),
                    "save reader error, keeping partial result"
                );
            }
        }
        outcome.error = Some(err);
    }
    if !outcome.skipped_codes.is_empty() {
        debug!(
            skipped = outcome.skipped_codes.len(),
            "dropped entries with no matching identifier"
        );
    }
    outcome
}

fn read_entries(
    raw: &[u8],
    identifiers: &IdentifierCodec,
    outcome: &mut DecodeOutcome,
) -> Result<(), DecodeError> {
    let mut reader = SaveReader::new(raw);

    let magic = reader.read_string(SAVE_MAGIC.len())?;
    if magic != SAVE_MAGIC {
        return Err(DecodeError::BadMagic { found: magic });
    }

    let version = reader.read_u16()?;
    if version > SAVE_FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion {
            found: version,
            supported: SAVE_FORMAT_VERSION,
        });
    }

    let entry_count = reader.read_u16()?;
    for _ in 0..entry_count {
        let code = reader.read_u32()?;
        let count = reader.read_u32()?;
        match identifiers.from_code(code) {
            Some(identifier) => outcome.store.set(identifier, count),
            None => outcome.skipped_codes.push(code),
        }
    }
    Ok(())
}

/// Compresses a raw payload and encodes it as base64.
pub fn pack(raw: &[u8]) -> PileResult<String> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(raw)
        .map_err(|err| PileError::Compression(err.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|err| PileError::Compression(err.to_string()))?;
    Ok(STANDARD.encode(compressed))
}

/// Reverses [`pack`].
pub fn unpack(blob: &str) -> Result<Vec<u8>, DecodeError> {
    let compressed = STANDARD
        .decode(blob.trim())
        .map_err(|err| DecodeError::MalformedBlob(format!("base64: {err}")))?;
    let mut raw = Vec::new();
    ZlibDecoder::new(compressed.as_slice())
        .read_to_end(&mut raw)
        .map_err(|err| DecodeError::MalformedBlob(format!("zlib: {err}")))?;
    Ok(raw)
}
