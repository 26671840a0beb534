//! One-time import of the legacy `{identifier: count}` JSON mapping.

use serde_json::{Map, Value};

use crate::error::MigrationError;
use crate::identifier::IdentifierCodec;
use crate::store::CollectionStore;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    UnknownIdentifier,
    InvalidCount,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedEntry {
    pub identifier: String,
    pub reason: SkipReason,
}

/// Entries recovered from a legacy mapping.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LegacyMigration {
    pub store: CollectionStore,
    pub skipped: Vec<SkippedEntry>,
}

impl LegacyMigration {
    pub fn migrated(&self) -> usize {
        self.store.len()
    }
}

/// Parses the legacy mapping, keeping entries whose identifier is in the
/// catalog and whose count is an integer in `0..=u32::MAX`.
pub fn migrate_legacy_counts(
    input: &str,
    identifiers: &IdentifierCodec,
) -> Result<LegacyMigration, MigrationError> {
    let value: Value =
        serde_json::from_str(input).map_err(|err| MigrationError::Parse(err.to_string()))?;
    let root = expect_object(&value)?;

    let mut migration = LegacyMigration::default();
    for (identifier, raw_count) in root {
        if !identifiers.contains(identifier) {
            migration.skipped.push(SkippedEntry {
                identifier: identifier.clone(),
                reason: SkipReason::UnknownIdentifier,
            });
            continue;
        }
        match parse_count(raw_count) {
            Some(count) => migration.store.set(identifier.as_str(), count),
            None => migration.skipped.push(SkippedEntry {
                identifier: identifier.clone(),
                reason: SkipReason::InvalidCount,
            }),
        }
    }
    Ok(migration)
}

fn expect_object(value: &Value) -> Result<&Map<String, Value>, MigrationError> {
    value.as_object().ok_or(MigrationError::NotAnObject)
}

fn parse_count(value: &Value) -> Option<u32> {
    if let Some(count) = value.as_u64() {
        return u32::try_from(count).ok();
    }
    // Whole-valued floats such as `3.0` count too.
    let float = value.as_f64()?;
    if float.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&float) {
        Some(float as u32)
    } else {
        None
    }
}
