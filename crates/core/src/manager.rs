//! Feature controller tying the store, codec, progression and host together.

use tracing::{debug, error, info, warn};

use crate::codec::{self, DecodeOutcome};
use crate::error::{DecodeError, MigrationError, PileError, PileResult};
use crate::host::{
    Catalog, KeyValueStore, Notification, NotificationStyle, Notifier, StatAggregator,
};
use crate::identifier::IdentifierCodec;
use crate::migration::{migrate_legacy_counts, LegacyMigration};
use crate::progression::{Breakpoint, TierProgress};
use crate::settings::PileSettings;
use crate::store::CollectionStore;
use crate::version::{LEGACY_COUNT_KEY, SAVE_DATA_KEY};

/// What [`PileManager::load`] found in storage.
///
/// A blob from a newer format version decodes to nothing. The manager then
/// refuses to save until a later [`PileManager::load`] finds no newer blob,
/// so the newer save is never overwritten by a partial one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Outcome of decoding the current blob, if one was stored.
    pub decoded: Option<DecodeOutcome>,
    /// Entries imported from the legacy mapping, if one was stored.
    pub legacy: Option<LegacyMigration>,
    pub legacy_error: Option<MigrationError>,
}

/// Owns the collection for one character.
///
/// Every mutation goes through `&mut self`; a host that shares the manager
/// across threads must put it behind a single lock, since saving iterates
/// the whole store.
pub struct PileManager<C, S, A, N>
where
    C: Catalog,
{
    catalog: C,
    storage: S,
    stats: A,
    notifier: N,
    settings: PileSettings,
    identifiers: IdentifierCodec,
    store: CollectionStore,
    /// Legacy counts were imported but not yet written to a new blob.
    legacy_pending: bool,
    /// Format version of a stored blob this build can't read.
    newer_save: Option<u16>,
}

impl<C, S, A, N> PileManager<C, S, A, N>
where
    C: Catalog,
    S: KeyValueStore,
    A: StatAggregator<C::Item>,
    N: Notifier,
{
    /// Builds the identifier codec from the full catalog. Call [`Self::load`]
    /// before use.
    pub fn new(catalog: C, storage: S, stats: A, notifier: N, settings: PileSettings) -> Self {
        let identifiers = IdentifierCodec::new(catalog.identifiers());
        Self {
            catalog,
            storage,
            stats,
            notifier,
            settings,
            identifiers,
            store: CollectionStore::new(),
            legacy_pending: false,
            newer_save: None,
        }
    }

    /// [`Self::new`] followed by [`Self::load`].
    pub fn open(catalog: C, storage: S, stats: A, notifier: N, settings: PileSettings) -> Self {
        let mut manager = Self::new(catalog, storage, stats, notifier, settings);
        manager.load();
        manager
    }

    /// Restores the store from the current blob, then imports and removes
    /// the legacy mapping if one is present. Applies stats without
    /// triggering a recompute.
    pub fn load(&mut self) -> LoadReport {
        let mut report = LoadReport::default();
        self.newer_save = None;
        self.legacy_pending = false;

        match self.storage.get(SAVE_DATA_KEY) {
            Ok(Some(blob)) => {
                let outcome = codec::decode(&blob, &self.identifiers);
                if let Some(DecodeError::UnsupportedVersion { found, .. }) = &outcome.error {
                    self.newer_save = Some(*found);
                }
                self.store.merge(outcome.store.clone());
                report.decoded = Some(outcome);
            }
            Ok(None) => debug!("no save data stored"),
            Err(err) => error!(error = %err, "failed to read save data"),
        }

        match self.storage.get(LEGACY_COUNT_KEY) {
            Ok(Some(raw)) => match migrate_legacy_counts(&raw, &self.identifiers) {
                Ok(migration) => {
                    info!(
                        migrated = migration.migrated(),
                        skipped = migration.skipped.len(),
                        "importing legacy counts"
                    );
                    self.store.merge(migration.store.clone());
                    // The legacy key is the only copy until a new blob is written;
                    // `save` removes it on its first success.
                    self.legacy_pending = true;
                    let _ = self.save();
                    report.legacy = Some(migration);
                }
                Err(err) => {
                    error!(error = %err, "legacy counts left in place");
                    report.legacy_error = Some(err);
                }
            },
            Ok(None) => {}
            Err(err) => error!(error = %err, "failed to read legacy counts"),
        }

        self.compute_provided_stats(false);
        report
    }

    /// Writes the store to storage.
    ///
    /// Failures are logged and surfaced as a [`Notification::StorageWarning`]
    /// before being returned; the in-memory store is left as is. The first
    /// successful save after a legacy import removes the legacy mapping.
    pub fn save(&mut self) -> PileResult<()> {
        let result = self.write_blob();
        if let Err(err) = &result {
            error!(error = %err, "failed to save collection");
            self.notifier.notify(Notification::StorageWarning {
                message: format!("[Pile of Pets]: {err}"),
            });
            return result;
        }

        if self.legacy_pending {
            match self.storage.remove(LEGACY_COUNT_KEY) {
                Ok(()) => {
                    self.legacy_pending = false;
                    debug!("legacy counts removed");
                }
                Err(err) => warn!(error = %err, "failed to remove legacy counts"),
            }
        }
        result
    }

    fn write_blob(&mut self) -> PileResult<()> {
        if let Some(found) = self.newer_save {
            return Err(PileError::NewerSaveProtected { found });
        }
        let blob = codec::encode(&self.store, &self.identifiers)?;
        self.storage.set(SAVE_DATA_KEY, &blob)?;
        Ok(())
    }

    /// Counts one more duplicate of `identifier`.
    ///
    /// Ineligible identifiers are ignored and return `None`.
    pub fn add_item(&mut self, identifier: &str) -> Option<TierProgress> {
        if !self.catalog.is_eligible(identifier) {
            debug!(identifier, "ignoring ineligible item");
            return None;
        }

        let count = self.store.increment(identifier);
        // A failed save was already reported to the player.
        let _ = self.save();
        self.compute_provided_stats(true);

        let progress = self.settings.progression.progress(u64::from(count));
        let style = if self.settings.notification_toggle {
            NotificationStyle::Toast
        } else {
            NotificationStyle::Modal
        };
        self.notifier.notify(Notification::ItemAdded {
            identifier: identifier.to_string(),
            progress,
            style,
        });
        Some(progress)
    }

    /// Re-applies every collectible's multiplier to the stat aggregator.
    pub fn compute_provided_stats(&mut self, recompute: bool) {
        let progression = self.settings.progression;
        self.stats.reset();
        for (identifier, count) in self.store.iter() {
            let Some(item) = self.catalog.get(identifier) else {
                continue;
            };
            let tier = progression.tier_from_count(u64::from(count));
            let multiplier = progression.multiplier_from_tier(tier);
            self.stats.apply_multiplier(identifier, item, multiplier);
        }
        if recompute {
            self.stats.recompute();
        }
    }

    pub fn set_initial_required(&mut self, value: u32) -> PileResult<()> {
        self.settings.progression.set_initial_required(value)?;
        self.compute_provided_stats(true);
        Ok(())
    }

    pub fn set_tier_scaling(&mut self, value: f64) -> PileResult<()> {
        self.settings.progression.set_tier_scaling(value)?;
        self.compute_provided_stats(true);
        Ok(())
    }

    pub fn set_max_tier(&mut self, value: u32) {
        self.settings.progression.set_max_tier(value);
        self.compute_provided_stats(true);
    }

    pub fn set_multiplier_per_tier(&mut self, value: f64) -> PileResult<()> {
        self.settings.progression.set_multiplier_per_tier(value)?;
        self.compute_provided_stats(true);
        Ok(())
    }

    pub fn set_notification_toggle(&mut self, value: bool) {
        self.settings.notification_toggle = value;
    }

    pub fn count(&self, identifier: &str) -> u32 {
        self.store.get(identifier)
    }

    pub fn progress(&self, identifier: &str) -> TierProgress {
        self.settings
            .progression
            .progress(u64::from(self.store.get(identifier)))
    }

    pub fn breakpoints(&self) -> Vec<Breakpoint> {
        self.settings.progression.breakpoints()
    }

    pub fn is_eligible(&self, identifier: &str) -> bool {
        self.catalog.is_eligible(identifier)
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    pub fn settings(&self) -> &PileSettings {
        &self.settings
    }

    pub fn identifiers(&self) -> &IdentifierCodec {
        &self.identifiers
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    pub fn stats(&self) -> &A {
        &self.stats
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
