#![allow(dead_code)]

use std::collections::BTreeMap;

use pile_of_pets::{
    IdentifierCodec, MemoryStorage, Notification, Notifier, PileManager, PileSettings,
    StatAggregator, StaticCatalog,
};

pub const PETS: [&str; 5] = [
    "melvorD:CoolRock",
    "melvorD:PuddingDuckie",
    "melvorF:Pyro",
    "melvorF:Cris",
    "melvorTotH:Snek",
];

/// Stat payload standing in for the host's per-item modifiers.
#[derive(Clone, Debug, PartialEq)]
pub struct PetStats {
    pub damage_bonus: u32,
}

pub type TestManager =
    PileManager<StaticCatalog<PetStats>, MemoryStorage, RecordingStats, RecordingNotifier>;

pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

pub fn pet_catalog() -> StaticCatalog<PetStats> {
    StaticCatalog::new(
        PETS.iter()
            .enumerate()
            .map(|(index, id)| (*id, PetStats { damage_bonus: index as u32 + 1 })),
    )
}

pub fn pet_codec() -> IdentifierCodec {
    IdentifierCodec::new(PETS)
}

pub fn manager_with(storage: MemoryStorage, settings: PileSettings) -> TestManager {
    init_logging();
    PileManager::open(
        pet_catalog(),
        storage,
        RecordingStats::default(),
        RecordingNotifier::default(),
        settings,
    )
}

#[derive(Debug, Default)]
pub struct RecordingStats {
    pub applied: BTreeMap<String, u64>,
    pub resets: usize,
    pub recomputes: usize,
}

impl StatAggregator<PetStats> for RecordingStats {
    fn reset(&mut self) {
        self.applied.clear();
        self.resets += 1;
    }

    fn apply_multiplier(&mut self, identifier: &str, _item: &PetStats, multiplier: u64) {
        self.applied.insert(identifier.to_string(), multiplier);
    }

    fn recompute(&mut self) {
        self.recomputes += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    pub received: Vec<Notification>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.received.push(notification);
    }
}
