//! Interfaces the host game provides, plus small adapters for them.

use std::collections::BTreeMap;

use tracing::{info, warn};

use crate::error::StorageError;
use crate::progression::TierProgress;

/// The host's collectible catalog.
pub trait Catalog {
    /// Per-item payload handed to the stat aggregator.
    type Item;

    /// Every identifier the host knows, eligible or not.
    fn identifiers(&self) -> Vec<String>;

    fn get(&self, identifier: &str) -> Option<&Self::Item>;

    /// Whether duplicates of this item are counted at all.
    fn is_eligible(&self, identifier: &str) -> bool {
        self.get(identifier).is_some()
    }
}

/// Opaque string storage keyed by name.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Receives the multiplier earned by each collectible.
pub trait StatAggregator<Item> {
    /// Drops every previously applied multiplier.
    fn reset(&mut self);
    fn apply_multiplier(&mut self, identifier: &str, item: &Item, multiplier: u64);
    /// Recomputes aggregate stats after a batch of `apply_multiplier` calls.
    fn recompute(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationStyle {
    Toast,
    Modal,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Notification {
    ItemAdded {
        identifier: String,
        progress: TierProgress,
        style: NotificationStyle,
    },
    /// A save could not be written. Gameplay state is unaffected.
    StorageWarning { message: String },
}

pub trait Notifier {
    fn notify(&mut self, notification: Notification);
}

/// Catalog backed by a fixed map, optionally restricted to an eligible subset.
#[derive(Clone, Debug)]
pub struct StaticCatalog<T> {
    items: BTreeMap<String, T>,
    eligible: Option<Vec<String>>,
}

impl<T> StaticCatalog<T> {
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(|(id, item)| (id.into(), item)).collect(),
            eligible: None,
        }
    }

    /// Restricts counting to `identifiers`. Others stay known to the codec.
    pub fn with_eligible<I, S>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.eligible = Some(identifiers.into_iter().map(Into::into).collect());
        self
    }
}

impl<T> Catalog for StaticCatalog<T> {
    type Item = T;

    fn identifiers(&self) -> Vec<String> {
        self.items.keys().cloned().collect()
    }

    fn get(&self, identifier: &str) -> Option<&T> {
        self.items.get(identifier)
    }

    fn is_eligible(&self, identifier: &str) -> bool {
        if !self.items.contains_key(identifier) {
            return false;
        }
        match &self.eligible {
            Some(eligible) => eligible.iter().any(|id| id == identifier),
            None => true,
        }
    }
}

/// Writes notifications to the log instead of a UI.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification {
            Notification::ItemAdded {
                identifier,
                progress,
                ..
            } => info!(identifier = %identifier, "{progress}"),
            Notification::StorageWarning { message } => warn!("{message}"),
        }
    }
}
