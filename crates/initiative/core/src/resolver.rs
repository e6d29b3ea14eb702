//! Initiative resolution: fixed values, cached rolls, fresh rolls, turn order.
//!
//! Resolution runs once per process start:
//!
//! 1. Merge players and enemies (enemies win key collisions) and drop
//!    inactive entities.
//! 2. Reuse cached values for entities whose current spec is a range.
//!    Fixed specs always take the configured value.
//! 3. Roll every range still unresolved.
//! 4. Sort ascending by value, enemies keyed at `value - 1` so they come
//!    first on a tie.
//! 5. Write the full mapping back to the cache.

use indexmap::IndexMap;

use crate::cache::{CacheError, CacheRepository, RollCache};
use crate::config::{InitiativeSpec, Side, TrackerConfig};
use crate::roll::InitiativeRoller;

/// Whether previously rolled values may be reused.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CachePolicy {
    /// Reuse cached rolls for ranged entities.
    #[default]
    Reuse,
    /// Delete the cache first and roll every range again.
    Clear,
}

/// Errors that can occur during resolution.
///
/// A corrupted cache is never surfaced here; it is discarded and treated as
/// a miss.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("initiative cache unavailable: {0}")]
    Cache(#[from] CacheError),
}

/// One entity with its final initiative value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedEntry {
    pub name: String,
    pub value: i32,
    pub side: Side,
}

impl ResolvedEntry {
    /// Comparison key for the turn order.
    pub fn sort_key(&self) -> i64 {
        let value = i64::from(self.value);
        match self.side {
            Side::Enemy => value - 1,
            Side::Player => value,
        }
    }
}

/// Resolved values in turn order (ascending sort key).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedInitiative {
    entries: IndexMap<String, ResolvedEntry>,
}

impl ResolvedInitiative {
    /// Sort `entries` into turn order. Equal keys keep their given order.
    pub fn from_entries(mut entries: Vec<ResolvedEntry>) -> Self {
        entries.sort_by_key(ResolvedEntry::sort_key);
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.name.clone(), entry))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entity names in turn order.
    pub fn order(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    pub fn get(&self, name: &str) -> Option<&ResolvedEntry> {
        self.entries.get(name)
    }

    pub fn value_of(&self, name: &str) -> Option<i32> {
        self.get(name).map(|entry| entry.value)
    }

    pub fn side_of(&self, name: &str) -> Option<Side> {
        self.get(name).map(|entry| entry.side)
    }

    /// Name to value mapping in turn order.
    pub fn values(&self) -> RollCache {
        self.entries
            .values()
            .map(|entry| (entry.name.clone(), entry.value))
            .collect()
    }
}

/// Resolves a configuration against the roll cache.
///
/// The cache store and roll source are injected so tests can substitute
/// in-memory and deterministic implementations.
pub struct InitiativeResolver<'a> {
    cache: &'a dyn CacheRepository,
    roller: &'a dyn InitiativeRoller,
}

impl<'a> InitiativeResolver<'a> {
    pub fn new(cache: &'a dyn CacheRepository, roller: &'a dyn InitiativeRoller) -> Self {
        Self { cache, roller }
    }

    /// Produce the turn order for `config` and persist the values.
    pub fn resolve(
        &self,
        config: &TrackerConfig,
        policy: CachePolicy,
    ) -> Result<ResolvedInitiative, ResolveError> {
        let cached = match policy {
            CachePolicy::Clear => {
                self.cache.clear()?;
                tracing::info!("Initiative cache cleared, rolling fresh values");
                None
            }
            CachePolicy::Reuse => self.load_cache()?,
        };

        let mut entries = Vec::new();
        for entity in config.active_entities() {
            let value = match entity.spec {
                InitiativeSpec::Fixed(value) => value,
                InitiativeSpec::Range(min, max) => {
                    match cached.as_ref().and_then(|cache| cache.get(&entity.name)) {
                        Some(&value) => {
                            tracing::debug!("{}: reusing cached roll {}", entity.name, value);
                            value
                        }
                        None => {
                            let value = self.roller.roll(min, max);
                            tracing::debug!(
                                "{}: rolled {} from [{}, {}]",
                                entity.name,
                                value,
                                min,
                                max
                            );
                            value
                        }
                    }
                }
            };

            entries.push(ResolvedEntry {
                name: entity.name,
                value,
                side: entity.side,
            });
        }

        // Persisted in declaration order, not turn order
        let snapshot: RollCache = entries
            .iter()
            .map(|entry| (entry.name.clone(), entry.value))
            .collect();

        let resolved = ResolvedInitiative::from_entries(entries);
        self.cache.save(&snapshot)?;

        tracing::info!("Resolved initiative for {} entities", resolved.len());

        Ok(resolved)
    }

    fn load_cache(&self) -> Result<Option<RollCache>, ResolveError> {
        match self.cache.load() {
            Ok(cache) => Ok(cache),
            Err(CacheError::Corrupted(reason)) => {
                tracing::warn!("Cache file is corrupted ({}), deleting...", reason);
                self.cache.clear()?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}
