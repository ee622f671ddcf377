//! In-process read-through cache for list and detail queries.
//!
//! Entries are grouped under a [`CacheTag`]. Every write names a [`Mutation`],
//! and each mutation drops a fixed set of tags, all scopes included.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "kebab-case")]
pub enum CacheTag {
    /// Active fields shown to customers.
    Fields,
    /// One field with images and amenities.
    Field,
    OwnerFields,
    /// Live slots of one field.
    FieldBookings,
    OwnerBookings,
    CustomerBookings,
    AllBookings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Mutation {
    FieldCreated,
    FieldUpdated,
    FieldDeleted,
    BookingCreated,
    BookingStatusChanged,
}

const BOOKING_TAGS: &[CacheTag] = &[
    CacheTag::FieldBookings,
    CacheTag::OwnerBookings,
    CacheTag::CustomerBookings,
    CacheTag::AllBookings,
];

impl Mutation {
    pub fn invalidates(self) -> &'static [CacheTag] {
        match self {
            Mutation::FieldCreated => &[CacheTag::Fields, CacheTag::OwnerFields],
            // booking lists embed the field name and location
            Mutation::FieldUpdated => &[
                CacheTag::Fields,
                CacheTag::OwnerFields,
                CacheTag::Field,
                CacheTag::OwnerBookings,
                CacheTag::CustomerBookings,
                CacheTag::AllBookings,
            ],
            Mutation::FieldDeleted => &[
                CacheTag::Fields,
                CacheTag::OwnerFields,
                CacheTag::Field,
                CacheTag::FieldBookings,
                CacheTag::OwnerBookings,
                CacheTag::CustomerBookings,
                CacheTag::AllBookings,
            ],
            Mutation::BookingCreated | Mutation::BookingStatusChanged => BOOKING_TAGS,
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    stored_at: Instant,
    value: Value,
}

#[derive(Debug, Clone)]
pub struct QueryCache {
    entries: Arc<DashMap<(CacheTag, String), Entry>>,
    // bumped on every invalidation so loads that raced a write are not stored
    generations: Arc<DashMap<CacheTag, u64>>,
    ttl: Duration,
}

impl QueryCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            generations: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn get<T: DeserializeOwned>(&self, tag: CacheTag, scope: &str) -> Option<T> {
        let key = (tag, scope.to_string());
        let hit = self
            .entries
            .get(&key)
            .map(|entry| (entry.stored_at, entry.value.clone()));
        let (stored_at, value) = hit?;
        if stored_at.elapsed() >= self.ttl {
            self.entries.remove(&key);
            return None;
        }
        serde_json::from_value(value).ok()
    }

    pub fn put<T: Serialize>(&self, tag: CacheTag, scope: &str, value: &T) -> AppResult<()> {
        if self.ttl.is_zero() {
            return Ok(());
        }
        let value = serde_json::to_value(value)
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
        self.entries.insert(
            (tag, scope.to_string()),
            Entry {
                stored_at: Instant::now(),
                value,
            },
        );
        Ok(())
    }

    /// Return the cached value for `(tag, scope)` or run `load` and remember it.
    pub async fn get_or_load<T, F, Fut>(&self, tag: CacheTag, scope: &str, load: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        if let Some(hit) = self.get(tag, scope) {
            tracing::debug!(tag = %tag, scope, "cache hit");
            return Ok(hit);
        }

        let generation = self.generation(tag);
        let value = load().await?;
        if self.generation(tag) == generation {
            self.put(tag, scope, &value)?;
        }
        Ok(value)
    }

    pub fn invalidate(&self, mutation: Mutation) {
        let tags = mutation.invalidates();
        for tag in tags {
            *self.generations.entry(*tag).or_insert(0) += 1;
        }
        self.entries.retain(|(tag, _), _| !tags.contains(tag));
        tracing::debug!(mutation = %mutation, "cache invalidated");
    }

    pub fn contains(&self, tag: CacheTag, scope: &str) -> bool {
        self.entries.contains_key(&(tag, scope.to_string()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn generation(&self, tag: CacheTag) -> u64 {
        self.generations.get(&tag).map(|g| *g).unwrap_or(0)
    }
}
