//! Concurrent storage of fitted models.
//!
//! Fits are kept in memory under generated identifiers so predictions
//! can reference an earlier fit without re-estimating it. The store is
//! insert-only from the engine's point of view: an id, once handed out,
//! always refers to the same model until [`ModelStore::clear`].

use std::fmt;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fit::FitCandidate;

/// Identifier of a stored model, e.g. `fit_1a2b3c4d`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    const PREFIX: &'static str = "fit_";
    const HEX_LEN: usize = 8;

    /// A fresh random identifier.
    fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string();
        Self(format!("{}{}", Self::PREFIX, &hex[..Self::HEX_LEN]))
    }

    /// The identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Thread-safe map from [`ModelId`] to fitted models.
#[derive(Debug, Default)]
pub struct ModelStore {
    models: DashMap<ModelId, FitCandidate>,
}

impl ModelStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a model under a newly generated id and returns the id.
    ///
    /// Existing entries are never overwritten; in the unlikely event of
    /// an id collision a new id is drawn.
    pub fn insert(&self, candidate: FitCandidate) -> ModelId {
        let mut id = ModelId::generate();
        while self.models.contains_key(&id) {
            id = ModelId::generate();
        }
        self.models.insert(id.clone(), candidate);
        id
    }

    /// Fetches a copy of the model stored under `id`.
    #[must_use]
    pub fn get(&self, id: &ModelId) -> Option<FitCandidate> {
        self.models.get(id).map(|entry| entry.value().clone())
    }

    /// Whether `id` refers to a stored model.
    #[must_use]
    pub fn contains(&self, id: &ModelId) -> bool {
        self.models.contains_key(id)
    }

    /// Number of stored models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the store holds no models.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Removes every stored model.
    pub fn clear(&self) {
        self.models.clear();
    }
}
