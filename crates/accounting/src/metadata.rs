//! Bounded string annotations attached to a transaction.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use haya_core::{DomainError, DomainResult};

/// Size bounds for [`Metadata`]. Lengths are in bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataLimits {
    pub max_entries: usize,
    pub max_key_len: usize,
    pub max_value_len: usize,
}

impl Default for MetadataLimits {
    fn default() -> Self {
        Self {
            max_entries: 32,
            max_key_len: 64,
            max_value_len: 512,
        }
    }
}

/// Typed, size-bounded `String -> String` map.
///
/// Keys are unique; iteration is in key order.
///
/// ## Contract
///
/// - Every stored pair has passed [`insert`](Self::insert): the key is
///   non-empty and no bound is exceeded.
/// - Deserialization replays each pair through `insert`, so a payload that
///   violates its own limits is rejected instead of loaded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMetadata")]
pub struct Metadata {
    entries: BTreeMap<String, String>,
    limits: MetadataLimits,
}

/// Wire form of [`Metadata`] before validation.
#[derive(Deserialize)]
struct RawMetadata {
    entries: BTreeMap<String, String>,
    limits: MetadataLimits,
}

impl TryFrom<RawMetadata> for Metadata {
    type Error = DomainError;

    fn try_from(raw: RawMetadata) -> Result<Self, Self::Error> {
        let mut metadata = Metadata::with_limits(raw.limits);
        for (key, value) in raw.entries {
            metadata.insert(key, value)?;
        }
        Ok(metadata)
    }
}

impl Metadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limits(limits: MetadataLimits) -> Self {
        Self {
            entries: BTreeMap::new(),
            limits,
        }
    }

    /// Insert or replace a value, returning the previous one.
    ///
    /// Replacing an existing key never counts against `max_entries`.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> DomainResult<Option<String>> {
        let key = key.into();
        let value = value.into();

        if key.is_empty() {
            return Err(DomainError::validation("metadata key must not be empty"));
        }
        if key.len() > self.limits.max_key_len {
            return Err(DomainError::validation(format!(
                "metadata key exceeds {} bytes",
                self.limits.max_key_len
            )));
        }
        if value.len() > self.limits.max_value_len {
            return Err(DomainError::validation(format!(
                "metadata value for '{key}' exceeds {} bytes",
                self.limits.max_value_len
            )));
        }
        if !self.entries.contains_key(&key) && self.entries.len() >= self.limits.max_entries {
            return Err(DomainError::validation(format!(
                "metadata is limited to {} entries",
                self.limits.max_entries
            )));
        }

        Ok(self.entries.insert(key, value))
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
