//! Lock records and the serialized lock store.
//!
//! The whole store is one JSON object mapping lock name to record:
//!
//! ```json
//! {"document-42": {"expiration": 1700000030, "uuid": "9b2f...-..."}}
//! ```
//!
//! `expiration` is whole epoch seconds; `0` means the record never expires.
//! Other writers may store fractional seconds, which are read back floored:
//! with whole-second `now`, `now > floor(expiration)` still only holds once
//! the fractional expiration has passed.
//! The rules that decide acquire, reclaim, conflict, and release live here
//! and take `now` explicitly so every backend applies them identically.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// A single persisted lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockRecord {
    /// Epoch seconds after which the lock may be reclaimed, or `0` for never.
    #[serde(deserialize_with = "deserialize_expiration")]
    pub expiration: i64,

    /// Owner id of the acquire event that created this record.
    #[serde(rename = "uuid")]
    pub owner: String,
}

impl LockRecord {
    /// Create a record with a fresh owner id.
    ///
    /// A `timeout` of `None` or `Some(0)` produces a never-expiring record.
    pub fn new(timeout: Option<u64>, now: i64) -> Self {
        let expiration = match timeout {
            Some(secs) if secs > 0 => {
                i64::try_from(secs).map_or(i64::MAX, |secs| now.saturating_add(secs))
            }
            _ => 0,
        };

        Self {
            expiration,
            owner: Uuid::new_v4().to_string(),
        }
    }

    /// Whether the record may be reclaimed at `now`.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expiration != 0 && now > self.expiration
    }
}

/// Accept any JSON number as an expiration, flooring fractional seconds.
fn deserialize_expiration<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    struct ExpirationVisitor;

    impl Visitor<'_> for ExpirationVisitor {
        type Value = i64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("epoch seconds as a number")
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<i64, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<i64, E> {
            Ok(i64::try_from(v).unwrap_or(i64::MAX))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<i64, E> {
            if v.is_nan() {
                return Err(E::custom("expiration is not a number"));
            }
            // Float to int casts saturate.
            Ok(v.floor() as i64)
        }
    }

    deserializer.deserialize_any(ExpirationVisitor)
}

/// Outcome of a successful acquire against a [`LockStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquired {
    /// No record existed for the name.
    Created(LockRecord),
    /// An expired record was overwritten.
    Reclaimed {
        record: LockRecord,
        previous_owner: String,
    },
}

impl Acquired {
    /// The record now stored under the name.
    pub fn record(&self) -> &LockRecord {
        match self {
            Acquired::Created(record) => record,
            Acquired::Reclaimed { record, .. } => record,
        }
    }
}

/// Outcome of a release against a [`LockStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Released {
    /// The record was owned by the caller and has been removed.
    Removed,
    /// The name is now held by another owner; nothing changed.
    OwnerMismatch,
    /// No record exists for the name; nothing changed.
    Missing,
}

/// The full name → record mapping held in the shared store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockStore {
    records: BTreeMap<String, LockRecord>,
}

impl LockStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a store body.
    ///
    /// An empty or whitespace-only body is an empty store. Anything that does
    /// not decode is reported as an error so the caller can decide to log and
    /// fall back to an empty store.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::new());
        }
        serde_json::from_slice(bytes)
    }

    /// Encode the store body.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Apply the acquire rules for `name` at `now`.
    ///
    /// Returns `None` on conflict (a live record exists), leaving the store
    /// untouched.
    pub fn try_acquire(&mut self, name: &str, timeout: Option<u64>, now: i64) -> Option<Acquired> {
        match self.records.get(name) {
            None => {
                let record = LockRecord::new(timeout, now);
                self.records.insert(name.to_string(), record.clone());
                Some(Acquired::Created(record))
            }
            Some(existing) if existing.is_expired(now) => {
                let previous_owner = existing.owner.clone();
                let record = LockRecord::new(timeout, now);
                self.records.insert(name.to_string(), record.clone());
                Some(Acquired::Reclaimed {
                    record,
                    previous_owner,
                })
            }
            Some(_) => None,
        }
    }

    /// Remove `name` only if it is still held by `owner`.
    pub fn release(&mut self, name: &str, owner: &str) -> Released {
        match self.records.get(name) {
            Some(record) if record.owner == owner => {
                self.records.remove(name);
                Released::Removed
            }
            Some(_) => Released::OwnerMismatch,
            None => Released::Missing,
        }
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn get(&self, name: &str) -> Option<&LockRecord> {
        self.records.get(name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LockRecord)> {
        self.records.iter().map(|(name, record)| (name.as_str(), record))
    }
}
