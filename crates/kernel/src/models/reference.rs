//! Weak references between entities.
//!
//! A [`Ref`] carries only the id of another record. It never owns the target
//! and resolving it against a collection may find nothing; callers drop
//! dangling references instead of failing.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A record that can be looked up by id.
pub trait Record {
    /// Entity name used in error messages and cache keys (e.g. "speaker").
    const ENTITY: &'static str;

    /// Stable identifier of the record.
    fn id(&self) -> &str;
}

/// Typed id reference to a record of type `T`.
pub struct Ref<T> {
    id: String,
    _target: PhantomData<fn() -> T>,
}

impl<T> Ref<T> {
    /// Create a reference to the record with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            _target: PhantomData,
        }
    }

    /// The referenced id.
    pub fn id(&self) -> &str {
        &self.id
    }
}

impl<T: Record> Ref<T> {
    /// Find the referenced record, if it still exists.
    pub fn resolve<'a>(&self, records: &'a [T]) -> Option<&'a T> {
        records.iter().find(|r| self.points_to(r))
    }

    /// Whether this reference points at `record`.
    pub fn points_to(&self, record: &T) -> bool {
        record.id() == self.id
    }
}

/// Resolve a list of references, skipping ids that no longer exist.
///
/// Output order follows the reference list.
pub fn resolve_all<'a, T: Record>(refs: &[Ref<T>], records: &'a [T]) -> Vec<&'a T> {
    refs.iter().filter_map(|r| r.resolve(records)).collect()
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self::new(self.id.clone())
    }
}

impl<T> PartialEq for Ref<T> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<T> Eq for Ref<T> {}

impl<T> Hash for Ref<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<T> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ref").field(&self.id).finish()
    }
}

impl<T> fmt::Display for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

impl<T> From<&str> for Ref<T> {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<T> Serialize for Ref<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.id)
    }
}

impl<'de, T> Deserialize<'de> for Ref<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
