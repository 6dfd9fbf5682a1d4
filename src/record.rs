//! String-keyed record access used by the coalescer and the row extractor.
//!
//! The core never owns rows. Anything that can answer "what value sits under
//! this field name" can be extracted from, so loaders are free to hand over
//! `serde_json` objects, ordered maps, or plain hash maps.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;
use serde_json::{Map, Value};

/// Read-only view over one raw dataset row.
pub trait RawRecord {
    /// Value stored under `name`, or `None` when the field is absent.
    fn field(&self, name: &str) -> Option<&Value>;
}

impl<T: RawRecord + ?Sized> RawRecord for &T {
    fn field(&self, name: &str) -> Option<&Value> {
        (**self).field(name)
    }
}

impl RawRecord for Map<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<S: BuildHasher> RawRecord for IndexMap<String, Value, S> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl<S: BuildHasher> RawRecord for HashMap<String, Value, S> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

impl RawRecord for BTreeMap<String, Value> {
    fn field(&self, name: &str) -> Option<&Value> {
        self.get(name)
    }
}

/// Non-object values expose no fields.
impl RawRecord for Value {
    fn field(&self, name: &str) -> Option<&Value> {
        self.as_object().and_then(|object| object.get(name))
    }
}
