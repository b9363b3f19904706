use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{BIOGRAPHY_FIELD, REFERENCE_URL_FIELD};

pub type Country = String;

/// One leader object exactly as the API returned it, plus the biography field once extracted.
/// Fields other than the reference URL are opaque to the pipeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeaderRecord(Map<String, Value>);

impl LeaderRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn reference_url(&self) -> Option<&str> {
        self.0.get(REFERENCE_URL_FIELD).and_then(Value::as_str)
    }

    pub fn biography(&self) -> Option<&str> {
        self.0.get(BIOGRAPHY_FIELD).and_then(Value::as_str)
    }

    /// Always inserts the field, `None` becomes JSON `null`.
    pub fn set_biography(&mut self, biography: Option<String>) {
        let value = biography.map(Value::String).unwrap_or(Value::Null);
        self.0.insert(BIOGRAPHY_FIELD.to_string(), value);
    }

    pub fn has_biography_field(&self) -> bool {
        self.0.contains_key(BIOGRAPHY_FIELD)
    }
}

impl From<Map<String, Value>> for LeaderRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Country -> leaders, leaders kept in the order the API listed them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset(BTreeMap<Country, Vec<LeaderRecord>>);

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, country: Country, leaders: Vec<LeaderRecord>) {
        self.0.insert(country, leaders);
    }

    pub fn get(&self, country: &str) -> Option<&[LeaderRecord]> {
        self.0.get(country).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Country, &Vec<LeaderRecord>)> {
        self.0.iter()
    }

    pub fn country_count(&self) -> usize {
        self.0.len()
    }

    pub fn leader_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
