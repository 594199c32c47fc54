use crate::trace::context::RequestContext;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Field to value pairs a search must match. Empty means match all.
pub type Filter = BTreeMap<String, Value>;

/// A plant record as stored. Only `id` is interpreted; every other field
/// belongs to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Plant {
    /// Reads a plant from one search hit (`_id` plus `_source`).
    pub fn from_hit(hit: &Value) -> Option<Plant> {
        let id = hit.get("_id")?.as_str()?.to_string();
        let fields = match hit.get("_source") {
            Some(Value::Object(source)) => source.clone(),
            _ => Map::new(),
        };
        Some(Plant { id, fields })
    }
}

/// A search against one index. Built once by `query::build` and never changed.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub(super) index_name: String,
    pub(super) filter: Filter,
    pub(super) context: RequestContext,
}

impl SearchQuery {
    pub fn index_name(&self) -> &str {
        &self.index_name
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn is_match_all(&self) -> bool {
        self.filter.is_empty()
    }
}

/// Hits of a successful search.
///
/// The count is always the number of hits; the constructor is the only way to
/// build one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    hit_count: usize,
    hits: Vec<Value>,
}

impl SearchOutcome {
    pub fn from_hits(hits: Vec<Value>) -> Self {
        Self {
            hit_count: hits.len(),
            hits,
        }
    }

    pub fn hit_count(&self) -> usize {
        self.hit_count
    }

    pub fn hits(&self) -> &[Value] {
        &self.hits
    }

    pub fn is_empty(&self) -> bool {
        self.hit_count == 0
    }

    pub fn plants(&self) -> Vec<Plant> {
        self.hits.iter().filter_map(Plant::from_hit).collect()
    }

    pub fn plant_ids(&self) -> Vec<String> {
        self.plants().into_iter().map(|plant| plant.id).collect()
    }
}

/// Result of a delete the store acknowledged.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteOutcome {
    pub success: bool,
    pub detail: Value,
}
