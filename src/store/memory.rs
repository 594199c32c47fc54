use super::client::{DocumentStore, StoreFuture};
use crate::plants::types::SearchQuery;
use crate::trace::context::RequestContext;

use dashmap::DashMap;
use serde_json::{Value, json};

/// In-process document store keyed by index and then by document id.
///
/// Answers with the same JSON shapes as Elasticsearch so callers cannot tell
/// the two apart.
#[derive(Default)]
pub struct MemoryStore {
    indices: DashMap<String, DashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates `index` if it does not exist yet.
    pub fn create_index(&self, index: &str) {
        self.indices.entry(index.to_string()).or_default();
    }

    pub fn insert(&self, index: &str, id: &str, document: Value) {
        self.indices
            .entry(index.to_string())
            .or_default()
            .insert(id.to_string(), document);
    }

    pub fn contains(&self, index: &str, id: &str) -> bool {
        self.indices
            .get(index)
            .map(|docs| docs.contains_key(id))
            .unwrap_or(false)
    }

    pub fn len(&self, index: &str) -> usize {
        self.indices.get(index).map(|docs| docs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self, index: &str) -> bool {
        self.len(index) == 0
    }

    fn search_local(&self, query: &SearchQuery) -> Value {
        let index = query.index_name();
        let Some(docs) = self.indices.get(index) else {
            return index_not_found(index);
        };

        let mut hits: Vec<(String, Value)> = docs
            .iter()
            .filter(|entry| matches_filter(entry.value(), query))
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();
        hits.sort_by(|a, b| a.0.cmp(&b.0));

        let hits: Vec<Value> = hits
            .into_iter()
            .map(|(id, source)| {
                json!({
                    "_index": index,
                    "_id": id,
                    "_score": 1.0,
                    "_source": source,
                })
            })
            .collect();

        json!({
            "took": 0,
            "timed_out": false,
            "hits": {
                "total": { "value": hits.len(), "relation": "eq" },
                "max_score": if hits.is_empty() { Value::Null } else { json!(1.0) },
                "hits": hits,
            }
        })
    }

    fn delete_local(&self, index: &str, id: &str) -> Value {
        let Some(docs) = self.indices.get(index) else {
            return index_not_found(index);
        };

        let result = if docs.remove(id).is_some() {
            "deleted"
        } else {
            "not_found"
        };

        json!({
            "_index": index,
            "_id": id,
            "result": result,
        })
    }
}

impl DocumentStore for MemoryStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn execute<'a>(&'a self, query: &'a SearchQuery) -> StoreFuture<'a> {
        Box::pin(async move { Ok(self.search_local(query)) })
    }

    fn delete_by_id<'a>(
        &'a self,
        _ctx: &'a RequestContext,
        index: &'a str,
        id: &'a str,
    ) -> StoreFuture<'a> {
        Box::pin(async move { Ok(self.delete_local(index, id)) })
    }
}

fn matches_filter(document: &Value, query: &SearchQuery) -> bool {
    query
        .filter()
        .iter()
        .all(|(field, expected)| document.get(field) == Some(expected))
}

fn index_not_found(index: &str) -> Value {
    json!({
        "error": {
            "type": "index_not_found_exception",
            "reason": format!("no such index [{}]", index),
            "index": index,
        },
        "status": 404,
    })
}
