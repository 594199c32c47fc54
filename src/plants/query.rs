use super::types::{Filter, SearchQuery};
use crate::trace::context::RequestContext;

use serde_json::{Map, Value, json};

/// Builds a search over `index_name`. An empty filter matches every document.
pub fn build(index_name: &str, filter: Filter, context: RequestContext) -> SearchQuery {
    debug_assert!(!index_name.is_empty(), "index name must not be empty");

    SearchQuery {
        index_name: index_name.to_string(),
        filter,
        context,
    }
}

/// Match-all search over `index_name`.
pub fn match_all(index_name: &str, context: RequestContext) -> SearchQuery {
    build(index_name, Filter::new(), context)
}

impl SearchQuery {
    /// The Elasticsearch query DSL body for this search.
    pub fn request_body(&self) -> Value {
        if self.filter.is_empty() {
            return json!({ "query": { "match_all": {} } });
        }

        let terms: Vec<Value> = self
            .filter
            .iter()
            .map(|(field, value)| {
                let mut term = Map::new();
                term.insert(field.clone(), value.clone());
                json!({ "term": term })
            })
            .collect();

        json!({ "query": { "bool": { "filter": terms } } })
    }
}
