//! Store Module Tests
//!
//! ## Test Scopes
//! - **MemoryStore**: Search and delete answers, shaped like Elasticsearch's.
//! - **ElasticStore**: Request paths, bodies and headers against a mock HTTP server,
//!   and the split between raw error bodies and `StoreError`s.

#[cfg(test)]
mod tests {
    use crate::plants::query;
    use crate::plants::types::Filter;
    use crate::store::client::{DocumentStore, StoreError};
    use crate::store::elastic::ElasticStore;
    use crate::store::memory::MemoryStore;
    use crate::trace::context::{RequestContext, TraceContext};
    use serde_json::json;
    use std::time::Duration;
    use tracing::Span;
    use wiremock::matchers::{body_json, header, header_regex, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn seeded_store() -> MemoryStore {
        let store = MemoryStore::new();
        store.insert("plants", "p2", json!({"name": "Monstera", "family": "Araceae"}));
        store.insert("plants", "p1", json!({"name": "Ficus", "family": "Moraceae"}));
        store.insert("plants", "p3", json!({"name": "Pothos", "family": "Araceae"}));
        store
    }

    // ============================================================
    // MEMORY STORE
    // ============================================================

    #[tokio::test]
    async fn test_memory_search_returns_all_hits_sorted_by_id() {
        let store = seeded_store();
        let query = query::match_all("plants", RequestContext::detached());

        let raw = store.execute(&query).await.unwrap();

        let hits = raw["hits"]["hits"].as_array().unwrap();
        let ids: Vec<&str> = hits.iter().map(|h| h["_id"].as_str().unwrap()).collect();
        assert_eq!(ids, vec!["p1", "p2", "p3"]);
        assert_eq!(raw["hits"]["total"]["value"], 3);
        assert_eq!(hits[0]["_source"]["name"], "Ficus");
    }

    #[tokio::test]
    async fn test_memory_search_applies_filter() {
        let store = seeded_store();
        let mut filter = Filter::new();
        filter.insert("family".to_string(), json!("Araceae"));
        let query = query::build("plants", filter, RequestContext::detached());

        let raw = store.execute(&query).await.unwrap();

        assert_eq!(raw["hits"]["hits"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_memory_search_empty_index() {
        let store = MemoryStore::new();
        store.create_index("plants");
        let query = query::match_all("plants", RequestContext::detached());

        let raw = store.execute(&query).await.unwrap();

        assert_eq!(raw["hits"]["hits"], json!([]));
        assert!(store.is_empty("plants"));
    }

    #[tokio::test]
    async fn test_memory_search_missing_index_answers_store_error() {
        let store = MemoryStore::new();
        let query = query::match_all("plants", RequestContext::detached());

        let raw = store.execute(&query).await.unwrap();

        assert_eq!(raw["error"]["type"], "index_not_found_exception");
        assert_eq!(raw["status"], 404);
        assert!(raw.get("hits").is_none());
    }

    #[tokio::test]
    async fn test_memory_delete() {
        let store = seeded_store();
        let ctx = RequestContext::detached();

        let deleted = store.delete_by_id(&ctx, "plants", "p1").await.unwrap();
        assert_eq!(deleted["result"], "deleted");
        assert!(!store.contains("plants", "p1"));
        assert_eq!(store.len("plants"), 2);

        let again = store.delete_by_id(&ctx, "plants", "p1").await.unwrap();
        assert_eq!(again["result"], "not_found");

        let no_index = store.delete_by_id(&ctx, "trees", "p1").await.unwrap();
        assert_eq!(no_index["error"]["type"], "index_not_found_exception");
    }

    // ============================================================
    // ELASTIC STORE
    // ============================================================

    fn traced_context() -> RequestContext {
        RequestContext::new(
            TraceContext {
                trace_id: Some("4bf92f3577b34da6a3ce929d0e0e4736".to_string()),
                span_id: Some("00f067aa0ba902b7".to_string()),
                request_id: Some("req-42".to_string()),
            },
            Span::none(),
        )
    }

    #[tokio::test]
    async fn test_elastic_search_posts_match_all_with_trace_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/plants/_search"))
            .and(body_json(json!({"query": {"match_all": {}}})))
            .and(header("x-request-id", "req-42"))
            .and(header_regex(
                "traceparent",
                "^00-4bf92f3577b34da6a3ce929d0e0e4736-[0-9a-f]{16}-01$",
            ))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"hits": {"hits": [{"_id": "p1"}]}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = ElasticStore::new(&server.uri(), Duration::from_secs(2)).unwrap();
        let query = query::match_all("plants", traced_context());

        let raw = store.execute(&query).await.unwrap();

        assert_eq!(raw["hits"]["hits"][0]["_id"], "p1");
    }

    #[tokio::test]
    async fn test_elastic_search_sends_filter_terms() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/plants/_search"))
            .and(body_json(json!({
                "query": {"bool": {"filter": [{"term": {"family": "Araceae"}}]}}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": {"hits": []}})))
            .expect(1)
            .mount(&server)
            .await;

        let store = ElasticStore::new(&server.uri(), Duration::from_secs(2)).unwrap();
        let mut filter = Filter::new();
        filter.insert("family".to_string(), json!("Araceae"));
        let query = query::build("plants", filter, RequestContext::detached());

        assert!(store.execute(&query).await.is_ok());
    }

    #[tokio::test]
    async fn test_elastic_base_path_prefix() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/es/plants/_search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hits": {"hits": []}})))
            .expect(1)
            .mount(&server)
            .await;

        let store =
            ElasticStore::new(&format!("{}/es/", server.uri()), Duration::from_secs(2)).unwrap();
        let query = query::match_all("plants", RequestContext::detached());

        assert!(store.execute(&query).await.is_ok());
    }

    #[tokio::test]
    async fn test_elastic_error_body_is_returned_raw() {
        let server = MockServer::start().await;
        let body = json!({
            "error": {"type": "index_not_found_exception", "reason": "no such index [plants]"},
            "status": 404
        });
        Mock::given(method("POST"))
            .and(path("/plants/_search"))
            .respond_with(ResponseTemplate::new(404).set_body_json(body.clone()))
            .mount(&server)
            .await;

        let store = ElasticStore::new(&server.uri(), Duration::from_secs(2)).unwrap();
        let query = query::match_all("plants", RequestContext::detached());

        assert_eq!(store.execute(&query).await.unwrap(), body);
    }

    #[tokio::test]
    async fn test_elastic_delete_not_found_is_not_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/plants/_doc/abc"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({"_index": "plants", "_id": "abc", "result": "not_found"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let store = ElasticStore::new(&server.uri(), Duration::from_secs(2)).unwrap();
        let ctx = RequestContext::detached();

        let raw = store.delete_by_id(&ctx, "plants", "abc").await.unwrap();

        assert_eq!(raw["result"], "not_found");
    }

    #[tokio::test]
    async fn test_elastic_non_json_error_is_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let store = ElasticStore::new(&server.uri(), Duration::from_secs(2)).unwrap();
        let query = query::match_all("plants", RequestContext::detached());

        match store.execute(&query).await {
            Err(StoreError::Status { status, body }) => {
                assert_eq!(status, 502);
                assert_eq!(body, "bad gateway");
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_elastic_non_json_success_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let store = ElasticStore::new(&server.uri(), Duration::from_secs(2)).unwrap();
        let query = query::match_all("plants", RequestContext::detached());

        assert!(matches!(
            store.execute(&query).await,
            Err(StoreError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_elastic_slow_answer_times_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"hits": {"hits": []}}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let store = ElasticStore::new(&server.uri(), Duration::from_millis(50)).unwrap();
        let query = query::match_all("plants", RequestContext::detached());

        assert!(matches!(
            store.execute(&query).await,
            Err(StoreError::Timeout(_))
        ));
    }

    #[tokio::test]
    async fn test_elastic_unreachable_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let store = ElasticStore::new(&format!("http://{}", addr), Duration::from_secs(2)).unwrap();
        let query = query::match_all("plants", RequestContext::detached());

        assert!(matches!(
            store.execute(&query).await,
            Err(StoreError::Transport(_))
        ));
    }

    #[test]
    fn test_elastic_rejects_invalid_urls() {
        for url in ["not a url", "ftp://localhost:9200", "mailto:someone@example.com"] {
            assert!(
                matches!(
                    ElasticStore::new(url, Duration::from_secs(1)),
                    Err(StoreError::InvalidUrl { .. })
                ),
                "should reject {}",
                url
            );
        }
    }

    #[test]
    fn test_elastic_trims_trailing_slash() {
        let store = ElasticStore::new("http://localhost:9200/es/", Duration::from_secs(1)).unwrap();
        assert_eq!(store.base_url(), "http://localhost:9200/es");
    }
}
