use super::client::{DocumentStore, StoreError, StoreFuture};
use crate::plants::types::SearchQuery;
use crate::trace::context::{REQUEST_ID_HEADER, RequestContext, TRACEPARENT_HEADER};

use reqwest::{RequestBuilder, Url};
use serde_json::Value;
use std::time::Duration;

/// Elasticsearch-compatible store reached over HTTP.
pub struct ElasticStore {
    http_client: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl ElasticStore {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let invalid = |reason: String| StoreError::InvalidUrl {
            url: base_url.to_string(),
            reason,
        };

        let mut url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(invalid(format!("unsupported scheme {}", url.scheme())));
        }
        if url.cannot_be_a_base() {
            return Err(invalid("not a base url".to_string()));
        }
        let cleaned = url.path().trim_end_matches('/').to_string();
        url.set_path(&cleaned);

        Ok(Self {
            http_client: reqwest::Client::new(),
            base_url: url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    fn url_for(&self, segments: &[&str]) -> Result<Url, StoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "not a base url".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Sends `request` with the correlation headers of `ctx` and decodes the answer.
    ///
    /// Non-2xx answers with a JSON body are handed back as raw responses, only
    /// answers that cannot be read at all become errors.
    async fn send(&self, ctx: &RequestContext, request: RequestBuilder) -> Result<Value, StoreError> {
        let mut request = request
            .header(REQUEST_ID_HEADER, ctx.request_id())
            .timeout(self.timeout);
        if let Some(traceparent) = ctx.traceparent() {
            request = request.header(TRACEPARENT_HEADER, traceparent);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| self.transport_error(e))?;

        match serde_json::from_str::<Value>(&body) {
            Ok(value) => {
                if !status.is_success() {
                    tracing::debug!("Store answered {} with a JSON body", status);
                }
                Ok(value)
            }
            Err(e) if status.is_success() => Err(StoreError::Decode(e.to_string())),
            Err(_) => Err(StoreError::Status {
                status: status.as_u16(),
                body: truncate(&body),
            }),
        }
    }

    fn transport_error(&self, e: reqwest::Error) -> StoreError {
        if e.is_timeout() {
            StoreError::Timeout(self.timeout)
        } else {
            StoreError::Transport(e.to_string())
        }
    }
}

impl DocumentStore for ElasticStore {
    fn name(&self) -> &'static str {
        "elasticsearch"
    }

    fn execute<'a>(&'a self, query: &'a SearchQuery) -> StoreFuture<'a> {
        Box::pin(async move {
            let url = self.url_for(&[query.index_name(), "_search"])?;
            let request = self.http_client.post(url).json(&query.request_body());
            self.send(query.context(), request).await
        })
    }

    fn delete_by_id<'a>(
        &'a self,
        ctx: &'a RequestContext,
        index: &'a str,
        id: &'a str,
    ) -> StoreFuture<'a> {
        Box::pin(async move {
            let url = self.url_for(&[index, "_doc", id])?;
            self.send(ctx, self.http_client.delete(url)).await
        })
    }
}

fn truncate(body: &str) -> String {
    const MAX_BODY: usize = 512;
    if body.len() <= MAX_BODY {
        return body.to_string();
    }
    let mut end = MAX_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
