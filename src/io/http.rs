use async_trait::async_trait;
use reqwest::header::IF_NONE_MATCH;
use reqwest::{Client, Response, StatusCode};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use super::{HttpClient, HttpResponse};
use crate::error::BoxError;

#[async_trait]
impl HttpClient for Client {
    async fn get(&self, url: &str, if_none_match: &str) -> Result<Box<dyn HttpResponse>, BoxError> {
        let resp = Client::get(self, url)
            .header(IF_NONE_MATCH, if_none_match)
            .send()
            .await?;
        Ok(Box::new(resp))
    }
}

#[async_trait]
impl HttpResponse for Response {
    fn status(&self) -> StatusCode {
        Response::status(self)
    }

    fn header(&self, name: &str) -> Option<String> {
        self.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    async fn bytes(self: Box<Self>) -> Result<Vec<u8>, BoxError> {
        Ok(Response::bytes(*self).await?.to_vec())
    }
}

/// `reqwest` client that counts the body bytes it has downloaded.
///
/// Clones share the connection pool and the counter.
#[derive(Clone, Default)]
pub struct ReqwestClient {
    client: Client,
    transferred_bytes: Arc<AtomicU64>,
}

impl ReqwestClient {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            transferred_bytes: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Get total body bytes transferred from network
    pub fn transferred_bytes(&self) -> u64 {
        self.transferred_bytes.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str, if_none_match: &str) -> Result<Box<dyn HttpResponse>, BoxError> {
        let resp = HttpClient::get(&self.client, url, if_none_match).await?;
        Ok(Box::new(CountingResponse {
            inner: resp,
            counter: self.transferred_bytes.clone(),
        }))
    }
}

struct CountingResponse {
    inner: Box<dyn HttpResponse>,
    counter: Arc<AtomicU64>,
}

#[async_trait]
impl HttpResponse for CountingResponse {
    fn status(&self) -> StatusCode {
        self.inner.status()
    }

    fn header(&self, name: &str) -> Option<String> {
        self.inner.header(name)
    }

    async fn bytes(self: Box<Self>) -> Result<Vec<u8>, BoxError> {
        let CountingResponse { inner, counter } = *self;
        let body = inner.bytes().await?;
        counter.fetch_add(body.len() as u64, Ordering::Relaxed);
        Ok(body)
    }
}
