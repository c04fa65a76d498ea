//! Test double for the HTTP client.

#![allow(dead_code)]

use async_trait::async_trait;
use postcode::{BoxError, HttpClient, HttpResponse};
use reqwest::StatusCode;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A request as seen by [`MockClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: String,
    pub if_none_match: String,
}

/// What [`MockClient`] answers.
#[derive(Clone)]
pub enum Reply {
    /// Sending the request fails.
    SendError(&'static str),
    /// A response with the given status, ETag header and body.
    Response {
        status: StatusCode,
        etag: Option<String>,
        body: Result<Vec<u8>, &'static str>,
    },
    /// Behave like a server holding `data` under `etag`.
    Server { data: Vec<u8>, etag: String },
}

impl Reply {
    pub fn not_modified() -> Self {
        Reply::Response {
            status: StatusCode::NOT_MODIFIED,
            etag: None,
            body: Ok(Vec::new()),
        }
    }

    pub fn ok(body: Vec<u8>, etag: &str) -> Self {
        Reply::Response {
            status: StatusCode::OK,
            etag: Some(etag.to_string()),
            body: Ok(body),
        }
    }

    pub fn status(status: StatusCode) -> Self {
        Reply::Response {
            status,
            etag: None,
            body: Ok(b"error page".to_vec()),
        }
    }
}

/// Records requests, replies with a canned [`Reply`] and tracks the
/// lifetime of every response it hands out.
pub struct MockClient {
    reply: Reply,
    requests: Mutex<Vec<Request>>,
    live_responses: Arc<AtomicUsize>,
    bodies_read: Arc<AtomicUsize>,
}

impl MockClient {
    pub fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            requests: Mutex::new(Vec::new()),
            live_responses: Arc::new(AtomicUsize::new(0)),
            bodies_read: Arc::new(AtomicUsize::new(0)),
        })
    }

    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Responses created but not yet dropped.
    pub fn live_responses(&self) -> usize {
        self.live_responses.load(Ordering::SeqCst)
    }

    pub fn bodies_read(&self) -> usize {
        self.bodies_read.load(Ordering::SeqCst)
    }

    fn respond(
        &self,
        status: StatusCode,
        etag: Option<String>,
        body: Result<Vec<u8>, &'static str>,
    ) -> Box<dyn HttpResponse> {
        self.live_responses.fetch_add(1, Ordering::SeqCst);
        Box::new(MockResponse {
            status,
            etag,
            body,
            live: self.live_responses.clone(),
            bodies_read: self.bodies_read.clone(),
        })
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get(&self, url: &str, if_none_match: &str) -> Result<Box<dyn HttpResponse>, BoxError> {
        self.requests.lock().unwrap().push(Request {
            url: url.to_string(),
            if_none_match: if_none_match.to_string(),
        });

        match &self.reply {
            Reply::SendError(msg) => Err((*msg).into()),
            Reply::Response { status, etag, body } => {
                Ok(self.respond(*status, etag.clone(), body.clone()))
            }
            Reply::Server { etag, .. } if etag == if_none_match => Ok(self.respond(
                StatusCode::NOT_MODIFIED,
                Some(etag.clone()),
                Ok(Vec::new()),
            )),
            Reply::Server { data, etag } => {
                Ok(self.respond(StatusCode::OK, Some(etag.clone()), Ok(data.clone())))
            }
        }
    }
}

struct MockResponse {
    status: StatusCode,
    etag: Option<String>,
    body: Result<Vec<u8>, &'static str>,
    live: Arc<AtomicUsize>,
    bodies_read: Arc<AtomicUsize>,
}

impl Drop for MockResponse {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl HttpResponse for MockResponse {
    fn status(&self) -> StatusCode {
        self.status
    }

    fn header(&self, name: &str) -> Option<String> {
        if name.eq_ignore_ascii_case("etag") {
            self.etag.clone()
        } else {
            None
        }
    }

    async fn bytes(self: Box<Self>) -> Result<Vec<u8>, BoxError> {
        self.bodies_read.fetch_add(1, Ordering::SeqCst);
        self.body.clone().map_err(Into::into)
    }
}

pub fn fixture(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name);
    std::fs::read(&path).unwrap_or_else(|e| panic!("read {}: {e}", path.display()))
}
