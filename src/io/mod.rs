mod http;

pub use http::ReqwestClient;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::error::BoxError;

/// Trait for issuing a conditional GET against the download server.
///
/// Implementations must be safe to share between concurrent fetches.
/// `reqwest::Client` implements it directly; tests substitute their own.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send `GET url` with an `If-None-Match` header set to `if_none_match`.
    ///
    /// No other headers and no body are sent.
    async fn get(&self, url: &str, if_none_match: &str) -> Result<Box<dyn HttpResponse>, BoxError>;
}

/// A response whose body has not been read yet.
///
/// Dropping the response releases the body without reading it.
#[async_trait]
pub trait HttpResponse: Send {
    fn status(&self) -> StatusCode;

    /// Value of the response header `name`, if present and valid UTF-8.
    fn header(&self, name: &str) -> Option<String>;

    /// Read the whole body, consuming the response.
    async fn bytes(self: Box<Self>) -> Result<Vec<u8>, BoxError>;
}
