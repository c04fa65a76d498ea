//! Conditional download of a country archive.

use reqwest::StatusCode;
use reqwest::header::ETAG;
use tracing::{debug, warn};

use crate::country::CountryCode;
use crate::error::{PostcodeError, Result};
use crate::io::HttpClient;

/// Where GeoNames publishes the per-country postal code archives.
pub const DEFAULT_BASE_URL: &str = "https://download.geonames.org/export/zip";

/// Outcome of a conditional GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// The server still has the archive identified by `etag`.
    NotModified { etag: String },
    /// A new archive was downloaded.
    Modified { data: Vec<u8>, etag: String },
}

/// Archive URL for `cc` below `base_url`, e.g. `.../export/zip/DE.zip`.
pub fn download_url(base_url: &str, cc: &CountryCode) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), cc.archive_name())
}

/// Issue one conditional GET for `url`.
///
/// `etag` is sent as `If-None-Match`, empty when there is no prior
/// download. A 304 echoes `etag` back without touching the body; a 200
/// reads the whole body and returns the response's `ETag` (empty if the
/// server sent none). The response is dropped on every return path.
pub async fn conditional_get<C>(client: &C, url: &str, etag: &str) -> Result<Fetched>
where
    C: HttpClient + ?Sized,
{
    debug!(url, etag, "requesting archive");
    let resp = client
        .get(url, etag)
        .await
        .map_err(PostcodeError::transport)?;

    match resp.status() {
        StatusCode::NOT_MODIFIED => Ok(Fetched::NotModified {
            etag: etag.to_string(),
        }),
        StatusCode::OK => {
            let new_etag = resp.header(ETAG.as_str()).unwrap_or_default();
            let data = resp.bytes().await.map_err(PostcodeError::transport)?;
            debug!(url, bytes = data.len(), etag = %new_etag, "downloaded archive");
            Ok(Fetched::Modified {
                data,
                etag: new_etag,
            })
        }
        status => {
            warn!(url, %status, "unexpected response status");
            Err(PostcodeError::UnexpectedStatus { status })
        }
    }
}
