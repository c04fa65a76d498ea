use std::sync::Arc;
use tracing::info;

use crate::archive::extract_member;
use crate::country::CountryCode;
use crate::entry::Entry;
use crate::error::Result;
use crate::fetch::{DEFAULT_BASE_URL, Fetched, conditional_get, download_url};
use crate::io::HttpClient;
use crate::record::parse_entries;

/// Result of [`PostcodeClient::fetch_country`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryData {
    /// Parsed records, empty when the data was not modified.
    pub entries: Vec<Entry>,
    /// Whether a new archive was downloaded.
    pub modified: bool,
    /// Token to pass on the next call: the new ETag, or the prior one if
    /// nothing changed.
    pub etag: String,
}

/// Fetches GeoNames postal code data through a shared HTTP client.
///
/// The client is held in an [`Arc`], so a `PostcodeClient` is cheap to
/// clone and can serve concurrent fetches when the client allows it, as
/// `reqwest::Client` does. Timeouts and proxies belong to the client.
pub struct PostcodeClient<C: HttpClient + ?Sized> {
    client: Arc<C>,
    base_url: String,
}

impl<C: HttpClient + ?Sized> Clone for PostcodeClient<C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

impl<C: HttpClient + ?Sized> PostcodeClient<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Download from a mirror instead of download.geonames.org.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Fetch postal code entries for `country_code`, skipping the download
    /// when the data still matches `etag`.
    ///
    /// Pass an empty `etag` on the first call. When the server reports the
    /// data unchanged, the result has no entries, `modified` is false and
    /// `etag` is returned as given. Otherwise the archive is downloaded,
    /// its `<CC>.txt` member extracted and parsed, and the server's new
    /// ETag returned for the next call.
    ///
    /// An invalid country code fails before any request is made. Every
    /// error ends the call; no partial entries are returned.
    pub async fn fetch_country(&self, country_code: &str, etag: &str) -> Result<CountryData> {
        let cc = CountryCode::normalize(country_code)?;
        let url = download_url(&self.base_url, &cc);

        let (data, etag) = match conditional_get(&*self.client, &url, etag).await? {
            Fetched::NotModified { etag } => {
                info!(country = %cc, "postal codes not modified");
                return Ok(CountryData {
                    entries: Vec::new(),
                    modified: false,
                    etag,
                });
            }
            Fetched::Modified { data, etag } => (data, etag),
        };

        let text = extract_member(&data, &cc.member_name())?;
        let entries = parse_entries(&text)?;

        info!(country = %cc, entries = entries.len(), etag = %etag, "postal codes updated");
        Ok(CountryData {
            entries,
            modified: true,
            etag,
        })
    }
}
