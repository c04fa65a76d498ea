//! # postcode
//!
//! Download and parse postal code data from the
//! [GeoNames](https://www.geonames.org/) export at
//! <https://download.geonames.org/export/zip/>.
//!
//! A fetch runs four stages in order and stops at the first failure:
//!
//! 1. Normalize the two-letter country code
//! 2. Conditional GET of `<CC>.zip` using the caller's previous ETag
//! 3. Extract `<CC>.txt` from the archive
//! 4. Parse the tab-delimited text into twelve-field [`Entry`] records
//!
//! When the server answers `304 Not Modified` the pipeline stops after the
//! second stage and no entries are returned. The caller is responsible for
//! keeping the ETag between runs.
//!
//! ## Example
//!
//! ```no_run
//! use postcode::Field;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let previous_etag = String::new();
//!     let data = postcode::fetch_country("de", &previous_etag).await?;
//!     if data.modified {
//!         for entry in &data.entries {
//!             println!("{} {}", &entry[Field::PostalCode], &entry[Field::PlaceName]);
//!         }
//!         // Save data.etag for the next run
//!     }
//!     Ok(())
//! }
//! ```
//!
//! Use [`PostcodeClient`] to share a configured `reqwest::Client` or to
//! substitute your own [`HttpClient`].

pub mod archive;
pub mod cli;
pub mod client;
pub mod country;
pub mod entry;
pub mod error;
pub mod fetch;
pub mod io;
pub mod record;

use std::sync::{Arc, OnceLock};

pub use archive::extract_member;
pub use cli::Cli;
pub use client::{CountryData, PostcodeClient};
pub use country::CountryCode;
pub use entry::{Entry, FIELD_COUNT, Field};
pub use error::{BoxError, PostcodeError, Result};
pub use fetch::{DEFAULT_BASE_URL, Fetched};
pub use io::{HttpClient, HttpResponse, ReqwestClient};
pub use record::parse_entries;

/// Fetch postal code entries for one country with a process-wide default
/// `reqwest::Client`.
///
/// See [`PostcodeClient::fetch_country`] for the semantics of `etag` and
/// of the returned [`CountryData`].
pub async fn fetch_country(country_code: &str, etag: &str) -> Result<CountryData> {
    static DEFAULT: OnceLock<PostcodeClient<reqwest::Client>> = OnceLock::new();
    DEFAULT
        .get_or_init(|| PostcodeClient::new(Arc::new(reqwest::Client::new())))
        .fetch_country(country_code, etag)
        .await
}
