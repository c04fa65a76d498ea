//! Error type shared by every stage of the fetch pipeline.

use reqwest::StatusCode;
use thiserror::Error;

/// Boxed error produced by an [`HttpClient`](crate::io::HttpClient) implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T, E = PostcodeError> = std::result::Result<T, E>;

/// Everything that can stop a [`fetch_country`](crate::fetch_country) call.
///
/// Each variant corresponds to the pipeline stage that failed. None of them
/// are retried internally and no partial entries accompany them.
#[derive(Debug, Error)]
pub enum PostcodeError {
    /// The country code is not exactly two bytes long.
    #[error("country code {code:?} has {len} bytes, want 2")]
    InvalidCountryCode { code: String, len: usize },

    /// The request could not be sent or the response body could not be read.
    #[error("transport error")]
    Transport {
        #[source]
        source: BoxError,
    },

    /// The server answered with something other than 200 or 304.
    #[error("status = {status}, want 200")]
    UnexpectedStatus { status: StatusCode },

    /// The downloaded bytes are not a readable zip archive.
    #[error("malformed zip archive: {reason}")]
    MalformedArchive { reason: String },

    /// The archive has no member with the expected name.
    #[error("zipfile missing {name}")]
    MemberNotFound { name: String },

    /// The member was found but could not be decompressed.
    #[error("extract zipped {name}")]
    Extraction {
        name: String,
        #[source]
        source: std::io::Error,
    },

    /// The member text is not valid tab-delimited data: bad UTF-8, or a
    /// quoted field that is never closed.
    #[error("malformed record{}", line_suffix(.line))]
    MalformedRecord {
        line: Option<u64>,
        #[source]
        source: BoxError,
    },
}

impl PostcodeError {
    pub(crate) fn transport(source: impl Into<BoxError>) -> Self {
        Self::Transport {
            source: source.into(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedArchive {
            reason: reason.into(),
        }
    }
}

fn line_suffix(line: &Option<u64>) -> String {
    match line {
        Some(line) => format!(" on line {line}"),
        None => String::new(),
    }
}
