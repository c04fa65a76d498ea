use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::DEFAULT_BASE_URL;

#[derive(Parser, Debug)]
#[command(name = "postcode")]
#[command(version)]
#[command(about = "Download GeoNames postal codes for a country", long_about = None)]
#[command(after_help = "Examples:\n  \
  postcode de -o DE.tsv                  write all German postal codes to DE.tsv\n  \
  postcode us --etag-file us.etag -o US.tsv   only download when the data changed")]
pub struct Cli {
    /// Two-letter country code (case-insensitive)
    #[arg(value_name = "COUNTRY")]
    pub country: String,

    /// ETag from a previous download
    #[arg(long, value_name = "TOKEN", conflicts_with = "etag_file")]
    pub etag: Option<String>,

    /// File holding the ETag between runs, read before and written after a download
    #[arg(long, value_name = "PATH")]
    pub etag_file: Option<PathBuf>,

    /// Write entries to this file instead of stdout
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Base URL of the postal code archives
    #[arg(long, value_name = "URL", env = "POSTCODE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Request timeout in seconds (none by default)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Quiet mode, no summary on stderr
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Log progress (-vv for debug output)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, conflicts_with = "quiet")]
    pub verbose: u8,
}

impl Cli {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout.map(Duration::from_secs)
    }

    /// Default log level when `RUST_LOG` is unset.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// The ETag to send: `--etag`, else the contents of `--etag-file` if it
    /// exists, else empty.
    pub async fn prior_etag(&self) -> Result<String> {
        if let Some(etag) = &self.etag {
            return Ok(etag.clone());
        }
        let Some(path) = &self.etag_file else {
            return Ok(String::new());
        };
        match tokio::fs::read_to_string(path).await {
            Ok(etag) => Ok(etag.trim_end_matches(['\r', '\n']).to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(String::new()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read ETag file {}", path.display()))
            }
        }
    }

    /// Persist `etag` to `--etag-file`, if one was given.
    pub async fn save_etag(&self, etag: &str) -> Result<()> {
        if let Some(path) = &self.etag_file {
            tokio::fs::write(path, format!("{etag}\n"))
                .await
                .with_context(|| format!("Failed to write ETag file {}", path.display()))?;
        }
        Ok(())
    }
}
