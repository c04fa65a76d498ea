//! Main entry point for the postcode CLI application.
//!
//! Fetches one country's postal codes, writes them as tab-separated lines
//! and keeps the ETag between runs so unchanged data is not downloaded
//! again.

use anyhow::{Context, Result};
use clap::Parser;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tracing_subscriber::EnvFilter;

use postcode::record::write_entries;
use postcode::{Cli, PostcodeClient, ReqwestClient};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = cli.timeout() {
        builder = builder.timeout(timeout);
    }
    let http = Arc::new(ReqwestClient::new(builder.build()?));
    let client = PostcodeClient::new(http.clone()).with_base_url(cli.base_url.clone());

    let etag = cli.prior_etag().await?;
    let data = client
        .fetch_country(&cli.country, &etag)
        .await
        .with_context(|| format!("Failed to fetch postal codes for {:?}", cli.country))?;

    let country = cli.country.to_uppercase();
    if !data.modified {
        if !cli.quiet {
            eprintln!("{country}: not modified");
        }
        return Ok(());
    }

    let mut tsv = Vec::new();
    write_entries(&mut tsv, &data.entries)?;

    // Write the entries before the ETag, so a failed write is retried next run.
    match &cli.output {
        Some(path) => tokio::fs::write(path, &tsv)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(&tsv).await?;
            stdout.flush().await?;
        }
    }
    cli.save_etag(&data.etag).await?;

    if !cli.quiet {
        eprintln!(
            "{country}: {} entries, {} downloaded, etag {:?}",
            data.entries.len(),
            format_size(http.transferred_bytes()),
            data.etag
        );
    }

    Ok(())
}

/// Format a byte size into a human-readable string.
fn format_size(size: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if size >= GB {
        format!("{:.2} GB", size as f64 / GB as f64)
    } else if size >= MB {
        format!("{:.2} MB", size as f64 / MB as f64)
    } else if size >= KB {
        format!("{:.2} KB", size as f64 / KB as f64)
    } else {
        format!("{} bytes", size)
    }
}
