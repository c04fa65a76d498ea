//! Extraction of the data member from a downloaded archive.
//!
//! GeoNames ships each country as a zip archive holding a single
//! `<CC>.txt` member. The whole archive is downloaded, so the archive is
//! read from an in-memory buffer.

use std::io::{Cursor, Read};
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::error::{PostcodeError, Result};

/// Extract the member called `name` from a zip archive held in memory.
///
/// Lookup is by exact name against the central directory; directory
/// prefixes are not stripped. The member's CRC-32 is checked once it has
/// been read to the end.
///
/// # Errors
///
/// - [`PostcodeError::MalformedArchive`] if `data` is not a zip archive
/// - [`PostcodeError::MemberNotFound`] if no member is called `name`
/// - [`PostcodeError::Extraction`] if the member cannot be read or
///   decompressed
pub fn extract_member(data: &[u8], name: &str) -> Result<Vec<u8>> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| PostcodeError::malformed(e.to_string()))?;

    let extraction = |source: std::io::Error| PostcodeError::Extraction {
        name: name.to_string(),
        source,
    };

    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(ZipError::FileNotFound) => {
            return Err(PostcodeError::MemberNotFound {
                name: name.to_string(),
            });
        }
        Err(e) => return Err(extraction(e.into())),
    };

    let mut member = Vec::new();
    file.read_to_end(&mut member).map_err(extraction)?;

    debug!(
        name,
        compressed = file.compressed_size(),
        uncompressed = member.len(),
        "extracted zip member"
    );
    Ok(member)
}
