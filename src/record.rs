//! Tab-delimited record parsing.

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use std::io::Write;
use tracing::debug;

use crate::entry::Entry;
use crate::error::{PostcodeError, Result};

/// Parse the contents of a `<CC>.txt` member into entries, one per line.
///
/// The delimiter is a tab and there is no header row. Quoted fields follow
/// the usual delimited-text rules; a quote that is opened and never closed
/// fails with [`PostcodeError::MalformedRecord`] naming the line it opened
/// on. Rows of any width are accepted, see [`Entry::from_columns`].
pub fn parse_entries(data: &[u8]) -> Result<Vec<Entry>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(data);

    let mut entries = Vec::new();
    let mut record = StringRecord::new();
    loop {
        match reader.read_record(&mut record) {
            Ok(true) => entries.push(Entry::from_columns(record.iter())),
            Ok(false) => break,
            Err(source) => {
                return Err(PostcodeError::MalformedRecord {
                    line: source.position().map(|p| p.line()),
                    source: source.into(),
                });
            }
        }
    }

    // The reader takes everything up to end of input as the open field.
    if let Some(line) = unterminated_quote(data) {
        return Err(PostcodeError::MalformedRecord {
            line: Some(line),
            source: "unterminated quoted field".into(),
        });
    }

    debug!(bytes = data.len(), entries = entries.len(), "parsed records");
    Ok(entries)
}

/// Line on which a quoted field opens without a closing quote.
///
/// Follows the reader's rules: only a quote at the start of a field opens
/// one, and `""` inside it is an escaped quote.
fn unterminated_quote(data: &[u8]) -> Option<u64> {
    let mut line = 1;
    let mut field_start = true;
    let mut opened_on = None;
    let mut bytes = data.iter().peekable();

    while let Some(&b) = bytes.next() {
        if opened_on.is_some() {
            match b {
                b'"' if bytes.peek() == Some(&&b'"') => {
                    bytes.next();
                }
                b'"' => opened_on = None,
                b'\n' => line += 1,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' if field_start => {
                opened_on = Some(line);
                field_start = false;
            }
            b'\t' | b'\r' => field_start = true,
            b'\n' => {
                line += 1;
                field_start = true;
            }
            _ => field_start = false,
        }
    }
    opened_on
}

/// Write entries as tab-delimited lines, the format [`parse_entries`] reads.
///
/// Fields are quoted only when they contain a tab, a quote or a line break.
pub fn write_entries<W: Write>(writer: W, entries: &[Entry]) -> csv::Result<()> {
    let mut writer = WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(writer);
    for entry in entries {
        writer.write_record(entry.fields())?;
    }
    writer.flush()?;
    Ok(())
}
