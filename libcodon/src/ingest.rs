//! FASTA ingestion over raw byte buffers.
//!
//! Inputs may arrive in legacy text encodings, so decoding tries a
//! prioritized chain (strict UTF-8, then Windows-1252, which covers the
//! latin-1/cp1252 files seen in the wild) and only fails once every attempt
//! reports malformed bytes. Data is never silently re-interpreted as a
//! different sequence.

use std::borrow::Cow;

use encoding_rs::WINDOWS_1252;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::record::{SequenceRecord, SequenceSet};

/// Decodes raw bytes using the prioritized encoding chain.
///
/// `input` names the originating file (or buffer) for diagnostics.
pub fn decode<'a>(raw: &'a [u8], input: &str) -> Result<Cow<'a, str>> {
    if let Ok(text) = std::str::from_utf8(raw) {
        return Ok(Cow::Borrowed(text));
    }

    debug!(input, "input is not UTF-8, falling back to Windows-1252");
    let (text, _, had_errors) = WINDOWS_1252.decode(raw);
    if had_errors {
        warn!(input, "all encodings in the fallback chain failed");
        return Err(Error::Encoding {
            input: input.to_string(),
        });
    }
    Ok(text)
}

/// Parses a FASTA byte buffer into the ordered sequence set for one species.
///
/// `label` tags the resulting set (it names per-species output columns
/// later); `input` is the file name carried into diagnostics.
///
/// Rejected inputs: zero-length buffers, buffers whose first non-empty line
/// is not a `>` header, headers with an empty identifier, and buffers that
/// yield zero records. The identifier is the first whitespace-delimited
/// token of the header; sequence lines up to the next header are
/// concatenated with line breaks stripped.
pub fn parse(raw: &[u8], label: &str, input: &str) -> Result<SequenceSet> {
    if raw.is_empty() {
        return Err(Error::EmptyInput {
            input: input.to_string(),
        });
    }
    let text = decode(raw, input)?;

    let mut records: Vec<SequenceRecord> = Vec::new();
    let mut current: Option<SequenceRecord> = None;

    for line in text.lines() {
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = line.strip_prefix('>') {
            if let Some(record) = current.take() {
                records.push(record);
            }
            let id = header.split_whitespace().next().unwrap_or("").to_string();
            if id.is_empty() {
                return Err(Error::MalformedInput {
                    input: input.to_string(),
                    detail: format!("record {} has no identifier", records.len() + 1),
                });
            }
            current = Some(SequenceRecord {
                id,
                bases: String::new(),
            });
        } else if let Some(record) = current.as_mut() {
            record.bases.push_str(line);
        } else {
            return Err(Error::MalformedInput {
                input: input.to_string(),
                detail: format!("expected a '>' header, found {:?}", truncate(line, 30)),
            });
        }
    }
    if let Some(record) = current.take() {
        records.push(record);
    }

    if records.is_empty() {
        return Err(Error::EmptyInput {
            input: input.to_string(),
        });
    }
    debug!(input, label, record_count = records.len(), "parsed fasta input");
    Ok(SequenceSet::new(label, records))
}

fn truncate(line: &str, max_chars: usize) -> String {
    if line.chars().count() <= max_chars {
        line.to_string()
    } else {
        let cut: String = line.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}
