//! Timed, parallel input reads.
//!
//! Reading the two species files is the only concurrency in the program:
//! two independent, side-effect-free reads, one blocking worker each, under
//! a shared time limit. A read that exceeds the limit surfaces
//! `ProcessingTimeout`; its worker is abandoned and no further stage runs.

use std::path::PathBuf;
use std::time::Duration;

use color_eyre::Result;
use libcodon::Error;
use tokio::task;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// One species' file content, read into memory.
#[derive(Debug)]
pub struct LoadedInput {
    pub label: String,
    /// File name carried into pipeline diagnostics.
    pub source: String,
    pub raw: Vec<u8>,
}

/// Reads both species files concurrently, each bounded by `limit`.
pub async fn read_input_pair(
    a: (String, PathBuf),
    b: (String, PathBuf),
    limit: Duration,
) -> Result<(LoadedInput, LoadedInput)> {
    let (loaded_a, loaded_b) = tokio::try_join!(read_one(a, limit), read_one(b, limit))?;
    info!(
        bytes_a = loaded_a.raw.len(),
        bytes_b = loaded_b.raw.len(),
        "read both input files"
    );
    Ok((loaded_a, loaded_b))
}

async fn read_one((label, path): (String, PathBuf), limit: Duration) -> Result<LoadedInput> {
    let source = path.display().to_string();
    debug!(path = %source, label, "starting input read");

    let read_path = path.clone();
    let read = task::spawn_blocking(move || std::fs::read(&read_path));

    let raw = match timeout(limit, read).await {
        Err(_) => {
            warn!(path = %source, limit_secs = limit.as_secs(), "input read timed out");
            return Err(Error::ProcessingTimeout {
                input: source,
                limit_secs: limit.as_secs(),
            }
            .into());
        }
        Ok(join_result) => join_result?.map_err(|error| to_input_error(error, &source))?,
    };

    Ok(LoadedInput { label, source, raw })
}

fn to_input_error(error: std::io::Error, source: &str) -> Error {
    Error::MalformedInput {
        input: source.to_string(),
        detail: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn fasta_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[tokio::test]
    async fn test_read_input_pair() {
        let a = fasta_file(">g1\nATGC\n");
        let b = fasta_file(">h1\nTTAA\n");
        let (loaded_a, loaded_b) = read_input_pair(
            ("salmonella".to_string(), a.path().to_path_buf()),
            ("gallus".to_string(), b.path().to_path_buf()),
            Duration::from_secs(5),
        )
        .await
        .unwrap();
        assert_eq!(loaded_a.label, "salmonella");
        assert_eq!(loaded_a.raw, b">g1\nATGC\n");
        assert_eq!(loaded_b.raw, b">h1\nTTAA\n");
    }

    #[tokio::test]
    async fn test_missing_file_reports_the_offending_path() {
        let b = fasta_file(">h1\nTTAA\n");
        let result = read_input_pair(
            ("salmonella".to_string(), PathBuf::from("idontexist.fasta")),
            ("gallus".to_string(), b.path().to_path_buf()),
            Duration::from_secs(5),
        )
        .await;
        let message = format!("{:#}", result.unwrap_err());
        assert!(message.contains("idontexist.fasta"));
    }
}
