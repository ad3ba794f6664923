//! Input loading
//!
//! Reads JSON from a file or stdin into an in-memory snapshot. Accepts
//! either a single top-level array of records or a stream of concatenated /
//! newline-delimited JSON values.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use serde_json::Value;

use crate::error::CatstatError;
use crate::source::MemorySource;

/// Read records from `path`, or from stdin when `path` is `None`.
pub fn load_records(path: Option<&Path>) -> Result<MemorySource, CatstatError> {
    let contents = match path {
        Some(file_path) => {
            let mut file = File::open(file_path).map_err(|e| {
                CatstatError::SourceUnavailable(format!("{}: {}", file_path.display(), e))
            })?;
            let mut contents = String::new();
            file.read_to_string(&mut contents)?;
            contents
        }
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let records = parse_records(&contents)?;
    log::debug!("loaded {} records", records.len());
    Ok(MemorySource::new(records))
}

/// Parse a record snapshot from text.
///
/// A leading `[` means one JSON array holding the records; anything else is
/// treated as a stream of whitespace-separated JSON values, one record each.
pub fn parse_records(contents: &str) -> Result<Vec<Value>, CatstatError> {
    let trimmed = contents.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed)
            .map_err(|e| CatstatError::InvalidJson(e.to_string()));
    }

    serde_json::Deserializer::from_str(trimmed)
        .into_iter::<Value>()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| CatstatError::InvalidJson(e.to_string()))
}
