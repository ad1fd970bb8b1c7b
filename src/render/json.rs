//! JSON rendering for outline results.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::OutlineResult;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Two-space indented JSON
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize an outline result.
///
/// Keys keep their declaration order (`title`, `outline`; `level`, `text`,
/// `page`) and non-ASCII text is written as-is.
pub fn to_json(result: &OutlineResult, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(result),
        JsonFormat::Compact => serde_json::to_string(result),
    };

    json.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Write an outline result to a UTF-8 file.
pub fn write_json<P: AsRef<Path>>(path: P, result: &OutlineResult, format: JsonFormat) -> Result<()> {
    let json = to_json(result, format)?;
    fs::write(path, json)?;
    Ok(())
}
