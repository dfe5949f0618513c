use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value as JsonValue;

use super::model::Dataset;
use super::normalize::normalize;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load and normalize a dataset from a JSON file.
///
/// Expected shape – a mapping from institution key to record:
///
/// ```json
/// {
///   "iit_bombay": {
///     "name": "IIT Bombay",
///     "nirfRank": 3,
///     "UG": [{ "branch": "CSE", "medianPackage": 30.0, ... }],
///     "PG": [...],
///     "oneYearbackStats": { "UG": [...], "PG": [...] },
///     "twoYearbackStats": { "UG": [...], "PG": [...] }
///   },
///   ...
/// }
/// ```
///
/// IO and parse failures are the caller's "load failure" state; malformed
/// records inside a well-formed file are handled by normalization instead.
pub fn load_file(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading dataset file {}", path.display()))?;
    from_json_str(&text)
}

/// Parse and normalize a dataset from in-memory JSON text.
pub fn from_json_str(text: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing dataset JSON")?;
    let dataset = normalize(&root);
    log::info!("loaded {} institutions", dataset.len());
    Ok(dataset)
}
