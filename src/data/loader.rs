use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value as JsonValue;

use super::model::Convertible;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load a dataset or result document from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – a dataset (`{"data_vars": [...], "coords": {...}, "attrs": {...}}`)
///   or a result (`{"datasets": {label: dataset}, "parameters": [...]}`)
pub fn load_file(path: &Path) -> Result<Convertible> {
    match extension(path).as_str() {
        "json" => load_json(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

/// Write a dataset or result to a file in the format implied by its extension.
pub fn save_file(path: &Path, input: &Convertible) -> Result<()> {
    match extension(path).as_str() {
        "json" => save_json(path, input),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

// ---------------------------------------------------------------------------
// JSON
// ---------------------------------------------------------------------------

fn load_json(path: &Path) -> Result<Convertible> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;
    let input = Convertible::from_value(root)
        .with_context(|| format!("interpreting {}", path.display()))?;
    log::debug!("loaded {}", path.display());
    Ok(input)
}

fn save_json(path: &Path, input: &Convertible) -> Result<()> {
    let value = input.to_value().context("serializing document")?;
    let text = serde_json::to_string_pretty(&value).context("formatting JSON")?;
    std::fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    log::debug!("wrote {}", path.display());
    Ok(())
}
