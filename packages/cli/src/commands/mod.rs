pub mod apply;
pub mod inspect;

pub use apply::{apply, ApplyArgs};
pub use inspect::{inspect, InspectArgs};

use anyhow::{Context, Result};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Read a JSON file of marshalled commands (an array or a single object).
fn read_commands(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read commands from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))
}
