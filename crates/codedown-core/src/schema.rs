//! JSON encoding of descriptions for downstream generators.

use crate::description::MethodDescription;
use anyhow::{Context, Result};

/// Serialize a description to a pretty-printed JSON string.
pub fn to_json(description: &MethodDescription) -> Result<String> {
    serde_json::to_string_pretty(description).context("failed to serialize description to JSON")
}

/// Serialize descriptions as JSON Lines, one compact record per line.
pub fn to_json_lines(descriptions: &[MethodDescription]) -> Result<String> {
    let mut out = String::new();
    for description in descriptions {
        let line = serde_json::to_string(description)
            .context("failed to serialize description to JSON")?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Deserialize a description, rejecting records whose parameter names and types disagree.
pub fn from_json(json: &str) -> Result<MethodDescription> {
    let description: MethodDescription =
        serde_json::from_str(json).context("failed to deserialize description from JSON")?;
    validate(&description)?;
    Ok(description)
}

/// Check the parameter pairing invariant, including enclosing descriptions.
pub fn validate(description: &MethodDescription) -> Result<()> {
    if !description.is_well_formed() {
        anyhow::bail!(
            "description at offset {} has {} parameter names but {} parameter types",
            description.offset(),
            description.arg_names().len(),
            description.arg_types().len()
        );
    }
    Ok(())
}
