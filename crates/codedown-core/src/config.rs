//! Configuration for description extraction.
//!
//! Load order: `.codedown/config.toml` → environment variables → defaults.
//! Loaded once at startup and passed to the extractor by value; nothing reads
//! it as ambient global state.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Top-level codedown configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CodedownConfig {
    pub attributes: AttributeConfig,
}

/// Recognized modifiers and the synthetic attribute labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeConfig {
    /// Modifier keywords reported as attributes. Output follows this order,
    /// not the order modifiers appear in source.
    pub recognized: Vec<String>,
    /// Label appended when the declaring class comes from a compiled or archived dependency.
    pub external_label: String,
    /// Label appended when the declaring class is an interface.
    pub interface_label: String,
    /// File-name suffixes of compiled artifacts.
    pub compiled_extensions: Vec<String>,
    /// File-system protocols of archive containers, compared case-insensitively.
    pub archive_protocols: Vec<String>,
}

impl Default for AttributeConfig {
    fn default() -> Self {
        Self {
            recognized: [
                "public",
                "protected",
                "private",
                "abstract",
                "static",
                "final",
                "synchronized",
                "native",
                "default",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            external_label: "external".to_string(),
            interface_label: "interface".to_string(),
            compiled_extensions: vec![".class".to_string()],
            archive_protocols: vec!["jar".to_string(), "zip".to_string()],
        }
    }
}

impl AttributeConfig {
    /// Allowlist with only the given keywords, keeping default labels.
    pub fn with_recognized<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            recognized: keywords.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn is_compiled_file(&self, file_name: &str) -> bool {
        self.compiled_extensions
            .iter()
            .any(|ext| file_name.ends_with(ext.as_str()))
    }

    pub fn is_archive_protocol(&self, protocol: &str) -> bool {
        self.archive_protocols
            .iter()
            .any(|p| p.eq_ignore_ascii_case(protocol))
    }

    fn validate(&self) -> Result<()> {
        if self.external_label.trim().is_empty() {
            anyhow::bail!("attributes.external_label must not be empty");
        }
        if self.interface_label.trim().is_empty() {
            anyhow::bail!("attributes.interface_label must not be empty");
        }
        let mut seen = HashSet::new();
        for keyword in &self.recognized {
            if !seen.insert(keyword.as_str()) {
                anyhow::bail!("attributes.recognized lists `{}` more than once", keyword);
            }
        }
        Ok(())
    }
}

/// Helper to read an env var and apply it to a string config field.
fn env_override(var: &str, target: &mut String) {
    if let Ok(v) = std::env::var(var)
        && !v.trim().is_empty()
    {
        *target = v.trim().to_string();
    }
}

/// Comma-separated list override.
fn env_list_override(var: &str, target: &mut Vec<String>) {
    if let Ok(v) = std::env::var(var) {
        let items: Vec<String> = v
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if !items.is_empty() {
            *target = items;
        }
    }
}

impl CodedownConfig {
    /// Load config from `.codedown/config.toml` in the project root, with env var overrides.
    /// Falls back to defaults if no config file exists.
    pub fn load(project_root: &Path) -> Result<Self> {
        let config_path = project_root.join(".codedown").join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };

        env_override(
            "CODEDOWN_EXTERNAL_LABEL",
            &mut config.attributes.external_label,
        );
        env_override(
            "CODEDOWN_INTERFACE_LABEL",
            &mut config.attributes.interface_label,
        );
        env_list_override(
            "CODEDOWN_RECOGNIZED_ATTRIBUTES",
            &mut config.attributes.recognized,
        );

        config.attributes.validate()?;
        Ok(config)
    }
}
