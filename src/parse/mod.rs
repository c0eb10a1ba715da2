//! Parse phase: JSON / YAML text → raw document types.

pub mod builders;
pub mod types;

pub use types::*;

use std::path::Path;

use crate::error::{Result, SpecError};

/// Source format of a specification document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Pick the format from a file extension. Anything that is not `.json`
    /// is read as YAML, which also accepts JSON documents.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Format::Json,
            _ => Format::Yaml,
        }
    }
}

/// Deserialize a specification from a JSON string.
pub fn parse_json(json: &str) -> Result<RawSpec> {
    serde_json::from_str::<RawSpec>(json).map_err(|e| SpecError::parse("JSON document", e))
}

/// Deserialize a specification from a YAML string.
pub fn parse_yaml(yaml: &str) -> Result<RawSpec> {
    serde_yaml::from_str::<RawSpec>(yaml).map_err(|e| SpecError::parse("YAML document", e))
}

/// Deserialize a specification in the given format.
pub fn parse(text: &str, format: Format) -> Result<RawSpec> {
    match format {
        Format::Json => parse_json(text),
        Format::Yaml => parse_yaml(text),
    }
}

/// Read and deserialize a specification file.
pub fn parse_file(path: &Path) -> Result<RawSpec> {
    let text = std::fs::read_to_string(path).map_err(|e| SpecError::Io {
        path: path.to_owned(),
        source: e,
    })?;

    let format = Format::from_path(path);
    parse(&text, format).map_err(|e| match e {
        SpecError::Parse { message, .. } => SpecError::Parse {
            origin: path.display().to_string(),
            message,
        },
        other => other,
    })
}
