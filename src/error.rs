//! Unified error type used across all phases.

use std::path::PathBuf;

use thiserror::Error;

use crate::tree::NodePath;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Parse,
    Validate,
    Resolve,
    Locate,
    Emit,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Parse => write!(f, "Parse"),
            Phase::Validate => write!(f, "Validate"),
            Phase::Resolve => write!(f, "Resolve"),
            Phase::Locate => write!(f, "Locate"),
            Phase::Emit => write!(f, "Emit"),
        }
    }
}

/// A single structural rule violation found in a raw document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub code: &'static str,
    pub message: String,
    /// Location inside the document, e.g. `subplots[1].series[0]`.
    pub path: Option<String>,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.path {
            Some(path) => write!(f, "[{}] {} (at '{}')", self.code, self.message, path),
            None => write!(f, "[{}] {}", self.code, self.message),
        }
    }
}

#[derive(Debug, Error)]
pub enum SpecError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("specification failed structural validation: {}", join_violations(.0))]
    StructuralValidation(Vec<Violation>),

    #[error("invalid scale expression '{expr}': {message}")]
    InvalidScale { expr: String, message: String },

    #[error("no input_file defined for {node} or any of its parents")]
    InputFileNotDefined { node: NodePath },

    #[error("no xfield defined for {node} or any of its parents")]
    XFieldNotFound { node: NodePath },

    #[error("no yfield defined for {node} or any of its parents")]
    YFieldNotFound { node: NodePath },

    #[error("no plot type defined for {node} or the specification")]
    PlotTypeNotDefined { node: NodePath },

    #[error("input_file {name} not found in any of {}", display_dirs(.search_dirs))]
    InputFileNotFound {
        name: String,
        search_dirs: Vec<PathBuf>,
    },

    #[error("input files have already been located for this specification")]
    AlreadyLocated,

    #[error("specification references no input files")]
    NoInputFiles,
}

impl SpecError {
    /// Stable error code, grouped by phase letter.
    pub fn code(&self) -> &'static str {
        match self {
            SpecError::Io { .. } => "P000",
            SpecError::Parse { .. } => "P001",
            SpecError::StructuralValidation(_) => "V000",
            SpecError::InvalidScale { .. } => "R001",
            SpecError::InputFileNotDefined { .. } => "R002",
            SpecError::XFieldNotFound { .. } => "R003",
            SpecError::YFieldNotFound { .. } => "R004",
            SpecError::PlotTypeNotDefined { .. } => "R005",
            SpecError::InputFileNotFound { .. } => "L001",
            SpecError::AlreadyLocated => "L002",
            SpecError::NoInputFiles => "D001",
        }
    }

    pub fn phase(&self) -> Phase {
        match self {
            SpecError::Io { .. } | SpecError::Parse { .. } => Phase::Parse,
            SpecError::StructuralValidation(_) => Phase::Validate,
            SpecError::InvalidScale { .. }
            | SpecError::InputFileNotDefined { .. }
            | SpecError::XFieldNotFound { .. }
            | SpecError::YFieldNotFound { .. }
            | SpecError::PlotTypeNotDefined { .. } => Phase::Resolve,
            SpecError::InputFileNotFound { .. } | SpecError::AlreadyLocated => Phase::Locate,
            SpecError::NoInputFiles => Phase::Emit,
        }
    }

    /// The individual violations, if this is a structural validation failure.
    pub fn violations(&self) -> &[Violation] {
        match self {
            SpecError::StructuralValidation(violations) => violations,
            _ => &[],
        }
    }

    pub(crate) fn parse(origin: impl Into<String>, message: impl std::fmt::Display) -> Self {
        SpecError::Parse {
            origin: origin.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SpecError>;

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

fn display_dirs(dirs: &[PathBuf]) -> String {
    let quoted: Vec<String> = dirs.iter().map(|d| format!("'{}'", d.display())).collect();
    format!("[{}]", quoted.join(", "))
}
