//! Resolved figure type definitions.
//!
//! Produced by the lowering pass from a `Specification` tree. Every series
//! carries its own input file, fields, scales and label rule, so the backend
//! never has to look at a parent.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::parse::types::RawAxis;

// =============================================================================
// TOP-LEVEL
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedFigure {
    /// `[width, height]` in inches.
    pub size: Option<[f64; 2]>,
    /// Files the backend should write, in `output_format` order.
    pub outputs: Vec<PathBuf>,
    pub plots: Vec<ResolvedPlot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedPlot {
    /// `[row, column]`, one-based.
    pub pos: Option<[u32; 2]>,
    #[serde(rename = "type")]
    pub plot_type: String,
    pub title: Option<String>,
    pub xaxis: Option<RawAxis>,
    pub yaxis: Option<RawAxis>,
    pub series: Vec<ResolvedSeries>,
}

// =============================================================================
// SERIES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedSeries {
    pub input_file: PathBuf,
    pub xfield: String,
    pub yfield: String,
    pub xscale: f64,
    pub yscale: f64,
    pub color: Option<String>,
    pub label: LabelRule,
    pub regex: Option<String>,
}

/// How the backend should label a series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LabelRule {
    /// Use this text verbatim.
    Literal { text: String },
    /// Join the named benchmark fields of each record with `separator`.
    Fields {
        fields: Vec<String>,
        separator: String,
    },
    /// Backend picks its own label.
    Default,
}
