//! Raw document types: the serde target for figure specification files.
//!
//! These mirror the on-disk shape exactly. Nothing here is resolved; a
//! `RawSpec` is turned into a `Specification` tree only after it passes
//! `validate::validate`.

use serde::{Deserialize, Serialize};

// =============================================================================
// TOP-LEVEL DOCUMENT
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subplots: Option<Vec<RawPlot>>,
    /// Series of the implicit single plot, when `subplots` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<RawSeries>>,
    /// Figure size in inches, `[width, height]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<[f64; 2]>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub plot_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<RawAxis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<RawAxis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_format: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xfield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yfield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xscale: Option<RawScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yscale: Option<RawScale>,
}

// =============================================================================
// SHARED INHERITABLE ATTRIBUTES
// =============================================================================

/// The inheritable attributes of one document level, copied out of the
/// struct that declared them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawScope {
    pub input_file: Option<String>,
    pub xfield: Option<String>,
    pub yfield: Option<String>,
    pub xscale: Option<RawScale>,
    pub yscale: Option<RawScale>,
}

macro_rules! impl_scope {
    ($($ty:ty),*) => {
        $(
            impl $ty {
                /// The inheritable attributes defined at this level.
                pub fn scope(&self) -> RawScope {
                    RawScope {
                        input_file: self.input_file.clone(),
                        xfield: self.xfield.clone(),
                        yfield: self.yfield.clone(),
                        xscale: self.xscale.clone(),
                        yscale: self.yscale.clone(),
                    }
                }
            }
        )*
    };
}

impl_scope!(RawSpec, RawPlot, RawSeries);

/// A scale factor: either a plain number or an arithmetic expression such
/// as `"1/1024"` or `"1e-6"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScale {
    Number(f64),
    Expr(String),
}

// =============================================================================
// SUBPLOTS
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawPlot {
    pub series: Vec<RawSeries>,
    /// Grid position, `[row, column]`, one-based.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos: Option<[u32; 2]>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub plot_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<RawAxis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<RawAxis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xfield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yfield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xscale: Option<RawScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yscale: Option<RawScale>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawAxis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<AxisScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lim: Option<[f64; 2]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AxisScale {
    Linear,
    Log,
}

// =============================================================================
// SERIES
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawSeries {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<RawLabel>,
    /// Benchmark-name filter applied by the data loader.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xfield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yfield: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xscale: Option<RawScale>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yscale: Option<RawScale>,
}

/// Series label: a literal string, or the benchmark fields to concatenate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawLabel {
    Text(String),
    Fields {
        #[serde(default)]
        fields: Vec<String>,
        #[serde(
            default,
            alias = "seperator",
            skip_serializing_if = "Option::is_none"
        )]
        separator: Option<String>,
    },
}

// =============================================================================
// CANONICAL FORM
// =============================================================================

impl RawSpec {
    /// Rewrite a single-plot document into the explicit-subplot form.
    ///
    /// `size` and the output keys stay at the top level; everything else moves
    /// into `subplots[0]`, which is placed at `[1, 1]`. Documents that already
    /// declare `subplots` are returned unchanged.
    pub fn canonicalize(self) -> RawSpec {
        if self.subplots.is_some() {
            return self;
        }

        let plot = RawPlot {
            series: self.series.unwrap_or_default(),
            pos: Some([1, 1]),
            plot_type: self.plot_type,
            title: self.title,
            xaxis: self.xaxis,
            yaxis: self.yaxis,
            input_file: self.input_file,
            xfield: self.xfield,
            yfield: self.yfield,
            xscale: self.xscale,
            yscale: self.yscale,
        };

        RawSpec {
            subplots: Some(vec![plot]),
            size: self.size,
            output_file: self.output_file,
            output_format: self.output_format,
            ..RawSpec::default()
        }
    }
}
