//! The specification tree: Specification → Plot → Series.
//!
//! Built once from a validated document. Parents own their children; the
//! child-to-parent link exists only in the borrowed views of [`view`], which
//! is what attribute queries walk. The only mutation after construction is
//! [`Specification::locate_input_files`].

pub mod attr;
pub mod view;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, SpecError};
use crate::parse::types::{RawAxis, RawLabel, RawPlot, RawScale, RawScope, RawSeries, RawSpec};
use crate::search::SearchPath;
use crate::validate::{self, ValidatedSpec};

pub use attr::{Attribute, Node, resolve};
pub use view::{PlotNode, SeriesNode};

/// Position of a node in document order, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodePath {
    Specification,
    Plot(usize),
    Series { plot: usize, series: usize },
}

impl std::fmt::Display for NodePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodePath::Specification => write!(f, "specification"),
            NodePath::Plot(i) => write!(f, "subplot[{}]", i),
            NodePath::Series { plot, series } => write!(f, "subplot[{}].series[{}]", plot, series),
        }
    }
}

/// Where a specification is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Input files are still the logical names from the document.
    Unresolved,
    /// Every input file has been replaced by its located path.
    FilesLocated,
}

// =============================================================================
// SCOPE
// =============================================================================

/// Inheritable attributes defined at one level. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    input_file: Option<PathBuf>,
    xfield: Option<String>,
    yfield: Option<String>,
    xscale: Option<RawScale>,
    yscale: Option<RawScale>,
}

impl Scope {
    fn from_raw(raw: RawScope) -> Self {
        Scope {
            input_file: non_empty(raw.input_file).map(PathBuf::from),
            xfield: non_empty(raw.xfield),
            yfield: non_empty(raw.yfield),
            xscale: raw.xscale.filter(|s| !s.is_blank()),
            yscale: raw.yscale.filter(|s| !s.is_blank()),
        }
    }

    pub fn input_file(&self) -> Option<&Path> {
        self.input_file.as_deref()
    }

    pub fn xfield(&self) -> Option<&str> {
        self.xfield.as_deref()
    }

    pub fn yfield(&self) -> Option<&str> {
        self.yfield.as_deref()
    }

    pub fn xscale(&self) -> Option<&RawScale> {
        self.xscale.as_ref()
    }

    pub fn yscale(&self) -> Option<&RawScale> {
        self.yscale.as_ref()
    }

    /// Replace a locally defined input file with its location on `search`.
    /// Levels that inherit their input file are left alone.
    fn locate_input_file(&mut self, search: &SearchPath, node: NodePath) -> Result<()> {
        let Some(name) = &self.input_file else {
            return Ok(());
        };
        debug!(%node, input_file = %name.display(), "searching for input_file");
        let found = search.locate(name)?;
        self.input_file = Some(found);
        Ok(())
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

// =============================================================================
// SERIES
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    scope: Scope,
    color: Option<String>,
    label: Option<RawLabel>,
    regex: Option<String>,
}

impl Series {
    fn from_raw(raw: RawSeries) -> Self {
        Series {
            scope: Scope::from_raw(raw.scope()),
            color: non_empty(raw.color),
            label: raw.label,
            regex: non_empty(raw.regex),
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn label(&self) -> Option<&RawLabel> {
        self.label.as_ref()
    }

    /// Benchmark fields to concatenate into the label; empty unless the
    /// label is structured.
    pub fn label_fields(&self) -> &[String] {
        match &self.label {
            Some(RawLabel::Fields { fields, .. }) => fields,
            _ => &[],
        }
    }

    /// Separator between label fields, `"x"` unless the label sets one.
    pub fn label_separator(&self) -> &str {
        match &self.label {
            Some(RawLabel::Fields {
                separator: Some(sep),
                ..
            }) => sep,
            _ => "x",
        }
    }

    /// The literal label, or `default` if the label is absent or structured.
    pub fn label_or<'a>(&'a self, default: &'a str) -> &'a str {
        match &self.label {
            Some(RawLabel::Text(text)) => text,
            _ => default,
        }
    }

    pub fn color_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.color.as_deref().unwrap_or(default)
    }

    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn regex(&self) -> Option<&str> {
        self.regex.as_deref()
    }

    /// Locate this series' own input file, if it defines one.
    pub fn locate_input_file(&mut self, search: &SearchPath, node: NodePath) -> Result<()> {
        self.scope.locate_input_file(search, node)
    }
}

// =============================================================================
// PLOT
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Plot {
    scope: Scope,
    plot_type: Option<String>,
    pos: Option<(u32, u32)>,
    title: Option<String>,
    xaxis: Option<RawAxis>,
    yaxis: Option<RawAxis>,
    series: Vec<Series>,
}

impl Plot {
    fn from_raw(raw: RawPlot) -> Self {
        let scope = Scope::from_raw(raw.scope());
        Plot {
            scope,
            plot_type: non_empty(raw.plot_type),
            pos: raw.pos.map(|[row, col]| (row, col)),
            title: non_empty(raw.title),
            xaxis: raw.xaxis,
            yaxis: raw.yaxis,
            series: raw.series.into_iter().map(Series::from_raw).collect(),
        }
    }

    /// The plot synthesized for a document without `subplots`. It defines
    /// nothing locally, so every attribute comes from the root.
    fn implicit(series: Vec<RawSeries>) -> Self {
        Plot {
            scope: Scope::default(),
            plot_type: None,
            pos: Some((1, 1)),
            title: None,
            xaxis: None,
            yaxis: None,
            series: series.into_iter().map(Series::from_raw).collect(),
        }
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Grid position `(row, column)`, if the document gives one.
    pub fn pos(&self) -> Option<(u32, u32)> {
        self.pos
    }

    pub fn local_type(&self) -> Option<&str> {
        self.plot_type.as_deref()
    }

    pub fn local_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn local_x_axis(&self) -> Option<&RawAxis> {
        self.xaxis.as_ref()
    }

    pub fn local_y_axis(&self) -> Option<&RawAxis> {
        self.yaxis.as_ref()
    }

    /// Locate this plot's own input file, then every series' in order.
    pub fn locate_input_files(&mut self, search: &SearchPath, index: usize) -> Result<()> {
        self.scope.locate_input_file(search, NodePath::Plot(index))?;
        for (j, series) in self.series.iter_mut().enumerate() {
            series.locate_input_file(
                search,
                NodePath::Series {
                    plot: index,
                    series: j,
                },
            )?;
        }
        Ok(())
    }
}

// =============================================================================
// SPECIFICATION
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Specification {
    scope: Scope,
    plot_type: Option<String>,
    size: Option<(f64, f64)>,
    title: Option<String>,
    xaxis: Option<RawAxis>,
    yaxis: Option<RawAxis>,
    output_file: Option<String>,
    output_format: Vec<String>,
    plots: Vec<Plot>,
    lifecycle: Lifecycle,
}

impl Specification {
    /// Build the tree from a validated document.
    pub fn new(doc: ValidatedSpec) -> Self {
        let raw = doc.into_inner();
        let scope = Scope::from_raw(raw.scope());

        let plots = match raw.subplots {
            Some(subplots) => subplots.into_iter().map(Plot::from_raw).collect(),
            None => {
                debug!("no subplots declared, synthesizing a single plot at (1, 1)");
                vec![Plot::implicit(raw.series.unwrap_or_default())]
            }
        };

        Specification {
            scope,
            plot_type: non_empty(raw.plot_type),
            size: raw.size.map(|[w, h]| (w, h)),
            title: non_empty(raw.title),
            xaxis: raw.xaxis,
            yaxis: raw.yaxis,
            output_file: non_empty(raw.output_file),
            output_format: raw.output_format.unwrap_or_default(),
            plots,
            lifecycle: Lifecycle::Unresolved,
        }
    }

    /// Validate an in-memory document and build the tree.
    pub fn from_document(raw: RawSpec) -> Result<Self> {
        Ok(Self::new(validate::validate(raw)?))
    }

    /// Read, validate and build a specification file (JSON or YAML).
    pub fn load(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading specification");
        Self::from_document(crate::parse::parse_file(path)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::from_document(crate::parse::parse_json(json)?)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Self::from_document(crate::parse::parse_yaml(yaml)?)
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Figure size `(width, height)`.
    pub fn size(&self) -> Option<(f64, f64)> {
        self.size
    }

    pub fn local_type(&self) -> Option<&str> {
        self.plot_type.as_deref()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn x_axis(&self) -> Option<&RawAxis> {
        self.xaxis.as_ref()
    }

    pub fn y_axis(&self) -> Option<&RawAxis> {
        self.yaxis.as_ref()
    }

    pub fn plot_count(&self) -> usize {
        self.plots.len()
    }

    /// Plots in document order.
    pub fn plots(&self) -> impl Iterator<Item = PlotNode<'_>> + Clone + '_ {
        self.plots
            .iter()
            .enumerate()
            .map(move |(i, plot)| PlotNode::new(plot, i, self))
    }

    pub fn plot(&self, index: usize) -> Option<PlotNode<'_>> {
        self.plots.get(index).map(|plot| PlotNode::new(plot, index, self))
    }

    /// Every series of every plot, in document order.
    pub fn series(&self) -> impl Iterator<Item = SeriesNode<'_>> + Clone + '_ {
        self.plots().flat_map(|plot| plot.series_nodes())
    }

    /// The resolved input file of every series, in document order.
    ///
    /// Lazy and restartable: clone the iterator, or call again, to walk the
    /// tree another time.
    pub fn collect_input_files(&self) -> impl Iterator<Item = Result<PathBuf>> + Clone + '_ {
        self.series().map(|series| series.resolve_input_file())
    }

    /// Locate every locally defined input file on `search`, root first, then
    /// each plot and its series in document order.
    ///
    /// Either every file is found and the tree moves to
    /// [`Lifecycle::FilesLocated`], or the tree is left untouched.
    pub fn locate_input_files(&mut self, search: &SearchPath) -> Result<()> {
        if self.lifecycle == Lifecycle::FilesLocated {
            return Err(SpecError::AlreadyLocated);
        }

        let mut scope = self.scope.clone();
        let mut plots = self.plots.clone();
        scope.locate_input_file(search, NodePath::Specification)?;
        for (i, plot) in plots.iter_mut().enumerate() {
            plot.locate_input_files(search, i)?;
        }

        self.scope = scope;
        self.plots = plots;
        self.lifecycle = Lifecycle::FilesLocated;
        Ok(())
    }

    /// Output files named by `output_file`, relative to `base_dir`.
    ///
    /// A name already ending in `.pdf` or `.png` is used as-is; otherwise one
    /// path is produced per `output_format` entry (`pdf` when none are given).
    pub fn output_paths(&self, base_dir: &Path) -> Vec<PathBuf> {
        let Some(name) = &self.output_file else {
            return Vec::new();
        };
        let base = base_dir.join(name);
        if name.ends_with(".pdf") || name.ends_with(".png") {
            return vec![base];
        }

        let formats: Vec<&str> = if self.output_format.is_empty() {
            vec!["pdf"]
        } else {
            self.output_format.iter().map(String::as_str).collect()
        };
        formats
            .into_iter()
            .map(|ext| {
                let mut path = base.clone().into_os_string();
                path.push(".");
                path.push(ext.trim_start_matches('.'));
                PathBuf::from(path)
            })
            .collect()
    }
}

impl Node for Specification {
    fn scope(&self) -> &Scope {
        &self.scope
    }

    fn parent(&self) -> Option<&dyn Node> {
        None
    }

    fn path(&self) -> NodePath {
        NodePath::Specification
    }

    fn plot_type(&self) -> Option<&str> {
        self.plot_type.as_deref()
    }
}
