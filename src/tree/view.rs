//! Borrowed views that pair a node with its parent.
//!
//! `PlotNode` and `SeriesNode` are what the rest of the crate (and the
//! plotting backend) query. They deref to the owned node for its local data
//! and implement [`Node`] so attribute lookups can walk upwards.

use std::ops::Deref;
use std::path::PathBuf;

use super::attr::{self, Node};
use super::{NodePath, Plot, Scope, Series, Specification};
use crate::error::Result;
use crate::parse::types::RawAxis;

#[derive(Debug, Clone, Copy)]
pub struct PlotNode<'a> {
    plot: &'a Plot,
    index: usize,
    parent: &'a Specification,
}

impl<'a> PlotNode<'a> {
    pub(super) fn new(plot: &'a Plot, index: usize, parent: &'a Specification) -> Self {
        Self {
            plot,
            index,
            parent,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn specification(&self) -> &'a Specification {
        self.parent
    }

    /// Series of this plot in rendering order.
    pub fn series_nodes(self) -> impl Iterator<Item = SeriesNode<'a>> + Clone + 'a {
        self.plot
            .series
            .iter()
            .enumerate()
            .map(move |(j, series)| SeriesNode {
                series,
                index: j,
                parent: self,
            })
    }

    pub fn series_node(self, index: usize) -> Option<SeriesNode<'a>> {
        self.plot.series.get(index).map(|series| SeriesNode {
            series,
            index,
            parent: self,
        })
    }

    /// The plot type, inherited from the specification when unset here.
    pub fn resolve_type(&self) -> Result<String> {
        attr::resolve::<attr::PlotType>(self)
    }

    pub fn title(&self) -> Option<&'a str> {
        self.plot.title.as_deref().or(self.parent.title())
    }

    pub fn x_axis(&self) -> Option<&'a RawAxis> {
        self.plot.xaxis.as_ref().or(self.parent.x_axis())
    }

    pub fn y_axis(&self) -> Option<&'a RawAxis> {
        self.plot.yaxis.as_ref().or(self.parent.y_axis())
    }
}

impl Deref for PlotNode<'_> {
    type Target = Plot;

    fn deref(&self) -> &Plot {
        self.plot
    }
}

impl Node for PlotNode<'_> {
    fn scope(&self) -> &Scope {
        &self.plot.scope
    }

    fn parent(&self) -> Option<&dyn Node> {
        Some(self.parent)
    }

    fn path(&self) -> NodePath {
        NodePath::Plot(self.index)
    }

    fn plot_type(&self) -> Option<&str> {
        self.plot.plot_type.as_deref()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SeriesNode<'a> {
    series: &'a Series,
    index: usize,
    parent: PlotNode<'a>,
}

impl<'a> SeriesNode<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn plot(&self) -> PlotNode<'a> {
        self.parent
    }

    pub fn resolve_input_file(&self) -> Result<PathBuf> {
        attr::resolve::<attr::InputFile>(self)
    }

    pub fn resolve_x_field(&self) -> Result<String> {
        attr::resolve::<attr::XField>(self)
    }

    pub fn resolve_y_field(&self) -> Result<String> {
        attr::resolve::<attr::YField>(self)
    }

    pub fn resolve_x_scale(&self) -> Result<f64> {
        attr::resolve::<attr::XScale>(self)
    }

    pub fn resolve_y_scale(&self) -> Result<f64> {
        attr::resolve::<attr::YScale>(self)
    }
}

impl Deref for SeriesNode<'_> {
    type Target = Series;

    fn deref(&self) -> &Series {
        self.series
    }
}

impl Node for SeriesNode<'_> {
    fn scope(&self) -> &Scope {
        &self.series.scope
    }

    fn parent(&self) -> Option<&dyn Node> {
        Some(&self.parent)
    }

    fn path(&self) -> NodePath {
        NodePath::Series {
            plot: self.parent.index,
            series: self.index,
        }
    }
}
