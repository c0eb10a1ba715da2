//! Attribute fallback chain.
//!
//! Every node in the tree can define any inheritable attribute locally. A
//! query starts at a node and walks towards the root until some level
//! defines the attribute; past the root, the attribute kind's terminal policy
//! applies (a default value, or a typed error naming the node the query
//! started from).

use std::path::PathBuf;

use super::{NodePath, Scope};
use crate::error::{Result, SpecError};

/// A node of the specification tree, as seen by attribute resolution.
pub trait Node {
    /// Attributes defined at this level.
    fn scope(&self) -> &Scope;

    /// The enclosing node, `None` at the root.
    fn parent(&self) -> Option<&dyn Node>;

    fn path(&self) -> NodePath;

    /// Locally declared plot type. Only plots and the root carry one.
    fn plot_type(&self) -> Option<&str> {
        None
    }
}

/// One kind of inheritable attribute and its terminal policy.
pub trait Attribute {
    type Value;

    /// The value defined at `node` itself, if any.
    fn local(node: &dyn Node) -> Option<Result<Self::Value>>;

    /// Applied when no level defines the attribute.
    fn terminal(origin: NodePath) -> Result<Self::Value>;
}

/// Resolve attribute `A` for `node`, nearest definition first.
pub fn resolve<A: Attribute>(node: &dyn Node) -> Result<A::Value> {
    resolve_from::<A>(node, node.path())
}

fn resolve_from<A: Attribute>(node: &dyn Node, origin: NodePath) -> Result<A::Value> {
    if let Some(value) = A::local(node) {
        return value;
    }
    match node.parent() {
        Some(parent) => resolve_from::<A>(parent, origin),
        None => A::terminal(origin),
    }
}

// ---------------------------------------------------------------------------
// Attribute kinds
// ---------------------------------------------------------------------------

pub struct InputFile;

impl Attribute for InputFile {
    type Value = PathBuf;

    fn local(node: &dyn Node) -> Option<Result<PathBuf>> {
        node.scope().input_file().map(|p| Ok(p.to_path_buf()))
    }

    fn terminal(origin: NodePath) -> Result<PathBuf> {
        Err(SpecError::InputFileNotDefined { node: origin })
    }
}

pub struct XField;

impl Attribute for XField {
    type Value = String;

    fn local(node: &dyn Node) -> Option<Result<String>> {
        node.scope().xfield().map(|f| Ok(f.to_string()))
    }

    fn terminal(origin: NodePath) -> Result<String> {
        Err(SpecError::XFieldNotFound { node: origin })
    }
}

pub struct YField;

impl Attribute for YField {
    type Value = String;

    fn local(node: &dyn Node) -> Option<Result<String>> {
        node.scope().yfield().map(|f| Ok(f.to_string()))
    }

    fn terminal(origin: NodePath) -> Result<String> {
        Err(SpecError::YFieldNotFound { node: origin })
    }
}

/// Scale factors evaluate their expression at query time and default to 1.0.
pub struct XScale;

impl Attribute for XScale {
    type Value = f64;

    fn local(node: &dyn Node) -> Option<Result<f64>> {
        node.scope().xscale().map(|s| s.evaluate())
    }

    fn terminal(_origin: NodePath) -> Result<f64> {
        Ok(1.0)
    }
}

pub struct YScale;

impl Attribute for YScale {
    type Value = f64;

    fn local(node: &dyn Node) -> Option<Result<f64>> {
        node.scope().yscale().map(|s| s.evaluate())
    }

    fn terminal(_origin: NodePath) -> Result<f64> {
        Ok(1.0)
    }
}

pub struct PlotType;

impl Attribute for PlotType {
    type Value = String;

    fn local(node: &dyn Node) -> Option<Result<String>> {
        node.plot_type()
            .filter(|t| !t.trim().is_empty())
            .map(|t| Ok(t.to_string()))
    }

    fn terminal(origin: NodePath) -> Result<String> {
        Err(SpecError::PlotTypeNotDefined { node: origin })
    }
}
