//! Lowering phase: Specification tree → ResolvedFigure.
//!
//! Walks the tree in document order and resolves every inherited attribute,
//! stopping at the first failure.

pub mod resolve;

use std::path::Path;

use tracing::debug;

use crate::error::Result;
use crate::ir::types::ResolvedFigure;
use crate::tree::Specification;

/// Resolve every plot and series of `spec`. Output paths are placed under
/// `output_dir`.
pub fn lower(spec: &Specification, output_dir: &Path) -> Result<ResolvedFigure> {
    let plots = spec
        .plots()
        .map(resolve::lower_plot)
        .collect::<Result<Vec<_>>>()?;

    debug!(plots = plots.len(), lifecycle = ?spec.lifecycle(), "lowered specification");

    Ok(ResolvedFigure {
        size: spec.size().map(|(w, h)| [w, h]),
        outputs: spec.output_paths(output_dir),
        plots,
    })
}
