#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use figspec::parse::types::*;
use tempfile::TempDir;

// =============================================================================
// Filesystem
// =============================================================================

/// Temporary directory tree of benchmark result files.
pub struct Workspace {
    pub tmp: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            tmp: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// Create `rel` (and its parents) with placeholder content.
    pub fn file(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, "{\"benchmarks\": []}").unwrap();
        path
    }

    pub fn dir(&self, rel: &str) -> PathBuf {
        let path = self.root().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }
}

// =============================================================================
// Document builders
// =============================================================================

pub fn series(input_file: Option<&str>) -> RawSeries {
    RawSeries {
        input_file: input_file.map(str::to_string),
        ..RawSeries::default()
    }
}

pub fn plot(series: Vec<RawSeries>) -> RawPlot {
    RawPlot {
        series,
        ..RawPlot::default()
    }
}

/// Top-level document with `type: bar` and both axis fields, wrapping the
/// given subplots.
pub fn doc_with_subplots(subplots: Vec<RawPlot>) -> RawSpec {
    RawSpec {
        subplots: Some(subplots),
        plot_type: Some("bar".into()),
        xfield: Some("bytes".into()),
        yfield: Some("real_time".into()),
        ..RawSpec::default()
    }
}

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}
