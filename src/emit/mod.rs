//! Dependency emission: the set of files a figure depends on, as a `make` rule.

mod writer;

use std::collections::BTreeSet;
use std::path::Path;

use tracing::debug;

use crate::error::{Result, SpecError};
use crate::tree::Specification;
use writer::RuleWriter;

/// Render the dependency rule for `target` over `deps`, in the given order.
pub fn dependency_rule<S: AsRef<str>>(target: &str, deps: &[S]) -> String {
    let mut w = RuleWriter::new(target);
    for dep in deps {
        w.prerequisite(dep.as_ref());
    }
    w.finish()
}

impl Specification {
    /// Every resolved input file, deduplicated and sorted byte-wise, so that
    /// an unchanged specification always yields the same list.
    pub fn dependencies(&self) -> Result<Vec<String>> {
        let mut deps = BTreeSet::new();
        for file in self.collect_input_files() {
            deps.insert(file?.display().to_string());
        }
        if deps.is_empty() {
            return Err(SpecError::NoInputFiles);
        }
        Ok(deps.into_iter().collect())
    }

    /// The `make` rule making `target` depend on every input file.
    pub fn dependency_rule(&self, target: &str) -> Result<String> {
        Ok(dependency_rule(target, &self.dependencies()?))
    }

    /// Write the dependency rule for `target` to `path`. Nothing is written
    /// if any series fails to resolve.
    pub fn save_dependency_file(&self, path: &Path, target: &str) -> Result<()> {
        let rule = self.dependency_rule(target)?;
        debug!(path = %path.display(), rule_target = target, "writing dependency file");
        std::fs::write(path, rule).map_err(|e| SpecError::Io {
            path: path.to_owned(),
            source: e,
        })
    }
}
