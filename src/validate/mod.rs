//! Document-level validation phase (pre-tree).
//!
//! Checks the raw document before it is turned into a `Specification`.
//! Every rule runs; all violations are reported together.

pub mod series_rules;
pub mod structural;

use crate::error::{Result, SpecError, Violation};
use crate::parse::types::RawSpec;

/// A raw document that passed [`validate`]. The only way to build a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedSpec(RawSpec);

impl ValidatedSpec {
    pub fn get(&self) -> &RawSpec {
        &self.0
    }

    pub fn into_inner(self) -> RawSpec {
        self.0
    }
}

/// Run every rule against the document. Returns all violations found.
pub fn validate_document(spec: &RawSpec) -> Vec<Violation> {
    let mut violations = structural::validate_structural(spec);
    violations.extend(series_rules::validate_attributes(spec));
    violations
}

/// Validate a raw document, failing with `StructuralValidation` if any rule
/// is violated.
pub fn validate(spec: RawSpec) -> Result<ValidatedSpec> {
    let violations = validate_document(&spec);
    if !violations.is_empty() {
        return Err(SpecError::StructuralValidation(violations));
    }
    Ok(ValidatedSpec(spec))
}

pub(crate) fn violation(
    code: &'static str,
    message: impl Into<String>,
    path: Option<String>,
) -> Violation {
    Violation {
        code,
        message: message.into(),
        path,
    }
}
