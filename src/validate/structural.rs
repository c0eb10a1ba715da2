//! Document shape rules (V001–V005, V009, V011).

use std::collections::HashMap;

use super::violation;
use crate::error::Violation;
use crate::parse::types::RawSpec;

/// Run all shape rules. Returns all violations found.
pub fn validate_structural(spec: &RawSpec) -> Vec<Violation> {
    let mut errors = Vec::new();

    v001_declares_plots(spec, &mut errors);
    v002_not_both_forms(spec, &mut errors);
    v003_subplots_non_empty(spec, &mut errors);
    v004_series_non_empty(spec, &mut errors);
    v005_positions_one_based(spec, &mut errors);
    v009_size_positive(spec, &mut errors);
    v011_unique_positions(spec, &mut errors);

    errors
}

fn v001_declares_plots(spec: &RawSpec, errors: &mut Vec<Violation>) {
    if spec.subplots.is_none() && spec.series.is_none() {
        errors.push(violation(
            "V001",
            "Specification must declare either `subplots` or `series`",
            None,
        ));
    }
}

fn v002_not_both_forms(spec: &RawSpec, errors: &mut Vec<Violation>) {
    if spec.subplots.is_some() && spec.series.is_some() {
        errors.push(violation(
            "V002",
            "Top-level `series` is not allowed alongside `subplots`; move it into a subplot",
            Some("series".into()),
        ));
    }
}

fn v003_subplots_non_empty(spec: &RawSpec, errors: &mut Vec<Violation>) {
    if let Some(subplots) = &spec.subplots {
        if subplots.is_empty() {
            errors.push(violation(
                "V003",
                "`subplots` must contain at least one plot",
                Some("subplots".into()),
            ));
        }
    }
}

fn v004_series_non_empty(spec: &RawSpec, errors: &mut Vec<Violation>) {
    if let Some(series) = &spec.series {
        if series.is_empty() {
            errors.push(violation(
                "V004",
                "`series` must contain at least one series",
                Some("series".into()),
            ));
        }
    }
    for (i, plot) in spec.subplots.iter().flatten().enumerate() {
        if plot.series.is_empty() {
            errors.push(violation(
                "V004",
                "`series` must contain at least one series",
                Some(format!("subplots[{}].series", i)),
            ));
        }
    }
}

fn v005_positions_one_based(spec: &RawSpec, errors: &mut Vec<Violation>) {
    for (i, plot) in spec.subplots.iter().flatten().enumerate() {
        let Some([row, col]) = plot.pos else { continue };
        if row == 0 || col == 0 {
            errors.push(violation(
                "V005",
                format!("Subplot position [{}, {}] is not one-based", row, col),
                Some(format!("subplots[{}].pos", i)),
            ));
        }
    }
}

fn v009_size_positive(spec: &RawSpec, errors: &mut Vec<Violation>) {
    let Some([width, height]) = spec.size else { return };
    // NaN fails the comparison too.
    if !(width > 0.0 && height > 0.0) {
        errors.push(violation(
            "V009",
            format!("Figure size [{}, {}] must be positive", width, height),
            Some("size".into()),
        ));
    }
}

fn v011_unique_positions(spec: &RawSpec, errors: &mut Vec<Violation>) {
    let mut seen: HashMap<[u32; 2], usize> = HashMap::new();
    for (i, plot) in spec.subplots.iter().flatten().enumerate() {
        let Some(pos) = plot.pos else { continue };
        if let Some(prev) = seen.insert(pos, i) {
            errors.push(violation(
                "V011",
                format!(
                    "Subplots {} and {} share position [{}, {}]",
                    prev, i, pos[0], pos[1]
                ),
                Some(format!("subplots[{}].pos", i)),
            ));
        }
    }
}
