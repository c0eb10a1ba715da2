//! Attribute-level rules (V006–V008, V010), applied at every document level.

use regex::Regex;

use super::violation;
use crate::error::Violation;
use crate::parse::types::{RawLabel, RawScope, RawSeries, RawSpec};

/// Validate every level's attributes. Returns all violations found.
pub fn validate_attributes(spec: &RawSpec) -> Vec<Violation> {
    let mut errors = Vec::new();

    v006_scales_evaluate(&spec.scope(), None, &mut errors);
    v008_output_formats(spec, &mut errors);

    for (j, series) in spec.series.iter().flatten().enumerate() {
        validate_series(series, &format!("series[{}]", j), &mut errors);
    }

    for (i, plot) in spec.subplots.iter().flatten().enumerate() {
        let plot_path = format!("subplots[{}]", i);
        v006_scales_evaluate(&plot.scope(), Some(&plot_path), &mut errors);
        for (j, series) in plot.series.iter().enumerate() {
            validate_series(series, &format!("{}.series[{}]", plot_path, j), &mut errors);
        }
    }

    errors
}

fn validate_series(series: &RawSeries, path: &str, errors: &mut Vec<Violation>) {
    v006_scales_evaluate(&series.scope(), Some(path), errors);
    v007_label_fields(series, path, errors);
    v010_regex_compiles(series, path, errors);
}

fn v006_scales_evaluate(scope: &RawScope, path: Option<&str>, errors: &mut Vec<Violation>) {
    let scales = [("xscale", &scope.xscale), ("yscale", &scope.yscale)];
    for (key, scale) in scales {
        let Some(scale) = scale else { continue };
        if scale.is_blank() {
            continue;
        }
        if let Err(e) = scale.evaluate() {
            let at = match path {
                Some(p) => format!("{}.{}", p, key),
                None => key.to_string(),
            };
            errors.push(violation("V006", e.to_string(), Some(at)));
        }
    }
}

fn v007_label_fields(series: &RawSeries, path: &str, errors: &mut Vec<Violation>) {
    if let Some(RawLabel::Fields { fields, .. }) = &series.label {
        if fields.is_empty() {
            errors.push(violation(
                "V007",
                "Structured label must name at least one field",
                Some(format!("{}.label", path)),
            ));
        }
    }
}

fn v008_output_formats(spec: &RawSpec, errors: &mut Vec<Violation>) {
    for (i, format) in spec.output_format.iter().flatten().enumerate() {
        if format.trim_start_matches('.').trim().is_empty() {
            errors.push(violation(
                "V008",
                "Output format must not be empty",
                Some(format!("output_format[{}]", i)),
            ));
        }
    }
}

fn v010_regex_compiles(series: &RawSeries, path: &str, errors: &mut Vec<Violation>) {
    let Some(pattern) = &series.regex else { return };
    if let Err(e) = Regex::new(pattern) {
        errors.push(violation(
            "V010",
            format!("Invalid series regex '{}': {}", pattern, e),
            Some(format!("{}.regex", path)),
        ));
    }
}
