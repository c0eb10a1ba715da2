//! Integration tests for document validation rules (V001–V011).

use figspec::parse::{self, RawLabel, RawScale};
use figspec::validate;

mod helpers;
use helpers::*;

fn codes(spec: &figspec::parse::RawSpec) -> Vec<&'static str> {
    validate::validate_document(spec).iter().map(|v| v.code).collect()
}

#[test]
fn fixtures_pass() {
    for name in ["single_plot.yaml", "single_plot_explicit.yaml", "subplots.json"] {
        let spec = parse::parse_file(&fixture(name)).unwrap();
        let violations = validate::validate_document(&spec);
        assert!(violations.is_empty(), "{}: {:?}", name, violations);
    }
}

#[test]
fn all_violations_are_reported_together() {
    let spec = parse::parse_file(&fixture("invalid.yaml")).unwrap();
    let found = codes(&spec);
    for code in ["V002", "V003", "V004", "V006", "V008", "V009"] {
        assert!(found.contains(&code), "missing {}: {:?}", code, found);
    }

    let err = validate::validate(spec).unwrap_err();
    assert_eq!(err.code(), "V000");
    assert_eq!(err.violations().len(), found.len());
}

#[test]
fn v001_empty_document() {
    let spec = parse::parse_yaml("type: bar\n").unwrap();
    assert_eq!(codes(&spec), vec!["V001"]);
}

#[test]
fn v004_subplot_without_series() {
    let spec = doc_with_subplots(vec![plot(vec![series(Some("a.json"))]), plot(vec![])]);
    let violations = validate::validate_document(&spec);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code, "V004");
    assert_eq!(violations[0].path.as_deref(), Some("subplots[1].series"));
}

#[test]
fn v005_zero_position() {
    let mut p = plot(vec![series(Some("a.json"))]);
    p.pos = Some([0, 1]);
    assert_eq!(codes(&doc_with_subplots(vec![p])), vec!["V005"]);
}

#[test]
fn v006_scale_is_checked_at_every_level() {
    let mut s = series(Some("a.json"));
    s.yscale = Some(RawScale::Expr("1/".into()));
    let mut p = plot(vec![s]);
    p.xscale = Some(RawScale::Expr("os.system".into()));

    let violations = validate::validate_document(&doc_with_subplots(vec![p]));
    let paths: Vec<_> = violations.iter().filter_map(|v| v.path.as_deref()).collect();
    assert_eq!(paths, vec!["subplots[0].xscale", "subplots[0].series[0].yscale"]);
    assert!(violations.iter().all(|v| v.code == "V006"));
}

#[test]
fn v006_blank_scale_is_unset_not_invalid() {
    let mut s = series(Some("a.json"));
    s.xscale = Some(RawScale::Expr("".into()));
    assert!(codes(&doc_with_subplots(vec![plot(vec![s])])).is_empty());
}

#[test]
fn v007_structured_label_without_fields() {
    let mut s = series(Some("a.json"));
    s.label = Some(RawLabel::Fields {
        fields: vec![],
        separator: None,
    });
    assert_eq!(codes(&doc_with_subplots(vec![plot(vec![s])])), vec!["V007"]);
}

#[test]
fn v010_bad_regex() {
    let mut s = series(Some("a.json"));
    s.regex = Some("BM_(".into());
    assert_eq!(codes(&doc_with_subplots(vec![plot(vec![s])])), vec!["V010"]);
}

#[test]
fn v011_shared_position() {
    let mut a = plot(vec![series(Some("a.json"))]);
    let mut b = plot(vec![series(Some("b.json"))]);
    a.pos = Some([1, 2]);
    b.pos = Some([1, 2]);
    assert_eq!(codes(&doc_with_subplots(vec![a, b])), vec!["V011"]);
}

#[test]
fn violation_message_snapshot() {
    let spec = parse::parse_yaml("type: bar\n").unwrap();
    let err = validate::validate(spec).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"specification failed structural validation: [V001] Specification must declare either `subplots` or `series`"
    );
}

#[test]
fn v006_deeply_nested_scale_is_rejected() {
    let yaml = format!(
        "type: bar\nyscale: \"{}1{}\"\nseries: [{{input_file: a.json}}]\n",
        "(".repeat(200_000),
        ")".repeat(200_000)
    );
    let spec = parse::parse_yaml(&yaml).unwrap();
    let violations = validate::validate_document(&spec);
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].code, "V006");
    assert_eq!(violations[0].path.as_deref(), Some("yscale"));
}
