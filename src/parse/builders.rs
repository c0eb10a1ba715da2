//! Programmatic document construction for the quick bar-chart command.

use super::types::{AxisScale, RawAxis, RawSeries, RawSpec};

/// Options for a single-series bar chart over one benchmark file.
#[derive(Debug, Clone, Default)]
pub struct BarChart {
    pub benchmark: String,
    pub x_field: Option<String>,
    pub y_field: Option<String>,
    pub name_regex: Option<String>,
}

/// Build the document for a bar chart of `opts.benchmark`.
///
/// The fields are set on the series and reused as axis labels; the y axis
/// is log-scaled. A name regex filters the series and doubles as the title.
pub fn bar_chart(opts: &BarChart) -> RawSpec {
    let mut series = RawSeries {
        input_file: Some(opts.benchmark.clone()),
        ..RawSeries::default()
    };
    let mut spec = RawSpec {
        plot_type: Some("bar".to_string()),
        ..RawSpec::default()
    };

    if let Some(x) = &opts.x_field {
        series.xfield = Some(x.clone());
        spec.xaxis = Some(RawAxis {
            label: Some(x.clone()),
            ..RawAxis::default()
        });
    }
    if let Some(y) = &opts.y_field {
        series.yfield = Some(y.clone());
        spec.yaxis = Some(RawAxis {
            label: Some(y.clone()),
            scale: Some(AxisScale::Log),
            lim: None,
        });
    }
    if let Some(re) = &opts.name_regex {
        series.regex = Some(re.clone());
        spec.title = Some(re.clone());
    }

    spec.series = Some(vec![series]);
    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_benchmark_has_one_series_and_no_axes() {
        let spec = bar_chart(&BarChart {
            benchmark: "bench.json".into(),
            ..BarChart::default()
        });
        assert_eq!(spec.plot_type.as_deref(), Some("bar"));
        assert!(spec.xaxis.is_none());
        assert!(spec.yaxis.is_none());
        let series = spec.series.expect("series");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].input_file.as_deref(), Some("bench.json"));
    }

    #[test]
    fn fields_become_axis_labels() {
        let spec = bar_chart(&BarChart {
            benchmark: "bench.json".into(),
            x_field: Some("bytes".into()),
            y_field: Some("real_time".into()),
            name_regex: Some("BM_Copy.*".into()),
        });
        assert_eq!(spec.title.as_deref(), Some("BM_Copy.*"));
        let yaxis = spec.yaxis.expect("yaxis");
        assert_eq!(yaxis.label.as_deref(), Some("real_time"));
        assert_eq!(yaxis.scale, Some(AxisScale::Log));
        let series = &spec.series.expect("series")[0];
        assert_eq!(series.xfield.as_deref(), Some("bytes"));
        assert_eq!(series.regex.as_deref(), Some("BM_Copy.*"));
    }
}
