//! Per-node lowering: plot and series views → resolved IR nodes.

use crate::error::Result;
use crate::ir::types::*;
use crate::parse::types::RawLabel;
use crate::tree::{PlotNode, SeriesNode};

pub fn lower_plot(plot: PlotNode<'_>) -> Result<ResolvedPlot> {
    let plot_type = plot.resolve_type()?;
    let series = plot
        .series_nodes()
        .map(|s| lower_series(&s))
        .collect::<Result<Vec<_>>>()?;

    Ok(ResolvedPlot {
        pos: plot.pos().map(|(row, col)| [row, col]),
        plot_type,
        title: plot.title().map(str::to_string),
        xaxis: plot.x_axis().cloned(),
        yaxis: plot.y_axis().cloned(),
        series,
    })
}

pub fn lower_series(series: &SeriesNode<'_>) -> Result<ResolvedSeries> {
    Ok(ResolvedSeries {
        input_file: series.resolve_input_file()?,
        xfield: series.resolve_x_field()?,
        yfield: series.resolve_y_field()?,
        xscale: series.resolve_x_scale()?,
        yscale: series.resolve_y_scale()?,
        color: series.color().map(str::to_string),
        label: label_rule(series),
        regex: series.regex().map(str::to_string),
    })
}

fn label_rule(series: &SeriesNode<'_>) -> LabelRule {
    match series.label() {
        Some(RawLabel::Text(text)) => LabelRule::Literal { text: text.clone() },
        Some(RawLabel::Fields { .. }) => LabelRule::Fields {
            fields: series.label_fields().to_vec(),
            separator: series.label_separator().to_string(),
        },
        None => LabelRule::Default,
    }
}
