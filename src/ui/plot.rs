use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, Points};

use crate::data::chart::{ChartSpec, CHART_HEIGHT};

// ---------------------------------------------------------------------------
// Mileage chart (central panel)
// ---------------------------------------------------------------------------

/// Draw mileage position against transport distance as a point-marked line.
/// Hovering a point shows its row's tooltip.
pub fn mileage_chart(ui: &mut Ui, chart: &ChartSpec) {
    let xy: Vec<[f64; 2]> = chart.points.iter().map(|p| [p.x, p.y]).collect();
    let color = Color32::from_rgb(76, 120, 168);

    Plot::new("mileage_chart")
        .height(CHART_HEIGHT)
        .x_axis_label(chart.x_field.as_str())
        .y_axis_label(chart.y_field.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .label_formatter(|_name, value| match chart.point_at(value.x, value.y) {
            Some(point) => point
                .tooltip
                .iter()
                .map(|(column, text)| format!("{column}: {text}"))
                .collect::<Vec<_>>()
                .join("\n"),
            None => format!("{:.1}, {:.1}", value.x, value.y),
        })
        .show(ui, |plot_ui| {
            let line = Line::new(PlotPoints::from(xy.clone()))
                .color(color)
                .width(2.0);
            let points = Points::new(PlotPoints::from(xy))
                .color(color)
                .radius(4.0);
            plot_ui.line(line);
            plot_ui.points(points);
        });
}
