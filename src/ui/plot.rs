use eframe::egui::{RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, LineStyle, Plot, PlotPoints, Points};

use diamond_dash::view::{Chart, SeriesStyle, ViewOutput};

use crate::color::ColorMap;
use crate::state::AppState;
use crate::ui::table;

// ---------------------------------------------------------------------------
// Central panel: whatever the current view produced
// ---------------------------------------------------------------------------

/// Render the current view output in the central panel.
pub fn view_output(ui: &mut Ui, state: &AppState) {
    ui.heading(state.view.to_string());
    ui.separator();

    match &state.output {
        ViewOutput::Charts(charts) => {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui: &mut Ui| {
                    for (idx, chart) in charts.iter().enumerate() {
                        chart_plot(ui, idx, chart);
                        ui.add_space(12.0);
                    }
                });
        }
        ViewOutput::Table { caption, table } => {
            ui.label(caption);
            ui.add_space(4.0);
            table::record_table(ui, table);
        }
        ViewOutput::Empty { reason } => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(format!("No data\n{reason}"));
            });
        }
        ViewOutput::Unavailable { missing } => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading(format!(
                    "The {missing} dataset is not loaded  (File → Open data folder…)"
                ));
            });
        }
    }
}

// ---------------------------------------------------------------------------
// One chart
// ---------------------------------------------------------------------------

fn chart_plot(ui: &mut Ui, idx: usize, chart: &Chart) {
    ui.strong(&chart.title);
    for note in &chart.notes {
        ui.label(RichText::new(note).italics());
    }
    if chart.series.is_empty() {
        return;
    }

    let colors = ColorMap::new(chart.series.iter().map(|s| s.color_key.as_str()));

    Plot::new(format!("chart_{idx}"))
        .legend(Legend::default())
        .x_axis_label("Year")
        .y_axis_label(&chart.y_label)
        .height(320.0)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(false)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for series in &chart.series {
                let color = colors.color_for(&series.color_key);
                let coords: Vec<[f64; 2]> = series
                    .points
                    .iter()
                    .map(|&(year, value)| [year as f64, value])
                    .collect();

                match series.style {
                    SeriesStyle::Bars => {
                        let bars: Vec<Bar> = coords
                            .iter()
                            .map(|&[x, y]| Bar::new(x, y).width(0.6))
                            .collect();
                        plot_ui.bar_chart(BarChart::new(bars).name(&series.name).color(color));
                    }
                    SeriesStyle::Points => {
                        let points = PlotPoints::new(coords);
                        plot_ui.points(
                            Points::new(points)
                                .name(&series.name)
                                .color(color)
                                .radius(2.5),
                        );
                    }
                    SeriesStyle::Line | SeriesStyle::Predicted => {
                        let markers = PlotPoints::new(coords.clone());
                        let points = PlotPoints::new(coords);
                        let mut line = Line::new(points).name(&series.name).color(color).width(1.5);
                        if series.style == SeriesStyle::Predicted {
                            line = line.style(LineStyle::dashed_loose());
                        }
                        plot_ui.line(line);
                        plot_ui.points(
                            Points::new(markers)
                                .name(&series.name)
                                .color(color)
                                .radius(3.0),
                        );
                    }
                }
            }
        });
}
