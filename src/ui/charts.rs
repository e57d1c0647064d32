use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use eframe::egui::{self, Color32, RichText, Ui};
use egui_plot::{
    Bar, BarChart, BoxElem, BoxPlot, BoxSpread, GridMark, Legend, Line, Plot, PlotPoints, Points,
};

use titanic_eda::pipeline::{
    AgeDistribution, CorrelationMatrix, EmbarkationCounts, SurvivalAgeGroup, SurvivalCount,
    SurvivalStatus,
};

use crate::color::{coolwarm, generate_palette, CategoryColors};

const PLOT_HEIGHT: f32 = 260.0;
const BAR_WIDTH: f64 = 0.5;

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Placeholder drawn instead of a chart with nothing to show.
pub fn empty_state(ui: &mut Ui) {
    ui.label(RichText::new("No data for the current selection.").italics().weak());
}

/// A fixed-size, non-interactive plot, like a static figure.
fn figure(id: &str) -> Plot<'static> {
    Plot::new(id)
        .height(PLOT_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
}

/// Axis formatter that names integer positions `0..labels.len()`.
fn categorical_axis(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let pos = mark.value.round();
        if (mark.value - pos).abs() > 1e-6 || pos < 0.0 {
            return String::new();
        }
        labels.get(pos as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// 1. Survival count by gender – grouped bars
// ---------------------------------------------------------------------------

pub fn survival_by_sex(ui: &mut Ui, counts: &[SurvivalCount], colors: &CategoryColors) {
    if counts.is_empty() {
        return empty_state(ui);
    }

    let mut sexes: Vec<&str> = Vec::new();
    for c in counts {
        if !sexes.contains(&c.sex.as_str()) {
            sexes.push(&c.sex);
        }
    }
    let statuses: Vec<SurvivalStatus> = SurvivalStatus::ALL
        .into_iter()
        .filter(|s| counts.iter().any(|c| c.status == *s))
        .collect();
    let width = BAR_WIDTH / sexes.len() as f64;

    let charts: Vec<BarChart> = sexes
        .iter()
        .enumerate()
        .map(|(k, sex)| {
            let offset = (k as f64 - (sexes.len() - 1) as f64 / 2.0) * width;
            let bars = counts
                .iter()
                .filter(|c| c.sex == *sex)
                .filter_map(|c| {
                    let x = statuses.iter().position(|s| *s == c.status)? as f64;
                    Some(Bar::new(x + offset, c.count as f64).width(width))
                })
                .collect();
            BarChart::new(bars).name(*sex).color(colors.color_for(sex))
        })
        .collect();

    let labels = statuses.iter().map(|s| s.label().to_string()).collect();
    figure("survival_by_sex")
        .legend(Legend::default())
        .x_axis_label("Survival Status")
        .y_axis_label("count")
        .x_axis_formatter(categorical_axis(labels))
        .include_y(0.0)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

// ---------------------------------------------------------------------------
// 2. Age distribution – histogram with density curve
// ---------------------------------------------------------------------------

pub fn age_distribution(ui: &mut Ui, dist: &AgeDistribution) {
    if dist.is_empty() {
        return empty_state(ui);
    }

    let color = Color32::from_rgb(76, 114, 176);
    let bars = dist
        .histogram
        .bins
        .iter()
        .map(|bin| Bar::new(bin.center(), bin.count as f64).width(bin.width()))
        .collect();
    let kde: PlotPoints = dist.kde.iter().copied().collect();

    figure("age_distribution")
        .x_axis_label("Age")
        .y_axis_label("Count")
        .include_y(0.0)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color.gamma_multiply(0.6)));
            plot_ui.line(Line::new(kde).color(color).width(2.0));
        });
}

// ---------------------------------------------------------------------------
// 3 & 4. Per-class bars
// ---------------------------------------------------------------------------

fn class_bars(ui: &mut Ui, id: &str, values: &BTreeMap<i64, f64>, y_label: &str, y_max: Option<f64>) {
    if values.is_empty() {
        return empty_state(ui);
    }

    let palette = generate_palette(values.len());
    let bars = values
        .values()
        .zip(palette)
        .enumerate()
        .map(|(i, (value, color))| Bar::new(i as f64, *value).width(BAR_WIDTH).fill(color))
        .collect();
    let labels = values.keys().map(|class| class.to_string()).collect();

    let mut plot = figure(id)
        .x_axis_label("Pclass")
        .y_axis_label(y_label)
        .x_axis_formatter(categorical_axis(labels))
        .include_y(0.0);
    if let Some(max) = y_max {
        plot = plot.include_y(max);
    }
    plot.show(ui, |plot_ui| {
        plot_ui.bar_chart(BarChart::new(bars));
    });
}

pub fn survival_rate_by_class(ui: &mut Ui, rates: &BTreeMap<i64, f64>) {
    class_bars(ui, "survival_rate_by_class", rates, "Survival Rate", Some(1.0));
}

pub fn average_fare_by_class(ui: &mut Ui, fares: &BTreeMap<i64, f64>) {
    class_bars(ui, "average_fare_by_class", fares, "Fare", None);
}

// ---------------------------------------------------------------------------
// 5. Passenger count by embarkation point
// ---------------------------------------------------------------------------

pub fn embarkation(ui: &mut Ui, counts: &EmbarkationCounts) {
    if counts.is_empty() {
        empty_state(ui);
    } else {
        let palette = generate_palette(counts.counts.len());
        let bars = counts
            .counts
            .iter()
            .zip(palette)
            .enumerate()
            .map(|(i, ((port, count), color))| {
                Bar::new(i as f64, *count as f64)
                    .width(BAR_WIDTH)
                    .fill(color)
                    .name(port)
            })
            .collect();
        let labels = counts.counts.iter().map(|(port, _)| port.clone()).collect();

        figure("embarkation")
            .x_axis_label("Embarked")
            .y_axis_label("count")
            .x_axis_formatter(categorical_axis(labels))
            .include_y(0.0)
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
            });
    }

    if counts.missing > 0 {
        ui.label(
            RichText::new(format!(
                "{} passenger(s) without a recorded port are not shown.",
                counts.missing
            ))
            .weak(),
        );
    }
}

// ---------------------------------------------------------------------------
// 6. Box plot of age by survival status
// ---------------------------------------------------------------------------

pub fn age_by_survival(ui: &mut Ui, groups: &[SurvivalAgeGroup]) {
    if groups.iter().all(|g| g.box_stats.is_none()) {
        return empty_state(ui);
    }

    let palette = generate_palette(groups.len());
    let mut boxes = Vec::new();
    let mut outliers = Vec::new();
    for (i, (group, color)) in groups.iter().zip(palette).enumerate() {
        let Some(stats) = &group.box_stats else {
            continue;
        };
        let x = i as f64;
        boxes.push(
            BoxElem::new(
                x,
                BoxSpread::new(
                    stats.lower_whisker,
                    stats.q1,
                    stats.median,
                    stats.q3,
                    stats.upper_whisker,
                ),
            )
            .name(group.status.label())
            .box_width(BAR_WIDTH)
            .whisker_width(BAR_WIDTH / 2.0)
            .fill(color.gamma_multiply(0.6))
            .stroke(egui::Stroke::new(1.5, color)),
        );
        outliers.extend(stats.outliers.iter().map(|age| [x, *age]));
    }
    let labels = groups.iter().map(|g| g.status.label().to_string()).collect();

    figure("age_by_survival")
        .x_axis_label("Survival Status")
        .y_axis_label("Age")
        .x_axis_formatter(categorical_axis(labels))
        .show(ui, |plot_ui| {
            plot_ui.box_plot(BoxPlot::new(boxes));
            if !outliers.is_empty() {
                plot_ui.points(Points::new(outliers).radius(2.5).color(Color32::DARK_GRAY));
            }
        });
}

// ---------------------------------------------------------------------------
// 7. Correlation heatmap
// ---------------------------------------------------------------------------

/// Coloured grid of coefficients; undefined cells stay blank.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    if matrix.is_empty() {
        return empty_state(ui);
    }

    egui::Grid::new("correlation_heatmap")
        .spacing([2.0, 2.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("");
            for name in matrix.columns() {
                ui.strong(name);
            }
            ui.end_row();

            for (i, row_name) in matrix.columns().iter().enumerate() {
                ui.strong(row_name);
                for j in 0..matrix.len() {
                    let text = match matrix.get(i, j) {
                        Some(r) => RichText::new(format!("{r:^7.2}"))
                            .background_color(coolwarm(r))
                            .color(Color32::BLACK),
                        None => RichText::new(format!("{:^7}", "")),
                    };
                    ui.label(text.monospace());
                }
                ui.end_row();
            }
        });
}
