use eframe::egui::{Grid, RichText, ScrollArea, Ui};
use egui_plot::{Bar, BarChart, Line, Plot, PlotPoints};

use crate::color::ColorMap;
use crate::data::model::SalesDataset;
use crate::data::present::{build_frame, Metrics, SeriesEntry};
use crate::state::AppState;

const PREVIEW_ROWS: usize = 8;
const CHART_HEIGHT: f32 = 240.0;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the metric tiles, preview table and charts for the current view.
/// The frame is re-derived from the filtered view on every pass.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let dataset = match &state.dataset {
        Some(ds) => ds,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a sales file to view the dashboard  (File → Open…)");
            });
            return;
        }
    };

    let frame = build_frame(dataset, &state.visible_indices, &state.chart_config);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            metric_tiles(ui, &frame.metrics);
            ui.separator();

            preview_table(ui, dataset, &state.visible_indices);
            ui.separator();

            ui.heading(format!("Top {} Products by Revenue", state.chart_config.top_k));
            horizontal_bar_chart(ui, "top_products", &frame.top_products);
            ui.separator();

            ui.heading("Transactions by Country");
            horizontal_bar_chart(ui, "country_counts", &frame.country_counts);
            ui.separator();

            ui.heading("Revenue by Country");
            horizontal_bar_chart(ui, "country_revenue", &frame.country_revenue);
            ui.separator();

            ui.heading("Revenue by Sales Person");
            horizontal_bar_chart(ui, "sales_person_revenue", &frame.sales_person_revenue);
            ui.separator();

            ui.heading("Monthly Revenue");
            line_chart(ui, "monthly_revenue", &frame.monthly_revenue);
        });
}

// ---------------------------------------------------------------------------
// Metric tiles
// ---------------------------------------------------------------------------

fn metric_tiles(ui: &mut Ui, metrics: &Metrics) {
    ui.columns(4, |cols: &mut [Ui]| {
        tile(&mut cols[0], "Transactions", metrics.transactions.to_string());
        tile(&mut cols[1], "Total Revenue", format_money(metrics.total_revenue));
        tile(
            &mut cols[2],
            "Total Boxes",
            group_thousands(metrics.total_boxes.to_string()),
        );
        tile(&mut cols[3], "Products", metrics.distinct_products.to_string());
    });
}

fn tile(ui: &mut Ui, caption: &str, value: String) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.label(RichText::new(value).size(22.0).strong());
        ui.weak(caption);
    });
}

// ---------------------------------------------------------------------------
// Preview table
// ---------------------------------------------------------------------------

fn preview_table(ui: &mut Ui, dataset: &SalesDataset, view: &[usize]) {
    ui.heading("Sales Preview");

    Grid::new("preview_table")
        .striped(true)
        .min_col_width(70.0)
        .show(ui, |ui: &mut Ui| {
            for header in [
                "Sales Person",
                "Country",
                "Product",
                "Date",
                "Month",
                "Amount",
                "Boxes",
                "Price/Box",
            ] {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();

            for &idx in view.iter().take(PREVIEW_ROWS) {
                let record = &dataset.records[idx];
                ui.label(record.sales_person.as_str());
                ui.label(record.country.as_str());
                ui.label(record.product.as_str());
                ui.label(record.date.format("%d-%b-%y").to_string());
                ui.label(record.month.as_str());
                ui.label(format_money(record.amount));
                ui.label(record.boxes_shipped.to_string());
                ui.label(format!("{:.2}", record.price_per_box));
                ui.end_row();
            }
        });
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

/// Horizontal bar chart with the first entry on top, one colour per label.
fn horizontal_bar_chart(ui: &mut Ui, id: &str, entries: &[SeriesEntry]) {
    if entries.is_empty() {
        ui.label("No data for the current filters.");
        return;
    }

    let colors = ColorMap::new(entries.iter().map(|e| e.label.as_str()));
    let n = entries.len();

    let bars: Vec<Bar> = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            Bar::new((n - 1 - i) as f64, entry.value)
                .width(0.6)
                .fill(colors.color_for(&entry.label))
                .name(&entry.label)
                .horizontal()
        })
        .collect();

    // Axis position → label, bottom-up.
    let labels: Vec<String> = entries.iter().rev().map(|e| e.label.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .y_axis_formatter(move |mark, _range| axis_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Line chart over positional x values labelled by series entry.
fn line_chart(ui: &mut Ui, id: &str, entries: &[SeriesEntry]) {
    if entries.is_empty() {
        ui.label("No data for the current filters.");
        return;
    }

    let points: PlotPoints = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| [i as f64, entry.value])
        .collect();

    // Abbreviate month names so the axis stays readable.
    let labels: Vec<String> = entries
        .iter()
        .map(|e| e.label.chars().take(3).collect())
        .collect();

    let line = Line::new(points).name("Revenue").width(2.0);

    Plot::new(id)
        .height(CHART_HEIGHT)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .x_axis_formatter(move |mark, _range| axis_label(&labels, mark.value))
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}

/// Label for an integer axis position; empty for fractional grid marks.
fn axis_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-3 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

fn format_money(value: f64) -> String {
    format!("${}", group_thousands(format!("{value:.2}")))
}

/// Insert thousands separators into a non-negative decimal string.
fn group_thousands(s: String) -> String {
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(f) => format!("{grouped}.{f}"),
        None => grouped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formatting_groups_thousands() {
        assert_eq!(format_money(5320756.5), "$5,320,756.50");
        assert_eq!(format_money(0.0), "$0.00");
        assert_eq!(format_money(999.99), "$999.99");
        assert_eq!(group_thousands("1234567".to_string()), "1,234,567");
    }

    #[test]
    fn axis_labels_only_on_integer_marks() {
        let labels = vec!["Jan".to_string(), "Feb".to_string()];
        assert_eq!(axis_label(&labels, 0.0), "Jan");
        assert_eq!(axis_label(&labels, 1.0), "Feb");
        assert_eq!(axis_label(&labels, 0.5), "");
        assert_eq!(axis_label(&labels, 5.0), "");
        assert_eq!(axis_label(&labels, -1.0), "");
    }
}
