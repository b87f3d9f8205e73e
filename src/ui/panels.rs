use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::pipeline::RouteView;
use crate::data::summary::Summary;
use crate::error::{AppError, ErrorKind};
use crate::state::{AppState, Status};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – route selector
// ---------------------------------------------------------------------------

/// Render the left route panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Route");
    ui.separator();

    if state.workbook.is_none() {
        ui.label("No workbook loaded.");
        return;
    }

    let routes = state.routes();
    if routes.is_empty() {
        ui.label(RichText::new("This workbook has no sheets.").color(Color32::RED));
        return;
    }

    let current = state.route.clone().unwrap_or_default();
    egui::ComboBox::from_id_salt("route")
        .selected_text(&current)
        .width(ui.available_width())
        .show_ui(ui, |ui: &mut Ui| {
            for route in &routes {
                if ui.selectable_label(current == *route, route).clicked() {
                    state.route = Some(route.clone());
                }
            }
        });

    ui.add_space(8.0);
    ui.label(format!("{} route(s)", routes.len()));
}

// ---------------------------------------------------------------------------
// Central panel – keyword, table, metrics, chart, download
// ---------------------------------------------------------------------------

/// Render the page for the selected route.
pub fn route_page(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.label(format!("Keyword ({})", state.roles.place));
        ui.add(
            egui::TextEdit::singleline(&mut state.keyword)
                .hint_text("part of a place name")
                .desired_width(240.0),
        );
    });
    ui.separator();

    let view = match state.view() {
        Some(Ok(view)) => view,
        Some(Err(e)) => {
            error_block(ui, &e);
            return;
        }
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a workbook to view routes  (File → Open…)");
            });
            return;
        }
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading(format!("📍 {} route data", view.route));
            ui.push_id(&view.route, |ui: &mut Ui| {
                table::route_table(ui, &view.table);
            });
            if view.table.is_empty() && !state.keyword.is_empty() {
                ui.label(format!("No place name contains \"{}\".", state.keyword));
            }
            ui.add_space(12.0);

            summary_metrics(ui, &view.summary, &state.roles.mileage);
            ui.add_space(12.0);

            if let Some(chart) = &view.chart {
                ui.heading(format!("{} vs. {}", chart.x_field, chart.y_field));
                plot::mileage_chart(ui, chart);
                ui.add_space(12.0);
            }

            if ui.button("⬇ Download filtered rows (CSV)").clicked() {
                save_file_dialog(state, &view);
            }
        });
}

fn summary_metrics(ui: &mut Ui, summary: &Summary, mileage_column: &str) {
    ui.columns(2, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Rows", &summary.row_count.to_string());
        if let Some(max) = summary.max_mileage {
            let value = max.map(format_number).unwrap_or_else(|| "n/a".to_string());
            metric(&mut cols[1], &format!("Max {mileage_column} (km)"), &value);
        }
    });
}

fn metric(ui: &mut Ui, label: &str, value: &str) {
    ui.vertical(|ui: &mut Ui| {
        ui.label(RichText::new(label).weak());
        ui.label(RichText::new(value).size(28.0).strong());
    });
}

fn format_number(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        v.to_string()
    }
}

/// Blocking error: the section it concerns, and everything after it, is not
/// drawn.
pub fn error_block(ui: &mut Ui, e: &AppError) {
    ui.add_space(8.0);
    ui.label(RichText::new(e.to_string()).color(Color32::RED).strong());
    let hint = match e.kind() {
        ErrorKind::InputMissing => "Open a workbook with File → Open… or drop one onto the window.",
        ErrorKind::Parse => "Open an Excel (.xlsx, .xls) or OpenDocument (.ods) workbook.",
        ErrorKind::Schema => "Pick another route or clear the keyword.",
        ErrorKind::Export => "The filtered rows could not be exported.",
    };
    ui.label(hint);
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(label) = &state.source_label {
            ui.label(label);
        }

        ui.separator();

        match &state.status {
            Some(Status::Info(msg)) => {
                ui.label(msg);
            }
            Some(Status::Error(msg)) => {
                ui.label(RichText::new(format!("Error: {msg}")).color(Color32::RED));
            }
            None => {}
        }
    });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open mileage workbook")
        .add_filter("Spreadsheets", &["xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("OpenDocument", &["ods"])
        .pick_file();

    if let Some(path) = file {
        state.open_path(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState, view: &RouteView) {
    let file = rfd::FileDialog::new()
        .set_title("Save filtered rows")
        .set_file_name(&view.file_name)
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        state.save_csv(view, &path);
    }
}
