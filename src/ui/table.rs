use eframe::egui::{self, Align, Layout, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Table;

/// Scrollable grid of the filtered rows.
pub fn route_table(ui: &mut Ui, table: &Table) {
    if table.columns().is_empty() {
        ui.label("This route has no columns.");
        return;
    }

    let row_height = egui::TextStyle::Body.resolve(ui.style()).size + 6.0;

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(60.0).clip(true), table.columns().len())
        .max_scroll_height(320.0)
        .header(row_height, |mut header| {
            for name in table.columns() {
                header.col(|ui| {
                    ui.strong(name.as_str());
                });
            }
        })
        .body(|body| {
            body.rows(row_height, table.len(), |mut row| {
                let cells = &table.rows()[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell.to_string());
                    });
                }
            });
        });
}
