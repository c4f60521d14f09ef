use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use diamond_dash::view::RecordTable;

/// Striped, resizable table of filtered records.
pub fn record_table(ui: &mut Ui, table: &RecordTable) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(48.0), table.columns.len())
        .header(22.0, |mut header| {
            for name in &table.columns {
                header.col(|ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(20.0, table.rows.len(), |mut row| {
                let cells = &table.rows[row.index()];
                for cell in cells {
                    row.col(|ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
