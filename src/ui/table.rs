use eframe::egui::{self, Ui};
use egui_extras::{Column as TableColumn, TableBuilder};

use titanic_eda::{PassengerRecord, Schema};

const ROW_HEIGHT: f32 = 18.0;

/// Render passengers as a table: the row index followed by every schema column.
pub fn records_table(ui: &mut Ui, id: &str, schema: &Schema, records: &[PassengerRecord]) {
    let columns: Vec<&str> = schema.names().collect();

    ui.push_id(id, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .vscroll(true)
            .max_scroll_height(320.0)
            .column(TableColumn::auto())
            .columns(TableColumn::auto().at_least(48.0), columns.len())
            .header(ROW_HEIGHT + 4.0, |mut header| {
                header.col(|ui: &mut Ui| {
                    ui.strong("");
                });
                for name in &columns {
                    header.col(|ui: &mut Ui| {
                        ui.strong(*name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, records.len(), |mut row| {
                    let rec = &records[row.index()];
                    row.col(|ui: &mut Ui| {
                        ui.label(egui::RichText::new(rec.index.to_string()).weak());
                    });
                    for name in &columns {
                        row.col(|ui: &mut Ui| {
                            ui.label(rec.cell(name).to_string());
                        });
                    }
                });
            });
    });
}
