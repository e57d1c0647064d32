use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use titanic_eda::state::AppState;
use titanic_eda::Choice;

use crate::color::CategoryColors;
use crate::ui::{charts, table};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    // Clone what we need so we can mutate state after the widgets.
    let options = state.options.clone();
    let mut sex = state.selection().sex.clone();
    let mut pclass = state.selection().pclass.clone();

    ui.strong("Select Gender");
    egui::ComboBox::from_id_salt("select_gender")
        .selected_text(sex.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in &options.sex {
                ui.selectable_value(&mut sex, opt.clone(), opt.to_string());
            }
        });
    ui.add_space(6.0);

    ui.strong("Select Passenger Class");
    egui::ComboBox::from_id_salt("select_pclass")
        .selected_text(pclass.to_string())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in &options.pclass {
                ui.selectable_value(&mut pclass, opt.clone(), opt.to_string());
            }
        });

    if sex != state.selection().sex {
        state.select_sex(sex);
    }
    if pclass != state.selection().pclass {
        state.select_pclass(pclass);
    }

    ui.separator();
    let dashboard = state.dashboard();
    ui.label(format!(
        "{} of {} passengers match",
        dashboard.matched_rows, dashboard.total_rows
    ));
}

// ---------------------------------------------------------------------------
// Central panel – raw data, preview and the seven charts
// ---------------------------------------------------------------------------

/// Render the scrolling dashboard body.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("🚢 Titanic Data Analytics Dashboard");
    ui.checkbox(&mut state.show_raw_data, "Show Raw Data");

    let sex_colors = CategoryColors::new(state.options.sex.iter().filter_map(|c| match c {
        Choice::All => None,
        Choice::Only(s) => Some(s.as_str()),
    }));

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if state.show_raw_data {
                let dataset = state.dataset();
                table::records_table(ui, "raw_data", dataset.schema(), dataset.records());
                ui.separator();
            }

            let dashboard = state.dashboard();
            let summaries = &dashboard.summaries;

            section(ui, "🔍 Filtered Data Preview");
            if dashboard.preview.is_empty() {
                charts::empty_state(ui);
            } else {
                table::records_table(ui, "preview", state.dataset().schema(), &dashboard.preview);
            }

            section(ui, "📊 Survival Count by Gender");
            charts::survival_by_sex(ui, &summaries.survival_by_sex, &sex_colors);

            section(ui, "🎂 Age Distribution");
            charts::age_distribution(ui, &summaries.age_distribution);

            section(ui, "🏷️ Survival Rate by Passenger Class");
            charts::survival_rate_by_class(ui, &summaries.survival_rate_by_class);

            section(ui, "💰 Average Fare by Class");
            charts::average_fare_by_class(ui, &summaries.average_fare_by_class);

            section(ui, "🧭 Passenger Count by Embarkation Point");
            charts::embarkation(ui, &summaries.embarkation);

            section(ui, "📦 Age Distribution by Survival Status");
            charts::age_by_survival(ui, &summaries.age_by_survival);

            section(ui, "📌 Feature Correlation Heatmap");
            charts::correlation_heatmap(ui, &summaries.correlation);
        });
}

fn section(ui: &mut Ui, title: &str) {
    ui.add_space(12.0);
    ui.label(RichText::new(title).heading());
    ui.add_space(4.0);
}

// ---------------------------------------------------------------------------
// Fatal start-up error
// ---------------------------------------------------------------------------

/// The only thing drawn when the dataset could not be loaded.
pub fn fatal_error(ui: &mut Ui, message: &str) {
    ui.centered_and_justified(|ui: &mut Ui| {
        ui.label(RichText::new(message).color(Color32::RED).heading());
    });
}
