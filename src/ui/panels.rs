use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::data::model::Dimension;
use crate::state::AppState;
use crate::ui::format;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel: one multiselect per dimension.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Please Filter Here:");
    ui.separator();

    // Clone the option lists so we can mutate state inside the loop.
    let dataset = state.dataset.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dim in Dimension::ALL {
                let all_values = dataset.distinct_values(dim);
                let n_selected = all_values
                    .iter()
                    .filter(|v| state.selection.is_selected(dim, v))
                    .count();
                let header_text = format!("Select the {}:  ({n_selected}/{})", dim.label(), all_values.len());

                egui::CollapsingHeader::new(RichText::new(header_text).strong())
                    .id_salt(dim.column())
                    .default_open(true)
                    .show(ui, |ui: &mut Ui| {
                        ui.horizontal(|ui: &mut Ui| {
                            if ui.small_button("All").clicked() {
                                state.select_all(dim);
                            }
                            if ui.small_button("None").clicked() {
                                state.select_none(dim);
                            }
                        });

                        for value in all_values {
                            let mut checked = state.selection.is_selected(dim, value);
                            if ui.checkbox(&mut checked, value.as_str()).changed() {
                                state.toggle_value(dim, value);
                            }
                        }
                    });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with row counts.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("📊 Sales Dashboard");
        ui.separator();
        ui.label(format!(
            "{} transactions loaded, {} selected",
            state.dataset.len(),
            state.view.kpis.transactions
        ));
    });
}

// ---------------------------------------------------------------------------
// KPI row
// ---------------------------------------------------------------------------

/// Three KPI panels side by side.
pub fn kpi_row(ui: &mut Ui, state: &AppState) {
    let kpis = &state.view.kpis;
    let panels = [
        ("Total Sales:", format::total_sales_text(kpis)),
        ("Average Rating:", format::rating_text(kpis)),
        ("Average Sales Per Transaction:", format::average_sale_text(kpis)),
    ];

    ui.columns(panels.len(), |columns: &mut [Ui]| {
        for (col, (title, value)) in columns.iter_mut().zip(panels.iter()) {
            col.label(RichText::new(*title).size(18.0).strong());
            col.label(RichText::new(value).size(22.0));
        }
    });
}
