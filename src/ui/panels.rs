use eframe::egui::{self, Color32, RichText, Ui};
use egui_extras::DatePickerButton;

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – date range
// ---------------------------------------------------------------------------

/// Render the left panel: date range picker and selection size.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Bike Rentals");
    ui.separator();

    ui.strong("Date range");
    let mut changed = false;
    egui::Grid::new("date_range")
        .num_columns(2)
        .spacing([8.0, 6.0])
        .show(ui, |ui: &mut Ui| {
            ui.label("From");
            changed |= ui
                .add(DatePickerButton::new(&mut state.start).id_salt("range_start"))
                .changed();
            ui.end_row();

            ui.label("To");
            changed |= ui
                .add(DatePickerButton::new(&mut state.end).id_salt("range_end"))
                .changed();
            ui.end_row();
        });

    if ui.small_button("Full range").clicked() {
        state.reset_range();
    } else if changed {
        state.recompute();
    }

    if let Some(msg) = &state.input_error {
        ui.add_space(4.0);
        ui.label(RichText::new(msg).color(Color32::RED));
    }

    ui.separator();
    ui.label(format!(
        "Selected: {} days, {} rows",
        state.selected_days, state.working_rows
    ));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar with the dataset summary.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();
        ui.strong(state.dataset_summary());
        ui.label(RichText::new(&state.dataset.origin).small());

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open folder with day.csv and hour.csv")
        .pick_folder();

    if let Some(dir) = folder {
        state.load_folder(&dir);
    }
}
