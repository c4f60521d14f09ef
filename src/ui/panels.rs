use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use diamond_dash::view::{DIVISION_OPTIONS, DashboardView, LEAGUE_OPTIONS};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – selection widgets
// ---------------------------------------------------------------------------

/// Render the left selection panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Selection");
    ui.separator();

    ui.label(format!(
        "Seasons: {}–{}",
        state.selection.start_year, state.selection.end_year
    ));
    ui.add_space(4.0);

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if state.view == DashboardView::YearlyStats {
                yearly_selectors(ui, state);
                ui.separator();
            }

            ui.strong("Featured players");
            for player in &state.config.featured_players {
                ui.label(format!("{}  ({})", player.name, player.id));
            }
            ui.add_space(4.0);
            ui.strong("Featured team");
            ui.label(format!(
                "{}  ({})",
                state.config.featured_team.name, state.config.featured_team.id
            ));
        });
}

/// Year / league / division pickers for the yearly stats table.
fn yearly_selectors(ui: &mut Ui, state: &mut AppState) {
    let years = state.selectable_years();
    let shown_year = state.selection.year.or_else(|| years.last().copied());

    let mut new_year = None;
    let mut new_league = None;
    let mut new_division = None;

    ui.strong("Select Year");
    egui::ComboBox::from_id_salt("year")
        .selected_text(shown_year.map(|y| y.to_string()).unwrap_or_default())
        .show_ui(ui, |ui: &mut Ui| {
            for year in &years {
                if ui
                    .selectable_label(shown_year == Some(*year), year.to_string())
                    .clicked()
                {
                    new_year = Some(*year);
                }
            }
        });

    ui.strong("Select League");
    if let Some(choice) = option_combo(
        ui,
        "league",
        state.selection.league.as_deref(),
        &LEAGUE_OPTIONS,
    ) {
        new_league = Some(choice);
    }

    ui.strong("Select Division");
    if let Some(choice) = option_combo(
        ui,
        "division",
        state.selection.division.as_deref(),
        &DIVISION_OPTIONS,
    ) {
        new_division = Some(choice);
    }

    if let Some(year) = new_year {
        state.set_year(Some(year));
    }
    if let Some(league) = new_league {
        state.set_league(league);
    }
    if let Some(division) = new_division {
        state.set_division(division);
    }
}

/// "All" plus fixed options. Returns `Some(choice)` when the user picks one;
/// the inner `None` stands for "All".
fn option_combo(
    ui: &mut Ui,
    id: &str,
    current: Option<&str>,
    options: &[&str],
) -> Option<Option<String>> {
    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .selected_text(current.unwrap_or("All"))
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(current.is_none(), "All").clicked() {
                picked = Some(None);
            }
            for option in options {
                if ui
                    .selectable_label(current == Some(*option), *option)
                    .clicked()
                {
                    picked = Some(Some(option.to_string()));
                }
            }
        });
    picked
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open data folder…").clicked() {
                open_folder_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();

        let current = state.view;
        let mut picked = None;
        egui::ComboBox::from_id_salt("view")
            .selected_text(current.to_string())
            .show_ui(ui, |ui: &mut Ui| {
                for view in DashboardView::ALL {
                    if ui
                        .selectable_label(current == view, view.to_string())
                        .clicked()
                    {
                        picked = Some(view);
                    }
                }
            });
        if let Some(view) = picked {
            state.set_view(view);
        }

        ui.separator();

        ui.label(format!(
            "{} records loaded from {}",
            state.datasets.len(),
            state.data_dir.display()
        ));

        for issue in &state.load_issues {
            ui.separator();
            ui.label(RichText::new(format!("Error: {issue}")).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Folder dialog
// ---------------------------------------------------------------------------

pub fn open_folder_dialog(state: &mut AppState) {
    let folder = rfd::FileDialog::new()
        .set_title("Open Lahman data folder")
        .set_directory(&state.data_dir)
        .pick_folder();

    if let Some(path) = folder {
        log::info!("Switching data folder to {}", path.display());
        state.set_data_dir(path);
    }
}
