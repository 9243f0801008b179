//! Overtime log panel: own logs plus the verification queue for
//! management roles.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CHECK, PLUS, PROHIBIT, X};

use super::app::{App, ConfirmAction};
use super::components::{
    action_button, back_button, colors, danger_action_button, panel_header, primary_button_with_icon, status_color,
    styled_button, styled_button_with_icon,
};
use crate::models::overtime::{CreateOvertimeLog, OvertimeStatus};
use crate::validate;

/// Show the overtime panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Overtime Logs");

    let is_management = app.role().map(|r| r.is_management()).unwrap_or(false);

    // Toolbar
    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Log Overtime").clicked() {
            app.overtime_form.reset();
            app.overtime_form.is_open = true;
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_overtime();
        }
    });

    ui.add_space(10.0);

    // Status filter
    ui.horizontal(|ui| {
        ui.label("Status:");
        if ui
            .selectable_label(app.overtime_status_filter.is_none(), "All")
            .clicked()
        {
            app.overtime_status_filter = None;
        }
        for status in [
            OvertimeStatus::Pending,
            OvertimeStatus::Ongoing,
            OvertimeStatus::Approved,
            OvertimeStatus::Rejected,
            OvertimeStatus::Cancelled,
        ] {
            if ui
                .selectable_label(app.overtime_status_filter == Some(status), status.to_string())
                .clicked()
            {
                app.overtime_status_filter = Some(status);
            }
        }
    });

    ui.add_space(15.0);

    if app.is_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading overtime logs...");
        });
        return go_back;
    }

    show_table(app, ui, is_management);

    if app.overtime_form.is_open {
        show_form_dialog(app, ui.ctx());
    }

    go_back
}

fn show_table(app: &mut App, ui: &mut Ui, is_management: bool) {
    let own_username = app.session.as_ref().map(|s| s.username.clone()).unwrap_or_default();

    let filtered: Vec<_> = app
        .overtime_logs
        .iter()
        .filter(|o| app.overtime_status_filter.map(|s| o.status == s).unwrap_or(true))
        .cloned()
        .collect();

    ui.label(format!(
        "Showing {} of {} logs",
        filtered.len(),
        app.overtime_logs.len()
    ));

    ui.add_space(10.0);

    ScrollArea::vertical().id_salt("overtime_scroll").show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("overtime_grid")
            .num_columns(8)
            .striped(true)
            .min_col_width(50.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("Username");
                ui.strong("Date");
                ui.strong("Start");
                ui.strong("Hours");
                ui.strong("Reason");
                ui.strong("Verifier");
                ui.strong("Status");
                ui.strong("Actions");
                ui.end_row();

                for log in &filtered {
                    ui.label(&log.user_id);
                    ui.label(log.date_overtime.to_string());
                    ui.label(format!("{:02}:00", log.start_hour));
                    ui.label(log.duration.to_string());
                    ui.label(&log.reason);
                    ui.label(log.verifier.as_deref().unwrap_or("-"));
                    ui.colored_label(status_color(&log.status.to_string()), log.status.to_string());

                    ui.horizontal(|ui| {
                        if log.status == OvertimeStatus::Pending {
                            if is_management && log.user_id != own_username {
                                if action_button(ui, CHECK, "Approve").clicked() {
                                    app.request_confirm(ConfirmAction::ApproveOvertime(log.id));
                                }
                                ui.add_space(4.0);
                                if danger_action_button(ui, X, "Reject").clicked() {
                                    app.request_confirm(ConfirmAction::RejectOvertime(log.id));
                                }
                            }
                            if log.user_id == own_username && danger_action_button(ui, PROHIBIT, "Cancel").clicked() {
                                app.request_confirm(ConfirmAction::CancelOvertime(log.id));
                            }
                        }
                    });

                    ui.end_row();
                }
            });
    });
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    egui::Window::new("Log Overtime")
        .collapsible(false)
        .resizable(false)
        .default_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            let reason_error = validate::validate_required(&app.overtime_form.reason, "Reason");

            egui::Grid::new("overtime_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Date:");
                    ui.add(egui_extras::DatePickerButton::new(&mut app.overtime_form.date).id_salt("overtime_date"));
                    ui.end_row();

                    ui.label("Start hour:");
                    egui::ComboBox::from_id_salt("overtime_start_hour")
                        .width(90.0)
                        .selected_text(format!("{:02}:00", app.overtime_form.start_hour))
                        .show_ui(ui, |ui| {
                            for hour in 0..24u32 {
                                if ui
                                    .selectable_label(app.overtime_form.start_hour == hour, format!("{hour:02}:00"))
                                    .clicked()
                                {
                                    app.overtime_form.start_hour = hour;
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Duration (hours):");
                    ui.add(egui::Slider::new(&mut app.overtime_form.duration, 1..=12));
                    ui.end_row();

                    ui.label("Reason:");
                    ui.vertical(|ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut app.overtime_form.reason)
                                .desired_width(230.0)
                                .desired_rows(3),
                        );
                        if let Some(error) = &reason_error {
                            ui.colored_label(colors::ERROR, error);
                        }
                    });
                    ui.end_row();
                });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.overtime_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Submit").clicked() {
                        save_overtime(app);
                    }
                });
            });
        });
}

fn save_overtime(app: &mut App) {
    let form = &app.overtime_form;

    if let Some(error) = validate::validate_required(&form.reason, "Reason") {
        app.error_message = Some(error);
        return;
    }

    let data = CreateOvertimeLog {
        date_overtime: form.date,
        start_hour: form.start_hour,
        duration: form.duration,
        reason: form.reason.trim().to_string(),
    };
    app.create_overtime(data);
}
