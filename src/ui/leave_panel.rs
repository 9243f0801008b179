//! Leave request panel: own requests plus the approval queue for
//! management roles.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CHECK, FILE_XLS, PLUS, PROHIBIT, X};

use super::app::{App, ConfirmAction};
use super::components::{
    action_button, back_button, colors, danger_action_button, panel_header, primary_button_with_icon, status_color,
    styled_button, styled_button_with_icon,
};
use crate::models::leave::{CreateLeaveRequest, LEAVE_TYPES, LeaveStatus};
use crate::validate;

/// Show the leave panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Leave Requests");

    let is_management = app.role().map(|r| r.is_management()).unwrap_or(false);

    // Toolbar
    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Request Leave").clicked() {
            app.leave_form.reset();
            app.leave_form.is_open = true;
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_leave();
        }

        if is_management {
            ui.add_space(10.0);
            if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
                app.export_leave();
            }
        }
    });

    ui.add_space(10.0);

    // Status filter
    ui.horizontal(|ui| {
        ui.label("Status:");
        if ui.selectable_label(app.leave_status_filter.is_none(), "All").clicked() {
            app.leave_status_filter = None;
        }
        for status in [
            LeaveStatus::Pending,
            LeaveStatus::Approved,
            LeaveStatus::Rejected,
            LeaveStatus::Canceled,
        ] {
            if ui
                .selectable_label(app.leave_status_filter == Some(status), status.to_string())
                .clicked()
            {
                app.leave_status_filter = Some(status);
            }
        }
    });

    ui.add_space(15.0);

    if app.is_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading leave requests...");
        });
        return go_back;
    }

    show_table(app, ui, is_management);

    if app.leave_form.is_open {
        show_form_dialog(app, ui.ctx());
    }

    go_back
}

fn show_table(app: &mut App, ui: &mut Ui, is_management: bool) {
    let own_username = app.session.as_ref().map(|s| s.username.clone()).unwrap_or_default();

    let filtered: Vec<_> = app
        .leave_requests
        .iter()
        .filter(|r| app.leave_status_filter.map(|s| r.status == s).unwrap_or(true))
        .cloned()
        .collect();

    ui.label(format!(
        "Showing {} of {} requests",
        filtered.len(),
        app.leave_requests.len()
    ));

    ui.add_space(10.0);

    ScrollArea::vertical().id_salt("leave_scroll").show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("leave_grid")
            .num_columns(6)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("Username");
                ui.strong("Date");
                ui.strong("Type");
                ui.strong("Reason");
                ui.strong("Status");
                ui.strong("Actions");
                ui.end_row();

                for request in &filtered {
                    ui.label(&request.user_name);
                    ui.label(request.request_date.to_string());
                    ui.label(&request.leave_type);
                    ui.label(&request.reason);
                    ui.colored_label(status_color(&request.status.to_string()), request.status.to_string());

                    ui.horizontal(|ui| {
                        // Only pending requests have actions
                        if request.status == LeaveStatus::Pending {
                            if is_management && request.user_name != own_username {
                                if action_button(ui, CHECK, "Approve").clicked() {
                                    app.request_confirm(ConfirmAction::ApproveLeave(request.id));
                                }
                                ui.add_space(4.0);
                                if danger_action_button(ui, X, "Reject").clicked() {
                                    app.request_confirm(ConfirmAction::RejectLeave(request.id));
                                }
                            }
                            if request.user_name == own_username
                                && danger_action_button(ui, PROHIBIT, "Cancel").clicked()
                            {
                                app.request_confirm(ConfirmAction::CancelLeave(request.id));
                            }
                        }
                    });

                    ui.end_row();
                }
            });
    });
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    egui::Window::new("Request Leave")
        .collapsible(false)
        .resizable(false)
        .default_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            let reason_error = validate::validate_required(&app.leave_form.reason, "Reason");

            egui::Grid::new("leave_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Type:");
                    egui::ComboBox::from_id_salt("leave_form_type")
                        .width(150.0)
                        .selected_text(app.leave_form.leave_type.clone())
                        .show_ui(ui, |ui| {
                            for leave_type in LEAVE_TYPES {
                                if ui
                                    .selectable_label(app.leave_form.leave_type == *leave_type, *leave_type)
                                    .clicked()
                                {
                                    app.leave_form.leave_type = leave_type.to_string();
                                }
                            }
                        });
                    ui.end_row();

                    ui.label("Date:");
                    ui.add(egui_extras::DatePickerButton::new(&mut app.leave_form.request_date).id_salt("leave_date"));
                    ui.end_row();

                    ui.label("Reason:");
                    ui.vertical(|ui| {
                        ui.add(
                            egui::TextEdit::multiline(&mut app.leave_form.reason)
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
                    app.leave_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Submit").clicked() {
                        save_leave(app);
                    }
                });
            });
        });
}

fn save_leave(app: &mut App) {
    let form = &app.leave_form;

    if let Some(error) = validate::validate_required(&form.reason, "Reason") {
        app.error_message = Some(error);
        return;
    }

    let data = CreateLeaveRequest {
        leave_type: form.leave_type.clone(),
        request_date: form.request_date,
        reason: form.reason.trim().to_string(),
    };
    app.create_leave(data);
}
