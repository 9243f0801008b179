//! Peer review assignment panel.

use chrono::Local;
use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, PLUS};

use super::app::App;
use super::components::{
    back_button, colors, panel_header, primary_button_with_icon, styled_button, styled_button_with_icon,
};
use crate::models::peer_review::AssignPeerReview;

/// Show the peer review panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Peer Reviews");

    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Assign Review").clicked() {
            app.peer_review_form.reset();
            app.peer_review_form.is_open = true;
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_peer_reviews();
        }
    });

    ui.add_space(15.0);

    if app.is_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading peer reviews...");
        });
        return go_back;
    }

    if app.peer_reviews.is_empty() {
        ui.label(RichText::new("No peer reviews assigned").weak());
    } else {
        show_table(app, ui);
    }

    if app.peer_review_form.is_open {
        show_form_dialog(app, ui.ctx());
    }

    go_back
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let today = Local::now().date_naive();

    ScrollArea::vertical().id_salt("peer_review_scroll").show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("peer_review_grid")
            .num_columns(4)
            .striped(true)
            .min_col_width(80.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("Reviewer");
                ui.strong("Reviewee");
                ui.strong("Deadline");
                ui.strong("Status");
                ui.end_row();

                for review in &app.peer_reviews {
                    ui.label(&review.reviewer);
                    ui.label(&review.reviewee);

                    let deadline_text = review.deadline.to_string();
                    if review.deadline < today {
                        ui.colored_label(colors::ERROR, deadline_text);
                    } else {
                        ui.label(deadline_text);
                    }

                    ui.label(review.status.as_deref().unwrap_or("-"));
                    ui.end_row();
                }
            });
    });
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    egui::Window::new("Assign Peer Review")
        .collapsible(false)
        .resizable(false)
        .default_width(400.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            let same_person = !app.peer_review_form.reviewer.is_empty()
                && app.peer_review_form.reviewer == app.peer_review_form.reviewee;
            let past_deadline = app.peer_review_form.deadline <= Local::now().date_naive();

            egui::Grid::new("peer_review_form_grid")
                .num_columns(2)
                .spacing([20.0, 10.0])
                .show(ui, |ui| {
                    ui.label("Reviewer:");
                    username_combo(app, ui, "pr_reviewer", true);
                    ui.end_row();

                    ui.label("Reviewee:");
                    username_combo(app, ui, "pr_reviewee", false);
                    ui.end_row();

                    ui.label("Deadline:");
                    ui.vertical(|ui| {
                        ui.add(
                            egui_extras::DatePickerButton::new(&mut app.peer_review_form.deadline)
                                .id_salt("pr_deadline"),
                        );
                        if past_deadline {
                            ui.colored_label(colors::ERROR, "Deadline must be in the future");
                        }
                    });
                    ui.end_row();
                });

            if same_person {
                ui.add_space(8.0);
                ui.colored_label(colors::ERROR, "Reviewer and reviewee must differ");
            }

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.peer_review_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Assign").clicked() {
                        save_assignment(app);
                    }
                });
            });
        });
}

/// Username dropdown fed by the accounts cache.
fn username_combo(app: &mut App, ui: &mut Ui, id: &str, reviewer: bool) {
    let current = if reviewer {
        app.peer_review_form.reviewer.clone()
    } else {
        app.peer_review_form.reviewee.clone()
    };

    let mut picked = None;
    egui::ComboBox::from_id_salt(id)
        .width(200.0)
        .selected_text(if current.is_empty() {
            "Select...".to_string()
        } else {
            current.clone()
        })
        .show_ui(ui, |ui| {
            for account in &app.accounts {
                if ui
                    .selectable_label(current == account.username, &account.username)
                    .clicked()
                {
                    picked = Some(account.username.clone());
                }
            }
        });

    if let Some(username) = picked {
        if reviewer {
            app.peer_review_form.reviewer = username;
        } else {
            app.peer_review_form.reviewee = username;
        }
    }
}

fn save_assignment(app: &mut App) {
    let form = &app.peer_review_form;

    if form.reviewer.is_empty() || form.reviewee.is_empty() {
        app.error_message = Some("Reviewer and reviewee are required".to_string());
        return;
    }
    if form.reviewer == form.reviewee {
        app.error_message = Some("Reviewer and reviewee must differ".to_string());
        return;
    }
    if form.deadline <= Local::now().date_naive() {
        app.error_message = Some("Deadline must be in the future".to_string());
        return;
    }

    let data = AssignPeerReview {
        reviewer: form.reviewer.clone(),
        reviewee: form.reviewee.clone(),
        deadline: form.deadline,
    };
    app.assign_peer_review(data);
}
