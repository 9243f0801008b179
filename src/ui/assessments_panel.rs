//! Assessment list panel: assigned quizzes for takers, grading entry
//! for reviewers.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, CHECKS, NOTE_PENCIL, PLAY};

use super::app::App;
use super::components::{action_button, back_button, colors, panel_header, styled_button_with_icon};

/// Show the assessments panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Assessments");

    let is_management = app.role().map(|r| r.is_management()).unwrap_or(false);
    let takes_assessments = app.role().map(|r| r.takes_assessments()).unwrap_or(false);

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_assessments();
        }
    });

    ui.add_space(15.0);

    if app.is_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading assessments...");
        });
        return go_back;
    }

    if app.assessments.is_empty() {
        ui.label(RichText::new("No assessments assigned").weak());
        return go_back;
    }

    // Deferred actions so the table render keeps the borrow simple
    let mut take_id = None;
    let mut result_id = None;
    let mut grade_idx = None;

    let now = chrono::Utc::now();

    ScrollArea::vertical().id_salt("assessments_scroll").show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("assessments_grid")
            .num_columns(5)
            .striped(true)
            .min_col_width(80.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("Template");
                ui.strong("Deadline");
                ui.strong("Questions");
                ui.strong("Status");
                ui.strong("Actions");
                ui.end_row();

                for (idx, assessment) in app.assessments.iter().enumerate() {
                    ui.label(&assessment.template);

                    let overdue = assessment.deadline < now;
                    let deadline_text = assessment.deadline.format("%Y-%m-%d %H:%M").to_string();
                    if overdue {
                        ui.colored_label(colors::ERROR, deadline_text);
                    } else {
                        ui.label(deadline_text);
                    }

                    ui.label(assessment.questions.len().to_string());

                    let submitted = app.my_submissions.contains_key(&assessment.id);
                    if submitted {
                        ui.colored_label(colors::SUCCESS, "Submitted");
                    } else if overdue {
                        ui.colored_label(colors::ERROR, "Missed");
                    } else {
                        ui.colored_label(colors::WARNING, "Open");
                    }

                    ui.horizontal(|ui| {
                        if takes_assessments && !submitted && !overdue && action_button(ui, PLAY, "Take").clicked() {
                            take_id = Some(assessment.id);
                        }
                        if action_button(ui, CHECKS, "My Result").clicked() {
                            result_id = Some(assessment.id);
                        }
                        if is_management && action_button(ui, NOTE_PENCIL, "Grade").clicked() {
                            grade_idx = Some(idx);
                        }
                    });

                    ui.end_row();
                }
            });
    });

    if let Some(id) = take_id {
        app.open_exam(id);
    }
    if let Some(id) = result_id {
        app.result_view = Some(id);
        if !app.my_submissions.contains_key(&id) {
            app.load_my_submission(id);
        }
    }
    if let Some(idx) = grade_idx {
        let assessment = app.assessments[idx].clone();
        app.open_grading(assessment);
    }

    show_result_window(app, ui.ctx());

    go_back
}

/// Render the submission result window when one is open.
fn show_result_window(app: &mut App, ctx: &egui::Context) {
    let Some(assessment_id) = app.result_view else { return };

    let mut open = true;
    egui::Window::new("Submission Result")
        .collapsible(false)
        .resizable(false)
        .default_width(380.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .open(&mut open)
        .show(ctx, |ui| {
            match app.my_submissions.get(&assessment_id) {
                Some(submission) => {
                    egui::Grid::new("result_grid")
                        .num_columns(2)
                        .spacing([20.0, 8.0])
                        .show(ui, |ui| {
                            ui.label("Multiple choice:");
                            ui.strong(format_score(submission.mc_score));
                            ui.end_row();

                            ui.label("Essay:");
                            if submission.essay_reviewed {
                                ui.strong(format_score(submission.essay_score));
                            } else {
                                ui.colored_label(colors::WARNING, "Awaiting review");
                            }
                            ui.end_row();

                            ui.label("Total:");
                            ui.strong(format_score(submission.total_score));
                            ui.end_row();
                        });
                }
                None => {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading result...");
                    });
                }
            }

            ui.add_space(10.0);
            if ui.button("Close").clicked() {
                app.result_view = None;
            }
        });

    if !open {
        app.result_view = None;
    }
}

fn format_score(score: Option<f64>) -> String {
    score.map(|s| format!("{s:.1}")).unwrap_or_else(|| "-".to_string())
}
