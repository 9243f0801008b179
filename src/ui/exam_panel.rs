//! Exam panel: timed question sheet with forced submit on expiry.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::TIMER;

use super::app::App;
use super::components::{colors, panel_header, primary_button_with_icon, styled_button};
use crate::exam::unanswered_count;
use crate::models::assessment::QuestionKind;

/// Show the exam panel.
///
/// Returns `true` when the user is done and wants to leave.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;
    let mut do_submit = false;

    let Some(exam) = &mut app.exam else {
        // Exam state was cleared (e.g. logout); nothing to render
        return true;
    };

    panel_header(ui, &exam.assessment.template.clone());

    // Result view after submission
    if let Some(result) = &exam.result {
        ui.add_space(10.0);
        ui.label(RichText::new("Submission received").size(18.0).strong());
        ui.add_space(10.0);

        egui::Grid::new("exam_result_grid")
            .num_columns(2)
            .spacing([20.0, 8.0])
            .show(ui, |ui| {
                ui.label("Multiple choice score:");
                ui.strong(
                    result
                        .mc_score
                        .map(|s| format!("{s:.1}"))
                        .unwrap_or_else(|| "-".to_string()),
                );
                ui.end_row();

                ui.label("Essay score:");
                if result.essay_reviewed {
                    ui.strong(
                        result
                            .essay_score
                            .map(|s| format!("{s:.1}"))
                            .unwrap_or_else(|| "-".to_string()),
                    );
                } else {
                    ui.colored_label(colors::WARNING, "Awaiting review");
                }
                ui.end_row();

                ui.label("Total:");
                ui.strong(
                    result
                        .total_score
                        .map(|s| format!("{s:.1}"))
                        .unwrap_or_else(|| "-".to_string()),
                );
                ui.end_row();
            });

        ui.add_space(20.0);
        if styled_button(ui, "Back to Assessments").clicked() {
            go_back = true;
        }
        return go_back;
    }

    // Timer bar
    ui.horizontal(|ui| {
        ui.label(RichText::new(TIMER).size(20.0));
        let timer_color = if exam.timer.remaining_secs() < 60 {
            colors::ERROR
        } else {
            colors::INFO
        };
        ui.label(RichText::new(exam.timer.display()).size(20.0).strong().color(timer_color));

        let remaining = unanswered_count(&exam.assessment.questions, &exam.answers);
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if remaining > 0 {
                ui.colored_label(colors::WARNING, format!("{remaining} unanswered"));
            } else {
                ui.colored_label(colors::SUCCESS, "All questions answered");
            }
        });
    });

    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);

    // Question sheet
    ScrollArea::vertical().id_salt("exam_scroll").show(ui, |ui| {
        for (idx, question) in exam.assessment.questions.iter().enumerate() {
            ui.add_space(6.0);
            ui.label(
                RichText::new(format!("{}. {}", idx + 1, question.prompt))
                    .size(15.0)
                    .strong(),
            );
            ui.add_space(4.0);

            let answer = exam.answers.entry(question.id).or_default();
            match question.kind {
                QuestionKind::MultipleChoice => {
                    for option in &question.options {
                        ui.radio_value(answer, option.clone(), option);
                    }
                }
                QuestionKind::Essay => {
                    ui.add(
                        egui::TextEdit::multiline(answer)
                            .desired_width(500.0)
                            .desired_rows(4)
                            .hint_text("Your answer..."),
                    );
                }
            }
            ui.add_space(6.0);
            ui.separator();
        }

        ui.add_space(15.0);

        ui.horizontal(|ui| {
            if exam.submitting {
                ui.spinner();
                ui.label("Submitting...");
            } else if primary_button_with_icon(ui, "", "Submit Assessment").clicked() {
                do_submit = true;
            }
        });

        ui.add_space(20.0);
    });

    if do_submit {
        app.submit_exam(false);
    }

    go_back
}
