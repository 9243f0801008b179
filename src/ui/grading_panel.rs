//! Essay grading workspace for reviewers.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::ARROWS_CLOCKWISE;

use super::app::App;
use super::components::{colors, panel_header, styled_button, styled_button_with_icon};
use crate::models::assessment::{EssayGrade, QuestionKind};

/// Show the grading panel.
///
/// Returns `true` when the reviewer leaves the workspace.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;
    let mut pending_grade: Option<EssayGrade> = None;
    let mut reload = false;

    let Some(grading) = &mut app.grading else {
        return true;
    };

    if styled_button(ui, "< Back to Assessments").clicked() {
        go_back = true;
    }

    panel_header(ui, &format!("Grading: {}", grading.assessment.template.clone()));

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            reload = true;
        }
        ui.add_space(10.0);
        ui.label(format!("{} submission(s)", grading.submissions.len()));
    });

    ui.add_space(15.0);

    if app.is_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading submissions...");
        });
        return go_back;
    }

    if grading.submissions.is_empty() {
        ui.label(RichText::new("No submissions yet").weak());
        return go_back;
    }

    // Submission selector
    ui.horizontal(|ui| {
        ui.label("Submission:");
        egui::ComboBox::from_id_salt("grading_submission")
            .width(220.0)
            .selected_text(
                grading
                    .selected
                    .and_then(|i| grading.submissions.get(i))
                    .map(|s| s.username.clone())
                    .unwrap_or_else(|| "Select...".to_string()),
            )
            .show_ui(ui, |ui| {
                for (idx, submission) in grading.submissions.iter().enumerate() {
                    let label = if submission.essay_reviewed {
                        format!("{} (reviewed)", submission.username)
                    } else {
                        submission.username.clone()
                    };
                    if ui.selectable_label(grading.selected == Some(idx), label).clicked() {
                        grading.selected = Some(idx);
                    }
                }
            });
    });

    ui.add_space(15.0);

    let Some(selected) = grading.selected else {
        ui.label(RichText::new("Pick a submission to grade its essays").weak());
        return go_back;
    };
    let Some(submission) = grading.submissions.get(selected) else {
        return go_back;
    };
    let submission = submission.clone();

    // Score summary
    ui.horizontal(|ui| {
        ui.label("MC score:");
        ui.strong(
            submission
                .mc_score
                .map(|s| format!("{s:.1}"))
                .unwrap_or_else(|| "-".to_string()),
        );
        ui.add_space(15.0);
        ui.label("Essay score:");
        if submission.essay_reviewed {
            ui.strong(
                submission
                    .essay_score
                    .map(|s| format!("{s:.1}"))
                    .unwrap_or_else(|| "-".to_string()),
            );
        } else {
            ui.colored_label(colors::WARNING, "Unreviewed");
        }
    });

    ui.add_space(10.0);
    ui.separator();
    ui.add_space(10.0);

    // Essay answers with score inputs
    ScrollArea::vertical().id_salt("grading_scroll").show(ui, |ui| {
        let essay_questions: Vec<_> = grading
            .assessment
            .questions
            .iter()
            .filter(|q| q.kind == QuestionKind::Essay)
            .cloned()
            .collect();

        if essay_questions.is_empty() {
            ui.label(RichText::new("This assessment has no essay questions").weak());
            return;
        }

        for question in &essay_questions {
            ui.label(RichText::new(&question.prompt).strong());
            ui.add_space(4.0);

            let answer = submission
                .answers
                .iter()
                .find(|a| a.question_id == question.id);

            match answer {
                Some(answer) if !answer.answer.trim().is_empty() => {
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.label(&answer.answer);
                    });

                    ui.add_space(6.0);
                    ui.horizontal(|ui| {
                        if let Some(score) = answer.essay_score {
                            ui.label("Score:");
                            ui.strong(format!("{score:.1}"));
                        } else {
                            ui.label("Score (0-100):");
                            let input = grading
                                .score_inputs
                                .entry((submission.submission_id, question.id))
                                .or_default();
                            ui.add(egui::TextEdit::singleline(input).desired_width(60.0));

                            let parsed = input.trim().parse::<f64>().ok().filter(|s| (0.0..=100.0).contains(s));
                            let enabled = parsed.is_some();
                            if ui.add_enabled(enabled, egui::Button::new("Save Grade")).clicked()
                                && let Some(score) = parsed
                            {
                                pending_grade = Some(EssayGrade {
                                    submission_id: submission.submission_id,
                                    question_id: question.id,
                                    score,
                                });
                            }
                            if !input.trim().is_empty() && parsed.is_none() {
                                ui.colored_label(colors::ERROR, "Score must be 0-100");
                            }
                        }
                    });
                }
                _ => {
                    ui.label(RichText::new("No answer submitted").weak());
                }
            }

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(6.0);
        }
    });

    if reload {
        let assessment = grading.assessment.clone();
        app.open_grading(assessment);
    } else if let Some(grade) = pending_grade {
        app.grade_essay(grade);
    }

    go_back
}
