//! Dashboard panel with stats, navigation cards, and activity log.

use eframe::egui::{self, Color32, CornerRadius, Margin, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{BELL, CHALKBOARD_TEACHER, CLOCK, EXAM, GRADUATION_CAP, SUITCASE, USERS, USERS_THREE};

use crate::models::leave::LeaveStatus;
use crate::models::overtime::OvertimeStatus;

use super::app::{App, LogLevel, Panel};
use super::components::dashboard_card;

/// Show the dashboard panel.
///
/// Returns `Some(panel)` if navigation is requested.
pub fn show(app: &mut App, ui: &mut Ui) -> Option<Panel> {
    let mut next_panel = None;
    let role = app.role().cloned();
    let is_management = role.as_ref().map(|r| r.is_management()).unwrap_or(false);
    let takes_assessments = role.as_ref().map(|r| r.takes_assessments()).unwrap_or(false);

    ui.vertical_centered(|ui| {
        ui.add_space(30.0);

        // Header
        ui.label(RichText::new("Barista Desk").size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new("Staff, training, and shift management").size(14.0).weak());

        ui.add_space(30.0);

        // Stat cards row
        ui.horizontal(|ui| {
            let available = ui.available_width();
            let start_offset = ((available - 680.0) / 2.0).max(0.0);
            ui.add_space(start_offset);

            if is_management {
                stat_card(ui, "Accounts", &app.accounts.len().to_string(), "Registered staff");
            }
            stat_card(
                ui,
                "Pending Leave",
                &count_pending_leave(app).to_string(),
                "Awaiting approval",
            );
            stat_card(
                ui,
                "Pending Overtime",
                &count_pending_overtime(app).to_string(),
                "Awaiting verification",
            );
            stat_card(
                ui,
                "Unread Notifications",
                &app.unread_count().to_string(),
                "Since last check",
            );
        });

        ui.add_space(30.0);

        // Navigation cards, role gated
        let mut cards: Vec<(&str, &str, &str, Panel)> = Vec::new();
        if is_management {
            cards.push(("Accounts", "Staff administration", USERS, Panel::Accounts));
        }
        cards.push(("Leave", "Requests & approvals", SUITCASE, Panel::Leave));
        cards.push(("Overtime", "Logs & verification", CLOCK, Panel::Overtime));
        if takes_assessments || is_management {
            cards.push(("Assessments", "Quizzes & results", EXAM, Panel::Assessments));
        }
        if is_management {
            cards.push(("Peer Review", "Reviewer assignment", USERS_THREE, Panel::PeerReview));
        }
        cards.push(("Training", "Learning materials", GRADUATION_CAP, Panel::Training));
        cards.push(("Notifications", "Updates & alerts", BELL, Panel::Notifications));

        let available = ui.available_width();
        let num_cards = cards.len() as f32;
        let spacing = 20.0;
        let total_spacing = spacing * (num_cards - 1.0);
        let card_width = ((available - total_spacing) / num_cards).clamp(120.0, 200.0);
        let card_height = card_width * 0.85;
        let card_size = egui::vec2(card_width, card_height);
        let total_width = card_width * num_cards + total_spacing;
        let start_offset = ((available - total_width) / 2.0).max(0.0);

        ui.horizontal(|ui| {
            ui.add_space(start_offset);

            for (idx, (title, description, icon, panel)) in cards.iter().enumerate() {
                if idx > 0 {
                    ui.add_space(spacing);
                }
                if dashboard_card(ui, title, description, icon, card_size).clicked() {
                    next_panel = Some(*panel);
                }
            }
        });

        ui.add_space(30.0);
    });

    // Two-column layout: Upcoming assessments | Recent Activity
    let available_width = ui.available_width();
    let column_width = (available_width - 40.0) / 2.0;

    ui.horizontal(|ui| {
        ui.add_space(10.0);

        // Left column - upcoming assessments
        ui.vertical(|ui| {
            ui.set_width(column_width);

            egui::Frame::new()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(Margin::same(15))
                .corner_radius(CornerRadius::same(8))
                .show(ui, |ui| {
                    ui.set_min_width(column_width - 30.0);

                    ui.horizontal(|ui| {
                        ui.label(RichText::new(CHALKBOARD_TEACHER).size(16.0));
                        ui.label(RichText::new("Upcoming Assessments").strong());
                    });
                    ui.add_space(10.0);

                    if app.assessments.is_empty() {
                        ui.label(RichText::new("Nothing assigned").weak());
                    } else {
                        for assessment in app.assessments.iter().take(5) {
                            ui.horizontal(|ui| {
                                ui.label(&assessment.template);
                                ui.label(
                                    RichText::new(format!(
                                        "due {}",
                                        assessment.deadline.format("%Y-%m-%d %H:%M")
                                    ))
                                    .small()
                                    .weak(),
                                );
                            });
                        }
                    }
                });
        });

        ui.add_space(20.0);

        // Right column - Recent Activity
        ui.vertical(|ui| {
            ui.set_width(column_width);

            egui::Frame::new()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(Margin::same(15))
                .corner_radius(CornerRadius::same(8))
                .show(ui, |ui| {
                    ui.set_min_width(column_width - 30.0);

                    ui.label(RichText::new("Recent Activity").strong());
                    ui.add_space(10.0);

                    ScrollArea::vertical().max_height(150.0).show(ui, |ui| {
                        if app.log_messages.is_empty() {
                            ui.label(RichText::new("No recent activity").weak());
                        } else {
                            for entry in app.log_messages.iter().rev().take(10) {
                                let color = match entry.level {
                                    LogLevel::Info => Color32::GRAY,
                                    LogLevel::Success => Color32::from_rgb(100, 200, 100),
                                    LogLevel::Warning => Color32::from_rgb(230, 180, 50),
                                    LogLevel::Error => Color32::from_rgb(230, 100, 100),
                                };

                                ui.horizontal(|ui| {
                                    ui.label(
                                        RichText::new(entry.timestamp.format("%H:%M:%S").to_string())
                                            .small()
                                            .color(Color32::DARK_GRAY),
                                    );
                                    ui.label(RichText::new(&entry.message).color(color));
                                });
                            }
                        }
                    });
                });
        });
    });

    next_panel
}

/// Render a stat card with title, value, and subtitle.
fn stat_card(ui: &mut Ui, title: &str, value: &str, subtitle: &str) {
    egui::Frame::new()
        .fill(ui.style().visuals.extreme_bg_color)
        .inner_margin(Margin::same(15))
        .outer_margin(Margin::same(5))
        .corner_radius(CornerRadius::same(8))
        .show(ui, |ui| {
            ui.set_min_width(150.0);

            ui.vertical(|ui| {
                ui.label(RichText::new(title).small());
                ui.label(RichText::new(value).heading().strong());
                ui.label(RichText::new(subtitle).small().weak());
            });
        });
}

/// Count leave requests still awaiting a decision.
fn count_pending_leave(app: &App) -> usize {
    app.leave_requests
        .iter()
        .filter(|r| r.status == LeaveStatus::Pending)
        .count()
}

/// Count overtime logs still awaiting a decision.
fn count_pending_overtime(app: &App) -> usize {
    app.overtime_logs
        .iter()
        .filter(|o| o.status == OvertimeStatus::Pending)
        .count()
}
