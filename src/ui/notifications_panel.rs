//! Notification list panel, fed by the background poller.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROW_SQUARE_OUT, CHECK, CHECKS};

use super::app::App;
use super::components::{action_button, back_button, colors, panel_header, styled_button_with_icon};

/// Show the notifications panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Notifications");

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, CHECKS, "Mark All Read").clicked() {
            app.mark_all_notifications_read();
        }

        ui.add_space(15.0);

        let unread = app.unread_count();
        if unread > 0 {
            ui.colored_label(colors::WARNING, format!("{unread} unread"));
        } else {
            ui.colored_label(colors::NEUTRAL, "All caught up");
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if app.poll.is_backing_off() {
                ui.colored_label(colors::WARNING, "Server unreachable, retrying with backoff");
            } else {
                ui.label(
                    RichText::new(format!("Refreshes every {}s", app.poll.interval().as_secs()))
                        .small()
                        .weak(),
                );
            }
        });
    });

    ui.add_space(15.0);

    if app.notifications.is_empty() {
        ui.label(RichText::new("No notifications").weak());
        return go_back;
    }

    let mut mark_id = None;
    let mut open_url = None;

    ScrollArea::vertical().id_salt("notifications_scroll").show(ui, |ui| {
        for notification in &app.notifications {
            egui::Frame::new()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(egui::Margin::same(10))
                .corner_radius(egui::CornerRadius::same(6))
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width() - 20.0);

                    ui.horizontal(|ui| {
                        let title = if notification.read {
                            RichText::new(&notification.title)
                        } else {
                            RichText::new(&notification.title).strong()
                        };
                        ui.label(title);

                        ui.label(RichText::new(&notification.kind).small().weak());

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            ui.label(
                                RichText::new(
                                    notification
                                        .created_at
                                        .with_timezone(&chrono::Local)
                                        .format("%Y-%m-%d %H:%M")
                                        .to_string(),
                                )
                                .small()
                                .weak(),
                            );

                            if !notification.read && action_button(ui, CHECK, "Mark read").clicked() {
                                mark_id = Some(notification.id);
                            }

                            if let Some(url) = &notification.action_url
                                && action_button(ui, ARROW_SQUARE_OUT, "Open").clicked()
                            {
                                open_url = Some(url.clone());
                            }
                        });
                    });

                    ui.label(RichText::new(&notification.message).weak());
                });

            ui.add_space(6.0);
        }
    });

    if let Some(id) = mark_id {
        app.mark_notification_read(id);
    }
    if let Some(url) = open_url {
        ui.ctx().open_url(egui::OpenUrl::new_tab(url));
    }

    go_back
}
