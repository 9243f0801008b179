//! Training materials panel.

use eframe::egui::{self, RichText, ScrollArea, Ui};
use egui_phosphor::regular::{ARROW_SQUARE_OUT, ARROWS_CLOCKWISE, FILE_TEXT, LINK, VIDEO_CAMERA};

use super::app::App;
use super::components::{action_button, back_button, panel_header, styled_button_with_icon};
use crate::models::training::{MaterialKind, TrainingMaterial};

/// Show the training materials panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Training Materials");

    ui.horizontal(|ui| {
        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_materials();
        }
    });

    ui.add_space(15.0);

    if app.is_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading materials...");
        });
        return go_back;
    }

    let role = app.role().cloned();
    let visible: Vec<TrainingMaterial> = app
        .materials
        .iter()
        .filter(|m| {
            // Materials with no role list are visible to everyone
            m.assigned_roles.is_empty()
                || role
                    .as_ref()
                    .map(|r| m.assigned_roles.iter().any(|ar| ar == r.as_str()))
                    .unwrap_or(false)
        })
        .cloned()
        .collect();

    if visible.is_empty() {
        ui.label(RichText::new("No training materials available").weak());
        return go_back;
    }

    let mut open_link = None;

    ScrollArea::vertical().id_salt("training_scroll").show(ui, |ui| {
        for material in &visible {
            egui::Frame::new()
                .fill(ui.style().visuals.extreme_bg_color)
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6))
                .show(ui, |ui| {
                    ui.set_min_width(ui.available_width() - 20.0);

                    ui.horizontal(|ui| {
                        let icon = match material.kind {
                            MaterialKind::Video => VIDEO_CAMERA,
                            MaterialKind::Document => FILE_TEXT,
                            MaterialKind::Link => LINK,
                        };
                        ui.label(RichText::new(icon).size(22.0));

                        ui.vertical(|ui| {
                            ui.horizontal(|ui| {
                                ui.label(RichText::new(&material.title).strong());
                                ui.label(RichText::new(material.kind.to_string()).small().weak());
                            });
                            if let Some(description) = &material.description {
                                ui.label(RichText::new(description).weak());
                            }
                        });

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if action_button(ui, ARROW_SQUARE_OUT, "Open").clicked() {
                                open_link = Some(material.link.clone());
                            }
                        });
                    });
                });

            ui.add_space(6.0);
        }
    });

    if let Some(link) = open_link {
        ui.ctx().open_url(egui::OpenUrl::new_tab(link));
    }

    go_back
}
