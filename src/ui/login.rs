//! Login screen shown until a session exists.

use eframe::egui::{self, Key, RichText, Ui};

use super::app::App;
use super::components::colors;

/// Show the login screen.
pub fn show(app: &mut App, ui: &mut Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(80.0);

        ui.label(RichText::new("Barista Desk").size(32.0).strong());
        ui.add_space(5.0);
        ui.label(RichText::new("Staff, training, and shift management").size(14.0).weak());

        ui.add_space(40.0);

        egui::Frame::group(ui.style()).inner_margin(egui::Margin::same(20)).show(ui, |ui| {
            ui.set_width(320.0);

            egui::Grid::new("login_grid")
                .num_columns(2)
                .spacing([15.0, 12.0])
                .show(ui, |ui| {
                    ui.label("Username:");
                    ui.add(egui::TextEdit::singleline(&mut app.login_username).desired_width(200.0));
                    ui.end_row();

                    ui.label("Password:");
                    let password = ui.add(
                        egui::TextEdit::singleline(&mut app.login_password)
                            .desired_width(200.0)
                            .password(true),
                    );
                    ui.end_row();

                    // Enter in the password field submits
                    if password.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                        app.start_login();
                    }
                });

            ui.add_space(15.0);

            if let Some(error) = &app.login_error {
                ui.colored_label(colors::ERROR, error);
                ui.add_space(10.0);
            }

            ui.horizontal(|ui| {
                if app.logging_in {
                    ui.spinner();
                    ui.label("Signing in...");
                } else if ui.button(RichText::new("Sign In").size(15.0)).clicked() {
                    app.start_login();
                }
            });
        });

        ui.add_space(20.0);
        ui.label(
            RichText::new(format!("Server: {}", app.config.api.base_url))
                .small()
                .weak(),
        );
    });
}
