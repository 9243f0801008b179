//! Account administration panel with CRUD, search, and filter.

use eframe::egui::{self, ScrollArea, Ui};
use egui_phosphor::regular::{ARROWS_CLOCKWISE, FILE_XLS, PENCIL, PLUS, TRASH};

use super::app::{App, AccountForm, ConfirmAction};
use super::components::{
    action_button, back_button, colors, danger_action_button, panel_header, primary_button_with_icon, styled_button,
    styled_button_with_icon,
};
use crate::models::account::{RegisterAccount, UpdateAccount};
use crate::session::{ALL_ROLES, Role, selectable_roles};
use crate::validate;

/// Parse date input flexibly, accepting multiple formats.
fn parse_flexible_date(input: &str) -> Option<chrono::NaiveDate> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    for fmt in &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d"] {
        if let Ok(date) = chrono::NaiveDate::parse_from_str(input, fmt) {
            return Some(date);
        }
    }
    None
}

/// Show the accounts panel.
///
/// Returns `true` if the back button was clicked.
pub fn show(app: &mut App, ui: &mut Ui) -> bool {
    let mut go_back = false;

    if back_button(ui) {
        go_back = true;
    }

    panel_header(ui, "Manage Accounts");

    // Toolbar row 1: Action buttons
    ui.horizontal(|ui| {
        if primary_button_with_icon(ui, PLUS, "Register Account").clicked() {
            app.account_form = AccountForm {
                is_open: true,
                ..Default::default()
            };
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, ARROWS_CLOCKWISE, "Refresh").clicked() {
            app.load_accounts();
        }

        ui.add_space(10.0);

        if styled_button_with_icon(ui, FILE_XLS, "Export to Excel").clicked() {
            app.export_accounts();
        }
    });

    ui.add_space(10.0);

    // Toolbar row 2: Search and filter
    ui.horizontal(|ui| {
        ui.label("Search:");
        ui.add(
            egui::TextEdit::singleline(&mut app.account_search)
                .desired_width(200.0)
                .hint_text("Username or name..."),
        );

        ui.add_space(20.0);

        ui.label("Role:");
        egui::ComboBox::from_id_salt("account_role_filter")
            .width(150.0)
            .selected_text(app.account_role_filter.as_ref().map(|r| r.as_str()).unwrap_or("All"))
            .show_ui(ui, |ui| {
                if ui.selectable_label(app.account_role_filter.is_none(), "All").clicked() {
                    app.account_role_filter = None;
                }
                for role in &ALL_ROLES {
                    if ui
                        .selectable_label(app.account_role_filter.as_ref() == Some(role), role.as_str())
                        .clicked()
                    {
                        app.account_role_filter = Some(role.clone());
                    }
                }
            });

        // Clear filters button
        if !app.account_search.is_empty() || app.account_role_filter.is_some() {
            ui.add_space(10.0);
            if styled_button(ui, "Clear").clicked() {
                app.account_search.clear();
                app.account_role_filter = None;
            }
        }
    });

    ui.add_space(15.0);

    if app.is_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label("Loading accounts...");
        });
        return go_back;
    }

    // Table
    show_table(app, ui);

    // Form dialog
    if app.account_form.is_open {
        show_form_dialog(app, ui.ctx());
    }

    go_back
}

fn show_table(app: &mut App, ui: &mut Ui) {
    let search = app.account_search.to_lowercase();

    // Filter accounts
    let filtered: Vec<_> = app
        .accounts
        .iter()
        .filter(|a| {
            let search_match = search.is_empty()
                || a.username.to_lowercase().contains(&search)
                || a.full_name.to_lowercase().contains(&search);

            let role_match = app
                .account_role_filter
                .as_ref()
                .map(|r| Role::parse(&a.role) == *r)
                .unwrap_or(true);

            search_match && role_match
        })
        .cloned()
        .collect();

    ui.label(format!("Showing {} of {} accounts", filtered.len(), app.accounts.len()));

    ui.add_space(10.0);

    let own_username = app.session.as_ref().map(|s| s.username.clone()).unwrap_or_default();

    ScrollArea::vertical().id_salt("accounts_scroll").show(ui, |ui| {
        ui.add_space(4.0);
        egui::Grid::new("accounts_grid")
            .num_columns(7)
            .striped(true)
            .min_col_width(60.0)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                // Header
                ui.strong("Username");
                ui.strong("Full Name");
                ui.strong("Role");
                ui.strong("Phone");
                ui.strong("Outlet");
                ui.strong("Status");
                ui.strong("Actions");
                ui.end_row();

                // Data rows
                for account in &filtered {
                    ui.label(&account.username);
                    ui.label(&account.full_name);
                    ui.label(&account.role);
                    ui.label(&account.phone_number);
                    ui.label(account.outlet.as_deref().unwrap_or("-"));
                    ui.label(account.status.as_deref().unwrap_or("-"));

                    ui.horizontal(|ui| {
                        ui.add_space(8.0);
                        if action_button(ui, PENCIL, "Edit").clicked() {
                            // Pre-fill from the cached row, then refresh
                            // from the detail endpoint
                            app.account_form = AccountForm::edit(account);
                            app.open_account_editor(account.username.clone());
                        }
                        ui.add_space(4.0);
                        let deletable = account.username != own_username;
                        if deletable && danger_action_button(ui, TRASH, "Delete").clicked() {
                            app.request_confirm(ConfirmAction::DeleteAccount(
                                account.username.clone(),
                                account.full_name.clone(),
                            ));
                        }
                    });

                    ui.end_row();
                }
            });
    });
}

fn show_form_dialog(app: &mut App, ctx: &egui::Context) {
    let title = if app.account_form.is_editing {
        "Edit Account"
    } else {
        "Register Account"
    };

    // Role options follow the hierarchy of the account being edited
    let role_options = if app.account_form.is_editing {
        selectable_roles(&app.account_form.role)
    } else {
        ALL_ROLES.to_vec()
    };

    egui::Window::new(title)
        .collapsible(false)
        .resizable(false)
        .default_width(450.0)
        .max_height(550.0)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.add_space(10.0);

            // Validation re-runs every frame, so messages track each
            // keystroke
            let phone_error = validate::validate_phone(&app.account_form.phone_number);
            let name_error = validate::validate_full_name(&app.account_form.full_name);
            let address_error = validate::validate_address(&app.account_form.address);
            let outlet_required = app.account_form.role.requires_outlet();
            let outlet_error = if outlet_required {
                validate::validate_required(&app.account_form.outlet, "Outlet")
            } else {
                None
            };

            ScrollArea::vertical().max_height(450.0).show(ui, |ui| {
                egui::Grid::new("account_form_grid")
                    .num_columns(2)
                    .spacing([20.0, 10.0])
                    .show(ui, |ui| {
                        ui.label("Username:");
                        ui.add_enabled(
                            !app.account_form.is_editing,
                            egui::TextEdit::singleline(&mut app.account_form.username).desired_width(200.0),
                        );
                        ui.end_row();

                        ui.label("Full Name:");
                        ui.vertical(|ui| {
                            ui.add(egui::TextEdit::singleline(&mut app.account_form.full_name).desired_width(250.0));
                            if let Some(error) = &name_error {
                                ui.colored_label(colors::ERROR, error);
                            }
                        });
                        ui.end_row();

                        ui.label("Gender:");
                        egui::ComboBox::from_id_salt("account_form_gender")
                            .width(150.0)
                            .selected_text(app.account_form.gender.as_deref().unwrap_or("Select..."))
                            .show_ui(ui, |ui| {
                                if ui
                                    .selectable_label(app.account_form.gender.is_none(), "None")
                                    .clicked()
                                {
                                    app.account_form.gender = None;
                                }
                                for gender in &["male", "female", "other"] {
                                    if ui
                                        .selectable_label(app.account_form.gender.as_deref() == Some(*gender), *gender)
                                        .clicked()
                                    {
                                        app.account_form.gender = Some(gender.to_string());
                                    }
                                }
                            });
                        ui.end_row();

                        ui.label("Role:");
                        egui::ComboBox::from_id_salt("account_form_role")
                            .width(150.0)
                            .selected_text(app.account_form.role.as_str().to_string())
                            .show_ui(ui, |ui| {
                                for role in &role_options {
                                    if ui
                                        .selectable_label(app.account_form.role == *role, role.as_str())
                                        .clicked()
                                    {
                                        app.account_form.role = role.clone();
                                    }
                                }
                            });
                        ui.end_row();

                        ui.label("Phone Number:");
                        ui.vertical(|ui| {
                            ui.add(
                                egui::TextEdit::singleline(&mut app.account_form.phone_number)
                                    .desired_width(180.0)
                                    .hint_text("+628..."),
                            );
                            if let Some(error) = &phone_error {
                                ui.colored_label(colors::ERROR, error);
                            }
                        });
                        ui.end_row();

                        ui.label("Address:");
                        ui.vertical(|ui| {
                            ui.add(
                                egui::TextEdit::multiline(&mut app.account_form.address)
                                    .desired_width(250.0)
                                    .desired_rows(2),
                            );
                            if let Some(error) = &address_error {
                                ui.colored_label(colors::ERROR, error);
                            }
                        });
                        ui.end_row();

                        ui.label("Date of Birth:");
                        ui.vertical(|ui| {
                            // Determine if current input is valid
                            let is_valid =
                                app.account_form.birth_date_input.is_empty() || app.account_form.birth_date.is_some();

                            // Red text for invalid input
                            let text_color = if is_valid {
                                ui.visuals().text_color()
                            } else {
                                colors::ERROR
                            };

                            let response = ui.add(
                                egui::TextEdit::singleline(&mut app.account_form.birth_date_input)
                                    .desired_width(120.0)
                                    .hint_text("YYYY-MM-DD")
                                    .text_color(text_color),
                            );

                            // Parse on change - update parsed date if valid
                            if response.changed() {
                                app.account_form.birth_date = parse_flexible_date(&app.account_form.birth_date_input);
                            }

                            // Show format hint (red if invalid)
                            if !is_valid {
                                ui.colored_label(colors::ERROR, "Invalid date format");
                            } else {
                                ui.weak("Format: YYYY-MM-DD");
                            }
                        });
                        ui.end_row();

                        ui.label("Outlet:");
                        ui.vertical(|ui| {
                            // Management accounts are not tied to an outlet
                            ui.add_enabled(
                                outlet_required,
                                egui::TextEdit::singleline(&mut app.account_form.outlet).desired_width(180.0),
                            );
                            if let Some(error) = &outlet_error {
                                ui.colored_label(colors::ERROR, error);
                            } else if !outlet_required {
                                ui.weak("Not applicable for this role");
                            }
                        });
                        ui.end_row();
                    });
            });

            ui.add_space(15.0);
            ui.separator();
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if styled_button(ui, "Cancel").clicked() {
                    app.account_form.reset();
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if primary_button_with_icon(ui, "", "Save").clicked() {
                        save_account(app);
                    }
                });
            });
        });
}

fn save_account(app: &mut App) {
    let form = &app.account_form;

    // Validation gates submission; the server re-validates everything
    if form.username.trim().is_empty() {
        app.error_message = Some("Username is required".to_string());
        return;
    }
    if let Some(error) = validate::validate_full_name(&form.full_name) {
        app.error_message = Some(error);
        return;
    }
    if let Some(error) = validate::validate_phone(&form.phone_number) {
        app.error_message = Some(error);
        return;
    }
    if let Some(error) = validate::validate_address(&form.address) {
        app.error_message = Some(error);
        return;
    }
    if !form.birth_date_input.is_empty() && form.birth_date.is_none() {
        app.error_message = Some("Invalid date of birth".to_string());
        return;
    }

    // Outlet is required for outlet-bound roles and excluded from the
    // payload otherwise
    let outlet = if form.role.requires_outlet() {
        if let Some(error) = validate::validate_required(&form.outlet, "Outlet") {
            app.error_message = Some(error);
            return;
        }
        Some(form.outlet.trim().to_string())
    } else {
        None
    };

    if form.is_editing {
        let username = form.username.clone();
        let data = UpdateAccount {
            full_name: Some(form.full_name.trim().to_string()),
            gender: form.gender.clone(),
            role: Some(form.role.as_str().to_string()),
            phone_number: Some(form.phone_number.trim().to_string()),
            address: Some(form.address.trim().to_string()),
            date_of_birth: form.birth_date,
            outlet,
        };
        app.update_account(username, data);
    } else {
        let data = RegisterAccount {
            username: form.username.trim().to_string(),
            full_name: form.full_name.trim().to_string(),
            gender: form.gender.clone(),
            role: form.role.as_str().to_string(),
            phone_number: form.phone_number.trim().to_string(),
            address: form.address.trim().to_string(),
            date_of_birth: form.birth_date,
            outlet,
        };
        app.register_account(data);
    }
}
