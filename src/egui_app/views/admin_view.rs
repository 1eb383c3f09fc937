//! Admin-only views: dashboard, user management, endpoint inspector

use eframe::egui;

use super::{detail_row, heading, loading, notices, or_na};
use crate::egui_app::screens::{EndpointsScreen, ScreenContext, UsersScreen};
use crate::egui_app::session::Session;
use crate::egui_app::state::Action;
use crate::egui_app::theme::{colors, styles};
use crate::shared::role::Role;

/// Badge colour for a role as the backend reported it
fn role_color(role: Option<&str>) -> egui::Color32 {
    if role.map(Role::from).is_some_and(|r| r.is_admin()) {
        colors::ADMIN_ACCENT
    } else {
        colors::TEXT_SECONDARY
    }
}

pub fn render_dashboard(ui: &mut egui::Ui, session: &Session) -> Option<Action> {
    let Some(user) = session.user() else {
        return None;
    };
    let mut action = None;

    ui.vertical_centered(|ui| {
        ui.add_space(20.0);
        let name = user
            .first_name()
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| "Admin".to_string());
        ui.label(
            egui::RichText::new(format!("Welcome, {}", name))
                .size(28.0)
                .strong()
                .color(colors::TEXT_LIGHT),
        );
        ui.add_space(16.0);
    });

    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        detail_row(ui, "First Name:", or_na(user.first_name().as_deref()));
        detail_row(ui, "Last Name:", or_na(user.last_name().as_deref()));
        detail_row(ui, "Username:", user.username());
        detail_row(ui, "Email:", or_na(user.email().as_deref()));
        detail_row(ui, "Phone Number:", or_na(user.number().as_deref()));
        detail_row(
            ui,
            "Role:",
            session.role().map(ToString::to_string).unwrap_or_default(),
        );
    });
    ui.add_space(16.0);

    ui.vertical_centered(|ui| {
        let logout = egui::Button::new(egui::RichText::new("Logout").color(colors::TEXT_LIGHT))
            .fill(colors::BUTTON_DANGER);
        if ui.add_sized([160.0, 32.0], logout).clicked() {
            action = Some(Action::SignOut);
        }
    });

    action
}

pub fn render_users(
    ui: &mut egui::Ui,
    screen: &mut UsersScreen,
    ctx: &ScreenContext,
) -> Option<Action> {
    ui.horizontal(|ui| {
        heading(ui, "Manage Users");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!screen.is_loading(), egui::Button::new("⟳ Refresh"))
                .clicked()
            {
                screen.refresh(ctx);
            }
        });
    });
    notices(ui, &mut screen.notice, None);

    ui.add(
        egui::TextEdit::singleline(&mut screen.search)
            .hint_text("Search users")
            .desired_width(280.0),
    );
    ui.add_space(8.0);

    if !screen.is_loaded() {
        if screen.is_loading() {
            loading(ui, "Loading Users...");
        }
        return None;
    }

    let users = screen.visible_users();
    if users.is_empty() {
        ui.label(egui::RichText::new("No Users Found").color(colors::TEXT_SECONDARY));
        return None;
    }

    for user in users {
        styles::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            let name = [user.first_name.as_deref(), user.last_name.as_deref()]
                .into_iter()
                .flatten()
                .collect::<Vec<_>>()
                .join(" ");
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("@{}", user.username))
                        .strong()
                        .color(colors::TEXT_LIGHT),
                );
                if !name.is_empty() {
                    ui.label(egui::RichText::new(name).color(colors::TEXT_SECONDARY));
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let color = role_color(user.role.as_deref());
                    ui.label(egui::RichText::new(or_na(user.role.as_deref())).color(color));
                });
            });
            detail_row(ui, "Email:", or_na(user.email.as_deref()));
            detail_row(ui, "Phone:", or_na(user.number.as_deref()));
        });
        ui.add_space(6.0);
    }

    None
}

pub fn render_endpoints(
    ui: &mut egui::Ui,
    screen: &mut EndpointsScreen,
    ctx: &ScreenContext,
) -> Option<Action> {
    ui.horizontal(|ui| {
        heading(ui, "API Endpoints");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!screen.is_loading(), egui::Button::new("⟳ Refresh"))
                .clicked()
            {
                screen.refresh(ctx);
            }
        });
    });
    notices(ui, &mut screen.notice, None);

    let Some(api) = screen.description().cloned() else {
        if screen.is_loading() {
            loading(ui, "Loading API endpoints...");
        }
        return None;
    };

    ui.label(egui::RichText::new(&api.base_url).monospace().color(colors::TEXT_SECONDARY));
    ui.add_space(8.0);

    let mut toggled = None;
    for (category, paths) in &api.endpoints {
        let expanded = screen.is_expanded(category);
        let marker = if expanded { "▼" } else { "▶" };
        let header = ui.add(
            egui::Button::new(
                egui::RichText::new(format!("{} {}", marker, category))
                    .size(16.0)
                    .strong()
                    .color(colors::TEXT_LIGHT),
            )
            .frame(false),
        );
        if header.clicked() {
            toggled = Some(category.clone());
        }

        if expanded {
            for (path, methods) in paths {
                styles::card_frame().show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        egui::RichText::new(screen.full_url(path))
                            .monospace()
                            .color(colors::ACCENT),
                    );
                    for (method, details) in methods {
                        ui.horizontal(|ui| {
                            ui.label(
                                egui::RichText::new(method)
                                    .strong()
                                    .color(colors::TEXT_LIGHT),
                            );
                            ui.label(
                                egui::RichText::new(
                                    details
                                        .description
                                        .as_deref()
                                        .unwrap_or("No description available"),
                                )
                                .color(colors::TEXT_SECONDARY),
                            );
                        });
                    }
                });
                ui.add_space(4.0);
            }
        }
        ui.add_space(6.0);
    }

    if let Some(category) = toggled {
        screen.toggle(&category);
    }

    None
}
