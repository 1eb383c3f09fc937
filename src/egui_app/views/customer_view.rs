//! Customer-only views: home, cart, profile

use eframe::egui;

use super::{detail_row, heading, money, or_na};
use crate::egui_app::navigation::{Route, Tab};
use crate::egui_app::screens::Cart;
use crate::egui_app::session::Session;
use crate::egui_app::state::Action;
use crate::egui_app::theme::{colors, styles};

pub fn render_home(ui: &mut egui::Ui, session: &Session, cart: &Cart) -> Option<Action> {
    let mut action = None;
    let username = session.user().map(|u| u.username()).unwrap_or_default();

    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.label(
            egui::RichText::new(format!("Welcome, {}", username))
                .size(28.0)
                .strong()
                .color(colors::TEXT_LIGHT),
        );
        if let Some(role) = session.role() {
            ui.label(egui::RichText::new(format!("Your role: {}", role)).color(colors::TEXT_SECONDARY));
        }
        ui.add_space(24.0);

        if ui.add_sized([200.0, 32.0], egui::Button::new("Browse products")).clicked() {
            action = Some(Action::SelectTab(Tab::Products));
        }
        if !cart.is_empty() {
            ui.label(
                egui::RichText::new(format!(
                    "{} item(s) in your cart · {}",
                    cart.item_count(),
                    money(cart.total())
                ))
                .color(colors::TEXT_SECONDARY),
            );
        }
        ui.add_space(16.0);

        if ui.button("Logout").clicked() {
            action = Some(Action::SignOut);
        }
    });

    action
}

pub fn render_cart(ui: &mut egui::Ui, cart: &mut Cart) -> Option<Action> {
    let mut action = None;
    heading(ui, "Cart");

    if cart.is_empty() {
        ui.label(egui::RichText::new("Your cart is empty.").color(colors::TEXT_SECONDARY));
        return None;
    }

    let mut changes: Vec<(i64, u32)> = Vec::new();
    for line in cart.lines() {
        let item_id = line.product.item_id;
        styles::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                if ui
                    .link(
                        egui::RichText::new(&line.product.item_name)
                            .strong()
                            .color(colors::TEXT_LIGHT),
                    )
                    .clicked()
                {
                    action = Some(Action::Open(Route::ProductDetails { item_id }));
                }
                ui.label(egui::RichText::new(money(line.product.price)).color(colors::TEXT_SECONDARY));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Remove").clicked() {
                        changes.push((item_id, 0));
                    }
                    ui.label(egui::RichText::new(money(line.subtotal())).color(colors::TEXT_LIGHT));
                    if ui.small_button("＋").clicked() {
                        changes.push((item_id, line.quantity.saturating_add(1)));
                    }
                    ui.label(
                        egui::RichText::new(line.quantity.to_string()).color(colors::TEXT_LIGHT),
                    );
                    if ui.small_button("－").clicked() {
                        changes.push((item_id, line.quantity.saturating_sub(1)));
                    }
                });
            });
        });
        ui.add_space(6.0);
    }

    for (item_id, quantity) in changes {
        cart.set_quantity(item_id, quantity);
    }

    ui.separator();
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("Total ({} items)", cart.item_count()))
                .strong()
                .color(colors::TEXT_LIGHT),
        );
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Clear cart").clicked() {
                cart.clear();
            }
            ui.label(
                egui::RichText::new(money(cart.total()))
                    .size(18.0)
                    .strong()
                    .color(colors::TEXT_LIGHT),
            );
        });
    });

    action
}

pub fn render_profile(ui: &mut egui::Ui, session: &Session) -> Option<Action> {
    let Some(user) = session.user() else {
        return None;
    };
    let mut action = None;

    heading(ui, &user.display_name());
    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        detail_row(ui, "Username:", user.username());
        detail_row(ui, "First Name:", or_na(user.first_name().as_deref()));
        detail_row(ui, "Last Name:", or_na(user.last_name().as_deref()));
        detail_row(ui, "Email:", or_na(user.email().as_deref()));
        detail_row(ui, "Phone Number:", or_na(user.number().as_deref()));
        detail_row(
            ui,
            "Role:",
            session.role().map(ToString::to_string).unwrap_or_default(),
        );
        let address = user.address().map(|a| a.one_line()).filter(|a| !a.is_empty());
        detail_row(ui, "Address:", or_na(address.as_deref()));
    });
    ui.add_space(16.0);

    let logout = egui::Button::new(egui::RichText::new("Logout").color(colors::TEXT_LIGHT))
        .fill(colors::BUTTON_DANGER);
    if ui.add_sized([160.0, 32.0], logout).clicked() {
        action = Some(Action::SignOut);
    }

    action
}
