//! Order list and order details views

use eframe::egui;

use super::{detail_row, heading, loading, money, notices, or_na};
use crate::egui_app::navigation::Route;
use crate::egui_app::screens::{OrderDetailsScreen, OrderScope, OrdersScreen, ScreenContext};
use crate::egui_app::state::Action;
use crate::egui_app::theme::{colors, styles};
use crate::shared::models::{Address, ORDER_STATUS_OPTIONS, PAYMENT_STATUS_OPTIONS};

pub fn render_list(
    ui: &mut egui::Ui,
    screen: &mut OrdersScreen,
    ctx: &ScreenContext,
) -> Option<Action> {
    let mut action = None;

    ui.horizontal(|ui| {
        heading(
            ui,
            match screen.scope() {
                OrderScope::Admin => "All Orders",
                OrderScope::Customer => "My Orders",
            },
        );
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

    if !screen.is_loaded() {
        if screen.is_loading() {
            loading(ui, "Loading orders...");
        }
        return None;
    }
    if screen.orders().is_empty() {
        ui.label(egui::RichText::new("No orders found.").color(colors::TEXT_SECONDARY));
        return None;
    }

    let clickable = screen.scope() == OrderScope::Admin;
    for order in screen.orders() {
        let response = styles::card_frame()
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("Order #{}", order.order_id))
                            .strong()
                            .color(colors::TEXT_LIGHT),
                    );
                    ui.label(
                        egui::RichText::new(&order.status).color(colors::status_color(&order.status)),
                    );
                    if let Some(payment) = &order.payment_status {
                        ui.label(egui::RichText::new(payment).color(colors::status_color(payment)));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(money(order.total_amount)).color(colors::TEXT_LIGHT),
                        );
                    });
                });
                if let Some(created) = &order.created_at {
                    ui.label(egui::RichText::new(created).small().color(colors::TEXT_SECONDARY));
                }
            })
            .response;

        if clickable && response.interact(egui::Sense::click()).clicked() {
            action = Some(Action::Open(Route::OrderDetails {
                order_id: order.order_id,
            }));
        }
        ui.add_space(6.0);
    }

    action
}

fn address_card(ui: &mut egui::Ui, title: &str, address: Option<Address>) {
    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new(title).strong().color(colors::TEXT_LIGHT));
        match address {
            Some(address) => {
                for line in [&address.street, &address.city, &address.postcode, &address.country]
                    .into_iter()
                    .flatten()
                {
                    ui.label(egui::RichText::new(line).color(colors::TEXT_LIGHT));
                }
            }
            None => {
                ui.label(egui::RichText::new("N/A").color(colors::TEXT_SECONDARY));
            }
        }
    });
    ui.add_space(8.0);
}

fn choice(ui: &mut egui::Ui, id: &str, label: &str, value: &mut String, options: &[&str]) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [140.0, 20.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        egui::ComboBox::from_id_salt(id)
            .selected_text(if value.is_empty() { "Select…" } else { value.as_str() })
            .show_ui(ui, |ui| {
                for option in options {
                    ui.selectable_value(value, option.to_string(), *option);
                }
            });
    });
}

pub fn render_details(
    ui: &mut egui::Ui,
    screen: &mut OrderDetailsScreen,
    ctx: &ScreenContext,
) -> Option<Action> {
    heading(ui, &format!("Order #{}", screen.order_id()));
    notices(ui, &mut screen.notice, Some(&mut screen.success));

    let Some(order) = screen.order().cloned() else {
        if screen.is_loading() {
            loading(ui, "Loading order details...");
        } else {
            ui.label(egui::RichText::new("Order not found.").color(colors::ERROR));
        }
        return None;
    };

    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        let customer = order
            .extra
            .get("full_name")
            .and_then(|v| v.as_str())
            .map(str::to_string);
        detail_row(ui, "Customer:", or_na(customer.as_deref()));
        detail_row(ui, "Total Amount:", money(order.total_amount));
        detail_row(
            ui,
            "Shipping Cost:",
            order.shipping_cost.map(money).unwrap_or_else(|| "N/A".into()),
        );
        detail_row(ui, "Payment Status:", or_na(order.payment_status.as_deref()));
        detail_row(ui, "Status:", order.status.clone());
        detail_row(ui, "Last Updated:", or_na(order.updated_at.as_deref()));
    });
    ui.add_space(8.0);

    address_card(ui, "Shipping Address", order.shipping_address());
    address_card(ui, "Billing Address", order.billing_address());

    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(egui::RichText::new("Update Order").strong().color(colors::TEXT_LIGHT));
        ui.add_space(4.0);
        choice(ui, "order_status", "Status:", &mut screen.form.status, &ORDER_STATUS_OPTIONS);
        choice(
            ui,
            "payment_status",
            "Payment Status:",
            &mut screen.form.payment_status,
            &PAYMENT_STATUS_OPTIONS,
        );
        ui.horizontal(|ui| {
            ui.add_sized(
                [140.0, 20.0],
                egui::Label::new(egui::RichText::new("Shipping Cost:").color(colors::TEXT_SECONDARY)),
            );
            ui.add(egui::TextEdit::singleline(&mut screen.form.shipping_cost).desired_width(120.0));
        });
        ui.add_space(8.0);

        let saving = screen.is_saving();
        ui.horizontal(|ui| {
            let button = egui::Button::new(
                egui::RichText::new(if saving { "Updating..." } else { "Update Order" })
                    .color(colors::TEXT_LIGHT),
            )
            .fill(colors::BUTTON_PRIMARY);
            if ui.add_enabled(!saving, button).clicked() {
                screen.submit(ctx);
            }
            if saving {
                ui.spinner();
            }
        });
    });

    None
}
