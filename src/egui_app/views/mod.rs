use eframe::egui;

use crate::egui_app::navigation::{Route, Tab};
use crate::egui_app::screens::Screen;
use crate::egui_app::state::{Action, AppState};
use crate::egui_app::theme::{colors, styles};

pub mod admin_view;
pub mod auth_view;
pub mod customer_view;
pub mod order_view;
pub mod product_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let can_go_back = state
                    .navigator
                    .active_tab()
                    .and_then(|tab| state.navigator.stack(tab))
                    .is_some_and(|stack| stack.len() > 1);
                if can_go_back && ui.button("◀ Back").clicked() {
                    state.apply(Action::Back);
                }

                ui.colored_label(
                    colors::TEXT_LIGHT,
                    egui::RichText::new("🛒 MarketSquare").size(18.0).strong(),
                );
                if let Some(route) = state.navigator.current_route() {
                    if !matches!(route, Route::Login | Route::Signup) {
                        ui.colored_label(colors::TEXT_SECONDARY, format!("· {}", route));
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let session = state.session();
                    if let Some(user) = session.user() {
                        if ui.button("Logout").clicked() {
                            state.logout();
                        }
                        let accent = if session.is_admin() {
                            colors::ADMIN_ACCENT
                        } else {
                            colors::ACCENT
                        };
                        if let Some(role) = session.role() {
                            ui.colored_label(accent, format!("[{}]", role));
                        }
                        ui.colored_label(colors::TEXT_LIGHT, format!("@{}", user.username()));
                    }

                    if let Some(notice) = state.notice.clone() {
                        ui.add_space(16.0);
                        if ui.small_button("✕").clicked() {
                            state.notice = None;
                        }
                        ui.colored_label(colors::WARNING, notice);
                    }
                });
            });
        });
}

/// Tab bar for the authenticated flow; nothing is drawn otherwise
pub fn render_tab_bar(ctx: &egui::Context, state: &mut AppState) {
    let tabs = state.navigator.visible_tabs();
    if tabs.is_empty() {
        return;
    }
    let active = state.navigator.active_tab();
    let cart_count = state.cart.item_count();

    egui::TopBottomPanel::bottom("tab_bar")
        .frame(styles::tab_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                for tab in tabs {
                    let title = match tab {
                        Tab::Cart if cart_count > 0 => {
                            format!("{} ({})", tab.title(), cart_count)
                        }
                        _ => tab.title().to_string(),
                    };
                    let selected = active == Some(*tab);
                    let text = egui::RichText::new(title).size(15.0).color(if selected {
                        colors::TEXT_LIGHT
                    } else {
                        colors::TEXT_SECONDARY
                    });
                    if ui.selectable_label(selected, text).clicked() {
                        state.select_tab(*tab);
                    }
                    ui.add_space(12.0);
                }
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    let restoring = state.navigator.is_restoring();
    let route = state.navigator.current_route();

    egui::CentralPanel::default()
        .frame(styles::content_frame())
        .show(ctx, |ui| match route {
            _ if restoring => loading(ui, "Restoring session..."),
            Some(Route::Login | Route::Signup) => auth_view::render(ui, state),
            Some(route) => {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| render_route(ui, state, route));
            }
            None => {}
        });
}

fn render_route(ui: &mut egui::Ui, state: &mut AppState, route: Route) {
    let ctx = state.screen_context().clone();
    let session = state.session();

    let action = match route {
        Route::Dashboard => admin_view::render_dashboard(ui, &session),
        Route::Home => customer_view::render_home(ui, &session, &state.cart),
        Route::Profile => customer_view::render_profile(ui, &session),
        Route::Cart => customer_view::render_cart(ui, &mut state.cart),
        other => match state.screens.get_mut(&other) {
            Some(Screen::Orders(screen)) => order_view::render_list(ui, screen, &ctx),
            Some(Screen::OrderDetails(screen)) => order_view::render_details(ui, screen, &ctx),
            Some(Screen::Products(screen)) => product_view::render_list(ui, screen, &ctx),
            Some(Screen::ProductDetails(screen)) => {
                product_view::render_details(ui, screen, &ctx)
            }
            Some(Screen::Users(screen)) => admin_view::render_users(ui, screen, &ctx),
            Some(Screen::Endpoints(screen)) => admin_view::render_endpoints(ui, screen, &ctx),
            Some(Screen::Static) | None => {
                loading(ui, "Loading...");
                None
            }
        },
    };

    if let Some(action) = action {
        state.apply(action);
    }
}

pub(crate) fn loading(ui: &mut egui::Ui, text: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.spinner();
        ui.label(egui::RichText::new(text).color(colors::TEXT_SECONDARY));
    });
}

pub(crate) fn heading(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(22.0)
            .strong()
            .color(colors::TEXT_LIGHT),
    );
    ui.add_space(8.0);
}

/// Error and success messages for a screen, each dismissible
pub(crate) fn notices(
    ui: &mut egui::Ui,
    notice: &mut Option<String>,
    success: Option<&mut Option<String>>,
) {
    if let Some(message) = notice.clone() {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(message).color(colors::ERROR));
            if ui.small_button("✕").clicked() {
                *notice = None;
            }
        });
    }
    if let Some(success) = success {
        if let Some(message) = success.clone() {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(message).color(colors::SUCCESS));
                if ui.small_button("✕").clicked() {
                    *success = None;
                }
            });
        }
    }
}

pub(crate) fn detail_row(ui: &mut egui::Ui, label: &str, value: impl Into<String>) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [140.0, 20.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        ui.label(egui::RichText::new(value.into()).color(colors::TEXT_LIGHT));
    });
}

pub(crate) fn or_na(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("N/A")
        .to_string()
}

pub(crate) fn money(amount: f64) -> String {
    format!("£{:.2}", amount)
}
