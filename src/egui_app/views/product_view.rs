//! Product list and product details views, shared by both tab sets

use eframe::egui;

use super::{detail_row, heading, loading, money, notices, or_na};
use crate::egui_app::navigation::Route;
use crate::egui_app::screens::{
    ProductDetailsScreen, ProductForm, ProductScope, ProductsScreen, ScreenContext,
};
use crate::egui_app::state::Action;
use crate::egui_app::theme::{colors, styles};

fn text_field(ui: &mut egui::Ui, label: &str, value: &mut String, width: f32) {
    ui.horizontal(|ui| {
        ui.add_sized(
            [110.0, 20.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        ui.add(egui::TextEdit::singleline(value).desired_width(width));
    });
}

fn product_form(ui: &mut egui::Ui, form: &mut ProductForm) {
    text_field(ui, "Name:", &mut form.name, 260.0);
    ui.horizontal(|ui| {
        ui.add_sized(
            [110.0, 20.0],
            egui::Label::new(egui::RichText::new("Description:").color(colors::TEXT_SECONDARY)),
        );
        ui.add(egui::TextEdit::multiline(&mut form.description).desired_rows(3).desired_width(260.0));
    });
    text_field(ui, "Category:", &mut form.category, 260.0);
    text_field(ui, "Price:", &mut form.price, 120.0);
}

fn render_filters(ui: &mut egui::Ui, screen: &mut ProductsScreen, ctx: &ScreenContext) {
    egui::CollapsingHeader::new(egui::RichText::new("Filters").color(colors::TEXT_SECONDARY))
        .default_open(!screen.applied_filters().is_empty())
        .show(ui, |ui| {
            text_field(ui, "Name:", &mut screen.filters.name, 200.0);
            text_field(ui, "Category:", &mut screen.filters.category, 200.0);
            ui.horizontal(|ui| {
                ui.add_sized(
                    [110.0, 20.0],
                    egui::Label::new(egui::RichText::new("Price:").color(colors::TEXT_SECONDARY)),
                );
                ui.add(
                    egui::TextEdit::singleline(&mut screen.filters.price_min)
                        .hint_text("min")
                        .desired_width(70.0),
                );
                ui.label("–");
                ui.add(
                    egui::TextEdit::singleline(&mut screen.filters.price_max)
                        .hint_text("max")
                        .desired_width(70.0),
                );
            });
            ui.horizontal(|ui| {
                if ui.button("Apply").clicked() {
                    screen.apply_filters(ctx);
                }
                if ui.button("Clear").clicked() {
                    screen.clear_filters(ctx);
                }
            });
        });
    ui.add_space(8.0);
}

pub fn render_list(
    ui: &mut egui::Ui,
    screen: &mut ProductsScreen,
    ctx: &ScreenContext,
) -> Option<Action> {
    let mut action = None;
    let admin = screen.scope() == ProductScope::Admin;

    ui.horizontal(|ui| {
        heading(ui, if admin { "Manage Products" } else { "Products" });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!screen.is_loading(), egui::Button::new("⟳ Refresh"))
                .clicked()
            {
                screen.refresh(ctx);
            }
            if admin && screen.draft.is_none() && ui.button("＋ New Product").clicked() {
                screen.start_create();
            }
        });
    });
    notices(ui, &mut screen.notice, Some(&mut screen.success));
    render_filters(ui, screen, ctx);

    let creating = screen.is_creating();
    let mut submit = false;
    let mut cancel = false;
    if let Some(draft) = screen.draft.as_mut() {
        styles::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new("New Product").strong().color(colors::TEXT_LIGHT));
            product_form(ui, draft);
            ui.horizontal(|ui| {
                submit = ui
                    .add_enabled(
                        !creating,
                        egui::Button::new(egui::RichText::new("Create").color(colors::TEXT_LIGHT))
                            .fill(colors::BUTTON_PRIMARY),
                    )
                    .clicked();
                cancel = ui.button("Cancel").clicked();
                if creating {
                    ui.spinner();
                }
            });
        });
        ui.add_space(8.0);
    }
    if submit {
        screen.submit_create(ctx);
    } else if cancel {
        screen.cancel_create();
    }

    if !screen.is_loaded() {
        if screen.is_loading() {
            loading(ui, "Loading products...");
        }
        return None;
    }
    if screen.products().is_empty() {
        ui.label(egui::RichText::new("No products found.").color(colors::TEXT_SECONDARY));
        return None;
    }

    for product in screen.products() {
        let mut add = false;
        let response = styles::card_frame()
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(&product.item_name)
                            .strong()
                            .color(colors::TEXT_LIGHT),
                    );
                    if let Some(category) = &product.category {
                        ui.label(egui::RichText::new(category).small().color(colors::TEXT_SECONDARY));
                    }
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if !admin && ui.button("Add to cart").clicked() {
                            add = true;
                        }
                        ui.label(egui::RichText::new(money(product.price)).color(colors::TEXT_LIGHT));
                    });
                });
                if let Some(description) = &product.item_description {
                    ui.label(egui::RichText::new(description).color(colors::TEXT_SECONDARY));
                }
            })
            .response;

        if add {
            action = Some(Action::AddToCart(product.clone()));
        } else if response.interact(egui::Sense::click()).clicked() {
            action = Some(Action::Open(Route::ProductDetails {
                item_id: product.item_id,
            }));
        }
        ui.add_space(6.0);
    }

    action
}

pub fn render_details(
    ui: &mut egui::Ui,
    screen: &mut ProductDetailsScreen,
    ctx: &ScreenContext,
) -> Option<Action> {
    let mut action = None;
    heading(ui, &format!("Product #{}", screen.item_id()));
    notices(ui, &mut screen.notice, Some(&mut screen.success));

    let Some(product) = screen.product().cloned() else {
        if screen.is_loading() {
            loading(ui, "Loading Product Details...");
        } else {
            ui.label(egui::RichText::new("Product not found.").color(colors::ERROR));
        }
        return None;
    };

    let busy = screen.is_busy();
    if screen.editing {
        let mut save = false;
        let mut cancel = false;
        styles::card_frame().show(ui, |ui| {
            ui.set_width(ui.available_width());
            product_form(ui, &mut screen.form);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                save = ui
                    .add_enabled(
                        !busy,
                        egui::Button::new(egui::RichText::new("Save").color(colors::TEXT_LIGHT))
                            .fill(colors::BUTTON_PRIMARY),
                    )
                    .clicked();
                cancel = ui.button("Cancel").clicked();
                if busy {
                    ui.spinner();
                }
            });
        });
        if save {
            screen.submit(ctx);
        } else if cancel {
            screen.cancel_edit();
        }
        return None;
    }

    styles::card_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        detail_row(ui, "Product Name:", product.item_name.clone());
        detail_row(ui, "Description:", or_na(product.item_description.as_deref()));
        detail_row(ui, "Category:", or_na(product.category.as_deref()));
        detail_row(ui, "Price:", money(product.price));
        detail_row(ui, "Listed:", or_na(product.created_at.as_deref()));
    });
    ui.add_space(8.0);

    ui.horizontal(|ui| {
        if screen.can_manage() {
            if ui.add_enabled(!busy, egui::Button::new("Edit")).clicked() {
                screen.start_edit();
            }
            let delete = egui::Button::new(egui::RichText::new("Delete").color(colors::TEXT_LIGHT))
                .fill(colors::BUTTON_DANGER);
            if ui.add_enabled(!busy, delete).clicked() {
                screen.request_delete();
            }
        } else if ui.button("Add to cart").clicked() {
            action = Some(Action::AddToCart(product.clone()));
        }
        if busy {
            ui.spinner();
        }
    });

    if screen.confirm_delete {
        let mut open = true;
        let mut confirmed = false;
        egui::Window::new("Confirm Delete")
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .show(ui.ctx(), |ui| {
                ui.label("Are you sure you want to delete this product?");
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        screen.confirm_delete = false;
                    }
                    let delete =
                        egui::Button::new(egui::RichText::new("Delete").color(colors::TEXT_LIGHT))
                            .fill(colors::BUTTON_DANGER);
                    if ui.add(delete).clicked() {
                        confirmed = true;
                    }
                });
            });
        if !open {
            screen.confirm_delete = false;
        }
        if confirmed {
            screen.delete(ctx);
        }
    }

    action
}
