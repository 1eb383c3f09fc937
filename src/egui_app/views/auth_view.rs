use eframe::egui;

use crate::egui_app::state::AppState;
use crate::egui_app::theme::colors;

const INPUT_WIDTH: f32 = 280.0;
const LABEL_WIDTH: f32 = 90.0;

fn field(ui: &mut egui::Ui, width: f32, label: &str, value: &mut String, password: bool) {
    ui.horizontal(|ui| {
        ui.add_space(((width - INPUT_WIDTH - LABEL_WIDTH - 20.0) / 2.0).max(0.0));
        ui.add_sized(
            [LABEL_WIDTH, 24.0],
            egui::Label::new(egui::RichText::new(label).color(colors::TEXT_SECONDARY)),
        );
        ui.add_sized(
            [INPUT_WIDTH, 28.0],
            egui::TextEdit::singleline(value)
                .password(password)
                .text_color(colors::TEXT_LIGHT),
        );
    });
    ui.add_space(8.0);
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let available_rect = ui.available_rect_before_wrap();
    let width = available_rect.width();
    let signup = state.is_signup_mode();

    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.vertical_centered(|ui| {
            let total_height = if signup { 520.0 } else { 280.0 };
            ui.add_space(((available_rect.height() - total_height) / 2.0).max(16.0));

            ui.label(
                egui::RichText::new("🛒 MarketSquare")
                    .size(32.0)
                    .strong()
                    .color(colors::TEXT_LIGHT),
            );
            ui.add_space(20.0);

            ui.label(
                egui::RichText::new(if signup { "Create Account" } else { "Welcome Back" })
                    .size(24.0)
                    .color(colors::TEXT_LIGHT),
            );
            ui.add_space(20.0);

            if let Some(ref error) = state.auth_error {
                ui.label(egui::RichText::new(error).color(colors::ERROR));
                ui.add_space(10.0);
            }

            field(ui, width, "Username:", &mut state.username_input, false);
            if signup {
                field(ui, width, "Email:", &mut state.email_input, false);
            }
            field(ui, width, "Password:", &mut state.password_input, true);
            if signup {
                field(ui, width, "Confirm:", &mut state.confirm_password_input, true);

                egui::CollapsingHeader::new(
                    egui::RichText::new("Profile details (optional)").color(colors::TEXT_SECONDARY),
                )
                .default_open(false)
                .show(ui, |ui| {
                    field(ui, width, "First name:", &mut state.first_name_input, false);
                    field(ui, width, "Last name:", &mut state.last_name_input, false);
                    field(ui, width, "Phone:", &mut state.number_input, false);
                    field(ui, width, "Street:", &mut state.street_input, false);
                    field(ui, width, "City:", &mut state.city_input, false);
                    field(ui, width, "Postcode:", &mut state.postcode_input, false);
                    field(ui, width, "Country:", &mut state.country_input, false);
                });
            }

            ui.add_space(20.0);

            let busy = state.is_auth_busy();
            ui.horizontal(|ui| {
                let button_width = 120.0;
                let total_buttons_width = button_width * 2.0 + 10.0;
                ui.add_space(((width - total_buttons_width) / 2.0).max(0.0));

                let submit = egui::Button::new(
                    egui::RichText::new(if signup { "Sign Up" } else { "Login" })
                        .color(colors::TEXT_LIGHT),
                )
                .fill(colors::ACCENT);
                if ui
                    .add_enabled_ui(!busy, |ui| ui.add_sized([button_width, 32.0], submit))
                    .inner
                    .clicked()
                {
                    if signup {
                        state.handle_signup();
                    } else {
                        state.handle_login();
                    }
                }

                ui.add_space(10.0);

                let toggle = egui::Button::new(
                    egui::RichText::new(if signup { "Back to Login" } else { "Create Account" })
                        .color(colors::TEXT_SECONDARY),
                );
                if ui.add_sized([button_width, 32.0], toggle).clicked() {
                    state.toggle_auth_mode();
                }
            });

            if busy {
                ui.add_space(15.0);
                ui.horizontal(|ui| {
                    ui.add_space(((width - 100.0) / 2.0).max(0.0));
                    ui.label(egui::RichText::new("Loading...").color(colors::TEXT_LIGHT));
                    ui.spinner();
                });
            }
        });
    });
}
