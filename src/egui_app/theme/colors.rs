//! Color Constants for the Storefront Theme
//!
//! A dark slate base with a blue accent. Admin screens use the same palette
//! with `ADMIN_ACCENT` for highlights so the two flows are easy to tell apart.

use eframe::egui::Color32;

/// Top bar background - Deep slate
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x1B, 0x22, 0x33);

/// Bottom tab bar background
pub const TAB_BAR_BG: Color32 = Color32::from_rgb(0x1B, 0x22, 0x33);

/// Dark background for main areas
pub const BG_DARK: Color32 = Color32::from_rgb(0x12, 0x17, 0x22);

/// Card background
pub const CARD_BG: Color32 = Color32::from_rgb(0x22, 0x2B, 0x3F);

/// Card border
pub const CARD_BORDER: Color32 = Color32::from_rgb(0x33, 0x3F, 0x59);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xEC, 0xEF, 0xF4);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x9A, 0xA5, 0xB8);

/// Accent color for highlights - Dodger blue
pub const ACCENT: Color32 = Color32::from_rgb(0x1E, 0x90, 0xFF);

/// Admin accent - Steel blue
pub const ADMIN_ACCENT: Color32 = Color32::from_rgb(0x46, 0x82, 0xB4);

/// Selected tab background
pub const SELECTED_TAB: Color32 = Color32::from_rgb(0x2C, 0x3A, 0x55);

/// Input background
pub const INPUT_BG: Color32 = Color32::from_rgb(0x2A, 0x33, 0x47);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xFF, 0x52, 0x52);

/// Warning color - Orange
pub const WARNING: Color32 = Color32::from_rgb(0xFF, 0xA7, 0x26);

/// Button primary background
pub const BUTTON_PRIMARY: Color32 = Color32::from_rgb(0x1E, 0x90, 0xFF);

/// Destructive button background
pub const BUTTON_DANGER: Color32 = Color32::from_rgb(0xD3, 0x2F, 0x2F);

/// Separator/divider color
pub const SEPARATOR: Color32 = Color32::from_rgb(0x33, 0x3F, 0x59);

/// Color for an order status label
pub fn status_color(status: &str) -> Color32 {
    match status {
        "Completed" | "Paid" => SUCCESS,
        "Shipped" | "Processing" => ACCENT,
        "Cancelled" | "Unpaid" => WARNING,
        _ => TEXT_SECONDARY,
    }
}
