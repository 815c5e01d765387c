use eframe::egui::Color32;

use crate::gui::toast::ToastKind;

pub const ACCENT: Color32 = Color32::from_rgb(29, 155, 240);
pub const PANEL_BG: Color32 = Color32::from_rgba_premultiplied(14, 19, 24, 242);
pub const FIELD_BG: Color32 = Color32::from_rgb(15, 20, 25);
pub const BORDER: Color32 = Color32::from_rgb(47, 51, 54);
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(247, 249, 249);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(231, 233, 234);
pub const TEXT_HINT: Color32 = Color32::from_rgb(113, 118, 123);
pub const SUCCESS: Color32 = Color32::from_rgb(0, 186, 124);
pub const ERROR: Color32 = Color32::from_rgb(244, 33, 46);
pub const TOAST_INFO: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 230);

/// Toast background by kind.
pub fn toast_fill(kind: ToastKind) -> Color32 {
    match kind {
        ToastKind::Info => TOAST_INFO,
        ToastKind::Success => SUCCESS,
        ToastKind::Error => ERROR,
    }
}

/// Stroke colour for a text field: red when it failed validation.
pub fn field_stroke(has_error: bool) -> Color32 {
    if has_error {
        ERROR
    } else {
        BORDER
    }
}
