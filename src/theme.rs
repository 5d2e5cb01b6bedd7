//! Palette, easing and style setup.
//!
//! One place for every color the page uses, so the widgets stay free of
//! hex literals.

use egui::{Color32, Context, FontId, Style, TextStyle, Visuals};

// === Brand ===

pub const ACCENT: Color32 = Color32::from_rgb(0, 122, 255);
pub const ACCENT_ALT: Color32 = Color32::from_rgb(88, 86, 214);
pub const HERO_TOP: Color32 = Color32::from_rgb(102, 126, 234);
pub const HERO_BOTTOM: Color32 = Color32::from_rgb(118, 75, 162);

// === Surfaces ===

pub const PAGE: Color32 = Color32::from_rgb(250, 250, 250);
pub const CARD: Color32 = Color32::WHITE;
pub const WASH: Color32 = Color32::from_rgb(245, 247, 250);
pub const CHIP: Color32 = Color32::from_rgb(236, 237, 240);
pub const BUTTON_WASH: Color32 = Color32::from_rgb(240, 242, 245);
pub const HAIRLINE: Color32 = Color32::from_rgb(228, 231, 236);
pub const PLACEHOLDER_TOP: Color32 = Color32::from_rgb(240, 242, 245);
pub const PLACEHOLDER_BOTTOM: Color32 = Color32::from_rgb(230, 233, 239);

// === Text ===

pub const INK: Color32 = Color32::from_rgb(26, 26, 26);
pub const INK_SOFT: Color32 = Color32::from_rgb(102, 102, 102);
pub const INK_FAINT: Color32 = Color32::from_rgb(136, 136, 136);
pub const INK_LABEL: Color32 = Color32::from_rgb(85, 85, 85);

// === Overlay ===

/// Backdrop behind the photo viewer
pub const SCRIM: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 217);

/// Translucent circles for viewer arrows and the close icon
pub const OVERLAY_CONTROL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 128);

// === Easing ===

/// Gentle deceleration, used by reveals and hover motion.
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Sharper deceleration for the viewer's pop-in.
pub fn ease_out_quart(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(4)
}

/// Light visuals tuned for a reading page, with text sizes scaled by the
/// preference multiplier.
pub fn apply(ctx: &Context, font_scale: f32) {
    let mut style = Style::default();
    let scale = font_scale.clamp(0.5, 2.0);

    style.text_styles = [
        (TextStyle::Heading, FontId::proportional(28.0 * scale)),
        (TextStyle::Body, FontId::proportional(16.0 * scale)),
        (TextStyle::Button, FontId::proportional(15.0 * scale)),
        (TextStyle::Small, FontId::proportional(12.0 * scale)),
        (TextStyle::Monospace, FontId::monospace(13.0 * scale)),
    ]
    .into();

    let mut visuals = Visuals::light();
    visuals.panel_fill = PAGE;
    visuals.window_fill = CARD;
    visuals.override_text_color = Some(INK);
    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.35);
    visuals.widgets.hovered.bg_fill = BUTTON_WASH;
    visuals.widgets.active.bg_fill = CHIP;
    style.visuals = visuals;

    ctx.set_style(style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_endpoints() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert_eq!(ease_out_quart(0.0), 0.0);
        assert_eq!(ease_out_quart(1.0), 1.0);
        // Out-of-range input clamps
        assert_eq!(ease_out(2.0), 1.0);
        assert_eq!(ease_out(-1.0), 0.0);
    }

    #[test]
    fn test_ease_out_decelerates() {
        // Front-loaded: more than half the distance in the first half
        assert!(ease_out(0.5) > 0.5);
        assert!(ease_out_quart(0.5) > ease_out(0.5));
    }
}
