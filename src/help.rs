//! Keyboard help overlay.
//!
//! One flat list of global hotkeys plus the viewer bindings, shown in a
//! dark panel toggled with F1.

use eframe::egui;

/// Single help entry (key binding + description)
#[derive(Clone, Debug)]
pub struct HelpEntry {
    pub key: &'static str,
    pub desc: &'static str,
}

impl HelpEntry {
    pub const fn new(key: &'static str, desc: &'static str) -> Self {
        Self { key, desc }
    }
}

/// Global hotkeys
pub const GLOBAL_HELP: &[HelpEntry] = &[
    HelpEntry::new("F1", "Toggle this help"),
    HelpEntry::new("Ctrl+O", "Open journal file"),
    HelpEntry::new("ESC", "Close viewer / Exit fullscreen / Quit"),
    HelpEntry::new("Z", "Toggle Fullscreen"),
    HelpEntry::new("Home / End", "Jump to Top / Bottom"),
    HelpEntry::new("Ctrl+= / Ctrl+-", "Grow / Shrink text"),
    HelpEntry::new("Ctrl+0", "Reset text size"),
];

/// Photo viewer hotkeys, active while the viewer is open
pub const VIEWER_HELP: &[HelpEntry] = &[
    HelpEntry::new("Left / Right", "Previous / Next image"),
    HelpEntry::new("ESC", "Close viewer"),
];

/// Render help entries into a dark panel
pub fn render_help_overlay(ui: &mut egui::Ui, sections: &[(&str, &[HelpEntry])]) {
    let font_id = egui::FontId::proportional(13.0);
    let text_color = egui::Color32::from_rgba_unmultiplied(255, 255, 255, 200);
    let key_color = egui::Color32::from_rgb(255, 200, 100);

    // Calculate max key width for alignment (estimate based on char count)
    let max_key_len = sections
        .iter()
        .flat_map(|(_, entries)| entries.iter())
        .map(|e| e.key.len())
        .max()
        .unwrap_or(10);
    let max_key_width = (max_key_len as f32) * 8.0 + 20.0;

    let render_entries = |ui: &mut egui::Ui, entries: &[HelpEntry]| {
        for entry in entries {
            ui.horizontal(|ui| {
                ui.add_sized(
                    [max_key_width, 18.0],
                    egui::Label::new(
                        egui::RichText::new(entry.key)
                            .font(font_id.clone())
                            .color(key_color),
                    ),
                );
                ui.label(
                    egui::RichText::new(entry.desc)
                        .font(font_id.clone())
                        .color(text_color),
                );
            });
        }
    };

    egui::Frame::NONE
        .fill(egui::Color32::from_rgba_unmultiplied(0, 0, 0, 180))
        .inner_margin(12.0)
        .corner_radius(4.0)
        .show(ui, |ui| {
            for (i, (title, entries)) in sections.iter().enumerate() {
                if i > 0 {
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(4.0);
                }
                ui.label(
                    egui::RichText::new(*title)
                        .font(font_id.clone())
                        .color(egui::Color32::GRAY),
                );
                ui.add_space(4.0);
                render_entries(ui, entries);
            }
        });
}

/// All help sections for the F1 view
pub fn all_help_sections() -> Vec<(&'static str, &'static [HelpEntry])> {
    vec![("Global", GLOBAL_HELP), ("Photo Viewer", VIEWER_HELP)]
}
