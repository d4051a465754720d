use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

pub struct ThemePlugin;

impl Plugin for ThemePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, apply_inspector_style);
    }
}

/// Colors used by the inspector panel
pub mod colors {
    use bevy_egui::egui::Color32;

    /// Foldout header buttons
    pub const PANEL_HEADER: Color32 = Color32::from_rgb(44, 47, 54);
    /// Texture path boxes and drag values
    pub const FIELD_BG: Color32 = Color32::from_rgb(24, 26, 30);

    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(170, 174, 182);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(115, 119, 128);

    pub const STATUS_WARNING: Color32 = Color32::from_rgb(230, 180, 80);
}

/// Compact property rows: short controls, narrow indent, and a text edit
/// width that leaves room for a linked control on the same row.
fn apply_inspector_style(mut contexts: EguiContexts, mut applied: Local<bool>) {
    if *applied {
        return;
    }
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(4.0, 3.0);
        style.spacing.interact_size.y = 18.0;
        style.spacing.indent = 12.0;
        style.spacing.text_edit_width = 120.0;
        style.spacing.slider_width = 140.0;

        style.visuals.extreme_bg_color = colors::FIELD_BG;
    });
    *applied = true;

    info!("Applied inspector style");
}
