//! Label/field width computation.
//!
//! Widths are plain values threaded through every field draw call via
//! [`LayoutParams`]; nothing is stashed in shared drawing state.

use serde::{Deserialize, Serialize};

/// How default property rendering maps types to widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RenderMode {
    #[default]
    Full,
    /// Only the core shader types get a widget; anything else is logged and skipped.
    Minimal,
}

/// Pixel constants used by the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutSettings {
    /// Width reserved for the value box in right-bound mode.
    pub right_margin: f32,
    /// Field width of default texture slots.
    pub texture_field_width: f32,
    /// Horizontal shift applied to dependent-visible properties.
    pub dependent_tab_space: f32,
    /// Padding after a dependent-visible row.
    pub dependent_vertical_space: f32,
    /// Horizontal shift applied to single-line texture rows.
    pub single_line_tab_space: f32,
    pub single_line_vertical_space: f32,
    /// Texture slot width on a single-line row when the mode leaves it unset.
    pub single_line_field_width: f32,
    /// Field width in centered, non-expanded mode.
    pub centered_field_width: f32,
    /// Fraction of the view a field takes in centered, expanded mode.
    pub expanded_ratio: f32,
    /// Below this view width expanded fields shrink further.
    pub narrow_threshold: f32,
    /// Extra shrink (fraction of view width) for narrow views.
    pub narrow_shrink_ratio: f32,
    /// Fraction of the view given to slider labels.
    pub slider_label_ratio: f32,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            right_margin: 100.0,
            texture_field_width: 65.0,
            dependent_tab_space: 12.0,
            dependent_vertical_space: 5.0,
            single_line_tab_space: 3.0,
            single_line_vertical_space: 2.0,
            single_line_field_width: 120.0,
            centered_field_width: 60.0,
            expanded_ratio: 0.55,
            narrow_threshold: 320.0,
            narrow_shrink_ratio: 0.15,
            slider_label_ratio: 0.4,
        }
    }
}

/// The two field-width switches toggled by layout markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutMode {
    pub centered: bool,
    pub expanded: bool,
}

/// Label and field widths for one control. Zero means "host decides".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutParams {
    pub label_width: f32,
    pub field_width: f32,
}

impl LayoutParams {
    pub const AUTO: LayoutParams = LayoutParams {
        label_width: 0.0,
        field_width: 0.0,
    };

    /// Widths for the current mode, with `offset` pixels taken by an indent.
    ///
    /// Expanded only matters together with centered; right-bound ignores it.
    pub fn for_mode(
        mode: LayoutMode,
        view_width: f32,
        offset: f32,
        settings: &LayoutSettings,
    ) -> Self {
        match (mode.centered, mode.expanded) {
            (false, _) => LayoutParams {
                label_width: (view_width - settings.right_margin - offset).max(0.0),
                field_width: 0.0,
            },
            (true, false) => LayoutParams {
                label_width: 0.0,
                field_width: settings.centered_field_width,
            },
            (true, true) => {
                let mut field_width = view_width * settings.expanded_ratio - offset;
                if view_width < settings.narrow_threshold {
                    field_width -= view_width * settings.narrow_shrink_ratio;
                }
                LayoutParams {
                    label_width: 0.0,
                    field_width: field_width.max(0.0),
                }
            }
        }
    }

    /// Sliders ignore the mode so they always get the full remaining row.
    pub fn for_slider(view_width: f32, offset: f32, settings: &LayoutSettings) -> Self {
        LayoutParams {
            label_width: ((view_width - offset) * settings.slider_label_ratio).max(0.0),
            field_width: 0.0,
        }
    }

    pub fn with_field_width(self, field_width: f32) -> Self {
        LayoutParams {
            field_width,
            ..self
        }
    }
}
