use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use bevy_markup_layout::{LayoutSettings, MarkupLayoutEngine, RenderMode};
use serde::{Deserialize, Serialize};

/// Inspector settings that persist to disk
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct InspectorSettings {
    /// Pixel constants for label/field widths
    #[serde(default)]
    pub layout: LayoutSettings,
    /// Full markup rendering or the minimal type mapping
    #[serde(default)]
    pub render_mode: RenderMode,
    /// Initial width of the inspector side panel
    #[serde(default = "default_panel_width")]
    pub panel_width: f32,
    /// Show markup diagnostics under the property list
    #[serde(default)]
    pub show_diagnostics: bool,
}

fn default_panel_width() -> f32 {
    340.0
}

impl Default for InspectorSettings {
    fn default() -> Self {
        Self {
            layout: LayoutSettings::default(),
            render_mode: RenderMode::Full,
            panel_width: default_panel_width(),
            show_diagnostics: false,
        }
    }
}

impl InspectorSettings {
    /// Get the settings file path
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("bevy_markup_inspector");
            p.push("inspector.ron");
            p
        })
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(content) => Self::from_ron(&content),
            Err(_) => Self::default(),
        }
    }

    /// Parse settings, falling back to defaults on malformed input
    pub fn from_ron(content: &str) -> Self {
        match ron::from_str(content) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Ignoring malformed inspector settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings to disk
    pub fn save(&self) {
        let Some(path) = Self::file_path() else {
            error!("Could not determine config directory");
            return;
        };
        self.save_to(&path);
    }

    /// Write settings as pretty RON to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {}", e);
                return;
            }
        }

        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(content) => {
                if let Err(e) = fs::write(path, content) {
                    error!("Failed to save inspector settings: {}", e);
                } else {
                    info!("Inspector settings saved to: {:?}", path);
                }
            }
            Err(e) => {
                error!("Failed to serialize inspector settings: {}", e);
            }
        }
    }
}

pub struct InspectorSettingsPlugin;

impl Plugin for InspectorSettingsPlugin {
    fn build(&self, app: &mut App) {
        let settings = InspectorSettings::load();
        {
            // Keep extensions registered before the plugin was added
            let mut engine = app
                .world_mut()
                .get_resource_or_init::<MarkupLayoutEngine>();
            engine.settings = settings.layout.clone();
            engine.render_mode = settings.render_mode;
        }
        app.insert_resource(settings).add_systems(
            Update,
            sync_engine_settings.run_if(resource_changed::<InspectorSettings>),
        );
    }
}

/// Push edited settings into the layout engine
fn sync_engine_settings(settings: Res<InspectorSettings>, mut engine: ResMut<MarkupLayoutEngine>) {
    if engine.settings != settings.layout || engine.render_mode != settings.render_mode {
        engine.settings = settings.layout.clone();
        engine.render_mode = settings.render_mode;
        info!("Inspector layout settings updated");
    }
}
