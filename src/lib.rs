//! # Bevy Markup Inspector
//!
//! A shader material inspector for Bevy whose layout is driven by markup in
//! the property display names (see [`bevy_markup_layout`]).
//!
//! ## Quick Start
//!
//! ```no_run
//! use bevy::prelude::*;
//! use bevy_markup_inspector::{InspectedMaterial, MarkupInspectorPlugin};
//! use bevy_markup_inspector::layout::PropertyDescriptor;
//!
//! fn main() {
//!     App::new()
//!         .add_plugins(DefaultPlugins)
//!         .add_plugins(MarkupInspectorPlugin)
//!         .insert_resource(InspectedMaterial::new(
//!             "Rock",
//!             vec![
//!                 PropertyDescriptor::float("#Surface", 0.0),
//!                 PropertyDescriptor::texture("%Albedo", None),
//!                 PropertyDescriptor::color("&Tint", [1.0; 4]),
//!             ],
//!         ))
//!         .run();
//! }
//! ```
//!
//! ## Render Extensions
//!
//! A property whose display name has a registered extension is drawn by the
//! extension instead of the markup interpreter:
//!
//! ```ignore
//! app.register_render_extension("CustomRender", |surface, ctx| {
//!     surface.bold_label(&ctx.property.name);
//! });
//! ```

pub mod material;
pub mod settings;
pub mod ui;

pub use bevy_markup_layout as layout;

pub use material::{InspectedMaterial, MaterialOptions};
pub use settings::{InspectorSettings, InspectorSettingsPlugin};
pub use ui::PendingFoldoutClicks;

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_markup_layout::{ExtensionContext, InspectorSurface, MarkupLayoutEngine};

use crate::ui::UiPlugin;

/// Main plugin bundling the settings, theme and inspector panel
pub struct MarkupInspectorPlugin;

impl Plugin for MarkupInspectorPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin::default());
        }
        app.add_plugins(InspectorSettingsPlugin).add_plugins(UiPlugin);
    }
}

/// Register render extensions on the app's layout engine
pub trait RenderExtensionAppExt {
    fn register_render_extension<F>(&mut self, name: impl Into<String>, render: F) -> &mut Self
    where
        F: Fn(&mut dyn InspectorSurface, ExtensionContext<'_>) + Send + Sync + 'static;
}

impl RenderExtensionAppExt for App {
    fn register_render_extension<F>(&mut self, name: impl Into<String>, render: F) -> &mut Self
    where
        F: Fn(&mut dyn InspectorSurface, ExtensionContext<'_>) + Send + Sync + 'static,
    {
        let name = name.into();
        info!("Registered render extension for '{}'", name);
        self.world_mut()
            .get_resource_or_init::<MarkupLayoutEngine>()
            .extensions
            .register_fn(name, render);
        self
    }
}
