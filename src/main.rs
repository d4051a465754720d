//! Standalone inspector showing a sample shader property list.
//!
//! The sample exercises every piece of markup: labels, foldouts, single-line
//! textures with linked properties, dependent-visible properties and the
//! field-width switches.

use std::path::Path;

use bevy::prelude::*;
use bevy_markup_inspector::layout::{FieldWidget, PropertyDescriptor, PropertyField, PropertyFlags};
use bevy_markup_inspector::{InspectedMaterial, MarkupInspectorPlugin, RenderExtensionAppExt};

fn main() {
    let material = std::env::args()
        .nth(1)
        .and_then(|path| InspectedMaterial::load(Path::new(&path)))
        .unwrap_or_else(sample_material);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Bevy Markup Inspector".to_string(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(MarkupInspectorPlugin)
        .register_render_extension("CustomRender", |surface, ctx| {
            surface.property_field(PropertyField {
                index: ctx.index,
                label: "Proof that it renders extension".to_string(),
                widget: FieldWidget::Default,
                params: ctx.params,
            });
        })
        .insert_resource(material)
        .add_systems(Startup, setup_camera)
        .run();
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn sample_material() -> InspectedMaterial {
    InspectedMaterial::new(
        "Layered Surface",
        vec![
            PropertyDescriptor::float("*Surface Inputs", 0.0),
            PropertyDescriptor::texture("%Albedo", Some("textures/rock_albedo.png")),
            PropertyDescriptor::color("&Albedo Tint", [1.0, 1.0, 1.0, 1.0]),
            PropertyDescriptor::texture("%Normal Map", None)
                .with_flags(PropertyFlags::NORMAL | PropertyFlags::NO_SCALE_OFFSET),
            PropertyDescriptor::float("^Normal Strength", 1.0),
            PropertyDescriptor::range("Smoothness", 0.5, 0.0, 1.0),
            PropertyDescriptor::float("#Detail", 0.0),
            PropertyDescriptor::texture("Detail Mask", Some("textures/detail_mask.png")),
            PropertyDescriptor::range("^Detail Blend", 0.25, 0.0, 1.0),
            PropertyDescriptor::vector("Detail Tiling", [4.0, 4.0, 0.0, 0.0]),
            PropertyDescriptor::float("#", 0.0),
            PropertyDescriptor::float("[centered]", 0.0),
            PropertyDescriptor::float("#Emission", 0.0),
            PropertyDescriptor::color("Emission Color", [0.0, 0.0, 0.0, 1.0]),
            PropertyDescriptor::float("[maxfield]", 0.0),
            PropertyDescriptor::float("Emission Intensity", 1.0),
            PropertyDescriptor::float("[minfield]", 0.0),
            PropertyDescriptor::float("[rightbound]", 0.0),
            PropertyDescriptor::int("_QueueOffset", 0).hidden(),
            PropertyDescriptor::float("CustomRender", 0.0),
        ],
    )
}
