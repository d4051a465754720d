//! Egui side panel showing the inspected material's shader properties.
//!
//! Each frame the layout engine records a pass into a `CommandRecorder`; the
//! recorded commands are then replayed as egui widgets. Foldout header clicks
//! are queued and handed to the next pass, which writes them into
//! `FoldoutState`.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};
use bevy_markup_layout::{
    CommandRecorder, DrawCommand, FieldWidget, FoldoutId, FoldoutState, MarkupLayoutEngine,
    MaterialField, PropertyDescriptor, PropertyField, PropertyType, PropertyValue, RenderMode,
};

use super::theme::colors;
use crate::material::{InspectedMaterial, MaterialOptions};
use crate::settings::InspectorSettings;

/// Header clicks from the last frame, applied on the next layout pass.
#[derive(Resource, Default)]
pub struct PendingFoldoutClicks(pub Vec<FoldoutId>);

pub struct MaterialInspectorPlugin;

impl Plugin for MaterialInspectorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FoldoutState>()
            .init_resource::<PendingFoldoutClicks>()
            .init_resource::<InspectedMaterial>()
            .add_systems(EguiPrimaryContextPass, draw_material_inspector);
    }
}

/// Draw the material inspector panel
fn draw_material_inspector(
    mut contexts: EguiContexts,
    engine: Res<MarkupLayoutEngine>,
    mut settings: ResMut<InspectorSettings>,
    mut material: ResMut<InspectedMaterial>,
    mut foldouts: ResMut<FoldoutState>,
    mut clicks: ResMut<PendingFoldoutClicks>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::SidePanel::right("material_inspector")
        .default_width(settings.panel_width)
        .show(ctx, |ui| {
            ui.heading(material.name.as_str());
            settings_controls(ui, &mut settings);
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                let view_width = ui.available_width();
                let recorder = CommandRecorder::new(view_width).with_clicks(clicks.0.drain(..));
                let (commands, report) =
                    engine.record(&material.properties, &mut foldouts, recorder);

                let mut replay = CommandReplay {
                    material: &mut material,
                    clicks: &mut clicks.0,
                    view_width,
                    inset: 0.0,
                };
                replay.run(ui, &mut commands.into_iter());

                if settings.show_diagnostics && !report.diagnostics.is_empty() {
                    ui.separator();
                    for diagnostic in &report.diagnostics {
                        ui.label(
                            egui::RichText::new(diagnostic.to_string())
                                .color(colors::STATUS_WARNING)
                                .small(),
                        );
                    }
                }
            });
        });

    Ok(())
}

/// Render mode and diagnostics toggles, plus saving them to disk.
fn settings_controls(ui: &mut egui::Ui, settings: &mut ResMut<InspectorSettings>) {
    let mut edited = InspectorSettings::clone(settings);
    ui.collapsing("Inspector settings", |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Render mode").color(colors::TEXT_SECONDARY));
            ui.radio_value(&mut edited.render_mode, RenderMode::Full, "Full");
            ui.radio_value(&mut edited.render_mode, RenderMode::Minimal, "Minimal");
        });
        ui.checkbox(&mut edited.show_diagnostics, "Show markup diagnostics");
        if ui.button("Save settings").clicked() {
            edited.save();
        }
    });
    settings.set_if_neq(edited);
}

/// Replays recorded draw commands as egui widgets.
struct CommandReplay<'w> {
    material: &'w mut InspectedMaterial,
    clicks: &'w mut Vec<FoldoutId>,
    /// Width the commands were recorded against.
    view_width: f32,
    /// Width taken by enclosing foldout indents.
    inset: f32,
}

impl CommandReplay<'_> {
    /// Replay until the group opened by the caller ends (or the commands run out).
    fn run(&mut self, ui: &mut egui::Ui, commands: &mut std::vec::IntoIter<DrawCommand>) {
        while let Some(command) = commands.next() {
            match command {
                DrawCommand::BoldLabel(text) => {
                    ui.add_space(4.0);
                    ui.label(egui::RichText::new(text).strong());
                }
                DrawCommand::BeginFoldout { id, title, open } => {
                    if foldout_header(ui, &title, open) {
                        self.clicks.push(id);
                    }
                    ui.indent(id, |ui| {
                        let outer = self.inset;
                        self.inset = (self.view_width - ui.available_width()).max(0.0);
                        self.run(ui, commands);
                        self.inset = outer;
                    });
                }
                DrawCommand::BeginHorizontal => {
                    ui.horizontal(|ui| self.run(ui, commands));
                }
                DrawCommand::EndFoldout | DrawCommand::EndHorizontal => return,
                DrawCommand::Space(pixels) => ui.add_space(pixels),
                DrawCommand::FlexibleSpace => {
                    ui.allocate_space(egui::vec2(ui.available_width(), 0.0));
                }
                DrawCommand::Field(field) => self.property_field(ui, field),
                DrawCommand::Material(field) => {
                    material_field(ui, &mut self.material.options, field)
                }
            }
        }
    }

    /// Right-bound label widths are relative to the full view; give the
    /// foldout indent back so indented rows still fit.
    fn label_width(&self, recorded: f32) -> f32 {
        if recorded > 0.0 {
            (recorded - self.inset).max(0.0)
        } else {
            recorded
        }
    }

    fn property_field(&mut self, ui: &mut egui::Ui, field: PropertyField) {
        let label_width = self.label_width(field.params.label_width);
        let properties = &mut self.material.properties;
        ui.horizontal(|ui| {
            field_label(ui, &field.label, label_width);

            let width = field.params.field_width;
            match field.widget {
                FieldWidget::Slider => {
                    if let Some(property) = properties.get_mut(field.index) {
                        slider(ui, property, width);
                    }
                }
                FieldWidget::WideTexture | FieldWidget::Default => {
                    if let Some(property) = properties.get_mut(field.index) {
                        value_editor(ui, property, width);
                    }
                }
                FieldWidget::SingleLineTexture { linked } => {
                    if let Some(property) = properties.get_mut(field.index) {
                        value_editor(ui, property, width);
                    }
                    if let Some(property) = linked.and_then(|index| properties.get_mut(index)) {
                        value_editor(ui, property, 0.0);
                    }
                }
            }
        });
    }
}

/// Clickable foldout header. Returns true when clicked.
fn foldout_header(ui: &mut egui::Ui, title: &str, open: bool) -> bool {
    let arrow = if open { "\u{25BC}" } else { "\u{25B6}" };
    ui.add_space(2.0);
    ui.add(
        egui::Button::new(egui::RichText::new(format!("{arrow} {title}")).strong())
            .fill(colors::PANEL_HEADER)
            .min_size(egui::vec2(ui.available_width(), 0.0)),
    )
    .clicked()
}

fn field_label(ui: &mut egui::Ui, text: &str, width: f32) {
    let text = egui::RichText::new(text).color(colors::TEXT_SECONDARY);
    if width > 0.0 {
        ui.add_sized(
            [width, ui.spacing().interact_size.y],
            egui::Label::new(text).truncate(),
        );
    } else {
        ui.label(text);
    }
}

/// Add `widget`, forcing its width when the layout asked for one.
fn sized(ui: &mut egui::Ui, width: f32, widget: impl egui::Widget) -> egui::Response {
    if width > 0.0 {
        ui.add_sized([width, ui.spacing().interact_size.y], widget)
    } else {
        ui.add(widget)
    }
}

fn slider(ui: &mut egui::Ui, property: &mut PropertyDescriptor, width: f32) {
    let (min, max) = match property.ty {
        PropertyType::Range { min, max } => (min, max),
        _ => (0.0, 1.0),
    };
    if let PropertyValue::Float(value) = &mut property.value {
        sized(ui, width, egui::Slider::new(value, min..=max));
        return;
    }
    value_editor(ui, property, width);
}

fn value_editor(ui: &mut egui::Ui, property: &mut PropertyDescriptor, width: f32) {
    match &mut property.value {
        PropertyValue::Float(value) => {
            sized(ui, width, egui::DragValue::new(value).speed(0.01));
        }
        PropertyValue::Int(value) => {
            sized(ui, width, egui::DragValue::new(value));
        }
        PropertyValue::Vector(values) => {
            for value in values.iter_mut() {
                ui.add(egui::DragValue::new(value).speed(0.01));
            }
        }
        PropertyValue::Color(color) => {
            ui.color_edit_button_rgba_unmultiplied(color);
        }
        PropertyValue::Texture(path) => texture_slot(ui, path, width),
        PropertyValue::None => {
            ui.label(egui::RichText::new("(no value)").color(colors::TEXT_MUTED));
        }
    }
}

/// Texture slot edited as an asset path; an empty path clears the slot.
fn texture_slot(ui: &mut egui::Ui, path: &mut Option<String>, width: f32) {
    let mut text = path.clone().unwrap_or_default();
    let response = sized(
        ui,
        width,
        egui::TextEdit::singleline(&mut text).hint_text("None"),
    );
    if response.changed() {
        let trimmed = text.trim();
        *path = (!trimmed.is_empty()).then(|| trimmed.to_string());
    }
}

fn material_field(ui: &mut egui::Ui, options: &mut MaterialOptions, field: MaterialField) {
    match field {
        MaterialField::RenderQueue => {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(field.label()).color(colors::TEXT_SECONDARY));
                ui.add(egui::DragValue::new(&mut options.render_queue).range(0..=5000));
            });
        }
        MaterialField::EnableInstancing => {
            ui.checkbox(&mut options.enable_instancing, field.label());
        }
        MaterialField::DoubleSidedGi => {
            ui.checkbox(&mut options.double_sided_gi, field.label());
        }
        MaterialField::EmissionEnabled => {
            ui.checkbox(&mut options.emission_enabled, field.label());
        }
    }
}
