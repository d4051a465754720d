//! The markup-driven property layout engine.
//!
//! A pass walks the flat property list once to discover linked properties,
//! then once more to draw. Cross-property state (current foldout, whether
//! the last real property was populated, the field-width mode) lives in a
//! [`LayoutSession`] that is rebuilt at the start of every pass; only the
//! [`FoldoutState`] outlives a call.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use bevy::prelude::*;

use crate::diagnostic::LayoutDiagnostic;
use crate::extension::{ExtensionContext, RenderExtension, RenderExtensionRegistry};
use crate::foldout::{FoldoutId, FoldoutKey, FoldoutState};
use crate::layout::{LayoutMode, LayoutParams, LayoutSettings, RenderMode};
use crate::markup::{LayoutSwitch, MarkupTag, LINKED_PREFIX, SINGLE_LINE_TEXTURE_PREFIX};
use crate::property::{PropertyDescriptor, PropertyType};
use crate::surface::{
    CommandRecorder, DrawCommand, FieldWidget, InspectorSurface, MaterialField, PropertyField,
};

/// Title of the foldout wrapping the material-level options.
pub const ADVANCED_FOLDOUT_TITLE: &str = "Advanced Options";

/// Outcome of one layout pass besides what was drawn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutReport {
    pub diagnostics: Vec<LayoutDiagnostic>,
    /// Number of `#` sections opened during the pass.
    pub sections: u32,
}

/// Interprets property-name markup and lays properties out on a surface.
#[derive(Resource, Debug, Default)]
pub struct MarkupLayoutEngine {
    pub settings: LayoutSettings,
    pub render_mode: RenderMode,
    pub extensions: RenderExtensionRegistry,
    /// Diagnostics already logged, so a redraw loop does not repeat them
    logged: Mutex<HashSet<LayoutDiagnostic>>,
}

impl MarkupLayoutEngine {
    pub fn new(settings: LayoutSettings, render_mode: RenderMode) -> Self {
        Self {
            settings,
            render_mode,
            extensions: RenderExtensionRegistry::default(),
            logged: Mutex::default(),
        }
    }

    fn log_diagnostic(&self, diagnostic: &LayoutDiagnostic) {
        let first = match self.logged.lock() {
            Ok(mut logged) => logged.insert(diagnostic.clone()),
            Err(_) => true,
        };
        if first {
            warn!("Markup inspector: {}", diagnostic);
        } else {
            trace!("Markup inspector: {}", diagnostic);
        }
    }

    /// Lay out `properties` on `surface`.
    ///
    /// Writes header toggles reported by the surface back into `foldouts`.
    pub fn render(
        &self,
        properties: &[PropertyDescriptor],
        foldouts: &mut FoldoutState,
        surface: &mut dyn InspectorSurface,
    ) -> LayoutReport {
        let mut pass = LayoutPass {
            engine: self,
            properties,
            links: discover_links(properties, &self.extensions),
            occurrences: HashMap::new(),
            session: LayoutSession::start(surface.view_width(), &self.settings),
            foldouts,
            surface,
            report: LayoutReport::default(),
        };

        for (index, property) in properties.iter().enumerate() {
            if property.is_hidden() {
                continue;
            }
            pass.visit(index, property);
        }
        pass.finish();
        pass.report
    }

    /// Run a pass into `recorder` and return the recorded commands.
    pub fn record(
        &self,
        properties: &[PropertyDescriptor],
        foldouts: &mut FoldoutState,
        mut recorder: CommandRecorder,
    ) -> (Vec<DrawCommand>, LayoutReport) {
        let report = self.render(properties, foldouts, &mut recorder);
        (recorder.into_commands(), report)
    }
}

#[derive(Debug)]
struct LinkEntry {
    index: usize,
    consumed: bool,
}

/// Every visible `&` property, keyed by its full name.
///
/// Names taken over by a render extension are left out, so no host can draw
/// them inline. With duplicate names only the first property is claimable.
fn discover_links<'a>(
    properties: &'a [PropertyDescriptor],
    extensions: &RenderExtensionRegistry,
) -> HashMap<&'a str, LinkEntry> {
    let mut links = HashMap::new();
    for (index, property) in properties.iter().enumerate() {
        if property.is_hidden()
            || !property.name.starts_with(LINKED_PREFIX)
            || extensions.get(&property.name).is_some()
        {
            continue;
        }
        links.entry(property.name.as_str()).or_insert(LinkEntry {
            index,
            consumed: false,
        });
    }
    links
}

#[derive(Debug)]
struct LayoutSession {
    mode: LayoutMode,
    params: LayoutParams,
    foldout_index: u32,
    in_foldout: bool,
    foldout_open: bool,
    had_any_foldout: bool,
    last_populated: bool,
}

impl LayoutSession {
    fn start(view_width: f32, settings: &LayoutSettings) -> Self {
        let mode = LayoutMode::default();
        Self {
            mode,
            params: LayoutParams::for_mode(mode, view_width, 0.0, settings),
            foldout_index: 0,
            in_foldout: false,
            foldout_open: true,
            had_any_foldout: false,
            last_populated: true,
        }
    }

    /// Body properties inside a closed foldout are not drawn.
    fn visible(&self) -> bool {
        !self.in_foldout || self.foldout_open
    }
}

struct LayoutPass<'a, 's> {
    engine: &'a MarkupLayoutEngine,
    properties: &'a [PropertyDescriptor],
    links: HashMap<&'a str, LinkEntry>,
    occurrences: HashMap<&'a str, u32>,
    session: LayoutSession,
    foldouts: &'s mut FoldoutState,
    surface: &'s mut dyn InspectorSurface,
    report: LayoutReport,
}

impl<'a> LayoutPass<'a, '_> {
    fn visit(&mut self, index: usize, property: &'a PropertyDescriptor) {
        let engine = self.engine;
        if let Some(extension) = engine.extensions.get(&property.name) {
            if self.session.visible() {
                self.render_extension(extension, index, property);
            }
            return;
        }

        match MarkupTag::parse(&property.name) {
            MarkupTag::LayoutSwitch(switch) => self.apply_switch(switch),
            MarkupTag::Linked(label) => {
                if self.session.visible() {
                    self.draw_linked(index, property, label);
                }
            }
            MarkupTag::Foldout(title) => self.open_foldout(title),
            MarkupTag::FoldoutEnd => self.close_foldout(),
            MarkupTag::Label(text) => {
                if self.session.visible() {
                    self.surface.bold_label(text);
                }
            }
            MarkupTag::DependentVisible(label) => {
                if self.session.visible() && self.session.last_populated {
                    self.draw_dependent(index, property, label);
                }
            }
            MarkupTag::None(_) | MarkupTag::SingleLineTexture(_) => {
                if self.session.visible() {
                    self.session.last_populated = property.is_populated();
                    self.draw_visible(index, property, &property.name, 0.0);
                }
            }
        }
    }

    fn render_extension(
        &mut self,
        extension: &dyn RenderExtension,
        index: usize,
        property: &PropertyDescriptor,
    ) {
        let ctx = ExtensionContext {
            index,
            property,
            params: self.session.params,
        };
        extension.render(&mut *self.surface, ctx);
    }

    fn apply_switch(&mut self, switch: LayoutSwitch) {
        match switch {
            LayoutSwitch::Centered => self.session.mode.centered = true,
            LayoutSwitch::RightBound => self.session.mode.centered = false,
            LayoutSwitch::MaxField => self.session.mode.expanded = true,
            LayoutSwitch::MinField => self.session.mode.expanded = false,
        }
        self.session.params = self.params(0.0);
    }

    fn params(&self, offset: f32) -> LayoutParams {
        LayoutParams::for_mode(
            self.session.mode,
            self.surface.view_width(),
            offset,
            &self.engine.settings,
        )
    }

    fn open_foldout(&mut self, title: &'a str) {
        if self.session.in_foldout {
            self.surface.end_foldout();
        }
        self.session.foldout_index += 1;

        let occurrence = self.occurrences.entry(title).or_insert(0);
        let key = FoldoutKey::new(title, *occurrence);
        *occurrence += 1;

        let open = self.surface.foldout_header(
            FoldoutId::Section(self.session.foldout_index),
            title,
            self.foldouts.is_open(&key),
        );
        self.foldouts.set_open(key, open);

        self.session.in_foldout = true;
        self.session.foldout_open = open;
        self.session.had_any_foldout = true;
        self.report.sections += 1;
    }

    fn close_foldout(&mut self) {
        if self.session.in_foldout {
            self.surface.end_foldout();
            self.session.in_foldout = false;
            self.session.foldout_open = true;
        }
    }

    fn draw_linked(&mut self, index: usize, property: &PropertyDescriptor, label: &str) {
        let claimed = self
            .links
            .get(property.name.as_str())
            .is_some_and(|entry| entry.index == index && entry.consumed);
        if claimed {
            return;
        }
        self.diagnose(LayoutDiagnostic::UnclaimedLink {
            name: property.name.clone(),
            index,
        });
        self.draw_default(index, property, label, 0.0);
    }

    fn draw_dependent(&mut self, index: usize, property: &PropertyDescriptor, label: &str) {
        let tab = self.engine.settings.dependent_tab_space;
        self.surface.begin_horizontal();
        self.surface.space(tab);
        self.draw_visible(index, property, label, tab);
        self.surface.end_horizontal();
        self.surface.space(self.engine.settings.dependent_vertical_space);
    }

    fn draw_visible(
        &mut self,
        index: usize,
        property: &PropertyDescriptor,
        label: &str,
        offset: f32,
    ) {
        match label.strip_prefix(SINGLE_LINE_TEXTURE_PREFIX) {
            Some(label) => self.draw_single_line(index, property, label, offset),
            None => self.draw_default(index, property, label, offset),
        }
    }

    fn draw_single_line(
        &mut self,
        index: usize,
        property: &PropertyDescriptor,
        label: &str,
        offset: f32,
    ) {
        if !property.is_texture() {
            self.diagnose(LayoutDiagnostic::SingleLineOnNonTexture {
                name: property.name.clone(),
                index,
            });
            self.draw_default(index, property, label, offset);
            return;
        }

        let settings = &self.engine.settings;
        let tab = settings.single_line_tab_space;
        let vertical = settings.single_line_vertical_space;
        let compact_width = settings.single_line_field_width;
        let linked = self.claim_link(index + 1);
        let mut params = self.params(offset + tab);
        if params.field_width <= 0.0 {
            // The slot shares its row with the linked control.
            params.field_width = compact_width;
        }

        self.surface.begin_horizontal();
        self.surface.space(tab);
        self.surface.property_field(PropertyField {
            index,
            label: label.to_string(),
            widget: FieldWidget::SingleLineTexture { linked },
            params,
        });
        if self.session.mode.centered {
            self.surface.flexible_space();
        }
        self.surface.end_horizontal();
        self.surface.space(vertical);
    }

    /// Mark the linked property at `index` as drawn inline, if there is one.
    fn claim_link(&mut self, index: usize) -> Option<usize> {
        let property = self.properties.get(index)?;
        if property.is_hidden() {
            return None;
        }
        let entry = self.links.get_mut(property.name.as_str())?;
        if entry.index != index {
            return None;
        }
        entry.consumed = true;
        Some(index)
    }

    fn draw_default(
        &mut self,
        index: usize,
        property: &PropertyDescriptor,
        label: &str,
        offset: f32,
    ) {
        let engine = self.engine;
        let settings = &engine.settings;
        let widget = match (engine.render_mode, &property.ty) {
            (_, PropertyType::Range { .. }) => FieldWidget::Slider,
            (RenderMode::Full, PropertyType::Texture) => FieldWidget::WideTexture,
            (RenderMode::Minimal, PropertyType::Int | PropertyType::Unknown(_)) => {
                self.diagnose(LayoutDiagnostic::UnmappedType {
                    name: property.name.clone(),
                    index,
                    ty: type_name(&property.ty),
                });
                return;
            }
            _ => FieldWidget::Default,
        };
        let params = match widget {
            FieldWidget::Slider => {
                LayoutParams::for_slider(self.surface.view_width(), offset, settings)
            }
            FieldWidget::WideTexture => self
                .params(offset)
                .with_field_width(settings.texture_field_width),
            _ => self.params(offset),
        };

        self.surface.property_field(PropertyField {
            index,
            label: label.to_string(),
            widget,
            params,
        });
    }

    fn diagnose(&mut self, diagnostic: LayoutDiagnostic) {
        self.engine.log_diagnostic(&diagnostic);
        self.report.diagnostics.push(diagnostic);
    }

    fn finish(&mut self) {
        self.close_foldout();

        if !self.session.had_any_foldout {
            self.draw_material_fields();
            return;
        }

        let open = self.surface.foldout_header(
            FoldoutId::Advanced,
            ADVANCED_FOLDOUT_TITLE,
            self.foldouts.advanced_open(),
        );
        self.foldouts.set_advanced_open(open);
        if open {
            self.draw_material_fields();
        }
        self.surface.end_foldout();
    }

    fn draw_material_fields(&mut self) {
        for field in MaterialField::ALL {
            self.surface.material_field(field);
        }
    }
}

fn type_name(ty: &PropertyType) -> String {
    match ty {
        PropertyType::Unknown(name) => name.clone(),
        other => format!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::property::PropertyValue;

    const WIDTH: f32 = 400.0;

    fn run(
        engine: &MarkupLayoutEngine,
        properties: &[PropertyDescriptor],
        foldouts: &mut FoldoutState,
    ) -> (Vec<DrawCommand>, LayoutReport) {
        engine.record(properties, foldouts, CommandRecorder::new(WIDTH))
    }

    fn layout(properties: &[PropertyDescriptor]) -> (Vec<DrawCommand>, LayoutReport) {
        run(
            &MarkupLayoutEngine::default(),
            properties,
            &mut FoldoutState::default(),
        )
    }

    fn fields(commands: &[DrawCommand]) -> Vec<&PropertyField> {
        commands
            .iter()
            .filter_map(|command| match command {
                DrawCommand::Field(field) => Some(field),
                _ => None,
            })
            .collect()
    }

    fn drawn_indices(commands: &[DrawCommand]) -> Vec<usize> {
        commands.iter().flat_map(DrawCommand::property_indices).collect()
    }

    fn assert_balanced(commands: &[DrawCommand]) {
        let mut stack = Vec::new();
        for command in commands {
            match command {
                DrawCommand::BeginFoldout { .. } => stack.push("foldout"),
                DrawCommand::BeginHorizontal => stack.push("horizontal"),
                DrawCommand::EndFoldout => assert_eq!(stack.pop(), Some("foldout")),
                DrawCommand::EndHorizontal => assert_eq!(stack.pop(), Some("horizontal")),
                _ => {}
            }
        }
        assert!(stack.is_empty(), "unclosed groups: {stack:?}");
    }

    #[test]
    fn empty_texture_suppresses_following_dependent() {
        let properties = [
            PropertyDescriptor::texture("MainTex", None),
            PropertyDescriptor::float("^SubOption", 1.0),
            PropertyDescriptor::float("*Header", 0.0),
        ];
        let (commands, report) = layout(&properties);

        let drawn = fields(&commands);
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].index, 0);
        assert_eq!(drawn[0].widget, FieldWidget::WideTexture);
        assert_eq!(drawn[0].params.field_width, 65.0);
        assert!(commands.contains(&DrawCommand::BoldLabel("Header".into())));
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn populated_property_shows_dependent_shifted() {
        let properties = [
            PropertyDescriptor::texture("Albedo", Some("albedo.png")),
            PropertyDescriptor::float("*Heading", 0.0),
            PropertyDescriptor::float("^Strength", 1.0),
        ];
        let (commands, _) = layout(&properties);

        let position = commands
            .iter()
            .position(|command| matches!(command, DrawCommand::Field(f) if f.index == 2))
            .unwrap();
        assert_eq!(commands[position - 2], DrawCommand::BeginHorizontal);
        assert_eq!(commands[position - 1], DrawCommand::Space(12.0));
        assert_eq!(commands[position + 1], DrawCommand::EndHorizontal);
        assert_eq!(commands[position + 2], DrawCommand::Space(5.0));

        let DrawCommand::Field(field) = &commands[position] else {
            unreachable!()
        };
        assert_eq!(field.label, "Strength");
        assert_eq!(field.params.label_width, WIDTH - 100.0 - 12.0);
    }

    #[test]
    fn dependent_does_not_update_populated() {
        let properties = [
            PropertyDescriptor::texture("Mask", None),
            PropertyDescriptor::float("^A", 1.0),
            PropertyDescriptor::float("^B", 1.0),
            PropertyDescriptor::float("Size", 1.0),
            PropertyDescriptor::float("^C", 1.0),
        ];
        let (commands, _) = layout(&properties);
        assert_eq!(drawn_indices(&commands), [0, 3, 4]);
    }

    #[test]
    fn hidden_properties_are_inert() {
        let properties = [
            PropertyDescriptor::texture("Albedo", Some("a.png")),
            PropertyDescriptor::texture("Secret", None).hidden(),
            PropertyDescriptor::float("#Hidden Group", 0.0).hidden(),
            PropertyDescriptor::float("^Strength", 1.0),
            PropertyDescriptor::float("#Visible", 0.0),
        ];
        let (commands, report) = layout(&properties);

        assert_eq!(drawn_indices(&commands), [0, 3]);
        assert_eq!(report.sections, 1);
        assert!(commands.contains(&DrawCommand::BeginFoldout {
            id: FoldoutId::Section(1),
            title: "Visible".into(),
            open: true,
        }));
    }

    #[test]
    fn every_visible_property_drawn_once() {
        let properties = [
            PropertyDescriptor::float("[centered]", 0.0),
            PropertyDescriptor::texture("%Albedo", Some("a.png")),
            PropertyDescriptor::color("&Tint", [1.0; 4]),
            PropertyDescriptor::range("Smoothness", 0.5, 0.0, 1.0),
            PropertyDescriptor::float("#Detail", 0.0),
            PropertyDescriptor::texture("DetailMap", None),
            PropertyDescriptor::vector("Tiling", [1.0, 1.0, 0.0, 0.0]),
            PropertyDescriptor::color("&Orphan", [0.0; 4]),
            PropertyDescriptor::float("#", 0.0),
            PropertyDescriptor::int("Queue Offset", 0),
        ];
        let (commands, _) = layout(&properties);

        let mut indices = drawn_indices(&commands);
        indices.sort();
        assert_eq!(indices, [1, 2, 3, 5, 6, 7, 9]);
        assert_balanced(&commands);
    }

    #[test]
    fn foldout_group_scenario() {
        let properties = [
            PropertyDescriptor::float("#Group A", 0.0),
            PropertyDescriptor::float("Size", 1.0),
            PropertyDescriptor::float("#", 0.0),
            PropertyDescriptor::float("After", 1.0),
        ];

        let (commands, _) = layout(&properties);
        assert_eq!(
            commands[0],
            DrawCommand::BeginFoldout {
                id: FoldoutId::Section(1),
                title: "Group A".into(),
                open: true,
            }
        );
        assert!(matches!(&commands[1], DrawCommand::Field(f) if f.index == 1));
        assert_eq!(commands[2], DrawCommand::EndFoldout);
        assert!(matches!(&commands[3], DrawCommand::Field(f) if f.index == 3));
        assert_balanced(&commands);

        let mut foldouts = FoldoutState::default();
        foldouts.set_open(FoldoutKey::new("Group A", 0), false);
        let (closed, _) = run(&MarkupLayoutEngine::default(), &properties, &mut foldouts);
        assert_eq!(drawn_indices(&closed), [3]);
        assert_eq!(closed[1], DrawCommand::EndFoldout);
        assert_balanced(&closed);
    }

    #[test]
    fn closed_foldout_does_not_touch_populated() {
        let properties = [
            PropertyDescriptor::float("#Closed", 0.0),
            PropertyDescriptor::texture("Empty", None),
            PropertyDescriptor::float("#Open", 0.0),
            PropertyDescriptor::float("^Shown", 1.0),
        ];
        let mut foldouts = FoldoutState::default();
        foldouts.set_open(FoldoutKey::new("Closed", 0), false);
        let (commands, _) = run(&MarkupLayoutEngine::default(), &properties, &mut foldouts);
        assert_eq!(drawn_indices(&commands), [3]);
    }

    #[test]
    fn foldout_indices_increase_and_state_persists() {
        let properties = [
            PropertyDescriptor::float("#First", 0.0),
            PropertyDescriptor::float("A", 0.0),
            PropertyDescriptor::float("#Second", 0.0),
            PropertyDescriptor::float("B", 0.0),
            PropertyDescriptor::float("#Third", 0.0),
        ];
        let engine = MarkupLayoutEngine::default();
        let mut foldouts = FoldoutState::default();

        let recorder = CommandRecorder::new(WIDTH).with_clicks([FoldoutId::Section(2)]);
        let (first, report) = engine.record(&properties, &mut foldouts, recorder);
        let ids: Vec<_> = first
            .iter()
            .filter_map(|command| match command {
                DrawCommand::BeginFoldout { id, open, .. } => Some((*id, *open)),
                _ => None,
            })
            .collect();
        assert_eq!(
            ids,
            [
                (FoldoutId::Section(1), true),
                (FoldoutId::Section(2), false),
                (FoldoutId::Section(3), true),
                (FoldoutId::Advanced, true),
            ]
        );
        assert_eq!(report.sections, 3);
        assert_eq!(drawn_indices(&first), [1]);

        let (second, _) = run(&engine, &properties, &mut foldouts);
        assert_eq!(second, first);
        assert!(!foldouts.is_open(&FoldoutKey::new("Second", 0)));
    }

    #[test]
    fn toggle_state_follows_heading_when_reordered() {
        let engine = MarkupLayoutEngine::default();
        let mut foldouts = FoldoutState::default();
        let properties = [
            PropertyDescriptor::float("#Lighting", 0.0),
            PropertyDescriptor::float("#Surface", 0.0),
            PropertyDescriptor::float("Roughness", 0.5),
        ];
        let recorder = CommandRecorder::new(WIDTH).with_clicks([FoldoutId::Section(2)]);
        engine.record(&properties, &mut foldouts, recorder);

        let reordered = [
            PropertyDescriptor::float("#Surface", 0.0),
            PropertyDescriptor::float("Roughness", 0.5),
            PropertyDescriptor::float("#Lighting", 0.0),
        ];
        let (commands, _) = run(&engine, &reordered, &mut foldouts);
        assert_eq!(
            commands[0],
            DrawCommand::BeginFoldout {
                id: FoldoutId::Section(1),
                title: "Surface".into(),
                open: false,
            }
        );
        assert!(drawn_indices(&commands).is_empty());
    }

    #[test]
    fn linked_property_drawn_inline() {
        let properties = [
            PropertyDescriptor::texture("%MainTex", Some("a.png")),
            PropertyDescriptor::color("&MainColor", [1.0; 4]),
            PropertyDescriptor::float("Size", 1.0),
        ];
        let (commands, report) = layout(&properties);

        let drawn = fields(&commands);
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[0].label, "MainTex");
        assert_eq!(
            drawn[0].widget,
            FieldWidget::SingleLineTexture { linked: Some(1) }
        );
        assert_eq!(drawn[1].index, 2);
        assert_eq!(drawn_indices(&commands), [0, 1, 2]);
        assert!(report.diagnostics.is_empty());
        assert_balanced(&commands);
    }

    #[test]
    fn unclaimed_link_drawn_standalone_with_diagnostic() {
        let properties = [
            PropertyDescriptor::float("Size", 1.0),
            PropertyDescriptor::color("&Tint", [1.0; 4]),
        ];
        let (commands, report) = layout(&properties);

        let drawn = fields(&commands);
        assert_eq!(drawn.len(), 2);
        assert_eq!(drawn[1].label, "Tint");
        assert_eq!(drawn[1].widget, FieldWidget::Default);
        assert_eq!(
            report.diagnostics,
            [LayoutDiagnostic::UnclaimedLink {
                name: "&Tint".into(),
                index: 1,
            }]
        );
    }

    #[test]
    fn link_must_be_adjacent() {
        let properties = [
            PropertyDescriptor::texture("%MainTex", None),
            PropertyDescriptor::float("Size", 1.0),
            PropertyDescriptor::color("&Tint", [1.0; 4]),
        ];
        let (commands, report) = layout(&properties);
        assert_eq!(
            fields(&commands)[0].widget,
            FieldWidget::SingleLineTexture { linked: None }
        );
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].index(), 2);
    }

    #[test]
    fn duplicate_link_name_only_first_is_claimable() {
        let properties = [
            PropertyDescriptor::texture("%Albedo", Some("a.png")),
            PropertyDescriptor::color("&Tint", [1.0; 4]),
            PropertyDescriptor::texture("%Detail", Some("d.png")),
            PropertyDescriptor::color("&Tint", [0.5; 4]),
        ];
        let (commands, report) = layout(&properties);

        let drawn = fields(&commands);
        assert_eq!(drawn.len(), 3);
        assert_eq!(
            drawn[0].widget,
            FieldWidget::SingleLineTexture { linked: Some(1) }
        );
        assert_eq!(
            drawn[1].widget,
            FieldWidget::SingleLineTexture { linked: None }
        );
        assert_eq!(drawn[2].index, 3);
        assert_eq!(drawn[2].widget, FieldWidget::Default);
        assert_eq!(
            report.diagnostics,
            [LayoutDiagnostic::UnclaimedLink {
                name: "&Tint".into(),
                index: 3,
            }]
        );
    }

    #[test]
    fn right_bound_single_line_texture_gets_compact_width() {
        let (commands, _) = layout(&[
            PropertyDescriptor::texture("%Albedo", None),
            PropertyDescriptor::color("&Tint", [1.0; 4]),
        ]);
        let params = fields(&commands)[0].params;
        assert_eq!(params.field_width, 120.0);
        assert_eq!(params.label_width, WIDTH - 100.0 - 3.0);

        let (centered, _) = layout(&[
            PropertyDescriptor::float("[centered]", 0.0),
            PropertyDescriptor::texture("%Albedo", None),
        ]);
        assert_eq!(fields(&centered)[0].params.field_width, 60.0);
    }

    #[test]
    fn single_line_on_non_texture_falls_back() {
        let properties = [PropertyDescriptor::float("%Size", 1.0)];
        let (commands, report) = layout(&properties);

        let drawn = fields(&commands);
        assert_eq!(drawn[0].label, "Size");
        assert_eq!(drawn[0].widget, FieldWidget::Default);
        assert!(matches!(
            &report.diagnostics[..],
            [LayoutDiagnostic::SingleLineOnNonTexture { index: 0, .. }]
        ));
    }

    #[test]
    fn dependent_single_line_texture_claims_link() {
        let properties = [
            PropertyDescriptor::float("Size", 1.0),
            PropertyDescriptor::texture("^%Mask", Some("mask.png")),
            PropertyDescriptor::float("&Mask Strength", 1.0),
        ];
        let (commands, report) = layout(&properties);
        assert_eq!(
            fields(&commands)[1].widget,
            FieldWidget::SingleLineTexture { linked: Some(2) }
        );
        assert_eq!(fields(&commands)[1].label, "Mask");
        assert!(report.diagnostics.is_empty());
        assert_balanced(&commands);
    }

    #[test]
    fn layout_switches_change_field_widths() {
        let properties = [
            PropertyDescriptor::float("[Centered]", 0.0),
            PropertyDescriptor::float("A", 0.0),
            PropertyDescriptor::float("[maxfield]", 0.0),
            PropertyDescriptor::float("B", 0.0),
            PropertyDescriptor::range("C", 0.5, 0.0, 1.0),
            PropertyDescriptor::float("[rightbound]", 0.0),
            PropertyDescriptor::float("D", 0.0),
        ];
        let engine = MarkupLayoutEngine::default();
        let (commands, _) = engine.record(
            &properties,
            &mut FoldoutState::default(),
            CommandRecorder::new(300.0),
        );

        let drawn = fields(&commands);
        assert_eq!(drawn.len(), 4);
        assert_eq!(
            drawn[0].params,
            LayoutParams {
                label_width: 0.0,
                field_width: 60.0,
            }
        );
        assert_eq!(drawn[1].params.label_width, 0.0);
        assert!((drawn[1].params.field_width - 120.0).abs() < 1e-3);
        assert_eq!(drawn[2].widget, FieldWidget::Slider);
        assert!(drawn[2].params.label_width > 0.0);
        assert_eq!(
            drawn[3].params,
            LayoutParams {
                label_width: 200.0,
                field_width: 0.0,
            }
        );
    }

    #[test]
    fn centered_single_line_gets_flexible_space() {
        let properties = [
            PropertyDescriptor::float("[centered]", 0.0),
            PropertyDescriptor::texture("%Albedo", None),
        ];
        let (commands, _) = layout(&properties);
        assert!(commands.contains(&DrawCommand::FlexibleSpace));

        let (flat, _) = layout(&properties[1..]);
        assert!(!flat.contains(&DrawCommand::FlexibleSpace));
    }

    #[test]
    fn extension_overrides_markup() {
        let mut engine = MarkupLayoutEngine::default();
        engine.extensions.register_fn("*CustomRender", |surface, ctx| {
            surface.property_field(PropertyField {
                index: ctx.index,
                label: "Proof that it renders extension".into(),
                widget: FieldWidget::Default,
                params: ctx.params,
            });
        });
        let properties = [
            PropertyDescriptor::texture("Empty", None),
            PropertyDescriptor::float("*CustomRender", 1.0),
            PropertyDescriptor::float("^After", 1.0),
        ];
        let (commands, _) = run(&engine, &properties, &mut FoldoutState::default());

        assert!(!commands.iter().any(|c| matches!(c, DrawCommand::BoldLabel(_))));
        let drawn = fields(&commands);
        assert_eq!(drawn[1].label, "Proof that it renders extension");
        // The extension does not count as a populated property.
        assert_eq!(drawn_indices(&commands), [0, 1]);
    }

    #[test]
    fn extension_on_linked_name_is_not_claimed_inline() {
        let mut engine = MarkupLayoutEngine::default();
        engine.extensions.register_fn("&Tint", |surface, ctx| {
            surface.property_field(PropertyField {
                index: ctx.index,
                label: "Custom tint".into(),
                widget: FieldWidget::Default,
                params: ctx.params,
            });
        });
        let properties = [
            PropertyDescriptor::texture("%Albedo", Some("albedo.png")),
            PropertyDescriptor::color("&Tint", [1.0; 4]),
        ];
        let (commands, report) = run(&engine, &properties, &mut FoldoutState::default());

        assert_eq!(drawn_indices(&commands), [0, 1]);
        let drawn = fields(&commands);
        assert_eq!(
            drawn[0].widget,
            FieldWidget::SingleLineTexture { linked: None }
        );
        assert_eq!(drawn[1].label, "Custom tint");
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn linked_pair_in_closed_foldout_draws_nothing() {
        let properties = [
            PropertyDescriptor::float("#Surface", 0.0),
            PropertyDescriptor::texture("%Albedo", Some("albedo.png")),
            PropertyDescriptor::color("&Tint", [1.0; 4]),
        ];
        let mut foldouts = FoldoutState::default();
        foldouts.set_open(FoldoutKey::new("Surface", 0), false);
        let (commands, report) = run(&MarkupLayoutEngine::default(), &properties, &mut foldouts);

        assert!(drawn_indices(&commands).is_empty());
        assert!(report.diagnostics.is_empty());
        assert_balanced(&commands);
    }

    #[test]
    fn extension_respects_closed_foldout() {
        let mut engine = MarkupLayoutEngine::default();
        engine
            .extensions
            .register_fn("CustomRender", |surface, _| surface.bold_label("custom"));
        let properties = [
            PropertyDescriptor::float("#Group", 0.0),
            PropertyDescriptor::float("CustomRender", 1.0),
        ];
        let mut foldouts = FoldoutState::default();
        foldouts.set_open(FoldoutKey::new("Group", 0), false);
        let (commands, _) = run(&engine, &properties, &mut foldouts);
        assert!(!commands.contains(&DrawCommand::BoldLabel("custom".into())));
    }

    #[test]
    fn material_fields_flat_without_foldouts() {
        let (commands, _) = layout(&[PropertyDescriptor::float("Size", 1.0)]);
        let tail: Vec<_> = commands[1..].to_vec();
        assert_eq!(
            tail,
            MaterialField::ALL.map(DrawCommand::Material).to_vec()
        );
    }

    #[test]
    fn material_fields_wrapped_in_advanced_foldout() {
        let properties = [
            PropertyDescriptor::float("#Surface", 0.0),
            PropertyDescriptor::float("Size", 1.0),
        ];
        let engine = MarkupLayoutEngine::default();
        let mut foldouts = FoldoutState::default();
        let recorder = CommandRecorder::new(WIDTH).with_clicks([FoldoutId::Advanced]);
        let (commands, _) = engine.record(&properties, &mut foldouts, recorder);

        assert_eq!(
            &commands[2..],
            [
                DrawCommand::EndFoldout,
                DrawCommand::BeginFoldout {
                    id: FoldoutId::Advanced,
                    title: ADVANCED_FOLDOUT_TITLE.into(),
                    open: false,
                },
                DrawCommand::EndFoldout,
            ]
        );
        assert!(!foldouts.advanced_open());
        assert!(foldouts.is_open(&FoldoutKey::new("Surface", 0)));
    }

    #[test]
    fn stray_terminator_is_ignored() {
        let properties = [
            PropertyDescriptor::float("#", 0.0),
            PropertyDescriptor::float("Size", 1.0),
        ];
        let (commands, report) = layout(&properties);
        assert!(!commands.contains(&DrawCommand::EndFoldout));
        assert_eq!(report.sections, 0);
        assert_balanced(&commands);
    }

    #[test]
    fn minimal_mode_skips_unmapped_types() {
        let engine = MarkupLayoutEngine::new(LayoutSettings::default(), RenderMode::Minimal);
        let properties = [
            PropertyDescriptor::int("Stencil", 0),
            PropertyDescriptor::new(
                "Lut",
                PropertyType::Unknown("Texture3D".into()),
                PropertyValue::None,
            ),
            PropertyDescriptor::texture("Albedo", None),
        ];
        let (commands, report) = run(&engine, &properties, &mut FoldoutState::default());

        let drawn = fields(&commands);
        assert_eq!(drawn.len(), 1);
        assert_eq!(drawn[0].widget, FieldWidget::Default);
        assert_eq!(report.diagnostics.len(), 2);
        assert!(matches!(
            &report.diagnostics[1],
            LayoutDiagnostic::UnmappedType { ty, .. } if ty == "Texture3D"
        ));
    }

    #[test]
    fn repeated_passes_are_identical() {
        let properties = [
            PropertyDescriptor::float("*Surface", 0.0),
            PropertyDescriptor::texture("%Albedo", Some("a.png")),
            PropertyDescriptor::color("&Tint", [1.0; 4]),
            PropertyDescriptor::float("#Detail", 0.0),
            PropertyDescriptor::texture("DetailMap", None),
            PropertyDescriptor::float("^DetailStrength", 1.0),
            PropertyDescriptor::color("&Dangling", [0.0; 4]),
        ];
        let engine = MarkupLayoutEngine::default();
        let mut foldouts = FoldoutState::default();
        let first = run(&engine, &properties, &mut foldouts);
        let second = run(&engine, &properties, &mut foldouts);
        assert_eq!(first, second);
    }
}
