//! The drawing capability the layout engine talks to.
//!
//! Hosts either implement [`InspectorSurface`] directly or let the engine
//! record into a [`CommandRecorder`] and replay the commands later.

use std::collections::HashSet;

use crate::foldout::FoldoutId;
use crate::layout::LayoutParams;

/// Which widget a property field is drawn with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldWidget {
    /// The host's native widget for the property's type.
    Default,
    /// Texture slot widened to the configured texture field width.
    WideTexture,
    /// Full-width slider for range properties.
    Slider,
    /// Compact texture row, optionally sharing the row with a linked property.
    SingleLineTexture { linked: Option<usize> },
}

/// One property control, referencing the property by list index.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyField {
    pub index: usize,
    pub label: String,
    pub widget: FieldWidget,
    pub params: LayoutParams,
}

/// Fixed material-level controls drawn after the property list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialField {
    RenderQueue,
    EnableInstancing,
    DoubleSidedGi,
    EmissionEnabled,
}

impl MaterialField {
    pub const ALL: [MaterialField; 4] = [
        MaterialField::RenderQueue,
        MaterialField::EnableInstancing,
        MaterialField::DoubleSidedGi,
        MaterialField::EmissionEnabled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MaterialField::RenderQueue => "Render Queue",
            MaterialField::EnableInstancing => "Enable GPU Instancing",
            MaterialField::DoubleSidedGi => "Double Sided Global Illumination",
            MaterialField::EmissionEnabled => "Emission",
        }
    }
}

/// Widget primitives the engine needs from its host.
pub trait InspectorSurface {
    /// Current panel width in pixels.
    fn view_width(&self) -> f32;

    fn bold_label(&mut self, text: &str);

    /// Draw a foldout header and return its (possibly toggled) open state.
    fn foldout_header(&mut self, id: FoldoutId, title: &str, open: bool) -> bool;

    fn end_foldout(&mut self);

    fn begin_horizontal(&mut self);

    fn end_horizontal(&mut self);

    fn space(&mut self, pixels: f32);

    fn flexible_space(&mut self);

    fn property_field(&mut self, field: PropertyField);

    fn material_field(&mut self, field: MaterialField);
}

/// Recorded form of a single surface call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BoldLabel(String),
    BeginFoldout {
        id: FoldoutId,
        title: String,
        open: bool,
    },
    EndFoldout,
    BeginHorizontal,
    EndHorizontal,
    Space(f32),
    FlexibleSpace,
    Field(PropertyField),
    Material(MaterialField),
}

impl DrawCommand {
    /// Property indices this command draws a control for.
    pub fn property_indices(&self) -> impl Iterator<Item = usize> {
        let (first, second) = match self {
            DrawCommand::Field(PropertyField {
                index,
                widget: FieldWidget::SingleLineTexture { linked },
                ..
            }) => (Some(*index), *linked),
            DrawCommand::Field(field) => (Some(field.index), None),
            _ => (None, None),
        };
        first.into_iter().chain(second)
    }
}

/// Surface that records every call instead of drawing.
///
/// Header clicks queued with [`CommandRecorder::click`] are applied the next
/// time the matching header is drawn, the way an immediate-mode host reports
/// a toggle from the widget call itself.
#[derive(Debug, Clone)]
pub struct CommandRecorder {
    view_width: f32,
    clicks: HashSet<FoldoutId>,
    commands: Vec<DrawCommand>,
}

impl CommandRecorder {
    pub fn new(view_width: f32) -> Self {
        Self {
            view_width,
            clicks: HashSet::new(),
            commands: Vec::new(),
        }
    }

    pub fn with_clicks(mut self, clicks: impl IntoIterator<Item = FoldoutId>) -> Self {
        self.clicks.extend(clicks);
        self
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }
}

impl InspectorSurface for CommandRecorder {
    fn view_width(&self) -> f32 {
        self.view_width
    }

    fn bold_label(&mut self, text: &str) {
        self.commands.push(DrawCommand::BoldLabel(text.to_string()));
    }

    fn foldout_header(&mut self, id: FoldoutId, title: &str, open: bool) -> bool {
        let open = open ^ self.clicks.remove(&id);
        self.commands.push(DrawCommand::BeginFoldout {
            id,
            title: title.to_string(),
            open,
        });
        open
    }

    fn end_foldout(&mut self) {
        self.commands.push(DrawCommand::EndFoldout);
    }

    fn begin_horizontal(&mut self) {
        self.commands.push(DrawCommand::BeginHorizontal);
    }

    fn end_horizontal(&mut self) {
        self.commands.push(DrawCommand::EndHorizontal);
    }

    fn space(&mut self, pixels: f32) {
        self.commands.push(DrawCommand::Space(pixels));
    }

    fn flexible_space(&mut self) {
        self.commands.push(DrawCommand::FlexibleSpace);
    }

    fn property_field(&mut self, field: PropertyField) {
        self.commands.push(DrawCommand::Field(field));
    }

    fn material_field(&mut self, field: MaterialField) {
        self.commands.push(DrawCommand::Material(field));
    }
}
