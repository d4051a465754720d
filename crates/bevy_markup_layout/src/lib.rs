//! # Bevy Markup Layout
//!
//! Lays out shader material properties in an inspector, driven by markup
//! embedded in the properties' display names.
//!
//! | Name            | Meaning                                              |
//! |-----------------|------------------------------------------------------|
//! | `*Text`         | bold section label                                   |
//! | `#Title`        | start a foldout section (`#` alone ends it)          |
//! | `%Name`         | single-line texture slot                             |
//! | `&Name`         | drawn inline with the `%` texture right before it    |
//! | `^Name`         | only shown if the previous property is populated     |
//! | `[centered]`, `[rightbound]`, `[maxfield]`, `[minfield]` | field-width mode |
//!
//! The engine never draws by itself. It talks to an [`InspectorSurface`],
//! either the host's own or a [`CommandRecorder`] whose [`DrawCommand`]s are
//! replayed later.
//!
//! ```
//! use bevy_markup_layout::prelude::*;
//!
//! let properties = vec![
//!     PropertyDescriptor::float("#Surface", 0.0),
//!     PropertyDescriptor::texture("%Albedo", Some("albedo.png")),
//!     PropertyDescriptor::color("&Tint", [1.0; 4]),
//!     PropertyDescriptor::float("#", 0.0),
//! ];
//!
//! let engine = MarkupLayoutEngine::default();
//! let mut foldouts = FoldoutState::default();
//! let (commands, report) = engine.record(&properties, &mut foldouts, CommandRecorder::new(320.0));
//! assert!(report.diagnostics.is_empty());
//! assert!(!commands.is_empty());
//! ```

mod diagnostic;
mod engine;
mod extension;
mod foldout;
mod layout;
pub mod markup;
mod property;
mod surface;

pub use diagnostic::LayoutDiagnostic;
pub use engine::{LayoutReport, MarkupLayoutEngine, ADVANCED_FOLDOUT_TITLE};
pub use extension::{ExtensionContext, RenderExtension, RenderExtensionRegistry};
pub use foldout::{FoldoutId, FoldoutKey, FoldoutState};
pub use layout::{LayoutMode, LayoutParams, LayoutSettings, RenderMode};
pub use markup::{LayoutSwitch, MarkupTag};
pub use property::{PropertyDescriptor, PropertyFlags, PropertyType, PropertyValue};
pub use surface::{
    CommandRecorder, DrawCommand, FieldWidget, InspectorSurface, MaterialField, PropertyField,
};

pub mod prelude {
    pub use crate::{
        CommandRecorder, DrawCommand, FieldWidget, FoldoutId, FoldoutState, InspectorSurface,
        LayoutParams, LayoutSettings, MarkupLayoutEngine, MaterialField, PropertyDescriptor,
        PropertyField, PropertyType, PropertyValue, RenderMode,
    };
}
