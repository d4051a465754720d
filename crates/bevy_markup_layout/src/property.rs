//! Shader property descriptors supplied by the host.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Flags the shader attaches to an exposed property.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PropertyFlags: u32 {
        /// Never shown in the inspector.
        const HIDE_IN_INSPECTOR = 1 << 0;
        const PER_RENDERER_DATA = 1 << 1;
        /// Texture slot without tiling/offset fields.
        const NO_SCALE_OFFSET = 1 << 2;
        const NORMAL = 1 << 3;
        const HDR = 1 << 4;
        const GAMMA = 1 << 5;
    }
}

/// Semantic type of a shader property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyType {
    Float,
    Range { min: f32, max: f32 },
    Int,
    Vector,
    Color,
    Texture,
    /// A host type with no mapping in this inspector.
    Unknown(String),
}

/// Current value of a shader property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Float(f32),
    Int(i32),
    Vector([f32; 4]),
    Color([f32; 4]),
    /// Asset path of the bound texture, `None` when the slot is empty.
    Texture(Option<String>),
    None,
}

/// One shader-exposed editable value.
///
/// The display name doubles as markup: prefixes such as `#`, `*` or `%`
/// change how the inspector lays the property out. See [`crate::MarkupTag`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDescriptor {
    pub name: String,
    pub ty: PropertyType,
    #[serde(default = "PropertyFlags::empty")]
    pub flags: PropertyFlags,
    pub value: PropertyValue,
}

impl PropertyDescriptor {
    pub fn new(name: impl Into<String>, ty: PropertyType, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            ty,
            flags: PropertyFlags::empty(),
            value,
        }
    }

    pub fn float(name: impl Into<String>, value: f32) -> Self {
        Self::new(name, PropertyType::Float, PropertyValue::Float(value))
    }

    pub fn range(name: impl Into<String>, value: f32, min: f32, max: f32) -> Self {
        Self::new(name, PropertyType::Range { min, max }, PropertyValue::Float(value))
    }

    pub fn int(name: impl Into<String>, value: i32) -> Self {
        Self::new(name, PropertyType::Int, PropertyValue::Int(value))
    }

    pub fn vector(name: impl Into<String>, value: [f32; 4]) -> Self {
        Self::new(name, PropertyType::Vector, PropertyValue::Vector(value))
    }

    pub fn color(name: impl Into<String>, value: [f32; 4]) -> Self {
        Self::new(name, PropertyType::Color, PropertyValue::Color(value))
    }

    pub fn texture(name: impl Into<String>, path: Option<&str>) -> Self {
        Self::new(
            name,
            PropertyType::Texture,
            PropertyValue::Texture(path.map(str::to_string)),
        )
    }

    /// Builder: mark this property as hidden from the inspector.
    pub fn hidden(mut self) -> Self {
        self.flags |= PropertyFlags::HIDE_IN_INSPECTOR;
        self
    }

    /// Builder: add shader attribute flags.
    pub fn with_flags(mut self, flags: PropertyFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn is_hidden(&self) -> bool {
        self.flags.contains(PropertyFlags::HIDE_IN_INSPECTOR)
    }

    pub fn is_texture(&self) -> bool {
        self.ty == PropertyType::Texture
    }

    /// Whether this property "populates" the inspector for a following
    /// dependent-visible property. Only an empty texture slot does not.
    pub fn is_populated(&self) -> bool {
        match (&self.ty, &self.value) {
            (PropertyType::Texture, PropertyValue::Texture(path)) => path.is_some(),
            (PropertyType::Texture, _) => false,
            _ => true,
        }
    }
}
