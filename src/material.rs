//! The material whose properties the inspector is showing.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use bevy_markup_layout::PropertyDescriptor;
use serde::{Deserialize, Serialize};

/// Material-level options drawn after the shader properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialOptions {
    pub render_queue: i32,
    pub enable_instancing: bool,
    pub double_sided_gi: bool,
    pub emission_enabled: bool,
}

impl Default for MaterialOptions {
    fn default() -> Self {
        Self {
            render_queue: 2000,
            enable_instancing: false,
            double_sided_gi: false,
            emission_enabled: false,
        }
    }
}

/// Resource holding the shader properties currently being edited.
///
/// The layout engine only reads `properties`; the inspector panel writes
/// edited values back into them.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectedMaterial {
    pub name: String,
    pub properties: Vec<PropertyDescriptor>,
    #[serde(default)]
    pub options: MaterialOptions,
}

impl Default for InspectedMaterial {
    fn default() -> Self {
        Self {
            name: "Material".to_string(),
            properties: Vec::new(),
            options: MaterialOptions::default(),
        }
    }
}

impl InspectedMaterial {
    pub fn new(name: impl Into<String>, properties: Vec<PropertyDescriptor>) -> Self {
        Self {
            name: name.into(),
            properties,
            options: MaterialOptions::default(),
        }
    }

    /// Load a material description from a RON file.
    pub fn load(path: &Path) -> Option<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                error!("Failed to read material {:?}: {}", path, e);
                return None;
            }
        };
        match ron::from_str::<InspectedMaterial>(&contents) {
            Ok(material) => {
                info!(
                    "Loaded material '{}' with {} properties",
                    material.name,
                    material.properties.len()
                );
                Some(material)
            }
            Err(e) => {
                error!("Failed to parse material {:?}: {}", path, e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_markup_layout::{PropertyType, PropertyValue};

    #[test]
    fn parses_material_without_options() {
        let material: InspectedMaterial = ron::from_str(
            r##"(
                name: "Rock",
                properties: [
                    (name: "#Surface", ty: Float, value: Float(0.0)),
                    (name: "%Albedo", ty: Texture, value: Texture(None)),
                    (name: "Smoothness", ty: Range(min: 0.0, max: 1.0), value: Float(0.5)),
                ],
            )"##,
        )
        .unwrap();

        assert_eq!(material.name, "Rock");
        assert_eq!(material.options, MaterialOptions::default());
        assert_eq!(
            material.properties[2].ty,
            PropertyType::Range { min: 0.0, max: 1.0 }
        );
        assert_eq!(material.properties[1].value, PropertyValue::Texture(None));
    }

    #[test]
    fn missing_file_yields_none() {
        assert!(InspectedMaterial::load(Path::new("does/not/exist.ron")).is_none());
    }
}
