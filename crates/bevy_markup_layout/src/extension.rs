//! Per-property render overrides.

use std::collections::HashMap;

use crate::layout::LayoutParams;
use crate::property::PropertyDescriptor;
use crate::surface::InspectorSurface;

/// What a render extension gets to work with.
#[derive(Debug, Clone, Copy)]
pub struct ExtensionContext<'a> {
    pub index: usize,
    pub property: &'a PropertyDescriptor,
    /// Widths for the layout mode active at this point of the pass.
    pub params: LayoutParams,
}

/// Custom drawing for a single property, bypassing markup interpretation.
pub trait RenderExtension: Send + Sync + 'static {
    fn render(&self, surface: &mut dyn InspectorSurface, ctx: ExtensionContext<'_>);
}

impl<F> RenderExtension for F
where
    F: Fn(&mut dyn InspectorSurface, ExtensionContext<'_>) + Send + Sync + 'static,
{
    fn render(&self, surface: &mut dyn InspectorSurface, ctx: ExtensionContext<'_>) {
        self(surface, ctx)
    }
}

/// Render extensions keyed by exact property display name.
#[derive(Default)]
pub struct RenderExtensionRegistry {
    extensions: HashMap<String, Box<dyn RenderExtension>>,
}

impl RenderExtensionRegistry {
    /// Register `extension` for `name`, replacing any previous one.
    pub fn register(&mut self, name: impl Into<String>, extension: impl RenderExtension) {
        self.extensions.insert(name.into(), Box::new(extension));
    }

    /// Register a closure; its signature is inferred from the bound.
    pub fn register_fn<F>(&mut self, name: impl Into<String>, render: F)
    where
        F: Fn(&mut dyn InspectorSurface, ExtensionContext<'_>) + Send + Sync + 'static,
    {
        self.register(name, render);
    }

    pub fn unregister(&mut self, name: &str) -> bool {
        self.extensions.remove(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&dyn RenderExtension> {
        self.extensions.get(name).map(|extension| extension.as_ref())
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }
}

impl std::fmt::Debug for RenderExtensionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.extensions.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::CommandRecorder;

    #[test]
    fn closures_register_as_extensions() {
        let mut registry = RenderExtensionRegistry::default();
        registry.register_fn("CustomRender", |surface, ctx| {
            surface.bold_label(&format!("custom {}", ctx.index));
        });
        assert_eq!(registry.len(), 1);

        let prop = PropertyDescriptor::float("CustomRender", 1.0);
        let mut recorder = CommandRecorder::new(300.0);
        registry.get("CustomRender").unwrap().render(
            &mut recorder,
            ExtensionContext {
                index: 2,
                property: &prop,
                params: LayoutParams::AUTO,
            },
        );
        assert_eq!(
            recorder.commands(),
            [crate::surface::DrawCommand::BoldLabel("custom 2".into())]
        );
        assert!(registry.get("customrender").is_none());
        assert!(registry.unregister("CustomRender"));
    }
}
