mod material_inspector;
pub mod theme;

pub use material_inspector::*;
pub use theme::ThemePlugin;

use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ThemePlugin)
            .add_plugins(MaterialInspectorPlugin);
    }
}
