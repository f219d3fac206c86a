mod file_dialog;
mod notice;
mod panels;
mod settings;
pub mod theme;
mod view_gizmo;

pub use file_dialog::*;
pub use notice::*;
pub use panels::*;
pub use settings::*;
pub use theme::ThemePlugin;
pub use view_gizmo::*;

use bevy::prelude::*;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ThemePlugin)
            .add_plugins(PanelsPlugin)
            .add_plugins(FileDialogPlugin)
            .add_plugins(NoticePlugin)
            .add_plugins(ViewGizmoPlugin);
    }
}
