use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use super::theme::colors;
use crate::geometry::MeshLoadFailedEvent;

/// Modal shown when a mesh file could not be loaded
#[derive(Resource, Default)]
pub struct LoadErrorNotice {
    pub open: bool,
    pub title: String,
    pub message: String,
}

impl LoadErrorNotice {
    pub fn show(&mut self, event: &MeshLoadFailedEvent) {
        self.open = true;
        self.title = "Load Error".to_string();
        self.message = format!("Could not load {}:\n\n{}", event.name, event.message);
    }
}

pub struct NoticePlugin;

impl Plugin for NoticePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadErrorNotice>()
            .add_systems(Update, collect_load_failures)
            .add_systems(EguiPrimaryContextPass, draw_load_error_notice);
    }
}

fn collect_load_failures(
    mut events: MessageReader<MeshLoadFailedEvent>,
    mut notice: ResMut<LoadErrorNotice>,
) {
    // Only the most recent failure is worth showing
    if let Some(event) = events.read().last() {
        notice.show(event);
    }
}

fn draw_load_error_notice(
    mut contexts: EguiContexts,
    mut notice: ResMut<LoadErrorNotice>,
) -> Result {
    if !notice.open {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;

    let mut dismissed = false;
    let response = egui::Modal::new(egui::Id::new("load_error_notice")).show(ctx, |ui| {
        ui.set_max_width(360.0);
        ui.colored_label(colors::STATUS_ERROR, egui::RichText::new(&notice.title).strong());
        ui.add_space(6.0);
        ui.label(&notice.message);
        ui.add_space(10.0);
        ui.vertical_centered(|ui| {
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    });

    if dismissed || response.should_close() {
        notice.open = false;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_opens_notice_with_file_name() {
        let mut notice = LoadErrorNotice::default();
        notice.show(&MeshLoadFailedEvent {
            name: "broken.obj".to_string(),
            message: "the file contains no triangle geometry".to_string(),
        });

        assert!(notice.open);
        assert!(notice.message.contains("broken.obj"));
        assert!(notice.message.contains("no triangle geometry"));
    }
}
