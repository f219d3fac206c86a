use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use super::file_dialog::FileDialogState;
use super::settings::SettingsWindowState;
use super::theme::colors;
use crate::geometry::{ActiveGeometry, GeometrySource, MeshShape, SelectShapeEvent};
use crate::info::InfoPanel;
use crate::stages::{ResetStagesEvent, Stage, StageController, StageState, StageTriggerEvent};

const HOTKEY_HINT: &str = "Keys 1-4 run stages, R resets.\nDrop an .obj file to load it.";

pub struct PanelsPlugin;

impl Plugin for PanelsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, draw_control_panel);
    }
}

/// Indicator text and color for a stage's state
fn stage_indicator(state: StageState) -> (&'static str, egui::Color32) {
    match state {
        StageState::Uncreated => ("○", colors::TEXT_MUTED),
        StageState::Created { visible: true } => ("●", colors::STATUS_SUCCESS),
        StageState::Created { visible: false } => ("◌", colors::ACCENT_ORANGE),
    }
}

/// Left-hand control panel: shape selector, stage buttons and mesh info
fn draw_control_panel(
    mut contexts: EguiContexts,
    active: Res<ActiveGeometry>,
    controller: Res<StageController>,
    info: Res<InfoPanel>,
    mut file_dialog: ResMut<FileDialogState>,
    mut settings_window: ResMut<SettingsWindowState>,
    mut select_events: MessageWriter<SelectShapeEvent>,
    mut trigger_events: MessageWriter<StageTriggerEvent>,
    mut reset_events: MessageWriter<ResetStagesEvent>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::SidePanel::left("control_panel")
        .resizable(false)
        .default_width(220.0)
        .show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Mesh Stages");
            ui.add_space(4.0);
            ui.separator();

            ui.label(egui::RichText::new("Geometry").color(colors::TEXT_SECONDARY));
            let current_shape = match &active.source {
                GeometrySource::Primitive(shape) => Some(*shape),
                GeometrySource::File { .. } => None,
            };
            egui::ComboBox::from_id_salt("shape_selector")
                .width(ui.available_width())
                .selected_text(active.source.label())
                .show_ui(ui, |ui| {
                    for shape in MeshShape::ALL {
                        let selected = current_shape == Some(shape);
                        let clicked = ui.selectable_label(selected, shape.display_name()).clicked();
                        if clicked && !selected {
                            select_events.write(SelectShapeEvent { shape });
                        }
                    }
                    ui.separator();
                    if ui.selectable_label(false, "Load file…").clicked() {
                        file_dialog.open_pick_mesh();
                    }
                });

            ui.add_space(8.0);
            ui.separator();

            ui.label(egui::RichText::new("Stages").color(colors::TEXT_SECONDARY));
            for (index, stage) in Stage::ALL.into_iter().enumerate() {
                ui.horizontal(|ui| {
                    let (symbol, color) = stage_indicator(controller.state(stage));
                    ui.colored_label(color, symbol);
                    let label = format!("{}. {}", index + 1, stage.action_label());
                    let button =
                        egui::Button::new(label).min_size(egui::vec2(ui.available_width(), 0.0));
                    if ui.add(button).clicked() {
                        trigger_events.write(StageTriggerEvent { stage });
                    }
                });
            }

            ui.add_space(4.0);
            let reset = egui::Button::new("Reset").min_size(egui::vec2(ui.available_width(), 0.0));
            if ui.add_enabled(!controller.is_empty(), reset).clicked() {
                reset_events.write(ResetStagesEvent);
            }

            ui.add_space(8.0);
            ui.separator();

            egui::Grid::new("mesh_info_grid")
                .num_columns(2)
                .spacing([12.0, 4.0])
                .show(ui, |ui| {
                    ui.label("Source:");
                    ui.label(&info.source_label);
                    ui.end_row();

                    ui.label("Vertices:");
                    ui.label(info.vertex_count.to_string());
                    ui.end_row();

                    ui.label("Edges:");
                    ui.label(info.edge_count.to_string());
                    ui.end_row();

                    ui.label("Faces:");
                    ui.label(info.face_count.to_string());
                    ui.end_row();
                });

            ui.add_space(6.0);
            ui.colored_label(colors::ACCENT_GREEN, &info.status);

            ui.with_layout(egui::Layout::bottom_up(egui::Align::LEFT), |ui| {
                ui.add_space(4.0);
                if ui.button("Settings").clicked() {
                    settings_window.open = !settings_window.open;
                }
                ui.label(
                    egui::RichText::new(HOTKEY_HINT)
                        .small()
                        .color(colors::TEXT_MUTED),
                );
            });
        });

    Ok(())
}
