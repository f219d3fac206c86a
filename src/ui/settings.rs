use bevy::prelude::*;
use bevy_egui::{egui, EguiContext, EguiContextSettings, EguiContexts, EguiPrimaryContextPass};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::geometry::MeshShape;

const MIN_ANIMATION_SPEED: f32 = 0.25;
const MAX_ANIMATION_SPEED: f32 = 4.0;
const MIN_UI_SCALE: f32 = 0.75;
const MAX_UI_SCALE: f32 = 3.0;

/// Application settings that persist to disk
#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// UI scale factor (1.0 = default)
    pub ui_scale: f32,
    /// Orbit radians per dragged pixel
    pub orbit_sensitivity: f32,
    /// Relative zoom per scroll unit
    pub zoom_speed: f32,
    /// Fraction of camera inertia lost per frame (0 = no inertia)
    pub damping: f32,
    /// Largest side of a loaded OBJ after fitting (0 = keep file units)
    pub fit_extent: f32,
    /// Shape shown on startup
    pub initial_shape: MeshShape,
    /// Multiplier on reveal animation speed
    pub animation_speed: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ui_scale: 1.25,
            orbit_sensitivity: 0.005,
            zoom_speed: 0.1,
            damping: 0.1,
            fit_extent: 2.5,
            initial_shape: MeshShape::Cube,
            animation_speed: 1.0,
        }
    }
}

impl Settings {
    /// Get the settings file path
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|mut p| {
            p.push("mesh_stages");
            p.push("settings.ron");
            p
        })
    }

    /// Load settings from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            return Self::default();
        };

        match fs::read_to_string(&path) {
            Ok(content) => Self::from_ron(&content).unwrap_or_else(|e| {
                warn!("Ignoring invalid settings file {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Parse settings; missing fields take their defaults
    pub fn from_ron(content: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str::<Self>(content).map(Self::clamped)
    }

    /// Pull hand-edited values back into the ranges the settings window offers
    pub fn clamped(mut self) -> Self {
        self.animation_speed = self.animation_speed.clamp(MIN_ANIMATION_SPEED, MAX_ANIMATION_SPEED);
        self.damping = self.damping.clamp(0.0, 1.0);
        self.ui_scale = self.ui_scale.clamp(MIN_UI_SCALE, MAX_UI_SCALE);
        self
    }

    /// Save settings to disk
    pub fn save(&self) {
        let Some(path) = Self::file_path() else {
            error!("Could not determine config directory");
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                error!("Failed to create config directory: {}", e);
                return;
            }
        }

        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(content) => {
                if let Err(e) = fs::write(&path, content) {
                    error!("Failed to save settings: {}", e);
                } else {
                    info!("Settings saved to: {:?}", path);
                }
            }
            Err(e) => {
                error!("Failed to serialize settings: {}", e);
            }
        }
    }
}

/// Resource to track if settings window is open
#[derive(Resource, Default)]
pub struct SettingsWindowState {
    pub open: bool,
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        // Loaded at build time so Startup systems already see the user's values
        let settings = Settings::load();
        app.insert_resource(settings)
            .init_resource::<SettingsWindowState>()
            .add_systems(Update, apply_ui_scale)
            .add_systems(EguiPrimaryContextPass, draw_settings_window);
    }
}

fn apply_ui_scale(
    settings: Res<Settings>,
    mut query: Query<&mut EguiContextSettings, With<EguiContext>>,
) {
    // Contexts can appear after the settings were loaded, so check every frame
    for mut ctx_settings in &mut query {
        if ctx_settings.scale_factor != settings.ui_scale {
            ctx_settings.scale_factor = settings.ui_scale;
        }
    }
}

fn draw_settings_window(
    mut contexts: EguiContexts,
    mut settings: ResMut<Settings>,
    mut window_state: ResMut<SettingsWindowState>,
) -> Result {
    if !window_state.open {
        return Ok(());
    }

    let ctx = contexts.ctx_mut()?;

    egui::Window::new("Settings")
        .open(&mut window_state.open)
        .resizable(false)
        .show(ctx, |ui| {
            let mut changed = false;

            ui.heading("Interface");
            egui::Grid::new("settings_ui_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("UI Scale:");
                    changed |= ui
                        .add(
                            egui::Slider::new(&mut settings.ui_scale, MIN_UI_SCALE..=MAX_UI_SCALE)
                                .step_by(0.25)
                                .suffix("x"),
                        )
                        .changed();
                    ui.end_row();

                    ui.label("Startup Shape:");
                    egui::ComboBox::from_id_salt("settings_initial_shape")
                        .selected_text(settings.initial_shape.display_name())
                        .show_ui(ui, |ui| {
                            for shape in MeshShape::ALL {
                                changed |= ui
                                    .selectable_value(
                                        &mut settings.initial_shape,
                                        shape,
                                        shape.display_name(),
                                    )
                                    .changed();
                            }
                        });
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            ui.heading("Camera");
            egui::Grid::new("settings_camera_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Orbit Sensitivity:");
                    changed |= ui
                        .add(
                            egui::Slider::new(&mut settings.orbit_sensitivity, 0.001..=0.02)
                                .step_by(0.001),
                        )
                        .changed();
                    ui.end_row();

                    ui.label("Zoom Speed:");
                    changed |= ui
                        .add(egui::Slider::new(&mut settings.zoom_speed, 0.02..=0.5).step_by(0.01))
                        .changed();
                    ui.end_row();

                    ui.label("Damping:");
                    changed |= ui
                        .add(egui::Slider::new(&mut settings.damping, 0.0..=1.0).step_by(0.01))
                        .changed();
                    ui.end_row();
                });

            ui.add_space(8.0);
            ui.separator();
            ui.add_space(4.0);

            ui.heading("Reveal");
            egui::Grid::new("settings_reveal_grid")
                .num_columns(2)
                .spacing([10.0, 8.0])
                .show(ui, |ui| {
                    ui.label("Animation Speed:");
                    changed |= ui
                        .add(
                            egui::Slider::new(
                                &mut settings.animation_speed,
                                MIN_ANIMATION_SPEED..=MAX_ANIMATION_SPEED,
                            )
                                .step_by(0.25)
                                .suffix("x"),
                        )
                        .changed();
                    ui.end_row();

                    ui.label("OBJ Fit Size:");
                    changed |= ui
                        .add(egui::Slider::new(&mut settings.fit_extent, 0.0..=10.0).step_by(0.5))
                        .on_hover_text("Largest side of a loaded file, 0 keeps its own units")
                        .changed();
                    ui.end_row();
                });

            ui.add_space(8.0);
            if ui.button("Restore Defaults").clicked() {
                *settings = Settings::default();
                changed = true;
            }

            if changed {
                settings.save();
            }
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let settings = Settings::from_ron("(damping: 0.3, initial_shape: Sphere)").unwrap();

        assert_eq!(settings.damping, 0.3);
        assert_eq!(settings.initial_shape, MeshShape::Sphere);
        assert_eq!(settings.zoom_speed, Settings::default().zoom_speed);
        assert_eq!(settings.fit_extent, Settings::default().fit_extent);
    }

    #[test]
    fn out_of_range_values_are_clamped_on_load() {
        let settings =
            Settings::from_ron("(animation_speed: 0.0, damping: -1.0, ui_scale: 12.0)").unwrap();

        assert_eq!(settings.animation_speed, MIN_ANIMATION_SPEED);
        assert_eq!(settings.damping, 0.0);
        assert_eq!(settings.ui_scale, MAX_UI_SCALE);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(Settings::from_ron("not settings").is_err());
    }
}
