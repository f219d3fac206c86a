use std::f32::consts::{FRAC_PI_2, PI, TAU};

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use crate::scene::{OrbitCamera, PITCH_LIMIT};
use crate::ui::theme::colors;

const GIZMO_SIZE: f32 = 80.0;
const GIZMO_MARGIN: f32 = 10.0;
const AXIS_LENGTH: f32 = 30.0;
const SPHERE_RADIUS: f32 = 8.0;
/// Angular tolerance for naming the current view
const VIEW_THRESHOLD: f32 = 0.1;

pub struct ViewGizmoPlugin;

impl Plugin for ViewGizmoPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(EguiPrimaryContextPass, draw_view_gizmo);
    }
}

/// Axis-aligned views reachable by clicking the gizmo
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewPreset {
    Front,
    Back,
    Right,
    Left,
    Top,
    Bottom,
}

impl ViewPreset {
    pub fn name(&self) -> &'static str {
        match self {
            ViewPreset::Front => "Front",
            ViewPreset::Back => "Back",
            ViewPreset::Right => "Right",
            ViewPreset::Left => "Left",
            ViewPreset::Top => "Top",
            ViewPreset::Bottom => "Bottom",
        }
    }

    /// Orbit (yaw, pitch) that looks at the focus from this side
    pub fn angles(&self) -> (f32, f32) {
        match self {
            ViewPreset::Front => (0.0, 0.0),
            ViewPreset::Back => (PI, 0.0),
            ViewPreset::Right => (FRAC_PI_2, 0.0),
            ViewPreset::Left => (-FRAC_PI_2, 0.0),
            ViewPreset::Top => (0.0, -PITCH_LIMIT),
            ViewPreset::Bottom => (0.0, PITCH_LIMIT),
        }
    }

    /// The preset matching the camera's current angles, if any
    pub fn current(orbit: &OrbitCamera) -> Option<Self> {
        if (orbit.pitch + PITCH_LIMIT).abs() < VIEW_THRESHOLD {
            return Some(ViewPreset::Top);
        }
        if (orbit.pitch - PITCH_LIMIT).abs() < VIEW_THRESHOLD {
            return Some(ViewPreset::Bottom);
        }
        if orbit.pitch.abs() >= VIEW_THRESHOLD {
            return None;
        }

        let yaw = orbit.yaw.rem_euclid(TAU);
        [
            ViewPreset::Front,
            ViewPreset::Back,
            ViewPreset::Right,
            ViewPreset::Left,
        ]
        .into_iter()
        .find(|preset| {
            let target = preset.angles().0.rem_euclid(TAU);
            let diff = (yaw - target).abs();
            diff.min(TAU - diff) < VIEW_THRESHOLD
        })
    }
}

/// Project a world axis through the inverse camera rotation.
///
/// Returns the screen offset (y grows downward) and the depth toward the viewer.
pub fn project_axis(view_rotation: Quat, axis: Vec3, length: f32) -> (Vec2, f32) {
    let rotated = view_rotation * axis;
    (Vec2::new(rotated.x, -rotated.y) * length, rotated.z)
}

/// Handles behind the gizmo's centre are drawn smaller
fn handle_radius(depth: f32) -> f32 {
    if depth < 0.0 {
        SPHERE_RADIUS * 0.7
    } else {
        SPHERE_RADIUS
    }
}

struct AxisHandle {
    pos: egui::Pos2,
    depth: f32,
    color: egui::Color32,
    label: Option<&'static str>,
    preset: ViewPreset,
}

/// Orientation gizmo in the top-right corner of the viewport
fn draw_view_gizmo(
    mut contexts: EguiContexts,
    mut camera_query: Query<&mut OrbitCamera>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    let Ok(mut orbit) = camera_query.single_mut() else {
        return Ok(());
    };

    let view_rotation = orbit.rotation().inverse();
    let screen_rect = ctx.input(|i| i.viewport_rect());

    egui::Area::new(egui::Id::new("view_gizmo"))
        .fixed_pos(egui::pos2(
            screen_rect.max.x - GIZMO_MARGIN - GIZMO_SIZE,
            screen_rect.min.y + GIZMO_MARGIN,
        ))
        .show(ctx, |ui| {
            let (response, painter) =
                ui.allocate_painter(egui::vec2(GIZMO_SIZE, GIZMO_SIZE), egui::Sense::click());
            let center = response.rect.center();

            painter.circle_filled(
                center,
                GIZMO_SIZE / 2.0 - 2.0,
                egui::Color32::from_rgba_unmultiplied(40, 40, 40, 200),
            );
            painter.circle_stroke(
                center,
                GIZMO_SIZE / 2.0 - 2.0,
                egui::Stroke::new(1.0, colors::TEXT_MUTED),
            );

            let axes = [
                (Vec3::X, colors::AXIS_X, "X", ViewPreset::Right, ViewPreset::Left),
                (Vec3::Y, colors::AXIS_Y, "Y", ViewPreset::Top, ViewPreset::Bottom),
                (Vec3::Z, colors::AXIS_Z, "Z", ViewPreset::Front, ViewPreset::Back),
            ];

            let mut handles = Vec::with_capacity(6);
            for (axis, color, label, pos_preset, neg_preset) in axes {
                for (direction, color, label, preset) in [
                    (axis, color, Some(label), pos_preset),
                    (-axis, color.gamma_multiply(0.5), None, neg_preset),
                ] {
                    let (offset, depth) = project_axis(view_rotation, direction, AXIS_LENGTH);
                    handles.push(AxisHandle {
                        pos: center + egui::vec2(offset.x, offset.y),
                        depth,
                        color,
                        label,
                        preset,
                    });
                }
            }

            // Back to front
            handles.sort_by(|a, b| a.depth.total_cmp(&b.depth));

            for handle in &handles {
                let behind = handle.depth < 0.0;
                let alpha = if behind { 0.4 } else { 1.0 };
                painter.line_segment(
                    [center, handle.pos],
                    egui::Stroke::new(2.0, handle.color.gamma_multiply(alpha)),
                );
                painter.circle_filled(handle.pos, handle_radius(handle.depth), handle.color);

                if let Some(label) = handle.label {
                    let (size, text_color) = if behind {
                        (12.0, colors::TEXT_SECONDARY)
                    } else {
                        (14.0, colors::TEXT_PRIMARY)
                    };
                    painter.text(
                        handle.pos,
                        egui::Align2::CENTER_CENTER,
                        label,
                        egui::FontId::proportional(size),
                        text_color,
                    );
                }
            }

            if response.clicked() {
                if let Some(pointer) = response.interact_pointer_pos() {
                    // Front-most handle wins
                    let hit = handles.iter().rev().find(|handle| {
                        pointer.distance(handle.pos) <= handle_radius(handle.depth) + 4.0
                    });
                    if let Some(handle) = hit {
                        let (yaw, pitch) = handle.preset.angles();
                        orbit.snap_to(yaw, pitch);
                    }
                }
            }

            let view_name = ViewPreset::current(&orbit).map_or("Perspective", |p| p.name());
            painter.text(
                egui::pos2(center.x, response.rect.max.y + 5.0),
                egui::Align2::CENTER_TOP,
                view_name,
                egui::FontId::proportional(12.0),
                colors::TEXT_SECONDARY,
            );
        });

    Ok(())
}
