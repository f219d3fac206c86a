use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::camera as projection;
use crate::ui::Settings;
use crate::utils::ui_wants_pointer;

/// Pitch stays this far from straight up/down
pub const PITCH_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.01;
/// Focus movement per pixel, as a fraction of the orbit radius
const PAN_SPEED: f32 = 0.0015;
/// Velocities are expressed per frame at this rate
const REFERENCE_FPS: f32 = 60.0;

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_orbit_camera)
            .add_systems(Update, (orbit_input, apply_orbit).chain());
    }
}

/// Orbit controller with damped inertia.
///
/// The camera sits `radius` away from `focus`, rotated by `yaw` (around Y) and
/// `pitch` (around the camera's X). Drag input feeds `velocity`, which keeps
/// turning the camera and decays by `damping` each frame.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
    /// Yaw/pitch change per reference frame
    pub velocity: Vec2,
    /// Relative radius change per reference frame
    pub zoom_velocity: f32,
    pub min_radius: f32,
    pub max_radius: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            radius: 7.0,
            yaw: 0.6,
            pitch: -0.45,
            velocity: Vec2::ZERO,
            zoom_velocity: 0.0,
            min_radius: 1.5,
            max_radius: 60.0,
        }
    }
}

impl OrbitCamera {
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    pub fn transform(&self) -> Transform {
        let rotation = self.rotation();
        Transform {
            translation: self.focus + rotation * Vec3::new(0.0, 0.0, self.radius),
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Queue a rotation of `delta` radians (x = yaw, y = pitch).
    ///
    /// With damping the rotation is spread over the following frames and sums to
    /// `delta`; without damping it is applied at once.
    pub fn add_rotation(&mut self, delta: Vec2, damping: f32) {
        if damping > 0.0 {
            self.velocity += delta * damping;
        } else {
            self.yaw += delta.x;
            self.pitch = (self.pitch + delta.y).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
    }

    /// Queue a relative radius change (positive moves away).
    pub fn add_zoom(&mut self, amount: f32, damping: f32) {
        if damping > 0.0 {
            self.zoom_velocity += amount * damping;
        } else {
            self.radius = (self.radius * (1.0 + amount)).clamp(self.min_radius, self.max_radius);
        }
    }

    /// Move the focus in the view plane by a pixel delta
    pub fn pan(&mut self, pixels: Vec2) {
        let rotation = self.rotation();
        let right = rotation * Vec3::X;
        let up = rotation * Vec3::Y;
        self.focus += (-right * pixels.x + up * pixels.y) * self.radius * PAN_SPEED;
    }

    /// Advance inertia by `dt` seconds.
    pub fn step(&mut self, dt: f32, damping: f32) {
        let frames = dt * REFERENCE_FPS;

        self.yaw += self.velocity.x * frames;
        self.pitch = (self.pitch + self.velocity.y * frames).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.radius = (self.radius * (1.0 + self.zoom_velocity * frames))
            .clamp(self.min_radius, self.max_radius);

        let decay = (1.0 - damping.clamp(0.0, 1.0)).powf(frames);
        self.velocity *= decay;
        self.zoom_velocity *= decay;
    }

    /// Jump to a fixed view, dropping any inertia
    pub fn snap_to(&mut self, yaw: f32, pitch: f32) {
        self.yaw = yaw;
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.velocity = Vec2::ZERO;
        self.zoom_velocity = 0.0;
    }
}

fn spawn_orbit_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    let transform = orbit.transform();

    commands.spawn((
        Name::new("Camera"),
        orbit,
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: projection::FOV_DEGREES.to_radians(),
            near: projection::NEAR,
            far: projection::FAR,
            ..default()
        }),
        transform,
    ));
}

/// Left drag orbits, right or middle drag pans, wheel zooms
fn orbit_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    settings: Res<Settings>,
    mut query: Query<&mut OrbitCamera>,
    mut contexts: EguiContexts,
) {
    if ui_wants_pointer(&mut contexts) {
        return;
    }

    let motion = mouse_motion.delta;
    let scroll_y = scroll.delta.y;

    for mut orbit in &mut query {
        if motion != Vec2::ZERO {
            if mouse_button.pressed(MouseButton::Left) {
                orbit.add_rotation(-motion * settings.orbit_sensitivity, settings.damping);
            } else if mouse_button.pressed(MouseButton::Right)
                || mouse_button.pressed(MouseButton::Middle)
            {
                orbit.pan(motion);
            }
        }

        if scroll_y != 0.0 {
            orbit.add_zoom(-scroll_y * settings.zoom_speed, settings.damping);
        }
    }
}

fn apply_orbit(
    time: Res<Time>,
    settings: Res<Settings>,
    mut query: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    for (mut orbit, mut transform) in &mut query {
        orbit.step(time.delta_secs(), settings.damping);
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_looks_at_focus() {
        let orbit = OrbitCamera {
            focus: Vec3::new(1.0, 2.0, 3.0),
            ..default()
        };
        let transform = orbit.transform();

        let to_focus = (orbit.focus - transform.translation).normalize();
        assert!(transform.forward().dot(to_focus) > 0.9999);
        assert!((transform.translation.distance(orbit.focus) - orbit.radius).abs() < 1e-4);
    }

    #[test]
    fn negative_pitch_is_above_focus() {
        let orbit = OrbitCamera::default();
        assert!(orbit.transform().translation.y > 0.0);
    }

    #[test]
    fn damped_rotation_sums_to_the_requested_delta() {
        let mut orbit = OrbitCamera::default();
        let start = orbit.yaw;
        orbit.add_rotation(Vec2::new(0.5, 0.0), 0.1);

        for _ in 0..600 {
            orbit.step(1.0 / REFERENCE_FPS, 0.1);
        }
        assert!((orbit.yaw - start - 0.5).abs() < 1e-3, "yaw moved {}", orbit.yaw - start);
        assert!(orbit.velocity.length() < 1e-6);
    }

    #[test]
    fn undamped_rotation_is_immediate() {
        let mut orbit = OrbitCamera::default();
        let start = orbit.yaw;
        orbit.add_rotation(Vec2::new(0.25, 0.0), 0.0);
        assert_eq!(orbit.yaw, start + 0.25);
        assert_eq!(orbit.velocity, Vec2::ZERO);
    }

    #[test]
    fn pitch_and_radius_are_clamped() {
        let mut orbit = OrbitCamera::default();
        orbit.add_rotation(Vec2::new(0.0, -10.0), 0.0);
        assert_eq!(orbit.pitch, -PITCH_LIMIT);

        orbit.add_zoom(100.0, 0.0);
        assert_eq!(orbit.radius, orbit.max_radius);
        orbit.add_zoom(-0.999, 0.0);
        assert_eq!(orbit.radius, orbit.min_radius);
    }

    #[test]
    fn snap_drops_inertia() {
        let mut orbit = OrbitCamera::default();
        orbit.add_rotation(Vec2::ONE, 0.2);
        orbit.add_zoom(1.0, 0.2);
        orbit.snap_to(0.0, 0.0);

        assert_eq!(orbit.velocity, Vec2::ZERO);
        assert_eq!(orbit.zoom_velocity, 0.0);
        assert_eq!((orbit.yaw, orbit.pitch), (0.0, 0.0));
    }
}
