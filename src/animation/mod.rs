//! Fire-and-forget property tweens.
//!
//! A [`Tween`] component interpolates one property of its entity over a fixed
//! duration after an optional delay. [`advance_tweens`] ticks every tween once per
//! frame and removes the component when it finishes. Nothing waits on a tween and
//! nothing cancels one; despawning the entity simply drops it.

use bevy::prelude::*;

use crate::ui::Settings;

pub struct AnimationPlugin;

impl Plugin for AnimationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, advance_tweens);
    }
}

/// Easing curve applied to normalized time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum Ease {
    #[default]
    Linear,
    QuadOut,
    CubicOut,
    /// Overshoots past the target and settles back
    BackOut,
}

impl Ease {
    /// Evaluate the curve at `t` in [0, 1].
    pub fn eval(&self, t: f32) -> f32 {
        match self {
            Self::Linear => t,
            Self::QuadOut => t * (2.0 - t),
            Self::CubicOut => 1.0 - (1.0 - t).powi(3),
            Self::BackOut => {
                const C1: f32 = 1.70158;
                const C3: f32 = C1 + 1.0;
                let u = t - 1.0;
                1.0 + C3 * u.powi(3) + C1 * u.powi(2)
            }
        }
    }
}

/// Which property a tween animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum TweenProperty {
    /// Uniform `Transform::scale`
    Scale,
    /// Alpha of the entity's `StandardMaterial` base color
    Opacity,
}

/// A running interpolation of one property.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Tween {
    pub property: TweenProperty,
    pub from: f32,
    pub to: f32,
    /// Seconds to wait before interpolating
    pub delay: f32,
    pub duration: f32,
    pub ease: Ease,
    /// Seconds since the tween was created
    pub elapsed: f32,
}

impl Tween {
    pub fn new(property: TweenProperty, from: f32, to: f32, duration: f32) -> Self {
        Self {
            property,
            from,
            to,
            delay: 0.0,
            duration,
            ease: Ease::Linear,
            elapsed: 0.0,
        }
    }

    pub fn scale(from: f32, to: f32, duration: f32) -> Self {
        Self::new(TweenProperty::Scale, from, to, duration)
    }

    pub fn opacity(from: f32, to: f32, duration: f32) -> Self {
        Self::new(TweenProperty::Opacity, from, to, duration)
    }

    pub fn with_delay(mut self, delay: f32) -> Self {
        self.delay = delay.max(0.0);
        self
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Normalized progress in [0, 1], holding at 0 during the delay.
    pub fn progress(&self) -> f32 {
        let active = self.elapsed - self.delay;
        if active <= 0.0 {
            return 0.0;
        }
        if self.duration <= 0.0 {
            return 1.0;
        }
        (active / self.duration).min(1.0)
    }

    /// Current value of the animated property.
    pub fn value(&self) -> f32 {
        let t = self.progress();
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * self.ease.eval(t)
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay + self.duration.max(0.0)
    }
}

/// Tick every tween and write its value to the target property.
pub fn advance_tweens(
    mut commands: Commands,
    time: Res<Time>,
    settings: Res<Settings>,
    mut tweens: Query<(
        Entity,
        &mut Tween,
        &mut Transform,
        Option<&MeshMaterial3d<StandardMaterial>>,
    )>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let dt = time.delta_secs() * settings.animation_speed.max(0.0);

    for (entity, mut tween, mut transform, material) in &mut tweens {
        tween.advance(dt);
        let value = tween.value();

        match tween.property {
            TweenProperty::Scale => {
                transform.scale = Vec3::splat(value);
            }
            TweenProperty::Opacity => {
                if let Some(material) = material.and_then(|m| materials.get_mut(&m.0)) {
                    material.base_color.set_alpha(value);
                }
            }
        }

        if tween.is_finished() {
            commands.entity(entity).try_remove::<Tween>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-5
    }

    #[test]
    fn easings_hit_endpoints() {
        for ease in [Ease::Linear, Ease::QuadOut, Ease::CubicOut, Ease::BackOut] {
            assert!(approx(ease.eval(0.0), 0.0), "{ease:?}");
            assert!(approx(ease.eval(1.0), 1.0), "{ease:?}");
        }
    }

    #[test]
    fn back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut.eval(i as f32 / 100.0))
            .fold(f32::MIN, f32::max);
        assert!(peak > 1.05, "peak was {peak}");
    }

    #[test]
    fn value_holds_during_delay() {
        let mut tween = Tween::scale(0.0, 1.0, 0.5).with_delay(0.25);
        tween.advance(0.2);
        assert_eq!(tween.value(), 0.0);
        assert!(!tween.is_finished());
    }

    #[test]
    fn value_interpolates_then_lands_exactly() {
        let mut tween = Tween::opacity(0.0, 0.7, 1.0);
        tween.advance(0.5);
        assert!(approx(tween.value(), 0.35));

        tween.advance(0.75);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 0.7);
    }

    #[test]
    fn staggered_tweens_start_in_order() {
        let mut tweens: Vec<Tween> = (0..4)
            .map(|i| Tween::scale(0.0, 1.0, 0.5).with_delay(i as f32 * 0.05))
            .collect();
        for tween in &mut tweens {
            tween.advance(0.1);
        }

        let values: Vec<f32> = tweens.iter().map(Tween::value).collect();
        assert!(values[0] > values[1]);
        assert!(values[1] > values[2]);
        assert_eq!(values[3], 0.0);
    }

    #[test]
    fn zero_duration_jumps_after_delay() {
        let mut tween = Tween::scale(0.0, 2.0, 0.0).with_delay(0.1);
        assert_eq!(tween.value(), 0.0);
        tween.advance(0.2);
        assert_eq!(tween.value(), 2.0);
        assert!(tween.is_finished());
    }
}
