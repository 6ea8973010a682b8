//! The steering wheel: scale controller and continuous rotation
//!
//! The player carries a committed transform (the target of the latest
//! animation, used for collisions) and a displayed transform that
//! interpolates toward it for rendering.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Uniform scale plus rotation about the wheel centre
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    pub scale: f32,
    /// Radians, accumulated (not normalized)
    pub rotation: f32,
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        scale: 1.0,
        rotation: 0.0,
    };

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A single linear animation of one scalar channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tween {
    pub from: f32,
    pub to: f32,
    pub start_tick: u64,
    pub duration_ticks: u64,
}

impl Tween {
    /// A finished tween resting at `value`
    pub fn settled(value: f32) -> Self {
        Self {
            from: value,
            to: value,
            start_tick: 0,
            duration_ticks: 1,
        }
    }

    pub fn new(from: f32, to: f32, start_tick: u64, duration_ticks: u64) -> Self {
        Self {
            from,
            to,
            start_tick,
            duration_ticks: duration_ticks.max(1),
        }
    }

    pub fn value_at(&self, now: u64) -> f32 {
        let elapsed = now.saturating_sub(self.start_tick);
        if elapsed >= self.duration_ticks {
            return self.to;
        }
        let t = elapsed as f32 / self.duration_ticks as f32;
        self.from + (self.to - self.from) * t
    }
}

/// The player's wheel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Fixed screen anchor (surface centre)
    pub center: Vec2,
    /// Unscaled edge length
    pub size: f32,
    pub scale: Tween,
    pub rotation: Tween,
}

impl Player {
    pub fn new(center: Vec2, size: f32) -> Self {
        Self {
            center,
            size,
            scale: Tween::settled(1.0),
            rotation: Tween::settled(0.0),
        }
    }

    /// Transform the latest animations are heading to
    pub fn committed(&self) -> Transform2D {
        Transform2D {
            scale: self.scale.to,
            rotation: self.rotation.to,
        }
    }

    /// Transform as currently shown on screen
    pub fn displayed(&self, now: u64) -> Transform2D {
        Transform2D {
            scale: self.scale.value_at(now),
            rotation: self.rotation.value_at(now),
        }
    }

    /// Unscaled, unrotated frame
    pub fn base_rect(&self) -> Rect {
        Rect::from_center(self.center, Vec2::splat(self.size))
    }

    /// Collision bounds from the committed transform
    pub fn bounds(&self) -> Rect {
        let t = self.committed();
        self.base_rect().transformed_bounds(t.scale, t.rotation)
    }

    /// Bounds as displayed at `now`, for rendering
    pub fn displayed_bounds(&self, now: u64) -> Rect {
        let t = self.displayed(now);
        self.base_rect().transformed_bounds(t.scale, t.rotation)
    }

    /// Multiply the committed scale by `factor`, clamped to `[min, max]`,
    /// animating from the displayed scale. Returns the new committed scale.
    pub fn scale_by(&mut self, factor: f32, bounds: (f32, f32), now: u64, duration_ticks: u64) -> f32 {
        let (min, max) = bounds;
        let target = (self.scale.to * factor).clamp(min, max);
        self.scale = Tween::new(self.scale.value_at(now), target, now, duration_ticks);
        target
    }

    /// Commit one more rotation step, animating linearly over `duration_ticks`
    pub fn rotate_step(&mut self, step: f32, now: u64, duration_ticks: u64) {
        let from = self.rotation.value_at(now);
        self.rotation = Tween::new(from, self.rotation.to + step, now, duration_ticks);
    }

    /// Animate back to the identity transform
    pub fn reset_transform(&mut self, now: u64, duration_ticks: u64) {
        self.scale = Tween::new(self.scale.value_at(now), 1.0, now, duration_ticks);
        self.rotation = Tween::new(self.rotation.value_at(now), 0.0, now, duration_ticks);
    }
}
