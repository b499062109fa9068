//! Orientation controller: плавный поворот к target (yaw only)
//!
//! Exponential smoothing: t = 1 − e^(−rate·dt), frame-rate independent.
//! Forward агента = −Z (Bevy convention).
//! Не зависит от teleport: после relocation ориентация НЕ snap'ается.

use bevy::prelude::*;

use crate::config::StalkerConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrientationController {
    pub rate: f32,
    /// Ниже этого squared length горизонтального вектора поворот пропускается
    pub epsilon: f32,
}

impl OrientationController {
    pub fn from_config(config: &StalkerConfig) -> Self {
        Self {
            rate: config.rotation_rate,
            epsilon: config.rotation_epsilon,
        }
    }

    /// Доля пути к целевой ориентации за dt
    pub fn smoothing_factor(&self, dt: f32) -> f32 {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        1.0 - (-self.rate * dt).exp()
    }

    /// Новая ориентация после dt. `None` — target совпадает с агентом по горизонтали.
    pub fn update(&self, current: Quat, agent: Vec3, target: Vec3, dt: f32) -> Option<Quat> {
        let to_target = Vec3::new(target.x - agent.x, 0.0, target.z - agent.z);
        if to_target.length_squared() < self.epsilon {
            return None;
        }

        let facing = facing_rotation(to_target);
        Some(current.slerp(facing, self.smoothing_factor(dt)).normalize())
    }
}

/// Yaw-поворот, при котором −Z смотрит вдоль горизонтальной проекции `direction`
pub fn facing_rotation(direction: Vec3) -> Quat {
    Quat::from_rotation_y(f32::atan2(-direction.x, -direction.z))
}
