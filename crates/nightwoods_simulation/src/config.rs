//! Stalker конфигурация (teleport, rotation, proximity effect, grounding)
//!
//! Загружается из JSON (`StalkerConfig::from_json_str`) или через `Default`.
//! Валидация происходит один раз при создании brain, не каждый tick.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::spatial::collision::COLLISION_MASK_ALL;

/// Как выбирается точка Chase вокруг target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChaseSampling {
    /// Направление uniform в [0, 2π), дистанция uniform в [0, chase_radius]
    #[default]
    Disc,
    /// Направление uniform, дистанция ровно chase_radius
    Ring,
}

/// Ошибки конфигурации (construction-time, не per-tick)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("chase_probability must be within [0, 1], got {0}")]
    ChaseProbabilityOutOfRange(f32),

    #[error("{field} must be finite and non-negative, got {value}")]
    NegativeOrNonFinite { field: &'static str, value: f32 },

    #[error("collision_layer_mask is empty: the ground probe would never hit anything")]
    EmptyLayerMask,

    #[error("invalid config json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Параметры stalker AI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StalkerConfig {
    /// Доля срабатываний, которые становятся Chase (остальные — Return)
    pub chase_probability: f32,
    /// Радиус диска вокруг target для Chase destination (метры)
    #[serde(alias = "teleport_distance")]
    pub chase_radius: f32,
    pub chase_sampling: ChaseSampling,
    /// Re-arm после Chase (секунды)
    #[serde(alias = "teleport_cooldown")]
    pub chase_cooldown: f32,
    /// Re-arm после Return (секунды)
    pub return_cooldown: f32,

    /// Скорость exponential smoothing поворота (1/сек)
    pub rotation_rate: f32,
    /// Ниже этого squared length горизонтального вектора — не поворачиваем
    pub rotation_epsilon: f32,

    /// Радиус static-эффекта (метры)
    pub proximity_radius: f32,

    /// Высота старта sphere cast над candidate (метры)
    pub ground_probe_height: f32,
    pub ground_probe_radius: f32,
    pub ground_probe_max_distance: f32,
    pub collision_layer_mask: u32,
    /// Дополнительный зазор над землёй после teleport (метры)
    pub foot_clearance: f32,
    /// Foot offset когда нет collider (Direct locomotion)
    pub fallback_foot_offset: f32,

    /// Звук teleport (None = тишина)
    pub teleport_sound: Option<String>,
}

impl Default for StalkerConfig {
    fn default() -> Self {
        Self {
            chase_probability: 0.65,
            chase_radius: 10.0,
            chase_sampling: ChaseSampling::Disc,
            chase_cooldown: 5.0,
            return_cooldown: 10.0,
            rotation_rate: 5.0,
            rotation_epsilon: 0.0001,
            proximity_radius: 5.0,
            ground_probe_height: 60.0,
            ground_probe_radius: 0.28,
            ground_probe_max_distance: 120.0, // 2 × probe height
            collision_layer_mask: COLLISION_MASK_ALL,
            foot_clearance: 0.12,
            fallback_foot_offset: 0.9,
            teleport_sound: None,
        }
    }
}

impl StalkerConfig {
    /// Парсит JSON и сразу валидирует
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = self.chase_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(ConfigError::ChaseProbabilityOutOfRange(p));
        }

        let non_negative = [
            ("chase_radius", self.chase_radius),
            ("chase_cooldown", self.chase_cooldown),
            ("return_cooldown", self.return_cooldown),
            ("rotation_rate", self.rotation_rate),
            ("rotation_epsilon", self.rotation_epsilon),
            ("proximity_radius", self.proximity_radius),
            ("ground_probe_height", self.ground_probe_height),
            ("ground_probe_radius", self.ground_probe_radius),
            ("ground_probe_max_distance", self.ground_probe_max_distance),
            ("foot_clearance", self.foot_clearance),
            ("fallback_foot_offset", self.fallback_foot_offset),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::NegativeOrNonFinite { field, value });
            }
        }

        if self.collision_layer_mask == 0 {
            return Err(ConfigError::EmptyLayerMask);
        }

        Ok(())
    }
}
