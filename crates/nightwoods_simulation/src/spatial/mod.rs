//! Spatial queries: ground probe (sphere cast вниз) для safe teleport
//!
//! Core не знает про конкретный physics engine — только trait `SpatialQuery`.
//! Реализации:
//! - `RapierGround` — production (Rapier shape cast)
//! - `FlatGround` — headless плоскость (без Rapier)
//! - `ScriptedGround` — детерминированный fake для тестов
//!
//! Probe синхронный: hit/miss известен в том же tick.

use bevy::prelude::*;

use crate::config::StalkerConfig;

pub mod collision;
pub mod rapier;
pub mod scripted;

pub use rapier::RapierGround;
pub use scripted::ScriptedGround;

/// Результат sphere cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProbeHit {
    /// Точка контакта с поверхностью (world space)
    pub point: Vec3,
    /// Пройденное расстояние центра сферы до контакта
    pub distance: f32,
}

/// Downward sphere cast против solid геометрии.
///
/// Реализации ОБЯЗАНЫ игнорировать trigger/sensor collider'ы и фильтровать по `layer_mask`.
pub trait SpatialQuery {
    fn sphere_cast_down(
        &self,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        layer_mask: u32,
    ) -> Option<ProbeHit>;
}

/// Никакой геометрии: всегда miss (fail-open путь)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGround;

impl SpatialQuery for NoGround {
    fn sphere_cast_down(&self, _: Vec3, _: f32, _: f32, _: u32) -> Option<ProbeHit> {
        None
    }
}

/// Бесконечная горизонтальная плоскость на высоте `height`
///
/// Resource для headless режима (нет RapierContext).
#[derive(Resource, Debug, Clone, Copy)]
pub struct FlatGround {
    pub height: f32,
    /// На каком collision layer лежит плоскость
    pub layer: u32,
}

impl Default for FlatGround {
    fn default() -> Self {
        Self {
            height: 0.0,
            layer: collision::COLLISION_LAYER_TERRAIN,
        }
    }
}

impl SpatialQuery for FlatGround {
    fn sphere_cast_down(
        &self,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        layer_mask: u32,
    ) -> Option<ProbeHit> {
        if self.layer & layer_mask == 0 {
            return None;
        }

        // Сфера касается плоскости когда центр на height + radius
        let distance = origin.y - radius - self.height;
        if !(0.0..=max_distance).contains(&distance) {
            return None;
        }

        Some(ProbeHit {
            point: Vec3::new(origin.x, self.height, origin.z),
            distance,
        })
    }
}

/// Параметры ground snap (снимок из StalkerConfig)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundProbe {
    pub height: f32,
    pub radius: f32,
    pub max_distance: f32,
    pub layer_mask: u32,
}

impl GroundProbe {
    pub fn from_config(config: &StalkerConfig) -> Self {
        Self {
            height: config.ground_probe_height,
            radius: config.ground_probe_radius,
            max_distance: config.ground_probe_max_distance,
            layer_mask: config.collision_layer_mask,
        }
    }

    /// Ground snap: Y заменяется высотой поверхности при hit.
    ///
    /// Miss → точка возвращается без изменений (никогда не обнуляем Y).
    pub fn snap(&self, query: &dyn SpatialQuery, point: Vec3) -> Vec3 {
        let origin = point + Vec3::Y * self.height;

        match query.sphere_cast_down(origin, self.radius, self.max_distance, self.layer_mask) {
            Some(hit) => Vec3::new(point.x, hit.point.y, point.z),
            None => {
                crate::logger::log(&format!(
                    "ground probe miss at ({:.2}, {:.2}, {:.2}) → keeping original height",
                    point.x, point.y, point.z
                ));
                point
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn probe() -> GroundProbe {
        GroundProbe::from_config(&StalkerConfig::default())
    }

    #[test]
    fn test_snap_replaces_height_on_hit() {
        let ground = FlatGround { height: 2.5, ..default() };
        let snapped = probe().snap(&ground, Vec3::new(3.0, 10.0, -4.0));
        assert_eq!(snapped, Vec3::new(3.0, 2.5, -4.0));
    }

    #[test]
    fn test_snap_keeps_point_on_miss() {
        let point = Vec3::new(1.0, 7.0, 1.0);
        assert_eq!(probe().snap(&NoGround, point), point);
    }

    #[test]
    fn test_flat_ground_respects_layer_mask() {
        let ground = FlatGround {
            height: 0.0,
            layer: collision::COLLISION_LAYER_ACTORS,
        };
        let point = Vec3::new(0.0, 4.0, 0.0);
        // Маска probe не содержит Actors → miss → точка не меняется
        assert_eq!(probe().snap(&ground, point), point);
    }

    #[test]
    fn test_flat_ground_out_of_range_is_miss() {
        let ground = FlatGround {
            height: -500.0,
            ..default()
        };
        let point = Vec3::new(0.0, 0.0, 0.0);
        // origin.y = 60, поверхность на -500: дальше max_distance (120)
        assert_eq!(probe().snap(&ground, point), point);
    }

    #[test]
    fn test_snap_below_candidate_height() {
        // Candidate над ямой: поверхность ниже исходной точки
        let ground = FlatGround { height: -3.0, ..default() };
        let snapped = probe().snap(&ground, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(snapped.y, -3.0);
    }
}
