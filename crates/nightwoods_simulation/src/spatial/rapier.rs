//! Rapier backend для ground probe
//!
//! Ball shape cast вниз через RapierContext.
//! - Sensors исключены (trigger-ignore)
//! - CollisionGroups фильтр из `layer_mask`
//! - Собственный collider stalker'а исключён (иначе probe попадёт в себя)
//!
//! Высота поверхности берётся ray cast'ом из центра шара в момент контакта:
//! shape cast останавливается чуть раньше поверхности (tolerance parry),
//! `origin.y - toi - radius` даёт snap выше земли на ~1-2 см.

use bevy::prelude::*;
use bevy_rapier3d::parry::shape::Ball;
use bevy_rapier3d::prelude::*;

use super::collision::probe_groups;
use super::{ProbeHit, SpatialQuery};

/// Запас для ray cast'а под шаром (метры сверх радиуса)
const SURFACE_RAY_MARGIN: f32 = 0.1;

pub struct RapierGround<'a, 'w> {
    context: &'a RapierContext<'w>,
    exclude: Option<Entity>,
}

impl<'a, 'w> RapierGround<'a, 'w> {
    pub fn new(context: &'a RapierContext<'w>) -> Self {
        Self {
            context,
            exclude: None,
        }
    }

    /// Игнорировать collider/body этой entity (сам stalker)
    pub fn excluding(mut self, entity: Entity) -> Self {
        self.exclude = Some(entity);
        self
    }
}

impl SpatialQuery for RapierGround<'_, '_> {
    fn sphere_cast_down(
        &self,
        origin: Vec3,
        radius: f32,
        max_distance: f32,
        layer_mask: u32,
    ) -> Option<ProbeHit> {
        let shape = Ball::new(radius);
        let options = ShapeCastOptions::with_max_time_of_impact(max_distance);

        let mut filter = QueryFilter::default()
            .exclude_sensors()
            .groups(probe_groups(layer_mask));
        if let Some(entity) = self.exclude {
            filter = filter.exclude_collider(entity).exclude_rigid_body(entity);
        }

        let (_, hit) = self
            .context
            .cast_shape(origin, Quat::IDENTITY, Vec3::NEG_Y, &shape, options, filter)?;

        // shape_vel единичный → time_of_impact = пройденная дистанция центра
        let distance = hit.time_of_impact;
        let center = origin + Vec3::NEG_Y * distance;

        let surface_y = match self.context.cast_ray(
            center,
            Vec3::NEG_Y,
            radius + SURFACE_RAY_MARGIN,
            true,
            filter,
        ) {
            Some((_, ray_toi)) => center.y - ray_toi,
            // Шар зацепил край (под центром пусто) — нижняя точка шара
            None => center.y - radius,
        };

        Some(ProbeHit {
            point: Vec3::new(origin.x, surface_y, origin.z),
            distance,
        })
    }
}
