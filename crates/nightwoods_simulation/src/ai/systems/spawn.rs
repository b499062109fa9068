//! Spawn helper для stalker entity
//!
//! Rapier компоненты зависят от locomotion mode:
//! - CapsuleControlled → capsule collider (низ = позиция − foot offset) + KinematicCharacterController
//! - RigidBodyControlled → kinematic rigid body + cuboid collider + Velocity
//! - Direct → только Transform (нет collider)
//!
//! Teleport этих body делает sync система (`teleport_rapier_body`), не Transform.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::ai::components::Stalker;
use crate::components::Agent;
use crate::config::{ConfigError, StalkerConfig};
use crate::locomotion::{CapsuleController, Locomotion};
use crate::spatial::collision;

/// Радиус capsule / половина ширины cuboid (метры)
pub const STALKER_BODY_RADIUS: f32 = 0.4;

/// Capsule collider для `CapsuleControlled`
///
/// Низ capsule совпадает с `foot_offset()`: центр сдвинут на `-center_y * scale_y`.
/// Радиус не больше половины высоты (иначе сфера "провалится" ниже ног).
pub fn capsule_collider(cc: &CapsuleController) -> Collider {
    let half_height = (cc.height * 0.5 * cc.scale_y).max(0.0);
    let radius = (STALKER_BODY_RADIUS * cc.scale_y).min(half_height);
    let half_segment = half_height - radius;
    let center = Vec3::new(0.0, -cc.center_y * cc.scale_y, 0.0);

    Collider::compound(vec![(center, Quat::IDENTITY, Collider::capsule_y(half_segment, radius))])
}

/// Spawn stalker'а: Stalker (brain) + Transform + Rapier по locomotion.
///
/// BaseSpot = `position`. Config валидируется здесь, до появления entity.
pub fn spawn_stalker(
    commands: &mut Commands,
    config: StalkerConfig,
    position: Vec3,
    locomotion: Locomotion,
    seed: u64,
) -> Result<Entity, ConfigError> {
    let agent = Agent::new(position, Quat::IDENTITY, locomotion);
    let stalker = Stalker::new(config, agent, seed)?;

    let mut entity = commands.spawn((stalker, Transform::from_translation(position)));

    match locomotion {
        Locomotion::CapsuleControlled(cc) => {
            entity.insert((
                RigidBody::KinematicPositionBased,
                capsule_collider(&cc),
                KinematicCharacterController::default(),
                collision::actor_groups(),
            ));
        }
        Locomotion::RigidBodyControlled(rb) => {
            entity.insert((
                // Kinematic: без gravity, позиция пишется напрямую
                RigidBody::KinematicPositionBased,
                Collider::cuboid(STALKER_BODY_RADIUS, rb.half_extent_y, STALKER_BODY_RADIUS),
                Velocity::default(),
                collision::actor_groups(),
            ));
        }
        Locomotion::Direct { .. } => {}
    }

    let id = entity.id();
    crate::logger::log_info(&format!(
        "👤 stalker {:?} spawned at ({:.1}, {:.1}, {:.1}) mode {:?}",
        id,
        position.x,
        position.y,
        position.z,
        locomotion.mode()
    ));

    Ok(id)
}
