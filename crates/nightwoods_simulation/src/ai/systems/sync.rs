//! Sync system: agent state → Transform (+ Rapier body на teleport tick)
//!
//! Agent state authoritative, Transform — производная.
//!
//! Обычный tick: пишем Transform, Rapier сам превращает его в
//! `set_next_kinematic_position` (плавный поворот).
//! Teleport tick: Transform через kinematic target = движение со скоростью
//! (40м за tick ≈ 2400 м/с) + contacts по пути. Поэтому повторяем
//! disable → write → enable прямо на Rapier объектах:
//! collider выключен → `set_position` (next position = position, скорость 0) → collider обратно.

use bevy::prelude::*;
use bevy_rapier3d::prelude::{RapierColliderHandle, RapierContextMut, RapierRigidBodyHandle, WriteRapierContext};
use bevy_rapier3d::rapier::math::{Isometry, Vector};

use crate::ai::components::Stalker;
use crate::locomotion::Relocation;

pub fn sync_stalker_transforms(
    mut stalkers: Query<(
        Entity,
        &Stalker,
        &mut Transform,
        Option<&RapierRigidBodyHandle>,
        Option<&RapierColliderHandle>,
    )>,
    mut write_rapier_context: WriteRapierContext,
) {
    // Headless (без RapierPhysicsPlugin) → только Transform
    let mut rapier_context = write_rapier_context.single_mut().ok();

    for (entity, stalker, mut transform, body, collider) in stalkers.iter_mut() {
        let agent = stalker.agent();
        transform.translation = agent.position();
        transform.rotation = agent.orientation();

        let Some(candidate) = stalker.last_report().teleport.as_ref() else {
            continue;
        };

        if let Some(context) = rapier_context.as_mut() {
            teleport_rapier_body(
                context,
                body,
                collider,
                agent.position(),
                agent.orientation(),
                candidate.relocation,
            );
            crate::logger::log(&format!(
                "🌀 rapier body {:?} teleported to ({:.2}, {:.2}, {:.2})",
                entity,
                agent.position().x,
                agent.position().y,
                agent.position().z
            ));
        }
    }
}

/// Мгновенный перенос Rapier body + collider в обход kinematic интерполяции
///
/// Entity без body / collider (Direct, или handles ещё не созданы) — пропускается.
pub fn teleport_rapier_body(
    context: &mut RapierContextMut,
    body: Option<&RapierRigidBodyHandle>,
    collider: Option<&RapierColliderHandle>,
    position: Vec3,
    rotation: Quat,
    relocation: Relocation,
) {
    let collider = collider.map(|handle| handle.0);

    let mut was_enabled = None;
    if let (true, Some(handle)) = (relocation.collision_suspended, collider) {
        if let Some(collider) = context.colliders.colliders.get_mut(handle) {
            was_enabled = Some(collider.is_enabled());
            collider.set_enabled(false);
        }
    }

    if let Some(handle) = body {
        if let Some(rb) = context.rigidbody_set.bodies.get_mut(handle.0) {
            let iso: Isometry<f32> = Isometry::from_parts(position.into(), rotation.into());
            // set_position выставляет и next position → interpolated velocity = 0
            rb.set_position(iso, true);
            rb.set_next_kinematic_position(iso);
            if relocation.velocity_cleared {
                rb.set_linvel(Vector::zeros(), true);
            }
        }
    }

    if let (Some(enabled), Some(handle)) = (was_enabled, collider) {
        if let Some(collider) = context.colliders.colliders.get_mut(handle) {
            collider.set_enabled(enabled);
        }
    }
}
