//! Locomotion representation агента (фиксируется при создании)
//!
//! Три варианта:
//! - CapsuleControlled — kinematic character controller (capsule)
//! - RigidBodyControlled — rigid body + collider
//! - Direct — голый transform, без collider
//!
//! Каждый вариант знает свой foot offset и безопасный способ записать позицию.
//! Teleport без disable → write → enable дисциплины = tunneling, перенос velocity
//! или solver воспринимает прыжок как мгновенное столкновение.

use bevy::prelude::*;

/// Тег режима (для логов / ECS spawn)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum LocomotionMode {
    CapsuleControlled,
    RigidBodyControlled,
    Direct,
}

/// Capsule character controller state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapsuleController {
    /// Полная высота capsule (метры)
    pub height: f32,
    /// Вертикальный offset центра capsule относительно позиции агента
    pub center_y: f32,
    /// Вертикальный scale агента
    pub scale_y: f32,
    /// Controller резолвит коллизии/velocity только когда enabled
    pub enabled: bool,
    /// Velocity, накопленная controller'ом (не трогается teleport'ом)
    pub velocity: Vec3,
}

impl CapsuleController {
    pub fn new(height: f32, center_y: f32, scale_y: f32) -> Self {
        Self {
            height,
            center_y,
            scale_y,
            enabled: true,
            velocity: Vec3::ZERO,
        }
    }
}

/// Rigid body + collider state
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidBodyState {
    /// Половина вертикального размера collider bounds
    pub half_extent_y: f32,
    pub collider_enabled: bool,
    pub linear_velocity: Vec3,
    /// Kinematic body: без gravity, позиция пишется напрямую
    pub kinematic: bool,
}

impl RigidBodyState {
    pub fn new(half_extent_y: f32) -> Self {
        Self {
            half_extent_y,
            collider_enabled: true,
            linear_velocity: Vec3::ZERO,
            kinematic: true,
        }
    }
}

/// Что произошло во время relocate (для логов и проверок последовательности)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Relocation {
    /// Collision resolution была выключена на время записи позиции
    pub collision_suspended: bool,
    /// Linear velocity обнулена
    pub velocity_cleared: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Locomotion {
    CapsuleControlled(CapsuleController),
    RigidBodyControlled(RigidBodyState),
    /// Нет collider: foot offset = fallback константа
    Direct { fallback_foot_offset: f32 },
}

impl Locomotion {
    pub fn mode(&self) -> LocomotionMode {
        match self {
            Locomotion::CapsuleControlled(_) => LocomotionMode::CapsuleControlled,
            Locomotion::RigidBodyControlled(_) => LocomotionMode::RigidBodyControlled,
            Locomotion::Direct { .. } => LocomotionMode::Direct,
        }
    }

    /// Расстояние от позиции агента до низа collision volume
    pub fn foot_offset(&self) -> f32 {
        match self {
            Locomotion::CapsuleControlled(cc) => {
                (cc.height * 0.5 + cc.center_y).max(0.0) * cc.scale_y
            }
            Locomotion::RigidBodyControlled(rb) => rb.half_extent_y,
            Locomotion::Direct { fallback_foot_offset } => *fallback_foot_offset,
        }
    }

    /// Записывает позицию в обход собственной физики представления.
    ///
    /// `position` — единственное поле позиции агента; других writer'ов внутри вызова нет.
    pub fn relocate(&mut self, position: &mut Vec3, point: Vec3) -> Relocation {
        match self {
            Locomotion::CapsuleControlled(cc) => {
                let was_enabled = cc.enabled;
                cc.enabled = false;
                *position = point;
                cc.enabled = was_enabled;

                Relocation {
                    collision_suspended: true,
                    velocity_cleared: false,
                }
            }
            Locomotion::RigidBodyControlled(rb) => {
                rb.collider_enabled = false;
                *position = point;
                rb.linear_velocity = Vec3::ZERO;
                rb.collider_enabled = true;

                Relocation {
                    collision_suspended: true,
                    velocity_cleared: true,
                }
            }
            Locomotion::Direct { .. } => {
                *position = point;
                Relocation::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capsule_foot_offset_scaled() {
        // height 2.0, center 0.0 → 1.0, scale 1.5 → 1.5
        let loco = Locomotion::CapsuleControlled(CapsuleController::new(2.0, 0.0, 1.5));
        assert!((loco.foot_offset() - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_capsule_foot_offset_never_negative() {
        let loco = Locomotion::CapsuleControlled(CapsuleController::new(1.0, -2.0, 1.0));
        assert_eq!(loco.foot_offset(), 0.0);
    }

    #[test]
    fn test_capsule_relocate_restores_enabled_flag() {
        let mut cc = CapsuleController::new(2.0, 0.0, 1.0);
        cc.velocity = Vec3::new(1.0, 0.0, 0.0);
        let mut loco = Locomotion::CapsuleControlled(cc);
        let mut pos = Vec3::ZERO;

        let report = loco.relocate(&mut pos, Vec3::new(5.0, 1.0, 5.0));

        assert_eq!(pos, Vec3::new(5.0, 1.0, 5.0));
        assert!(report.collision_suspended);
        let Locomotion::CapsuleControlled(cc) = loco else {
            unreachable!()
        };
        assert!(cc.enabled);
        // Controller velocity сохраняется
        assert_eq!(cc.velocity, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_disabled_capsule_stays_disabled() {
        let mut cc = CapsuleController::new(2.0, 0.0, 1.0);
        cc.enabled = false;
        let mut loco = Locomotion::CapsuleControlled(cc);
        let mut pos = Vec3::ZERO;

        loco.relocate(&mut pos, Vec3::ONE);

        let Locomotion::CapsuleControlled(cc) = loco else {
            unreachable!()
        };
        assert!(!cc.enabled);
    }

    #[test]
    fn test_rigid_body_relocate_zeroes_velocity() {
        let mut rb = RigidBodyState::new(0.9);
        rb.linear_velocity = Vec3::new(3.0, -9.0, 0.5);
        let mut loco = Locomotion::RigidBodyControlled(rb);
        let mut pos = Vec3::ZERO;

        let report = loco.relocate(&mut pos, Vec3::new(-2.0, 0.5, 8.0));

        assert_eq!(pos, Vec3::new(-2.0, 0.5, 8.0));
        assert_eq!(
            report,
            Relocation {
                collision_suspended: true,
                velocity_cleared: true
            }
        );
        let Locomotion::RigidBodyControlled(rb) = loco else {
            unreachable!()
        };
        assert_eq!(rb.linear_velocity, Vec3::ZERO);
        assert!(rb.collider_enabled);
        assert_eq!(loco.foot_offset(), 0.9);
    }

    #[test]
    fn test_direct_uses_fallback() {
        let mut loco = Locomotion::Direct {
            fallback_foot_offset: 0.9,
        };
        let mut pos = Vec3::ZERO;
        assert_eq!(loco.foot_offset(), 0.9);
        assert_eq!(loco.relocate(&mut pos, Vec3::X), Relocation::default());
        assert_eq!(pos, Vec3::X);
        assert_eq!(loco.mode(), LocomotionMode::Direct);
    }
}
