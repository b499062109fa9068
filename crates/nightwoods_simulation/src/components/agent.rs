//! Agent state: позиция, ориентация, locomotion, base spot
//!
//! Инварианты:
//! - locomotion mode фиксирован при создании
//! - позицию пишет только relocator (teleport), ориентацию — только orientation controller
//! - BaseSpot записан один раз при спавне и не меняется

use bevy::prelude::*;

use crate::locomotion::{Locomotion, LocomotionMode, Relocation};

/// Точка возврата (позиция агента на момент спавна)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct BaseSpot(Vec3);

impl BaseSpot {
    pub fn position(&self) -> Vec3 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Agent {
    position: Vec3,
    orientation: Quat,
    locomotion: Locomotion,
    base_spot: BaseSpot,
}

impl Agent {
    pub fn new(position: Vec3, orientation: Quat, locomotion: Locomotion) -> Self {
        Self {
            position,
            orientation,
            locomotion,
            base_spot: BaseSpot(position),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    pub fn locomotion(&self) -> &Locomotion {
        &self.locomotion
    }

    pub fn mode(&self) -> LocomotionMode {
        self.locomotion.mode()
    }

    pub fn base_spot(&self) -> BaseSpot {
        self.base_spot
    }

    pub fn foot_offset(&self) -> f32 {
        self.locomotion.foot_offset()
    }

    /// Teleport через locomotion (единственный путь изменения позиции)
    pub(crate) fn relocate(&mut self, point: Vec3) -> Relocation {
        self.locomotion.relocate(&mut self.position, point)
    }

    pub(crate) fn set_orientation(&mut self, orientation: Quat) {
        self.orientation = orientation;
    }
}
