//! Kinematic relocator: safe teleport
//!
//! ground snap → + foot offset + clearance → locomotion.relocate → teleport sound.
//! Весь pipeline держит `&mut Agent`: между probe и записью позиции никто другой
//! агента не читает и не пишет.

use bevy::prelude::*;

use super::sinks::AudioSink;
use crate::components::Agent;
use crate::config::StalkerConfig;
use crate::locomotion::Relocation;
use crate::spatial::{GroundProbe, SpatialQuery};

/// Transient: живёт внутри одного срабатывания
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleportCandidate {
    /// Точка от decision policy
    pub raw: Vec3,
    /// После ground snap (Y = hit height или исходный при miss)
    pub snapped: Vec3,
    /// snapped + foot offset + clearance — реальная новая позиция
    pub final_point: Vec3,
    pub relocation: Relocation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KinematicRelocator {
    pub probe: GroundProbe,
    pub foot_clearance: f32,
    pub teleport_sound: Option<String>,
}

impl KinematicRelocator {
    pub fn from_config(config: &StalkerConfig) -> Self {
        Self {
            probe: GroundProbe::from_config(config),
            foot_clearance: config.foot_clearance,
            teleport_sound: config.teleport_sound.clone(),
        }
    }

    pub fn relocate(
        &self,
        agent: &mut Agent,
        raw: Vec3,
        spatial: &dyn SpatialQuery,
        audio: &mut dyn AudioSink,
    ) -> TeleportCandidate {
        let snapped = self.probe.snap(spatial, raw);
        let final_point = snapped + Vec3::Y * (agent.foot_offset() + self.foot_clearance);

        let relocation = agent.relocate(final_point);

        if let Some(clip) = &self.teleport_sound {
            audio.play_once(clip);
        }

        TeleportCandidate {
            raw,
            snapped,
            final_point,
            relocation,
        }
    }
}
