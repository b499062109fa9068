//! Stalker AI module
//!
//! Core (engine-agnostic, `StalkerBrain::tick`):
//! - cooldown — countdown + одно срабатывание + re-arm
//! - decision — Chase / Return policy (seeded draws)
//! - relocator — ground snap + safe teleport через locomotion
//! - orientation — exponential smoothing поворота к target
//! - proximity — edge-triggered static эффект
//!
//! ECS слой (components / systems / events) только гоняет core из FixedUpdate.

use bevy::prelude::*;

pub mod brain;
pub mod components;
pub mod cooldown;
pub mod decision;
pub mod events;
pub mod orientation;
pub mod proximity;
pub mod relocator;
pub mod sinks;
pub mod systems;


// Re-export основных типов
pub use brain::{StalkerBrain, StalkerIo, StalkerStats, TickReport};
pub use components::Stalker;
pub use cooldown::{CooldownScheduler, CooldownTimer};
pub use decision::{BehaviorDecision, DecisionPolicy};
pub use events::{StaticEffectToggled, TeleportSoundRequested};
pub use orientation::OrientationController;
pub use proximity::ProximityEffectTrigger;
pub use relocator::{KinematicRelocator, TeleportCandidate};
pub use sinks::{AudioSink, NullSink, RecordingSink, VisibilitySink};

/// Stalker AI Plugin
///
/// Регистрирует системы в FixedUpdate для детерминизма.
/// Порядок выполнения:
/// 1. tick_stalkers — cooldown/decision/teleport + orientation + proximity
/// 2. sync_stalker_transforms — agent state → Transform (+ мгновенный перенос Rapier body на teleport tick)
pub struct StalkerAiPlugin;

impl Plugin for StalkerAiPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TeleportSoundRequested>()
            .add_event::<StaticEffectToggled>()
            .add_systems(
                FixedUpdate,
                (systems::tick_stalkers, systems::sync_stalker_transforms).chain(),
            );
    }
}
