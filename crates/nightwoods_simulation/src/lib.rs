//! NIGHTWOODS Simulation Core
//!
//! Stalker AI на Bevy 0.16: периодический teleport к player / обратно на base spot,
//! safe grounding после teleport, плавный поворот к player, static эффект рядом.
//!
//! Архитектура:
//! - Core (`ai::StalkerBrain`) — engine-agnostic, явный `tick(dt)`
//! - ECS слой (`StalkerAiPlugin`) — гоняет core в FixedUpdate, sync в Transform
//! - Physics (Rapier) — только через trait `spatial::SpatialQuery`

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod components;
pub mod config;
pub mod locomotion;
pub mod logger;
pub mod spatial;

// Re-export базовых типов для удобства
pub use ai::{BehaviorDecision, Stalker, StalkerAiPlugin, StalkerBrain, StaticEffectToggled, TeleportSoundRequested};
pub use ai::systems::spawn_stalker;
pub use components::*;
pub use config::{ChaseSampling, ConfigError, StalkerConfig};
pub use locomotion::{CapsuleController, Locomotion, LocomotionMode, RigidBodyState};
pub use logger::{log, log_error, log_info, log_warning};
pub use spatial::{FlatGround, SpatialQuery};

/// Главный plugin симуляции
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed мог быть выставлен create_headless_app — не перетираем
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins(StalkerAiPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Из него выводятся seed'ы для RNG каждого stalker'а.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed для следующего spawned агента
    pub fn next_seed(&mut self) -> u64 {
        self.rng.gen()
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
