//! Stalker component: brain (ChaCha8 seeded) + последний tick report

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::ai::brain::{StalkerBrain, StalkerIo, TickReport};
use crate::components::Agent;
use crate::config::{ConfigError, StalkerConfig};

/// Stalker агент в ECS
///
/// Transform — производная от agent state (пишется sync системой), не наоборот.
#[derive(Component, Debug)]
pub struct Stalker {
    brain: StalkerBrain<ChaCha8Rng>,
    last_report: TickReport,
}

impl Stalker {
    pub fn new(config: StalkerConfig, agent: Agent, seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            brain: StalkerBrain::new(config, agent, ChaCha8Rng::seed_from_u64(seed))?,
            last_report: TickReport::default(),
        })
    }

    pub fn brain(&self) -> &StalkerBrain<ChaCha8Rng> {
        &self.brain
    }

    pub fn agent(&self) -> &Agent {
        self.brain.agent()
    }

    /// Report последнего tick (None-поля если tick был no-op)
    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    pub fn tick(&mut self, dt: f32, target: Option<Vec3>, io: &mut StalkerIo<'_>) -> TickReport {
        self.last_report = self.brain.tick(dt, target, io);
        self.last_report
    }
}
