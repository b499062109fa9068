//! Stalker brain: engine-agnostic tick
//!
//! FSM одного агента:
//! Idle (cooldown) → Deciding (policy, один раз) → Relocating (relocator, один раз) → Idle
//!
//! Orientation и proximity работают каждый tick, ортогонально FSM.
//! Порядок внутри tick: cooldown → orientation → proximity.

use bevy::prelude::*;
use rand::Rng;

use super::cooldown::CooldownScheduler;
use super::decision::{BehaviorDecision, DecisionPolicy};
use super::orientation::OrientationController;
use super::proximity::ProximityEffectTrigger;
use super::relocator::{KinematicRelocator, TeleportCandidate};
use super::sinks::{AudioSink, VisibilitySink};
use crate::components::Agent;
use crate::config::{ConfigError, StalkerConfig};
use crate::spatial::SpatialQuery;

/// Внешние collaborators одного tick
pub struct StalkerIo<'a> {
    pub spatial: &'a dyn SpatialQuery,
    pub audio: &'a mut dyn AudioSink,
    pub visibility: &'a mut dyn VisibilitySink,
}

/// Что произошло за tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub decision: Option<BehaviorDecision>,
    pub teleport: Option<TeleportCandidate>,
    /// Новое состояние эффекта, если был переход
    pub effect_toggled: Option<bool>,
}

/// Счётчики за всё время жизни агента
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub struct StalkerStats {
    pub firings: u64,
    pub chases: u64,
    pub returns: u64,
}

pub struct StalkerBrain<R: Rng> {
    config: StalkerConfig,
    agent: Agent,
    scheduler: CooldownScheduler,
    policy: DecisionPolicy,
    relocator: KinematicRelocator,
    orientation: OrientationController,
    proximity: ProximityEffectTrigger,
    rng: R,
    stats: StalkerStats,
}

impl<R: Rng> StalkerBrain<R> {
    /// RNG обязателен: без источника draw'ов агент не создаётся
    pub fn new(config: StalkerConfig, agent: Agent, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        Ok(Self {
            scheduler: CooldownScheduler::from_config(&config),
            policy: DecisionPolicy::from_config(&config),
            relocator: KinematicRelocator::from_config(&config),
            orientation: OrientationController::from_config(&config),
            proximity: ProximityEffectTrigger::new(config.proximity_radius),
            config,
            agent,
            rng,
            stats: StalkerStats::default(),
        })
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn config(&self) -> &StalkerConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &CooldownScheduler {
        &self.scheduler
    }

    pub fn is_effect_active(&self) -> bool {
        self.proximity.is_active()
    }

    pub fn stats(&self) -> StalkerStats {
        self.stats
    }

    /// Один кадр симуляции. `target == None` → полный no-op.
    pub fn tick(&mut self, dt: f32, target: Option<Vec3>, io: &mut StalkerIo<'_>) -> TickReport {
        let Some(target) = target else {
            return TickReport::default();
        };

        let mut report = TickReport::default();

        // 1. Cooldown (может вызвать decision + relocation)
        let policy = &self.policy;
        let relocator = &self.relocator;
        let agent = &mut self.agent;
        let rng = &mut self.rng;
        let mut teleport = None;

        report.decision = self.scheduler.advance(dt, || {
            let (decision, raw) = policy.decide(rng, target, agent.base_spot().position());
            teleport = Some(relocator.relocate(agent, raw, io.spatial, &mut *io.audio));
            decision
        });
        report.teleport = teleport;

        if let (Some(decision), Some(candidate)) = (report.decision, report.teleport) {
            self.record_firing(decision, &candidate);
        }

        // 2. Orientation (rotation only)
        if let Some(orientation) = self.orientation.update(
            self.agent.orientation(),
            self.agent.position(),
            target,
            dt,
        ) {
            self.agent.set_orientation(orientation);
        }

        // 3. Proximity effect (edge-triggered)
        report.effect_toggled = self.proximity.update(self.agent.position(), target);
        if let Some(active) = report.effect_toggled {
            io.visibility.set_effect_active(active);
            crate::logger::log(&format!("📺 static effect → {}", if active { "ON" } else { "OFF" }));
        }

        report
    }

    fn record_firing(&mut self, decision: BehaviorDecision, candidate: &TeleportCandidate) {
        self.stats.firings += 1;
        match decision {
            BehaviorDecision::Chase => self.stats.chases += 1,
            BehaviorDecision::Return => self.stats.returns += 1,
        }

        let p = candidate.final_point;
        crate::logger::log_info(&format!(
            "👤 stalker {:?} ({:?}) → teleported to ({:.2}, {:.2}, {:.2}), next in {:.1}s",
            decision,
            self.agent.mode(),
            p.x,
            p.y,
            p.z,
            self.scheduler.timer().remaining()
        ));
    }
}

impl<R: Rng> std::fmt::Debug for StalkerBrain<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StalkerBrain")
            .field("agent", &self.agent)
            .field("scheduler", &self.scheduler)
            .field("effect_active", &self.proximity.is_active())
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
