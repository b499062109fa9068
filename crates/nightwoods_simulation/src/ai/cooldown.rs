//! Cooldown scheduler: countdown → одно срабатывание → re-arm по исходу
//!
//! Инварианты:
//! - remaining ≥ 0 всегда (clamp до срабатывания)
//! - remaining растёт только при re-arm после срабатывания
//! - максимум одно срабатывание на вызов advance, даже при огромном dt

use bevy::prelude::*;

use super::decision::BehaviorDecision;
use crate::config::StalkerConfig;

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct CooldownTimer {
    remaining: f32,
    duration: f32,
}

impl CooldownTimer {
    pub fn armed(duration: f32) -> Self {
        let duration = duration.max(0.0);
        Self {
            remaining: duration,
            duration,
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Длительность текущего цикла (последний re-arm)
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooldownScheduler {
    timer: CooldownTimer,
    chase_cooldown: f32,
    return_cooldown: f32,
}

impl CooldownScheduler {
    /// Первый цикл — chase_cooldown
    pub fn from_config(config: &StalkerConfig) -> Self {
        Self {
            timer: CooldownTimer::armed(config.chase_cooldown),
            chase_cooldown: config.chase_cooldown,
            return_cooldown: config.return_cooldown,
        }
    }

    pub fn timer(&self) -> &CooldownTimer {
        &self.timer
    }

    pub fn cooldown_for(&self, decision: BehaviorDecision) -> f32 {
        match decision {
            BehaviorDecision::Chase => self.chase_cooldown,
            BehaviorDecision::Return => self.return_cooldown,
        }
    }

    /// Уменьшает remaining на dt; при истечении вызывает `fire` ровно один раз
    /// и re-arm'ит таймер длительностью по исходу решения.
    ///
    /// Отрицательный / NaN dt трактуется как 0.
    pub fn advance(
        &mut self,
        dt: f32,
        fire: impl FnOnce() -> BehaviorDecision,
    ) -> Option<BehaviorDecision> {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };

        self.timer.remaining = (self.timer.remaining - dt).max(0.0);
        if !self.timer.is_expired() {
            return None;
        }

        let decision = fire();
        self.timer = CooldownTimer::armed(self.cooldown_for(decision));

        Some(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> CooldownScheduler {
        CooldownScheduler::from_config(&StalkerConfig {
            chase_cooldown: 2.0,
            return_cooldown: 6.0,
            ..Default::default()
        })
    }

    #[test]
    fn test_countdown_without_firing() {
        let mut s = scheduler();
        let mut fired = 0;

        assert!(s.advance(0.5, || { fired += 1; BehaviorDecision::Chase }).is_none());
        assert!(s.advance(0.5, || { fired += 1; BehaviorDecision::Chase }).is_none());

        assert_eq!(fired, 0);
        assert_eq!(s.timer().remaining(), 1.0);
    }

    #[test]
    fn test_fires_once_and_rearms_by_outcome() {
        let mut s = scheduler();

        assert_eq!(s.advance(2.0, || BehaviorDecision::Return), Some(BehaviorDecision::Return));
        assert_eq!(s.timer().remaining(), 6.0);
        assert_eq!(s.timer().duration(), 6.0);

        assert_eq!(s.advance(6.0, || BehaviorDecision::Chase), Some(BehaviorDecision::Chase));
        assert_eq!(s.timer().remaining(), 2.0);
    }

    #[test]
    fn test_huge_dt_fires_only_once() {
        let mut s = scheduler();
        let mut fired = 0;

        s.advance(1000.0, || {
            fired += 1;
            BehaviorDecision::Chase
        });

        assert_eq!(fired, 1);
        assert_eq!(s.timer().remaining(), 2.0);
    }

    #[test]
    fn test_remaining_never_negative_never_grows_without_firing() {
        let mut s = scheduler();
        let mut previous = s.timer().remaining();

        for step in [0.3, 0.7, -5.0, f32::NAN, 0.9, 0.05, 3.0, 0.0, 1.1, 4.4] {
            let fired = s.advance(step, || BehaviorDecision::Chase).is_some();
            let now = s.timer().remaining();

            assert!(now >= 0.0);
            if !fired {
                assert!(now <= previous, "grew without firing: {} → {}", previous, now);
            }
            previous = now;
        }
    }

    #[test]
    fn test_zero_cooldown_fires_every_tick() {
        let mut s = CooldownScheduler::from_config(&StalkerConfig {
            chase_cooldown: 0.0,
            ..Default::default()
        });
        assert!(s.advance(0.0, || BehaviorDecision::Chase).is_some());
        assert!(s.advance(0.0, || BehaviorDecision::Chase).is_some());
    }
}
