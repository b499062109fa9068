//! Decision policy: Chase или Return
//!
//! Чистая функция от (draw, config, target, base spot).
//! Draw берётся из injected RNG → последовательность решений воспроизводима по seed.

use bevy::prelude::*;
use rand::Rng;
use std::f32::consts::TAU;

use crate::config::{ChaseSampling, StalkerConfig};

/// Исход одного срабатывания cooldown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum BehaviorDecision {
    /// Teleport в окрестность target
    Chase,
    /// Teleport обратно в BaseSpot
    Return,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecisionPolicy {
    pub chase_probability: f32,
    pub chase_radius: f32,
    pub sampling: ChaseSampling,
}

impl DecisionPolicy {
    pub fn from_config(config: &StalkerConfig) -> Self {
        Self {
            chase_probability: config.chase_probability,
            chase_radius: config.chase_radius,
            sampling: config.chase_sampling,
        }
    }

    /// `u ∈ [0, 1)`. Равенство `u == p` — Chase.
    pub fn choose(&self, u: f32) -> BehaviorDecision {
        if u <= self.chase_probability {
            BehaviorDecision::Chase
        } else {
            BehaviorDecision::Return
        }
    }

    /// Горизонтальный offset от target в той же Y-плоскости.
    ///
    /// `angle_u`, `magnitude_u ∈ [0, 1)`; для Ring `magnitude_u` игнорируется.
    pub fn chase_destination(&self, target: Vec3, angle_u: f32, magnitude_u: f32) -> Vec3 {
        let angle = angle_u * TAU;
        let distance = match self.sampling {
            ChaseSampling::Disc => magnitude_u * self.chase_radius,
            ChaseSampling::Ring => self.chase_radius,
        };

        target + Vec3::new(angle.cos() * distance, 0.0, angle.sin() * distance)
    }

    /// Полное решение: draw → outcome → destination candidate.
    ///
    /// Порядок draw'ов фиксирован: choice, затем (только для Chase) angle и magnitude.
    pub fn decide<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        target: Vec3,
        base_spot: Vec3,
    ) -> (BehaviorDecision, Vec3) {
        let decision = self.choose(rng.gen::<f32>());

        let destination = match decision {
            BehaviorDecision::Chase => {
                let angle_u = rng.gen::<f32>();
                let magnitude_u = match self.sampling {
                    ChaseSampling::Disc => rng.gen::<f32>(),
                    ChaseSampling::Ring => 1.0,
                };
                self.chase_destination(target, angle_u, magnitude_u)
            }
            BehaviorDecision::Return => base_spot,
        };

        (decision, destination)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn policy(p: f32, r: f32) -> DecisionPolicy {
        DecisionPolicy {
            chase_probability: p,
            chase_radius: r,
            sampling: ChaseSampling::Disc,
        }
    }

    #[test]
    fn test_equality_is_chase() {
        let policy = policy(0.5, 10.0);
        assert_eq!(policy.choose(0.5), BehaviorDecision::Chase);
        assert_eq!(policy.choose(0.500_001), BehaviorDecision::Return);
    }

    #[test]
    fn test_zero_probability_with_zero_draw_is_chase() {
        // u == p == 0 → inclusive → Chase (редкий edge case, зафиксирован)
        assert_eq!(policy(0.0, 10.0).choose(0.0), BehaviorDecision::Chase);
        assert_eq!(policy(0.0, 10.0).choose(0.01), BehaviorDecision::Return);
    }

    #[test]
    fn test_chase_destination_within_radius_same_height() {
        let policy = policy(1.0, 10.0);
        let target = Vec3::new(3.0, 7.5, -2.0);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            let (decision, dest) = policy.decide(&mut rng, target, Vec3::ZERO);
            assert_eq!(decision, BehaviorDecision::Chase);
            assert_eq!(dest.y, target.y);
            let horizontal = Vec2::new(dest.x - target.x, dest.z - target.z).length();
            assert!(horizontal <= 10.0 + 1e-4, "horizontal = {}", horizontal);
        }
    }

    #[test]
    fn test_ring_sampling_exact_distance() {
        let policy = DecisionPolicy {
            sampling: ChaseSampling::Ring,
            ..policy(1.0, 6.0)
        };
        let dest = policy.chase_destination(Vec3::ZERO, 0.25, 0.0);
        assert!((Vec2::new(dest.x, dest.z).length() - 6.0).abs() < 1e-4);
    }

    #[test]
    fn test_return_is_base_spot_exactly() {
        let policy = policy(0.0, 10.0);
        let base = Vec3::new(-12.25, 3.5, 40.0);
        // StepRng(u64::MAX) → gen::<f32>() близко к 1.0 → Return
        let mut rng = StepRng::new(u64::MAX, 0);

        for target in [Vec3::ZERO, Vec3::splat(100.0), Vec3::new(-5.0, 0.0, 2.0)] {
            let (decision, dest) = policy.decide(&mut rng, target, base);
            assert_eq!(decision, BehaviorDecision::Return);
            assert_eq!(dest, base);
        }
    }

    #[test]
    fn test_zero_draw_lands_on_target() {
        // Все draw'ы = 0 → angle 0, magnitude 0 → точка = target
        let mut rng = StepRng::new(0, 0);
        let target = Vec3::new(1.0, 2.0, 3.0);
        let (decision, dest) = policy(1.0, 10.0).decide(&mut rng, target, Vec3::ZERO);
        assert_eq!(decision, BehaviorDecision::Chase);
        assert_eq!(dest, target);
    }
}
