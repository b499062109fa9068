//! Proximity effect trigger (static noise рядом с stalker)
//!
//! Edge-triggered: toggle только при пересечении границы радиуса,
//! внутри/снаружи зоны повторных вызовов нет.
//! Дистанция — полная 3D (squared).

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct ProximityEffectTrigger {
    radius_squared: f32,
    active: bool,
}

impl ProximityEffectTrigger {
    /// Эффект изначально выключен
    pub fn new(radius: f32) -> Self {
        Self {
            radius_squared: radius * radius,
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// `Some(new_state)` только на переходе, иначе `None`
    pub fn update(&mut self, agent: Vec3, target: Vec3) -> Option<bool> {
        let within = agent.distance_squared(target) <= self.radius_squared;
        if within == self.active {
            return None;
        }

        self.active = within;
        Some(within)
    }
}
