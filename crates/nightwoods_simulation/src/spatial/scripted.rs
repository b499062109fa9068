//! Scripted ground — детерминированный fake `SpatialQuery` для тестов
//!
//! Очередь заранее заданных результатов (hit height / miss) + журнал probe origin'ов.
//! Когда очередь пуста — используется `fallback`.

use std::cell::RefCell;
use std::collections::VecDeque;

use bevy::prelude::*;

use super::{ProbeHit, SpatialQuery};

#[derive(Debug, Default)]
pub struct ScriptedGround {
    results: RefCell<VecDeque<Option<f32>>>,
    fallback: Option<f32>,
    probes: RefCell<Vec<Vec3>>,
}

impl ScriptedGround {
    /// Каждый probe попадает в поверхность на высоте `height`
    pub fn always_hit(height: f32) -> Self {
        Self {
            fallback: Some(height),
            ..Default::default()
        }
    }

    /// Каждый probe — miss
    pub fn always_miss() -> Self {
        Self::default()
    }

    /// Очередь результатов: `Some(h)` = hit на высоте h, `None` = miss
    pub fn with_script(results: impl IntoIterator<Item = Option<f32>>, fallback: Option<f32>) -> Self {
        Self {
            results: RefCell::new(results.into_iter().collect()),
            fallback,
            probes: RefCell::new(Vec::new()),
        }
    }

    /// Origin'ы всех выполненных probe (в порядке вызова)
    pub fn probes(&self) -> Vec<Vec3> {
        self.probes.borrow().clone()
    }

    pub fn probe_count(&self) -> usize {
        self.probes.borrow().len()
    }
}

impl SpatialQuery for ScriptedGround {
    fn sphere_cast_down(
        &self,
        origin: Vec3,
        _radius: f32,
        _max_distance: f32,
        _layer_mask: u32,
    ) -> Option<ProbeHit> {
        self.probes.borrow_mut().push(origin);

        let next = self.results.borrow_mut().pop_front().unwrap_or(self.fallback);
        next.map(|height| ProbeHit {
            point: Vec3::new(origin.x, height, origin.z),
            distance: origin.y - height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_then_fallback() {
        let ground = ScriptedGround::with_script([Some(1.0), None], Some(4.0));
        let origin = Vec3::new(0.0, 60.0, 0.0);

        assert_eq!(ground.sphere_cast_down(origin, 0.3, 100.0, !0).map(|h| h.point.y), Some(1.0));
        assert!(ground.sphere_cast_down(origin, 0.3, 100.0, !0).is_none());
        assert_eq!(ground.sphere_cast_down(origin, 0.3, 100.0, !0).map(|h| h.point.y), Some(4.0));
        assert_eq!(ground.probe_count(), 3);
    }
}
