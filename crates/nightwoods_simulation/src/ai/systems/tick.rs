//! Tick system: один `StalkerBrain::tick` на stalker за FixedUpdate
//!
//! Target = Transform единственного Player. Нет Player → tick no-op (report сброшен).
//! Ground probe: RapierContext если есть, иначе FlatGround resource, иначе always-miss.
//! Degraded пути логируются один раз на смену состояния, не каждый tick.

use bevy::prelude::*;
use bevy_rapier3d::prelude::ReadRapierContext;

use crate::ai::brain::StalkerIo;
use crate::ai::components::Stalker;
use crate::ai::events::{StaticEffectToggled, TeleportSoundRequested};
use crate::ai::sinks::{AudioSink, VisibilitySink};
use crate::components::Player;
use crate::spatial::{FlatGround, NoGround, RapierGround, SpatialQuery};

/// AudioSink → TeleportSoundRequested event
struct SoundEvents<'a, 'w> {
    stalker: Entity,
    writer: &'a mut EventWriter<'w, TeleportSoundRequested>,
}

impl AudioSink for SoundEvents<'_, '_> {
    fn play_once(&mut self, clip: &str) {
        self.writer.write(TeleportSoundRequested {
            stalker: self.stalker,
            clip: clip.to_string(),
        });
    }
}

/// VisibilitySink → StaticEffectToggled event
struct EffectEvents<'a, 'w> {
    stalker: Entity,
    writer: &'a mut EventWriter<'w, StaticEffectToggled>,
}

impl VisibilitySink for EffectEvents<'_, '_> {
    fn set_effect_active(&mut self, active: bool) {
        self.writer.write(StaticEffectToggled {
            stalker: self.stalker,
            active,
        });
    }
}

/// Какие degraded пути активны сейчас (для логов по переходам)
#[derive(Debug, Default)]
pub struct DegradedPaths {
    target_missing: bool,
    rapier_missing: bool,
}

impl DegradedPaths {
    /// Обновляет флаг; `Some(new_state)` только если состояние сменилось
    fn transition(flag: &mut bool, degraded: bool) -> Option<bool> {
        if *flag == degraded {
            return None;
        }
        *flag = degraded;
        Some(degraded)
    }

    pub fn note_target(&mut self, missing: bool) -> Option<bool> {
        Self::transition(&mut self.target_missing, missing)
    }

    pub fn note_rapier(&mut self, missing: bool) -> Option<bool> {
        Self::transition(&mut self.rapier_missing, missing)
    }
}

/// Система: stalker tick
///
/// Работает в FixedUpdate. Probe синхронный, всё завершается внутри вызова.
pub fn tick_stalkers(
    time: Res<Time<Fixed>>,
    players: Query<&Transform, (With<Player>, Without<Stalker>)>,
    mut stalkers: Query<(Entity, &mut Stalker)>,
    read_rapier_context: ReadRapierContext,
    flat_ground: Option<Res<FlatGround>>,
    mut sound_events: EventWriter<TeleportSoundRequested>,
    mut effect_events: EventWriter<StaticEffectToggled>,
    mut degraded: Local<DegradedPaths>,
) {
    let delta = time.delta_secs();

    // 0 или несколько Player → target нет, brain tick = no-op
    let target = players.single().ok().map(|transform| transform.translation);
    match degraded.note_target(target.is_none()) {
        Some(true) => crate::logger::log_warning("⚠️ no Player target: stalker ticks are no-ops"),
        Some(false) => crate::logger::log_info("🎯 Player target acquired"),
        None => {}
    }

    // Headless (без RapierPhysicsPlugin) → Err, падаем на FlatGround / NoGround
    let rapier_context = read_rapier_context.single().ok();
    if target.is_some() {
        match degraded.note_rapier(rapier_context.is_none()) {
            Some(true) => crate::logger::log_warning(if flat_ground.is_some() {
                "⚠️ no Rapier context: ground probe uses FlatGround"
            } else {
                "⚠️ no Rapier context and no FlatGround: ground probe always misses"
            }),
            Some(false) => crate::logger::log_info("🧱 Rapier context available: ground probe uses shape casts"),
            None => {}
        }
    }

    for (entity, mut stalker) in stalkers.iter_mut() {
        let rapier_ground = rapier_context
            .as_ref()
            .map(|context| RapierGround::new(context).excluding(entity));

        let spatial: &dyn SpatialQuery = match (&rapier_ground, flat_ground.as_deref()) {
            (Some(ground), _) => ground,
            (None, Some(flat)) => flat,
            (None, None) => &NoGround,
        };

        let mut audio = SoundEvents {
            stalker: entity,
            writer: &mut sound_events,
        };
        let mut visibility = EffectEvents {
            stalker: entity,
            writer: &mut effect_events,
        };
        let mut io = StalkerIo {
            spatial,
            audio: &mut audio,
            visibility: &mut visibility,
        };

        stalker.tick(delta, target, &mut io);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_paths_report_only_transitions() {
        let mut degraded = DegradedPaths::default();

        assert_eq!(degraded.note_target(false), None);
        assert_eq!(degraded.note_target(true), Some(true));
        assert_eq!(degraded.note_target(true), None);
        assert_eq!(degraded.note_target(true), None);
        assert_eq!(degraded.note_target(false), Some(false));

        // Флаги независимы
        assert_eq!(degraded.note_rapier(true), Some(true));
        assert_eq!(degraded.note_target(false), None);
        assert_eq!(degraded.note_rapier(true), None);
    }
}
