//! Stalker integration test
//!
//! Headless App (без Rapier, FlatGround) + SimulationPlugin:
//! - teleport'ы происходят, Transform синхронизирован с agent state
//! - events (sound, static) доходят до слушателей
//! - без Player — никакой активности

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use nightwoods_simulation::*;

/// Собранные events за весь прогон
#[derive(Resource, Default)]
struct Collected {
    sounds: Vec<TeleportSoundRequested>,
    toggles: Vec<StaticEffectToggled>,
}

fn collect_events(
    mut sounds: EventReader<TeleportSoundRequested>,
    mut toggles: EventReader<StaticEffectToggled>,
    mut collected: ResMut<Collected>,
) {
    collected.sounds.extend(sounds.read().cloned());
    collected.toggles.extend(toggles.read().copied());
}

/// Helper: App с 10Hz fixed tick и ручным временем
fn create_stalker_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(Time::<Fixed>::from_hz(10.0))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)))
        .insert_resource(FlatGround {
            height: 2.0,
            ..Default::default()
        })
        .init_resource::<Collected>()
        .add_systems(FixedPostUpdate, collect_events);
    app
}

fn spawn(app: &mut App, config: StalkerConfig, position: Vec3) -> Entity {
    let entity = {
        let mut commands = app.world_mut().commands();
        spawn_stalker(
            &mut commands,
            config,
            position,
            Locomotion::RigidBodyControlled(RigidBodyState::new(1.0)),
            7,
        )
        .expect("valid config")
    };
    app.world_mut().flush();
    entity
}

#[test]
fn test_stalker_teleports_and_syncs_transform() {
    let mut app = create_stalker_app(42);
    app.world_mut()
        .spawn((Player, Transform::from_translation(Vec3::new(0.0, 2.0, 0.0))));

    let config = StalkerConfig {
        chase_cooldown: 1.0,
        return_cooldown: 1.0,
        teleport_sound: Some("sfx/teleport.ogg".to_string()),
        ..Default::default()
    };
    let stalker = spawn(&mut app, config, Vec3::new(40.0, 2.0, 0.0));

    // 20 секунд симуляции
    for _ in 0..200 {
        app.update();
    }

    let stalker_ref = app.world().get::<Stalker>(stalker).expect("stalker alive");
    let stats = stalker_ref.brain().stats();
    assert!(stats.firings >= 5, "firings = {}", stats.firings);
    assert_eq!(stats.firings, stats.chases + stats.returns);

    // Transform = agent position
    let agent_position = stalker_ref.agent().position();
    let transform = app.world().get::<Transform>(stalker).expect("transform");
    assert_eq!(transform.translation, agent_position);

    // Всегда на земле: 2.0 (plane) + 1.0 (half extent) + 0.12 (clearance)
    assert!((agent_position.y - 3.12).abs() < 1e-4, "y = {}", agent_position.y);

    let collected = app.world().resource::<Collected>();
    assert_eq!(collected.sounds.len() as u64, stats.firings);
    assert!(collected.sounds.iter().all(|e| e.stalker == stalker && e.clip == "sfx/teleport.ogg"));
}

#[test]
fn test_static_effect_events_alternate() {
    let mut app = create_stalker_app(3);
    app.world_mut()
        .spawn((Player, Transform::from_translation(Vec3::new(0.0, 2.0, 0.0))));

    let config = StalkerConfig {
        chase_probability: 0.5,
        chase_radius: 3.0,
        chase_cooldown: 0.5,
        return_cooldown: 0.5,
        proximity_radius: 6.0,
        ..Default::default()
    };
    spawn(&mut app, config, Vec3::new(60.0, 2.0, 0.0));

    for _ in 0..300 {
        app.update();
    }

    let collected = app.world().resource::<Collected>();
    assert!(!collected.toggles.is_empty());
    // Первый toggle — включение, дальше строго чередуются
    for (i, event) in collected.toggles.iter().enumerate() {
        assert_eq!(event.active, i % 2 == 0, "toggle {} out of order", i);
    }
}

#[test]
fn test_no_player_no_activity() {
    let mut app = create_stalker_app(42);

    let config = StalkerConfig {
        chase_cooldown: 0.2,
        ..Default::default()
    };
    let start = Vec3::new(5.0, 0.0, 5.0);
    let stalker = spawn(&mut app, config, start);

    for _ in 0..100 {
        app.update();
    }

    let stalker_ref = app.world().get::<Stalker>(stalker).expect("stalker alive");
    assert_eq!(stalker_ref.brain().stats().firings, 0);
    assert_eq!(stalker_ref.agent().position(), start);
    assert!(app.world().resource::<Collected>().sounds.is_empty());
}
