//! Headless симуляция NIGHTWOODS
//!
//! Player ходит по кругу над FlatGround, stalker телепортируется вокруг него.
//! Время — ManualDuration, поэтому прогон воспроизводим по seed.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use nightwoods_simulation::spatial::collision::COLLISION_MASK_GROUND_PROBE;
use nightwoods_simulation::{
    create_headless_app, log_error, spawn_stalker, CapsuleController, DeterministicRng, FlatGround, Locomotion,
    Player, SimulationPlugin, Stalker, StalkerConfig,
};

/// Player бежит по кругу радиуса 15м
fn walk_player_in_circle(mut players: Query<&mut Transform, With<Player>>, time: Res<Time<Fixed>>) {
    let t = time.elapsed_secs() * 0.2;
    for mut transform in players.iter_mut() {
        transform.translation = Vec3::new(t.cos() * 15.0, 0.0, t.sin() * 15.0);
    }
}

fn spawn_world(mut commands: Commands, mut rng: ResMut<DeterministicRng>) {
    commands.spawn((Player, Transform::from_translation(Vec3::new(15.0, 0.0, 0.0))));

    let config = StalkerConfig {
        teleport_sound: Some("sfx/teleport.ogg".to_string()),
        // Только terrain + props: не приземляться на player
        collision_layer_mask: COLLISION_MASK_GROUND_PROBE,
        ..Default::default()
    };
    let locomotion = Locomotion::CapsuleControlled(CapsuleController::new(2.2, 0.0, 1.0));

    if let Err(err) = spawn_stalker(&mut commands, config, Vec3::new(-30.0, 0.0, -30.0), locomotion, rng.next_seed()) {
        log_error(&format!("stalker spawn failed: {}", err));
    }
}

fn main() {
    let seed = 42;
    println!("Starting NIGHTWOODS headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)))
        .insert_resource(FlatGround::default())
        .add_systems(Startup, spawn_world)
        .add_systems(FixedUpdate, walk_player_in_circle.before(nightwoods_simulation::ai::systems::tick_stalkers));

    // 60 секунд симуляции
    for tick in 0..3600 {
        app.update();

        if tick % 600 == 0 {
            let world = app.world_mut();
            let mut stalkers = world.query::<&Stalker>();
            for stalker in stalkers.iter(world) {
                let stats = stalker.brain().stats();
                println!(
                    "Tick {}: stalker at {:?}, firings {} (chase {}, return {}), static {}",
                    tick,
                    stalker.agent().position(),
                    stats.firings,
                    stats.chases,
                    stats.returns,
                    stalker.brain().is_effect_active()
                );
            }
        }
    }

    println!("Simulation complete!");
}
