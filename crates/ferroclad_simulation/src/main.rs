//! Headless прогон энкаунтера FERROCLAD
//!
//! Катсцена + один laser-attack цикл без рендера: смоук-тест таймингов
//! и командного потока.

use bevy::prelude::*;
use ferroclad_simulation::*;

fn main() {
    let seed = 42;
    println!("Starting FERROCLAD headless encounter (seed: {})", seed);

    let mut app = create_headless_app(seed);

    let player = app
        .world_mut()
        .spawn((PlayerActor, Transform::from_xyz(-2.0, 0.0, 0.0)))
        .id();
    let boss = app
        .world_mut()
        .spawn((
            BossActor,
            BossPhaseMachine::default(),
            Transform::from_xyz(0.0, 0.0, 6.0),
        ))
        .id();
    app.world_mut().spawn((
        TurretConfig::new(player),
        TurretState::default(),
        Transform::from_xyz(0.0, 2.0, 6.0),
    ));
    let placeholder = app
        .world_mut()
        .spawn(Transform::from_xyz(-8.0, 0.0, 0.0))
        .id();

    app.insert_resource(IntroCutscene::new(
        CutsceneTimings::default(),
        CutsceneStaging {
            art_start: Vec3::new(-8.0, 0.0, 0.0),
            art_end: Vec3::new(-2.0, 0.0, 0.0),
            directional_min: 0.25,
            directional_max: 1.0,
        },
        CutsceneRefs {
            player: Some(player),
            boss: Some(boss),
            placeholder: Some(placeholder),
            spawn_slot: PlatformSlot::Center,
        },
    ));

    // Запросы двигаем через FixedUpdate сразу, иначе event истечёт до
    // первого fixed-тика на wall-clock
    app.world_mut().send_event(CutsceneStartRequested);
    app.world_mut().run_schedule(FixedUpdate);

    let mut laser_requested = false;
    for tick in 0..2000 {
        app.update();

        let finished = app
            .world()
            .resource::<IntroCutscene>()
            .is_finished();
        if tick == 600 && !finished {
            // Wall-clock мог не успеть — демонстрируем skip-путь
            app.world_mut().send_event(SkipCutsceneRequested);
            app.world_mut().run_schedule(FixedUpdate);
            println!("Tick {}: cutscene skip requested", tick);
        }
        if finished && !laser_requested {
            if !app.world().resource::<PlatformController>().is_docked() {
                app.world_mut()
                    .resource_mut::<PlatformController>()
                    .set_platform(PlatformSlot::Center);
            }
            app.world_mut().send_event(LaserAttackRequested);
            app.world_mut().run_schedule(FixedUpdate);
            laser_requested = true;
            println!("Tick {}: cutscene finished, laser attack requested", tick);
        }

        if tick % 200 == 0 {
            let platforms = app.world().resource::<PlatformController>();
            println!(
                "Tick {}: state={:?} slot={:?}",
                tick,
                app.world().resource::<IntroCutscene>().state(),
                platforms.current()
            );
        }
    }

    println!("Encounter run complete!");
}
