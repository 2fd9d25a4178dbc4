//! FERROCLAD Encounter Core
//!
//! ECS-оркестрация босс-энкаунтера на Bevy 0.16 (strategic layer):
//! платформенные циклы, фаза laser attack, таймер турели, intro-катсцена
//! и screen shake. Рендер, физика столкновений и аудио-устройства живут
//! во внешнем слое и получают от core только типизированные command-события
//! ([`platform::PlatformMotion`], [`cutscene::StageCommand`],
//! [`audio::AudioCommand`], [`turret::TurretAimed`], ...).

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub mod audio;
pub mod components;
pub mod cutscene;
pub mod feedback;
pub mod logger;
pub mod phase;
pub mod platform;
pub mod turret;

pub use audio::{AudioCommand, CueChannel, CueId};
pub use components::{BossActor, EncounterConfig, PlayerActor};
pub use cutscene::{
    CutsceneRefs, CutsceneStaging, CutsceneStartRequested, CutsceneTimings, GameStarted,
    IntroCutscene, IntroState, SkipCutsceneRequested, StageCommand,
};
pub use feedback::{CameraShakeOffset, ScreenShake};
pub use phase::{
    BossPhase, BossPhaseMachine, BossReachedPlatform, EnergyCellController, LaserAttackRequested,
    LaserAttackState, LaserChargeStarted, PhaseReverted,
};
pub use platform::{
    MotionDirection, PlatformController, PlatformMotion, PlatformSlot, PlatformSpec,
};
pub use turret::{BossEscalated, TurretAimed, TurretConfig, TurretFired, TurretState};

pub use logger::{init_logger, log, log_error, log_info, log_warning, set_logger, LogPrinter};

/// Главный plugin энкаунтера
///
/// Все системы сидят в `FixedUpdate` одной цепочкой: внутри кадра
/// накопление таймеров строго предшествует оценке переходов, так что один
/// кадр может и закрыть ожидание, и начать следующее состояние.
pub struct EncounterPlugin;

impl Plugin for EncounterPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .init_resource::<EncounterConfig>()
            .init_resource::<PlatformController>()
            .init_resource::<EnergyCellController>()
            .init_resource::<ScreenShake>()
            // Command-события наружу
            .add_event::<PlatformMotion>()
            .add_event::<StageCommand>()
            .add_event::<AudioCommand>()
            .add_event::<TurretAimed>()
            .add_event::<TurretFired>()
            .add_event::<LaserChargeStarted>()
            .add_event::<CameraShakeOffset>()
            // Сигналы/запросы
            .add_event::<GameStarted>()
            .add_event::<BossReachedPlatform>()
            .add_event::<PhaseReverted>()
            .add_event::<BossEscalated>()
            .add_event::<LaserAttackRequested>()
            .add_event::<CutsceneStartRequested>()
            .add_event::<SkipCutsceneRequested>()
            .add_systems(
                FixedUpdate,
                (
                    cutscene::handle_cutscene_start,
                    cutscene::cutscene_tick,
                    phase::handle_laser_requests,
                    phase::boss_phase_tick,
                    turret::turret_initial_aim,
                    turret::turret_fire_tick,
                    turret::apply_escalation,
                    feedback::shake_on_phase_transition,
                    feedback::screen_shake_tick,
                )
                    .chain(),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless прогона энкаунтера
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .add_plugins(EncounterPlugin)
        .insert_resource(DeterministicRng::new(seed));

    app
}
