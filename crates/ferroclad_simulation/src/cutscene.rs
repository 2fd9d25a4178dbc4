//! Intro-катсцена: линейная forward-only машина из семи состояний
//!
//! Каждый тик копит таймер, сбрасываемый на переходах; "ожидание" — это
//! просто отсутствие перехода, пока таймер < порога. Все визуальные и
//! звуковые эффекты уходят наружу списком команд ([`CutsceneFx`]) — core
//! прогоняется без движка.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::audio::{AudioCommand, CueChannel, CueId};
use crate::logger;
use crate::platform::{PlatformController, PlatformMotion, PlatformSlot};
use crate::turret::TurretState;

/// Состояния катсцены, строго по порядку; revisit'ов нет
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum IntroState {
    FadeIn,
    PlayerMoveIn,
    EnableLights,
    BossEnter,
    Pause,
    DimLights,
    StartGame,
}

/// Длительности состояний (секунды)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CutsceneTimings {
    pub fade_in: f32,
    pub player_enter: f32,
    pub brighten_lights: f32,
    pub pause_time: f32,
    pub dim_lights: f32,
}

impl Default for CutsceneTimings {
    fn default() -> Self {
        Self {
            fade_in: 1.0,
            player_enter: 1.0,
            brighten_lights: 1.0,
            pause_time: 1.0,
            dim_lights: 1.0,
        }
    }
}

/// Сценография: точки въезда и диапазон ambient-света
#[derive(Debug, Clone, Copy)]
pub struct CutsceneStaging {
    pub art_start: Vec3,
    pub art_end: Vec3,
    pub directional_min: f32,
    pub directional_max: f32,
}

impl Default for CutsceneStaging {
    fn default() -> Self {
        Self {
            art_start: Vec3::ZERO,
            art_end: Vec3::ZERO,
            directional_min: 0.25,
            directional_max: 1.0,
        }
    }
}

/// DI-ссылки катсцены: резолвятся при конструировании, не scene-lookup'ом.
/// Отсутствующая ссылка — невосстановимая ошибка для этого энкаунтера.
#[derive(Debug, Clone, Copy)]
pub struct CutsceneRefs {
    pub player: Option<Entity>,
    pub boss: Option<Entity>,
    /// Временный арт танка, едущий в кадре вместо настоящего игрока
    pub placeholder: Option<Entity>,
    /// Слот, на котором босс впервые поднимется (`Null` = не назначен)
    pub spawn_slot: PlatformSlot,
}

/// Команда сценографии внешнему слою
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum StageCommand {
    SetOverlayAlpha(f32),
    SetOverlayVisible(bool),
    MovePlaceholder(Vec3),
    SetPlaceholderVisible(bool),
    MovePlayer(Vec3),
    SetPlayerVisible(bool),
    SetBossVisuals(bool),
    SetDirectionalIntensity(f32),
    SetRedLightsActive(bool),
    SetRedLightDelta(f32),
    SetBackingLightsActive(bool),
    SetBackingLightDelta(f32),
    HideSkipControl,
}

/// One-shot сигнал "игра началась"
#[derive(Event, Debug, Clone, Copy)]
pub struct GameStarted;

/// Внешний запрос пропуска катсцены (кнопка skip)
#[derive(Event, Debug, Clone, Copy)]
pub struct SkipCutsceneRequested;

/// Внешний запрос старта катсцены
#[derive(Event, Debug, Clone, Copy)]
pub struct CutsceneStartRequested;

/// Выходной список эффектов одного тика
#[derive(Debug, Default)]
pub struct CutsceneFx {
    pub stage: Vec<StageCommand>,
    pub audio: Vec<AudioCommand>,
    pub motions: Vec<PlatformMotion>,
    pub unlock_turret: bool,
    pub start_signal: bool,
}

/// Секвенсер intro-катсцены
#[derive(Resource, Debug)]
pub struct IntroCutscene {
    timings: CutsceneTimings,
    staging: CutsceneStaging,
    refs: CutsceneRefs,

    state: IntroState,
    timer: f32,
    boss_enter_time: f32,
    finished: bool,
    has_error: bool,
    boss_is_rising: bool,
    not_started: bool,

    tank_cue: CueChannel,
    siren_cue: CueChannel,
}

impl IntroCutscene {
    pub fn new(timings: CutsceneTimings, staging: CutsceneStaging, refs: CutsceneRefs) -> Self {
        Self {
            timings,
            staging,
            refs,
            state: IntroState::FadeIn,
            timer: 0.0,
            boss_enter_time: 0.0,
            finished: false,
            has_error: false,
            boss_is_rising: false,
            not_started: true,
            tank_cue: CueChannel::new(CueId::TankEngine, 1.0),
            siren_cue: CueChannel::new(CueId::Siren, 1.0),
        }
    }

    pub fn state(&self) -> IntroState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn has_error(&self) -> bool {
        self.has_error
    }

    /// Старт: проверка ссылок + начальная сценография.
    ///
    /// Любая нерезолвящаяся ссылка ставит `has_error` — секвенсер больше
    /// не тикает, но процесс не валим.
    pub fn start(&mut self, platforms: &PlatformController, fx: &mut CutsceneFx) {
        if self.refs.player.is_none() {
            self.has_error = true;
            logger::log_error("intro cutscene: no player reference assigned");
            return;
        }
        if self.refs.boss.is_none() {
            self.has_error = true;
            logger::log_error("intro cutscene: no boss reference assigned");
            return;
        }
        if self.refs.placeholder.is_none() {
            self.has_error = true;
            logger::log_error("intro cutscene: no placeholder art assigned");
            return;
        }
        if self.refs.spawn_slot == PlatformSlot::Null {
            self.has_error = true;
            logger::log_error("intro cutscene: no boss spawn platform assigned");
            return;
        }
        self.boss_enter_time = platforms.raise_time(self.refs.spawn_slot);

        fx.stage.push(StageCommand::SetBossVisuals(false));
        fx.stage.push(StageCommand::SetPlayerVisible(false));
        fx.stage.push(StageCommand::SetPlaceholderVisible(true));
        fx.stage.push(StageCommand::MovePlaceholder(self.staging.art_start));
        fx.stage.push(StageCommand::SetOverlayVisible(true));
        fx.stage.push(StageCommand::SetOverlayAlpha(0.5));
        fx.stage.push(StageCommand::SetDirectionalIntensity(
            self.staging.directional_min,
        ));
        fx.stage.push(StageCommand::SetRedLightsActive(true));
        fx.stage.push(StageCommand::SetRedLightDelta(0.0));
        fx.stage.push(StageCommand::SetBackingLightsActive(true));
        fx.stage.push(StageCommand::SetBackingLightDelta(0.0));

        self.timer = 0.0;
        self.not_started = false;
    }

    /// Per-tick: накопление таймера, затем оценка перехода — один тик
    /// может и закрыть ожидание, и отработать первый кадр следующего
    /// состояния (на следующем вызове).
    pub fn advance(&mut self, dt: f32, platforms: &mut PlatformController, fx: &mut CutsceneFx) {
        if self.not_started || self.has_error || self.finished {
            return;
        }

        self.timer += dt;

        match self.state {
            IntroState::FadeIn => {
                fx.stage.push(StageCommand::SetOverlayAlpha(
                    0.5 - 0.5 * self.timer / self.timings.fade_in,
                ));
                if self.timer > self.timings.fade_in {
                    fx.stage.push(StageCommand::SetOverlayVisible(false));
                    self.transition(IntroState::PlayerMoveIn);
                    self.tank_cue.play(&mut fx.audio);
                }
            }
            IntroState::PlayerMoveIn => {
                fx.stage.push(StageCommand::MovePlaceholder(slerp(
                    self.staging.art_start,
                    self.staging.art_end,
                    self.timer / self.timings.player_enter,
                )));
                if self.timer > self.timings.player_enter {
                    fx.stage
                        .push(StageCommand::MovePlaceholder(self.staging.art_end));
                    self.transition(IntroState::EnableLights);
                    self.siren_cue.play(&mut fx.audio);
                    self.siren_cue.set_custom_volume(0.0, &mut fx.audio);
                    self.tank_cue.set_custom_volume(0.0, &mut fx.audio);
                }
            }
            IntroState::EnableLights => {
                let ramp = self.timer / self.timings.brighten_lights;
                fx.stage.push(StageCommand::SetRedLightDelta(ramp));
                self.siren_cue.set_custom_volume(ramp, &mut fx.audio);
                if self.timer > self.timings.brighten_lights {
                    fx.stage.push(StageCommand::SetRedLightDelta(1.0));
                    if let Some(boss) = self.refs.boss {
                        if let Some(motion) = platforms.raise_to(boss, self.refs.spawn_slot) {
                            fx.motions.push(motion);
                            self.boss_is_rising = true;
                        }
                    }
                    self.transition(IntroState::BossEnter);
                    self.tank_cue.set_custom_volume(1.0, &mut fx.audio);
                }
            }
            IntroState::BossEnter => {
                if self.timer > self.boss_enter_time {
                    self.transition(IntroState::Pause);
                }
            }
            IntroState::Pause => {
                if self.timer > self.timings.pause_time {
                    self.transition(IntroState::DimLights);
                    self.tank_cue.stop(&mut fx.audio);
                }
            }
            IntroState::DimLights => {
                let delta = self.timer / self.timings.brighten_lights;
                fx.stage.push(StageCommand::SetRedLightDelta(1.0 - delta));
                fx.stage.push(StageCommand::SetBackingLightDelta(delta));
                // Ambient возвращается от min к max, пока красная
                // сигнализация гаснет
                fx.stage.push(StageCommand::SetDirectionalIntensity(
                    self.staging.directional_max
                        - (self.staging.directional_max - self.staging.directional_min)
                            * (1.0 - delta),
                ));
                self.siren_cue.set_custom_volume(1.0 - delta, &mut fx.audio);
                if self.timer > self.timings.dim_lights {
                    fx.stage.push(StageCommand::SetRedLightsActive(false));
                    fx.stage.push(StageCommand::SetBackingLightDelta(1.0));
                    self.transition(IntroState::StartGame);
                    self.siren_cue.stop(&mut fx.audio);
                }
            }
            IntroState::StartGame => {
                fx.stage.push(StageCommand::MovePlayer(self.staging.art_end));
                fx.stage.push(StageCommand::SetPlayerVisible(true));
                fx.stage.push(StageCommand::SetPlaceholderVisible(false));
                fx.unlock_turret = true;
                self.finished = true;
                fx.stage.push(StageCommand::HideSkipControl);
                fx.start_signal = true;
            }
        }
    }

    /// Альтернативный терминальный путь: мгновенно применяет конечные
    /// эффекты StartGame без интерполяций. Наблюдаемое состояние то же,
    /// что и у досмотренной катсцены.
    pub fn skip(&mut self, fx: &mut CutsceneFx) {
        if self.finished || self.has_error {
            return;
        }

        fx.stage.push(StageCommand::SetDirectionalIntensity(
            self.staging.directional_max,
        ));
        fx.stage.push(StageCommand::SetRedLightsActive(false));
        fx.stage.push(StageCommand::SetBackingLightsActive(true));
        fx.stage.push(StageCommand::SetBackingLightDelta(1.0));
        if !self.boss_is_rising {
            fx.stage.push(StageCommand::SetBossVisuals(true));
        }
        fx.stage.push(StageCommand::MovePlayer(self.staging.art_end));
        fx.stage.push(StageCommand::SetPlayerVisible(true));
        fx.stage.push(StageCommand::SetPlaceholderVisible(false));
        fx.unlock_turret = true;
        self.finished = true;
        fx.start_signal = true;
        self.tank_cue.set_custom_volume(0.0, &mut fx.audio);
        self.tank_cue.stop(&mut fx.audio);
        self.siren_cue.stop(&mut fx.audio);
    }

    fn transition(&mut self, next: IntroState) {
        self.state = next;
        self.timer = 0.0;
    }
}

/// Сферическая интерполяция: направление движется по дуге, длина
/// интерполируется линейно. На вырожденных/почти параллельных векторах
/// откатывается к lerp.
pub(crate) fn slerp(from: Vec3, to: Vec3, t: f32) -> Vec3 {
    let t = t.clamp(0.0, 1.0);
    let from_len = from.length();
    let to_len = to.length();
    if from_len < 1e-6 || to_len < 1e-6 {
        return from.lerp(to, t);
    }
    let from_dir = from / from_len;
    let to_dir = to / to_len;
    let dot = from_dir.dot(to_dir).clamp(-1.0, 1.0);
    if dot > 0.9995 {
        return from.lerp(to, t);
    }
    let theta = dot.acos();
    let sin_theta = theta.sin();
    let a = ((1.0 - t) * theta).sin() / sin_theta;
    let b = (t * theta).sin() / sin_theta;
    (from_dir * a + to_dir * b) * (from_len + (to_len - from_len) * t)
}

/// Система: внешний запрос старта катсцены
pub fn handle_cutscene_start(
    mut requests: EventReader<CutsceneStartRequested>,
    cutscene: Option<ResMut<IntroCutscene>>,
    platforms: Res<PlatformController>,
    mut stage: EventWriter<StageCommand>,
    mut audio: EventWriter<AudioCommand>,
) {
    let Some(mut cutscene) = cutscene else {
        return;
    };
    if requests.is_empty() {
        return;
    }
    requests.clear();

    let mut fx = CutsceneFx::default();
    cutscene.start(&platforms, &mut fx);
    for command in fx.stage {
        stage.write(command);
    }
    for command in fx.audio {
        audio.write(command);
    }
}

/// Система: per-tick катсцены (или синхронный skip по запросу)
pub fn cutscene_tick(
    time: Res<Time<Fixed>>,
    cutscene: Option<ResMut<IntroCutscene>>,
    mut platforms: ResMut<PlatformController>,
    mut skips: EventReader<SkipCutsceneRequested>,
    mut turrets: Query<&mut TurretState>,
    mut stage: EventWriter<StageCommand>,
    mut audio: EventWriter<AudioCommand>,
    mut motions: EventWriter<PlatformMotion>,
    mut started: EventWriter<GameStarted>,
) {
    let Some(mut cutscene) = cutscene else {
        return;
    };

    let mut fx = CutsceneFx::default();
    if !skips.is_empty() {
        skips.clear();
        cutscene.skip(&mut fx);
    } else {
        cutscene.advance(time.delta_secs(), &mut platforms, &mut fx);
    }

    for command in fx.stage {
        stage.write(command);
    }
    for command in fx.audio {
        audio.write(command);
    }
    for motion in fx.motions {
        motions.write(motion);
    }
    if fx.unlock_turret {
        for mut turret in &mut turrets {
            turret.set_lock_turret(false);
        }
    }
    if fx.start_signal {
        started.write(GameStarted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlatformSpec;

    fn refs() -> CutsceneRefs {
        CutsceneRefs {
            player: Some(Entity::PLACEHOLDER),
            boss: Some(Entity::from_raw(1)),
            placeholder: Some(Entity::from_raw(2)),
            spawn_slot: PlatformSlot::Center,
        }
    }

    fn platforms() -> PlatformController {
        let spec = PlatformSpec {
            raise_time: 2.0,
            lower_time: 2.0,
        };
        PlatformController::new(spec, spec, spec)
    }

    fn started_cutscene() -> (IntroCutscene, PlatformController) {
        let mut cutscene = IntroCutscene::new(
            CutsceneTimings::default(),
            CutsceneStaging {
                art_start: Vec3::new(-8.0, 0.0, 0.0),
                art_end: Vec3::new(-2.0, 0.0, 0.0),
                directional_min: 0.25,
                directional_max: 1.0,
            },
            refs(),
        );
        let platforms = platforms();
        let mut fx = CutsceneFx::default();
        cutscene.start(&platforms, &mut fx);
        assert!(!cutscene.has_error());
        (cutscene, platforms)
    }

    /// Финальное наблюдаемое состояние сцены: свёртка StageCommand
    #[derive(Debug, Default, Clone, PartialEq)]
    struct StageModel {
        overlay_visible: Option<bool>,
        directional: Option<f32>,
        red_active: Option<bool>,
        red_delta: Option<f32>,
        backing_active: Option<bool>,
        backing_delta: Option<f32>,
        player_visible: Option<bool>,
        player_pos: Option<Vec3>,
        placeholder_visible: Option<bool>,
        boss_visible: Option<bool>,
        unlock_turret: bool,
        start_signal: bool,
    }

    impl StageModel {
        fn fold(&mut self, fx: &CutsceneFx) {
            for command in &fx.stage {
                match *command {
                    StageCommand::SetOverlayVisible(v) => self.overlay_visible = Some(v),
                    StageCommand::SetDirectionalIntensity(v) => self.directional = Some(v),
                    StageCommand::SetRedLightsActive(v) => self.red_active = Some(v),
                    StageCommand::SetRedLightDelta(v) => self.red_delta = Some(v),
                    StageCommand::SetBackingLightsActive(v) => self.backing_active = Some(v),
                    StageCommand::SetBackingLightDelta(v) => self.backing_delta = Some(v),
                    StageCommand::SetPlayerVisible(v) => self.player_visible = Some(v),
                    StageCommand::MovePlayer(v) => self.player_pos = Some(v),
                    StageCommand::SetPlaceholderVisible(v) => self.placeholder_visible = Some(v),
                    StageCommand::SetBossVisuals(v) => self.boss_visible = Some(v),
                    _ => {}
                }
            }
            self.unlock_turret |= fx.unlock_turret;
            self.start_signal |= fx.start_signal;
        }
    }

    #[test]
    fn test_missing_reference_latches_error() {
        let mut broken = refs();
        broken.boss = None;
        let mut cutscene =
            IntroCutscene::new(CutsceneTimings::default(), CutsceneStaging::default(), broken);
        let mut platforms = platforms();
        let mut fx = CutsceneFx::default();

        cutscene.start(&platforms, &mut fx);
        assert!(cutscene.has_error());

        // Больше ни один тик не обрабатывается
        for _ in 0..50 {
            let mut fx = CutsceneFx::default();
            cutscene.advance(0.5, &mut platforms, &mut fx);
            assert!(fx.stage.is_empty());
            assert!(!fx.start_signal);
        }
        assert_eq!(cutscene.state(), IntroState::FadeIn);
    }

    #[test]
    fn test_unassigned_spawn_slot_latches_error() {
        let mut broken = refs();
        broken.spawn_slot = PlatformSlot::Null;
        let mut cutscene =
            IntroCutscene::new(CutsceneTimings::default(), CutsceneStaging::default(), broken);
        let mut fx = CutsceneFx::default();
        cutscene.start(&platforms(), &mut fx);
        assert!(cutscene.has_error());
    }

    #[test]
    fn test_sequence_reaches_start_game_and_signals_once() {
        let (mut cutscene, mut platforms) = started_cutscene();

        // Суммарная длительность: 5×1.0 состояний + 2.0 подъёма босса
        let dt = 0.1;
        let mut elapsed = 0.0;
        let mut signals = 0;
        let mut turret_unlocks = 0;

        for _ in 0..200 {
            let mut fx = CutsceneFx::default();
            cutscene.advance(dt, &mut platforms, &mut fx);
            elapsed += dt;
            if fx.start_signal {
                signals += 1;
                // Сигнал не раньше суммы длительностей
                assert!(elapsed >= 5.0 + 2.0, "signal at {:.1}s", elapsed);
            }
            if fx.unlock_turret {
                turret_unlocks += 1;
            }
        }

        assert!(cutscene.is_finished());
        assert_eq!(cutscene.state(), IntroState::StartGame);
        assert_eq!(signals, 1);
        assert_eq!(turret_unlocks, 1);
        // Босс остался пристыкован к spawn-слоту
        assert_eq!(platforms.current(), PlatformSlot::Center);
    }

    #[test]
    fn test_single_tick_closes_wait_and_transitions() {
        let (mut cutscene, mut platforms) = started_cutscene();

        // Один крупный тик закрывает FadeIn целиком
        let mut fx = CutsceneFx::default();
        cutscene.advance(1.5, &mut platforms, &mut fx);
        assert_eq!(cutscene.state(), IntroState::PlayerMoveIn);
        assert!(fx
            .audio
            .contains(&AudioCommand::Play { cue: CueId::TankEngine }));
    }

    #[test]
    fn test_zero_duration_state_transitions_next_tick() {
        let timings = CutsceneTimings {
            fade_in: 0.0,
            player_enter: 0.0,
            brighten_lights: 0.0,
            pause_time: 0.0,
            dim_lights: 0.0,
        };
        let mut cutscene = IntroCutscene::new(timings, CutsceneStaging::default(), refs());
        let mut platforms = platforms();
        let mut fx = CutsceneFx::default();
        cutscene.start(&platforms, &mut fx);

        // Каждый тик — ровно один переход; BossEnter ждёт подъём (2.0)
        let mut states = vec![cutscene.state()];
        for _ in 0..40 {
            let mut fx = CutsceneFx::default();
            cutscene.advance(0.5, &mut platforms, &mut fx);
            if states.last() != Some(&cutscene.state()) {
                states.push(cutscene.state());
            }
        }
        assert_eq!(
            states,
            vec![
                IntroState::FadeIn,
                IntroState::PlayerMoveIn,
                IntroState::EnableLights,
                IntroState::BossEnter,
                IntroState::Pause,
                IntroState::DimLights,
                IntroState::StartGame,
            ]
        );
        assert!(cutscene.is_finished());
    }

    #[test]
    fn test_skip_from_any_state_yields_identical_terminal_state() {
        // Skip из FadeIn, из EnableLights на середине рампы (0.3 из 1.0)
        // и из DimLights даёт одно и то же конечное состояние
        let mut models = Vec::new();

        for target_elapsed in [0.2f32, 2.3, 6.5] {
            let (mut cutscene, mut platforms) = started_cutscene();
            let mut model = StageModel::default();

            let mut elapsed = 0.0;
            while elapsed < target_elapsed {
                let mut fx = CutsceneFx::default();
                cutscene.advance(0.1, &mut platforms, &mut fx);
                model.fold(&fx);
                elapsed += 0.1;
            }

            let mut fx = CutsceneFx::default();
            cutscene.skip(&mut fx);
            model.fold(&fx);
            assert!(cutscene.is_finished());

            // Рампа не "застряла" на частичном значении
            assert_eq!(model.directional, Some(1.0));
            assert_eq!(model.red_active, Some(false));
            assert_eq!(model.backing_delta, Some(1.0));
            assert_eq!(model.player_visible, Some(true));
            assert!(model.unlock_turret);
            assert!(model.start_signal);

            // Для сравнения между сценариями выкидываем поля, значения
            // которых катсцена меняла по пути
            model.red_delta = None;
            model.overlay_visible = None;
            model.boss_visible = None;
            models.push(model);
        }

        assert_eq!(models[0], models[1]);
        assert_eq!(models[1], models[2]);
    }

    #[test]
    fn test_skip_after_finish_is_idempotent() {
        let (mut cutscene, mut platforms) = started_cutscene();
        for _ in 0..200 {
            let mut fx = CutsceneFx::default();
            cutscene.advance(0.1, &mut platforms, &mut fx);
        }
        assert!(cutscene.is_finished());

        let mut fx = CutsceneFx::default();
        cutscene.skip(&mut fx);
        assert!(fx.stage.is_empty());
        assert!(!fx.start_signal);
    }

    #[test]
    fn test_skip_hides_boss_visuals_only_before_rise() {
        // До EnableLights босс ещё не поднимается — skip показывает его
        let (mut cutscene, _) = started_cutscene();
        let mut fx = CutsceneFx::default();
        cutscene.skip(&mut fx);
        assert!(fx.stage.contains(&StageCommand::SetBossVisuals(true)));

        // После старта подъёма — визуалы уже у платформенной логики
        let (mut cutscene, mut platforms) = started_cutscene();
        let mut elapsed = 0.0;
        while elapsed < 3.5 {
            let mut fx = CutsceneFx::default();
            cutscene.advance(0.1, &mut platforms, &mut fx);
            elapsed += 0.1;
        }
        assert_eq!(cutscene.state(), IntroState::BossEnter);
        let mut fx = CutsceneFx::default();
        cutscene.skip(&mut fx);
        assert!(!fx.stage.contains(&StageCommand::SetBossVisuals(true)));
    }

    #[test]
    fn test_slerp_endpoints_and_midpoint() {
        let from = Vec3::new(2.0, 0.0, 0.0);
        let to = Vec3::new(0.0, 0.0, 4.0);

        assert!((slerp(from, to, 0.0) - from).length() < 1e-5);
        assert!((slerp(from, to, 1.0) - to).length() < 1e-5);

        // Середина дуги: длина между 2 и 4, направление под 45°
        let mid = slerp(from, to, 0.5);
        assert!((mid.length() - 3.0).abs() < 1e-4);
        assert!((mid.x - mid.z).abs() < 1e-4);

        // Вырожденный ноль — линейный fallback
        let mid = slerp(Vec3::ZERO, to, 0.5);
        assert!((mid - to * 0.5).length() < 1e-5);
    }
}
