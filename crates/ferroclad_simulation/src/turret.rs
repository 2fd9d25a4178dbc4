//! Турель босса: таймер стрельбы и прицеливание
//!
//! Рандомизированные интервалы огня + разброс прицела вокруг игрока.
//! Эскалация перманентно половинит множитель — интервал короче, разброс
//! уже, до конца энкаунтера.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::components::PlayerActor;
use crate::DeterministicRng;

/// Y прицела "вниз" — безопасная поза вне боя
const DOWNWARD_AIM_Y: f32 = -10.0;

/// Команда внешнему слою: навести ствол на точку арены (x/z)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct TurretAimed(pub Vec2);

/// Команда внешнему слою: выстрел (снаряд спавнит engine bridge)
#[derive(Event, Debug, Clone, Copy)]
pub struct TurretFired;

/// Эскалация турели (рассылается фазовой логикой на миддпоинтах боя)
#[derive(Event, Debug, Clone, Copy)]
pub struct BossEscalated;

/// Настройки турели; `player` — DI-ссылка на цель, без scene-lookup
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct TurretConfig {
    /// Радиус разброса прицела (метры), масштабируется множителем
    pub accuracy: f32,
    /// Интервал огня [min, max], секунды; требуется min < max
    pub fire_time: Vec2,
    pub player: Entity,
}

impl TurretConfig {
    pub fn new(player: Entity) -> Self {
        Self {
            accuracy: 3.0,
            fire_time: Vec2::new(4.0, 6.0),
            player,
        }
    }
}

/// Рантайм-состояние турели
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct TurretState {
    pub fire_timer: f32,
    pub locked: bool,
    pub can_shoot: bool,
    /// Монотонно половинится эскалацией, в пределах энкаунтера не
    /// сбрасывается
    pub fire_time_multiplier: f32,
}

impl Default for TurretState {
    fn default() -> Self {
        Self {
            fire_timer: 0.0,
            locked: true,
            can_shoot: false,
            fire_time_multiplier: 1.0,
        }
    }
}

impl TurretState {
    /// Пока locked — прицел не обновляется (катсцена/сетап)
    pub fn set_lock_turret(&mut self, locked: bool) {
        self.locked = locked;
    }

    pub fn escalate(&mut self) {
        self.fire_time_multiplier /= 2.0;
    }

    /// Включает/выключает огонь; в любом случае немедленно перенаводит
    /// ствол вниз (нейтральная поза).
    pub fn set_can_shoot(&mut self, active: bool, turret_x: f32) -> TurretAimed {
        self.can_shoot = active;
        TurretAimed(aim_downwards(turret_x))
    }

    /// Тик таймера огня. `true` — интервал истёк и перезапущен
    /// (новый roll в [min, max], умноженный на текущий множитель).
    pub fn tick(&mut self, dt: f32, fire_time: Vec2, rng: &mut ChaCha8Rng) -> bool {
        if self.locked {
            return false;
        }
        self.fire_timer -= dt;
        if self.fire_timer > 0.0 {
            return false;
        }
        self.fire_timer = rng.gen_range(fire_time.x..fire_time.y) * self.fire_time_multiplier;
        true
    }
}

pub fn aim_downwards(turret_x: f32) -> Vec2 {
    Vec2::new(turret_x, DOWNWARD_AIM_Y)
}

/// Точка прицела: позиция игрока (x/z) + случайный сдвиг в диске радиуса
/// `accuracy * multiplier`
pub fn aim_at_player(
    player_pos: Vec3,
    accuracy: f32,
    multiplier: f32,
    rng: &mut ChaCha8Rng,
) -> Vec2 {
    let accurate = Vec2::new(player_pos.x, player_pos.z);
    accurate + inside_unit_circle(rng) * accuracy * multiplier
}

fn inside_unit_circle(rng: &mut ChaCha8Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let radius = rng.gen_range(0.0f32..=1.0).sqrt();
    Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Система: свежезаспавненная турель — стартовый roll таймера и прицел
/// вниз (ещё до разблокировки).
pub fn turret_initial_aim(
    mut rng: ResMut<DeterministicRng>,
    mut turrets: Query<(&Transform, &TurretConfig, &mut TurretState), Added<TurretState>>,
    mut aims: EventWriter<TurretAimed>,
) {
    for (transform, config, mut state) in &mut turrets {
        state.fire_timer = rng.rng.gen_range(config.fire_time.x..config.fire_time.y);
        aims.write(TurretAimed(aim_downwards(transform.translation.x)));
    }
}

/// Система: per-tick таймер огня (только пока турель разблокирована)
pub fn turret_fire_tick(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut turrets: Query<(&TurretConfig, &mut TurretState)>,
    players: Query<&Transform, With<PlayerActor>>,
    mut aims: EventWriter<TurretAimed>,
    mut shots: EventWriter<TurretFired>,
) {
    let dt = time.delta_secs();
    for (config, mut state) in &mut turrets {
        if !state.tick(dt, config.fire_time, &mut rng.rng) {
            continue;
        }
        if !state.can_shoot {
            continue;
        }
        let Ok(player_tf) = players.get(config.player) else {
            continue;
        };
        aims.write(TurretAimed(aim_at_player(
            player_tf.translation,
            config.accuracy,
            state.fire_time_multiplier,
            &mut rng.rng,
        )));
        shots.write(TurretFired);
    }
}

/// Система: эскалация по событию от фазовой логики
pub fn apply_escalation(
    mut events: EventReader<BossEscalated>,
    mut turrets: Query<&mut TurretState>,
) {
    for _ in events.read() {
        for mut state in &mut turrets {
            state.escalate();
        }
    }
}
