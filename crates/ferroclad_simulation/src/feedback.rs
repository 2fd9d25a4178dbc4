//! Screen shake — fire-and-forget отдача на переходы фаз
//!
//! Треугольная огибающая: интенсивность растёт к середине окна и спадает
//! к нулю. Core отдаёт только оффсеты камеры, сам трансформ двигает
//! внешний слой.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::phase::BossReachedPlatform;
use crate::DeterministicRng;

/// Команда внешнему слою: сдвиг камеры относительно её базовой позиции
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct CameraShakeOffset(pub Vec3);

/// Окно тряски экрана
#[derive(Resource, Debug, Clone)]
pub struct ScreenShake {
    pub intensity: f32,
    pub duration: f32,
    timer: f32,
    active: bool,
}

impl Default for ScreenShake {
    fn default() -> Self {
        Self::new(0.5, 0.5)
    }
}

impl ScreenShake {
    pub fn new(intensity: f32, duration: f32) -> Self {
        Self {
            intensity,
            duration,
            timer: 0.0,
            active: false,
        }
    }

    /// (Пере)запуск окна тряски
    pub fn trigger(&mut self) {
        self.timer = 0.0;
        self.active = true;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Огибающая на текущий момент окна: 0 → 1 → 0
    pub fn envelope(&self) -> f32 {
        if !self.active || self.duration <= 0.0 {
            return 0.0;
        }
        1.0 - (1.0 - 2.0 * self.timer / self.duration).abs()
    }

    /// Тик окна; `Some(delta)` пока окно открыто, `None` когда закрылось
    pub fn tick(&mut self, dt: f32) -> Option<f32> {
        if !self.active {
            return None;
        }
        self.timer += dt;
        if self.timer >= self.duration {
            self.active = false;
            return None;
        }
        Some(self.envelope())
    }
}

/// Система: переход фазы завершён — трясём экран
pub fn shake_on_phase_transition(
    mut reached: EventReader<BossReachedPlatform>,
    mut shake: ResMut<ScreenShake>,
) {
    if !reached.is_empty() {
        reached.clear();
        shake.trigger();
    }
}

/// Система: per-tick оффсеты камеры, финальный нулевой оффсет при
/// закрытии окна (камера возвращается на место)
pub fn screen_shake_tick(
    time: Res<Time<Fixed>>,
    mut shake: ResMut<ScreenShake>,
    mut rng: ResMut<DeterministicRng>,
    mut offsets: EventWriter<CameraShakeOffset>,
) {
    if !shake.is_active() {
        return;
    }
    match shake.tick(time.delta_secs()) {
        Some(delta) => {
            let jitter = inside_unit_sphere(&mut rng.rng) * shake.intensity * delta;
            offsets.write(CameraShakeOffset(jitter));
        }
        None => {
            offsets.write(CameraShakeOffset(Vec3::ZERO));
        }
    }
}

fn inside_unit_sphere(rng: &mut ChaCha8Rng) -> Vec3 {
    // Rejection sampling; с seeded rng полностью детерминистично
    loop {
        let v = Vec3::new(
            rng.gen_range(-1.0f32..=1.0),
            rng.gen_range(-1.0f32..=1.0),
            rng.gen_range(-1.0f32..=1.0),
        );
        if v.length_squared() <= 1.0 {
            return v;
        }
    }
}
