//! Laser attack: спуск → зарядка → подъём → возврат управления
//!
//! Таймер стартует с отрицательного оффсета (-lower/2), чтобы "ноль"
//! совпал с полностью опущенной платформой — спуск и зарядка ячейки идут
//! параллельно.

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::phase::energy::{EnergyCellController, LaserChargeStarted};
use crate::platform::{PlatformController, PlatformMotion};

/// Буфер после подъёма, прежде чем фаза отчитается о прибытии
pub const RAISE_SETTLE_TIME: f32 = 0.2;

/// Транзиентное состояние laser attack: создаётся на входе в фазу,
/// умирает на выходе.
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct LaserAttackState {
    pub timer: f32,
    pub idle_time: f32,
    pub finished_idle: bool,
}

/// Результат одного тика фазы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaserTick {
    /// Countdown ещё бежит
    Waiting,
    /// Платформа пошла вверх, ждём подъём + settle
    Raised,
    /// Босс на платформе — фаза закончена
    ReachedPlatform,
}

impl LaserAttackState {
    /// Вход в фазу. `None` если босс не пристыкован — precondition
    /// нарушен, вызывающий обязан откатить фазу (контроллер платформ при
    /// этом не мутирован).
    pub fn enter(
        boss: Entity,
        platforms: &mut PlatformController,
        cells: &mut EnergyCellController,
        motions: &mut Vec<PlatformMotion>,
        charges: &mut Vec<LaserChargeStarted>,
    ) -> Option<Self> {
        let motion = platforms.lower(boss)?;
        let time_to_lower = motion.duration;
        motions.push(motion);

        let idle_time = cells.begin_laser_attack(time_to_lower / 2.0, charges);
        Some(Self {
            timer: -time_to_lower / 2.0,
            idle_time,
            finished_idle: false,
        })
    }

    pub fn tick(
        &mut self,
        dt: f32,
        boss: Entity,
        platforms: &mut PlatformController,
        rng: &mut ChaCha8Rng,
        motions: &mut Vec<PlatformMotion>,
    ) -> LaserTick {
        self.timer += dt;
        if self.timer < self.idle_time {
            return LaserTick::Waiting;
        }

        if !self.finished_idle {
            let time_to_raise = match platforms.raise(boss, rng) {
                Some(motion) => {
                    let duration = motion.duration;
                    motions.push(motion);
                    duration
                }
                None => 0.0,
            };
            self.timer = 0.0;
            self.idle_time = time_to_raise + RAISE_SETTLE_TIME;
            self.finished_idle = true;
            LaserTick::Raised
        } else {
            LaserTick::ReachedPlatform
        }
    }
}
