//! Энергоячейка — коллаборатор laser attack по таймингу зарядки

use bevy::prelude::*;

/// Команда внешнему слою: ячейка начала зарядку (VFX/прогресс-бар)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LaserChargeStarted {
    /// Задержка до старта луча (половина спуска платформы)
    pub delay: f32,
    /// Конфигурная длительность зарядки
    pub duration: f32,
}

/// Контроллер энергоячейки: знает только тайминг зарядки, сам луч и его
/// VFX — забота внешнего слоя.
#[derive(Resource, Debug, Clone)]
pub struct EnergyCellController {
    charge_time: f32,
    charging: bool,
}

impl EnergyCellController {
    pub fn new(charge_time: f32) -> Self {
        Self {
            charge_time,
            charging: false,
        }
    }

    pub fn is_charging(&self) -> bool {
        self.charging
    }

    /// Стартует ритуал зарядки с задержкой `delay`; возвращает полную
    /// длительность ожидания для фазы.
    pub fn begin_laser_attack(&mut self, delay: f32, out: &mut Vec<LaserChargeStarted>) -> f32 {
        self.charging = true;
        out.push(LaserChargeStarted {
            delay,
            duration: self.charge_time,
        });
        delay + self.charge_time
    }

    pub fn finish_laser_attack(&mut self) {
        self.charging = false;
    }
}

impl Default for EnergyCellController {
    fn default() -> Self {
        Self::new(1.5)
    }
}
