//! Фазовая машина босса
//!
//! Явный стек tagged-вариантов вместо рантайм-полиморфизма по фазовым
//! объектам: push на вход, revert (pop) при нарушенном precondition.
//! Верхнеуровневый циклер атак здесь представлен фазой `Holding` — core
//! детализирует только laser attack.

pub mod energy;
pub mod laser;

use bevy::prelude::*;

pub use energy::{EnergyCellController, LaserChargeStarted};
pub use laser::{LaserAttackState, LaserTick, RAISE_SETTLE_TIME};

use crate::components::{BossActor, EncounterConfig};
use crate::logger;
use crate::platform::{PlatformController, PlatformMotion};
use crate::turret::{TurretAimed, TurretState};
use crate::DeterministicRng;

/// Запрос на вход в laser attack (апстрим-циклер или headless-сценарий)
#[derive(Event, Debug, Clone, Copy)]
pub struct LaserAttackRequested;

/// Фаза откатилась из-за нарушенного precondition (босс не на платформе)
#[derive(Event, Debug, Clone, Copy)]
pub struct PhaseReverted {
    pub boss: Entity,
}

/// Босс доехал до платформы — laser attack завершён
#[derive(Event, Debug, Clone, Copy)]
pub struct BossReachedPlatform {
    pub boss: Entity,
}

/// Одна фаза машины
#[derive(Debug, Clone, PartialEq)]
pub enum BossPhase {
    /// Машина ждёт следующий запрос атаки
    Holding,
    LaserAttack(LaserAttackState),
}

/// Стек фаз босса. Дно стека — всегда `Holding`, revert с него no-op.
#[derive(Component, Debug)]
pub struct BossPhaseMachine {
    stack: Vec<BossPhase>,
}

impl Default for BossPhaseMachine {
    fn default() -> Self {
        Self {
            stack: vec![BossPhase::Holding],
        }
    }
}

impl BossPhaseMachine {
    pub fn current(&self) -> &BossPhase {
        // Инвариант конструкции: стек непуст
        self.stack.last().unwrap_or(&BossPhase::Holding)
    }

    fn current_mut(&mut self) -> Option<&mut BossPhase> {
        self.stack.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, phase: BossPhase) {
        self.stack.push(phase);
    }

    /// Откат к предыдущей фазе. `false` если мы уже на дне стека.
    pub fn revert(&mut self) -> bool {
        if self.stack.len() <= 1 {
            return false;
        }
        self.stack.pop();
        true
    }
}

/// Система: входы в laser attack по запросу
///
/// Precondition "босс пристыкован" проверяется на входе; нарушение — не
/// ошибка, а локальный откат с единственным `PhaseReverted` наружу.
pub fn handle_laser_requests(
    mut requests: EventReader<LaserAttackRequested>,
    mut boss_q: Query<(Entity, &mut BossPhaseMachine), With<BossActor>>,
    mut platforms: ResMut<PlatformController>,
    mut cells: ResMut<EnergyCellController>,
    mut turrets: Query<(&Transform, &mut TurretState)>,
    config: Res<EncounterConfig>,
    mut motions: EventWriter<PlatformMotion>,
    mut charges: EventWriter<LaserChargeStarted>,
    mut reverted: EventWriter<PhaseReverted>,
    mut aims: EventWriter<TurretAimed>,
) {
    for _ in requests.read() {
        for (boss, mut machine) in &mut boss_q {
            if !matches!(machine.current(), BossPhase::Holding) {
                continue;
            }

            let mut motions_out = Vec::new();
            let mut charges_out = Vec::new();
            match LaserAttackState::enter(
                boss,
                &mut platforms,
                &mut cells,
                &mut motions_out,
                &mut charges_out,
            ) {
                Some(state) => {
                    if config.debug {
                        logger::log(&format!(
                            "laser attack: wait for {:.2}s",
                            state.idle_time - state.timer
                        ));
                    }
                    machine.push(BossPhase::LaserAttack(state));
                    // Пока босс внизу — турель не стреляет
                    for (transform, mut turret) in &mut turrets {
                        aims.write(turret.set_can_shoot(false, transform.translation.x));
                    }
                }
                None => {
                    if config.debug {
                        logger::log_warning("laser attack: not on platform, reverting");
                    }
                    reverted.write(PhaseReverted { boss });
                }
            }
            for motion in motions_out {
                motions.write(motion);
            }
            for charge in charges_out {
                charges.write(charge);
            }
        }
    }
}

/// Система: per-tick текущей фазы каждого босса
pub fn boss_phase_tick(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<DeterministicRng>,
    mut boss_q: Query<(Entity, &mut BossPhaseMachine), With<BossActor>>,
    mut platforms: ResMut<PlatformController>,
    mut cells: ResMut<EnergyCellController>,
    mut turrets: Query<(&Transform, &mut TurretState)>,
    config: Res<EncounterConfig>,
    mut motions: EventWriter<PlatformMotion>,
    mut reached: EventWriter<BossReachedPlatform>,
    mut aims: EventWriter<TurretAimed>,
) {
    let dt = time.delta_secs();
    for (boss, mut machine) in &mut boss_q {
        let mut motions_out = Vec::new();
        let result = match machine.current_mut() {
            Some(BossPhase::LaserAttack(state)) => Some(state.tick(
                dt,
                boss,
                &mut platforms,
                &mut rng.rng,
                &mut motions_out,
            )),
            _ => None,
        };
        for motion in motions_out {
            motions.write(motion);
        }

        if result == Some(LaserTick::ReachedPlatform) {
            machine.revert();
            cells.finish_laser_attack();
            reached.write(BossReachedPlatform { boss });
            if config.debug {
                logger::log("laser attack: boss reached platform");
            }
            for (transform, mut turret) in &mut turrets {
                aims.write(turret.set_can_shoot(true, transform.translation.x));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_machine_starts_holding() {
        let machine = BossPhaseMachine::default();
        assert_eq!(machine.current(), &BossPhase::Holding);
        assert_eq!(machine.depth(), 1);
    }

    #[test]
    fn test_revert_pops_back_to_holding() {
        let mut machine = BossPhaseMachine::default();
        machine.push(BossPhase::LaserAttack(LaserAttackState {
            timer: 0.0,
            idle_time: 1.0,
            finished_idle: false,
        }));
        assert_eq!(machine.depth(), 2);

        assert!(machine.revert());
        assert_eq!(machine.current(), &BossPhase::Holding);
    }

    #[test]
    fn test_revert_at_bottom_is_noop() {
        let mut machine = BossPhaseMachine::default();
        assert!(!machine.revert());
        assert_eq!(machine.current(), &BossPhase::Holding);
        assert_eq!(machine.depth(), 1);
    }
}
