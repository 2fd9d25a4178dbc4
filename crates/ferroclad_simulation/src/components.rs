//! Базовые ECS компоненты энкаунтера
//!
//! Core — strategic layer: здесь только маркеры и immutable конфиг,
//! рендер/физика актёров живут во внешнем слое.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Маркер босса (носитель [`crate::phase::BossPhaseMachine`])
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct BossActor;

/// Маркер танка игрока — цель турели
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct PlayerActor;

/// Immutable настройки boss AI, read-only после создания
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct EncounterConfig {
    /// Трассировка переходов фаз в logger
    pub debug: bool,
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self { debug: false }
    }
}
