//! Cue-каналы: абстрактные звуковые события энкаунтера
//!
//! Core не трогает аудио-устройство — канал держит логическое состояние
//! (играет/громкость) и складывает [`AudioCommand`] в выходной список,
//! который внешний слой исполняет.

use bevy::prelude::*;

/// Именованные cue энкаунтера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum CueId {
    /// Двигатель танка (въезд игрока)
    TankEngine,
    /// Сирена тревоги (подсветка арены)
    Siren,
}

/// Команда аудио-слою
#[derive(Event, Debug, Clone, PartialEq)]
pub enum AudioCommand {
    Play { cue: CueId },
    PlayAt { cue: CueId, position: Vec3 },
    SetVolume { cue: CueId, volume: f32 },
    Stop { cue: CueId },
}

/// Один логический cue-канал.
///
/// Громкость масштабируется относительно original_volume; отрицательный
/// скаляр отбрасывается молча (no-op).
#[derive(Debug, Clone)]
pub struct CueChannel {
    cue: CueId,
    original_volume: f32,
    volume: f32,
    playing: bool,
}

impl CueChannel {
    pub fn new(cue: CueId, original_volume: f32) -> Self {
        Self {
            cue,
            original_volume,
            volume: original_volume,
            playing: false,
        }
    }

    pub fn cue(&self) -> CueId {
        self.cue
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self, out: &mut Vec<AudioCommand>) {
        self.playing = true;
        out.push(AudioCommand::Play { cue: self.cue });
    }

    pub fn play_at(&mut self, position: Vec3, out: &mut Vec<AudioCommand>) {
        self.playing = true;
        out.push(AudioCommand::PlayAt {
            cue: self.cue,
            position,
        });
    }

    /// Относительная громкость: итог = original * scalar.
    /// scalar < 0 — no-op, команды не будет.
    pub fn set_custom_volume(&mut self, scalar: f32, out: &mut Vec<AudioCommand>) {
        if scalar < 0.0 {
            return;
        }
        self.volume = self.original_volume * scalar;
        out.push(AudioCommand::SetVolume {
            cue: self.cue,
            volume: self.volume,
        });
    }

    pub fn stop(&mut self, out: &mut Vec<AudioCommand>) {
        self.playing = false;
        self.volume = self.original_volume;
        out.push(AudioCommand::Stop { cue: self.cue });
    }
}
