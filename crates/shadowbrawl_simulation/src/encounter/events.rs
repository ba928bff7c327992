//! Сигналы для звука/презентации (fire-and-forget)
//!
//! Encounter ничего не ждёт от получателя: `CueSink` внедряется снаружи,
//! глобальных менеджеров нет. Bevy-хост сливает `CueQueue` в `Events<CombatCue>`.

use std::sync::{Arc, Mutex, PoisonError};

use bevy::prelude::*;
use serde::Serialize;

use crate::combat::AttackKind;
use crate::components::{ActorId, OpponentId};

/// Событие боя
#[derive(Event, Debug, Clone, PartialEq, Serialize)]
pub enum CombatCue {
    /// Старт атаки (игрок или противник)
    AttackIssued { actor: ActorId, kind: AttackKind },
    ProjectileThrown { owner: ActorId },
    /// Попадание по противнику (удар или снаряд игрока)
    HitLanded {
        attacker: ActorId,
        target: ActorId,
        damage: u32,
        blocked: bool,
    },
    /// Игрок получил урон
    PlayerDamaged { amount: u32, remaining: u32 },
    ActorDied { actor: ActorId },
    PlayerRespawned { lives_left: u32 },
    /// Игрок подошёл к боссу
    BossEngaged { boss: OpponentId },
    PhaseEscalated { opponent: OpponentId, phase: u32 },
    PickupCollected { healed: u32 },
    StageCleared { stage: usize },
}

/// Получатель сигналов
pub trait CueSink: Send + Sync {
    fn notify(&mut self, cue: CombatCue);
}

/// Сигналы никому не нужны (бенчмарки, прогоны без звука)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl CueSink for NullSink {
    fn notify(&mut self, _cue: CombatCue) {}
}

impl CueSink for Vec<CombatCue> {
    fn notify(&mut self, cue: CombatCue) {
        self.push(cue);
    }
}

/// Разделяемая очередь: одна копия у Encounter, другая у хоста
#[derive(Debug, Clone, Default)]
pub struct CueQueue {
    inner: Arc<Mutex<Vec<CombatCue>>>,
}

impl CueQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Забрать все накопленные сигналы (в порядке поступления)
    pub fn drain(&self) -> Vec<CombatCue> {
        let mut cues = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *cues)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CueSink for CueQueue {
    fn notify(&mut self, cue: CombatCue) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(cue);
    }
}
