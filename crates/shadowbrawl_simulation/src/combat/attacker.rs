//! Attack bookkeeping — активная атака, таймер анимации, cooldown'ы по видам.
//!
//! Таймеры в тиках, декремент с насыщением (никогда не уходят ниже 0).
//! Старт атаки: cooldown этого вида == 0 и нет другой активной атаки.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Вид атаки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Reflect)]
pub enum AttackKind {
    Punch,
    Kick,
    Ranged,
    /// Захват / контратака боссов
    Special,
}

impl AttackKind {
    pub const ALL: [AttackKind; 4] = [
        AttackKind::Punch,
        AttackKind::Kick,
        AttackKind::Ranged,
        AttackKind::Special,
    ];

    fn slot(self) -> usize {
        match self {
            AttackKind::Punch => 0,
            AttackKind::Kick => 1,
            AttackKind::Ranged => 2,
            AttackKind::Special => 3,
        }
    }

    /// Есть ли у атаки прямоугольник ближнего боя
    pub fn is_melee(self) -> bool {
        self != AttackKind::Ranged
    }
}

/// Активная часть анимации: первые `lead` тиков и последние `tail - 1`
/// тиков хитбокс выключен.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveWindow {
    /// Сколько тиков должно пройти от старта
    pub lead: u32,
    /// Минимальный остаток таймера
    pub tail: u32,
}

impl Default for ActiveWindow {
    fn default() -> Self {
        Self { lead: 0, tail: 1 }
    }
}

impl ActiveWindow {
    pub fn contains(&self, duration: u32, remaining: u32) -> bool {
        remaining > 0 && remaining >= self.tail && duration.saturating_sub(remaining) >= self.lead
    }
}

/// Состояние атак одного бойца
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttackSlots {
    active: Option<AttackKind>,
    timer: u32,
    duration: u32,
    cooldowns: [u32; 4],
}

impl AttackSlots {
    pub fn active(&self) -> Option<AttackKind> {
        self.active
    }

    pub fn is_attacking(&self) -> bool {
        self.active.is_some()
    }

    /// Оставшиеся тики анимации (0 если атаки нет)
    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn cooldown(&self, kind: AttackKind) -> u32 {
        self.cooldowns[kind.slot()]
    }

    pub fn set_cooldown(&mut self, kind: AttackKind, ticks: u32) {
        self.cooldowns[kind.slot()] = ticks;
    }

    pub fn can_start(&self, kind: AttackKind) -> bool {
        self.active.is_none() && self.cooldown(kind) == 0
    }

    /// Старт атаки с проверкой cooldown'а; выставляет cooldown вида
    pub fn try_start(&mut self, kind: AttackKind, duration: u32, cooldown: u32) -> bool {
        if !self.can_start(kind) {
            return false;
        }
        self.force_start(kind, duration);
        self.set_cooldown(kind, cooldown);
        true
    }

    /// Старт без проверок (вытесняет текущую атаку, cooldown не трогает)
    pub fn force_start(&mut self, kind: AttackKind, duration: u32) {
        let duration = duration.max(1);
        self.active = Some(kind);
        self.timer = duration;
        self.duration = duration;
    }

    pub fn cancel(&mut self) {
        self.active = None;
        self.timer = 0;
        self.duration = 0;
    }

    /// Один тик: cooldown'ы и таймер. Возвращает вид атаки, завершившейся на этом тике.
    pub fn tick(&mut self) -> Option<AttackKind> {
        for cooldown in self.cooldowns.iter_mut() {
            *cooldown = cooldown.saturating_sub(1);
        }

        if self.active.is_some() {
            self.timer = self.timer.saturating_sub(1);
            if self.timer == 0 {
                self.duration = 0;
                return self.active.take();
            }
        }

        None
    }

    /// Активен ли хитбокс ближнего боя в этом тике
    pub fn hitbox_live(&self, window: &ActiveWindow) -> bool {
        match self.active {
            Some(kind) if kind.is_melee() => window.contains(self.duration, self.timer),
            _ => false,
        }
    }
}
