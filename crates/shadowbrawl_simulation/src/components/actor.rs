//! Базовое состояние бойца: тело, здоровье, боевое состояние, атаки.
//!
//! Общая часть игрока и противников. Правила урона — в `combat::damage`,
//! интеграция — в `physics::movement`.

use bevy::math::Vec2;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::movement::Body;
use super::opponent::OpponentId;
use crate::combat::{AttackKind, AttackSlots};
use crate::config::WorldConfig;
use crate::physics::integrate;

/// Идентификатор актора в событиях и снапшотах
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActorId {
    Player,
    Opponent(OpponentId),
}

/// Направление взгляда
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum Facing {
    Left,
    Right,
}

impl Default for Facing {
    fn default() -> Self {
        Self::Right
    }
}

impl Facing {
    /// Направление к цели по dx (dx == 0 → Left)
    pub fn toward(dx: f32) -> Self {
        if dx > 0.0 {
            Self::Right
        } else {
            Self::Left
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn is_right(self) -> bool {
        self == Self::Right
    }
}

/// Боевое состояние (для презентации и правил)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum CombatState {
    Idle,
    Running,
    Jumping,
    Falling,
    Attacking(AttackKind),
    Blocking,
    /// Транзитное — держится до следующего апдейта владельца
    Hit,
    /// Терминальное
    Dead,
}

impl Default for CombatState {
    fn default() -> Self {
        Self::Idle
    }
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Reflect)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount).min(self.max);
    }

    pub fn restore(&mut self) {
        self.current = self.max;
    }

    pub fn fraction(&self) -> f32 {
        if self.max == 0 {
            0.0
        } else {
            self.current as f32 / self.max as f32
        }
    }
}

/// Боец: тело + здоровье + атаки
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub body: Body,
    pub facing: Facing,
    pub health: Health,
    pub state: CombatState,
    /// Тики неуязвимости (урон игнорируется пока > 0)
    pub invincibility: u32,
    pub attacks: AttackSlots,
}

impl Actor {
    pub fn new(position: Vec2, width: u32, height: u32, max_health: u32) -> Self {
        Self {
            body: Body::new(position, width, height),
            facing: Facing::Right,
            health: Health::new(max_health),
            state: CombatState::Idle,
            invincibility: 0,
            attacks: AttackSlots::default(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.state != CombatState::Dead && self.health.is_alive()
    }

    pub fn is_dead(&self) -> bool {
        !self.is_alive()
    }

    /// Тикает атаки и неуязвимость; по окончании атаки выходит из Attacking
    pub fn tick_timers(&mut self) {
        self.invincibility = self.invincibility.saturating_sub(1);
        if self.attacks.tick().is_some() && matches!(self.state, CombatState::Attacking(_)) {
            self.state = CombatState::Idle;
        }
    }

    /// Начать атаку (cooldown == 0, нет активной атаки)
    pub fn start_attack(&mut self, kind: AttackKind, duration: u32, cooldown: u32) -> bool {
        if self.is_dead() || !self.attacks.try_start(kind, duration, cooldown) {
            return false;
        }
        self.state = CombatState::Attacking(kind);
        true
    }

    /// Гравитация + земля + границы уровня; обновляет воздушные состояния.
    ///
    /// Возвращает true, если тело стоит на земле после шага.
    pub fn integrate(&mut self, world: &WorldConfig, falling_speed: f32) -> bool {
        let grounded = integrate(&mut self.body, world);

        if matches!(
            self.state,
            CombatState::Attacking(_) | CombatState::Blocking | CombatState::Dead
        ) {
            return grounded;
        }

        let vy = self.body.velocity.y;
        if vy < 0.0 {
            self.state = CombatState::Jumping;
        } else if !grounded && vy > falling_speed {
            self.state = CombatState::Falling;
        } else if grounded && matches!(self.state, CombatState::Jumping | CombatState::Falling) {
            self.state = CombatState::Idle;
        }

        grounded
    }

    /// Idle/Running по горизонтальной скорости (если состояние не "занято")
    pub fn refresh_locomotion(&mut self, stop_threshold: f32) {
        if matches!(
            self.state,
            CombatState::Attacking(_)
                | CombatState::Jumping
                | CombatState::Falling
                | CombatState::Dead
        ) {
            return;
        }

        self.state = if self.body.velocity.x.abs() > stop_threshold {
            CombatState::Running
        } else {
            CombatState::Idle
        };
    }

    /// Терминальный переход: атаки сбрасываются
    pub fn die(&mut self) {
        self.health.current = 0;
        self.state = CombatState::Dead;
        self.attacks.cancel();
    }
}
