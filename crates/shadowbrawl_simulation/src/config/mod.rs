//! Конфигурация мира и игрока
//!
//! Два варианта правил (Classic / Shadows) отличаются только таблицами
//! чисел — логика симуляции общая.
//!
//! Все величины в пикселях и тиках (60 тиков = 1 секунда), ось Y вниз.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::combat::{ActiveWindow, ComboTuning};

pub mod error;

pub use error::ConfigError;

/// Частота симуляции (FixedUpdate и "время" патруля)
pub const TICKS_PER_SECOND: u32 = 60;

/// Вариант правил (набор уровней, статы игрока, архетипы)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum Variant {
    /// Пять уровней, бесконечные попытки (поражение = конец)
    Classic,
    /// Семь территорий, жизни + респаун
    Shadows,
}

impl Default for Variant {
    fn default() -> Self {
        Self::Shadows
    }
}

impl Variant {
    pub fn world(self) -> WorldConfig {
        match self {
            Variant::Classic => WorldConfig::default(),
            Variant::Shadows => WorldConfig {
                ground_level: 580.0,
                level_width: 6000.0,
                viewport_width: 1280.0,
                boss_approach_distance: 450.0,
                projectile_spin_per_tick: 12.0,
                pickup: PickupTuning {
                    heal: 25,
                    ..PickupTuning::default()
                },
                ..WorldConfig::default()
            },
        }
    }

    pub fn player_tuning(self) -> PlayerTuning {
        match self {
            Variant::Classic => PlayerTuning::default(),
            Variant::Shadows => PlayerTuning {
                width: 60,
                height: 95,
                max_health: 150,
                lives: Some(3),
                punch: MeleeTuning {
                    damage: 35,
                    reach: 75.0,
                    cooldown: 10,
                    duration: 12,
                },
                kick: MeleeTuning {
                    damage: 45,
                    reach: 90.0,
                    cooldown: 18,
                    duration: 16,
                },
                batarang: ThrowTuning {
                    damage: 25,
                    speed: 18.0,
                    max_distance: 600.0,
                    cooldown: 30,
                    duration: 8,
                },
                hitbox_inset: 15.0,
                hit_invincibility: 45,
                spawn_height: 120.0,
                ..PlayerTuning::default()
            },
        }
    }
}

/// Параметры мира (гравитация, границы уровня, камера)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldConfig {
    /// Прирост vy за тик
    pub gravity: f32,
    /// Максимальная скорость падения
    pub terminal_velocity: f32,
    /// Y уровня земли (нижняя граница тел)
    pub ground_level: f32,
    /// Ширина уровня: x ∈ [0, level_width - width]
    pub level_width: f32,
    pub viewport_width: f32,
    /// Игрок держится на этом расстоянии от левого края viewport
    pub scroll_threshold: f32,
    /// Доля разрыва до цели, закрываемая камерой за тик
    pub scroll_smoothing: f32,
    /// Горизонтальный отброс при попадании
    pub knockback_speed: f32,
    /// Неуязвимость противника после попадания (тики)
    pub opponent_hit_invincibility: u32,
    /// Дистанция, на которой босс "замечает" игрока (cue BossEngaged)
    pub boss_approach_distance: f32,
    pub projectile_spin_per_tick: f32,
    /// Заставка уровня перед Playing (тики)
    pub stage_intro_ticks: u32,
    pub pickup: PickupTuning,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            gravity: 0.8,
            terminal_velocity: 20.0,
            ground_level: 550.0,
            level_width: 8000.0,
            viewport_width: 1200.0,
            scroll_threshold: 400.0,
            scroll_smoothing: 0.1,
            knockback_speed: 5.0,
            opponent_hit_invincibility: 30,
            boss_approach_distance: 400.0,
            projectile_spin_per_tick: 15.0,
            stage_intro_ticks: 180,
            pickup: PickupTuning::default(),
        }
    }
}

/// Аптечка, выпадающая из побеждённых приспешников
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PickupTuning {
    pub width: u32,
    pub height: u32,
    pub heal: u32,
    /// Время жизни (тики)
    pub lifetime: u32,
}

impl Default for PickupTuning {
    fn default() -> Self {
        Self {
            width: 25,
            height: 25,
            heal: 20,
            lifetime: 600,
        }
    }
}

/// Удар ближнего боя игрока
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeleeTuning {
    pub damage: u32,
    /// Длина прямоугольника атаки перед телом
    pub reach: f32,
    pub cooldown: u32,
    pub duration: u32,
}

/// Метательный снаряд игрока
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThrowTuning {
    pub damage: u32,
    pub speed: f32,
    pub max_distance: f32,
    pub cooldown: u32,
    pub duration: u32,
}

/// Статы игрока
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTuning {
    pub width: u32,
    pub height: u32,
    pub max_health: u32,
    /// None — вариант без жизней (смерть = поражение)
    pub lives: Option<u32>,
    pub move_speed: f32,
    /// Множитель vx за тик без ввода
    pub friction: f32,
    /// |vx| ниже порога обнуляется
    pub stop_threshold: f32,
    pub jump_impulse: f32,
    pub double_jump_impulse: f32,
    pub max_jumps: u32,
    pub punch: MeleeTuning,
    pub kick: MeleeTuning,
    pub batarang: ThrowTuning,
    /// Вертикальный отступ прямоугольника атаки от верха/низа тела
    pub hitbox_inset: f32,
    /// Активная часть анимации удара
    pub melee_window: ActiveWindow,
    pub hit_invincibility: u32,
    pub respawn_invincibility: u32,
    pub combo: ComboTuning,
    pub spawn_x: f32,
    /// Спавн на этой высоте над землёй (падает на землю)
    pub spawn_height: f32,
    /// vy выше порога в воздухе → Falling
    pub falling_speed: f32,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            width: 50,
            height: 80,
            max_health: 120,
            lives: None,
            move_speed: 7.0,
            friction: 0.8,
            stop_threshold: 0.5,
            jump_impulse: -19.0,
            double_jump_impulse: -16.0,
            max_jumps: 2,
            punch: MeleeTuning {
                damage: 35,
                reach: 70.0,
                cooldown: 12,
                duration: 15,
            },
            kick: MeleeTuning {
                damage: 45,
                reach: 85.0,
                cooldown: 20,
                duration: 20,
            },
            batarang: ThrowTuning {
                damage: 20,
                speed: 18.0,
                max_distance: 600.0,
                cooldown: 35,
                duration: 10,
            },
            hitbox_inset: 20.0,
            melee_window: ActiveWindow { lead: 2, tail: 3 },
            hit_invincibility: 60,
            respawn_invincibility: 120,
            combo: ComboTuning::default(),
            spawn_x: 100.0,
            spawn_height: 100.0,
            falling_speed: 2.0,
        }
    }
}
