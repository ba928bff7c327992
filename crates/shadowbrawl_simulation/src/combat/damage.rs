//! Применение урона к бойцу
//!
//! Правила:
//! - мёртвые и неуязвимые игнорируют урон
//! - блок делит урон на `block_divisor` (целочисленно), состояние Hit не ставится
//! - после урона: неуязвимость, горизонтальный отброс
//! - health == 0 → Dead (атаки сброшены)

use crate::components::{Actor, CombatState};

/// Параметры реакции на попадание (зависят от того, кто получает урон)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitResponse {
    pub knockback_speed: f32,
    /// Неуязвимость после попадания (тики)
    pub invincibility: u32,
    /// Some(d) — цель блокирует, урон делится на d
    pub block_divisor: Option<u32>,
}

/// Результат попадания
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Цель мертва или неуязвима
    Ignored,
    Applied {
        dealt: u32,
        blocked: bool,
        killed: bool,
    },
}

impl DamageOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, DamageOutcome::Applied { .. })
    }

    pub fn killed(&self) -> bool {
        matches!(self, DamageOutcome::Applied { killed: true, .. })
    }
}

/// Применить попадание. `knockback_dir` — знак направления отброса (−1, 0, 1).
pub fn apply_hit(
    actor: &mut Actor,
    amount: u32,
    knockback_dir: f32,
    response: &HitResponse,
) -> DamageOutcome {
    if actor.is_dead() || actor.invincibility > 0 {
        return DamageOutcome::Ignored;
    }

    let blocked = response.block_divisor.is_some();
    let dealt = match response.block_divisor {
        Some(divisor) => amount / divisor.max(1),
        None => amount,
    };

    actor.health.take_damage(dealt);
    actor.invincibility = response.invincibility;
    actor.body.velocity.x = knockback_dir * response.knockback_speed;

    let killed = !actor.health.is_alive();
    if killed {
        actor.die();
    } else if !blocked && knockback_dir != 0.0 {
        actor.state = CombatState::Hit;
    }

    DamageOutcome::Applied {
        dealt,
        blocked,
        killed,
    }
}
