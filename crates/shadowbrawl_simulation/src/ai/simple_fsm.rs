//! Общая FSM противника (patrol / chase / attack / retreat)
//!
//! Архитектура:
//! - `decide` — выбор ai_state раз в decision_period тиков
//! - `execute` — движение и атака по текущему состоянию (каждый тик)
//! - `apply_block` / `apply_dodge` — реакции на атаку игрока поверх состояния
//!
//! Архетип-специфичные перекрытия — в `policies`.

use std::sync::Arc;

use rand::Rng;

use super::archetype::{Archetype, RangedProfile};
use super::components::AiState;
use crate::combat::{AttackKind, Projectile};
use crate::components::{Facing, Opponent, PlayerActor};
use crate::config::TICKS_PER_SECOND;

/// Что противник видит на этом тике
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    /// player.x − self.x (левые верхние углы)
    pub dx: f32,
    /// Евклидово расстояние между левыми верхними углами
    pub distance: f32,
    pub player_alive: bool,
    pub player_attacking: bool,
    /// Оставшиеся тики атаки игрока
    pub player_attack_timer: u32,
    /// Противник стоит на земле
    pub grounded: bool,
    /// Тик encounter'а (детерминированное "время" патруля)
    pub tick: u64,
}

impl Perception {
    pub fn observe(
        opponent: &Opponent,
        player: &PlayerActor,
        ground_level: f32,
        tick: u64,
    ) -> Self {
        let delta = player.actor.body.position - opponent.actor.body.position;
        let attacks = &player.actor.attacks;

        Self {
            dx: delta.x,
            distance: delta.length(),
            player_alive: player.is_alive(),
            player_attacking: attacks.is_attacking(),
            player_attack_timer: attacks.timer(),
            grounded: opponent.actor.body.is_grounded(ground_level),
            tick,
        }
    }

    /// Направление от игрока
    pub fn away(&self) -> f32 {
        -Facing::toward(self.dx).sign()
    }
}

/// Переоценка состояния по дистанции и агрессии
pub fn decide<R: Rng + ?Sized>(
    archetype: &Archetype,
    aggression: f32,
    distance: f32,
    rng: &mut R,
) -> AiState {
    let behavior = &archetype.behavior;

    if distance < archetype.attack_range {
        AiState::Attack
    } else if distance < behavior.chase_distance && rng.gen::<f32>() < aggression {
        AiState::Chase
    } else if distance > behavior.patrol_distance {
        AiState::Patrol
    } else if rng.gen::<f32>() < aggression {
        AiState::Chase
    } else {
        AiState::Retreat
    }
}

/// Исполнение текущего состояния. Возвращает снаряд, если противник выстрелил.
pub fn execute<R: Rng + ?Sized>(
    opponent: &mut Opponent,
    perception: &Perception,
    rng: &mut R,
) -> Option<Projectile> {
    let archetype = Arc::clone(&opponent.archetype);
    let behavior = &archetype.behavior;
    let speed = opponent.effective_speed();

    match opponent.brain.state {
        AiState::Patrol => {
            let seconds = perception.tick as f32 / TICKS_PER_SECOND as f32;
            let target = opponent.spawn_x + seconds.sin() * behavior.patrol_radius;
            let direction = if target > opponent.actor.body.position.x {
                Facing::Right
            } else {
                Facing::Left
            };

            opponent.actor.body.velocity.x =
                direction.sign() * speed * behavior.patrol_speed_factor;
            opponent.actor.facing = direction;
            None
        }
        AiState::Chase => {
            opponent.actor.body.velocity.x = if perception.dx > behavior.chase_deadzone {
                speed
            } else if perception.dx < -behavior.chase_deadzone {
                -speed
            } else {
                0.0
            };
            None
        }
        AiState::Retreat => {
            opponent.actor.body.velocity.x = perception.away() * speed;
            None
        }
        AiState::Attack => {
            opponent.actor.body.velocity.x = 0.0;

            if archetype.prefer_melee
                && perception.distance < archetype.attack_range
                && commit_melee(opponent, &archetype, rng)
            {
                return None;
            }

            let ranged = archetype.ranged?;
            if opponent.actor.attacks.cooldown(AttackKind::Ranged) > 0
                || !ranged.in_band(perception.distance)
            {
                return None;
            }
            Some(fire(opponent, &ranged))
        }
    }
}

/// Удар ближнего боя (punch/kick делят один cooldown)
pub fn commit_melee<R: Rng + ?Sized>(
    opponent: &mut Opponent,
    archetype: &Archetype,
    rng: &mut R,
) -> bool {
    let attacks = &opponent.actor.attacks;
    if !attacks.can_start(AttackKind::Punch) || !attacks.can_start(AttackKind::Kick) {
        return false;
    }

    let kind = if archetype.kick_chance > 0.0 && rng.gen::<f32>() < archetype.kick_chance {
        AttackKind::Kick
    } else {
        AttackKind::Punch
    };

    if !opponent
        .actor
        .start_attack(kind, archetype.attack_duration, archetype.attack_cooldown)
    {
        return false;
    }

    let other = match kind {
        AttackKind::Kick => AttackKind::Punch,
        _ => AttackKind::Kick,
    };
    opponent.actor.attacks.set_cooldown(other, archetype.attack_cooldown);
    true
}

/// Выстрел: снаряд в сторону взгляда, cooldown дальней атаки
pub fn fire(opponent: &mut Opponent, profile: &RangedProfile) -> Projectile {
    opponent
        .actor
        .attacks
        .set_cooldown(AttackKind::Ranged, profile.cooldown);

    Projectile::launched_from(
        &opponent.actor.body,
        opponent.actor.facing,
        profile.height_divisor,
        profile.speed,
        profile.damage,
        profile.travel,
        false,
    )
}

/// Блок: один бросок за цикл решений, пока игрок атакует в пределах дистанции.
/// Удачный бросок держит блок один период решений.
pub fn apply_block<R: Rng + ?Sized>(opponent: &mut Opponent, perception: &Perception, rng: &mut R) {
    let Some(block) = opponent.archetype.block else {
        return;
    };
    if opponent.brain.block_rolled || !perception.player_attacking {
        return;
    }
    if block.range.is_some_and(|range| perception.distance >= range) {
        return;
    }

    opponent.brain.block_rolled = true;
    if rng.gen::<f32>() < block.chance {
        opponent.brain.block_timer = opponent.archetype.behavior.decision_period;
    }
}

/// Уклонение: рывок от игрока
pub fn apply_dodge<R: Rng + ?Sized>(opponent: &mut Opponent, perception: &Perception, rng: &mut R) {
    let Some(dodge) = opponent.archetype.dodge else {
        return;
    };
    if dodge
        .min_player_attack_timer
        .is_some_and(|min| perception.player_attack_timer <= min)
    {
        return;
    }
    if perception.distance >= dodge.range {
        return;
    }

    if rng.gen::<f32>() < dodge.chance {
        opponent.actor.body.velocity.x =
            perception.away() * opponent.effective_speed() * dodge.speed_factor;
    }
}
