//! Политики архетипов поверх общей FSM
//!
//! Порядок на тике:
//! 1. `check_escalation` — фазы по порогам здоровья (до любых решений)
//! 2. `before_behavior` — перекрытия состояния, залпы, захват, контратака;
//!    залп заменяет общую FSM на этом тике
//! 3. общая FSM (`simple_fsm::execute`)
//! 4. `after_behavior` — перекрытия скорости (финт, прыжок-веном)

use std::sync::Arc;

use rand::Rng;

use super::archetype::Policy;
use super::components::AiState;
use super::simple_fsm::{fire, Perception};
use crate::combat::{AttackKind, Projectile};
use crate::components::{CombatState, Opponent};

/// Результат предварительных политик
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyOutcome {
    /// Общая FSM на этом тике не исполняется
    pub skip_behavior: bool,
    pub projectile: Option<Projectile>,
}

/// Проверка порога следующей фазы. Один шаг за тик, только вперёд.
///
/// Возвращает новый номер фазы.
pub fn check_escalation(opponent: &mut Opponent) -> Option<u32> {
    let archetype = Arc::clone(&opponent.archetype);

    for policy in &archetype.policies {
        let Policy::MultiPhase { steps } = policy else {
            continue;
        };

        let next = (opponent.escalation.phase - 1) as usize;
        let step = steps.get(next)?;
        if opponent.actor.health.fraction() < step.below_fraction {
            opponent.escalation.advance(step);
            return Some(opponent.escalation.phase);
        }
    }
    None
}

pub fn before_behavior<R: Rng + ?Sized>(
    opponent: &mut Opponent,
    perception: &Perception,
    rng: &mut R,
) -> PolicyOutcome {
    let archetype = Arc::clone(&opponent.archetype);
    let mut outcome = PolicyOutcome::default();

    for policy in &archetype.policies {
        match policy {
            Policy::AlternatingDisposition { period, bold, timid } => {
                opponent.brain.disposition_timer += 1;
                if opponent.brain.disposition_timer >= *period {
                    opponent.brain.disposition_timer = 0;
                    opponent.aggression = if rng.gen::<f32>() > 0.5 { *bold } else { *timid };
                }
            }
            Policy::Kiting {
                retreat_within,
                engage_min,
                engage_max,
                volley,
            } => {
                let distance = perception.distance;
                if distance < *retreat_within {
                    opponent.brain.state = AiState::Retreat;
                } else if distance > *engage_min && distance < *engage_max {
                    opponent.brain.state = AiState::Attack;
                }

                if outcome.projectile.is_none()
                    && opponent.actor.attacks.cooldown(AttackKind::Ranged) == 0
                    && volley.in_band(distance)
                {
                    outcome.projectile = Some(fire(opponent, volley));
                    outcome.skip_behavior = true;
                }
            }
            Policy::ToxinVolley { volley } => {
                if outcome.projectile.is_none()
                    && opponent.actor.attacks.cooldown(AttackKind::Ranged) == 0
                    && volley.in_band(perception.distance)
                {
                    outcome.projectile = Some(fire(opponent, volley));
                    outcome.skip_behavior = true;
                }
            }
            Policy::Grab {
                engage_within,
                engage_aggression,
                range,
                cooldown,
                duration,
            } => {
                if perception.distance < *engage_within {
                    opponent.brain.state = AiState::Attack;
                    opponent.aggression = *engage_aggression;
                }
                if perception.distance < *range {
                    opponent
                        .actor
                        .start_attack(AttackKind::Special, *duration, *cooldown);
                }
            }
            Policy::CounterWindow {
                range,
                chance,
                min_player_attack_timer,
                duration,
            } => {
                let countering = opponent.actor.attacks.active() == Some(AttackKind::Special);
                if opponent.counter_enabled()
                    && !countering
                    && perception.player_attack_timer > *min_player_attack_timer
                    && perception.distance < *range
                    && rng.gen::<f32>() < *chance
                {
                    opponent.actor.attacks.force_start(AttackKind::Special, *duration);
                    opponent.actor.state = CombatState::Attacking(AttackKind::Special);
                }
            }
            Policy::VenomLeap { aggression, .. } => {
                if opponent.escalation.venom_active {
                    opponent.aggression = *aggression;
                }
            }
            Policy::Feint { .. } | Policy::MultiPhase { .. } => {}
        }
    }

    outcome
}

pub fn after_behavior<R: Rng + ?Sized>(
    opponent: &mut Opponent,
    perception: &Perception,
    rng: &mut R,
) {
    let archetype = Arc::clone(&opponent.archetype);
    let speed = opponent.effective_speed();

    for policy in &archetype.policies {
        match policy {
            Policy::Feint {
                period,
                reverse_chance,
                dash_chance,
                dash_speed_factor,
            } => {
                opponent.brain.feint_timer += 1;
                if opponent.brain.feint_timer >= *period {
                    opponent.brain.feint_timer = 0;
                    if rng.gen::<f32>() < *reverse_chance {
                        let velocity = &mut opponent.actor.body.velocity;
                        velocity.x = if velocity.x.abs() > 0.1 {
                            -velocity.x
                        } else {
                            random_direction(rng) * speed
                        };
                    }
                }

                if archetype.can_dodge && rng.gen::<f32>() < *dash_chance {
                    opponent.actor.body.velocity.x =
                        random_direction(rng) * speed * dash_speed_factor;
                }
            }
            Policy::VenomLeap {
                min_distance,
                max_distance,
                chance,
                impulse,
                speed_factor,
                ..
            } => {
                if opponent.escalation.venom_active
                    && perception.distance > *min_distance
                    && perception.distance < *max_distance
                    && perception.grounded
                    && rng.gen::<f32>() < *chance
                {
                    let toward = -perception.away();
                    opponent.actor.body.velocity.y = *impulse;
                    opponent.actor.body.velocity.x = toward * speed * speed_factor;
                }
            }
            _ => {}
        }
    }
}

fn random_direction<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    if rng.gen::<bool>() {
        1.0
    } else {
        -1.0
    }
}
