//! Per-tick обновление противника.
//!
//! Порядок:
//! 1. таймеры (атаки, неуязвимость, блок)
//! 2. восприятие + разворот к игроку
//! 3. эскалация фаз
//! 4. переоценка состояния (раз в период) → политики → общая FSM → реакции
//! 5. интеграция тела, Idle/Running/Blocking

use rand::Rng;

use crate::ai::policies::{after_behavior, before_behavior, check_escalation};
use crate::ai::simple_fsm::{apply_block, apply_dodge, decide, execute, Perception};
use crate::combat::Projectile;
use crate::components::{ActorId, Facing, Opponent, PlayerActor};
use crate::config::WorldConfig;
use crate::encounter::events::{CombatCue, CueSink};
use crate::logger;

/// vy выше порога в воздухе → Falling
const AIRBORNE_SPEED: f32 = 2.0;
/// |vx| ниже → Idle
const STOP_THRESHOLD: f32 = 0.1;

/// Один тик противника. Возвращает выпущенный снаряд.
pub fn update_opponent<R: Rng + ?Sized>(
    opponent: &mut Opponent,
    player: &PlayerActor,
    world: &WorldConfig,
    tick: u64,
    rng: &mut R,
    cues: &mut dyn CueSink,
) -> Option<Projectile> {
    if opponent.actor.is_dead() {
        return None;
    }

    opponent.actor.tick_timers();
    opponent.brain.tick();

    let perception = Perception::observe(opponent, player, world.ground_level, tick);
    opponent.actor.facing = Facing::toward(perception.dx);

    if let Some(phase) = check_escalation(opponent) {
        logger::log_info(&format!(
            "{} ({:?}) escalates to phase {}",
            opponent.archetype.name, opponent.id, phase
        ));
        cues.notify(CombatCue::PhaseEscalated {
            opponent: opponent.id,
            phase,
        });
    }

    let mut projectile = None;
    if perception.player_alive {
        let period = opponent.archetype.behavior.decision_period;
        if opponent.brain.decision_due(period) {
            opponent.brain.state = decide(
                &opponent.archetype,
                opponent.aggression,
                perception.distance,
                rng,
            );
            opponent.brain.block_rolled = false;
        }

        let outcome = before_behavior(opponent, &perception, rng);
        if outcome.skip_behavior {
            projectile = outcome.projectile;
        } else {
            projectile = execute(opponent, &perception, rng);
            apply_block(opponent, &perception, rng);
        }

        after_behavior(opponent, &perception, rng);
        apply_dodge(opponent, &perception, rng);
    } else {
        opponent.actor.body.velocity.x = 0.0;
    }

    let attacks = &opponent.actor.attacks;
    if let Some(kind) = attacks.active() {
        // Таймер уже тикнул в начале — равен duration только у атаки этого тика
        if attacks.timer() == attacks.duration() {
            cues.notify(CombatCue::AttackIssued {
                actor: ActorId::Opponent(opponent.id),
                kind,
            });
        }
    }
    if projectile.is_some() {
        cues.notify(CombatCue::ProjectileThrown {
            owner: ActorId::Opponent(opponent.id),
        });
    }

    opponent.actor.integrate(world, AIRBORNE_SPEED);
    opponent.actor.refresh_locomotion(STOP_THRESHOLD);
    opponent.refresh_block_state();

    projectile
}
