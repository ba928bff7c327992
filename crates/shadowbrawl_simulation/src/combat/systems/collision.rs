//! Hitbox/collision resolution (после движения всех акторов и снарядов)
//!
//! Порядок — контракт:
//! 1. снаряды (первое пересечение, максимум одно попадание на снаряд)
//! 2. удар игрока (по всем пересечённым противникам сразу)
//! 3. удары противников по игроку
//!
//! Мёртвые акторы в проверках не участвуют. Смерти обрабатывает encounter
//! (очки, дроп, ActorDied) после всех проверок тика.

use crate::combat::hitbox::overlaps;
use crate::combat::{DamageOutcome, Projectile};
use crate::components::{ActorId, Opponent, PlayerActor};
use crate::config::WorldConfig;
use crate::encounter::events::{CombatCue, CueSink};

pub fn resolve_collisions(
    player: &mut PlayerActor,
    opponents: &mut [Opponent],
    projectiles: &mut [Projectile],
    world: &WorldConfig,
    cues: &mut dyn CueSink,
) {
    resolve_projectiles(player, opponents, projectiles, world, cues);
    resolve_player_melee(player, opponents, world, cues);
    resolve_opponent_melee(player, opponents, world, cues);
}

pub fn resolve_projectiles(
    player: &mut PlayerActor,
    opponents: &mut [Opponent],
    projectiles: &mut [Projectile],
    world: &WorldConfig,
    cues: &mut dyn CueSink,
) {
    for projectile in projectiles.iter_mut().filter(|p| p.is_active()) {
        let rect = projectile.rect();
        let direction = projectile.knockback_direction();

        if projectile.owner_is_player {
            let target = opponents
                .iter_mut()
                .find(|opponent| opponent.is_alive() && overlaps(rect, opponent.actor.body.rect()));

            if let Some(opponent) = target {
                let outcome = opponent.take_damage(projectile.damage, direction, world);
                projectile.deactivate();
                player.register_hit();
                notify_hit(cues, opponent, outcome);
            }
        } else if player.is_alive() && overlaps(rect, player.actor.body.rect()) {
            let outcome = player.take_damage(projectile.damage, direction, world);
            projectile.deactivate();
            notify_player_damage(cues, player, outcome);
        }
    }
}

/// Удар игрока: каждое пересечение засчитывается в комбо (даже по неуязвимой цели),
/// одна цель — не чаще раза за удар.
pub fn resolve_player_melee(
    player: &mut PlayerActor,
    opponents: &mut [Opponent],
    world: &WorldConfig,
    cues: &mut dyn CueSink,
) {
    let Some(rect) = player.attack_rect() else {
        return;
    };
    let direction = player.actor.facing.sign();

    for opponent in opponents.iter_mut() {
        if !opponent.is_alive() || player.swing_already_hit(opponent.id) {
            continue;
        }
        if !overlaps(rect, opponent.actor.body.rect()) {
            continue;
        }

        let damage = player.attack_damage();
        let outcome = opponent.take_damage(damage, direction, world);
        player.mark_swing_hit(opponent.id);
        player.register_hit();
        notify_hit(cues, opponent, outcome);
    }
}

pub fn resolve_opponent_melee(
    player: &mut PlayerActor,
    opponents: &mut [Opponent],
    world: &WorldConfig,
    cues: &mut dyn CueSink,
) {
    for opponent in opponents.iter() {
        if !player.is_alive() {
            return;
        }
        if !opponent.is_alive() {
            continue;
        }
        let Some(rect) = opponent.attack_rect() else {
            continue;
        };
        if !overlaps(rect, player.actor.body.rect()) {
            continue;
        }

        let outcome = player.take_damage(
            opponent.melee_damage(),
            opponent.actor.facing.sign(),
            world,
        );
        notify_player_damage(cues, player, outcome);
    }
}

fn notify_hit(cues: &mut dyn CueSink, opponent: &Opponent, outcome: DamageOutcome) {
    if let DamageOutcome::Applied { dealt, blocked, .. } = outcome {
        cues.notify(CombatCue::HitLanded {
            attacker: ActorId::Player,
            target: ActorId::Opponent(opponent.id),
            damage: dealt,
            blocked,
        });
    }
}

fn notify_player_damage(cues: &mut dyn CueSink, player: &PlayerActor, outcome: DamageOutcome) {
    if let DamageOutcome::Applied { dealt, .. } = outcome {
        cues.notify(CombatCue::PlayerDamaged {
            amount: dealt,
            remaining: player.actor.health.current,
        });
    }
}
