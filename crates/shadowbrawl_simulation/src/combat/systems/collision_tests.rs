//! Tests for collision resolution.

use bevy::math::Vec2;

use super::collision::{
    resolve_collisions, resolve_opponent_melee, resolve_player_melee, resolve_projectiles,
};
use crate::ai::ArchetypeRegistry;
use crate::combat::{AttackKind, Projectile};
use crate::components::{ActorId, CombatState, Facing, Opponent, OpponentId, PlayerActor};
use crate::config::{Variant, WorldConfig};
use crate::encounter::events::CombatCue;

fn setup() -> (PlayerActor, WorldConfig) {
    let world = Variant::Classic.world();
    let player = PlayerActor::at(Vec2::new(200.0, 470.0), Variant::Classic.player_tuning());
    (player, world)
}

fn thug(id: u32, x: f32) -> Opponent {
    let archetype = ArchetypeRegistry::classic()
        .get("joker_thug")
        .expect("joker_thug exists");
    Opponent::spawn(OpponentId(id), archetype, Vec2::new(x, 470.0))
}

/// Удар игрока до активной части окна
fn swing(player: &mut PlayerActor, world: &WorldConfig) {
    assert!(player.punch());
    player.update(world);
    player.update(world);
    assert!(player.attack_rect().is_some());
}

#[test]
fn test_swing_hits_each_target_once() {
    let (mut player, world) = setup();
    let mut opponents = vec![thug(0, 260.0)];
    let mut cues: Vec<CombatCue> = Vec::new();

    swing(&mut player, &world);
    resolve_player_melee(&mut player, &mut opponents, &world, &mut cues);
    assert_eq!(opponents[0].actor.health.current, 25);

    // Неуязвимость сняли — но это всё тот же удар
    opponents[0].actor.invincibility = 0;
    resolve_player_melee(&mut player, &mut opponents, &world, &mut cues);

    assert_eq!(opponents[0].actor.health.current, 25);
    assert_eq!(player.combo.count(), 1);
    assert_eq!(
        cues,
        vec![CombatCue::HitLanded {
            attacker: ActorId::Player,
            target: ActorId::Opponent(OpponentId(0)),
            damage: 35,
            blocked: false,
        }]
    );
}

#[test]
fn test_swing_through_two_targets_builds_combo() {
    let (mut player, world) = setup();
    let mut opponents = vec![thug(0, 260.0), thug(1, 270.0)];
    let mut cues: Vec<CombatCue> = Vec::new();

    swing(&mut player, &world);
    resolve_player_melee(&mut player, &mut opponents, &world, &mut cues);

    // Второй цели уже с множителем 1.15 (40.25 → 40)
    assert_eq!(opponents[0].actor.health.current, 25);
    assert_eq!(opponents[1].actor.health.current, 20);
    assert_eq!(player.combo.count(), 2);
}

#[test]
fn test_invincible_target_still_counts_for_combo() {
    let (mut player, world) = setup();
    let mut opponents = vec![thug(0, 260.0)];
    opponents[0].actor.invincibility = 10;
    let mut cues: Vec<CombatCue> = Vec::new();

    swing(&mut player, &world);
    resolve_player_melee(&mut player, &mut opponents, &world, &mut cues);

    assert_eq!(opponents[0].actor.health.current, 60);
    assert_eq!(player.combo.count(), 1);
    assert!(cues.is_empty());
}

#[test]
fn test_lethal_swing_kills_target() {
    let (mut player, world) = setup();
    let mut opponents = vec![thug(0, 260.0)];
    opponents[0].actor.health.current = 30;
    let mut cues: Vec<CombatCue> = Vec::new();

    swing(&mut player, &world);
    resolve_player_melee(&mut player, &mut opponents, &world, &mut cues);

    assert_eq!(opponents[0].actor.state, CombatState::Dead);
    assert_eq!(opponents[0].actor.health.current, 0);
    assert_eq!(
        cues,
        vec![CombatCue::HitLanded {
            attacker: ActorId::Player,
            target: ActorId::Opponent(OpponentId(0)),
            damage: 35,
            blocked: false,
        }]
    );
}

#[test]
fn test_player_projectile_hits_first_overlap_only() {
    let (mut player, world) = setup();
    let mut opponents = vec![thug(0, 260.0), thug(1, 260.0)];
    let mut projectiles = vec![Projectile::new(
        Vec2::new(285.0, 500.0),
        Facing::Right,
        18.0,
        20,
        600.0,
        true,
    )];
    let mut cues: Vec<CombatCue> = Vec::new();

    resolve_projectiles(&mut player, &mut opponents, &mut projectiles, &world, &mut cues);

    assert_eq!(opponents[0].actor.health.current, 40);
    assert_eq!(opponents[1].actor.health.current, 60);
    assert!(!projectiles[0].is_active());
    assert_eq!(player.combo.count(), 1);
}

#[test]
fn test_projectile_ignores_dead_opponents() {
    let (mut player, world) = setup();
    let mut opponents = vec![thug(0, 260.0), thug(1, 260.0)];
    opponents[0].actor.die();
    let mut projectiles = vec![Projectile::new(
        Vec2::new(285.0, 500.0),
        Facing::Right,
        18.0,
        20,
        600.0,
        true,
    )];

    resolve_projectiles(&mut player, &mut opponents, &mut projectiles, &world, &mut Vec::new());

    assert_eq!(opponents[1].actor.health.current, 40);
}

#[test]
fn test_opponent_projectile_damages_player() {
    let (mut player, world) = setup();
    let mut projectiles = vec![Projectile::new(
        Vec2::new(225.0, 500.0),
        Facing::Left,
        8.0,
        12,
        400.0,
        false,
    )];
    let mut cues: Vec<CombatCue> = Vec::new();

    resolve_projectiles(&mut player, &mut [], &mut projectiles, &world, &mut cues);

    assert_eq!(player.actor.health.current, 108);
    assert_eq!(player.actor.invincibility, 60);
    assert!(!projectiles[0].is_active());
    assert_eq!(
        cues,
        vec![CombatCue::PlayerDamaged {
            amount: 12,
            remaining: 108
        }]
    );
}

#[test]
fn test_opponent_melee_hits_player_and_respects_invincibility() {
    let (mut player, world) = setup();
    let mut opponents = vec![thug(0, 260.0), thug(1, 260.0)];
    for opponent in &mut opponents {
        opponent.actor.facing = Facing::Left;
        assert!(opponent.actor.start_attack(AttackKind::Punch, 15, 45));
    }
    let mut cues: Vec<CombatCue> = Vec::new();

    resolve_opponent_melee(&mut player, &mut opponents, &world, &mut cues);

    // Второй удар того же тика гасится неуязвимостью
    assert_eq!(player.actor.health.current, 110);
    assert_eq!(player.actor.body.velocity.x, -5.0);
    assert_eq!(cues.len(), 1);
}

#[test]
fn test_dead_player_is_not_a_target() {
    let (mut player, world) = setup();
    player.actor.die();
    let mut opponents = vec![thug(0, 260.0)];
    opponents[0].actor.facing = Facing::Left;
    assert!(opponents[0].actor.start_attack(AttackKind::Punch, 15, 45));
    let mut projectiles = vec![Projectile::new(
        Vec2::new(225.0, 500.0),
        Facing::Left,
        8.0,
        12,
        400.0,
        false,
    )];
    let mut cues: Vec<CombatCue> = Vec::new();

    resolve_collisions(&mut player, &mut opponents, &mut projectiles, &world, &mut cues);

    assert!(cues.is_empty());
    assert!(projectiles[0].is_active());
}

#[test]
fn test_projectile_and_swing_in_same_tick_both_count() {
    let (mut player, world) = setup();
    let mut opponents = vec![thug(0, 260.0)];
    let mut projectiles = vec![Projectile::new(
        Vec2::new(285.0, 500.0),
        Facing::Right,
        18.0,
        20,
        600.0,
        true,
    )];
    let mut cues: Vec<CombatCue> = Vec::new();

    swing(&mut player, &world);
    resolve_collisions(&mut player, &mut opponents, &mut projectiles, &world, &mut cues);

    // Удар гасится неуязвимостью после снаряда, но в комбо засчитан
    assert_eq!(opponents[0].actor.health.current, 40);
    assert_eq!(player.combo.count(), 2);
    assert_eq!(cues.len(), 1);
}
