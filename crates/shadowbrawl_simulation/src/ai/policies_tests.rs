//! Tests for archetype policies.

use std::sync::Arc;

use bevy::math::Vec2;
use rand::rngs::mock::StepRng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::components::AiState;
use super::policies::{after_behavior, before_behavior, check_escalation};
use super::simple_fsm::Perception;
use super::systems::update_opponent;
use super::ArchetypeRegistry;
use crate::combat::AttackKind;
use crate::components::{Opponent, OpponentId, PlayerActor};
use crate::config::Variant;
use crate::encounter::events::CombatCue;

fn villain(key: &str) -> Opponent {
    let archetype = ArchetypeRegistry::shadows().get(key).expect("villain exists");
    Opponent::spawn(OpponentId(0), archetype, Vec2::new(1000.0, 400.0))
}

fn seeing(dx: f32) -> Perception {
    Perception {
        dx,
        distance: dx.abs(),
        player_alive: true,
        player_attacking: false,
        player_attack_timer: 0,
        grounded: true,
        tick: 0,
    }
}

#[test]
fn test_escalation_happens_once_per_instance() {
    let mut bane = villain("bane");
    let fresh = villain("bane");

    bane.actor.health.current = 499;
    assert_eq!(check_escalation(&mut bane), Some(2));
    assert_eq!(check_escalation(&mut bane), None);

    assert_eq!(bane.escalation.damage_multiplier, 1.5);
    assert!(bane.escalation.venom_active);
    assert!((bane.effective_speed() - 3.25).abs() < 1e-4);
    assert_eq!(bane.melee_damage(), 75);

    // Архетип общий, эскалация — нет
    assert_eq!(fresh.escalation.phase, 1);
    assert_eq!(fresh.melee_damage(), 50);
    assert_eq!(fresh.archetype.damage, 50);
}

#[test]
fn test_escalation_advances_one_step_per_tick() {
    let mut deathstroke = villain("deathstroke");
    deathstroke.actor.health.current = 100;

    assert_eq!(check_escalation(&mut deathstroke), Some(2));
    assert!(!deathstroke.counter_enabled());

    assert_eq!(check_escalation(&mut deathstroke), Some(3));
    assert!(deathstroke.counter_enabled());
    assert_eq!(check_escalation(&mut deathstroke), None);
}

#[test]
fn test_counter_only_after_unlock() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut perception = seeing(60.0);
    perception.player_attacking = true;
    perception.player_attack_timer = 10;

    let mut locked = villain("deathstroke");
    for _ in 0..200 {
        before_behavior(&mut locked, &perception, &mut rng);
    }
    assert_eq!(locked.actor.attacks.active(), None);

    let mut unlocked = villain("deathstroke");
    unlocked.escalation.counter_unlocked = true;
    let countered = (0..200).any(|_| {
        before_behavior(&mut unlocked, &perception, &mut rng);
        unlocked.actor.attacks.active() == Some(AttackKind::Special)
    });
    assert!(countered);
    assert_eq!(unlocked.actor.attacks.timer(), 15);
}

#[test]
fn test_counter_ignores_late_player_swing() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut deathstroke = villain("deathstroke");
    deathstroke.escalation.counter_unlocked = true;

    let mut perception = seeing(60.0);
    perception.player_attacking = true;
    perception.player_attack_timer = 5;

    for _ in 0..200 {
        before_behavior(&mut deathstroke, &perception, &mut rng);
    }
    assert_eq!(deathstroke.actor.attacks.active(), None);
}

#[test]
fn test_kiting_retreats_and_fires() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut penguin = villain("penguin");

    let close = before_behavior(&mut penguin, &seeing(120.0), &mut rng);
    assert_eq!(penguin.brain.state, AiState::Retreat);
    assert!(close.skip_behavior);
    let volley = close.projectile.expect("volley in band");
    assert_eq!(volley.damage, 20);
    assert_eq!(volley.velocity.x.abs(), 14.0);
    assert_eq!(penguin.actor.attacks.cooldown(AttackKind::Ranged), 50);

    // На cooldown'е — общая FSM работает как обычно
    let again = before_behavior(&mut penguin, &seeing(350.0), &mut rng);
    assert_eq!(penguin.brain.state, AiState::Attack);
    assert!(!again.skip_behavior);
    assert!(again.projectile.is_none());
}

#[test]
fn test_kiting_holds_fire_outside_band() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut penguin = villain("penguin");

    let outcome = before_behavior(&mut penguin, &seeing(90.0), &mut rng);
    assert_eq!(penguin.brain.state, AiState::Retreat);
    assert!(outcome.projectile.is_none());
}

#[test]
fn test_toxin_volley_within_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut scarecrow = villain("scarecrow");

    assert!(before_behavior(&mut scarecrow, &seeing(450.0), &mut rng)
        .projectile
        .is_none());

    let outcome = before_behavior(&mut scarecrow, &seeing(-200.0), &mut rng);
    let toxin = outcome.projectile.expect("toxin in range");
    assert_eq!(toxin.damage, 12);
    assert_eq!(toxin.max_distance, 400.0);
    assert_eq!(scarecrow.actor.attacks.cooldown(AttackKind::Ranged), 70);
}

#[test]
fn test_alternating_disposition_switches_on_period() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut twoface = villain("twoface");

    for _ in 0..179 {
        before_behavior(&mut twoface, &seeing(800.0), &mut rng);
    }
    assert_eq!(twoface.aggression, 0.6);

    before_behavior(&mut twoface, &seeing(800.0), &mut rng);
    assert!(twoface.aggression == 0.9 || twoface.aggression == 0.3);
    assert_eq!(twoface.brain.disposition_timer, 0);
}

#[test]
fn test_grab_at_close_range() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut croc = villain("croc");

    before_behavior(&mut croc, &seeing(70.0), &mut rng);

    assert_eq!(croc.brain.state, AiState::Attack);
    assert_eq!(croc.aggression, 0.95);
    assert_eq!(croc.actor.attacks.active(), Some(AttackKind::Special));
    assert_eq!(croc.actor.attacks.cooldown(AttackKind::Special), 120);
    assert_eq!(croc.melee_damage(), 60);
}

#[test]
fn test_venom_leap_needs_venom_phase() {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let perception = seeing(200.0);

    let mut calm = villain("bane");
    for _ in 0..500 {
        after_behavior(&mut calm, &perception, &mut rng);
    }
    assert_eq!(calm.actor.body.velocity.y, 0.0);

    let mut enraged = villain("bane");
    enraged.actor.health.current = 400;
    check_escalation(&mut enraged);
    let leaped = (0..1000).any(|_| {
        after_behavior(&mut enraged, &perception, &mut rng);
        enraged.actor.body.velocity.y == -20.0
    });
    assert!(leaped);
    assert!((enraged.actor.body.velocity.x - 6.5).abs() < 1e-4);
}

#[test]
fn test_update_emits_phase_cue_once() {
    let world = Variant::Shadows.world();
    let player = PlayerActor::new(Variant::Shadows.player_tuning(), &world);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut bane = villain("bane");
    bane.actor.health.current = 400;
    let mut cues: Vec<CombatCue> = Vec::new();

    for tick in 0..3 {
        update_opponent(&mut bane, &player, &world, tick, &mut rng, &mut cues);
    }

    let escalations: Vec<_> = cues
        .iter()
        .filter(|cue| matches!(cue, CombatCue::PhaseEscalated { .. }))
        .collect();
    assert_eq!(
        escalations,
        vec![&CombatCue::PhaseEscalated {
            opponent: OpponentId(0),
            phase: 2
        }]
    );
}

/// Первый бросок удачен, дальше все неудачны (шаг u32::MAX по младшим битам)
fn lucky_once() -> StepRng {
    StepRng::new(0, u64::from(u32::MAX))
}

#[test]
fn test_feint_reverses_only_on_period_tick() {
    let mut joker = villain("joker");
    joker.actor.body.velocity.x = 3.0;
    joker.brain.feint_timer = 58;

    after_behavior(&mut joker, &seeing(300.0), &mut StepRng::new(u64::MAX, 0));
    assert_eq!(joker.brain.feint_timer, 59);
    assert_eq!(joker.actor.body.velocity.x, 3.0);

    // Тик периода: разворот, таймер сброшен, рывок не выпал
    after_behavior(&mut joker, &seeing(300.0), &mut lucky_once());
    assert_eq!(joker.brain.feint_timer, 0);
    assert_eq!(joker.actor.body.velocity.x, -3.0);
}

#[test]
fn test_feint_picks_direction_when_standing() {
    let mut joker = villain("joker");
    joker.brain.feint_timer = 59;

    after_behavior(&mut joker, &seeing(300.0), &mut lucky_once());
    assert_eq!(joker.actor.body.velocity.x.abs(), joker.effective_speed());
}

#[test]
fn test_feint_dash_requires_dodge_capability() {
    let mut dodger = villain("joker");
    dodger.actor.body.velocity.x = 3.0;
    after_behavior(&mut dodger, &seeing(300.0), &mut StepRng::new(0, 0));
    assert_eq!(dodger.actor.body.velocity.x.abs(), dodger.effective_speed() * 2.0);

    let mut archetype = (*dodger.archetype).clone();
    archetype.can_dodge = false;
    let mut steady = Opponent::spawn(OpponentId(1), Arc::new(archetype), Vec2::new(1000.0, 400.0));
    steady.actor.body.velocity.x = 3.0;
    for _ in 0..30 {
        after_behavior(&mut steady, &seeing(300.0), &mut StepRng::new(0, 0));
    }
    assert_eq!(steady.actor.body.velocity.x, 3.0);
}

