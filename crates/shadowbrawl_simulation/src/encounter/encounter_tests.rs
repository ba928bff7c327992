//! Tests for encounter tick orchestration.

use std::sync::Arc;

use bevy::math::Vec2;

use super::{CombatCue, CueQueue, Encounter, EncounterStatus, HealthPickup, PlayerIntents};
use crate::ai::{Archetype, ArchetypeRegistry, Rank};
use crate::combat::AttackKind;
use crate::components::{ActorId, CombatState, OpponentId, PlayerActor};
use crate::config::{PickupTuning, Variant};

/// Неподвижный противник без блоков, дальних атак и политик
fn dummy(max_health: u32, rank: Rank) -> Arc<Archetype> {
    let template = ArchetypeRegistry::classic()
        .get("joker_thug")
        .expect("joker_thug exists");
    let mut archetype = (*template).clone();
    archetype.key = "dummy".to_string();
    archetype.name = "Dummy".to_string();
    archetype.rank = rank;
    archetype.max_health = max_health;
    archetype.damage = 20;
    archetype.speed = 0.0;
    archetype.aggression = 0.0;
    archetype.block = None;
    archetype.can_dodge = false;
    archetype.dodge = None;
    archetype.ranged = None;
    archetype.policies.clear();
    archetype.score_value = 250;
    archetype.drop_chance = 0.0;
    Arc::new(archetype)
}

fn arena(variant: Variant, player_x: f32) -> (Encounter, CueQueue) {
    let world = variant.world();
    let tuning = variant.player_tuning();
    let position = Vec2::new(player_x, world.ground_level - tuning.height as f32);
    let queue = CueQueue::new();
    let player = PlayerActor::at(position, tuning);
    let encounter = Encounter::empty(world, player, 17, Box::new(queue.clone()));
    (encounter, queue)
}

/// Противник рядом с игроком (классический рост 80), без ответных ударов
fn spawn_passive(encounter: &mut Encounter, archetype: Arc<Archetype>, x: f32) -> OpponentId {
    let y = encounter.world().ground_level - archetype.height as f32;
    let id = encounter.spawn_opponent(archetype, Vec2::new(x, y));
    let opponent = encounter.opponent_mut(id).expect("just spawned");
    opponent.actor.attacks.set_cooldown(AttackKind::Punch, u32::MAX);
    opponent.actor.attacks.set_cooldown(AttackKind::Kick, u32::MAX);
    id
}

fn run_idle(encounter: &mut Encounter, ticks: u32) {
    for _ in 0..ticks {
        encounter.tick(&PlayerIntents::idle());
    }
}

fn hits(cues: &[CombatCue]) -> Vec<u32> {
    cues.iter()
        .filter_map(|cue| match cue {
            CombatCue::HitLanded { damage, .. } => Some(*damage),
            _ => None,
        })
        .collect()
}

#[test]
fn test_three_punch_combo_credits_score_once() {
    let (mut encounter, queue) = arena(Variant::Classic, 200.0);
    let target = spawn_passive(&mut encounter, dummy(100, Rank::Henchman), 260.0);

    // Между ударами — дольше неуязвимости цели (30), короче окна комбо (100)
    for _ in 0..3 {
        encounter.tick(&PlayerIntents::idle().with_punch());
        run_idle(&mut encounter, 39);
    }

    let cues = queue.drain();
    assert_eq!(hits(&cues), vec![35, 40, 45]);
    assert!(encounter.opponent(target).is_none());
    assert_eq!(encounter.player().score, 250);
    assert_eq!(
        cues.iter()
            .filter(|cue| matches!(cue, CombatCue::ActorDied { .. }))
            .count(),
        1
    );
    // Арена без босса: последний противник завершает её
    assert_eq!(encounter.status(), EncounterStatus::Cleared);
}

#[test]
fn test_punch_emits_attack_cue_on_start_only() {
    let (mut encounter, queue) = arena(Variant::Classic, 200.0);

    encounter.tick(&PlayerIntents::idle().with_punch());
    run_idle(&mut encounter, 5);

    assert_eq!(
        queue.drain(),
        vec![CombatCue::AttackIssued {
            actor: ActorId::Player,
            kind: AttackKind::Punch
        }]
    );
}

#[test]
fn test_batarang_purged_after_range() {
    let (mut encounter, queue) = arena(Variant::Classic, 200.0);

    encounter.tick(&PlayerIntents::idle().with_throw());
    assert_eq!(encounter.projectiles().len(), 1);
    assert!(queue.drain().contains(&CombatCue::ProjectileThrown {
        owner: ActorId::Player
    }));

    // 33 × 18 = 594 ≤ 600
    run_idle(&mut encounter, 32);
    assert_eq!(encounter.projectiles().len(), 1);

    // 34 × 18 = 612 > 600
    run_idle(&mut encounter, 1);
    assert!(encounter.projectiles().is_empty());
}

#[test]
fn test_defeated_opponent_drops_pickup() {
    let (mut encounter, _queue) = arena(Variant::Classic, 200.0);
    let mut archetype = (*dummy(1, Rank::Henchman)).clone();
    archetype.drop_chance = 1.0;
    spawn_passive(&mut encounter, Arc::new(archetype), 260.0);

    encounter.tick(&PlayerIntents::idle().with_punch());
    encounter.tick(&PlayerIntents::idle());

    assert!(encounter.opponents().is_empty());
    let pickup = &encounter.pickups()[0];
    assert_eq!(pickup.heal, 20);
    assert_eq!(pickup.lifetime, 600);
    assert_eq!(pickup.position, Vec2::new(272.5, 525.0));
}

#[test]
fn test_pickup_heals_up_to_max() {
    let (mut encounter, queue) = arena(Variant::Classic, 200.0);
    let tuning = PickupTuning::default();
    encounter.player_mut().actor.health.current = 110;
    encounter.add_pickup(HealthPickup::dropped_at(225.0, 550.0, &tuning));

    encounter.tick(&PlayerIntents::idle());

    assert_eq!(encounter.player().actor.health.current, 120);
    assert!(encounter.pickups().is_empty());
    assert_eq!(queue.drain(), vec![CombatCue::PickupCollected { healed: 10 }]);
}

#[test]
fn test_pickup_expires() {
    let (mut encounter, _queue) = arena(Variant::Classic, 200.0);
    let tuning = PickupTuning {
        lifetime: 2,
        ..PickupTuning::default()
    };
    encounter.add_pickup(HealthPickup::dropped_at(1000.0, 550.0, &tuning));

    run_idle(&mut encounter, 1);
    assert_eq!(encounter.pickups().len(), 1);
    run_idle(&mut encounter, 1);
    assert!(encounter.pickups().is_empty());
}

#[test]
fn test_respawn_keeps_encounter_running() {
    let (mut encounter, queue) = arena(Variant::Shadows, 200.0);
    encounter.player_mut().actor.die();

    assert_eq!(encounter.tick(&PlayerIntents::idle()), EncounterStatus::InProgress);

    let player = encounter.player();
    assert_eq!(player.lives, Some(2));
    assert_eq!(player.actor.state, CombatState::Idle);
    assert_eq!(player.actor.health.current, 150);
    assert_eq!(player.actor.invincibility, 120);
    assert_eq!(player.actor.body.position, Vec2::new(200.0, 485.0));
    assert!(queue
        .drain()
        .contains(&CombatCue::PlayerRespawned { lives_left: 2 }));
}

#[test]
fn test_defeat_wins_over_clear_in_same_tick() {
    let (mut encounter, queue) = arena(Variant::Classic, 200.0);
    let boss = spawn_passive(&mut encounter, dummy(300, Rank::Boss), 600.0);
    encounter.opponent_mut(boss).expect("boss").actor.die();
    encounter.player_mut().actor.die();

    assert_eq!(encounter.tick(&PlayerIntents::idle()), EncounterStatus::PlayerDefeated);
    assert_eq!(encounter.player().score, 250);
    assert!(!queue
        .drain()
        .iter()
        .any(|cue| matches!(cue, CombatCue::StageCleared { .. })));

    // Терминальный статус замораживает encounter
    let ticks = encounter.tick_count();
    assert_eq!(encounter.tick(&PlayerIntents::idle()), EncounterStatus::PlayerDefeated);
    assert_eq!(encounter.tick_count(), ticks);
}

#[test]
fn test_boss_death_clears_even_with_henchmen_left() {
    let (mut encounter, queue) = arena(Variant::Classic, 200.0);
    spawn_passive(&mut encounter, dummy(100, Rank::Henchman), 3000.0);
    let boss = spawn_passive(&mut encounter, dummy(300, Rank::Boss), 4000.0);
    encounter.opponent_mut(boss).expect("boss").actor.die();

    assert_eq!(encounter.tick(&PlayerIntents::idle()), EncounterStatus::Cleared);
    assert_eq!(encounter.opponents().len(), 1);
    assert!(queue.drain().contains(&CombatCue::StageCleared { stage: 0 }));
}

#[test]
fn test_boss_engaged_once() {
    let (mut encounter, queue) = arena(Variant::Classic, 200.0);
    let boss = spawn_passive(&mut encounter, dummy(300, Rank::Boss), 500.0);

    run_idle(&mut encounter, 3);

    let engaged: Vec<_> = queue
        .drain()
        .into_iter()
        .filter(|cue| matches!(cue, CombatCue::BossEngaged { .. }))
        .collect();
    assert_eq!(engaged, vec![CombatCue::BossEngaged { boss }]);
}

#[test]
fn test_camera_eases_and_clamps() {
    let (mut encounter, _) = arena(Variant::Classic, 200.0);
    run_idle(&mut encounter, 1);
    assert_eq!(encounter.scroll_offset(), 0.0);

    let (mut encounter, _) = arena(Variant::Classic, 2000.0);
    run_idle(&mut encounter, 1);
    assert!((encounter.scroll_offset() - 160.0).abs() < 1e-3);
    run_idle(&mut encounter, 1);
    assert!((encounter.scroll_offset() - 304.0).abs() < 1e-3);
}

#[test]
fn test_snapshot_reflects_state() {
    let (mut encounter, _) = arena(Variant::Shadows, 200.0);
    spawn_passive(&mut encounter, dummy(100, Rank::Boss), 900.0);
    encounter.tick(&PlayerIntents::idle().with_throw());

    let snapshot = encounter.snapshot();
    assert_eq!(snapshot.tick, 1);
    assert_eq!(snapshot.status, EncounterStatus::InProgress);
    assert_eq!(snapshot.player.lives, Some(3));
    assert_eq!(snapshot.player.actor.attack, Some(AttackKind::Ranged));
    assert_eq!(snapshot.opponents.len(), 1);
    assert!(snapshot.opponents[0].boss);
    assert_eq!(snapshot.projectiles.len(), 1);
    assert!(snapshot.projectiles[0].owner_is_player);

    let text = ron::to_string(&snapshot).expect("snapshot serializes");
    assert!(text.contains("InProgress"));
}
