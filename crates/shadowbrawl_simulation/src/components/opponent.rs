//! Противник: боец + ссылка на архетип + мозг + эскалация экземпляра.

use std::sync::Arc;

use bevy::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

use super::actor::{Actor, CombatState};
use crate::ai::archetype::{Archetype, PhaseStep};
use crate::ai::components::Brain;
use crate::combat::damage::{apply_hit, DamageOutcome, HitResponse};
use crate::combat::hitbox::melee_rect;
use crate::combat::AttackKind;
use crate::config::WorldConfig;

/// Стабильный ID противника внутри encounter'а (порядок спавна)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OpponentId(pub u32);

/// Рантайм-модификаторы экземпляра (фазы босса).
///
/// Архетип не трогаем: два экземпляра одного архетипа эскалируют независимо.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Escalation {
    /// Начинается с 1, только растёт
    pub phase: u32,
    pub damage_multiplier: f32,
    pub speed_multiplier: f32,
    pub counter_unlocked: bool,
    pub venom_active: bool,
}

impl Default for Escalation {
    fn default() -> Self {
        Self {
            phase: 1,
            damage_multiplier: 1.0,
            speed_multiplier: 1.0,
            counter_unlocked: false,
            venom_active: false,
        }
    }
}

impl Escalation {
    pub fn advance(&mut self, step: &PhaseStep) {
        self.phase += 1;
        self.damage_multiplier *= step.damage_multiplier;
        self.speed_multiplier *= step.speed_multiplier;
        self.counter_unlocked |= step.unlock_counter;
        self.venom_active |= step.unlock_venom;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Opponent {
    pub id: OpponentId,
    pub actor: Actor,
    pub archetype: Arc<Archetype>,
    /// Якорь патруля
    pub spawn_x: f32,
    pub brain: Brain,
    pub escalation: Escalation,
    /// Текущая агрессия (политики её переключают)
    pub aggression: f32,
}

impl Opponent {
    pub fn spawn(id: OpponentId, archetype: Arc<Archetype>, position: Vec2) -> Self {
        let actor = Actor::new(
            position,
            archetype.width,
            archetype.height,
            archetype.max_health,
        );

        Self {
            id,
            actor,
            spawn_x: position.x,
            brain: Brain::default(),
            escalation: Escalation::default(),
            aggression: archetype.aggression,
            archetype,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.archetype.is_boss()
    }

    pub fn is_alive(&self) -> bool {
        self.actor.is_alive()
    }

    pub fn is_blocking(&self) -> bool {
        self.actor.is_alive() && self.archetype.can_block() && self.brain.block_timer > 0
    }

    pub fn effective_speed(&self) -> f32 {
        self.archetype.speed * self.escalation.speed_multiplier
    }

    pub fn counter_enabled(&self) -> bool {
        self.archetype.can_counter || self.escalation.counter_unlocked
    }

    /// Урон активного удара (Special → special_damage, с множителем фазы)
    pub fn melee_damage(&self) -> u32 {
        let base = match self.actor.attacks.active() {
            Some(AttackKind::Special) => self
                .archetype
                .special_damage
                .unwrap_or(self.archetype.damage),
            _ => self.archetype.damage,
        };
        (base as f32 * self.escalation.damage_multiplier).floor() as u32
    }

    /// Хитбокс удара (только в активной части анимации)
    pub fn attack_rect(&self) -> Option<Rect> {
        if !self.actor.attacks.hitbox_live(&self.archetype.melee_window) {
            return None;
        }

        Some(melee_rect(
            &self.actor.body,
            self.actor.facing,
            self.archetype.attack_range,
            self.archetype.hitbox_inset,
        ))
    }

    /// Урон по противнику: блок делит урон, короткая неуязвимость
    pub fn take_damage(
        &mut self,
        amount: u32,
        knockback_dir: f32,
        world: &WorldConfig,
    ) -> DamageOutcome {
        let block_divisor = if self.is_blocking() {
            self.archetype.block.map(|block| block.divisor)
        } else {
            None
        };

        let response = HitResponse {
            knockback_speed: world.knockback_speed,
            invincibility: world.opponent_hit_invincibility,
            block_divisor,
        };

        let outcome = apply_hit(&mut self.actor, amount, knockback_dir, &response);
        if outcome.killed() {
            self.brain.block_timer = 0;
        }
        outcome
    }

    /// Выставить Blocking поверх локомоции
    pub fn refresh_block_state(&mut self) {
        if self.is_blocking()
            && matches!(
                self.actor.state,
                CombatState::Idle | CombatState::Running | CombatState::Hit
            )
        {
            self.actor.state = CombatState::Blocking;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::archetype::ArchetypeRegistry;

    fn spawn(key: &str) -> Opponent {
        let registry = ArchetypeRegistry::shadows();
        let archetype = registry.get(key).expect("archetype exists");
        Opponent::spawn(OpponentId(1), archetype, Vec2::new(500.0, 400.0))
    }

    #[test]
    fn test_blocking_divides_damage() {
        let world = WorldConfig::default();
        let mut croc = spawn("croc");
        croc.brain.block_timer = 30;
        assert!(croc.is_blocking());

        let outcome = croc.take_damage(30, 1.0, &world);
        assert_eq!(
            outcome,
            DamageOutcome::Applied {
                dealt: 10,
                blocked: true,
                killed: false
            }
        );
        assert_eq!(croc.actor.health.current, 890);
    }

    #[test]
    fn test_non_blocker_takes_full_damage() {
        let world = WorldConfig::default();
        let mut joker = spawn("joker");
        joker.brain.block_timer = 30; // Не умеет блокировать — таймер игнорируется
        assert!(!joker.is_blocking());

        joker.take_damage(30, 1.0, &world);
        assert_eq!(joker.actor.health.current, 520);
    }

    #[test]
    fn test_escalation_scales_instance_damage() {
        let mut bane = spawn("bane");
        bane.actor.attacks.force_start(AttackKind::Punch, 15);
        assert_eq!(bane.melee_damage(), 50);

        bane.escalation.advance(&PhaseStep {
            below_fraction: 0.5,
            damage_multiplier: 1.5,
            speed_multiplier: 1.3,
            unlock_counter: false,
            unlock_venom: true,
        });
        assert_eq!(bane.melee_damage(), 75);
        assert_eq!(bane.archetype.damage, 50);

        bane.actor.attacks.force_start(AttackKind::Special, 15);
        assert_eq!(bane.melee_damage(), 105);
    }
}
