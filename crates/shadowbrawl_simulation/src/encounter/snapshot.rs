//! Read-only срез encounter'а для презентации и сравнения прогонов.

use serde::Serialize;

use super::pickup::HealthPickup;
use super::EncounterStatus;
use crate::ai::AiState;
use crate::combat::{AttackKind, Projectile};
use crate::components::{Actor, ActorId, CombatState, Facing, Opponent, PlayerActor};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub id: ActorId,
    /// Левый верхний угол
    pub position: [f32; 2],
    pub size: [u32; 2],
    pub facing: Facing,
    pub state: CombatState,
    pub attack: Option<AttackKind>,
    pub health: u32,
    pub max_health: u32,
    pub invincible: bool,
}

impl ActorView {
    fn of(id: ActorId, actor: &Actor) -> Self {
        let body = &actor.body;
        Self {
            id,
            position: body.position.to_array(),
            size: [body.width, body.height],
            facing: actor.facing,
            state: actor.state,
            attack: actor.attacks.active(),
            health: actor.health.current,
            max_health: actor.health.max,
            invincible: actor.invincibility > 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerView {
    pub actor: ActorView,
    pub score: u64,
    pub lives: Option<u32>,
    pub combo: u32,
    pub jumps_remaining: u32,
}

impl From<&PlayerActor> for PlayerView {
    fn from(player: &PlayerActor) -> Self {
        Self {
            actor: ActorView::of(ActorId::Player, &player.actor),
            score: player.score,
            lives: player.lives,
            combo: player.combo.count(),
            jumps_remaining: player.jumps_remaining,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpponentView {
    pub actor: ActorView,
    pub archetype: String,
    pub boss: bool,
    pub ai_state: AiState,
    pub phase: u32,
    pub blocking: bool,
}

impl From<&Opponent> for OpponentView {
    fn from(opponent: &Opponent) -> Self {
        Self {
            actor: ActorView::of(ActorId::Opponent(opponent.id), &opponent.actor),
            archetype: opponent.archetype.key.clone(),
            boss: opponent.is_boss(),
            ai_state: opponent.brain.state,
            phase: opponent.escalation.phase,
            blocking: opponent.is_blocking(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    /// Центр
    pub position: [f32; 2],
    pub spin: f32,
    pub owner_is_player: bool,
}

impl From<&Projectile> for ProjectileView {
    fn from(projectile: &Projectile) -> Self {
        Self {
            position: projectile.position.to_array(),
            spin: projectile.spin,
            owner_is_player: projectile.owner_is_player,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickupView {
    pub position: [f32; 2],
    pub heal: u32,
    pub lifetime: u32,
}

impl From<&HealthPickup> for PickupView {
    fn from(pickup: &HealthPickup) -> Self {
        Self {
            position: pickup.position.to_array(),
            heal: pickup.heal,
            lifetime: pickup.lifetime,
        }
    }
}

/// Полный срез одного тика
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EncounterSnapshot {
    pub stage: usize,
    pub stage_name: String,
    pub tick: u64,
    pub status: EncounterStatus,
    pub scroll_offset: f32,
    pub player: PlayerView,
    pub opponents: Vec<OpponentView>,
    pub projectiles: Vec<ProjectileView>,
    pub pickups: Vec<PickupView>,
}
