//! Encounter: один уровень (игрок, противники, снаряды, аптечки, камера).
//!
//! Порядок тика — контракт:
//! 1. игрок: намерения → таймеры → интеграция
//! 2. камера, проверка подхода к боссу
//! 3. противники (стабильный порядок списка)
//! 4. снаряды (полёт)
//! 5. столкновения (снаряды → удар игрока → удары противников)
//! 6. чистка неактивных снарядов
//! 7. аптечки
//! 8. терминальные проверки: смерти противников (очки, дроп), затем игрок
//!
//! Encounter ничего не знает о хосте: сигналы уходят в внедрённый `CueSink`,
//! случайность — из собственного seeded RNG.

pub mod campaign;
pub mod events;
pub mod intent;
pub mod pickup;
pub mod plugin;
pub mod snapshot;
pub mod stage;

#[cfg(test)]
mod encounter_tests;

use std::sync::Arc;

use bevy::math::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::ai::{update_opponent, Archetype, ArchetypeRegistry};
use crate::combat::hitbox::overlaps;
use crate::combat::{resolve_collisions, Projectile};
use crate::components::{ActorId, Opponent, OpponentId, PlayerActor};
use crate::config::{ConfigError, WorldConfig};
use crate::logger;

pub use campaign::{Campaign, CampaignPhase};
pub use events::{CombatCue, CueQueue, CueSink, NullSink};
pub use intent::PlayerIntents;
pub use pickup::HealthPickup;
pub use plugin::{ActiveCampaign, EncounterPlugin};
pub use snapshot::EncounterSnapshot;
pub use stage::{plan_spawns, stages_for, validate_stages, StageConfig, StageLayout};

/// Итог encounter'а (опрашивается после каждого тика)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EncounterStatus {
    InProgress,
    /// Босс повержен
    Cleared,
    /// Игрок мёртв и жизней не осталось
    PlayerDefeated,
}

pub struct Encounter {
    stage: usize,
    stage_name: String,
    world: WorldConfig,
    player: PlayerActor,
    opponents: Vec<Opponent>,
    projectiles: Vec<Projectile>,
    pickups: Vec<HealthPickup>,
    scroll_offset: f32,
    boss: Option<OpponentId>,
    boss_engaged: bool,
    status: EncounterStatus,
    tick: u64,
    next_id: u32,
    rng: ChaCha8Rng,
    cues: Box<dyn CueSink>,
}

impl Encounter {
    /// Пустая арена (противники добавляются через `spawn_opponent`)
    pub fn empty(
        world: WorldConfig,
        player: PlayerActor,
        seed: u64,
        cues: Box<dyn CueSink>,
    ) -> Self {
        Self {
            stage: 0,
            stage_name: String::new(),
            world,
            player,
            opponents: Vec::new(),
            projectiles: Vec::new(),
            pickups: Vec::new(),
            scroll_offset: 0.0,
            boss: None,
            boss_engaged: false,
            status: EncounterStatus::InProgress,
            tick: 0,
            next_id: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            cues,
        }
    }

    /// Уровень из таблицы: расстановка противников из RNG encounter'а
    pub fn from_stage(
        index: usize,
        stage: &StageConfig,
        registry: &ArchetypeRegistry,
        layout: &StageLayout,
        world: WorldConfig,
        player: PlayerActor,
        seed: u64,
        cues: Box<dyn CueSink>,
    ) -> Result<Self, ConfigError> {
        stage.validate(registry)?;

        let mut encounter = Self::empty(world, player, seed, cues);
        encounter.stage = index;
        encounter.stage_name = stage.name.clone();

        let spawns = plan_spawns(stage, registry, &encounter.world, layout, &mut encounter.rng)?;
        for spawn in spawns {
            encounter.spawn_opponent(spawn.archetype, spawn.position);
        }

        logger::log_info(&format!(
            "Stage {} '{}' started: {} opponents (seed {})",
            index + 1,
            stage.name,
            encounter.opponents.len(),
            seed
        ));
        Ok(encounter)
    }

    /// Добавить противника в конец порядка обновления. Первый босс становится
    /// целью уровня.
    pub fn spawn_opponent(&mut self, archetype: Arc<Archetype>, position: Vec2) -> OpponentId {
        let id = OpponentId(self.next_id);
        self.next_id += 1;

        if archetype.is_boss() && self.boss.is_none() {
            self.boss = Some(id);
        }
        self.opponents.push(Opponent::spawn(id, archetype, position));
        id
    }

    pub fn stage(&self) -> usize {
        self.stage
    }

    pub fn stage_name(&self) -> &str {
        &self.stage_name
    }

    pub fn world(&self) -> &WorldConfig {
        &self.world
    }

    pub fn player(&self) -> &PlayerActor {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut PlayerActor {
        &mut self.player
    }

    pub fn opponents(&self) -> &[Opponent] {
        &self.opponents
    }

    pub fn opponents_mut(&mut self) -> &mut [Opponent] {
        &mut self.opponents
    }

    pub fn opponent(&self, id: OpponentId) -> Option<&Opponent> {
        self.opponents.iter().find(|opponent| opponent.id == id)
    }

    pub fn opponent_mut(&mut self, id: OpponentId) -> Option<&mut Opponent> {
        self.opponents.iter_mut().find(|opponent| opponent.id == id)
    }

    pub fn boss_id(&self) -> Option<OpponentId> {
        self.boss
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn pickups(&self) -> &[HealthPickup] {
        &self.pickups
    }

    pub fn add_pickup(&mut self, pickup: HealthPickup) {
        self.pickups.push(pickup);
    }

    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn status(&self) -> EncounterStatus {
        self.status
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Один тик симуляции. После терминального статуса — no-op.
    pub fn tick(&mut self, intents: &PlayerIntents) -> EncounterStatus {
        if self.status != EncounterStatus::InProgress {
            return self.status;
        }

        self.update_player(intents);
        self.update_camera();
        self.check_boss_engaged();

        for opponent in &mut self.opponents {
            let projectile = update_opponent(
                opponent,
                &self.player,
                &self.world,
                self.tick,
                &mut self.rng,
                self.cues.as_mut(),
            );
            if let Some(projectile) = projectile {
                self.projectiles.push(projectile);
            }
        }

        for projectile in &mut self.projectiles {
            projectile.advance(self.world.projectile_spin_per_tick);
        }

        resolve_collisions(
            &mut self.player,
            &mut self.opponents,
            &mut self.projectiles,
            &self.world,
            self.cues.as_mut(),
        );
        self.projectiles.retain(Projectile::is_active);

        self.update_pickups();
        self.resolve_terminal();

        self.tick += 1;
        self.status
    }

    fn update_player(&mut self, intents: &PlayerIntents) {
        if let Some(projectile) = self.player.apply_intents(intents) {
            self.cues.notify(CombatCue::ProjectileThrown {
                owner: ActorId::Player,
            });
            self.projectiles.push(projectile);
        }

        let attacks = &self.player.actor.attacks;
        if let Some(kind) = attacks.active() {
            // До тика таймеров: timer == duration только у только что начатой атаки
            if attacks.timer() == attacks.duration() {
                self.cues.notify(CombatCue::AttackIssued {
                    actor: ActorId::Player,
                    kind,
                });
            }
        }

        self.player.update(&self.world);
    }

    /// Камера догоняет точку player.x - scroll_threshold
    fn update_camera(&mut self) {
        let max_offset = (self.world.level_width - self.world.viewport_width).max(0.0);
        let target = (self.player.actor.body.position.x - self.world.scroll_threshold)
            .clamp(0.0, max_offset);
        self.scroll_offset += (target - self.scroll_offset) * self.world.scroll_smoothing;
    }

    fn check_boss_engaged(&mut self) {
        if self.boss_engaged || !self.player.is_alive() {
            return;
        }
        let Some(boss_id) = self.boss else {
            return;
        };
        let Some(boss) = self.opponents.iter().find(|opponent| opponent.id == boss_id) else {
            return;
        };

        let distance = (self.player.actor.body.position.x - boss.actor.body.position.x).abs();
        if boss.is_alive() && distance < self.world.boss_approach_distance {
            self.boss_engaged = true;
            logger::log_info(&format!("{} engaged", boss.archetype.name));
            self.cues.notify(CombatCue::BossEngaged { boss: boss_id });
        }
    }

    fn update_pickups(&mut self) {
        let player = &mut self.player;
        let cues = &mut self.cues;
        let player_rect = player.actor.body.rect();

        self.pickups.retain_mut(|pickup| {
            if !pickup.tick() {
                return false;
            }
            if !player.is_alive() || !overlaps(pickup.rect(), player_rect) {
                return true;
            }

            let healed = player.heal(pickup.heal);
            cues.notify(CombatCue::PickupCollected { healed });
            false
        });
    }

    fn resolve_terminal(&mut self) {
        let mut cleared = false;
        let mut index = 0;
        while index < self.opponents.len() {
            if self.opponents[index].is_alive() {
                index += 1;
                continue;
            }
            let defeated = self.opponents.remove(index);
            cleared |= self.on_opponent_defeated(defeated);
        }

        if self.boss.is_none() && cleared {
            cleared = self.opponents.is_empty();
        }

        if self.player.actor.is_dead() && !self.handle_player_death() {
            self.status = EncounterStatus::PlayerDefeated;
            logger::log_info(&format!(
                "Player defeated on stage {} (score {})",
                self.stage + 1,
                self.player.score
            ));
            return;
        }

        if cleared {
            self.status = EncounterStatus::Cleared;
            logger::log_info(&format!(
                "Stage {} '{}' cleared (score {})",
                self.stage + 1,
                self.stage_name,
                self.player.score
            ));
            self.cues.notify(CombatCue::StageCleared { stage: self.stage });
        }
    }

    /// Очки, дроп аптечки. true — смерть завершает уровень.
    fn on_opponent_defeated(&mut self, opponent: Opponent) -> bool {
        let archetype = &opponent.archetype;
        self.player.score += archetype.score_value;
        self.cues.notify(CombatCue::ActorDied {
            actor: ActorId::Opponent(opponent.id),
        });
        logger::log(&format!(
            "{} ({:?}) defeated, +{} score",
            archetype.name, opponent.id, archetype.score_value
        ));

        if archetype.drop_chance > 0.0 && self.rng.gen::<f32>() < archetype.drop_chance {
            let center_x = opponent.actor.body.center().x;
            let pickup =
                HealthPickup::dropped_at(center_x, self.world.ground_level, &self.world.pickup);
            self.pickups.push(pickup);
        }

        match self.boss {
            Some(boss) => boss == opponent.id,
            // Арена без босса: завершает смерть последнего
            None => true,
        }
    }

    /// Респаун, если остались жизни. false — поражение.
    fn handle_player_death(&mut self) -> bool {
        self.cues.notify(CombatCue::ActorDied {
            actor: ActorId::Player,
        });

        if !self.player.try_respawn() {
            return false;
        }

        let lives_left = self.player.lives.unwrap_or(0);
        logger::log_info(&format!("Player respawned, {} lives left", lives_left));
        self.cues.notify(CombatCue::PlayerRespawned { lives_left });
        true
    }

    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot {
            stage: self.stage,
            stage_name: self.stage_name.clone(),
            tick: self.tick,
            status: self.status,
            scroll_offset: self.scroll_offset,
            player: (&self.player).into(),
            opponents: self.opponents.iter().map(Into::into).collect(),
            projectiles: self.projectiles.iter().map(Into::into).collect(),
            pickups: self.pickups.iter().map(Into::into).collect(),
        }
    }
}
