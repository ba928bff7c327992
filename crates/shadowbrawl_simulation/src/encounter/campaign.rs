//! Кампания: последовательность уровней поверх Encounter.
//!
//! Intro (заставка) → Playing ⇄ Paused → следующий уровень / Victory / Defeat.
//! Очки (и жизни в Shadows) переносятся между уровнями; seed уровня
//! выводится из seed кампании, так что прогон воспроизводим целиком.

use crate::ai::ArchetypeRegistry;
use crate::components::PlayerActor;
use crate::config::{ConfigError, PlayerTuning, Variant, WorldConfig};
use crate::logger;

use super::events::CueQueue;
use super::intent::PlayerIntents;
use super::stage::{stages_for, validate_stages, StageConfig, StageLayout};
use super::{Encounter, EncounterStatus};

/// Фаза кампании
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignPhase {
    /// Заставка уровня, симуляция стоит
    Intro { remaining: u32 },
    Playing,
    Paused,
    Victory,
    Defeat,
}

impl CampaignPhase {
    pub fn is_finished(self) -> bool {
        matches!(self, CampaignPhase::Victory | CampaignPhase::Defeat)
    }
}

/// Что игрок уносит на следующий уровень
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerCarry {
    pub score: u64,
    /// None — начальные жизни из tuning
    pub lives: Option<u32>,
}

/// Seed уровня из seed кампании
pub fn stage_seed(seed: u64, stage: usize) -> u64 {
    seed ^ (stage as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

pub struct Campaign {
    variant: Variant,
    world: WorldConfig,
    tuning: PlayerTuning,
    layout: StageLayout,
    registry: ArchetypeRegistry,
    stages: Vec<StageConfig>,
    seed: u64,
    stage_index: usize,
    phase: CampaignPhase,
    encounter: Encounter,
    cues: CueQueue,
}

impl Campaign {
    /// Встроенные таблицы варианта
    pub fn new(variant: Variant, seed: u64) -> Result<Self, ConfigError> {
        Self::with_tables(
            variant,
            ArchetypeRegistry::for_variant(variant),
            stages_for(variant),
            seed,
        )
    }

    /// Кастомные таблицы (проверяются целиком до первого уровня)
    pub fn with_tables(
        variant: Variant,
        registry: ArchetypeRegistry,
        stages: Vec<StageConfig>,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        registry.validate()?;
        validate_stages(&stages, &registry)?;

        let world = variant.world();
        let tuning = variant.player_tuning();
        let layout = StageLayout::for_variant(variant);
        let cues = CueQueue::new();
        let encounter = build_stage(
            0,
            &stages[0],
            &registry,
            &layout,
            &world,
            &tuning,
            PlayerCarry::default(),
            seed,
            &cues,
        )?;

        logger::log_info(&format!(
            "Campaign started: {:?}, {} stages, seed {}",
            variant,
            stages.len(),
            seed
        ));

        Ok(Self {
            variant,
            phase: CampaignPhase::Intro {
                remaining: world.stage_intro_ticks,
            },
            world,
            tuning,
            layout,
            registry,
            stages,
            seed,
            stage_index: 0,
            encounter,
            cues,
        })
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn phase(&self) -> CampaignPhase {
        self.phase
    }

    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    pub fn current_stage(&self) -> &StageConfig {
        &self.stages[self.stage_index]
    }

    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    pub fn encounter_mut(&mut self) -> &mut Encounter {
        &mut self.encounter
    }

    /// Очередь сигналов (хост сливает после каждого тика)
    pub fn cues(&self) -> &CueQueue {
        &self.cues
    }

    /// Один тик кампании
    pub fn advance(&mut self, intents: &PlayerIntents) -> CampaignPhase {
        match self.phase {
            CampaignPhase::Intro { remaining } => {
                let remaining = remaining.saturating_sub(1);
                self.phase = if remaining == 0 {
                    CampaignPhase::Playing
                } else {
                    CampaignPhase::Intro { remaining }
                };
            }
            CampaignPhase::Paused => {
                if intents.pause {
                    self.phase = CampaignPhase::Playing;
                }
            }
            CampaignPhase::Playing => {
                if intents.pause {
                    self.phase = CampaignPhase::Paused;
                } else {
                    self.play(intents);
                }
            }
            CampaignPhase::Victory | CampaignPhase::Defeat => {}
        }
        self.phase
    }

    fn play(&mut self, intents: &PlayerIntents) {
        match self.encounter.tick(intents) {
            EncounterStatus::InProgress => {}
            EncounterStatus::PlayerDefeated => {
                logger::log_info(&format!(
                    "Campaign lost on stage {} (score {})",
                    self.stage_index + 1,
                    self.encounter.player().score
                ));
                self.phase = CampaignPhase::Defeat;
            }
            EncounterStatus::Cleared => self.next_stage(),
        }
    }

    fn next_stage(&mut self) {
        let player = self.encounter.player();
        let carry = PlayerCarry {
            score: player.score,
            lives: player.lives,
        };

        let next = self.stage_index + 1;
        if next >= self.stages.len() {
            logger::log_info(&format!("Campaign won (score {})", carry.score));
            self.phase = CampaignPhase::Victory;
            return;
        }

        match self.build(next, carry) {
            Ok(encounter) => {
                self.encounter = encounter;
                self.stage_index = next;
                self.phase = CampaignPhase::Intro {
                    remaining: self.world.stage_intro_ticks,
                };
            }
            Err(err) => {
                logger::log_error(&format!("Failed to build stage {}: {}", next + 1, err));
                self.phase = CampaignPhase::Defeat;
            }
        }
    }

    /// Заново с первого уровня (очки и жизни сброшены)
    pub fn restart(&mut self) -> Result<(), ConfigError> {
        self.encounter = self.build(0, PlayerCarry::default())?;
        self.stage_index = 0;
        self.phase = CampaignPhase::Intro {
            remaining: self.world.stage_intro_ticks,
        };
        logger::log_info("Campaign restarted");
        Ok(())
    }

    fn build(&self, index: usize, carry: PlayerCarry) -> Result<Encounter, ConfigError> {
        build_stage(
            index,
            &self.stages[index],
            &self.registry,
            &self.layout,
            &self.world,
            &self.tuning,
            carry,
            self.seed,
            &self.cues,
        )
    }
}

#[allow(clippy::too_many_arguments)]
fn build_stage(
    index: usize,
    stage: &StageConfig,
    registry: &ArchetypeRegistry,
    layout: &StageLayout,
    world: &WorldConfig,
    tuning: &PlayerTuning,
    carry: PlayerCarry,
    seed: u64,
    cues: &CueQueue,
) -> Result<Encounter, ConfigError> {
    let mut player = PlayerActor::new(tuning.clone(), world);
    player.score = carry.score;
    if carry.lives.is_some() {
        player.lives = carry.lives;
    }

    Encounter::from_stage(
        index,
        stage,
        registry,
        layout,
        world.clone(),
        player,
        stage_seed(seed, index),
        Box::new(cues.clone()),
    )
}
