//! Таблицы уровней и расстановка противников.
//!
//! Classic: пять уровней, пул приспешников на уровень, босс в конце списка.
//! Shadows: семь территорий, приспешники территории, босс первым в списке.

use std::sync::Arc;

use bevy::math::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::ai::{Archetype, ArchetypeRegistry};
use crate::config::{ConfigError, Variant, WorldConfig};

/// Один уровень
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageConfig {
    pub name: String,
    /// Ключ архетипа босса
    pub boss: String,
    /// Пул ключей приспешников (выбор случайный на каждого)
    pub henchmen: Vec<String>,
    pub henchman_count: u32,
}

impl StageConfig {
    pub fn new(name: &str, boss: &str, henchmen: &[&str], henchman_count: u32) -> Self {
        Self {
            name: name.to_string(),
            boss: boss.to_string(),
            henchmen: henchmen.iter().map(|key| key.to_string()).collect(),
            henchman_count,
        }
    }

    pub fn validate(&self, registry: &ArchetypeRegistry) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidStage {
            stage: self.name.clone(),
            reason,
        };

        let boss = registry.get(&self.boss)?;
        if !boss.is_boss() {
            return Err(invalid(format!("'{}' is not a boss archetype", self.boss)));
        }
        if self.henchman_count > 0 && self.henchmen.is_empty() {
            return Err(invalid("henchman pool is empty".to_string()));
        }
        for key in &self.henchmen {
            registry.get(key)?;
        }
        Ok(())
    }
}

/// Таблица уровней варианта
pub fn stages_for(variant: Variant) -> Vec<StageConfig> {
    match variant {
        Variant::Classic => vec![
            StageConfig::new("ACE CHEMICALS", "joker", &["joker_thug"], 8),
            StageConfig::new("GOTHAM DOCKS", "bane", &["bane_mercenary"], 6),
            StageConfig::new("ARKHAM ASYLUM", "scarecrow", &["scarecrow_thug"], 10),
            StageConfig::new("OLD GOTHAM", "twoface", &["twoface_goon", "scarecrow_thug"], 8),
            StageConfig::new("MILITARY BASE", "deathstroke", &["deathstroke_soldier"], 12),
        ],
        Variant::Shadows => [
            ("THE COURTS", "twoface", 8),
            ("ACE CHEMICALS", "joker", 10),
            ("ICEBERG LOUNGE", "penguin", 10),
            ("ARKHAM ASYLUM", "scarecrow", 9),
            ("GOTHAM SEWERS", "croc", 6),
            ("SANTA PRISCA", "bane", 7),
            ("MILITIA HQ", "deathstroke", 12),
        ]
        .into_iter()
        .map(|(name, villain, count)| {
            let henchman = format!("{villain}_henchman");
            StageConfig::new(name, villain, &[henchman.as_str()], count)
        })
        .collect(),
    }
}

/// Проверка всей таблицы до старта кампании
pub fn validate_stages(
    stages: &[StageConfig],
    registry: &ArchetypeRegistry,
) -> Result<(), ConfigError> {
    if stages.is_empty() {
        return Err(ConfigError::NoStages);
    }
    stages.iter().try_for_each(|stage| stage.validate(registry))
}

/// Геометрия расстановки
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageLayout {
    /// x первого приспешника
    pub henchman_start: f32,
    /// spacing = (level_width - margin) / (count + 1)
    pub henchman_margin: f32,
    /// ±jitter по x
    pub jitter: i32,
    /// Босс на level_width - boss_offset
    pub boss_offset: f32,
    /// Босс первым в порядке обновления
    pub boss_first: bool,
}

impl StageLayout {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self {
                henchman_start: 400.0,
                henchman_margin: 500.0,
                jitter: 50,
                boss_offset: 300.0,
                boss_first: false,
            },
            Variant::Shadows => Self {
                henchman_start: 350.0,
                henchman_margin: 600.0,
                jitter: 40,
                boss_offset: 350.0,
                boss_first: true,
            },
        }
    }
}

/// Точка спавна одного противника
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnPoint {
    pub archetype: Arc<Archetype>,
    pub position: Vec2,
}

/// Расстановка уровня в порядке обновления
pub fn plan_spawns<R: Rng + ?Sized>(
    stage: &StageConfig,
    registry: &ArchetypeRegistry,
    world: &WorldConfig,
    layout: &StageLayout,
    rng: &mut R,
) -> Result<Vec<SpawnPoint>, ConfigError> {
    let count = stage.henchman_count;
    let spacing = ((world.level_width - layout.henchman_margin) / (count + 1) as f32).floor();

    let mut henchmen = Vec::with_capacity(count as usize);
    for i in 0..count {
        let key = &stage.henchmen[rng.gen_range(0..stage.henchmen.len())];
        let archetype = registry.get(key)?;
        let jitter = rng.gen_range(-layout.jitter..=layout.jitter) as f32;
        let x = layout.henchman_start + i as f32 * spacing + jitter;
        henchmen.push(grounded(archetype, x, world));
    }

    let boss = grounded(
        registry.get(&stage.boss)?,
        world.level_width - layout.boss_offset,
        world,
    );

    let mut spawns = Vec::with_capacity(henchmen.len() + 1);
    if layout.boss_first {
        spawns.push(boss);
        spawns.extend(henchmen);
    } else {
        spawns.extend(henchmen);
        spawns.push(boss);
    }
    Ok(spawns)
}

fn grounded(archetype: Arc<Archetype>, x: f32, world: &WorldConfig) -> SpawnPoint {
    let y = world.ground_level - archetype.height as f32 - archetype.spawn_lift;
    SpawnPoint {
        archetype,
        position: Vec2::new(x, y),
    }
}
