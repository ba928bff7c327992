//! Архетипы противников — неизменяемые таблицы статов.
//!
//! Один `Arc<Archetype>` разделяется всеми экземплярами; рантайм-эскалация
//! (фазы боссов) живёт на экземпляре (`Opponent::escalation`), сюда никто не пишет.
//!
//! Таблицы встроены для обоих вариантов правил; кастомные можно загрузить
//! из RON (`ArchetypeRegistry::from_ron`).

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::combat::ActiveWindow;
use crate::config::{ConfigError, Variant};

/// Ранг: босс завершает уровень своей смертью
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Henchman,
    Boss,
}

/// Параметры общей FSM (patrol/chase/attack/retreat)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BehaviorProfile {
    /// Период переоценки ai_state (тики)
    pub decision_period: u32,
    /// Ближе — шанс погони (по aggression)
    pub chase_distance: f32,
    /// Дальше — всегда патруль
    pub patrol_distance: f32,
    /// Амплитуда патруля вокруг spawn_x
    pub patrol_radius: f32,
    pub patrol_speed_factor: f32,
    /// |dx| меньше — погоня стоит на месте
    pub chase_deadzone: f32,
}

impl Default for BehaviorProfile {
    fn default() -> Self {
        Self {
            decision_period: 30,
            chase_distance: 300.0,
            patrol_distance: 400.0,
            patrol_radius: 200.0,
            patrol_speed_factor: 0.5,
            chase_deadzone: 10.0,
        }
    }
}

/// Дальняя атака (снаряд)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangedProfile {
    pub damage: u32,
    pub speed: f32,
    /// Стреляет только при min_distance < dist
    pub min_distance: f32,
    /// ... и dist < max_distance (None — без ограничения)
    #[serde(default)]
    pub max_distance: Option<f32>,
    pub cooldown: u32,
    /// Дальность полёта снаряда
    pub travel: f32,
    /// Точка вылета: height / divisor от верха тела
    pub height_divisor: u32,
}

impl RangedProfile {
    fn check(&self) -> Result<(), &'static str> {
        if self.speed <= 0.0 || self.travel <= 0.0 {
            return Err("projectile speed and travel must be positive");
        }
        if self.height_divisor == 0 {
            return Err("projectile height divisor must be positive");
        }
        if matches!(self.max_distance, Some(max) if max <= self.min_distance) {
            return Err("ranged band must have min < max");
        }
        Ok(())
    }

    pub fn in_band(&self, distance: f32) -> bool {
        distance > self.min_distance && self.max_distance.map_or(true, |max| distance < max)
    }
}

/// Блок: бросок раз в цикл решений, пока игрок атакует
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockProfile {
    pub chance: f32,
    /// None — блок на любой дистанции
    #[serde(default)]
    pub range: Option<f32>,
    /// Урон в блоке делится на divisor
    pub divisor: u32,
}

/// Уклонение: рывок от игрока
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DodgeProfile {
    /// Шанс за тик
    pub chance: f32,
    pub range: f32,
    pub speed_factor: f32,
    /// Some(t) — только пока таймер атаки игрока > t
    #[serde(default)]
    pub min_player_attack_timer: Option<u32>,
}

/// Шаг эскалации мульти-фазного босса
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseStep {
    /// Срабатывает при health / max < below_fraction
    pub below_fraction: f32,
    pub damage_multiplier: f32,
    pub speed_multiplier: f32,
    #[serde(default)]
    pub unlock_counter: bool,
    #[serde(default)]
    pub unlock_venom: bool,
}

/// Поведение, перекрывающее общую FSM
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Policy {
    /// Периодически переключает агрессию между двумя значениями
    AlternatingDisposition { period: u32, bold: f32, timid: f32 },
    /// Периодический разворот + редкие рывки (если архетип умеет уклоняться)
    Feint {
        period: u32,
        reverse_chance: f32,
        dash_chance: f32,
        dash_speed_factor: f32,
    },
    /// Держит дистанцию, частые залпы; ближний бой не предпочитает
    Kiting {
        retreat_within: f32,
        engage_min: f32,
        engage_max: f32,
        volley: RangedProfile,
    },
    /// Залп токсина в пределах дальности (вместо общей FSM на этом тике)
    ToxinVolley { volley: RangedProfile },
    /// Захват вблизи на отдельном cooldown'е
    Grab {
        engage_within: f32,
        engage_aggression: f32,
        range: f32,
        cooldown: u32,
        duration: u32,
    },
    /// Фазы по порогам здоровья
    MultiPhase { steps: Vec<PhaseStep> },
    /// Прыжок-атака в фазе "веном"
    VenomLeap {
        min_distance: f32,
        max_distance: f32,
        chance: f32,
        impulse: f32,
        speed_factor: f32,
        aggression: f32,
    },
    /// Контратака на атаку игрока (вытесняет текущую атаку)
    CounterWindow {
        range: f32,
        chance: f32,
        min_player_attack_timer: u32,
        duration: u32,
    },
}

/// Конфигурация архетипа противника
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Archetype {
    pub key: String,
    pub name: String,
    pub rank: Rank,
    pub max_health: u32,
    pub damage: u32,
    /// Урон Special-атаки (None — обычный урон)
    #[serde(default)]
    pub special_damage: Option<u32>,
    pub speed: f32,
    /// Дальность удара и порог состояния Attack
    pub attack_range: f32,
    pub attack_cooldown: u32,
    pub attack_duration: u32,
    pub melee_window: ActiveWindow,
    /// Шанс выбрать kick вместо punch
    #[serde(default)]
    pub kick_chance: f32,
    pub width: u32,
    pub height: u32,
    pub hitbox_inset: f32,
    #[serde(default)]
    pub block: Option<BlockProfile>,
    #[serde(default)]
    pub can_dodge: bool,
    #[serde(default)]
    pub dodge: Option<DodgeProfile>,
    #[serde(default)]
    pub ranged: Option<RangedProfile>,
    pub prefer_melee: bool,
    /// Контратака доступна с первой фазы
    #[serde(default)]
    pub can_counter: bool,
    pub aggression: f32,
    pub behavior: BehaviorProfile,
    #[serde(default)]
    pub policies: Vec<Policy>,
    pub score_value: u64,
    #[serde(default)]
    pub drop_chance: f32,
    /// Спавн на этой высоте над землёй
    #[serde(default)]
    pub spawn_lift: f32,
}

impl Archetype {
    pub fn is_boss(&self) -> bool {
        self.rank == Rank::Boss
    }

    pub fn can_block(&self) -> bool {
        self.block.is_some()
    }

    pub fn has_projectile(&self) -> bool {
        self.ranged.is_some()
    }

    /// Проверка таблицы (до старта любого encounter'а)
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::InvalidArchetype {
            key: self.key.clone(),
            reason: reason.to_string(),
        };

        if self.key.is_empty() {
            return Err(invalid("empty key"));
        }
        if self.max_health == 0 {
            return Err(invalid("max_health must be positive"));
        }
        if self.width == 0 || self.height == 0 {
            return Err(invalid("size must be positive"));
        }
        if self.speed < 0.0 || self.attack_range <= 0.0 {
            return Err(invalid("speed and attack_range must be non-negative"));
        }
        if self.attack_duration == 0 || self.behavior.decision_period == 0 {
            return Err(invalid("attack_duration and decision_period must be positive"));
        }
        if !(0.0..=1.0).contains(&self.aggression)
            || !(0.0..=1.0).contains(&self.kick_chance)
            || !(0.0..=1.0).contains(&self.drop_chance)
        {
            return Err(invalid("probabilities must be within [0, 1]"));
        }
        if let Some(block) = &self.block {
            if block.divisor == 0 || !(0.0..=1.0).contains(&block.chance) {
                return Err(invalid("block divisor must be positive and chance within [0, 1]"));
            }
        }
        if let Some(ranged) = &self.ranged {
            ranged.check().map_err(invalid)?;
        }
        for policy in &self.policies {
            match policy {
                Policy::MultiPhase { steps } => {
                    let descending = steps
                        .windows(2)
                        .all(|pair| pair[0].below_fraction > pair[1].below_fraction);
                    if steps.is_empty() || !descending {
                        return Err(invalid("phase thresholds must be non-empty and descending"));
                    }
                }
                Policy::Kiting {
                    engage_min,
                    engage_max,
                    volley,
                    ..
                } => {
                    volley.check().map_err(invalid)?;
                    if engage_min >= engage_max {
                        return Err(invalid("kiting band must have min < max"));
                    }
                }
                Policy::ToxinVolley { volley } => volley.check().map_err(invalid)?,
                Policy::VenomLeap {
                    min_distance,
                    max_distance,
                    ..
                } if min_distance >= max_distance => {
                    return Err(invalid("venom leap band must have min < max"));
                }
                _ => {}
            }
        }
        Ok(())
    }
}

/// Реестр архетипов (по ключу)
#[derive(Debug, Clone, Default)]
pub struct ArchetypeRegistry {
    archetypes: BTreeMap<String, Arc<Archetype>>,
}

impl ArchetypeRegistry {
    pub fn for_variant(variant: Variant) -> Self {
        match variant {
            Variant::Classic => Self::classic(),
            Variant::Shadows => Self::shadows(),
        }
    }

    pub fn classic() -> Self {
        Self::from_builtin(classic_archetypes())
    }

    pub fn shadows() -> Self {
        Self::from_builtin(shadows_archetypes())
    }

    fn from_builtin(archetypes: Vec<Archetype>) -> Self {
        let archetypes = archetypes
            .into_iter()
            .map(|archetype| (archetype.key.clone(), Arc::new(archetype)))
            .collect();
        Self { archetypes }
    }

    /// Загрузка из RON: список `Archetype`
    pub fn from_ron(source: &str) -> Result<Self, ConfigError> {
        let archetypes: Vec<Archetype> =
            ron::from_str(source).map_err(|err| ConfigError::Parse(err.to_string()))?;

        let mut registry = Self::default();
        for archetype in archetypes {
            registry.insert(archetype)?;
        }
        Ok(registry)
    }

    pub fn insert(&mut self, archetype: Archetype) -> Result<Arc<Archetype>, ConfigError> {
        archetype.validate()?;
        let shared = Arc::new(archetype);
        self.archetypes
            .insert(shared.key.clone(), Arc::clone(&shared));
        Ok(shared)
    }

    pub fn get(&self, key: &str) -> Result<Arc<Archetype>, ConfigError> {
        self.archetypes
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::UnknownArchetype(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.archetypes.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.archetypes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.archetypes.values().try_for_each(|archetype| archetype.validate())
    }
}

// ============================================================================
// Classic: пять уровней
// ============================================================================

const CLASSIC_BLOCK: BlockProfile = BlockProfile {
    chance: 0.3,
    range: None,
    divisor: 3,
};

const CLASSIC_DODGE: DodgeProfile = DodgeProfile {
    chance: 0.2,
    range: 100.0,
    speed_factor: 2.0,
    min_player_attack_timer: Some(5),
};

fn classic_ranged(damage: u32, speed: f32) -> RangedProfile {
    RangedProfile {
        damage,
        speed,
        min_distance: 100.0,
        max_distance: Some(400.0),
        cooldown: 90,
        travel: 600.0,
        height_divisor: 3,
    }
}

fn classic_base(key: &str, name: &str, rank: Rank) -> Archetype {
    Archetype {
        key: key.to_string(),
        name: name.to_string(),
        rank,
        max_health: 100,
        damage: 10,
        special_damage: None,
        speed: 2.5,
        attack_range: 50.0,
        attack_cooldown: 45,
        attack_duration: 15,
        melee_window: ActiveWindow { lead: 0, tail: 5 },
        kick_chance: 0.5,
        width: 50,
        height: 80,
        hitbox_inset: 20.0,
        block: None,
        can_dodge: false,
        dodge: None,
        ranged: None,
        prefer_melee: true,
        can_counter: false,
        aggression: 0.5,
        behavior: BehaviorProfile::default(),
        policies: Vec::new(),
        score_value: 100,
        drop_chance: 0.1,
        spawn_lift: 0.0,
    }
}

fn classic_archetypes() -> Vec<Archetype> {
    vec![
        Archetype {
            max_health: 500,
            damage: 25,
            speed: 3.5,
            attack_range: 80.0,
            attack_cooldown: 40,
            width: 60,
            height: 90,
            can_dodge: true,
            dodge: Some(CLASSIC_DODGE),
            ranged: Some(classic_ranged(15, 10.0)),
            aggression: 0.7,
            score_value: 5000,
            drop_chance: 0.3,
            ..classic_base("joker", "THE JOKER", Rank::Boss)
        },
        Archetype {
            max_health: 800,
            damage: 40,
            speed: 2.0,
            attack_range: 100.0,
            attack_cooldown: 60,
            width: 80,
            height: 110,
            block: Some(CLASSIC_BLOCK),
            aggression: 0.9,
            score_value: 6000,
            drop_chance: 0.4,
            ..classic_base("bane", "BANE", Rank::Boss)
        },
        Archetype {
            max_health: 450,
            damage: 22,
            speed: 3.5,
            attack_range: 85.0,
            attack_cooldown: 35,
            width: 60,
            height: 95,
            can_dodge: true,
            dodge: Some(CLASSIC_DODGE),
            ranged: Some(classic_ranged(15, 8.0)),
            aggression: 0.65,
            score_value: 4500,
            drop_chance: 0.25,
            ..classic_base("scarecrow", "SCARECROW", Rank::Boss)
        },
        Archetype {
            max_health: 550,
            damage: 30,
            speed: 3.5,
            attack_range: 75.0,
            attack_cooldown: 45,
            width: 60,
            height: 90,
            block: Some(CLASSIC_BLOCK),
            ranged: Some(classic_ranged(18, 12.0)),
            aggression: 0.8,
            score_value: 5500,
            drop_chance: 0.35,
            ..classic_base("twoface", "TWO-FACE", Rank::Boss)
        },
        Archetype {
            max_health: 750,
            damage: 38,
            speed: 5.5,
            attack_range: 95.0,
            attack_cooldown: 25,
            width: 70,
            height: 100,
            block: Some(CLASSIC_BLOCK),
            can_dodge: true,
            dodge: Some(CLASSIC_DODGE),
            ranged: Some(classic_ranged(20, 15.0)),
            aggression: 0.95,
            score_value: 8000,
            drop_chance: 0.5,
            ..classic_base("deathstroke", "DEATHSTROKE", Rank::Boss)
        },
        Archetype {
            max_health: 60,
            damage: 10,
            speed: 2.5,
            attack_range: 50.0,
            attack_cooldown: 45,
            aggression: 0.4,
            score_value: 100,
            drop_chance: 0.1,
            ..classic_base("joker_thug", "Joker Thug", Rank::Henchman)
        },
        Archetype {
            max_health: 100,
            damage: 15,
            speed: 2.0,
            attack_range: 60.0,
            attack_cooldown: 50,
            block: Some(CLASSIC_BLOCK),
            aggression: 0.6,
            score_value: 150,
            drop_chance: 0.15,
            ..classic_base("bane_mercenary", "Bane Mercenary", Rank::Henchman)
        },
        Archetype {
            max_health: 55,
            damage: 10,
            speed: 3.0,
            attack_range: 50.0,
            attack_cooldown: 40,
            ranged: Some(classic_ranged(8, 8.0)),
            aggression: 0.55,
            score_value: 120,
            drop_chance: 0.12,
            ..classic_base("scarecrow_thug", "Fear Thug", Rank::Henchman)
        },
        Archetype {
            max_health: 70,
            damage: 12,
            speed: 2.5,
            attack_range: 55.0,
            attack_cooldown: 42,
            aggression: 0.55,
            score_value: 130,
            drop_chance: 0.12,
            ..classic_base("twoface_goon", "Two-Face Goon", Rank::Henchman)
        },
        Archetype {
            max_health: 90,
            damage: 20,
            speed: 4.2,
            attack_range: 65.0,
            attack_cooldown: 32,
            can_dodge: true,
            dodge: Some(CLASSIC_DODGE),
            ranged: Some(classic_ranged(12, 14.0)),
            aggression: 0.75,
            score_value: 200,
            drop_chance: 0.18,
            ..classic_base("deathstroke_soldier", "Deathstroke Soldier", Rank::Henchman)
        },
    ]
}

// ============================================================================
// Shadows: семь территорий, у каждого босса своя политика
// ============================================================================

const SHADOWS_BLOCK: BlockProfile = BlockProfile {
    chance: 0.25,
    range: Some(150.0),
    divisor: 3,
};

const SHADOWS_BEHAVIOR: BehaviorProfile = BehaviorProfile {
    decision_period: 30,
    chase_distance: 350.0,
    patrol_distance: 450.0,
    patrol_radius: 150.0,
    patrol_speed_factor: 0.5,
    chase_deadzone: 10.0,
};

fn shadows_ranged(damage: u32) -> RangedProfile {
    RangedProfile {
        damage,
        speed: 12.0,
        min_distance: 80.0,
        max_distance: None,
        cooldown: 80,
        travel: 500.0,
        height_divisor: 3,
    }
}

fn villain_base(key: &str, name: &str) -> Archetype {
    Archetype {
        behavior: SHADOWS_BEHAVIOR,
        drop_chance: 0.0,
        spawn_lift: 10.0,
        ..classic_base(key, name, Rank::Boss)
    }
}

/// Приспешник территории: только ближний бой, погоня в пределах 300
fn henchman(territory: &str, max_health: u32) -> Archetype {
    Archetype {
        max_health,
        damage: 12,
        speed: 2.5,
        attack_range: 55.0,
        attack_cooldown: 50,
        attack_duration: 12,
        melee_window: ActiveWindow { lead: 0, tail: 4 },
        width: 45,
        height: 75,
        hitbox_inset: 15.0,
        aggression: 1.0,
        behavior: BehaviorProfile {
            decision_period: 15,
            chase_distance: 300.0,
            patrol_distance: 300.0,
            patrol_radius: 100.0,
            patrol_speed_factor: 0.5,
            chase_deadzone: 10.0,
        },
        score_value: 150,
        drop_chance: 0.15,
        spawn_lift: 10.0,
        ..classic_base(
            &format!("{territory}_henchman"),
            "Henchman",
            Rank::Henchman,
        )
    }
}

fn shadows_archetypes() -> Vec<Archetype> {
    vec![
        Archetype {
            max_health: 500,
            damage: 25,
            speed: 3.5,
            attack_range: 80.0,
            attack_cooldown: 40,
            width: 70,
            height: 100,
            block: Some(SHADOWS_BLOCK),
            ranged: Some(shadows_ranged(18)),
            aggression: 0.6,
            score_value: 5000,
            policies: vec![Policy::AlternatingDisposition {
                period: 180,
                bold: 0.9,
                timid: 0.3,
            }],
            ..villain_base("twoface", "TWO-FACE")
        },
        Archetype {
            max_health: 550,
            damage: 22,
            speed: 4.0,
            attack_range: 75.0,
            attack_cooldown: 35,
            width: 65,
            height: 100,
            can_dodge: true,
            ranged: Some(shadows_ranged(15)),
            aggression: 0.7,
            score_value: 6000,
            policies: vec![Policy::Feint {
                period: 60,
                reverse_chance: 0.4,
                dash_chance: 0.02,
                dash_speed_factor: 2.0,
            }],
            ..villain_base("joker", "THE JOKER")
        },
        Archetype {
            max_health: 450,
            damage: 20,
            speed: 2.5,
            attack_range: 120.0,
            attack_cooldown: 45,
            width: 70,
            height: 85,
            ranged: Some(shadows_ranged(20)),
            prefer_melee: false,
            aggression: 0.5,
            score_value: 5500,
            policies: vec![Policy::Kiting {
                retreat_within: 150.0,
                engage_min: 300.0,
                engage_max: 500.0,
                volley: RangedProfile {
                    damage: 20,
                    speed: 14.0,
                    min_distance: 100.0,
                    max_distance: Some(500.0),
                    cooldown: 50,
                    travel: 600.0,
                    height_divisor: 3,
                },
            }],
            ..villain_base("penguin", "THE PENGUIN")
        },
        Archetype {
            max_health: 480,
            damage: 24,
            special_damage: Some(30),
            speed: 3.8,
            attack_range: 90.0,
            attack_cooldown: 38,
            width: 65,
            height: 105,
            can_dodge: true,
            ranged: Some(shadows_ranged(12)),
            aggression: 0.65,
            score_value: 6000,
            policies: vec![Policy::ToxinVolley {
                volley: RangedProfile {
                    damage: 12,
                    speed: 8.0,
                    min_distance: 0.0,
                    max_distance: Some(400.0),
                    cooldown: 70,
                    travel: 400.0,
                    height_divisor: 2,
                },
            }],
            ..villain_base("scarecrow", "SCARECROW")
        },
        Archetype {
            max_health: 900,
            damage: 45,
            special_damage: Some(60),
            speed: 2.2,
            attack_range: 100.0,
            attack_cooldown: 55,
            width: 90,
            height: 120,
            block: Some(SHADOWS_BLOCK),
            aggression: 0.8,
            score_value: 7000,
            policies: vec![Policy::Grab {
                engage_within: 150.0,
                engage_aggression: 0.95,
                range: 80.0,
                cooldown: 120,
                duration: 25,
            }],
            ..villain_base("croc", "KILLER CROC")
        },
        Archetype {
            max_health: 1000,
            damage: 50,
            special_damage: Some(70),
            speed: 2.5,
            attack_range: 110.0,
            attack_cooldown: 50,
            width: 95,
            height: 125,
            block: Some(SHADOWS_BLOCK),
            aggression: 0.85,
            score_value: 8000,
            policies: vec![
                Policy::MultiPhase {
                    steps: vec![PhaseStep {
                        below_fraction: 0.5,
                        damage_multiplier: 1.5,
                        speed_multiplier: 1.3,
                        unlock_counter: false,
                        unlock_venom: true,
                    }],
                },
                Policy::VenomLeap {
                    min_distance: 150.0,
                    max_distance: 400.0,
                    chance: 0.03,
                    impulse: -20.0,
                    speed_factor: 2.0,
                    aggression: 0.95,
                },
            ],
            ..villain_base("bane", "BANE")
        },
        Archetype {
            max_health: 850,
            damage: 40,
            speed: 5.5,
            attack_range: 100.0,
            attack_cooldown: 25,
            width: 75,
            height: 105,
            block: Some(SHADOWS_BLOCK),
            can_dodge: true,
            dodge: Some(DodgeProfile {
                chance: 0.05,
                range: 100.0,
                speed_factor: 2.5,
                min_player_attack_timer: None,
            }),
            ranged: Some(shadows_ranged(25)),
            aggression: 0.95,
            score_value: 10000,
            policies: vec![
                Policy::MultiPhase {
                    steps: vec![
                        PhaseStep {
                            below_fraction: 0.66,
                            damage_multiplier: 1.0,
                            speed_multiplier: 1.0,
                            unlock_counter: false,
                            unlock_venom: false,
                        },
                        PhaseStep {
                            below_fraction: 0.33,
                            damage_multiplier: 1.0,
                            speed_multiplier: 1.0,
                            unlock_counter: true,
                            unlock_venom: false,
                        },
                    ],
                },
                Policy::CounterWindow {
                    range: 120.0,
                    chance: 0.3,
                    min_player_attack_timer: 5,
                    duration: 15,
                },
            ],
            ..villain_base("deathstroke", "DEATHSTROKE")
        },
        henchman("twoface", 72),
        henchman("joker", 64),
        henchman("penguin", 68),
        henchman("scarecrow", 76),
        henchman("croc", 92),
        henchman("bane", 88),
        henchman("deathstroke", 96),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registries_validate() {
        let classic = ArchetypeRegistry::classic();
        let shadows = ArchetypeRegistry::shadows();

        assert_eq!(classic.len(), 10);
        assert_eq!(shadows.len(), 14);
        assert_eq!(classic.validate(), Ok(()));
        assert_eq!(shadows.validate(), Ok(()));
    }

    #[test]
    fn test_unknown_key() {
        let registry = ArchetypeRegistry::classic();
        assert_eq!(
            registry.get("riddler").err(),
            Some(ConfigError::UnknownArchetype("riddler".to_string()))
        );
    }

    #[test]
    fn test_shared_reference() {
        let registry = ArchetypeRegistry::shadows();
        let a = registry.get("bane").expect("bane exists");
        let b = registry.get("bane").expect("bane exists");
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn test_validation_rejects_bad_probability() {
        let mut registry = ArchetypeRegistry::default();
        let mut archetype = classic_base("broken", "Broken", Rank::Henchman);
        archetype.aggression = 1.5;

        let result = registry.insert(archetype);
        assert!(matches!(result, Err(ConfigError::InvalidArchetype { .. })));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_validation_rejects_still_projectile_and_inverted_band() {
        let mut archetype = classic_base("thrower", "Thrower", Rank::Henchman);
        archetype.ranged = Some(classic_ranged(10, 0.0));
        assert!(archetype.validate().is_err());

        let mut inverted = classic_ranged(10, 7.0);
        inverted.max_distance = Some(50.0);
        archetype.ranged = Some(inverted);
        assert!(archetype.validate().is_err());

        archetype.ranged = Some(classic_ranged(10, 7.0));
        assert!(archetype.validate().is_ok());
    }

    #[test]
    fn test_from_ron_roundtrip_of_builtin_table() {
        let source = ron::to_string(&classic_archetypes()).expect("serialize table");
        let registry = ArchetypeRegistry::from_ron(&source).expect("parse table");

        assert_eq!(registry.len(), 10);
        let joker = registry.get("joker").expect("joker exists");
        assert_eq!(joker.max_health, 500);
        assert!(joker.has_projectile());
    }

    #[test]
    fn test_from_ron_reports_parse_error() {
        let result = ArchetypeRegistry::from_ron("[ (key: ");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
