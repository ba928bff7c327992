//! SHADOWBRAWL Simulation Core
//!
//! Детерминированная 2D side-scrolling боевая симуляция (fixed tick 60Hz):
//! физика тел, атаки и хитбоксы, снаряды, комбо, AI противников с
//! политиками боссов, encounter/кампания.
//!
//! Презентация (спрайты, звук, HUD, ввод) — снаружи: ядро принимает
//! `PlayerIntents` и отдаёт снапшоты + `CombatCue`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod encounter;
pub mod logger;
pub mod physics;

// Re-export базовых типов для удобства
pub use ai::{AiState, Archetype, ArchetypeRegistry, Policy, Rank};
pub use combat::{AttackKind, ComboTracker, DamageOutcome, Projectile};
pub use components::*;
pub use config::{ConfigError, PlayerTuning, Variant, WorldConfig};
pub use encounter::{
    ActiveCampaign, Campaign, CampaignPhase, CombatCue, CueQueue, CueSink, Encounter,
    EncounterPlugin, EncounterSnapshot, EncounterStatus, NullSink, PlayerIntents,
};
pub use logger::{init_logger, log, log_error, log_info, log_warning, LogLevel, LogPrinter};

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz: один FixedUpdate = один тик симуляции
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            // Детерминистичный RNG (seed по умолчанию)
            .insert_resource(DeterministicRng::new(42))
            .add_plugins(EncounterPlugin);
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Кампании берут seed отсюда; сами encounter'ы держат собственный RNG.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Headless app с кампанией варианта (seed кампании = seed RNG)
pub fn create_campaign_app(variant: Variant, seed: u64) -> Result<App, ConfigError> {
    let mut app = create_headless_app(seed);
    app.add_plugins(EncounterPlugin)
        .insert_resource(ActiveCampaign::new(variant, seed)?);
    Ok(app)
}
