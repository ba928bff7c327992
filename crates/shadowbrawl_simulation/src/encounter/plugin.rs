//! Bevy-хост кампании: один FixedUpdate тик = один тик симуляции.

use bevy::prelude::*;

use super::campaign::Campaign;
use super::events::CombatCue;
use super::intent::PlayerIntents;
use crate::config::{ConfigError, Variant};

/// Текущая кампания (вставляется хостом)
#[derive(Resource)]
pub struct ActiveCampaign(pub Campaign);

impl ActiveCampaign {
    pub fn new(variant: Variant, seed: u64) -> Result<Self, ConfigError> {
        Campaign::new(variant, seed).map(Self)
    }
}

/// Encounter plugin
///
/// Регистрирует:
/// - Events: CombatCue (сигналы для звука/презентации)
/// - Resources: PlayerIntents (заполняет слой ввода)
/// - Systems: advance_campaign (FixedUpdate)
pub struct EncounterPlugin;

impl Plugin for EncounterPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<CombatCue>()
            .init_resource::<PlayerIntents>()
            .add_systems(FixedUpdate, advance_campaign);
    }
}

/// Тик кампании + пересылка сигналов в bevy events.
///
/// Дискретные намерения гасятся после тика (не чаще раза за тик).
pub fn advance_campaign(
    campaign: Option<ResMut<ActiveCampaign>>,
    mut intents: ResMut<PlayerIntents>,
    mut cues: EventWriter<CombatCue>,
) {
    let Some(mut campaign) = campaign else {
        return;
    };

    campaign.0.advance(&intents);
    for cue in campaign.0.cues().drain() {
        cues.write(cue);
    }
    intents.clear_discrete();
}
