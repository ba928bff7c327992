//! Headless симуляция SHADOWBRAWL
//!
//! Прогоняет кампанию по скрипту ввода без рендера: игрок идёт вправо,
//! бьёт и бросает бэтаранги.

use shadowbrawl_simulation::{log_error, log_info, Campaign, CampaignPhase, PlayerIntents, Variant};

/// Скриптовый ввод: бег вправо, серия ударов, иногда прыжок и бросок
fn scripted_intents(tick: u64) -> PlayerIntents {
    let mut intents = PlayerIntents::right();
    match tick % 90 {
        0 => intents = intents.with_throw(),
        15 | 30 => intents = intents.with_punch(),
        45 => intents = intents.with_kick(),
        60 => intents = intents.with_jump(),
        _ => {}
    }
    intents
}

fn main() {
    shadowbrawl_simulation::init_logger();

    let seed = 42;
    let variant = std::env::args()
        .nth(1)
        .map(|arg| match arg.as_str() {
            "classic" => Variant::Classic,
            _ => Variant::Shadows,
        })
        .unwrap_or_default();

    log_info(&format!("Starting SHADOWBRAWL headless simulation ({:?}, seed: {})", variant, seed));

    let mut campaign = match Campaign::new(variant, seed) {
        Ok(campaign) => campaign,
        Err(err) => {
            log_error(&format!("Invalid configuration: {}", err));
            std::process::exit(1);
        }
    };

    // Запускаем 20000 тиков симуляции
    for tick in 0..20_000u64 {
        let phase = campaign.advance(&scripted_intents(tick));
        let cues = campaign.cues().drain();

        if tick % 100 == 0 {
            let encounter = campaign.encounter();
            let player = encounter.player();
            log_info(&format!(
                "Tick {}: stage {} {:?}, hp {}/{}, score {}, opponents {}, projectiles {}, cues {}",
                tick,
                encounter.stage() + 1,
                phase,
                player.actor.health.current,
                player.actor.health.max,
                player.score,
                encounter.opponents().len(),
                encounter.projectiles().len(),
                cues.len()
            ));
        }

        if phase.is_finished() {
            break;
        }
    }

    let phase = campaign.phase();
    let score = campaign.encounter().player().score;
    match phase {
        CampaignPhase::Victory => {
            log_info(&format!("Simulation complete: victory, score {}", score))
        }
        CampaignPhase::Defeat => log_info(&format!("Simulation complete: defeat, score {}", score)),
        _ => log_info(&format!("Simulation complete: {:?}, score {}", phase, score)),
    }
}
