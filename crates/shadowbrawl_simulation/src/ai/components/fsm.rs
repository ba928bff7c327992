//! FSM AI components (состояние решения, таймеры политики).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Состояние общей FSM противника
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Reflect)]
pub enum AiState {
    /// Блуждание вокруг spawn_x (синусоида по времени encounter'а)
    Patrol,
    /// Сближение с игроком
    Chase,
    /// Стоит на месте и бьёт / стреляет
    Attack,
    /// Отход от игрока
    Retreat,
}

impl Default for AiState {
    fn default() -> Self {
        Self::Patrol
    }
}

/// Мозг противника: всё мутабельное состояние AI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Brain {
    pub state: AiState,
    /// Тики до следующей переоценки (0 → решаем на этом тике)
    pub decision_countdown: u32,
    /// Оставшиеся тики блока
    pub block_timer: u32,
    /// Бросок блока в этом цикле решений уже был
    pub block_rolled: bool,
    /// AlternatingDisposition
    pub disposition_timer: u32,
    /// Feint
    pub feint_timer: u32,
}

impl Brain {
    /// Тик таймеров блока
    pub fn tick(&mut self) {
        self.block_timer = self.block_timer.saturating_sub(1);
    }

    /// true раз в `period` тиков (первый — сразу)
    pub fn decision_due(&mut self, period: u32) -> bool {
        if self.decision_countdown == 0 {
            self.decision_countdown = period.max(1) - 1;
            true
        } else {
            self.decision_countdown -= 1;
            false
        }
    }
}
