//! Комбо-счётчик игрока
//!
//! Каждое засчитанное попадание увеличивает счётчик и перезапускает окно.
//! Множитель урона: min(1 + count × bonus, max_multiplier), урон округляется вниз.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComboTuning {
    /// Окно между попаданиями (тики)
    pub window: u32,
    pub per_hit_bonus: f32,
    pub max_multiplier: f32,
}

impl Default for ComboTuning {
    fn default() -> Self {
        Self {
            window: 100,
            per_hit_bonus: 0.15,
            max_multiplier: 2.5,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ComboTracker {
    count: u32,
    timer: u32,
}

impl ComboTracker {
    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    pub fn register_hit(&mut self, tuning: &ComboTuning) {
        self.count += 1;
        self.timer = tuning.window;
    }

    /// Окно истекло → счётчик в 0
    pub fn tick(&mut self) {
        if self.timer > 0 {
            self.timer -= 1;
            if self.timer == 0 {
                self.count = 0;
            }
        }
    }

    pub fn reset(&mut self) {
        self.count = 0;
        self.timer = 0;
    }

    pub fn scale(&self, base: u32, tuning: &ComboTuning) -> u32 {
        scale_damage(base, self.count, tuning)
    }
}

pub fn combo_multiplier(count: u32, tuning: &ComboTuning) -> f64 {
    let raw = 1.0 + count as f64 * tuning.per_hit_bonus as f64;
    raw.min(tuning.max_multiplier as f64)
}

pub fn scale_damage(base: u32, count: u32, tuning: &ComboTuning) -> u32 {
    (base as f64 * combo_multiplier(count, tuning)).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punch_chain_damage() {
        let tuning = ComboTuning::default();
        assert_eq!(scale_damage(35, 0, &tuning), 35);
        assert_eq!(scale_damage(35, 1, &tuning), 40); // 40.25
        assert_eq!(scale_damage(35, 2, &tuning), 45); // 45.5
    }

    #[test]
    fn test_multiplier_monotonic_and_capped() {
        let tuning = ComboTuning::default();
        let mut previous = 0.0;
        for count in 0..30 {
            let multiplier = combo_multiplier(count, &tuning);
            assert!(multiplier >= previous);
            assert!(multiplier <= 2.5);
            previous = multiplier;
        }
        assert_eq!(combo_multiplier(100, &tuning), 2.5);
    }

    #[test]
    fn test_window_expiry_resets_count() {
        let tuning = ComboTuning {
            window: 3,
            ..ComboTuning::default()
        };
        let mut combo = ComboTracker::default();
        combo.register_hit(&tuning);
        combo.register_hit(&tuning);
        assert_eq!(combo.count(), 2);

        combo.tick();
        combo.tick();
        assert_eq!(combo.count(), 2);
        combo.tick();
        assert_eq!(combo.count(), 0);
        assert_eq!(combo.timer(), 0);
    }
}
