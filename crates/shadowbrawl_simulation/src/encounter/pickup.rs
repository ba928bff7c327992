//! Аптечки: выпадают из приспешников, живут ограниченное время.

use bevy::math::{Rect, Vec2};

use crate::config::PickupTuning;

#[derive(Debug, Clone, PartialEq)]
pub struct HealthPickup {
    /// Левый верхний угол
    pub position: Vec2,
    pub heal: u32,
    /// Оставшиеся тики жизни
    pub lifetime: u32,
    size: Vec2,
}

impl HealthPickup {
    /// Аптечка на земле, по центру тела `center_x`
    pub fn dropped_at(center_x: f32, ground_level: f32, tuning: &PickupTuning) -> Self {
        let size = Vec2::new(tuning.width as f32, tuning.height as f32);
        Self {
            position: Vec2::new(center_x - size.x / 2.0, ground_level - size.y),
            heal: tuning.heal,
            lifetime: tuning.lifetime,
            size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.position, self.position + self.size)
    }

    /// Тик времени жизни. false — аптечка исчезла.
    pub fn tick(&mut self) -> bool {
        self.lifetime = self.lifetime.saturating_sub(1);
        self.lifetime > 0
    }
}
