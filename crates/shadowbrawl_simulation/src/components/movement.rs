//! Кинематическое тело (позиция, скорость, размер)
//!
//! Позиция — левый верхний угол, ось Y вниз (экранные координаты).

use bevy::math::{Rect, Vec2};

/// Допуск для проверки "стоит на земле" (после snap bottom == ground)
const GROUND_EPSILON: f32 = 0.01;

/// Kinematic тело актора
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub width: u32,
    pub height: u32,
}

impl Body {
    pub fn new(position: Vec2, width: u32, height: u32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            width,
            height,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width as f32, self.height as f32)
    }

    /// Axis-aligned прямоугольник тела
    pub fn rect(&self) -> Rect {
        Rect::from_corners(self.position, self.position + self.size())
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.height as f32
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size() * 0.5
    }

    pub fn is_grounded(&self, ground_level: f32) -> bool {
        self.bottom() >= ground_level - GROUND_EPSILON
    }
}
