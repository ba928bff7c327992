//! Прямоугольники столкновений
//!
//! Пересечение строгое: касание краями — не попадание.

use bevy::math::{Rect, Vec2};

use crate::components::{Body, Facing};

/// Строгое пересечение двух AABB
pub fn overlaps(a: Rect, b: Rect) -> bool {
    !a.intersect(b).is_empty()
}

/// Прямоугольник удара перед телом: `reach` в сторону взгляда,
/// по вертикали тело минус `inset` сверху и снизу.
pub fn melee_rect(body: &Body, facing: Facing, reach: f32, inset: f32) -> Rect {
    let top = body.position.y + inset;
    let bottom = (body.bottom() - inset).max(top);
    let left = match facing {
        Facing::Right => body.position.x + body.width as f32,
        Facing::Left => body.position.x - reach,
    };

    Rect::from_corners(Vec2::new(left, top), Vec2::new(left + reach, bottom))
}
