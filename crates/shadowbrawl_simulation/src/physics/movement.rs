//! Kinematic интеграция тела (fixed step, 1 тик)
//!
//! Порядок:
//! 1. vy += gravity, clamp к terminal velocity
//! 2. position += velocity
//! 3. ниже земли → snap на землю, vy = 0
//! 4. clamp x в границы уровня

use crate::components::Body;
use crate::config::WorldConfig;

/// Шаг интеграции. Возвращает true, если тело стоит на земле.
pub fn integrate(body: &mut Body, world: &WorldConfig) -> bool {
    body.velocity.y = (body.velocity.y + world.gravity).min(world.terminal_velocity);
    body.position += body.velocity;

    let mut grounded = false;
    if body.bottom() >= world.ground_level {
        body.position.y = world.ground_level - body.height as f32;
        body.velocity.y = 0.0;
        grounded = true;
    }

    let max_x = (world.level_width - body.width as f32).max(0.0);
    body.position.x = body.position.x.clamp(0.0, max_x);

    grounded
}
