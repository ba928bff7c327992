//! Снаряды (бэтаранги, бомбы, токсин)
//!
//! Летят по прямой без гравитации, вращаются (только презентация),
//! деактивируются при превышении дальности или после первого попадания.

use bevy::math::{Rect, Vec2};

use crate::components::{Body, Facing};

pub const PROJECTILE_WIDTH: f32 = 20.0;
pub const PROJECTILE_HEIGHT: f32 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    /// Центр снаряда
    pub position: Vec2,
    pub velocity: Vec2,
    pub damage: u32,
    pub owner_is_player: bool,
    pub distance_traveled: f32,
    pub max_distance: f32,
    /// Угол (градусы, для презентации)
    pub spin: f32,
    active: bool,
}

impl Projectile {
    pub fn new(
        origin: Vec2,
        facing: Facing,
        speed: f32,
        damage: u32,
        max_distance: f32,
        owner_is_player: bool,
    ) -> Self {
        Self {
            position: origin,
            velocity: Vec2::new(facing.sign() * speed, 0.0),
            damage,
            owner_is_player,
            distance_traveled: 0.0,
            max_distance,
            spin: 0.0,
            active: true,
        }
    }

    /// Снаряд из тела стрелка: передний край, на высоте `height / divisor` от верха
    pub fn launched_from(
        body: &Body,
        facing: Facing,
        height_divisor: u32,
        speed: f32,
        damage: u32,
        max_distance: f32,
        owner_is_player: bool,
    ) -> Self {
        let x = match facing {
            Facing::Right => body.position.x + body.width as f32,
            Facing::Left => body.position.x,
        };
        let y = body.position.y + (body.height / height_divisor.max(1)) as f32;

        Self::new(
            Vec2::new(x, y),
            facing,
            speed,
            damage,
            max_distance,
            owner_is_player,
        )
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Шаг полёта. Возвращает true, если снаряд деактивирован на этом тике.
    pub fn advance(&mut self, spin_per_tick: f32) -> bool {
        if !self.active {
            return false;
        }

        self.position += self.velocity;
        self.distance_traveled += self.velocity.x.abs();
        self.spin = (self.spin + spin_per_tick) % 360.0;

        if self.distance_traveled > self.max_distance {
            self.active = false;
            return true;
        }
        false
    }

    /// Направление отброса цели
    pub fn knockback_direction(&self) -> f32 {
        if self.velocity.x > 0.0 {
            1.0
        } else if self.velocity.x < 0.0 {
            -1.0
        } else {
            0.0
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::from_center_size(
            self.position,
            Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT),
        )
    }
}
