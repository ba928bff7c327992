//! Combat systems (разрешение столкновений за тик)

pub mod collision;

#[cfg(test)]
mod collision_tests;

pub use collision::{
    resolve_collisions, resolve_opponent_melee, resolve_player_melee, resolve_projectiles,
};
