//! Компоненты бойцов
//!
//! Организация по доменам:
//! - movement: кинематическое тело (Body)
//! - actor: общее боевое состояние (Actor, Health, CombatState, Facing)
//! - player: игрок (прыжки, комбо, очки, жизни)
//! - opponent: противник (архетип, мозг, эскалация)

pub mod actor;
pub mod movement;
pub mod opponent;
pub mod player;

pub use actor::*;
pub use movement::*;
pub use opponent::*;
pub use player::*;
