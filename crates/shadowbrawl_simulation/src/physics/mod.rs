//! Physics module — kinematic интеграция без физического движка.
//!
//! Гравитация, земля, границы уровня. Столкновения тел между собой
//! не разрешаются (только хитбоксы в `combat`).

pub mod movement;

pub use movement::integrate;
