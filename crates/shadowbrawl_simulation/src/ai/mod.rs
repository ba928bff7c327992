//! AI decision-making module
//!
//! Общая FSM (patrol/chase/attack/retreat) параметризуется архетипом;
//! боссы добавляют политики поверх неё (фазы, финты, кайт, контратаки).
//!
//! Вся случайность — через переданный RNG (детерминизм по seed).

pub mod archetype;
pub mod components;
pub mod policies;
pub mod simple_fsm;
pub mod systems;

#[cfg(test)]
mod policies_tests;

// Re-export основных типов
pub use archetype::{Archetype, ArchetypeRegistry, Policy, Rank};
pub use components::{AiState, Brain};
pub use systems::update_opponent;
