//! AI systems (per-tick обновление противников)

pub mod fsm;

pub use fsm::update_opponent;
