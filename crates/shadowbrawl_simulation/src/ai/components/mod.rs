//! AI components: FSM state + brain timers.

pub mod fsm;


pub use fsm::{AiState, Brain};
