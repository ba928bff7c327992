//! Ошибки загрузки/валидации конфигурации.
//!
//! Runtime (tick) никогда не падает — все ошибки ловятся на этапе
//! построения реестра архетипов и таблиц уровней.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown archetype '{0}'")]
    UnknownArchetype(String),

    #[error("archetype '{key}' is invalid: {reason}")]
    InvalidArchetype { key: String, reason: String },

    #[error("stage '{stage}' is invalid: {reason}")]
    InvalidStage { stage: String, reason: String },

    #[error("stage table is empty")]
    NoStages,

    #[error("failed to parse archetype table: {0}")]
    Parse(String),
}
