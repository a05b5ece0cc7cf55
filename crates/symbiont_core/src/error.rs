//! Error types for the simulation engine.
//!
//! The engine has no fatal error class: the worst modeled outcome is an
//! organism death. These variants cover caller mistakes at the API surface.

use symbiont_data::ActionKind;
use thiserror::Error;
use uuid::Uuid;

/// Main error type for engine operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EngineError {
    /// An organism with this id is already registered; the existing entry
    /// is left untouched.
    #[error("duplicate entity: {0}")]
    DuplicateEntity(Uuid),

    /// No organism with this id exists in the population.
    #[error("unknown entity: {0}")]
    UnknownEntity(Uuid),

    /// An organism cannot be connected to itself.
    #[error("self connection rejected: {0}")]
    SelfConnection(Uuid),

    /// An action was requested outside the currently available set.
    #[error("action unavailable: {}", .0.label())]
    ActionUnavailable(ActionKind),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
