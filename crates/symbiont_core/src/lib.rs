//! # Symbiont Core
//!
//! The core simulation engine for Symbiont - an agent-based digital-life
//! simulation.
//!
//! This crate contains the deterministic simulation logic, including:
//! - Inheritable genomes with mutation and crossover
//! - Per-organism resource metabolism gating actions
//! - Attention-weighted perception and reinforcement-backed decisions
//! - Organism lifecycle state machine (birth, aging, death)
//! - Ecosystem tick loop with environmental pressure and offspring harvest
//! - Metrics collection and structured logging
//!
//! ## Architecture
//!
//! The engine follows a data/logic split:
//! - **Plain data**: trait vectors, resource pools, and records live in
//!   `symbiont_data`
//! - **Logic traits**: [`genome::GenomeLogic`] and
//!   [`metabolism::MetabolismLogic`] attach behavior to the data types
//! - **Stateful engine**: [`organism::Organism`] and
//!   [`ecosystem::Ecosystem`] own the per-tick lifecycle
//! - **Deterministic simulation**: a seeded RNG feeds every stochastic site
//!
//! ## Example
//!
//! ```
//! use symbiont_core::config::EngineConfig;
//! use symbiont_core::ecosystem::Ecosystem;
//! use symbiont_core::organism::Organism;
//!
//! let mut config = EngineConfig::default();
//! config.ecosystem.seed = Some(42);
//! let mut eco = Ecosystem::new("genesis", config).unwrap();
//! for _ in 0..5 {
//!     let organism = Organism::spawn_with_rng(eco.rng_mut());
//!     eco.add(organism).unwrap();
//! }
//! for _ in 0..50 {
//!     eco.step(1.0);
//! }
//! let report = eco.report();
//! assert_eq!(report.tick, 50);
//! ```

/// Configuration management for simulation parameters
pub mod config;
/// Ecosystem: population ownership, tick loop, pressure, and statistics
pub mod ecosystem;
/// Typed engine errors
pub mod error;
/// Genetic operators over the inheritable trait vector
pub mod genome;
/// Resource-pool economy gating organism actions
pub mod metabolism;
/// Metrics collection and logging setup
pub mod metrics;
/// Perception, decision-making, and learning
pub mod mind;
/// Organism lifecycle state machine
pub mod organism;

pub use config::EngineConfig;
pub use ecosystem::{Ecosystem, TickHook};
pub use error::EngineError;
pub use genome::GenomeLogic;
pub use metabolism::MetabolismLogic;
pub use metrics::{init_logging, Metrics};
pub use mind::Mind;
pub use organism::Organism;
