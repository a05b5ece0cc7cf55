//! Core data structures for the Symbiont simulation.
//!
//! This crate holds the plain, serializable state types shared by the engine
//! and by external consumers of snapshot/report data. It contains no
//! simulation logic: mutation, decision-making, and the tick cycle live in
//! `symbiont_core`.

pub mod data;

pub use data::actions::ActionKind;
pub use data::environment::{
    EcosystemReport, EnvironmentParams, GlobalEventKind, LiveEvent, SignalClass, SignalKind,
    SignalMap, StatsSnapshot,
};
pub use data::genome::{Genome, ImmutableTraits, MutableTraits, MutationRecord, TraitId};
pub use data::mind::{DecisionRecord, LearningEntry, Perception};
pub use data::organism::{
    EnvironmentLink, ModificationKind, ModificationRecord, OrganismReport, Stage, Status,
};
pub use data::resources::{ChannelState, Resource, ResourcePool};
