use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Age-derived lifecycle stage. Affects only action eligibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Infant,
    Juvenile,
    Adult,
    Elder,
}

/// Liveness of an organism. `Dead` is absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Alive,
    Dead,
}

/// What a self-modification touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModificationKind {
    /// Behavioral adaptation, e.g. a learning enhancement.
    Behavior,
    /// Internal structure change.
    Structure,
}

/// Append-only audit record of a runtime self-modification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModificationRecord {
    pub kind: ModificationKind,
    pub tick_age: f64,
    pub details: String,
}

/// A non-social connection into the environment, discovered via explore.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentLink {
    pub index: usize,
    pub strength: f64,
}

/// Read-only status summary of one organism.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrganismReport {
    pub id: Uuid,
    pub name: String,
    pub age: f64,
    pub health: f64,
    pub stage: Stage,
    pub status: Status,
    pub generation: u32,
    pub genome_fingerprint: String,
    /// Channel label → current balance.
    pub resources: BTreeMap<String, f64>,
    pub relation_count: usize,
    pub environment_link_count: usize,
    pub offspring_count: u32,
    pub behavior_modifications: usize,
    pub structure_modifications: usize,
}
