use super::resources::Resource;
use serde::{Deserialize, Serialize};

/// Closed set of actions an organism can take during one tick.
///
/// Each variant carries its fixed resource requirement through
/// [`ActionKind::required_channels`]; the effect table lives in
/// `symbiont_core::organism`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    /// Recover health and regenerate extra resources.
    Rest,
    /// Gather knowledge; may discover a new environment link.
    Explore,
    /// Gather knowledge at the genome's learning rate.
    Learn,
    /// Spend knowledge to strengthen every social relation.
    Teach,
    /// Convert cooperation tendency into knowledge and relation strength.
    Cooperate,
    /// Recover health, scaled inversely with risk tolerance.
    Heal,
    /// Attempt to establish a new symmetric social relation.
    SeekConnection,
    /// Produce exactly one pending offspring.
    Reproduce,
}

impl ActionKind {
    pub const ALL: [ActionKind; 8] = [
        ActionKind::Rest,
        ActionKind::Explore,
        ActionKind::Learn,
        ActionKind::Teach,
        ActionKind::Cooperate,
        ActionKind::Heal,
        ActionKind::SeekConnection,
        ActionKind::Reproduce,
    ];

    /// Channels debited together when this action executes.
    ///
    /// Consumption is all-or-nothing: if any listed channel is short, the
    /// whole debit is refused.
    #[must_use]
    pub fn required_channels(&self) -> &'static [Resource] {
        match self {
            ActionKind::Rest => &[Resource::Compute],
            ActionKind::Explore => &[Resource::Compute, Resource::Bandwidth],
            ActionKind::Learn => &[Resource::Compute, Resource::Memory, Resource::Storage],
            ActionKind::Teach => &[Resource::Compute, Resource::Bandwidth],
            ActionKind::Cooperate => &[Resource::Compute, Resource::Bandwidth],
            ActionKind::Heal => &[Resource::Compute, Resource::Memory],
            ActionKind::SeekConnection => &[Resource::Compute, Resource::Bandwidth],
            ActionKind::Reproduce => &[Resource::Compute, Resource::Memory, Resource::Knowledge],
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            ActionKind::Rest => "rest",
            ActionKind::Explore => "explore",
            ActionKind::Learn => "learn",
            ActionKind::Teach => "teach",
            ActionKind::Cooperate => "cooperate",
            ActionKind::Heal => "heal",
            ActionKind::SeekConnection => "seek_connection",
            ActionKind::Reproduce => "reproduce",
        }
    }
}
