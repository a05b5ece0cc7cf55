use serde::{Deserialize, Serialize};

/// Named resource channel of an organism's metabolism.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    /// Processing budget spent by every operation.
    Compute,
    /// Working memory for thinking and learning.
    Memory,
    /// Communication capacity for social operations.
    Bandwidth,
    /// Long-term storage filled by learning.
    Storage,
    /// Accumulated knowledge; gained by actions, spent by teaching.
    Knowledge,
}

impl Resource {
    pub const ALL: [Resource; 5] = [
        Resource::Compute,
        Resource::Memory,
        Resource::Bandwidth,
        Resource::Storage,
        Resource::Knowledge,
    ];

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Resource::Compute => "compute",
            Resource::Memory => "memory",
            Resource::Bandwidth => "bandwidth",
            Resource::Storage => "storage",
            Resource::Knowledge => "knowledge",
        }
    }
}

/// State of one resource channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelState {
    /// Current balance. Never driven below zero by consumption.
    pub current: f64,
    /// Cost per unit of operation amount.
    pub consumption_rate: f64,
    /// Gain per unit of simulated time.
    pub regen_rate: f64,
    /// Reference maximum used for health normalization.
    pub known_max: f64,
}

/// Per-organism resource economy: five channels with independent balances,
/// consumption rates, and regeneration rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcePool {
    pub compute: ChannelState,
    pub memory: ChannelState,
    pub bandwidth: ChannelState,
    pub storage: ChannelState,
    pub knowledge: ChannelState,
}

impl Default for ResourcePool {
    fn default() -> Self {
        Self {
            compute: ChannelState {
                current: 1000.0,
                consumption_rate: 1.0,
                regen_rate: 10.0,
                known_max: 1000.0,
            },
            memory: ChannelState {
                current: 500.0,
                consumption_rate: 0.1,
                regen_rate: 1.0,
                known_max: 500.0,
            },
            bandwidth: ChannelState {
                current: 100.0,
                consumption_rate: 0.5,
                regen_rate: 5.0,
                known_max: 100.0,
            },
            storage: ChannelState {
                current: 1000.0,
                consumption_rate: 0.01,
                regen_rate: 0.1,
                known_max: 1000.0,
            },
            knowledge: ChannelState {
                current: 0.0,
                consumption_rate: 0.0,
                regen_rate: 0.1,
                known_max: 100.0,
            },
        }
    }
}

impl ResourcePool {
    #[must_use]
    pub fn channel(&self, resource: Resource) -> &ChannelState {
        match resource {
            Resource::Compute => &self.compute,
            Resource::Memory => &self.memory,
            Resource::Bandwidth => &self.bandwidth,
            Resource::Storage => &self.storage,
            Resource::Knowledge => &self.knowledge,
        }
    }

    pub fn channel_mut(&mut self, resource: Resource) -> &mut ChannelState {
        match resource {
            Resource::Compute => &mut self.compute,
            Resource::Memory => &mut self.memory,
            Resource::Bandwidth => &mut self.bandwidth,
            Resource::Storage => &mut self.storage,
            Resource::Knowledge => &mut self.knowledge,
        }
    }
}
