//! Resource-pool economy gating organism actions.
//!
//! Consumption is atomic across the channels an action requires: either
//! every channel can cover its share and all are debited together, or
//! nothing is touched and the action is skipped for the tick.

use symbiont_data::{ActionKind, Resource, ResourcePool};

/// Trait defining the metabolic interface of the per-organism resource pool.
pub trait MetabolismLogic {
    /// Debits every channel the action requires. Returns `false` without
    /// touching any balance if a single channel is short. No retries.
    fn consume(&mut self, kind: ActionKind, amount: f64) -> bool;
    /// Regenerates every channel by `rate * delta_time`.
    fn regenerate(&mut self, delta_time: f64);
    /// Normalized mean of `current / known_max` per channel, in [0, 1].
    fn health_contribution(&self) -> f64;
    /// Adds knowledge gained by an action effect.
    fn credit_knowledge(&mut self, amount: f64);
    /// Spends knowledge, saturating at zero. Returns the amount removed.
    fn debit_knowledge(&mut self, amount: f64) -> f64;
    /// Scales every channel balance, used by resource-scarcity events.
    fn scale_all(&mut self, factor: f64);
}

impl MetabolismLogic for ResourcePool {
    fn consume(&mut self, kind: ActionKind, amount: f64) -> bool {
        let required = kind.required_channels();

        for &resource in required {
            let channel = self.channel(resource);
            if channel.current < channel.consumption_rate * amount {
                return false;
            }
        }

        for &resource in required {
            let channel = self.channel_mut(resource);
            channel.current -= channel.consumption_rate * amount;
        }
        true
    }

    fn regenerate(&mut self, delta_time: f64) {
        for resource in Resource::ALL {
            let channel = self.channel_mut(resource);
            channel.current += channel.regen_rate * delta_time;
        }
    }

    fn health_contribution(&self) -> f64 {
        let mut total = 0.0;
        for resource in Resource::ALL {
            let channel = self.channel(resource);
            total += (channel.current / channel.known_max).min(1.0);
        }
        (total / Resource::ALL.len() as f64).clamp(0.0, 1.0)
    }

    fn credit_knowledge(&mut self, amount: f64) {
        self.knowledge.current += amount;
    }

    fn debit_knowledge(&mut self, amount: f64) -> f64 {
        let spent = amount.min(self.knowledge.current);
        self.knowledge.current -= spent;
        spent
    }

    fn scale_all(&mut self, factor: f64) {
        for resource in Resource::ALL {
            self.channel_mut(resource).current *= factor;
        }
    }
}
