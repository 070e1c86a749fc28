//! Cache lifetime policy
//!
//! Maps a content-type tag to a revalidation interval. Pure configuration:
//! a base duration per priority class, scaled by a per-type multiplier.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Priority class for cache lifetime resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Fast-moving content (60s base)
    High,

    /// Default for most content (300s base)
    Medium,

    /// Rarely-changing content (900s base)
    Low,
}

impl Priority {
    /// Base revalidation duration in seconds
    pub fn base_seconds(self) -> u64 {
        match self {
            Priority::High => 60,
            Priority::Medium => 300,
            Priority::Low => 900,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Static table of per-content-type multipliers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevalidationPolicy {
    /// Multiplier per content type; unlisted types multiply by 1
    multipliers: HashMap<String, u64>,
}

impl Default for RevalidationPolicy {
    fn default() -> Self {
        let mut multipliers = HashMap::new();
        // Site settings change on the order of deploys, not edits
        multipliers.insert("siteSettings".to_string(), 6);
        multipliers.insert("hero".to_string(), 3);
        multipliers.insert("testimonial".to_string(), 2);
        Self { multipliers }
    }
}

impl RevalidationPolicy {
    /// Create a policy with an explicit multiplier table
    pub fn new(multipliers: HashMap<String, u64>) -> Self {
        Self { multipliers }
    }

    /// Resolve the revalidation interval (seconds) for a content type
    ///
    /// `base_seconds(priority) * multiplier(content_type)`, multiplier 1 for
    /// unlisted types. Pure and side-effect-free.
    pub fn resolve_duration(&self, content_type: &str, priority: Priority) -> u64 {
        let multiplier = self.multipliers.get(content_type).copied().unwrap_or(1);
        priority.base_seconds() * multiplier
    }
}
