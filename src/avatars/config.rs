//! Configuration and capacity derivation for the reaction-avatar engine

use serde::{Deserialize, Serialize};

// =============================================================================
// Defaults
// =============================================================================

/// Ceiling on avatar elements across all groups of one roster.
pub const DEFAULT_AVATAR_LIMIT: u32 = 36;

/// Each group's header (emoji + count button) takes about as much room as
/// three avatars, so every additional group shrinks the shared budget.
pub const DEFAULT_HEADER_COST: u32 = 3;

/// Logical pixel size of a synthesized avatar, before pixel-ratio scaling.
pub const DEFAULT_AVATAR_BASE_SIZE: u32 = 20;

/// Share of capacity beyond which the overlapped presentation kicks in.
pub const DEFAULT_NEAR_LIMIT_RATIO: f64 = 0.9;

fn default_avatar_limit() -> u32 {
    DEFAULT_AVATAR_LIMIT
}

fn default_header_cost() -> u32 {
    DEFAULT_HEADER_COST
}

fn default_avatar_base_size() -> u32 {
    DEFAULT_AVATAR_BASE_SIZE
}

fn default_near_limit_ratio() -> f64 {
    DEFAULT_NEAR_LIMIT_RATIO
}

// =============================================================================
// EngineConfig
// =============================================================================

/// Engine tunables. Hosts usually pass nothing and get the defaults; every
/// field deserializes independently so partial config objects work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_avatar_limit")]
    pub avatar_limit: u32,
    #[serde(default = "default_header_cost")]
    pub header_cost: u32,
    #[serde(default = "default_avatar_base_size")]
    pub avatar_base_size: u32,
    #[serde(default = "default_near_limit_ratio")]
    pub near_limit_ratio: f64,
    /// Plan avatar links without a navigation target. Firefox follows the
    /// link before the reaction button's click handler runs, so links there
    /// must carry no href at all.
    #[serde(default)]
    pub omit_link_href: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            avatar_limit: DEFAULT_AVATAR_LIMIT,
            header_cost: DEFAULT_HEADER_COST,
            avatar_base_size: DEFAULT_AVATAR_BASE_SIZE,
            near_limit_ratio: DEFAULT_NEAR_LIMIT_RATIO,
            omit_link_href: false,
        }
    }
}

impl EngineConfig {
    /// Defaults with the browser-family workaround derived from a user-agent
    /// string.
    pub fn for_user_agent(user_agent: &str) -> Self {
        Self {
            omit_link_href: user_agent.contains("Firefox/"),
            ..Self::default()
        }
    }

    /// Parse a config from JSON, filling missing fields with defaults.
    pub fn from_json(json: &str) -> crate::avatars::error::Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| crate::avatars::error::EngineError::Config(e.to_string()))
    }

    /// Shared avatar budget for a roster with `group_count` reaction groups:
    /// the fixed ceiling minus each group's header overhead, clamped at zero.
    pub fn capacity_for(&self, group_count: usize) -> usize {
        (self.avatar_limit as usize).saturating_sub(self.header_cost as usize * group_count)
    }

    /// Near-limit threshold in avatar-count units for a given capacity.
    pub fn near_limit_threshold(&self, capacity: usize) -> f64 {
        capacity as f64 * self.near_limit_ratio
    }
}

// =============================================================================
// Tests
// =============================================================================
