//! Graph configuration

use serde::{Deserialize, Serialize};

use crate::error::ModelResult;

/// How a single-valued member of a choice group treats a second value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupMemberPolicy {
    /// At most one entry per singleton member; adding another replaces it in place
    #[default]
    Enforce,
    /// Entries accumulate; readers see the first one
    Permissive,
}

/// Behaviour switches for a [`ModelGraph`](crate::ModelGraph)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Deliver notifications at all. When false, nothing is recorded.
    pub deliver: bool,
    /// Policy for single-valued choice group members
    pub single_group_members: GroupMemberPolicy,
    /// Reject containment assignments that would make a node its own ancestor
    pub detect_cycles: bool,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            deliver: true,
            single_group_members: GroupMemberPolicy::Enforce,
            detect_cycles: true,
        }
    }
}

impl GraphConfig {
    /// Create the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style setter for [`GraphConfig::single_group_members`]
    pub fn with_group_policy(mut self, policy: GroupMemberPolicy) -> Self {
        self.single_group_members = policy;
        self
    }

    /// Builder-style setter for [`GraphConfig::deliver`]
    pub fn with_delivery(mut self, deliver: bool) -> Self {
        self.deliver = deliver;
        self
    }
}
