//! Shared types for routing targets.

use serde::{Deserialize, Serialize};

/// Literal address that refers to the latest ready revision.
pub const LATEST_REVISION_REF: &str = "@latest";

/// One row of a service's traffic block.
///
/// Exactly one of `revision_name` / `latest_revision` is meaningful: a target
/// either pins a concrete revision or follows the latest one.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrafficTarget {
    /// Concrete revision name. Empty when `latest_revision` is set.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub revision_name: String,
    /// Whether this target follows the latest ready revision.
    #[serde(default)]
    pub latest_revision: bool,
    /// Human-facing alias. Empty means untagged.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
    /// Share of traffic, 0-100.
    #[serde(default)]
    pub percent: u32,
}

impl TrafficTarget {
    /// Target pinned to a concrete revision.
    pub fn revision(revision: &str, tag: &str, percent: u32) -> Self {
        Self {
            revision_name: revision.to_string(),
            latest_revision: false,
            tag: tag.to_string(),
            percent,
        }
    }

    /// Target following the latest ready revision.
    pub fn latest(tag: &str, percent: u32) -> Self {
        Self {
            revision_name: String::new(),
            latest_revision: true,
            tag: tag.to_string(),
            percent,
        }
    }

    /// `@latest` for latest targets, the revision name otherwise.
    pub fn address(&self) -> &str {
        if self.latest_revision {
            LATEST_REVISION_REF
        } else {
            &self.revision_name
        }
    }

    pub fn is_tagged(&self) -> bool {
        !self.tag.is_empty()
    }

    /// Untagged targets with no traffic carry no information and get pruned.
    pub fn is_null(&self) -> bool {
        self.tag.is_empty() && self.percent == 0
    }
}
