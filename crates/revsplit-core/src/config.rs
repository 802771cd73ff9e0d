//! Service file (service.toml) parser.
//!
//! ```toml
//! [service]
//! name = "echo"
//!
//! [[traffic]]
//! latest_revision = true
//! tag = "current"
//! percent = 100
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::types::TrafficTarget;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub service: ServiceMeta,
    #[serde(default)]
    pub traffic: Vec<TrafficTarget>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceMeta {
    pub name: String,
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_namespace() -> String {
    "default".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("service name must not be empty")]
    EmptyServiceName,
    #[error("traffic target for revision {0} cannot also follow the latest revision")]
    LatestWithRevisionName(String),
    #[error("traffic target #{0} has neither a revision name nor latest_revision = true")]
    MissingRevisionName(usize),
    #[error("tag {0} is used by more than one traffic target")]
    DuplicateTag(String),
    #[error("more than one traffic target follows the latest revision")]
    MultipleLatest,
    #[error("traffic target #{index} has percent {percent}, want 0-100")]
    PercentOutOfRange { index: usize, percent: u32 },
}

impl ServiceConfig {
    pub fn new(name: &str, traffic: Vec<TrafficTarget>) -> Self {
        ServiceConfig {
            service: ServiceMeta {
                name: name.to_string(),
                namespace: default_namespace(),
            },
            traffic,
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: ServiceConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serialize to a sibling temp file, then rename over `path`.
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        let content = self.to_toml_string()?;
        let tmp = path.with_extension("toml.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Check the traffic block before it is handed to the resolver.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.service.name.trim().is_empty() {
            return Err(ConfigError::EmptyServiceName);
        }

        let mut tags = HashSet::new();
        let mut latest_seen = false;
        for (index, target) in self.traffic.iter().enumerate() {
            if target.latest_revision {
                if !target.revision_name.is_empty() {
                    return Err(ConfigError::LatestWithRevisionName(
                        target.revision_name.clone(),
                    ));
                }
                if latest_seen {
                    return Err(ConfigError::MultipleLatest);
                }
                latest_seen = true;
            } else if target.revision_name.is_empty() {
                return Err(ConfigError::MissingRevisionName(index));
            }

            if target.is_tagged() && !tags.insert(target.tag.as_str()) {
                return Err(ConfigError::DuplicateTag(target.tag.clone()));
            }

            if target.percent > 100 {
                return Err(ConfigError::PercentOutOfRange {
                    index,
                    percent: target.percent,
                });
            }
        }
        Ok(())
    }
}
