//! Traffic model — an ordered, mutable traffic block.
//!
//! Targets can be addressed three ways: by revision name, by tag, or via the
//! single latest-revision target. Every mutation keeps the relative order of
//! targets; only [`ServiceTraffic::prune_null`] removes entries.

use crate::types::TrafficTarget;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceTraffic {
    targets: Vec<TrafficTarget>,
}

impl ServiceTraffic {
    pub fn new(targets: Vec<TrafficTarget>) -> Self {
        Self { targets }
    }

    pub fn targets(&self) -> &[TrafficTarget] {
        &self.targets
    }

    pub fn into_targets(self) -> Vec<TrafficTarget> {
        self.targets
    }

    pub fn push(&mut self, target: TrafficTarget) {
        self.targets.push(target);
    }

    pub fn is_tag_present(&self, tag: &str) -> bool {
        self.position_by_tag(tag).is_some()
    }

    pub fn is_tag_present_on_latest(&self, tag: &str) -> bool {
        !tag.is_empty()
            && self
                .targets
                .iter()
                .any(|t| t.latest_revision && t.tag == tag)
    }

    pub fn is_tag_present_on_revision(&self, tag: &str, revision: &str) -> bool {
        !tag.is_empty()
            && self
                .targets
                .iter()
                .any(|t| !t.latest_revision && t.revision_name == revision && t.tag == tag)
    }

    pub fn is_revision_present(&self, revision: &str) -> bool {
        self.targets
            .iter()
            .any(|t| !t.latest_revision && t.revision_name == revision)
    }

    pub fn is_latest_present(&self) -> bool {
        self.position_latest().is_some()
    }

    /// Clear the tag of the first target carrying it.
    pub fn untag(&mut self, tag: &str) {
        if let Some(i) = self.position_by_tag(tag) {
            self.targets[i].tag.clear();
        }
    }

    /// Tag the target pinned to `revision`, appending one with no traffic if absent.
    pub fn tag_revision(&mut self, tag: &str, revision: &str) {
        match self
            .targets
            .iter()
            .position(|t| !t.latest_revision && t.revision_name == revision)
        {
            Some(i) => self.targets[i].tag = tag.to_string(),
            None => self.targets.push(TrafficTarget::revision(revision, tag, 0)),
        }
    }

    /// Tag the latest-revision target, appending one with no traffic if absent.
    pub fn tag_latest(&mut self, tag: &str) {
        match self.position_latest() {
            Some(i) => self.targets[i].tag = tag.to_string(),
            None => self.targets.push(TrafficTarget::latest(tag, 0)),
        }
    }

    /// Set the percent on every target pinned to `revision`.
    pub fn set_percent_by_revision(&mut self, revision: &str, percent: u32) {
        for target in self
            .targets
            .iter_mut()
            .filter(|t| !t.latest_revision && t.revision_name == revision)
        {
            target.percent = percent;
        }
    }

    pub fn set_percent_by_tag(&mut self, tag: &str, percent: u32) {
        if let Some(i) = self.position_by_tag(tag) {
            self.targets[i].percent = percent;
        }
    }

    pub fn set_percent_by_latest(&mut self, percent: u32) {
        if let Some(i) = self.position_latest() {
            self.targets[i].percent = percent;
        }
    }

    pub fn reset_all_percents(&mut self) {
        for target in &mut self.targets {
            target.percent = 0;
        }
    }

    /// Drop targets with neither a tag nor traffic.
    pub fn prune_null(&mut self) {
        self.targets.retain(|t| !t.is_null());
    }

    pub fn total_percent(&self) -> u64 {
        self.targets.iter().map(|t| u64::from(t.percent)).sum()
    }

    fn position_by_tag(&self, tag: &str) -> Option<usize> {
        if tag.is_empty() {
            return None;
        }
        self.targets.iter().position(|t| t.tag == tag)
    }

    fn position_latest(&self) -> Option<usize> {
        self.targets.iter().position(|t| t.latest_revision)
    }
}

impl From<Vec<TrafficTarget>> for ServiceTraffic {
    fn from(targets: Vec<TrafficTarget>) -> Self {
        Self::new(targets)
    }
}
