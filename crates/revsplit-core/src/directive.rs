//! Directive parsing — `address=value` pairs from `--traffic` and `--tag`.

use crate::error::TrafficError;
use crate::types::LATEST_REVISION_REF;

/// Raw directive strings as collected from the command line.
///
/// Each list keeps the order the user gave. Comma-separated values are
/// expected to be split by the caller before they land here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrafficFlags {
    /// `--traffic address=percent`
    pub revisions_percentages: Vec<String>,
    /// `--tag address=tag`
    pub revisions_tags: Vec<String>,
    /// `--untag tag`
    pub untag_revisions: Vec<String>,
}

impl TrafficFlags {
    /// Any `--traffic` directive given. Drives the percent reset in the resolver.
    pub fn percentages_changed(&self) -> bool {
        !self.revisions_percentages.is_empty()
    }

    /// Any `--tag` or `--untag` directive given.
    pub fn tags_changed(&self) -> bool {
        !self.revisions_tags.is_empty() || !self.untag_revisions.is_empty()
    }

    pub fn changed(&self) -> bool {
        self.percentages_changed() || self.tags_changed()
    }
}

/// What a directive's left-hand side points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetRef {
    /// The `@latest` marker.
    Latest,
    /// A revision name, or for `--traffic` also a tag.
    Name(String),
}

impl TargetRef {
    pub fn parse(address: &str) -> Self {
        if address == LATEST_REVISION_REF {
            TargetRef::Latest
        } else {
            TargetRef::Name(address.to_string())
        }
    }

    pub fn is_latest(&self) -> bool {
        matches!(self, TargetRef::Latest)
    }
}

/// Parsed `--traffic` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PercentDirective {
    pub target: TargetRef,
    pub percent: u32,
}

/// Parsed `--tag` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagDirective {
    pub target: TargetRef,
    pub tag: String,
}

/// Validated form of a single invocation's directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveBatch {
    pub percent_directives: Vec<PercentDirective>,
    pub tag_directives: Vec<TagDirective>,
    pub untag_directives: Vec<String>,
    pub percent_was_set: bool,
}

/// Split `left=right` at the `=` and strip one trailing `%` from the right side.
///
/// Exactly one `=` is accepted and both sides must be non-empty after trimming.
pub fn split_pair(raw: &str) -> Result<(&str, &str), TrafficError> {
    let malformed = || TrafficError::MalformedPair(raw.to_string());

    let (left, right) = raw.split_once('=').ok_or_else(malformed)?;
    if right.contains('=') {
        return Err(malformed());
    }
    let right = right.strip_suffix('%').unwrap_or(right);
    if left.is_empty() || right.is_empty() {
        return Err(malformed());
    }
    Ok((left, right))
}

/// Convert the right-hand side of a `--traffic` directive to a percent.
pub fn parse_percent(text: &str) -> Result<u32, TrafficError> {
    text.parse::<u32>()
        .map_err(|_| TrafficError::NonIntegerPercent(text.to_string()))
}
