//! Traffic split resolution.
//!
//! Directives are applied as ordered passes over a single traffic block so
//! each pass sees the full effect of the previous one:
//!
//! 1. untag
//! 2. tag `@latest`, 3. tag named revisions (one pass, in input order)
//! 4. percent for `@latest`, 5. percent for tags and revisions (one pass)
//!
//! Untagging first frees tags before they are re-placed, and percents come
//! last so they can address targets created by tagging.

use crate::directive::{DirectiveBatch, TargetRef, TrafficFlags};
use crate::error::TrafficError;
use crate::traffic::ServiceTraffic;
use crate::types::TrafficTarget;
use crate::validate::verify_input_sanity;

/// Resolve `flags` against the existing traffic block.
///
/// `percent_was_set` resets every existing percent before `--traffic`
/// directives apply, since the command line describes the desired split in
/// full. On error nothing is returned; the caller keeps its original block.
pub fn compute(
    targets: Vec<TrafficTarget>,
    flags: &TrafficFlags,
    percent_was_set: bool,
) -> Result<Vec<TrafficTarget>, TrafficError> {
    let batch = verify_input_sanity(flags, percent_was_set)?;
    compute_batch(targets, &batch)
}

/// Resolve an already validated batch.
pub fn compute_batch(
    targets: Vec<TrafficTarget>,
    batch: &DirectiveBatch,
) -> Result<Vec<TrafficTarget>, TrafficError> {
    let mut traffic = ServiceTraffic::new(targets);

    apply_untags(&mut traffic, &batch.untag_directives);
    apply_tags(&mut traffic, batch)?;
    if batch.percent_was_set {
        apply_percents(&mut traffic, batch);
    }

    traffic.prune_null();
    Ok(traffic.into_targets())
}

fn apply_untags(traffic: &mut ServiceTraffic, tags: &[String]) {
    for tag in tags {
        traffic.untag(tag);
    }
}

fn apply_tags(traffic: &mut ServiceTraffic, batch: &DirectiveBatch) -> Result<(), TrafficError> {
    for directive in &batch.tag_directives {
        let tag = directive.tag.as_str();
        match &directive.target {
            TargetRef::Latest => {
                if traffic.is_tag_present_on_latest(tag) {
                    continue;
                }
                if traffic.is_tag_present(tag) {
                    return Err(TrafficError::TagOverwrite(tag.to_string()));
                }
                traffic.tag_latest(tag);
            }
            TargetRef::Name(revision) => {
                if traffic.is_tag_present_on_revision(tag, revision) {
                    continue;
                }
                if traffic.is_tag_present(tag) {
                    return Err(TrafficError::TagOverwrite(tag.to_string()));
                }
                traffic.tag_revision(tag, revision);
            }
        }
    }
    Ok(())
}

fn apply_percents(traffic: &mut ServiceTraffic, batch: &DirectiveBatch) {
    traffic.reset_all_percents();

    for directive in &batch.percent_directives {
        let percent = directive.percent;
        match &directive.target {
            TargetRef::Latest => {
                if traffic.is_latest_present() {
                    traffic.set_percent_by_latest(percent);
                } else {
                    traffic.push(TrafficTarget::latest("", percent));
                }
            }
            // A tag wins over a revision of the same name; tags are unique.
            TargetRef::Name(name) => {
                if traffic.is_tag_present(name) {
                    traffic.set_percent_by_tag(name, percent);
                } else if traffic.is_revision_present(name) {
                    traffic.set_percent_by_revision(name, percent);
                } else {
                    traffic.push(TrafficTarget::revision(name, "", percent));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(traffic: &[&str], tags: &[&str], untag: &[&str]) -> TrafficFlags {
        let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
        TrafficFlags {
            revisions_percentages: owned(traffic),
            revisions_tags: owned(tags),
            untag_revisions: owned(untag),
        }
    }

    #[test]
    fn tag_beats_revision_on_name_collision() {
        let existing = vec![
            TrafficTarget::revision("blue", "", 100),
            TrafficTarget::revision("echo-v2", "blue", 0),
        ];
        let out = compute(existing, &flags(&["blue=100"], &[], &[]), true).unwrap();
        assert_eq!(out, vec![TrafficTarget::revision("echo-v2", "blue", 100)]);
    }

    #[test]
    fn unknown_revision_is_appended() {
        let existing = vec![TrafficTarget::latest("", 100)];
        let out = compute(existing, &flags(&["@latest=50", "echo-v9=50"], &[], &[]), true).unwrap();
        assert_eq!(
            out,
            vec![
                TrafficTarget::latest("", 50),
                TrafficTarget::revision("echo-v9", "", 50),
            ]
        );
    }

    #[test]
    fn percents_untouched_without_traffic_flag() {
        let existing = vec![
            TrafficTarget::latest("", 60),
            TrafficTarget::revision("echo-v1", "", 40),
        ];
        let out = compute(existing.clone(), &flags(&[], &["echo-v1=old"], &[]), false).unwrap();
        assert_eq!(out[0], existing[0]);
        assert_eq!(out[1], TrafficTarget::revision("echo-v1", "old", 40));
    }

    #[test]
    fn percent_reset_prunes_untagged_targets() {
        let existing = vec![
            TrafficTarget::latest("", 50),
            TrafficTarget::revision("echo-v1", "", 50),
            TrafficTarget::revision("echo-v0", "stale", 0),
        ];
        let out = compute(existing, &flags(&["echo-v1=100"], &[], &[]), true).unwrap();
        assert_eq!(
            out,
            vec![
                TrafficTarget::revision("echo-v1", "", 100),
                TrafficTarget::revision("echo-v0", "stale", 0),
            ]
        );
    }

    #[test]
    fn overwrite_error_leaves_no_partial_result() {
        let existing = vec![
            TrafficTarget::latest("latest", 2),
            TrafficTarget::revision("echo-v2", "stable", 98),
        ];
        let err = compute(existing, &flags(&[], &["echo-v3=new", "echo-v2=latest"], &[]), false)
            .unwrap_err();
        assert_eq!(err, TrafficError::TagOverwrite("latest".into()));
    }

    #[test]
    fn compute_is_deterministic() {
        let existing = vec![
            TrafficTarget::latest("current", 70),
            TrafficTarget::revision("echo-v1", "", 30),
        ];
        let f = flags(&["current=20", "echo-v1=80"], &["echo-v1=prev"], &[]);
        assert_eq!(
            compute(existing.clone(), &f, true),
            compute(existing, &f, true)
        );
    }
}
