//! Batch-level checks over all directives of one invocation.
//!
//! Runs before any mutation and reports the first failure, in this order:
//! `--tag` pairs and `@latest` repetition, then `--traffic` pairs, integer
//! percents and `@latest` repetition, then the sum of percents.

use crate::directive::{
    DirectiveBatch, PercentDirective, TagDirective, TargetRef, TrafficFlags, parse_percent,
    split_pair,
};
use crate::error::TrafficError;

/// Parse and check every directive, producing the batch the resolver consumes.
pub fn verify_input_sanity(
    flags: &TrafficFlags,
    percent_was_set: bool,
) -> Result<DirectiveBatch, TrafficError> {
    let mut tag_directives = Vec::with_capacity(flags.revisions_tags.len());
    let mut latest_tagged = false;
    for raw in &flags.revisions_tags {
        let (address, tag) = split_pair(raw)?;
        let target = TargetRef::parse(address);
        if target.is_latest() {
            if latest_tagged {
                return Err(TrafficError::LatestRepeated("--tag".into()));
            }
            latest_tagged = true;
        }
        tag_directives.push(TagDirective {
            target,
            tag: tag.to_string(),
        });
    }

    let mut percent_directives = Vec::with_capacity(flags.revisions_percentages.len());
    let mut latest_split = false;
    let mut sum: u64 = 0;
    for raw in &flags.revisions_percentages {
        let (address, percent) = split_pair(raw)?;
        let percent = parse_percent(percent)?;
        let target = TargetRef::parse(address);
        if target.is_latest() {
            if latest_split {
                return Err(TrafficError::LatestRepeated("--traffic".into()));
            }
            latest_split = true;
        }
        sum += u64::from(percent);
        percent_directives.push(PercentDirective { target, percent });
    }

    if !percent_directives.is_empty() && sum != 100 {
        return Err(TrafficError::PercentSumNot100(sum));
    }

    Ok(DirectiveBatch {
        percent_directives,
        tag_directives,
        untag_directives: flags.untag_revisions.clone(),
        percent_was_set,
    })
}
