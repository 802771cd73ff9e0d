//! Errors raised while resolving traffic directives.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrafficError {
    #[error("expecting the value format in value1=value2, given {0}")]
    MalformedPair(String),
    #[error("error converting given {0} to integer value for traffic distribution")]
    NonIntegerPercent(String),
    #[error("repetition of identifier @latest is not allowed, use only once with {0} flag")]
    LatestRepeated(String),
    #[error("given traffic percents sum to {0}, want 100")]
    PercentSumNot100(u64),
    #[error(
        "refusing to overwrite existing tag in service, add flag '--untag {0}' in command to untag it"
    )]
    TagOverwrite(String),
}
