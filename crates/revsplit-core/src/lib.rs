//! revsplit core — resolve tag, untag and percent directives into a new
//! traffic block for a revisioned service.
//!
//! # Components
//!
//! - **`directive`** — `address=value` parsing and the raw flag holder
//! - **`validate`** — batch-level checks before any mutation
//! - **`traffic`** — the ordered traffic block and its mutations
//! - **`compute`** — the resolver pipeline (untag → tag → percent → prune)
//! - **`config`** — service.toml parsing and invariant checks

pub mod compute;
pub mod config;
pub mod directive;
pub mod error;
pub mod traffic;
pub mod types;
pub mod validate;

pub use compute::{compute, compute_batch};
pub use config::{ConfigError, ServiceConfig, ServiceMeta};
pub use directive::{DirectiveBatch, PercentDirective, TagDirective, TargetRef, TrafficFlags};
pub use error::TrafficError;
pub use traffic::ServiceTraffic;
pub use types::{LATEST_REVISION_REF, TrafficTarget};
pub use validate::verify_input_sanity;
