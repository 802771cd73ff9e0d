//! `revsplit update` — apply traffic directives to a service file.

use std::path::Path;

use anyhow::{Context, Result, bail};
use revsplit_core::{ServiceConfig, TrafficFlags, TrafficTarget};
use tracing::{debug, info};

use crate::OutputFormat;
use crate::render;

pub fn update(path: &str, flags: &TrafficFlags, dry_run: bool, format: OutputFormat) -> Result<()> {
    if !flags.changed() {
        bail!("at least one of --traffic, --tag or --untag is required");
    }

    let path = Path::new(path);
    let mut config = load_service(path)?;
    let traffic = apply(&config, flags)?;

    info!(
        service = %config.service.name,
        before = config.traffic.len(),
        after = traffic.len(),
        "resolved traffic block"
    );
    config.traffic = traffic;

    if dry_run {
        debug!(file = %path.display(), "dry run, service file left untouched");
    } else {
        config
            .write_to(path)
            .with_context(|| format!("write service file {}", path.display()))?;
        info!(file = %path.display(), "updated service file");
    }

    print!("{}", render::render(&config, format)?);
    Ok(())
}

/// Load a service file and check its traffic block.
pub fn load_service(path: &Path) -> Result<ServiceConfig> {
    let config = ServiceConfig::from_file(path)
        .with_context(|| format!("read service file {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("invalid traffic block in {}", path.display()))?;
    debug!(
        service = %config.service.name,
        targets = config.traffic.len(),
        "loaded service file"
    );
    Ok(config)
}

/// Run the resolver over a copy of the service's traffic block.
fn apply(config: &ServiceConfig, flags: &TrafficFlags) -> Result<Vec<TrafficTarget>> {
    debug!(
        traffic = flags.revisions_percentages.len(),
        tag = flags.revisions_tags.len(),
        untag = flags.untag_revisions.len(),
        "applying directives"
    );
    let traffic = revsplit_core::compute(
        config.traffic.clone(),
        flags,
        flags.percentages_changed(),
    )?;
    Ok(traffic)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const SERVICE: &str = r#"
[service]
name = "echo"

[[traffic]]
revision_name = "echo-v1"
tag = "latest"
percent = 100
"#;

    fn flags(traffic: &[&str], tags: &[&str], untag: &[&str]) -> TrafficFlags {
        let owned = |v: &[&str]| v.iter().map(|s| s.to_string()).collect();
        TrafficFlags {
            revisions_percentages: owned(traffic),
            revisions_tags: owned(tags),
            untag_revisions: owned(untag),
        }
    }

    #[test]
    fn test_update_writes_resolved_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        fs::write(&path, SERVICE).unwrap();

        let f = flags(&["@latest=2", "echo-v1=98"], &[], &[]);
        update(path.to_str().unwrap(), &f, false, OutputFormat::Json).unwrap();

        let config = ServiceConfig::from_file(&path).unwrap();
        assert_eq!(
            config.traffic,
            vec![
                TrafficTarget::revision("echo-v1", "latest", 98),
                TrafficTarget::latest("", 2),
            ]
        );
    }

    #[test]
    fn test_dry_run_leaves_file_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        fs::write(&path, SERVICE).unwrap();

        let f = flags(&[], &[], &["latest"]);
        update(path.to_str().unwrap(), &f, true, OutputFormat::Text).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), SERVICE);
    }

    #[test]
    fn test_update_requires_a_directive() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        fs::write(&path, SERVICE).unwrap();

        let err = update(path.to_str().unwrap(), &TrafficFlags::default(), false, OutputFormat::Text)
            .unwrap_err();
        assert!(err.to_string().contains("--traffic"));
    }

    #[test]
    fn test_resolver_error_keeps_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        fs::write(&path, SERVICE).unwrap();

        let f = flags(&[], &["@latest=latest"], &[]);
        let err = update(path.to_str().unwrap(), &f, false, OutputFormat::Text).unwrap_err();
        assert!(err.to_string().contains("'--untag latest'"));
        assert_eq!(fs::read_to_string(&path).unwrap(), SERVICE);
    }

    #[test]
    fn test_load_rejects_invalid_block() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("service.toml");
        fs::write(
            &path,
            "[service]\nname = \"echo\"\n\n[[traffic]]\npercent = 100\n",
        )
        .unwrap();

        let err = load_service(&path).unwrap_err();
        assert!(format!("{err:#}").contains("neither a revision name"));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_service(&dir.path().join("missing.toml"));
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("missing.toml"));
    }
}
