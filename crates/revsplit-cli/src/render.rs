//! Human-readable and JSON rendering of a traffic block.

use revsplit_core::ServiceConfig;

use crate::OutputFormat;

pub fn render(config: &ServiceConfig, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&config.traffic)?)),
        OutputFormat::Text => Ok(format_traffic(config)),
    }
}

pub fn format_traffic(config: &ServiceConfig) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Service: {} (namespace {})\n",
        config.service.name, config.service.namespace
    ));

    if config.traffic.is_empty() {
        out.push_str("  no traffic targets\n");
        return out;
    }

    out.push_str("Traffic:\n");
    for target in &config.traffic {
        let mut line = format!("  {:>4}%  {}", target.percent, target.address());
        if target.is_tagged() {
            line.push_str(&format!("  #{}", target.tag));
        }
        out.push_str(&line);
        out.push('\n');
    }

    out
}
