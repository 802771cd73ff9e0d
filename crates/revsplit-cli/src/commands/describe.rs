use std::path::Path;

use crate::OutputFormat;
use crate::commands::update::load_service;
use crate::render;

pub fn describe(path: &str, format: OutputFormat) -> anyhow::Result<()> {
    let config = load_service(Path::new(path))?;
    print!("{}", render::render(&config, format)?);
    Ok(())
}
