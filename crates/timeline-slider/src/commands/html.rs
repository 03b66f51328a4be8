use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use tracing::info;

use crate::config::Config;
use crate::markup;
use crate::slider::{CharCellMeasure, SliderInstance, Viewport};
use crate::source;

pub fn run(file: &Path, viewport: Viewport, output: Option<&Path>) -> anyhow::Result<()> {
    let records = source::load(file)?;
    let policy = Config::load_or_default().policy();
    let instance = SliderInstance::init(records, policy, viewport, &CharCellMeasure::default());
    let html = markup::render(&instance.snapshot());

    match output {
        Some(path) => {
            std::fs::write(path, &html)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), bytes = html.len(), "wrote slider markup");
            eprintln!(
                "{} {} ({} slides, {} groups)",
                "Wrote".green().bold(),
                path.display(),
                instance.slide_count(),
                instance.groups().len()
            );
        }
        None => println!("{html}"),
    }
    Ok(())
}
