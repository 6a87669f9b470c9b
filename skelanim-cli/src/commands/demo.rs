//! Export of the built-in arm rig

use anyhow::{Context, Result};
use clap::ValueEnum;
use log::info;
use skelanim::description::{RigDescription, RigFormat};
use std::fs;
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum DescriptionFormat {
    Yaml,
    Json,
}

impl From<DescriptionFormat> for RigFormat {
    fn from(format: DescriptionFormat) -> Self {
        match format {
            DescriptionFormat::Yaml => RigFormat::Yaml,
            DescriptionFormat::Json => RigFormat::Json,
        }
    }
}

pub fn execute(output: Option<PathBuf>, format: DescriptionFormat) -> Result<()> {
    let rig = skelanim::demo::arm_rig().context("Failed to build the built-in arm rig")?;
    let text = RigDescription::from_rig(&rig)
        .to_text(format.into())
        .context("Failed to serialize the arm rig")?;

    match output {
        Some(path) => {
            fs::write(&path, text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote arm rig to {}", path.display());
            println!("✓ Wrote {}", path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
