//! Command implementations

pub mod demo;
pub mod info;
pub mod sample;

use anyhow::{Context, Result};
use log::info;
use skelanim::Rig;
use skelanim::description::RigDescription;
use std::path::Path;

/// Load a rig from a description file, or the built-in arm rig when no path is given
pub fn load_rig(path: Option<&Path>) -> Result<Rig> {
    match path {
        Some(path) => {
            let description = RigDescription::from_path(path).with_context(|| {
                format!("Failed to load rig description from {}", path.display())
            })?;
            description
                .to_rig()
                .with_context(|| format!("Invalid rig in {}", path.display()))
        }
        None => {
            info!("No rig file given, using the built-in arm rig");
            skelanim::demo::arm_rig().context("Failed to build the built-in arm rig")
        }
    }
}
