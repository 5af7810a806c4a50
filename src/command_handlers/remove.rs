use crate::config::Settings;
use anyhow::{bail, Context, Result};
use fs_err as fs;
use std::path::{Component, Path};

pub fn remove_version(settings: &Settings, version: &str) -> Result<()> {
    let mut parts = Path::new(version).components();
    if !matches!((parts.next(), parts.next()), (Some(Component::Normal(_)), None)) {
        bail!("'{version}' is not a version directory name");
    }
    let dir = settings.version_dir(version);
    if !dir.exists() {
        log::warn!("{dir:?} does not exist; nothing to remove");
        return Ok(());
    }
    fs::remove_dir_all(&dir).with_context(|| format!("Error removing version {version:?}"))?;
    println!("Removed {version}");
    Ok(())
}
