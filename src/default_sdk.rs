//! Locating the SDK installation pincloud stands in front of.

use crate::pin::SENTINEL;
use crate::platform::platform;
use anyhow::{anyhow, Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Supplies the executable to run when no pin applies.
pub trait DefaultResolver {
    fn resolve(&self) -> Option<PathBuf>;
}

/// First real SDK launcher on a search path, skipping this binary and any
/// other wrapper installed as `gcloud`.
pub struct PathResolver {
    search_path: Option<OsString>,
    cwd: PathBuf,
}

impl PathResolver {
    pub fn from_env() -> Self {
        Self::new(std::env::var_os("PATH"))
    }

    pub fn new(search_path: Option<OsString>) -> Self {
        Self {
            search_path,
            cwd: std::env::current_dir().unwrap_or_default(),
        }
    }

    fn candidates(&self) -> Vec<PathBuf> {
        match which::which_in_all(SENTINEL, self.search_path.as_ref(), &self.cwd) {
            Ok(found) => found.collect(),
            Err(e) => {
                log::debug!("no {SENTINEL} on search path: {e}");
                Vec::new()
            }
        }
    }
}

impl DefaultResolver for PathResolver {
    fn resolve(&self) -> Option<PathBuf> {
        let me = std::env::current_exe()
            .and_then(|p| p.canonicalize())
            .ok();
        self.candidates().into_iter().find(|candidate| {
            let real = candidate.canonicalize().ok();
            if real.is_some() && real == me {
                log::debug!("skipping {candidate:?}: this is pincloud itself");
                return false;
            }
            platform().is_sdk_launcher(candidate)
        })
    }
}

/// Root directory of the SDK that `gcloud` belongs to, as reported by the SDK.
pub fn default_sdk_root(gcloud: &Path) -> Result<PathBuf> {
    let output = Command::new(gcloud)
        .args(["info", "--format=value(installation.sdk_root)"])
        .output()
        .with_context(|| format!("running {gcloud:?} info"))?;
    if !output.status.success() {
        return Err(anyhow!(
            "{gcloud:?} info exited with {}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        ));
    }
    let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if root.is_empty() {
        return Err(anyhow!("{gcloud:?} info reported no sdk root"));
    }
    Ok(PathBuf::from(root))
}

/// Root of the SDK whose launcher `resolver` finds.
pub fn find_default_sdk(resolver: &dyn DefaultResolver) -> Result<PathBuf> {
    let gcloud = resolver
        .resolve()
        .ok_or_else(|| anyhow!("Could not find the default SDK to clone"))?;
    default_sdk_root(&gcloud).inspect_err(|e| {
        log::warn!("Problem running default gcloud to find default sdk: {e:#}");
    })
}
