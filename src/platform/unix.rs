use crate::platform::PlatformOps;
use anyhow::{bail, Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::Command;

pub static UNIX_PLATFORM: Unix = Unix;

pub struct Unix;

impl PlatformOps for Unix {
    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir().or_else(|| std::env::var_os("HOME").map(PathBuf::from))
    }
    fn launcher_name(&self) -> &'static str {
        "gcloud"
    }
    fn is_sdk_launcher(&self, path: &Path) -> bool {
        // The SDK ships bin/gcloud as a POSIX shell script.
        const SHEBANG: &[u8] = b"#!/bin/sh";
        let mut head = [0u8; SHEBANG.len()];
        match std::fs::File::open(path).and_then(|mut f| f.read_exact(&mut head)) {
            Ok(()) => head == SHEBANG,
            Err(e) => {
                log::debug!("skipping candidate gcloud {path:?}: {e}");
                false
            }
        }
    }
    fn copy_tree(&self, from: &Path, to: &Path) -> Result<()> {
        let status = Command::new("cp")
            .arg("-r")
            .arg(from)
            .arg(to)
            .status()
            .with_context(|| format!("running cp -r {from:?} {to:?}"))?;
        if !status.success() {
            bail!("cp -r {from:?} {to:?} exited with {status}");
        }
        Ok(())
    }
}
