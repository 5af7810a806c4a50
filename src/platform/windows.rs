use crate::platform::PlatformOps;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

pub static WINDOWS_PLATFORM: Windows = Windows;

pub struct Windows;

impl PlatformOps for Windows {
    fn home_dir(&self) -> Option<PathBuf> { dirs::home_dir().or_else(|| std::env::var_os("USERPROFILE").map(PathBuf::from)) }
    fn launcher_name(&self) -> &'static str { "gcloud.cmd" }
    fn is_sdk_launcher(&self, path: &Path) -> bool { path.extension().map(|e| e.eq_ignore_ascii_case("cmd")).unwrap_or(false) }
    fn copy_tree(&self, from: &Path, to: &Path) -> Result<()> {
        // /I treats the missing destination as a directory
        let status = Command::new("xcopy").arg(from).arg(to).args(["/E", "/I", "/Q", "/H"]).status().with_context(|| format!("running xcopy {from:?} {to:?}"))?;
        if !status.success() { bail!("xcopy {from:?} {to:?} exited with {status}"); }
        Ok(())
    }
}
