pub fn platform() -> &'static dyn PlatformOps {
    &ConcretePlatform
}

use anyhow::Result;
use std::path::{Path, PathBuf};

pub trait PlatformOps: Sync + Send {
    fn home_dir(&self) -> Option<PathBuf>;
    /// File name of the SDK launcher inside `<sdk>/bin`.
    fn launcher_name(&self) -> &'static str;
    /// Whether a `gcloud` found on PATH is the real SDK launcher rather than a wrapper.
    fn is_sdk_launcher(&self, path: &Path) -> bool;
    /// Recursively copy an SDK tree to a destination that must not exist yet.
    fn copy_tree(&self, from: &Path, to: &Path) -> Result<()>;
}

#[cfg(unix)]
mod unix;
#[cfg(unix)]
pub use unix::UNIX_PLATFORM as ConcretePlatform;

#[cfg(windows)]
mod windows;
#[cfg(windows)]
pub use windows::WINDOWS_PLATFORM as ConcretePlatform;
