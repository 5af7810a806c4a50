use crate::error::TargetError;
use crate::rewrite::{Resolution, COMP_LINE_ENV, COMP_POINT_ENV};
use anyhow::{Context, Result};
use std::path::Path;
use std::process::{Command, ExitStatus};

pub fn validate_target(path: &Path) -> Result<(), TargetError> {
    match std::fs::metadata(path) {
        Err(_) => Err(TargetError::Missing(path.to_path_buf())),
        Ok(meta) if meta.is_dir() => Err(TargetError::IsDirectory(path.to_path_buf())),
        Ok(_) => Ok(()),
    }
}

/// Run the resolved command with inherited stdio and return its exit code.
pub fn run(resolution: &Resolution) -> Result<i32> {
    let target = resolution.executable();
    validate_target(&target)?;
    if resolution.pinned {
        log::info!("Using {target:?}");
    } else {
        log::info!("Using {target:?} (no pin applies)");
    }

    let mut cmd = Command::new(&target);
    cmd.args(&resolution.argv[1..]);
    if let Some(comp) = &resolution.completion {
        cmd.env(COMP_LINE_ENV, &comp.line);
        if let Some(point) = comp.point {
            cmd.env(COMP_POINT_ENV, point.to_string());
        }
    }
    let status = cmd
        .status()
        .with_context(|| format!("running {target:?}"))?;
    Ok(exit_code(status))
}

// Killed by a signal: no code to forward.
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}
