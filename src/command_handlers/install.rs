use crate::config::Settings;
use crate::default_sdk::{find_default_sdk, DefaultResolver};
use crate::platform::platform;
use anyhow::{bail, Context, Result};
use fs_err as fs;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use std::process::Command;
use std::time::Duration;

/// Clone the default SDK into `<versions>/<version>` and update the clone to `version`.
pub fn run_install(settings: &Settings, version: &str, resolver: &dyn DefaultResolver) -> Result<()> {
    check_version(version)?;
    let version_dir = settings.version_dir(version);
    if version_dir.exists() {
        bail!("Something is in the way at {version_dir:?}");
    }
    let sdk_dir = find_default_sdk(resolver)?;

    fs::create_dir_all(&settings.versions_dir)
        .with_context(|| format!("Could not create {:?}", settings.versions_dir))?;

    if let Err(e) = populate(&sdk_dir, &version_dir, version) {
        discard_partial(&version_dir);
        return Err(e);
    }
    log::info!("Install complete. Ignore the warnings about old versions of the tools.");
    Ok(())
}

fn populate(sdk_dir: &Path, version_dir: &Path, version: &str) -> Result<()> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_message(format!("Cloning the default SDK from {}", sdk_dir.display()));
    log::info!("Cloning the default SDK from {sdk_dir:?}");
    if let Err(e) = platform().copy_tree(sdk_dir, version_dir) {
        pb.finish_with_message("Clone FAILED");
        return Err(e.context("Could not clone default SDK"));
    }
    pb.finish_with_message(format!("Cloned into {}", version_dir.display()));

    log::info!("Updating the cloned SDK to version {version}");
    update_clone(version_dir, version).context("Could not update cloned SDK")
}

// A half-built clone would block the next install attempt.
fn discard_partial(version_dir: &Path) {
    if !version_dir.exists() {
        return;
    }
    match fs::remove_dir_all(version_dir) {
        Ok(()) => log::info!("Removed incomplete install at {version_dir:?}"),
        Err(e) => log::warn!(
            "Could not remove incomplete install at {version_dir:?} ({e}); \
             delete it by hand before retrying"
        ),
    }
}

// Only dotted release numbers; the value becomes a directory name.
fn check_version(version: &str) -> Result<()> {
    if semver::Version::parse(version).is_err() {
        bail!("'{version}' is not an SDK version (expected something like 135.0.0)");
    }
    Ok(())
}

fn update_clone(version_dir: &Path, version: &str) -> Result<()> {
    let gcloud = version_dir.join("bin").join(platform().launcher_name());
    let status = Command::new(&gcloud)
        .args(["components", "update", "-q", "--version", version])
        .status()
        .with_context(|| format!("running {gcloud:?}"))?;
    if !status.success() {
        bail!("{gcloud:?} components update exited with {status}");
    }
    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use std::path::PathBuf;

    struct Fixed(Option<PathBuf>);

    impl DefaultResolver for Fixed {
        fn resolve(&self) -> Option<PathBuf> {
            self.0.clone()
        }
    }

    fn settings(root: &Path) -> Settings {
        Settings {
            config_dir: root.to_path_buf(),
            pins_path: root.join("pins.cfg"),
            versions_dir: root.join("versions"),
        }
    }

    // A fake SDK whose launcher answers `info` with its own root and records updates.
    fn fake_sdk(root: &Path) -> PathBuf {
        fake_sdk_with_update(root, "exit 0")
    }

    fn fake_sdk_with_update(root: &Path, update_tail: &str) -> PathBuf {
        let sdk = root.join("google-cloud-sdk");
        let gcloud = sdk.join("bin/gcloud");
        std::fs::create_dir_all(gcloud.parent().unwrap()).unwrap();
        let script = format!(
            "#!/bin/sh\nif [ \"$1\" = info ]; then echo {}; exit 0; fi\necho \"$@\" > \"$(dirname \"$0\")/../updated\"\n{update_tail}\n",
            sdk.display()
        );
        std::fs::write(&gcloud, script).unwrap();
        std::fs::set_permissions(&gcloud, std::fs::Permissions::from_mode(0o755)).unwrap();
        gcloud
    }

    #[test]
    fn test_install_clones_and_updates() {
        let temp = tempfile::tempdir().unwrap();
        let gcloud = fake_sdk(temp.path());
        let s = settings(temp.path());

        run_install(&s, "135.0.0", &Fixed(Some(gcloud))).unwrap();

        let cloned = s.version_dir("135.0.0");
        assert!(cloned.join("bin/gcloud").is_file());
        let updated = std::fs::read_to_string(cloned.join("updated")).unwrap();
        assert_eq!(updated.trim(), "components update -q --version 135.0.0");
        assert!(!temp.path().join("google-cloud-sdk/updated").exists());
    }

    #[test]
    fn test_install_refuses_existing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let s = settings(temp.path());
        std::fs::create_dir_all(s.version_dir("135.0.0")).unwrap();
        let err = run_install(&s, "135.0.0", &Fixed(None)).unwrap_err();
        assert!(err.to_string().contains("Something is in the way"));
    }

    #[test]
    fn test_install_without_default_sdk_fails() {
        let temp = tempfile::tempdir().unwrap();
        let err = run_install(&settings(temp.path()), "135.0.0", &Fixed(None)).unwrap_err();
        assert!(err.to_string().contains("Could not find the default SDK"));
    }

    #[test]
    fn test_install_rejects_non_version() {
        let temp = tempfile::tempdir().unwrap();
        assert!(run_install(&settings(temp.path()), "../escape", &Fixed(None)).is_err());
        assert!(!temp.path().join("versions").exists());
    }

    #[test]
    fn test_failed_update_leaves_no_version_directory() {
        let temp = tempfile::tempdir().unwrap();
        let gcloud = fake_sdk_with_update(temp.path(), "exit 4");
        let s = settings(temp.path());

        let err = run_install(&s, "135.0.0", &Fixed(Some(gcloud.clone()))).unwrap_err();
        assert!(format!("{err:#}").contains("Could not update cloned SDK"));
        assert!(!s.version_dir("135.0.0").exists());
        assert!(s.versions_dir.is_dir());

        // nothing is in the way of a second attempt
        let err = run_install(&s, "135.0.0", &Fixed(Some(gcloud))).unwrap_err();
        assert!(!err.to_string().contains("Something is in the way"));
    }
}
