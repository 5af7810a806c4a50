use crate::config::{load_pins, Settings};
use crate::pin::PinList;
use anyhow::{Context, Result};
use fs_err as fs;
use std::cmp::Ordering;
use std::path::Path;

pub fn list_versions(settings: &Settings) -> Result<()> {
    let installed = installed_versions(settings)?;
    if installed.is_empty() {
        println!("No versions installed in {}", settings.versions_dir.display());
    }
    let pins = if settings.pins_path.exists() {
        load_pins(settings)?
    } else {
        PinList::default()
    };
    for version in &installed {
        println!("{}", version_line(version, &settings.version_dir(version), &pins));
    }
    Ok(())
}

/// A version, followed by the patterns of any pins that launch from `dir`.
fn version_line(version: &str, dir: &Path, pins: &PinList) -> String {
    let users: Vec<String> = pins
        .iter()
        .filter(|p| p.executable().starts_with(dir))
        .map(|p| p.pattern().join(" "))
        .collect();
    if users.is_empty() {
        version.to_string()
    } else {
        format!("{version}  <- {}", users.join(", "))
    }
}

/// Directory names under the versions dir, newest release first.
pub fn installed_versions(settings: &Settings) -> Result<Vec<String>> {
    if !settings.versions_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(&settings.versions_dir).context("reading versions directory")? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort_by(|a, b| newest_first(a, b));
    Ok(names)
}

// Parsable versions sort descending ahead of anything else, which sorts by name.
fn newest_first(a: &str, b: &str) -> Ordering {
    match (semver::Version::parse(a), semver::Version::parse(b)) {
        (Ok(va), Ok(vb)) => vb.cmp(&va),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installed_versions_sorted_newest_first() {
        let temp = tempfile::tempdir().unwrap();
        let s = Settings {
            config_dir: temp.path().to_path_buf(),
            pins_path: temp.path().join("pins.cfg"),
            versions_dir: temp.path().join("versions"),
        };
        for v in ["99.0.0", "135.0.0", "custom", "102.0.0"] {
            std::fs::create_dir_all(s.version_dir(v)).unwrap();
        }
        std::fs::write(s.versions_dir.join("notes.txt"), "x").unwrap();

        assert_eq!(
            installed_versions(&s).unwrap(),
            ["135.0.0", "102.0.0", "99.0.0", "custom"]
        );
        list_versions(&s).unwrap();
    }

    #[test]
    fn test_missing_versions_dir_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let s = Settings {
            config_dir: temp.path().to_path_buf(),
            pins_path: temp.path().join("pins.cfg"),
            versions_dir: temp.path().join("versions"),
        };
        assert!(installed_versions(&s).unwrap().is_empty());
    }

    #[test]
    fn test_version_line_names_pins_using_it() {
        let temp = tempfile::tempdir().unwrap();
        let versions = temp.path().join("versions");
        let pins = crate::config::parse_pins(
            "gcloud compute: 135.0.0\ngcloud app deploy: 135.0.0 beta\ngcloud sql: 102.0.0\n",
            &versions,
        )
        .unwrap();

        assert_eq!(
            version_line("135.0.0", &versions.join("135.0.0"), &pins),
            "135.0.0  <- gcloud compute, gcloud app deploy"
        );
        assert_eq!(
            version_line("102.0.0", &versions.join("102.0.0"), &pins),
            "102.0.0  <- gcloud sql"
        );
        assert_eq!(
            version_line("99.0.0", &versions.join("99.0.0"), &pins),
            "99.0.0"
        );
    }

    #[test]
    fn test_list_reads_pins_file_when_present() {
        let temp = tempfile::tempdir().unwrap();
        let s = Settings {
            config_dir: temp.path().to_path_buf(),
            pins_path: temp.path().join("pins.cfg"),
            versions_dir: temp.path().join("versions"),
        };
        std::fs::create_dir_all(s.version_dir("135.0.0")).unwrap();
        std::fs::write(&s.pins_path, "gcloud compute: 135.0.0\n").unwrap();
        list_versions(&s).unwrap();

        std::fs::write(&s.pins_path, "not a pin\n").unwrap();
        assert!(list_versions(&s).is_err());
    }
}
