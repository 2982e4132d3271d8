//! Module listings from the external inventory command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::Manifest;
use crate::util::fs::{read_to_string, write_string};
use crate::util::{Config, ProcessBuilder};

/// Path the listing for `version` is saved to.
pub fn listing_path(config: &Config, version: &str) -> PathBuf {
    config.paths.listing_dir.join(format!("{}.txt", version))
}

/// Run the inventory command for `version` and save its output.
///
/// The exit code is logged but does not abort: whatever the command
/// printed is saved and parsed. Returns the path of the saved listing.
pub fn fetch_listing(config: &Config, version: &str) -> Result<PathBuf> {
    let inventory = &config.inventory;
    let cmd = ProcessBuilder::new(&inventory.program)
        .args(&inventory.args)
        .arg(format!("{}{}", inventory.base_flag, version));

    tracing::info!("Running command: {}", cmd.display_command());
    let output = cmd.exec()?;

    match output.status.code() {
        Some(0) => tracing::info!("Return Code: 0"),
        Some(code) => tracing::warn!("Return Code: {}", code),
        None => tracing::warn!("`{}` terminated by a signal", cmd.display_command()),
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.is_empty() {
        tracing::debug!("stdout:\n{}", stdout);
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.is_empty() {
        tracing::debug!("stderr:\n{}", stderr);
    }

    let path = listing_path(config, version);
    write_string(&path, &stdout)?;
    Ok(path)
}

/// Read and parse a saved listing.
pub fn load_listing(path: &Path) -> Result<Manifest> {
    let contents = read_to_string(path)?;
    let manifest = Manifest::parse_str(&contents)?;
    tracing::debug!("Loaded {} entries from {}", manifest.len(), path.display());
    Ok(manifest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &Path) -> Config {
        let mut config = Config::default();
        config.paths.listing_dir = dir.join("listings");
        config
    }

    #[test]
    #[cfg(unix)]
    fn test_fetch_listing_saves_stdout() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_in(tmp.path());
        config.inventory.program = "echo".to_string();
        config.inventory.args = vec!["asyn/R4.39".to_string()];

        let path = fetch_listing(&config, "R7.0").unwrap();

        assert_eq!(path, tmp.path().join("listings/R7.0.txt"));
        let manifest = load_listing(&path).unwrap();
        assert_eq!(manifest.get("asyn/R4.39"), Some("--base=R7.0"));
    }

    #[test]
    #[cfg(unix)]
    fn test_fetch_listing_tolerates_failure() {
        let tmp = TempDir::new().unwrap();
        let mut config = config_in(tmp.path());
        config.inventory.program = "false".to_string();
        config.inventory.args = Vec::new();

        let path = fetch_listing(&config, "R7.0").unwrap();

        assert!(load_listing(&path).unwrap().is_empty());
    }

    #[test]
    fn test_load_listing_rejects_malformed_line() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("bad.txt");
        std::fs::write(&path, "asyn/R4.39 x\nbroken\n").unwrap();

        let err = load_listing(&path).unwrap_err();
        assert!(err.to_string().contains("malformed listing line 2"));
    }
}
