//! Configuration file support.
//!
//! Configuration is read from `epics-build-analysis.toml` in the working
//! directory unless another path is given. Every setting has a default
//! matching the standard AFS layout, so an absent file is fine:
//!
//! ```toml
//! [paths]
//! epics_root = "/afs/slac/g/lcls/epics"
//! package_top = "/afs/slac/g/lcls/package"
//! output_dir = "output"
//!
//! [inventory]
//! program = "epics-versions"
//! args = ["modules", "-a"]
//!
//! [universe]
//! iocs = true
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::{CategoryRoot, ItemKind};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "epics-build-analysis.toml";

/// Analysis configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Filesystem locations
    pub paths: PathsConfig,

    /// External inventory command
    pub inventory: InventoryConfig,

    /// Item categories included in the universe
    pub universe: UniverseConfig,
}

/// Filesystem locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory holding one subdirectory per EPICS base version
    pub epics_root: PathBuf,

    /// Directory holding system packages
    pub package_top: PathBuf,

    /// Kernel driver directory, relative to `package_top`
    pub kernel_modules_dir: PathBuf,

    /// Where inventory listings are saved
    pub listing_dir: PathBuf,

    /// Where reports and graphs are written
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            epics_root: PathBuf::from("/afs/slac/g/lcls/epics"),
            package_top: PathBuf::from("/afs/slac/g/lcls/package"),
            kernel_modules_dir: PathBuf::from("linuxKernel_Modules"),
            listing_dir: std::env::temp_dir().join("epics-build-analysis"),
            output_dir: PathBuf::from("output"),
        }
    }
}

/// External inventory command: `<program> <args...> <base_flag><version>`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub program: String,
    pub args: Vec<String>,
    pub base_flag: String,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        InventoryConfig {
            program: "epics-versions".to_string(),
            args: vec!["modules".to_string(), "-a".to_string()],
            base_flag: "--base=".to_string(),
        }
    }
}

/// Item categories included in the universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseConfig {
    pub modules: bool,
    pub iocs: bool,
    pub packages: bool,
    pub kernel_drivers: bool,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        UniverseConfig {
            modules: true,
            iocs: false,
            packages: false,
            kernel_drivers: false,
        }
    }
}

impl UniverseConfig {
    /// Enable one more category.
    pub fn include(&mut self, kind: ItemKind) {
        match kind {
            ItemKind::EpicsModule => self.modules = true,
            ItemKind::EpicsIoc => self.iocs = true,
            ItemKind::SystemPackage => self.packages = true,
            ItemKind::KernelDriver => self.kernel_drivers = true,
        }
    }

    pub fn includes(&self, kind: ItemKind) -> bool {
        match kind {
            ItemKind::EpicsModule => self.modules,
            ItemKind::EpicsIoc => self.iocs,
            ItemKind::SystemPackage => self.packages,
            ItemKind::KernelDriver => self.kernel_drivers,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// `<epics_root>/<base_version>`
    pub fn epics_top(&self, base_version: &str) -> PathBuf {
        self.paths.epics_root.join(base_version)
    }

    /// Category roots for a base version, in universe insertion order.
    pub fn category_roots(&self, base_version: &str) -> Vec<CategoryRoot> {
        let top = self.epics_top(base_version);

        [
            (top.join("modules"), ItemKind::EpicsModule),
            (top.join("..").join("iocTop"), ItemKind::EpicsIoc),
            (self.paths.package_top.clone(), ItemKind::SystemPackage),
            (
                self.paths.package_top.join(&self.paths.kernel_modules_dir),
                ItemKind::KernelDriver,
            ),
        ]
        .into_iter()
        .filter(|(_, kind)| self.universe.includes(*kind))
        .map(|(path, kind)| CategoryRoot::new(path, kind))
        .collect()
    }
}
