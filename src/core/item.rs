//! Inspectable items - one release directory of a module, IOC, package or
//! kernel driver.
//!
//! The derived dependency sets are read from disk on first access and then
//! cached for the lifetime of the item.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::core::ItemId;
use crate::depfile::{self, DependencyMap, CONFIG_SITE_PATTERN, RELEASE_PATTERN};

/// The category an item was discovered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    EpicsModule,
    EpicsIoc,
    SystemPackage,
    KernelDriver,
}

impl ItemKind {
    /// Whether dependencies are declared through EPICS `configure/` files.
    pub fn has_epics_configure(self) -> bool {
        matches!(self, ItemKind::EpicsModule | ItemKind::EpicsIoc)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::EpicsModule => "epics_module",
            ItemKind::EpicsIoc => "epics_ioc",
            ItemKind::SystemPackage => "system_package",
            ItemKind::KernelDriver => "kernel_driver",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "epics_module" | "module" => Ok(ItemKind::EpicsModule),
            "epics_ioc" | "ioc" => Ok(ItemKind::EpicsIoc),
            "system_package" | "package" => Ok(ItemKind::SystemPackage),
            "kernel_driver" | "driver" => Ok(ItemKind::KernelDriver),
            _ => Err(format!("unknown item kind: {}", s)),
        }
    }
}

/// Memoized derived attributes of an item.
///
/// Each slot is filled at most once; nothing invalidates it afterwards.
#[derive(Debug, Default)]
struct DependencyCache {
    modules: OnceLock<DependencyMap>,
    packages: OnceLock<DependencyMap>,
    libraries: OnceLock<BTreeSet<String>>,
    produces: OnceLock<BTreeSet<String>>,
}

/// One inspectable unit, identified by (name, version).
#[derive(Debug)]
pub struct Item {
    id: ItemId,
    path: PathBuf,
    kind: ItemKind,
    cache: DependencyCache,
}

impl Item {
    /// Create a new item rooted at `path`.
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        version: impl Into<String>,
        kind: ItemKind,
    ) -> Self {
        Item {
            id: ItemId::new(name, version),
            path: path.into(),
            kind,
            cache: DependencyCache::default(),
        }
    }

    pub fn id(&self) -> &ItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }

    pub fn version(&self) -> &str {
        self.id.version()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> ItemKind {
        self.kind
    }

    /// Module dependencies pinned in `configure/RELEASE*`.
    pub fn modules_dependencies(&self) -> &DependencyMap {
        self.cache
            .modules
            .get_or_init(|| self.parse_configure(RELEASE_PATTERN))
    }

    /// Package dependencies pinned in `configure/CONFIG_SITE*`.
    pub fn package_dependencies(&self) -> &DependencyMap {
        self.cache
            .packages
            .get_or_init(|| self.parse_configure(CONFIG_SITE_PATTERN))
    }

    /// Libraries linked through `*_LIBS` variables in any Makefile.
    pub fn libraries_dependencies(&self) -> &BTreeSet<String> {
        self.cache
            .libraries
            .get_or_init(|| depfile::collect_library_dependencies(&self.path))
    }

    /// Libraries found under `lib/`.
    pub fn libraries_produces(&self) -> &BTreeSet<String> {
        self.cache
            .produces
            .get_or_init(|| depfile::collect_library_products(&self.path))
    }

    fn parse_configure(&self, pattern: &str) -> DependencyMap {
        if self.kind.has_epics_configure() {
            depfile::collect_dependencies(&self.path, pattern)
        } else {
            DependencyMap::new()
        }
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, contents: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    #[test]
    fn test_module_dependencies() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("configure/RELEASE"),
            "ASYN_MODULE_VERSION=R4.39\nASYN=$(EPICS_MODULES)/asyn/$(ASYN_MODULE_VERSION)\n",
        );
        write(
            &tmp.path().join("configure/CONFIG_SITE"),
            "HDF5_PACKAGE_VERSION=1.10\nHDF5=$(PACKAGE_SITE_TOP)/hdf5/$(HDF5_PACKAGE_VERSION)\n",
        );

        let item = Item::new(tmp.path(), "motor", "R7.0", ItemKind::EpicsModule);

        assert_eq!(item.to_string(), "motor|R7.0");
        assert_eq!(
            item.modules_dependencies().get("asyn").map(String::as_str),
            Some("R4.39")
        );
        assert_eq!(
            item.package_dependencies().get("hdf5").map(String::as_str),
            Some("1.10")
        );
    }

    #[test]
    fn test_dependencies_are_memoized() {
        let tmp = TempDir::new().unwrap();
        let release = tmp.path().join("configure/RELEASE");
        write(&release, "A_VERSION=1.0\nA=$(TOP)/a/$(A_VERSION)\n");

        let item = Item::new(tmp.path(), "m", "1", ItemKind::EpicsIoc);
        assert_eq!(item.modules_dependencies().len(), 1);

        fs::remove_file(&release).unwrap();
        assert_eq!(item.modules_dependencies().len(), 1);
    }

    #[test]
    fn test_non_epics_kinds_have_no_configure_dependencies() {
        let tmp = TempDir::new().unwrap();
        write(
            &tmp.path().join("configure/RELEASE"),
            "A_VERSION=1.0\nA=$(TOP)/a/$(A_VERSION)\n",
        );

        let item = Item::new(tmp.path(), "hdf5", "1.10", ItemKind::SystemPackage);

        assert!(item.modules_dependencies().is_empty());
        assert!(item.package_dependencies().is_empty());
    }

    #[test]
    fn test_libraries() {
        let tmp = TempDir::new().unwrap();
        write(&tmp.path().join("src/Makefile"), "x_LIBS += asyn\n");
        write(&tmp.path().join("lib/libmotor.so"), "");

        let item = Item::new(tmp.path(), "motor", "R7.0", ItemKind::KernelDriver);

        assert!(item.libraries_dependencies().contains("asyn"));
        assert!(item.libraries_produces().contains("motor"));
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("ioc".parse::<ItemKind>().unwrap(), ItemKind::EpicsIoc);
        assert_eq!(
            "kernel_driver".parse::<ItemKind>().unwrap(),
            ItemKind::KernelDriver
        );
        assert!("user_app".parse::<ItemKind>().is_err());
    }
}
