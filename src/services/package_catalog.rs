//! Package metadata lookup
//!
//! Stands in for the OS package manager: given an application id, returns
//! its registered label and system flags if the package is known.
//! An absent answer is a normal outcome and callers fall back to heuristics.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::types::{AppTrackError, PackageInfo, Result};

/// Capability for resolving OS package metadata
pub trait PackageLookup: Send + Sync {
    /// Metadata for `application_id`, or `None` if the lookup fails
    fn package_info(&self, application_id: &str) -> Option<PackageInfo>;
}

/// Lookup that never knows anything; every id falls through to heuristics
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPackageMetadata;

impl PackageLookup for NoPackageMetadata {
    fn package_info(&self, _application_id: &str) -> Option<PackageInfo> {
        None
    }
}

/// Package metadata loaded from a JSON snapshot (`{"<id>": {"label": .., "system": ..}}`)
#[derive(Debug, Default, Clone)]
pub struct PackageCatalog {
    packages: HashMap<String, PackageInfo>,
}

impl PackageCatalog {
    /// Build a catalog from in-memory entries
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, PackageInfo)>,
        S: Into<String>,
    {
        Self {
            packages: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    /// Load a catalog snapshot from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let packages: HashMap<String, PackageInfo> = serde_json::from_str(&content)
            .map_err(|e| AppTrackError::Parse(format!("{}: {}", path.display(), e)))?;
        tracing::debug!(count = packages.len(), path = %path.display(), "loaded package catalog");
        Ok(Self { packages })
    }

    /// Load a catalog if one exists, otherwise an empty one.
    ///
    /// An unreadable snapshot is logged and treated as empty.
    pub fn load_or_empty(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(catalog) => catalog,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring package catalog");
                Self::default()
            }
        }
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

impl PackageLookup for PackageCatalog {
    fn package_info(&self, application_id: &str) -> Option<PackageInfo> {
        self.packages.get(application_id).cloned()
    }
}
