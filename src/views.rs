//! Saved filter views.
//!
//! A view is a named filter preset stored as TOML, one file per view:
//!
//! ```toml
//! [view]
//! name = "my-breaches"
//! description = "Urgent work past its SLA"
//! priority = "urgent"
//! sla = "breached"
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::filter::{FilterParams, RecordFilter};

/// Top-level TOML wrapper.
#[derive(Debug, Deserialize)]
struct ViewFile {
    view: SavedView,
}

/// A named filter preset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SavedView {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub params: FilterParams,
}

impl SavedView {
    /// Interpret the stored parameters as a filter.
    pub fn filter(&self) -> Result<RecordFilter> {
        RecordFilter::from_params(&self.params)
            .map_err(|e| Error::InvalidFilter(format!("view {}: {e}", self.name)))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: ViewFile =
            toml::from_str(content).map_err(|e| Error::Config(format!("bad view: {e}")))?;
        Ok(file.view)
    }
}

/// Registry of saved views, indexed by name.
#[derive(Debug, Default)]
pub struct ViewRegistry {
    views: BTreeMap<String, SavedView>,
}

impl ViewRegistry {
    /// Load all `.toml` files from a directory. A missing directory yields
    /// an empty registry; an unreadable or malformed file is an error.
    pub fn load_from_dir(dir: &Path) -> Result<Self> {
        let mut views = BTreeMap::new();

        if !dir.exists() {
            debug!(dir = %dir.display(), "no views directory");
            return Ok(Self { views });
        }

        let entries = std::fs::read_dir(dir)
            .map_err(|e| Error::Config(format!("cannot read views dir {}: {e}", dir.display())))?;

        for entry in entries {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                let content = std::fs::read_to_string(&path)?;
                let view = SavedView::from_toml(&content)
                    .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
                // Fail early on presets that could never be applied.
                view.filter()
                    .map_err(|e| Error::Config(format!("{}: {e}", path.display())))?;
                debug!(name = %view.name, path = %path.display(), "view loaded");
                views.insert(view.name.clone(), view);
            }
        }

        Ok(Self { views })
    }

    /// Look up a view by name.
    pub fn get(&self, name: &str) -> Option<&SavedView> {
        self.views.get(name)
    }

    /// View names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.views.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SavedView> {
        self.views.values()
    }

    pub fn len(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }
}
