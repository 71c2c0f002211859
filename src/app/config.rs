//! User configuration stored as TOML in the platform config directory.
//!
//! ```toml
//! [title]
//! template = "{activeWindow} - {appName} - {gitBranch}"
//! auto_update = true
//!
//! [linker]
//! prefixes = ["MyName"]
//! ignored_assemblies = ["IgnoredAssembly"]
//!
//! [windows."Lazy Tools"]
//! layout = "sidebar"
//! sidebar_width = 240.0
//! ```
//!
//! Every field is optional. A missing file yields the defaults; a malformed one is
//! reported and replaced by the defaults so start-up never fails on configuration.

use crate::app::linker::LinkXmlSettings;
use crate::app::title_template::TitleSettings;
use crate::app::tool_window::WindowLayout;
use crate::log_warn;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "config.toml";

/// Layout and sizing of one tool window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolWindowSettings {
    /// Overrides the layout the window was created with
    pub layout: Option<WindowLayout>,
    pub sidebar_width: f32,
    pub min_sidebar_width: f32,
    pub min_content_width: f32,
    pub min_width: f32,
    pub min_height: f32,
    pub resize_handle_width: f32,
}

impl Default for ToolWindowSettings {
    fn default() -> Self {
        Self {
            layout: None,
            sidebar_width: 200.0,
            min_sidebar_width: 100.0,
            min_content_width: 200.0,
            min_width: 400.0,
            min_height: 300.0,
            resize_handle_width: 5.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub title: TitleSettings,
    pub linker: LinkXmlSettings,
    pub windows: BTreeMap<String, ToolWindowSettings>,
}

impl ToolsConfig {
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "", "lazytools")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from the default location, falling back to defaults on any problem
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            log_warn!("Could not determine config directory, using default settings");
            return Self::default();
        };

        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log_warn!("Ignoring config file {:?}: {:#}", path, e);
                Self::default()
            }
        }
    }

    /// Load from `path`; a missing file is not an error
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_path().context("Could not determine config directory")?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    /// Settings for `window_name`, defaults when the file does not mention it
    pub fn window_settings(&self, window_name: &str) -> ToolWindowSettings {
        self.windows.get(window_name).cloned().unwrap_or_default()
    }
}
