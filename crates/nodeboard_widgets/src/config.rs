//! Blackboard panel configuration
//!
//! ```toml
//! title = "Variables"
//! subtitle = "Shader Graph"
//! default-width = 240
//! clamp-to-parent-edges = true
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::assets;
use crate::error::{BlackboardError, Result};

/// Construction-time settings for a [`Blackboard`](crate::Blackboard)
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct PanelConfig {
    /// Initial title; `None` keeps the template's text
    pub title: Option<String>,
    /// Initial subtitle; `None` keeps the template's text
    pub subtitle: Option<String>,
    /// Width used when entering scrollable mode without a measured width
    pub default_width: f32,
    /// Height used when entering scrollable mode without a measured height
    pub default_height: f32,
    /// Smallest width the resize handle will produce
    pub min_width: f32,
    /// Smallest height the resize handle will produce
    pub min_height: f32,
    /// Keep the panel inside its parent while dragging
    pub clamp_to_parent_edges: bool,
    /// Template path handed to the loader
    pub template: String,
    /// Stylesheet path handed to the loader
    pub style_sheet: String,
    /// Start in scrollable mode
    pub scrollable: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: None,
            subtitle: None,
            default_width: 200.0,
            default_height: 400.0,
            min_width: 100.0,
            min_height: 60.0,
            clamp_to_parent_edges: true,
            template: assets::TEMPLATE_PATH.to_string(),
            style_sheet: assets::STYLE_SHEET_PATH.to_string(),
            scrollable: false,
        }
    }
}

impl PanelConfig {
    /// Parse a TOML document; `origin` names the source in errors
    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self> {
        toml::from_str(source).map_err(|source| BlackboardError::ConfigParse {
            origin: origin.to_string(),
            source,
        })
    }

    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| BlackboardError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, &path.display().to_string())
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn scrollable(mut self, scrollable: bool) -> Self {
        self.scrollable = scrollable;
        self
    }
}
