//! Class-based stylesheets
//!
//! ```toml
//! [rules.blackboard]
//! display = "flex"
//! flex-direction = "column"
//! min-width = 100
//!
//! [rules.scrollable]
//! overflow = "hidden"
//! ```

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::style::StyleRule;
use crate::template::TemplateError;

/// Ordered map of class name to style rule
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleSheet {
    #[serde(default)]
    rules: IndexMap<String, StyleRule>,
}

impl StyleSheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a TOML stylesheet; `origin` names the source in errors
    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self, TemplateError> {
        toml::from_str(source).map_err(|source| TemplateError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Add or replace the rule for a class
    pub fn with_rule(mut self, class: impl Into<String>, rule: StyleRule) -> Self {
        self.rules.insert(class.into(), rule);
        self
    }

    pub fn rule(&self, class: &str) -> Option<&StyleRule> {
        self.rules.get(class)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Merge the rules matching `classes` (in class order) into `into`
    pub fn apply<'a>(&self, classes: impl IntoIterator<Item = &'a str>, into: &mut StyleRule) {
        for class in classes {
            if let Some(rule) = self.rules.get(class) {
                into.merge(rule);
            }
        }
    }
}
