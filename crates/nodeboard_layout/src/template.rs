//! Declarative element templates
//!
//! Templates are TOML documents describing an element subtree:
//!
//! ```toml
//! [root]
//! classes = ["card"]
//!
//! [[root.children]]
//! name = "titleLabel"
//! kind = "label"
//! text = "Untitled"
//! ```
//!
//! A [`TemplateLoader`] resolves template and stylesheet paths; hosts pick
//! where those come from (embedded strings, a directory on disk, ...).

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use nodeboard_core::ElementId;

use crate::element::ElementKind;
use crate::style::StyleRule;
use crate::stylesheet::StyleSheet;
use crate::tree::ElementTree;

/// Template loading errors
#[derive(Error, Debug)]
pub enum TemplateError {
    /// No template or stylesheet at the given path
    #[error("Template not found: {0}")]
    NotFound(String),

    /// Reading the file failed
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The document is not valid for its format
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

/// One element of a template
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TemplateNode {
    pub kind: ElementKind,
    pub name: Option<String>,
    pub classes: Vec<String>,
    pub text: Option<String>,
    pub style: Option<StyleRule>,
    pub children: Vec<TemplateNode>,
}

/// A parsed template, ready to be instantiated any number of times
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Template {
    pub root: TemplateNode,
}

impl Template {
    /// Parse a TOML template; `origin` names the source in errors
    pub fn from_toml_str(source: &str, origin: &str) -> Result<Self, TemplateError> {
        toml::from_str(source).map_err(|source| TemplateError::Parse {
            path: origin.to_string(),
            source,
        })
    }

    /// Clone the template into `tree`, returning the detached root element
    pub fn instantiate(&self, tree: &mut ElementTree) -> ElementId {
        let root = Self::create(tree, &self.root);

        let mut pending = vec![(root, &self.root)];
        while let Some((parent, node)) = pending.pop() {
            for child in &node.children {
                let id = Self::create(tree, child);
                tree.add_child(parent, id);
                pending.push((id, child));
            }
        }
        root
    }

    fn create(tree: &mut ElementTree, node: &TemplateNode) -> ElementId {
        let id = tree.create(node.kind);
        if let Some(name) = &node.name {
            tree.set_name(id, name.as_str());
        }
        for class in &node.classes {
            tree.add_class(id, class);
        }
        if let Some(text) = &node.text {
            tree.set_text(id, text.as_str());
        }
        if let Some(style) = &node.style {
            tree.set_inline_style(id, style.clone());
        }
        id
    }
}

/// Source of templates and stylesheets
pub trait TemplateLoader {
    fn load_template(&self, path: &str) -> Result<Template, TemplateError>;

    fn load_style_sheet(&self, path: &str) -> Result<StyleSheet, TemplateError>;
}

/// Loads TOML documents from a directory on disk
#[derive(Clone, Debug)]
pub struct DirectoryLoader {
    root: PathBuf,
}

impl DirectoryLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn read(&self, path: &str) -> Result<String, TemplateError> {
        let full = self.root.join(path);
        match fs::read_to_string(&full) {
            Ok(source) => Ok(source),
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                Err(TemplateError::NotFound(full.display().to_string()))
            }
            Err(source) => Err(TemplateError::Io { path: full, source }),
        }
    }
}

impl TemplateLoader for DirectoryLoader {
    fn load_template(&self, path: &str) -> Result<Template, TemplateError> {
        tracing::debug!(root = %self.root.display(), path, "loading template");
        Template::from_toml_str(&self.read(path)?, path)
    }

    fn load_style_sheet(&self, path: &str) -> Result<StyleSheet, TemplateError> {
        tracing::debug!(root = %self.root.display(), path, "loading stylesheet");
        StyleSheet::from_toml_str(&self.read(path)?, path)
    }
}

/// Serves TOML documents from memory (embedded assets, tests)
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    sources: IndexMap<String, String>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a document under `path`
    pub fn with_source(mut self, path: impl Into<String>, source: impl Into<String>) -> Self {
        self.sources.insert(path.into(), source.into());
        self
    }

    fn read(&self, path: &str) -> Result<&str, TemplateError> {
        self.sources
            .get(path)
            .map(String::as_str)
            .ok_or_else(|| TemplateError::NotFound(path.to_string()))
    }
}

impl TemplateLoader for MemoryLoader {
    fn load_template(&self, path: &str) -> Result<Template, TemplateError> {
        Template::from_toml_str(self.read(path)?, path)
    }

    fn load_style_sheet(&self, path: &str) -> Result<StyleSheet, TemplateError> {
        StyleSheet::from_toml_str(self.read(path)?, path)
    }
}
