//! Per-page render input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Component properties (string key/value pairs).
pub type Props = BTreeMap<String, String>;

/// Page layout selected by the page's frontmatter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Layout {
    /// Landing page with hero and features.
    Home,
    /// Documentation page with sidebar and outline.
    #[default]
    Doc,
    /// Bare content page.
    Page,
    /// Missing page.
    NotFound,
}

/// What the shell is rendering for.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageContext {
    /// Page URL path (e.g. `/`, `/downloads/tools.md`).
    pub path: String,
    /// Page title.
    pub title: String,
    /// Page layout.
    pub layout: Layout,
    /// String frontmatter values.
    pub frontmatter: BTreeMap<String, String>,
}

impl PageContext {
    /// Context for a documentation page.
    #[must_use]
    pub fn new(path: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            ..Self::default()
        }
    }

    /// Set the layout.
    #[must_use]
    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    /// Add a frontmatter value.
    #[must_use]
    pub fn with_frontmatter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.frontmatter.insert(key.into(), value.into());
        self
    }
}
