//! Author-supplied navigation declarations.

use serde::{Deserialize, Serialize};

/// One `{ text, link?, items? }` literal from the site configuration.
///
/// Field names follow the configuration format; `label`, `target` and
/// `children` are accepted as aliases.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NavEntry {
    /// Display label.
    #[serde(alias = "label")]
    pub text: String,
    /// Internal path or external URL. Absent for pure section headers.
    #[serde(default, alias = "target", skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Nested entries in display order.
    #[serde(default, alias = "children", skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavEntry>,
    /// Sidebar hint: render the group collapsed (`Some(true)`) or collapsible.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
}

impl NavEntry {
    /// Leaf entry pointing at `link`.
    #[must_use]
    pub fn link(text: impl Into<String>, link: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            link: Some(link.into()),
            ..Self::default()
        }
    }

    /// Section header with the given children.
    #[must_use]
    pub fn group(text: impl Into<String>, items: Vec<NavEntry>) -> Self {
        Self {
            text: text.into(),
            items,
            ..Self::default()
        }
    }
}
