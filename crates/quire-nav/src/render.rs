//! Projection of a navigation tree into renderer-facing data.

use serde::Serialize;

use crate::tree::{NavNode, NavTree};

/// Item of the top-level navigation bar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavBarItem {
    /// Display label.
    pub text: String,
    /// Link target as declared. `None` for section headers.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Whether the link leaves the site.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
}

/// Link or nested group inside a sidebar group.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    /// Display label.
    pub text: String,
    /// Link target as declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Whether the link leaves the site.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
    /// Nested items in declared order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SidebarItem>,
}

/// Labeled cluster of links shown beside page content.
///
/// A top-level leaf becomes a group with a link and no items.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    /// Group heading.
    pub text: String,
    /// Optional landing link for the heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Collapse hint from the declaration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collapsed: Option<bool>,
    /// Group items in declared order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<SidebarItem>,
}

/// Everything the renderer needs to draw navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenderedNav {
    /// Top-level navigation bar.
    #[serde(rename = "nav")]
    pub nav_bar: Vec<NavBarItem>,
    /// Sidebar groups.
    pub sidebar: Vec<SidebarGroup>,
}

impl NavTree {
    /// Project the tree into nav-bar items and sidebar groups.
    ///
    /// Pure: the same tree always yields the same output, and declared order
    /// is kept exactly.
    #[must_use]
    pub fn render(&self) -> RenderedNav {
        RenderedNav {
            nav_bar: self.nav_bar(),
            sidebar: self.sidebar_groups(),
        }
    }

    /// Nav-bar items built from top-level nodes only.
    #[must_use]
    pub fn nav_bar(&self) -> Vec<NavBarItem> {
        self.roots()
            .iter()
            .map(|node| NavBarItem {
                text: node.label().to_owned(),
                link: href(node),
                external: is_external(node),
            })
            .collect()
    }

    /// Sidebar groups built from the full tree.
    #[must_use]
    pub fn sidebar_groups(&self) -> Vec<SidebarGroup> {
        self.roots()
            .iter()
            .map(|node| SidebarGroup {
                text: node.label().to_owned(),
                link: href(node),
                collapsed: node.collapsed(),
                items: node.children().iter().map(sidebar_item).collect(),
            })
            .collect()
    }
}

fn sidebar_item(node: &NavNode) -> SidebarItem {
    SidebarItem {
        text: node.label().to_owned(),
        link: href(node),
        external: is_external(node),
        items: node.children().iter().map(sidebar_item).collect(),
    }
}

fn href(node: &NavNode) -> Option<String> {
    node.target().map(|link| link.href().to_owned())
}

fn is_external(node: &NavNode) -> bool {
    node.target().is_some_and(crate::Link::is_external)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NavEntry;
    use pretty_assertions::assert_eq;

    fn declaration() -> Vec<NavEntry> {
        vec![
            NavEntry::link("Home", "/"),
            NavEntry {
                collapsed: Some(true),
                ..NavEntry::group(
                    "Library",
                    vec![
                        NavEntry::link("Scripts", "/scripts/scripts.md"),
                        NavEntry::link("Commands", "/command/command.md"),
                        NavEntry::link("Wiki", "/QA/wiki.md"),
                    ],
                )
            },
            NavEntry::group(
                "Community",
                vec![NavEntry::link(
                    "Forum",
                    "https://club.fnnas.com/forum.php?mod=viewthread&tid=4271",
                )],
            ),
        ]
    }

    #[test]
    fn test_nav_bar_uses_top_level_only() {
        let tree = NavTree::build(&declaration()).unwrap();
        assert_eq!(
            tree.render().nav_bar,
            vec![
                NavBarItem {
                    text: "Home".to_owned(),
                    link: Some("/".to_owned()),
                    external: false,
                },
                NavBarItem {
                    text: "Library".to_owned(),
                    link: None,
                    external: false,
                },
                NavBarItem {
                    text: "Community".to_owned(),
                    link: None,
                    external: false,
                },
            ]
        );
    }

    #[test]
    fn test_sidebar_preserves_child_order() {
        let tree = NavTree::build(&declaration()).unwrap();
        let sidebar = tree.render().sidebar;

        assert_eq!(sidebar.len(), 3);
        assert_eq!(sidebar[0].link.as_deref(), Some("/"));
        assert!(sidebar[0].items.is_empty());

        let library: Vec<&str> = sidebar[1].items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(library, vec!["Scripts", "Commands", "Wiki"]);
        assert_eq!(sidebar[1].collapsed, Some(true));

        assert!(sidebar[2].items[0].external);
    }

    #[test]
    fn test_order_is_not_sorted() {
        let tree = NavTree::build(&[
            NavEntry::link("Zeta", "/z"),
            NavEntry::link("Alpha", "/a"),
            NavEntry::link("Mu", "/m"),
        ])
        .unwrap();
        let labels: Vec<String> = tree.render().nav_bar.into_iter().map(|i| i.text).collect();
        assert_eq!(labels, vec!["Zeta", "Alpha", "Mu"]);
    }

    #[test]
    fn test_render_is_idempotent() {
        let tree = NavTree::build(&declaration()).unwrap();
        assert_eq!(tree.render(), tree.render());
    }

    #[test]
    fn test_nested_sidebar_items() {
        let tree = NavTree::build(&[NavEntry::group(
            "Guide",
            vec![NavEntry::group(
                "Advanced",
                vec![NavEntry::link("Tuning", "/guide/tuning")],
            )],
        )])
        .unwrap();

        let sidebar = tree.sidebar_groups();
        let advanced = &sidebar[0].items[0];
        assert_eq!(advanced.link, None);
        assert_eq!(advanced.items[0].link.as_deref(), Some("/guide/tuning"));
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let tree = NavTree::build(&[NavEntry::link("Home", "/")]).unwrap();
        let json = serde_json::to_value(tree.render()).unwrap();
        assert_eq!(json["nav"][0]["text"], "Home");
        assert_eq!(json["nav"][0]["link"], "/");
        assert!(json["nav"][0].get("external").is_none());
        assert!(json["sidebar"][0].get("items").is_none());
    }
}
