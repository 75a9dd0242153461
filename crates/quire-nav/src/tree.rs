//! Validated navigation tree.
//!
//! A [`NavTree`] is built top-down from a declaration, so it can never
//! contain cycles. Once built it is immutable; a configuration reload
//! builds a new tree instead of patching the old one.
//!
//! Validation runs in two passes:
//! 1. [`NavTree::build`] checks the declaration's shape (labels, grouping,
//!    target syntax).
//! 2. [`NavTree::validate_links`] checks internal targets against the content
//!    inventory, which may only be known after all content has been scanned.

use std::collections::HashSet;

use crate::declaration::NavEntry;
use crate::error::{NavError, NavErrors, TOP_LEVEL};
use crate::inventory::ContentInventory;
use crate::link::Link;
use crate::quick_links::QuickLinks;

/// A node in the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavNode {
    label: String,
    target: Option<Link>,
    children: Vec<NavNode>,
    collapsed: Option<bool>,
}

impl NavNode {
    /// Display label, unique among siblings.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Link target. `None` only for section headers.
    #[must_use]
    pub fn target(&self) -> Option<&Link> {
        self.target.as_ref()
    }

    /// Child nodes in declared order.
    #[must_use]
    pub fn children(&self) -> &[NavNode] {
        &self.children
    }

    /// Collapse hint carried over from the declaration.
    #[must_use]
    pub fn collapsed(&self) -> Option<bool> {
        self.collapsed
    }

    /// True for nodes that only group their children.
    #[must_use]
    pub fn is_section_header(&self) -> bool {
        self.target.is_none() && !self.children.is_empty()
    }
}

/// Navigation tree with its flattened quick-link index.
#[derive(Clone, Debug, Default)]
pub struct NavTree {
    roots: Vec<NavNode>,
    quick_links: QuickLinks,
}

impl NavTree {
    /// Build a tree from a declaration.
    ///
    /// The whole declaration is walked even after a problem is found, so
    /// the returned [`NavErrors`] lists every duplicate label, invalid
    /// grouping and malformed target at once.
    pub fn build(declaration: &[NavEntry]) -> Result<Self, NavErrors> {
        let mut errors = Vec::new();
        let mut trail = Vec::new();
        let roots = build_level(declaration, &mut trail, &mut errors);
        NavErrors::check(errors)?;

        let quick_links = QuickLinks::from_roots(&roots);
        tracing::debug!(
            roots = roots.len(),
            links = quick_links.len(),
            "Built navigation tree"
        );

        Ok(Self { roots, quick_links })
    }

    /// Check every internal target against the content inventory.
    ///
    /// External links are not checked.
    pub fn validate_links<I>(&self, inventory: &I) -> Result<(), NavErrors>
    where
        I: ContentInventory + ?Sized,
    {
        let mut errors = Vec::new();
        self.walk(|trail, node| {
            let Some(link) = node.target() else {
                return;
            };
            let Some(document) = link.document_key() else {
                return;
            };
            if !inventory.contains(&document) {
                errors.push(NavError::DanglingLink {
                    location: describe(trail),
                    target: link.href().to_owned(),
                    document,
                });
            }
        });
        NavErrors::check(errors)
    }

    /// Top-level nodes in declared order.
    #[must_use]
    pub fn roots(&self) -> &[NavNode] {
        &self.roots
    }

    /// Flattened index of every linked node.
    #[must_use]
    pub fn quick_links(&self) -> &QuickLinks {
        &self.quick_links
    }

    /// Whether the tree has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Visit every node depth-first in declared order.
    ///
    /// The visitor receives the label trail ending with the node's own label.
    pub fn walk<'a>(&'a self, mut visit: impl FnMut(&[&'a str], &'a NavNode)) {
        fn go<'a>(
            nodes: &'a [NavNode],
            trail: &mut Vec<&'a str>,
            visit: &mut impl FnMut(&[&'a str], &'a NavNode),
        ) {
            for node in nodes {
                trail.push(&node.label);
                visit(trail, node);
                go(&node.children, trail, visit);
                trail.pop();
            }
        }

        let mut trail = Vec::new();
        go(&self.roots, &mut trail, &mut visit);
    }
}

/// Build one sibling level, recording problems instead of failing.
fn build_level<'a>(
    entries: &'a [NavEntry],
    trail: &mut Vec<&'a str>,
    errors: &mut Vec<NavError>,
) -> Vec<NavNode> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut nodes = Vec::with_capacity(entries.len());

    for entry in entries {
        let label = entry.text.as_str();
        // Report each repeated label once per sibling set
        if !seen.insert(label) && reported.insert(label) {
            errors.push(NavError::DuplicateLabel {
                label: label.to_owned(),
                parent: describe(trail),
            });
        }

        trail.push(label);

        let target = entry.link.as_deref().and_then(|raw| {
            let link = Link::parse(raw);
            if link.is_none() {
                errors.push(NavError::InvalidTarget {
                    location: describe(trail),
                    target: raw.to_owned(),
                });
            }
            link
        });

        if entry.link.is_none() && entry.items.is_empty() {
            errors.push(NavError::InvalidGrouping {
                location: describe(trail),
            });
        }

        let children = build_level(&entry.items, trail, errors);
        trail.pop();

        nodes.push(NavNode {
            label: label.to_owned(),
            target,
            children,
            collapsed: entry.collapsed,
        });
    }

    nodes
}

/// Human-readable location for a label trail.
pub(crate) fn describe(trail: &[&str]) -> String {
    if trail.is_empty() {
        TOP_LEVEL.to_owned()
    } else {
        trail.join(" > ")
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use pretty_assertions::assert_eq;

    fn inventory(keys: &[&str]) -> HashSet<String> {
        keys.iter().map(|k| (*k).to_owned()).collect()
    }

    fn sample() -> Vec<NavEntry> {
        vec![
            NavEntry::link("Home", "/"),
            NavEntry::group(
                "Docs",
                vec![
                    NavEntry::link("Guide", "/guide"),
                    NavEntry::link("Reference", "/reference.md"),
                ],
            ),
            NavEntry::link("Forum", "https://club.example.com/"),
        ]
    }

    #[test]
    fn test_build_preserves_order() {
        let tree = NavTree::build(&sample()).unwrap();
        let labels: Vec<&str> = tree.roots().iter().map(NavNode::label).collect();
        assert_eq!(labels, vec!["Home", "Docs", "Forum"]);

        let docs = &tree.roots()[1];
        assert!(docs.is_section_header());
        let children: Vec<&str> = docs.children().iter().map(NavNode::label).collect();
        assert_eq!(children, vec!["Guide", "Reference"]);
    }

    #[test]
    fn test_build_duplicate_sibling_label() {
        let declaration = vec![
            NavEntry::link("Home", "/"),
            NavEntry::group(
                "Docs",
                vec![
                    NavEntry::link("Guide", "/guide"),
                    NavEntry::link("Guide", "/guide2"),
                ],
            ),
        ];

        let errors = NavTree::build(&declaration).unwrap_err();

        assert!(errors.has_duplicate_label("Guide"));
        assert_eq!(
            errors.into_vec(),
            vec![NavError::DuplicateLabel {
                label: "Guide".to_owned(),
                parent: "Docs".to_owned(),
            }]
        );
    }

    #[test]
    fn test_build_same_label_in_different_groups_is_valid() {
        let declaration = vec![
            NavEntry::group("A", vec![NavEntry::link("Intro", "/a/intro")]),
            NavEntry::group("B", vec![NavEntry::link("Intro", "/b/intro")]),
        ];
        assert!(NavTree::build(&declaration).is_ok());
    }

    #[test]
    fn test_build_triple_duplicate_reported_once() {
        let declaration = vec![
            NavEntry::link("Home", "/"),
            NavEntry::link("Home", "/index.md"),
            NavEntry::link("Home", "/home"),
        ];
        let errors = NavTree::build(&declaration).unwrap_err();
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_build_invalid_grouping() {
        let declaration = vec![NavEntry::group("Empty", Vec::new())];
        let errors = NavTree::build(&declaration).unwrap_err();
        assert_eq!(
            errors.into_vec(),
            vec![NavError::InvalidGrouping {
                location: "Empty".to_owned()
            }]
        );
    }

    #[test]
    fn test_build_invalid_target() {
        let declaration = vec![NavEntry::link("Guide", "guide.md")];
        let errors = NavTree::build(&declaration).unwrap_err();
        assert_eq!(
            errors.into_vec(),
            vec![NavError::InvalidTarget {
                location: "Guide".to_owned(),
                target: "guide.md".to_owned(),
            }]
        );
    }

    #[test]
    fn test_build_collects_all_errors() {
        let declaration = vec![
            NavEntry::link("Home", "/"),
            NavEntry::link("Home", "/"),
            NavEntry::group(
                "Docs",
                vec![
                    NavEntry::group("Nothing", Vec::new()),
                    NavEntry::link("Bad", "relative"),
                    NavEntry::link("X", "/x"),
                    NavEntry::link("X", "/y"),
                ],
            ),
        ];

        let errors = NavTree::build(&declaration).unwrap_err();

        assert_eq!(errors.len(), 4);
        assert!(errors.has_duplicate_label("Home"));
        assert!(errors.has_duplicate_label("X"));
        assert!(errors.iter().any(
            |e| matches!(e, NavError::InvalidGrouping { location } if location == "Docs > Nothing")
        ));
        assert!(errors.iter().any(
            |e| matches!(e, NavError::InvalidTarget { target, .. } if target == "relative")
        ));
    }

    #[test]
    fn test_build_group_with_link_and_children() {
        let declaration = vec![NavEntry {
            link: Some("/docs/".to_owned()),
            ..NavEntry::group("Docs", vec![NavEntry::link("Guide", "/docs/guide")])
        }];
        let tree = NavTree::build(&declaration).unwrap();
        let docs = &tree.roots()[0];
        assert!(!docs.is_section_header());
        assert_eq!(docs.target().map(Link::href), Some("/docs/"));
    }

    #[test]
    fn test_build_empty_declaration() {
        let tree = NavTree::build(&[]).unwrap();
        assert!(tree.is_empty());
        assert!(tree.quick_links().is_empty());
    }

    #[test]
    fn test_validate_links_all_present() {
        let tree = NavTree::build(&sample()).unwrap();
        let docs = inventory(&["index", "guide", "reference"]);
        assert!(tree.validate_links(&docs).is_ok());
    }

    #[test]
    fn test_validate_links_reports_every_dangling_link() {
        let declaration = vec![
            NavEntry::link("A", "/a"),
            NavEntry::link("B", "/b.md"),
            NavEntry::group(
                "Group",
                vec![
                    NavEntry::link("C", "/c/"),
                    NavEntry::link("D", "/d"),
                    NavEntry::link("E", "/e"),
                ],
            ),
            NavEntry::link("Ext", "https://example.com/missing"),
        ];
        let tree = NavTree::build(&declaration).unwrap();

        let errors = tree.validate_links(&inventory(&[])).unwrap_err();

        assert_eq!(errors.len(), 5);
        let documents: Vec<&str> = errors
            .iter()
            .filter_map(|e| match e {
                NavError::DanglingLink { document, .. } => Some(document.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(documents, vec!["a", "b", "c/index", "d", "e"]);
    }

    #[test]
    fn test_validate_links_location() {
        let tree = NavTree::build(&sample()).unwrap();
        let errors = tree
            .validate_links(&inventory(&["index", "reference"]))
            .unwrap_err();
        assert_eq!(
            errors.into_vec(),
            vec![NavError::DanglingLink {
                location: "Docs > Guide".to_owned(),
                target: "/guide".to_owned(),
                document: "guide".to_owned(),
            }]
        );
    }

    #[test]
    fn test_walk_visits_depth_first() {
        let tree = NavTree::build(&sample()).unwrap();
        let mut visited = Vec::new();
        tree.walk(|trail, _| visited.push(trail.join("/")));
        assert_eq!(
            visited,
            vec!["Home", "Docs", "Docs/Guide", "Docs/Reference", "Forum"]
        );
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(&[]), "top level");
        assert_eq!(describe(&["Docs", "Guide"]), "Docs > Guide");
    }

    static_assertions::assert_impl_all!(NavTree: Send, Sync);
}
