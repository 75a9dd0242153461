//! Flattened quick-link index.
//!
//! Duplicates the linked nodes of a [`NavTree`](crate::NavTree) into a flat
//! list so the renderer can look entries up directly by label trail or by
//! href without walking the tree.

use std::collections::HashMap;

use crate::link::Link;
use crate::tree::NavNode;

/// One linked navigation node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuickLink {
    /// Labels from the top level down to this node.
    pub trail: Vec<String>,
    /// The node's target.
    pub link: Link,
}

/// Index of every node that has a target, in depth-first declared order.
#[derive(Clone, Debug, Default)]
pub struct QuickLinks {
    entries: Vec<QuickLink>,
    by_trail: HashMap<Vec<String>, usize>,
    by_href: HashMap<String, Vec<usize>>,
}

impl QuickLinks {
    pub(crate) fn from_roots(roots: &[NavNode]) -> Self {
        fn collect(nodes: &[NavNode], trail: &mut Vec<String>, out: &mut Vec<QuickLink>) {
            for node in nodes {
                trail.push(node.label().to_owned());
                if let Some(link) = node.target() {
                    out.push(QuickLink {
                        trail: trail.clone(),
                        link: link.clone(),
                    });
                }
                collect(node.children(), trail, out);
                trail.pop();
            }
        }

        let mut entries = Vec::new();
        collect(roots, &mut Vec::new(), &mut entries);

        let mut by_trail = HashMap::with_capacity(entries.len());
        let mut by_href: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, entry) in entries.iter().enumerate() {
            by_trail.insert(entry.trail.clone(), idx);
            by_href
                .entry(entry.link.href().to_owned())
                .or_default()
                .push(idx);
        }

        Self {
            entries,
            by_trail,
            by_href,
        }
    }

    /// Look up an entry by its label trail (e.g. `["Docs", "Guide"]`).
    #[must_use]
    pub fn get<S: AsRef<str>>(&self, trail: &[S]) -> Option<&QuickLink> {
        let key: Vec<String> = trail.iter().map(|s| s.as_ref().to_owned()).collect();
        self.by_trail.get(&key).map(|&i| &self.entries[i])
    }

    /// All entries pointing at `href`, in declared order.
    ///
    /// The same document may legitimately appear more than once.
    #[must_use]
    pub fn find_by_href(&self, href: &str) -> Vec<&QuickLink> {
        self.by_href
            .get(href)
            .map(|ids| ids.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default()
    }

    /// Iterate in declared order.
    pub fn iter(&self) -> std::slice::Iter<'_, QuickLink> {
        self.entries.iter()
    }

    /// Number of linked nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no node has a target.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
