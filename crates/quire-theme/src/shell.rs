//! Base shell contract.
//!
//! A base shell is the externally supplied page layout that a theme extends.
//! It publishes a catalog of extension point keys and renders a default tree
//! in which each extension point is a [`Slot`](crate::Slot) holding its
//! default content. Extending a shell never touches its own logic: only the
//! content of bound slots is replaced.

use std::collections::BTreeMap;

use crate::context::PageContext;
use crate::render_tree::RenderTree;

/// Replacement content keyed by extension point.
pub type Substitutions = BTreeMap<String, RenderTree>;

/// Page layout with named extension points.
pub trait BaseShell: Send + Sync {
    /// Every extension point key this shell exposes.
    fn catalog(&self) -> &[&str];

    /// Default render tree, with every extension point marked as a slot.
    fn render_default(&self, ctx: &PageContext) -> RenderTree;

    /// Whether `point` is in the catalog.
    fn has_slot(&self, point: &str) -> bool {
        self.catalog().iter().any(|p| *p == point)
    }

    /// Render with substitutions, falling back to default content for
    /// every point without one.
    fn render_with(&self, ctx: &PageContext, substitutions: &Substitutions) -> RenderTree {
        self.render_default(ctx).substitute(substitutions)
    }
}
