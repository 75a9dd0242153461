//! Nav bar and sidebar declared side by side.
//!
//! Site configuration carries two separate declarations: one for the
//! top-level nav bar and one for the sidebar. [`SiteNavigation`] builds both
//! and merges their problems into a single report, so an operator sees every
//! error from both declarations in one run.

use crate::declaration::NavEntry;
use crate::error::{NavError, NavErrors};
use crate::inventory::ContentInventory;
use crate::quick_links::QuickLink;
use crate::render::RenderedNav;
use crate::tree::NavTree;

/// Scope name used in error locations for the nav-bar declaration.
const NAV_SCOPE: &str = "nav";
/// Scope name used in error locations for the sidebar declaration.
const SIDEBAR_SCOPE: &str = "sidebar";

/// Built nav bar and sidebar trees.
#[derive(Clone, Debug, Default)]
pub struct SiteNavigation {
    nav: NavTree,
    sidebar: NavTree,
}

impl SiteNavigation {
    /// Build both declarations, collecting every problem from either.
    pub fn build(nav: &[NavEntry], sidebar: &[NavEntry]) -> Result<Self, NavErrors> {
        let mut errors = Vec::new();
        let nav = collect(NavTree::build(nav), NAV_SCOPE, &mut errors);
        let sidebar = collect(NavTree::build(sidebar), SIDEBAR_SCOPE, &mut errors);
        NavErrors::check(errors)?;

        Ok(Self {
            nav: nav.unwrap_or_default(),
            sidebar: sidebar.unwrap_or_default(),
        })
    }

    /// Build both declarations and check the links of every tree that built.
    ///
    /// A declaration that fails to build does not stop the other one from
    /// being link-checked, so one call reports shape problems and dangling
    /// links from both declarations together.
    pub fn build_checked<I>(
        nav: &[NavEntry],
        sidebar: &[NavEntry],
        inventory: &I,
    ) -> Result<Self, NavErrors>
    where
        I: ContentInventory + ?Sized,
    {
        let mut errors = Vec::new();
        let nav = build_and_check(nav, inventory, NAV_SCOPE, &mut errors);
        let sidebar = build_and_check(sidebar, inventory, SIDEBAR_SCOPE, &mut errors);
        NavErrors::check(errors)?;

        Ok(Self {
            nav: nav.unwrap_or_default(),
            sidebar: sidebar.unwrap_or_default(),
        })
    }

    /// Check internal links of both trees in one pass.
    pub fn validate_links<I>(&self, inventory: &I) -> Result<(), NavErrors>
    where
        I: ContentInventory + ?Sized,
    {
        let mut errors = Vec::new();
        collect(self.nav.validate_links(inventory), NAV_SCOPE, &mut errors);
        collect(
            self.sidebar.validate_links(inventory),
            SIDEBAR_SCOPE,
            &mut errors,
        );
        NavErrors::check(errors)
    }

    /// Nav bar from the nav declaration, sidebar groups from the sidebar
    /// declaration.
    #[must_use]
    pub fn render(&self) -> RenderedNav {
        RenderedNav {
            nav_bar: self.nav.nav_bar(),
            sidebar: self.sidebar.sidebar_groups(),
        }
    }

    /// Tree built from the nav-bar declaration.
    #[must_use]
    pub fn nav(&self) -> &NavTree {
        &self.nav
    }

    /// Tree built from the sidebar declaration.
    #[must_use]
    pub fn sidebar(&self) -> &NavTree {
        &self.sidebar
    }

    /// Quick links pointing at `href` from both trees, nav bar first.
    #[must_use]
    pub fn find_by_href(&self, href: &str) -> Vec<&QuickLink> {
        let mut hits = self.nav.quick_links().find_by_href(href);
        hits.extend(self.sidebar.quick_links().find_by_href(href));
        hits
    }
}

fn build_and_check<I>(
    declaration: &[NavEntry],
    inventory: &I,
    scope: &str,
    errors: &mut Vec<NavError>,
) -> Option<NavTree>
where
    I: ContentInventory + ?Sized,
{
    let tree = collect(NavTree::build(declaration), scope, errors)?;
    collect(tree.validate_links(inventory), scope, errors);
    Some(tree)
}

fn collect<T>(result: Result<T, NavErrors>, scope: &str, errors: &mut Vec<NavError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(found) => {
            errors.extend(found.into_iter().map(|e| e.scoped(scope)));
            None
        }
    }
}
