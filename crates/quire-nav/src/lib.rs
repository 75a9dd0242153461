//! Navigation model for Quire.
//!
//! This crate provides:
//! - [`NavEntry`]: author-supplied `{ text, link?, items? }` declarations
//! - [`NavTree`]: validated, immutable navigation tree with a [`QuickLinks`] index
//! - [`SiteNavigation`]: nav bar and sidebar trees built and reported together
//! - [`ContentInventory`]: the set of documents used for dangling-link checks
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::collections::HashSet;
//! use quire_nav::{NavEntry, NavTree};
//!
//! let tree = NavTree::build(&[
//!     NavEntry::link("Home", "/"),
//!     NavEntry::group("Docs", vec![NavEntry::link("Guide", "/guide")]),
//! ])?;
//!
//! let docs: HashSet<String> = ["index", "guide"].into_iter().map(str::to_owned).collect();
//! tree.validate_links(&docs)?;
//!
//! let rendered = tree.render();
//! assert_eq!(rendered.nav_bar.len(), 2);
//! # Ok(())
//! # }
//! ```

mod declaration;
mod error;
mod inventory;
mod link;
mod quick_links;
mod render;
mod site_navigation;
mod tree;

pub use declaration::NavEntry;
pub use error::{NavError, NavErrors};
pub use inventory::{ContentInventory, FsInventory};
pub use link::Link;
pub use quick_links::{QuickLink, QuickLinks};
pub use render::{NavBarItem, RenderedNav, SidebarGroup, SidebarItem};
pub use site_navigation::SiteNavigation;
pub use tree::{NavNode, NavTree};
