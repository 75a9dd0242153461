//! Theme extension for Quire sites.
//!
//! A theme extends an externally supplied [`BaseShell`] without modifying
//! it. Components are registered by name in a [`ThemeRegistry`] and bound to
//! the shell's named extension points. After configuration the registry is
//! sealed, and every page render composes the shell from the base defaults
//! plus the bound components.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use quire_theme::{ComponentKind, DefaultShell, PageContext, Props, ThemeRegistry};
//!
//! let mut registry = ThemeRegistry::new(Arc::new(DefaultShell::default()));
//! registry.register("LinkCard", ComponentKind::LinkCard.instantiate(Props::new()))?;
//! registry.seal();
//!
//! let props = Props::from([
//!     ("title".to_owned(), "Scripts".to_owned()),
//!     ("link".to_owned(), "/scripts/scripts.md".to_owned()),
//! ]);
//! let card = registry.render_component("LinkCard", &PageContext::new("/", "Home"), &props)?;
//! assert_eq!(card.text_content(), "Scripts");
//! # Ok(())
//! # }
//! ```

mod component;
mod context;
mod default_shell;
mod error;
mod registry;
mod render_tree;
mod shell;

pub use component::{Component, ComponentKind, CopyCard, HtmlBlock, LinkCard, MiniLink};
pub use context::{Layout, PageContext, Props};
pub use default_shell::{DefaultShell, HeadTag, SLOT_CATALOG, ShellChrome};
pub use error::ThemeError;
pub use registry::{RegistryState, ShellComposition, ThemeRegistry};
pub use render_tree::{Element, RenderNode, RenderTree, Slot, escape_html};
pub use shell::{BaseShell, Substitutions};
