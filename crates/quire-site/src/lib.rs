//! Site assembly for Quire.
//!
//! This crate provides:
//! - [`Site`]: navigation, content inventory and sealed theme loaded from a
//!   [`Config`](quire_config::Config)
//! - [`SiteError`]: every configuration problem reported together
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use quire_site::Site;
//!
//! // Discover quire.toml in the current directory or its parents
//! let site = Site::open(None, None)?;
//!
//! let html = site.render_page("/")?;
//! # Ok(())
//! # }
//! ```

mod error;
mod page;
mod site;

pub use error::{Problem, SiteError};
pub use site::Site;
