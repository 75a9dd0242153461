//! Site assembly errors.

use std::fmt;

use quire_config::ConfigError;
use quire_nav::NavError;
use quire_theme::ThemeError;

/// One problem found while assembling a site.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Problem {
    /// Navigation declaration or link problem.
    #[error("navigation: {0}")]
    Nav(#[from] NavError),
    /// Component registration or slot binding problem.
    #[error("theme: {0}")]
    Theme(#[from] ThemeError),
}

/// Error returned by [`Site`](crate::Site) operations.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// The site configuration has problems. Every problem found is listed.
    #[error("{}", ProblemList(.0))]
    Invalid(Vec<Problem>),
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// No document exists for the requested page path.
    #[error("Page not found: {0}")]
    PageNotFound(String),
    /// Page source could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Theme failure while rendering.
    #[error(transparent)]
    Theme(#[from] ThemeError),
}

struct ProblemList<'a>(&'a [Problem]);

impl fmt::Display for ProblemList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.len() {
            1 => write!(f, "1 site problem found")?,
            n => write!(f, "{n} site problems found")?,
        }
        for problem in self.0 {
            write!(f, "\n  - {problem}")?;
        }
        Ok(())
    }
}
