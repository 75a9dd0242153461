//! Navigation authoring errors.
//!
//! Builds and link checks never stop at the first problem. Every error found
//! during a pass is collected into [`NavErrors`] so that a single run reports
//! the whole list to the operator.

use std::fmt;

/// Location string used for entries declared at the top level.
pub(crate) const TOP_LEVEL: &str = "top level";

/// A single problem found in a navigation declaration.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    /// Two siblings share the same label.
    #[error("duplicate label \"{label}\" under {parent}")]
    DuplicateLabel {
        /// The repeated label.
        label: String,
        /// Label trail of the parent (e.g. "sidebar > Docs").
        parent: String,
    },
    /// An internal link points at a document missing from the content inventory.
    #[error("dangling link \"{target}\" at {location}: no document \"{document}\"")]
    DanglingLink {
        /// Label trail of the offending entry.
        location: String,
        /// The link as declared.
        target: String,
        /// Document key the link resolved to.
        document: String,
    },
    /// An entry has neither a link nor children.
    #[error("invalid grouping at {location}: entry has neither a link nor items")]
    InvalidGrouping {
        /// Label trail of the offending entry.
        location: String,
    },
    /// A link is neither an absolute internal path nor an absolute URL.
    #[error(
        "invalid target \"{target}\" at {location}: expected a path starting with '/' or an absolute URL"
    )]
    InvalidTarget {
        /// Label trail of the offending entry.
        location: String,
        /// The link as declared.
        target: String,
    },
}

impl NavError {
    /// Prefix the error location with the name of the declaration it came from.
    #[must_use]
    pub(crate) fn scoped(self, scope: &str) -> Self {
        let prefix = |location: String| {
            if location == TOP_LEVEL {
                scope.to_owned()
            } else {
                format!("{scope} > {location}")
            }
        };
        match self {
            Self::DuplicateLabel { label, parent } => Self::DuplicateLabel {
                label,
                parent: prefix(parent),
            },
            Self::DanglingLink {
                location,
                target,
                document,
            } => Self::DanglingLink {
                location: prefix(location),
                target,
                document,
            },
            Self::InvalidGrouping { location } => Self::InvalidGrouping {
                location: prefix(location),
            },
            Self::InvalidTarget { location, target } => Self::InvalidTarget {
                location: prefix(location),
                target,
            },
        }
    }
}

/// Every problem found by one build or validation pass.
///
/// Never empty: passes return `Ok` when nothing was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavErrors(Vec<NavError>);

impl NavErrors {
    /// Turn a collected list into a result.
    pub(crate) fn check(errors: Vec<NavError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self(errors))
        }
    }

    /// Iterate over the collected errors in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, NavError> {
        self.0.iter()
    }

    /// Number of collected errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Check whether a `DuplicateLabel` error was reported for `label`.
    #[must_use]
    pub fn has_duplicate_label(&self, label: &str) -> bool {
        self.0
            .iter()
            .any(|e| matches!(e, NavError::DuplicateLabel { label: l, .. } if l == label))
    }

    /// Consume into the underlying list.
    #[must_use]
    pub fn into_vec(self) -> Vec<NavError> {
        self.0
    }
}

impl fmt::Display for NavErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let count = self.0.len();
        let noun = if count == 1 { "problem" } else { "problems" };
        write!(f, "{count} navigation {noun} found")?;
        for error in &self.0 {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for NavErrors {}

impl IntoIterator for NavErrors {
    type Item = NavError;
    type IntoIter = std::vec::IntoIter<NavError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a NavErrors {
    type Item = &'a NavError;
    type IntoIter = std::slice::Iter<'a, NavError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
