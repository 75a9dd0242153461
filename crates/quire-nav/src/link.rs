//! Navigation link targets.

use std::fmt;

/// URL schemes accepted for external links.
const EXTERNAL_PREFIXES: [&str; 4] = ["http://", "https://", "mailto:", "//"];

/// Extensions dropped when mapping an internal path to a document key.
const DOCUMENT_EXTENSIONS: [&str; 2] = [".md", ".html"];

/// Target of a navigation entry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Link {
    /// Site-internal path starting with `/` (e.g. `/guide`, `/deb/deb.md`).
    Internal(String),
    /// Absolute external URL.
    External(String),
}

impl Link {
    /// Classify a declared target.
    ///
    /// Returns `None` when the target is neither an absolute internal path
    /// nor an absolute URL (e.g. `guide.md` or an empty string).
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if EXTERNAL_PREFIXES.iter().any(|p| raw.starts_with(p)) {
            return Some(Self::External(raw.to_owned()));
        }
        if raw.starts_with('/') {
            return Some(Self::Internal(raw.to_owned()));
        }
        None
    }

    /// The link exactly as declared.
    #[must_use]
    pub fn href(&self) -> &str {
        match self {
            Self::Internal(path) | Self::External(path) => path,
        }
    }

    /// Whether the link leaves the site.
    #[must_use]
    pub fn is_external(&self) -> bool {
        matches!(self, Self::External(_))
    }

    /// Content document key an internal link refers to.
    ///
    /// `None` for external links.
    ///
    /// # Examples
    ///
    /// ```
    /// use quire_nav::Link;
    ///
    /// let key = |s: &str| Link::parse(s).unwrap().document_key();
    /// assert_eq!(key("/").as_deref(), Some("index"));
    /// assert_eq!(key("/scripts/scripts.md").as_deref(), Some("scripts/scripts"));
    /// assert_eq!(key("/QA/").as_deref(), Some("QA/index"));
    /// assert_eq!(key("https://example.com"), None);
    /// ```
    #[must_use]
    pub fn document_key(&self) -> Option<String> {
        match self {
            Self::Internal(path) => Some(document_key(path)),
            Self::External(_) => None,
        }
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.href())
    }
}

/// Map an internal path to the key of the document it serves.
fn document_key(path: &str) -> String {
    let path = path.split(['#', '?']).next().unwrap_or_default();
    let path = path.trim_start_matches('/');

    if path.is_empty() || path.ends_with('/') {
        return format!("{path}index");
    }

    DOCUMENT_EXTENSIONS
        .iter()
        .find_map(|ext| path.strip_suffix(ext))
        .unwrap_or(path)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_internal() {
        assert_eq!(
            Link::parse("/guide"),
            Some(Link::Internal("/guide".to_owned()))
        );
    }

    #[test]
    fn test_parse_external() {
        let link = Link::parse("https://club.fnnas.com/forum.php?mod=viewthread&tid=4271").unwrap();
        assert!(link.is_external());
        assert_eq!(link.document_key(), None);
    }

    #[test]
    fn test_parse_http_with_port() {
        let link = Link::parse("http://0745daxin.art:5666/s/03fceb0f36de4b3c80").unwrap();
        assert!(link.is_external());
    }

    #[test]
    fn test_parse_rejects_relative() {
        assert_eq!(Link::parse("guide.md"), None);
        assert_eq!(Link::parse(""), None);
        assert_eq!(Link::parse("   "), None);
    }

    #[test]
    fn test_document_key_root() {
        assert_eq!(document_key("/"), "index");
        assert_eq!(document_key("/index.md"), "index");
    }

    #[test]
    fn test_document_key_strips_extension() {
        assert_eq!(document_key("/deb/deb.md"), "deb/deb");
        assert_eq!(document_key("/join-qq.html"), "join-qq");
        assert_eq!(document_key("/guide"), "guide");
    }

    #[test]
    fn test_document_key_directory() {
        assert_eq!(document_key("/QA/"), "QA/index");
    }

    #[test]
    fn test_document_key_drops_fragment_and_query() {
        assert_eq!(document_key("/guide.md#install"), "guide");
        assert_eq!(document_key("/guide?tab=2"), "guide");
    }

    #[test]
    fn test_display_is_href() {
        let link = Link::parse("/downloads/tools.md").unwrap();
        assert_eq!(link.to_string(), "/downloads/tools.md");
    }
}
