//! Page metadata from markdown frontmatter.
//!
//! Only the fields the shell needs are read: title, layout and the home
//! hero text. The markdown body itself is rendered by the host.

use quire_theme::{Layout, PageContext};
use serde::Deserialize;

/// Frontmatter fields used by the shell.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Frontmatter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub layout: Option<Layout>,
    pub hero: Option<Hero>,
}

/// `hero:` block of a home page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Hero {
    pub name: Option<String>,
    pub text: Option<String>,
    pub tagline: Option<String>,
}

/// Split `---` delimited frontmatter from the body.
///
/// Returns `(None, content)` when the document has no frontmatter block.
pub(crate) fn split_frontmatter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, content)
}

/// Parse frontmatter YAML.
///
/// Malformed YAML is logged and treated as absent so one bad page does not
/// break the site.
pub(crate) fn parse_frontmatter(yaml: &str, path: &str) -> Frontmatter {
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return Frontmatter::default();
    }
    serde_yaml::from_str(trimmed).unwrap_or_else(|e| {
        tracing::warn!(page = path, error = %e, "Ignoring invalid frontmatter");
        Frontmatter::default()
    })
}

/// First `# ` heading in a markdown body.
pub(crate) fn extract_title(body: &str) -> Option<&str> {
    body.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(str::trim)
        .filter(|title| !title.is_empty())
}

/// Build the render context for a markdown document.
///
/// Title precedence: frontmatter `title`, first heading, hero name, then
/// `fallback_title`.
pub(crate) fn page_context(path: &str, content: &str, fallback_title: &str) -> PageContext {
    let (yaml, body) = split_frontmatter(content);
    let fm = yaml.map(|y| parse_frontmatter(y, path)).unwrap_or_default();
    let hero = fm.hero.unwrap_or_default();

    let title = fm
        .title
        .as_deref()
        .or_else(|| extract_title(body))
        .or(hero.name.as_deref())
        .unwrap_or(fallback_title)
        .to_owned();

    let mut ctx = PageContext::new(path, title).with_layout(fm.layout.unwrap_or_default());
    if let Some(description) = fm.description {
        ctx = ctx.with_frontmatter("description", description);
    }
    if let Some(name) = hero.name {
        ctx = ctx.with_frontmatter("hero_name", name);
    }
    // VitePress-style heroes put the tagline in `text` when `tagline` is absent
    if let Some(tagline) = hero.tagline.or(hero.text) {
        ctx = ctx.with_frontmatter("hero_tagline", tagline);
    }
    ctx
}
