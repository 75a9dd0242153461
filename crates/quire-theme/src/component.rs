//! Reusable display components.
//!
//! Components are registered by name in the
//! [`ThemeRegistry`](crate::ThemeRegistry) and can then be bound to
//! extension points of the base shell or referenced from page content.
//!
//! Built-in kinds carry default props set at registration. Props passed at
//! render time override the defaults key by key.

use std::sync::Arc;

use quire_nav::Link;
use serde::{Deserialize, Serialize};

use crate::context::{PageContext, Props};
use crate::render_tree::{Element, RenderNode, RenderTree};

/// A renderable component.
///
/// Rendering must be pure: the same context and props always yield the
/// same tree.
pub trait Component: Send + Sync {
    /// Render for a page.
    fn render(&self, ctx: &PageContext, props: &Props) -> RenderTree;
}

impl<F> Component for F
where
    F: Fn(&PageContext, &Props) -> RenderTree + Send + Sync,
{
    fn render(&self, ctx: &PageContext, props: &Props) -> RenderTree {
        self(ctx, props)
    }
}

/// Built-in component kinds selectable from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    /// [`LinkCard`].
    LinkCard,
    /// [`CopyCard`].
    CopyCard,
    /// [`MiniLink`].
    MiniLink,
    /// [`HtmlBlock`].
    Html,
}

impl ComponentKind {
    /// Create a component of this kind with default props.
    #[must_use]
    pub fn instantiate(self, defaults: Props) -> Arc<dyn Component> {
        match self {
            Self::LinkCard => Arc::new(LinkCard::new(defaults)),
            Self::CopyCard => Arc::new(CopyCard::new(defaults)),
            Self::MiniLink => Arc::new(MiniLink::new(defaults)),
            Self::Html => Arc::new(HtmlBlock::new(defaults)),
        }
    }
}

/// Read a prop, preferring render-time props over defaults.
fn prop<'a>(defaults: &'a Props, props: &'a Props, key: &str) -> Option<&'a str> {
    props
        .get(key)
        .or_else(|| defaults.get(key))
        .map(String::as_str)
}

/// Anchor element, opening external links in a new tab.
fn anchor(href: &str, class: &str) -> Element {
    let el = Element::new("a").attr("class", class).attr("href", href);
    if Link::parse(href).is_some_and(|l| l.is_external()) {
        el.attr("target", "_blank").attr("rel", "noreferrer")
    } else {
        el
    }
}

/// Card linking to a page or download.
///
/// Props: `title`, `link`, `description`.
#[derive(Debug, Default)]
pub struct LinkCard {
    defaults: Props,
}

impl LinkCard {
    /// Card with default props.
    #[must_use]
    pub fn new(defaults: Props) -> Self {
        Self { defaults }
    }
}

impl Component for LinkCard {
    fn render(&self, _ctx: &PageContext, props: &Props) -> RenderTree {
        let title = prop(&self.defaults, props, "title").unwrap_or_default();

        let mut body = vec![
            Element::new("span")
                .attr("class", "link-card-title")
                .text(title)
                .into(),
        ];
        if let Some(description) = prop(&self.defaults, props, "description") {
            body.push(
                Element::new("span")
                    .attr("class", "link-card-desc")
                    .text(description)
                    .into(),
            );
        }

        let card = match prop(&self.defaults, props, "link") {
            Some(href) => anchor(href, "link-card"),
            None => Element::new("div").attr("class", "link-card"),
        };
        RenderTree::single(card.children(body))
    }
}

/// Card showing a command with a copy button.
///
/// Props: `title`, `text` (the command to copy), `button` (label, default
/// "Copy").
#[derive(Debug, Default)]
pub struct CopyCard {
    defaults: Props,
}

impl CopyCard {
    /// Card with default props.
    #[must_use]
    pub fn new(defaults: Props) -> Self {
        Self { defaults }
    }
}

impl Component for CopyCard {
    fn render(&self, _ctx: &PageContext, props: &Props) -> RenderTree {
        let text = prop(&self.defaults, props, "text").unwrap_or_default();
        let button = prop(&self.defaults, props, "button").unwrap_or("Copy");

        let mut card = Element::new("div").attr("class", "copy-card");
        if let Some(title) = prop(&self.defaults, props, "title") {
            card = card.child(Element::new("div").attr("class", "copy-card-title").text(title));
        }
        let card = card
            .child(
                Element::new("pre")
                    .attr("class", "copy-card-code")
                    .child(Element::new("code").text(text)),
            )
            .child(
                Element::new("button")
                    .attr("class", "copy-card-button")
                    .attr("type", "button")
                    .attr("data-copy", text)
                    .text(button),
            );
        RenderTree::single(card)
    }
}

/// Compact inline link.
///
/// Props: `text`, `link`.
#[derive(Debug, Default)]
pub struct MiniLink {
    defaults: Props,
}

impl MiniLink {
    /// Link with default props.
    #[must_use]
    pub fn new(defaults: Props) -> Self {
        Self { defaults }
    }
}

impl Component for MiniLink {
    fn render(&self, _ctx: &PageContext, props: &Props) -> RenderTree {
        let link = prop(&self.defaults, props, "link").unwrap_or("#");
        let text = prop(&self.defaults, props, "text").unwrap_or(link);
        RenderTree::single(anchor(link, "mini-link").text(text))
    }
}

/// Trusted markup block.
///
/// Props: `html`.
#[derive(Debug, Default)]
pub struct HtmlBlock {
    defaults: Props,
}

impl HtmlBlock {
    /// Block with default props.
    #[must_use]
    pub fn new(defaults: Props) -> Self {
        Self { defaults }
    }
}

impl Component for HtmlBlock {
    fn render(&self, _ctx: &PageContext, props: &Props) -> RenderTree {
        match prop(&self.defaults, props, "html") {
            Some(html) => RenderTree::new(vec![RenderNode::raw(html)]),
            None => RenderTree::default(),
        }
    }
}
