//! Default page shell.
//!
//! Lays out the site chrome (head, nav bar, sidebar, doc body) and exposes
//! the default theme's extension points. Which regions appear depends on the
//! page layout: hero and features on `Home`, sidebar and outline on `Doc`.

use std::collections::BTreeMap;

use quire_nav::{Link, NavBarItem, RenderedNav, SidebarGroup, SidebarItem};
use serde::{Deserialize, Serialize};

use crate::context::{Layout, PageContext};
use crate::render_tree::{Element, RenderNode, RenderTree};
use crate::shell::BaseShell;

/// Extension points published by [`DefaultShell`].
pub const SLOT_CATALOG: &[&str] = &[
    "layout-top",
    "layout-bottom",
    "nav-bar-title-before",
    "nav-bar-title-after",
    "nav-bar-content-before",
    "nav-bar-content-after",
    "nav-screen-content-before",
    "nav-screen-content-after",
    "sidebar-nav-before",
    "sidebar-nav-after",
    "doc-top",
    "doc-bottom",
    "doc-before",
    "doc-after",
    "doc-footer-before",
    "aside-top",
    "aside-bottom",
    "aside-outline-before",
    "aside-outline-after",
    "aside-ads-before",
    "aside-ads-after",
    "home-hero-before",
    "hero-info-before",
    "hero-info",
    "hero-info-after",
    "hero-actions-after",
    "hero-image",
    "home-hero-after",
    "home-features-before",
    "home-features-after",
    "page-top",
    "page-bottom",
    "not-found",
];

/// Extra element placed in `<head>`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct HeadTag {
    /// Tag name (`script`, `meta`, `link`, ...).
    pub tag: String,
    /// Attributes, written in key order.
    #[serde(default)]
    pub attrs: BTreeMap<String, String>,
    /// Inner content, written unescaped (inline scripts and styles).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Site-wide data the shell renders around every page.
#[derive(Clone, Debug, Default)]
pub struct ShellChrome {
    /// Site title.
    pub title: String,
    /// Site description for the `<meta name="description">` tag.
    pub description: String,
    /// Document language.
    pub lang: String,
    /// Extra `<head>` entries.
    pub head: Vec<HeadTag>,
    /// Nav bar and sidebar.
    pub nav: RenderedNav,
}

/// The default base shell.
#[derive(Debug, Default)]
pub struct DefaultShell {
    chrome: ShellChrome,
}

impl DefaultShell {
    /// Shell rendering the given chrome.
    #[must_use]
    pub fn new(chrome: ShellChrome) -> Self {
        Self { chrome }
    }

    /// Site chrome.
    #[must_use]
    pub fn chrome(&self) -> &ShellChrome {
        &self.chrome
    }

    fn render_head(&self, ctx: &PageContext) -> Element {
        let title = if ctx.title.is_empty() || ctx.title == self.chrome.title {
            self.chrome.title.clone()
        } else {
            format!("{} | {}", ctx.title, self.chrome.title)
        };

        let mut head = Element::new("head")
            .child(Element::new("meta").attr("charset", "utf-8"))
            .child(
                Element::new("meta")
                    .attr("name", "viewport")
                    .attr("content", "width=device-width,initial-scale=1"),
            )
            .child(Element::new("title").text(title));

        if !self.chrome.description.is_empty() {
            head = head.child(
                Element::new("meta")
                    .attr("name", "description")
                    .attr("content", &self.chrome.description),
            );
        }

        head.children(self.chrome.head.iter().map(|tag| {
            let mut el = Element::new(&tag.tag);
            for (name, value) in &tag.attrs {
                el = el.attr(name, value);
            }
            if let Some(content) = &tag.content {
                el = el.child(RenderNode::raw(content));
            }
            el.into()
        }))
    }

    /// Nav bar (matches `VPNav`).
    fn render_nav(&self, ctx: &PageContext) -> Element {
        let bar = Element::new("div")
            .attr("class", "VPNavBar")
            .child(RenderNode::slot("nav-bar-title-before", Vec::new()))
            .child(
                Element::new("a")
                    .attr("class", "VPNavBarTitle")
                    .attr("href", "/")
                    .text(&self.chrome.title),
            )
            .child(RenderNode::slot("nav-bar-title-after", Vec::new()))
            .child(RenderNode::slot("nav-bar-content-before", Vec::new()))
            .child(
                Element::new("nav")
                    .attr("class", "VPNavBarMenu")
                    .children(self.chrome.nav.nav_bar.iter().map(|item| nav_bar_link(item, ctx))),
            )
            .child(RenderNode::slot("nav-bar-content-after", Vec::new()));

        let screen = Element::new("div")
            .attr("class", "VPNavScreen")
            .child(RenderNode::slot("nav-screen-content-before", Vec::new()))
            .child(RenderNode::slot("nav-screen-content-after", Vec::new()));

        Element::new("header")
            .attr("class", "VPNav")
            .child(bar)
            .child(screen)
    }

    /// Sidebar (matches `VPSidebar`).
    fn render_sidebar(&self, ctx: &PageContext) -> Element {
        Element::new("aside")
            .attr("class", "VPSidebar")
            .child(RenderNode::slot("sidebar-nav-before", Vec::new()))
            .child(
                Element::new("nav")
                    .attr("class", "VPSidebarNav")
                    .children(self.chrome.nav.sidebar.iter().map(|g| sidebar_group(g, ctx))),
            )
            .child(RenderNode::slot("sidebar-nav-after", Vec::new()))
    }

    fn render_home(&self, ctx: &PageContext) -> Vec<RenderNode> {
        let heading = ctx
            .frontmatter
            .get("hero_name")
            .unwrap_or(&self.chrome.title);
        let tagline = ctx
            .frontmatter
            .get("hero_tagline")
            .unwrap_or(&self.chrome.description);

        let info_default = vec![
            Element::new("h1").attr("class", "name").text(heading).into(),
            Element::new("p").attr("class", "tagline").text(tagline).into(),
        ];

        let hero = Element::new("section")
            .attr("class", "VPHero")
            .child(
                Element::new("div")
                    .attr("class", "main")
                    .child(RenderNode::slot("hero-info-before", Vec::new()))
                    .child(RenderNode::slot("hero-info", info_default))
                    .child(RenderNode::slot("hero-info-after", Vec::new()))
                    .child(RenderNode::slot("hero-actions-after", Vec::new())),
            )
            .child(
                Element::new("div")
                    .attr("class", "image")
                    .child(RenderNode::slot("hero-image", Vec::new())),
            );

        vec![
            Element::new("div")
                .attr("class", "VPHome")
                .child(RenderNode::slot("home-hero-before", Vec::new()))
                .child(hero)
                .child(RenderNode::slot("home-hero-after", Vec::new()))
                .child(RenderNode::slot("home-features-before", Vec::new()))
                .child(Element::new("div").attr("class", "VPFeatures"))
                .child(RenderNode::slot("home-features-after", Vec::new()))
                .into(),
        ]
    }

    fn render_doc(&self, ctx: &PageContext) -> Vec<RenderNode> {
        let aside = Element::new("div")
            .attr("class", "aside")
            .child(RenderNode::slot("aside-top", Vec::new()))
            .child(RenderNode::slot("aside-outline-before", Vec::new()))
            .child(Element::new("nav").attr("class", "VPDocAsideOutline"))
            .child(RenderNode::slot("aside-outline-after", Vec::new()))
            .child(RenderNode::slot("aside-ads-before", Vec::new()))
            .child(RenderNode::slot("aside-ads-after", Vec::new()))
            .child(RenderNode::slot("aside-bottom", Vec::new()));

        let doc = Element::new("div")
            .attr("class", "VPDoc")
            .child(RenderNode::slot("doc-top", Vec::new()))
            .child(RenderNode::slot("doc-before", Vec::new()))
            .child(content_outlet("vp-doc", ctx))
            .child(RenderNode::slot("doc-footer-before", Vec::new()))
            .child(Element::new("footer").attr("class", "VPDocFooter"))
            .child(RenderNode::slot("doc-after", Vec::new()))
            .child(aside)
            .child(RenderNode::slot("doc-bottom", Vec::new()));

        vec![self.render_sidebar(ctx).into(), doc.into()]
    }

    fn render_page(ctx: &PageContext) -> Vec<RenderNode> {
        vec![
            Element::new("div")
                .attr("class", "VPPage")
                .child(RenderNode::slot("page-top", Vec::new()))
                .child(content_outlet("vp-page", ctx))
                .child(RenderNode::slot("page-bottom", Vec::new()))
                .into(),
        ]
    }

    fn render_not_found() -> Vec<RenderNode> {
        let default = Element::new("div")
            .attr("class", "NotFound")
            .child(Element::new("p").attr("class", "code").text("404"))
            .child(Element::new("h1").attr("class", "title").text("PAGE NOT FOUND"))
            .child(
                Element::new("a")
                    .attr("class", "link")
                    .attr("href", "/")
                    .text("Take me home"),
            );
        vec![RenderNode::slot("not-found", vec![default.into()])]
    }
}

impl BaseShell for DefaultShell {
    fn catalog(&self) -> &[&str] {
        SLOT_CATALOG
    }

    fn render_default(&self, ctx: &PageContext) -> RenderTree {
        let content = match ctx.layout {
            Layout::Home => self.render_home(ctx),
            Layout::Doc => self.render_doc(ctx),
            Layout::Page => Self::render_page(ctx),
            Layout::NotFound => Self::render_not_found(),
        };

        let layout = Element::new("div")
            .attr("class", "Layout")
            .child(RenderNode::slot("layout-top", Vec::new()))
            .child(self.render_nav(ctx))
            .child(
                Element::new("div")
                    .attr("class", "VPContent")
                    .children(content),
            )
            .child(RenderNode::slot("layout-bottom", Vec::new()));

        let lang = if self.chrome.lang.is_empty() {
            "en-US"
        } else {
            &self.chrome.lang
        };

        RenderTree::new(vec![
            RenderNode::raw("<!DOCTYPE html>\n"),
            Element::new("html")
                .attr("lang", lang)
                .child(self.render_head(ctx))
                .child(Element::new("body").child(layout))
                .into(),
        ])
    }
}

/// Placeholder where the host renderer injects page content.
fn content_outlet(class: &str, ctx: &PageContext) -> Element {
    Element::new("main")
        .attr("class", class)
        .attr("data-page", &ctx.path)
}

/// Whether `href` points at the page being rendered.
fn is_active(href: &str, ctx: &PageContext) -> bool {
    let key = |s: &str| Link::parse(s).and_then(|l| l.document_key());
    match (key(href), key(&ctx.path)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

fn link_element(text: &str, href: &str, class: &str, ctx: &PageContext) -> RenderNode {
    let class = if is_active(href, ctx) {
        format!("{class} active")
    } else {
        class.to_owned()
    };
    let mut el = Element::new("a").attr("class", class).attr("href", href);
    if Link::parse(href).is_some_and(|l| l.is_external()) {
        el = el.attr("target", "_blank").attr("rel", "noreferrer");
    }
    el.text(text).into()
}

fn nav_bar_link(item: &NavBarItem, ctx: &PageContext) -> RenderNode {
    match &item.link {
        Some(href) => link_element(&item.text, href, "VPNavBarMenuLink", ctx),
        None => Element::new("span")
            .attr("class", "VPNavBarMenuGroup")
            .text(&item.text)
            .into(),
    }
}

fn sidebar_group(group: &SidebarGroup, ctx: &PageContext) -> RenderNode {
    let heading = match &group.link {
        Some(href) => link_element(&group.text, href, "VPSidebarItem level-0", ctx),
        None => Element::new("h2")
            .attr("class", "VPSidebarItem level-0")
            .text(&group.text)
            .into(),
    };

    let class = match group.collapsed {
        Some(true) => "group collapsible collapsed",
        Some(false) => "group collapsible",
        None => "group",
    };

    let mut section = Element::new("section").attr("class", class).child(heading);
    if !group.items.is_empty() {
        section = section.child(sidebar_items(&group.items, 1, ctx));
    }
    section.into()
}

fn sidebar_items(items: &[SidebarItem], level: usize, ctx: &PageContext) -> Element {
    Element::new("ul").children(items.iter().map(|item| {
        let class = format!("VPSidebarItem level-{level}");
        let label = match &item.link {
            Some(href) => link_element(&item.text, href, &class, ctx),
            None => Element::new("p").attr("class", class).text(&item.text).into(),
        };
        let mut li = Element::new("li").child(label);
        if !item.items.is_empty() {
            li = li.child(sidebar_items(&item.items, level + 1, ctx));
        }
        li.into()
    }))
}
