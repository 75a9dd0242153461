//! Site assembly from configuration.
//!
//! [`Site::load`] runs the whole configuration phase in one pass:
//!
//! 1. Scan the docs directory into a content inventory
//! 2. Build the nav bar and sidebar and check their links
//! 3. Register the built-in components, then the configured ones
//! 4. Apply slot bindings in declaration order and seal the theme
//!
//! Problems from every step are collected, so a single load reports the
//! whole list. A loaded `Site` is immutable and can be shared across threads.

use std::path::Path;
use std::sync::Arc;

use quire_config::{CliSettings, Config};
use quire_nav::{ContentInventory, FsInventory, Link, RenderedNav, SiteNavigation};
use quire_theme::{
    ComponentKind, DefaultShell, Layout, PageContext, Props, RenderTree, ShellChrome,
    ThemeRegistry,
};

use crate::error::{Problem, SiteError};
use crate::page::page_context;

/// Components every site registers before its own.
const BUILTIN_COMPONENTS: &[(&str, ComponentKind)] = &[
    ("CopyCard", ComponentKind::CopyCard),
    ("LinkCard", ComponentKind::LinkCard),
    ("MiniLink", ComponentKind::MiniLink),
];

/// A loaded, validated site.
#[derive(Debug)]
pub struct Site {
    title: String,
    navigation: SiteNavigation,
    rendered_nav: RenderedNav,
    inventory: FsInventory,
    registry: Arc<ThemeRegistry>,
}

impl Site {
    /// Load configuration and assemble the site.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Config` if configuration cannot be loaded and
    /// `SiteError::Invalid` with every problem found during assembly.
    pub fn open(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, SiteError> {
        let config = Config::load(config_path, cli_settings)?;
        Self::load(&config)
    }

    /// Assemble the site described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Invalid` listing every navigation and theme
    /// problem found.
    pub fn load(config: &Config) -> Result<Self, SiteError> {
        let mut problems = Vec::new();

        let inventory = FsInventory::scan(&config.docs_resolved.source_dir);

        let navigation = match SiteNavigation::build_checked(
            &config.nav,
            &config.sidebar,
            &inventory,
        ) {
            Ok(navigation) => navigation,
            Err(errors) => {
                problems.extend(errors.into_iter().map(Problem::from));
                SiteNavigation::default()
            }
        };
        let rendered_nav = navigation.render();

        let shell = DefaultShell::new(ShellChrome {
            title: config.site.title.clone(),
            description: config.site.description.clone(),
            lang: config.site.lang.clone(),
            head: config.head.clone(),
            nav: rendered_nav.clone(),
        });
        let registry = configure_theme(config, shell, &mut problems);

        if !problems.is_empty() {
            tracing::debug!(problems = problems.len(), "Site configuration rejected");
            return Err(SiteError::Invalid(problems));
        }

        tracing::info!(
            title = %config.site.title,
            documents = inventory.len(),
            components = registry.component_names().count(),
            bindings = registry.composition().len(),
            "Loaded site"
        );

        Ok(Self {
            title: config.site.title.clone(),
            navigation,
            rendered_nav,
            inventory,
            registry: Arc::new(registry),
        })
    }

    /// Site title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Built nav bar and sidebar.
    #[must_use]
    pub fn navigation(&self) -> &SiteNavigation {
        &self.navigation
    }

    /// Navigation in the shape the renderer consumes.
    #[must_use]
    pub fn rendered_nav(&self) -> &RenderedNav {
        &self.rendered_nav
    }

    /// Documents found in the docs directory.
    #[must_use]
    pub fn inventory(&self) -> &FsInventory {
        &self.inventory
    }

    /// Sealed theme registry.
    #[must_use]
    pub fn registry(&self) -> &Arc<ThemeRegistry> {
        &self.registry
    }

    /// Render context for the page at `path`.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::PageNotFound` if `path` does not resolve to a
    /// document, or `SiteError::Io` if its source cannot be read.
    pub fn page(&self, path: &str) -> Result<PageContext, SiteError> {
        let key = Link::parse(path)
            .filter(|link| !link.is_external())
            .and_then(|link| link.document_key())
            .filter(|key| self.inventory.contains(key))
            .ok_or_else(|| SiteError::PageNotFound(path.to_owned()))?;

        let source = self.inventory.source_dir().join(format!("{key}.md"));
        let content = std::fs::read_to_string(&source)?;
        Ok(page_context(path, &content, &self.title))
    }

    /// Compose the page shell for `path` as HTML.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::PageNotFound` for paths without a document.
    pub fn render_page(&self, path: &str) -> Result<String, SiteError> {
        let ctx = self.page(path)?;
        Ok(self.registry.resolve_shell(&ctx)?.to_html())
    }

    /// Compose the not-found page.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Theme` if the theme cannot compose the shell.
    pub fn render_not_found(&self, path: &str) -> Result<String, SiteError> {
        let ctx = PageContext::new(path, "404").with_layout(Layout::NotFound);
        Ok(self.registry.resolve_shell(&ctx)?.to_html())
    }

    /// Render a registered component for use inside page content.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::Theme` if `name` is not registered.
    pub fn render_component(
        &self,
        name: &str,
        ctx: &PageContext,
        props: &Props,
    ) -> Result<RenderTree, SiteError> {
        Ok(self.registry.render_component(name, ctx, props)?)
    }
}

/// Register components, apply bindings and seal.
fn configure_theme(
    config: &Config,
    shell: DefaultShell,
    problems: &mut Vec<Problem>,
) -> ThemeRegistry {
    let mut registry = ThemeRegistry::new(Arc::new(shell));

    let builtins = BUILTIN_COMPONENTS
        .iter()
        .map(|(name, kind)| (*name, kind.instantiate(Props::new())));
    let configured = config
        .components
        .iter()
        .map(|c| (c.name.as_str(), c.kind.instantiate(c.props.clone())));

    for (name, component) in builtins.chain(configured) {
        if let Err(e) = registry.register(name, component) {
            problems.push(e.into());
        }
    }

    for slot in &config.slots {
        if let Err(e) = registry.bind(&slot.point, &slot.component) {
            problems.push(e.into());
        }
    }

    registry.seal();
    registry
}
