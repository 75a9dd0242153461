//! Two-phase theme extension registry.
//!
//! The registry starts [`Unsealed`](RegistryState::Unsealed) while
//! configuration sources are applied: components are registered and bound to
//! extension points of the base shell. [`ThemeRegistry::seal`] moves it to
//! [`Sealed`](RegistryState::Sealed), after which it is read-only and serves
//! [`ThemeRegistry::resolve_shell`] to any number of concurrent renders
//! (share it through `Arc`). There is no transition back.
//!
//! # Example
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use quire_theme::{
//!     ComponentKind, DefaultShell, Layout, PageContext, Props, ThemeRegistry,
//! };
//!
//! let mut registry = ThemeRegistry::new(Arc::new(DefaultShell::default()));
//! let props = Props::from([("html".to_owned(), "<img src=\"/hero.png\">".to_owned())]);
//! registry.register("HeroImage", ComponentKind::Html.instantiate(props))?;
//! registry.bind("hero-image", "HeroImage")?;
//! registry.seal();
//!
//! let ctx = PageContext::new("/", "Home").with_layout(Layout::Home);
//! let html = registry.resolve_shell(&ctx)?.to_html();
//! assert!(html.contains("<img src=\"/hero.png\">"));
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::component::Component;
use crate::context::{PageContext, Props};
use crate::error::ThemeError;
use crate::render_tree::RenderTree;
use crate::shell::{BaseShell, Substitutions};

/// Registry lifecycle phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegistryState {
    /// Accepting `register` and `bind`.
    Unsealed,
    /// Read-only, serving renders.
    Sealed,
}

/// Extension point bindings.
///
/// Points absent from the composition fall through to the base shell's
/// default content.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ShellComposition {
    bindings: BTreeMap<String, String>,
}

impl ShellComposition {
    /// Component bound to `point`.
    #[must_use]
    pub fn get(&self, point: &str) -> Option<&str> {
        self.bindings.get(point).map(String::as_str)
    }

    /// `(point, component)` pairs in point order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings
            .iter()
            .map(|(point, name)| (point.as_str(), name.as_str()))
    }

    /// Number of bound points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no point is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Component registrations and shell composition for one theme.
pub struct ThemeRegistry {
    shell: Arc<dyn BaseShell>,
    components: BTreeMap<String, Arc<dyn Component>>,
    composition: ShellComposition,
    state: RegistryState,
}

impl ThemeRegistry {
    /// Unsealed registry extending `shell`.
    #[must_use]
    pub fn new(shell: Arc<dyn BaseShell>) -> Self {
        Self {
            shell,
            components: BTreeMap::new(),
            composition: ShellComposition::default(),
            state: RegistryState::Unsealed,
        }
    }

    /// Register a component, replacing any previous one with the same name.
    ///
    /// Bindings refer to components by name, so points already bound to
    /// `name` render the replacement.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::ConfigurationFrozen` once sealed.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        component: Arc<dyn Component>,
    ) -> Result<(), ThemeError> {
        let name = name.into();
        self.ensure_unsealed("register", &name)?;

        if self.components.insert(name.clone(), component).is_some() {
            tracing::warn!(component = %name, "Replacing registered component");
        } else {
            tracing::debug!(component = %name, "Registered component");
        }
        Ok(())
    }

    /// Bind a registered component to an extension point.
    ///
    /// Rebinding a point replaces the earlier binding.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::ConfigurationFrozen` once sealed,
    /// `ThemeError::UnknownExtensionPoint` if the base shell does not publish
    /// `point` (checked before the component), and
    /// `ThemeError::UnregisteredComponent` if `component` is not registered.
    pub fn bind(&mut self, point: &str, component: &str) -> Result<(), ThemeError> {
        self.ensure_unsealed("bind", point)?;

        if !self.shell.has_slot(point) {
            return Err(ThemeError::UnknownExtensionPoint {
                point: point.to_owned(),
            });
        }
        if !self.components.contains_key(component) {
            return Err(ThemeError::UnregisteredComponent {
                name: component.to_owned(),
                point: Some(point.to_owned()),
            });
        }

        let previous = self
            .composition
            .bindings
            .insert(point.to_owned(), component.to_owned());
        match previous {
            Some(prev) if prev != component => tracing::warn!(
                point,
                previous = %prev,
                component,
                "Rebinding extension point"
            ),
            _ => tracing::debug!(point, component, "Bound extension point"),
        }
        Ok(())
    }

    /// Remove the binding for `point`, restoring the base shell's default.
    ///
    /// Returns the component that was bound, if any.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::ConfigurationFrozen` once sealed and
    /// `ThemeError::UnknownExtensionPoint` for points outside the catalog.
    pub fn unbind(&mut self, point: &str) -> Result<Option<String>, ThemeError> {
        self.ensure_unsealed("unbind", point)?;

        if !self.shell.has_slot(point) {
            return Err(ThemeError::UnknownExtensionPoint {
                point: point.to_owned(),
            });
        }
        Ok(self.composition.bindings.remove(point))
    }

    /// Finish configuration. Further changes fail; sealing twice is a no-op.
    pub fn seal(&mut self) {
        if self.state == RegistryState::Sealed {
            return;
        }
        self.state = RegistryState::Sealed;
        tracing::debug!(
            components = self.components.len(),
            bindings = self.composition.len(),
            "Sealed theme registry"
        );
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn state(&self) -> RegistryState {
        self.state
    }

    /// Whether the registry is sealed.
    #[must_use]
    pub fn is_sealed(&self) -> bool {
        self.state == RegistryState::Sealed
    }

    /// Compose the page shell for `ctx`.
    ///
    /// Starts from the base shell's default tree and replaces the content of
    /// every bound extension point with the bound component's output. Unbound
    /// points keep their defaults. Pure: nothing in the registry or the shell
    /// changes.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::NotSealed` before [`seal`](Self::seal).
    pub fn resolve_shell(&self, ctx: &PageContext) -> Result<RenderTree, ThemeError> {
        if !self.is_sealed() {
            return Err(ThemeError::NotSealed);
        }

        let props = Props::new();
        let substitutions: Substitutions = self
            .composition
            .iter()
            .filter_map(|(point, name)| {
                // Bound names are checked at bind time and never removed
                let component = self.components.get(name)?;
                Some((point.to_owned(), component.render(ctx, &props)))
            })
            .collect();

        Ok(self.shell.render_with(ctx, &substitutions))
    }

    /// Render a registered component directly, as page content does.
    ///
    /// # Errors
    ///
    /// Returns `ThemeError::UnregisteredComponent` if `name` is unknown.
    pub fn render_component(
        &self,
        name: &str,
        ctx: &PageContext,
        props: &Props,
    ) -> Result<RenderTree, ThemeError> {
        let component =
            self.components
                .get(name)
                .ok_or_else(|| ThemeError::UnregisteredComponent {
                    name: name.to_owned(),
                    point: None,
                })?;
        Ok(component.render(ctx, props))
    }

    /// Whether a component is registered under `name`.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    /// Registered component names in sorted order.
    pub fn component_names(&self) -> impl Iterator<Item = &str> {
        self.components.keys().map(String::as_str)
    }

    /// Current extension point bindings.
    #[must_use]
    pub fn composition(&self) -> &ShellComposition {
        &self.composition
    }

    /// Extension points published by the base shell.
    #[must_use]
    pub fn catalog(&self) -> &[&str] {
        self.shell.catalog()
    }

    fn ensure_unsealed(&self, operation: &'static str, target: &str) -> Result<(), ThemeError> {
        if self.is_sealed() {
            return Err(ThemeError::ConfigurationFrozen {
                operation,
                target: target.to_owned(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for ThemeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThemeRegistry")
            .field("components", &self.components.keys().collect::<Vec<_>>())
            .field("composition", &self.composition)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
