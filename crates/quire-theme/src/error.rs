//! Theme wiring errors.

/// Error returned by [`ThemeRegistry`](crate::ThemeRegistry) operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ThemeError {
    /// The base shell does not publish this extension point.
    #[error("unknown extension point \"{point}\"")]
    UnknownExtensionPoint {
        /// The requested point.
        point: String,
    },
    /// No component is registered under this name.
    #[error("component \"{name}\" is not registered{}", bound_to(.point.as_deref()))]
    UnregisteredComponent {
        /// The requested component name.
        name: String,
        /// Extension point the component was being bound to, if any.
        point: Option<String>,
    },
    /// Configuration was changed after the registry was sealed.
    #[error("cannot {operation} \"{target}\": theme configuration is sealed")]
    ConfigurationFrozen {
        /// Operation attempted (`register`, `bind`, `unbind`).
        operation: &'static str,
        /// Component name or extension point the operation targeted.
        target: String,
    },
    /// The shell was requested before configuration was complete.
    #[error("theme configuration is not sealed yet")]
    NotSealed,
}

fn bound_to(point: Option<&str>) -> String {
    point
        .map(|p| format!(" (bound to \"{p}\")"))
        .unwrap_or_default()
}
