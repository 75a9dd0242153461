//! Configuration management for Quire.
//!
//! Parses `quire.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.title`
//! - `site.description`
//! - `head[].attrs.*`

mod expand;

use std::path::{Path, PathBuf};

use quire_nav::NavEntry;
use quire_theme::{ComponentKind, HeadTag, Props};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override site title.
    pub title: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "quire.toml";

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site identity.
    pub site: SiteConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Extra `<head>` entries, in order.
    pub head: Vec<HeadTag>,
    /// Nav bar declarations.
    pub nav: Vec<NavEntry>,
    /// Sidebar declarations.
    pub sidebar: Vec<NavEntry>,
    /// Components to register, in order.
    pub components: Vec<ComponentConfig>,
    /// Extension point bindings, applied in order. Later entries win.
    pub slots: Vec<SlotBinding>,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// `[site]` section.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title shown in the nav bar and `<title>`.
    pub title: String,
    /// Site description for the `<meta name="description">` tag.
    pub description: String,
    /// Document language.
    pub lang: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Quire".to_owned(),
            description: String::new(),
            lang: "en-US".to_owned(),
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
}

/// `[[components]]` entry: a built-in component kind registered by name.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ComponentConfig {
    /// Registration name.
    pub name: String,
    /// Component kind.
    pub kind: ComponentKind,
    /// Default props.
    #[serde(default)]
    pub props: Props,
}

/// `[[slots]]` entry: binds a component to an extension point.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct SlotBinding {
    /// Extension point key.
    pub point: String,
    /// Registered component name.
    pub component: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.title`").
        field: String,
        /// Error message (e.g., "${`SITE_TITLE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Match `[A-Za-z][A-Za-z0-9-]*`.
fn is_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
}

/// Match `[A-Za-z_:][A-Za-z0-9_:.-]*`.
fn is_attr_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || matches!(c, '_' | ':'))
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'))
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `quire.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            tracing::debug!("No {CONFIG_FILENAME} found, using defaults");
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(title) = &settings.title {
            self.site.title.clone_from(title);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            head: Vec::new(),
            nav: Vec::new(),
            sidebar: Vec::new(),
            components: Vec::new(),
            slots: Vec::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Navigation declarations and slot targets are checked when the site is
    /// assembled, where every problem is reported together.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_head()?;
        self.validate_components()?;
        self.validate_slots()?;
        Ok(())
    }

    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        require_non_empty(&self.site.lang, "site.lang")?;
        Ok(())
    }

    fn validate_head(&self) -> Result<(), ConfigError> {
        for (i, tag) in self.head.iter().enumerate() {
            require_non_empty(&tag.tag, &format!("head[{i}].tag"))?;
            if !is_tag_name(&tag.tag) {
                return Err(ConfigError::Validation(format!(
                    "head[{i}].tag \"{}\" is not a valid tag name",
                    tag.tag
                )));
            }
            if let Some(name) = tag.attrs.keys().find(|name| !is_attr_name(name)) {
                return Err(ConfigError::Validation(format!(
                    "head[{i}].attrs key \"{name}\" is not a valid attribute name"
                )));
            }
        }
        Ok(())
    }

    /// Repeated names are allowed: the registry keeps the last declaration.
    fn validate_components(&self) -> Result<(), ConfigError> {
        for (i, component) in self.components.iter().enumerate() {
            require_non_empty(&component.name, &format!("components[{i}].name"))?;
        }
        Ok(())
    }

    fn validate_slots(&self) -> Result<(), ConfigError> {
        for (i, slot) in self.slots.iter().enumerate() {
            require_non_empty(&slot.point, &format!("slots[{i}].point"))?;
            require_non_empty(&slot.component, &format!("slots[{i}].component"))?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        self.site.description = expand::expand_env(&self.site.description, "site.description")?;

        for (i, tag) in self.head.iter_mut().enumerate() {
            for (name, value) in &mut tag.attrs {
                *value = expand::expand_env(value, &format!("head[{i}].attrs.{name}"))?;
            }
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site.title, "Quire");
        assert_eq!(config.site.lang, "en-US");
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
        assert!(config.nav.is_empty());
        assert!(config.slots.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.title, "Quire");
        assert!(config.components.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
title = "Toolbox"
description = "Scripts and downloads"
lang = "zh-CN"

[docs]
source_dir = "content"

[[head]]
tag = "script"
attrs = { src = "https://example.com/analytics.js", async = "" }

[[nav]]
text = "Home"
link = "/"

[[nav]]
text = "Forum"
link = "https://club.fnnas.com/"

[[sidebar]]
text = "Downloads"
items = [
  { text = "Tools", link = "/downloads/tools.md" },
]

[[components]]
name = "ToolsCard"
kind = "link-card"
props = { title = "Tools", link = "/downloads/tools.md" }

[[slots]]
point = "hero-image"
component = "ToolsCard"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site.title, "Toolbox");
        assert_eq!(config.site.lang, "zh-CN");
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/content")
        );
        assert_eq!(config.head.len(), 1);
        assert_eq!(config.head[0].tag, "script");
        assert_eq!(
            config.head[0].attrs.get("src").map(String::as_str),
            Some("https://example.com/analytics.js")
        );
        assert_eq!(
            config.nav,
            vec![
                NavEntry::link("Home", "/"),
                NavEntry::link("Forum", "https://club.fnnas.com/"),
            ]
        );
        assert_eq!(
            config.sidebar,
            vec![NavEntry::group(
                "Downloads",
                vec![NavEntry::link("Tools", "/downloads/tools.md")]
            )]
        );
        assert_eq!(
            config.components,
            vec![ComponentConfig {
                name: "ToolsCard".to_owned(),
                kind: ComponentKind::LinkCard,
                props: Props::from([
                    ("title".to_owned(), "Tools".to_owned()),
                    ("link".to_owned(), "/downloads/tools.md".to_owned()),
                ]),
            }]
        );
        assert_eq!(
            config.slots,
            vec![SlotBinding {
                point: "hero-image".to_owned(),
                component: "ToolsCard".to_owned(),
            }]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_unknown_component_kind() {
        let toml = r#"
[[components]]
name = "Carousel"
kind = "carousel"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_apply_cli_settings_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
        assert_eq!(config.site.title, "Quire"); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_title() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            title: Some("Preview".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site.title, "Preview");
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.site.title, "Quire");
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/test/docs"));
    }

    #[test]
    fn test_expand_env_vars_site_and_head() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("QUIRE_CFG_TITLE", "Toolbox");
            std::env::set_var("QUIRE_CFG_CDN", "cdn.example.com");
        }

        let toml = r#"
[site]
title = "${QUIRE_CFG_TITLE}"
description = "${QUIRE_CFG_DESC:-Scripts and downloads}"

[[head]]
tag = "script"
attrs = { src = "https://${QUIRE_CFG_CDN}/a.js" }
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.site.title, "Toolbox");
        assert_eq!(config.site.description, "Scripts and downloads");
        assert_eq!(
            config.head[0].attrs.get("src").map(String::as_str),
            Some("https://cdn.example.com/a.js")
        );

        unsafe {
            std::env::remove_var("QUIRE_CFG_TITLE");
            std::env::remove_var("QUIRE_CFG_CDN");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("QUIRE_CFG_MISSING");
        }

        let toml = r#"
[[head]]
tag = "script"
attrs = { src = "${QUIRE_CFG_MISSING}" }
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("QUIRE_CFG_MISSING"));
        assert!(err.to_string().contains("head[0].attrs.src"));
    }

    #[test]
    fn test_inline_script_not_expanded() {
        let toml = r#"
[[head]]
tag = "script"
content = "var $q = 1;"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        assert_eq!(config.head[0].content.as_deref(), Some("var $q = 1;"));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_site_title_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.title = "  ".to_owned();
        assert_validation_error(&config, &["site.title", "empty"]);
    }

    #[test]
    fn test_validate_head_tag_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.head.push(HeadTag::default());
        assert_validation_error(&config, &["head[0].tag"]);
    }

    #[test]
    fn test_validate_head_tag_name_invalid() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.head.push(HeadTag {
            tag: "meta><script".to_owned(),
            ..HeadTag::default()
        });
        assert_validation_error(&config, &["head[0].tag", "meta><script"]);
    }

    #[test]
    fn test_validate_head_attr_name_invalid() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let mut tag = HeadTag {
            tag: "meta".to_owned(),
            ..HeadTag::default()
        };
        tag.attrs.insert("name".to_owned(), "theme-color".to_owned());
        tag.attrs.insert("x onload=alert(1)".to_owned(), String::new());
        config.head.push(HeadTag {
            tag: "link".to_owned(),
            ..HeadTag::default()
        });
        config.head.push(tag);
        assert_validation_error(&config, &["head[1].attrs", "x onload=alert(1)"]);
    }

    #[test]
    fn test_validate_head_names_accepted() {
        let mut config = Config::default_with_base(Path::new("/test"));
        for name in ["meta", "link", "h1", "x-analytics"] {
            let mut tag = HeadTag {
                tag: name.to_owned(),
                ..HeadTag::default()
            };
            tag.attrs.insert("data-id".to_owned(), "1".to_owned());
            tag.attrs.insert("xml:lang".to_owned(), "en".to_owned());
            config.head.push(tag);
        }
        assert!(config.validate().is_ok());

        config.head.push(HeadTag {
            tag: "1meta".to_owned(),
            ..HeadTag::default()
        });
        assert_validation_error(&config, &["head[4].tag"]);
    }

    #[test]
    fn test_repeated_component_names_are_kept_in_order() {
        let toml = r#"
[[components]]
name = "Card"
kind = "link-card"

[[components]]
name = "Card"
kind = "copy-card"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert!(config.validate().is_ok());
        let kinds: Vec<_> = config.components.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![ComponentKind::LinkCard, ComponentKind::CopyCard]);
    }

    #[test]
    fn test_validate_slot_point_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.slots.push(SlotBinding {
            point: String::new(),
            component: "Card".to_owned(),
        });
        assert_validation_error(&config, &["slots[0].point"]);
    }

    #[test]
    fn test_repeated_slot_bindings_are_kept_in_order() {
        let toml = r#"
[[slots]]
point = "hero-image"
component = "A"

[[slots]]
point = "hero-image"
component = "B"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert!(config.validate().is_ok());
        let components: Vec<_> = config.slots.iter().map(|s| s.component.as_str()).collect();
        assert_eq!(components, vec!["A", "B"]);
    }

    // Loading and discovery

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quire.toml");
        std::fs::write(&path, "[site]\ntitle = \"Toolbox\"\n\n[docs]\nsource_dir = \"src\"\n")
            .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site.title, "Toolbox");
        assert_eq!(config.docs_resolved.source_dir, dir.path().join("src"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_applies_cli_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quire.toml");
        std::fs::write(&path, "[site]\ntitle = \"Toolbox\"\n").unwrap();

        let settings = CliSettings {
            source_dir: Some(PathBuf::from("/elsewhere")),
            title: Some("Preview".to_owned()),
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.site.title, "Preview");
        assert_eq!(config.docs_resolved.source_dir, PathBuf::from("/elsewhere"));
    }

    #[test]
    fn test_load_rejects_empty_cli_title() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quire.toml");
        std::fs::write(&path, "").unwrap();

        let settings = CliSettings {
            title: Some(String::new()),
            ..Default::default()
        };
        let err = Config::load(Some(&path), Some(&settings)).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("missing.toml"));
    }

    #[test]
    fn test_load_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quire.toml");
        std::fs::write(&path, "[site\ntitle = ").unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("quire.toml"), "").unwrap();
        let nested = dir.path().join("docs").join("guide");
        std::fs::create_dir_all(&nested).unwrap();

        let found = Config::discover_config(&nested).unwrap();

        assert_eq!(found, dir.path().join("quire.toml"));
    }

    #[test]
    fn test_discover_config_prefers_nearest() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("quire.toml"), "").unwrap();
        let nested = dir.path().join("sub");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(nested.join("quire.toml"), "").unwrap();

        assert_eq!(
            Config::discover_config(&nested),
            Some(nested.join("quire.toml"))
        );
    }
}
