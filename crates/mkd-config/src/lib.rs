//! Configuration management for mkdocs-mcp.
//!
//! Parses `mkd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings (which the binary also fills from `MKDOCS_DOCS_PATH` and
//! `MKDOCS_CONFIG_PATH`) are applied during load via [`CliSettings`].
//!
//! Paths are resolved once at load time but only checked for existence when an
//! operation asks for them ([`DocsConfig::require_docs_dir`],
//! [`DocsConfig::require_site_config`]), so a missing docs directory surfaces
//! as an error payload instead of a startup failure.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support `~`, `$VAR` and `${VAR}` expansion.
//!
//! Expanded fields:
//! - `server.name`
//! - `docs.docs_dir`
//! - `docs.site_config`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override documentation directory.
    pub docs_dir: Option<PathBuf>,
    /// Override site configuration file.
    pub site_config: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "mkd.toml";

/// Environment variable naming the documentation directory.
pub const DOCS_PATH_ENV: &str = "MKDOCS_DOCS_PATH";

/// Environment variable naming the site configuration file.
pub const CONFIG_PATH_ENV: &str = "MKDOCS_CONFIG_PATH";

/// Default documentation directory, relative to the base directory.
const DEFAULT_DOCS_DIR: &str = "docs";

/// Default site configuration file, relative to the base directory.
const DEFAULT_SITE_CONFIG: &str = "mkdocs.yml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server identity reported alongside tool descriptors.
    pub server: ServerConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,

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

/// Server identity.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server name.
    pub name: String,
    /// Server version.
    pub version: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "mkdocs-mcp".to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    docs_dir: Option<String>,
    site_config: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DocsConfig {
    /// Directory holding the Markdown documents.
    pub docs_dir: PathBuf,
    /// Site configuration file (`mkdocs.yml`).
    pub site_config: PathBuf,
}

impl DocsConfig {
    /// Create a docs configuration from explicit paths.
    #[must_use]
    pub fn new(docs_dir: impl Into<PathBuf>, site_config: impl Into<PathBuf>) -> Self {
        Self {
            docs_dir: docs_dir.into(),
            site_config: site_config.into(),
        }
    }

    /// Documentation directory, checked for existence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingPath` if the directory does not exist.
    pub fn require_docs_dir(&self) -> Result<&Path, ConfigError> {
        if self.docs_dir.is_dir() {
            Ok(&self.docs_dir)
        } else {
            Err(ConfigError::MissingPath {
                label: "Documentation path",
                path: self.docs_dir.clone(),
                env: DOCS_PATH_ENV,
            })
        }
    }

    /// Site configuration file, checked for existence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingPath` if the file does not exist.
    pub fn require_site_config(&self) -> Result<&Path, ConfigError> {
        if self.site_config.is_file() {
            Ok(&self.site_config)
        } else {
            Err(ConfigError::MissingPath {
                label: "Config file",
                path: self.site_config.clone(),
                env: CONFIG_PATH_ENV,
            })
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// A configured root path does not exist.
    #[error("{label} does not exist: {}. Set {env} environment variable.", .path.display())]
    MissingPath {
        /// Human-readable name of the path.
        label: &'static str,
        /// Path that was looked up.
        path: PathBuf,
        /// Environment variable that sets it.
        env: &'static str,
    },
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
        /// Config field path (e.g., "`docs.docs_dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
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

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `mkd.toml` in current directory and parents,
    /// falling back to `docs/` and `mkdocs.yml` in the current directory.
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
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Create a configuration pointing at explicit paths.
    #[must_use]
    pub fn from_paths(docs_dir: impl Into<PathBuf>, site_config: impl Into<PathBuf>) -> Self {
        Self {
            docs_resolved: DocsConfig::new(docs_dir, site_config),
            ..Self::default()
        }
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(docs_dir) = &settings.docs_dir {
            self.docs_resolved.docs_dir.clone_from(docs_dir);
        }
        if let Some(site_config) = &settings.site_config {
            self.docs_resolved.site_config.clone_from(site_config);
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
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
            server: ServerConfig::default(),
            docs: DocsConfigRaw::default(),
            docs_resolved: DocsConfig {
                docs_dir: base.join(DEFAULT_DOCS_DIR),
                site_config: base.join(DEFAULT_SITE_CONFIG),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.name, "server.name")?;
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.name = expand::expand_env(&self.server.name, "server.name")?;

        if let Some(ref dir) = self.docs.docs_dir {
            self.docs.docs_dir = Some(expand::expand_env(dir, "docs.docs_dir")?);
        }
        if let Some(ref file) = self.docs.site_config {
            self.docs.site_config = Some(expand::expand_env(file, "docs.site_config")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            docs_dir: resolve(self.docs.docs_dir.as_deref(), DEFAULT_DOCS_DIR),
            site_config: resolve(self.docs.site_config.as_deref(), DEFAULT_SITE_CONFIG),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.server.name, "mkdocs-mcp");
        assert_eq!(config.server.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(config.docs_resolved.docs_dir, PathBuf::from("/test/docs"));
        assert_eq!(
            config.docs_resolved.site_config,
            PathBuf::from("/test/mkdocs.yml")
        );
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.name, "mkdocs-mcp");
    }

    #[test]
    fn test_parse_server_config() {
        let toml = r#"
[server]
name = "team-docs"
version = "2.1.0"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.name, "team-docs");
        assert_eq!(config.server.version, "2.1.0");
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
docs_dir = "documentation"
site_config = "site/mkdocs.yaml"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved,
            DocsConfig::new("/project/documentation", "/project/site/mkdocs.yaml")
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved,
            DocsConfig::new("/project/docs", "/project/mkdocs.yml")
        );
    }

    #[test]
    fn test_apply_cli_settings_docs_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            docs_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.docs_resolved.docs_dir, PathBuf::from("/custom/docs"));
        assert_eq!(
            config.docs_resolved.site_config,
            PathBuf::from("/test/mkdocs.yml")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_site_config() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            site_config: Some(PathBuf::from("/custom/mkdocs.yml")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.site_config,
            PathBuf::from("/custom/mkdocs.yml")
        );
        assert_eq!(config.docs_resolved.docs_dir, PathBuf::from("/test/docs")); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(config.docs_resolved, before.docs_resolved);
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let result = Config::load(Some(Path::new("/nonexistent/mkd.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mkd.toml");
        std::fs::write(&path, "[docs]\ndocs_dir = \"content\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.docs_resolved.docs_dir, temp_dir.path().join("content"));
        assert_eq!(
            config.docs_resolved.site_config,
            temp_dir.path().join("mkdocs.yml")
        );
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_cli_settings_take_precedence() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mkd.toml");
        std::fs::write(&path, "[docs]\ndocs_dir = \"content\"\n").unwrap();

        let settings = CliSettings {
            docs_dir: Some(PathBuf::from("/override")),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.docs_resolved.docs_dir, PathBuf::from("/override"));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("mkd.toml");
        std::fs::write(&path, "[docs\n").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_empty_server_name() {
        let toml = r#"
[server]
name = "  "
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("server.name"));
    }

    #[test]
    fn test_require_docs_dir_missing() {
        let docs = DocsConfig::new("/nonexistent/docs", "/nonexistent/mkdocs.yml");
        let err = docs.require_docs_dir().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Documentation path does not exist: /nonexistent/docs. \
             Set MKDOCS_DOCS_PATH environment variable."
        );
    }

    #[test]
    fn test_require_site_config_missing() {
        let docs = DocsConfig::new("/nonexistent/docs", "/nonexistent/mkdocs.yml");
        let err = docs.require_site_config().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Config file does not exist: /nonexistent/mkdocs.yml. \
             Set MKDOCS_CONFIG_PATH environment variable."
        );
    }

    #[test]
    fn test_require_paths_present() {
        let temp_dir = tempfile::tempdir().unwrap();
        let site_config = temp_dir.path().join("mkdocs.yml");
        std::fs::write(&site_config, "site_name: Test\n").unwrap();

        let docs = DocsConfig::new(temp_dir.path(), &site_config);
        assert_eq!(docs.require_docs_dir().unwrap(), temp_dir.path());
        assert_eq!(docs.require_site_config().unwrap(), site_config);
    }

    #[test]
    fn test_require_site_config_rejects_directory() {
        let temp_dir = tempfile::tempdir().unwrap();
        let docs = DocsConfig::new(temp_dir.path(), temp_dir.path());
        assert!(docs.require_site_config().is_err());
    }
}
