//! Configuration management for HelpDeck.
//!
//! Parses `helpdeck.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! Path values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `content.source_dir`
//! - `content.output_dir`

mod expand;

use helpdeck_document::DEFAULT_INDENT_WIDTH;
use helpdeck_renderer::RenderMode;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override legacy content source directory.
    pub source_dir: Option<PathBuf>,
    /// Override converted document output directory.
    pub output_dir: Option<PathBuf>,
    /// Override list indent width.
    pub indent_width: Option<usize>,
    /// Override render mode.
    pub mode: Option<RenderMode>,
    /// Override HTML escaping.
    pub escape_html: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "helpdeck.toml";

/// Largest accepted `convert.indent_width`.
const MAX_INDENT_WIDTH: usize = 8;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content locations (paths are relative strings from TOML).
    content: ContentConfigRaw,
    /// Plain-text conversion settings.
    pub convert: ConvertConfig,
    /// Rendering settings.
    pub render: RenderConfig,

    /// Resolved content configuration (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw content configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved content configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ContentConfig {
    /// Directory holding legacy plain-text articles.
    pub source_dir: PathBuf,
    /// Directory converted documents are written to.
    pub output_dir: PathBuf,
}

/// Plain-text conversion configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConvertConfig {
    /// Leading whitespace characters per list nesting level.
    pub indent_width: usize,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

/// Rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output produced when no mode is requested explicitly.
    pub mode: RenderMode,
    /// Escape inline text in HTML output.
    pub escape_html: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::Html,
            escape_html: true,
        }
    }
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
        /// Config field path (e.g., "`content.source_dir`").
        field: String,
        /// Error message (e.g., "${`CONTENT_DIR`} not set").
        message: String,
    },
}

/// Require an optional string field to be non-empty when present.
fn require_non_empty(value: Option<&str>, field: &str) -> Result<(), ConfigError> {
    if value.is_some_and(str::is_empty) {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `helpdeck.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
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
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.content_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.content_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(indent_width) = settings.indent_width {
            self.convert.indent_width = indent_width;
        }
        if let Some(mode) = settings.mode {
            self.render.mode = mode;
        }
        if let Some(escape_html) = settings.escape_html {
            self.render.escape_html = escape_html;
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
            content: ContentConfigRaw::default(),
            convert: ConvertConfig::default(),
            render: RenderConfig::default(),
            content_resolved: ContentConfig {
                source_dir: base.join("content"),
                output_dir: base.join(".helpdeck/documents"),
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
        config.validate()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(self.content.source_dir.as_deref(), "content.source_dir")?;
        require_non_empty(self.content.output_dir.as_deref(), "content.output_dir")?;
        self.validate_convert()?;
        Ok(())
    }

    /// Validate conversion configuration.
    fn validate_convert(&self) -> Result<(), ConfigError> {
        let width = self.convert.indent_width;
        if width == 0 {
            return Err(ConfigError::Validation(
                "convert.indent_width must be greater than 0".to_owned(),
            ));
        }
        if width > MAX_INDENT_WIDTH {
            return Err(ConfigError::Validation(format!(
                "convert.indent_width cannot exceed {MAX_INDENT_WIDTH}"
            )));
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref dir) = self.content.source_dir {
            self.content.source_dir = Some(expand::expand_env(dir, "content.source_dir")?);
        }
        if let Some(ref dir) = self.content.output_dir {
            self.content.output_dir = Some(expand::expand_env(dir, "content.output_dir")?);
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.content_resolved = ContentConfig {
            source_dir: resolve(self.content.source_dir.as_deref(), "content"),
            output_dir: resolve(self.content.output_dir.as_deref(), ".helpdeck/documents"),
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
        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/test/content")
        );
        assert_eq!(
            config.content_resolved.output_dir,
            PathBuf::from("/test/.helpdeck/documents")
        );
        assert_eq!(config.convert.indent_width, 2);
        assert_eq!(config.render.mode, RenderMode::Html);
        assert!(config.render.escape_html);
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.convert.indent_width, 2);
        assert_eq!(config.render.mode, RenderMode::Html);
    }

    #[test]
    fn test_parse_render_config() {
        let toml = r#"
[render]
mode = "preview"
escape_html = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.render.mode, RenderMode::Preview);
        assert!(!config.render.escape_html);
    }

    #[test]
    fn test_parse_unknown_render_mode_fails() {
        let toml = r#"
[render]
mode = "pdf"
"#;
        let result: Result<Config, _> = toml::from_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[content]
source_dir = "legacy/articles"
output_dir = "out"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/project/legacy/articles")
        );
        assert_eq!(
            config.content_resolved.output_dir,
            PathBuf::from("/project/out")
        );
    }

    #[test]
    fn test_apply_cli_settings_mode() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            mode: Some(RenderMode::Preview),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.render.mode, RenderMode::Preview);
        assert!(config.render.escape_html); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/in")),
            output_dir: Some(PathBuf::from("/custom/out")),
            indent_width: Some(4),
            mode: None,
            escape_html: Some(false),
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/custom/in")
        );
        assert_eq!(
            config.content_resolved.output_dir,
            PathBuf::from("/custom/out")
        );
        assert_eq!(config.convert.indent_width, 4);
        assert!(!config.render.escape_html);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.content_resolved.source_dir,
            PathBuf::from("/test/content")
        );
        assert_eq!(config.convert.indent_width, 2);
    }

    #[test]
    fn test_expand_env_vars_source_dir() {
        // SAFETY: test-only, unique variable name
        unsafe {
            std::env::set_var("HELPDECK_TEST_SOURCE_DIR", "/srv/articles");
        }
        let toml = r#"
[content]
source_dir = "${HELPDECK_TEST_SOURCE_DIR}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.content.source_dir.as_deref(), Some("/srv/articles"));
        // SAFETY: test-only cleanup
        unsafe {
            std::env::remove_var("HELPDECK_TEST_SOURCE_DIR");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        let toml = r#"
[content]
output_dir = "${MISSING_VAR_HELPDECK_CONFIG_TEST}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("MISSING_VAR_HELPDECK_CONFIG_TEST"));
        assert!(err.to_string().contains("content.output_dir"));
    }

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
    fn test_validate_indent_width_zero() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.convert.indent_width = 0;
        assert_validation_error(&config, &["convert.indent_width", "greater than 0"]);
    }

    #[test]
    fn test_validate_indent_width_too_large() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.convert.indent_width = 12;
        assert_validation_error(&config, &["convert.indent_width", "8"]);
    }

    #[test]
    fn test_validate_empty_source_dir() {
        let toml = r#"
[content]
source_dir = ""
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_validation_error(&config, &["content.source_dir", "cannot be empty"]);
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let result = Config::load(Some(Path::new("/nonexistent/helpdeck.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[content]
source_dir = "legacy"

[convert]
indent_width = 4
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.content_resolved.source_dir, dir.path().join("legacy"));
        assert_eq!(
            config.content_resolved.output_dir,
            dir.path().join(".helpdeck/documents")
        );
        assert_eq!(config.convert.indent_width, 4);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[convert]\nindent_width = 0\n").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_rejects_invalid_cli_override() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "").unwrap();
        let overrides = CliSettings {
            indent_width: Some(0),
            ..Default::default()
        };

        let result = Config::load(Some(&path), Some(&overrides));
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[render\nmode = ").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
