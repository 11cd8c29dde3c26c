//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the content root next to the JSON documents and is entirely optional:
//! stock defaults are serialized to a TOML table, the user file is merged on
//! top key by key, and the result is deserialized and validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! title = "EduMaroc"
//! languages = ["fr", "ar", "en"]   # Toggle order; first entry after the current one is "next"
//! default_language = "fr"
//!
//! [sources]
//! master = "database.json"
//! level_files = []                 # Empty = discover `<subject>-<level>.json` files
//! home = "home.json"
//! about = "about.json"
//! privacy = "privacy.json"
//!
//! [search]
//! min_query_length = 2
//!
//! [theme]
//! primary = "#1a73e8"
//! background = "#f8f9fa"
//! surface = "#ffffff"
//! text = "#202124"
//! text_muted = "#5f6368"
//! border = "#dadce0"
//!
//! [processing]
//! max_processes = 4                # Omit for auto = CPU cores
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity and languages.
    pub site: SiteSection,
    /// Names of the JSON documents in the content root.
    pub sources: SourcesConfig,
    /// Search policy.
    pub search: SearchConfig,
    /// Colors emitted as CSS custom properties.
    pub theme: ThemeConfig,
    /// Parallel fetch settings.
    pub processing: ProcessingConfig,
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site.languages.is_empty() {
            return Err(ConfigError::Validation(
                "site.languages must not be empty".into(),
            ));
        }
        if !self
            .site
            .languages
            .iter()
            .any(|l| l == &self.site.default_language)
        {
            return Err(ConfigError::Validation(format!(
                "site.default_language '{}' is not listed in site.languages",
                self.site.default_language
            )));
        }
        if self.site.languages.iter().any(|l| l.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "site.languages entries must not be blank".into(),
            ));
        }
        if self.search.min_query_length == 0 {
            return Err(ConfigError::Validation(
                "search.min_query_length must be at least 1".into(),
            ));
        }
        if self.sources.master.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sources.master must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Brand name shown in the header and page titles.
    pub title: String,
    /// Languages pages are generated in, in language-toggle order.
    pub languages: Vec<String>,
    /// Language the root `index.html` redirects to.
    pub default_language: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            title: "EduMaroc".to_string(),
            languages: vec!["fr".to_string(), "ar".to_string(), "en".to_string()],
            default_language: "fr".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Master subject index.
    pub master: String,
    /// Explicit level files. Empty means discover them in the content root.
    pub level_files: Vec<String>,
    pub home: String,
    pub about: String,
    pub privacy: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            master: "database.json".to_string(),
            level_files: Vec::new(),
            home: "home.json".to_string(),
            about: "about.json".to_string(),
            privacy: "privacy.json".to_string(),
        }
    }
}

impl SourcesConfig {
    /// The master and page document names, which are never level files.
    pub fn reserved(&self) -> [&str; 4] {
        [
            self.master.as_str(),
            self.home.as_str(),
            self.about.as_str(),
            self.privacy.as_str(),
        ]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Trimmed queries shorter than this (in characters) are not searched.
    pub min_query_length: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_length: 2,
        }
    }
}

/// Parallel processing settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel fetch workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

/// Site colors. A subject's `primaryColor` overrides `primary` on its pages.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeConfig {
    pub primary: String,
    pub background: String,
    /// Cards, header and accordions.
    pub surface: String,
    pub text: String,
    /// Breadcrumbs, footer, empty-state messages.
    pub text_muted: String,
    pub border: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: "#1a73e8".to_string(),
            background: "#f8f9fa".to_string(),
            surface: "#ffffff".to_string(),
            text: "#202124".to_string(),
            text_muted: "#5f6368".to_string(),
            border: "#dadce0".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// Base layer for merging the user's `config.toml` on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely, arrays included.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `config.toml`.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the content root.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    resolve_config(stock_defaults_value(), load_raw_config(root)?)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Simple Edu Configuration
# ========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file in the content root, next to database.json.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Brand name shown in the header and in page titles.
title = "EduMaroc"

# Languages to generate, in language-toggle order.
# Each page links to the same page in the next language of this list.
languages = ["fr", "ar", "en"]

# Language the root index.html redirects to. Must be listed above.
default_language = "fr"

# ---------------------------------------------------------------------------
# Source documents (relative to the content root)
# ---------------------------------------------------------------------------
[sources]
# Master subject index.
master = "database.json"

# Level documents, named <subjectId>-<levelTag>.json.
# Leave empty to use every such file in the content root.
level_files = []

# Per-language page documents.
home = "home.json"
about = "about.json"
privacy = "privacy.json"

# ---------------------------------------------------------------------------
# Search
# ---------------------------------------------------------------------------
[search]
# Queries shorter than this (after trimming) are ignored.
min_query_length = 2

# ---------------------------------------------------------------------------
# Theme colors
# ---------------------------------------------------------------------------
[theme]
primary = "#1a73e8"       # Overridden per subject by primaryColor
background = "#f8f9fa"
surface = "#ffffff"
text = "#202124"
text_muted = "#5f6368"    # Breadcrumbs, footer, empty states
border = "#dadce0"

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for fetching level documents.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}

/// Generate CSS custom properties from theme config.
pub fn generate_theme_css(theme: &ThemeConfig) -> String {
    format!(
        r#":root {{
    --color-primary: {primary};
    --color-bg: {background};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-border: {border};
}}"#,
        primary = theme.primary,
        background = theme.background,
        surface = theme.surface,
        text = theme.text,
        text_muted = theme.text_muted,
        border = theme.border,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_site() {
        let config = SiteConfig::default();
        assert_eq!(config.site.title, "EduMaroc");
        assert_eq!(config.site.languages, vec!["fr", "ar", "en"]);
        assert_eq!(config.site.default_language, "fr");
    }

    #[test]
    fn default_config_sources() {
        let config = SiteConfig::default();
        assert_eq!(config.sources.master, "database.json");
        assert!(config.sources.level_files.is_empty());
        assert_eq!(
            config.sources.reserved(),
            ["database.json", "home.json", "about.json", "privacy.json"]
        );
    }

    #[test]
    fn default_min_query_length() {
        assert_eq!(SiteConfig::default().search.min_query_length, 2);
    }

    #[test]
    fn parse_partial_config() {
        let toml = r##"
[site]
default_language = "ar"
"##;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.site.default_language, "ar");
        // Defaults preserved
        assert_eq!(config.site.title, "EduMaroc");
        assert_eq!(config.sources.master, "database.json");
        assert_eq!(config.theme.primary, "#1a73e8");
    }

    #[test]
    fn generate_theme_css_uses_config_colors() {
        let mut theme = ThemeConfig::default();
        theme.primary = "#ff5722".to_string();
        let css = generate_theme_css(&theme);
        assert!(css.contains("--color-primary: #ff5722"));
        assert!(css.contains("--color-bg: #f8f9fa"));
        assert!(css.contains("--color-text-muted: #5f6368"));
    }

    // =========================================================================
    // load_config tests
    // =========================================================================

    #[test]
    fn load_config_returns_default_when_no_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.languages, vec!["fr", "ar", "en"]);
    }

    #[test]
    fn load_config_reads_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            r##"
[sources]
level_files = ["math-1ac.json"]

[search]
min_query_length = 3
"##,
        )
        .unwrap();

        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.sources.level_files, vec!["math-1ac.json"]);
        assert_eq!(config.search.min_query_length, 3);
        assert_eq!(config.sources.master, "database.json");
    }

    #[test]
    fn load_config_invalid_toml_is_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("config.toml"), "[site\ntitle = ").unwrap();
        assert!(matches!(
            load_config(tmp.path()),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn unknown_key_rejected() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("config.toml"),
            "[site]\ntitel = \"typo\"\n",
        )
        .unwrap();
        assert!(load_config(tmp.path()).is_err());
    }

    #[test]
    fn unknown_section_rejected() {
        let result: Result<SiteConfig, _> = toml::from_str("[colors]\nlight = 1\n");
        assert!(result.is_err());
    }

    // =========================================================================
    // Processing
    // =========================================================================

    #[test]
    fn effective_threads_auto() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        assert_eq!(effective_threads(&ProcessingConfig::default()), cores);
    }

    #[test]
    fn effective_threads_user_constrains_down() {
        let config = ProcessingConfig {
            max_processes: Some(1),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    #[test]
    fn effective_threads_clamped_to_cores() {
        let cores = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        let config = ProcessingConfig {
            max_processes: Some(cores + 64),
        };
        assert_eq!(effective_threads(&config), cores);
    }

    #[test]
    fn effective_threads_zero_means_one() {
        let config = ProcessingConfig {
            max_processes: Some(0),
        };
        assert_eq!(effective_threads(&config), 1);
    }

    // =========================================================================
    // merge_toml
    // =========================================================================

    #[test]
    fn merge_toml_scalar_override() {
        let base: toml::Value = toml::from_str("a = 1\nb = 2").unwrap();
        let overlay: toml::Value = toml::from_str("b = 3").unwrap();
        let merged = merge_toml(base, overlay);
        assert_eq!(merged["a"].as_integer(), Some(1));
        assert_eq!(merged["b"].as_integer(), Some(3));
    }

    #[test]
    fn merge_toml_arrays_replace() {
        let base = stock_defaults_value();
        let overlay: toml::Value = toml::from_str("[site]\nlanguages = [\"ar\"]").unwrap();
        let merged = merge_toml(base, overlay);
        let langs = merged["site"]["languages"].as_array().unwrap();
        assert_eq!(langs.len(), 1);
        // Sibling keys survive
        assert_eq!(merged["site"]["title"].as_str(), Some("EduMaroc"));
    }

    // =========================================================================
    // Validation
    // =========================================================================

    #[test]
    fn validate_default_config_passes() {
        assert!(SiteConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_empty_languages() {
        let mut config = SiteConfig::default();
        config.site.languages.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_default_language_must_be_listed() {
        let mut config = SiteConfig::default();
        config.site.default_language = "es".to_string();
        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("'es'"));
    }

    #[test]
    fn validate_min_query_length_zero() {
        let mut config = SiteConfig::default();
        config.search.min_query_length = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn resolve_config_rejects_invalid_values() {
        let overlay: toml::Value = toml::from_str("[site]\nlanguages = []").unwrap();
        assert!(matches!(
            resolve_config(stock_defaults_value(), Some(overlay)),
            Err(ConfigError::Validation(_))
        ));
    }

    // =========================================================================
    // Stock config
    // =========================================================================

    #[test]
    fn stock_config_toml_roundtrips_to_defaults() {
        let parsed: SiteConfig = toml::from_str(stock_config_toml()).unwrap();
        let defaults = SiteConfig::default();
        assert_eq!(parsed.site.languages, defaults.site.languages);
        assert_eq!(parsed.sources.master, defaults.sources.master);
        assert_eq!(parsed.search.min_query_length, defaults.search.min_query_length);
        assert_eq!(parsed.theme.primary, defaults.theme.primary);
        assert_eq!(parsed.processing.max_processes, None);
    }

    #[test]
    fn stock_defaults_value_has_all_sections() {
        let value = stock_defaults_value();
        for section in ["site", "sources", "search", "theme", "processing"] {
            assert!(value.get(section).is_some(), "missing section {section}");
        }
    }
}
