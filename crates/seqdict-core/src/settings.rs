//! Matcher tuning read from TOML.
//!
//! The search budget, the cost ceiling and the cover options live in
//! `default_settings.toml`, which is compiled into the crate. A caller may
//! swap in its own file once, before the first query reads [`settings()`];
//! after that the values are fixed for the life of the process.

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

static OVERRIDE_TOML: OnceLock<String> = OnceLock::new();

/// Install a replacement TOML. Fails if it does not validate or if
/// settings were already installed.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    OVERRIDE_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Process-wide settings, parsed on first use.
pub fn settings() -> &'static Settings {
    static ACTIVE: OnceLock<Settings> = OnceLock::new();
    ACTIVE.get_or_init(|| {
        let source = OVERRIDE_TOML.get().map_or(DEFAULT_SETTINGS_TOML, String::as_str);
        // Overrides are validated by `init_custom`, the default by build.rs.
        parse_settings_toml(source).expect("validated settings TOML")
    })
}

/// The TOML compiled into the crate, as `seqtool settings-export` prints it.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("malformed settings TOML: {0}")]
    Parse(String),
    #[error("{field} {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings were already installed")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub search: SearchSettings,
    pub cover: CoverSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchSettings {
    pub max_expansions: usize,
    #[serde(default)]
    pub max_cost: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CoverSettings {
    pub combine_matches: bool,
    pub keep_all_alternatives: bool,
    pub oversample: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(search.max_expansions);
    check_positive_usize!(cover.oversample);

    Ok(())
}
