use autoblock_engine::{
    AutoReplace, BlockProperties, ConfigurationError, KeyCodes, Options, PluginStack,
    compile_pattern, presets,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Rule {index} sets more than one of `trigger`, `trigger_pattern` and `shorthand`")]
    ConflictingTrigger { index: usize },

    #[error("Rule {index} sets `before` alongside `shorthand`, which supplies its own")]
    ConflictingBefore { index: usize },

    #[error("Rule {index} is invalid: {source}")]
    InvalidRule {
        index: usize,
        source: ConfigurationError,
    },

    #[error("Built-in rules are invalid: {0}")]
    Presets(ConfigurationError),
}

/// A rule file: an optional key table and the rules, in order.
///
/// ```toml
/// [keys]
/// enter = 13
/// space = 32
///
/// [[rule]]
/// shorthand = "> "
/// properties = { type = "quote" }
///
/// [[rule]]
/// trigger = "enter"
/// before = "^(-{3})$"
/// only_in = ["paragraph"]
/// properties = { type = "hr", is_void = true }
/// ```
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<KeyCodes>,
    #[serde(default, rename = "rule")]
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RuleConfig {
    /// Key name or literal text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
    /// Regex tested against the typed text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_pattern: Option<String>,
    /// Compact form: literal prefix plus a final trigger character.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shorthand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<BlockProperties>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub only_in: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_in: Option<Vec<String>>,
}

impl RuleConfig {
    /// Build the plugin for this rule. `index` is only used in errors.
    pub fn build<C: 'static>(
        &self,
        index: usize,
        keys: &KeyCodes,
    ) -> Result<AutoReplace<C>, ConfigError> {
        let invalid = |source: ConfigurationError| ConfigError::InvalidRule { index, source };

        let mut options = Options::new().key_codes(keys.clone());
        if let Some(before) = &self.before {
            options = options.before(compile_pattern(before).map_err(invalid)?);
        }
        if let Some(after) = &self.after {
            options = options.after(compile_pattern(after).map_err(invalid)?);
        }
        if let Some(properties) = &self.properties {
            options = options.properties(properties.clone());
        }
        options.only_in = self.only_in.clone();
        options.ignore_in = self.ignore_in.clone();

        match (&self.trigger, &self.trigger_pattern, &self.shorthand) {
            (_, None, None) => {
                if let Some(trigger) = &self.trigger {
                    options = options.trigger(trigger.as_str());
                }
                AutoReplace::new(options).map_err(invalid)
            }
            (None, Some(pattern), None) => {
                options = options.trigger(compile_pattern(pattern).map_err(invalid)?);
                AutoReplace::new(options).map_err(invalid)
            }
            (None, None, Some(_)) if self.before.is_some() => {
                Err(ConfigError::ConflictingBefore { index })
            }
            (None, None, Some(shorthand)) => {
                let properties = options
                    .properties
                    .take()
                    .ok_or(ConfigurationError::MissingProperties)
                    .map_err(invalid)?;
                AutoReplace::shorthand(shorthand.as_str(), properties, options).map_err(invalid)
            }
            _ => Err(ConfigError::ConflictingTrigger { index }),
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/autoblock");
        PathBuf::from(config_dir.as_ref()).join("rules.toml")
    }

    /// The key table rules are normalized against.
    pub fn key_codes(&self) -> KeyCodes {
        self.keys.clone().unwrap_or_default()
    }

    /// Build every rule, stopping at the first invalid one.
    pub fn build_stack<C: 'static>(&self) -> Result<PluginStack<C>, ConfigError> {
        let keys = self.key_codes();
        self.rules
            .iter()
            .enumerate()
            .map(|(index, rule)| rule.build(index, &keys))
            .collect::<Result<Vec<_>, _>>()
            .map(PluginStack::new)
    }
}

/// Rules from the default config file, or the markdown shortcuts when there
/// is no file.
pub fn load_stack<C: 'static>() -> Result<PluginStack<C>, ConfigError> {
    match Config::load()? {
        Some(config) => config.build_stack(),
        None => presets::markdown_shortcuts().map_err(ConfigError::Presets),
    }
}
