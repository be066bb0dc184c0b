//! Option normalization
//!
//! The host hands the plugin a JSON-shaped option value that may be absent,
//! a bare bool (toggles the plugin), a bare string (names the exact CSS
//! file), or a full option object. All shapes are normalized here, once,
//! into a canonical [`PluginConfig`]; anything unrecognized is a
//! [`ConfigError`] before any build hook runs.

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use arachne_compilation::AttrValue;
use arachne_locator::LocatorConfig;
use arachne_splice::{AnchorPosition, StyleTagSpec};
use arachne_transform::{MinifyConfig, MinifyOptions};

use crate::error::ConfigError;

/// Recognized option shapes before normalization
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawOptions {
    /// Bare bool: toggles the plugin
    Enabled(bool),

    /// Bare string: the exact CSS filename to inline
    File(String),

    /// Full option object
    Object(RawObjectOptions),
}

impl Default for RawOptions {
    fn default() -> Self {
        Self::Object(RawObjectOptions::default())
    }
}

/// The full option object as the host supplies it
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawObjectOptions {
    pub enabled: Option<bool>,
    pub file: Option<String>,
    pub css_pattern: Option<String>,
    pub chunks: Option<Vec<String>>,
    pub position: Option<String>,
    pub minify: Option<RawMinify>,
    pub tag: Option<RawTag>,
}

/// `minify` accepts a bool or a configuration object
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawMinify {
    Enabled(bool),
    Config(MinifyConfig),
}

/// Output tag customization
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawTag {
    pub name: Option<String>,

    /// String values render as `key="value"`, `true` as a bare attribute,
    /// `false` drops the attribute
    pub attributes: serde_json::Map<String, Value>,
}

/// Where the inline style block is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Replace the matching link tag in the host's tag list
    #[default]
    Plugin,

    HeadTop,
    HeadBottom,
    BodyTop,
    BodyBottom,
}

impl Position {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value {
            "plugin" => Ok(Self::Plugin),
            "head-top" => Ok(Self::HeadTop),
            "head-bottom" => Ok(Self::HeadBottom),
            "body-top" => Ok(Self::BodyTop),
            "body-bottom" => Ok(Self::BodyBottom),
            other => Err(ConfigError::InvalidPosition(other.to_string())),
        }
    }

    /// The anchor this position inserts at; `None` for replace-tag mode
    pub fn anchor_position(&self) -> Option<AnchorPosition> {
        match self {
            Self::Plugin => None,
            Self::HeadTop => Some(AnchorPosition::HeadTop),
            Self::HeadBottom => Some(AnchorPosition::HeadBottom),
            Self::BodyTop => Some(AnchorPosition::BodyTop),
            Self::BodyBottom => Some(AnchorPosition::BodyBottom),
        }
    }
}

/// Canonical per-instance configuration, immutable once normalized
#[derive(Debug, Clone)]
pub struct PluginConfig {
    pub enabled: bool,
    pub position: Position,
    pub locator: LocatorConfig,
    pub minify: MinifyOptions,
    pub tag: StyleTagSpec,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            position: Position::default(),
            locator: LocatorConfig::default(),
            minify: MinifyOptions::default(),
            tag: StyleTagSpec::default(),
        }
    }
}

impl PluginConfig {
    /// Normalize a raw host option value
    pub fn from_value(options: Value) -> Result<Self, ConfigError> {
        if options.is_null() {
            return Ok(Self::default());
        }
        let raw: RawOptions =
            serde_json::from_value(options).map_err(|_| ConfigError::InvalidShape)?;
        Self::from_raw(raw)
    }

    /// Normalize an already-shaped option value
    pub fn from_raw(raw: RawOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        match raw {
            RawOptions::Enabled(enabled) => {
                config.enabled = enabled;
            }
            RawOptions::File(filename) => {
                config.locator.filename = Some(filename);
            }
            RawOptions::Object(options) => {
                if let Some(enabled) = options.enabled {
                    config.enabled = enabled;
                }
                if let Some(position) = &options.position {
                    config.position = Position::parse(position)?;
                }
                config.locator.filename = options.file;
                config.locator.chunks = options.chunks;
                if let Some(pattern) = options.css_pattern {
                    config.locator.pattern =
                        Regex::new(&pattern).map_err(|source| ConfigError::InvalidPattern {
                            pattern,
                            source,
                        })?;
                }
                config.minify = match options.minify {
                    None | Some(RawMinify::Enabled(false)) => MinifyOptions::Disabled,
                    Some(RawMinify::Enabled(true)) => {
                        MinifyOptions::Enabled(MinifyConfig::default())
                    }
                    Some(RawMinify::Config(minify)) => MinifyOptions::Enabled(minify),
                };
                if let Some(tag) = options.tag {
                    if let Some(name) = tag.name {
                        config.tag.tag_name = name;
                    }
                    config.tag.attributes = normalize_attributes(tag.attributes)?;
                }
            }
        }
        tracing::debug!("normalized options: {:?}", config);
        Ok(config)
    }
}

fn normalize_attributes(
    raw: serde_json::Map<String, Value>,
) -> Result<Vec<(String, AttrValue)>, ConfigError> {
    let mut attributes = Vec::with_capacity(raw.len());
    for (name, value) in raw {
        match value {
            Value::String(text) => attributes.push((name, AttrValue::Text(text))),
            Value::Bool(true) => attributes.push((name, AttrValue::Bare)),
            Value::Bool(false) | Value::Null => {}
            Value::Number(number) => attributes.push((name, AttrValue::Text(number.to_string()))),
            _ => return Err(ConfigError::InvalidAttribute(name)),
        }
    }
    Ok(attributes)
}
