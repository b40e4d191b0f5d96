use std::{collections::HashMap, fs, path::PathBuf};

use config::{Config, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::tag::{RangeRule, TagConfig};

/// One range rule entry as written in the tag configuration file. Rules are
/// a list rather than a map so keys keep their exact case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeRuleEntry {
    /// The key the rule applies to: a tag name, or a dotted flattened key
    /// for one sub-field of a composite tag.
    pub key: String,

    /// Lower bound; values strictly below it are out of range.
    #[serde(default)]
    pub min: Option<f64>,

    /// Upper bound; values strictly above it are out of range.
    #[serde(default)]
    pub max: Option<f64>,
}

/// Container for tag configurations loaded from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagConfigFile {
    /// The monitored tags.
    pub tags: Vec<TagConfig>,

    /// Range rules for tags or flattened sub-field keys.
    #[serde(default)]
    pub rules: Vec<RangeRuleEntry>,
}

/// Validated tag settings ready for the engine.
#[derive(Debug, Clone)]
pub struct TagSettings {
    /// The monitored tags, in file order.
    pub tags: Vec<TagConfig>,

    /// Range rules keyed by tag name or flattened sub-field key.
    pub rules: HashMap<String, RangeRule>,
}

impl TagSettings {
    /// Names of all monitored tags, in file order.
    pub fn tag_names(&self) -> Vec<String> {
        self.tags.iter().map(|tag| tag.name.clone()).collect()
    }

    /// Names of tags marked critical.
    pub fn critical_tags(&self) -> std::collections::HashSet<String> {
        self.tags.iter().filter(|tag| tag.critical).map(|tag| tag.name.clone()).collect()
    }
}

/// Loads tag configurations from a file.
pub struct TagLoader {
    path: PathBuf,
}

/// Errors that can occur while loading tag configurations.
#[derive(Debug, Error)]
pub enum TagLoaderError {
    /// Error when reading the tag configuration file.
    #[error("Failed to load tag configuration: {0}")]
    IoError(std::io::Error),

    /// Error when parsing the tag configuration file.
    #[error("Failed to parse tag configuration: {0}")]
    ParseError(String),

    /// Error when the tag configuration format is unsupported.
    #[error("Unsupported tag configuration format")]
    UnsupportedFormat,

    /// The file configures no tags at all.
    #[error("Tag configuration must list at least one tag")]
    NoTags,

    /// A tag name appears more than once.
    #[error("Duplicate tag name: {0}")]
    DuplicateTag(String),

    /// A rule key appears more than once.
    #[error("Duplicate rule key: {0}")]
    DuplicateRule(String),

    /// A rule's bounds are inverted.
    #[error("Rule '{key}' has min {min} greater than max {max}")]
    InvalidBounds {
        /// The offending rule key.
        key: String,
        /// The configured lower bound.
        min: f64,
        /// The configured upper bound.
        max: f64,
    },

    /// A rule references a tag that is not configured.
    #[error("Rule '{key}' references unconfigured tag '{tag}'")]
    UnknownRuleTag {
        /// The offending rule key.
        key: String,
        /// The tag name the key resolves to.
        tag: String,
    },
}

impl TagLoader {
    /// Creates a new `TagLoader` instance.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads and validates the tag configuration from the specified file.
    pub fn load(&self) -> Result<TagSettings, TagLoaderError> {
        if !self.is_yaml_file() {
            return Err(TagLoaderError::UnsupportedFormat);
        }

        let config_str = fs::read_to_string(&self.path).map_err(TagLoaderError::IoError)?;
        let config: TagConfigFile = Config::builder()
            .add_source(File::from_str(&config_str, config::FileFormat::Yaml))
            .build()
            .map_err(|e| TagLoaderError::ParseError(e.to_string()))?
            .try_deserialize()
            .map_err(|e| TagLoaderError::ParseError(e.to_string()))?;

        Self::validate(config)
    }

    fn validate(config: TagConfigFile) -> Result<TagSettings, TagLoaderError> {
        if config.tags.is_empty() {
            return Err(TagLoaderError::NoTags);
        }

        let mut names = std::collections::HashSet::new();
        for tag in &config.tags {
            if !names.insert(tag.name.clone()) {
                return Err(TagLoaderError::DuplicateTag(tag.name.clone()));
            }
        }

        let mut rules = HashMap::new();
        for entry in config.rules {
            if let (Some(min), Some(max)) = (entry.min, entry.max) {
                if min > max {
                    return Err(TagLoaderError::InvalidBounds { key: entry.key, min, max });
                }
            }

            // The rule's root segment must name a configured tag, or a range
            // check could never run against it.
            let root = entry.key.split('.').next().unwrap_or(entry.key.as_str()).to_string();
            if !names.contains(&root) {
                return Err(TagLoaderError::UnknownRuleTag { key: entry.key, tag: root });
            }

            let rule = RangeRule { min: entry.min, max: entry.max };
            if rules.insert(entry.key.clone(), rule).is_some() {
                return Err(TagLoaderError::DuplicateRule(entry.key));
            }
        }

        Ok(TagSettings { tags: config.tags, rules })
    }

    /// Checks if the file has a YAML extension.
    fn is_yaml_file(&self) -> bool {
        matches!(self.path.extension().and_then(|ext| ext.to_str()), Some("yaml") | Some("yml"))
    }
}
