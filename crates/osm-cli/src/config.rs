//! Run configuration loaded from an optional TOML file.
//!
//! ```toml
//! validate = true
//!
//! [output]
//! nodes = "nodes.csv"
//! ways_tags = "ways_tags.csv"
//!
//! [transform]
//! default_tag_type = "regular"
//! ```
//!
//! Missing keys fall back to their defaults. Command-line flags override the
//! file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use osm_output::TableFileNames;
use osm_transform::TransformOptions;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CleanConfig {
    /// Validate each record against the table schemas.
    pub validate: bool,
    pub output: TableFileNames,
    pub transform: TransformOptions,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            validate: true,
            output: TableFileNames::default(),
            transform: TransformOptions::default(),
        }
    }
}

impl CleanConfig {
    /// Reads a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let config = Self::parse(&content)
            .with_context(|| format!("parse config {}", path.display()))?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = CleanConfig::parse("").expect("parse");
        assert_eq!(config, CleanConfig::default());
        assert!(config.validate);
        assert_eq!(config.output.nodes, "nodes.csv");
        assert_eq!(config.transform.default_tag_type, "regular");
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let config = CleanConfig::parse(
            r#"
validate = false

[output]
nodes = "uws_nodes.csv"
"#,
        )
        .expect("parse");
        assert!(!config.validate);
        assert_eq!(config.output.nodes, "uws_nodes.csv");
        assert_eq!(config.output.ways, "ways.csv");
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(CleanConfig::parse("validation = true").is_err());
    }
}
