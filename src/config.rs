//! Configuration management for the rax-dest sink
//!
//! Loads sink options from a TOML file with environment overrides and
//! converts them into [`DestOptions`].

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use std::path::PathBuf;

use crate::resolve::{BaseSpec, DestOptions, ExtDot};

/// Environment variable prefix, e.g. `RAX_DEST__OVERWRITE=false`
pub const ENV_PREFIX: &str = "RAX_DEST";

/// Highest permission value accepted for `mode` and `dir_mode`
const MAX_MODE: u32 = 0o7777;

fn default_true() -> bool {
    true
}

/// Complete sink configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SinkConfig {
    /// Directory whose contents are copied
    pub source: String,

    /// Destination directory (or final path when `expand` is set)
    pub dest: String,

    pub cwd: Option<String>,
    pub base: Option<String>,
    pub destbase: Option<String>,

    #[serde(default)]
    pub expand: bool,

    #[serde(default)]
    pub flatten: bool,

    /// Replacement extension; empty strips it
    pub ext: Option<String>,

    /// "first" or "last"
    pub ext_dot: Option<String>,

    pub mode: Option<u32>,
    pub dir_mode: Option<u32>,

    #[serde(default = "default_true")]
    pub overwrite: bool,

    /// Read source files into memory instead of streaming them
    #[serde(default = "default_true")]
    pub buffer: bool,
}

impl SinkConfig {
    /// Load configuration from `name` (extension optional) with environment overrides
    pub fn load(name: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(name))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;
        Self::from_settings(settings)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml: &str) -> Result<Self, config::ConfigError> {
        let settings = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?;
        Self::from_settings(settings)
    }

    fn from_settings(settings: Config) -> Result<Self, config::ConfigError> {
        let config: SinkConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validation for all configuration values
    fn validate(&self) -> Result<(), config::ConfigError> {
        if self.source.is_empty() {
            return Err(config::ConfigError::Message(
                "source cannot be empty".into(),
            ));
        }

        if self.dest.is_empty() {
            return Err(config::ConfigError::Message("dest cannot be empty".into()));
        }

        self.parsed_ext_dot()?;

        for (name, mode) in [("mode", self.mode), ("dir_mode", self.dir_mode)] {
            if mode.is_some_and(|m| m > MAX_MODE) {
                return Err(config::ConfigError::Message(format!(
                    "{name} must be at most 0o7777"
                )));
            }
        }

        Ok(())
    }

    fn parsed_ext_dot(&self) -> Result<Option<ExtDot>, config::ConfigError> {
        self.ext_dot
            .as_deref()
            .map(str::parse::<ExtDot>)
            .transpose()
            .map_err(config::ConfigError::Message)
    }

    /// Source directory as PathBuf
    pub fn source_path(&self) -> PathBuf {
        PathBuf::from(&self.source)
    }

    /// Sink options described by this configuration
    pub fn dest_options(&self) -> Result<DestOptions, config::ConfigError> {
        Ok(DestOptions {
            cwd: self.cwd.as_ref().map(PathBuf::from),
            base: self.base.as_ref().map(|b| BaseSpec::Literal(PathBuf::from(b))),
            destbase: self.destbase.as_ref().map(PathBuf::from),
            expand: Some(self.expand),
            flatten: Some(self.flatten),
            ext: self.ext.clone(),
            ext_dot: self.parsed_ext_dot()?,
            mode: self.mode,
            dir_mode: self.dir_mode,
            overwrite: Some(self.overwrite),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_defaults() {
        let config = SinkConfig::from_toml("source = \"src\"\ndest = \"dist\"\n").unwrap();
        assert!(config.overwrite);
        assert!(config.buffer);
        assert!(!config.flatten);

        let options = config.dest_options().unwrap();
        assert_eq!(options.overwrite, Some(true));
        assert_eq!(options.ext_dot, None);
        assert!(options.base.is_none());
    }

    #[test]
    fn test_full_config() {
        let toml = r#"
            source = "assets"
            dest = "public"
            cwd = "site"
            destbase = "build"
            flatten = true
            ext = "js"
            ext_dot = "last"
            mode = 420
            dir_mode = 493
            overwrite = false
            buffer = false
        "#;
        let config = SinkConfig::from_toml(toml).unwrap();
        let options = config.dest_options().unwrap();

        assert_eq!(options.cwd, Some(PathBuf::from("site")));
        assert_eq!(options.destbase, Some(PathBuf::from("build")));
        assert_eq!(options.ext_dot, Some(ExtDot::Last));
        assert_eq!(options.mode, Some(0o644));
        assert_eq!(options.dir_mode, Some(0o755));
        assert_eq!(options.overwrite, Some(false));
        assert!(!config.buffer);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(SinkConfig::from_toml("source = \"s\"\ndest = \"\"\n").is_err());
        assert!(SinkConfig::from_toml("source = \"s\"\ndest = \"d\"\next_dot = \"mid\"\n").is_err());
        assert!(SinkConfig::from_toml("source = \"s\"\ndest = \"d\"\nmode = 99999\n").is_err());
        assert!(SinkConfig::from_toml("dest = \"d\"\n").is_err());
    }
}
