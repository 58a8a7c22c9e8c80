use serde::Deserialize;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Html,
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "html" => Ok(OutputFormat::Html),
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}'", other)),
        }
    }
}

/// How a comparison is laid out. Every key in the file is optional.
///
/// ```toml
/// old_title = "Original T-SQL"
/// new_title = "Snowflake SQL"
/// width = 60
/// format = "text"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub old_title: String,
    pub new_title: String,
    pub width: usize,
    pub format: OutputFormat,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            old_title: "Original T-SQL".to_string(),
            new_title: "Snowflake SQL".to_string(),
            width: 60,
            format: OutputFormat::default(),
        }
    }
}

impl ViewConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(ViewConfig::parse("").unwrap(), ViewConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let config = ViewConfig::parse("width = 40\nformat = \"json\"\n").unwrap();
        assert_eq!(config.width, 40);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.old_title, "Original T-SQL");
    }

    #[test]
    fn test_bad_value() {
        let result = ViewConfig::parse("format = \"pdf\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = ViewConfig::load(Path::new("/nonexistent/querydiff.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert!("pdf".parse::<OutputFormat>().is_err());
    }
}
