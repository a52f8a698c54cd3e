//! Configuration management with YAML support

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub notes: NotesConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default = "default_database_path")]
    pub path: String,
}

/// Notes file configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotesConfig {
    /// Filename looked up in each directory
    #[serde(default = "default_notes_filename")]
    pub filename: String,
}

/// Session / change-detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Seconds before a session's display records expire
    #[serde(default = "default_session_timeout")]
    pub timeout: i64,
}

// Default value functions
fn default_database_path() -> String {
    "~/.local/share/noted/noted.db".to_string()
}

fn default_notes_filename() -> String {
    ".notes".to_string()
}

fn default_session_timeout() -> i64 {
    // A working day; a terminal left overnight counts as a new session
    8 * 60 * 60
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            filename: default_notes_filename(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: default_session_timeout(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: DatabaseConfig::default(),
            notes: NotesConfig::default(),
            session: SessionConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    /// Searches in order:
    /// 1. Provided path
    /// 2. ./noted.yaml (current directory)
    /// 3. ~/.config/noted/noted.yaml
    pub fn load(path: &str) -> Result<Self> {
        let search_paths = vec![
            shellexpand::tilde(path).to_string(),
            "noted.yaml".to_string(),
            shellexpand::tilde("~/.config/noted/noted.yaml").to_string(),
        ];

        for search_path in &search_paths {
            if std::path::Path::new(search_path).exists() {
                let content = std::fs::read_to_string(search_path)?;
                let config: Config = serde_yaml::from_str(&content)?;
                return Ok(config);
            }
        }

        // No config file found, use defaults
        Ok(Config::default())
    }

    /// Get the database path, expanding ~ to home directory
    pub fn database_path(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.database.path).to_string();
        PathBuf::from(expanded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.notes.filename, ".notes");
        assert_eq!(config.session.timeout, 28800);
    }

    #[test]
    fn test_yaml_parsing() {
        let yaml = r#"
database:
  path: ~/.local/share/noted/test.db

notes:
  filename: .dnotes

session:
  timeout: 3600
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.database.path, "~/.local/share/noted/test.db");
        assert_eq!(config.notes.filename, ".dnotes");
        assert_eq!(config.session.timeout, 3600);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "session:\n  timeout: 60\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.session.timeout, 60);
        assert_eq!(config.notes.filename, ".notes");
    }
}
