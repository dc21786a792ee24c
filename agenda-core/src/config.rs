//! Agenda configuration.

use std::path::{Path, PathBuf};

use chrono::Locale;
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

use crate::error::{AgendaError, AgendaResult};
use crate::locale::{DEFAULT_LOCALE, parse_locale};

static DEFAULT_DATA_DIR: &str = "~/.local/share/agenda";
static DEFAULT_EXPORT_DIR: &str = ".";

fn default_data_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_DIR)
}

fn default_export_dir() -> PathBuf {
    PathBuf::from(DEFAULT_EXPORT_DIR)
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

/// Configuration at ~/.config/agenda/config.toml, overridable with
/// `AGENDA_*` environment variables (e.g. `AGENDA_DATA_DIR`).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AgendaConfig {
    /// Where the event records live
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Where PDF reports are written
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Locale for month and weekday names
    #[serde(default = "default_locale")]
    pub locale: String,

    /// People that can be tagged on events
    #[serde(default)]
    pub participants: Vec<String>,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            data_dir: default_data_dir(),
            export_dir: default_export_dir(),
            locale: default_locale(),
            participants: Vec::new(),
        }
    }
}

impl AgendaConfig {
    pub fn config_path() -> AgendaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgendaError::Config("Could not determine config directory".into()))?
            .join("agenda");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented-out config
    /// file on first run.
    pub fn load() -> AgendaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (missing file means defaults), then apply
    /// `AGENDA_*` environment overrides.
    pub fn load_from(path: &Path) -> AgendaResult<Self> {
        let config: AgendaConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(
                Environment::with_prefix("AGENDA")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("participants"),
            )
            .build()
            .map_err(|e| AgendaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AgendaError::Config(e.to_string()))?;

        config.locale()?;
        info!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AgendaResult<()> {
        let contents = format!(
            "\
# agenda configuration

# Where your events are stored:
# data_dir = \"{DEFAULT_DATA_DIR}\"

# Where exported PDF reports are written:
# export_dir = \"{DEFAULT_EXPORT_DIR}\"

# Locale for month and weekday names:
# locale = \"{DEFAULT_LOCALE}\"

# People you can tag on events:
# participants = [\"Ana\", \"Bruno\"]
"
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgendaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// `data_dir` with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        expand(&self.data_dir)
    }

    /// `export_dir` with `~` expanded.
    pub fn export_path(&self) -> PathBuf {
        expand(&self.export_dir)
    }

    pub fn locale(&self) -> AgendaResult<Locale> {
        parse_locale(&self.locale)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = AgendaConfig::load_from(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(config.locale, "pt_BR");
        assert_eq!(config.data_dir, PathBuf::from("~/.local/share/agenda"));
        assert!(config.participants.is_empty());
    }

    #[test]
    fn test_default_file_is_all_comments() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("agenda").join("config.toml");

        AgendaConfig::create_default_config(&path).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.lines().all(|l| l.is_empty() || l.starts_with('#')));

        let config = AgendaConfig::load_from(&path).unwrap();
        assert_eq!(config.export_dir, PathBuf::from("."));
    }

    #[test]
    fn test_reads_values_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/srv/agenda\"\nlocale = \"en_US\"\nparticipants = [\"Ana\", \"Bruno\"]\n",
        )
        .unwrap();

        let config = AgendaConfig::load_from(&path).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/srv/agenda"));
        assert_eq!(config.locale().unwrap(), Locale::en_US);
        assert_eq!(config.participants, ["Ana", "Bruno"]);
    }

    #[test]
    fn test_rejects_unknown_locale() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "locale = \"klingon\"\n").unwrap();

        assert!(matches!(
            AgendaConfig::load_from(&path),
            Err(AgendaError::Config(_))
        ));
    }

    #[test]
    fn test_tilde_expansion() {
        let config = AgendaConfig::default();
        if let Some(home) = dirs::home_dir() {
            assert!(config.data_path().starts_with(home));
        }
    }
}
