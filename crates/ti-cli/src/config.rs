//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Environment variables per config key. Later names win.
///
/// Values stay strings: `EDITOR=true` names the editor `true`, and
/// `TI_CURRENT_DAY=20250129` is rejected when parsed as a day, not here.
const ENV_OVERRIDES: [(&str, &[&str]); 4] = [
    ("sheet_file", &["TI_SHEET_FILE", "SHEET_FILE"]),
    ("datasource", &["TI_DATASOURCE"]),
    ("current_day", &["TI_CURRENT_DAY"]),
    ("editor", &["TI_EDITOR", "EDITOR"]),
];

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the JSON sheet holding the work log.
    pub sheet_file: PathBuf,

    /// Datasource type; only `json` is supported.
    pub datasource: String,

    /// `YYYY-MM-DD` used instead of today when interpreting times.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_day: Option<String>,

    /// Editor command for `ti edit`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sheet_file: default_sheet_path(),
            datasource: "json".to_string(),
            current_day: None,
            editor: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later layers win: defaults, `config.toml` in the config directory, the
    /// given file, `TI_*` variables, then `SHEET_FILE` and `EDITOR`.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        for (key, vars) in ENV_OVERRIDES {
            for var in vars {
                let Some(value) = std::env::var_os(var) else {
                    continue;
                };
                let value = value.to_string_lossy().into_owned();
                if !value.is_empty() {
                    figment = figment.merge(Serialized::default(key, value));
                }
            }
        }

        figment.extract()
    }

    /// Editor to launch: configured, then `$VISUAL`, then a platform default.
    pub fn editor_command(&self) -> String {
        self.editor
            .clone()
            .filter(|editor| !editor.trim().is_empty())
            .or_else(|| std::env::var("VISUAL").ok().filter(|v| !v.trim().is_empty()))
            .unwrap_or_else(|| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "vi".to_string()
                }
            })
    }
}

/// Returns the platform-specific config directory for ti.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ti"))
}

/// Returns the default sheet location, `~/.ti-sheet`.
pub fn default_sheet_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".ti-sheet")
}
