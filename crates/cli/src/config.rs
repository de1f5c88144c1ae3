//! Optional `terravalet.toml` settings.
//!
//! ```toml
//! [match]
//! fuzzy = false
//!
//! [script]
//! terraform = "terraform"
//! lock = false
//! ```

use std::path::Path;

use serde::Deserialize;
use terravalet_recon::MatchOptions;

use crate::exit_codes::EXIT_CONFIG;
use crate::CliError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    #[serde(rename = "match")]
    pub matching: MatchOptions,
    pub script: ScriptSettings,
}

/// How generated scripts invoke terraform.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScriptSettings {
    /// Command written at the start of every script line.
    pub terraform: String,
    /// When false, `state mv` runs with `-lock=false`. Only applies to
    /// `state mv`, which always targets an explicit local `-state` file.
    pub lock: bool,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            terraform: "terraform".to_string(),
            lock: false,
        }
    }
}

impl Settings {
    pub fn from_toml(input: &str) -> Result<Self, String> {
        let settings: Settings = toml::from_str(input).map_err(|e| e.to_string())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), String> {
        let terraform = &self.script.terraform;
        if terraform.trim().is_empty() {
            return Err("script.terraform must not be empty".into());
        }
        if terraform.contains(['\n', '\r', '\'']) {
            return Err(format!(
                "script.terraform must be a single command line without quotes, got {terraform:?}"
            ));
        }
        Ok(())
    }

    /// Load from `path`, or built-in defaults when no file was given.
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let Some(path) = path else {
            return Ok(Settings::default());
        };
        let text = std::fs::read_to_string(path).map_err(|e| CliError {
            code: EXIT_CONFIG,
            message: format!("cannot read config {}: {e}", path.display()),
            hint: None,
        })?;
        let settings = Settings::from_toml(&text).map_err(|e| CliError {
            code: EXIT_CONFIG,
            message: format!("invalid config {}: {e}", path.display()),
            hint: Some("see `terravalet --help` for the [match] and [script] keys".into()),
        })?;
        tracing::debug!(path = %path.display(), ?settings, "loaded config");
        Ok(settings)
    }
}
