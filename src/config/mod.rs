use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub mod form;
pub mod validator;

pub use form::{FillInTheBlanks, FormConfig, FormFormat};

use crate::cli::Cli;

/// Runtime settings of the `blanks` binary
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Settings {
    pub form: FormSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FormSettings {
    /// Form definition file (.json, .yaml, .yml or .toml)
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingSettings {
    /// One of trace, debug, info, warn, error
    pub level: String,
    /// Colored log output
    #[serde(default = "default_ansi")]
    pub ansi: bool,
}

fn default_ansi() -> bool {
    true
}

impl LoggingSettings {
    pub fn max_level(&self) -> Result<tracing::Level, anyhow::Error> {
        self.level
            .parse::<tracing::Level>()
            .map_err(|_| anyhow::anyhow!("Invalid log level '{}'", self.level))
    }
}

/// `BLANKS__SECTION__KEY` variables, e.g. `BLANKS__LOGGING__LEVEL=debug`
fn environment() -> Environment {
    Environment::with_prefix("BLANKS")
        .separator("__")
        .try_parsing(true)
}

impl Settings {
    pub fn new() -> Result<Self, anyhow::Error> {
        Self::from_path("blanks.toml")
    }

    /// Load settings from a file (optional), then `BLANKS__*` environment variables
    pub fn from_path(config_path: impl AsRef<Path>) -> Result<Self, anyhow::Error> {
        Self::build(config_path.as_ref())
    }

    /// Create settings from CLI arguments (includes config file and CLI overrides)
    pub fn new_with_cli(cli: &Cli) -> Result<Self, anyhow::Error> {
        let mut settings = Self::build(&cli.config)?;

        // CLI > env vars > config file
        settings.apply_cli_overrides(cli);
        settings.logging.max_level()?;

        Ok(settings)
    }

    fn build(config_path: &Path) -> Result<Self, anyhow::Error> {
        let root = config_path.parent().unwrap_or_else(|| Path::new("."));

        let s = Config::builder()
            .add_source(File::from(config_path.to_path_buf()).required(false))
            .add_source(environment())
            .set_default("form.path", "forms/widget_label.yaml")?
            .set_default("logging.level", "info")?
            .set_default("logging.ansi", true)?
            .build()?;

        let mut settings: Settings = s.try_deserialize()?;

        // Form paths from the settings file (or the default) are relative to
        // that file; env and CLI paths are relative to the working directory
        let from_env = Config::builder()
            .add_source(environment())
            .build()?
            .get::<String>("form.path")
            .is_ok();
        if settings.form.path.is_relative() && !from_env {
            settings.form.path = root.join(&settings.form.path);
        }

        settings.logging.max_level()?;

        Ok(settings)
    }

    /// Apply CLI argument overrides to settings
    fn apply_cli_overrides(&mut self, cli: &Cli) {
        if let Some(form) = &cli.form {
            self.form.path = form.clone();
        }
        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }
    }

    /// Load and validate the configured form definition
    pub fn load_form(&self) -> Result<FormConfig, anyhow::Error> {
        let form = FormConfig::from_path(&self.form.path)?;

        validator::ConfigValidator::validate(&form).map_err(|errors| {
            let error_messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
            anyhow::anyhow!(
                "Form validation failed for '{}':\n{}",
                self.form.path.display(),
                error_messages.join("\n")
            )
        })?;

        tracing::info!(
            "Loaded form '{}' with {} fields",
            self.form.path.display(),
            form.form_data.len()
        );
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_max_level() {
        let logging = LoggingSettings {
            level: "debug".to_string(),
            ansi: false,
        };
        assert_eq!(logging.max_level().unwrap(), tracing::Level::DEBUG);

        let logging = LoggingSettings {
            level: "loud".to_string(),
            ansi: false,
        };
        assert!(logging.max_level().is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::parse_from([
            "blanks",
            "--config",
            "missing-dir/blanks.toml",
            "--form",
            "other.json",
            "--log-level",
            "warn",
        ]);
        let settings = Settings::new_with_cli(&cli).unwrap();
        assert_eq!(settings.form.path, PathBuf::from("other.json"));
        assert_eq!(settings.logging.level, "warn");
    }

    #[test]
    fn test_defaults_resolve_against_config_dir() {
        let settings = Settings::from_path("missing-dir/blanks.toml").unwrap();
        assert_eq!(
            settings.form.path,
            PathBuf::from("missing-dir/forms/widget_label.yaml")
        );
        assert_eq!(settings.logging.level, "info");
        assert!(settings.logging.ansi);
    }
}
