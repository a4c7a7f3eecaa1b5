//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every section has defaults so an empty file is a valid
//! configuration.

pub mod directory;
pub mod hooks;
pub mod logging;
pub mod mail;
pub mod settings;

use serde::{Deserialize, Serialize};

use self::directory::DirectoryConfig;
use self::hooks::HooksConfig;
use self::logging::LoggingConfig;
use self::mail::MailConfig;
use self::settings::SettingsTable;

use crate::error::AppError;
use crate::result::AppResult;

/// Environment variable prefix for configuration overrides.
pub const ENV_PREFIX: &str = "PUSHGATE";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Hook chain and script runtime settings.
    pub hooks: HooksConfig,
    /// Outbound mail settings.
    pub mail: MailConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Free-form server settings exposed to scripts through the facade.
    pub settings: SettingsTable,
    /// Repositories and teams served by the configuration-backed facade.
    pub directory: DirectoryConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, the environment overlay `config/<env>`, the
    /// explicitly requested file, and environment variables prefixed with
    /// `PUSHGATE__`. Later sources win.
    pub fn load(config_path: &str, env: &str) -> AppResult<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false))
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let loaded: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        tracing::debug!(
            path = %config_path,
            env = %env,
            pre_receive = loaded.hooks.pre_receive_scripts.len(),
            post_receive = loaded.hooks.post_receive_scripts.len(),
            "Configuration loaded"
        );

        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.hooks.script_directory, "./scripts");
        assert_eq!(config.hooks.script_extensions, vec!["groovy".to_string()]);
        assert!(config.mail.enabled);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_reads_explicit_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("pushgate.toml");
        let mut file = std::fs::File::create(&path).expect("create");
        writeln!(
            file,
            r#"
[hooks]
script_directory = "/srv/hooks"
pre_receive_scripts = ["protect-master", "sendmail"]

[settings]
extra_recipients = ["alpha@aaa.com", "beta@bee.com"]

[[directory.repositories]]
name = "helloworld.git"
mailing_lists = ["list@helloworld.git"]
teams = ["testteam"]
"#
        )
        .expect("write");

        let config = AppConfig::load(path.to_str().expect("utf8 path"), "test").expect("load");
        assert_eq!(config.hooks.script_directory, "/srv/hooks");
        assert_eq!(
            config.hooks.pre_receive_scripts,
            vec!["protect-master".to_string(), "sendmail".to_string()]
        );
        assert_eq!(config.directory.repositories.len(), 1);
        assert_eq!(config.directory.repositories[0].teams, vec!["testteam"]);
        assert_eq!(config.settings.strings("extra_recipients").len(), 2);
    }
}
