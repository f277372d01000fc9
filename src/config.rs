//! Settings used to construct a [`Gateway`] without hardcoding a token.
//!
//! Values are read from an optional TOML file in the user's config directory and then from
//! `TODOIST_*` environment variables, later sources overriding earlier ones:
//!
//! ```toml
//! token = "0123456789abcdef"
//! url = "https://api.todoist.com/"
//! ```
use std::path::{Path, PathBuf};

use config::{Environment, File, FileFormat};
use serde::Deserialize;
use url::Url;

use crate::api::auth::OAuth;
use crate::api::endpoints::{TODOIST_API_URL, TODOIST_OAUTH_URL};
use crate::api::rest::Gateway;
use crate::error::{Error, Result};

/// Prefix of the environment variables that are read, e.g. `TODOIST_TOKEN`.
pub const ENV_PREFIX: &str = "TODOIST";

const CONFIG_DIR: &str = "todoist-client";
const CONFIG_FILE: &str = "config.toml";

/// Client settings.
#[derive(Debug, Default, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// API token, see the integrations tab in the Todoist settings.
    pub token: Option<String>,
    /// Overrides the API base URL.
    pub url: Option<Url>,
    /// Overrides the OAuth base URL.
    pub oauth_url: Option<Url>,
}

impl Config {
    /// Location of the default config file, if the platform has a config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Loads the default config file and the `TODOIST_*` environment.
    pub fn load() -> Result<Config> {
        Config::from_sources(Config::default_path().as_deref(), ENV_PREFIX)
    }

    /// Loads `file` (which may not exist) and then environment variables with `env_prefix`.
    pub fn from_sources(file: Option<&Path>, env_prefix: &str) -> Result<Config> {
        Config::build(file, Environment::with_prefix(env_prefix))
    }

    fn build(file: Option<&Path>, env: Environment) -> Result<Config> {
        let mut builder = config::Config::builder();
        if let Some(file) = file {
            tracing::debug!(path = %file.display(), "reading config file");
            builder = builder.add_source(File::from(file).format(FileFormat::Toml).required(false));
        }
        let cfg: Config = builder.add_source(env).build()?.try_deserialize()?;
        Ok(cfg)
    }

    /// The configured token. Empty tokens count as missing.
    pub fn token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or(Error::MissingToken)
    }

    /// The API base URL, defaulting to [`struct@TODOIST_API_URL`].
    pub fn url(&self) -> &Url {
        self.url.as_ref().unwrap_or(&*TODOIST_API_URL)
    }

    /// The OAuth base URL, defaulting to [`struct@TODOIST_OAUTH_URL`].
    pub fn oauth_url(&self) -> &Url {
        self.oauth_url.as_ref().unwrap_or(&*TODOIST_OAUTH_URL)
    }

    /// Builds a gateway from the configured token and URL.
    pub fn gateway(&self) -> Result<Gateway> {
        Gateway::new(self.token()?, self.url())
    }

    /// Builds a blocking gateway from the configured token and URL.
    pub fn blocking_gateway(&self) -> Result<crate::api::blocking::Gateway> {
        crate::api::blocking::Gateway::new(self.token()?, self.url())
    }

    /// Builds an OAuth client from the configured URLs.
    pub fn oauth(&self) -> Result<OAuth> {
        OAuth::new(self.oauth_url(), self.url())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn env(vars: &[(&str, &str)]) -> Environment {
        let mut map = config::Map::new();
        for (key, value) in vars {
            map.insert(key.to_string(), value.to_string());
        }
        Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn write_file(contents: &str) -> PathBuf {
        let path =
            std::env::temp_dir().join(format!("todoist-client-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn nothing_configured() {
        let cfg = Config::build(None, env(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(matches!(cfg.token(), Err(Error::MissingToken)));
        assert!(matches!(cfg.gateway(), Err(Error::MissingToken)));
        assert_eq!(cfg.url().as_str(), "https://api.todoist.com/");
        assert_eq!(cfg.oauth_url().as_str(), "https://todoist.com/");
    }

    #[test]
    fn missing_file_is_fine() {
        let path = std::env::temp_dir().join("todoist-client-does-not-exist.toml");
        let cfg = Config::build(Some(path.as_path()), env(&[("TODOIST_TOKEN", "abc")])).unwrap();
        assert_eq!(cfg.token().unwrap(), "abc");
    }

    #[test]
    fn environment_overrides_file() {
        let path = write_file("token = \"from-file\"\nurl = \"http://localhost:1234/\"\n");
        let cfg = Config::build(
            Some(path.as_path()),
            env(&[
                ("TODOIST_TOKEN", "from-env"),
                ("TODOIST_OAUTH_URL", "http://localhost:5678/"),
            ]),
        )
        .unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(cfg.token().unwrap(), "from-env");
        assert_eq!(cfg.url().as_str(), "http://localhost:1234/");
        assert_eq!(cfg.oauth_url().as_str(), "http://localhost:5678/");
        let mut gw = cfg.gateway().unwrap();
        gw.close();
    }

    #[test]
    fn empty_token_is_missing() {
        let cfg = Config {
            token: Some(String::new()),
            ..Default::default()
        };
        assert!(matches!(cfg.token(), Err(Error::MissingToken)));
    }

    #[test]
    fn invalid_url() {
        let err = Config::build(None, env(&[("TODOIST_URL", "not a url")])).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn default_path() {
        if let Some(path) = Config::default_path() {
            assert!(path.ends_with("todoist-client/config.toml"));
        }
    }
}
