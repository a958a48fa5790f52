use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs, io};

use serde::Deserialize;
use thiserror::Error;

const DEFAULT_CONFIG_FILE: &str = "blog.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("environment variable {key} has an invalid value: {value:?}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("the sanity content source needs a project id")]
    MissingProjectId,
    #[error("sanity project id {0:?} may only contain lowercase letters, digits and hyphens")]
    InvalidProjectId(String),
    #[error("invalid sanity api host {0:?}")]
    InvalidApiHost(String),
    #[error("could not build the http client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BlogConfig {
    pub port: u16,
    /// Zero disables caching: every listing asks the content source again.
    pub cache_ttl_secs: u64,
    pub content: ContentConfig,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            cache_ttl_secs: 0,
            content: ContentConfig::default(),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    #[default]
    Static,
    Sanity,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ContentConfig {
    pub source: ContentSource,
    pub sanity: SanityConfig,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SanityConfig {
    pub project_id: Option<String>,
    pub dataset: String,
    pub api_version: String,
    pub use_cdn: bool,
    pub timeout_secs: u64,
    /// Replaces the `https://{project}.api.sanity.io` origin, e.g. for a proxy.
    pub api_host: Option<String>,
}

impl Default for SanityConfig {
    fn default() -> Self {
        Self {
            project_id: None,
            dataset: "production".to_string(),
            api_version: "2024-01-01".to_string(),
            use_cdn: true,
            timeout_secs: 8,
            api_host: None,
        }
    }
}

impl SanityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl BlogConfig {
    /// Reads `BLOG_CONFIG` (or `blog.toml` when present), then applies
    /// environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match env::var("BLOG_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            Err(_) => Self::default(),
        };
        config.apply_env(|key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        if let Some(value) = lookup("CONTENT_SOURCE") {
            self.content.source = match value.to_ascii_lowercase().as_str() {
                "static" => ContentSource::Static,
                "sanity" => ContentSource::Sanity,
                _ => {
                    return Err(ConfigError::InvalidEnv {
                        key: "CONTENT_SOURCE",
                        value,
                    })
                }
            };
        }

        let sanity = &mut self.content.sanity;
        if let Some(value) = lookup("SANITY_PROJECT_ID") {
            sanity.project_id = Some(value);
        }
        if let Some(value) = lookup("SANITY_DATASET") {
            sanity.dataset = value;
        }
        if let Some(value) = lookup("SANITY_API_VERSION") {
            sanity.api_version = value;
        }
        if let Some(value) = lookup("SANITY_API_HOST") {
            sanity.api_host = Some(value);
        }
        if let Some(value) = lookup("SANITY_USE_CDN") {
            sanity.use_cdn = parse_env("SANITY_USE_CDN", value)?;
        }
        if let Some(value) = lookup("SANITY_TIMEOUT_SECS") {
            sanity.timeout_secs = parse_env("SANITY_TIMEOUT_SECS", value)?;
        }
        if let Some(value) = lookup("POSTS_CACHE_TTL_SECS") {
            self.cache_ttl_secs = parse_env("POSTS_CACHE_TTL_SECS", value)?;
        }
        if let Some(value) = lookup("PORT") {
            self.port = parse_env("PORT", value)?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.content.source != ContentSource::Sanity {
            return Ok(());
        }
        match self.content.sanity.project_id.as_deref() {
            None | Some("") => Err(ConfigError::MissingProjectId),
            Some(id)
                if !id
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-') =>
            {
                Err(ConfigError::InvalidProjectId(id.to_string()))
            }
            Some(_) => Ok(()),
        }
    }
}

fn parse_env<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { key, value })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn env_of(pairs: &[(&'static str, &str)]) -> impl Fn(&'static str) -> Option<String> {
        let map: HashMap<&'static str, String> =
            pairs.iter().map(|(k, v)| (*k, v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_static_content() {
        let config = BlogConfig::default();
        assert_eq!(config.content.source, ContentSource::Static);
        assert_eq!(config.port, 8080);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_partial_toml() {
        let config = BlogConfig::from_toml(
            r#"
            cache_ttl_secs = 60

            [content]
            source = "sanity"

            [content.sanity]
            project_id = "abc123"
            use_cdn = false
            "#,
        )
        .unwrap();

        assert_eq!(config.cache_ttl(), Duration::from_secs(60));
        assert_eq!(config.content.source, ContentSource::Sanity);
        assert_eq!(config.content.sanity.project_id.as_deref(), Some("abc123"));
        assert_eq!(config.content.sanity.dataset, "production");
        assert!(!config.content.sanity.use_cdn);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_overrides_file_values() {
        let mut config = BlogConfig::default();
        config
            .apply_env(env_of(&[
                ("CONTENT_SOURCE", "Sanity"),
                ("SANITY_PROJECT_ID", "portfolio"),
                ("SANITY_TIMEOUT_SECS", "3"),
                ("PORT", "3000"),
            ]))
            .unwrap();

        assert_eq!(config.content.source, ContentSource::Sanity);
        assert_eq!(config.content.sanity.timeout(), Duration::from_secs(3));
        assert_eq!(config.port, 3000);
    }

    #[test]
    fn rejects_unknown_content_source() {
        let mut config = BlogConfig::default();
        let err = config
            .apply_env(env_of(&[("CONTENT_SOURCE", "wordpress")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: "CONTENT_SOURCE", .. }));
    }

    #[test]
    fn rejects_non_numeric_port() {
        let mut config = BlogConfig::default();
        let err = config.apply_env(env_of(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { key: "PORT", .. }));
    }

    #[test]
    fn sanity_without_project_id_is_a_programmer_error() {
        let mut config = BlogConfig::default();
        config.content.source = ContentSource::Sanity;
        assert!(matches!(config.validate(), Err(ConfigError::MissingProjectId)));

        config.content.sanity.project_id = Some("Bad Id".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::InvalidProjectId(_))));
    }
}
