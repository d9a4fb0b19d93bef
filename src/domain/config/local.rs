use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{application::services::translation::Locale, domain::config::secrets::SupabaseSecrets};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_STORAGE_ROOT: &str = "storage/file";
const DEFAULT_MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "supabase")]
    Supabase,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Local, Provider::Supabase];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Local => "local",
            Provider::Supabase => "supabase",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Provider::ALL
            .into_iter()
            .find(|provider| provider.as_str() == s)
            .ok_or_else(|| ConfigError::Invalid {
                key: "provider",
                value: s.to_string(),
            })
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Inputs of a storage provider. Read-only once the provider is built.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub storage_root: String,
    pub base_url: String,
}

#[derive(Debug, Clone)]
pub struct LocalConfig {
    pub port: u16,
    pub storage: StorageConfig,
    pub database_url: Option<String>,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub max_upload_size: usize,
    pub default_locale: Locale,
    pub supabase: Option<SupabaseSecrets>,
}

impl LocalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup; empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                key: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let max_upload_size = match var("MAX_UPLOAD_SIZE") {
            Some(value) => value.parse::<usize>().map_err(|_| ConfigError::Invalid {
                key: "MAX_UPLOAD_SIZE",
                value,
            })?,
            None => DEFAULT_MAX_UPLOAD_SIZE,
        };

        let default_locale = match var("DEFAULT_LOCALE") {
            Some(value) => Locale::supported(&value).ok_or(ConfigError::Invalid {
                key: "DEFAULT_LOCALE",
                value,
            })?,
            None => Locale::default(),
        };

        let storage = StorageConfig {
            storage_root: var("STORAGE_ROOT").unwrap_or_else(|| DEFAULT_STORAGE_ROOT.to_string()),
            base_url: var("APP_URL").unwrap_or_else(|| format!("http://localhost:{}", port)),
        };

        let cors_allowed_origins = var("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect()
        });

        let supabase = match (
            var("SUPABASE_STORAGE_URL"),
            var("SUPABASE_API_KEY"),
            var("SUPABASE_BUCKET"),
        ) {
            (Some(storage_url), Some(api_key), Some(bucket_name)) => Some(SupabaseSecrets {
                storage_url,
                api_key,
                bucket_name,
            }),
            _ => None,
        };

        Ok(Self {
            port,
            storage,
            database_url: var("DATABASE_URL"),
            cors_allowed_origins,
            max_upload_size,
            default_locale,
            supabase,
        })
    }
}
