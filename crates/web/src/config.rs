use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
const DEFAULT_UPLOAD_DIR: &str = "./uploads";
const DEFAULT_JUDGE_PASSWORD: &str = "123456";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub auth_secret: String,
    pub token_ttl_hours: i64,
    pub google_client_id: Option<String>,
    pub cors_origins: Vec<String>,
    pub blob_store: BlobStoreConfig,
    pub mail_webhook_url: Option<String>,
    pub mail_from: String,
    pub default_judge_password: String,
}

#[derive(Debug, Clone)]
pub enum BlobStoreConfig {
    Remote { url: String, api_key: String },
    Local { root: PathBuf, public_base_url: String },
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").context("Cannot load HOST env variable")?;
        let port: u16 = std::env::var("PORT")
            .context("PORT must be a number")?
            .parse()?;

        let token_ttl_hours = match optional("TOKEN_TTL_HOURS") {
            Some(v) => v.parse().context("TOKEN_TTL_HOURS must be a number of hours")?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };

        let blob_store = match optional("BLOB_STORE_URL") {
            Some(url) => BlobStoreConfig::Remote {
                url,
                api_key: std::env::var("BLOB_STORE_API_KEY")
                    .context("BLOB_STORE_API_KEY is required when BLOB_STORE_URL is set")?,
            },
            None => BlobStoreConfig::Local {
                root: optional("BLOB_STORE_DIR")
                    .unwrap_or_else(|| DEFAULT_UPLOAD_DIR.to_string())
                    .into(),
                public_base_url: optional("PUBLIC_BASE_URL")
                    .unwrap_or_else(|| format!("http://{host}:{port}")),
            },
        };

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            auth_secret: std::env::var("AUTH_SECRET")
                .context("Cannot load AUTH_SECRET env variable")?,
            token_ttl_hours,
            google_client_id: optional("GOOGLE_CLIENT_ID"),
            cors_origins: split_list(&std::env::var("CORS_ORIGINS").unwrap_or_default()),
            blob_store,
            mail_webhook_url: optional("MAIL_WEBHOOK_URL"),
            mail_from: optional("MAIL_FROM").unwrap_or_else(|| "no-reply@localhost".to_string()),
            default_judge_password: optional("DEFAULT_JUDGE_PASSWORD")
                .unwrap_or_else(|| DEFAULT_JUDGE_PASSWORD.to_string()),
            host,
            port,
        })
    }
}

/// Unset and blank variables are both treated as absent.
fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_drops_blanks() {
        assert_eq!(
            split_list(" https://a.example , ,https://b.example,"),
            vec!["https://a.example", "https://b.example"]
        );
        assert!(split_list("").is_empty());
    }
}
