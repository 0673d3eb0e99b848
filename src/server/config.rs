use std::{path::PathBuf, str::FromStr};

use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 4002;
const DEFAULT_CDN_ROOT: &str = "./cdn";
const DEFAULT_LANGUAGE: &str = "en";
const DEFAULT_MINIMUM_AGE: i32 = 21;
const DEFAULT_EXPIRE_SECONDS: i64 = 86_400;

/// Mail relay settings. When absent, outgoing mail is written to the log.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub endpoint: String,
    pub api_key: Option<String>,
    pub from: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,

    /// Base URL of the admin application; used in links mailed to admins and suppliers.
    pub admin_url: String,
    /// Base URL of the customer application; used in links mailed to customers.
    pub frontend_url: String,
    pub cors_origins: Vec<String>,

    pub cdn_root: PathBuf,
    pub default_language: String,
    pub minimum_age: i32,

    pub user_expire_seconds: i64,
    pub booking_expire_seconds: i64,
    pub token_expire_seconds: i64,

    pub mail: Option<MailConfig>,
    pub admin_email: Option<String>,
    pub expo_access_token: Option<String>,
    pub pdf_renderer_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let admin_url = required("ADMIN_URL")?;
        let frontend_url = required("FRONTEND_URL")?;

        let cors_origins = match optional("CORS_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            None => vec![admin_url.clone(), frontend_url.clone()],
        };

        let mail = match optional("MAIL_ENDPOINT") {
            Some(endpoint) => Some(MailConfig {
                endpoint,
                api_key: optional("MAIL_API_KEY"),
                from: required("MAIL_FROM")?,
            }),
            None => None,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host: optional("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parsed("PORT", DEFAULT_PORT)?,
            admin_url,
            frontend_url,
            cors_origins,
            cdn_root: optional("CDN_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CDN_ROOT)),
            default_language: optional("DEFAULT_LANGUAGE")
                .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
            minimum_age: parsed("MINIMUM_AGE", DEFAULT_MINIMUM_AGE)?,
            user_expire_seconds: parsed("USER_EXPIRE_SECONDS", DEFAULT_EXPIRE_SECONDS)?,
            booking_expire_seconds: parsed("BOOKING_EXPIRE_SECONDS", DEFAULT_EXPIRE_SECONDS)?,
            token_expire_seconds: parsed("TOKEN_EXPIRE_SECONDS", DEFAULT_EXPIRE_SECONDS)?,
            mail,
            admin_email: optional("ADMIN_EMAIL"),
            expo_access_token: optional("EXPO_ACCESS_TOKEN"),
            pdf_renderer_url: optional("PDF_RENDERER_URL"),
        })
    }

    /// Configuration for tests: no external collaborators, files under `cdn_root`.
    pub fn for_tests(cdn_root: PathBuf) -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            admin_url: "http://admin.test".to_string(),
            frontend_url: "http://frontend.test".to_string(),
            cors_origins: Vec::new(),
            cdn_root,
            default_language: DEFAULT_LANGUAGE.to_string(),
            minimum_age: DEFAULT_MINIMUM_AGE,
            user_expire_seconds: DEFAULT_EXPIRE_SECONDS,
            booking_expire_seconds: DEFAULT_EXPIRE_SECONDS,
            token_expire_seconds: DEFAULT_EXPIRE_SECONDS,
            mail: None,
            admin_email: Some("admin@test.local".to_string()),
            expo_access_token: None,
            pdf_renderer_url: None,
        }
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn parsed<T>(name: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(name) {
        Some(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidEnvVar {
            name: name.to_string(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}
