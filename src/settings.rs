use std::{env, fmt, str::FromStr};

use config::{Config, ConfigError, Environment, File};
use dotenv::dotenv;
use serde::Deserialize;

use crate::read_time::DEFAULT_WORDS_PER_MINUTE;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum AppEnvironment {
    Development,
    Production,
    Testing,
}

impl FromStr for AppEnvironment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" => Ok(AppEnvironment::Development),
            "production" => Ok(AppEnvironment::Production),
            "testing" => Ok(AppEnvironment::Testing),
            _ => Err(ConfigError::Message(format!("Invalid environment: {}", s))),
        }
    }
}

#[derive(Deserialize, Clone)]
#[serde(rename_all = "snake_case")]
pub struct AppConfig {
    #[serde(default = "default_env")]
    pub env: AppEnvironment,

    #[serde(default = "default_name")]
    pub name: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_worker_count")]
    pub worker_count: usize,

    #[serde(default = "default_cors_origins")]
    pub cors_allowed_origins: Vec<String>,

    /// Content store (Sanity-style) query API.
    #[serde(default)]
    pub content_project_id: String,

    #[serde(default = "default_dataset")]
    pub content_dataset: String,

    #[serde(default = "default_api_version")]
    pub content_api_version: String,

    #[serde(default = "default_use_cdn")]
    pub content_use_cdn: bool,

    #[serde(default)]
    pub content_api_token: Option<String>,

    /// Email relay (EmailJS-style) for contact form forwarding.
    #[serde(default = "default_email_send_url")]
    pub email_send_url: String,

    #[serde(default)]
    pub email_service_id: String,

    #[serde(default)]
    pub email_template_id: String,

    #[serde(default)]
    pub email_public_key: String,

    #[serde(default = "default_words_per_minute")]
    pub words_per_minute: u32,

    #[serde(default)]
    pub trust_proxy_headers: bool,
}

fn default_env() -> AppEnvironment {
    AppEnvironment::Development
}
fn default_name() -> String {
    "Portfolio-Content-API".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_worker_count() -> usize {
    num_cpus::get()
}
fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}
fn default_dataset() -> String {
    "production".to_string()
}
fn default_api_version() -> String {
    "2023-10-01".to_string()
}
fn default_use_cdn() -> bool {
    true
}
fn default_email_send_url() -> String {
    "https://api.emailjs.com/api/v1.0/email/send".to_string()
}
fn default_words_per_minute() -> u32 {
    DEFAULT_WORDS_PER_MINUTE
}

impl AppConfig {
    pub fn new() -> Result<Self, ConfigError> {
        dotenv().ok();

        let raw_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let env_name = AppEnvironment::from_str(&raw_env)
            .map_err(|_| ConfigError::Message(format!("Invalid APP_ENV value: {}", raw_env)))?;

        let builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(
                File::with_name(&format!("config/{}", env_name.to_string().to_lowercase()))
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("APP")
                    .separator("_")
                    .ignore_empty(true),
            );

        let mut config: Self = builder.build()?.try_deserialize()?;

        config.env = env_name;

        // Inject critical env values if missing
        config.content_project_id =
            fill_or_env(config.content_project_id, "APP_CONTENT_PROJECT_ID")?;
        config.email_service_id = fill_or_env(config.email_service_id, "APP_EMAIL_SERVICE_ID")?;
        config.email_template_id = fill_or_env(config.email_template_id, "APP_EMAIL_TEMPLATE_ID")?;
        config.email_public_key = fill_or_env(config.email_public_key, "APP_EMAIL_PUBLIC_KEY")?;

        if config.content_api_token.is_none() {
            config.content_api_token = env::var("APP_CONTENT_API_TOKEN").ok();
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.content_project_id.trim().is_empty() {
            errors.push("CONTENT_PROJECT_ID cannot be empty");
        }
        if self.content_dataset.trim().is_empty() {
            errors.push("CONTENT_DATASET cannot be empty");
        }
        if self.words_per_minute == 0 {
            errors.push("WORDS_PER_MINUTE must be at least 1");
        }
        if self.is_production() && self.cors_origins().iter().any(|o| o == "*") {
            errors.push("Wildcard CORS (*) is not allowed in production");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Message(errors.join(", ")))
        }
    }

    pub fn is_production(&self) -> bool {
        self.env == AppEnvironment::Production
    }

    pub fn cors_origins(&self) -> Vec<String> {
        self.cors_allowed_origins
            .iter()
            .flat_map(|origin| origin.split(','))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect()
    }
}

fn fill_or_env(current: String, env_key: &str) -> Result<String, ConfigError> {
    if current.trim().is_empty() {
        env::var(env_key).map_err(|_| ConfigError::Message(format!("{env_key} must be set")))
    } else {
        Ok(current)
    }
}

impl fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AppEnvironment::Development => "development",
            AppEnvironment::Production => "production",
            AppEnvironment::Testing => "testing",
        };
        write!(f, "{s}")
    }
}

trait Redact {
    fn redact(&self) -> &str;
}

impl Redact for str {
    fn redact(&self) -> &str {
        if self.is_empty() { "[MISSING]" } else { "[REDACTED]" }
    }
}

impl Redact for Option<String> {
    fn redact(&self) -> &str {
        match self {
            Some(value) if !value.is_empty() => "[REDACTED]",
            _ => "[NOT_SET]",
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("name", &self.name)
            .field("port", &self.port)
            .field("host", &self.host)
            .field("worker_count", &self.worker_count)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("content_project_id", &self.content_project_id)
            .field("content_dataset", &self.content_dataset)
            .field("content_api_version", &self.content_api_version)
            .field("content_use_cdn", &self.content_use_cdn)
            .field("content_api_token", &self.content_api_token.redact())
            .field("email_send_url", &self.email_send_url)
            .field("email_service_id", &self.email_service_id)
            .field("email_template_id", &self.email_template_id)
            .field("email_public_key", &self.email_public_key.redact())
            .field("words_per_minute", &self.words_per_minute)
            .field("trust_proxy_headers", &self.trust_proxy_headers)
            .finish()
    }
}
