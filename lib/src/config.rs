use std::fmt;

use serde::Deserialize;

use crate::provider::Provider;
use crate::Error;

pub const DEFAULT_PATH: &str = "mailbridge.toml";
pub const DEFAULT_PORT: u16 = 3030;

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_store_capacity() -> usize {
    crate::storage::DEFAULT_CAPACITY
}

/// Settings read once at start-up
#[derive(Clone, Deserialize)]
pub struct Settings {
    pub sendgrid_api_key: String,
    pub mailgun_api_key: String,
    pub mailgun_domain: String,
    pub preferred_provider: Provider,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Sent emails kept in memory before the oldest is evicted
    #[serde(default = "default_store_capacity")]
    pub store_capacity: usize,
    /// Override for the SendGrid API base URL
    #[serde(default)]
    pub sendgrid_url: Option<String>,
    /// Override for the Mailgun API base URL
    #[serde(default)]
    pub mailgun_url: Option<String>,
}

// Keep API keys out of the logs
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Settings")
            .field("sendgrid_api_key", &"<redacted>")
            .field("mailgun_api_key", &"<redacted>")
            .field("mailgun_domain", &self.mailgun_domain)
            .field("preferred_provider", &self.preferred_provider)
            .field("port", &self.port)
            .field("store_capacity", &self.store_capacity)
            .field("sendgrid_url", &self.sendgrid_url)
            .field("mailgun_url", &self.mailgun_url)
            .finish()
    }
}

/// Loads config from a TOML file and merges it with the process
/// environment (e.g. `SENDGRID_API_KEY`, `PREFERRED_PROVIDER`, `PORT`).
///
/// The file is optional unless a path is given explicitly. Missing or
/// malformed values are an error; callers are expected to treat it as fatal.
pub fn load_config(path: Option<&str>) -> Result<Settings, Error> {
    load_config_with_env(path, config::Environment::default())
}

/// `load_config` with an explicit environment source
pub fn load_config_with_env(
    path: Option<&str>,
    env: config::Environment,
) -> Result<Settings, Error> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path.unwrap_or(DEFAULT_PATH)).required(path.is_some()))
        .add_source(env)
        .build()?;

    Ok(settings.try_deserialize()?)
}
