/// All possible mailbridge library errors.
///
/// These only occur while setting the service up. Failures while handling a
/// request are reported through `api::PostEmailError` instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config: {0}")]
    Config(String),
    #[error("Unknown provider: {0}")]
    UnknownProvider(String),
    #[error("Http client: {0}")]
    HttpClient(String),
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpClient(err.to_string())
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::Config(err.to_string())
    }
}
