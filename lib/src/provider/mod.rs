mod dispatch;
mod mailgun;
mod sendgrid;

pub use dispatch::Dispatcher;
pub use mailgun::MailgunClient;
pub use sendgrid::SendGridClient;

use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::email::{Email, SanitizedRequest};
use crate::Error;

/// Timeout applied by the HTTP clients, in seconds
pub const REQUEST_TIMEOUT: u64 = 30;

/// Result of a single send attempt: the record of the sent email, or a
/// human-readable reason it was not sent.
pub type DispatchOutcome = Result<Email, String>;

/// Anything that can deliver an email
#[async_trait]
pub trait Sender: Send + Sync {
    /// Name used when logging which provider handled an email
    fn name(&self) -> &str;

    async fn send(&self, request: &SanitizedRequest) -> DispatchOutcome;
}

/// The delivery providers that can be configured as preferred
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Provider {
    SendGrid,
    MailGun,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Self::SendGrid => write!(f, "SendGrid"),
            Self::MailGun => write!(f, "MailGun"),
        }
    }
}

impl FromStr for Provider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SendGrid" => Ok(Self::SendGrid),
            "MailGun" => Ok(Self::MailGun),
            _ => Err(Error::UnknownProvider(s.to_string())),
        }
    }
}

impl TryFrom<String> for Provider {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

fn build_client() -> Result<reqwest::Client, Error> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT))
        .build()?;

    Ok(client)
}

/// Flatten a transport error into the message reported to callers
fn transport_error(err: reqwest::Error) -> String {
    let msg = err.to_string();

    if msg.is_empty() {
        format!("Unknown Error: {:?}", err)
    } else {
        msg
    }
}
