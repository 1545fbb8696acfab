use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::{build_client, transport_error, DispatchOutcome, Sender};
use crate::email::{Email, SanitizedRequest};
use crate::Error;

pub const MAILGUN_URL: &str = "https://api.mailgun.net";

/// Form fields for the `messages` endpoint
#[derive(Serialize, Debug)]
struct Message<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    html: &'a str,
}

/// Error body returned by Mailgun, e.g. `{"message": "Forbidden"}`
#[derive(Deserialize, Debug)]
struct ErrorResponse {
    message: String,
}

/// Sends email through the Mailgun messages API
pub struct MailgunClient {
    api_key: String,
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl MailgunClient {
    pub fn new(api_key: &str, domain: &str) -> Result<Self, Error> {
        Self::with_base_url(api_key, domain, MAILGUN_URL)
    }

    pub fn with_base_url(api_key: &str, domain: &str, base_url: &str) -> Result<Self, Error> {
        let endpoint =
            reqwest::Url::parse(base_url)?.join(&format!("v3/{}/messages", domain))?;

        Ok(Self {
            api_key: api_key.to_string(),
            endpoint,
            client: build_client()?,
        })
    }
}

#[async_trait]
impl Sender for MailgunClient {
    fn name(&self) -> &str {
        "MailGun"
    }

    async fn send(&self, request: &SanitizedRequest) -> DispatchOutcome {
        let form = Message {
            from: request.from.as_str(),
            to: request.to.as_str(),
            subject: &request.subject,
            html: request.body.as_str(),
        };

        let resp = self
            .client
            .post(self.endpoint.clone())
            .basic_auth("api", Some(&self.api_key))
            .form(&form)
            .send()
            .await
            .map_err(transport_error)?;

        let status = resp.status();
        if status.is_success() {
            return Ok(Email::sent(request));
        }

        // Prefer Mailgun's own explanation when it sends one
        match resp.json::<ErrorResponse>().await {
            Ok(e) => Err(e.message),
            Err(_) => Err(format!("Unknown Error: {}", status)),
        }
    }
}
