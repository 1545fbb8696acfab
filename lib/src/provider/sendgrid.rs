use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Serialize;

use super::{build_client, transport_error, DispatchOutcome, Sender};
use crate::email::{Email, SanitizedRequest};
use crate::Error;

pub const SENDGRID_URL: &str = "https://api.sendgrid.com";
const SEND_ENDPOINT: &str = "v3/mail/send";

#[derive(Serialize, Debug)]
struct Address<'a> {
    email: &'a str,
    name: &'a str,
}

#[derive(Serialize, Debug)]
struct Personalization<'a> {
    to: [Address<'a>; 1],
}

#[derive(Serialize, Debug)]
struct Content<'a> {
    #[serde(rename = "type")]
    type_: &'a str,
    value: &'a str,
}

/// Body of a v3 `mail/send` call
#[derive(Serialize, Debug)]
struct Message<'a> {
    personalizations: [Personalization<'a>; 1],
    from: Address<'a>,
    subject: &'a str,
    content: [Content<'a>; 1],
}

impl<'a> From<&'a SanitizedRequest> for Message<'a> {
    fn from(request: &'a SanitizedRequest) -> Self {
        Self {
            personalizations: [Personalization {
                to: [Address {
                    email: request.to.as_str(),
                    name: &request.to_name,
                }],
            }],
            from: Address {
                email: request.from.as_str(),
                name: &request.from_name,
            },
            subject: &request.subject,
            content: [Content {
                type_: "text/html",
                value: request.body.as_str(),
            }],
        }
    }
}

/// Sends email through the SendGrid v3 API
pub struct SendGridClient {
    api_key: String,
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl SendGridClient {
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::with_base_url(api_key, SENDGRID_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, Error> {
        let endpoint = reqwest::Url::parse(base_url)?.join(SEND_ENDPOINT)?;

        Ok(Self {
            api_key: api_key.to_string(),
            endpoint,
            client: build_client()?,
        })
    }
}

#[async_trait]
impl Sender for SendGridClient {
    fn name(&self) -> &str {
        "SendGrid"
    }

    async fn send(&self, request: &SanitizedRequest) -> DispatchOutcome {
        let resp = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(&self.api_key)
            .json(&Message::from(request))
            .send()
            .await
            .map_err(transport_error)?;

        // SendGrid answers 202 once the message is queued
        let status = resp.status();
        if status == StatusCode::ACCEPTED {
            return Ok(Email::sent(request));
        }

        let body = resp.text().await.map_err(transport_error)?;
        let body = match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(v) => serde_json::to_string_pretty(&v).unwrap_or(body),
            Err(_) => body,
        };

        Err(format!(
            "Unexpected Response From SendGrid: {}: {}",
            status.as_u16(),
            body
        ))
    }
}
