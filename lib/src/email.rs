/// Domain types shared by the decoder, the providers and the HTTP layer.
///
/// Plain strings coming off the wire are wrapped into newtypes once they have
/// been validated (or sanitized), so the compiler keeps the two apart.
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier assigned to an email when a provider accepts it
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailId(String);

impl EmailId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for EmailAddress {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// HTML that has been through a `Sanitizer`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SanitizedHtml(String);

impl SanitizedHtml {
    /// Only sanitizers should call this.
    pub fn new(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub email: EmailAddress,
    pub name: String,
}

/// The body of a `POST /email` request, after decoding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRequest {
    pub to: String,
    pub to_name: String,
    pub from: String,
    pub from_name: String,
    pub subject: String,
    pub body: String,
}

impl EmailRequest {
    /// Swap the raw body for its sanitized form
    pub fn with_body(self, body: SanitizedHtml) -> SanitizedRequest {
        SanitizedRequest {
            to: self.to.into(),
            to_name: self.to_name,
            from: self.from.into(),
            from_name: self.from_name,
            subject: self.subject,
            body,
        }
    }
}

/// What providers actually receive: an `EmailRequest` whose body is safe to send
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SanitizedRequest {
    pub to: EmailAddress,
    pub to_name: String,
    pub from: EmailAddress,
    pub from_name: String,
    pub subject: String,
    pub body: SanitizedHtml,
}

/// Record of an email that a provider accepted for delivery.
///
/// Never mutated once built.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub id: EmailId,
    pub created: DateTime<Utc>,
    pub subject: String,
    pub body: SanitizedHtml,
    pub from: Contact,
    pub to: Contact,
}

impl Email {
    /// Build the record for a request that was just sent.
    /// A fresh id and timestamp are drawn on every call.
    pub fn sent(request: &SanitizedRequest) -> Self {
        Self {
            id: EmailId::generate(),
            created: Utc::now(),
            subject: request.subject.clone(),
            body: request.body.clone(),
            from: Contact {
                email: request.from.clone(),
                name: request.from_name.clone(),
            },
            to: Contact {
                email: request.to.clone(),
                name: request.to_name.clone(),
            },
        }
    }
}
