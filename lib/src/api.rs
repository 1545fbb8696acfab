/// Contains API-related struct definitions that are shared between the
/// pipeline and the HTTP server.
use std::fmt;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::email::Email;

/// Why a `post_email` run failed. Exactly one kind is attached to a failure.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PostEmailError {
    /// The request body was not a valid email request
    Decode { message: String },
    /// Every provider failed to send
    Send { message: String },
    /// The email was sent but could not be saved
    Persist { message: String },
}

impl PostEmailError {
    pub fn message(&self) -> &str {
        match self {
            Self::Decode { message } | Self::Send { message } | Self::Persist { message } => {
                message
            }
        }
    }
}

impl fmt::Display for PostEmailError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PostEmailError {}

/// Response of a `post_email` run.
///
/// Serializes as `{"success": true, "email": ...}` or
/// `{"success": false, "error": ...}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostEmailResponse {
    Sent(Email),
    Failed(PostEmailError),
}

impl PostEmailResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Sent(_))
    }
}

impl From<Result<Email, PostEmailError>> for PostEmailResponse {
    fn from(result: Result<Email, PostEmailError>) -> Self {
        match result {
            Ok(email) => Self::Sent(email),
            Err(e) => Self::Failed(e),
        }
    }
}

impl Serialize for PostEmailResponse {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("PostEmailResponse", 2)?;

        match self {
            Self::Sent(email) => {
                s.serialize_field("success", &true)?;
                s.serialize_field("email", email)?;
            }
            Self::Failed(error) => {
                s.serialize_field("success", &false)?;
                s.serialize_field("error", error)?;
            }
        }

        s.end()
    }
}
