//! Accepts an email over HTTP, sanitizes it, sends it through SendGrid or
//! Mailgun (falling back to the other on failure) and records what was sent.

pub mod api;
pub mod config;
pub mod decode;
pub mod email;
pub mod logger;
pub mod pipeline;
pub mod provider;
pub mod sanitize;
pub mod storage;

mod error;

pub use error::Error;
pub use pipeline::{post_email, Requirements};
