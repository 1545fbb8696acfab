/// The `POST /email` pipeline: decode, sanitize, send, then save.
///
/// Every collaborator is injected through `Requirements`, so tests can swap
/// in stubs for any of them.
use std::sync::Arc;

use serde_json::Value;

use crate::api::{PostEmailError, PostEmailResponse};
use crate::config::Settings;
use crate::decode::{decode_email_request, Decoded};
use crate::email::{Email, EmailRequest};
use crate::logger::{ConsoleLog, MessageLog};
use crate::provider::{Dispatcher, MailgunClient, SendGridClient, Sender};
use crate::sanitize::{AmmoniaSanitizer, Sanitizer};
use crate::storage::{MemoryStore, Store};
use crate::Error;

/// Capabilities the pipeline needs from the outside world
#[derive(Clone)]
pub struct Requirements {
    pub sender: Arc<dyn Sender>,
    pub log: Arc<dyn MessageLog>,
    pub sanitizer: Arc<dyn Sanitizer>,
    pub store: Arc<dyn Store>,
}

impl Requirements {
    /// Wire up the production collaborators: both providers behind a
    /// fallback dispatcher, console logging, ammonia and an in-memory store.
    pub fn from_settings(settings: &Settings) -> Result<Self, Error> {
        let log: Arc<dyn MessageLog> = Arc::new(ConsoleLog);

        let sendgrid = match &settings.sendgrid_url {
            Some(url) => SendGridClient::with_base_url(&settings.sendgrid_api_key, url)?,
            None => SendGridClient::new(&settings.sendgrid_api_key)?,
        };

        let mailgun = match &settings.mailgun_url {
            Some(url) => MailgunClient::with_base_url(
                &settings.mailgun_api_key,
                &settings.mailgun_domain,
                url,
            )?,
            None => MailgunClient::new(&settings.mailgun_api_key, &settings.mailgun_domain)?,
        };

        let dispatcher = Dispatcher::with_preference(
            settings.preferred_provider,
            Arc::new(sendgrid),
            Arc::new(mailgun),
            log.clone(),
        );

        log::info!(
            "Sending with {}, falling back to {}",
            dispatcher.primary(),
            dispatcher.secondary()
        );

        Ok(Self {
            sender: Arc::new(dispatcher),
            log,
            sanitizer: Arc::new(AmmoniaSanitizer),
            store: Arc::new(MemoryStore::with_capacity(settings.store_capacity)),
        })
    }
}

/// Run the whole pipeline for one request body.
///
/// Never fails: every error ends up tagged inside the response.
pub async fn post_email(requirements: &Requirements, input: &Value) -> PostEmailResponse {
    handle(requirements, input).await.into()
}

async fn handle(requirements: &Requirements, input: &Value) -> Result<Email, PostEmailError> {
    let email = match decode_email_request(input) {
        Decoded::Failure(errors) => {
            let message = errors.draw();
            requirements.log.log(&message).await;
            return Err(PostEmailError::Decode { message });
        }
        Decoded::Warning(warnings, request) => {
            // Report unexpected keys while the email goes out; both finish
            // before we move on
            let warning = warnings.draw();
            let (_, sent) = futures::join!(
                requirements.log.log(&warning),
                sanitize_and_send(requirements, request)
            );
            sent?
        }
        Decoded::Value(request) => sanitize_and_send(requirements, request).await?,
    };

    // The email is already out at this point; a failed save only changes
    // what we report
    requirements
        .store
        .save(&email)
        .await
        .map_err(|message| PostEmailError::Persist { message })?;

    Ok(email)
}

async fn sanitize_and_send(
    requirements: &Requirements,
    request: EmailRequest,
) -> Result<Email, PostEmailError> {
    let body = requirements.sanitizer.sanitize(&request.body).await;
    let request = request.with_body(body);

    requirements
        .sender
        .send(&request)
        .await
        .map_err(|message| PostEmailError::Send { message })
}
