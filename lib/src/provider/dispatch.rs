use std::sync::Arc;

use async_trait::async_trait;

use super::{DispatchOutcome, Provider, Sender};
use crate::email::SanitizedRequest;
use crate::logger::MessageLog;

/// Sends with a primary provider and falls back to a secondary one if the
/// primary fails.
///
/// Attempts are strictly sequential and there is exactly one fallback hop.
/// When both providers fail only the secondary's message is returned; the
/// primary's is logged.
pub struct Dispatcher {
    primary: Arc<dyn Sender>,
    secondary: Arc<dyn Sender>,
    log: Arc<dyn MessageLog>,
}

impl Dispatcher {
    pub fn new(
        primary: Arc<dyn Sender>,
        secondary: Arc<dyn Sender>,
        log: Arc<dyn MessageLog>,
    ) -> Self {
        Self {
            primary,
            secondary,
            log,
        }
    }

    /// Order the two providers according to the preferred one
    pub fn with_preference(
        preferred: Provider,
        sendgrid: Arc<dyn Sender>,
        mailgun: Arc<dyn Sender>,
        log: Arc<dyn MessageLog>,
    ) -> Self {
        match preferred {
            Provider::SendGrid => Self::new(sendgrid, mailgun, log),
            Provider::MailGun => Self::new(mailgun, sendgrid, log),
        }
    }

    pub fn primary(&self) -> &str {
        self.primary.name()
    }

    pub fn secondary(&self) -> &str {
        self.secondary.name()
    }

    pub async fn dispatch(&self, request: &SanitizedRequest) -> DispatchOutcome {
        let json = serde_json::to_string(request).unwrap_or_else(|_| format!("{:?}", request));
        self.log.log(&format!("Sending Email: {}", json)).await;

        match self.attempt(self.primary.as_ref(), request).await {
            Ok(email) => Ok(email),
            Err(_) => self.attempt(self.secondary.as_ref(), request).await,
        }
    }

    /// Send with a single provider and log how it went
    async fn attempt(&self, sender: &dyn Sender, request: &SanitizedRequest) -> DispatchOutcome {
        let outcome = sender.send(request).await;

        let msg = match &outcome {
            Ok(email) => format!(
                "Sent with {}: {}",
                sender.name(),
                serde_json::to_string_pretty(email).unwrap_or_else(|_| email.id.to_string())
            ),
            Err(e) => format!("Failed to send with {}: {}", sender.name(), e),
        };
        self.log.log(&msg).await;

        outcome
    }
}

#[async_trait]
impl Sender for Dispatcher {
    fn name(&self) -> &str {
        "Fallback"
    }

    async fn send(&self, request: &SanitizedRequest) -> DispatchOutcome {
        self.dispatch(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::email::{Email, EmailRequest, SanitizedHtml};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct Stub {
        name: &'static str,
        fail_with: Option<&'static str>,
        calls: AtomicUsize,
    }

    impl Stub {
        fn ok(name: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                fail_with: None,
                calls: AtomicUsize::new(0),
            })
        }

        fn failing(name: &'static str, msg: &'static str) -> Arc<Self> {
            Arc::new(Self {
                name,
                fail_with: Some(msg),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Sender for Stub {
        fn name(&self) -> &str {
            self.name
        }

        async fn send(&self, request: &SanitizedRequest) -> DispatchOutcome {
            self.calls.fetch_add(1, Ordering::SeqCst);

            match self.fail_with {
                Some(msg) => Err(msg.to_string()),
                None => {
                    let mut email = Email::sent(request);
                    // Tag the record so tests can tell which provider built it
                    email.subject = format!("{} via {}", email.subject, self.name);
                    Ok(email)
                }
            }
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<String>>);

    impl Recorder {
        fn lines(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MessageLog for Recorder {
        async fn log(&self, message: &str) {
            self.0.lock().unwrap().push(message.to_string());
        }
    }

    fn request() -> SanitizedRequest {
        EmailRequest {
            to: "fake@example.com".to_string(),
            to_name: "Mr. Fake".to_string(),
            from: "no.reply@example.com".to_string(),
            from_name: "Ms. Fake".to_string(),
            subject: "Hi".to_string(),
            body: "<p>hi</p>".to_string(),
        }
        .with_body(SanitizedHtml::new("<p>hi</p>".to_string()))
    }

    #[tokio::test]
    async fn test_primary_success_skips_secondary() {
        let (primary, secondary) = (Stub::ok("A"), Stub::ok("B"));
        let log = Arc::new(Recorder::default());
        let dispatcher = Dispatcher::new(primary.clone(), secondary.clone(), log.clone());

        let email = dispatcher.dispatch(&request()).await.unwrap();

        assert_eq!(email.subject, "Hi via A");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 0);

        let lines = log.lines();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Sending Email: {"));
        assert!(lines[0].contains("fake@example.com"));
        assert!(lines[1].starts_with("Sent with A: "));
    }

    #[tokio::test]
    async fn test_falls_back_to_secondary() {
        let (primary, secondary) = (Stub::failing("A", "boom"), Stub::ok("B"));
        let log = Arc::new(Recorder::default());
        let dispatcher = Dispatcher::new(primary.clone(), secondary.clone(), log.clone());

        let email = dispatcher.dispatch(&request()).await.unwrap();

        assert_eq!(email.subject, "Hi via B");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);

        let lines = log.lines();
        assert_eq!(lines[1], "Failed to send with A: boom");
        assert!(lines[2].starts_with("Sent with B: "));
    }

    #[tokio::test]
    async fn test_both_fail_surfaces_secondary_message() {
        let (primary, secondary) = (Stub::failing("A", "first"), Stub::failing("B", "second"));
        let log = Arc::new(Recorder::default());
        let dispatcher = Dispatcher::new(primary.clone(), secondary.clone(), log.clone());

        let err = dispatcher.dispatch(&request()).await.unwrap_err();

        assert_eq!(err, "second");
        assert_eq!(primary.calls(), 1);
        assert_eq!(secondary.calls(), 1);
        assert_eq!(
            &log.lines()[1..],
            &[
                "Failed to send with A: first".to_string(),
                "Failed to send with B: second".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_preference_orders_providers() {
        let log: Arc<dyn MessageLog> = Arc::new(Recorder::default());

        let d = Dispatcher::with_preference(
            Provider::MailGun,
            Stub::ok("SendGrid"),
            Stub::ok("MailGun"),
            log.clone(),
        );
        assert_eq!((d.primary(), d.secondary()), ("MailGun", "SendGrid"));

        let d = Dispatcher::with_preference(
            Provider::SendGrid,
            Stub::ok("SendGrid"),
            Stub::ok("MailGun"),
            log,
        );
        assert_eq!((d.primary(), d.secondary()), ("SendGrid", "MailGun"));
    }
}
