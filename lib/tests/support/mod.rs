//! Stub collaborators for driving the pipeline without a network.
#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use mailbridge::email::{Email, SanitizedHtml, SanitizedRequest};
use mailbridge::logger::MessageLog;
use mailbridge::provider::{DispatchOutcome, Sender};
use mailbridge::sanitize::Sanitizer;
use mailbridge::storage::Store;
use mailbridge::Requirements;

pub fn valid_body() -> Value {
    json!({
        "to": "fake@example.com",
        "to_name": "Mr. Fake",
        "from": "no.reply@example.com",
        "from_name": "Ms. Fake",
        "subject": "A message from The Fake Family",
        "body": "<h1>Your Bill</h1><p>$10</p>",
    })
}

/// Sender that either builds a record or fails with a fixed message
pub struct StubSender {
    name: &'static str,
    fail_with: Option<String>,
    calls: AtomicUsize,
    last: Mutex<Option<SanitizedRequest>>,
}

impl StubSender {
    pub fn ok(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            fail_with: None,
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn failing(name: &'static str, msg: &str) -> Arc<Self> {
        Arc::new(Self {
            name,
            fail_with: Some(msg.to_string()),
            calls: AtomicUsize::new(0),
            last: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SanitizedRequest> {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl Sender for StubSender {
    fn name(&self) -> &str {
        self.name
    }

    async fn send(&self, request: &SanitizedRequest) -> DispatchOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() = Some(request.clone());

        match &self.fail_with {
            Some(msg) => Err(msg.clone()),
            None => Ok(Email::sent(request)),
        }
    }
}

#[derive(Default)]
pub struct RecordingLog {
    lines: Mutex<Vec<String>>,
}

impl RecordingLog {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageLog for RecordingLog {
    async fn log(&self, message: &str) {
        self.lines.lock().unwrap().push(message.to_string());
    }
}

/// Records only after sleeping, so a caller that does not wait for the log
/// would return before the line lands
#[derive(Default)]
pub struct SlowLog {
    lines: Mutex<Vec<String>>,
}

impl SlowLog {
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageLog for SlowLog {
    async fn log(&self, message: &str) {
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        self.lines.lock().unwrap().push(message.to_string());
    }
}

/// Passes the body through untouched, counting calls
#[derive(Default)]
pub struct IdentitySanitizer {
    calls: AtomicUsize,
}

impl IdentitySanitizer {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Sanitizer for IdentitySanitizer {
    async fn sanitize(&self, html: &str) -> SanitizedHtml {
        self.calls.fetch_add(1, Ordering::SeqCst);
        SanitizedHtml::new(html.to_string())
    }
}

pub struct StubStore {
    fail_with: Option<String>,
    saved: Mutex<Vec<Email>>,
}

impl StubStore {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            fail_with: None,
            saved: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(msg: &str) -> Arc<Self> {
        Arc::new(Self {
            fail_with: Some(msg.to_string()),
            saved: Mutex::new(Vec::new()),
        })
    }

    pub fn saved(&self) -> Vec<Email> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl Store for StubStore {
    async fn save(&self, email: &Email) -> Result<(), String> {
        self.saved.lock().unwrap().push(email.clone());

        match &self.fail_with {
            Some(msg) => Err(msg.clone()),
            None => Ok(()),
        }
    }
}

/// Handles on every stub so tests can inspect them after a run
pub struct Harness {
    pub sender: Arc<StubSender>,
    pub log: Arc<RecordingLog>,
    pub sanitizer: Arc<IdentitySanitizer>,
    pub store: Arc<StubStore>,
}

impl Harness {
    pub fn new(sender: Arc<StubSender>, store: Arc<StubStore>) -> Self {
        Self {
            sender,
            log: Arc::new(RecordingLog::default()),
            sanitizer: Arc::new(IdentitySanitizer::default()),
            store,
        }
    }

    pub fn requirements(&self) -> Requirements {
        Requirements {
            sender: self.sender.clone(),
            log: self.log.clone(),
            sanitizer: self.sanitizer.clone(),
            store: self.store.clone(),
        }
    }
}
