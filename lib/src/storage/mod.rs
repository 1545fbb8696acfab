mod memory;

pub use memory::{MemoryStore, DEFAULT_CAPACITY};

use async_trait::async_trait;

use crate::email::Email;

/// Persists sent emails.
///
/// Errors are reported as a message; the email has already been delivered by
/// the time `save` is called, so a failure here does not undo the send.
#[async_trait]
pub trait Store: Send + Sync {
    async fn save(&self, email: &Email) -> Result<(), String>;
}
