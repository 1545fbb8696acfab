use async_trait::async_trait;

/// Where the pipeline and the dispatcher report what they are doing.
///
/// Logging is fire-and-forget: implementations must not fail.
#[async_trait]
pub trait MessageLog: Send + Sync {
    async fn log(&self, message: &str);
}

/// Forwards messages to the `log` facade at info level
#[derive(Debug, Default)]
pub struct ConsoleLog;

#[async_trait]
impl MessageLog for ConsoleLog {
    async fn log(&self, message: &str) {
        log::info!("{}", message);
    }
}
