use async_trait::async_trait;

use crate::email::SanitizedHtml;

/// Strips unwanted HTML (like `<script>` tags) from an email body.
/// Sanitizing never fails.
#[async_trait]
pub trait Sanitizer: Send + Sync {
    async fn sanitize(&self, html: &str) -> SanitizedHtml;
}

/// `Sanitizer` backed by ammonia's default allow-list
#[derive(Debug, Default)]
pub struct AmmoniaSanitizer;

#[async_trait]
impl Sanitizer for AmmoniaSanitizer {
    async fn sanitize(&self, html: &str) -> SanitizedHtml {
        SanitizedHtml::new(ammonia::clean(html))
    }
}
