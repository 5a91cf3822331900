use async_trait::async_trait;

use crate::error::Result;

/// The slice of the host's message/event object this tool actually consumes.
///
/// The chat-bot host hands its own event type to the handler; all we need
/// from it is the raw message text, the caller's privilege level, and a way
/// to emit one plain-text reply. Implementations must be `Send + Sync` so a
/// host can drive the handler from any of its worker tasks.
#[async_trait]
pub trait MessageEvent: Send + Sync {
    /// Plain text content of the triggering message.
    fn text(&self) -> &str;

    /// Whether the host's permission system considers the sender an
    /// administrator. The host owns that decision; this tool only reads it.
    fn sender_is_admin(&self) -> bool;

    /// Deliver a single plain-text reply to the caller.
    ///
    /// Intentionally `&self` so a handler can reply without a mutable borrow
    /// on the event.
    async fn reply(&self, text: &str) -> Result<()>;
}
