//! Post-commit notification hook.
//!
//! Notification is fire-and-forget: a failure here never affects the
//! already-committed operation.

use async_trait::async_trait;
use tracing::info;

use crate::core_types::OwnerId;

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn operation_recorded(&self, owner: OwnerId, reference: &str, summary: &str);
}

/// Default notifier: writes the event to the structured log.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn operation_recorded(&self, owner: OwnerId, reference: &str, summary: &str) {
        info!(owner, reference, summary, "operation recorded");
    }
}
