use async_trait::async_trait;

use crate::domain::events::ReconciliationItem;

/// Work queue feeding the status reconciliation cycle. Delivery is
/// at-least-once; consumers must be idempotent.
#[async_trait]
pub trait ReconciliationQueue: Send + Sync {
    async fn enqueue(&self, item: ReconciliationItem) -> anyhow::Result<()>;
}
