use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::{
    application::{handlers::reconciliation::StatusReconciler, services::queue::ReconciliationQueue},
    domain::events::ReconciliationItem,
};

/// In-process reconciliation queue over an unbounded tokio channel.
pub struct ChannelQueue {
    sender: mpsc::UnboundedSender<ReconciliationItem>,
}

impl ChannelQueue {
    /// Build the queue and the worker owning its receiving end.
    pub fn unbounded(poll_interval: Duration) -> (Arc<Self>, StatusPollWorker) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let queue = Arc::new(Self { sender });
        let worker = StatusPollWorker {
            receiver,
            poll_interval,
        };
        (queue, worker)
    }
}

#[async_trait]
impl ReconciliationQueue for ChannelQueue {
    async fn enqueue(&self, item: ReconciliationItem) -> anyhow::Result<()> {
        self.sender
            .send(item)
            .map_err(|_| anyhow::anyhow!("reconciliation queue closed"))
    }
}

/// Periodic consumer of the reconciliation queue. Each cycle drains the
/// items available at that moment and hands them to the reconciler;
/// ordering between items carries no meaning since each targets its own
/// record.
pub struct StatusPollWorker {
    receiver: mpsc::UnboundedReceiver<ReconciliationItem>,
    poll_interval: Duration,
}

impl StatusPollWorker {
    pub fn spawn(self, reconciler: Arc<StatusReconciler>) -> JoinHandle<()> {
        tokio::spawn(self.run(reconciler))
    }

    async fn run(mut self, reconciler: Arc<StatusReconciler>) {
        let mut cycle = tokio::time::interval(self.poll_interval);
        cycle.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            cycle.tick().await;
            self.drain_available(&reconciler).await;
        }
    }

    /// Process everything queued at the start of the cycle. The batch is
    /// taken up front so items re-queued by a failing poll wait for the
    /// next cycle instead of spinning inside this one.
    pub async fn drain_available(&mut self, reconciler: &StatusReconciler) {
        let mut batch = Vec::new();
        while let Ok(item) = self.receiver.try_recv() {
            batch.push(item);
        }
        for item in batch {
            if let Err(err) = reconciler.process(item.clone()).await {
                tracing::error!(
                    remote_id = %item.remote_message_id,
                    error = %err,
                    "reconciliation item failed"
                );
            }
        }
    }
}
