//! Order event feed
//!
//! Applies submission and status events coming from the exchange client to a
//! shared [`OrderTracker`]. Events can be applied one at a time, decoded from
//! JSON, or drained from a tokio channel by a long-running task.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::config::FeedConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::oms::tracker::OrderTracker;
use crate::order::{Order, OrderId};

/// Order event produced by the exchange client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "order", rename_all = "snake_case")]
pub enum OrderEvent {
    /// A new order was sent to the exchange
    Submitted(Order),
    /// The exchange reported a new state for a known order
    Updated(Order),
}

impl OrderEvent {
    /// ID of the order the event refers to
    pub fn order_id(&self) -> OrderId {
        match self {
            OrderEvent::Submitted(order) | OrderEvent::Updated(order) => order.id,
        }
    }
}

/// Counters of feed outcomes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FeedStats {
    /// Events applied to the tracker
    pub applied: u64,
    /// Submissions for an ID that was already tracked
    pub duplicates: u64,
    /// Submissions carrying a status other than `Submitted`
    pub rejected: u64,
    /// Updates for an ID that was never submitted
    pub unknown: u64,
}

impl FeedStats {
    /// Total number of events seen
    pub fn total(&self) -> u64 {
        self.applied + self.duplicates + self.rejected + self.unknown
    }
}

/// Create the bounded channel a feed drains
pub fn channel(config: &FeedConfig) -> (mpsc::Sender<OrderEvent>, mpsc::Receiver<OrderEvent>) {
    mpsc::channel(config.channel_capacity.max(1))
}

/// Applies order events to a tracker
pub struct OrderFeed {
    tracker: Arc<OrderTracker>,
    config: FeedConfig,
    stats: FeedStats,
}

impl OrderFeed {
    /// Create a feed over a shared tracker
    pub fn new(tracker: Arc<OrderTracker>, config: FeedConfig) -> Self {
        Self {
            tracker,
            config,
            stats: FeedStats::default(),
        }
    }

    /// Get the tracker this feed writes to
    pub fn tracker(&self) -> &Arc<OrderTracker> {
        &self.tracker
    }

    /// Get the outcome counters so far
    pub fn stats(&self) -> FeedStats {
        self.stats
    }

    /// Apply one event to the tracker
    pub fn apply(&mut self, event: OrderEvent) -> TrackerResult<()> {
        let order_id = event.order_id();

        let result = match event {
            OrderEvent::Submitted(order) => {
                debug!(order_id = %order_id, market = %order.market, side = %order.side, "Order submitted");
                self.tracker.push(order)
            }
            OrderEvent::Updated(order) => {
                debug!(order_id = %order_id, status = %order.status, "Order updated");
                self.tracker.update_order(order)
            }
        };

        match &result {
            Ok(()) => self.stats.applied += 1,
            Err(TrackerError::AlreadyExists(_)) => {
                self.stats.duplicates += 1;
                warn!(order_id = %order_id, "Ignoring duplicate order submission");
            }
            Err(TrackerError::InvalidStatus { status, .. }) => {
                self.stats.rejected += 1;
                warn!(order_id = %order_id, status = %status, "Rejected submission with invalid status");
            }
            Err(TrackerError::OrderNotFound(_)) => {
                self.stats.unknown += 1;
                warn!(order_id = %order_id, "Attempted to update unknown order");
            }
            Err(e) => error!(order_id = %order_id, "Failed to apply order event: {}", e),
        }

        result
    }

    /// Decode a JSON event and apply it
    pub fn apply_json(&mut self, payload: &str) -> TrackerResult<()> {
        let event: OrderEvent = serde_json::from_str(payload).map_err(|e| {
            warn!("Failed to decode order event: {}", e);
            e
        })?;

        self.apply(event)
    }

    /// Drain events until every sender is dropped
    ///
    /// Rejected events are skipped unless `halt_on_error` is set. A poisoned
    /// tracker always stops the feed.
    pub async fn run(mut self, mut rx: mpsc::Receiver<OrderEvent>) -> TrackerResult<FeedStats> {
        info!(
            channel_capacity = self.config.channel_capacity,
            halt_on_error = self.config.halt_on_error,
            "Order feed started"
        );

        while let Some(event) = rx.recv().await {
            if let Err(e) = self.apply(event) {
                if self.config.halt_on_error || !e.is_recoverable() {
                    error!("Order feed halted: {}", e);
                    return Err(e);
                }
            }
        }

        info!(
            applied = self.stats.applied,
            duplicates = self.stats.duplicates,
            rejected = self.stats.rejected,
            unknown = self.stats.unknown,
            "Order feed stopped"
        );

        Ok(self.stats)
    }
}
