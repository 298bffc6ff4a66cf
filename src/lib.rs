//! # ag-orders: Order Lifecycle Tracking
//!
//! This library keeps the in-process record of exchange orders from
//! submission until they complete or are cancelled.
//!
//! ## Core Components
//!
//! - **OrderTracker**: Keyed store of orders split into open and completed partitions
//! - **OrderFeed**: Applies submission and status events from the exchange client
//! - **TrackerConfig**: YAML / environment configuration
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use ag_orders::order::{MarketId, Order, OrderId, OrderStatus, Side};
//! use ag_orders::OrderTracker;
//! use chrono::Utc;
//! use rust_decimal::Decimal;
//!
//! let tracker = Arc::new(OrderTracker::new());
//!
//! let order = Order::new(
//!     OrderId::new(1),
//!     MarketId::new("LTC/BTC"),
//!     Side::Buy,
//!     Decimal::new(123456, 3),
//!     Decimal::ONE,
//!     Utc::now(),
//! );
//! tracker.push(order.clone()).unwrap();
//!
//! let mut filled = order;
//! filled.status = OrderStatus::Completed;
//! filled.completed_amount = Decimal::ONE;
//! tracker.update_order(filled).unwrap();
//!
//! let info = tracker.get_order_info(OrderId::new(1)).unwrap();
//! assert!(info.is_terminal());
//! ```

// Public modules
pub mod config;
pub mod error;
pub mod order;

// Re-export main types
pub use config::{FeedConfig, TrackerConfig};
pub use error::{TrackerError, TrackerResult};
pub use order::{MarketId, Order, OrderId, OrderStatus, Side};

// OMS modules
pub mod oms {
    pub mod feed;
    pub mod tracker;

    pub use feed::{FeedStats, OrderEvent, OrderFeed};
    pub use tracker::OrderTracker;
}

pub use oms::{FeedStats, OrderEvent, OrderFeed, OrderTracker};

// Initialize tracing
pub fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();
}
