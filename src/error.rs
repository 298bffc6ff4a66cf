//! Error types for the order tracker

use thiserror::Error;

use crate::order::{OrderId, OrderStatus};

/// Result type for tracker operations
pub type TrackerResult<T> = Result<T, TrackerError>;

/// Order tracker error types
#[derive(Debug, Error)]
pub enum TrackerError {
    /// An order with this ID is already tracked
    #[error("Order already exists: {0}")]
    AlreadyExists(OrderId),

    /// New orders must carry the `Submitted` status
    #[error("Invalid status {status} for new order {order_id}")]
    InvalidStatus {
        /// Order ID
        order_id: OrderId,
        /// Status supplied by the caller
        status: OrderStatus,
    },

    /// Order not found
    #[error("Order not found: {0}")]
    OrderNotFound(OrderId),

    /// A writer panicked while holding the tracker lock
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl TrackerError {
    /// Check if error is due to an unknown order ID
    pub fn is_not_found(&self) -> bool {
        matches!(self, TrackerError::OrderNotFound(_))
    }

    /// Check if error is due to a duplicate push
    pub fn is_duplicate(&self) -> bool {
        matches!(self, TrackerError::AlreadyExists(_))
    }

    /// Check if error is due to a push with a non-submitted status
    pub fn is_invalid_status(&self) -> bool {
        matches!(self, TrackerError::InvalidStatus { .. })
    }

    /// Check if the tracker is still usable after this error
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, TrackerError::LockPoisoned(_))
    }
}
