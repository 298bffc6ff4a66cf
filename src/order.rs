//! Order types and related data structures
//!
//! This module defines the order record produced by the exchange client and
//! stored by the tracker. The tracker never inspects the decimal quantities or
//! timestamps; they are carried and overwritten wholesale.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Exchange-assigned order identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub u64);

impl OrderId {
    /// Create an OrderId from the raw exchange value
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw identifier
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Market identifier, a currency pair such as `LTC/BTC`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarketId(pub String);

impl MarketId {
    /// Create a new MarketId
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the market identifier string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MarketId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    /// Buy order
    Buy,
    /// Sell order
    Sell,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Order lifecycle status
///
/// `Submitted` and `Opened` are open states, `Completed` and `Cancelled` are
/// terminal. `Unset` is the zero value and is never accepted for a new order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// No status was supplied
    #[default]
    Unset,
    /// Order was sent to the exchange
    Submitted,
    /// Order was accepted and rests on the book
    Opened,
    /// Order executed in full
    Completed,
    /// Order was cancelled, possibly after a partial execution
    Cancelled,
}

impl OrderStatus {
    /// Check if the status belongs to the open partition
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Submitted | OrderStatus::Opened)
    }

    /// Check if the status is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Unset => write!(f, "UNSET"),
            OrderStatus::Submitted => write!(f, "SUBMITTED"),
            OrderStatus::Opened => write!(f, "OPENED"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
            OrderStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// Order record as reported by the exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Exchange order identifier
    pub id: OrderId,

    /// Current lifecycle status
    #[serde(default)]
    pub status: OrderStatus,

    /// Currency pair
    pub market: MarketId,

    /// Limit price
    pub price: Decimal,

    /// Requested amount
    pub amount: Decimal,

    /// Order side (buy/sell)
    pub side: Side,

    /// Time the order was sent
    #[serde(default)]
    pub submitted: Option<DateTime<Utc>>,

    /// Time the exchange accepted the order
    #[serde(default)]
    pub accepted: Option<DateTime<Utc>>,

    /// Time the order reached a terminal status
    #[serde(default)]
    pub completed: Option<DateTime<Utc>>,

    /// Fee charged so far
    #[serde(default)]
    pub fee: Decimal,

    /// Executed amount
    #[serde(default)]
    pub completed_amount: Decimal,
}

impl Order {
    /// Create a freshly submitted order
    pub fn new(
        id: OrderId,
        market: MarketId,
        side: Side,
        price: Decimal,
        amount: Decimal,
        submitted: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            status: OrderStatus::Submitted,
            market,
            price,
            amount,
            side,
            submitted: Some(submitted),
            accepted: None,
            completed: None,
            fee: Decimal::ZERO,
            completed_amount: Decimal::ZERO,
        }
    }

    /// Check if order is in an open state
    pub fn is_open(&self) -> bool {
        self.status.is_open()
    }

    /// Check if order is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }
}
