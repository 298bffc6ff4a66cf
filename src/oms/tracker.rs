//! Order Management System - Order tracking
//!
//! Orders live in one of two partitions: `opened` for `Submitted`/`Opened`
//! orders and `completed` for `Completed`/`Cancelled` ones. An index records
//! which partition holds each ID so lookups never scan both maps. All three
//! maps sit behind a single lock and change together.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::TrackerConfig;
use crate::error::{TrackerError, TrackerResult};
use crate::order::{Order, OrderId, OrderStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Partition {
    Opened,
    Completed,
}

#[derive(Debug, Default)]
struct Book {
    opened: HashMap<OrderId, Order>,
    completed: HashMap<OrderId, Order>,
    index: HashMap<OrderId, Partition>,
}

impl Book {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            opened: HashMap::with_capacity(capacity),
            completed: HashMap::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    fn get(&self, order_id: &OrderId) -> Option<&Order> {
        match self.index.get(order_id)? {
            Partition::Opened => self.opened.get(order_id),
            Partition::Completed => self.completed.get(order_id),
        }
    }
}

/// Order tracker for managing order lifecycle
///
/// Safe to share between the submission path, the status-update path and
/// readers through an `Arc`. Every operation is a short critical section
/// over in-memory maps; none of them block on I/O.
#[derive(Debug)]
pub struct OrderTracker {
    book: RwLock<Book>,
}

impl OrderTracker {
    /// Create a new order tracker
    pub fn new() -> Self {
        Self {
            book: RwLock::new(Book::default()),
        }
    }

    /// Create a tracker with room for `capacity` orders per partition
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            book: RwLock::new(Book::with_capacity(capacity)),
        }
    }

    /// Create a tracker sized from configuration
    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::with_capacity(config.initial_capacity)
    }

    fn read(&self) -> TrackerResult<RwLockReadGuard<'_, Book>> {
        self.book.read().map_err(|e| {
            TrackerError::LockPoisoned(format!("Failed to acquire read lock: {}", e))
        })
    }

    fn write(&self) -> TrackerResult<RwLockWriteGuard<'_, Book>> {
        self.book.write().map_err(|e| {
            TrackerError::LockPoisoned(format!("Failed to acquire write lock: {}", e))
        })
    }

    /// Track a newly submitted order
    ///
    /// Fails with [`TrackerError::AlreadyExists`] if the ID is already known,
    /// in either partition, and with [`TrackerError::InvalidStatus`] if the
    /// order is not `Submitted`. The store is untouched on failure.
    pub fn push(&self, order: Order) -> TrackerResult<()> {
        let mut book = self.write()?;

        if book.index.contains_key(&order.id) {
            return Err(TrackerError::AlreadyExists(order.id));
        }

        if order.status != OrderStatus::Submitted {
            return Err(TrackerError::InvalidStatus {
                order_id: order.id,
                status: order.status,
            });
        }

        book.index.insert(order.id, Partition::Opened);
        book.opened.insert(order.id, order);
        Ok(())
    }

    /// Replace a tracked order with `update`
    ///
    /// The whole record is overwritten. An open order whose new status is
    /// terminal moves to the completed partition; completed orders are
    /// never moved back, whatever status the update carries.
    pub fn update_order(&self, update: Order) -> TrackerResult<()> {
        let mut book = self.write()?;
        let order_id = update.id;

        let partition = *book
            .index
            .get(&order_id)
            .ok_or_else(|| TrackerError::OrderNotFound(order_id))?;

        match partition {
            Partition::Opened if update.status.is_terminal() => {
                book.opened.remove(&order_id);
                book.completed.insert(order_id, update);
                book.index.insert(order_id, Partition::Completed);
            }
            Partition::Opened => {
                book.opened.insert(order_id, update);
            }
            Partition::Completed => {
                book.completed.insert(order_id, update);
            }
        }

        Ok(())
    }

    /// Get a copy of an order by ID
    pub fn get_order_info(&self, order_id: OrderId) -> TrackerResult<Order> {
        let book = self.read()?;

        book.get(&order_id)
            .cloned()
            .ok_or_else(|| TrackerError::OrderNotFound(order_id))
    }

    /// Check whether an order ID is tracked
    pub fn contains(&self, order_id: OrderId) -> TrackerResult<bool> {
        let book = self.read()?;
        Ok(book.index.contains_key(&order_id))
    }

    /// Get orders in the open partition, ordered by ID
    pub fn open_orders(&self) -> TrackerResult<Vec<Order>> {
        let book = self.read()?;

        let mut orders: Vec<Order> = book.opened.values().cloned().collect();
        orders.sort_by_key(|o| o.id);
        Ok(orders)
    }

    /// Get orders in the completed partition, ordered by ID
    pub fn completed_orders(&self) -> TrackerResult<Vec<Order>> {
        let book = self.read()?;

        let mut orders: Vec<Order> = book.completed.values().cloned().collect();
        orders.sort_by_key(|o| o.id);
        Ok(orders)
    }

    /// Number of open orders
    pub fn open_count(&self) -> TrackerResult<usize> {
        Ok(self.read()?.opened.len())
    }

    /// Number of completed orders
    pub fn completed_count(&self) -> TrackerResult<usize> {
        Ok(self.read()?.completed.len())
    }

    /// Get order count across both partitions
    pub fn len(&self) -> TrackerResult<usize> {
        Ok(self.read()?.index.len())
    }

    /// Check whether no order has been tracked yet
    pub fn is_empty(&self) -> TrackerResult<bool> {
        Ok(self.read()?.index.is_empty())
    }

    /// Poison the lock by panicking while holding the write guard
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        std::thread::scope(|s| {
            let writer = s.spawn(|| {
                let _book = self.book.write();
                panic!("writer panicked while holding the book");
            });
            assert!(writer.join().is_err());
        });
    }
}

impl Default for OrderTracker {
    fn default() -> Self {
        Self::new()
    }
}
