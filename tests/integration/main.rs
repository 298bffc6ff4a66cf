//! Integration tests for ag-orders

mod feed_test;
