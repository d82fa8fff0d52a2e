//! Integration Tests Module
//!
//! End-to-end coverage for the notifier: the inputs → embed → fit → payload
//! pipeline, and concurrent webhook delivery against mock HTTP endpoints.


// Full payload pipeline tests
mod payload_test;
