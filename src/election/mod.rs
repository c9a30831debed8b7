//! Election service with clean module layout.
//!
//! This module provides:
//! - `core`: Election struct and the synchronous admission path
//! - `tasks`: Async simulation orchestration with tokio::spawn
//! - `tests`: Unit tests for the service

pub mod core;
pub mod tasks;

pub use core::Election;
pub use tasks::{collect_metrics, MetricsSummary, RunReport};

#[cfg(test)]
mod tests;
