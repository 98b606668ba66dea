//! Cache module for storing API responses to disk
//!
//! This module provides a cache manager that persists raw API response bodies
//! to the filesystem under deterministic hierarchical keys, with freshness
//! decided by file age against a configurable TTL in seconds. Stale or
//! unreadable entries are treated as misses so the caller falls back to a
//! live request.

mod manager;

pub use manager::{CacheKey, CacheManager};
