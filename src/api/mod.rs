//! GitHub REST API client
//!
//! This module decides between serving a cached response and performing a
//! live authenticated request, normalizes response bodies, and applies a
//! soft-fail policy: request failures are reported as diagnostics and
//! resolve to an empty body instead of aborting the invocation.

mod body;
mod client;

pub use client::{normalize_endpoint, ApiClient, ApiError, ApiResult};
