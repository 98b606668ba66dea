//! hubq library
//!
//! Exposes the API client, cache, config, rendering, and CLI modules for
//! use in integration tests.

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod render;
