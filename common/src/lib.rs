//! Shared modules for the theater analytics API.

pub mod config;
pub mod errors;
pub mod middleware;
pub mod models;
