//! HTTP middleware for request processing and protection.
//!
//! Provides Bearer token authentication and observability middleware.

pub mod auth;
pub mod tracing;
