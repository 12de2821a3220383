//! services/api/src/lib.rs
//!
//! Library surface of the `api` service, so the binary and the integration
//! tests build the same application.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
