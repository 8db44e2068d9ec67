//! HTTP transport implementation
//!
//! The default terminal transport, built on reqwest.

pub mod client;

pub use client::{HttpTransport, HttpTransportConfig};
