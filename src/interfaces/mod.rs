//! Inbound adapters: the CSV preview reader and, with the `server` feature, the
//! HTTP API.

pub mod csv;
#[cfg(feature = "server")]
pub mod http;
