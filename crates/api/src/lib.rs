//! HTTP API: the remote document-database service.
//!
//! Exposes the inventory collection over HTTP: document reads/writes,
//! atomic adjustments, full listings, and a Server-Sent-Events stream of
//! collection snapshots.

pub mod app;
