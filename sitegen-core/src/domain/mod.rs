//! Core domain types
//!
//! These types mirror the rows kept by the server's persistence layer and are
//! returned as-is by the read endpoints. The server owns their lifecycle; the
//! client and CLI only ever read them.

pub mod history;
pub mod project;
pub mod version;
