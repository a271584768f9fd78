//! Data Transfer Objects
//!
//! Bodies exchanged over the HTTP API. Field names follow the wire format the
//! dashboard already speaks (camelCase, with the Portuguese names kept for the
//! staged outputs).

pub mod error;
pub mod generate;
