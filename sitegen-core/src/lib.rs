//! Sitegen Core
//!
//! Core types shared by the sitegen services.
//!
//! This crate contains:
//! - Domain types: persisted entities (Project, Version, HistoryEntry)
//! - DTOs: request/response bodies exchanged between server, client and CLI

pub mod domain;
pub mod dto;
