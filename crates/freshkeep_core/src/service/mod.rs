//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate domain operations, persistence and reminder requests.
//! - Keep FFI/CLI layers decoupled from storage details.

pub mod pantry_service;
