//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store, view and stats calls into use-case level APIs.
//! - Keep UI layers decoupled from storage and computation details.

pub mod journal_service;
