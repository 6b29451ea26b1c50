//! Core use-case services.
//!
//! # Responsibility
//! - Compose the pure task-list operations with the persistence gateway.
//! - Keep UI layers decoupled from storage details.

pub mod task_service;
