//! Shared types, errors, and configuration for Leasebook.
//!
//! This crate provides common types used across all other crates:
//! - Money formatting with decimal precision
//! - Typed IDs for type-safe entity references
//! - Bearer credential parsing for the request boundary
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod types;

pub use auth::{BearerCredential, Principal};
pub use config::{AppConfig, ReportSettings};
pub use error::{AppError, AppResult};
