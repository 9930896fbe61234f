//! Core business logic for Leasebook.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Domain types, report semantics and document rendering live here.
//!
//! # Modules
//!
//! - `lease` - Customers, payments and the profit formulas
//! - `filter` - Report filters parsed from request parameters
//! - `reports` - Report types, the `ReportStore` seam and its in-memory store
//! - `export` - Spreadsheet and PDF rendering

pub mod export;
pub mod filter;
pub mod lease;
pub mod reports;
