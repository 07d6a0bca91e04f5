//! Voidwear Core - Shared types library.
//!
//! This crate provides common types used across all Voidwear components:
//! - `storefront` - Public-facing e-commerce site
//! - `admin` - Internal back-office panel
//! - `cli` - Command-line tools for migrations and management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP
//! clients. All commerce data lives behind the Voidwear REST API; this crate
//! gives the binaries a shared, type-safe vocabulary for talking about it.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, money, emails, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
