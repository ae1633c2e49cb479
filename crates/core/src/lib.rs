//! Kitchen Core - Shared types library.
//!
//! This crate provides common types used across all kitchen components:
//! - `accounts` - Account lifecycle, authentication and administration
//! - `cli` - Command-line front end for account management
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage, no mail
//! delivery. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for emails, roles, one-time tokens, IDs and prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
