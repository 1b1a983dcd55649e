//! Miga Core - Shared types library.
//!
//! This crate provides common types used across all Miga components:
//! - `storefront` - Public-facing bakery site
//! - `admin` - Internal administration panel
//! - `cli` - Command-line tools for seeding and management
//!
//! # Architecture
//!
//! The core crate contains only types and state containers - no I/O, no
//! HTTP clients, no session handling. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, roles,
//!   and bakery categories
//! - [`cart`] - The shopping cart state container
//! - [`notify`] - The single-slot toast notification state machine

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod notify;
pub mod types;

pub use cart::{Cart, CartLine, LineKey, Personalization, ProductSnapshot};
pub use notify::{Notification, Notifier, Severity};
pub use types::*;
