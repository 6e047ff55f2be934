//! Library crate for userdash.
//!
//! This crate exposes the building blocks of the TUI:
//! - HTTP client and wire types for the user-records service (`api`)
//! - Application state and update loop (`app`)
//! - Command line options and logging setup (`config`)
//! - Error and result types (`error`)
//! - UI rendering and widgets (`ui`)
//!
//! It is used by the `userdash` binary and by tests.
#![doc = include_str!("../README.md")]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod ui;

// Re-export commonly used items at the crate root for convenience
/// Convenient error and result types shared across the crate.
pub use error::{ApiError, Result};
