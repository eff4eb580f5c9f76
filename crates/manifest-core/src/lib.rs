//! Core types and trait definitions for the Manifest passenger store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod filter;
pub mod passenger;
pub mod stats;
pub mod store;

pub use error::{Error, Result};
