//! # Mutiny Common Library
//!
//! Shared code for the Mutiny event scraper including:
//! - Event data model (raw records, catalog events, features)
//! - Sources configuration loading and keyword matching
//! - Error types

pub mod config;
pub mod error;
pub mod model;

pub use error::{Error, Result};
