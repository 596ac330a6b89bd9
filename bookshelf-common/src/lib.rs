//! Shared library for the Bookshelf web application
//!
//! Provides the common error type, configuration resolution, and the
//! database layer (schema initialization and data models) used by the
//! bookshelf-web service.

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
