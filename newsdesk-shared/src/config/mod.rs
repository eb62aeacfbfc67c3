//! # Configuration
//!
//! Resolution of the backend API base URL shared by the web and CLI clients.

pub mod client;

pub use client::{ClientConfig, ConfigError, DEFAULT_API_URL, API_URL_ENV};
