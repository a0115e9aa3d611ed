//! # Configuration
//!
//! Settings shared by every DashSync front end. The web client fills them
//! at compile time; the terminal client loads them from a file and the
//! environment.

pub mod client;

pub use client::{ClientConfig, ConfigError};
