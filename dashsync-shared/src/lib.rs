#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! Shared building blocks for the DashSync web and terminal clients.

pub mod client;
pub mod config;
pub mod directory;
pub mod guard;
pub mod models;
pub mod session;
pub mod validation;
pub mod workflow;
