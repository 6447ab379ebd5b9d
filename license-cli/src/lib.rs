//! Microsoft 365 license administration over the Graph API.
//!
//! Exposed as a library so integration tests can drive the client and
//! services directly; the `license-cli` binary is a thin wrapper.

pub mod api;
pub mod cli;
pub mod config;
pub mod services;
