//! notes-server
//!
//! A small HTTP service storing plain-text notes as files in a cache
//! directory. The binary in `main.rs` wires these modules together; they are
//! exposed as a library so tests can run the service in-process.

pub mod cli;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod openapi;
pub mod server;
pub mod store;
