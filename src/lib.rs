//! awscmd: Schema-driven Command Adapters
//!
//! Maps command invocations onto remote service operations. Each operation is
//! described by a schema; a generic adapter binds command-line parameters,
//! builds a context, projects a null-collapsed request, invokes the service
//! client and selects what to emit.

pub mod adapter;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod schema;
