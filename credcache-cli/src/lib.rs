//! # Credcache CLI Library
//!
//! Command definitions and handlers for the `credcache` command-line tool,
//! which caches login secrets per service and account between invocations.

pub mod cli;
pub mod output;
pub mod prompts;
