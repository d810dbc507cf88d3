//! CLI library modules for the corefmd binary.
//!
//! Commands return `Result<(), String>`; the binary prints the message
//! and exits non-zero.

pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
