//! Validation of structured text with two automatons: a line-oriented state
//! machine for block-structured configuration and a stack-based structural
//! checker for JSON.

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod fsm;
pub mod json;
mod macros;
pub mod rules;
pub mod types;
