//! devbench: a bench of small developer utilities.
//!
//! The transforms live in [`tools`] as plain functions; the Yew shell in
//! `main.rs` only wires inputs to them and shows the result or the error.

pub mod config;
pub mod error;
pub mod tools;

pub use error::{Result, Segment, ToolError};
pub use tools::{ToolKind, TOOLS};
