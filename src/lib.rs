pub mod api;
pub mod client;
pub mod config;
pub(crate) mod error;
pub mod mcp;
pub mod tools;

pub use client::DreamshotClient;
pub use error::{DreamshotError, Result};
pub use mcp::DreamshotServer;
