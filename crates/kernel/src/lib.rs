//! Sentiero Kernel Library
//!
//! Menu registry, tree building and visibility rules. The `sentiero`
//! binary is a thin command-line front end over this library.

pub mod cli;
pub mod config;
mod error;
pub mod menu;

pub use config::Config;
pub use error::{MenuError, MenuResult};
