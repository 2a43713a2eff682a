//! Common crate
//!
//! Shared error handling and option helpers for Quarry.
//!
//! # Example
//! ```rust
//! use quarry_common::Error;
//! let err = Error::config("example error");
//! assert_eq!(err.to_string(), "Invalid configuration: example error");
//! ```

pub mod error;
pub mod options;

pub use error::{Error, Result};
pub use options::{OptionReader, Options};
