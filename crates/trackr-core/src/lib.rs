//! trackr Core - Fundamental types and primitives
//!
//! This crate defines the types shared across the tracker:
//! - Tracker identity
//! - The location fix data model (position, time of day, calendar date)
//! - Error taxonomy and result alias
//! - Runtime configuration constants

pub mod config;
pub mod error;
pub mod fix;
pub mod id;

pub use config::*;
pub use error::*;
pub use fix::*;
pub use id::*;
