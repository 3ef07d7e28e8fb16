//! trackr GNSS - Positioning capability boundary
//!
//! This crate wraps the platform positioning service behind the
//! [`Positioning`] trait, reads raw receiver values through it, and
//! normalizes them into a [`trackr_core::LocationFix`]:
//! - latitude/longitude arrive in micro-degrees
//! - altitude arrives in millimeters
//! - accuracies arrive as integer meters
//!
//! A deterministic simulated receiver is provided for tests and for
//! running the daemon without GNSS hardware.

pub mod positioning;
pub mod reader;
pub mod sim;

pub use positioning::*;
pub use reader::*;
pub use sim::*;
