//! trackr Wire - Outbound sample payload
//!
//! Renders one location fix plus the tracker identity into the JSON body
//! the collection service expects. The collector parses the numeric fields
//! as fixed-format strings, so rendering is byte-exact and deterministic.

pub mod sample;

pub use sample::*;
