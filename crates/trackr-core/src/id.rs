//! Tracker identity
//!
//! Each device carries one fixed identifier, assigned by the collection
//! service when the tracker is provisioned. It never changes at runtime.

use std::fmt;

/// Device identity reported with every sample
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct TrackerId(String);

impl TrackerId {
    pub fn new(id: impl Into<String>) -> Self {
        TrackerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for TrackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tracker({})", self.0)
    }
}

impl fmt::Display for TrackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TrackerId {
    fn from(id: &str) -> Self {
        TrackerId::new(id)
    }
}
