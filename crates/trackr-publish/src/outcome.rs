//! Publish outcome classification

/// Fate of one publish attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PublishOutcome {
    /// Collector accepted the sample (status in [200, 300))
    Success { status: u16 },
    /// Collector answered with any other status; the sample is dropped
    Rejected { status: u16 },
    /// The request never produced a status (DNS, TCP, TLS failure)
    Transport { reason: String },
}

impl PublishOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, PublishOutcome::Success { .. })
    }
}

/// Classify an HTTP status code
pub fn classify_status(status: u16) -> PublishOutcome {
    if (200..300).contains(&status) {
        PublishOutcome::Success { status }
    } else {
        PublishOutcome::Rejected { status }
    }
}

/// Client able to deliver one rendered sample to the collection service
#[allow(async_fn_in_trait)]
pub trait Collector {
    async fn publish(&self, payload: &str) -> PublishOutcome;
}
