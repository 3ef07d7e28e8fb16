//! Positioning capability interface
//!
//! The platform service answers three queries: 3D location, time of day,
//! and calendar date. Each can report "out of range" while the receiver
//! has not yet acquired a satellite fix; that state is expected and
//! transient. Every other non-success status is a misconfiguration.

use trackr_core::TrackerError;

/// Raw 3D location reading in receiver units
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawLocation {
    /// Latitude in micro-degrees
    pub latitude_udeg: i32,
    /// Longitude in micro-degrees
    pub longitude_udeg: i32,
    /// Horizontal accuracy in meters
    pub h_accuracy_m: i32,
    /// Altitude in millimeters
    pub altitude_mm: i32,
    /// Vertical accuracy in meters
    pub v_accuracy_m: i32,
}

/// Raw UTC time-of-day reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawTime {
    pub hours: u16,
    pub minutes: u16,
    pub seconds: u16,
    pub milliseconds: u16,
}

/// Raw UTC calendar-date reading
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawDate {
    pub year: u16,
    pub month: u16,
    pub day: u16,
}

/// Non-success status of a positioning query
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionStatus {
    /// No satellite fix yet; the value cannot be produced
    OutOfRange,
    /// Any other platform failure
    Fault(String),
}

impl From<PositionStatus> for TrackerError {
    fn from(status: PositionStatus) -> Self {
        match status {
            PositionStatus::OutOfRange => TrackerError::FixUnavailable,
            PositionStatus::Fault(reason) => TrackerError::FixReadFault(reason),
        }
    }
}

/// Platform positioning service
pub trait Positioning {
    /// Query the current 3D location
    fn location_3d(&mut self) -> Result<RawLocation, PositionStatus>;

    /// Query the UTC time of day of the current fix
    fn time_of_day(&mut self) -> Result<RawTime, PositionStatus>;

    /// Query the UTC calendar date of the current fix
    fn date(&mut self) -> Result<RawDate, PositionStatus>;
}
