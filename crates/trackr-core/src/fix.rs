//! Location fix data model
//!
//! A fix is one GPS-derived reading of position, time of day, and calendar
//! date. Fixes are produced fresh on every successful read and are never
//! cached across sampling cycles.

/// 3D position in normalized units (degrees and meters)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location3d {
    /// Latitude in degrees, positive north
    pub latitude: f64,
    /// Longitude in degrees, positive east
    pub longitude: f64,
    /// Horizontal accuracy in meters
    pub h_accuracy: f64,
    /// Altitude above sea level in meters
    pub altitude: f64,
    /// Vertical accuracy in meters
    pub v_accuracy: f64,
}

/// UTC time of day as reported by the receiver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeOfDay {
    pub hours: u16,
    pub minutes: u16,
    pub seconds: u16,
    pub milliseconds: u16,
}

/// UTC calendar date as reported by the receiver
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CalendarDate {
    pub year: u16,
    pub month: u16,
    pub day: u16,
}

/// One complete location fix
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocationFix {
    pub location: Location3d,
    pub time: TimeOfDay,
    pub date: CalendarDate,
}
