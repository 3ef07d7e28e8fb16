//! Fix reader
//!
//! Reads location, time, and date from the positioning service, in that
//! order, and normalizes the raw units. The first out-of-range answer wins:
//! no partial fix is ever produced.

use trackr_core::{CalendarDate, Location3d, LocationFix, TimeOfDay, TrackerResult};

use crate::positioning::{PositionStatus, Positioning};

/// Scale from micro-degrees to degrees
const MICRO_DEGREES: f64 = 1_000_000.0;

/// Scale from millimeters to meters
const MILLIMETERS: f64 = 1_000.0;

/// Reads normalized fixes from a positioning service
pub struct FixReader<P> {
    positioning: P,
}

impl<P: Positioning> FixReader<P> {
    pub fn new(positioning: P) -> Self {
        FixReader { positioning }
    }

    /// Read one fix
    ///
    /// Fails with [`trackr_core::TrackerError::FixUnavailable`] while the
    /// receiver has no satellite lock; callers treat that as a skipped
    /// sample, not a fault.
    pub fn read_fix(&mut self) -> TrackerResult<LocationFix> {
        let raw_location = self.positioning.location_3d().map_err(|status| {
            self.note_out_of_range(&status);
            status
        })?;

        let raw_time = self.positioning.time_of_day().map_err(|status| {
            self.note_out_of_range(&status);
            status
        })?;

        let raw_date = self.positioning.date().map_err(|status| {
            self.note_out_of_range(&status);
            status
        })?;

        Ok(LocationFix {
            location: Location3d {
                latitude: raw_location.latitude_udeg as f64 / MICRO_DEGREES,
                longitude: raw_location.longitude_udeg as f64 / MICRO_DEGREES,
                h_accuracy: raw_location.h_accuracy_m as f64,
                altitude: raw_location.altitude_mm as f64 / MILLIMETERS,
                v_accuracy: raw_location.v_accuracy_m as f64,
            },
            time: TimeOfDay {
                hours: raw_time.hours,
                minutes: raw_time.minutes,
                seconds: raw_time.seconds,
                milliseconds: raw_time.milliseconds,
            },
            date: CalendarDate {
                year: raw_date.year,
                month: raw_date.month,
                day: raw_date.day,
            },
        })
    }

    fn note_out_of_range(&self, status: &PositionStatus) {
        if *status == PositionStatus::OutOfRange {
            tracing::debug!("GPS fix not available");
        }
    }
}
