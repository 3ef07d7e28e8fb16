//! Simulated receiver
//!
//! Deterministic stand-in for GNSS hardware: reports out-of-range for a
//! configurable number of cold-start reads, then produces a slow drifting
//! walk around the seed coordinate with a millisecond clock that advances
//! once per sample. Used by the test suites and by the daemon when no real
//! receiver is wired in.

use crate::positioning::{PositionStatus, Positioning, RawDate, RawLocation, RawTime};

const MS_PER_SECOND: u64 = 1_000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: u64 = 24 * MS_PER_HOUR;

/// Deterministic simulated positioning service
pub struct SimulatedPositioning {
    cold_reads: u32,
    samples: u32,
    latitude_udeg: i32,
    longitude_udeg: i32,
    altitude_mm: i32,
    h_accuracy_m: i32,
    v_accuracy_m: i32,
    /// Per-sample drift applied to both angles, in micro-degrees
    drift_udeg: i32,
    /// Milliseconds since local midnight at the simulated epoch
    clock_ms: u64,
    date: RawDate,
}

impl SimulatedPositioning {
    /// Receiver already locked, parked over the San Francisco bay
    pub fn new() -> Self {
        SimulatedPositioning::with_seed(37_556_600, -122_419_400)
    }

    /// Receiver already locked at the given coordinate
    pub fn with_seed(latitude_udeg: i32, longitude_udeg: i32) -> Self {
        SimulatedPositioning {
            cold_reads: 0,
            samples: 0,
            latitude_udeg,
            longitude_udeg,
            altitude_mm: 30_000,
            h_accuracy_m: 5,
            v_accuracy_m: 8,
            drift_udeg: 25,
            clock_ms: 14 * MS_PER_HOUR + 22 * MS_PER_MINUTE + 7 * MS_PER_SECOND + 500,
            date: RawDate {
                year: 2024,
                month: 3,
                day: 5,
            },
        }
    }

    /// Report out-of-range for the first `reads` location queries,
    /// simulating the time to first fix
    pub fn cold_start(mut self, reads: u32) -> Self {
        self.cold_reads = reads;
        self
    }

    fn locked(&self) -> bool {
        self.samples >= self.cold_reads
    }
}

impl Default for SimulatedPositioning {
    fn default() -> Self {
        SimulatedPositioning::new()
    }
}

impl Positioning for SimulatedPositioning {
    fn location_3d(&mut self) -> Result<RawLocation, PositionStatus> {
        self.samples += 1;
        if self.samples <= self.cold_reads {
            return Err(PositionStatus::OutOfRange);
        }

        self.latitude_udeg += self.drift_udeg;
        self.longitude_udeg += self.drift_udeg;
        self.clock_ms = (self.clock_ms + MS_PER_SECOND) % MS_PER_DAY;

        Ok(RawLocation {
            latitude_udeg: self.latitude_udeg,
            longitude_udeg: self.longitude_udeg,
            h_accuracy_m: self.h_accuracy_m,
            altitude_mm: self.altitude_mm,
            v_accuracy_m: self.v_accuracy_m,
        })
    }

    fn time_of_day(&mut self) -> Result<RawTime, PositionStatus> {
        if !self.locked() {
            return Err(PositionStatus::OutOfRange);
        }

        Ok(RawTime {
            hours: (self.clock_ms / MS_PER_HOUR) as u16,
            minutes: ((self.clock_ms % MS_PER_HOUR) / MS_PER_MINUTE) as u16,
            seconds: ((self.clock_ms % MS_PER_MINUTE) / MS_PER_SECOND) as u16,
            milliseconds: (self.clock_ms % MS_PER_SECOND) as u16,
        })
    }

    fn date(&mut self) -> Result<RawDate, PositionStatus> {
        if !self.locked() {
            return Err(PositionStatus::OutOfRange);
        }
        Ok(self.date)
    }
}
