//! Sample rendering
//!
//! Wire shape, in field order:
//!
//! ```json
//! {"tracker":"<id>","timestamp":"2024-03-05T14:22:07.500Z",
//!  "geo_long":"-122.419400","geo_lat":"37.556600",
//!  "geo_error_radius":"  5.0","geo_method":"B"}
//! ```
//!
//! Angles carry six decimal places, the error radius is rendered right
//! aligned in a five-character field with one decimal place, and the
//! timestamp is zero padded with a literal UTC suffix.

use serde::Serialize;

use trackr_core::{LocationFix, TrackerError, TrackerId, TrackerResult};

/// Constant position-method tag the collector expects
const GEO_METHOD: &str = "B";

/// One sample as the collector receives it
#[derive(Serialize)]
struct SampleRecord<'a> {
    tracker: &'a str,
    timestamp: String,
    geo_long: String,
    geo_lat: String,
    geo_error_radius: String,
    geo_method: &'static str,
}

/// Render one fix into the collector's JSON body
///
/// Pure and deterministic: the same fix and identity always produce the
/// same bytes.
pub fn render_sample(fix: &LocationFix, tracker_id: &TrackerId) -> TrackerResult<String> {
    let record = SampleRecord {
        tracker: tracker_id.as_str(),
        timestamp: render_timestamp(fix),
        geo_long: format!("{:.6}", fix.location.longitude),
        geo_lat: format!("{:.6}", fix.location.latitude),
        geo_error_radius: format!("{:5.1}", fix.location.h_accuracy),
        geo_method: GEO_METHOD,
    };

    serde_json::to_string(&record).map_err(|e| TrackerError::WireEncode(e.to_string()))
}

fn render_timestamp(fix: &LocationFix) -> String {
    format!(
        "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
        fix.date.year,
        fix.date.month,
        fix.date.day,
        fix.time.hours,
        fix.time.minutes,
        fix.time.seconds,
        fix.time.milliseconds,
    )
}
