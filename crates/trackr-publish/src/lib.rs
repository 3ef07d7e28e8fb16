//! trackr Publish - Sample delivery to the collection service
//!
//! One rendered sample goes out per publish attempt:
//! 1. Arm the advisory timeout
//! 2. POST the JSON body to the collector endpoint
//! 3. Disarm on return, whatever the outcome
//! 4. Classify: 2xx success, other status rejected, transport failure
//!
//! There is no retry and no queue; a failed attempt is logged and the
//! sample is gone.

pub mod http;
pub mod outcome;
pub mod supervisor;

pub use http::*;
pub use outcome::*;
pub use supervisor::*;
