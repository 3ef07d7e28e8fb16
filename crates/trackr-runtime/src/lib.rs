//! trackr Runtime - The tracker node loop
//!
//! One task consumes tagged events in arrival order:
//! 1. `TickFired` - run a sampling cycle: read fix, gate on connectivity,
//!    render, publish
//! 2. `ConnectivityChanged` - flip the link state; down stops the sampling
//!    scheduler, up restarts it and runs one immediate out-of-band cycle
//! 3. `Shutdown` - stop the scheduler and exit with final stats
//!
//! The publish await happens inline on the consumer task, so nothing else
//! is serviced while a sample is in flight: publishing is deliberately
//! serial, one attempt per cycle, with no overlap.

pub mod connectivity;
pub mod event;
pub mod node;
pub mod scheduler;

pub use connectivity::*;
pub use event::*;
pub use node::*;
pub use scheduler::*;
