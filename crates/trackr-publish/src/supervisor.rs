//! Advisory timeout supervision
//!
//! The watchdog is armed immediately before the HTTP call and disarmed by
//! dropping the guard when the call returns. On expiry it only logs: the
//! in-flight request is awaited inline by the node loop and cannot be
//! aborted from here. At most one watchdog is armed at a time since
//! publishes are issued one at a time by a single consumer.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Arms one advisory watchdog per publish attempt
pub struct TimeoutSupervisor {
    duration: Duration,
}

impl TimeoutSupervisor {
    pub fn new(duration: Duration) -> Self {
        TimeoutSupervisor { duration }
    }

    /// Arm the watchdog for one attempt against `endpoint`
    pub fn arm(&self, endpoint: &str) -> ArmedTimeout {
        let duration = self.duration;
        let endpoint = endpoint.to_string();
        arm_with(duration, move || {
            tracing::warn!(
                "could not reach {} within {:?}; publish still in flight",
                endpoint,
                duration
            );
        })
    }
}

/// Armed watchdog; dropping it disarms
pub struct ArmedTimeout {
    task: JoinHandle<()>,
}

impl Drop for ArmedTimeout {
    fn drop(&mut self) {
        self.task.abort();
    }
}

fn arm_with(duration: Duration, on_expiry: impl FnOnce() + Send + 'static) -> ArmedTimeout {
    let task = tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        on_expiry();
    });
    ArmedTimeout { task }
}
