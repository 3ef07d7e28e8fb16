//! Tracker node - the event loop

use tokio::sync::mpsc;

use trackr_core::{LocationFix, TrackerConfig, TrackerError, TrackerId, TrackerResult};
use trackr_gnss::{FixReader, Positioning};
use trackr_publish::{Collector, PublishOutcome};
use trackr_wire::render_sample;

use crate::event::TrackerEvent;
use crate::scheduler::SampleScheduler;

/// Counters maintained across the node's lifetime
#[derive(Clone, Copy, Debug, Default)]
pub struct TrackerStats {
    pub ticks: u64,
    pub fixes_read: u64,
    pub fixes_unavailable: u64,
    pub published: u64,
    pub discarded_disconnected: u64,
    pub rejected: u64,
    pub transport_errors: u64,
}

/// The tracker node: owns the fix reader, the collector client, the link
/// state, and the sampling scheduler
pub struct TrackerNode<P, C> {
    reader: FixReader<P>,
    collector: C,
    tracker_id: TrackerId,
    connected: bool,
    scheduler: SampleScheduler,
    events: mpsc::Receiver<TrackerEvent>,
    stats: TrackerStats,
}

impl<P: Positioning, C: Collector> TrackerNode<P, C> {
    /// Build a node and hand back the sender side of its event channel
    pub fn new(
        config: &TrackerConfig,
        positioning: P,
        collector: C,
    ) -> TrackerResult<(Self, mpsc::Sender<TrackerEvent>)> {
        config.validate()?;

        let (tx, rx) = mpsc::channel(config.event_buffer);
        let node = TrackerNode {
            reader: FixReader::new(positioning),
            collector,
            tracker_id: config.tracker_id.clone(),
            connected: false,
            scheduler: SampleScheduler::new(config.sample_interval, tx.clone()),
            events: rx,
            stats: TrackerStats::default(),
        };
        Ok((node, tx))
    }

    /// Consume events until `Shutdown` or until every sender is gone
    ///
    /// A positioning fault ends the loop with an error; everything else is
    /// logged and the loop keeps going.
    pub async fn run(mut self) -> TrackerResult<TrackerStats> {
        while let Some(event) = self.events.recv().await {
            match event {
                TrackerEvent::TickFired => {
                    self.stats.ticks += 1;
                    self.run_cycle().await?;
                }
                TrackerEvent::ConnectivityChanged {
                    interface,
                    connected,
                } => {
                    self.on_connectivity(&interface, connected).await?;
                }
                TrackerEvent::Shutdown => {
                    tracing::info!("shutdown requested");
                    break;
                }
            }
        }

        self.scheduler.stop();
        Ok(self.stats)
    }

    async fn on_connectivity(&mut self, interface: &str, connected: bool) -> TrackerResult<()> {
        if connected == self.connected {
            tracing::debug!("{}: state unchanged", interface);
            return Ok(());
        }

        self.connected = connected;
        if connected {
            tracing::info!("{} up; sampling started", interface);
            self.scheduler.start();
            // Reconnection does not wait for the next natural tick
            self.run_cycle().await?;
        } else {
            tracing::info!("{} down; sampling stopped", interface);
            self.scheduler.stop();
        }
        Ok(())
    }

    /// One sampling cycle: read, gate, render, publish
    async fn run_cycle(&mut self) -> TrackerResult<()> {
        let fix = match self.reader.read_fix() {
            Ok(fix) => {
                self.stats.fixes_read += 1;
                fix
            }
            Err(TrackerError::FixUnavailable) => {
                self.stats.fixes_unavailable += 1;
                tracing::warn!("no GPS fix this cycle");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        if !self.connected {
            self.stats.discarded_disconnected += 1;
            tracing::warn!("link down; sample discarded");
            return Ok(());
        }

        self.publish_fix(&fix).await
    }

    async fn publish_fix(&mut self, fix: &LocationFix) -> TrackerResult<()> {
        let payload = render_sample(fix, &self.tracker_id)?;
        tracing::debug!("publishing sample: {}", payload);

        match self.collector.publish(&payload).await {
            PublishOutcome::Success { status } => {
                self.stats.published += 1;
                tracing::info!("sample accepted: {}", status);
            }
            PublishOutcome::Rejected { status } => {
                self.stats.rejected += 1;
                tracing::warn!("collector rejected sample: {}", status);
            }
            PublishOutcome::Transport { .. } => {
                // Reason already logged by the publisher
                self.stats.transport_errors += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    use trackr_gnss::{PositionStatus, RawDate, RawLocation, RawTime, SimulatedPositioning};
    use trackr_publish::classify_status;

    use super::*;

    /// Collector that records every payload it is handed
    #[derive(Clone)]
    struct CountingCollector {
        attempts: Arc<AtomicUsize>,
        status: u16,
    }

    impl CountingCollector {
        fn accepting() -> Self {
            CountingCollector {
                attempts: Arc::new(AtomicUsize::new(0)),
                status: 204,
            }
        }

        fn rejecting(status: u16) -> Self {
            CountingCollector {
                attempts: Arc::new(AtomicUsize::new(0)),
                status,
            }
        }

        fn attempts(&self) -> usize {
            self.attempts.load(Ordering::SeqCst)
        }
    }

    impl Collector for CountingCollector {
        async fn publish(&self, _payload: &str) -> PublishOutcome {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            classify_status(self.status)
        }
    }

    /// Positioning service that always faults
    struct BrokenPositioning;

    impl Positioning for BrokenPositioning {
        fn location_3d(&mut self) -> Result<RawLocation, PositionStatus> {
            Err(PositionStatus::Fault("positioning service unbound".to_string()))
        }

        fn time_of_day(&mut self) -> Result<RawTime, PositionStatus> {
            Err(PositionStatus::Fault("positioning service unbound".to_string()))
        }

        fn date(&mut self) -> Result<RawDate, PositionStatus> {
            Err(PositionStatus::Fault("positioning service unbound".to_string()))
        }
    }

    /// Config with an interval long enough that no natural tick can fire
    /// during a test
    fn quiet_config() -> TrackerConfig {
        TrackerConfig {
            sample_interval: Duration::from_secs(600),
            ..TrackerConfig::default()
        }
    }

    #[tokio::test]
    async fn test_no_publish_while_disconnected() {
        let collector = CountingCollector::accepting();
        let (node, tx) =
            TrackerNode::new(&quiet_config(), SimulatedPositioning::new(), collector.clone())
                .unwrap();

        for _ in 0..3 {
            tx.send(TrackerEvent::TickFired).await.unwrap();
        }
        tx.send(TrackerEvent::Shutdown).await.unwrap();

        let stats = node.run().await.unwrap();
        assert_eq!(collector.attempts(), 0);
        assert_eq!(stats.fixes_read, 3);
        assert_eq!(stats.discarded_disconnected, 3);
        assert_eq!(stats.published, 0);
    }

    #[tokio::test]
    async fn test_one_publish_per_tick_when_connected() {
        let collector = CountingCollector::accepting();
        let (node, tx) =
            TrackerNode::new(&quiet_config(), SimulatedPositioning::new(), collector.clone())
                .unwrap();

        tx.send(TrackerEvent::ConnectivityChanged {
            interface: "rmnet0".to_string(),
            connected: true,
        })
        .await
        .unwrap();
        for _ in 0..2 {
            tx.send(TrackerEvent::TickFired).await.unwrap();
        }
        tx.send(TrackerEvent::Shutdown).await.unwrap();

        let stats = node.run().await.unwrap();
        // One out-of-band cycle on connect plus one per tick
        assert_eq!(collector.attempts(), 3);
        assert_eq!(stats.published, 3);
        assert_eq!(stats.ticks, 2);
        assert_eq!(stats.discarded_disconnected, 0);
    }

    #[tokio::test]
    async fn test_duplicate_up_reports_do_not_double_sample() {
        let collector = CountingCollector::accepting();
        let (node, tx) =
            TrackerNode::new(&quiet_config(), SimulatedPositioning::new(), collector.clone())
                .unwrap();

        for _ in 0..2 {
            tx.send(TrackerEvent::ConnectivityChanged {
                interface: "rmnet0".to_string(),
                connected: true,
            })
            .await
            .unwrap();
        }
        tx.send(TrackerEvent::Shutdown).await.unwrap();

        let stats = node.run().await.unwrap();
        assert_eq!(stats.published, 1);
    }

    #[tokio::test]
    async fn test_unavailable_fix_skips_the_cycle() {
        let collector = CountingCollector::accepting();
        let positioning = SimulatedPositioning::new().cold_start(100);
        let (node, tx) = TrackerNode::new(&quiet_config(), positioning, collector.clone()).unwrap();

        tx.send(TrackerEvent::ConnectivityChanged {
            interface: "rmnet0".to_string(),
            connected: true,
        })
        .await
        .unwrap();
        for _ in 0..2 {
            tx.send(TrackerEvent::TickFired).await.unwrap();
        }
        tx.send(TrackerEvent::Shutdown).await.unwrap();

        let stats = node.run().await.unwrap();
        assert_eq!(collector.attempts(), 0);
        assert_eq!(stats.fixes_unavailable, 3);
        assert_eq!(stats.published, 0);
    }

    #[tokio::test]
    async fn test_rejected_samples_are_counted_not_retried() {
        let collector = CountingCollector::rejecting(503);
        let (node, tx) =
            TrackerNode::new(&quiet_config(), SimulatedPositioning::new(), collector.clone())
                .unwrap();

        tx.send(TrackerEvent::ConnectivityChanged {
            interface: "rmnet0".to_string(),
            connected: true,
        })
        .await
        .unwrap();
        tx.send(TrackerEvent::Shutdown).await.unwrap();

        let stats = node.run().await.unwrap();
        assert_eq!(collector.attempts(), 1);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.published, 0);
    }

    #[tokio::test]
    async fn test_positioning_fault_stops_the_node() {
        let collector = CountingCollector::accepting();
        let (node, tx) =
            TrackerNode::new(&quiet_config(), BrokenPositioning, collector.clone()).unwrap();

        tx.send(TrackerEvent::TickFired).await.unwrap();

        let err = node.run().await.unwrap_err();
        assert!(matches!(err, TrackerError::FixReadFault(_)));
        assert_eq!(collector.attempts(), 0);
    }

    #[tokio::test]
    async fn test_disconnect_stops_the_sampling_timer() {
        let collector = CountingCollector::accepting();
        let config = TrackerConfig {
            sample_interval: Duration::from_millis(20),
            ..TrackerConfig::default()
        };
        let (node, tx) =
            TrackerNode::new(&config, SimulatedPositioning::new(), collector.clone()).unwrap();

        let driver_collector = collector.clone();
        let driver = async move {
            tx.send(TrackerEvent::ConnectivityChanged {
                interface: "rmnet0".to_string(),
                connected: true,
            })
            .await
            .unwrap();

            // Let a few natural ticks land
            tokio::time::sleep(Duration::from_millis(90)).await;
            tx.send(TrackerEvent::ConnectivityChanged {
                interface: "rmnet0".to_string(),
                connected: false,
            })
            .await
            .unwrap();

            // Give queued ticks time to drain, then verify silence
            tokio::time::sleep(Duration::from_millis(50)).await;
            let settled = driver_collector.attempts();
            tokio::time::sleep(Duration::from_millis(100)).await;
            assert_eq!(driver_collector.attempts(), settled);

            // Recovery restarts sampling with one immediate cycle
            tx.send(TrackerEvent::ConnectivityChanged {
                interface: "rmnet0".to_string(),
                connected: true,
            })
            .await
            .unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
            assert!(driver_collector.attempts() > settled);

            tx.send(TrackerEvent::Shutdown).await.unwrap();
        };

        let (result, ()) = tokio::join!(node.run(), driver);
        let stats = result.unwrap();
        // Out-of-band cycle plus at least two natural ticks before the cut
        assert!(stats.published >= 3);
    }
}
