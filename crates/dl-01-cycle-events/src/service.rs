//! # Cycle Events Provider
//!
//! Runs the merged phase schedule on tokio's timer and fans the resulting
//! [`Phase`] events out to subscribers.
//!
//! ## Lifecycle
//!
//! ```text
//! new() ──start()──→ running ──close()──→ closed (terminal)
//!                       │
//!                       └──hash source error──→ terminated (error delivered)
//! ```
//!
//! The first transition fires at the next wall-clock multiple of the cycle
//! duration. Closing drops the event channel, so subscribers drain what was
//! already sent and then observe the end of the stream.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, trace};

use crate::domain::{
    time_until_next_cycle_start, CycleConfiguration, CycleError, CycleSchedule, Phase,
};
use crate::ports::inbound::CycleEventsApi;
use crate::ports::outbound::{DeltaHashSource, TimeSource};
use crate::subscription::{PhaseEvent, PhaseSubscription};

/// Buffered transitions per subscriber before it starts lagging.
const EVENT_CHANNEL_CAPACITY: usize = 64;

type SharedSender = Arc<Mutex<Option<broadcast::Sender<PhaseEvent>>>>;

/// Wall-clock aligned phase scheduler.
pub struct CycleEventsProvider {
    config: CycleConfiguration,
    time_source: Arc<dyn TimeSource>,
    hash_source: Arc<dyn DeltaHashSource>,
    sender: SharedSender,
    cancel_tx: watch::Sender<bool>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl CycleEventsProvider {
    /// Create a provider. Invalid configurations are rejected here, before
    /// anything is scheduled.
    pub fn new(
        config: CycleConfiguration,
        time_source: Arc<dyn TimeSource>,
        hash_source: Arc<dyn DeltaHashSource>,
    ) -> Result<Self, CycleError> {
        config.validate()?;
        let (sender, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (cancel_tx, _) = watch::channel(false);
        Ok(Self {
            config,
            time_source,
            hash_source,
            sender: Arc::new(Mutex::new(Some(sender))),
            cancel_tx,
            task: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &CycleConfiguration {
        &self.config
    }
}

impl CycleEventsApi for CycleEventsProvider {
    fn subscribe(&self) -> PhaseSubscription {
        PhaseSubscription::new(self.sender.lock().as_ref().map(broadcast::Sender::subscribe))
    }

    fn start(&self) -> Result<(), CycleError> {
        if self.is_closed() {
            return Err(CycleError::Closed);
        }
        let mut task = self.task.lock();
        if task.is_some() {
            return Ok(());
        }

        let schedule = ScheduleLoop {
            config: self.config.clone(),
            time_source: Arc::clone(&self.time_source),
            hash_source: Arc::clone(&self.hash_source),
            sender: Arc::clone(&self.sender),
            cancel_rx: self.cancel_tx.subscribe(),
        };
        *task = Some(tokio::spawn(schedule.run()));
        Ok(())
    }

    fn close(&self) {
        if self.cancel_tx.send_replace(true) {
            return;
        }
        self.sender.lock().take();
        info!("Cycle events provider closed");
    }

    fn is_closed(&self) -> bool {
        *self.cancel_tx.borrow() || self.sender.lock().is_none()
    }

    fn time_until_next_cycle_start(&self) -> Duration {
        time_until_next_cycle_start(self.time_source.now_millis(), self.config.cycle_duration())
    }
}

impl Drop for CycleEventsProvider {
    fn drop(&mut self) {
        self.cancel_tx.send_replace(true);
        self.sender.lock().take();
    }
}

/// State moved into the spawned scheduling task.
struct ScheduleLoop {
    config: CycleConfiguration,
    time_source: Arc<dyn TimeSource>,
    hash_source: Arc<dyn DeltaHashSource>,
    sender: SharedSender,
    cancel_rx: watch::Receiver<bool>,
}

impl ScheduleLoop {
    async fn run(mut self) {
        let cycle_duration = self.config.cycle_duration();
        let wait = time_until_next_cycle_start(self.time_source.now_millis(), cycle_duration);
        let origin = tokio::time::Instant::now() + wait;
        info!(
            cycle_ms = cycle_duration.as_millis() as u64,
            wait_ms = wait.as_millis() as u64,
            "Phase schedule aligned to next cycle start"
        );

        for transition in CycleSchedule::new(&self.config) {
            if *self.cancel_rx.borrow() {
                break;
            }
            tokio::select! {
                biased;
                changed = self.cancel_rx.changed() => {
                    if changed.is_err() || *self.cancel_rx.borrow() {
                        break;
                    }
                }
                _ = tokio::time::sleep_until(origin + transition.at) => {}
            }
            if *self.cancel_rx.borrow() {
                break;
            }

            let utc_now = self.time_source.now_millis();
            let event = self
                .hash_source
                .latest_delta_hash(utc_now)
                .map(|hash| Phase::new(hash, transition.name, transition.status, utc_now));

            let Some(sender) = self.sender.lock().clone() else {
                break;
            };
            match event {
                Ok(phase) => {
                    trace!(%phase, cycle = transition.cycle, "Phase transition");
                    if sender.send(Ok(phase)).is_err() {
                        trace!("No phase subscribers");
                    }
                }
                Err(err) => {
                    error!(
                        phase = %transition.name,
                        status = %transition.status,
                        error = %err,
                        "Delta hash source failed, terminating phase stream"
                    );
                    let _ = sender.send(Err(err));
                    break;
                }
            }
        }

        self.sender.lock().take();
        debug!("Phase schedule stopped");
    }
}
