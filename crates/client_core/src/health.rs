//! Background liveness polling for the processing backend.

use std::{sync::Arc, time::Duration};

use tokio::{
    sync::{mpsc, oneshot, watch},
    task::JoinHandle,
    time::MissedTickBehavior,
};
use tracing::{debug, info};

use crate::{probe, BackendApi, BackendStatus};

pub struct HealthMonitor;

impl HealthMonitor {
    /// Spawns the polling task on the current tokio runtime. Subscribers are
    /// only notified when the status actually changes. The first probe
    /// runs immediately, then once per `interval`. A manual
    /// [`HealthMonitorHandle::check_now`] probes right away, restarts the
    /// interval and always reports its outcome to the caller.
    pub fn spawn(api: Arc<dyn BackendApi>, interval: Duration) -> HealthMonitorHandle {
        let (status_tx, status_rx) = watch::channel(BackendStatus::Checking);
        let (manual_tx, mut manual_rx) = mpsc::unbounded_channel::<oneshot::Sender<BackendStatus>>();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                let reply = tokio::select! {
                    _ = ticker.tick() => None,
                    Some(reply) = manual_rx.recv() => {
                        ticker.reset();
                        Some(reply)
                    }
                };

                let status = probe(api.as_ref()).await;
                let changed = status_tx.send_if_modified(|current| {
                    if *current == status {
                        return false;
                    }
                    info!(
                        from = current.label(),
                        to = status.label(),
                        "backend status changed"
                    );
                    *current = status;
                    true
                });
                if !changed {
                    debug!(status = status.label(), "backend status unchanged");
                }
                if let Some(reply) = reply {
                    let _ = reply.send(status);
                }
                if status_tx.is_closed() {
                    break;
                }
            }
        });

        HealthMonitorHandle {
            manual: manual_tx,
            status: status_rx,
            task,
        }
    }
}

/// Owns the polling task; dropping the handle stops polling.
pub struct HealthMonitorHandle {
    manual: mpsc::UnboundedSender<oneshot::Sender<BackendStatus>>,
    status: watch::Receiver<BackendStatus>,
    task: JoinHandle<()>,
}

impl HealthMonitorHandle {
    /// Requests an immediate probe. The receiver resolves with the probed
    /// status, changed or not, and errors if the monitor has stopped.
    pub fn check_now(&self) -> oneshot::Receiver<BackendStatus> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let _ = self.manual.send(reply_tx);
        reply_rx
    }

    pub fn status(&self) -> BackendStatus {
        *self.status.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<BackendStatus> {
        self.status.clone()
    }
}

impl Drop for HealthMonitorHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

#[cfg(test)]
#[path = "tests/health_tests.rs"]
mod tests;
