use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Orbit, Rocket};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use std::sync::Mutex;
use std::time::Duration;

use crate::data::SharedManager;

fn run_tick(manager: &SharedManager) {
    match manager.lock() {
        Ok(mut manager) => {
            let fired = manager.check_deadlines();
            if fired > 0 {
                tracing::info!(fired, "deadline reminders fired");
            }
        }
        Err(e) => tracing::error!(error = %e, "deadline check skipped"),
    }
}

/// Periodic deadline scan over the shared manager. Must be stopped on teardown.
pub struct DeadlineMonitor {
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl DeadlineMonitor {
    pub fn start(manager: SharedManager, period: Duration) -> DeadlineMonitor {
        let (shutdown, mut shutdown_rx) = oneshot::channel::<()>();

        let handle = tokio::spawn(async move {
            let mut interval = time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    biased;
                    _ = &mut shutdown_rx => break,
                    _ = interval.tick() => run_tick(&manager),
                }
            }

            tracing::debug!("deadline monitor stopped");
        });

        tracing::debug!(period_ms = period.as_millis() as u64, "deadline monitor started");

        DeadlineMonitor {
            shutdown: Some(shutdown),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        match &self.handle {
            Some(handle) => !handle.is_finished(),
            None => false,
        }
    }

    pub async fn stop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }

        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                tracing::error!(error = %e, "deadline monitor ended abnormally");
            }
        }
    }
}

impl Drop for DeadlineMonitor {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}

/// Runs a `DeadlineMonitor` for as long as the server is up.
pub struct MonitorFairing {
    manager: SharedManager,
    period: Duration,
    running: Mutex<Option<DeadlineMonitor>>,
}

impl MonitorFairing {
    pub fn new(manager: SharedManager, period: Duration) -> MonitorFairing {
        MonitorFairing {
            manager,
            period,
            running: Mutex::new(None),
        }
    }
}

#[rocket::async_trait]
impl Fairing for MonitorFairing {
    fn info(&self) -> Info {
        Info {
            name: "Deadline Monitor",
            kind: Kind::Liftoff | Kind::Shutdown,
        }
    }

    async fn on_liftoff(&self, _rocket: &Rocket<Orbit>) {
        let monitor = DeadlineMonitor::start(self.manager.clone(), self.period);

        match self.running.lock() {
            Ok(mut running) => *running = Some(monitor),
            Err(e) => tracing::error!(error = %e, "could not track deadline monitor"),
        }
    }

    async fn on_shutdown(&self, _rocket: &Rocket<Orbit>) {
        let running = self.running.lock().ok().and_then(|mut running| running.take());

        if let Some(mut monitor) = running {
            tracing::debug!(running = monitor.is_running(), "stopping deadline monitor");
            monitor.stop().await;
        }
    }
}
