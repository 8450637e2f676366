//! Countdown ticker
//!
//! Once per tick, recomputes every lot's time left, stores it in the
//! session for display and publishes the snapshot to any subscriber.
use crate::auction::LotId;
use crate::countdown::{Clock, SharedClock, TimeLeft};
use crate::session::SharedSession;
use anyhow::Result;
use std::collections::BTreeMap;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::trace;

pub const COUNTDOWN_SERVICE_ID: &str = "countdown";

pub type CountdownSnapshot = BTreeMap<LotId, TimeLeft>;

pub struct Countdown {
    session: SharedSession,
    clock: SharedClock,
    period: Duration,
    snapshots: watch::Sender<CountdownSnapshot>,
}

impl Countdown {
    pub fn new(
        session: SharedSession,
        clock: SharedClock,
        period: Duration,
    ) -> (Self, watch::Receiver<CountdownSnapshot>) {
        let (snapshots, rx) = watch::channel(CountdownSnapshot::new());
        (
            Self {
                session,
                clock,
                period,
                snapshots,
            },
            rx,
        )
    }

    pub fn tick(&self) -> CountdownSnapshot {
        let now = self.clock.now();
        let snapshot = self.session.lock().board.refresh_countdowns(now);
        trace!(lots = snapshot.len(), "countdown refreshed");
        self.snapshots.send_replace(snapshot.clone());
        snapshot
    }

    /// Tick forever; the first tick happens one period after start
    pub async fn run(self) -> Result<()> {
        let mut interval = time::interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            self.tick();
        }
    }
}
