//! Countdown projection
//!
//! Turns a lot deadline into the label shown next to it. Nothing here
//! mutates a lot; the ticker in [`crate::service::countdown`] only calls
//! [`time_left`] and stores the result.
use crate::locale::Locale;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::sync::Arc;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeLeft {
    Ended,
    Hours { hours: i64, minutes: i64 },
    Minutes { minutes: i64, seconds: i64 },
    Seconds { seconds: i64 },
}

pub fn time_left(end_time: DateTime<Utc>, now: DateTime<Utc>) -> TimeLeft {
    let diff = end_time - now;
    if diff <= chrono::Duration::zero() {
        return TimeLeft::Ended;
    }

    let total_seconds = diff.num_seconds();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        TimeLeft::Hours { hours, minutes }
    } else if minutes > 0 {
        TimeLeft::Minutes { minutes, seconds }
    } else {
        TimeLeft::Seconds { seconds }
    }
}

impl TimeLeft {
    pub fn has_ended(self) -> bool {
        matches!(self, TimeLeft::Ended)
    }

    pub fn label(self, locale: Locale) -> String {
        use TimeLeft::*;
        match (locale, self) {
            (Locale::Ru, Ended) => "Завершён".to_owned(),
            (Locale::Ru, Hours { hours, minutes }) => format!("{hours}ч {minutes}м"),
            (Locale::Ru, Minutes { minutes, seconds }) => format!("{minutes}м {seconds}с"),
            (Locale::Ru, Seconds { seconds }) => format!("{seconds}с"),
            (Locale::En, Ended) => "ended".to_owned(),
            (Locale::En, Hours { hours, minutes }) => format!("{hours}h {minutes}m"),
            (Locale::En, Minutes { minutes, seconds }) => format!("{minutes}m {seconds}s"),
            (Locale::En, Seconds { seconds }) => format!("{seconds}s"),
        }
    }
}

/// Source of "now" for bid timestamps and countdowns
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

pub type SharedClock = Arc<dyn Clock + Send + Sync + 'static>;

#[derive(Copy, Clone, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new_shared() -> SharedClock {
        Arc::new(Self)
    }
}

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that only moves when told to.
///
/// Useful for unit-tests.
#[derive(Debug)]
pub struct ManualClock(Mutex<DateTime<Utc>>);

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    pub fn new_shared(now: DateTime<Utc>) -> Arc<Self> {
        Arc::new(Self::new(now))
    }

    pub fn advance(&self, by: chrono::Duration) {
        let mut now = self.0.lock();
        *now = *now + by;
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.0.lock() = now;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock()
    }
}
