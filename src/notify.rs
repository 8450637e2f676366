//! Toast-style acknowledgements
//!
//! Fire-and-forget: callers never learn whether anybody looked at them.
use crate::auction::Amount;
use crate::locale::Locale;
use parking_lot::Mutex;
use serde::Serialize;
use std::{collections::VecDeque, sync::Arc};
use tracing::{info, warn};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub title: String,
    pub description: String,
    pub kind: NotificationKind,
}

impl Notification {
    fn success(title: &str, description: String) -> Self {
        Self {
            title: title.to_owned(),
            description,
            kind: NotificationKind::Success,
        }
    }

    fn destructive(title: &str, description: String) -> Self {
        Self {
            title: title.to_owned(),
            description,
            kind: NotificationKind::Destructive,
        }
    }

    pub fn bid_accepted(locale: Locale, amount: Amount) -> Self {
        let price = locale.format_price(amount);
        match locale {
            Locale::Ru => Self::success(
                "Ставка принята",
                format!("Ваша ставка {price} успешно размещена"),
            ),
            Locale::En => Self::success("Bid accepted", format!("Your bid of {price} has been placed")),
        }
    }

    pub fn bid_too_low(locale: Locale, minimum: Amount) -> Self {
        let price = locale.format_price(minimum);
        match locale {
            Locale::Ru => Self::destructive("Ошибка", format!("Минимальная ставка: {price}")),
            Locale::En => Self::destructive("Error", format!("Minimum bid: {price}")),
        }
    }

    pub fn auction_closed(locale: Locale) -> Self {
        match locale {
            Locale::Ru => Self::destructive("Ошибка", "Торги по этому лоту завершены".to_owned()),
            Locale::En => Self::destructive("Error", "Bidding on this lot has ended".to_owned()),
        }
    }

    pub fn profile_saved(locale: Locale) -> Self {
        match locale {
            Locale::Ru => Self::success("Профиль обновлён", "Ваши данные успешно сохранены".to_owned()),
            Locale::En => Self::success("Profile updated", "Your details have been saved".to_owned()),
        }
    }

    pub fn preferences_saved(locale: Locale) -> Self {
        match locale {
            Locale::Ru => Self::success(
                "Настройки сохранены",
                "Ваши предпочтения уведомлений обновлены".to_owned(),
            ),
            Locale::En => Self::success(
                "Settings saved",
                "Your notification preferences have been updated".to_owned(),
            ),
        }
    }
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

pub type SharedNotifier = Arc<dyn Notifier + Send + Sync + 'static>;

/// Writes every notification to the log
#[derive(Copy, Clone, Debug, Default)]
pub struct TracingNotifier;

impl TracingNotifier {
    pub fn new_shared() -> SharedNotifier {
        Arc::new(Self)
    }
}

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.kind {
            NotificationKind::Success => {
                info!(title = %notification.title, description = %notification.description, "notification")
            }
            NotificationKind::Destructive => {
                warn!(title = %notification.title, description = %notification.description, "notification")
            }
        }
    }
}

pub const DEFAULT_PENDING_CAPACITY: usize = 100;

/// Keeps the latest notifications until someone drains them
///
/// Holds at most `capacity`; the oldest are dropped first.
#[derive(Debug)]
pub struct InMemoryNotifier {
    pending: Mutex<VecDeque<Notification>>,
    capacity: usize,
}

impl Default for InMemoryNotifier {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PENDING_CAPACITY)
    }
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pending: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    pub fn drain(&self) -> Vec<Notification> {
        self.pending.lock().drain(..).collect()
    }
}

impl Notifier for InMemoryNotifier {
    fn notify(&self, notification: Notification) {
        if self.capacity == 0 {
            return;
        }
        let mut pending = self.pending.lock();
        while self.capacity <= pending.len() {
            pending.pop_front();
        }
        pending.push_back(notification);
    }
}

/// Forwards to every inner notifier
pub struct FanoutNotifier(Vec<SharedNotifier>);

impl FanoutNotifier {
    pub fn new_shared(notifiers: Vec<SharedNotifier>) -> SharedNotifier {
        Arc::new(Self(notifiers))
    }
}

impl Notifier for FanoutNotifier {
    fn notify(&self, notification: Notification) {
        for notifier in &self.0 {
            notifier.notify(notification.clone());
        }
    }
}
