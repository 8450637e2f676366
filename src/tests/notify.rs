use crate::{
    auction::Amount,
    locale::Locale,
    notify::{InMemoryNotifier, Notification, Notifier, DEFAULT_PENDING_CAPACITY},
};

fn accepted(amount: Amount) -> Notification {
    Notification::bid_accepted(Locale::En, amount)
}

#[test]
fn undrained_queue_keeps_only_the_latest() {
    let toasts = InMemoryNotifier::with_capacity(3);
    for amount in 1..=5 {
        toasts.notify(accepted(amount));
    }

    assert_eq!(toasts.drain(), vec![accepted(3), accepted(4), accepted(5)]);
    assert!(toasts.drain().is_empty());

    toasts.notify(accepted(6));
    assert_eq!(toasts.drain(), vec![accepted(6)]);
}

#[test]
fn default_capacity_bounds_the_queue() {
    let toasts = InMemoryNotifier::new();
    for amount in 0..(2 * DEFAULT_PENDING_CAPACITY as Amount) {
        toasts.notify(accepted(amount));
    }

    let pending = toasts.drain();
    assert_eq!(pending.len(), DEFAULT_PENDING_CAPACITY);
    assert_eq!(pending[0], accepted(DEFAULT_PENDING_CAPACITY as Amount));
}

#[test]
fn zero_capacity_keeps_nothing() {
    let toasts = InMemoryNotifier::with_capacity(0);
    toasts.notify(accepted(1));
    assert!(toasts.drain().is_empty());
}
