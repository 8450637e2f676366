use super::Fixture;
use crate::countdown::TimeLeft;
use crate::service::{countdown::Countdown, ServiceControl};
use anyhow::{format_err, Result};
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn countdown_refreshes_every_tick() -> Result<()> {
    let fx = Fixture::new();
    let session = fx.session();
    let svc_ctl = ServiceControl::new();

    let (countdown, mut snapshots) =
        Countdown::new(session.clone(), fx.clock.clone(), Duration::from_secs(1));
    let handle = svc_ctl.spawn("countdown", countdown.run());

    assert_eq!(session.lock().board.time_left_label(1), "Загрузка...");

    snapshots.changed().await?;
    assert_eq!(snapshots.borrow().len(), 3);
    assert_eq!(
        snapshots.borrow().get(&1).copied(),
        Some(TimeLeft::Hours {
            hours: 2,
            minutes: 0
        })
    );
    assert_eq!(session.lock().board.time_left_label(3), "1ч 0м");

    fx.clock.advance(chrono::Duration::seconds(3600));
    snapshots.changed().await?;
    assert_eq!(snapshots.borrow().get(&3).copied(), Some(TimeLeft::Ended));
    assert_eq!(session.lock().board.time_left_label(3), "Завершён");
    assert_eq!(session.lock().board.time_left_label(1), "1ч 0м");

    svc_ctl.stop_all();
    handle.join().await?;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_cancels_the_ticker() -> Result<()> {
    let fx = Fixture::new();
    let svc_ctl = ServiceControl::new();

    let (countdown, mut snapshots) =
        Countdown::new(fx.session(), fx.clock.clone(), Duration::from_secs(1));
    drop(svc_ctl.spawn("countdown", countdown.run()));

    assert!(snapshots.changed().await.is_err());
    assert!(!svc_ctl.is_stopped());
    Ok(())
}

#[tokio::test]
async fn failing_service_stops_the_others() {
    let svc_ctl = ServiceControl::new();

    let forever = svc_ctl.spawn("forever", async {
        std::future::pending::<()>().await;
        Ok(())
    });
    let failing = svc_ctl.spawn("failing", async { Err(format_err!("boom")) });

    assert!(failing.join().await.is_err());
    assert!(svc_ctl.is_stopped());
    assert!(forever.join().await.is_ok());
}

#[tokio::test]
async fn stopped_resolves_after_stop_all() {
    let svc_ctl = ServiceControl::new();
    let stopped = svc_ctl.stopped();

    svc_ctl.stop_all();
    stopped.await;
    // subscribing late still sees the stop
    svc_ctl.stopped().await;
}
