mod auction;
mod board;
mod catalog;
mod config;
mod countdown;
mod fixtures;
mod ledger;
mod locale;
mod notify;
mod profile;
mod service;
mod session;

use anyhow::{Context, Result};
use countdown::Clock;
use notify::SharedNotifier;
use tracing::info;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = config::Config::load()?;

    // one session, one thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    runtime.block_on(run(config))
}

async fn run(config: config::Config) -> Result<()> {
    let clock = countdown::SystemClock::new_shared();
    let toasts = notify::InMemoryNotifier::new_shared();
    let notifier = notify::FanoutNotifier::new_shared(vec![
        notify::TracingNotifier::new_shared(),
        toasts.clone() as SharedNotifier,
    ]);

    let settings = board::BoardSettings {
        locale: config.locale,
        accept_bids_after_end: config.accept_bids_after_end,
    };
    let lots = fixtures::seed_lots(config.lots, clock.now()).context("invalid seed lots")?;
    info!(lots = lots.len(), locale = ?settings.locale, "seeding session");
    let session =
        session::Session::new_shared(lots, config.catalog, settings, clock.clone(), notifier)?;

    let svc_ctl = service::ServiceControl::new();

    ctrlc::set_handler({
        let svc_ctl = svc_ctl.clone();
        move || {
            eprintln!("Stopping all services...");
            svc_ctl.stop_all();
        }
    })?;

    let (countdown, snapshots) =
        service::countdown::Countdown::new(session.clone(), clock, config.tick_interval);

    for handle in vec![
        svc_ctl.spawn(service::countdown::COUNTDOWN_SERVICE_ID, countdown.run()),
        svc_ctl.spawn(
            service::ui::UI_SERVICE_ID,
            service::ui::serve(
                config.listen,
                service::ui::UiState::new(session, toasts, snapshots),
                svc_ctl.stopped(),
            ),
        ),
    ] {
        handle.join().await?
    }

    Ok(())
}

#[cfg(test)]
mod tests;
