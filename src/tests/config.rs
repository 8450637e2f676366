use super::started_at;
use crate::config::{Arguments, Config, FileConfig};
use crate::fixtures::seed_lots;
use crate::locale::Locale;
use anyhow::Result;
use chrono::Duration;
use std::{net::SocketAddr, time::Duration as StdDuration};

#[test]
fn defaults_without_file_or_flags() -> Result<()> {
    let config = Config::merge(Arguments::default(), FileConfig::default())?;

    assert_eq!(config.listen, "127.0.0.1:3000".parse::<SocketAddr>()?);
    assert_eq!(config.locale, Locale::Ru);
    assert_eq!(config.tick_interval, StdDuration::from_secs(1));
    assert!(!config.accept_bids_after_end);
    assert_eq!(config.lots.len(), 3);
    assert_eq!(config.catalog.len(), 3);

    Ok(())
}

#[test]
fn file_overrides_defaults_and_flags_override_file() -> Result<()> {
    let file = FileConfig::from_toml_str(
        r#"
listen = "0.0.0.0:8080"
locale = "en"
tick_ms = 250
accept_bids_after_end = true

[[lots]]
id = 10
title = "Комод"
category = "Мебель"
current_bid = 30000
min_increment = 1000
ends_in_secs = 90
"#,
    )?;

    let config = Config::merge(Arguments::default(), file.clone())?;
    assert_eq!(config.listen, "0.0.0.0:8080".parse::<SocketAddr>()?);
    assert_eq!(config.locale, Locale::En);
    assert_eq!(config.tick_interval, StdDuration::from_millis(250));
    assert!(config.accept_bids_after_end);

    let lots = seed_lots(config.lots, started_at())?;
    assert_eq!(lots.len(), 1);
    assert_eq!(lots[0].id, 10);
    assert_eq!(lots[0].bid_count, 0);
    assert_eq!(lots[0].end_time, started_at() + Duration::seconds(90));

    let args = Arguments {
        locale: Some(Locale::Ru),
        tick_ms: Some(2000),
        ..Default::default()
    };
    let config = Config::merge(args, file)?;
    assert_eq!(config.locale, Locale::Ru);
    assert_eq!(config.tick_interval, StdDuration::from_secs(2));

    Ok(())
}

#[test]
fn zero_tick_is_refused() {
    let args = Arguments {
        tick_ms: Some(0),
        ..Default::default()
    };
    assert!(Config::merge(args, FileConfig::default()).is_err());
}

#[test]
fn unknown_keys_are_refused() {
    assert!(FileConfig::from_toml_str("tick = 5").is_err());
}

#[test]
fn out_of_range_deadline_is_an_error() -> Result<()> {
    let file = FileConfig::from_toml_str(
        r#"
[[lots]]
id = 10
title = "Комод"
category = "Мебель"
current_bid = 30000
min_increment = 1000
ends_in_secs = 100000000000000000
"#,
    )?;
    let config = Config::merge(Arguments::default(), file)?;

    let err = seed_lots(config.lots, started_at()).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("lot 10"), "{message}");
    assert!(message.contains("ends_in_secs"), "{message}");

    Ok(())
}
