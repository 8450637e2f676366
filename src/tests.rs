mod config;
mod notify;
mod properties;
mod service;

use crate::{
    auction::{Amount, Lot, LotId},
    board::{AuctionBoard, BoardSettings},
    countdown::ManualClock,
    fixtures,
    notify::InMemoryNotifier,
    session::{Session, SharedSession},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::Arc;

pub fn started_at() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 11, 20, 12, 0, 0).unwrap()
}

pub fn lot(id: LotId, current_bid: Amount, min_increment: Amount, ends_in_secs: i64) -> Lot {
    Lot {
        id,
        title: format!("lot {id}"),
        category: "Антиквариат".to_owned(),
        current_bid,
        min_increment,
        end_time: started_at() + Duration::seconds(ends_in_secs),
        bid_count: 0,
        description: String::new(),
        image: String::new(),
    }
}

pub struct Fixture {
    pub clock: Arc<ManualClock>,
    pub toasts: Arc<InMemoryNotifier>,
}

impl Fixture {
    pub fn new() -> Self {
        Self {
            clock: ManualClock::new_shared(started_at()),
            toasts: InMemoryNotifier::new_shared(),
        }
    }

    pub fn board(&self, lots: Vec<Lot>, settings: BoardSettings) -> AuctionBoard {
        AuctionBoard::new(lots, settings, self.clock.clone(), self.toasts.clone())
            .expect("unique lots")
    }

    /// Session seeded with the stock lots and catalog
    pub fn session(&self) -> SharedSession {
        Session::new_shared(
            fixtures::seed_lots(fixtures::default_lot_seeds(), started_at()).expect("valid seeds"),
            fixtures::default_catalog(),
            BoardSettings::default(),
            self.clock.clone(),
            self.toasts.clone(),
        )
        .expect("unique lots")
    }
}
