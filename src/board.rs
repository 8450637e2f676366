//! Auction Board
//!
//! Owns the lot collection of one session and is the only place a lot
//! changes: through [`AuctionBoard::submit_bid`] (and its form variant
//! [`AuctionBoard::place_bid`]). Everything else here is a read-only view.
use crate::auction::{parse_amount, Amount, Bid, BidError, Category, Lot, LotId};
use crate::countdown::{time_left, Clock, SharedClock, TimeLeft};
use crate::ledger::{BidLedger, HistoryEntry};
use crate::locale::Locale;
use crate::notify::{Notification, Notifier, SharedNotifier};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("duplicate lot id: {0}")]
    DuplicateLot(LotId),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardSettings {
    pub locale: Locale,
    /// Keep taking bids once a lot's countdown reached zero
    pub accept_bids_after_end: bool,
}

/// Which lots a tab shows
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    All,
    Category(Category),
}

impl From<Option<Category>> for Tab {
    fn from(category: Option<Category>) -> Self {
        match category {
            None => Tab::All,
            Some(c) if c.is_empty() || c == "all" => Tab::All,
            Some(c) => Tab::Category(c),
        }
    }
}

pub struct AuctionBoard {
    lots: Vec<Lot>,
    ledger: BidLedger,
    drafts: BTreeMap<LotId, String>,
    time_left: BTreeMap<LotId, TimeLeft>,
    settings: BoardSettings,
    clock: SharedClock,
    notifier: SharedNotifier,
}

impl AuctionBoard {
    pub fn new(
        lots: Vec<Lot>,
        settings: BoardSettings,
        clock: SharedClock,
        notifier: SharedNotifier,
    ) -> Result<Self, BoardError> {
        let mut seen = BTreeSet::new();
        for lot in &lots {
            if !seen.insert(lot.id) {
                return Err(BoardError::DuplicateLot(lot.id));
            }
        }

        Ok(Self {
            lots,
            ledger: BidLedger::new(),
            drafts: BTreeMap::new(),
            time_left: BTreeMap::new(),
            settings,
            clock,
            notifier,
        })
    }

    pub fn settings(&self) -> BoardSettings {
        self.settings
    }

    pub fn lots(&self) -> &[Lot] {
        &self.lots
    }

    pub fn lot(&self, lot_id: LotId) -> Option<&Lot> {
        self.lots.iter().find(|lot| lot.id == lot_id)
    }

    pub fn lots_in_tab(&self, tab: &Tab) -> Vec<&Lot> {
        match tab {
            Tab::All => self.lots.iter().collect(),
            Tab::Category(category) => self
                .lots
                .iter()
                .filter(|lot| &lot.category == category)
                .collect(),
        }
    }

    pub fn ledger(&self) -> &BidLedger {
        &self.ledger
    }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.ledger.history(&self.lots, self.clock.now())
    }

    pub fn draft(&self, lot_id: LotId) -> &str {
        self.drafts.get(&lot_id).map(String::as_str).unwrap_or("")
    }

    pub fn set_draft(&mut self, lot_id: LotId, input: impl Into<String>) -> Result<(), BidError> {
        if self.lot(lot_id).is_none() {
            return Err(BidError::UnknownLot(lot_id));
        }
        self.drafts.insert(lot_id, input.into());
        Ok(())
    }

    /// Submit whatever is typed into the lot's bid field
    pub fn place_bid(&mut self, lot_id: LotId) -> Result<Bid, BidError> {
        let amount = parse_amount(self.draft(lot_id));
        self.submit_bid(lot_id, amount)
    }

    pub fn submit_bid(&mut self, lot_id: LotId, amount: Amount) -> Result<Bid, BidError> {
        let now = self.clock.now();
        let locale = self.settings.locale;

        match self.accept_bid(lot_id, amount, now) {
            Ok(bid) => {
                info!(lot_id, amount, "bid accepted");
                self.notifier
                    .notify(Notification::bid_accepted(locale, bid.amount));
                Ok(bid)
            }
            Err(e) => {
                debug!(lot_id, amount, error = %e, "bid rejected");
                match e {
                    BidError::TooLow { minimum } => self
                        .notifier
                        .notify(Notification::bid_too_low(locale, minimum)),
                    BidError::AlreadyClosed => {
                        self.notifier.notify(Notification::auction_closed(locale))
                    }
                    BidError::UnknownLot(_) => {}
                }
                Err(e)
            }
        }
    }

    fn accept_bid(
        &mut self,
        lot_id: LotId,
        amount: Amount,
        now: DateTime<Utc>,
    ) -> Result<Bid, BidError> {
        let accept_bids_after_end = self.settings.accept_bids_after_end;
        let lot = self
            .lots
            .iter_mut()
            .find(|lot| lot.id == lot_id)
            .ok_or(BidError::UnknownLot(lot_id))?;

        if !accept_bids_after_end && lot.has_ended(now) {
            return Err(BidError::AlreadyClosed);
        }
        lot.ensure_valid_bid(amount)?;
        lot.accept(amount);

        let bid = Bid {
            lot_id,
            amount,
            timestamp: now,
        };
        self.ledger.append(bid.clone());
        self.drafts.remove(&lot_id);

        Ok(bid)
    }

    /// Recompute every lot's countdown and remember it for display
    pub fn refresh_countdowns(&mut self, now: DateTime<Utc>) -> BTreeMap<LotId, TimeLeft> {
        self.time_left = self
            .lots
            .iter()
            .map(|lot| (lot.id, time_left(lot.end_time, now)))
            .collect();
        self.time_left.clone()
    }

    /// `None` until the first tick
    pub fn time_left(&self, lot_id: LotId) -> Option<TimeLeft> {
        self.time_left.get(&lot_id).copied()
    }

    pub fn time_left_label(&self, lot_id: LotId) -> String {
        let locale = self.settings.locale;
        self.time_left(lot_id)
            .map(|t| t.label(locale))
            .unwrap_or_else(|| locale.loading_label().to_owned())
    }
}
