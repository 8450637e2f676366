use crate::auction::{Amount, Bid, Lot, LotId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// Personal, append-only record of the bids this session placed
#[derive(Clone, Debug, Default)]
pub struct BidLedger {
    entries: Vec<Bid>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BidStatus {
    Leading,
    Outbid,
    Won,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub lot_id: LotId,
    pub lot_title: Option<String>,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
    pub status: BidStatus,
}

impl BidLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, bid: Bid) {
        self.entries.push(bid);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// In the order the bids were placed
    pub fn entries(&self) -> &[Bid] {
        &self.entries
    }

    /// Latest bid first, each tagged with where it stands against `lots`
    ///
    /// Only the latest bid on a lot can be leading; an earlier one of the
    /// same amount was superseded.
    pub fn history(&self, lots: &[Lot], now: DateTime<Utc>) -> Vec<HistoryEntry> {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .rev()
            .map(|bid| {
                let latest = seen.insert(bid.lot_id);
                let lot = lots.iter().find(|lot| lot.id == bid.lot_id);
                let status = match lot {
                    Some(lot) if latest && lot.current_bid == bid.amount => {
                        if lot.has_ended(now) {
                            BidStatus::Won
                        } else {
                            BidStatus::Leading
                        }
                    }
                    _ => BidStatus::Outbid,
                };
                HistoryEntry {
                    lot_id: bid.lot_id,
                    lot_title: lot.map(|lot| lot.title.clone()),
                    amount: bid.amount,
                    timestamp: bid.timestamp,
                    status,
                }
            })
            .collect()
    }
}
