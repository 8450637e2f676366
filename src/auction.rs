use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type LotId = u64;
pub type Amount = u64;
pub type Category = String;
pub type CategoryRef<'s> = &'s str;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BidError {
    #[error("bid is too low, the minimum is {minimum}")]
    TooLow { minimum: Amount },
    #[error("auction already closed")]
    AlreadyClosed,
    #[error("unknown lot: {0}")]
    UnknownLot(LotId),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lot {
    pub id: LotId,
    pub title: String,
    pub category: Category,
    pub current_bid: Amount,
    pub min_increment: Amount,
    pub end_time: DateTime<Utc>,
    pub bid_count: u64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: String,
}

impl Lot {
    /// The smallest amount the next bid must reach
    pub fn next_valid_bid(&self) -> Amount {
        self.current_bid.saturating_add(self.min_increment)
    }

    pub fn is_outbidded_by(&self, amount: Amount) -> bool {
        self.next_valid_bid() <= amount
    }

    pub fn has_ended(&self, now: DateTime<Utc>) -> bool {
        self.end_time <= now
    }

    pub fn ensure_valid_bid(&self, amount: Amount) -> Result<(), BidError> {
        if !self.is_outbidded_by(amount) {
            return Err(BidError::TooLow {
                minimum: self.next_valid_bid(),
            });
        }
        Ok(())
    }

    /// Apply an already validated bid
    pub(crate) fn accept(&mut self, amount: Amount) {
        debug_assert!(self.current_bid <= amount);
        self.current_bid = amount;
        self.bid_count += 1;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bid {
    pub lot_id: LotId,
    pub amount: Amount,
    pub timestamp: DateTime<Utc>,
}

/// Parse the raw bid input of a form field
///
/// Anything that is not a whole, non-negative number (including an empty
/// field) becomes `0`, which no lot accepts.
pub fn parse_amount(input: &str) -> Amount {
    input.trim().parse::<Amount>().unwrap_or(0)
}
