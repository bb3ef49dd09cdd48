//! Trade parameter types
//!
//! Input of the risk calculator. Nothing here is persisted: the values live
//! for a single computation and are recomputed on every input change.

use crate::numeric::{Balance, LotSize, Percentage, Price};
use serde::{Deserialize, Serialize};

/// Planned trade as entered in the calculator form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeParameters {
    pub account_balance: Balance,
    pub risk_percent: Percentage,
    pub entry: Price,
    pub stop_loss: Price,
    pub take_profit: Price,
    pub lot_size: LotSize,
}

impl TradeParameters {
    /// True when stop-loss and entry coincide (zero risk distance)
    pub fn is_degenerate(&self) -> bool {
        self.entry == self.stop_loss
    }
}
