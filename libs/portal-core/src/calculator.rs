//! Risk Calculator — Forex trade risk metrics
//!
//! Converts the numbers of a planned trade into the four metrics shown by the
//! trading-education calculator: risk/reward ratio, position size, potential
//! profit and potential loss. All calculations are deterministic fixed-point
//! `Decimal`; nothing is rounded until `TradeMetrics::rounded` is called.
//!
//! # Pip convention
//! Pip distances assume a 4-decimal quote (1 pip = 0.0001) and a standard-lot
//! pip value of 10 account-currency units. This is not currency-pair aware:
//! JPY crosses quote to 2 decimals and are mispriced by the default. Callers
//! that need another convention pass their own `PipConvention`.

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use types::errors::CalculatorError;
use types::numeric::{Balance, LotSize, Percentage, Price};
use types::trade::TradeParameters;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Display precision (2 dp).
const DISPLAY_DP: u32 = 2;

/// 1 pip = 0.0001 of the quote price.
fn standard_pip_size() -> Decimal {
    Decimal::new(1, 4)
}

/// Value of one pip for one standard lot, in account currency.
fn standard_pip_value() -> Decimal {
    Decimal::TEN
}

// ---------------------------------------------------------------------------
// Pip convention
// ---------------------------------------------------------------------------

/// Quoting convention used to turn price distances into money.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipConvention {
    /// Price increment of one pip
    pub pip_size: Decimal,
    /// Account-currency value of one pip for one lot
    pub pip_value_per_lot: Decimal,
}

impl PipConvention {
    /// 4-decimal pip, 10 units per pip per standard lot.
    pub fn standard() -> Self {
        Self {
            pip_size: standard_pip_size(),
            pip_value_per_lot: standard_pip_value(),
        }
    }

    /// Build a custom convention. Both values must be positive.
    pub fn new(pip_size: Decimal, pip_value_per_lot: Decimal) -> Result<Self, CalculatorError> {
        if pip_size <= Decimal::ZERO {
            return Err(CalculatorError::InvalidPipConvention(format!(
                "pip size must be positive, got {}",
                pip_size
            )));
        }
        if pip_value_per_lot <= Decimal::ZERO {
            return Err(CalculatorError::InvalidPipConvention(format!(
                "pip value must be positive, got {}",
                pip_value_per_lot
            )));
        }
        Ok(Self {
            pip_size,
            pip_value_per_lot,
        })
    }

    /// Absolute distance between two prices, in pips.
    pub fn pips_between(&self, a: Price, b: Price) -> Result<Decimal, CalculatorError> {
        (a.as_decimal() - b.as_decimal())
            .abs()
            .checked_div(self.pip_size)
            .ok_or_else(|| overflow("pip distance"))
    }

    /// Money moved by `pips` on a position of `lots`.
    fn pip_amount(&self, pips: Decimal, lots: LotSize) -> Result<Decimal, CalculatorError> {
        pips.checked_mul(lots.as_decimal())
            .and_then(|v| v.checked_mul(self.pip_value_per_lot))
            .ok_or_else(|| overflow("pip amount"))
    }
}

impl Default for PipConvention {
    fn default() -> Self {
        Self::standard()
    }
}

// ---------------------------------------------------------------------------
// Trade metrics
// ---------------------------------------------------------------------------

/// Everything the calculator derives from one set of trade parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeMetrics {
    /// balance × risk% / 100
    pub risk_amount: Decimal,
    /// |entry − stop_loss| in pips
    pub stop_distance_pips: Decimal,
    /// |take_profit − entry| in pips
    pub target_distance_pips: Decimal,
    pub risk_reward_ratio: Decimal,
    /// Lots to trade so that hitting the stop loses exactly `risk_amount`
    pub position_size: Decimal,
    /// Profit at take-profit for the entered lot size
    pub potential_profit: Decimal,
    /// Loss at stop-loss for the entered lot size
    pub potential_loss: Decimal,
}

impl TradeMetrics {
    /// Copy with every value rounded to display precision, HALF_UP.
    pub fn rounded(&self) -> Self {
        Self {
            risk_amount: round_display(self.risk_amount),
            stop_distance_pips: round_display(self.stop_distance_pips),
            target_distance_pips: round_display(self.target_distance_pips),
            risk_reward_ratio: round_display(self.risk_reward_ratio),
            position_size: round_display(self.position_size),
            potential_profit: round_display(self.potential_profit),
            potential_loss: round_display(self.potential_loss),
        }
    }
}

// ---------------------------------------------------------------------------
// Calculator
// ---------------------------------------------------------------------------

/// Risk calculator bound to a pip convention.
///
/// Stateless apart from the convention; every method is a pure function of
/// its arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskCalculator {
    pub convention: PipConvention,
}

impl RiskCalculator {
    pub fn new(convention: PipConvention) -> Self {
        Self { convention }
    }

    /// |take_profit − entry| / |entry − stop_loss|
    ///
    /// Fails with `DegenerateTrade` when stop-loss equals entry.
    pub fn risk_reward_ratio(
        &self,
        entry: Price,
        stop_loss: Price,
        take_profit: Price,
    ) -> Result<Decimal, CalculatorError> {
        let risk = (entry.as_decimal() - stop_loss.as_decimal()).abs();
        if risk.is_zero() {
            return Err(degenerate(entry));
        }
        let reward = (take_profit.as_decimal() - entry.as_decimal()).abs();
        reward
            .checked_div(risk)
            .ok_or_else(|| overflow("risk/reward ratio"))
    }

    /// Amount of the balance put at risk: balance × risk% / 100.
    pub fn risk_amount(
        &self,
        account_balance: Balance,
        risk_percent: Percentage,
    ) -> Result<Decimal, CalculatorError> {
        account_balance
            .as_decimal()
            .checked_mul(risk_percent.as_decimal())
            .and_then(|v| v.checked_div(Decimal::ONE_HUNDRED))
            .ok_or_else(|| overflow("risk amount"))
    }

    /// Lots such that a stop-out loses exactly the risk amount:
    /// risk_amount / (stop_distance_pips × pip_value_per_lot).
    pub fn position_size(
        &self,
        account_balance: Balance,
        risk_percent: Percentage,
        entry: Price,
        stop_loss: Price,
    ) -> Result<Decimal, CalculatorError> {
        let pip_distance = self.convention.pips_between(entry, stop_loss)?;
        if pip_distance.is_zero() {
            return Err(degenerate(entry));
        }
        let risk_amount = self.risk_amount(account_balance, risk_percent)?;
        pip_distance
            .checked_mul(self.convention.pip_value_per_lot)
            .and_then(|loss_per_lot| risk_amount.checked_div(loss_per_lot))
            .ok_or_else(|| overflow("position size"))
    }

    /// |take_profit − entry| in pips × lots × pip value.
    pub fn potential_profit(
        &self,
        entry: Price,
        take_profit: Price,
        lot_size: LotSize,
    ) -> Result<Decimal, CalculatorError> {
        let pips = self.convention.pips_between(take_profit, entry)?;
        self.convention.pip_amount(pips, lot_size)
    }

    /// |entry − stop_loss| in pips × lots × pip value.
    pub fn potential_loss(
        &self,
        entry: Price,
        stop_loss: Price,
        lot_size: LotSize,
    ) -> Result<Decimal, CalculatorError> {
        let pips = self.convention.pips_between(entry, stop_loss)?;
        self.convention.pip_amount(pips, lot_size)
    }

    /// Compute every metric for one set of trade parameters.
    pub fn evaluate(&self, params: &TradeParameters) -> Result<TradeMetrics, CalculatorError> {
        let risk_reward_ratio =
            self.risk_reward_ratio(params.entry, params.stop_loss, params.take_profit)?;
        let position_size = self.position_size(
            params.account_balance,
            params.risk_percent,
            params.entry,
            params.stop_loss,
        )?;

        Ok(TradeMetrics {
            risk_amount: self.risk_amount(params.account_balance, params.risk_percent)?,
            stop_distance_pips: self.convention.pips_between(params.entry, params.stop_loss)?,
            target_distance_pips: self.convention.pips_between(params.take_profit, params.entry)?,
            risk_reward_ratio,
            position_size,
            potential_profit: self.potential_profit(
                params.entry,
                params.take_profit,
                params.lot_size,
            )?,
            potential_loss: self.potential_loss(params.entry, params.stop_loss, params.lot_size)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Standard-convention shorthands
// ---------------------------------------------------------------------------

/// Risk/reward ratio, see [`RiskCalculator::risk_reward_ratio`].
pub fn risk_reward_ratio(
    entry: Price,
    stop_loss: Price,
    take_profit: Price,
) -> Result<Decimal, CalculatorError> {
    RiskCalculator::default().risk_reward_ratio(entry, stop_loss, take_profit)
}

/// Position size in lots under the standard pip convention.
pub fn position_size(
    account_balance: Balance,
    risk_percent: Percentage,
    entry: Price,
    stop_loss: Price,
) -> Result<Decimal, CalculatorError> {
    RiskCalculator::default().position_size(account_balance, risk_percent, entry, stop_loss)
}

/// Profit at take-profit under the standard pip convention.
pub fn potential_profit(
    entry: Price,
    take_profit: Price,
    lot_size: LotSize,
) -> Result<Decimal, CalculatorError> {
    RiskCalculator::default().potential_profit(entry, take_profit, lot_size)
}

/// Loss at stop-loss under the standard pip convention.
pub fn potential_loss(
    entry: Price,
    stop_loss: Price,
    lot_size: LotSize,
) -> Result<Decimal, CalculatorError> {
    RiskCalculator::default().potential_loss(entry, stop_loss, lot_size)
}

// ---------------------------------------------------------------------------
// Pure helpers
// ---------------------------------------------------------------------------

fn degenerate(entry: Price) -> CalculatorError {
    debug!(entry = %entry, "Rejected degenerate trade: stop-loss equals entry");
    CalculatorError::DegenerateTrade {
        entry: entry.to_string(),
    }
}

fn overflow(what: &str) -> CalculatorError {
    debug!(what, "Rejected trade: decimal overflow");
    CalculatorError::Overflow(what.to_string())
}

/// Round to display precision, HALF_UP.
fn round_display(v: Decimal) -> Decimal {
    v.round_dp_with_strategy(DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn price(s: &str) -> Price {
        s.parse().unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str_exact(s).unwrap()
    }

    fn sample_params() -> TradeParameters {
        TradeParameters {
            account_balance: "10000".parse().unwrap(),
            risk_percent: "2".parse().unwrap(),
            entry: price("1.0850"),
            stop_loss: price("1.0800"),
            take_profit: price("1.0950"),
            lot_size: "0.1".parse().unwrap(),
        }
    }

    #[test]
    fn test_risk_reward_ratio() {
        // risk = 0.0050, reward = 0.0100
        let ratio = risk_reward_ratio(price("1.0850"), price("1.0800"), price("1.0950")).unwrap();
        assert_eq!(ratio, Decimal::TWO);
    }

    #[test]
    fn test_risk_reward_ratio_short_trade() {
        // Short: stop above entry, target below
        let ratio = risk_reward_ratio(price("1.2500"), price("1.2550"), price("1.2350")).unwrap();
        assert_eq!(ratio, Decimal::from(3));
    }

    #[test]
    fn test_risk_reward_ratio_degenerate() {
        let err = risk_reward_ratio(price("1.0850"), price("1.0850"), price("1.0950")).unwrap_err();
        assert_eq!(
            err,
            CalculatorError::DegenerateTrade {
                entry: "1.0850".to_string()
            }
        );
    }

    #[test]
    fn test_position_size() {
        // risk amount = 200, pip distance = 50 → 200 / (50 × 10) = 0.4
        let size = position_size(
            "10000".parse().unwrap(),
            "2".parse().unwrap(),
            price("1.0850"),
            price("1.0800"),
        )
        .unwrap();
        assert_eq!(size, dec("0.4"));
    }

    #[test]
    fn test_position_size_degenerate() {
        let result = position_size(
            "10000".parse().unwrap(),
            "2".parse().unwrap(),
            price("1.0850"),
            price("1.08500"),
        );
        assert!(matches!(result, Err(CalculatorError::DegenerateTrade { .. })));
    }

    #[test]
    fn test_position_size_zero_risk() {
        let size = position_size(
            "10000".parse().unwrap(),
            "0".parse().unwrap(),
            price("1.0850"),
            price("1.0800"),
        )
        .unwrap();
        assert!(size.is_zero());
    }

    #[test]
    fn test_potential_profit() {
        // 100 pips × 0.1 lots × 10 = 100
        let profit =
            potential_profit(price("1.0850"), price("1.0950"), "0.1".parse().unwrap()).unwrap();
        assert_eq!(profit, Decimal::ONE_HUNDRED);
    }

    #[test]
    fn test_potential_loss() {
        // 50 pips × 0.1 lots × 10 = 50
        let loss = potential_loss(price("1.0850"), price("1.0800"), "0.1".parse().unwrap()).unwrap();
        assert_eq!(loss, Decimal::from(50));
    }

    #[test]
    fn test_potential_loss_zero_distance() {
        let loss = potential_loss(price("1.0850"), price("1.0850"), "1".parse().unwrap()).unwrap();
        assert!(loss.is_zero());
    }

    #[test]
    fn test_custom_convention() {
        // 2-decimal quote, 1 pip = 0.01
        let calc = RiskCalculator::new(PipConvention::new(dec("0.01"), Decimal::TEN).unwrap());
        let loss = calc
            .potential_loss(price("150.00"), price("149.50"), "1".parse().unwrap())
            .unwrap();
        assert_eq!(loss, Decimal::from(500));
    }

    #[test]
    fn test_invalid_convention() {
        assert!(matches!(
            PipConvention::new(Decimal::ZERO, Decimal::TEN),
            Err(CalculatorError::InvalidPipConvention(_))
        ));
        assert!(PipConvention::new(dec("0.0001"), Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn test_evaluate() {
        let metrics = RiskCalculator::default().evaluate(&sample_params()).unwrap();
        assert_eq!(metrics.risk_amount, Decimal::from(200));
        assert_eq!(metrics.stop_distance_pips, Decimal::from(50));
        assert_eq!(metrics.target_distance_pips, Decimal::ONE_HUNDRED);
        assert_eq!(metrics.risk_reward_ratio, Decimal::TWO);
        assert_eq!(metrics.position_size, dec("0.4"));
        assert_eq!(metrics.potential_profit, Decimal::ONE_HUNDRED);
        assert_eq!(metrics.potential_loss, Decimal::from(50));
    }

    #[test]
    fn test_evaluate_degenerate() {
        let mut params = sample_params();
        params.stop_loss = params.entry;
        assert!(RiskCalculator::default().evaluate(&params).is_err());
    }

    #[test]
    fn test_evaluate_huge_balance_overflows() {
        let mut params = sample_params();
        params.account_balance = "70000000000000000000000000000".parse().unwrap();
        params.risk_percent = "50".parse().unwrap();
        let err = RiskCalculator::default().evaluate(&params).unwrap_err();
        assert!(matches!(err, CalculatorError::Overflow(_)));
    }

    #[test]
    fn test_evaluate_huge_price_overflows() {
        let mut params = sample_params();
        params.entry = price("10000000000000000000000000");
        params.stop_loss = price("1");
        params.lot_size = "1000".parse().unwrap();
        let err = RiskCalculator::default().evaluate(&params).unwrap_err();
        assert!(matches!(err, CalculatorError::Overflow(_)));
    }

    #[test]
    fn test_potential_loss_overflow() {
        let result = potential_loss(
            price("10000000000000000000000000"),
            price("1"),
            "1000".parse().unwrap(),
        );
        assert_eq!(
            result,
            Err(CalculatorError::Overflow("pip distance".to_string()))
        );
    }

    #[test]
    fn test_rounded_metrics() {
        let mut params = sample_params();
        // risk 30 pips, reward 100 pips → 3.333…
        params.stop_loss = price("1.0820");
        let metrics = RiskCalculator::default().evaluate(&params).unwrap().rounded();
        assert_eq!(metrics.risk_reward_ratio, dec("3.33"));
        // 200 / (30 × 10) = 0.666… → 0.67
        assert_eq!(metrics.position_size, dec("0.67"));
    }

    #[test]
    fn test_metrics_serialization() {
        let metrics = RiskCalculator::default().evaluate(&sample_params()).unwrap();
        let json = serde_json::to_string(&metrics).unwrap();
        let restored: TradeMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(metrics, restored);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// 5-decimal FX quote between 0.50000 and 2.00000
    fn fx_price() -> impl Strategy<Value = Price> {
        (50_000i64..200_000).prop_map(|n| Price::new(Decimal::new(n, 5)))
    }

    proptest! {
        #[test]
        fn prop_loss_at_position_size_equals_risk_amount(
            balance in 100u64..1_000_000,
            risk in 1i64..=500,
            entry in fx_price(),
            stop in fx_price(),
        ) {
            prop_assume!(entry != stop);
            let calc = RiskCalculator::default();
            let balance = Balance::from_u64(balance);
            // 0.01% .. 5.00%
            let risk = Percentage::new(Decimal::new(risk, 2));

            let lots = calc.position_size(balance, risk, entry, stop).unwrap();
            let loss = calc.potential_loss(entry, stop, LotSize::new(lots)).unwrap();
            let expected = calc.risk_amount(balance, risk).unwrap();

            prop_assert!((loss - expected).abs() < Decimal::new(1, 10));
        }

        #[test]
        fn prop_ratio_is_profit_over_loss(
            entry in fx_price(),
            stop in fx_price(),
            target in fx_price(),
            lots in 1i64..1_000,
        ) {
            prop_assume!(entry != stop);
            let calc = RiskCalculator::default();
            let lots = LotSize::new(Decimal::new(lots, 2));

            let ratio = calc.risk_reward_ratio(entry, stop, target).unwrap();
            let profit = calc.potential_profit(entry, target, lots).unwrap();
            let loss = calc.potential_loss(entry, stop, lots).unwrap();

            prop_assert!((ratio * loss - profit).abs() < Decimal::new(1, 10));
        }

        #[test]
        fn prop_metrics_never_negative(
            entry in fx_price(),
            stop in fx_price(),
            target in fx_price(),
        ) {
            let lots = LotSize::new(Decimal::ONE);
            prop_assert!(potential_profit(entry, target, lots).unwrap() >= Decimal::ZERO);
            prop_assert!(potential_loss(entry, stop, lots).unwrap() >= Decimal::ZERO);
        }
    }
}
