//! Portfolio aggregation over holdings and live prices.
//!
//! Pure functions, no internal state. Holdings with no matching live price
//! contribute zero instead of failing the whole aggregate.

use std::collections::HashMap;

use rust_decimal::Decimal;

use super::holdings_model::Holding;
use crate::coins::{CoinPair, LivePrice};

/// Total current value across all holdings: Σ quantity × latest price.
pub fn total_value(holdings: &[Holding], prices: &HashMap<CoinPair, LivePrice>) -> Decimal {
    holdings
        .iter()
        .map(|holding| {
            prices
                .get(&holding.pair())
                .map(|quote| holding.quantity * quote.price)
                .unwrap_or(Decimal::ZERO)
        })
        .sum()
}

/// Percent change across all holdings, weighted by each holding's share of
/// the total current value. Returns zero when the total value is zero.
pub fn total_change_percent(holdings: &[Holding], prices: &HashMap<CoinPair, LivePrice>) -> Decimal {
    let total = total_value(holdings, prices);
    if total.is_zero() {
        return Decimal::ZERO;
    }

    let weighted_sum: Decimal = holdings
        .iter()
        .filter_map(|holding| {
            prices.get(&holding.pair()).map(|quote| {
                let value = holding.quantity * quote.price;
                value * quote.change_pct_24h
            })
        })
        .sum();

    weighted_sum / total
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn prices(entries: &[(&str, &str, Decimal, Decimal)]) -> HashMap<CoinPair, LivePrice> {
        entries
            .iter()
            .map(|(base, quote, price, change)| {
                (
                    CoinPair::new(*base, *quote),
                    LivePrice {
                        price: *price,
                        change_pct_24h: *change,
                    },
                )
            })
            .collect()
    }

    #[test]
    fn test_total_value_single_holding() {
        let holdings = vec![Holding::new("BTC", "USD", dec!(2))];
        let prices = prices(&[("BTC", "USD", dec!(100), dec!(0))]);

        assert_eq!(total_value(&holdings, &prices), dec!(200));
    }

    #[test]
    fn test_total_value_missing_price_contributes_zero() {
        let holdings = vec![
            Holding::new("BTC", "USD", dec!(1)),
            Holding::new("ETH", "USD", dec!(1)),
        ];
        let prices = prices(&[("BTC", "USD", dec!(100), dec!(0))]);

        assert_eq!(total_value(&holdings, &prices), dec!(100));
    }

    #[test]
    fn test_total_value_empty_holdings() {
        assert_eq!(total_value(&[], &HashMap::new()), Decimal::ZERO);
    }

    #[test]
    fn test_total_change_percent_zero_total() {
        let holdings = vec![Holding::new("BTC", "USD", dec!(3))];
        // Price is zero, so total value is zero; change must not divide by it
        let prices = prices(&[("BTC", "USD", dec!(0), dec!(12.5))]);

        assert_eq!(total_change_percent(&holdings, &prices), Decimal::ZERO);
        assert_eq!(total_change_percent(&[], &HashMap::new()), Decimal::ZERO);
    }

    #[test]
    fn test_total_change_percent_weighted_by_value_share() {
        let holdings = vec![
            Holding::new("BTC", "USD", dec!(1)),
            Holding::new("ETH", "USD", dec!(10)),
        ];
        // BTC position is worth 300 at +2% and ETH 100 at -2%:
        // (300*2 + 100*-2) / 400 = 1
        let prices = prices(&[
            ("BTC", "USD", dec!(300), dec!(2)),
            ("ETH", "USD", dec!(10), dec!(-2)),
        ]);

        assert_eq!(total_change_percent(&holdings, &prices), dec!(1));
    }
}
