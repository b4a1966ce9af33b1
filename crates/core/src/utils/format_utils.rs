//! Display formatting for money and percent values.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::tracker::ChangeColor;

/// "$ 1234.50" style money text for the holdings summary.
pub fn format_money(value: Decimal) -> String {
    let rounded = value
        .round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    format!("$ {:.prec$}", rounded, prec = DISPLAY_DECIMAL_PRECISION as usize)
}

/// "+1.23%" / "-3.50%" style percent text. Zero counts as positive.
pub fn format_signed_percent(value: Decimal) -> String {
    let sign = if value >= Decimal::ZERO { "+" } else { "-" };
    let magnitude = value
        .abs()
        .round_dp_with_strategy(DISPLAY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero);
    format!("{}{:.prec$}%", sign, magnitude, prec = DISPLAY_DECIMAL_PRECISION as usize)
}

/// Semantic color for a percent change value.
pub fn change_color(value: Decimal) -> ChangeColor {
    if value > Decimal::ZERO {
        ChangeColor::Positive
    } else if value < Decimal::ZERO {
        ChangeColor::Negative
    } else {
        ChangeColor::Neutral
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(dec!(1234.5)), "$ 1234.50");
        assert_eq!(format_money(dec!(0)), "$ 0.00");
        assert_eq!(format_money(dec!(10.005)), "$ 10.01");
    }

    #[test]
    fn test_format_signed_percent() {
        assert_eq!(format_signed_percent(dec!(1.234)), "+1.23%");
        assert_eq!(format_signed_percent(dec!(-3.5)), "-3.50%");
        assert_eq!(format_signed_percent(dec!(0)), "+0.00%");
    }

    #[test]
    fn test_change_color() {
        assert_eq!(change_color(dec!(0.01)), ChangeColor::Positive);
        assert_eq!(change_color(dec!(-0.01)), ChangeColor::Negative);
        assert_eq!(change_color(dec!(0)), ChangeColor::Neutral);
    }
}
