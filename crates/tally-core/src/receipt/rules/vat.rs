//! VAT arithmetic for VAT-inclusive receipt totals.
//!
//! Rates are percentages (20 = 20%). Results are rounded to pence.

use rust_decimal::Decimal;

use crate::models::receipt::VatEstimate;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Net amount contained in a VAT-inclusive gross amount.
pub fn net_from_gross(gross: Decimal, rate: Decimal) -> Decimal {
    let divisor = HUNDRED + rate;
    if divisor.is_zero() {
        gross
    } else {
        (gross * HUNDRED / divisor).round_dp(2)
    }
}

/// Split a VAT-inclusive gross amount into net and VAT.
pub fn estimate_vat(gross: Decimal, rate: Decimal) -> VatEstimate {
    let net = net_from_gross(gross, rate);
    VatEstimate {
        rate,
        net,
        vat: gross - net,
        gross,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_net_from_gross() {
        assert_eq!(net_from_gross(dec("120.00"), dec("20")), dec("100.00"));
        assert_eq!(net_from_gross(dec("10.00"), dec("20")), dec("8.33"));
    }

    #[test]
    fn test_estimate_vat_sums_to_gross() {
        let estimate = estimate_vat(dec("45.67"), dec("20"));
        assert_eq!(estimate.net, dec("38.06"));
        assert_eq!(estimate.vat, dec("7.61"));
        assert_eq!(estimate.net + estimate.vat, estimate.gross);
    }

    #[test]
    fn test_zero_rate() {
        let estimate = estimate_vat(dec("12.50"), Decimal::ZERO);
        assert_eq!(estimate.vat, Decimal::ZERO);
        assert_eq!(estimate.net, dec("12.50"));
    }
}
