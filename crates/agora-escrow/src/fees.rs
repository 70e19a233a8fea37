//! Platform fee math
//!
//! The escrow contract charges a fixed 2% platform fee on top of the
//! settlement amount, computed at funding time. The token approval that
//! precedes `createEscrow` must therefore cover `amount + fee`; an
//! under-approval fails downstream as an insufficient-allowance revert.

use agora_types::Amount;

/// Platform fee in basis points (2%)
pub const PLATFORM_FEE_BPS: u128 = 200;

const BPS_DENOMINATOR: u128 = 10_000;

/// The fee charged on top of `amount`, rounded up
///
/// Returns `None` when the intermediate product overflows, which only
/// happens for amounts no real token supply reaches.
pub fn platform_fee(amount: Amount) -> Option<Amount> {
    let scaled = amount.units().checked_mul(PLATFORM_FEE_BPS)?;
    Some(Amount::new(scaled.div_ceil(BPS_DENOMINATOR)))
}

/// Total the buyer must approve before funding: `amount + fee`
pub fn amount_with_fee(amount: Amount) -> Option<Amount> {
    amount.checked_add(platform_fee(amount)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fee_is_two_percent() {
        assert_eq!(platform_fee(Amount::new(10_000)), Some(Amount::new(200)));
        assert_eq!(platform_fee(Amount::new(500)), Some(Amount::new(10)));
    }

    #[test]
    fn test_fee_rounds_up() {
        // 2% of 49 = 0.98 -> 1
        assert_eq!(platform_fee(Amount::new(49)), Some(Amount::new(1)));
        // 2% of 1 = 0.02 -> 1
        assert_eq!(platform_fee(Amount::new(1)), Some(Amount::new(1)));
        assert_eq!(platform_fee(Amount::ZERO), Some(Amount::ZERO));
    }

    #[test]
    fn test_amount_with_fee() {
        assert_eq!(
            amount_with_fee(Amount::new(5_000_000)),
            Some(Amount::new(5_100_000))
        );
    }

    #[test]
    fn test_overflow_is_an_error_not_a_wrap() {
        assert_eq!(platform_fee(Amount::new(u128::MAX)), None);
        assert_eq!(amount_with_fee(Amount::new(u128::MAX)), None);
    }
}
