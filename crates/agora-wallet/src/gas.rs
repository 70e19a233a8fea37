//! Gas strategy resolution
//!
//! `auto` resolves from a single native-balance read taken before the
//! decision. The decision is never re-checked - an account that drains its
//! native balance afterwards keeps the strategy it was provisioned with.

use agora_types::{GasStrategy, ResolvedGasStrategy};

/// Minimum native balance (in wei) for `auto` to pick self-funded gas:
/// 0.01 of the native asset
pub const MIN_GAS_BALANCE: u128 = 10_000_000_000_000_000;

/// Resolve the gas strategy for an account
///
/// Explicit modes pass through unchanged regardless of balance. `Auto`
/// picks self-funded when the balance covers the threshold, otherwise the
/// ERC-20 paymaster. Pure over its inputs.
pub fn resolve_gas_strategy(
    strategy: GasStrategy,
    native_balance: u128,
    threshold: u128,
) -> ResolvedGasStrategy {
    match strategy {
        GasStrategy::SelfFunded => ResolvedGasStrategy::SelfFunded,
        GasStrategy::Erc20 => ResolvedGasStrategy::Erc20,
        GasStrategy::Auto => {
            if native_balance >= threshold {
                ResolvedGasStrategy::SelfFunded
            } else {
                ResolvedGasStrategy::Erc20
            }
        }
    }
}
