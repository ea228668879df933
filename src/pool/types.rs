use minicbor::{Decode, Encode};
use sha2::{Digest, Sha256};

use crate::libraries::constants::DEFAULT_PROTOCOL_FEE;
use crate::libraries::fixed_point::Decimal;
use crate::libraries::tick_bitmap::TickBitmap;
use crate::state::create_composite_key;

/// Index key under which pools live in the store's composite-key namespace.
pub const POOL_INDEX_KEY: &str = "dexpool";

/// Fee tier as a fraction of the input amount (e.g. 0.003 for 30 bps).
#[derive(Encode, Decode, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct FeeTier(#[cbor(n(0), with = "crate::cbor::decimal")] pub Decimal);

#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct PoolTickSpacing(#[n(0)] pub i32);

/// Identity of a pool: the ordered token pair plus the fee tier.
/// `token0 < token1` under the canonical token-key ordering.
#[derive(Encode, Decode, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct PoolKey {
    #[n(0)]
    pub token0: String,
    #[n(1)]
    pub token1: String,
    #[n(2)]
    pub fee: FeeTier,
}

impl PoolKey {
    pub fn new(token0: impl Into<String>, token1: impl Into<String>, fee: Decimal) -> Self {
        PoolKey {
            token0: token0.into(),
            token1: token1.into(),
            fee: FeeTier(fee),
        }
    }

    pub fn composite_key(&self) -> String {
        create_composite_key(
            POOL_INDEX_KEY,
            &[&self.token0, &self.token1, &self.fee.0.to_string()],
        )
    }

    /// Deterministic pool identifier: SHA-256 of the composite key.
    pub fn gen_pool_hash(&self) -> String {
        hex::encode(Sha256::digest(self.composite_key().as_bytes()))
    }
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug)]
#[cbor(map)]
pub struct Pool {
    #[cbor(n(0), with = "crate::cbor::decimal")]
    pub sqrt_price: Decimal,
    #[n(1)]
    pub tick: i32,
    #[cbor(n(2), with = "crate::cbor::decimal")]
    pub liquidity: Decimal, // liquidity in range at the current tick
    #[cbor(n(3), with = "crate::cbor::decimal")]
    pub fee_growth_global_0: Decimal, // per-unit-liquidity accumulator, token0
    #[cbor(n(4), with = "crate::cbor::decimal")]
    pub fee_growth_global_1: Decimal, // per-unit-liquidity accumulator, token1
    #[cbor(n(5), with = "crate::cbor::decimal")]
    pub protocol_fees: Decimal, // fraction of LP fees diverted to the protocol
    #[cbor(n(6), with = "crate::cbor::decimal")]
    pub protocol_fees_token0: Decimal, // unclaimed protocol fees
    #[cbor(n(7), with = "crate::cbor::decimal")]
    pub protocol_fees_token1: Decimal,
    #[cbor(n(8), with = "crate::cbor::decimal")]
    pub reserve0: Decimal,
    #[cbor(n(9), with = "crate::cbor::decimal")]
    pub reserve1: Decimal,
    #[n(10)]
    pub tick_spacing: PoolTickSpacing,
    #[cbor(n(11), with = "crate::cbor::bitmap")]
    pub bitmap: TickBitmap,
}

impl Pool {
    /// A freshly created pool at the given price with no liquidity.
    pub fn initialized_at(sqrt_price: Decimal, tick: i32, tick_spacing: PoolTickSpacing) -> Self {
        Pool {
            sqrt_price,
            tick,
            liquidity: Decimal::zero(),
            fee_growth_global_0: Decimal::zero(),
            fee_growth_global_1: Decimal::zero(),
            protocol_fees: DEFAULT_PROTOCOL_FEE.clone(),
            protocol_fees_token0: Decimal::zero(),
            protocol_fees_token1: Decimal::zero(),
            reserve0: Decimal::zero(),
            reserve1: Decimal::zero(),
            tick_spacing,
            bitmap: TickBitmap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_pool_hash_is_deterministic() {
        let a = PoolKey::new("GALA", "USDC", dec("0.003"));
        let b = PoolKey::new("GALA", "USDC", dec("0.003"));
        assert_eq!(a.gen_pool_hash(), b.gen_pool_hash());
        assert_eq!(a.gen_pool_hash().len(), 64);
    }

    #[test]
    fn test_pool_hash_separates_fee_tiers() {
        let low = PoolKey::new("GALA", "USDC", dec("0.0005"));
        let high = PoolKey::new("GALA", "USDC", dec("0.01"));
        assert_ne!(low.gen_pool_hash(), high.gen_pool_hash());
    }

    #[test]
    fn test_composite_key_contains_ordered_parts() {
        let key = PoolKey::new("GALA", "USDC", dec("0.003"));
        let composite = key.composite_key();
        assert!(composite.contains("GALA"));
        assert!(composite.contains("USDC"));
        assert!(composite.contains("0.003"));
    }
}
