use minicbor::{Decode, Encode};

use crate::libraries::fixed_point::Decimal;

#[derive(Encode, Decode, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct TickKey {
    #[n(0)]
    pub pool_hash: String,
    #[n(1)]
    pub tick: i32,
}

/// Per-tick record. Created when liquidity first references the tick,
/// mutated on every crossing, removed when `liquidity_gross` returns to
/// zero.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug)]
#[cbor(map)]
pub struct TickData {
    #[cbor(n(0), with = "crate::cbor::decimal")]
    pub liquidity_gross: Decimal, // total liquidity referencing this tick
    #[cbor(n(1), with = "crate::cbor::decimal")]
    pub liquidity_net: Decimal, // net liquidity change when crossing left to right
    #[cbor(n(2), with = "crate::cbor::decimal")]
    pub fee_growth_outside_0: Decimal,
    #[cbor(n(3), with = "crate::cbor::decimal")]
    pub fee_growth_outside_1: Decimal,
    #[n(4)]
    pub initialized: bool, // mirror of the bitmap bit
}

impl Default for TickData {
    fn default() -> Self {
        TickData {
            liquidity_gross: Decimal::zero(),
            liquidity_net: Decimal::zero(),
            fee_growth_outside_0: Decimal::zero(),
            fee_growth_outside_1: Decimal::zero(),
            initialized: false,
        }
    }
}
