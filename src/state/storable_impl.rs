use ic_stable_structures::storable::{Bound, Storable};
use std::borrow::Cow;

use crate::balances::types::{UserBalance, UserBalanceKey};
use crate::pool::types::{FeeTier, Pool, PoolKey, PoolTickSpacing};
use crate::position::types::{DexPositionOwner, Position, PositionKey, PositionOwnerKey};
use crate::protocol_fee::DexFeeConfig;
use crate::tick::types::{TickData, TickKey};

macro_rules! impl_storable_minicbor {
    ($type:ty) => {
        impl Storable for $type {
            fn to_bytes(&self) -> Cow<[u8]> {
                let mut buf = Vec::new();
                minicbor::encode(self, &mut buf).expect("minicbor encoding should always succeed");
                Cow::Owned(buf)
            }

            fn from_bytes(bytes: Cow<[u8]>) -> Self {
                minicbor::decode(bytes.as_ref()).unwrap_or_else(|e| {
                    panic!(
                        "failed to decode minicbor bytes {}: {}",
                        hex::encode(&bytes),
                        e
                    )
                })
            }
            const BOUND: Bound = Bound::Unbounded;
        }
    };
}

impl_storable_minicbor!(PoolKey);
impl_storable_minicbor!(Pool);
impl_storable_minicbor!(FeeTier);
impl_storable_minicbor!(PoolTickSpacing);
impl_storable_minicbor!(TickKey);
impl_storable_minicbor!(TickData);
impl_storable_minicbor!(PositionKey);
impl_storable_minicbor!(Position);
impl_storable_minicbor!(PositionOwnerKey);
impl_storable_minicbor!(DexPositionOwner);
impl_storable_minicbor!(UserBalanceKey);
impl_storable_minicbor!(UserBalance);
impl_storable_minicbor!(DexFeeConfig);
