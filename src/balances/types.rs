use minicbor::{Decode, Encode};

use crate::libraries::fixed_point::Decimal;

/// Stores the balance of token T held by user U inside the engine.
#[derive(Encode, Decode, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct UserBalanceKey {
    #[n(0)]
    pub user: String,
    #[n(1)]
    pub token: String,
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug)]
pub struct UserBalance(#[cbor(n(0), with = "crate::cbor::decimal")] pub Decimal);

impl Default for UserBalance {
    fn default() -> Self {
        UserBalance(Decimal::zero())
    }
}
