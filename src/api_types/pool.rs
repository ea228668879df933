use serde::{Deserialize, Serialize};

use crate::libraries::fixed_point::Decimal;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePoolArgs {
    pub token0: String,
    pub token1: String,
    pub fee: Decimal,
    pub initial_sqrt_price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurePoolDexFeeArgs {
    pub token0: String,
    pub token1: String,
    pub fee: Decimal,
    /// Fraction of collected LP fees diverted to the protocol, in [0, 1].
    pub protocol_fee: Decimal,
}
