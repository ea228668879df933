use serde::{Deserialize, Serialize};

use crate::libraries::fixed_point::Decimal;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddLiquidityArgs {
    pub token0: String,
    pub token1: String,
    pub fee: Decimal,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub amount0_desired: Decimal,
    pub amount1_desired: Decimal,
    /// Existing position to grow; `None` mints a new one.
    pub position_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddLiquidityResponse {
    pub position_id: String,
    pub liquidity: Decimal,
    pub amount0: Decimal,
    pub amount1: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoveLiquidityArgs {
    pub token0: String,
    pub token1: String,
    pub fee: Decimal,
    pub position_id: String,
    pub liquidity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLiquidityResponse {
    pub amount0: Decimal,
    pub amount1: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectPositionFeesArgs {
    pub token0: String,
    pub token1: String,
    pub fee: Decimal,
    pub position_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectPositionFeesResponse {
    pub amount0: Decimal,
    pub amount1: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GetUserPositionsArgs {
    pub user: String,
    pub limit: u32,
    /// Continuation token from a previous call; empty or absent starts from
    /// the beginning.
    #[serde(default)]
    pub bookmark: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPositionEntry {
    pub pool_hash: String,
    pub position_id: String,
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub liquidity: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetUserPositionsResponse {
    pub positions: Vec<UserPositionEntry>,
    /// Empty when the listing is exhausted.
    pub bookmark: String,
}
