use log::info;

use crate::api_types::position::{RemoveLiquidityArgs, RemoveLiquidityResponse};
use crate::balances;
use crate::errors::DexError;
use crate::fee_gate::{FeeCode, TxContext};
use crate::pool::modify_liquidity::{ModifyLiquidityParams, modify_liquidity};
use crate::pool::types::PoolKey;
use crate::position::types::PositionKey;
use crate::state::read_state;
use crate::validation::require_positive;

/// Burns liquidity out of an existing position and credits the freed
/// amounts to the owner's balances. Accrued fees stay on the position
/// until collected.
pub fn remove_liquidity(
    ctx: &TxContext,
    args: RemoveLiquidityArgs,
) -> Result<RemoveLiquidityResponse, DexError> {
    ctx.fee_gate.enforce(&ctx.caller, FeeCode::RemoveLiquidity)?;

    require_positive(&args.liquidity, "liquidity")?;

    let pool_key = PoolKey::new(args.token0.clone(), args.token1.clone(), args.fee.clone());
    let pool_hash = pool_key.gen_pool_hash();

    let position = read_state(|s| {
        s.get_position(&PositionKey {
            pool_hash: pool_hash.clone(),
            position_id: args.position_id.clone(),
        })
    })
    .ok_or_else(|| DexError::NotFound(format!("position {} not found", args.position_id)))?;

    let success = modify_liquidity(ModifyLiquidityParams {
        owner: ctx.caller.clone(),
        pool_key,
        tick_lower: position.tick_lower,
        tick_upper: position.tick_upper,
        liquidity_delta: -args.liquidity.f18(),
        position_id: Some(args.position_id.clone()),
    })?;

    // burning owes the owner the (non-positive) deltas back
    let amount0 = -success.balance_delta.amount0();
    let amount1 = -success.balance_delta.amount1();

    success.buffer_state.apply();
    balances::credit(&ctx.caller, &args.token0, &amount0);
    balances::credit(&ctx.caller, &args.token1, &amount1);

    info!(
        "{} removed {} liquidity from position {}",
        ctx.caller, args.liquidity, args.position_id
    );

    Ok(RemoveLiquidityResponse { amount0, amount1 })
}
