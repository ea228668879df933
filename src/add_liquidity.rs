use log::info;

use crate::api_types::position::{AddLiquidityArgs, AddLiquidityResponse};
use crate::balances;
use crate::errors::DexError;
use crate::fee_gate::{FeeCode, TxContext};
use crate::libraries::liquidity_amounts::get_liquidity_for_amounts;
use crate::libraries::tick_math::TickMath;
use crate::pool::modify_liquidity::{ModifyLiquidityParams, modify_liquidity};
use crate::pool::types::PoolKey;
use crate::state::read_state;
use crate::validation::liquidity_args::validate_tick_range;
use crate::validation::{require_non_negative, require_positive};

/// Mints liquidity into a tick range, creating a new position or growing an
/// existing one. The liquidity bought is the largest the desired amounts
/// afford at the current price; the owner pays exactly what that liquidity
/// spans.
pub fn add_liquidity(ctx: &TxContext, args: AddLiquidityArgs) -> Result<AddLiquidityResponse, DexError> {
    ctx.fee_gate.enforce(&ctx.caller, FeeCode::AddLiquidity)?;

    if args.token0 >= args.token1 {
        return Err(DexError::Validation(
            "token0 must sort before token1".to_string(),
        ));
    }
    require_non_negative(&args.amount0_desired, "amount0")?;
    require_non_negative(&args.amount1_desired, "amount1")?;

    let pool_key = PoolKey::new(args.token0.clone(), args.token1.clone(), args.fee.clone());
    let pool = read_state(|s| s.get_pool(&pool_key)).ok_or_else(|| {
        DexError::NotFound(format!(
            "pool not found for {}/{}/{}",
            args.token0, args.token1, args.fee
        ))
    })?;

    validate_tick_range(args.tick_lower, args.tick_upper, pool.tick_spacing.0)?;

    let liquidity = get_liquidity_for_amounts(
        &pool.sqrt_price,
        &TickMath::sqrt_price_at_tick(args.tick_lower),
        &TickMath::sqrt_price_at_tick(args.tick_upper),
        &args.amount0_desired.f18(),
        &args.amount1_desired.f18(),
    );
    require_positive(&liquidity, "computed liquidity")?;

    let success = modify_liquidity(ModifyLiquidityParams {
        owner: ctx.caller.clone(),
        pool_key,
        tick_lower: args.tick_lower,
        tick_upper: args.tick_upper,
        liquidity_delta: liquidity.clone(),
        position_id: args.position_id,
    })?;

    // minting owes the pool non-negative amounts on both legs
    let amount0 = success.balance_delta.amount0().clone();
    let amount1 = success.balance_delta.amount1().clone();

    balances::debit(&ctx.caller, &args.token0, &amount0)?;
    if let Err(e) = balances::debit(&ctx.caller, &args.token1, &amount1) {
        // refund the first leg so a failed mint leaves balances untouched
        balances::credit(&ctx.caller, &args.token0, &amount0);
        return Err(e);
    }
    let position_id = success.buffer_state.apply();

    info!(
        "{} added {} liquidity to {}:{} as position {}",
        ctx.caller, liquidity, args.tick_lower, args.tick_upper, position_id
    );

    Ok(AddLiquidityResponse {
        position_id,
        liquidity,
        amount0,
        amount1,
    })
}
