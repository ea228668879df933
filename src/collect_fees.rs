use log::info;

use crate::api_types::position::{CollectPositionFeesArgs, CollectPositionFeesResponse};
use crate::balances;
use crate::errors::DexError;
use crate::fee_gate::{FeeCode, TxContext};
use crate::libraries::fixed_point::Decimal;
use crate::pool::types::PoolKey;
use crate::position::types::PositionKey;
use crate::position::update_position;
use crate::state::{mutate_state, read_state};
use crate::tick::get_fee_growth_inside;
use crate::tick::types::TickKey;

/// Settles a position's accrued fees to its owner's balances. The position
/// is poked against the current in-range fee growth first so fees earned
/// since the last touch are included.
pub fn collect_position_fees(
    ctx: &TxContext,
    args: CollectPositionFeesArgs,
) -> Result<CollectPositionFeesResponse, DexError> {
    ctx.fee_gate
        .enforce(&ctx.caller, FeeCode::CollectPositionFees)?;

    let pool_key = PoolKey::new(args.token0.clone(), args.token1.clone(), args.fee.clone());
    let pool_hash = pool_key.gen_pool_hash();

    let mut pool = read_state(|s| s.get_pool(&pool_key)).ok_or_else(|| {
        DexError::NotFound(format!(
            "pool not found for {}/{}/{}",
            args.token0, args.token1, args.fee
        ))
    })?;

    let position_key = PositionKey {
        pool_hash: pool_hash.clone(),
        position_id: args.position_id.clone(),
    };
    let mut position = read_state(|s| s.get_position(&position_key))
        .ok_or_else(|| DexError::NotFound(format!("position {} not found", args.position_id)))?;
    if position.owner != ctx.caller {
        return Err(DexError::Unauthorized(format!(
            "position {} is not owned by {}",
            args.position_id, ctx.caller
        )));
    }

    // poke the position so growth since the last touch lands in tokens_owed;
    // a fully burned position has nothing further to accrue
    if position.liquidity.is_positive() {
        let lower = read_state(|s| {
            s.get_tick_or_default(&TickKey {
                pool_hash: pool_hash.clone(),
                tick: position.tick_lower,
            })
        });
        let upper = read_state(|s| {
            s.get_tick_or_default(&TickKey {
                pool_hash: pool_hash.clone(),
                tick: position.tick_upper,
            })
        });
        let (fee_growth_inside_0, fee_growth_inside_1) = get_fee_growth_inside(
            position.tick_lower,
            position.tick_upper,
            &lower,
            &upper,
            pool.tick,
            &pool.fee_growth_global_0,
            &pool.fee_growth_global_1,
        );
        update_position(
            &mut position,
            &Decimal::zero(),
            &fee_growth_inside_0,
            &fee_growth_inside_1,
        )
        .map_err(|e| DexError::Inconsistent(format!("fee settlement failed: {e:?}")))?;
    }

    let amount0 = position.tokens_owed_0.clone();
    let amount1 = position.tokens_owed_1.clone();
    position.tokens_owed_0 = Decimal::zero();
    position.tokens_owed_1 = Decimal::zero();

    pool.reserve0 = (&pool.reserve0 - &amount0).f18();
    pool.reserve1 = (&pool.reserve1 - &amount1).f18();

    mutate_state(|s| {
        s.set_position(position_key, position);
        s.set_pool(pool_key, pool);
    });
    balances::credit(&ctx.caller, &args.token0, &amount0);
    balances::credit(&ctx.caller, &args.token1, &amount1);

    info!(
        "{} collected fees from position {}: {amount0} / {amount1}",
        ctx.caller, args.position_id
    );

    Ok(CollectPositionFeesResponse { amount0, amount1 })
}
