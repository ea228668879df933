use log::info;

use crate::api_types::pool::CreatePoolArgs;
use crate::errors::DexError;
use crate::fee_gate::{FeeCode, TxContext};
use crate::libraries::constants::{MAX_SQRT_PRICE, MIN_SQRT_PRICE};
use crate::libraries::tick_math::TickMath;
use crate::state::{mutate_state, read_state};

use super::types::{FeeTier, Pool, PoolKey};

/// Creates a pool for an ordered token pair at a supported fee tier,
/// initialized at the given sqrt price with no liquidity.
pub fn create_pool(ctx: &TxContext, args: CreatePoolArgs) -> Result<PoolKey, DexError> {
    ctx.fee_gate.enforce(&ctx.caller, FeeCode::CreatePool)?;

    if args.token0.is_empty() || args.token1.is_empty() {
        return Err(DexError::Validation("token keys must not be empty".to_string()));
    }
    if args.token0 >= args.token1 {
        return Err(DexError::Validation(
            "token0 must sort before token1".to_string(),
        ));
    }
    if args.initial_sqrt_price < *MIN_SQRT_PRICE || args.initial_sqrt_price > *MAX_SQRT_PRICE {
        return Err(DexError::Validation(
            "initial sqrt price out of bounds".to_string(),
        ));
    }

    let fee = FeeTier(args.fee.clone());
    let tick_spacing = read_state(|s| s.get_tick_spacing(&fee)).ok_or_else(|| {
        DexError::Validation(format!("unsupported fee tier {}", args.fee))
    })?;

    let pool_key = PoolKey {
        token0: args.token0,
        token1: args.token1,
        fee,
    };

    if read_state(|s| s.get_pool(&pool_key)).is_some() {
        return Err(DexError::Conflict("pool already exists".to_string()));
    }

    let tick = TickMath::tick_at_sqrt_price(&args.initial_sqrt_price);
    let pool = Pool::initialized_at(args.initial_sqrt_price, tick, tick_spacing);

    mutate_state(|s| s.set_pool(pool_key.clone(), pool));

    info!(
        "created pool {} ({}/{}, fee {})",
        pool_key.gen_pool_hash(),
        pool_key.token0,
        pool_key.token1,
        pool_key.fee.0
    );

    Ok(pool_key)
}
