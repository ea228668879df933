use crate::errors::DexError;
use crate::libraries::{
    balance_delta::BalanceDelta,
    fixed_point::Decimal,
    liquidity_math,
    sqrt_price_math::{get_amount_0_delta_signed, get_amount_1_delta_signed},
    tick_bitmap,
    tick_math::TickMath,
};
use crate::position::types::{DexPositionOwner, Position, PositionKey, PositionOwnerKey};
use crate::position::{UpdatePositionError, update_position};
use crate::state::{mutate_state, read_state};
use crate::tick::types::{TickData, TickKey};
use crate::tick::update_tick;

use super::types::{Pool, PoolKey};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModifyLiquidityParams {
    pub owner: String,
    pub pool_key: PoolKey,
    pub tick_lower: i32,
    pub tick_upper: i32,
    /// Positive mints liquidity into the range, negative burns it.
    pub liquidity_delta: Decimal,
    /// Target position; `None` mints a fresh one.
    pub position_id: Option<String>,
}

/// Buffered writes of a liquidity modification, applied only on success.
/// `None` tick data removes the record (its gross liquidity returned to
/// zero). A `None` position id means the position is new; its identifier is
/// minted inside [`ModifyLiquidityBuffer::apply`] so a failed modification
/// never touches the id counter or the owner index.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModifyLiquidityBuffer {
    pub pool: (PoolKey, Pool),
    pub pool_hash: String,
    pub ticks: Vec<(TickKey, Option<TickData>)>,
    pub position_id: Option<String>,
    pub position: Position,
}

impl ModifyLiquidityBuffer {
    /// Persists every buffered write in one state mutation and returns the
    /// position's identifier (freshly minted for a new position).
    pub fn apply(self) -> String {
        mutate_state(|s| {
            let (pool_key, pool) = self.pool;
            s.set_pool(pool_key, pool);
            for (tick_key, tick_data) in self.ticks {
                match tick_data {
                    Some(data) => s.set_tick(tick_key, data),
                    None => s.remove_tick(&tick_key),
                }
            }

            let position_id = match self.position_id {
                Some(id) => id,
                None => {
                    let id = s.next_position_id();
                    let owner_key = PositionOwnerKey {
                        owner: self.position.owner.clone(),
                        pool_hash: self.pool_hash.clone(),
                    };
                    let mut record = s.get_position_owner(&owner_key).unwrap_or_else(|| {
                        DexPositionOwner::new(self.position.owner.clone(), self.pool_hash.clone())
                    });
                    record.add_position(
                        self.position.tick_lower,
                        self.position.tick_upper,
                        id.clone(),
                    );
                    s.set_position_owner(owner_key, record);
                    id
                }
            };

            s.set_position(
                PositionKey {
                    pool_hash: self.pool_hash,
                    position_id: position_id.clone(),
                },
                self.position,
            );
            position_id
        })
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct ModifyLiquiditySuccess {
    /// Pool-perspective amounts: positive owed to the pool by the owner.
    pub balance_delta: BalanceDelta,
    pub buffer_state: ModifyLiquidityBuffer,
}

/// Applies a signed liquidity change to a position and the pool around it:
/// both bounding ticks, the bitmap, the owner's position index and, when
/// the range brackets the current price, the pool's active liquidity.
pub fn modify_liquidity(params: ModifyLiquidityParams) -> Result<ModifyLiquiditySuccess, DexError> {
    let mut pool = read_state(|s| s.get_pool(&params.pool_key)).ok_or_else(|| {
        DexError::NotFound(format!(
            "pool not found for {}/{}/{}",
            params.pool_key.token0, params.pool_key.token1, params.pool_key.fee.0
        ))
    })?;
    let pool_hash = params.pool_key.gen_pool_hash();

    // Resolve the target position. A fresh position has no identifier yet;
    // minting one is deferred to the buffer so it only happens on success.
    let mut position = match &params.position_id {
        Some(id) => {
            let key = PositionKey {
                pool_hash: pool_hash.clone(),
                position_id: id.clone(),
            };
            let position = read_state(|s| s.get_position(&key))
                .ok_or_else(|| DexError::NotFound(format!("position {id} not found")))?;
            if position.owner != params.owner {
                return Err(DexError::Unauthorized(format!(
                    "position {id} is not owned by {}",
                    params.owner
                )));
            }
            if position.tick_lower != params.tick_lower || position.tick_upper != params.tick_upper
            {
                return Err(DexError::Validation(format!(
                    "position {id} covers {}:{}, not {}:{}",
                    position.tick_lower, position.tick_upper, params.tick_lower, params.tick_upper
                )));
            }
            position
        }
        None => {
            if !params.liquidity_delta.is_positive() {
                return Err(DexError::Validation(
                    "burning liquidity requires a position id".to_string(),
                ));
            }
            Position {
                owner: params.owner.clone(),
                tick_lower: params.tick_lower,
                tick_upper: params.tick_upper,
                liquidity: Decimal::zero(),
                fee_growth_inside_0_last: Decimal::zero(),
                fee_growth_inside_1_last: Decimal::zero(),
                tokens_owed_0: Decimal::zero(),
                tokens_owed_1: Decimal::zero(),
            }
        }
    };

    // Update both bounding ticks.
    let lower_key = TickKey {
        pool_hash: pool_hash.clone(),
        tick: params.tick_lower,
    };
    let upper_key = TickKey {
        pool_hash: pool_hash.clone(),
        tick: params.tick_upper,
    };

    let lower_update = update_tick(
        read_state(|s| s.get_tick_or_default(&lower_key)),
        params.tick_lower,
        pool.tick,
        &params.liquidity_delta,
        &pool.fee_growth_global_0,
        &pool.fee_growth_global_1,
        false,
    )
    .map_err(|_| DexError::Conflict("tick liquidity underflow".to_string()))?;

    let upper_update = update_tick(
        read_state(|s| s.get_tick_or_default(&upper_key)),
        params.tick_upper,
        pool.tick,
        &params.liquidity_delta,
        &pool.fee_growth_global_0,
        &pool.fee_growth_global_1,
        true,
    )
    .map_err(|_| DexError::Conflict("tick liquidity underflow".to_string()))?;

    for (tick, flipped) in [
        (params.tick_lower, lower_update.flipped),
        (params.tick_upper, upper_update.flipped),
    ] {
        if flipped {
            tick_bitmap::flip_tick(&mut pool.bitmap, tick, pool.tick_spacing.0).map_err(|_| {
                DexError::Validation(format!(
                    "tick {tick} is not aligned to spacing {}",
                    pool.tick_spacing.0
                ))
            })?;
        }
    }

    // Settle the position against fee growth inside the range.
    let (fee_growth_inside_0, fee_growth_inside_1) = crate::tick::get_fee_growth_inside(
        params.tick_lower,
        params.tick_upper,
        &lower_update.updated_tick,
        &upper_update.updated_tick,
        pool.tick,
        &pool.fee_growth_global_0,
        &pool.fee_growth_global_1,
    );

    update_position(
        &mut position,
        &params.liquidity_delta,
        &fee_growth_inside_0,
        &fee_growth_inside_1,
    )
    .map_err(|e| match e {
        UpdatePositionError::ZeroLiquidity => {
            DexError::Validation("position has no liquidity".to_string())
        }
        UpdatePositionError::AddDeltaError(_) => {
            DexError::Conflict("position liquidity underflow".to_string())
        }
    })?;

    // Token amounts owed for the delta, by the range's relation to the
    // current price.
    let sqrt_price_lower = TickMath::sqrt_price_at_tick(params.tick_lower);
    let sqrt_price_upper = TickMath::sqrt_price_at_tick(params.tick_upper);

    let (amount0, amount1) = if pool.tick < params.tick_lower {
        (
            get_amount_0_delta_signed(&sqrt_price_lower, &sqrt_price_upper, &params.liquidity_delta),
            Decimal::zero(),
        )
    } else if pool.tick < params.tick_upper {
        let amount0 =
            get_amount_0_delta_signed(&pool.sqrt_price, &sqrt_price_upper, &params.liquidity_delta);
        let amount1 =
            get_amount_1_delta_signed(&sqrt_price_lower, &pool.sqrt_price, &params.liquidity_delta);
        pool.liquidity = liquidity_math::add_delta(&pool.liquidity, &params.liquidity_delta)
            .map_err(|_| DexError::Conflict("pool liquidity underflow".to_string()))?;
        (amount0, amount1)
    } else {
        (
            Decimal::zero(),
            get_amount_1_delta_signed(&sqrt_price_lower, &sqrt_price_upper, &params.liquidity_delta),
        )
    };

    pool.reserve0 = (&pool.reserve0 + &amount0).f18();
    pool.reserve1 = (&pool.reserve1 + &amount1).f18();

    let ticks = vec![
        (
            lower_key,
            (!lower_update.liquidity_gross_after.is_zero()).then_some(lower_update.updated_tick),
        ),
        (
            upper_key,
            (!upper_update.liquidity_gross_after.is_zero()).then_some(upper_update.updated_tick),
        ),
    ];

    Ok(ModifyLiquiditySuccess {
        balance_delta: BalanceDelta::new(amount0, amount1),
        buffer_state: ModifyLiquidityBuffer {
            pool: (params.pool_key, pool),
            pool_hash,
            ticks,
            position_id: params.position_id,
            position,
        },
    })
}
