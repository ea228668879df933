use crate::errors::DexError;
use crate::libraries::{
    balance_delta::BalanceDelta,
    constants::{MAX_SQRT_PRICE, MAX_TICK, MIN_SQRT_PRICE, MIN_TICK},
    fixed_point::Decimal,
    liquidity_math,
    swap_math::{ComputeSwapError, compute_swap_step, get_sqrt_price_target},
    tick_bitmap::next_initialized_tick_within_one_word,
    tick_math::TickMath,
};
use crate::state::read_state;
use crate::tick::{
    cross_tick,
    types::{TickData, TickKey},
};

use super::types::{Pool, PoolKey};

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SwapParams {
    pub pool_key: PoolKey,
    /// Positive for exact input, negative for exact output.
    pub amount_specified: Decimal,
    pub zero_for_one: bool,
    pub sqrt_price_limit: Decimal,
}

/// Transient state of the swap machine, shadowing the pool while the loop
/// runs and written back only on success.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SwapState {
    pub sqrt_price: Decimal,
    pub tick: i32,
    pub liquidity: Decimal,
    /// Unsatisfied portion of the caller's amount; driven toward zero.
    pub amount_specified_remaining: Decimal,
    /// Counterpart amount, pool-perspective: positive is owed to the pool,
    /// negative is owed by it.
    pub amount_calculated: Decimal,
    /// Fee growth accumulator for the token being paid in.
    pub fee_growth_global: Decimal,
    /// Protocol's cut of the fees collected by this swap.
    pub protocol_fee: Decimal,
}

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct StepComputations {
    // the price at the beginning of the step
    pub sqrt_price_start: Decimal,
    // the next tick to swap to from the current tick in the swap direction
    pub tick_next: i32,
    // whether tick_next is initialized or not
    pub initialized: bool,
    // sqrt price for the next tick (1/0)
    pub sqrt_price_next: Decimal,
    // how much is being swapped in in this step
    pub amount_in: Decimal,
    // how much is being swapped out
    pub amount_out: Decimal,
    // how much fee is being paid in
    pub fee_amount: Decimal,
}

/// Buffer for state changes to apply only on success. In case of failure no
/// state transition is triggered.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SwapBufferState {
    pub pool: (PoolKey, Pool),
    pub crossed_ticks: Vec<(TickKey, TickData)>,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct SwapSuccess {
    /// Pool-perspective token deltas: positive flows into the pool.
    pub swap_delta: BalanceDelta,
    /// Portion of the collected fee diverted to the protocol.
    pub amount_to_protocol: Decimal,
    pub buffer_state: SwapBufferState,
}

/// Executes a swap against the pool, walking initialized ticks in the
/// direction of trade until the specified amount is used up (under `f18`)
/// or the caller's price limit is reached.
pub fn swap_inner(params: SwapParams) -> Result<SwapSuccess, DexError> {
    let pool_initial = read_state(|s| s.get_pool(&params.pool_key)).ok_or_else(|| {
        DexError::NotFound(format!(
            "pool not found for {}/{}/{}",
            params.pool_key.token0, params.pool_key.token1, params.pool_key.fee.0
        ))
    })?;
    let tick_spacing = pool_initial.tick_spacing;
    let pool_hash = params.pool_key.gen_pool_hash();
    let fee = params.pool_key.fee.0.clone();

    validate_price_limits(
        params.zero_for_one,
        &params.sqrt_price_limit,
        &pool_initial.sqrt_price,
    )?;

    let exact_input = params.amount_specified.is_positive();

    let mut buffer_state = SwapBufferState {
        pool: (params.pool_key.clone(), pool_initial.clone()),
        crossed_ticks: vec![],
    };

    let mut state = SwapState {
        sqrt_price: pool_initial.sqrt_price.clone(),
        tick: pool_initial.tick,
        liquidity: pool_initial.liquidity.clone(),
        amount_specified_remaining: params.amount_specified.clone(),
        amount_calculated: Decimal::zero(),
        fee_growth_global: if params.zero_for_one {
            pool_initial.fee_growth_global_0.clone()
        } else {
            pool_initial.fee_growth_global_1.clone()
        },
        protocol_fee: Decimal::zero(),
    };
    let mut step = StepComputations::default();

    // continue swapping as long as the amount is not used up and the price
    // limit has not been reached
    while !(state.amount_specified_remaining.f18().is_zero()
        || state.sqrt_price == params.sqrt_price_limit)
    {
        step.sqrt_price_start = state.sqrt_price.clone();

        // Find the next initialized tick in the swap direction.
        let (tick_next, initialized) = next_initialized_tick_within_one_word(
            &pool_initial.bitmap,
            state.tick,
            tick_spacing.0,
            params.zero_for_one,
        );
        if tick_next < MIN_TICK || tick_next > MAX_TICK {
            return Err(DexError::insufficient_liquidity());
        }
        step.tick_next = tick_next;
        step.initialized = initialized;
        step.sqrt_price_next = TickMath::sqrt_price_at_tick(tick_next);

        // Swap toward the next tick, capped at the price limit.
        let target = get_sqrt_price_target(
            params.zero_for_one,
            &step.sqrt_price_next,
            &params.sqrt_price_limit,
        )
        .expect("Bug: prices were validated before the loop");

        let result = compute_swap_step(
            &state.sqrt_price,
            &target,
            &state.liquidity,
            &state.amount_specified_remaining,
            &fee,
        )
        .map_err(|e| match e {
            ComputeSwapError::NotEnoughLiquidity => DexError::insufficient_liquidity(),
            other => DexError::Inconsistent(format!("swap step rejected pool parameters: {other:?}")),
        })?;

        state.sqrt_price = result.sqrt_price_next;
        step.amount_in = result.amount_in;
        step.amount_out = result.amount_out;
        step.fee_amount = result.fee_amount;

        // Update remaining and calculated amounts per the sign convention.
        if exact_input {
            state.amount_specified_remaining =
                &state.amount_specified_remaining - &(&step.amount_in + &step.fee_amount);
            state.amount_calculated = &state.amount_calculated - &step.amount_out;
        } else {
            state.amount_specified_remaining =
                &state.amount_specified_remaining + &step.amount_out;
            state.amount_calculated =
                &state.amount_calculated + &(&step.amount_in + &step.fee_amount);
        }

        // Divert the protocol's share of the step fee.
        if pool_initial.protocol_fees.is_positive() {
            let delta = (&step.fee_amount * &pool_initial.protocol_fees).f18();
            step.fee_amount = &step.fee_amount - &delta;
            state.protocol_fee = &state.protocol_fee + &delta;
        }

        // Accrue the remainder to in-range liquidity. With no liquidity in
        // range the fee cannot be attributed and is dropped.
        if state.liquidity.is_positive() {
            state.fee_growth_global =
                &state.fee_growth_global + &(&step.fee_amount / &state.liquidity);
        }

        // Shift tick if we reached the next tick's price, decrementing to
        // tick_next - 1 for zero-for-one so the walk continues leftward.
        if state.sqrt_price == step.sqrt_price_next {
            if step.initialized {
                let (fee_growth_global_0, fee_growth_global_1) = if params.zero_for_one {
                    (
                        state.fee_growth_global.clone(),
                        pool_initial.fee_growth_global_1.clone(),
                    )
                } else {
                    (
                        pool_initial.fee_growth_global_0.clone(),
                        state.fee_growth_global.clone(),
                    )
                };

                let next_tick_key = TickKey {
                    pool_hash: pool_hash.clone(),
                    tick: step.tick_next,
                };

                // tick crossing, against the buffered record if this swap
                // already crossed it once
                let mut liquidity_net = match buffer_state
                    .crossed_ticks
                    .iter_mut()
                    .find(|(key, _)| key == &next_tick_key)
                {
                    Some((_, data)) => cross_tick(data, &fee_growth_global_0, &fee_growth_global_1),
                    None => {
                        let mut data =
                            read_state(|s| s.get_tick(&next_tick_key)).ok_or_else(|| {
                                DexError::Inconsistent(format!(
                                    "tick data missing for initialized tick {}",
                                    step.tick_next
                                ))
                            })?;
                        let net = cross_tick(&mut data, &fee_growth_global_0, &fee_growth_global_1);
                        buffer_state.crossed_ticks.push((next_tick_key, data));
                        net
                    }
                };

                // moving leftward, liquidity_net takes the opposite sign
                if params.zero_for_one {
                    liquidity_net = -liquidity_net;
                }

                state.liquidity = liquidity_math::add_delta(&state.liquidity, &liquidity_net)
                    .map_err(|_| {
                        DexError::Inconsistent(
                            "crossing tick would drive liquidity negative".to_string(),
                        )
                    })?;
            }
            state.tick = if params.zero_for_one {
                step.tick_next - 1
            } else {
                step.tick_next
            };
        } else if state.sqrt_price != step.sqrt_price_start {
            // recompute unless we are on a tick boundary already
            state.tick = TickMath::tick_at_sqrt_price(&state.sqrt_price);
        }
    }

    let swap_delta = compute_swap_delta(
        params.zero_for_one,
        exact_input,
        &params.amount_specified,
        &state.amount_specified_remaining,
        &state.amount_calculated,
    );

    update_buffer_state(&mut buffer_state, &state, &pool_initial, params.zero_for_one, &swap_delta);

    Ok(SwapSuccess {
        swap_delta,
        amount_to_protocol: state.protocol_fee,
        buffer_state,
    })
}

/// Applies the buffered pool and tick writes of a successful swap.
pub fn apply_swap_buffer(buffer: SwapBufferState) {
    crate::state::mutate_state(|s| {
        let (pool_key, pool) = buffer.pool;
        s.set_pool(pool_key, pool);
        for (tick_key, tick_data) in buffer.crossed_ticks {
            s.set_tick(tick_key, tick_data);
        }
    });
}

/// Validates price limits for the swap based on direction and pool state.
fn validate_price_limits(
    zero_for_one: bool,
    sqrt_price_limit: &Decimal,
    sqrt_price_current: &Decimal,
) -> Result<(), DexError> {
    if zero_for_one {
        if sqrt_price_limit >= sqrt_price_current {
            return Err(DexError::Validation(
                "price limit already exceeded".to_string(),
            ));
        }
        if sqrt_price_limit < &*MIN_SQRT_PRICE {
            return Err(DexError::Validation("price limit out of bounds".to_string()));
        }
    } else {
        if sqrt_price_limit <= sqrt_price_current {
            return Err(DexError::Validation(
                "price limit already exceeded".to_string(),
            ));
        }
        if sqrt_price_limit > &*MAX_SQRT_PRICE {
            return Err(DexError::Validation("price limit out of bounds".to_string()));
        }
    }
    Ok(())
}

/// Computes the final pool-perspective swap delta. The specified leg is the
/// token0 side exactly when direction and exactness agree.
fn compute_swap_delta(
    zero_for_one: bool,
    exact_input: bool,
    amount_specified: &Decimal,
    amount_remaining: &Decimal,
    amount_calculated: &Decimal,
) -> BalanceDelta {
    let specified_delta = amount_specified - amount_remaining;
    if zero_for_one == exact_input {
        BalanceDelta::new(specified_delta, amount_calculated.clone())
    } else {
        BalanceDelta::new(amount_calculated.clone(), specified_delta)
    }
}

/// Writes final swap results into the buffered pool.
fn update_buffer_state(
    buffer_state: &mut SwapBufferState,
    state: &SwapState,
    pool_initial: &Pool,
    zero_for_one: bool,
    swap_delta: &BalanceDelta,
) {
    let pool = &mut buffer_state.pool.1;

    pool.sqrt_price = state.sqrt_price.clone();
    pool.tick = state.tick;

    if pool_initial.liquidity != state.liquidity {
        pool.liquidity = state.liquidity.clone();
    }

    // positive deltas flow into the pool
    pool.reserve0 = (&pool.reserve0 + swap_delta.amount0()).f18();
    pool.reserve1 = (&pool.reserve1 + swap_delta.amount1()).f18();

    if zero_for_one {
        pool.fee_growth_global_0 = state.fee_growth_global.clone();
        pool.protocol_fees_token0 = (&pool.protocol_fees_token0 + &state.protocol_fee).f18();
    } else {
        pool.fee_growth_global_1 = state.fee_growth_global.clone();
        pool.protocol_fees_token1 = (&pool.protocol_fees_token1 + &state.protocol_fee).f18();
    }
}
