use crate::libraries::fixed_point::Decimal;
use crate::libraries::liquidity_math::{self, AddDeltaError};
use types::TickData;

pub mod types;


/// Fee growth accumulated inside a tick range, derived from the two bounding
/// ticks' outside accumulators and the current tick position.
pub fn get_fee_growth_inside(
    tick_lower: i32,
    tick_upper: i32,
    lower: &TickData,
    upper: &TickData,
    tick_current: i32,
    fee_growth_global_0: &Decimal,
    fee_growth_global_1: &Decimal,
) -> (Decimal, Decimal) {
    let (fee_growth_below_0, fee_growth_below_1) = if tick_current >= tick_lower {
        (
            lower.fee_growth_outside_0.clone(),
            lower.fee_growth_outside_1.clone(),
        )
    } else {
        (
            fee_growth_global_0 - &lower.fee_growth_outside_0,
            fee_growth_global_1 - &lower.fee_growth_outside_1,
        )
    };

    let (fee_growth_above_0, fee_growth_above_1) = if tick_current < tick_upper {
        (
            upper.fee_growth_outside_0.clone(),
            upper.fee_growth_outside_1.clone(),
        )
    } else {
        (
            fee_growth_global_0 - &upper.fee_growth_outside_0,
            fee_growth_global_1 - &upper.fee_growth_outside_1,
        )
    };

    (
        &(fee_growth_global_0 - &fee_growth_below_0) - &fee_growth_above_0,
        &(fee_growth_global_1 - &fee_growth_below_1) - &fee_growth_above_1,
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTickSuccess {
    pub flipped: bool,
    pub liquidity_gross_after: Decimal,
    pub updated_tick: TickData,
}

/// Applies a liquidity change to one bounding tick of a range and reports
/// whether the tick flipped between initialized and uninitialized.
///
/// The updated record is returned rather than stored: callers buffer it
/// together with their other writes so a later failure leaves no partial
/// state behind.
pub fn update_tick(
    tick_data: TickData,
    tick: i32,
    tick_current: i32,
    liquidity_delta: &Decimal,
    fee_growth_global_0: &Decimal,
    fee_growth_global_1: &Decimal,
    upper: bool,
) -> Result<UpdateTickSuccess, AddDeltaError> {
    let mut tick_data = tick_data;

    let liquidity_gross_before = tick_data.liquidity_gross.clone();
    let liquidity_gross_after =
        liquidity_math::add_delta(&liquidity_gross_before, liquidity_delta)?;

    let flipped = liquidity_gross_after.is_zero() != liquidity_gross_before.is_zero();

    if liquidity_gross_before.is_zero() {
        // by convention, all growth before a tick was initialized happened
        // below the tick
        if tick <= tick_current {
            tick_data.fee_growth_outside_0 = fee_growth_global_0.clone();
            tick_data.fee_growth_outside_1 = fee_growth_global_1.clone();
        }
    }

    tick_data.liquidity_gross = liquidity_gross_after.clone();
    tick_data.initialized = !liquidity_gross_after.is_zero();

    // when the lower (upper) tick is crossed left to right, liquidity must
    // be added (removed)
    tick_data.liquidity_net = if upper {
        &tick_data.liquidity_net - liquidity_delta
    } else {
        &tick_data.liquidity_net + liquidity_delta
    };

    Ok(UpdateTickSuccess {
        flipped,
        liquidity_gross_after,
        updated_tick: tick_data,
    })
}

/// Transitions a tick as the price crosses it: flips the outside fee
/// accumulators relative to the globals and returns the liquidity to apply
/// (negated by the caller when moving leftward).
pub fn cross_tick(
    tick_data: &mut TickData,
    fee_growth_global_0: &Decimal,
    fee_growth_global_1: &Decimal,
) -> Decimal {
    tick_data.fee_growth_outside_0 = fee_growth_global_0 - &tick_data.fee_growth_outside_0;
    tick_data.fee_growth_outside_1 = fee_growth_global_1 - &tick_data.fee_growth_outside_1;

    tick_data.liquidity_net.clone()
}
