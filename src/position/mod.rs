use crate::libraries::fixed_point::Decimal;
use crate::libraries::liquidity_math::{self, AddDeltaError};
use types::Position;

pub mod paging;
pub mod types;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePositionError {
    ZeroLiquidity,
    AddDeltaError(AddDeltaError),
}

/// Applies a liquidity change to a position and credits the fees it has
/// accrued since the last touch into `tokens_owed_{0,1}`.
///
/// `fee_growth_inside_{0,1}` are the all-time per-unit-liquidity fee
/// accumulators inside the position's tick range; the difference against the
/// position's snapshot times its liquidity is what the owner is owed.
pub fn update_position(
    position: &mut Position,
    liquidity_delta: &Decimal,
    fee_growth_inside_0: &Decimal,
    fee_growth_inside_1: &Decimal,
) -> Result<(), UpdatePositionError> {
    let liquidity = position.liquidity.clone();

    if liquidity_delta.is_zero() && liquidity.is_zero() {
        // disallow pokes for 0 liquidity positions
        return Err(UpdatePositionError::ZeroLiquidity);
    }

    let fee0_owed =
        (&(fee_growth_inside_0 - &position.fee_growth_inside_0_last) * &liquidity).f18();
    let fee1_owed =
        (&(fee_growth_inside_1 - &position.fee_growth_inside_1_last) * &liquidity).f18();

    position.liquidity = liquidity_math::add_delta(&liquidity, liquidity_delta)
        .map_err(UpdatePositionError::AddDeltaError)?;
    position.fee_growth_inside_0_last = fee_growth_inside_0.clone();
    position.fee_growth_inside_1_last = fee_growth_inside_1.clone();
    position.tokens_owed_0 = &position.tokens_owed_0 + &fee0_owed;
    position.tokens_owed_1 = &position.tokens_owed_1 + &fee1_owed;

    Ok(())
}
