use super::fixed_point::Decimal;
use super::sqrt_price_math::{
    SqrtPriceMathError, get_amount_0_delta, get_amount_1_delta, get_next_sqrt_price_from_input,
    get_next_sqrt_price_from_output,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComputeSwapError {
    InvalidPriceOrLiquidity,
    InvalidFee,
    NotEnoughLiquidity,
}

impl From<SqrtPriceMathError> for ComputeSwapError {
    fn from(_: SqrtPriceMathError) -> Self {
        ComputeSwapError::NotEnoughLiquidity
    }
}

/// Computes the sqrt price target for the next swap step: the price at the
/// next tick, unless that lies beyond the caller's price limit, in which
/// case the limit itself.
pub fn get_sqrt_price_target(
    zero_for_one: bool,
    sqrt_price_next: &Decimal,
    sqrt_price_limit: &Decimal,
) -> Result<Decimal, ComputeSwapError> {
    if !sqrt_price_next.is_positive() || !sqrt_price_limit.is_positive() {
        return Err(ComputeSwapError::InvalidPriceOrLiquidity);
    }

    Ok(if zero_for_one {
        sqrt_price_next.max(sqrt_price_limit).clone()
    } else {
        sqrt_price_next.min(sqrt_price_limit).clone()
    })
}

/// One swap step's outcome. All amounts are unsigned canonical-scale
/// quantities; `fee_amount` was taken from the input on top of `amount_in`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapStepResult {
    pub sqrt_price_next: Decimal,
    pub amount_in: Decimal,
    pub amount_out: Decimal,
    pub fee_amount: Decimal,
}

/// Computes the result of swapping some amount in or out within one tick
/// range, given the parameters of the swap.
///
/// `amount_remaining` is positive for exact input (the amount still to be
/// paid in, fee inclusive) and negative for exact output (the amount still
/// owed out). Direction is inferred from the target price. The fee is
/// charged strictly on the input side: on the path that exhausts the
/// remaining input the fee is the residue `amount_remaining - amount_in`,
/// on the path that reaches the target it is grossed up from `amount_in`
/// with `fee / (1 - fee)`.
///
/// With zero liquidity every amount is zero and the price jumps straight to
/// the target, so a step can never stall: either the remaining amount
/// shrinks or the price reaches a tick boundary or the limit.
pub fn compute_swap_step(
    sqrt_price_current: &Decimal,
    sqrt_price_target: &Decimal,
    liquidity: &Decimal,
    amount_remaining: &Decimal,
    fee: &Decimal,
) -> Result<SwapStepResult, ComputeSwapError> {
    if !sqrt_price_current.is_positive() || liquidity.is_negative() {
        return Err(ComputeSwapError::InvalidPriceOrLiquidity);
    }
    if fee.is_negative() || fee >= &Decimal::one() {
        return Err(ComputeSwapError::InvalidFee);
    }

    let zero_for_one = sqrt_price_current >= sqrt_price_target;
    let exact_in = amount_remaining.is_positive();
    let one_minus_fee = &Decimal::one() - fee;

    if exact_in {
        let amount_remaining_less_fee = (amount_remaining * &one_minus_fee).f18();
        let amount_in_to_target = if zero_for_one {
            get_amount_0_delta(sqrt_price_target, sqrt_price_current, liquidity).f18()
        } else {
            get_amount_1_delta(sqrt_price_current, sqrt_price_target, liquidity).f18()
        };

        let (sqrt_price_next, amount_in, fee_amount) =
            if amount_remaining_less_fee >= amount_in_to_target {
                // the input suffices to push the price all the way to the target
                let fee_amount = (&(&amount_in_to_target * fee) / &one_minus_fee).f18();
                (sqrt_price_target.clone(), amount_in_to_target, fee_amount)
            } else {
                // the entire remaining input is consumed before the target
                let amount_in = amount_remaining_less_fee;
                let sqrt_price_next = get_next_sqrt_price_from_input(
                    sqrt_price_current,
                    liquidity,
                    &amount_in,
                    zero_for_one,
                );
                let fee_amount = (amount_remaining - &amount_in).f18();
                (sqrt_price_next, amount_in, fee_amount)
            };

        let amount_out = if zero_for_one {
            get_amount_1_delta(&sqrt_price_next, sqrt_price_current, liquidity).f18()
        } else {
            get_amount_0_delta(sqrt_price_current, &sqrt_price_next, liquidity).f18()
        };

        Ok(SwapStepResult {
            sqrt_price_next,
            amount_in,
            amount_out,
            fee_amount,
        })
    } else {
        let amount_out_to_target = if zero_for_one {
            get_amount_1_delta(sqrt_price_target, sqrt_price_current, liquidity).f18()
        } else {
            get_amount_0_delta(sqrt_price_current, sqrt_price_target, liquidity).f18()
        };

        let amount_remaining_abs = -amount_remaining;
        let (sqrt_price_next, amount_out) = if amount_remaining_abs >= amount_out_to_target {
            (sqrt_price_target.clone(), amount_out_to_target)
        } else {
            let sqrt_price_next = get_next_sqrt_price_from_output(
                sqrt_price_current,
                liquidity,
                &amount_remaining_abs,
                zero_for_one,
            )?;
            (sqrt_price_next, amount_remaining_abs)
        };

        let amount_in = if zero_for_one {
            get_amount_0_delta(&sqrt_price_next, sqrt_price_current, liquidity).f18()
        } else {
            get_amount_1_delta(sqrt_price_current, &sqrt_price_next, liquidity).f18()
        };
        let fee_amount = (&(&amount_in * fee) / &one_minus_fee).f18();

        Ok(SwapStepResult {
            sqrt_price_next,
            amount_in,
            amount_out,
            fee_amount,
        })
    }
}
