use log::info;

use crate::api_types::swap::{SwapArgs, SwapResponse};
use crate::balances;
use crate::errors::DexError;
use crate::fee_gate::{FeeCode, TxContext};
use crate::pool::swap::{SwapParams, apply_swap_buffer, swap_inner};
use crate::validation::swap_args::validate_swap_args;

/// Executes a swap for the caller, paying the input side out of the
/// caller's balances and crediting the output side to the recipient.
///
/// Fails without touching state; on success the buffered pool and tick
/// writes are applied together with the balance movements.
pub fn swap(ctx: &TxContext, args: SwapArgs) -> Result<SwapResponse, DexError> {
    ctx.fee_gate.enforce(&ctx.caller, FeeCode::Swap)?;

    let validated = validate_swap_args(args)?;

    let success = swap_inner(SwapParams {
        pool_key: validated.pool_key.clone(),
        amount_specified: validated.amount_specified.clone(),
        zero_for_one: validated.zero_for_one,
        sqrt_price_limit: validated.sqrt_price_limit.clone(),
    })?;

    // pool-perspective deltas: the input leg is positive, the output leg
    // negative
    let (amount_in, amount_out) = if validated.zero_for_one {
        (
            success.swap_delta.amount0().clone(),
            -success.swap_delta.amount1(),
        )
    } else {
        (
            success.swap_delta.amount1().clone(),
            -success.swap_delta.amount0(),
        )
    };

    // the debit is the only fallible settlement step, so it runs before any
    // state is applied
    balances::debit(&ctx.caller, &validated.token_in, &amount_in)?;
    apply_swap_buffer(success.buffer_state);
    balances::credit(&validated.recipient, &validated.token_out, &amount_out);

    info!(
        "swap by {}: {} {} in, {} {} out to {}",
        ctx.caller, amount_in, validated.token_in, amount_out, validated.token_out,
        validated.recipient
    );

    Ok(SwapResponse {
        token_in: validated.token_in,
        token_out: validated.token_out,
        amount_in,
        amount_out,
    })
}
