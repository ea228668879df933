use crate::api_types::swap::SwapArgs;
use crate::errors::DexError;
use crate::libraries::fixed_point::Decimal;
use crate::pool::types::PoolKey;

use super::require_positive;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSwapArgs {
    pub pool_key: PoolKey,
    /// Signed per the engine convention: positive for exact input, negative
    /// for exact output.
    pub amount_specified: Decimal,
    pub zero_for_one: bool,
    pub sqrt_price_limit: Decimal,
    pub recipient: String,
    pub token_in: String,
    pub token_out: String,
}

pub fn validate_swap_args(args: SwapArgs) -> Result<ValidatedSwapArgs, DexError> {
    if args.token0 >= args.token1 {
        return Err(DexError::Validation(
            "token0 must sort before token1".to_string(),
        ));
    }
    if args.recipient.is_empty() {
        return Err(DexError::Validation("recipient must not be empty".to_string()));
    }
    require_positive(&args.amount, "swap amount")?;
    require_positive(&args.sqrt_price_limit, "sqrt price limit")?;

    let amount = args.amount.f18();
    let amount_specified = if args.exact_input { amount } else { -amount };

    let (token_in, token_out) = if args.zero_for_one {
        (args.token0.clone(), args.token1.clone())
    } else {
        (args.token1.clone(), args.token0.clone())
    };

    Ok(ValidatedSwapArgs {
        pool_key: PoolKey::new(args.token0, args.token1, args.fee),
        amount_specified,
        zero_for_one: args.zero_for_one,
        sqrt_price_limit: args.sqrt_price_limit,
        recipient: args.recipient,
        token_in,
        token_out,
    })
}
