use super::constants::SQRT_PRICE_SCALE;
use super::fixed_point::Decimal;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqrtPriceMathError {
    NotEnoughLiquidity,
}

fn ordered(sqrt_price_a: &Decimal, sqrt_price_b: &Decimal) -> (Decimal, Decimal) {
    if sqrt_price_a <= sqrt_price_b {
        (sqrt_price_a.clone(), sqrt_price_b.clone())
    } else {
        (sqrt_price_b.clone(), sqrt_price_a.clone())
    }
}

/// Amount of token0 spanned by `liquidity` between two sqrt prices:
/// `liquidity * (upper - lower) / (upper * lower)`.
pub fn get_amount_0_delta(
    sqrt_price_a: &Decimal,
    sqrt_price_b: &Decimal,
    liquidity: &Decimal,
) -> Decimal {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    if !lower.is_positive() {
        panic!("Bug: InvalidPrice");
    }
    &(liquidity * &(&upper - &lower)) / &(&upper * &lower)
}

/// Amount of token1 spanned by `liquidity` between two sqrt prices:
/// `liquidity * (upper - lower)`.
pub fn get_amount_1_delta(
    sqrt_price_a: &Decimal,
    sqrt_price_b: &Decimal,
    liquidity: &Decimal,
) -> Decimal {
    let (lower, upper) = ordered(sqrt_price_a, sqrt_price_b);
    liquidity * &(&upper - &lower)
}

/// Signed token0 amount for a liquidity change: positive liquidity added to
/// the range is owed to the pool, negative is owed back to the owner.
pub fn get_amount_0_delta_signed(
    sqrt_price_a: &Decimal,
    sqrt_price_b: &Decimal,
    liquidity_delta: &Decimal,
) -> Decimal {
    let amount = get_amount_0_delta(sqrt_price_a, sqrt_price_b, &liquidity_delta.abs()).f18();
    if liquidity_delta.is_negative() { -amount } else { amount }
}

/// Signed token1 amount for a liquidity change; sign convention as for
/// [`get_amount_0_delta_signed`].
pub fn get_amount_1_delta_signed(
    sqrt_price_a: &Decimal,
    sqrt_price_b: &Decimal,
    liquidity_delta: &Decimal,
) -> Decimal {
    let amount = get_amount_1_delta(sqrt_price_a, sqrt_price_b, &liquidity_delta.abs()).f18();
    if liquidity_delta.is_negative() { -amount } else { amount }
}

/// The sqrt price after paying `amount_in` of the input token into the pool
/// at constant `liquidity`. Moving token0 in pushes the price down via
/// `liquidity * price / (liquidity + amount_in * price)`; token1 in pushes
/// it up via `price + amount_in / liquidity`.
pub fn get_next_sqrt_price_from_input(
    sqrt_price: &Decimal,
    liquidity: &Decimal,
    amount_in: &Decimal,
    zero_for_one: bool,
) -> Decimal {
    if !sqrt_price.is_positive() || !liquidity.is_positive() {
        panic!("Bug: InvalidPriceOrLiquidity");
    }
    let next = if zero_for_one {
        let numerator = liquidity * sqrt_price;
        let denominator = liquidity + &(amount_in * sqrt_price);
        &numerator / &denominator
    } else {
        sqrt_price + &(amount_in / liquidity)
    };
    next.truncated(SQRT_PRICE_SCALE)
}

/// The sqrt price after the pool pays out `amount_out` of the output token
/// at constant `liquidity`. Fails when the requested token0 output exceeds
/// what the remaining price range can produce.
pub fn get_next_sqrt_price_from_output(
    sqrt_price: &Decimal,
    liquidity: &Decimal,
    amount_out: &Decimal,
    zero_for_one: bool,
) -> Result<Decimal, SqrtPriceMathError> {
    if !sqrt_price.is_positive() || !liquidity.is_positive() {
        panic!("Bug: InvalidPriceOrLiquidity");
    }
    let next = if zero_for_one {
        let next = sqrt_price - &(amount_out / liquidity);
        if !next.is_positive() {
            return Err(SqrtPriceMathError::NotEnoughLiquidity);
        }
        next
    } else {
        let denominator = liquidity - &(amount_out * sqrt_price);
        if !denominator.is_positive() {
            return Err(SqrtPriceMathError::NotEnoughLiquidity);
        }
        &(liquidity * sqrt_price) / &denominator
    };
    Ok(next.truncated(SQRT_PRICE_SCALE))
}
