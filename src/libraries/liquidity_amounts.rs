use super::fixed_point::Decimal;

/// Liquidity purchasable with `amount0` between two sqrt prices:
/// `amount0 * (lower * upper) / (upper - lower)`.
pub fn get_liquidity_for_amount_0(
    sqrt_price_a: &Decimal,
    sqrt_price_b: &Decimal,
    amount0: &Decimal,
) -> Decimal {
    let (lower, upper) = if sqrt_price_a <= sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    };
    (&(amount0 * &(lower * upper)) / &(upper - lower)).f18()
}

/// Liquidity purchasable with `amount1` between two sqrt prices:
/// `amount1 / (upper - lower)`.
pub fn get_liquidity_for_amount_1(
    sqrt_price_a: &Decimal,
    sqrt_price_b: &Decimal,
    amount1: &Decimal,
) -> Decimal {
    let (lower, upper) = if sqrt_price_a <= sqrt_price_b {
        (sqrt_price_a, sqrt_price_b)
    } else {
        (sqrt_price_b, sqrt_price_a)
    };
    (amount1 / &(upper - lower)).f18()
}

/// Maximum liquidity received for the desired amounts, given the current
/// price and the position's range. Below the range only token0 buys
/// liquidity, above it only token1, and inside it the smaller of the two
/// bindings wins.
pub fn get_liquidity_for_amounts(
    sqrt_price_current: &Decimal,
    sqrt_price_lower: &Decimal,
    sqrt_price_upper: &Decimal,
    amount0: &Decimal,
    amount1: &Decimal,
) -> Decimal {
    if sqrt_price_current <= sqrt_price_lower {
        get_liquidity_for_amount_0(sqrt_price_lower, sqrt_price_upper, amount0)
    } else if sqrt_price_current < sqrt_price_upper {
        let liquidity0 = get_liquidity_for_amount_0(sqrt_price_current, sqrt_price_upper, amount0);
        let liquidity1 = get_liquidity_for_amount_1(sqrt_price_lower, sqrt_price_current, amount1);
        liquidity0.min(liquidity1)
    } else {
        get_liquidity_for_amount_1(sqrt_price_lower, sqrt_price_upper, amount1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_liquidity_for_amount_0() {
        // 1 token0 between sqrt prices 1 and 2: 1 * (1*2) / (2-1) = 2
        assert_eq!(get_liquidity_for_amount_0(&dec("1"), &dec("2"), &dec("1")), dec("2"));
    }

    #[test]
    fn test_liquidity_for_amount_1() {
        // 1 token1 between sqrt prices 1 and 2: 1 / (2-1) = 1
        assert_eq!(get_liquidity_for_amount_1(&dec("1"), &dec("2"), &dec("1")), dec("1"));
    }

    #[test]
    fn test_below_range_uses_token0_only() {
        let liquidity = get_liquidity_for_amounts(
            &dec("0.5"),
            &dec("1"),
            &dec("2"),
            &dec("1"),
            &dec("1000000"),
        );
        assert_eq!(liquidity, dec("2"));
    }

    #[test]
    fn test_above_range_uses_token1_only() {
        let liquidity = get_liquidity_for_amounts(
            &dec("3"),
            &dec("1"),
            &dec("2"),
            &dec("1000000"),
            &dec("1"),
        );
        assert_eq!(liquidity, dec("1"));
    }

    #[test]
    fn test_in_range_takes_binding_side() {
        // token1 side binds: 1 / (1.5 - 1) = 2 versus token0 side
        // 100 * (1.5 * 2) / (2 - 1.5) = 600
        let liquidity = get_liquidity_for_amounts(
            &dec("1.5"),
            &dec("1"),
            &dec("2"),
            &dec("100"),
            &dec("1"),
        );
        assert_eq!(liquidity, dec("2"));
    }
}
