use super::fixed_point::Decimal;

/// A signed (token0, token1) pair. The swap engine and the liquidity path
/// produce pool-perspective deltas: positive amounts flow into the pool,
/// negative amounts out of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceDelta {
    amount0: Decimal,
    amount1: Decimal,
}

impl BalanceDelta {
    pub fn new(amount0: Decimal, amount1: Decimal) -> Self {
        BalanceDelta { amount0, amount1 }
    }

    pub fn amount0(&self) -> &Decimal {
        &self.amount0
    }

    pub fn amount1(&self) -> &Decimal {
        &self.amount1
    }
}
