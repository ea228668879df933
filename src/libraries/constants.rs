use lazy_static::lazy_static;
use std::str::FromStr;

use super::fixed_point::Decimal;

/// Working scale for sqrt prices. Prices are never reduced to the canonical
/// scale: the sqrt price at `MIN_TICK` is below canonical resolution.
pub const SQRT_PRICE_SCALE: u32 = 38;

pub const MIN_TICK: i32 = -887272;
pub const MAX_TICK: i32 = 887272;

lazy_static! {
    /// sqrt(1.0001^MIN_TICK), i.e. the sqrt price exactly at `MIN_TICK`.
    pub static ref MIN_SQRT_PRICE: Decimal =
        Decimal::from_str("0.00000000000000000005421214631044951386").unwrap();

    /// sqrt(1.0001^MAX_TICK), i.e. the sqrt price exactly at `MAX_TICK`.
    pub static ref MAX_SQRT_PRICE: Decimal =
        Decimal::from_str("18446050711097703529.77634289539647206472975258761762126838").unwrap();

    pub static ref DEFAULT_PROTOCOL_FEE: Decimal = Decimal::zero();
}
