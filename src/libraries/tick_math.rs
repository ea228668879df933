use lazy_static::lazy_static;
use std::str::FromStr;

use super::constants::{MAX_SQRT_PRICE, MAX_TICK, MIN_SQRT_PRICE, MIN_TICK, SQRT_PRICE_SCALE};
use super::fixed_point::Decimal;

pub struct TickMath;

lazy_static! {
    /// `MULTIPLIERS[k] = sqrt(1.0001)^(2^k)`, truncated to the sqrt-price
    /// working scale. A tick's sqrt price is the product of the entries
    /// selected by the bits of `|tick|`.
    static ref MULTIPLIERS: [Decimal; 20] = [
        "1.00004999875006249609402341699379869721",
        "1.0001",
        "1.00020001",
        "1.0004000600040001",
        "1.00080028005600700056002800080001",
        "1.0016012005601820436880091441287114408",
        "1.00320496496359801466652869081105525251",
        "1.00642020172761392015653390840941927272",
        "1.01288162244545109707809563193500557094",
        "1.02592918108772934365870860857896586139",
        "1.05253068460733894838658937037292383636",
        "1.1078208420399936138992158110788139883",
        "1.22726701805820048205050381509080882988",
        "1.50618433361346738810795598119915172047",
        "2.26859124682264482692560985934360724017",
        "5.14650624516032222253799175150386398245",
        "26.48652653147419866403381181278576960498",
        "701.53608770248664495301748849379443525214",
        "492152.88234891103363368386177835499501720121",
        "242214459604.34106565057179909353978305220778564478",
    ]
    .map(|s| Decimal::from_str(s).unwrap());
}

impl TickMath {
    /// Calculates `sqrt(1.0001^tick)` at the sqrt-price working scale.
    pub fn sqrt_price_at_tick(tick: i32) -> Decimal {
        if !(MIN_TICK..=MAX_TICK).contains(&tick) {
            panic!("Bug: TickOutOfBounds");
        }

        let abs_tick = tick.unsigned_abs();
        let mut ratio = Decimal::one();
        for (i, multiplier) in MULTIPLIERS.iter().enumerate() {
            if abs_tick & (1 << i) != 0 {
                ratio = (&ratio * multiplier).truncated(SQRT_PRICE_SCALE);
            }
        }

        if tick < 0 {
            ratio = (&Decimal::one() / &ratio).truncated(SQRT_PRICE_SCALE);
        }
        ratio
    }

    /// Computes the greatest tick whose sqrt price is at most `sqrt_price`,
    /// so that `sqrt_price_at_tick(tick) <= sqrt_price < sqrt_price_at_tick(tick + 1)`
    /// holds exactly.
    pub fn tick_at_sqrt_price(sqrt_price: &Decimal) -> i32 {
        if sqrt_price < &*MIN_SQRT_PRICE || sqrt_price > &*MAX_SQRT_PRICE {
            panic!("Bug: SqrtPriceOutOfBounds");
        }

        let mut lo = MIN_TICK;
        let mut hi = MAX_TICK;
        while lo < hi {
            let mid = lo + (hi - lo + 1) / 2;
            if &Self::sqrt_price_at_tick(mid) <= sqrt_price {
                lo = mid;
            } else {
                hi = mid - 1;
            }
        }
        lo
    }
}
