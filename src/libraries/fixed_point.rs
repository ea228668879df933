use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical number of fractional digits for token amounts and accumulators.
pub const SCALE: u32 = 18;

/// Arbitrary-precision signed decimal: `mantissa * 10^-scale`.
///
/// Addition and subtraction align scales; multiplication adds them; division
/// truncates toward zero at `max(lhs.scale, rhs.scale, SCALE) + SCALE`
/// fractional digits so quotients keep a full canonical scale of guard
/// digits. Callers quantize with [`Decimal::truncated`] / [`Decimal::f18`]
/// wherever digits must not accumulate.
#[derive(Clone)]
pub struct Decimal {
    mantissa: BigInt,
    scale: u32,
}

fn pow10(n: u32) -> BigInt {
    num_traits::pow(BigInt::from(10), n as usize)
}

impl Decimal {
    pub fn new(mantissa: impl Into<BigInt>, scale: u32) -> Self {
        Decimal {
            mantissa: mantissa.into(),
            scale,
        }
    }

    pub fn zero() -> Self {
        Decimal::new(0, 0)
    }

    pub fn one() -> Self {
        Decimal::new(1, 0)
    }

    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Requantizes to exactly `scale` fractional digits, truncating excess
    /// digits toward zero.
    pub fn truncated(&self, scale: u32) -> Decimal {
        if self.scale <= scale {
            Decimal::new(&self.mantissa * pow10(scale - self.scale), scale)
        } else {
            Decimal::new(&self.mantissa / pow10(self.scale - scale), scale)
        }
    }

    /// Reduction to the canonical scale. Token amounts and the swap loop's
    /// remaining-amount comparison always go through this.
    pub fn f18(&self) -> Decimal {
        self.truncated(SCALE)
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.mantissa.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.mantissa.is_positive()
    }

    pub fn abs(&self) -> Decimal {
        Decimal::new(self.mantissa.abs(), self.scale)
    }

    fn aligned(&self, other: &Decimal) -> (BigInt, BigInt, u32) {
        let scale = self.scale.max(other.scale);
        let lhs = &self.mantissa * pow10(scale - self.scale);
        let rhs = &other.mantissa * pow10(scale - other.scale);
        (lhs, rhs, scale)
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let (lhs, rhs, _) = self.aligned(other);
        lhs.cmp(&rhs)
    }
}

impl Add for &Decimal {
    type Output = Decimal;

    fn add(self, rhs: &Decimal) -> Decimal {
        let (lhs, rhs, scale) = self.aligned(rhs);
        Decimal::new(lhs + rhs, scale)
    }
}

impl Sub for &Decimal {
    type Output = Decimal;

    fn sub(self, rhs: &Decimal) -> Decimal {
        let (lhs, rhs, scale) = self.aligned(rhs);
        Decimal::new(lhs - rhs, scale)
    }
}

impl Mul for &Decimal {
    type Output = Decimal;

    fn mul(self, rhs: &Decimal) -> Decimal {
        Decimal::new(&self.mantissa * &rhs.mantissa, self.scale + rhs.scale)
    }
}

impl Div for &Decimal {
    type Output = Decimal;

    /// Truncating division at `max(lhs.scale, rhs.scale, SCALE) + SCALE`
    /// fractional digits. Dividing by zero is a caller bug.
    fn div(self, rhs: &Decimal) -> Decimal {
        if rhs.is_zero() {
            panic!("Bug: division by zero");
        }
        let target = self.scale.max(rhs.scale).max(SCALE) + SCALE;
        let numerator = &self.mantissa * pow10(target + rhs.scale - self.scale);
        Decimal::new(numerator / &rhs.mantissa, target)
    }
}

impl Neg for &Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-&self.mantissa, self.scale)
    }
}

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal::new(-self.mantissa, self.scale)
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Self {
        Decimal::new(value, 0)
    }
}

impl Default for Decimal {
    fn default() -> Self {
        Decimal::zero()
    }
}

impl fmt::Display for Decimal {
    /// Canonical rendering: plain decimal notation, trailing fractional
    /// zeros trimmed, no exponent form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.mantissa.abs().to_string();
        let scale = self.scale as usize;
        let padded = if digits.len() <= scale {
            format!("{}{}", "0".repeat(scale + 1 - digits.len()), digits)
        } else {
            digits
        };
        let (int_part, frac_part) = padded.split_at(padded.len() - scale);
        let frac_part = frac_part.trim_end_matches('0');
        if self.mantissa.is_negative() && !self.mantissa.is_zero() {
            f.write_str("-")?;
        }
        f.write_str(int_part)?;
        if !frac_part.is_empty() {
            f.write_str(".")?;
            f.write_str(frac_part)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Decimal({})", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDecimalError;

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid decimal literal")
    }
}

impl std::error::Error for ParseDecimalError {}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Accepts plain decimal notation with an optional sign: `123`,
    /// `-0.25`, `.5`. Exponent forms are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (negative, rest) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (int_part, frac_part) = match rest.split_once('.') {
            Some((i, f)) => (i, f),
            None => (rest, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseDecimalError);
        }
        if !int_part.bytes().all(|b| b.is_ascii_digit())
            || !frac_part.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(ParseDecimalError);
        }
        let mut mantissa: BigInt = if int_part.is_empty() {
            BigInt::zero()
        } else {
            int_part.parse().map_err(|_| ParseDecimalError)?
        };
        mantissa = mantissa * pow10(frac_part.len() as u32);
        if !frac_part.is_empty() {
            mantissa += frac_part.parse::<BigInt>().map_err(|_| ParseDecimalError)?;
        }
        if negative {
            mantissa = -mantissa;
        }
        Ok(Decimal::new(mantissa, frac_part.len() as u32))
    }
}

impl Serialize for Decimal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Decimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid decimal: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_parse_and_display_round_trip() {
        for s in [
            "0",
            "1",
            "-1",
            "0.5",
            "-0.003",
            "123456789.000000000000000001",
            "0.000000000000000000054212146310449513",
            "18446050711097703529.776342895396472064",
        ] {
            assert_eq!(dec(s).to_string(), s);
        }
    }

    #[test]
    fn test_parse_normalizes_redundant_forms() {
        assert_eq!(dec("1.500").to_string(), "1.5");
        assert_eq!(dec(".5").to_string(), "0.5");
        assert_eq!(dec("007").to_string(), "7");
        assert_eq!(dec("-0").to_string(), "0");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for s in ["", "-", ".", "1e5", "1.2.3", "a", "1,5", " 1"] {
            assert!(s.parse::<Decimal>().is_err(), "accepted {s:?}");
        }
    }

    #[test]
    fn test_equality_ignores_scale() {
        assert_eq!(dec("1"), dec("1.000"));
        assert_eq!(Decimal::new(1500, 3), dec("1.5"));
        assert!(dec("1.0001") > dec("1.00009"));
        assert!(dec("-2") < dec("-1.999999"));
    }

    #[test]
    fn test_add_sub_align_scales() {
        assert_eq!(&dec("1.5") + &dec("0.25"), dec("1.75"));
        assert_eq!(&dec("1") - &dec("0.000000000000000001"), dec("0.999999999999999999"));
        assert_eq!((&dec("0.1") + &dec("0.2")).to_string(), "0.3");
    }

    #[test]
    fn test_mul_adds_scales() {
        let product = &dec("1.05") * &dec("2.005");
        assert_eq!(product.scale(), 5);
        assert_eq!(product, dec("2.10525"));
    }

    #[test]
    fn test_div_truncates_toward_zero() {
        let q = &dec("2") / &dec("3");
        assert_eq!(q.scale(), SCALE * 2);
        assert_eq!(q.to_string(), "0.666666666666666666666666666666666666");

        let q = &dec("-2") / &dec("3");
        assert_eq!(q.to_string(), "-0.666666666666666666666666666666666666");
    }

    #[test]
    fn test_div_scale_grows_with_operands() {
        let a = Decimal::new(1, 30);
        let q = &a / &dec("7");
        assert_eq!(q.scale(), 30 + SCALE);
    }

    #[test]
    #[should_panic(expected = "Bug: division by zero")]
    fn test_div_by_zero_panics() {
        let _ = &dec("1") / &Decimal::zero();
    }

    #[test]
    fn test_f18_truncates_dust() {
        let dust = Decimal::new(997, 21); // 0.000000000000000000997
        assert!(dust.f18().is_zero());

        let negative_dust = Decimal::new(-997, 21);
        assert!(negative_dust.f18().is_zero());

        assert_eq!(dec("1.0000000000000000019").f18(), dec("1.000000000000000001"));
        assert_eq!(dec("-1.0000000000000000019").f18(), dec("-1.000000000000000001"));
    }

    #[test]
    fn test_truncated_pads_smaller_scales() {
        let x = dec("1.5").truncated(4);
        assert_eq!(x.scale(), 4);
        assert_eq!(x, dec("1.5"));
    }

    proptest! {
        #[test]
        fn test_fuzz_display_parse_round_trip(mantissa in -1_000_000_000_000i64..1_000_000_000_000i64, scale in 0u32..24) {
            let value = Decimal::new(mantissa, scale);
            let reparsed: Decimal = value.to_string().parse().unwrap();
            prop_assert_eq!(reparsed, value);
        }

        #[test]
        fn test_fuzz_add_sub_inverse(a in -1_000_000_000i64..1_000_000_000i64, sa in 0u32..20,
                                     b in -1_000_000_000i64..1_000_000_000i64, sb in 0u32..20) {
            let a = Decimal::new(a, sa);
            let b = Decimal::new(b, sb);
            prop_assert_eq!(&(&a + &b) - &b, a);
        }

        #[test]
        fn test_fuzz_mul_div_round_trip_within_truncation(a in 1i64..1_000_000_000i64, b in 1i64..1_000_000i64) {
            let a = Decimal::new(a, 6);
            let b = Decimal::new(b, 3);
            let q = &(&a * &b) / &b;
            // exact because the product is an exact multiple of b
            prop_assert_eq!(q, a);
        }

        #[test]
        fn test_fuzz_ordering_antisymmetric(a in -1_000_000i64..1_000_000i64, sa in 0u32..10,
                                            b in -1_000_000i64..1_000_000i64, sb in 0u32..10) {
            let a = Decimal::new(a, sa);
            let b = Decimal::new(b, sb);
            prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        }
    }
}
