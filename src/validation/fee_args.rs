use crate::errors::DexError;
use crate::libraries::fixed_point::Decimal;

/// The protocol's cut of LP fees is a fraction in [0, 1].
pub fn validate_protocol_fee(protocol_fee: &Decimal) -> Result<(), DexError> {
    if protocol_fee.is_negative() || protocol_fee > &Decimal::one() {
        return Err(DexError::Validation(
            "protocol fee must be between 0 and 1".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_accepts_fractions_inclusive_of_bounds() {
        assert!(validate_protocol_fee(&Decimal::zero()).is_ok());
        assert!(validate_protocol_fee(&dec("0.25")).is_ok());
        assert!(validate_protocol_fee(&Decimal::one()).is_ok());
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(validate_protocol_fee(&dec("1.1")).is_err());
        assert!(validate_protocol_fee(&dec("-0.1")).is_err());
    }
}
