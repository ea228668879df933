use crate::errors::DexError;
use crate::libraries::constants::{MAX_TICK, MIN_TICK};

/// Shared tick-range checks for liquidity operations. Spacing alignment is
/// required because only aligned ticks can carry bitmap bits.
pub fn validate_tick_range(
    tick_lower: i32,
    tick_upper: i32,
    tick_spacing: i32,
) -> Result<(), DexError> {
    if tick_lower >= tick_upper {
        return Err(DexError::Validation(format!(
            "tick range is inverted: {tick_lower} >= {tick_upper}"
        )));
    }
    if tick_lower < MIN_TICK || tick_upper > MAX_TICK {
        return Err(DexError::Validation(format!(
            "tick range {tick_lower}:{tick_upper} is out of bounds"
        )));
    }
    if tick_lower % tick_spacing != 0 || tick_upper % tick_spacing != 0 {
        return Err(DexError::Validation(format!(
            "ticks {tick_lower}:{tick_upper} are not aligned to spacing {tick_spacing}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_aligned_range() {
        assert!(validate_tick_range(-120, 120, 60).is_ok());
        assert!(validate_tick_range(MIN_TICK + 52, MAX_TICK - 52, 10).is_ok());
    }

    #[test]
    fn test_rejects_inverted_or_empty_range() {
        assert!(validate_tick_range(120, -120, 60).is_err());
        assert!(validate_tick_range(60, 60, 60).is_err());
    }

    #[test]
    fn test_rejects_out_of_bounds() {
        assert!(validate_tick_range(MIN_TICK - 60, 0, 60).is_err());
        assert!(validate_tick_range(0, MAX_TICK + 60, 60).is_err());
    }

    #[test]
    fn test_rejects_misaligned_ticks() {
        assert!(validate_tick_range(-61, 120, 60).is_err());
        assert!(validate_tick_range(-120, 121, 60).is_err());
    }
}
