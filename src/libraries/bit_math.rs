use ethnum::U256;

/// Position of the most significant set bit, or `None` for zero.
pub fn msb_position(word: &U256) -> Option<u8> {
    if word == &U256::ZERO {
        None
    } else {
        Some((255 - word.leading_zeros()) as u8)
    }
}

/// Position of the least significant set bit, or `None` for zero.
pub fn lsb_position(word: &U256) -> Option<u8> {
    if word == &U256::ZERO {
        None
    } else {
        Some(word.trailing_zeros() as u8)
    }
}
