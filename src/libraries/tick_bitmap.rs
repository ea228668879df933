use std::collections::BTreeMap;

use ethnum::U256;
use minicbor::{Decode, Encode};

use super::bit_math;
use super::constants::{MAX_TICK, MIN_TICK};

/// One 256-tick word of the initialized-tick indicator.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct BitmapWord(#[cbor(n(0), with = "crate::cbor::u256")] pub U256);

/// Sparse indicator over initialized ticks, keyed by word index. Bit `n` of
/// word `w` is set iff tick `(w * 256 + n) * tick_spacing` is initialized.
/// Words that would be all zero are not stored.
pub type TickBitmap = BTreeMap<i16, BitmapWord>;

/// Rounds a tick toward negative infinity by `tick_spacing`.
pub fn compress(tick: i32, tick_spacing: i32) -> i32 {
    let quotient = tick / tick_spacing;
    let remainder = tick % tick_spacing;

    if tick < 0 && remainder != 0 {
        quotient - 1
    } else {
        quotient
    }
}

/// Computes the (word index, bit index) where a compressed tick's
/// initialized flag lives.
pub fn position(tick: i32) -> (i16, u8) {
    if tick < MIN_TICK || tick > MAX_TICK {
        panic!("Bug: InvalidTick");
    }

    let word_pos = tick >> 8;
    let bit_pos = (tick & 0xff) as u8;

    if word_pos < i16::MIN as i32 || word_pos > i16::MAX as i32 {
        panic!("Bug: word_pos should fit in an i16");
    }

    (word_pos as i16, bit_pos)
}

#[derive(Debug, PartialEq, Eq)]
pub enum TickBitmapError {
    TickMisaligned(i32, i32),
}

/// Flips the initialized flag for `tick`, inserting or pruning the backing
/// word as it becomes non-zero or zero.
pub fn flip_tick(
    bitmap: &mut TickBitmap,
    tick: i32,
    tick_spacing: i32,
) -> Result<(), TickBitmapError> {
    if tick_spacing <= 0 {
        panic!("Bug: TickSpacing can not be zero");
    }
    if tick < MIN_TICK || tick > MAX_TICK {
        panic!("Bug: InvalidTick");
    }
    if tick % tick_spacing != 0 {
        return Err(TickBitmapError::TickMisaligned(tick, tick_spacing));
    }

    let (word_pos, bit_pos) = position(tick / tick_spacing);

    let mut word = bitmap.get(&word_pos).copied().unwrap_or_default();
    word.0 ^= U256::ONE << bit_pos;

    if word.0 == U256::ZERO {
        bitmap.remove(&word_pos);
    } else {
        bitmap.insert(word_pos, word);
    }
    Ok(())
}

fn word_at(bitmap: &TickBitmap, word_pos: i16) -> U256 {
    bitmap.get(&word_pos).map(|w| w.0).unwrap_or(U256::ZERO)
}

/// Returns the next initialized tick within the same 256-bit word as `tick`,
/// searching toward lower ticks when `lte` is set and strictly higher ticks
/// otherwise. If the word holds no initialized tick in that direction, the
/// word-boundary tick is returned with `initialized = false`, which bounds
/// the caller's work per probe to one word.
pub fn next_initialized_tick_within_one_word(
    bitmap: &TickBitmap,
    tick: i32,
    tick_spacing: i32,
    lte: bool,
) -> (i32, bool) {
    if tick_spacing <= 0 {
        panic!("Bug: TickSpacing can not be zero");
    }
    if tick < MIN_TICK || tick > MAX_TICK {
        panic!("Bug: InvalidTick");
    }

    let compressed = compress(tick, tick_spacing);

    if lte {
        let (word_pos, bit_pos) = position(compressed);

        // all 1s at or to the right of bit_pos
        let mask = U256::MAX >> (255u32 - bit_pos as u32);
        let masked = word_at(bitmap, word_pos) & mask;

        let initialized = masked != U256::ZERO;
        let next = if initialized {
            let msb = bit_math::msb_position(&masked)
                .expect("Bug: U256::ZERO should never be passed as an argument");
            (compressed - (bit_pos as i32 - msb as i32)) * tick_spacing
        } else {
            (compressed - bit_pos as i32) * tick_spacing
        };

        (next, initialized)
    } else {
        let compressed_plus_one = compressed + 1;
        let (word_pos, bit_pos) = position(compressed_plus_one);

        // all 1s at or to the left of bit_pos
        let mask = !((U256::ONE << bit_pos) - 1);
        let masked = word_at(bitmap, word_pos) & mask;

        let initialized = masked != U256::ZERO;
        let next = if initialized {
            let lsb = bit_math::lsb_position(&masked)
                .expect("Bug: U256::ZERO should never be passed as an argument");
            (compressed_plus_one + (lsb as i32 - bit_pos as i32)) * tick_spacing
        } else {
            (compressed_plus_one + (255i32 - bit_pos as i32)) * tick_spacing
        };

        (next, initialized)
    }
}
