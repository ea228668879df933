use indexmap::IndexMap;
use minicbor::{Decode, Encode};

use crate::errors::DexError;
use crate::libraries::fixed_point::Decimal;

#[derive(Encode, Decode, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct PositionKey {
    #[n(0)]
    pub pool_hash: String,
    #[n(1)]
    pub position_id: String,
}

#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug)]
#[cbor(map)]
pub struct Position {
    #[n(0)]
    pub owner: String,
    #[n(1)]
    pub tick_lower: i32,
    #[n(2)]
    pub tick_upper: i32,
    #[cbor(n(3), with = "crate::cbor::decimal")]
    pub liquidity: Decimal,
    #[cbor(n(4), with = "crate::cbor::decimal")]
    pub fee_growth_inside_0_last: Decimal,
    #[cbor(n(5), with = "crate::cbor::decimal")]
    pub fee_growth_inside_1_last: Decimal,
    #[cbor(n(6), with = "crate::cbor::decimal")]
    pub tokens_owed_0: Decimal,
    #[cbor(n(7), with = "crate::cbor::decimal")]
    pub tokens_owed_1: Decimal,
}

/// Key of the per-owner position index, ordered `(owner, pool_hash)` so a
/// single owner's records form a contiguous key range.
#[derive(Encode, Decode, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct PositionOwnerKey {
    #[n(0)]
    pub owner: String,
    #[n(1)]
    pub pool_hash: String,
}

/// One owner's positions within one pool, grouped by tick range. The map
/// preserves insertion order, and so does the id list within each range;
/// position paging depends on both.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug)]
#[cbor(map)]
pub struct DexPositionOwner {
    #[n(0)]
    pub owner: String,
    #[n(1)]
    pub pool_hash: String,
    #[cbor(n(2), with = "crate::cbor::tick_range_map")]
    pub tick_range_map: IndexMap<String, Vec<String>>,
}

impl DexPositionOwner {
    pub fn new(owner: impl Into<String>, pool_hash: impl Into<String>) -> Self {
        DexPositionOwner {
            owner: owner.into(),
            pool_hash: pool_hash.into(),
            tick_range_map: IndexMap::new(),
        }
    }

    pub fn tick_range_key(tick_lower: i32, tick_upper: i32) -> String {
        format!("{tick_lower}:{tick_upper}")
    }

    pub fn add_position(&mut self, tick_lower: i32, tick_upper: i32, position_id: String) {
        self.tick_range_map
            .entry(Self::tick_range_key(tick_lower, tick_upper))
            .or_default()
            .push(position_id);
    }

    /// Flattens into `(tick_range, position_id)` pairs in index order.
    pub fn flatten(&self) -> Vec<(String, String)> {
        self.tick_range_map
            .iter()
            .flat_map(|(range, ids)| ids.iter().map(move |id| (range.clone(), id.clone())))
            .collect()
    }
}

/// Parses a `"lower:upper"` tick-range key back into its bounds.
pub fn parse_tick_range(range: &str) -> Result<(i32, i32), DexError> {
    let parsed = range.split_once(':').and_then(|(lower, upper)| {
        Some((lower.parse::<i32>().ok()?, upper.parse::<i32>().ok()?))
    });
    parsed.ok_or_else(|| DexError::Inconsistent(format!("malformed tick range key: {range}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_preserves_insertion_order() {
        let mut record = DexPositionOwner::new("alice", "pool-a");
        record.add_position(-120, 120, "p1".to_string());
        record.add_position(-60, 60, "p2".to_string());
        record.add_position(-120, 120, "p3".to_string());

        let flat = record.flatten();
        assert_eq!(
            flat,
            vec![
                ("-120:120".to_string(), "p1".to_string()),
                ("-120:120".to_string(), "p3".to_string()),
                ("-60:60".to_string(), "p2".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_tick_range() {
        assert_eq!(parse_tick_range("-120:120").unwrap(), (-120, 120));
        assert_eq!(parse_tick_range("0:60").unwrap(), (0, 60));
        assert!(parse_tick_range("abc").is_err());
        assert!(parse_tick_range("1:b").is_err());
    }
}
