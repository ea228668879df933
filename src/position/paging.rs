use crate::api_types::position::UserPositionEntry;
use crate::errors::DexError;
use crate::state::read_state;

use super::types::{PositionKey, parse_tick_range};

/// Fixed page size of the backing store's partial-key scan.
pub const LEDGER_PAGE_SIZE: usize = 10;

/// Splits a continuation bookmark into the store's chain cursor and the
/// in-page offset of already-consumed positions. An empty bookmark starts
/// from the beginning.
pub fn parse_bookmark(bookmark: &str) -> Result<(String, usize), DexError> {
    if bookmark.is_empty() {
        return Ok((String::new(), 0));
    }
    match bookmark.split_once('|') {
        Some((chain, local)) => {
            let local = if local.is_empty() {
                0
            } else {
                local.parse().map_err(|_| DexError::invalid_bookmark())?
            };
            Ok((chain.to_string(), local))
        }
        None => Ok((bookmark.to_string(), 0)),
    }
}

/// Collects up to `limit` of an owner's positions together with a
/// continuation bookmark.
///
/// The store pages owner-index records in fixed-size pages, but each record
/// holds a variable number of positions (possibly none), so the walk must
/// survive empty pages and partially consumed ones. The returned bookmark is
/// `<chain>|<local>` where `local` is the offset of the first unconsumed
/// position within the page the chain cursor identifies; an empty bookmark
/// means the listing is exhausted.
///
/// A bookmark whose local offset points past the end of the data fails
/// validation. A stale chain cursor that still resolves to a live key is
/// not detected; it restarts from the nearest surviving record.
pub fn fetch_user_positions(
    owner: &str,
    limit: usize,
    bookmark: &str,
    page_size: usize,
) -> Result<(Vec<UserPositionEntry>, String), DexError> {
    let (mut chain_bookmark, mut to_skip) = parse_bookmark(bookmark)?;
    let mut required = limit;
    let mut results = Vec::new();
    let mut is_last = false;
    let mut local_offset = 0usize;
    let mut done = false;

    while required > 0 && !done {
        let (records, next_bookmark) =
            read_state(|s| s.user_position_page(owner, &chain_bookmark, page_size));

        // flatten one ledger page into (pool, range, id) triplets, keeping
        // record order and each record's insertion order
        let entries: Vec<(String, String, String)> = records
            .iter()
            .flat_map(|record| {
                record
                    .flatten()
                    .into_iter()
                    .map(move |(range, id)| (record.pool_hash.clone(), range, id))
            })
            .collect();

        if entries.is_empty() {
            if next_bookmark.is_empty() {
                is_last = true;
                chain_bookmark.clear();
                done = true;
            } else {
                chain_bookmark = next_bookmark;
            }
            continue;
        }

        if to_skip >= entries.len() {
            to_skip -= entries.len();
            if next_bookmark.is_empty() {
                is_last = true;
                chain_bookmark.clear();
                done = true;
            } else {
                chain_bookmark = next_bookmark;
            }
            continue;
        }

        let mut index = to_skip;
        to_skip = 0;
        while index < entries.len() && required > 0 {
            let (pool_hash, range, position_id) = &entries[index];
            let (tick_lower, tick_upper) = parse_tick_range(range)?;
            let position = read_state(|s| {
                s.get_position(&PositionKey {
                    pool_hash: pool_hash.clone(),
                    position_id: position_id.clone(),
                })
            })
            .ok_or_else(|| {
                DexError::Inconsistent(format!("position {position_id} missing from store"))
            })?;

            results.push(UserPositionEntry {
                pool_hash: pool_hash.clone(),
                position_id: position_id.clone(),
                tick_lower,
                tick_upper,
                liquidity: position.liquidity,
            });
            index += 1;
            required -= 1;
        }

        local_offset = index;
        is_last = index == entries.len();
        if is_last {
            local_offset = 0;
            if next_bookmark.is_empty() {
                chain_bookmark.clear();
                done = true;
            } else {
                chain_bookmark = next_bookmark;
            }
        } else {
            done = true;
        }
    }

    if to_skip > 0 {
        return Err(DexError::invalid_bookmark());
    }

    let bookmark = if chain_bookmark.is_empty() && is_last {
        String::new()
    } else if local_offset == 0 {
        format!("{chain_bookmark}|")
    } else {
        format!("{chain_bookmark}|{local_offset}")
    };

    Ok((results, bookmark))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libraries::fixed_point::Decimal;
    use crate::position::types::{DexPositionOwner, Position, PositionOwnerKey};
    use crate::state::mutate_state;

    /// Seeds one owner-index record per (pool_hash, position count) pair,
    /// with matching position records.
    fn seed_owner(owner: &str, pools: &[(&str, usize)]) {
        mutate_state(|s| {
            let mut position_number = 0;
            for (pool_hash, count) in pools {
                let mut record = DexPositionOwner::new(owner, *pool_hash);
                for _ in 0..*count {
                    position_number += 1;
                    let position_id = format!("{owner}-p{position_number}");
                    record.add_position(-60, 60, position_id.clone());
                    s.set_position(
                        PositionKey {
                            pool_hash: pool_hash.to_string(),
                            position_id,
                        },
                        Position {
                            owner: owner.to_string(),
                            tick_lower: -60,
                            tick_upper: 60,
                            liquidity: Decimal::one(),
                            fee_growth_inside_0_last: Decimal::zero(),
                            fee_growth_inside_1_last: Decimal::zero(),
                            tokens_owed_0: Decimal::zero(),
                            tokens_owed_1: Decimal::zero(),
                        },
                    );
                }
                s.set_position_owner(
                    PositionOwnerKey {
                        owner: owner.to_string(),
                        pool_hash: pool_hash.to_string(),
                    },
                    record,
                );
            }
        });
    }

    fn ids(entries: &[UserPositionEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.position_id.as_str()).collect()
    }

    #[test]
    fn test_parse_bookmark_forms() {
        assert_eq!(parse_bookmark("").unwrap(), (String::new(), 0));
        assert_eq!(parse_bookmark("abc|").unwrap(), ("abc".to_string(), 0));
        assert_eq!(parse_bookmark("abc|7").unwrap(), ("abc".to_string(), 7));
        assert_eq!(parse_bookmark("abc").unwrap(), ("abc".to_string(), 0));
        assert!(parse_bookmark("abc|x").is_err());
    }

    #[test]
    fn test_single_call_returns_everything_with_empty_bookmark() {
        seed_owner("pg-all", &[("hash-a", 2), ("hash-b", 3)]);

        let (entries, bookmark) = fetch_user_positions("pg-all", 50, "", 1).unwrap();
        assert_eq!(
            ids(&entries),
            vec!["pg-all-p1", "pg-all-p2", "pg-all-p3", "pg-all-p4", "pg-all-p5"]
        );
        assert_eq!(bookmark, "");
    }

    #[test]
    fn test_paging_across_an_empty_owner_record() {
        // positions distributed 3 / 0 / 4 across three ledger pages
        seed_owner("pg-gap", &[("hash-a", 3), ("hash-b", 0), ("hash-c", 4)]);

        let (entries, bookmark) = fetch_user_positions("pg-gap", 5, "", 1).unwrap();
        assert_eq!(
            ids(&entries),
            vec!["pg-gap-p1", "pg-gap-p2", "pg-gap-p3", "pg-gap-p4", "pg-gap-p5"]
        );
        // two consumed from the page holding hash-c
        assert_eq!(bookmark, "hash-c|2");

        let (entries, bookmark) = fetch_user_positions("pg-gap", 5, &bookmark, 1).unwrap();
        assert_eq!(ids(&entries), vec!["pg-gap-p6", "pg-gap-p7"]);
        assert_eq!(bookmark, "");
    }

    #[test]
    fn test_bookmark_round_trip_matches_single_call() {
        seed_owner("pg-rt", &[("hash-a", 4), ("hash-b", 1), ("hash-c", 3)]);

        let (all, _) = fetch_user_positions("pg-rt", 100, "", 2).unwrap();

        let mut collected = Vec::new();
        let mut bookmark = String::new();
        loop {
            let (chunk, next) = fetch_user_positions("pg-rt", 3, &bookmark, 2).unwrap();
            collected.extend(chunk);
            if next.is_empty() {
                break;
            }
            bookmark = next;
        }
        assert_eq!(collected, all);
    }

    #[test]
    fn test_limit_exactly_consuming_last_element_exhausts() {
        seed_owner("pg-exact", &[("hash-a", 2), ("hash-b", 2)]);

        let (entries, bookmark) = fetch_user_positions("pg-exact", 4, "", 2).unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(bookmark, "");
    }

    #[test]
    fn test_limit_beyond_remaining_positions() {
        seed_owner("pg-short", &[("hash-a", 2)]);

        let (entries, bookmark) = fetch_user_positions("pg-short", 10, "", 2).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(bookmark, "");
    }

    #[test]
    fn test_local_bookmark_exactly_page_length_is_exhausted_not_invalid() {
        seed_owner("pg-edge", &[("hash-a", 3)]);

        let (entries, bookmark) = fetch_user_positions("pg-edge", 5, "hash-a|3", 1).unwrap();
        assert!(entries.is_empty());
        assert_eq!(bookmark, "");
    }

    #[test]
    fn test_local_bookmark_past_data_is_invalid() {
        seed_owner("pg-bad", &[("hash-a", 3)]);

        assert_eq!(
            fetch_user_positions("pg-bad", 5, "hash-a|7", 1),
            Err(DexError::invalid_bookmark())
        );
    }

    #[test]
    fn test_read_is_idempotent() {
        seed_owner("pg-idem", &[("hash-a", 3), ("hash-b", 2)]);

        let first = fetch_user_positions("pg-idem", 2, "", 2).unwrap();
        let second = fetch_user_positions("pg-idem", 2, "", 2).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_owner_is_empty() {
        let (entries, bookmark) = fetch_user_positions("pg-nobody", 5, "", 2).unwrap();
        assert!(entries.is_empty());
        assert_eq!(bookmark, "");
    }
}
