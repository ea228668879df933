// [DEX Ledger State]
//  ├── Stable Memory
//  │   ├── POOLS: StableBTreeMap<PoolKey, Pool>
//  │   ├── TICKS: StableBTreeMap<TickKey, TickData>
//  │   ├── POSITIONS: StableBTreeMap<PositionKey, Position>
//  │   ├── POSITION_OWNERS: StableBTreeMap<PositionOwnerKey, DexPositionOwner>
//  │   ├── USER_BALANCES: StableBTreeMap<UserBalanceKey, UserBalance>
//  │   ├── TICK_SPACINGS: StableBTreeMap<FeeTier, PoolTickSpacing>
//  │   ├── FEE_CONFIG: StableBTreeMap<u8, DexFeeConfig>
//  │   └── COUNTERS: StableBTreeMap<u8, u64>
//  └──

use std::cell::RefCell;
use std::str::FromStr;

use ic_stable_structures::StableBTreeMap;

use crate::balances::types::{UserBalance, UserBalanceKey};
use crate::libraries::fixed_point::Decimal;
use crate::pool::types::{FeeTier, Pool, PoolKey, PoolTickSpacing};
use crate::position::types::{DexPositionOwner, Position, PositionKey, PositionOwnerKey};
use crate::protocol_fee::DexFeeConfig;
use crate::tick::types::{TickData, TickKey};

pub mod memory_manager;
pub mod storable_impl;

use memory_manager::StableMemory;

const FEE_CONFIG_KEY: u8 = 0;
const POSITION_COUNTER_KEY: u8 = 0;

/// Separator used by the store's composite keys, chosen to sort before any
/// printable key part.
const COMPOSITE_KEY_SEPARATOR: char = '\u{0000}';

/// Builds a composite object key from an index key and its parts.
pub fn create_composite_key(index_key: &str, parts: &[&str]) -> String {
    let mut key = String::new();
    key.push(COMPOSITE_KEY_SEPARATOR);
    key.push_str(index_key);
    for part in parts {
        key.push(COMPOSITE_KEY_SEPARATOR);
        key.push_str(part);
    }
    key.push(COMPOSITE_KEY_SEPARATOR);
    key
}

pub struct State {
    pools: StableBTreeMap<PoolKey, Pool, StableMemory>,
    ticks: StableBTreeMap<TickKey, TickData, StableMemory>,
    positions: StableBTreeMap<PositionKey, Position, StableMemory>,
    position_owners: StableBTreeMap<PositionOwnerKey, DexPositionOwner, StableMemory>,
    user_balances: StableBTreeMap<UserBalanceKey, UserBalance, StableMemory>,
    tick_spacings: StableBTreeMap<FeeTier, PoolTickSpacing, StableMemory>,
    fee_config: StableBTreeMap<u8, DexFeeConfig, StableMemory>,
    counters: StableBTreeMap<u8, u64, StableMemory>,
}

impl State {
    fn init() -> Self {
        let mut state = State {
            pools: StableBTreeMap::init(memory_manager::pools_memory()),
            ticks: StableBTreeMap::init(memory_manager::ticks_memory()),
            positions: StableBTreeMap::init(memory_manager::positions_memory()),
            position_owners: StableBTreeMap::init(memory_manager::position_owners_memory()),
            user_balances: StableBTreeMap::init(memory_manager::user_balances_memory()),
            tick_spacings: StableBTreeMap::init(memory_manager::tick_spacings_memory()),
            fee_config: StableBTreeMap::init(memory_manager::fee_config_memory()),
            counters: StableBTreeMap::init(memory_manager::counters_memory()),
        };
        state.seed_tick_spacings();
        state
    }

    fn seed_tick_spacings(&mut self) {
        for (fee, spacing) in [("0.0005", 10), ("0.003", 60), ("0.01", 200)] {
            let fee = FeeTier(Decimal::from_str(fee).expect("Bug: malformed fee tier literal"));
            self.tick_spacings.insert(fee, PoolTickSpacing(spacing));
        }
    }

    pub fn get_pool(&self, key: &PoolKey) -> Option<Pool> {
        self.pools.get(key)
    }

    pub fn set_pool(&mut self, key: PoolKey, pool: Pool) {
        self.pools.insert(key, pool);
    }

    pub fn get_tick(&self, key: &TickKey) -> Option<TickData> {
        self.ticks.get(key)
    }

    pub fn get_tick_or_default(&self, key: &TickKey) -> TickData {
        self.ticks.get(key).unwrap_or_default()
    }

    pub fn set_tick(&mut self, key: TickKey, tick: TickData) {
        self.ticks.insert(key, tick);
    }

    pub fn remove_tick(&mut self, key: &TickKey) {
        self.ticks.remove(key);
    }

    pub fn get_position(&self, key: &PositionKey) -> Option<Position> {
        self.positions.get(key)
    }

    pub fn set_position(&mut self, key: PositionKey, position: Position) {
        self.positions.insert(key, position);
    }

    pub fn get_position_owner(&self, key: &PositionOwnerKey) -> Option<DexPositionOwner> {
        self.position_owners.get(key)
    }

    pub fn set_position_owner(&mut self, key: PositionOwnerKey, record: DexPositionOwner) {
        self.position_owners.insert(key, record);
    }

    pub fn get_user_balance(&self, key: &UserBalanceKey) -> UserBalance {
        self.user_balances.get(key).unwrap_or_default()
    }

    pub fn set_user_balance(&mut self, key: UserBalanceKey, balance: UserBalance) {
        self.user_balances.insert(key, balance);
    }

    pub fn get_tick_spacing(&self, fee: &FeeTier) -> Option<PoolTickSpacing> {
        self.tick_spacings.get(fee)
    }

    pub fn get_fee_config(&self) -> Option<DexFeeConfig> {
        self.fee_config.get(&FEE_CONFIG_KEY)
    }

    pub fn set_fee_config(&mut self, config: DexFeeConfig) {
        self.fee_config.insert(FEE_CONFIG_KEY, config);
    }

    /// Hands out the next position identifier.
    pub fn next_position_id(&mut self) -> String {
        let next = self.counters.get(&POSITION_COUNTER_KEY).unwrap_or(0) + 1;
        self.counters.insert(POSITION_COUNTER_KEY, next);
        format!("pos-{next}")
    }

    /// One page of an owner's position-index records, in pool-hash order.
    ///
    /// `chain_bookmark` is the cursor a previous page returned (empty for
    /// the first page); the second element of the result is the cursor for
    /// the following page, empty when this page is the last.
    pub fn user_position_page(
        &self,
        owner: &str,
        chain_bookmark: &str,
        page_size: usize,
    ) -> (Vec<DexPositionOwner>, String) {
        let start = PositionOwnerKey {
            owner: owner.to_string(),
            pool_hash: chain_bookmark.to_string(),
        };

        let mut records = Vec::new();
        let mut next_bookmark = String::new();
        for (key, record) in self.position_owners.range(start..) {
            if key.owner != owner {
                break;
            }
            if records.len() == page_size {
                next_bookmark = key.pool_hash.clone();
                break;
            }
            records.push(record);
        }
        (records, next_bookmark)
    }
}

thread_local! {
    static STATE: RefCell<State> = RefCell::new(State::init());
}

pub fn read_state<F, R>(f: F) -> R
where
    F: FnOnce(&State) -> R,
{
    STATE.with(|s| f(&s.borrow()))
}

pub fn mutate_state<F, R>(f: F) -> R
where
    F: FnOnce(&mut State) -> R,
{
    STATE.with(|s| f(&mut s.borrow_mut()))
}
