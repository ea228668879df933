use std::cell::RefCell;

use ic_stable_structures::{
    DefaultMemoryImpl,
    memory_manager::{MemoryId, MemoryManager, VirtualMemory},
};

pub type StableMemory = VirtualMemory<DefaultMemoryImpl>;

thread_local! {
    static MEMORY_MANAGER: RefCell<MemoryManager<DefaultMemoryImpl>> = RefCell::new(
        MemoryManager::init(DefaultMemoryImpl::default())
    );
}

const POOLS_MEMORY_ID: MemoryId = MemoryId::new(0);

pub fn pools_memory() -> StableMemory {
    MEMORY_MANAGER.with(|m| m.borrow().get(POOLS_MEMORY_ID))
}

const TICKS_MEMORY_ID: MemoryId = MemoryId::new(1);

pub fn ticks_memory() -> StableMemory {
    MEMORY_MANAGER.with(|m| m.borrow().get(TICKS_MEMORY_ID))
}

const POSITIONS_MEMORY_ID: MemoryId = MemoryId::new(2);

pub fn positions_memory() -> StableMemory {
    MEMORY_MANAGER.with(|m| m.borrow().get(POSITIONS_MEMORY_ID))
}

const POSITION_OWNERS_MEMORY_ID: MemoryId = MemoryId::new(3);

pub fn position_owners_memory() -> StableMemory {
    MEMORY_MANAGER.with(|m| m.borrow().get(POSITION_OWNERS_MEMORY_ID))
}

const USER_BALANCES_MEMORY_ID: MemoryId = MemoryId::new(4);

pub fn user_balances_memory() -> StableMemory {
    MEMORY_MANAGER.with(|m| m.borrow().get(USER_BALANCES_MEMORY_ID))
}

const TICK_SPACINGS_MEMORY_ID: MemoryId = MemoryId::new(5);

pub fn tick_spacings_memory() -> StableMemory {
    MEMORY_MANAGER.with(|m| m.borrow().get(TICK_SPACINGS_MEMORY_ID))
}

const FEE_CONFIG_MEMORY_ID: MemoryId = MemoryId::new(6);

pub fn fee_config_memory() -> StableMemory {
    MEMORY_MANAGER.with(|m| m.borrow().get(FEE_CONFIG_MEMORY_ID))
}

const COUNTERS_MEMORY_ID: MemoryId = MemoryId::new(7);

pub fn counters_memory() -> StableMemory {
    MEMORY_MANAGER.with(|m| m.borrow().get(COUNTERS_MEMORY_ID))
}
