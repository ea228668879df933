//! Cross-operation flows: pool creation, liquidity provisioning, swapping,
//! fee collection and position listing against the same ledger state.

use crate::add_liquidity::add_liquidity;
use crate::api_types::pool::CreatePoolArgs;
use crate::api_types::position::{
    AddLiquidityArgs, CollectPositionFeesArgs, GetUserPositionsArgs, RemoveLiquidityArgs,
};
use crate::api_types::swap::SwapArgs;
use crate::balances;
use crate::collect_fees::collect_position_fees;
use crate::errors::DexError;
use crate::fee_gate::{FeeCode, FeeGate, TxContext};
use crate::libraries::fixed_point::Decimal;
use crate::pool::create_pool::create_pool;
use crate::remove_liquidity::remove_liquidity;
use crate::state::read_state;
use crate::swap::swap;
use crate::user_positions::get_user_positions;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn setup_pool(token0: &str, token1: &str) -> crate::pool::types::PoolKey {
    create_pool(
        &TxContext::new("deployer"),
        CreatePoolArgs {
            token0: token0.to_string(),
            token1: token1.to_string(),
            fee: dec("0.003"),
            initial_sqrt_price: dec("1"),
        },
    )
    .unwrap()
}

fn provision(owner: &str, token0: &str, token1: &str) {
    balances::credit(owner, token0, &dec("1000000"));
    balances::credit(owner, token1, &dec("1000000"));
}

fn mint_position(owner: &str, token0: &str, token1: &str) -> String {
    add_liquidity(
        &TxContext::new(owner),
        AddLiquidityArgs {
            token0: token0.to_string(),
            token1: token1.to_string(),
            fee: dec("0.003"),
            tick_lower: -60,
            tick_upper: 60,
            amount0_desired: dec("3000"),
            amount1_desired: dec("3000"),
            position_id: None,
        },
    )
    .unwrap()
    .position_id
}

#[test]
fn test_full_lifecycle_mint_swap_collect_burn() {
    let (token0, token1) = ("ITLA", "ITLB");
    let pool_key = setup_pool(token0, token1);
    provision("it-alice", token0, token1);
    provision("it-bob", token0, token1);

    // mint: alice pays both legs into the pool
    let alice_t0_before = balances::get_balance("it-alice", token0);
    let position_id = mint_position("it-alice", token0, token1);
    let alice_t0_after_mint = balances::get_balance("it-alice", token0);
    assert!(alice_t0_after_mint < alice_t0_before);

    let pool = read_state(|s| s.get_pool(&pool_key)).unwrap();
    assert!(pool.liquidity.is_positive());
    assert!(pool.reserve0.is_positive());
    assert!(pool.reserve1.is_positive());

    // swap: bob pays token0, receives token1
    let bob_t0_before = balances::get_balance("it-bob", token0);
    let bob_t1_before = balances::get_balance("it-bob", token1);
    let reserve0_before = pool.reserve0.clone();

    let response = swap(
        &TxContext::new("it-bob"),
        SwapArgs {
            token0: token0.to_string(),
            token1: token1.to_string(),
            fee: dec("0.003"),
            amount: dec("10"),
            exact_input: true,
            zero_for_one: true,
            sqrt_price_limit: dec("0.9"),
            recipient: "it-bob".to_string(),
        },
    )
    .unwrap();

    assert_eq!(response.amount_in, dec("10"));
    assert!(response.amount_out.is_positive());
    assert!(response.amount_out < response.amount_in);

    // the caller paid exactly amount_in, the recipient got exactly
    // amount_out, and the pool absorbed the difference
    assert_eq!(
        &bob_t0_before - &balances::get_balance("it-bob", token0),
        response.amount_in
    );
    assert_eq!(
        &balances::get_balance("it-bob", token1) - &bob_t1_before,
        response.amount_out
    );
    let pool = read_state(|s| s.get_pool(&pool_key)).unwrap();
    assert_eq!(&pool.reserve0 - &reserve0_before, response.amount_in);
    assert!(pool.fee_growth_global_0.is_positive());
    assert!(pool.sqrt_price < dec("1"));

    // collect: the swap's fee belongs to alice's position
    let collected = collect_position_fees(
        &TxContext::new("it-alice"),
        CollectPositionFeesArgs {
            token0: token0.to_string(),
            token1: token1.to_string(),
            fee: dec("0.003"),
            position_id: position_id.clone(),
        },
    )
    .unwrap();
    assert!(collected.amount0.is_positive());
    assert!(collected.amount1.is_zero());

    // collecting twice yields nothing more
    let collected_again = collect_position_fees(
        &TxContext::new("it-alice"),
        CollectPositionFeesArgs {
            token0: token0.to_string(),
            token1: token1.to_string(),
            fee: dec("0.003"),
            position_id: position_id.clone(),
        },
    )
    .unwrap();
    assert!(collected_again.amount0.is_zero());
    assert!(collected_again.amount1.is_zero());

    // burn everything: alice gets the pool's remaining obligation back
    let position = read_state(|s| {
        s.get_position(&crate::position::types::PositionKey {
            pool_hash: pool_key.gen_pool_hash(),
            position_id: position_id.clone(),
        })
    })
    .unwrap();
    let removed = remove_liquidity(
        &TxContext::new("it-alice"),
        RemoveLiquidityArgs {
            token0: token0.to_string(),
            token1: token1.to_string(),
            fee: dec("0.003"),
            position_id: position_id.clone(),
            liquidity: position.liquidity,
        },
    )
    .unwrap();
    assert!(removed.amount0.is_positive());
    assert!(removed.amount1.is_positive());

    let pool = read_state(|s| s.get_pool(&pool_key)).unwrap();
    assert!(pool.liquidity.is_zero());
}

#[test]
fn test_positions_listing_reflects_minted_positions() {
    let (token0, token1) = ("ITPA", "ITPB");
    setup_pool(token0, token1);
    provision("it-carol", token0, token1);

    let first = mint_position("it-carol", token0, token1);
    let second = mint_position("it-carol", token0, token1);

    let response = get_user_positions(
        &TxContext::new("it-carol"),
        GetUserPositionsArgs {
            user: "it-carol".to_string(),
            limit: 10,
            bookmark: None,
        },
    )
    .unwrap();

    let ids: Vec<&str> = response
        .positions
        .iter()
        .map(|p| p.position_id.as_str())
        .collect();
    assert_eq!(ids, vec![first.as_str(), second.as_str()]);
    assert_eq!(response.bookmark, "");
    assert!(response.positions[0].liquidity.is_positive());

    // page-by-page traversal sees the same positions
    let paged = get_user_positions(
        &TxContext::new("it-carol"),
        GetUserPositionsArgs {
            user: "it-carol".to_string(),
            limit: 1,
            bookmark: None,
        },
    )
    .unwrap();
    assert_eq!(paged.positions[0].position_id, first);
    assert!(!paged.bookmark.is_empty());

    let paged = get_user_positions(
        &TxContext::new("it-carol"),
        GetUserPositionsArgs {
            user: "it-carol".to_string(),
            limit: 1,
            bookmark: Some(paged.bookmark),
        },
    )
    .unwrap();
    assert_eq!(paged.positions[0].position_id, second);
}

#[test]
fn test_swap_without_balance_fails_and_mutates_nothing() {
    let (token0, token1) = ("ITNA", "ITNB");
    let pool_key = setup_pool(token0, token1);
    provision("it-dave", token0, token1);
    mint_position("it-dave", token0, token1);

    let pool_before = read_state(|s| s.get_pool(&pool_key)).unwrap();

    let err = swap(
        &TxContext::new("it-pauper"),
        SwapArgs {
            token0: token0.to_string(),
            token1: token1.to_string(),
            fee: dec("0.003"),
            amount: dec("10"),
            exact_input: true,
            zero_for_one: true,
            sqrt_price_limit: dec("0.9"),
            recipient: "it-pauper".to_string(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, DexError::Validation(_)));

    assert_eq!(read_state(|s| s.get_pool(&pool_key)).unwrap(), pool_before);
}

#[test]
fn test_fee_gate_blocks_operations() {
    struct SwapsOnly;

    impl FeeGate for SwapsOnly {
        fn enforce(&self, _caller: &str, code: FeeCode) -> Result<(), DexError> {
            if code == FeeCode::Swap {
                Ok(())
            } else {
                Err(DexError::Unauthorized("operation fee unpaid".to_string()))
            }
        }
    }

    let gate = SwapsOnly;
    let ctx = TxContext::with_gate("it-errol", &gate);

    let err = create_pool(
        &ctx,
        CreatePoolArgs {
            token0: "ITGA".to_string(),
            token1: "ITGB".to_string(),
            fee: dec("0.003"),
            initial_sqrt_price: dec("1"),
        },
    )
    .unwrap_err();
    assert_eq!(err, DexError::Unauthorized("operation fee unpaid".to_string()));
}

#[test]
fn test_create_pool_rejects_duplicates_and_bad_tiers() {
    let ctx = TxContext::new("deployer");
    setup_pool("ITCA", "ITCB");

    let err = create_pool(
        &ctx,
        CreatePoolArgs {
            token0: "ITCA".to_string(),
            token1: "ITCB".to_string(),
            fee: dec("0.003"),
            initial_sqrt_price: dec("1"),
        },
    )
    .unwrap_err();
    assert_eq!(err, DexError::Conflict("pool already exists".to_string()));

    let err = create_pool(
        &ctx,
        CreatePoolArgs {
            token0: "ITCC".to_string(),
            token1: "ITCD".to_string(),
            fee: dec("0.004"),
            initial_sqrt_price: dec("1"),
        },
    )
    .unwrap_err();
    assert!(matches!(err, DexError::Validation(_)));
}
