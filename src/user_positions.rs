use crate::api_types::position::{GetUserPositionsArgs, GetUserPositionsResponse};
use crate::errors::DexError;
use crate::fee_gate::TxContext;
use crate::position::paging::{LEDGER_PAGE_SIZE, fetch_user_positions};
use crate::validation::positions_args::validate_positions_args;

/// Lists an account's positions across all pools, `limit` at a time. Pure
/// read: the result is a function of ledger state and the bookmark alone.
pub fn get_user_positions(
    _ctx: &TxContext,
    args: GetUserPositionsArgs,
) -> Result<GetUserPositionsResponse, DexError> {
    let validated = validate_positions_args(args)?;

    let (positions, bookmark) = fetch_user_positions(
        &validated.user,
        validated.limit,
        &validated.bookmark,
        LEDGER_PAGE_SIZE,
    )?;

    Ok(GetUserPositionsResponse {
        positions,
        bookmark,
    })
}
