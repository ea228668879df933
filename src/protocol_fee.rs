use log::info;
use minicbor::{Decode, Encode};

use crate::api_types::pool::ConfigurePoolDexFeeArgs;
use crate::errors::DexError;
use crate::fee_gate::TxContext;
use crate::pool::types::PoolKey;
use crate::state::{mutate_state, read_state};
use crate::validation::fee_args::validate_protocol_fee;

/// Accounts allowed to change protocol-fee fractions. Seeded by the
/// deployment environment through the state layer.
#[derive(Encode, Decode, Clone, PartialEq, Eq, Debug, Default)]
pub struct DexFeeConfig {
    #[n(0)]
    pub authorities: Vec<String>,
}

/// Sets the fraction of LP fees a pool diverts to the protocol treasury.
/// Restricted to the configured authorities.
pub fn configure_pool_dex_fee(
    ctx: &TxContext,
    args: ConfigurePoolDexFeeArgs,
) -> Result<(), DexError> {
    let config = read_state(|s| s.get_fee_config()).ok_or_else(|| {
        DexError::NotFound("protocol fee configuration not found".to_string())
    })?;
    if !config.authorities.contains(&ctx.caller) {
        return Err(DexError::Unauthorized(format!(
            "{} is not a fee authority",
            ctx.caller
        )));
    }

    validate_protocol_fee(&args.protocol_fee)?;

    let pool_key = PoolKey::new(args.token0.clone(), args.token1.clone(), args.fee.clone());
    let mut pool = read_state(|s| s.get_pool(&pool_key)).ok_or_else(|| {
        DexError::NotFound(format!(
            "pool not found for {}/{}/{}",
            args.token0, args.token1, args.fee
        ))
    })?;

    pool.protocol_fees = args.protocol_fee.clone();
    mutate_state(|s| s.set_pool(pool_key, pool));

    info!(
        "protocol fee for {}/{}/{} set to {} by {}",
        args.token0, args.token1, args.fee, args.protocol_fee, ctx.caller
    );

    Ok(())
}
