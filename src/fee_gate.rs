use crate::errors::DexError;

/// Fee codes handed to the gate before each user-facing operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeCode {
    CreatePool,
    AddLiquidity,
    Swap,
    RemoveLiquidity,
    CollectPositionFees,
    TransferDexPosition,
}

/// Opaque pre-operation predicate. The engine only cares whether it passes;
/// charging, metering and exemptions all live behind this seam.
pub trait FeeGate {
    fn enforce(&self, caller: &str, code: FeeCode) -> Result<(), DexError>;
}

/// Gate that admits everything. Used when no gating collaborator is wired.
pub struct NoopFeeGate;

impl FeeGate for NoopFeeGate {
    fn enforce(&self, _caller: &str, _code: FeeCode) -> Result<(), DexError> {
        Ok(())
    }
}

pub const NOOP_FEE_GATE: NoopFeeGate = NoopFeeGate;

/// Per-request execution context: the authenticated caller plus the fee
/// gate to consult. Authentication itself happens before the engine runs.
pub struct TxContext<'a> {
    pub caller: String,
    pub fee_gate: &'a dyn FeeGate,
}

impl TxContext<'static> {
    pub fn new(caller: impl Into<String>) -> Self {
        TxContext {
            caller: caller.into(),
            fee_gate: &NOOP_FEE_GATE,
        }
    }
}

impl<'a> TxContext<'a> {
    pub fn with_gate(caller: impl Into<String>, fee_gate: &'a dyn FeeGate) -> Self {
        TxContext {
            caller: caller.into(),
            fee_gate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClosedGate;

    impl FeeGate for ClosedGate {
        fn enforce(&self, caller: &str, _code: FeeCode) -> Result<(), DexError> {
            Err(DexError::Unauthorized(format!("fee gate rejected {caller}")))
        }
    }

    #[test]
    fn test_noop_gate_admits_everyone() {
        let ctx = TxContext::new("anyone");
        assert!(ctx.fee_gate.enforce(&ctx.caller, FeeCode::Swap).is_ok());
    }

    #[test]
    fn test_custom_gate_is_consulted() {
        let gate = ClosedGate;
        let ctx = TxContext::with_gate("alice", &gate);
        assert_eq!(
            ctx.fee_gate.enforce(&ctx.caller, FeeCode::AddLiquidity),
            Err(DexError::Unauthorized("fee gate rejected alice".to_string()))
        );
    }
}
