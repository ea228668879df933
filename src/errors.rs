use thiserror::Error;

/// Crate-level error roles. Every operation surfaces one of these to the
/// transaction boundary; the engine never catches its own errors, so a
/// failed operation leaves the ledger untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DexError {
    /// The request itself is malformed or violates a precondition.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A referenced object does not exist in the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// The caller is not allowed to perform the operation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The operation cannot be satisfied against current pool state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The store contradicts itself. Fatal; surfaces to the operator.
    #[error("inconsistent ledger state: {0}")]
    Inconsistent(String),
}

impl DexError {
    /// The swap walked past the last usable tick in its direction of travel.
    pub fn insufficient_liquidity() -> Self {
        DexError::Conflict("Not enough liquidity available in pool".to_string())
    }

    pub fn invalid_bookmark() -> Self {
        DexError::Validation("invalid bookmark".to_string())
    }
}
