use crate::errors::DexError;
use crate::libraries::fixed_point::Decimal;
use crate::state::{mutate_state, read_state};
use types::{UserBalance, UserBalanceKey};

pub mod types;

pub fn get_balance(user: &str, token: &str) -> Decimal {
    read_state(|s| {
        s.get_user_balance(&UserBalanceKey {
            user: user.to_string(),
            token: token.to_string(),
        })
        .0
    })
}

/// Adds `amount` (non-negative) to a user's engine balance.
pub fn credit(user: &str, token: &str, amount: &Decimal) {
    if amount.is_negative() {
        panic!("Bug: credit amount must not be negative");
    }
    mutate_state(|s| {
        let key = UserBalanceKey {
            user: user.to_string(),
            token: token.to_string(),
        };
        let balance = s.get_user_balance(&key).0;
        s.set_user_balance(key, UserBalance((&balance + amount).f18()));
    })
}

/// Removes `amount` (non-negative) from a user's engine balance.
pub fn debit(user: &str, token: &str, amount: &Decimal) -> Result<(), DexError> {
    if amount.is_negative() {
        panic!("Bug: debit amount must not be negative");
    }
    mutate_state(|s| {
        let key = UserBalanceKey {
            user: user.to_string(),
            token: token.to_string(),
        };
        let balance = s.get_user_balance(&key).0;
        if &balance < amount {
            return Err(DexError::Validation(format!(
                "insufficient balance of {token}: have {balance}, need {amount}"
            )));
        }
        s.set_user_balance(key, UserBalance((&balance - amount).f18()));
        Ok(())
    })
}
