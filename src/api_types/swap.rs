use serde::{Deserialize, Serialize};

use crate::libraries::fixed_point::Decimal;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapArgs {
    pub token0: String,
    pub token1: String,
    pub fee: Decimal,
    /// Amount of the specified token, always positive; `exact_input`
    /// selects which side it fixes.
    pub amount: Decimal,
    pub exact_input: bool,
    /// true pays token0 and receives token1, moving the price downward.
    pub zero_for_one: bool,
    /// Price guard: the swap stops when the pool price reaches this value.
    pub sqrt_price_limit: Decimal,
    /// Account credited with the output tokens.
    pub recipient: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapResponse {
    pub token_in: String,
    pub token_out: String,
    /// Total paid in, fee inclusive.
    pub amount_in: Decimal,
    pub amount_out: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_fields_serialize_as_decimal_strings() {
        let response = SwapResponse {
            token_in: "GALA".to_string(),
            token_out: "USDC".to_string(),
            amount_in: "1000".parse().unwrap(),
            amount_out: "996.999999999999005992".parse().unwrap(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["amount_in"], "1000");
        assert_eq!(json["amount_out"], "996.999999999999005992");
    }

    #[test]
    fn test_swap_args_round_trip() {
        let raw = r#"{
            "token0": "GALA",
            "token1": "USDC",
            "fee": "0.003",
            "amount": "12.5",
            "exact_input": true,
            "zero_for_one": false,
            "sqrt_price_limit": "1.2",
            "recipient": "client|alice"
        }"#;

        let args: SwapArgs = serde_json::from_str(raw).unwrap();
        assert_eq!(args.fee, "0.003".parse().unwrap());
        assert_eq!(args.amount, "12.5".parse().unwrap());
        assert!(!args.zero_for_one);

        let reserialized = serde_json::to_string(&args).unwrap();
        let reparsed: SwapArgs = serde_json::from_str(&reserialized).unwrap();
        assert_eq!(reparsed.sqrt_price_limit, args.sqrt_price_limit);
    }
}
