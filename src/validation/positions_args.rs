use crate::api_types::position::GetUserPositionsArgs;
use crate::errors::DexError;

pub const MAX_POSITIONS_PAGE_LIMIT: u32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPositionsArgs {
    pub user: String,
    pub limit: usize,
    pub bookmark: String,
}

pub fn validate_positions_args(
    args: GetUserPositionsArgs,
) -> Result<ValidatedPositionsArgs, DexError> {
    if args.user.is_empty() {
        return Err(DexError::Validation("user must not be empty".to_string()));
    }
    if args.limit == 0 || args.limit > MAX_POSITIONS_PAGE_LIMIT {
        return Err(DexError::Validation(format!(
            "limit must be between 1 and {MAX_POSITIONS_PAGE_LIMIT}"
        )));
    }
    Ok(ValidatedPositionsArgs {
        user: args.user,
        limit: args.limit as usize,
        bookmark: args.bookmark.unwrap_or_default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(user: &str, limit: u32, bookmark: Option<&str>) -> GetUserPositionsArgs {
        GetUserPositionsArgs {
            user: user.to_string(),
            limit,
            bookmark: bookmark.map(str::to_string),
        }
    }

    #[test]
    fn test_accepts_reasonable_limits() {
        let validated = validate_positions_args(args("alice", 10, Some("abc|2"))).unwrap();
        assert_eq!(validated.limit, 10);
        assert_eq!(validated.bookmark, "abc|2");
    }

    #[test]
    fn test_missing_bookmark_means_start() {
        let validated = validate_positions_args(args("alice", 1, None)).unwrap();
        assert_eq!(validated.bookmark, "");
    }

    #[test]
    fn test_rejects_zero_and_oversized_limits() {
        assert!(validate_positions_args(args("alice", 0, None)).is_err());
        assert!(validate_positions_args(args("alice", MAX_POSITIONS_PAGE_LIMIT + 1, None)).is_err());
    }

    #[test]
    fn test_rejects_empty_user() {
        assert!(validate_positions_args(args("", 5, None)).is_err());
    }
}
