//! Account configuration from environment variables.
//!
//! Records are scoped to an owning account. Sign-in is handled elsewhere, so the
//! binary takes the account id from `LEDGER_ACCOUNT_ID` (set in `.env`).

const DEFAULT_ACCOUNT_ID: &str = "local";
const DEFAULT_CONFIG_PATH: &str = "ledger.toml";

/// Gets the owning account id, defaulting to `"local"`.
#[must_use]
pub fn get_account_id() -> String {
    account_id_from(std::env::var("LEDGER_ACCOUNT_ID").ok())
}

/// Gets the path of the business configuration file, defaulting to `ledger.toml`.
#[must_use]
pub fn get_config_path() -> String {
    std::env::var("LEDGER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}

fn account_id_from(value: Option<String>) -> String {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_ACCOUNT_ID.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_defaults_when_unset_or_blank() {
        assert_eq!(account_id_from(None), "local");
        assert_eq!(account_id_from(Some("   ".to_string())), "local");
    }

    #[test]
    fn test_account_id_is_trimmed() {
        assert_eq!(account_id_from(Some(" dairy-42 ".to_string())), "dairy-42");
    }
}
