/// Ledger configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LedgerConfig {
    /// Refuse to forward transactions without entries to storage.
    ///
    /// Off by default: an empty transaction is vacuously balanced and is saved
    /// like any other.
    pub reject_empty_transactions: bool,
}

impl LedgerConfig {
    pub const REJECT_EMPTY_ENV: &'static str = "HAYA_REJECT_EMPTY_TRANSACTIONS";

    /// Read configuration from the process environment, falling back to
    /// defaults for unset or unparsable values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let reject_empty_transactions = lookup(Self::REJECT_EMPTY_ENV)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Self {
            reject_empty_transactions,
        }
    }

    pub fn with_reject_empty_transactions(mut self, reject: bool) -> Self {
        self.reject_empty_transactions = reject;
        self
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_forward_empty_transactions() {
        assert!(!LedgerConfig::default().reject_empty_transactions);
    }

    #[test]
    fn flags_accept_common_spellings() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("maybe"));
    }

    #[test]
    fn lookup_reads_reject_flag() {
        let strict = LedgerConfig::from_lookup(|key| {
            (key == LedgerConfig::REJECT_EMPTY_ENV).then(|| "yes".to_string())
        });
        assert!(strict.reject_empty_transactions);

        let unset = LedgerConfig::from_lookup(|_| None);
        assert_eq!(unset, LedgerConfig::default());
    }

    #[test]
    fn builder_overrides_default() {
        let config = LedgerConfig::default().with_reject_empty_transactions(true);
        assert!(config.reject_empty_transactions);
    }
}
