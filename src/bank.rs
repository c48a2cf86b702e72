//! Bank directory: the closed table of supported bank codes.
//!
//! The table is a compile-time constant rather than a runtime map with an
//! empty-default fallback; `BankDirectory::new` asserts code uniqueness at
//! startup.

/// The operator's own bank. Transfers whose destination carries this code
/// settle internally even when submitted through the external entry point.
pub const OWN_BANK_CODE: &str = "190909";
pub const OWN_BANK_NAME: &str = "Miles Bank";

const BANKS: &[(&str, &str)] = &[
    (OWN_BANK_CODE, OWN_BANK_NAME),
    ("044", "Access Bank"),
    ("063", "Access Bank (Diamond)"),
    ("035A", "ALAT by WEMA"),
    ("023", "Citibank Nigeria"),
    ("050", "Ecobank Nigeria"),
    ("070", "Fidelity Bank"),
    ("011", "First Bank of Nigeria"),
    ("214", "First City Monument Bank"),
    ("058", "Guaranty Trust Bank"),
    ("030", "Heritage Bank"),
    ("301", "Jaiz Bank"),
    ("082", "Keystone Bank"),
    ("50211", "Kuda Bank"),
    ("120003", "MTN Momo PSB"),
    ("999991", "OPay Digital Services"),
    ("999992", "PalmPay"),
    ("076", "Polaris Bank"),
    ("101", "Providus Bank"),
    ("221", "Stanbic IBTC Bank"),
    ("068", "Standard Chartered Bank"),
    ("232", "Sterling Bank"),
    ("100", "Suntrust Bank"),
    ("032", "Union Bank of Nigeria"),
    ("033", "United Bank For Africa"),
    ("215", "Unity Bank"),
    ("035", "Wema Bank"),
    ("057", "Zenith Bank"),
];

#[derive(Debug, Clone, Copy)]
pub struct BankDirectory;

impl Default for BankDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl BankDirectory {
    pub fn new() -> Self {
        debug_assert!(
            Self::codes_are_unique(),
            "bank directory contains a duplicate code"
        );
        Self
    }

    fn codes_are_unique() -> bool {
        BANKS
            .iter()
            .enumerate()
            .all(|(i, (code, _))| BANKS[i + 1..].iter().all(|(other, _)| other != code))
    }

    pub fn resolve_bank_name(&self, bank_code: &str) -> Option<&'static str> {
        BANKS
            .iter()
            .find(|(code, _)| *code == bank_code)
            .map(|(_, name)| *name)
    }

    pub fn is_known(&self, bank_code: &str) -> bool {
        self.resolve_bank_name(bank_code).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        assert!(BankDirectory::codes_are_unique());
    }

    #[test]
    fn test_resolves_known_codes() {
        let dir = BankDirectory::new();
        assert_eq!(dir.resolve_bank_name("044"), Some("Access Bank"));
        assert_eq!(dir.resolve_bank_name(OWN_BANK_CODE), Some(OWN_BANK_NAME));
        assert!(dir.is_known("057"));
    }

    #[test]
    fn test_unknown_code_is_none_not_default() {
        let dir = BankDirectory::new();
        assert_eq!(dir.resolve_bank_name("999999"), None);
        assert!(!dir.is_known(""));
    }
}
