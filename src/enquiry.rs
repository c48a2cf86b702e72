//! Account name enquiry.
//!
//! Internal enquiry resolves against our own wallet table; external enquiry
//! goes to the Paystack resolve endpoint. Both return a `NameEnquiry` so the
//! transfer engine treats the two paths uniformly.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::config::PaystackConfig;
use crate::error::LedgerError;
use crate::store::WalletStore;

#[derive(Debug, Clone)]
pub struct NameEnquiry {
    pub success: bool,
    pub account_name: String,
    pub account_number: String,
    pub bank_code: String,
    /// Provider message on failure; empty on success.
    pub message: String,
}

impl NameEnquiry {
    pub fn success(account_name: String, account_number: String, bank_code: String) -> Self {
        Self {
            success: true,
            account_name,
            account_number,
            bank_code,
            message: String::new(),
        }
    }

    pub fn failed(account_number: String, bank_code: String, message: String) -> Self {
        Self {
            success: false,
            account_name: String::new(),
            account_number,
            bank_code,
            message,
        }
    }
}

/// Resolves account names inside our own books.
pub struct NameResolver {
    wallets: Arc<dyn WalletStore>,
}

impl NameResolver {
    pub fn new(wallets: Arc<dyn WalletStore>) -> Self {
        Self { wallets }
    }

    pub async fn resolve_internal(&self, account_number: &str) -> Result<NameEnquiry, LedgerError> {
        match self.wallets.wallet_by_account(account_number).await? {
            Some(wallet) => Ok(NameEnquiry::success(
                wallet.account_name,
                wallet.account_number,
                wallet.bank_code,
            )),
            None => Err(LedgerError::NotFound(format!(
                "account {account_number} not found in Miles Bank"
            ))),
        }
    }
}

/// External name verification against another bank.
#[async_trait]
pub trait ExternalEnquiry: Send + Sync {
    async fn verify(&self, account_number: &str, bank_code: &str)
        -> Result<NameEnquiry, LedgerError>;
}

/// Paystack-backed enquiry. A failed verification is data, not an error:
/// transport and decoding failures are errors, a "could not resolve" answer
/// comes back as `NameEnquiry::failed`.
pub struct PaystackEnquiry {
    client: reqwest::Client,
    secret_key: String,
    base_url: String,
}

impl PaystackEnquiry {
    pub fn new(config: &PaystackConfig) -> Result<Self, LedgerError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LedgerError::Internal(format!("http client: {e}")))?;
        Ok(Self {
            client,
            secret_key: config.secret_key.clone(),
            base_url: "https://api.paystack.co".to_string(),
        })
    }

    #[cfg(test)]
    fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }
}

#[async_trait]
impl ExternalEnquiry for PaystackEnquiry {
    async fn verify(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Result<NameEnquiry, LedgerError> {
        let url = format!(
            "{}/bank/resolve?account_number={}&bank_code={}",
            self.base_url, account_number, bank_code
        );
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| LedgerError::ExternalService(format!("name enquiry request: {e}")))?;

        if response.status().as_u16() == 429 {
            warn!(bank_code, "name enquiry rate limited");
            return Ok(NameEnquiry::failed(
                account_number.to_string(),
                bank_code.to_string(),
                "verification rate limit reached, try again shortly".to_string(),
            ));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LedgerError::ExternalService(format!("name enquiry response: {e}")))?;

        let ok = body["status"].as_bool().unwrap_or(false);
        if !ok {
            let message = body["message"]
                .as_str()
                .unwrap_or("could not resolve account name")
                .to_string();
            return Ok(NameEnquiry::failed(
                account_number.to_string(),
                bank_code.to_string(),
                message,
            ));
        }

        let account_name = body["data"]["account_name"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        if account_name.is_empty() {
            return Ok(NameEnquiry::failed(
                account_number.to_string(),
                bank_code.to_string(),
                "provider returned no account name".to_string(),
            ));
        }
        Ok(NameEnquiry::success(
            account_name,
            account_number.to_string(),
            bank_code.to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::Currency;
    use crate::models::NewWallet;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_internal_enquiry_finds_existing_wallet() {
        let store = Arc::new(MemoryStore::new());
        store
            .insert_wallet(NewWallet {
                owner_id: 1,
                currency: Currency::Ngn,
                account_number: "0123456789".to_string(),
                account_name: "Ada Obi".to_string(),
                pin_hash: "hash".to_string(),
                bank_code: "190909".to_string(),
            })
            .await
            .expect("insert wallet");

        let resolver = NameResolver::new(store);
        let enquiry = resolver.resolve_internal("0123456789").await.expect("resolve");
        assert!(enquiry.success);
        assert_eq!(enquiry.account_name, "Ada Obi");
    }

    #[tokio::test]
    async fn test_internal_enquiry_unknown_account_is_not_found() {
        let resolver = NameResolver::new(Arc::new(MemoryStore::new()));
        let err = resolver
            .resolve_internal("9999999999")
            .await
            .expect_err("unknown account");
        assert!(matches!(err, LedgerError::NotFound(_)));
        assert!(err.to_string().contains("not found in Miles Bank"));
    }

    #[tokio::test]
    #[ignore] // Requires network access and a Paystack key
    async fn test_paystack_resolve_live() {
        let config = PaystackConfig {
            secret_key: std::env::var("PAYSTACK_SECRET_KEY").unwrap_or_default(),
            timeout_secs: 10,
        };
        let enquiry = PaystackEnquiry::new(&config)
            .expect("client")
            .with_base_url("https://api.paystack.co".to_string());
        let result = enquiry.verify("0001234567", "044").await.expect("verify");
        // Either outcome is acceptable, the call must just complete cleanly.
        assert!(!result.account_number.is_empty());
    }
}
