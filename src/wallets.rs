//! Wallet lifecycle: creation, lookup and PIN changes.

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::bank::OWN_BANK_CODE;
use crate::core_types::{Currency, OwnerId};
use crate::error::LedgerError;
use crate::models::{NewWallet, Wallet};
use crate::pin::PinGuard;
use crate::store::WalletStore;

pub struct WalletService {
    store: Arc<dyn WalletStore>,
}

impl WalletService {
    pub fn new(store: Arc<dyn WalletStore>) -> Self {
        Self { store }
    }

    /// Creates a zero-balance wallet for (owner, currency) with a fresh,
    /// unused 10-digit account number.
    pub async fn create_wallet(
        &self,
        owner: OwnerId,
        owner_name: &str,
        currency: Currency,
        pin: &str,
    ) -> Result<Wallet, LedgerError> {
        PinGuard::validate_format(pin)?;
        if self.store.wallet_by_owner(owner, currency).await?.is_some() {
            return Err(LedgerError::Conflict(format!(
                "{currency} wallet already exists"
            )));
        }

        let pin_hash = PinGuard::hash(pin)?;
        let account_number = self.generate_account_number().await?;
        let wallet = self
            .store
            .insert_wallet(NewWallet {
                owner_id: owner,
                currency,
                account_number,
                account_name: owner_name.to_string(),
                pin_hash,
                bank_code: OWN_BANK_CODE.to_string(),
            })
            .await?;

        info!(
            owner,
            currency = %wallet.currency,
            account_number = %wallet.account_number,
            "wallet created"
        );
        Ok(wallet)
    }

    pub async fn wallet(&self, owner: OwnerId, currency: Currency) -> Result<Wallet, LedgerError> {
        self.store
            .wallet_by_owner(owner, currency)
            .await?
            .ok_or_else(|| {
                LedgerError::NotFound(format!("no {currency} wallet found, create one first"))
            })
    }

    /// Replaces the transaction PIN after verifying the current one.
    pub async fn change_pin(
        &self,
        owner: OwnerId,
        currency: Currency,
        old_pin: &str,
        new_pin: &str,
    ) -> Result<(), LedgerError> {
        PinGuard::validate_format(new_pin)?;
        if new_pin == old_pin {
            return Err(LedgerError::Validation(
                "new PIN must differ from the current PIN".to_string(),
            ));
        }

        let wallet = self.wallet(owner, currency).await?;
        if !PinGuard::verify(old_pin, &wallet.pin_hash) {
            return Err(LedgerError::Authorization);
        }

        let pin_hash = PinGuard::hash(new_pin)?;
        self.store.update_pin(wallet.wallet_id, pin_hash).await?;
        info!(owner, currency = %currency, "transaction PIN changed");
        Ok(())
    }

    async fn generate_account_number(&self) -> Result<String, LedgerError> {
        loop {
            let candidate = {
                let mut rng = rand::thread_rng();
                format!("{:010}", rng.gen_range(0..10_000_000_000u64))
            };
            if !self.store.account_number_taken(&candidate).await? {
                return Ok(candidate);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn service() -> WalletService {
        WalletService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_wallet_assigns_account_number() {
        let service = service();
        let wallet = service
            .create_wallet(1, "Ada Obi", Currency::Ngn, "1234")
            .await
            .expect("create");
        assert_eq!(wallet.account_number.len(), 10);
        assert!(wallet.account_number.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(wallet.bank_code, OWN_BANK_CODE);
        assert_eq!(wallet.balance, rust_decimal::Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_duplicate_wallet_is_conflict() {
        let service = service();
        service
            .create_wallet(1, "Ada Obi", Currency::Ngn, "1234")
            .await
            .expect("first create");
        let err = service
            .create_wallet(1, "Ada Obi", Currency::Ngn, "1234")
            .await
            .expect_err("duplicate");
        assert!(matches!(err, LedgerError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_same_owner_different_currency_is_fine() {
        let service = service();
        service
            .create_wallet(1, "Ada Obi", Currency::Ngn, "1234")
            .await
            .expect("ngn wallet");
        service
            .create_wallet(1, "Ada Obi", Currency::Usd, "1234")
            .await
            .expect("usd wallet");
    }

    #[tokio::test]
    async fn test_bad_pin_format_rejected() {
        let service = service();
        for pin in ["123", "12345", "12a4", ""] {
            let err = service
                .create_wallet(1, "Ada Obi", Currency::Ngn, pin)
                .await
                .expect_err("bad pin");
            assert!(matches!(err, LedgerError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_change_pin_verifies_old_pin() {
        let service = service();
        service
            .create_wallet(1, "Ada Obi", Currency::Ngn, "1234")
            .await
            .expect("create");

        let err = service
            .change_pin(1, Currency::Ngn, "0000", "5678")
            .await
            .expect_err("wrong old pin");
        assert!(matches!(err, LedgerError::Authorization));

        let err = service
            .change_pin(1, Currency::Ngn, "1234", "1234")
            .await
            .expect_err("same pin");
        assert!(matches!(err, LedgerError::Validation(_)));

        service
            .change_pin(1, Currency::Ngn, "1234", "5678")
            .await
            .expect("change pin");
        let wallet = service.wallet(1, Currency::Ngn).await.expect("wallet");
        assert!(PinGuard::verify("5678", &wallet.pin_hash));
        assert!(!PinGuard::verify("1234", &wallet.pin_hash));
    }

    #[tokio::test]
    async fn test_missing_wallet_message_names_currency() {
        let service = service();
        let err = service.wallet(9, Currency::Usd).await.expect_err("missing");
        assert_eq!(err.to_string(), "no USD wallet found, create one first");
    }
}
