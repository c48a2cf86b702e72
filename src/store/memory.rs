//! In-process store.
//!
//! One async mutex guards the whole unit of work, so concurrent commits
//! serialize and the balance re-check inside `commit_transfer` can never see
//! a stale value. Used by every test and by the demo binary; the PostgreSQL
//! store is the production counterpart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use crate::core_types::{Currency, OwnerId, WalletId};
use crate::error::LedgerError;
use crate::models::{BillPayment, NewWallet, Transaction, Wallet};
use crate::rates::RateSnapshot;

use super::{BillCommit, LedgerReader, RateStore, TransferCommit, WalletStore};

#[derive(Default)]
struct Inner {
    wallets: HashMap<WalletId, Wallet>,
    by_account: HashMap<String, WalletId>,
    transactions: Vec<Transaction>,
    bill_payments: Vec<BillPayment>,
    rate: Option<RateSnapshot>,
    next_wallet_id: WalletId,
    next_txn_id: i64,
    next_bill_id: i64,
}

pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                next_wallet_id: 1,
                next_txn_id: 1,
                next_bill_id: 1,
                ..Inner::default()
            }),
        }
    }

    /// Test/demo funding hook. Production balances only ever change through
    /// commit plans.
    pub async fn deposit(&self, wallet: WalletId, amount: Decimal) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock().await;
        let w = inner
            .wallets
            .get_mut(&wallet)
            .ok_or_else(|| LedgerError::NotFound(format!("wallet {wallet} not found")))?;
        w.balance += amount;
        Ok(())
    }
}

#[async_trait]
impl WalletStore for MemoryStore {
    async fn wallet_by_owner(
        &self,
        owner: OwnerId,
        currency: Currency,
    ) -> Result<Option<Wallet>, LedgerError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .wallets
            .values()
            .find(|w| w.owner_id == owner && w.currency == currency)
            .cloned())
    }

    async fn wallet_by_account(&self, account_number: &str) -> Result<Option<Wallet>, LedgerError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .by_account
            .get(account_number)
            .and_then(|id| inner.wallets.get(id))
            .cloned())
    }

    async fn account_number_taken(&self, account_number: &str) -> Result<bool, LedgerError> {
        let inner = self.inner.lock().await;
        Ok(inner.by_account.contains_key(account_number))
    }

    async fn insert_wallet(&self, wallet: NewWallet) -> Result<Wallet, LedgerError> {
        let mut inner = self.inner.lock().await;
        if inner
            .wallets
            .values()
            .any(|w| w.owner_id == wallet.owner_id && w.currency == wallet.currency)
        {
            return Err(LedgerError::Conflict(format!(
                "{} wallet already exists",
                wallet.currency
            )));
        }
        if inner.by_account.contains_key(&wallet.account_number) {
            return Err(LedgerError::Conflict(format!(
                "account number {} already taken",
                wallet.account_number
            )));
        }

        let wallet_id = inner.next_wallet_id;
        inner.next_wallet_id += 1;
        let record = Wallet {
            wallet_id,
            owner_id: wallet.owner_id,
            currency: wallet.currency,
            balance: Decimal::ZERO,
            account_number: wallet.account_number.clone(),
            account_name: wallet.account_name,
            pin_hash: wallet.pin_hash,
            bank_code: wallet.bank_code,
            created_at: Utc::now(),
        };
        inner.by_account.insert(wallet.account_number, wallet_id);
        inner.wallets.insert(wallet_id, record.clone());
        Ok(record)
    }

    async fn update_pin(&self, wallet: WalletId, pin_hash: String) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock().await;
        let w = inner
            .wallets
            .get_mut(&wallet)
            .ok_or_else(|| LedgerError::NotFound(format!("wallet {wallet} not found")))?;
        w.pin_hash = pin_hash;
        Ok(())
    }

    async fn commit_transfer(&self, commit: TransferCommit) -> Result<Decimal, LedgerError> {
        let mut inner = self.inner.lock().await;

        // All checks first; nothing is mutated until every one has passed.
        let source = inner
            .wallets
            .get(&commit.debit_wallet)
            .ok_or_else(|| LedgerError::NotFound("source wallet not found".to_string()))?;
        if source.balance < commit.debit_amount {
            return Err(LedgerError::InsufficientFunds(source.currency));
        }
        if let Some(leg) = &commit.credit {
            if !inner.wallets.contains_key(&leg.wallet) {
                return Err(LedgerError::NotFound(
                    "recipient wallet not found".to_string(),
                ));
            }
        }

        let balance_after = {
            let w = inner
                .wallets
                .get_mut(&commit.debit_wallet)
                .ok_or_else(|| LedgerError::NotFound("source wallet not found".to_string()))?;
            w.balance -= commit.debit_amount;
            w.balance
        };
        if let Some(leg) = &commit.credit {
            let w = inner
                .wallets
                .get_mut(&leg.wallet)
                .ok_or_else(|| LedgerError::NotFound("recipient wallet not found".to_string()))?;
            w.balance += leg.amount;
        }

        let now = Utc::now();
        for draft in commit.entries {
            let txn_id = inner.next_txn_id;
            inner.next_txn_id += 1;
            inner.transactions.push(Transaction {
                txn_id,
                owner_id: draft.owner_id,
                wallet_id: draft.wallet_id,
                amount: draft.amount,
                txn_type: draft.txn_type,
                reference: draft.reference,
                status: draft.status,
                description: draft.description,
                beneficiary_account: draft.beneficiary_account,
                beneficiary_name: draft.beneficiary_name,
                beneficiary_bank: draft.beneficiary_bank,
                created_at: now,
            });
        }

        Ok(balance_after)
    }

    async fn commit_bill_payment(&self, commit: BillCommit) -> Result<Decimal, LedgerError> {
        let mut inner = self.inner.lock().await;

        let wallet = inner
            .wallets
            .get(&commit.debit_wallet)
            .ok_or_else(|| LedgerError::NotFound("wallet not found".to_string()))?;
        if wallet.balance < commit.debit_amount {
            return Err(LedgerError::InsufficientFunds(wallet.currency));
        }

        let balance_after = {
            let w = inner
                .wallets
                .get_mut(&commit.debit_wallet)
                .ok_or_else(|| LedgerError::NotFound("wallet not found".to_string()))?;
            w.balance -= commit.debit_amount;
            w.balance
        };

        let bill_id = inner.next_bill_id;
        inner.next_bill_id += 1;
        let row = commit.row;
        inner.bill_payments.push(BillPayment {
            bill_id,
            owner_id: row.owner_id,
            amount: row.amount,
            bill_type: row.bill_type,
            reference: row.reference,
            status: row.status,
            phone_number: row.phone_number,
            network: row.network,
            plan_id: row.plan_id,
            details: row.details,
            created_at: Utc::now(),
        });

        Ok(balance_after)
    }
}

#[async_trait]
impl LedgerReader for MemoryStore {
    async fn transactions_by_reference(
        &self,
        reference: &str,
    ) -> Result<Vec<Transaction>, LedgerError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .transactions
            .iter()
            .filter(|t| t.reference == reference)
            .cloned()
            .collect())
    }

    async fn bill_payment_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<BillPayment>, LedgerError> {
        let inner = self.inner.lock().await;
        Ok(inner
            .bill_payments
            .iter()
            .find(|b| b.reference == reference)
            .cloned())
    }
}

#[async_trait]
impl RateStore for MemoryStore {
    async fn load(&self) -> Result<Option<RateSnapshot>, LedgerError> {
        let inner = self.inner.lock().await;
        Ok(inner.rate.clone())
    }

    async fn save(&self, snapshot: &RateSnapshot) -> Result<(), LedgerError> {
        let mut inner = self.inner.lock().await;
        inner.rate = Some(snapshot.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;
    use crate::core_types::{TxnStatus, TxnType};
    use crate::models::LedgerDraft;
    use crate::store::CreditLeg;

    fn new_wallet(owner: OwnerId, currency: Currency, account: &str) -> NewWallet {
        NewWallet {
            owner_id: owner,
            currency,
            account_number: account.to_string(),
            account_name: format!("Owner {owner}"),
            pin_hash: "hash".to_string(),
            bank_code: "190909".to_string(),
        }
    }

    fn draft(wallet: &Wallet, amount: Decimal, txn_type: TxnType, reference: &str) -> LedgerDraft {
        LedgerDraft {
            owner_id: wallet.owner_id,
            wallet_id: wallet.wallet_id,
            amount,
            txn_type,
            reference: reference.to_string(),
            status: TxnStatus::Successful,
            description: "test".to_string(),
            beneficiary_account: "x".to_string(),
            beneficiary_name: "x".to_string(),
            beneficiary_bank: "x".to_string(),
        }
    }

    #[tokio::test]
    async fn test_duplicate_wallet_is_conflict() {
        let store = MemoryStore::new();
        store
            .insert_wallet(new_wallet(1, Currency::Ngn, "0000000001"))
            .await
            .expect("first insert");
        let err = store
            .insert_wallet(new_wallet(1, Currency::Ngn, "0000000002"))
            .await
            .expect_err("duplicate");
        assert!(matches!(err, LedgerError::Conflict(_)));

        // Same owner, other currency is fine.
        store
            .insert_wallet(new_wallet(1, Currency::Usd, "0000000003"))
            .await
            .expect("other currency");
    }

    #[tokio::test]
    async fn test_commit_rechecks_balance_atomically() {
        let store = MemoryStore::new();
        let a = store
            .insert_wallet(new_wallet(1, Currency::Ngn, "0000000001"))
            .await
            .expect("wallet a");
        let b = store
            .insert_wallet(new_wallet(2, Currency::Ngn, "0000000002"))
            .await
            .expect("wallet b");
        store.deposit(a.wallet_id, dec!(100)).await.expect("fund");

        // Overdraw attempt fails and leaves everything untouched.
        let err = store
            .commit_transfer(TransferCommit {
                debit_wallet: a.wallet_id,
                debit_amount: dec!(150),
                credit: Some(CreditLeg {
                    wallet: b.wallet_id,
                    amount: dec!(150),
                }),
                entries: vec![draft(&a, dec!(150), TxnType::TransferOut, "TXN1")],
            })
            .await
            .expect_err("overdraw");
        assert!(matches!(err, LedgerError::InsufficientFunds(Currency::Ngn)));

        let a_after = store
            .wallet_by_account("0000000001")
            .await
            .expect("lookup")
            .expect("exists");
        assert_eq!(a_after.balance, dec!(100));
        assert!(store
            .transactions_by_reference("TXN1")
            .await
            .expect("query")
            .is_empty());
    }

    #[tokio::test]
    async fn test_commit_applies_both_legs_and_entries() {
        let store = MemoryStore::new();
        let a = store
            .insert_wallet(new_wallet(1, Currency::Ngn, "0000000001"))
            .await
            .expect("wallet a");
        let b = store
            .insert_wallet(new_wallet(2, Currency::Ngn, "0000000002"))
            .await
            .expect("wallet b");
        store.deposit(a.wallet_id, dec!(100)).await.expect("fund");

        let balance_after = store
            .commit_transfer(TransferCommit {
                debit_wallet: a.wallet_id,
                debit_amount: dec!(40),
                credit: Some(CreditLeg {
                    wallet: b.wallet_id,
                    amount: dec!(40),
                }),
                entries: vec![
                    draft(&a, dec!(40), TxnType::TransferOut, "TXN2"),
                    draft(&b, dec!(40), TxnType::TransferIn, "TXN2"),
                ],
            })
            .await
            .expect("commit");
        assert_eq!(balance_after, dec!(60));

        let b_after = store
            .wallet_by_account("0000000002")
            .await
            .expect("lookup")
            .expect("exists");
        assert_eq!(b_after.balance, dec!(40));

        let rows = store
            .transactions_by_reference("TXN2")
            .await
            .expect("query");
        assert_eq!(rows.len(), 2);
    }
}
