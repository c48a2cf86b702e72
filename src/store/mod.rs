//! Storage traits and atomic commit plans.
//!
//! The engine never mutates balances directly. Each operation builds a
//! commit plan (debit leg, optional credit leg, ledger appends) and hands it
//! to the store, which applies the whole plan in one atomic unit of work and
//! re-checks the source balance under its own concurrency control, so a
//! stale pre-read can never overdraw a wallet.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::core_types::{Currency, OwnerId, WalletId};
use crate::error::LedgerError;
use crate::models::{BillPayment, LedgerDraft, NewBillPayment, NewWallet, Transaction, Wallet};
use crate::rates::RateSnapshot;

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Balance-changing plan for one transfer.
#[derive(Debug, Clone)]
pub struct TransferCommit {
    pub debit_wallet: WalletId,
    pub debit_amount: Decimal,
    /// None for external (one-sided) transfers: the credit happens on a rail
    /// outside this system.
    pub credit: Option<CreditLeg>,
    pub entries: Vec<LedgerDraft>,
}

/// Credit side of a transfer. The amount may differ from the debit amount
/// when the legs are in different currencies.
#[derive(Debug, Clone)]
pub struct CreditLeg {
    pub wallet: WalletId,
    pub amount: Decimal,
}

/// Debit plus bill-payment row, applied atomically.
#[derive(Debug, Clone)]
pub struct BillCommit {
    pub debit_wallet: WalletId,
    pub debit_amount: Decimal,
    pub row: NewBillPayment,
}

#[async_trait]
pub trait WalletStore: Send + Sync {
    async fn wallet_by_owner(
        &self,
        owner: OwnerId,
        currency: Currency,
    ) -> Result<Option<Wallet>, LedgerError>;

    async fn wallet_by_account(&self, account_number: &str) -> Result<Option<Wallet>, LedgerError>;

    async fn account_number_taken(&self, account_number: &str) -> Result<bool, LedgerError>;

    /// Fails with Conflict if a wallet already exists for (owner, currency).
    async fn insert_wallet(&self, wallet: NewWallet) -> Result<Wallet, LedgerError>;

    async fn update_pin(&self, wallet: WalletId, pin_hash: String) -> Result<(), LedgerError>;

    /// Applies the debit, the optional credit and every ledger append in one
    /// atomic unit. Returns the source balance after the debit.
    async fn commit_transfer(&self, commit: TransferCommit) -> Result<Decimal, LedgerError>;

    /// Atomic debit plus bill-payment row. Returns the balance after the
    /// debit.
    async fn commit_bill_payment(&self, commit: BillCommit) -> Result<Decimal, LedgerError>;
}

#[async_trait]
pub trait LedgerReader: Send + Sync {
    async fn transactions_by_reference(
        &self,
        reference: &str,
    ) -> Result<Vec<Transaction>, LedgerError>;

    async fn bill_payment_by_reference(
        &self,
        reference: &str,
    ) -> Result<Option<BillPayment>, LedgerError>;
}

#[async_trait]
pub trait RateStore: Send + Sync {
    async fn load(&self) -> Result<Option<RateSnapshot>, LedgerError>;

    async fn save(&self, snapshot: &RateSnapshot) -> Result<(), LedgerError>;
}
