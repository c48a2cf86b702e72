//! Wallet, ledger entry and bill payment records.
//!
//! `Transaction` and `BillPayment` rows are append-only: created once at
//! operation time and never mutated afterwards.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::core_types::{
    BillPaymentId, BillType, Currency, OwnerId, TxnId, TxnStatus, TxnType, WalletId,
};

/// A per-owner, per-currency balance-holding account.
#[derive(Debug, Clone)]
pub struct Wallet {
    pub wallet_id: WalletId,
    pub owner_id: OwnerId,
    pub currency: Currency,
    /// Never negative after a committed operation.
    pub balance: Decimal,
    /// Globally unique, fixed-width numeric, immutable after creation.
    pub account_number: String,
    /// Display name, typically the owner's full name.
    pub account_name: String,
    /// One-way argon2 hash of the 4-digit transaction PIN.
    pub pin_hash: String,
    /// Issuing bank; normally the operator's own code.
    pub bank_code: String,
    pub created_at: DateTime<Utc>,
}

/// Wallet creation payload; id, zero balance and timestamp are assigned by
/// the store.
#[derive(Debug, Clone)]
pub struct NewWallet {
    pub owner_id: OwnerId,
    pub currency: Currency,
    pub account_number: String,
    pub account_name: String,
    pub pin_hash: String,
    pub bank_code: String,
}

/// Immutable ledger entry.
#[derive(Debug, Clone)]
pub struct Transaction {
    pub txn_id: TxnId,
    pub owner_id: OwnerId,
    pub wallet_id: WalletId,
    /// Positive, in the wallet's own currency.
    pub amount: Decimal,
    pub txn_type: TxnType,
    /// Shared by both legs of a two-sided transfer.
    pub reference: String,
    pub status: TxnStatus,
    pub description: String,
    pub beneficiary_account: String,
    pub beneficiary_name: String,
    pub beneficiary_bank: String,
    pub created_at: DateTime<Utc>,
}

/// A ledger entry not yet persisted; id and timestamp are assigned when the
/// commit plan is applied.
#[derive(Debug, Clone)]
pub struct LedgerDraft {
    pub owner_id: OwnerId,
    pub wallet_id: WalletId,
    pub amount: Decimal,
    pub txn_type: TxnType,
    pub reference: String,
    pub status: TxnStatus,
    pub description: String,
    pub beneficiary_account: String,
    pub beneficiary_name: String,
    pub beneficiary_bank: String,
}

/// Record of a successful bill-payment debit. Distinct record family from
/// `Transaction`: a bill payment writes no ledger entry.
#[derive(Debug, Clone)]
pub struct BillPayment {
    pub bill_id: BillPaymentId,
    pub owner_id: OwnerId,
    pub amount: Decimal,
    pub bill_type: BillType,
    pub reference: String,
    pub status: TxnStatus,
    pub phone_number: Option<String>,
    pub network: Option<String>,
    /// Plan id for DATA/TV; meter number for ELECTRICITY.
    pub plan_id: Option<String>,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

/// Bill payment row awaiting commit.
#[derive(Debug, Clone)]
pub struct NewBillPayment {
    pub owner_id: OwnerId,
    pub amount: Decimal,
    pub bill_type: BillType,
    pub reference: String,
    pub status: TxnStatus,
    pub phone_number: Option<String>,
    pub network: Option<String>,
    pub plan_id: Option<String>,
    pub details: String,
}
