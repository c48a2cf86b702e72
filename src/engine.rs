//! Transfer engine: internal, cross-currency and external transfers.
//!
//! Every operation runs its guards in a fixed order (amount, source wallet,
//! self-transfer, PIN, balance, destination, currency), builds a commit plan
//! and hands it to the store. The store re-checks the balance under its own
//! lock, so a concurrent debit between the guard and the commit fails the
//! commit instead of overdrawing.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::bank::{BankDirectory, OWN_BANK_CODE, OWN_BANK_NAME};
use crate::core_types::{Currency, OwnerId, TxnStatus, TxnType};
use crate::enquiry::{ExternalEnquiry, NameResolver};
use crate::error::LedgerError;
use crate::models::{LedgerDraft, Wallet};
use crate::notify::Notifier;
use crate::rates::RateService;
use crate::reference::{RefPrefix, ReferenceGenerator};
use crate::store::{CreditLeg, TransferCommit, WalletStore};

/// Same-currency transfer between two of our own wallets.
#[derive(Debug, Clone)]
pub struct InternalTransfer {
    pub currency: Currency,
    pub to_account_number: String,
    pub amount: Decimal,
    pub pin: String,
    /// Overrides the generated descriptions on both legs when present.
    pub description: Option<String>,
}

/// Transfer between wallets of different currencies, converted at the
/// current rate.
#[derive(Debug, Clone)]
pub struct CrossCurrencyTransfer {
    pub currency: Currency,
    pub to_account_number: String,
    pub amount: Decimal,
    pub pin: String,
}

/// Transfer to an account at another bank. Debit-only on our books.
#[derive(Debug, Clone)]
pub struct ExternalTransfer {
    pub currency: Currency,
    pub account_number: String,
    /// Caller-supplied beneficiary name, recorded on the ledger row once the
    /// name enquiry passes.
    pub account_name: String,
    pub bank_code: String,
    pub amount: Decimal,
    pub pin: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TransferReceipt {
    pub reference: String,
    pub from_account: String,
    pub to_account: String,
    pub beneficiary_name: String,
    pub beneficiary_bank: String,
    pub amount: Decimal,
    /// Credited amount in the destination currency, set only for
    /// cross-currency transfers.
    pub converted_amount: Option<Decimal>,
    pub balance_after: Decimal,
}

pub struct TransferEngine {
    store: Arc<dyn WalletStore>,
    resolver: NameResolver,
    rates: Arc<RateService>,
    directory: BankDirectory,
    enquiry: Arc<dyn ExternalEnquiry>,
    refs: ReferenceGenerator,
    notifier: Arc<dyn Notifier>,
}

impl TransferEngine {
    pub fn new(
        store: Arc<dyn WalletStore>,
        rates: Arc<RateService>,
        enquiry: Arc<dyn ExternalEnquiry>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            resolver: NameResolver::new(store.clone()),
            store,
            rates,
            directory: BankDirectory::new(),
            enquiry,
            refs: ReferenceGenerator::new(),
            notifier,
        }
    }

    pub async fn internal_transfer(
        &self,
        owner: OwnerId,
        req: InternalTransfer,
    ) -> Result<TransferReceipt, LedgerError> {
        validate_amount(req.amount)?;
        let source = self.source_wallet(owner, req.currency).await?;
        if source.account_number == req.to_account_number {
            return Err(LedgerError::Conflict(
                "you cannot transfer to your own account".to_string(),
            ));
        }
        check_pin(&req.pin, &source)?;
        check_balance(&source, req.amount)?;

        self.resolver.resolve_internal(&req.to_account_number).await?;
        let dest = self
            .store
            .wallet_by_account(&req.to_account_number)
            .await?
            .ok_or_else(|| LedgerError::NotFound("recipient wallet not found".to_string()))?;
        if dest.currency != source.currency {
            return Err(LedgerError::Conflict(
                "use cross-currency transfer for different currencies".to_string(),
            ));
        }

        let reference = self.refs.next(RefPrefix::Transfer);
        let caller_desc = req.description.as_deref().map(str::trim).filter(|d| !d.is_empty());
        let out_desc = caller_desc
            .map(str::to_string)
            .unwrap_or_else(|| format!("Transfer to {}", dest.account_name));
        let in_desc = caller_desc
            .map(str::to_string)
            .unwrap_or_else(|| format!("From {}", source.account_name));

        let commit = TransferCommit {
            debit_wallet: source.wallet_id,
            debit_amount: req.amount,
            credit: Some(CreditLeg {
                wallet: dest.wallet_id,
                amount: req.amount,
            }),
            entries: vec![
                LedgerDraft {
                    owner_id: source.owner_id,
                    wallet_id: source.wallet_id,
                    amount: req.amount,
                    txn_type: TxnType::TransferOut,
                    reference: reference.clone(),
                    status: TxnStatus::Successful,
                    description: out_desc,
                    beneficiary_account: dest.account_number.clone(),
                    beneficiary_name: dest.account_name.clone(),
                    beneficiary_bank: OWN_BANK_NAME.to_string(),
                },
                // The IN leg's counterparty is the sender, so the receiver's
                // statement names who paid them.
                LedgerDraft {
                    owner_id: dest.owner_id,
                    wallet_id: dest.wallet_id,
                    amount: req.amount,
                    txn_type: TxnType::TransferIn,
                    reference: reference.clone(),
                    status: TxnStatus::Successful,
                    description: in_desc,
                    beneficiary_account: source.account_number.clone(),
                    beneficiary_name: source.account_name.clone(),
                    beneficiary_bank: OWN_BANK_NAME.to_string(),
                },
            ],
        };
        let balance_after = self.store.commit_transfer(commit).await?;

        info!(
            owner,
            reference = %reference,
            amount = %req.amount,
            currency = %req.currency,
            to = %dest.account_number,
            "internal transfer committed"
        );
        self.notify(owner, &reference, "internal transfer");

        Ok(TransferReceipt {
            reference,
            from_account: source.account_number,
            to_account: dest.account_number,
            beneficiary_name: dest.account_name,
            beneficiary_bank: OWN_BANK_NAME.to_string(),
            amount: req.amount,
            converted_amount: None,
            balance_after,
        })
    }

    pub async fn cross_currency_transfer(
        &self,
        owner: OwnerId,
        req: CrossCurrencyTransfer,
    ) -> Result<TransferReceipt, LedgerError> {
        validate_amount(req.amount)?;
        let source = self.source_wallet(owner, req.currency).await?;
        if source.account_number == req.to_account_number {
            return Err(LedgerError::Conflict(
                "you cannot transfer to your own account".to_string(),
            ));
        }
        check_pin(&req.pin, &source)?;
        check_balance(&source, req.amount)?;

        self.resolver.resolve_internal(&req.to_account_number).await?;
        let dest = self
            .store
            .wallet_by_account(&req.to_account_number)
            .await?
            .ok_or_else(|| LedgerError::NotFound("recipient wallet not found".to_string()))?;
        if dest.currency == source.currency {
            return Err(LedgerError::Conflict(
                "use internal transfer for same currency".to_string(),
            ));
        }

        // One snapshot per operation; both legs price at the same epoch.
        let snapshot = self.rates.current().await?;
        let converted = snapshot.convert(req.amount, source.currency, dest.currency)?;

        let reference = self.refs.next(RefPrefix::Fx);
        let commit = TransferCommit {
            debit_wallet: source.wallet_id,
            debit_amount: req.amount,
            credit: Some(CreditLeg {
                wallet: dest.wallet_id,
                amount: converted,
            }),
            entries: vec![
                LedgerDraft {
                    owner_id: source.owner_id,
                    wallet_id: source.wallet_id,
                    amount: req.amount,
                    txn_type: TxnType::CurrencyExchangeOut,
                    reference: reference.clone(),
                    status: TxnStatus::Successful,
                    description: format!("FX Transfer to {}", dest.account_name),
                    beneficiary_account: dest.account_number.clone(),
                    beneficiary_name: dest.account_name.clone(),
                    beneficiary_bank: OWN_BANK_NAME.to_string(),
                },
                LedgerDraft {
                    owner_id: dest.owner_id,
                    wallet_id: dest.wallet_id,
                    amount: converted,
                    txn_type: TxnType::CurrencyExchangeIn,
                    reference: reference.clone(),
                    status: TxnStatus::Successful,
                    description: format!("FX Received from {}", source.account_name),
                    beneficiary_account: source.account_number.clone(),
                    beneficiary_name: source.account_name.clone(),
                    beneficiary_bank: OWN_BANK_NAME.to_string(),
                },
            ],
        };
        let balance_after = self.store.commit_transfer(commit).await?;

        info!(
            owner,
            reference = %reference,
            amount = %req.amount,
            from_currency = %source.currency,
            converted = %converted,
            to_currency = %dest.currency,
            rate_version = snapshot.version,
            "cross-currency transfer committed"
        );
        self.notify(owner, &reference, "cross-currency transfer");

        Ok(TransferReceipt {
            reference,
            from_account: source.account_number,
            to_account: dest.account_number,
            beneficiary_name: dest.account_name,
            beneficiary_bank: OWN_BANK_NAME.to_string(),
            amount: req.amount,
            converted_amount: Some(converted),
            balance_after,
        })
    }

    pub async fn external_transfer(
        &self,
        owner: OwnerId,
        req: ExternalTransfer,
    ) -> Result<TransferReceipt, LedgerError> {
        validate_amount(req.amount)?;
        let source = self.source_wallet(owner, req.currency).await?;
        check_pin(&req.pin, &source)?;
        check_balance(&source, req.amount)?;

        // A destination at our own bank settles internally regardless of
        // which entry point the caller used.
        if req.bank_code == OWN_BANK_CODE {
            return self
                .internal_transfer(
                    owner,
                    InternalTransfer {
                        currency: req.currency,
                        to_account_number: req.account_number,
                        amount: req.amount,
                        pin: req.pin,
                        description: req.description,
                    },
                )
                .await;
        }

        let bank_name = self
            .directory
            .resolve_bank_name(&req.bank_code)
            .ok_or_else(|| {
                LedgerError::NotFound(format!("bank not supported: {}", req.bank_code))
            })?;

        let enquiry = self
            .enquiry
            .verify(&req.account_number, &req.bank_code)
            .await?;
        if !enquiry.success {
            return Err(LedgerError::ExternalService(format!(
                "name enquiry failed: {}",
                enquiry.message
            )));
        }

        // The row carries the caller-supplied beneficiary name; the enquiry
        // only gates whether the transfer goes ahead.
        let reference = self.refs.next(RefPrefix::External);
        let description = req
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Transfer to {}", req.account_name));

        let commit = TransferCommit {
            debit_wallet: source.wallet_id,
            debit_amount: req.amount,
            credit: None,
            entries: vec![LedgerDraft {
                owner_id: source.owner_id,
                wallet_id: source.wallet_id,
                amount: req.amount,
                txn_type: TxnType::TransferOut,
                reference: reference.clone(),
                status: TxnStatus::Successful,
                description,
                beneficiary_account: req.account_number.clone(),
                beneficiary_name: req.account_name.clone(),
                beneficiary_bank: bank_name.to_string(),
            }],
        };
        let balance_after = self.store.commit_transfer(commit).await?;

        info!(
            owner,
            reference = %reference,
            amount = %req.amount,
            bank_code = %req.bank_code,
            to = %req.account_number,
            "external transfer committed"
        );
        self.notify(owner, &reference, "external transfer");

        Ok(TransferReceipt {
            reference,
            from_account: source.account_number,
            to_account: req.account_number,
            beneficiary_name: req.account_name,
            beneficiary_bank: bank_name.to_string(),
            amount: req.amount,
            converted_amount: None,
            balance_after,
        })
    }

    async fn source_wallet(&self, owner: OwnerId, currency: Currency) -> Result<Wallet, LedgerError> {
        self.store
            .wallet_by_owner(owner, currency)
            .await?
            .ok_or_else(|| {
                LedgerError::NotFound(format!("no {currency} wallet found, create one first"))
            })
    }

    fn notify(&self, owner: OwnerId, reference: &str, summary: &str) {
        let notifier = self.notifier.clone();
        let reference = reference.to_string();
        let summary = summary.to_string();
        tokio::spawn(async move {
            notifier
                .operation_recorded(owner, &reference, &summary)
                .await;
        });
    }
}

fn validate_amount(amount: Decimal) -> Result<(), LedgerError> {
    if amount <= Decimal::ZERO {
        return Err(LedgerError::Validation(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn check_pin(pin: &str, wallet: &Wallet) -> Result<(), LedgerError> {
    if !crate::pin::PinGuard::verify(pin, &wallet.pin_hash) {
        return Err(LedgerError::Authorization);
    }
    Ok(())
}

fn check_balance(wallet: &Wallet, amount: Decimal) -> Result<(), LedgerError> {
    if wallet.balance < amount {
        return Err(LedgerError::InsufficientFunds(wallet.currency));
    }
    Ok(())
}
