//! Bill payments: airtime, data, electricity and TV.
//!
//! All bills debit the owner's NGN wallet. A bill payment writes a
//! bill-payment row, not a ledger entry; the debit and the row go into the
//! store as one atomic commit.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::core_types::{BillType, Currency, Network, OwnerId, TvProvider, TxnStatus};
use crate::error::LedgerError;
use crate::models::NewBillPayment;
use crate::notify::Notifier;
use crate::phone;
use crate::plans::{find_data_plan, find_tv_plan};
use crate::reference::{RefPrefix, ReferenceGenerator};
use crate::store::{BillCommit, WalletStore};

#[derive(Debug, Clone)]
pub enum BillPaymentRequest {
    Airtime {
        phone_number: String,
        /// Detected from the number when absent.
        network: Option<Network>,
        amount: Decimal,
    },
    Data {
        phone_number: String,
        network: Option<Network>,
        plan_id: String,
    },
    Electricity {
        meter_number: String,
        amount: Decimal,
    },
    Tv {
        provider: TvProvider,
        plan_id: String,
    },
}

#[derive(Debug, Clone)]
pub struct BillPaymentReceipt {
    pub message: String,
    pub reference: String,
    pub amount: Decimal,
    pub details: String,
    pub balance_after: Decimal,
}

pub struct BillPaymentProcessor {
    store: Arc<dyn WalletStore>,
    refs: ReferenceGenerator,
    notifier: Arc<dyn Notifier>,
}

impl BillPaymentProcessor {
    pub fn new(store: Arc<dyn WalletStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            refs: ReferenceGenerator::new(),
            notifier,
        }
    }

    pub async fn process(
        &self,
        owner: OwnerId,
        request: BillPaymentRequest,
    ) -> Result<BillPaymentReceipt, LedgerError> {
        let wallet = self
            .store
            .wallet_by_owner(owner, Currency::Ngn)
            .await?
            .ok_or_else(|| {
                LedgerError::NotFound("no NGN wallet found, create one first".to_string())
            })?;

        let (row, message) = match request {
            BillPaymentRequest::Airtime {
                phone_number,
                network,
                amount,
            } => {
                if amount <= Decimal::ZERO {
                    return Err(LedgerError::Validation(
                        "amount must be greater than zero".to_string(),
                    ));
                }
                let local = phone::normalize(&phone_number).ok_or_else(|| {
                    LedgerError::Validation("invalid Nigerian phone number".to_string())
                })?;
                let network = resolve_network(&local, network)?;
                let row = NewBillPayment {
                    owner_id: owner,
                    amount,
                    bill_type: BillType::Airtime,
                    reference: self.refs.next(RefPrefix::Airtime),
                    status: TxnStatus::Successful,
                    phone_number: Some(local.clone()),
                    network: Some(network.as_str().to_string()),
                    plan_id: None,
                    details: format!("\u{20a6}{amount} airtime \u{2192} 0{local} ({network})"),
                };
                (row, "Airtime purchased successfully")
            }
            BillPaymentRequest::Data {
                phone_number,
                network,
                plan_id,
            } => {
                let local = phone::normalize(&phone_number).ok_or_else(|| {
                    LedgerError::Validation("invalid Nigerian phone number".to_string())
                })?;
                let network = resolve_network(&local, network)?;
                let plan = find_data_plan(network, &plan_id).ok_or_else(|| {
                    LedgerError::NotFound(format!("no {network} data plan with id {plan_id}"))
                })?;
                let row = NewBillPayment {
                    owner_id: owner,
                    amount: plan.price(),
                    bill_type: BillType::Data,
                    reference: self.refs.next(RefPrefix::Data),
                    status: TxnStatus::Successful,
                    phone_number: Some(local.clone()),
                    network: Some(network.as_str().to_string()),
                    plan_id: Some(plan.id.to_string()),
                    details: format!("{} data \u{2192} 0{local}", plan.name),
                };
                (row, "Data purchased successfully")
            }
            BillPaymentRequest::Electricity {
                meter_number,
                amount,
            } => {
                if amount <= Decimal::ZERO {
                    return Err(LedgerError::Validation(
                        "amount must be greater than zero".to_string(),
                    ));
                }
                let len = meter_number.len();
                if !(10..=15).contains(&len)
                    || !meter_number.chars().all(|c| c.is_ascii_digit())
                {
                    return Err(LedgerError::Validation(
                        "invalid meter number, must be 10-15 digits".to_string(),
                    ));
                }
                let row = NewBillPayment {
                    owner_id: owner,
                    amount,
                    bill_type: BillType::Electricity,
                    reference: self.refs.next(RefPrefix::Electricity),
                    status: TxnStatus::Successful,
                    phone_number: None,
                    network: None,
                    plan_id: Some(meter_number.clone()),
                    details: format!("\u{20a6}{amount} electricity \u{2192} meter {meter_number}"),
                };
                (row, "Electricity payment successful")
            }
            BillPaymentRequest::Tv { provider, plan_id } => {
                let plan = find_tv_plan(provider, &plan_id).ok_or_else(|| {
                    LedgerError::NotFound(format!("no {provider} plan with id {plan_id}"))
                })?;
                let row = NewBillPayment {
                    owner_id: owner,
                    amount: plan.price(),
                    bill_type: BillType::Tv,
                    reference: self.refs.next(RefPrefix::Tv),
                    status: TxnStatus::Successful,
                    phone_number: None,
                    network: Some(provider.as_str().to_string()),
                    plan_id: Some(plan.id.to_string()),
                    details: format!("{} subscription", plan.name),
                };
                (row, "TV subscription successful")
            }
        };

        let reference = row.reference.clone();
        let amount = row.amount;
        let details = row.details.clone();
        let bill_type = row.bill_type;
        let balance_after = self
            .store
            .commit_bill_payment(BillCommit {
                debit_wallet: wallet.wallet_id,
                debit_amount: amount,
                row,
            })
            .await?;

        info!(
            owner,
            reference = %reference,
            bill_type = %bill_type,
            amount = %amount,
            "bill payment committed"
        );
        self.notify(owner, &reference, bill_type.as_str());

        Ok(BillPaymentReceipt {
            message: message.to_string(),
            reference,
            amount,
            details,
            balance_after,
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

fn resolve_network(local: &str, requested: Option<Network>) -> Result<Network, LedgerError> {
    if let Some(network) = requested {
        return Ok(network);
    }
    phone::detect_network(local).ok_or_else(|| {
        LedgerError::Validation(
            "cannot detect network, specify one of MTN, AIRTEL, GLO, 9MOBILE".to_string(),
        )
    })
}
