use std::sync::Arc;

use rust_decimal_macros::dec;
use tracing::info;

use miles_ledger::billpay::{BillPaymentProcessor, BillPaymentRequest};
use miles_ledger::config::AppConfig;
use miles_ledger::core_types::Currency;
use miles_ledger::engine::{InternalTransfer, TransferEngine};
use miles_ledger::enquiry::PaystackEnquiry;
use miles_ledger::logging::init_logging;
use miles_ledger::notify::LogNotifier;
use miles_ledger::rates::RateService;
use miles_ledger::store::MemoryStore;
use miles_ledger::wallets::WalletService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env = std::env::var("APP_ENV").unwrap_or_else(|_| "dev".to_string());
    let config = AppConfig::load(&env);
    let _guard = init_logging(&config);
    info!(env, "miles-ledger starting");

    let store = Arc::new(MemoryStore::new());
    let rates = Arc::new(RateService::new(store.clone()));
    let enquiry = Arc::new(PaystackEnquiry::new(&config.paystack)?);
    let notifier = Arc::new(LogNotifier);

    let wallets = WalletService::new(store.clone());
    let engine = TransferEngine::new(store.clone(), rates.clone(), enquiry, notifier.clone());
    let bills = BillPaymentProcessor::new(store.clone(), notifier);

    // Walkthrough: two wallets, one funded, a transfer and an airtime top-up.
    let alice = wallets
        .create_wallet(1, "Alice Adeyemi", Currency::Ngn, "1234")
        .await?;
    let bob = wallets
        .create_wallet(2, "Bob Okafor", Currency::Ngn, "5678")
        .await?;
    store.deposit(alice.wallet_id, dec!(10000)).await?;

    let receipt = engine
        .internal_transfer(
            1,
            InternalTransfer {
                currency: Currency::Ngn,
                to_account_number: bob.account_number.clone(),
                amount: dec!(2000),
                pin: "1234".to_string(),
                description: None,
            },
        )
        .await?;
    info!(
        reference = %receipt.reference,
        balance_after = %receipt.balance_after,
        "transfer complete"
    );

    let bill = bills
        .process(
            1,
            BillPaymentRequest::Airtime {
                phone_number: "08031234567".to_string(),
                network: None,
                amount: dec!(500),
            },
        )
        .await?;
    info!(
        reference = %bill.reference,
        details = %bill.details,
        balance_after = %bill.balance_after,
        "bill payment complete"
    );

    let snapshot = rates.current().await?;
    info!(ngn_to_usd = %snapshot.ngn_to_usd, version = snapshot.version, "rates loaded");

    Ok(())
}
