//! Miles Bank wallet ledger and transfer engine.
//!
//! Double-entry wallet ledger with internal, cross-currency and
//! external-bank transfers plus bill payments, backed by either an
//! in-memory store or PostgreSQL.

pub mod bank;
pub mod billpay;
pub mod config;
pub mod core_types;
pub mod engine;
pub mod enquiry;
pub mod error;
pub mod logging;
pub mod models;
pub mod notify;
pub mod phone;
pub mod pin;
pub mod plans;
pub mod rates;
pub mod reference;
pub mod store;
pub mod wallets;

pub use engine::{CrossCurrencyTransfer, ExternalTransfer, InternalTransfer, TransferEngine};
pub use error::LedgerError;
pub use store::{MemoryStore, PgStore};
pub use wallets::WalletService;
