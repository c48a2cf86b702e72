//! Core types used throughout the system
//!
//! Identifier aliases plus the closed enums for currencies, ledger entry
//! kinds, bill families and telco/TV providers. Everything the original
//! system kept as free-form strings lives here as a variant instead, so an
//! unsupported value is unrepresentable past the API boundary.

use std::fmt;

/// Owner ID - the authenticated account holder. Assigned by the (external)
/// identity service; this core only ever receives it, never mints it.
pub type OwnerId = i64;

/// Wallet ID - primary key of a wallet row.
pub type WalletId = i64;

/// Ledger entry ID.
pub type TxnId = i64;

/// Bill payment row ID.
pub type BillPaymentId = i64;

/// Wallet currency. One wallet per (owner, currency) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Ngn,
    Usd,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Ngn => "NGN",
            Currency::Usd => "USD",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NGN" => Some(Currency::Ngn),
            "USD" => Some(Currency::Usd),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ledger entry kind. Two-sided transfers always write one OUT and one IN
/// entry sharing a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnType {
    TransferOut,
    TransferIn,
    CurrencyExchangeOut,
    CurrencyExchangeIn,
}

impl TxnType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnType::TransferOut => "TRANSFER_OUT",
            TxnType::TransferIn => "TRANSFER_IN",
            TxnType::CurrencyExchangeOut => "CURRENCY_EXCHANGE_OUT",
            TxnType::CurrencyExchangeIn => "CURRENCY_EXCHANGE_IN",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "TRANSFER_OUT" => Some(TxnType::TransferOut),
            "TRANSFER_IN" => Some(TxnType::TransferIn),
            "CURRENCY_EXCHANGE_OUT" => Some(TxnType::CurrencyExchangeOut),
            "CURRENCY_EXCHANGE_IN" => Some(TxnType::CurrencyExchangeIn),
            _ => None,
        }
    }

    pub fn is_outgoing(&self) -> bool {
        matches!(self, TxnType::TransferOut | TxnType::CurrencyExchangeOut)
    }
}

impl fmt::Display for TxnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a ledger entry or bill payment row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxnStatus {
    Successful,
    Pending,
    Failed,
}

impl TxnStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TxnStatus::Successful => "SUCCESSFUL",
            TxnStatus::Pending => "PENDING",
            TxnStatus::Failed => "FAILED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SUCCESSFUL" => Some(TxnStatus::Successful),
            "PENDING" => Some(TxnStatus::Pending),
            "FAILED" => Some(TxnStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for TxnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bill payment family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillType {
    Airtime,
    Data,
    Electricity,
    Tv,
}

impl BillType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillType::Airtime => "AIRTIME",
            BillType::Data => "DATA",
            BillType::Electricity => "ELECTRICITY",
            BillType::Tv => "TV",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AIRTIME" => Some(BillType::Airtime),
            "DATA" => Some(BillType::Data),
            "ELECTRICITY" => Some(BillType::Electricity),
            "TV" => Some(BillType::Tv),
            _ => None,
        }
    }
}

impl fmt::Display for BillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nigerian mobile network operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Mtn,
    Airtel,
    Glo,
    NineMobile,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mtn => "MTN",
            Network::Airtel => "AIRTEL",
            Network::Glo => "GLO",
            Network::NineMobile => "9MOBILE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "MTN" => Some(Network::Mtn),
            "AIRTEL" => Some(Network::Airtel),
            "GLO" => Some(Network::Glo),
            "9MOBILE" => Some(Network::NineMobile),
            _ => None,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// TV subscription provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TvProvider {
    Dstv,
    Gotv,
    Startimes,
}

impl TvProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            TvProvider::Dstv => "DSTV",
            TvProvider::Gotv => "GOTV",
            TvProvider::Startimes => "STARTIMES",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "DSTV" => Some(TvProvider::Dstv),
            "GOTV" => Some(TvProvider::Gotv),
            "STARTIMES" => Some(TvProvider::Startimes),
            _ => None,
        }
    }
}

impl fmt::Display for TvProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
