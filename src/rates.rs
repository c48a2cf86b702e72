//! Exchange-rate snapshot provider.
//!
//! Exactly one logical snapshot exists at any time. It is seeded with
//! defaults on first read and overwritten in place on update; the version
//! counter increases monotonically so two rate epochs are always
//! distinguishable. Conversions read the snapshot once per operation and
//! carry it through as a parameter, never re-reading mid-operation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core_types::Currency;
use crate::error::LedgerError;
use crate::store::RateStore;

#[derive(Debug, Clone, Serialize)]
pub struct RateSnapshot {
    /// Naira per dollar.
    pub ngn_to_usd: Decimal,
    // Auxiliary asset rates, naira per unit.
    pub btc_to_ngn: Decimal,
    pub eth_to_ngn: Decimal,
    pub usdt_to_ngn: Decimal,
    pub bnb_to_ngn: Decimal,
    pub sol_to_ngn: Decimal,
    pub doge_to_ngn: Decimal,
    pub xrp_to_ngn: Decimal,
    /// Bumped on every update.
    pub version: u64,
    pub updated_at: DateTime<Utc>,
}

impl RateSnapshot {
    /// Default-valued snapshot, persisted lazily on first read.
    pub fn seed() -> Self {
        Self {
            ngn_to_usd: dec!(1650),
            btc_to_ngn: dec!(110000000),
            eth_to_ngn: dec!(5500000),
            usdt_to_ngn: dec!(1650),
            bnb_to_ngn: dec!(950000),
            sol_to_ngn: dec!(250000),
            doge_to_ngn: dec!(220),
            xrp_to_ngn: dec!(900),
            version: 1,
            updated_at: Utc::now(),
        }
    }

    /// Converts between the two wallet currencies: NGN to USD divides by the
    /// NGN/USD rate, USD to NGN multiplies. Destination amounts are rounded
    /// to 2 decimal places.
    pub fn convert(
        &self,
        amount: Decimal,
        from: Currency,
        to: Currency,
    ) -> Result<Decimal, LedgerError> {
        match (from, to) {
            (Currency::Ngn, Currency::Usd) => {
                if self.ngn_to_usd <= Decimal::ZERO {
                    return Err(LedgerError::Internal(
                        "NGN/USD rate is not positive".to_string(),
                    ));
                }
                Ok((amount / self.ngn_to_usd).round_dp(2))
            }
            (Currency::Usd, Currency::Ngn) => Ok((amount * self.ngn_to_usd).round_dp(2)),
            _ => Err(LedgerError::Internal(format!(
                "no conversion path {from} -> {to}"
            ))),
        }
    }
}

/// Partial rate update. Absent fields keep their current values; payload
/// keys that match nothing here are dropped during deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RateUpdate {
    pub ngn_usd: Option<Decimal>,
    pub btc: Option<Decimal>,
    pub eth: Option<Decimal>,
    pub usdt: Option<Decimal>,
    pub bnb: Option<Decimal>,
    pub sol: Option<Decimal>,
    pub doge: Option<Decimal>,
    pub xrp: Option<Decimal>,
}

pub struct RateService {
    store: Arc<dyn RateStore>,
}

impl RateService {
    pub fn new(store: Arc<dyn RateStore>) -> Self {
        Self { store }
    }

    /// Current snapshot; seeds and persists the defaults if none exists yet.
    pub async fn current(&self) -> Result<RateSnapshot, LedgerError> {
        if let Some(snapshot) = self.store.load().await? {
            return Ok(snapshot);
        }
        let seeded = RateSnapshot::seed();
        self.store.save(&seeded).await?;
        info!(version = seeded.version, "seeded default exchange rates");
        Ok(seeded)
    }

    /// Merges the recognized fields into the current snapshot and stamps it.
    pub async fn update(&self, patch: RateUpdate) -> Result<RateSnapshot, LedgerError> {
        let mut snapshot = self.current().await?;
        if let Some(v) = patch.ngn_usd {
            snapshot.ngn_to_usd = v;
        }
        if let Some(v) = patch.btc {
            snapshot.btc_to_ngn = v;
        }
        if let Some(v) = patch.eth {
            snapshot.eth_to_ngn = v;
        }
        if let Some(v) = patch.usdt {
            snapshot.usdt_to_ngn = v;
        }
        if let Some(v) = patch.bnb {
            snapshot.bnb_to_ngn = v;
        }
        if let Some(v) = patch.sol {
            snapshot.sol_to_ngn = v;
        }
        if let Some(v) = patch.doge {
            snapshot.doge_to_ngn = v;
        }
        if let Some(v) = patch.xrp {
            snapshot.xrp_to_ngn = v;
        }
        snapshot.version += 1;
        snapshot.updated_at = Utc::now();
        self.store.save(&snapshot).await?;
        info!(
            version = snapshot.version,
            ngn_to_usd = %snapshot.ngn_to_usd,
            "exchange rates updated"
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn test_seeds_defaults_on_first_read() {
        let service = RateService::new(Arc::new(MemoryStore::new()));
        let snapshot = service.current().await.expect("current");
        assert_eq!(snapshot.ngn_to_usd, dec!(1650));
        assert_eq!(snapshot.version, 1);

        // Second read comes from the store, same epoch.
        let again = service.current().await.expect("current");
        assert_eq!(again.version, 1);
    }

    #[tokio::test]
    async fn test_partial_update_bumps_version() {
        let service = RateService::new(Arc::new(MemoryStore::new()));
        let before = service.current().await.expect("current");

        let after = service
            .update(RateUpdate {
                ngn_usd: Some(dec!(1700)),
                ..RateUpdate::default()
            })
            .await
            .expect("update");

        assert_eq!(after.ngn_to_usd, dec!(1700));
        assert_eq!(after.version, before.version + 1);
        // Untouched fields keep their values.
        assert_eq!(after.btc_to_ngn, before.btc_to_ngn);
    }

    #[tokio::test]
    async fn test_unknown_payload_keys_are_ignored() {
        let patch: RateUpdate =
            serde_json::from_str(r#"{"ngn_usd": 1600, "pebblecoin": 42}"#).expect("deserialize");
        assert_eq!(patch.ngn_usd, Some(dec!(1600)));
    }

    #[test]
    fn test_convert_both_directions() {
        let snapshot = RateSnapshot::seed();
        assert_eq!(
            snapshot
                .convert(dec!(3300), Currency::Ngn, Currency::Usd)
                .expect("convert"),
            dec!(2.00)
        );
        assert_eq!(
            snapshot
                .convert(dec!(2), Currency::Usd, Currency::Ngn)
                .expect("convert"),
            dec!(3300)
        );
        assert!(snapshot
            .convert(dec!(1), Currency::Ngn, Currency::Ngn)
            .is_err());
    }
}
