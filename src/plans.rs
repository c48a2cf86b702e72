//! Static data/TV plan catalogs.
//!
//! Keyed by the closed `Network` / `TvProvider` enums, so a lookup can only
//! fail on an unknown plan id, never on an unknown provider. Prices are
//! whole-naira amounts validated at compile time.

use rust_decimal::Decimal;

use crate::core_types::{Network, TvProvider};

#[derive(Debug, Clone, Copy)]
pub struct DataPlan {
    pub id: &'static str,
    pub name: &'static str,
    price_naira: i64,
    pub validity_days: u32,
}

impl DataPlan {
    const fn new(id: &'static str, name: &'static str, price_naira: i64, validity_days: u32) -> Self {
        Self {
            id,
            name,
            price_naira,
            validity_days,
        }
    }

    pub fn price(&self) -> Decimal {
        Decimal::from(self.price_naira)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct TvPlan {
    pub id: &'static str,
    pub name: &'static str,
    price_naira: i64,
}

impl TvPlan {
    const fn new(id: &'static str, name: &'static str, price_naira: i64) -> Self {
        Self {
            id,
            name,
            price_naira,
        }
    }

    pub fn price(&self) -> Decimal {
        Decimal::from(self.price_naira)
    }
}

const MTN_DATA: &[DataPlan] = &[
    DataPlan::new("1", "100MB", 100, 1),
    DataPlan::new("2", "350MB", 200, 7),
    DataPlan::new("3", "1GB", 500, 30),
    DataPlan::new("4", "2GB", 1000, 30),
    DataPlan::new("5", "3GB", 1500, 30),
    DataPlan::new("6", "5GB", 2500, 30),
    DataPlan::new("7", "10GB", 5000, 30),
];

const GLO_DATA: &[DataPlan] = &[
    DataPlan::new("1", "100MB", 100, 1),
    DataPlan::new("2", "350MB", 200, 7),
    DataPlan::new("3", "1.5GB", 500, 30),
    DataPlan::new("4", "3GB", 1000, 30),
    DataPlan::new("5", "5GB", 2000, 30),
    DataPlan::new("6", "7GB", 2500, 30),
    DataPlan::new("7", "10GB", 3000, 30),
];

const AIRTEL_DATA: &[DataPlan] = &[
    DataPlan::new("1", "100MB", 100, 1),
    DataPlan::new("2", "300MB", 200, 7),
    DataPlan::new("3", "1GB", 500, 30),
    DataPlan::new("4", "2GB", 1000, 30),
    DataPlan::new("5", "3GB", 1500, 30),
    DataPlan::new("6", "5GB", 2000, 30),
    DataPlan::new("7", "10GB", 4000, 30),
];

const NINEMOBILE_DATA: &[DataPlan] = &[
    DataPlan::new("1", "100MB", 100, 1),
    DataPlan::new("2", "400MB", 200, 7),
    DataPlan::new("3", "1.5GB", 500, 30),
    DataPlan::new("4", "2GB", 1000, 30),
    DataPlan::new("5", "3GB", 1200, 30),
    DataPlan::new("6", "4GB", 1500, 30),
    DataPlan::new("7", "11GB", 4000, 30),
];

const DSTV_PLANS: &[TvPlan] = &[
    TvPlan::new("1", "DStv Premium", 21000),
    TvPlan::new("2", "DStv Compact Plus", 12500),
    TvPlan::new("3", "DStv Compact", 8100),
    TvPlan::new("4", "DStv Confam", 5300),
    TvPlan::new("5", "DStv Yanga", 2500),
    TvPlan::new("6", "DStv Padi", 1900),
];

const GOTV_PLANS: &[TvPlan] = &[
    TvPlan::new("1", "GOtv Max", 3700),
    TvPlan::new("2", "GOtv Jolli", 2600),
    TvPlan::new("3", "GOtv Jinja", 1800),
    TvPlan::new("4", "GOtv Smallie", 900),
    TvPlan::new("5", "GOtv Supa", 5400),
];

const STARTIMES_PLANS: &[TvPlan] = &[
    TvPlan::new("1", "Nova", 1300),
    TvPlan::new("2", "Basic", 2300),
    TvPlan::new("3", "Smart", 3300),
    TvPlan::new("4", "Classic", 4300),
    TvPlan::new("5", "Super", 6300),
];

pub fn data_plans(network: Network) -> &'static [DataPlan] {
    match network {
        Network::Mtn => MTN_DATA,
        Network::Glo => GLO_DATA,
        Network::Airtel => AIRTEL_DATA,
        Network::NineMobile => NINEMOBILE_DATA,
    }
}

pub fn tv_plans(provider: TvProvider) -> &'static [TvPlan] {
    match provider {
        TvProvider::Dstv => DSTV_PLANS,
        TvProvider::Gotv => GOTV_PLANS,
        TvProvider::Startimes => STARTIMES_PLANS,
    }
}

pub fn find_data_plan(network: Network, plan_id: &str) -> Option<&'static DataPlan> {
    data_plans(network).iter().find(|p| p.id == plan_id)
}

pub fn find_tv_plan(provider: TvProvider, plan_id: &str) -> Option<&'static TvPlan> {
    tv_plans(provider).iter().find(|p| p.id == plan_id)
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_data_plan_lookup() {
        let plan = find_data_plan(Network::Mtn, "3").expect("plan exists");
        assert_eq!(plan.name, "1GB");
        assert_eq!(plan.price(), dec!(500));
        assert_eq!(plan.validity_days, 30);
        assert!(find_data_plan(Network::Mtn, "99").is_none());
    }

    #[test]
    fn test_tv_plan_lookup() {
        let plan = find_tv_plan(TvProvider::Gotv, "4").expect("plan exists");
        assert_eq!(plan.name, "GOtv Smallie");
        assert_eq!(plan.price(), dec!(900));
        assert!(find_tv_plan(TvProvider::Startimes, "0").is_none());
    }

    #[test]
    fn test_plan_ids_unique_per_catalog() {
        for network in [Network::Mtn, Network::Glo, Network::Airtel, Network::NineMobile] {
            let plans = data_plans(network);
            for (i, a) in plans.iter().enumerate() {
                for b in &plans[i + 1..] {
                    assert_ne!(a.id, b.id, "duplicate data plan id for {network}");
                }
            }
        }
    }
}
