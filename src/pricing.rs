// Price table: tier name -> price entry. Pure lookup, swappable via config.
use crate::classifier::tier;
use crate::model::PricingError;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;

/// Commercial data attached to a tier. Never consulted during
/// classification; promos change, eligibility rules do not.
#[derive(Debug, Clone, Deserialize)]
pub struct PriceEntry {
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub former_price: Option<f64>,
    #[serde(default)]
    pub discount: Option<String>,
    #[serde(default)]
    pub payment_note: Option<String>,
    #[serde(default)]
    pub promo_expiry: Option<NaiveDate>,
}

impl PriceEntry {
    fn fixed(current: f64) -> Self {
        Self {
            current_price: Some(current),
            former_price: None,
            discount: None,
            payment_note: None,
            promo_expiry: None,
        }
    }

    fn promo(current: f64, former: f64, discount: &str, expiry: NaiveDate) -> Self {
        Self {
            current_price: Some(current),
            former_price: Some(former),
            discount: Some(discount.to_string()),
            payment_note: Some("2x installments available".to_string()),
            promo_expiry: Some(expiry),
        }
    }

    fn quote(note: &str) -> Self {
        Self {
            current_price: None,
            former_price: None,
            discount: None,
            payment_note: Some(note.to_string()),
            promo_expiry: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct PriceTable {
    entries: HashMap<String, PriceEntry>,
}

impl PriceTable {
    /// The current commercial offer sheet.
    pub fn builtin() -> Self {
        let promo_until = NaiveDate::from_ymd_opt(2026, 9, 30).unwrap();
        let entries = HashMap::from([
            (tier::LAPTOP.to_string(), PriceEntry::quote("not supported on laptops")),
            (
                tier::SPECIAL_X3D.to_string(),
                PriceEntry::promo(95.0, 120.0, "-20%", promo_until),
            ),
            (
                tier::COMPLETE_DDR5.to_string(),
                PriceEntry::promo(195.0, 240.0, "-18%", promo_until),
            ),
            (
                tier::RAM_GPU_DDR5.to_string(),
                PriceEntry::promo(135.0, 160.0, "-15%", promo_until),
            ),
            (tier::CPU_RAM_DDR5.to_string(), PriceEntry::fixed(155.0)),
            (tier::CPU_DDR5.to_string(), PriceEntry::fixed(40.0)),
            (tier::COMPLETE_DDR4.to_string(), PriceEntry::fixed(85.0)),
            (tier::RAM_GPU_DDR4.to_string(), PriceEntry::fixed(55.0)),
            (tier::CPU_RAM_DDR4.to_string(), PriceEntry::fixed(65.0)),
            (tier::CPU_DDR4.to_string(), PriceEntry::fixed(20.0)),
            (
                tier::WINDOWS_OPTIMIZATION.to_string(),
                PriceEntry::quote("custom quote"),
            ),
        ]);
        Self { entries }
    }

    pub fn lookup(&self, tier_name: &str) -> Result<&PriceEntry, PricingError> {
        self.entries
            .get(tier_name)
            .ok_or_else(|| PricingError::MissingEntry(tier_name.to_string()))
    }

    /// A table that cannot price every producible tier is a configuration
    /// error; checked once at startup, not per classification.
    pub fn validate(&self) -> Result<(), PricingError> {
        for name in tier::ALL {
            self.lookup(name)?;
        }
        Ok(())
    }
}
