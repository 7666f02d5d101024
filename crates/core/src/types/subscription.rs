//! Subscription tiers and the plans offered for them.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::price::Price;

/// A paid subscription tier.
///
/// "No subscription" is modelled as `Option::<SubscriptionTier>::None`
/// wherever a tier is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    Weekly,
    Monthly,
    Yearly,
}

impl SubscriptionTier {
    /// All tiers in display order.
    pub const ALL: [Self; 3] = [Self::Weekly, Self::Monthly, Self::Yearly];

    /// Wire name, as used in forms and the persisted snapshot.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Human-readable plan name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Weekly => "الاشتراك الأسبوعي",
            Self::Monthly => "الاشتراك الشهري",
            Self::Yearly => "الاشتراك السنوي",
        }
    }

    /// The plan offered for this tier.
    #[must_use]
    pub fn plan(self) -> Plan {
        match self {
            Self::Weekly => Plan {
                tier: self,
                price: Price::from_riyals(99),
                duration: "أسبوع",
                features: &[
                    "إضافة حتى 50 منتج",
                    "التحليلات الأساسية",
                    "الدعم عبر البريد الإلكتروني",
                    "تخصيص محدود للمتجر",
                ],
                recommended: false,
            },
            Self::Monthly => Plan {
                tier: self,
                price: Price::from_riyals(299),
                duration: "شهر",
                features: &[
                    "إضافة حتى 200 منتج",
                    "تحليلات متقدمة",
                    "دعم فني على مدار الساعة",
                    "تخصيص كامل للمتجر",
                    "خاصية البحث المتقدم",
                ],
                recommended: true,
            },
            Self::Yearly => Plan {
                tier: self,
                price: Price::from_riyals(2999),
                duration: "سنة",
                features: &[
                    "عدد غير محدود من المنتجات",
                    "تحليلات احترافية",
                    "دعم فني أولوي",
                    "تخصيص كامل للمتجر",
                    "خاصية البحث المتقدم",
                    "دعم متعدد اللغات",
                    "تكامل مع أنظمة الدفع المتعددة",
                ],
                recommended: false,
            },
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown tier name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown subscription tier: {0}")]
pub struct UnknownTier(pub String);

impl FromStr for SubscriptionTier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(UnknownTier(other.to_owned())),
        }
    }
}

/// A subscription offer as shown on the plan selection page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub tier: SubscriptionTier,
    pub price: Price,
    /// Billing period label ("أسبوع", "شهر", "سنة").
    pub duration: &'static str,
    pub features: &'static [&'static str],
    /// Highlighted on the selection page.
    pub recommended: bool,
}

impl Plan {
    /// Plans for every tier, in display order.
    #[must_use]
    pub fn all() -> Vec<Self> {
        SubscriptionTier::ALL.into_iter().map(SubscriptionTier::plan).collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_names() {
        for tier in SubscriptionTier::ALL {
            assert_eq!(tier.as_str().parse::<SubscriptionTier>().unwrap(), tier);
        }
        assert_eq!(
            "daily".parse::<SubscriptionTier>(),
            Err(UnknownTier("daily".to_string()))
        );
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&SubscriptionTier::Monthly).unwrap(),
            "\"monthly\""
        );
        let none: Option<SubscriptionTier> = serde_json::from_str("null").unwrap();
        assert_eq!(none, None);
    }

    #[test]
    fn test_only_monthly_is_recommended() {
        let recommended: Vec<_> = Plan::all()
            .into_iter()
            .filter(|p| p.recommended)
            .map(|p| p.tier)
            .collect();
        assert_eq!(recommended, vec![SubscriptionTier::Monthly]);
    }

    #[test]
    fn test_plan_prices() {
        assert_eq!(SubscriptionTier::Weekly.plan().price, Price::from_riyals(99));
        assert_eq!(SubscriptionTier::Yearly.plan().price, Price::from_riyals(2999));
        assert_eq!(SubscriptionTier::Yearly.plan().features.len(), 7);
    }
}
