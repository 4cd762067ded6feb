//! Views built from a feature-record set.
//!
//! Each view is computed independently from the same records; none of them
//! depends on another view's output.

use std::collections::HashMap;

use serde::{Serialize, Serializer};

use crate::domain::FeatureRecord;
use crate::features::month_label;

/// Largest magnitude at which every whole `f64` is exact.
const EXACT_INTEGER_LIMIT: f64 = 9_007_199_254_740_992.0;

/// Serialize a quantity so whole values go out as JSON integers (`255`, not
/// `255.0`), matching integer-typed CSV columns.
pub(crate) fn serialize_quantity<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.fract() == 0.0 && value.abs() <= EXACT_INTEGER_LIMIT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

/// `salesTrend` entry: one per record, source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: String,
    pub price: f64,
}

/// `Price_Trend` entry (legacy shape): month index + price, source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegacyTrendPoint {
    #[serde(rename = "Month")]
    pub month: u32,
    #[serde(rename = "Price")]
    pub price: f64,
}

/// `productPerformance` entry: units summed per `Mon YYYY` period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodUnits {
    pub product: String,
    #[serde(serialize_with = "serialize_quantity")]
    pub units: f64,
}

/// `seasonalTrends` entry: units summed per short month label across years.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonalSales {
    pub month: String,
    #[serde(serialize_with = "serialize_quantity")]
    pub sales: f64,
}

/// `salesDistribution` entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandCount {
    pub category: String,
    pub value: usize,
}

/// Fixed price bands.
///
/// `Medium` is the closed interval `[11, 12]`, so a price of exactly 11 or 12
/// counts as Medium and the three bands partition every finite price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceBand {
    High,
    Medium,
    Low,
}

impl PriceBand {
    pub const ALL: [PriceBand; 3] = [PriceBand::High, PriceBand::Medium, PriceBand::Low];

    pub fn classify(price: f64) -> Self {
        if price > 12.0 {
            PriceBand::High
        } else if price >= 11.0 {
            PriceBand::Medium
        } else {
            PriceBand::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceBand::High => "High (>12)",
            PriceBand::Medium => "Medium (11-12)",
            PriceBand::Low => "Low (<11)",
        }
    }
}

pub fn sales_trend(records: &[FeatureRecord]) -> Vec<TrendPoint> {
    records
        .iter()
        .map(|r| TrendPoint {
            month: r.calendar.period_label.clone(),
            price: r.price(),
        })
        .collect()
}

pub fn legacy_price_trend(records: &[FeatureRecord]) -> Vec<LegacyTrendPoint> {
    records
        .iter()
        .map(|r| LegacyTrendPoint {
            month: r.calendar.month,
            price: r.price(),
        })
        .collect()
}

/// Units per `Mon YYYY` label, labels in first-seen order.
pub fn period_performance(records: &[FeatureRecord]) -> Vec<PeriodUnits> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut out: Vec<PeriodUnits> = Vec::new();
    for r in records {
        let label = r.calendar.period_label.as_str();
        match slots.get(label) {
            Some(&slot) => out[slot].units += r.units_sold(),
            None => {
                slots.insert(label, out.len());
                out.push(PeriodUnits {
                    product: label.to_string(),
                    units: r.units_sold(),
                });
            }
        }
    }
    out
}

/// Units per short month label across years, calendar order (Jan..Dec).
///
/// Months with no records are omitted.
pub fn seasonal_summary(records: &[FeatureRecord]) -> Vec<SeasonalSales> {
    let mut totals: [Option<f64>; 12] = [None; 12];
    for r in records {
        let slot = &mut totals[(r.calendar.month - 1) as usize];
        *slot = Some(slot.unwrap_or(0.0) + r.units_sold());
    }

    (1..=12u32)
        .zip(totals)
        .filter_map(|(month, total)| {
            Some(SeasonalSales {
                month: month_label(month)?,
                sales: total?,
            })
        })
        .collect()
}

/// Record count per price band, in `High, Medium, Low` order.
pub fn price_distribution(records: &[FeatureRecord]) -> Vec<BandCount> {
    PriceBand::ALL
        .iter()
        .map(|&band| BandCount {
            category: band.label().to_string(),
            value: records
                .iter()
                .filter(|r| PriceBand::classify(r.price()) == band)
                .count(),
        })
        .collect()
}
