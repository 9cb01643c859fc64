//! Synthetic daily stock/demand series for the dashboard chart.
//!
//! Values are derived deterministically from the current totals: each day
//! gets a small weekly wobble around 90% of the base.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Number of days covered by a KPI query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiRange {
    days: u32,
}

impl KpiRange {
    pub const DEFAULT_DAYS: u32 = 7;
    pub const MAX_DAYS: u32 = 366;

    pub fn days(self) -> u32 {
        self.days
    }

    /// `7d`, `30d`/`1m`, `90d`/`3m`, or a leading positive day count.
    /// Anything else falls back to seven days.
    pub fn parse(text: &str) -> Self {
        let lower = text.trim().to_ascii_lowercase();
        let days = match lower.as_str() {
            "7d" => 7,
            "30d" | "1m" => 30,
            "90d" | "3m" => 90,
            other => Self::leading_count(other).unwrap_or(Self::DEFAULT_DAYS),
        };
        Self { days }
    }

    fn leading_count(text: &str) -> Option<u32> {
        let digits = text.strip_prefix('+').unwrap_or(text);
        let end = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        let digits = &digits[..end];
        if digits.is_empty() {
            return None;
        }
        let n = digits.parse::<u64>().unwrap_or(u64::MAX);
        if n == 0 {
            return None;
        }
        Some(u32::try_from(n.min(u64::from(Self::MAX_DAYS))).unwrap_or(Self::MAX_DAYS))
    }
}

impl Default for KpiRange {
    fn default() -> Self {
        Self {
            days: Self::DEFAULT_DAYS,
        }
    }
}

/// One day of the series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KpiPoint {
    pub date: NaiveDate,
    pub stock: u64,
    pub demand: u64,
}

fn wobble(base: u64, offset: u64) -> u64 {
    let factor = 0.9 + ((offset % 7) as f64 - 3.0) * 0.02;
    let value = (base as f64 * factor).round();
    if value <= 0.0 { 0 } else { value as u64 }
}

/// Series ending at `today`, oldest first.
pub fn kpi_series(
    base_stock: u64,
    base_demand: u64,
    today: NaiveDate,
    range: KpiRange,
) -> Vec<KpiPoint> {
    (0..u64::from(range.days()))
        .rev()
        .filter_map(|i| {
            let date = today.checked_sub_days(Days::new(i))?;
            Some(KpiPoint {
                date,
                stock: wobble(base_stock, i),
                demand: wobble(base_demand, i + 3),
            })
        })
        .collect()
}
